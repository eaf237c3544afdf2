// crates/sit_mesh/src/error.rs
//! 网格处理错误类型
//!
//! 包含单元流格式、索引越界和网格文件读写错误。
//! 所有错误可转换为 `sit_foundation::SitError` 向上传播。

use sit_foundation::SitError;
use thiserror::Error;

/// 网格模块结果类型
pub type MeshResult<T> = Result<T, MeshError>;

/// 网格错误枚举
#[derive(Error, Debug)]
pub enum MeshError {
    /// 单元流格式错误
    #[error("单元流格式错误: 偏移 {offset}, {message}")]
    InvalidCellStream { offset: usize, message: String },

    /// 单元引用了不存在的节点
    #[error("节点索引越界: 单元 {cell} 引用节点 {node}, 节点总数 {n_nodes}")]
    NodeOutOfRange {
        cell: usize,
        node: usize,
        n_nodes: usize,
    },

    /// 单元索引越界
    #[error("单元索引越界: {cell}, 单元总数 {n_cells}")]
    CellOutOfRange { cell: usize, n_cells: usize },

    /// 网格文件 IO 错误
    #[error("网格文件 IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 网格文件序列化错误
    #[error("网格文件序列化错误: {0}")]
    Serialization(String),
}

impl MeshError {
    pub fn invalid_cellstream(offset: usize, message: impl Into<String>) -> Self {
        Self::InvalidCellStream {
            offset,
            message: message.into(),
        }
    }
}

/// 转换到 Foundation 层错误
impl From<MeshError> for SitError {
    fn from(err: MeshError) -> Self {
        match err {
            MeshError::InvalidCellStream { offset, message } => {
                SitError::invalid_input(format!("单元流格式错误 [偏移 {offset}]: {message}"))
            }
            MeshError::NodeOutOfRange {
                cell,
                node,
                n_nodes,
            } => SitError::invalid_input(format!(
                "单元 {cell} 引用节点 {node}, 但网格只有 {n_nodes} 个节点"
            )),
            MeshError::CellOutOfRange { cell, n_cells } => {
                SitError::not_found(format!("单元 {cell} (单元总数 {n_cells})"))
            }
            MeshError::Io(e) => SitError::io_with_source("网格文件读写失败", e),
            MeshError::Serialization(msg) => SitError::serialization(msg),
        }
    }
}
