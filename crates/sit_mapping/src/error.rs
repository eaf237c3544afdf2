// crates/sit_mapping/src/error.rs
//! 映射错误类型定义
//!
//! 单个要素的捕捉失败不是错误，见 [`crate::MappingDiagnostic`]。

use sit_foundation::SitError;
use sit_mesh::MeshError;
use thiserror::Error;

/// 映射模块结果类型别名
pub type MappingResult<T> = Result<T, MappingError>;

/// 映射错误枚举
#[derive(Error, Debug)]
pub enum MappingError {
    /// 没有网格
    #[error("没有可用的网格，无法映射")]
    MissingMesh,

    /// 没有覆盖层
    #[error("没有{0}覆盖层，无法映射")]
    MissingCoverage(&'static str),

    /// 覆盖层缺少属性表
    #[error("{0}覆盖层缺少属性表")]
    MissingTable(&'static str),

    /// 网格访问错误
    #[error("网格错误: {0}")]
    Mesh(#[from] MeshError),

    /// 预览文件读写错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 预览文件序列化错误
    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<MappingError> for SitError {
    fn from(err: MappingError) -> Self {
        match err {
            MappingError::Io(e) => SitError::io_with_source("捕捉预览写出失败", e),
            MappingError::Serialization(e) => SitError::serialization(e.to_string()),
            MappingError::Mesh(e) => e.into(),
            other => SitError::validation(other.to_string()),
        }
    }
}
