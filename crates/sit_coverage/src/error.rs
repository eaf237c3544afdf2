// crates/sit_coverage/src/error.rs

//! 覆盖层错误类型
//!
//! 属性表的领域约束失败（重名、删除未指定行等）在这里是独立类型，
//! 调用方可以恢复（例如重新弹出编辑对话框）。

use sit_foundation::{ComponentId, FeatureId, SitError};
use thiserror::Error;

use crate::feature_map::FeatureKind;
use crate::store::StoreError;

/// 覆盖层模块结果类型
pub type CoverageResult<T> = Result<T, CoverageError>;

/// 覆盖层错误
#[derive(Debug, Error)]
pub enum CoverageError {
    /// 名称与其它行冲突
    #[error("名称已存在: {name}")]
    DuplicateName { name: String },

    /// 未指定行的名称不可修改
    #[error("未指定行的名称不可修改")]
    UnassignedImmutable,

    /// 未指定行不可删除
    #[error("未指定行不可删除")]
    CannotDeleteUnassigned,

    /// 组件 ID 不存在
    #[error("组件不存在: {id}")]
    ComponentNotFound { id: ComponentId },

    /// 组件 ID 重复
    #[error("组件 ID 重复: {id}")]
    DuplicateComponent { id: ComponentId },

    /// 选项值不在 A/B/C 之内
    #[error("无效选项: {value}")]
    InvalidOption { value: String },

    /// 要素不存在
    #[error("{kind:?} 要素不存在: {id}")]
    FeatureNotFound { kind: FeatureKind, id: FeatureId },

    /// 网格节点索引越界
    #[error("节点索引越界: {node}, 节点总数 {n_nodes}")]
    NodeOutOfRange { node: usize, n_nodes: usize },

    /// 持久化数据的版本高于当前支持的版本
    #[error("不支持的数据版本: {found} (支持 {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },

    /// 存储错误
    #[error("存储错误: {0}")]
    Store(#[from] StoreError),
}

impl From<CoverageError> for SitError {
    fn from(err: CoverageError) -> Self {
        match err {
            CoverageError::ComponentNotFound { id } => SitError::not_found(format!("组件 {id}")),
            CoverageError::FeatureNotFound { kind, id } => {
                SitError::not_found(format!("{kind:?} 要素 {id}"))
            }
            CoverageError::InvalidOption { value } => {
                SitError::invalid_input(format!("无效选项: {value}"))
            }
            CoverageError::NodeOutOfRange { .. } => SitError::invalid_input(err.to_string()),
            CoverageError::Store(StoreError::Io(e)) => SitError::io_with_source("组件存储读写失败", e),
            CoverageError::Store(StoreError::Serialization(msg)) => SitError::serialization(msg),
            CoverageError::Store(StoreError::Closed) => SitError::internal("组件存储已关闭"),
            other => SitError::validation(other.to_string()),
        }
    }
}
