// crates/sit_workflow/src/error.rs
//! 工作流错误类型定义

use sit_coverage::{CoverageError, StoreError};
use sit_foundation::SitError;
use sit_io::IoError;
use sit_mapping::MappingError;
use sit_mesh::MeshError;
use thiserror::Error;

/// 工作流结果类型别名
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// 工作流错误
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// 文件读写或格式错误
    #[error("文件错误: {0}")]
    File(#[from] IoError),

    /// 映射错误
    #[error("映射错误: {0}")]
    Mapping(#[from] MappingError),

    /// 覆盖层或属性表错误
    #[error("覆盖层错误: {0}")]
    Coverage(#[from] CoverageError),

    /// 网格错误
    #[error("网格错误: {0}")]
    Mesh(#[from] MeshError),

    /// 缺少前置数据（网格、覆盖层）
    #[error("缺少前置数据: {0}")]
    MissingPrerequisite(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 未知命令
    #[error("未知命令: {0}")]
    UnknownCommand(String),

    /// 工作线程异常退出
    #[error("工作线程异常退出: {0}")]
    Worker(String),
}

impl WorkflowError {
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingPrerequisite(what.into())
    }
}

impl From<StoreError> for WorkflowError {
    fn from(err: StoreError) -> Self {
        Self::Coverage(CoverageError::Store(err))
    }
}

impl From<WorkflowError> for SitError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::File(e) => e.into(),
            WorkflowError::Mapping(e) => e.into(),
            WorkflowError::Coverage(e) => e.into(),
            WorkflowError::Mesh(e) => e.into(),
            WorkflowError::MissingPrerequisite(msg) => SitError::not_found(msg),
            WorkflowError::Config(msg) => SitError::config(msg),
            WorkflowError::UnknownCommand(cmd) => SitError::invalid_input(format!("未知命令: {cmd}")),
            WorkflowError::Worker(msg) => SitError::internal(msg),
        }
    }
}
