// crates/sit_io/src/error.rs
//! IO 错误类型定义
//!
//! 格式错误一律作为读取失败交给调用方，不做部分恢复。
//! 所有错误可转换为 SitError 跨层传递。

use sit_foundation::SitError;
use sit_mesh::MeshError;
use thiserror::Error;

/// IO 模块结果类型别名
pub type IoResult<T> = Result<T, IoError>;

/// IO 错误枚举
#[derive(Error, Debug)]
pub enum IoError {
    /// 解析错误
    #[error("文件解析错误: {file}:{line} - {message}")]
    ParseError {
        file: String,
        line: usize,
        message: String,
    },

    /// 文件打开失败
    #[error("无法打开文件 {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 读写错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 网格构建错误
    #[error("网格错误: {0}")]
    Mesh(#[from] MeshError),

    /// 基础层错误转换
    #[error("基础层错误: {0}")]
    Foundation(#[from] SitError),
}

impl IoError {
    pub fn parse(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            file: file.into(),
            line,
            message: message.into(),
        }
    }
}

impl From<IoError> for SitError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::ParseError {
                file,
                line,
                message,
            } => SitError::parse(file, line, message),
            IoError::Open { path, source } => {
                if source.kind() == std::io::ErrorKind::NotFound {
                    SitError::file_not_found(path)
                } else {
                    SitError::io_with_source(format!("无法打开文件 {path}"), source)
                }
            }
            IoError::Io(e) => SitError::io_with_source("文件读写失败", e),
            IoError::Mesh(e) => e.into(),
            IoError::Foundation(e) => e,
        }
    }
}
