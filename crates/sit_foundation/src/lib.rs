// crates/sit_foundation/src/lib.rs

//! Standard Interface Template Foundation Layer
//!
//! 基础层，提供整个工作区共享的最小抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型 `SitError`
//! - [`ids`]: 组件 ID 与要素 ID 的类型别名和保留值
//!
//! # 示例
//!
//! ```
//! use sit_foundation::error::{SitError, SitResult};
//! use sit_foundation::ids::{ComponentId, UNASSIGNED_COMPONENT_ID};
//!
//! fn lookup(id: ComponentId) -> SitResult<ComponentId> {
//!     if id < UNASSIGNED_COMPONENT_ID {
//!         return Err(SitError::invalid_input("组件 ID 不能为负"));
//!     }
//!     Ok(id)
//! }
//!
//! assert!(lookup(-3).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod ids;

// 重导出常用类型
pub use error::{SitError, SitResult};
pub use ids::{normalize_component_id, ComponentId, FeatureId, UNASSIGNED_COMPONENT_ID};
