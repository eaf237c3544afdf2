// crates/sit_coverage/src/lib.rs

//! Standard Interface Template 覆盖层模块
//!
//! 覆盖层是叠加在网格上的矢量要素（点、弧、多边形），要素通过组件 ID
//! 关联到属性表中的一行。本 crate 提供：
//!
//! - [`geometry`]: 覆盖层几何 `Coverage`
//! - [`feature_map`]: 要素 → 组件 ID 映射，按 (覆盖层 UUID, 要素类型) 分区
//! - [`table`]: 通用属性表 `AttributeTable`，保证未指定行始终存在、ID 不复用
//! - [`material_table`] / [`bc_table`]: 材质与边界条件行
//! - [`palette`]: 材质显示颜色与纹理
//! - [`arc_builder`]: 从网格节点序列重建覆盖层弧
//! - [`component`]: 覆盖层 + 属性表 + 要素映射的组合，删除行时级联
//! - [`store`] / [`schema`]: 组件持久化与带版本的数据结构

#![warn(clippy::all)]

pub mod arc_builder;
pub mod bc_table;
pub mod component;
pub mod error;
pub mod feature_map;
pub mod geometry;
pub mod material_table;
pub mod option;
pub mod palette;
pub mod schema;
pub mod store;
pub mod table;

pub use arc_builder::CoverageArcBuilder;
pub use bc_table::{BoundaryRow, BoundaryTable};
pub use component::{BoundaryCoverage, CoverageComponent, MaterialsCoverage};
pub use error::{CoverageError, CoverageResult};
pub use feature_map::{FeatureCompIdMap, FeatureKind};
pub use geometry::{Coverage, CoverageArc, CoveragePolygon};
pub use material_table::{MaterialRow, MaterialsTable, UNASSIGNED_MATERIAL_NAME};
pub use option::{UserOption, DEFAULT_USER_TEXT};
pub use palette::{palette, PolygonTexture, Rgb, PALETTE};
pub use schema::{BoundaryComponentData, MaterialsComponentData, SimulationData, SCHEMA_VERSION};
pub use store::{ComponentStore, JsonFileStore, MemoryStore, StoreError};
pub use table::{AttributeRow, AttributeTable};
