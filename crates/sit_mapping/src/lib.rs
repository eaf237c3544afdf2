// crates/sit_mapping/src/lib.rs

//! 覆盖层到网格的映射
//!
//! - 材质：多边形 → 单元，每个单元恰好落入一个材质桶（含未指定桶 0）
//! - 边界条件：弧 → 外边界节点序列，按弧序号（1 基）输出
//!
//! 单个要素捕捉失败不会中断映射，失败记录在结果的诊断列表中。
//! 网格缺失时映射整体失败。

#![warn(clippy::all)]

pub mod boundary_mapper;
pub mod coverage_mapper;
pub mod diagnostic;
pub mod display;
pub mod error;
pub mod material_mapper;

pub use boundary_mapper::{BoundaryMapper, BoundaryMapping};
pub use coverage_mapper::{CoverageMapper, CoverageMapping};
pub use diagnostic::MappingDiagnostic;
pub use display::{SnapPreview, SnapPreviewWriter, DISPLAY_IDS_DIR};
pub use error::{MappingError, MappingResult};
pub use material_mapper::{MaterialMapper, MaterialMapping};
