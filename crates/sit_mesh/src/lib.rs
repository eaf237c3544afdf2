// crates/sit_mesh/src/lib.rs

//! Standard Interface Template 网格模块
//!
//! 提供非结构网格（节点坐标 + 扁平单元流）及覆盖层映射所需的几何查询。
//!
//! # 核心类型
//!
//! - [`UGrid`]: 只读非结构网格，单元以 `[类型, 点数, 索引...]` 的扁平单元流编码
//! - [`SnapPolygon`]: 多边形 → 单元捕捉（单元形心包含测试）
//! - [`SnapExteriorArc`]: 弧 → 外边界节点捕捉
//!
//! # Trait 抽象
//!
//! 映射层只通过下列接口访问网格，外部几何库可以替换本 crate 的实现：
//!
//! - [`MeshProvider`]: 网格只读访问
//! - [`PolygonSnapper`]: 多边形包含查询
//! - [`ArcSnapper`]: 弧最近点捕捉
//!
//! # 示例
//!
//! ```rust
//! use glam::DVec3;
//! use sit_mesh::{MeshProvider, UGrid};
//!
//! let locations = vec![
//!     DVec3::new(0.0, 0.0, 0.0),
//!     DVec3::new(1.0, 0.0, 0.0),
//!     DVec3::new(0.0, 1.0, 0.0),
//! ];
//! let grid = UGrid::from_cells(locations, &[vec![0, 1, 2]]).unwrap();
//! assert_eq!(grid.cell_count(), 1);
//! assert_eq!(grid.cellstream(), &[5, 3, 0, 1, 2]);
//! ```

#![warn(clippy::all)]

pub mod boundary;
pub mod cell;
pub mod error;
pub mod geometry;
pub mod snap;
pub mod spatial_index;
pub mod traits;
pub mod ugrid;

// 重新导出核心类型
pub use boundary::{BoundaryExtractor, BoundaryLoop};
pub use cell::CellType;
pub use error::{MeshError, MeshResult};
pub use snap::{SnapExteriorArc, SnapPolygon};
pub use spatial_index::{CellEnvelope, MeshSpatialIndex};
pub use traits::{ArcSnapper, MeshProvider, PolygonSnapper, SnappedArc};
pub use ugrid::UGrid;
