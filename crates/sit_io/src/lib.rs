// crates/sit_io/src/lib.rs

//! Standard Interface Template 文件读写
//!
//! 模型的四种文本文件（几何、材质、边界条件、模拟清单）以及求解结果、
//! 进度回显的读写。所有文件都是按行的 ASCII 文本，`#` 开头的行为注释，
//! 自由文本用 shell 风格的引号包裹。
//!
//! 文件内的节点和单元编号从 1 开始，内存中从 0 开始。
//!
//! # 示例
//!
//! ```rust
//! use std::io::Cursor;
//! use sit_io::boundary::BoundaryConditionsReader;
//!
//! let text = "BC 1 C \"Hello World!\"\nPoints: 19 20 21\n";
//! let data = BoundaryConditionsReader::read_from_reader(Cursor::new(text)).unwrap();
//! assert_eq!(data.arc_nodes(1), Some(&[18, 19, 20][..]));
//! ```

#![warn(clippy::all)]

pub mod boundary;
pub mod error;
pub mod format;
pub mod geometry;
mod lines;
pub mod materials;
pub mod progress;
pub mod simulation;
pub mod solution;
pub mod tokenizer;

pub use boundary::{BoundaryConditionsData, BoundaryConditionsReader, BoundaryConditionsWriter};
pub use error::{IoError, IoResult};
pub use format::FileKind;
pub use geometry::{GeometryData, GeometryReader, GeometryWriter};
pub use materials::{MaterialsData, MaterialsReader, MaterialsWriter};
pub use progress::ProgressTracker;
pub use simulation::{SimulationManifest, SimulationReader, SimulationWriter};
pub use solution::SolutionReader;
