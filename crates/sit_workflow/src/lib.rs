// crates/sit_workflow/src/lib.rs

//! Standard Interface Template 工作流
//!
//! 组合网格、覆盖层、文件读写和映射，提供宿主菜单触发的各项操作。
//!
//! # 模块结构
//!
//! - [`model`]: 模拟工程（模拟属性、网格、两个覆盖层）及其持久化
//! - [`import`] / [`export`]: 模型文件组的导入与导出
//! - [`check`]: 模型检查
//! - [`solution`] / [`run`]: 求解结果加载与运行描述
//! - [`command`]: 方法名 → 处理函数的命令注册表
//! - [`runner`] / [`events`]: 工作线程运行与事件分发
//! - [`config`]: 运行配置
//!
//! # 示例
//!
//! ```rust,ignore
//! use sit_workflow::{CommandContext, CommandRegistry, ComponentCommand, WorkerRunner};
//!
//! let runner = WorkerRunner::new(CommandRegistry::with_defaults());
//! runner.dispatcher().add_listener(Arc::new(LoggingListener::new("sit")));
//!
//! let ctx = CommandContext::default().with_input("bay.example_simulation");
//! let output = runner.run(ComponentCommand::ImportSimulation, ctx)?;
//! let output = runner.run(ComponentCommand::ExportSimulation, output.context)?;
//! ```

#![warn(clippy::all)]

pub mod cell_coverage;
pub mod check;
pub mod command;
pub mod config;
pub mod error;
pub mod events;
pub mod export;
pub mod import;
pub mod model;
pub mod run;
pub mod runner;
pub mod solution;

// 重导出核心类型
pub use cell_coverage::{CellCoverage, CellCoverageBuilder};
pub use check::{ModelCheckError, SimulationCheck};
pub use command::{CommandContext, CommandHandler, CommandOutcome, CommandRegistry, ComponentCommand};
pub use config::WorkflowConfig;
pub use error::{WorkflowError, WorkflowResult};
pub use events::{EventDispatcher, EventListener, FnListener, LoggingListener, WorkflowEvent};
pub use export::{ExportOutcome, SimulationExporter};
pub use import::{SimulationImporter, GRID_FILE_NAME};
pub use model::{HorizontalUnits, SimulationGrid, SimulationModel};
pub use run::{ExecutableCommand, SimulationRun, SolutionLoadAction};
pub use runner::{WorkerHandle, WorkerOutput, WorkerRunner};
pub use solution::{SolutionDataset, SolutionLoader};
