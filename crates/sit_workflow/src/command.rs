// crates/sit_workflow/src/command.rs

//! 命令注册表
//!
//! 宿主菜单以方法名字符串触发命令。方法名先解析为 [`ComponentCommand`]，
//! 再在启动时建立的注册表中查到处理函数。

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use sit_mapping::{CoverageMapper, CoverageMapping, SnapPreviewWriter};
use tracing::info;

use crate::check::{ModelCheckError, SimulationCheck};
use crate::config::WorkflowConfig;
use crate::error::{WorkflowError, WorkflowResult};
use crate::export::{ExportOutcome, SimulationExporter};
use crate::import::SimulationImporter;
use crate::model::SimulationModel;
use crate::solution::{SolutionDataset, SolutionLoader};

/// 组件命令
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentCommand {
    ImportSimulation,
    ExportSimulation,
    ModelCheck,
    GenerateSnap,
    ReadSolution,
}

impl ComponentCommand {
    pub const ALL: [ComponentCommand; 5] = [
        Self::ImportSimulation,
        Self::ExportSimulation,
        Self::ModelCheck,
        Self::GenerateSnap,
        Self::ReadSolution,
    ];

    /// 宿主使用的方法名
    pub fn method_name(self) -> &'static str {
        match self {
            Self::ImportSimulation => "import_simulation",
            Self::ExportSimulation => "export_simulation",
            Self::ModelCheck => "model_check",
            Self::GenerateSnap => "generate_snap",
            Self::ReadSolution => "read_solution",
        }
    }
}

impl fmt::Display for ComponentCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

impl FromStr for ComponentCommand {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.method_name() == s)
            .ok_or_else(|| WorkflowError::UnknownCommand(s.to_string()))
    }
}

/// 命令运行上下文
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    pub config: WorkflowConfig,
    pub model: SimulationModel,
    /// 命令输入文件（导入时为模拟清单，读结果时为结果文件）
    pub input: Option<PathBuf>,
}

impl CommandContext {
    pub fn new(config: WorkflowConfig, model: SimulationModel) -> Self {
        Self {
            config,
            model,
            input: None,
        }
    }

    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = Some(input.into());
        self
    }
}

/// 命令结果
#[derive(Debug, Clone)]
pub enum CommandOutcome {
    /// 模型已替换为导入结果
    Imported,
    Exported(ExportOutcome),
    Checked(Vec<ModelCheckError>),
    Snapped(CoverageMapping),
    Solution(SolutionDataset),
}

impl CommandOutcome {
    /// 需要报告给用户的消息
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Imported | Self::Solution(_) => Vec::new(),
            Self::Exported(outcome) => outcome.mapping.diagnostics().map(|d| d.to_string()).collect(),
            Self::Snapped(mapping) => mapping.diagnostics().map(|d| d.to_string()).collect(),
            Self::Checked(errors) => errors.iter().map(|e| e.problem.clone()).collect(),
        }
    }
}

/// 命令处理函数
pub type CommandHandler = fn(&mut CommandContext) -> WorkflowResult<CommandOutcome>;

/// 命令注册表
#[derive(Clone, Default)]
pub struct CommandRegistry {
    handlers: HashMap<ComponentCommand, CommandHandler>,
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut commands: Vec<&'static str> = self.handlers.keys().map(|c| c.method_name()).collect();
        commands.sort_unstable();
        f.debug_struct("CommandRegistry")
            .field("commands", &commands)
            .finish()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册全部内置命令
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ComponentCommand::ImportSimulation, import_simulation);
        registry.register(ComponentCommand::ExportSimulation, export_simulation);
        registry.register(ComponentCommand::ModelCheck, model_check);
        registry.register(ComponentCommand::GenerateSnap, generate_snap);
        registry.register(ComponentCommand::ReadSolution, read_solution);
        registry
    }

    /// 注册处理函数，返回被替换的旧函数
    pub fn register(&mut self, command: ComponentCommand, handler: CommandHandler) -> Option<CommandHandler> {
        self.handlers.insert(command, handler)
    }

    pub fn contains(&self, command: ComponentCommand) -> bool {
        self.handlers.contains_key(&command)
    }

    pub fn dispatch(&self, command: ComponentCommand, ctx: &mut CommandContext) -> WorkflowResult<CommandOutcome> {
        let handler = self
            .handlers
            .get(&command)
            .ok_or_else(|| WorkflowError::UnknownCommand(command.to_string()))?;
        info!(%command, "执行命令");
        handler(ctx)
    }

    /// 按方法名执行
    pub fn dispatch_method(&self, method: &str, ctx: &mut CommandContext) -> WorkflowResult<CommandOutcome> {
        self.dispatch(method.parse()?, ctx)
    }
}

fn import_simulation(ctx: &mut CommandContext) -> WorkflowResult<CommandOutcome> {
    let input = ctx
        .input
        .as_ref()
        .ok_or_else(|| WorkflowError::missing("没有指定模拟文件"))?;
    ctx.model = SimulationImporter::new(&ctx.config.component_dir).import(input)?;
    Ok(CommandOutcome::Imported)
}

fn export_simulation(ctx: &mut CommandContext) -> WorkflowResult<CommandOutcome> {
    let exporter = SimulationExporter::new(&ctx.config.output_dir, &ctx.config.simulation_name);
    Ok(CommandOutcome::Exported(exporter.export(&ctx.model)?))
}

fn model_check(ctx: &mut CommandContext) -> WorkflowResult<CommandOutcome> {
    Ok(CommandOutcome::Checked(
        SimulationCheck::new(&ctx.model, &ctx.config).run(),
    ))
}

fn generate_snap(ctx: &mut CommandContext) -> WorkflowResult<CommandOutcome> {
    let model = &ctx.model;
    let mapping = CoverageMapper::new(model.ugrid())
        .with_materials(model.materials.as_ref())
        .with_boundary(model.boundary.as_ref())
        .with_preview(SnapPreviewWriter::new(&ctx.config.component_dir))
        .map()?;
    Ok(CommandOutcome::Snapped(mapping))
}

fn read_solution(ctx: &mut CommandContext) -> WorkflowResult<CommandOutcome> {
    let dataset = match &ctx.input {
        Some(path) => {
            let grid = ctx
                .model
                .grid
                .as_ref()
                .ok_or_else(|| WorkflowError::missing("没有网格，无法加载求解结果"))?;
            SolutionLoader::load_file(path, grid.uuid)?
        }
        None => SolutionLoader::new(&ctx.config.output_dir, &ctx.config.simulation_name)
            .load(&ctx.model)?,
    };
    Ok(CommandOutcome::Solution(dataset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method_names() {
        for command in ComponentCommand::ALL {
            assert_eq!(command.method_name().parse::<ComponentCommand>().unwrap(), command);
        }
        assert!(matches!(
            "open_dialog".parse::<ComponentCommand>(),
            Err(WorkflowError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_defaults_registered() {
        let registry = CommandRegistry::with_defaults();
        assert!(ComponentCommand::ALL.iter().all(|c| registry.contains(*c)));
    }

    #[test]
    fn test_unregistered_command() {
        let registry = CommandRegistry::new();
        let mut ctx = CommandContext::default();
        let err = registry.dispatch(ComponentCommand::ModelCheck, &mut ctx).unwrap_err();
        assert!(matches!(err, WorkflowError::UnknownCommand(_)));
    }

    #[test]
    fn test_dispatch_model_check() {
        let registry = CommandRegistry::with_defaults();
        let mut ctx = CommandContext::default();
        let outcome = registry.dispatch_method("model_check", &mut ctx).unwrap();
        assert_eq!(outcome.messages().len(), 3);
    }

    #[test]
    fn test_import_requires_input() {
        let registry = CommandRegistry::with_defaults();
        let mut ctx = CommandContext::default();
        let err = registry
            .dispatch(ComponentCommand::ImportSimulation, &mut ctx)
            .unwrap_err();
        assert!(matches!(err, WorkflowError::MissingPrerequisite(_)));
    }

    #[test]
    fn test_export_without_mesh() {
        let registry = CommandRegistry::with_defaults();
        let mut ctx = CommandContext::default();
        let err = registry
            .dispatch(ComponentCommand::ExportSimulation, &mut ctx)
            .unwrap_err();
        assert!(matches!(err, WorkflowError::MissingPrerequisite(_)));
    }
}
