// apps/sit_cli/src/commands/mod.rs

//! 子命令实现

pub mod check;
pub mod model;
pub mod run;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use sit_coverage::{ComponentStore, JsonFileStore};
use sit_io::ProgressTracker;
use sit_workflow::{
    CommandContext, CommandRegistry, ComponentCommand, LoggingListener, SimulationModel,
    WorkerOutput, WorkerRunner, WorkflowConfig,
};
use tracing::info;

/// 一次命令行调用：配置、工程和运行器
pub struct Session {
    store: JsonFileStore,
    pub config: WorkflowConfig,
    pub model: SimulationModel,
    runner: WorkerRunner,
}

impl Session {
    pub fn open(project: PathBuf, config: Option<&Path>) -> Result<Self> {
        let config = match config {
            Some(path) => WorkflowConfig::load(path)
                .with_context(|| format!("无法加载配置: {}", path.display()))?,
            None => WorkflowConfig::default(),
        };

        let store = JsonFileStore::open(project);
        let model = SimulationModel::load_from(&store)
            .with_context(|| format!("无法读取工程: {}", store.path().display()))?;

        let runner = WorkerRunner::new(CommandRegistry::with_defaults());
        runner
            .dispatcher()
            .add_listener(Arc::new(LoggingListener::new("sit")));

        Ok(Self {
            store,
            config,
            model,
            runner,
        })
    }

    /// 在工作线程上执行命令
    pub fn run(&mut self, command: ComponentCommand, input: Option<PathBuf>) -> Result<WorkerOutput> {
        self.config.validate()?;
        let context = CommandContext {
            config: self.config.clone(),
            model: std::mem::take(&mut self.model),
            input,
        };
        let output = self
            .runner
            .run(command, context)
            .with_context(|| format!("命令 {command} 失败"))?;
        self.model = output.context.model.clone();
        Ok(output)
    }

    /// 读取一次模型回显中的进度
    pub fn poll_progress(&self, tracker: &mut ProgressTracker) -> Result<Option<u32>> {
        Ok(self.runner.poll_progress(tracker)?)
    }

    /// 写回工程文件
    pub fn save(&self) -> Result<()> {
        self.model.save_to(&self.store)?;
        self.store
            .commit()
            .with_context(|| format!("无法保存工程: {}", self.store.path().display()))?;
        info!(path = %self.store.path().display(), "工程已保存");
        Ok(())
    }
}
