// crates/sit_workflow/src/runner.rs

//! 命令运行器
//!
//! 每个命令在独立的工作线程中顺序执行。开始时发出 `Started`，结束时无论成功、
//! 出错还是 panic 都发出一次 `Finished`。运行中不支持取消。

use std::any::Any;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use sit_io::ProgressTracker;
use tracing::{debug, error};

use crate::command::{CommandContext, CommandOutcome, CommandRegistry, ComponentCommand};
use crate::error::{WorkflowError, WorkflowResult};
use crate::events::{EventDispatcher, WorkflowEvent};

/// 工作线程的产出
#[derive(Debug)]
pub struct WorkerOutput {
    /// 运行后的上下文（导入会替换其中的模型）
    pub context: CommandContext,
    pub outcome: CommandOutcome,
}

/// 离开作用域时发出 `Finished`
struct FinishGuard {
    dispatcher: Arc<EventDispatcher>,
    command: ComponentCommand,
    success: bool,
}

impl Drop for FinishGuard {
    fn drop(&mut self) {
        self.dispatcher.emit(WorkflowEvent::Finished {
            command: self.command,
            success: self.success,
        });
    }
}

/// 运行中的命令
pub struct WorkerHandle {
    command: ComponentCommand,
    handle: JoinHandle<WorkflowResult<WorkerOutput>>,
}

impl WorkerHandle {
    pub fn command(&self) -> ComponentCommand {
        self.command
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// 等待结束；线程 panic 转为 [`WorkflowError::Worker`]
    pub fn join(self) -> WorkflowResult<WorkerOutput> {
        self.handle
            .join()
            .map_err(|payload| WorkflowError::Worker(panic_message(payload.as_ref())))?
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "未知 panic".to_string()
    }
}

/// 命令运行器
#[derive(Debug)]
pub struct WorkerRunner {
    registry: Arc<CommandRegistry>,
    dispatcher: Arc<EventDispatcher>,
}

impl WorkerRunner {
    pub fn new(registry: CommandRegistry) -> Self {
        Self::with_dispatcher(registry, Arc::new(EventDispatcher::new()))
    }

    pub fn with_dispatcher(registry: CommandRegistry, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            registry: Arc::new(registry),
            dispatcher,
        }
    }

    pub fn dispatcher(&self) -> &Arc<EventDispatcher> {
        &self.dispatcher
    }

    /// 在新线程中执行命令
    pub fn spawn(&self, command: ComponentCommand, mut context: CommandContext) -> WorkflowResult<WorkerHandle> {
        let registry = Arc::clone(&self.registry);
        let dispatcher = Arc::clone(&self.dispatcher);

        let handle = thread::Builder::new()
            .name(format!("sit-{command}"))
            .spawn(move || {
                dispatcher.emit(WorkflowEvent::Started { command });
                let mut guard = FinishGuard {
                    dispatcher: Arc::clone(&dispatcher),
                    command,
                    success: false,
                };

                let outcome = match registry.dispatch(command, &mut context) {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        error!(%command, "命令失败: {e}");
                        return Err(e);
                    }
                };
                for message in outcome.messages() {
                    dispatcher.emit(WorkflowEvent::Diagnostic { message });
                }
                guard.success = true;
                Ok(WorkerOutput { context, outcome })
            })
            .map_err(|e| WorkflowError::Worker(format!("无法启动工作线程: {e}")))?;

        debug!(%command, "工作线程已启动");
        Ok(WorkerHandle { command, handle })
    }

    /// 执行命令并等待结束
    pub fn run(&self, command: ComponentCommand, context: CommandContext) -> WorkflowResult<WorkerOutput> {
        self.spawn(command, context)?.join()
    }

    /// 读取模型回显中的新进度，有更新时发出 `Progress`
    pub fn poll_progress(&self, tracker: &mut ProgressTracker) -> WorkflowResult<Option<u32>> {
        let percent = tracker.poll()?;
        if let Some(percent) = percent {
            self.dispatcher.emit(WorkflowEvent::Progress { percent });
        }
        Ok(percent)
    }
}
