// crates/sit_workflow/src/events.rs

//! 事件系统模块
//!
//! 命令运行过程中的事件定义和分发。

use parking_lot::RwLock;
use std::sync::Arc;

use crate::command::ComponentCommand;

/// 工作流事件
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    /// 命令开始
    Started {
        command: ComponentCommand,
    },
    /// 进度更新 (0-100)
    Progress {
        percent: u32,
    },
    /// 映射诊断或模型检查结果
    Diagnostic {
        message: String,
    },
    /// 命令结束，无论成功与否都会发出
    Finished {
        command: ComponentCommand,
        success: bool,
    },
}

impl WorkflowEvent {
    /// 获取事件名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Started { .. } => "Started",
            Self::Progress { .. } => "Progress",
            Self::Diagnostic { .. } => "Diagnostic",
            Self::Finished { .. } => "Finished",
        }
    }
}

/// 事件监听器trait
pub trait EventListener: Send + Sync {
    /// 处理事件
    fn on_event(&self, event: &WorkflowEvent);

    /// 获取监听器名称 (用于调试)
    fn name(&self) -> &str {
        "anonymous"
    }
}

/// 函数式事件监听器
pub struct FnListener<F>
where
    F: Fn(&WorkflowEvent) + Send + Sync,
{
    name: String,
    handler: F,
}

impl<F> FnListener<F>
where
    F: Fn(&WorkflowEvent) + Send + Sync,
{
    pub fn new(name: impl Into<String>, handler: F) -> Self {
        Self {
            name: name.into(),
            handler,
        }
    }
}

impl<F> EventListener for FnListener<F>
where
    F: Fn(&WorkflowEvent) + Send + Sync,
{
    fn on_event(&self, event: &WorkflowEvent) {
        (self.handler)(event);
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// 日志事件监听器
pub struct LoggingListener {
    prefix: String,
    /// 是否输出进度事件
    verbose: bool,
}

impl LoggingListener {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            verbose: false,
        }
    }

    /// 设置详细模式
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}

impl EventListener for LoggingListener {
    fn on_event(&self, event: &WorkflowEvent) {
        let msg = match event {
            WorkflowEvent::Started { command } => format!("{command} 开始"),
            WorkflowEvent::Finished { command, success: true } => format!("{command} 完成"),
            WorkflowEvent::Finished { command, success: false } => format!("{command} 失败"),
            WorkflowEvent::Diagnostic { message } => message.clone(),
            WorkflowEvent::Progress { percent } if self.verbose => format!("进度 {percent}%"),
            WorkflowEvent::Progress { .. } => return,
        };

        tracing::info!("{}: {}", self.prefix, msg);
    }

    fn name(&self) -> &str {
        "LoggingListener"
    }
}

/// 事件分发器
#[derive(Default)]
pub struct EventDispatcher {
    listeners: RwLock<Vec<Arc<dyn EventListener>>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// 添加监听器
    pub fn add_listener(&self, listener: Arc<dyn EventListener>) {
        let name = listener.name().to_string();
        self.listeners.write().push(listener);
        tracing::debug!("添加事件监听器: {}", name);
    }

    /// 添加函数式监听器
    pub fn add_fn_listener<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&WorkflowEvent) + Send + Sync + 'static,
    {
        self.add_listener(Arc::new(FnListener::new(name, handler)));
    }

    /// 移除监听器
    pub fn remove_listener(&self, listener: &Arc<dyn EventListener>) {
        self.listeners.write().retain(|l| !Arc::ptr_eq(l, listener));
    }

    pub fn clear(&self) {
        self.listeners.write().clear();
    }

    /// 分发事件
    pub fn emit(&self, event: WorkflowEvent) {
        let listeners = self.listeners.read();
        tracing::trace!("分发事件: {}", event.name());
        for listener in listeners.iter() {
            listener.on_event(&event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listener_count", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_event_dispatcher() {
        let dispatcher = EventDispatcher::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        dispatcher.add_fn_listener("test", move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        let command = ComponentCommand::ModelCheck;
        dispatcher.emit(WorkflowEvent::Started { command });
        dispatcher.emit(WorkflowEvent::Finished {
            command,
            success: true,
        });

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_remove_listener() {
        let dispatcher = EventDispatcher::new();
        let listener: Arc<dyn EventListener> = Arc::new(LoggingListener::new("sit").verbose());
        dispatcher.add_listener(listener.clone());
        dispatcher.add_fn_listener("noop", |_| {});
        assert_eq!(dispatcher.listener_count(), 2);

        dispatcher.emit(WorkflowEvent::Progress { percent: 40 });
        dispatcher.remove_listener(&listener);
        assert_eq!(dispatcher.listener_count(), 1);
        dispatcher.clear();
        assert_eq!(dispatcher.listener_count(), 0);
    }

    #[test]
    fn test_event_name() {
        let event = WorkflowEvent::Diagnostic {
            message: "x".into(),
        };
        assert_eq!(event.name(), "Diagnostic");
    }
}
