// crates/sit_workflow/src/run.rs

//! 模型运行描述
//!
//! 描述宿主如何启动模型可执行程序、如何跟踪进度、运行结束后如何加载结果。
//! 本模块只产生描述，不启动进程。

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sit_io::FileKind;

/// 模型名称与可执行程序名
pub const MODEL_NAME: &str = "SimulationInterfaceTemplate";
/// 显示名称
pub const MODEL_DISPLAY_NAME: &str = "Simulation Interface Template";
/// 进度脚本
pub const PROGRESS_SCRIPT: &str = "simulation_progress.py";

/// 运行结束后的结果加载动作
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionLoadAction {
    /// 处理该动作的命令名
    pub method: String,
    pub project_name: String,
    pub file_location: PathBuf,
}

/// 一个可执行程序的启动描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutableCommand {
    pub executable: String,
    pub model: String,
    pub display_name: String,
    /// 多个程序按此顺序运行
    pub order: u32,
    /// 进度条中的权重
    pub run_weight: u32,
    pub arguments: Vec<String>,
    pub progress_script: String,
    pub load_actions: Vec<SolutionLoadAction>,
}

/// 模拟运行
pub struct SimulationRun;

impl SimulationRun {
    /// 运行一个模拟所需的可执行程序（当前只有一个）
    pub fn executables(project_name: &str, file_location: impl AsRef<Path>) -> Vec<ExecutableCommand> {
        let file_location = file_location.as_ref().to_path_buf();
        let load = SolutionLoadAction {
            method: "read_solution".to_string(),
            project_name: project_name.to_string(),
            file_location,
        };
        vec![ExecutableCommand {
            executable: MODEL_NAME.to_string(),
            model: MODEL_NAME.to_string(),
            display_name: MODEL_DISPLAY_NAME.to_string(),
            order: 0,
            run_weight: 100,
            arguments: vec![FileKind::Simulation.file_name(project_name)],
            progress_script: PROGRESS_SCRIPT.to_string(),
            load_actions: vec![load],
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executables() {
        let cmds = SimulationRun::executables("bay", "/runs/bay");
        assert_eq!(cmds.len(), 1);
        let cmd = &cmds[0];
        assert_eq!(cmd.executable, "SimulationInterfaceTemplate");
        assert_eq!(cmd.arguments, vec!["bay.example_simulation".to_string()]);
        assert_eq!(cmd.run_weight, 100);
        assert_eq!(cmd.load_actions[0].method, "read_solution");
        assert_eq!(cmd.load_actions[0].file_location, PathBuf::from("/runs/bay"));
    }
}
