// crates/sit_workflow/src/config.rs

//! 工作流运行配置
//!
//! 以 JSON 保存；缺少的字段取默认值。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{WorkflowError, WorkflowResult};

/// 工作流配置
///
/// # 示例
///
/// ```
/// use sit_workflow::WorkflowConfig;
///
/// let config: WorkflowConfig = serde_json::from_str(r#"{"simulation_name": "bay"}"#).unwrap();
/// assert_eq!(config.simulation_name, "bay");
/// assert_eq!(config.mesh_warning_cells, 200_000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// 模拟名称，导出文件名的前缀
    #[serde(default = "default_simulation_name")]
    pub simulation_name: String,

    /// 导出目录
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// 组件目录（网格文件、捕捉预览）
    #[serde(default = "default_component_dir")]
    pub component_dir: PathBuf,

    /// 映射时生成捕捉预览
    #[serde(default)]
    pub generate_snap: bool,

    // ========== 模型检查阈值 ==========

    /// 单元数达到此值给出性能提示
    #[serde(default = "default_mesh_warning_cells")]
    pub mesh_warning_cells: usize,

    /// 单元数达到此值给出性能警告
    #[serde(default = "default_mesh_poor_cells")]
    pub mesh_poor_cells: usize,

    /// 单元数达到此值视为超出上限
    #[serde(default = "default_mesh_max_cells")]
    pub mesh_max_cells: usize,
}

fn default_simulation_name() -> String { "Sim".to_string() }
fn default_output_dir() -> PathBuf { PathBuf::from(".") }
fn default_component_dir() -> PathBuf { PathBuf::from("Components") }
fn default_mesh_warning_cells() -> usize { 200_000 }
fn default_mesh_poor_cells() -> usize { 500_000 }
fn default_mesh_max_cells() -> usize { 2_000_000 }

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            simulation_name: default_simulation_name(),
            output_dir: default_output_dir(),
            component_dir: default_component_dir(),
            generate_snap: false,
            mesh_warning_cells: default_mesh_warning_cells(),
            mesh_poor_cells: default_mesh_poor_cells(),
            mesh_max_cells: default_mesh_max_cells(),
        }
    }
}

impl WorkflowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 文件加载
    pub fn load(path: impl AsRef<Path>) -> WorkflowResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| WorkflowError::Config(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&text)
            .map_err(|e| WorkflowError::Config(format!("{}: {e}", path.display())))
    }

    /// 保存为 JSON 文件
    pub fn save(&self, path: impl AsRef<Path>) -> WorkflowResult<()> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| WorkflowError::Config(e.to_string()))?;
        fs::write(path, text)
            .map_err(|e| WorkflowError::Config(format!("{}: {e}", path.display())))
    }

    /// 校验阈值顺序
    pub fn validate(&self) -> WorkflowResult<()> {
        if self.simulation_name.trim().is_empty() {
            return Err(WorkflowError::Config("模拟名称不能为空".into()));
        }
        if !(self.mesh_warning_cells <= self.mesh_poor_cells && self.mesh_poor_cells <= self.mesh_max_cells) {
            return Err(WorkflowError::Config(format!(
                "单元数阈值应递增: {} / {} / {}",
                self.mesh_warning_cells, self.mesh_poor_cells, self.mesh_max_cells
            )));
        }
        Ok(())
    }
}
