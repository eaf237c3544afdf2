// crates/sit_workflow/src/solution.rs

//! 求解结果加载
//!
//! 求解器在导出目录写出 `<模拟名>.example_solution`，每个网格节点一个标量值。
//! 结果以节点数据集的形式挂到模拟网格上。

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sit_io::{FileKind, SolutionReader};
use sit_mesh::MeshProvider;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{WorkflowError, WorkflowResult};
use crate::model::SimulationModel;

/// 数据集名称
pub const SOLUTION_DATASET_NAME: &str = "Example";

/// 数据集时间单位
pub const SOLUTION_TIME_UNITS: &str = "Seconds";

/// 节点标量数据集（单时间步）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionDataset {
    pub name: String,
    /// 所属网格 UUID
    pub geom_uuid: Uuid,
    pub time_units: String,
    pub time: f64,
    pub values: Vec<f64>,
}

impl SolutionDataset {
    pub fn new(geom_uuid: Uuid, values: Vec<f64>) -> Self {
        Self {
            name: SOLUTION_DATASET_NAME.to_string(),
            geom_uuid,
            time_units: SOLUTION_TIME_UNITS.to_string(),
            time: 0.0,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 最小值与最大值
    pub fn range(&self) -> Option<(f64, f64)> {
        self.values.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// 求解结果加载器
pub struct SolutionLoader {
    dir: PathBuf,
    simulation_name: String,
}

impl SolutionLoader {
    pub fn new(dir: impl Into<PathBuf>, simulation_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            simulation_name: simulation_name.into(),
        }
    }

    pub fn solution_path(&self) -> PathBuf {
        self.dir.join(FileKind::Solution.file_name(&self.simulation_name))
    }

    /// 读取结果并关联到模型网格
    pub fn load(&self, model: &SimulationModel) -> WorkflowResult<SolutionDataset> {
        let grid = model
            .grid
            .as_ref()
            .ok_or_else(|| WorkflowError::missing("没有网格，无法加载求解结果"))?;
        let dataset = Self::load_file(self.solution_path(), grid.uuid)?;
        let nodes = grid.ugrid.point_count();
        if dataset.len() != nodes {
            warn!(values = dataset.len(), nodes, "求解结果数量与网格节点数不一致");
        }
        Ok(dataset)
    }

    /// 读取指定文件
    pub fn load_file(path: impl AsRef<Path>, geom_uuid: Uuid) -> WorkflowResult<SolutionDataset> {
        let path = path.as_ref();
        let values = SolutionReader::read(path)?;
        info!(path = %path.display(), values = values.len(), "求解结果已加载");
        Ok(SolutionDataset::new(geom_uuid, values))
    }
}
