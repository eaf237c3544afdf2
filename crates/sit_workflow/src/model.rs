// crates/sit_workflow/src/model.rs

//! 模拟工程
//!
//! 一个模拟包含模拟属性、网格（可选）以及关联的材质和边界条件覆盖层（可选）。
//! 工程通过 [`ComponentStore`] 持久化，每部分一个数据集。

use std::fmt;

use serde::{Deserialize, Serialize};
use sit_coverage::schema::{check_version, SIMULATION_KEY};
use sit_coverage::{BoundaryCoverage, ComponentStore, MaterialsCoverage, SimulationData};
use sit_mesh::UGrid;
use tracing::debug;
use uuid::Uuid;

use crate::error::WorkflowResult;

const GRID_KEY: &str = "grid";

/// 网格水平单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalUnits {
    Feet,
    Meters,
    Degrees,
}

impl HorizontalUnits {
    /// 模型只支持英尺和米
    pub fn is_supported(self) -> bool {
        matches!(self, Self::Feet | Self::Meters)
    }
}

impl fmt::Display for HorizontalUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Feet => "FEET",
            Self::Meters => "METERS",
            Self::Degrees => "DEGREES",
        };
        f.write_str(s)
    }
}

/// 模拟关联的网格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationGrid {
    pub uuid: Uuid,
    pub name: String,
    #[serde(default)]
    pub units: Option<HorizontalUnits>,
    pub ugrid: UGrid,
}

impl SimulationGrid {
    pub fn new(name: impl Into<String>, ugrid: UGrid) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            units: Some(HorizontalUnits::Meters),
            ugrid,
        }
    }
}

/// 模拟工程
#[derive(Debug, Clone, Default)]
pub struct SimulationModel {
    pub simulation: SimulationData,
    pub grid: Option<SimulationGrid>,
    pub materials: Option<MaterialsCoverage>,
    pub boundary: Option<BoundaryCoverage>,
}

impl SimulationModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ugrid(&self) -> Option<&UGrid> {
        self.grid.as_ref().map(|g| &g.ugrid)
    }

    /// 写入存储（不提交）；缺少的部分从存储中删除
    pub fn save_to<S: ComponentStore>(&self, store: &S) -> WorkflowResult<()> {
        store.put(SIMULATION_KEY, &self.simulation)?;
        match &self.grid {
            Some(grid) => store.put(GRID_KEY, grid)?,
            None => store.remove(GRID_KEY)?,
        }
        match &self.materials {
            Some(m) => m.save_to(store)?,
            None => store.remove(sit_coverage::schema::MATERIALS_KEY)?,
        }
        match &self.boundary {
            Some(b) => b.save_to(store)?,
            None => store.remove(sit_coverage::schema::BOUNDARY_KEY)?,
        }
        Ok(())
    }

    /// 从存储载入；缺少的数据集按缺省处理
    pub fn load_from<S: ComponentStore>(store: &S) -> WorkflowResult<Self> {
        let simulation: SimulationData = store.get(SIMULATION_KEY)?.unwrap_or_default();
        check_version(simulation.version)?;
        let model = Self {
            simulation,
            grid: store.get(GRID_KEY)?,
            materials: MaterialsCoverage::load_from(store)?,
            boundary: BoundaryCoverage::load_from(store)?,
        };
        debug!(
            grid = model.grid.is_some(),
            materials = model.materials.is_some(),
            boundary = model.boundary.is_some(),
            "模拟工程已载入"
        );
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use sit_coverage::{Coverage, MemoryStore, UserOption};

    fn triangle() -> UGrid {
        let locations = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ];
        UGrid::from_cells(locations, &[vec![0, 1, 2]]).unwrap()
    }

    #[test]
    fn test_store_roundtrip() {
        let store = MemoryStore::new();
        let mut model = SimulationModel::new();
        model.simulation.user_option = UserOption::C;
        model.grid = Some(SimulationGrid::new("Mesh", triangle()));
        let mut materials = MaterialsCoverage::new(Coverage::new("Materials"));
        materials.table.add_material("sand").unwrap();
        model.materials = Some(materials);
        model.save_to(&store).unwrap();

        let back = SimulationModel::load_from(&store).unwrap();
        assert_eq!(back.simulation.user_option, UserOption::C);
        assert_eq!(back.grid, model.grid);
        assert_eq!(back.materials.unwrap().table.len(), 2);
        assert!(back.boundary.is_none());
    }

    #[test]
    fn test_empty_store_gives_defaults() {
        let store = MemoryStore::new();
        let model = SimulationModel::load_from(&store).unwrap();
        assert_eq!(model.simulation.user_text, "Hello World!");
        assert!(model.ugrid().is_none());
    }

    #[test]
    fn test_removed_parts_are_dropped() {
        let store = MemoryStore::new();
        let mut model = SimulationModel::new();
        model.grid = Some(SimulationGrid::new("Mesh", triangle()));
        model.save_to(&store).unwrap();
        model.grid = None;
        model.save_to(&store).unwrap();
        assert!(SimulationModel::load_from(&store).unwrap().grid.is_none());
    }

    #[test]
    fn test_units() {
        assert!(HorizontalUnits::Feet.is_supported());
        assert!(!HorizontalUnits::Degrees.is_supported());
        assert_eq!(HorizontalUnits::Meters.to_string(), "METERS");
    }
}
