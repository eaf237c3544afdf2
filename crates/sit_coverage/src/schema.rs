// crates/sit_coverage/src/schema.rs

//! 组件持久化数据结构
//!
//! 每种组件一个带版本号的结构，缺失字段按默认值构造。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sit_foundation::{ComponentId, FeatureId};

use crate::bc_table::BoundaryRow;
use crate::error::{CoverageError, CoverageResult};
use crate::geometry::Coverage;
use crate::material_table::MaterialRow;
use crate::option::{UserOption, DEFAULT_USER_TEXT};
use crate::table::AttributeRow;

/// 当前数据版本
pub const SCHEMA_VERSION: u32 = 1;

/// 存储中的数据集名称
pub const MATERIALS_KEY: &str = "materials";
pub const BOUNDARY_KEY: &str = "boundary_conditions";
pub const SIMULATION_KEY: &str = "simulation";

/// 拒绝比当前版本新的数据
pub fn check_version(found: u32) -> CoverageResult<()> {
    if found > SCHEMA_VERSION {
        return Err(CoverageError::UnsupportedSchema {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    Ok(())
}

/// 材质组件数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialsComponentData {
    pub version: u32,
    pub coverage: Coverage,
    pub materials: Vec<MaterialRow>,
    pub next_id: ComponentId,
    /// 多边形 ID → 材质 ID
    pub polygon_comp_ids: BTreeMap<FeatureId, ComponentId>,
}

impl Default for MaterialsComponentData {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            coverage: Coverage::new("Materials"),
            materials: vec![MaterialRow::unassigned()],
            next_id: 1,
            polygon_comp_ids: BTreeMap::new(),
        }
    }
}

/// 边界条件组件数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryComponentData {
    pub version: u32,
    pub coverage: Coverage,
    pub bcs: Vec<BoundaryRow>,
    pub next_id: ComponentId,
    /// 弧 ID → 边界条件 ID
    pub arc_comp_ids: BTreeMap<FeatureId, ComponentId>,
}

impl Default for BoundaryComponentData {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            coverage: Coverage::new("Boundary Conditions"),
            bcs: vec![BoundaryRow::unassigned()],
            next_id: 1,
            arc_comp_ids: BTreeMap::new(),
        }
    }
}

/// 模拟组件数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationData {
    pub version: u32,
    pub user_option: UserOption,
    pub user_text: String,
}

impl Default for SimulationData {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            user_option: UserOption::A,
            user_text: DEFAULT_USER_TEXT.to_string(),
        }
    }
}
