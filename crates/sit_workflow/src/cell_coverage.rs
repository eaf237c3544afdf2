// crates/sit_workflow/src/cell_coverage.rs

//! 逐单元材质 → 多边形覆盖层
//!
//! 每个带材质（非未指定）的单元生成一个多边形，多边形 ID 为单元索引 + 1，
//! 多边形外环取单元节点坐标。未指定单元不生成多边形。

use std::collections::BTreeMap;

use sit_coverage::{Coverage, CoveragePolygon};
use sit_foundation::{ComponentId, FeatureId, UNASSIGNED_COMPONENT_ID};
use sit_mesh::MeshProvider;
use tracing::debug;
use uuid::Uuid;

use crate::error::WorkflowResult;

/// 构建结果
#[derive(Debug, Clone)]
pub struct CellCoverage {
    pub coverage: Coverage,
    /// 多边形 ID → 材质 ID
    pub polygon_comp_ids: BTreeMap<FeatureId, ComponentId>,
}

/// 单元材质覆盖层构建器
pub struct CellCoverageBuilder<'a, M: ?Sized> {
    mesh: &'a M,
    cell_materials: &'a [ComponentId],
}

impl<'a, M: MeshProvider + ?Sized> CellCoverageBuilder<'a, M> {
    pub fn new(mesh: &'a M, cell_materials: &'a [ComponentId]) -> Self {
        Self { mesh, cell_materials }
    }

    pub fn build(&self, name: &str) -> WorkflowResult<CellCoverage> {
        let mut coverage = Coverage::with_uuid(Uuid::new_v4(), name);
        let mut polygon_comp_ids = BTreeMap::new();
        for (cell, &material) in self.cell_materials.iter().enumerate() {
            if material <= UNASSIGNED_COMPONENT_ID || cell >= self.mesh.cell_count() {
                continue;
            }
            let id = cell as FeatureId + 1;
            coverage.add_polygon(CoveragePolygon {
                id,
                outer: self.mesh.cell_locations(cell)?,
                holes: Vec::new(),
            });
            polygon_comp_ids.insert(id, material);
        }
        debug!(polygons = polygon_comp_ids.len(), "单元材质覆盖层已构建");
        Ok(CellCoverage {
            coverage,
            polygon_comp_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use sit_mesh::UGrid;

    #[test]
    fn test_one_polygon_per_assigned_cell() {
        let locations = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ];
        let grid = UGrid::from_cells(locations, &[vec![0, 1, 2], vec![0, 2, 3]]).unwrap();
        let cell_materials = [0, 2];
        let built = CellCoverageBuilder::new(&grid, &cell_materials)
            .build("Materials")
            .unwrap();
        assert_eq!(built.coverage.polygons().len(), 1);
        assert_eq!(built.coverage.polygons()[0].id, 2);
        assert_eq!(built.coverage.polygons()[0].outer.len(), 3);
        assert_eq!(built.polygon_comp_ids, BTreeMap::from([(2, 2)]));
    }
}
