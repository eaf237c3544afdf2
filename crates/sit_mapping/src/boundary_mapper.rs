// crates/sit_mapping/src/boundary_mapper.rs

//! 边界条件弧 → 网格外边界节点
//!
//! 弧按 ID 顺序编号（1 基），捕捉失败的弧也占用序号。
//! 输出以弧序号为键，即写入边界条件文件的 `BC <arc_id>`。

use std::collections::BTreeMap;

use glam::DVec3;
use sit_coverage::{BoundaryCoverage, CoverageArc, UserOption};
use sit_foundation::{ComponentId, FeatureId, UNASSIGNED_COMPONENT_ID};
use sit_mesh::{ArcSnapper, MeshProvider};
use tracing::{debug, info};

use crate::diagnostic::MappingDiagnostic;
use crate::error::{MappingError, MappingResult};

/// 边界条件映射结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryMapping {
    /// 弧序号 → 网格节点索引（0 基，沿弧方向）
    pub arc_id_to_grid_ids: BTreeMap<FeatureId, Vec<usize>>,
    /// 弧序号 → 组件 ID
    pub arc_id_to_comp_id: BTreeMap<FeatureId, ComponentId>,
    /// 弧序号 → 覆盖层弧 ID
    pub arc_index_to_arc_id: BTreeMap<FeatureId, FeatureId>,
    /// 显示选项 → 捕捉后的折线
    pub display_lines: BTreeMap<UserOption, Vec<Vec<DVec3>>>,
    pub diagnostics: Vec<MappingDiagnostic>,
}

impl BoundaryMapping {
    /// 成功捕捉的弧数
    pub fn mapped_count(&self) -> usize {
        self.arc_id_to_grid_ids.len()
    }
}

/// 边界条件映射器
pub struct BoundaryMapper<'a, M: ?Sized, S: ?Sized> {
    mesh: &'a M,
    snapper: &'a S,
}

impl<'a, M, S> BoundaryMapper<'a, M, S>
where
    M: MeshProvider + ?Sized,
    S: ArcSnapper + ?Sized,
{
    pub fn new(mesh: &'a M, snapper: &'a S) -> Self {
        Self { mesh, snapper }
    }

    pub fn map(&self, component: &BoundaryCoverage) -> MappingResult<BoundaryMapping> {
        if self.mesh.point_count() == 0 {
            return Err(MappingError::MissingMesh);
        }
        info!("映射边界条件覆盖层到网格");

        let mut arcs: Vec<&CoverageArc> = component.coverage.arcs().iter().collect();
        arcs.sort_by_key(|a| a.id);

        let mut mapping = BoundaryMapping::default();
        for (index, arc) in arcs.into_iter().enumerate() {
            let arc_index = index as FeatureId + 1;
            mapping.arc_index_to_arc_id.insert(arc_index, arc.id);

            let comp_id = component.resolved_comp_id(arc.id);
            let display = if comp_id == UNASSIGNED_COMPONENT_ID {
                UserOption::A
            } else {
                component
                    .table
                    .get(comp_id)
                    .map(|row| row.user_option)
                    .unwrap_or(UserOption::A)
            };

            let path = match component.coverage.arc_locations(arc) {
                Ok(path) => path,
                Err(e) => {
                    mapping.diagnostics.push(MappingDiagnostic::ArcSnapFailed {
                        arc_id: arc.id,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            let snapped = self.snapper.snap_arc(&path);
            if snapped.is_empty() {
                mapping.diagnostics.push(MappingDiagnostic::ArcSnapFailed {
                    arc_id: arc.id,
                    reason: "没有捕捉到网格节点".into(),
                });
                continue;
            }
            debug!(arc = arc.id, arc_index, comp_id, nodes = snapped.ids.len(), "弧捕捉完成");

            mapping.arc_id_to_grid_ids.insert(arc_index, snapped.ids);
            mapping.arc_id_to_comp_id.insert(arc_index, comp_id);
            mapping
                .display_lines
                .entry(display)
                .or_default()
                .push(snapped.locations);
        }

        for diagnostic in &mapping.diagnostics {
            diagnostic.log();
        }
        info!(mapped = mapping.mapped_count(), "边界条件覆盖层映射完成");
        Ok(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sit_coverage::{BoundaryRow, Coverage};
    use sit_mesh::{SnapExteriorArc, SnappedArc, UGrid};

    fn square_grid() -> UGrid {
        let mut locations = Vec::new();
        for j in 0..3 {
            for i in 0..3 {
                locations.push(DVec3::new(i as f64, j as f64, 0.0));
            }
        }
        let mut cells = Vec::new();
        for j in 0..2 {
            for i in 0..2 {
                let n = j * 3 + i;
                cells.push(vec![n, n + 1, n + 4, n + 3]);
            }
        }
        UGrid::from_cells(locations, &cells).unwrap()
    }

    /// 弧 10 沿底边，弧 20 沿右边
    fn boundary_component() -> BoundaryCoverage {
        let mut coverage = Coverage::new("bc");
        coverage.add_point(1, DVec3::new(0.0, 0.0, 0.0));
        coverage.add_point(2, DVec3::new(2.0, 0.0, 0.0));
        coverage.add_point(3, DVec3::new(2.0, 2.0, 0.0));
        coverage
            .add_arc(CoverageArc { id: 20, start: 2, end: 3, vertices: vec![] })
            .unwrap();
        coverage
            .add_arc(CoverageArc { id: 10, start: 1, end: 2, vertices: vec![] })
            .unwrap();
        BoundaryCoverage::new(coverage)
    }

    #[test]
    fn test_arcs_numbered_by_feature_order() {
        let grid = square_grid();
        let snapper = SnapExteriorArc::new(&grid);
        let mut comp = boundary_component();
        let inflow = comp
            .table
            .add_row(BoundaryRow::new(0, UserOption::C, "inflow"))
            .unwrap();
        comp.assign(20, inflow).unwrap();

        let mapping = BoundaryMapper::new(&grid, &snapper).map(&comp).unwrap();
        assert_eq!(mapping.arc_index_to_arc_id, BTreeMap::from([(1, 10), (2, 20)]));
        assert_eq!(mapping.arc_id_to_grid_ids[&1], vec![0, 1, 2]);
        assert_eq!(mapping.arc_id_to_grid_ids[&2], vec![2, 5, 8]);
        assert_eq!(mapping.arc_id_to_comp_id, BTreeMap::from([(1, 0), (2, inflow)]));
        assert_eq!(mapping.display_lines[&UserOption::A].len(), 1);
        assert_eq!(mapping.display_lines[&UserOption::C][0][2], DVec3::new(2.0, 2.0, 0.0));
        assert!(mapping.diagnostics.is_empty());
    }

    struct RejectLong;

    impl ArcSnapper for RejectLong {
        fn snap_arc(&self, path: &[DVec3]) -> SnappedArc {
            if path.iter().any(|p| p.y > 1.0) {
                return SnappedArc::default();
            }
            SnappedArc {
                ids: vec![0, 2],
                locations: vec![path[0], path[path.len() - 1]],
            }
        }
    }

    #[test]
    fn test_failed_snap_is_skipped_but_keeps_index() {
        let grid = square_grid();
        let comp = boundary_component();
        let mapping = BoundaryMapper::new(&grid, &RejectLong).map(&comp).unwrap();
        assert_eq!(mapping.mapped_count(), 1);
        assert!(mapping.arc_id_to_grid_ids.contains_key(&1));
        assert!(!mapping.arc_id_to_grid_ids.contains_key(&2));
        assert_eq!(mapping.arc_index_to_arc_id[&2], 20);
        assert!(matches!(
            mapping.diagnostics.as_slice(),
            [MappingDiagnostic::ArcSnapFailed { arc_id: 20, .. }]
        ));
    }

    #[test]
    fn test_empty_mesh_is_an_error() {
        let grid = UGrid::empty();
        let comp = boundary_component();
        assert!(matches!(
            BoundaryMapper::new(&grid, &RejectLong).map(&comp),
            Err(MappingError::MissingMesh)
        ));
    }
}
