// crates/sit_mapping/src/material_mapper.rs

//! 材质多边形 → 网格单元
//!
//! 多边形按 ID 顺序处理，单元重叠时后处理的多边形生效。
//! 没有被任何多边形覆盖的单元归入未指定材质（ID 0）。

use std::collections::BTreeMap;

use glam::DVec3;
use sit_coverage::{CoveragePolygon, MaterialsCoverage};
use sit_foundation::{ComponentId, UNASSIGNED_COMPONENT_ID};
use sit_mesh::{MeshProvider, PolygonSnapper};
use tracing::{debug, info};

use crate::diagnostic::MappingDiagnostic;
use crate::error::{MappingError, MappingResult};

/// 材质映射结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialMapping {
    /// 材质 ID → 单元索引（0 基，升序）；表中每个材质都有一项
    pub material_cells: BTreeMap<ComponentId, Vec<usize>>,
    pub diagnostics: Vec<MappingDiagnostic>,
}

impl MaterialMapping {
    pub fn cells_for(&self, material_id: ComponentId) -> &[usize] {
        self.material_cells
            .get(&material_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 逐单元的材质 ID
    pub fn cell_materials(&self, cell_count: usize) -> Vec<ComponentId> {
        let mut out = vec![UNASSIGNED_COMPONENT_ID; cell_count];
        for (&id, cells) in &self.material_cells {
            for &cell in cells {
                if let Some(slot) = out.get_mut(cell) {
                    *slot = id;
                }
            }
        }
        out
    }

    /// 预览用的单元闭合环（首点重复），按材质分组
    ///
    /// 少于三个节点的单元跳过。
    pub fn display_polygons<M: MeshProvider + ?Sized>(
        &self,
        mesh: &M,
    ) -> MappingResult<BTreeMap<ComponentId, Vec<Vec<DVec3>>>> {
        let mut out = BTreeMap::new();
        for (&id, cells) in &self.material_cells {
            let mut rings = Vec::with_capacity(cells.len());
            for &cell in cells {
                let mut ring = mesh.cell_locations(cell)?;
                if ring.len() < 3 {
                    continue;
                }
                ring.push(ring[0]);
                rings.push(ring);
            }
            out.insert(id, rings);
        }
        Ok(out)
    }
}

/// 材质映射器
pub struct MaterialMapper<'a, M: ?Sized, S: ?Sized> {
    mesh: &'a M,
    snapper: &'a S,
}

impl<'a, M, S> MaterialMapper<'a, M, S>
where
    M: MeshProvider + ?Sized,
    S: PolygonSnapper + ?Sized,
{
    pub fn new(mesh: &'a M, snapper: &'a S) -> Self {
        Self { mesh, snapper }
    }

    pub fn map(&self, component: &MaterialsCoverage) -> MappingResult<MaterialMapping> {
        let n_cells = self.mesh.cell_count();
        if n_cells == 0 {
            return Err(MappingError::MissingMesh);
        }
        info!(cells = n_cells, "映射材质覆盖层到网格");

        let mut polygons: Vec<&CoveragePolygon> = component.coverage.polygons().iter().collect();
        polygons.sort_by_key(|p| p.id);

        let mut owner: Vec<Option<ComponentId>> = vec![None; n_cells];
        for polygon in polygons {
            let mut comp_id = component.resolved_comp_id(polygon.id);
            if component.table.get(comp_id).is_none() {
                debug!(polygon = polygon.id, comp_id, "多边形引用的材质不存在，按未指定处理");
                comp_id = UNASSIGNED_COMPONENT_ID;
            }
            let cells = self.snapper.cells_in_polygon(&polygon.outer, &polygon.holes);
            debug!(polygon = polygon.id, comp_id, cells = cells.len(), "多边形捕捉完成");
            for cell in cells {
                match owner.get_mut(cell) {
                    Some(slot) => *slot = Some(comp_id),
                    None => debug!(cell, "捕捉结果超出单元范围，已忽略"),
                }
            }
        }

        let mut mapping = MaterialMapping::default();
        for row in component.table.iter() {
            mapping.material_cells.insert(row.material_id, Vec::new());
        }
        mapping
            .material_cells
            .entry(UNASSIGNED_COMPONENT_ID)
            .or_default();
        for (cell, comp) in owner.into_iter().enumerate() {
            let id = comp.unwrap_or(UNASSIGNED_COMPONENT_ID);
            mapping.material_cells.entry(id).or_default().push(cell);
        }

        let unassigned = mapping.cells_for(UNASSIGNED_COMPONENT_ID);
        if !unassigned.is_empty() {
            mapping.diagnostics.push(MappingDiagnostic::UnassignedCells {
                cells: unassigned.iter().map(|c| c + 1).collect(),
            });
        }
        for row in component.table.iter() {
            if row.material_id != UNASSIGNED_COMPONENT_ID && mapping.cells_for(row.material_id).is_empty() {
                mapping.diagnostics.push(MappingDiagnostic::UnusedMaterial {
                    id: row.material_id,
                    name: row.name.clone(),
                });
            }
        }
        for diagnostic in &mapping.diagnostics {
            diagnostic.log();
        }

        info!("材质覆盖层映射完成");
        Ok(mapping)
    }
}
