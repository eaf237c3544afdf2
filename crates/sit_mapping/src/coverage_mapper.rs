// crates/sit_mapping/src/coverage_mapper.rs

//! 同时映射模拟关联的材质与边界条件覆盖层

use sit_coverage::{BoundaryCoverage, MaterialsCoverage};
use sit_mesh::{SnapExteriorArc, SnapPolygon, UGrid};
use tracing::info;
use uuid::Uuid;

use crate::boundary_mapper::{BoundaryMapper, BoundaryMapping};
use crate::diagnostic::MappingDiagnostic;
use crate::display::{SnapPreview, SnapPreviewWriter};
use crate::error::{MappingError, MappingResult};
use crate::material_mapper::{MaterialMapper, MaterialMapping};

/// 映射结果；未关联的覆盖层对应项为 `None`
#[derive(Debug, Clone, Default)]
pub struct CoverageMapping {
    pub materials: Option<MaterialMapping>,
    pub boundary: Option<BoundaryMapping>,
    /// 生成的捕捉预览
    pub previews: Vec<SnapPreview>,
}

impl CoverageMapping {
    /// 全部诊断，材质在前
    pub fn diagnostics(&self) -> impl Iterator<Item = &MappingDiagnostic> {
        self.materials
            .iter()
            .flat_map(|m| m.diagnostics.iter())
            .chain(self.boundary.iter().flat_map(|b| b.diagnostics.iter()))
    }
}

/// 覆盖层映射器
pub struct CoverageMapper<'a> {
    grid: Option<&'a UGrid>,
    materials: Option<&'a MaterialsCoverage>,
    boundary: Option<&'a BoundaryCoverage>,
    preview: Option<SnapPreviewWriter>,
}

impl<'a> CoverageMapper<'a> {
    pub fn new(grid: Option<&'a UGrid>) -> Self {
        Self {
            grid,
            materials: None,
            boundary: None,
            preview: None,
        }
    }

    pub fn with_materials(mut self, materials: Option<&'a MaterialsCoverage>) -> Self {
        self.materials = materials;
        self
    }

    pub fn with_boundary(mut self, boundary: Option<&'a BoundaryCoverage>) -> Self {
        self.boundary = boundary;
        self
    }

    /// 映射后在 `writer` 的组件目录下生成捕捉预览
    pub fn with_preview(mut self, writer: SnapPreviewWriter) -> Self {
        self.preview = Some(writer);
        self
    }

    pub fn map(&self) -> MappingResult<CoverageMapping> {
        let grid = self.grid.ok_or(MappingError::MissingMesh)?;
        if self.materials.is_none() && self.boundary.is_none() {
            return Err(MappingError::MissingCoverage("材质或边界条件"));
        }

        let mut result = CoverageMapping::default();
        if let Some(materials) = self.materials {
            let snapper = SnapPolygon::new(grid);
            let mapping = MaterialMapper::new(grid, &snapper).map(materials)?;
            if let Some(writer) = &self.preview {
                result
                    .previews
                    .push(writer.write_materials(Uuid::new_v4(), &mapping, grid)?);
            }
            result.materials = Some(mapping);
        }
        if let Some(boundary) = self.boundary {
            let snapper = SnapExteriorArc::new(grid);
            let mapping = BoundaryMapper::new(grid, &snapper).map(boundary)?;
            if let Some(writer) = &self.preview {
                result
                    .previews
                    .push(writer.write_boundary(Uuid::new_v4(), &mapping)?);
            }
            result.boundary = Some(mapping);
        }

        info!(
            diagnostics = result.diagnostics().count(),
            previews = result.previews.len(),
            "覆盖层映射完成"
        );
        Ok(result)
    }
}
