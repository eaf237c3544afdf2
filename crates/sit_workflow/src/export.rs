// crates/sit_workflow/src/export.rs

//! 模拟导出
//!
//! 先映射覆盖层，再依次写出几何、材质、边界条件，最后写模拟清单列出前三个文件。
//! 某个文件写出失败时后续文件不再写出，已写出的文件保留。

use std::fs;
use std::path::PathBuf;

use sit_io::simulation::other_file_line;
use sit_io::{
    BoundaryConditionsWriter, FileKind, GeometryWriter, IoError, MaterialsWriter, SimulationWriter,
};
use sit_mapping::{CoverageMapper, CoverageMapping};
use tracing::{error, info};

use crate::error::{WorkflowError, WorkflowResult};
use crate::model::SimulationModel;

/// 导出结果
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// 写出的文件（写出顺序）
    pub files: Vec<PathBuf>,
    pub mapping: CoverageMapping,
}

/// 模拟导出器
pub struct SimulationExporter {
    out_dir: PathBuf,
    simulation_name: String,
}

impl SimulationExporter {
    pub fn new(out_dir: impl Into<PathBuf>, simulation_name: impl Into<String>) -> Self {
        Self {
            out_dir: out_dir.into(),
            simulation_name: simulation_name.into(),
        }
    }

    pub fn export(&self, model: &SimulationModel) -> WorkflowResult<ExportOutcome> {
        let Some(grid) = model.ugrid() else {
            let msg = "没有网格，导出中止";
            error!("{msg}");
            return Err(WorkflowError::missing(msg));
        };
        let materials = model
            .materials
            .as_ref()
            .ok_or_else(|| WorkflowError::missing("没有材质覆盖层，导出中止"))?;
        let boundary = model
            .boundary
            .as_ref()
            .ok_or_else(|| WorkflowError::missing("没有边界条件覆盖层，导出中止"))?;

        let mapping = CoverageMapper::new(Some(grid))
            .with_materials(Some(materials))
            .with_boundary(Some(boundary))
            .map()?;
        let material_cells = mapping
            .materials
            .as_ref()
            .map(|m| m.material_cells.clone())
            .unwrap_or_default();
        let bc = mapping.boundary.clone().unwrap_or_default();

        fs::create_dir_all(&self.out_dir).map_err(IoError::from)?;
        let mut files = Vec::new();
        let mut manifest_lines = Vec::new();
        let mut target = |kind: FileKind| {
            let name = kind.file_name(&self.simulation_name);
            if let Some(keyword) = kind.manifest_keyword() {
                manifest_lines.push(other_file_line(keyword, &name));
            }
            let path = self.out_dir.join(name);
            files.push(path.clone());
            path
        };

        info!("写出几何文件");
        GeometryWriter::write(target(FileKind::Geometry), grid)?;

        info!("写出材质文件");
        MaterialsWriter::write(target(FileKind::Materials), materials.table.rows(), &material_cells)?;

        info!("写出边界条件文件");
        BoundaryConditionsWriter::write(
            target(FileKind::BoundaryConditions),
            &bc.arc_id_to_comp_id,
            &bc.arc_id_to_grid_ids,
            &boundary.table,
        )?;

        info!("写出模拟文件");
        let manifest_path = target(FileKind::Simulation);
        SimulationWriter::write(
            manifest_path,
            model.simulation.user_option,
            &model.simulation.user_text,
            &manifest_lines,
        )?;

        info!(files = files.len(), dir = %self.out_dir.display(), "模拟导出完成");
        Ok(ExportOutcome { files, mapping })
    }
}
