// crates/sit_workflow/src/import.rs

//! 模拟导入
//!
//! 顺序固定：模拟清单 → 几何 → 边界条件 → 材质。边界条件需要几何的节点坐标重建弧，
//! 材质需要几何的单元数展开逐单元材质。任一步失败则整个导入失败，不返回部分结果。

use std::fs;
use std::path::{Path, PathBuf};

use sit_coverage::{
    AttributeTable, BoundaryCoverage, CoverageArcBuilder, MaterialsCoverage, SimulationData,
};
use sit_foundation::ComponentId;
use sit_io::{
    BoundaryConditionsReader, GeometryReader, IoError, MaterialsReader, SimulationManifest,
    SimulationReader,
};
use sit_mesh::MeshProvider;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cell_coverage::CellCoverageBuilder;
use crate::error::{WorkflowError, WorkflowResult};
use crate::model::{SimulationGrid, SimulationModel};

/// 导入后网格文件的文件名
pub const GRID_FILE_NAME: &str = "grid.json";

/// 模拟导入器
pub struct SimulationImporter {
    component_dir: PathBuf,
}

impl SimulationImporter {
    /// `component_dir` 下按网格 UUID 建目录保存网格文件
    pub fn new(component_dir: impl Into<PathBuf>) -> Self {
        Self {
            component_dir: component_dir.into(),
        }
    }

    fn referenced(base: &Path, file: &Option<String>, what: &str) -> WorkflowResult<PathBuf> {
        file.as_ref()
            .map(|f| base.join(f))
            .ok_or_else(|| WorkflowError::missing(format!("模拟清单没有列出{what}文件")))
    }

    /// 读取 `*.example_simulation` 及其引用的文件
    pub fn import(&self, manifest_path: impl AsRef<Path>) -> WorkflowResult<SimulationModel> {
        let manifest_path = manifest_path.as_ref();
        info!(path = %manifest_path.display(), "读取模拟");
        let manifest = SimulationReader::read(manifest_path)?;
        let base = manifest_path.parent().unwrap_or_else(|| Path::new("."));

        let mut model = SimulationModel::new();
        model.simulation = Self::simulation_data(&manifest);

        let grid = self.read_geometry(&Self::referenced(base, &manifest.grid_file, "几何")?)?;
        let boundary = Self::read_boundary_conditions(
            &Self::referenced(base, &manifest.boundary_file, "边界条件")?,
            &grid,
        )?;
        let materials =
            Self::read_materials(&Self::referenced(base, &manifest.materials_file, "材质")?, &grid)?;

        model.grid = Some(grid);
        model.boundary = Some(boundary);
        model.materials = Some(materials);
        info!("模拟导入完成");
        Ok(model)
    }

    fn simulation_data(manifest: &SimulationManifest) -> SimulationData {
        SimulationData {
            user_option: manifest.user_option,
            user_text: manifest.user_text.clone(),
            ..Default::default()
        }
    }

    fn read_geometry(&self, path: &Path) -> WorkflowResult<SimulationGrid> {
        info!(path = %path.display(), "读取几何文件");
        let ugrid = GeometryReader::read_grid(path)?;
        let grid = SimulationGrid::new("Mesh", ugrid);

        let dir = self.component_dir.join(grid.uuid.to_string());
        fs::create_dir_all(&dir).map_err(IoError::from)?;
        grid.ugrid.write_to_file(dir.join(GRID_FILE_NAME))?;
        Ok(grid)
    }

    fn read_boundary_conditions(path: &Path, grid: &SimulationGrid) -> WorkflowResult<BoundaryCoverage> {
        info!(path = %path.display(), "读取边界条件文件");
        let data = BoundaryConditionsReader::read(path)?;

        info!("构建边界条件覆盖层几何");
        let mut builder = CoverageArcBuilder::new(grid.ugrid.locations());
        let mut assignments = Vec::with_capacity(data.arcs.len());
        for (file_arc_id, nodes) in &data.arcs {
            match builder.add_arc_from_nodes(nodes)? {
                Some(arc) => {
                    let comp = ComponentId::try_from(*file_arc_id).map_err(|_| {
                        IoError::parse(path.display().to_string(), 0, format!("弧编号超出范围: {file_arc_id}"))
                    })?;
                    assignments.push((arc, comp));
                }
                None => warn!(arc = file_arc_id, "边界条件弧没有节点，已跳过"),
            }
        }
        let coverage = builder.build_coverage(Uuid::new_v4(), "Boundary Conditions")?;
        let table = AttributeTable::from_rows(data.unique_rows(), 1)?;

        let mut component = BoundaryCoverage::with_table(coverage, table);
        for (arc, comp) in assignments {
            component.assign(arc, comp)?;
        }
        Ok(component)
    }

    fn read_materials(path: &Path, grid: &SimulationGrid) -> WorkflowResult<MaterialsCoverage> {
        info!(path = %path.display(), "读取材质文件");
        let data = MaterialsReader::read(path)?;
        let cell_materials = data.cell_material_array(grid.ugrid.cell_count());
        let built = CellCoverageBuilder::new(&grid.ugrid, &cell_materials).build("Materials")?;
        let table = AttributeTable::from_rows(data.rows, 1)?;

        let mut component = MaterialsCoverage::with_table(built.coverage, table);
        for (polygon, material) in built.polygon_comp_ids {
            component.assign(polygon, material)?;
        }
        Ok(component)
    }
}
