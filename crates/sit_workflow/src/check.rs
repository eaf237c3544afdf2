// crates/sit_workflow/src/check.rs

//! 模型检查
//!
//! 检查网格、边界条件覆盖层和材质覆盖层，每个问题给出描述和修正建议。
//! 检查本身不会失败，没有问题时返回空列表。

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use sit_mesh::MeshProvider;
use tracing::{info, warn};

use crate::config::WorkflowConfig;
use crate::model::SimulationModel;

/// 一条检查结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCheckError {
    pub problem: String,
    pub description: String,
    pub fix: String,
}

impl ModelCheckError {
    fn new(problem: impl Into<String>, description: impl Into<String>, fix: impl Into<String>) -> Self {
        Self {
            problem: problem.into(),
            description: description.into(),
            fix: fix.into(),
        }
    }
}

impl fmt::Display for ModelCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Problem: {}", self.problem)?;
        writeln!(f, "Description: {}", self.description)?;
        write!(f, "Fix: {}", self.fix)
    }
}

/// 模拟检查
pub struct SimulationCheck<'a> {
    model: &'a SimulationModel,
    config: &'a WorkflowConfig,
    errors: Vec<ModelCheckError>,
}

impl<'a> SimulationCheck<'a> {
    pub fn new(model: &'a SimulationModel, config: &'a WorkflowConfig) -> Self {
        Self {
            model,
            config,
            errors: Vec::new(),
        }
    }

    pub fn run(mut self) -> Vec<ModelCheckError> {
        info!("运行模型检查");
        self.check_mesh();
        self.check_boundary_conditions();
        self.check_materials();
        for e in &self.errors {
            warn!(problem = %e.problem, "模型检查");
        }
        info!(problems = self.errors.len(), "模型检查完成");
        self.errors
    }

    fn add(&mut self, problem: impl Into<String>, description: impl Into<String>, fix: impl Into<String>) {
        self.errors.push(ModelCheckError::new(problem, description, fix));
    }

    fn check_mesh(&mut self) {
        let Some(grid) = &self.model.grid else {
            self.add(
                "STOP! Simulation requires an unstructured mesh.",
                "An unstructured mesh is required for this simulation.",
                "Add an unstructured mesh to the simulation.",
            );
            return;
        };

        let n = grid.ugrid.cell_count();
        if n >= self.config.mesh_warning_cells {
            let problem = format!("Warning: The unstructured mesh contains {n} elements.");
            if n < self.config.mesh_poor_cells {
                self.add(
                    problem,
                    "Best performance for Standard Template Interface occurs with meshes with under 100,000 elements.",
                    "Review the mesh and verify that this many elements is required.",
                );
            } else if n < self.config.mesh_max_cells {
                self.add(
                    problem,
                    "Poor performance for Standard Template Interface will occur with this mesh.",
                    "You are STRONGLY encouraged to reduce the number of elements in the mesh.",
                );
            } else {
                self.add(
                    problem,
                    "The existing mesh greatly exceeds the maximum number of elements.",
                    "Reduce the number of elements to get a workable solution.",
                );
            }
        }

        if !grid.units.is_some_and(|u| u.is_supported()) {
            self.add(
                "STOP! Horizontal units are not FEET or METERS.",
                "Horizontal units must be FEET or METERS for this simulation.",
                "Change the horizontal units to FEET or METERS.",
            );
        }
    }

    fn check_boundary_conditions(&mut self) {
        if self.model.boundary.is_none() {
            self.add(
                "STOP! A boundary condition coverage must be included in simulation.",
                "A boundary condition coverage is required for this simulation.",
                "Add a boundary condition coverage to the simulation.",
            );
        }
    }

    fn check_materials(&mut self) {
        let Some(materials) = &self.model.materials else {
            self.add(
                "STOP! A material coverage must be included in simulation.",
                "A material coverage is required for this simulation.",
                "Add a material coverage to the simulation.",
            );
            return;
        };

        let names = materials.table.all_names();
        if names.len() < 2 {
            self.add(
                "STOP! No user defined material zones found.",
                "User defined materials are required for this simulation.",
                "Define materials for the material coverage.",
            );
        }
        if has_duplicate_names(&names) {
            self.add(
                "STOP! Material names must be unique.",
                "Standard Interface Template requires unique material names.",
                "Define unique material names for the material coverage.",
            );
        }
    }
}

/// 名称是否重复（按字节比较）
///
/// 经由属性表构建的材质不会重名；保存的项目数据若被外部改写则可能重名。
fn has_duplicate_names(names: &[String]) -> bool {
    let mut seen = BTreeSet::new();
    names.iter().any(|name| !seen.insert(name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HorizontalUnits, SimulationGrid};
    use glam::DVec3;
    use sit_coverage::{BoundaryCoverage, Coverage, MaterialsCoverage};
    use sit_mesh::UGrid;

    fn grid(cells: usize) -> SimulationGrid {
        let mut locations = Vec::new();
        for i in 0..=cells {
            locations.push(DVec3::new(i as f64, 0.0, 0.0));
            locations.push(DVec3::new(i as f64, 1.0, 0.0));
        }
        let cells: Vec<Vec<usize>> = (0..cells).map(|i| vec![2 * i, 2 * i + 2, 2 * i + 1]).collect();
        SimulationGrid::new("Mesh", UGrid::from_cells(locations, &cells).unwrap())
    }

    fn complete_model() -> SimulationModel {
        let mut materials = MaterialsCoverage::new(Coverage::new("Materials"));
        materials.table.add_material("sand").unwrap();
        SimulationModel {
            grid: Some(grid(4)),
            materials: Some(materials),
            boundary: Some(BoundaryCoverage::new(Coverage::new("Boundary Conditions"))),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_model_passes() {
        let model = complete_model();
        let config = WorkflowConfig::default();
        assert!(SimulationCheck::new(&model, &config).run().is_empty());
    }

    #[test]
    fn test_empty_model() {
        let model = SimulationModel::new();
        let config = WorkflowConfig::default();
        let errors = SimulationCheck::new(&model, &config).run();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].problem.contains("unstructured mesh"));
        assert!(errors[1].problem.contains("boundary condition"));
        assert!(errors[2].problem.contains("material coverage"));
    }

    #[test]
    fn test_mesh_size_thresholds() {
        let mut model = complete_model();
        let config = WorkflowConfig {
            mesh_warning_cells: 2,
            mesh_poor_cells: 4,
            mesh_max_cells: 6,
            ..Default::default()
        };
        let expect = [(1, None), (3, Some("Best")), (5, Some("Poor")), (6, Some("greatly"))];
        for (cells, text) in expect {
            model.grid = Some(grid(cells));
            let errors = SimulationCheck::new(&model, &config).run();
            match text {
                None => assert!(errors.is_empty()),
                Some(t) => {
                    assert_eq!(errors.len(), 1);
                    assert!(errors[0].description.contains(t), "{cells}: {}", errors[0]);
                }
            }
        }
    }

    #[test]
    fn test_units_and_materials() {
        let mut model = complete_model();
        if let Some(g) = model.grid.as_mut() {
            g.units = Some(HorizontalUnits::Degrees);
        }
        model.materials = Some(MaterialsCoverage::new(Coverage::new("Materials")));
        let errors = SimulationCheck::new(&model, &WorkflowConfig::default()).run();
        let problems: Vec<&str> = errors.iter().map(|e| e.problem.as_str()).collect();
        assert_eq!(
            problems,
            vec![
                "STOP! Horizontal units are not FEET or METERS.",
                "STOP! No user defined material zones found.",
            ]
        );
    }

    #[test]
    fn test_duplicate_material_names() {
        let names = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert!(!has_duplicate_names(&names(&["unassigned", "sand", "clay"])));
        assert!(has_duplicate_names(&names(&["unassigned", "sand", "clay", "sand"])));
        assert!(!has_duplicate_names(&names(&["sand", "Sand"])));
        assert!(!has_duplicate_names(&[]));
    }
}
