// crates/sit_io/src/format.rs

//! 文件种类、扩展名与文件头

/// 模型文件种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Geometry,
    Materials,
    BoundaryConditions,
    Simulation,
    Solution,
}

impl FileKind {
    /// 扩展名（不含点）
    pub fn extension(self) -> &'static str {
        match self {
            Self::Geometry => "example_geometry",
            Self::Materials => "example_materials",
            Self::BoundaryConditions => "example_boundary",
            Self::Simulation => "example_simulation",
            Self::Solution => "example_solution",
        }
    }

    /// 文件头中的描述词
    fn description(self) -> &'static str {
        match self {
            Self::Geometry => "geometry",
            Self::Materials => "materials",
            Self::BoundaryConditions => "boundary conditions",
            Self::Simulation => "simulation",
            Self::Solution => "solution",
        }
    }

    /// 写文件时的首行
    pub fn header(self) -> String {
        format!(
            "###This is a {} file for Standard Interface Template.###",
            self.description()
        )
    }

    /// `<模拟名>.<扩展名>`
    pub fn file_name(self, simulation_name: &str) -> String {
        format!("{simulation_name}.{}", self.extension())
    }

    /// 模拟清单中引用该文件时的关键字
    pub fn manifest_keyword(self) -> Option<&'static str> {
        match self {
            Self::Geometry => Some("Grid"),
            Self::Materials => Some("Materials"),
            Self::BoundaryConditions => Some("Boundary_Conditions"),
            Self::Simulation | Self::Solution => None,
        }
    }
}
