// crates/sit_mapping/src/diagnostic.rs

//! 映射诊断

use std::fmt;

use sit_foundation::{ComponentId, FeatureId};
use tracing::warn;

/// 映射过程中的非致命问题
#[derive(Debug, Clone, PartialEq)]
pub enum MappingDiagnostic {
    /// 被归入未指定材质的单元（1 基编号）
    UnassignedCells { cells: Vec<usize> },
    /// 定义了但没有分配到任何单元的材质
    UnusedMaterial { id: ComponentId, name: String },
    /// 无法捕捉到网格的弧
    ArcSnapFailed { arc_id: FeatureId, reason: String },
}

impl MappingDiagnostic {
    /// 按 warn 级别写入日志
    pub fn log(&self) {
        warn!("{self}");
    }
}

impl fmt::Display for MappingDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnassignedCells { cells } => {
                write!(f, "以下单元被归入 \"unassigned\" 材质: {cells:?}")
            }
            Self::UnusedMaterial { name, .. } => {
                write!(f, "材质 {name} 没有分配到任何单元")
            }
            Self::ArcSnapFailed { arc_id, reason } => {
                write!(f, "弧 {arc_id} 无法捕捉到网格: {reason}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let d = MappingDiagnostic::UnassignedCells { cells: vec![1, 4] };
        assert!(d.to_string().contains("[1, 4]"));
        let d = MappingDiagnostic::ArcSnapFailed {
            arc_id: 7,
            reason: "空".into(),
        };
        assert!(d.to_string().contains("弧 7"));
    }
}
