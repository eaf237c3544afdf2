// crates/sit_mesh/src/cell.rs

//! 单元类型
//!
//! 单元流中的类型标签沿用 VTK 单元类型编码。

use serde::{Deserialize, Serialize};

/// 单元类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    /// 三角形（3 个节点）
    Triangle,
    /// 四边形（4 个节点）
    Quad,
    /// 一般多边形
    Polygon,
}

impl CellType {
    /// 单元流中的类型标签
    pub const fn code(self) -> usize {
        match self {
            Self::Triangle => 5,
            Self::Polygon => 7,
            Self::Quad => 9,
        }
    }

    /// 从类型标签解析
    pub fn from_code(code: usize) -> Option<Self> {
        match code {
            5 => Some(Self::Triangle),
            7 => Some(Self::Polygon),
            9 => Some(Self::Quad),
            _ => None,
        }
    }

    /// 根据节点数推断类型：3 → 三角形, 4 → 四边形, 其它 → 多边形
    pub fn for_point_count(n: usize) -> Self {
        match n {
            3 => Self::Triangle,
            4 => Self::Quad,
            _ => Self::Polygon,
        }
    }

    /// 节点数是否与类型相符
    pub fn accepts_point_count(self, n: usize) -> bool {
        match self {
            Self::Triangle => n == 3,
            Self::Quad => n == 4,
            Self::Polygon => n >= 3,
        }
    }

    /// 获取名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Triangle => "triangle",
            Self::Quad => "quad",
            Self::Polygon => "polygon",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for t in [CellType::Triangle, CellType::Quad, CellType::Polygon] {
            assert_eq!(CellType::from_code(t.code()), Some(t));
        }
        assert_eq!(CellType::from_code(1), None);
    }

    #[test]
    fn test_for_point_count() {
        assert_eq!(CellType::for_point_count(3), CellType::Triangle);
        assert_eq!(CellType::for_point_count(4), CellType::Quad);
        assert_eq!(CellType::for_point_count(6), CellType::Polygon);
        assert!(!CellType::Quad.accepts_point_count(3));
    }
}
