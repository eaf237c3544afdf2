// crates/sit_coverage/src/geometry.rs

//! 覆盖层几何
//!
//! 点按 ID 存储；弧以点 ID 引用起点、终点和中间顶点；
//! 多边形保存外环和可选的内环（坐标）。

use std::collections::BTreeMap;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use sit_foundation::FeatureId;
use uuid::Uuid;

use crate::error::{CoverageError, CoverageResult};
use crate::feature_map::FeatureKind;

/// 覆盖层弧
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageArc {
    pub id: FeatureId,
    /// 起点 ID
    pub start: FeatureId,
    /// 终点 ID
    pub end: FeatureId,
    /// 中间顶点 ID（有序）
    #[serde(default)]
    pub vertices: Vec<FeatureId>,
}

impl CoverageArc {
    /// 起点、中间顶点、终点的完整点 ID 序列
    pub fn point_ids(&self) -> impl Iterator<Item = FeatureId> + '_ {
        std::iter::once(self.start)
            .chain(self.vertices.iter().copied())
            .chain(std::iter::once(self.end))
    }
}

/// 覆盖层多边形
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoveragePolygon {
    pub id: FeatureId,
    pub outer: Vec<DVec3>,
    #[serde(default)]
    pub holes: Vec<Vec<DVec3>>,
}

/// 覆盖层
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    pub uuid: Uuid,
    pub name: String,
    #[serde(default)]
    points: BTreeMap<FeatureId, DVec3>,
    #[serde(default)]
    arcs: Vec<CoverageArc>,
    #[serde(default)]
    polygons: Vec<CoveragePolygon>,
}

impl Coverage {
    /// 新建空覆盖层（随机 UUID）
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_uuid(Uuid::new_v4(), name)
    }

    pub fn with_uuid(uuid: Uuid, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            points: BTreeMap::new(),
            arcs: Vec::new(),
            polygons: Vec::new(),
        }
    }

    pub fn add_point(&mut self, id: FeatureId, location: DVec3) {
        self.points.insert(id, location);
    }

    /// 添加弧；引用的点必须已存在
    pub fn add_arc(&mut self, arc: CoverageArc) -> CoverageResult<()> {
        if let Some(missing) = arc.point_ids().find(|id| !self.points.contains_key(id)) {
            return Err(CoverageError::FeatureNotFound {
                kind: FeatureKind::Point,
                id: missing,
            });
        }
        self.arcs.push(arc);
        Ok(())
    }

    pub fn add_polygon(&mut self, polygon: CoveragePolygon) {
        self.polygons.push(polygon);
    }

    pub fn point(&self, id: FeatureId) -> Option<DVec3> {
        self.points.get(&id).copied()
    }

    pub fn points(&self) -> &BTreeMap<FeatureId, DVec3> {
        &self.points
    }

    pub fn arcs(&self) -> &[CoverageArc] {
        &self.arcs
    }

    pub fn polygons(&self) -> &[CoveragePolygon] {
        &self.polygons
    }

    pub fn arc(&self, id: FeatureId) -> Option<&CoverageArc> {
        self.arcs.iter().find(|a| a.id == id)
    }

    pub fn polygon(&self, id: FeatureId) -> Option<&CoveragePolygon> {
        self.polygons.iter().find(|p| p.id == id)
    }

    /// 弧的完整坐标折线（起点、中间顶点、终点）
    pub fn arc_locations(&self, arc: &CoverageArc) -> CoverageResult<Vec<DVec3>> {
        arc.point_ids()
            .map(|id| {
                self.point(id).ok_or(CoverageError::FeatureNotFound {
                    kind: FeatureKind::Point,
                    id,
                })
            })
            .collect()
    }

    /// 没有任何要素
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.arcs.is_empty() && self.polygons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Coverage {
        let mut cov = Coverage::new("Boundary Conditions");
        cov.add_point(1, DVec3::new(0.0, 0.0, 0.0));
        cov.add_point(2, DVec3::new(1.0, 0.0, 0.0));
        cov.add_point(3, DVec3::new(2.0, 0.0, 0.0));
        cov.add_arc(CoverageArc {
            id: 1,
            start: 1,
            end: 3,
            vertices: vec![2],
        })
        .unwrap();
        cov
    }

    #[test]
    fn test_arc_locations() {
        let cov = sample();
        let arc = cov.arc(1).unwrap();
        let locs = cov.arc_locations(arc).unwrap();
        assert_eq!(locs.len(), 3);
        assert_eq!(locs[2], DVec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_arc_with_missing_point_rejected() {
        let mut cov = sample();
        let err = cov
            .add_arc(CoverageArc {
                id: 2,
                start: 1,
                end: 9,
                vertices: vec![],
            })
            .unwrap_err();
        assert!(matches!(err, CoverageError::FeatureNotFound { id: 9, .. }));
        assert_eq!(cov.arcs().len(), 1);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut cov = sample();
        cov.add_polygon(CoveragePolygon {
            id: 1,
            outer: vec![DVec3::ZERO, DVec3::X, DVec3::Y],
            holes: vec![],
        });
        let json = serde_json::to_string(&cov).unwrap();
        let back: Coverage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cov);
        assert!(!back.is_empty());
    }
}
