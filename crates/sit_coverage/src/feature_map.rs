// crates/sit_coverage/src/feature_map.rs

//! 要素 → 组件 ID 映射
//!
//! 映射按 (覆盖层 UUID, 要素类型) 分区，不同覆盖层实例互不影响。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sit_foundation::{ComponentId, FeatureId, UNASSIGNED_COMPONENT_ID};
use uuid::Uuid;

/// 要素类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeatureKind {
    Point,
    Arc,
    Polygon,
}

/// 序列化形式的一个分区
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureMapEntry {
    pub coverage: Uuid,
    pub kind: FeatureKind,
    pub ids: BTreeMap<FeatureId, ComponentId>,
}

/// 要素 → 组件 ID 映射
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<FeatureMapEntry>", into = "Vec<FeatureMapEntry>")]
pub struct FeatureCompIdMap {
    maps: BTreeMap<(Uuid, FeatureKind), BTreeMap<FeatureId, ComponentId>>,
}

impl From<Vec<FeatureMapEntry>> for FeatureCompIdMap {
    fn from(entries: Vec<FeatureMapEntry>) -> Self {
        Self {
            maps: entries
                .into_iter()
                .map(|e| ((e.coverage, e.kind), e.ids))
                .collect(),
        }
    }
}

impl From<FeatureCompIdMap> for Vec<FeatureMapEntry> {
    fn from(map: FeatureCompIdMap) -> Self {
        map.maps
            .into_iter()
            .map(|((coverage, kind), ids)| FeatureMapEntry {
                coverage,
                kind,
                ids,
            })
            .collect()
    }
}

impl FeatureCompIdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置要素的组件 ID
    pub fn assign(&mut self, coverage: Uuid, kind: FeatureKind, feature: FeatureId, comp: ComponentId) {
        self.maps
            .entry((coverage, kind))
            .or_default()
            .insert(feature, comp);
    }

    /// 要素的组件 ID；未设置时返回 `None`
    pub fn comp_id(&self, coverage: Uuid, kind: FeatureKind, feature: FeatureId) -> Option<ComponentId> {
        self.maps
            .get(&(coverage, kind))
            .and_then(|m| m.get(&feature))
            .copied()
    }

    /// 移除要素的映射
    pub fn remove_feature(&mut self, coverage: Uuid, kind: FeatureKind, feature: FeatureId) -> Option<ComponentId> {
        self.maps
            .get_mut(&(coverage, kind))
            .and_then(|m| m.remove(&feature))
    }

    /// 把所有指向 `comp` 的要素改为未指定，返回受影响的 (覆盖层, 类型, 要素)
    pub fn unassign_component(&mut self, comp: ComponentId) -> Vec<(Uuid, FeatureKind, FeatureId)> {
        let mut changed = Vec::new();
        for (&(coverage, kind), ids) in self.maps.iter_mut() {
            for (&feature, id) in ids.iter_mut() {
                if *id == comp {
                    *id = UNASSIGNED_COMPONENT_ID;
                    changed.push((coverage, kind, feature));
                }
            }
        }
        changed
    }

    /// 一个分区内指向 `comp` 的要素，升序
    pub fn features_for_component(&self, coverage: Uuid, kind: FeatureKind, comp: ComponentId) -> Vec<FeatureId> {
        self.maps
            .get(&(coverage, kind))
            .map(|m| {
                m.iter()
                    .filter(|(_, &c)| c == comp)
                    .map(|(&f, _)| f)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// 一个分区的全部映射
    pub fn ids(&self, coverage: Uuid, kind: FeatureKind) -> Option<&BTreeMap<FeatureId, ComponentId>> {
        self.maps.get(&(coverage, kind))
    }

    /// 清空一个覆盖层的所有分区
    pub fn clear_coverage(&mut self, coverage: Uuid) {
        self.maps.retain(|(c, _), _| *c != coverage);
    }

    pub fn is_empty(&self) -> bool {
        self.maps.values().all(|m| m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partitioned_by_coverage_and_kind() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut map = FeatureCompIdMap::new();
        map.assign(a, FeatureKind::Polygon, 1, 5);
        map.assign(b, FeatureKind::Polygon, 1, 6);
        map.assign(a, FeatureKind::Arc, 1, 7);

        assert_eq!(map.comp_id(a, FeatureKind::Polygon, 1), Some(5));
        assert_eq!(map.comp_id(b, FeatureKind::Polygon, 1), Some(6));
        assert_eq!(map.comp_id(a, FeatureKind::Arc, 1), Some(7));
        assert_eq!(map.comp_id(a, FeatureKind::Point, 1), None);
    }

    #[test]
    fn test_unassign_component_cascades() {
        let cov = Uuid::new_v4();
        let mut map = FeatureCompIdMap::new();
        map.assign(cov, FeatureKind::Polygon, 1, 2);
        map.assign(cov, FeatureKind::Polygon, 2, 3);
        map.assign(cov, FeatureKind::Polygon, 3, 2);

        let changed = map.unassign_component(2);
        assert_eq!(changed.len(), 2);
        assert_eq!(map.comp_id(cov, FeatureKind::Polygon, 1), Some(0));
        assert_eq!(map.comp_id(cov, FeatureKind::Polygon, 2), Some(3));
        assert_eq!(map.features_for_component(cov, FeatureKind::Polygon, 0), vec![1, 3]);
    }

    #[test]
    fn test_json_roundtrip() {
        let cov = Uuid::new_v4();
        let mut map = FeatureCompIdMap::new();
        map.assign(cov, FeatureKind::Arc, 10, 1);
        let json = serde_json::to_string(&map).unwrap();
        let back: FeatureCompIdMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);

        map.clear_coverage(cov);
        assert!(map.is_empty());
    }
}
