// crates/sit_coverage/src/arc_builder.rs

//! 覆盖层弧构建
//!
//! 从网格节点序列重建覆盖层弧。同一网格节点在一次构建中只生成一个点，
//! 点和弧的 ID 严格按输入顺序分配（起点、终点、中间顶点）。

use std::collections::BTreeMap;

use glam::DVec3;
use sit_foundation::FeatureId;
use tracing::debug;
use uuid::Uuid;

use crate::error::{CoverageError, CoverageResult};
use crate::geometry::{Coverage, CoverageArc};

/// 覆盖层弧构建器
pub struct CoverageArcBuilder<'a> {
    node_locations: &'a [DVec3],
    /// 网格节点 → 覆盖层点 ID
    point_map: BTreeMap<usize, FeatureId>,
    points: Vec<(FeatureId, DVec3)>,
    arcs: Vec<CoverageArc>,
    next_point_id: FeatureId,
    next_arc_id: FeatureId,
}

impl<'a> CoverageArcBuilder<'a> {
    /// 点和弧的 ID 都从 1 开始
    pub fn new(node_locations: &'a [DVec3]) -> Self {
        Self::with_seeds(node_locations, 1, 1)
    }

    pub fn with_seeds(
        node_locations: &'a [DVec3],
        next_point_id: FeatureId,
        next_arc_id: FeatureId,
    ) -> Self {
        Self {
            node_locations,
            point_map: BTreeMap::new(),
            points: Vec::new(),
            arcs: Vec::new(),
            next_point_id,
            next_arc_id,
        }
    }

    /// 沿用已有的 网格节点 → 点 ID 映射（增量构建）
    pub fn with_existing_points(mut self, existing: BTreeMap<usize, FeatureId>) -> Self {
        self.point_map = existing;
        self
    }

    fn check_node(&self, node: usize) -> CoverageResult<()> {
        if self.point_map.contains_key(&node) || node < self.node_locations.len() {
            Ok(())
        } else {
            Err(CoverageError::NodeOutOfRange {
                node,
                n_nodes: self.node_locations.len(),
            })
        }
    }

    fn point_for_node(&mut self, node: usize) -> CoverageResult<FeatureId> {
        if let Some(&id) = self.point_map.get(&node) {
            return Ok(id);
        }
        let location = *self
            .node_locations
            .get(node)
            .ok_or(CoverageError::NodeOutOfRange {
                node,
                n_nodes: self.node_locations.len(),
            })?;
        let id = self.next_point_id;
        self.next_point_id += 1;
        self.point_map.insert(node, id);
        self.points.push((id, location));
        Ok(id)
    }

    /// 添加一条弧，返回弧 ID；任一节点越界时不生成任何点
    pub fn add_arc(&mut self, start_node: usize, end_node: usize, vertices: &[usize]) -> CoverageResult<FeatureId> {
        self.check_node(start_node)?;
        self.check_node(end_node)?;
        for &v in vertices {
            self.check_node(v)?;
        }

        let start = self.point_for_node(start_node)?;
        let end = self.point_for_node(end_node)?;
        let vertices = vertices
            .iter()
            .map(|&v| self.point_for_node(v))
            .collect::<CoverageResult<Vec<_>>>()?;

        let id = self.next_arc_id;
        self.next_arc_id += 1;
        self.arcs.push(CoverageArc {
            id,
            start,
            end,
            vertices,
        });
        Ok(id)
    }

    /// 从完整节点折线添加弧：首尾为端点，其余为中间顶点
    pub fn add_arc_from_nodes(&mut self, nodes: &[usize]) -> CoverageResult<Option<FeatureId>> {
        match nodes {
            [] => Ok(None),
            [only] => self.add_arc(*only, *only, &[]).map(Some),
            [first, inner @ .., last] => self.add_arc(*first, *last, inner).map(Some),
        }
    }

    pub fn arcs(&self) -> &[CoverageArc] {
        &self.arcs
    }

    /// 已生成的点数
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn next_point_id(&self) -> FeatureId {
        self.next_point_id
    }

    pub fn next_arc_id(&self) -> FeatureId {
        self.next_arc_id
    }

    /// 网格节点 → 点 ID 映射
    pub fn point_map(&self) -> &BTreeMap<usize, FeatureId> {
        &self.point_map
    }

    /// 生成覆盖层
    pub fn build_coverage(self, uuid: Uuid, name: impl Into<String>) -> CoverageResult<Coverage> {
        let mut coverage = Coverage::with_uuid(uuid, name);
        for (id, location) in self.points {
            coverage.add_point(id, location);
        }
        // 沿用的旧点只有 ID，坐标从网格补齐
        for (&node, &id) in &self.point_map {
            if coverage.point(id).is_none() {
                if let Some(&location) = self.node_locations.get(node) {
                    coverage.add_point(id, location);
                }
            }
        }
        debug!(
            arcs = self.arcs.len(),
            points = coverage.points().len(),
            "覆盖层弧构建完成"
        );
        for arc in self.arcs {
            coverage.add_arc(arc)?;
        }
        Ok(coverage)
    }
}
