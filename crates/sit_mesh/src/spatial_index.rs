// crates/sit_mesh/src/spatial_index.rs

//! 网格空间索引
//!
//! 基于 R-Tree 的单元包围盒索引，用于多边形捕捉时快速筛选候选单元。

use glam::DVec2;
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use serde::{Deserialize, Serialize};

use crate::ugrid::UGrid;

/// 单元包围盒
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellEnvelope {
    /// 单元索引
    pub cell_index: usize,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl CellEnvelope {
    /// 从单元顶点创建包围盒
    pub fn new(cell_index: usize, vertices: &[DVec2]) -> Self {
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for v in vertices {
            min_x = min_x.min(v.x);
            min_y = min_y.min(v.y);
            max_x = max_x.max(v.x);
            max_y = max_y.max(v.y);
        }

        Self {
            cell_index,
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// 检查点是否在包围盒内（闭区间）
    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl RTreeObject for CellEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PointDistance for CellEnvelope {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = (self.min_x - point[0]).max(0.0).max(point[0] - self.max_x);
        let dy = (self.min_y - point[1]).max(0.0).max(point[1] - self.max_y);
        dx * dx + dy * dy
    }

    fn contains_point(&self, point: &[f64; 2]) -> bool {
        CellEnvelope::contains_point(self, point[0], point[1])
    }
}

/// 网格单元空间索引
pub struct MeshSpatialIndex {
    tree: RTree<CellEnvelope>,
}

impl MeshSpatialIndex {
    /// 从网格构建索引
    pub fn build(grid: &UGrid) -> Self {
        let coords = grid.planar_locations();
        let envelopes: Vec<CellEnvelope> = grid
            .cells()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(i, cell)| {
                let vertices: Vec<DVec2> = cell.iter().map(|&p| coords[p]).collect();
                CellEnvelope::new(i, &vertices)
            })
            .collect();

        Self {
            tree: RTree::bulk_load(envelopes),
        }
    }

    /// 包围盒与给定矩形相交的单元，升序
    pub fn cells_intersecting(&self, min: DVec2, max: DVec2) -> Vec<usize> {
        let query = AABB::from_corners([min.x, min.y], [max.x, max.y]);
        let mut cells: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&query)
            .map(|e| e.cell_index)
            .collect();
        cells.sort_unstable();
        cells
    }

    /// 包围盒包含给定点的单元，升序
    pub fn cells_at_point(&self, p: DVec2) -> Vec<usize> {
        let mut cells: Vec<usize> = self
            .tree
            .locate_all_at_point(&[p.x, p.y])
            .map(|e| e.cell_index)
            .collect();
        cells.sort_unstable();
        cells
    }

    /// 已索引单元数
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
