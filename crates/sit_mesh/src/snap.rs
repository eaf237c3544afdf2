// crates/sit_mesh/src/snap.rs

//! 覆盖层要素到网格的捕捉
//!
//! - [`SnapPolygon`]: 单元形心落在多边形内（且不在孔内）即属于该多边形
//! - [`SnapExteriorArc`]: 弧端点捕捉到最近的边界节点，再沿边界循环走到终点

use glam::{DVec2, DVec3};
use rstar::primitives::GeomWithData;
use rstar::RTree;
use tracing::debug;

use crate::boundary::{BoundaryExtractor, BoundaryLoop};
use crate::geometry::{bounds, distance_to_polyline, point_in_polygon};
use crate::spatial_index::MeshSpatialIndex;
use crate::traits::{ArcSnapper, MeshProvider, PolygonSnapper, SnappedArc};
use crate::ugrid::UGrid;

fn planar(points: &[DVec3]) -> Vec<DVec2> {
    points.iter().map(|p| p.truncate()).collect()
}

/// 多边形捕捉器
pub struct SnapPolygon<'a> {
    grid: &'a UGrid,
    index: MeshSpatialIndex,
    centroids: Vec<DVec2>,
}

impl<'a> SnapPolygon<'a> {
    pub fn new(grid: &'a UGrid) -> Self {
        let centroids = (0..grid.cell_count())
            .map(|i| grid.cell_centroid(i).unwrap_or(DVec2::ZERO))
            .collect();
        Self {
            grid,
            index: MeshSpatialIndex::build(grid),
            centroids,
        }
    }

    /// 被捕捉的网格
    pub fn grid(&self) -> &UGrid {
        self.grid
    }
}

impl PolygonSnapper for SnapPolygon<'_> {
    fn cells_in_polygon(&self, outer: &[DVec3], holes: &[Vec<DVec3>]) -> Vec<usize> {
        let outer = planar(outer);
        let Some((min, max)) = bounds(&outer) else {
            return Vec::new();
        };
        let holes: Vec<Vec<DVec2>> = holes.iter().map(|h| planar(h)).collect();

        self.index
            .cells_intersecting(min, max)
            .into_iter()
            .filter(|&cell| point_in_polygon(self.centroids[cell], &outer, &holes))
            .collect()
    }
}

type BoundaryNode = GeomWithData<[f64; 2], (usize, usize)>;

/// 外边界弧捕捉器
pub struct SnapExteriorArc<'a> {
    grid: &'a UGrid,
    loops: Vec<BoundaryLoop>,
    node_tree: RTree<BoundaryNode>,
}

impl<'a> SnapExteriorArc<'a> {
    pub fn new(grid: &'a UGrid) -> Self {
        let coords = grid.planar_locations();
        let loops = BoundaryExtractor::extract(grid.cells(), &coords);
        let nodes: Vec<BoundaryNode> = loops
            .iter()
            .enumerate()
            .flat_map(|(li, l)| {
                let coords = &coords;
                l.vertices.iter().enumerate().map(move |(pos, &v)| {
                    GeomWithData::new([coords[v].x, coords[v].y], (li, pos))
                })
            })
            .collect();
        debug!(
            loops = loops.len(),
            boundary_nodes = nodes.len(),
            "外边界捕捉器已构建"
        );

        Self {
            grid,
            loops,
            node_tree: RTree::bulk_load(nodes),
        }
    }

    /// 边界循环（外边界在前）
    pub fn loops(&self) -> &[BoundaryLoop] {
        &self.loops
    }

    fn nearest(&self, p: DVec2) -> Option<(usize, usize)> {
        self.node_tree.nearest_neighbor(&[p.x, p.y]).map(|n| n.data)
    }

    /// 沿循环从 `from` 走到 `to`；`full` 时绕行一整圈回到起点
    fn walk(l: &BoundaryLoop, from: usize, to: usize, forward: bool, full: bool) -> Vec<usize> {
        let n = l.len();
        let mut out = vec![l.vertices[from]];
        let mut pos = from;
        loop {
            pos = if forward { (pos + 1) % n } else { (pos + n - 1) % n };
            out.push(l.vertices[pos]);
            if pos == to && (!full || out.len() > n) {
                break;
            }
        }
        out
    }
}

impl ArcSnapper for SnapExteriorArc<'_> {
    fn snap_arc(&self, path: &[DVec3]) -> SnappedArc {
        let path2d = planar(path);
        let (Some(&first), Some(&last)) = (path2d.first(), path2d.last()) else {
            return SnappedArc::default();
        };
        let (Some((start_loop, start)), Some((end_loop, end))) =
            (self.nearest(first), self.nearest(last))
        else {
            return SnappedArc::default();
        };
        if start_loop != end_loop {
            debug!(start_loop, end_loop, "弧两端落在不同边界循环上");
            return SnappedArc::default();
        }

        let l = &self.loops[start_loop];
        let closed = start == end;
        if closed && path2d.len() < 3 {
            let id = l.vertices[start];
            return SnappedArc {
                ids: vec![id],
                locations: vec![self.grid.locations()[id]],
            };
        }

        let locations = self.grid.locations();
        let score = |ids: &[usize]| -> f64 {
            ids.iter()
                .map(|&i| distance_to_polyline(locations[i].truncate(), &path2d))
                .sum::<f64>()
                / ids.len() as f64
        };

        let forward = Self::walk(l, start, end, true, closed);
        let backward = Self::walk(l, start, end, false, closed);
        let ids = if score(&backward) < score(&forward) {
            backward
        } else {
            forward
        };

        SnappedArc {
            locations: ids.iter().map(|&i| locations[i]).collect(),
            ids,
        }
    }
}
