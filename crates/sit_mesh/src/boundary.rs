// crates/sit_mesh/src/boundary.rs

//! 边界检测
//!
//! 从任意多边形单元中提取边界循环。只被一个单元使用的边是边界边，
//! 边界边首尾相接构成循环；面积最大的循环标记为外边界。

use std::collections::{BTreeMap, BTreeSet};

use glam::DVec2;

/// 边界循环
#[derive(Debug, Clone)]
pub struct BoundaryLoop {
    /// 边界顶点索引 (有序，不重复首点)
    pub vertices: Vec<usize>,
    /// 是否为外边界
    pub is_outer: bool,
    /// 周长
    pub perimeter: f64,
}

impl BoundaryLoop {
    /// 创建边界循环
    pub fn new(vertices: Vec<usize>, is_outer: bool) -> Self {
        Self {
            vertices,
            is_outer,
            perimeter: 0.0,
        }
    }

    /// 计算周长
    pub fn compute_perimeter(&mut self, coords: &[DVec2]) {
        let n = self.vertices.len();
        self.perimeter = (0..n)
            .map(|i| coords[self.vertices[i]].distance(coords[self.vertices[(i + 1) % n]]))
            .sum();
    }

    /// 有符号面积，逆时针为正
    pub fn signed_area(&self, coords: &[DVec2]) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let a = coords[self.vertices[i]];
                let b = coords[self.vertices[(i + 1) % n]];
                a.perp_dot(b)
            })
            .sum();
        twice / 2.0
    }

    /// 顶点在循环中的位置
    pub fn position_of(&self, vertex: usize) -> Option<usize> {
        self.vertices.iter().position(|&v| v == vertex)
    }

    /// 顶点数
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// 边界提取器
pub struct BoundaryExtractor;

impl BoundaryExtractor {
    /// 从多边形单元提取边界
    ///
    /// # 参数
    /// - `cells`: 每个单元的节点索引
    /// - `coords`: 节点平面坐标，用于周长和外边界判定
    ///
    /// # 返回
    /// 边界循环列表，外边界循环在前
    pub fn extract<'a>(
        cells: impl IntoIterator<Item = &'a [usize]>,
        coords: &[DVec2],
    ) -> Vec<BoundaryLoop> {
        let edges = Self::boundary_edges(cells);
        if edges.is_empty() {
            return Vec::new();
        }

        let mut loops = Self::build_loops_from_edges(&edges);
        for l in &mut loops {
            l.compute_perimeter(coords);
        }

        let outer_idx = loops
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| {
                a.signed_area(coords)
                    .abs()
                    .total_cmp(&b.signed_area(coords).abs())
            })
            .map(|(i, _)| i)
            .unwrap_or(0);
        loops[outer_idx].is_outer = true;
        loops.swap(0, outer_idx);

        loops
    }

    /// 提取边界边（只被一个单元使用的无向边）
    pub fn boundary_edges<'a>(
        cells: impl IntoIterator<Item = &'a [usize]>,
    ) -> Vec<(usize, usize)> {
        let mut edge_count: BTreeMap<(usize, usize), usize> = BTreeMap::new();

        for cell in cells {
            let n = cell.len();
            for i in 0..n {
                let a = cell[i];
                let b = cell[(i + 1) % n];
                let edge = if a < b { (a, b) } else { (b, a) };
                *edge_count.entry(edge).or_insert(0) += 1;
            }
        }

        edge_count
            .into_iter()
            .filter(|(_, count)| *count == 1)
            .map(|(edge, _)| edge)
            .collect()
    }

    /// 从边界边构建循环
    fn build_loops_from_edges(edges: &[(usize, usize)]) -> Vec<BoundaryLoop> {
        let mut adjacency: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for &(a, b) in edges {
            adjacency.entry(a).or_default().push(b);
            adjacency.entry(b).or_default().push(a);
        }

        let mut visited: BTreeSet<(usize, usize)> = BTreeSet::new();
        let mut loops = Vec::new();

        for &(start_a, start_b) in edges {
            if !visited.insert((start_a, start_b)) {
                continue;
            }

            let mut vertices = vec![start_a];
            let mut prev = start_a;
            let mut current = start_b;

            while current != start_a {
                vertices.push(current);

                let next = adjacency.get(&current).and_then(|neighbors| {
                    neighbors.iter().copied().find(|&n| {
                        n != prev && !visited.contains(&(current.min(n), current.max(n)))
                    })
                });

                match next {
                    Some(n) => {
                        visited.insert((current.min(n), current.max(n)));
                        prev = current;
                        current = n;
                    }
                    // 非流形边界，停止
                    None => break,
                }
            }

            loops.push(BoundaryLoop::new(vertices, false));
        }

        loops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_coords() -> Vec<DVec2> {
        // 3x3 节点
        let mut coords = Vec::new();
        for j in 0..3 {
            for i in 0..3 {
                coords.push(DVec2::new(i as f64, j as f64));
            }
        }
        coords
    }

    #[test]
    fn test_single_triangle() {
        let coords = vec![DVec2::ZERO, DVec2::X, DVec2::Y];
        let cells = [vec![0, 1, 2]];
        let loops = BoundaryExtractor::extract(cells.iter().map(|c| c.as_slice()), &coords);

        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 3);
        assert!(loops[0].is_outer);
    }

    #[test]
    fn test_quads_share_edges() {
        let coords = grid_coords();
        let cells = [
            vec![0, 1, 4, 3],
            vec![1, 2, 5, 4],
            vec![3, 4, 7, 6],
            vec![4, 5, 8, 7],
        ];
        let loops = BoundaryExtractor::extract(cells.iter().map(|c| c.as_slice()), &coords);

        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 8);
        assert!(loops[0].position_of(4).is_none());
        assert!((loops[0].perimeter - 8.0).abs() < 1e-12);
        assert!((loops[0].signed_area(&coords).abs() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_ring_with_hole() {
        // 4x4 节点，去掉中心单元
        let mut coords = Vec::new();
        for j in 0..4 {
            for i in 0..4 {
                coords.push(DVec2::new(i as f64, j as f64));
            }
        }
        let mut cells = Vec::new();
        for j in 0..3 {
            for i in 0..3 {
                if i == 1 && j == 1 {
                    continue;
                }
                let n = j * 4 + i;
                cells.push(vec![n, n + 1, n + 5, n + 4]);
            }
        }
        let loops = BoundaryExtractor::extract(cells.iter().map(|c| c.as_slice()), &coords);

        assert_eq!(loops.len(), 2);
        assert!(loops[0].is_outer);
        assert_eq!(loops[0].len(), 12);
        assert!(!loops[1].is_outer);
        assert_eq!(loops[1].len(), 4);
    }

    #[test]
    fn test_boundary_edges_empty() {
        let cells: Vec<Vec<usize>> = Vec::new();
        assert!(BoundaryExtractor::boundary_edges(cells.iter().map(|c| c.as_slice())).is_empty());
    }
}
