// crates/sit_mesh/src/ugrid.rs

//! 非结构网格
//!
//! 网格由节点坐标和扁平单元流组成。单元流对每个单元依次存放
//! `[类型标签, 节点数, 节点索引...]`，节点索引从 0 开始。
//! 构造时一次性校验并建立单元偏移表，之后网格只读。

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::cell::CellType;
use crate::error::{MeshError, MeshResult};
use crate::traits::MeshProvider;

/// 网格文件的持久化形式
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UGridData {
    pub locations: Vec<DVec3>,
    pub cellstream: Vec<usize>,
}

/// 非结构网格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UGridData", into = "UGridData")]
pub struct UGrid {
    locations: Vec<DVec3>,
    cellstream: Vec<usize>,
    /// 每个单元在单元流中的起始偏移（指向类型标签）
    cell_offsets: Vec<usize>,
}

impl TryFrom<UGridData> for UGrid {
    type Error = MeshError;

    fn try_from(data: UGridData) -> MeshResult<Self> {
        Self::new(data.locations, data.cellstream)
    }
}

impl From<UGrid> for UGridData {
    fn from(grid: UGrid) -> Self {
        Self {
            locations: grid.locations,
            cellstream: grid.cellstream,
        }
    }
}

impl UGrid {
    /// 从节点坐标和单元流创建网格
    ///
    /// # 错误
    ///
    /// 单元流截断、类型标签未知、节点数与类型不符或节点索引越界时返回错误。
    pub fn new(locations: Vec<DVec3>, cellstream: Vec<usize>) -> MeshResult<Self> {
        let n_nodes = locations.len();
        let mut cell_offsets = Vec::new();
        let mut pos = 0;

        while pos < cellstream.len() {
            if pos + 1 >= cellstream.len() {
                return Err(MeshError::invalid_cellstream(pos, "缺少节点数"));
            }
            let code = cellstream[pos];
            let count = cellstream[pos + 1];
            let cell_type = CellType::from_code(code).ok_or_else(|| {
                MeshError::invalid_cellstream(pos, format!("未知单元类型标签 {code}"))
            })?;
            if !cell_type.accepts_point_count(count) {
                return Err(MeshError::invalid_cellstream(
                    pos,
                    format!("{} 单元不能有 {count} 个节点", cell_type.name()),
                ));
            }
            let end = pos + 2 + count;
            if end > cellstream.len() {
                return Err(MeshError::invalid_cellstream(pos, "单元节点列表被截断"));
            }
            let cell = cell_offsets.len();
            if let Some(&node) = cellstream[pos + 2..end].iter().find(|&&n| n >= n_nodes) {
                return Err(MeshError::NodeOutOfRange {
                    cell,
                    node,
                    n_nodes,
                });
            }
            cell_offsets.push(pos);
            pos = end;
        }

        Ok(Self {
            locations,
            cellstream,
            cell_offsets,
        })
    }

    /// 从逐单元的节点列表创建网格，单元类型按节点数推断
    pub fn from_cells(locations: Vec<DVec3>, cells: &[Vec<usize>]) -> MeshResult<Self> {
        let mut cellstream = Vec::with_capacity(cells.iter().map(|c| c.len() + 2).sum());
        for cell in cells {
            cellstream.push(CellType::for_point_count(cell.len()).code());
            cellstream.push(cell.len());
            cellstream.extend_from_slice(cell);
        }
        Self::new(locations, cellstream)
    }

    /// 空网格
    pub fn empty() -> Self {
        Self {
            locations: Vec::new(),
            cellstream: Vec::new(),
            cell_offsets: Vec::new(),
        }
    }

    fn check_cell(&self, cell: usize) -> MeshResult<usize> {
        self.cell_offsets
            .get(cell)
            .copied()
            .ok_or(MeshError::CellOutOfRange {
                cell,
                n_cells: self.cell_offsets.len(),
            })
    }

    /// 单元类型
    pub fn cell_type(&self, cell: usize) -> MeshResult<CellType> {
        let offset = self.check_cell(cell)?;
        CellType::from_code(self.cellstream[offset])
            .ok_or_else(|| MeshError::invalid_cellstream(offset, "未知单元类型标签"))
    }

    /// 单元的节点索引
    pub fn cell_points(&self, cell: usize) -> MeshResult<&[usize]> {
        let offset = self.check_cell(cell)?;
        let count = self.cellstream[offset + 1];
        Ok(&self.cellstream[offset + 2..offset + 2 + count])
    }

    /// 遍历所有单元的节点索引
    pub fn cells(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.cell_offsets.iter().map(move |&offset| {
            let count = self.cellstream[offset + 1];
            &self.cellstream[offset + 2..offset + 2 + count]
        })
    }

    /// 单元形心（节点平均值，平面坐标）
    pub fn cell_centroid(&self, cell: usize) -> MeshResult<DVec2> {
        let points = self.cell_points(cell)?;
        let sum = points
            .iter()
            .fold(DVec2::ZERO, |acc, &p| acc + self.locations[p].truncate());
        Ok(sum / points.len() as f64)
    }

    /// 所有节点的平面坐标
    pub fn planar_locations(&self) -> Vec<DVec2> {
        self.locations.iter().map(|p| p.truncate()).collect()
    }

    /// 写入 JSON 网格文件
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> MeshResult<()> {
        let writer = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer(writer, self).map_err(|e| MeshError::Serialization(e.to_string()))
    }

    /// 读取 JSON 网格文件
    pub fn read_from_file(path: impl AsRef<Path>) -> MeshResult<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        serde_json::from_reader(reader).map_err(|e| MeshError::Serialization(e.to_string()))
    }
}

impl MeshProvider for UGrid {
    fn point_count(&self) -> usize {
        self.locations.len()
    }

    fn cell_count(&self) -> usize {
        self.cell_offsets.len()
    }

    fn locations(&self) -> &[DVec3] {
        &self.locations
    }

    fn cellstream(&self) -> &[usize] {
        &self.cellstream
    }

    fn cell_locations(&self, cell: usize) -> MeshResult<Vec<DVec3>> {
        Ok(self
            .cell_points(cell)?
            .iter()
            .map(|&p| self.locations[p])
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<DVec3> {
        vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_from_cells_builds_cellstream() {
        let grid = UGrid::from_cells(unit_square(), &[vec![0, 1, 2], vec![0, 2, 3]]).unwrap();
        assert_eq!(grid.cell_count(), 2);
        assert_eq!(grid.cellstream(), &[5, 3, 0, 1, 2, 5, 3, 0, 2, 3]);
        assert_eq!(grid.cell_points(1).unwrap(), &[0, 2, 3]);
        assert_eq!(grid.cell_type(0).unwrap(), CellType::Triangle);
    }

    #[test]
    fn test_quad_and_polygon() {
        let mut locations = unit_square();
        locations.push(DVec3::new(2.0, 0.5, 0.0));
        let grid =
            UGrid::from_cells(locations, &[vec![0, 1, 2, 3], vec![1, 4, 2, 3, 0]]).unwrap();
        assert_eq!(grid.cell_type(0).unwrap(), CellType::Quad);
        assert_eq!(grid.cell_type(1).unwrap(), CellType::Polygon);
    }

    #[test]
    fn test_rejects_out_of_range_node() {
        let err = UGrid::new(unit_square(), vec![5, 3, 0, 1, 9]).unwrap_err();
        assert!(matches!(err, MeshError::NodeOutOfRange { node: 9, .. }));
    }

    #[test]
    fn test_rejects_truncated_stream() {
        assert!(UGrid::new(unit_square(), vec![5, 3, 0, 1]).is_err());
        assert!(UGrid::new(unit_square(), vec![5]).is_err());
        assert!(UGrid::new(unit_square(), vec![9, 3, 0, 1, 2]).is_err());
    }

    #[test]
    fn test_cell_locations_and_centroid() {
        let grid = UGrid::from_cells(unit_square(), &[vec![0, 1, 2, 3]]).unwrap();
        let locs = grid.cell_locations(0).unwrap();
        assert_eq!(locs.len(), 4);
        assert_eq!(locs[2], DVec3::new(1.0, 1.0, 0.0));
        let c = grid.cell_centroid(0).unwrap();
        assert!((c - DVec2::new(0.5, 0.5)).length() < 1e-12);
        assert!(grid.cell_locations(3).is_err());
    }

    #[test]
    fn test_json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        let grid = UGrid::from_cells(unit_square(), &[vec![0, 1, 2, 3]]).unwrap();
        grid.write_to_file(&path).unwrap();
        let loaded = UGrid::read_from_file(&path).unwrap();
        assert_eq!(loaded, grid);
        assert_eq!(loaded.cell_points(0).unwrap(), &[0, 1, 2, 3]);
    }
}
