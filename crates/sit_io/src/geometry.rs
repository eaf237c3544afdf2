// crates/sit_io/src/geometry.rs

//! 几何文件读写
//!
//! ```text
//! ###This is a geometry file for Standard Interface Template.###
//! Number of nodes: 4
//! Node 1 0.0 0.0 0.0
//! ...
//! Cell 1 1 2 3
//! ```
//!
//! 第二行只取最后一个词作为节点数。节点和单元默认按编号顺序连续出现，
//! 读取时不检查编号间隙。

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use glam::DVec3;
use sit_mesh::{MeshProvider, UGrid};
use tracing::{info, warn};

use crate::error::IoResult;
use crate::format::FileKind;
use crate::lines::{open, LineReader, STREAM_LABEL};

/// 读取到的几何数据
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryData {
    /// 节点坐标
    pub nodes: Vec<DVec3>,
    /// 单元节点索引（0 基）
    pub cells: Vec<Vec<usize>>,
    /// 文件声明的节点数
    pub declared_node_count: usize,
}

impl GeometryData {
    /// 构建网格：3 节点为三角形，4 节点为四边形，其余为多边形
    pub fn build_grid(&self) -> IoResult<UGrid> {
        info!(nodes = self.nodes.len(), cells = self.cells.len(), "构建网格");
        Ok(UGrid::from_cells(self.nodes.clone(), &self.cells)?)
    }
}

/// 几何文件读取器
pub struct GeometryReader;

impl GeometryReader {
    /// 读取几何文件
    pub fn read<P: AsRef<Path>>(path: P) -> IoResult<GeometryData> {
        let path = path.as_ref();
        Self::read_labeled(open(path)?, path.display().to_string())
    }

    /// 从 reader 读取
    pub fn read_from_reader<R: BufRead>(reader: R) -> IoResult<GeometryData> {
        Self::read_labeled(reader, STREAM_LABEL)
    }

    /// 读取几何文件并直接构建网格
    pub fn read_grid<P: AsRef<Path>>(path: P) -> IoResult<UGrid> {
        Self::read(path)?.build_grid()
    }

    fn read_labeled<R: BufRead>(reader: R, label: impl Into<String>) -> IoResult<GeometryData> {
        let mut lines = LineReader::new(reader, label);

        // 文件头
        if lines.next_raw()?.is_none() {
            return Err(lines.error("文件为空"));
        }
        let count_line = lines
            .next_tokens()?
            .ok_or_else(|| lines.error("缺少节点数"))?;
        let declared_node_count = match count_line.last() {
            Some(token) => lines.parse_number::<usize>(token)?,
            None => return Err(lines.error("缺少节点数")),
        };

        let mut nodes = Vec::with_capacity(declared_node_count);
        let mut cells = Vec::new();
        while let Some(tokens) = lines.next_tokens()? {
            match tokens[0].as_str() {
                "Node" => {
                    if tokens.len() != 5 {
                        return Err(lines.error("Node 行应为: Node <id> <x> <y> <z>"));
                    }
                    let x = lines.parse_number::<f64>(&tokens[2])?;
                    let y = lines.parse_number::<f64>(&tokens[3])?;
                    let z = lines.parse_number::<f64>(&tokens[4])?;
                    nodes.push(DVec3::new(x, y, z));
                }
                "Cell" => {
                    if tokens.len() < 5 {
                        return Err(lines.error("Cell 行至少需要 3 个节点"));
                    }
                    let cell = tokens[2..]
                        .iter()
                        .map(|t| lines.parse_file_id(t))
                        .collect::<IoResult<Vec<_>>>()?;
                    cells.push(cell);
                }
                other => {
                    return Err(lines.error(format!("未知的卡片: {other}")));
                }
            }
        }

        if nodes.len() != declared_node_count {
            warn!(
                declared = declared_node_count,
                found = nodes.len(),
                "节点数与文件声明不符"
            );
        }

        Ok(GeometryData {
            nodes,
            cells,
            declared_node_count,
        })
    }
}

/// 几何文件写入器
pub struct GeometryWriter;

impl GeometryWriter {
    /// 写入几何文件
    pub fn write<P: AsRef<Path>, M: MeshProvider + ?Sized>(path: P, grid: &M) -> IoResult<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        Self::write_to(&mut writer, grid)?;
        writer.flush()?;
        Ok(())
    }

    /// 写入到 writer
    ///
    /// 单元按单元流顺序编号，节点编号转为 1 基。
    pub fn write_to<W: Write, M: MeshProvider + ?Sized>(writer: &mut W, grid: &M) -> IoResult<()> {
        writeln!(writer, "{}", FileKind::Geometry.header())?;

        let locations = grid.locations();
        writeln!(writer, "Number of nodes: {}", locations.len())?;
        for (i, p) in locations.iter().enumerate() {
            writeln!(writer, "Node {} {} {} {}", i + 1, p.x, p.y, p.z)?;
        }

        let stream = grid.cellstream();
        let mut cell_id = 0;
        let mut i = 0;
        while i + 1 < stream.len() {
            cell_id += 1;
            let n_points = stream[i + 1];
            write!(writer, "Cell {cell_id}")?;
            for &node in stream.iter().skip(i + 2).take(n_points) {
                write!(writer, " {}", node + 1)?;
            }
            writeln!(writer)?;
            i += n_points + 2;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
###This is a geometry file for Standard Interface Template.###
Number of nodes: 5
Node 1 0.0 0.0 1.5
Node 2 10.0 0.0 2.0
Node 3 10.0 10.0 2.5
Node 4 0.0 10.0 3.0
Node 5 20.0 5.0 0.0
Cell 1 1 2 3 4
Cell 2 2 5 3
";

    #[test]
    fn test_read_sample() {
        let data = GeometryReader::read_from_reader(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(data.declared_node_count, 5);
        assert_eq!(data.nodes.len(), 5);
        assert_eq!(data.nodes[0], DVec3::new(0.0, 0.0, 1.5));
        assert_eq!(data.cells, vec![vec![0, 1, 2, 3], vec![1, 4, 2]]);

        let grid = data.build_grid().unwrap();
        assert_eq!(grid.cellstream(), &[9, 4, 0, 1, 2, 3, 5, 3, 1, 4, 2]);
    }

    #[test]
    fn test_nodes_count_line_variants() {
        let text = "header\nNodes: 3\nNode 1 0 0 0\nNode 2 1 0 0\nNode 3 0 1 0\nCell 1 1 2 3\n";
        let data = GeometryReader::read_from_reader(Cursor::new(text)).unwrap();
        assert_eq!(data.declared_node_count, 3);
        assert_eq!(data.cells.len(), 1);
    }

    #[test]
    fn test_write_format() {
        let data = GeometryReader::read_from_reader(Cursor::new(SAMPLE)).unwrap();
        let grid = data.build_grid().unwrap();
        let mut buf = Vec::new();
        GeometryWriter::write_to(&mut buf, &grid).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], FileKind::Geometry.header());
        assert_eq!(lines[1], "Number of nodes: 5");
        assert_eq!(lines[2], "Node 1 0 0 1.5");
        assert_eq!(lines[7], "Cell 1 1 2 3 4");
        assert_eq!(lines[8], "Cell 2 2 5 3");
    }

    #[test]
    fn test_malformed_files() {
        assert!(GeometryReader::read_from_reader(Cursor::new("")).is_err());
        assert!(GeometryReader::read_from_reader(Cursor::new("h\nNodes: x\n")).is_err());
        let bad_node = "h\nNodes: 1\nNode 1 0 0\n";
        assert!(GeometryReader::read_from_reader(Cursor::new(bad_node)).is_err());
        let bad_cell = "h\nNodes: 2\nNode 1 0 0 0\nNode 2 1 0 0\nCell 1 1 2\n";
        assert!(GeometryReader::read_from_reader(Cursor::new(bad_cell)).is_err());
    }

    #[test]
    fn test_cell_referencing_missing_node_fails_to_build() {
        let text = "h\nNodes: 3\nNode 1 0 0 0\nNode 2 1 0 0\nNode 3 0 1 0\nCell 1 1 2 9\n";
        let data = GeometryReader::read_from_reader(Cursor::new(text)).unwrap();
        assert!(data.build_grid().is_err());
    }
}
