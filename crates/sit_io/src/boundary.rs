// crates/sit_io/src/boundary.rs

//! 边界条件文件读写
//!
//! ```text
//! BC 1 C "Hello World!"
//! Points: 19 20 21
//! ```
//!
//! `Points:` 给出弧折线上的网格节点（1 基），首尾为弧端点，其余为中间顶点。

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use sit_coverage::{AttributeTable, BoundaryRow, UserOption, DEFAULT_USER_TEXT};
use sit_foundation::{ComponentId, FeatureId};
use tracing::{debug, warn};

use crate::error::IoResult;
use crate::format::FileKind;
use crate::lines::{open, LineReader, STREAM_LABEL};
use crate::tokenizer::quote;

/// 读取到的边界条件数据
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryConditionsData {
    /// 每个 `BC` 块一行，`comp_id` 为文件中的弧编号
    pub rows: Vec<BoundaryRow>,
    /// (弧编号, 节点索引 0 基)，保持文件顺序
    pub arcs: Vec<(FeatureId, Vec<usize>)>,
    /// 所有弧节点按出现顺序展开
    pub nodes: Vec<usize>,
}

impl BoundaryConditionsData {
    /// 弧的节点索引
    pub fn arc_nodes(&self, arc_id: FeatureId) -> Option<&[usize]> {
        self.arcs
            .iter()
            .find(|(id, _)| *id == arc_id)
            .map(|(_, nodes)| nodes.as_slice())
    }

    /// 按弧编号去重的属性行，编号重复时后出现的块生效（与 `arcs` 一致）
    pub fn unique_rows(&self) -> Vec<BoundaryRow> {
        let mut by_id: BTreeMap<ComponentId, usize> = BTreeMap::new();
        let mut rows: Vec<BoundaryRow> = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            match by_id.get(&row.comp_id) {
                Some(&pos) => {
                    warn!(arc = row.comp_id, "边界条件弧编号重复，后出现的块生效");
                    rows[pos] = row.clone();
                }
                None => {
                    by_id.insert(row.comp_id, rows.len());
                    rows.push(row.clone());
                }
            }
        }
        rows
    }
}

/// 边界条件文件读取器
pub struct BoundaryConditionsReader;

impl BoundaryConditionsReader {
    pub fn read<P: AsRef<Path>>(path: P) -> IoResult<BoundaryConditionsData> {
        let path = path.as_ref();
        Self::read_labeled(open(path)?, path.display().to_string())
    }

    pub fn read_from_reader<R: BufRead>(reader: R) -> IoResult<BoundaryConditionsData> {
        Self::read_labeled(reader, STREAM_LABEL)
    }

    fn read_labeled<R: BufRead>(
        reader: R,
        label: impl Into<String>,
    ) -> IoResult<BoundaryConditionsData> {
        let mut lines = LineReader::new(reader, label);
        let mut data = BoundaryConditionsData::default();
        let mut current_arc: Option<FeatureId> = None;
        // 弧编号 → 在 arcs 中的位置
        let mut arc_pos: BTreeMap<FeatureId, usize> = BTreeMap::new();

        while let Some(tokens) = lines.next_tokens()? {
            match tokens[0].as_str() {
                "BC" => {
                    if tokens.len() != 4 {
                        return Err(lines.error("BC 行应为: BC <arc_id> <option> \"<text>\""));
                    }
                    let arc_id = lines.parse_number::<FeatureId>(&tokens[1])?;
                    let option: UserOption = tokens[2]
                        .parse()
                        .map_err(|_| lines.error(format!("无效选项: {}", tokens[2])))?;
                    let comp_id = ComponentId::try_from(arc_id)
                        .map_err(|_| lines.error(format!("弧编号超出范围: {arc_id}")))?;
                    data.rows
                        .push(BoundaryRow::new(comp_id, option, tokens[3].clone()));
                    current_arc = Some(arc_id);
                }
                "Points:" => {
                    let arc_id = current_arc
                        .ok_or_else(|| lines.error("Points: 出现在任何 BC 之前"))?;
                    let points = tokens[1..]
                        .iter()
                        .map(|t| lines.parse_file_id(t))
                        .collect::<IoResult<Vec<_>>>()?;
                    data.nodes.extend_from_slice(&points);
                    match arc_pos.get(&arc_id) {
                        Some(&pos) => data.arcs[pos].1 = points,
                        None => {
                            arc_pos.insert(arc_id, data.arcs.len());
                            data.arcs.push((arc_id, points));
                        }
                    }
                }
                other => {
                    return Err(lines.error(format!("未知的卡片: {other}")));
                }
            }
        }

        debug!(arcs = data.arcs.len(), "边界条件文件读取完成");
        Ok(data)
    }
}

/// 边界条件文件写入器
pub struct BoundaryConditionsWriter;

impl BoundaryConditionsWriter {
    pub fn write<P: AsRef<Path>>(
        path: P,
        arc_to_comp: &BTreeMap<FeatureId, ComponentId>,
        arc_to_nodes: &BTreeMap<FeatureId, Vec<usize>>,
        table: &AttributeTable<BoundaryRow>,
    ) -> IoResult<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        Self::write_to(&mut writer, arc_to_comp, arc_to_nodes, table)?;
        writer.flush()?;
        Ok(())
    }

    /// 每条弧写 `BC` 行和 `Points:` 行
    ///
    /// 组件在表中不存在时写默认值 `A "Hello World!"`；弧没有节点时 `Points:` 行为空。
    pub fn write_to<W: Write>(
        writer: &mut W,
        arc_to_comp: &BTreeMap<FeatureId, ComponentId>,
        arc_to_nodes: &BTreeMap<FeatureId, Vec<usize>>,
        table: &AttributeTable<BoundaryRow>,
    ) -> IoResult<()> {
        writeln!(writer, "{}", FileKind::BoundaryConditions.header())?;
        for (&arc, &comp_id) in arc_to_comp {
            match table.get(comp_id) {
                Some(row) => writeln!(
                    writer,
                    "BC {arc} {} {}",
                    row.user_option,
                    quote(&row.user_text)
                )?,
                None => writeln!(
                    writer,
                    "BC {arc} {} {}",
                    UserOption::A,
                    quote(DEFAULT_USER_TEXT)
                )?,
            }
            write!(writer, "Points:")?;
            for node in arc_to_nodes.get(&arc).into_iter().flatten() {
                write!(writer, " {}", node + 1)?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_scenario() {
        let text = "BC 1 C \"Hello World!\"\nPoints: 19 20 21\n";
        let data = BoundaryConditionsReader::read_from_reader(Cursor::new(text)).unwrap();
        assert_eq!(data.arcs, vec![(1, vec![18, 19, 20])]);
        assert_eq!(data.rows, vec![BoundaryRow::new(1, UserOption::C, "Hello World!")]);
        assert_eq!(data.nodes, vec![18, 19, 20]);
    }

    #[test]
    fn test_arcs_keep_file_order() {
        let text = "\
# comment
BC 3 A \"x\"
Points: 1 2
BC 1 B \"y\"
Points: 2 3 4
";
        let data = BoundaryConditionsReader::read_from_reader(Cursor::new(text)).unwrap();
        let ids: Vec<_> = data.arcs.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(data.arc_nodes(1), Some(&[1, 2, 3][..]));
        assert_eq!(data.nodes, vec![0, 1, 1, 2, 3]);
    }

    #[test]
    fn test_repeated_arc_id_last_block_wins() {
        let text = "\
BC 1 A \"a\"
Points: 1 2
BC 2 C \"c\"
Points: 5 6
BC 1 B \"b\"
Points: 2 3
";
        let data = BoundaryConditionsReader::read_from_reader(Cursor::new(text)).unwrap();
        assert_eq!(data.arcs, vec![(1, vec![1, 2]), (2, vec![4, 5])]);
        assert_eq!(data.rows.len(), 3);
        assert_eq!(
            data.unique_rows(),
            vec![
                BoundaryRow::new(1, UserOption::B, "b"),
                BoundaryRow::new(2, UserOption::C, "c"),
            ]
        );
    }

    #[test]
    fn test_write_uses_defaults_for_missing_rows() {
        let mut table = AttributeTable::<BoundaryRow>::new();
        let wall = table
            .add_row(BoundaryRow::new(0, UserOption::B, "wall"))
            .unwrap();

        let arc_to_comp = BTreeMap::from([(1, wall), (2, 99)]);
        let arc_to_nodes = BTreeMap::from([(1, vec![0, 1, 2])]);
        let mut buf = Vec::new();
        BoundaryConditionsWriter::write_to(&mut buf, &arc_to_comp, &arc_to_nodes, &table).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                FileKind::BoundaryConditions.header().as_str(),
                "BC 1 B \"wall\"",
                "Points: 1 2 3",
                "BC 2 A \"Hello World!\"",
                "Points:",
            ]
        );
    }

    #[test]
    fn test_malformed() {
        for case in ["Points: 1 2\n", "BC x A \"t\"\n", "BC 1 Z \"t\"\n", "BC 1 A\n"] {
            assert!(BoundaryConditionsReader::read_from_reader(Cursor::new(case)).is_err());
        }
    }
}
