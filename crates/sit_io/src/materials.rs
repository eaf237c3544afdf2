// crates/sit_io/src/materials.rs

//! 材质文件读写
//!
//! ```text
//! Material: "unassigned" A "Hello World!"
//! Material: "new material" B "Hello World!"
//! Cells: 1 2 3
//! ```
//!
//! 材质 ID 按文件顺序从 0 开始分配，第一个块视为未指定材质（不做校验）。
//! 颜色与纹理由调色板按 ID 生成。

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use sit_coverage::{MaterialRow, UserOption};
use sit_foundation::ComponentId;
use tracing::debug;

use crate::error::IoResult;
use crate::format::FileKind;
use crate::lines::{open, LineReader, STREAM_LABEL};
use crate::tokenizer::quote;

/// 读取到的材质数据
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialsData {
    /// 材质行（文件顺序）
    pub rows: Vec<MaterialRow>,
    /// 材质 ID → 单元索引（0 基）
    pub material_cells: BTreeMap<ComponentId, Vec<usize>>,
}

impl MaterialsData {
    /// 材质的单元；没有 `Cells:` 行时为空
    pub fn cells_for(&self, material_id: ComponentId) -> &[usize] {
        self.material_cells
            .get(&material_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 展开为逐单元的材质 ID 数组；未出现的单元为 0
    pub fn cell_material_array(&self, cell_count: usize) -> Vec<ComponentId> {
        let mut cell_materials = vec![0; cell_count];
        for (&material_id, cells) in &self.material_cells {
            for &cell in cells {
                if let Some(slot) = cell_materials.get_mut(cell) {
                    *slot = material_id;
                } else {
                    debug!(cell, material_id, "材质单元超出网格范围，已忽略");
                }
            }
        }
        cell_materials
    }
}

/// 材质文件读取器
pub struct MaterialsReader;

impl MaterialsReader {
    pub fn read<P: AsRef<Path>>(path: P) -> IoResult<MaterialsData> {
        let path = path.as_ref();
        Self::read_labeled(open(path)?, path.display().to_string())
    }

    pub fn read_from_reader<R: BufRead>(reader: R) -> IoResult<MaterialsData> {
        Self::read_labeled(reader, STREAM_LABEL)
    }

    fn read_labeled<R: BufRead>(reader: R, label: impl Into<String>) -> IoResult<MaterialsData> {
        let mut lines = LineReader::new(reader, label);
        let mut data = MaterialsData::default();
        let mut material_id: ComponentId = -1;

        while let Some(tokens) = lines.next_tokens()? {
            match tokens[0].as_str() {
                "Material:" => {
                    if tokens.len() != 4 {
                        return Err(lines.error("Material: 行应为: Material: \"<name>\" <option> \"<text>\""));
                    }
                    let option: UserOption = tokens[2]
                        .parse()
                        .map_err(|_| lines.error(format!("无效选项: {}", tokens[2])))?;
                    material_id += 1;
                    data.rows
                        .push(MaterialRow::new(material_id, tokens[1].clone(), option, tokens[3].clone()));
                }
                "Cells:" => {
                    if material_id < 0 {
                        return Err(lines.error("Cells: 出现在任何 Material: 之前"));
                    }
                    let cells = tokens[1..]
                        .iter()
                        .map(|t| lines.parse_file_id(t))
                        .collect::<IoResult<Vec<_>>>()?;
                    data.material_cells
                        .entry(material_id)
                        .or_default()
                        .extend(cells);
                }
                other => {
                    return Err(lines.error(format!("未知的卡片: {other}")));
                }
            }
        }

        debug!(materials = data.rows.len(), "材质文件读取完成");
        Ok(data)
    }
}

/// 材质文件写入器
pub struct MaterialsWriter;

impl MaterialsWriter {
    pub fn write<P: AsRef<Path>>(
        path: P,
        rows: &[MaterialRow],
        material_cells: &BTreeMap<ComponentId, Vec<usize>>,
    ) -> IoResult<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        Self::write_to(&mut writer, rows, material_cells)?;
        writer.flush()?;
        Ok(())
    }

    /// 按表行顺序写出；材质有单元时追加 `Cells:` 行（1 基）
    pub fn write_to<W: Write>(
        writer: &mut W,
        rows: &[MaterialRow],
        material_cells: &BTreeMap<ComponentId, Vec<usize>>,
    ) -> IoResult<()> {
        writeln!(writer, "{}", FileKind::Materials.header())?;
        for row in rows {
            writeln!(
                writer,
                "Material: {} {} {}",
                quote(&row.name),
                row.user_option,
                quote(&row.user_text)
            )?;
            if let Some(cells) = material_cells.get(&row.material_id).filter(|c| !c.is_empty()) {
                write!(writer, "Cells:")?;
                for cell in cells {
                    write!(writer, " {}", cell + 1)?;
                }
                writeln!(writer)?;
            }
        }
        Ok(())
    }
}
