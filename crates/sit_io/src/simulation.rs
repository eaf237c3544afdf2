// crates/sit_io/src/simulation.rs

//! 模拟清单文件读写
//!
//! ```text
//! Simulation_Properties: A "Hello World!"
//! Grid "sim.example_geometry"
//! Materials "sim.example_materials"
//! Boundary_Conditions "sim.example_boundary"
//! ```

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use sit_coverage::{UserOption, DEFAULT_USER_TEXT};

use crate::error::IoResult;
use crate::format::FileKind;
use crate::lines::{open, LineReader, STREAM_LABEL};
use crate::tokenizer::quote;

/// 模拟清单
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationManifest {
    pub user_option: UserOption,
    pub user_text: String,
    pub grid_file: Option<String>,
    pub materials_file: Option<String>,
    pub boundary_file: Option<String>,
}

impl Default for SimulationManifest {
    fn default() -> Self {
        Self {
            user_option: UserOption::A,
            user_text: DEFAULT_USER_TEXT.to_string(),
            grid_file: None,
            materials_file: None,
            boundary_file: None,
        }
    }
}

/// 清单中引用其它文件的一行：`<Keyword> "<path>"`
pub fn other_file_line(keyword: &str, path: &str) -> String {
    format!("{keyword} {}", quote(path))
}

/// 模拟清单读取器
pub struct SimulationReader;

impl SimulationReader {
    pub fn read<P: AsRef<Path>>(path: P) -> IoResult<SimulationManifest> {
        let path = path.as_ref();
        Self::read_labeled(open(path)?, path.display().to_string())
    }

    pub fn read_from_reader<R: BufRead>(reader: R) -> IoResult<SimulationManifest> {
        Self::read_labeled(reader, STREAM_LABEL)
    }

    fn read_labeled<R: BufRead>(reader: R, label: impl Into<String>) -> IoResult<SimulationManifest> {
        let mut lines = LineReader::new(reader, label);
        let mut manifest = SimulationManifest::default();

        while let Some(tokens) = lines.next_tokens()? {
            let card = tokens[0].as_str();
            match card {
                "Simulation_Properties:" => {
                    if tokens.len() != 3 {
                        return Err(lines.error(
                            "Simulation_Properties: 行应为: Simulation_Properties: <option> \"<text>\"",
                        ));
                    }
                    manifest.user_option = tokens[1]
                        .parse()
                        .map_err(|_| lines.error(format!("无效选项: {}", tokens[1])))?;
                    manifest.user_text = tokens[2].clone();
                }
                "Grid" | "Materials" | "Boundary_Conditions" => {
                    if tokens.len() != 2 {
                        return Err(lines.error(format!("{card} 行应为: {card} <path>")));
                    }
                    let path = Some(tokens[1].clone());
                    match card {
                        "Grid" => manifest.grid_file = path,
                        "Materials" => manifest.materials_file = path,
                        _ => manifest.boundary_file = path,
                    }
                }
                other => {
                    return Err(lines.error(format!("未知的卡片: {other}")));
                }
            }
        }
        Ok(manifest)
    }
}

/// 模拟清单写入器
pub struct SimulationWriter;

impl SimulationWriter {
    pub fn write<P: AsRef<Path>>(
        path: P,
        user_option: UserOption,
        user_text: &str,
        other_files: &[String],
    ) -> IoResult<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        Self::write_to(&mut writer, user_option, user_text, other_files)?;
        writer.flush()?;
        Ok(())
    }

    /// 属性行之后按调用方顺序写出其它文件行
    pub fn write_to<W: Write>(
        writer: &mut W,
        user_option: UserOption,
        user_text: &str,
        other_files: &[String],
    ) -> IoResult<()> {
        writeln!(writer, "{}", FileKind::Simulation.header())?;
        writeln!(writer, "Simulation_Properties: {user_option} {}", quote(user_text))?;
        for line in other_files {
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }
}
