// crates/sit_io/src/solution.rs

//! 求解结果文件读取
//!
//! 首行为文件头，之后每行一个节点标量值。

use std::io::BufRead;
use std::path::Path;

use crate::error::IoResult;
use crate::lines::{open, LineReader, STREAM_LABEL};

/// 求解结果读取器
pub struct SolutionReader;

impl SolutionReader {
    pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Vec<f64>> {
        let path = path.as_ref();
        Self::read_labeled(open(path)?, path.display().to_string())
    }

    pub fn read_from_reader<R: BufRead>(reader: R) -> IoResult<Vec<f64>> {
        Self::read_labeled(reader, STREAM_LABEL)
    }

    fn read_labeled<R: BufRead>(reader: R, label: impl Into<String>) -> IoResult<Vec<f64>> {
        let mut lines = LineReader::new(reader, label);
        if lines.next_raw()?.is_none() {
            return Err(lines.error("文件为空"));
        }
        let mut values = Vec::new();
        while let Some(tokens) = lines.next_tokens()? {
            if tokens.len() != 1 {
                return Err(lines.error("每行应只有一个数值"));
            }
            values.push(lines.parse_number::<f64>(&tokens[0])?);
        }
        Ok(values)
    }
}
