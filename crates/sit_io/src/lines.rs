// crates/sit_io/src/lines.rs

//! 带行号的逐行读取，跳过空行和注释行

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{IoError, IoResult};
use crate::tokenizer::{is_comment, tokenize};

/// 未指定文件名时错误信息里使用的名称
pub(crate) const STREAM_LABEL: &str = "<stream>";

pub(crate) fn open(path: &Path) -> IoResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| IoError::Open {
            path: path.display().to_string(),
            source,
        })
}

/// 逐行读取器
pub(crate) struct LineReader<R> {
    inner: R,
    label: String,
    line_no: usize,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(inner: R, label: impl Into<String>) -> Self {
        Self {
            inner,
            label: label.into(),
            line_no: 0,
        }
    }

    /// 读下一行原文（含注释），文件结束返回 `None`
    pub(crate) fn next_raw(&mut self) -> IoResult<Option<String>> {
        let mut buf = String::new();
        if self.inner.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        let trimmed = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed);
        Ok(Some(buf))
    }

    /// 读下一条有效行并分词，跳过空行和注释
    pub(crate) fn next_tokens(&mut self) -> IoResult<Option<Vec<String>>> {
        while let Some(line) = self.next_raw()? {
            if is_comment(&line) {
                continue;
            }
            let tokens = tokenize(&line).map_err(|e| self.error(e.to_string()))?;
            if !tokens.is_empty() {
                return Ok(Some(tokens));
            }
        }
        Ok(None)
    }

    /// 当前行的解析错误
    pub(crate) fn error(&self, message: impl Into<String>) -> IoError {
        IoError::parse(self.label.clone(), self.line_no, message)
    }

    /// 解析 1 基编号并转为 0 基
    pub(crate) fn parse_file_id(&self, token: &str) -> IoResult<usize> {
        match token.parse::<usize>() {
            Ok(id) if id >= 1 => Ok(id - 1),
            _ => Err(self.error(format!("无效的编号: {token}"))),
        }
    }

    pub(crate) fn parse_number<T: std::str::FromStr>(&self, token: &str) -> IoResult<T> {
        token
            .parse::<T>()
            .map_err(|_| self.error(format!("无效的数值: {token}")))
    }
}
