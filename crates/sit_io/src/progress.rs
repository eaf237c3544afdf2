// crates/sit_io/src/progress.rs

//! 模型运行进度跟踪
//!
//! 增量读取模型的回显输出，`% <n>` 行更新进度百分比。
//! 只消费以换行结尾的完整行，下次从上次完整行之后继续读。

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::IoResult;

/// 进度跟踪器
#[derive(Debug)]
pub struct ProgressTracker {
    echo_file: PathBuf,
    position: u64,
    percent: Option<u32>,
}

impl ProgressTracker {
    pub fn new(echo_file: impl Into<PathBuf>) -> Self {
        Self {
            echo_file: echo_file.into(),
            position: 0,
            percent: None,
        }
    }

    pub fn echo_file(&self) -> &Path {
        &self.echo_file
    }

    /// 最近一次读到的进度
    pub fn percent(&self) -> Option<u32> {
        self.percent
    }

    /// 读取新增的完整行，本次读到进度行时返回最新百分比
    ///
    /// 回显文件尚不存在时返回 `Ok(None)`。
    pub fn poll(&mut self) -> IoResult<Option<u32>> {
        let file = match File::open(&self.echo_file) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut reader = BufReader::new(file);
        reader.seek(SeekFrom::Start(self.position))?;

        let mut found = None;
        let mut line = String::new();
        loop {
            line.clear();
            let n = reader.read_line(&mut line)?;
            if n == 0 || !(line.ends_with('\n') || line.ends_with('\r')) {
                break;
            }
            self.position += n as u64;

            let parts: Vec<&str> = line.split_whitespace().collect();
            if let ["%", value] = parts.as_slice() {
                if let Ok(p) = value.parse::<u32>() {
                    found = Some(p);
                }
            }
        }

        if let Some(p) = found {
            trace!(percent = p, "模型进度");
            self.percent = Some(p);
        }
        Ok(found)
    }
}
