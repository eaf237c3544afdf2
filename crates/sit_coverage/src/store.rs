// crates/sit_coverage/src/store.rs

//! 组件持久化存储
//!
//! 以命名数据集保存组件状态的键值存储。文件存储首次访问时才加载，
//! 修改只进缓存，`commit()` 时一次写盘，`close()` 提交后释放。

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// 存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 序列化错误
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// 存储已关闭
    #[error("Store is closed")]
    Closed,
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// 组件存储 trait
pub trait ComponentStore: Send + Sync {
    /// 读取数据集
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// 写入数据集（提交前只在内存中）
    fn save(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// 删除数据集
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// 全部数据集名称，升序
    fn keys(&self) -> Result<Vec<String>, StoreError>;

    /// 刷新到后端
    fn commit(&self) -> Result<(), StoreError>;

    /// 写入可序列化值
    fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        self.save(key, serde_json::to_value(value)?)
    }

    /// 读取并反序列化；不存在时返回 `None`
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError>
    where
        Self: Sized,
    {
        self.load(key)?
            .map(|v| serde_json::from_value(v).map_err(StoreError::from))
            .transpose()
    }
}

/// 内存存储
#[derive(Debug, Default)]
pub struct MemoryStore {
    datasets: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.datasets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.read().is_empty()
    }
}

impl ComponentStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.datasets.read().get(key).cloned())
    }

    fn save(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.datasets.write().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.datasets.write().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.datasets.read().keys().cloned().collect())
    }

    fn commit(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct FileState {
    /// 尚未加载时为 `None`
    datasets: Option<BTreeMap<String, Value>>,
    dirty: bool,
    closed: bool,
}

/// JSON 文件存储（一个组件一个文件）
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    state: RwLock<FileState>,
}

impl JsonFileStore {
    /// 打开存储；文件不存在时首次提交会创建
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: RwLock::new(FileState::default()),
        }
    }

    /// 存储文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 是否有未提交的修改
    pub fn is_dirty(&self) -> bool {
        self.state.read().dirty
    }

    /// 提交并关闭；之后的任何访问返回 `StoreError::Closed`
    pub fn close(&self) -> Result<(), StoreError> {
        self.commit()?;
        let mut state = self.state.write();
        state.datasets = None;
        state.closed = true;
        Ok(())
    }

    fn read_file(&self) -> Result<BTreeMap<String, Value>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let json = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// 按需加载后在数据集上执行 `f`
    fn with_datasets<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, Value>, &mut bool) -> T,
    ) -> Result<T, StoreError> {
        let mut state = self.state.write();
        if state.closed {
            return Err(StoreError::Closed);
        }
        if state.datasets.is_none() {
            debug!(path = %self.path.display(), "加载组件存储");
            state.datasets = Some(self.read_file()?);
        }
        let FileState {
            datasets, dirty, ..
        } = &mut *state;
        match datasets.as_mut() {
            Some(map) => Ok(f(map, dirty)),
            None => Err(StoreError::Closed),
        }
    }
}

impl ComponentStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.with_datasets(|map, _| map.get(key).cloned())
    }

    fn save(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.with_datasets(|map, dirty| {
            map.insert(key.to_string(), value);
            *dirty = true;
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.with_datasets(|map, dirty| {
            if map.remove(key).is_some() {
                *dirty = true;
            }
        })
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.with_datasets(|map, _| map.keys().cloned().collect())
    }

    fn commit(&self) -> Result<(), StoreError> {
        let mut state = self.state.write();
        if state.closed {
            return Err(StoreError::Closed);
        }
        if !state.dirty {
            return Ok(());
        }
        if let Some(map) = state.datasets.as_ref() {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(map)?;
            std::fs::write(&self.path, json)?;
            debug!(path = %self.path.display(), datasets = map.len(), "组件存储已提交");
        }
        state.dirty = false;
        Ok(())
    }
}
