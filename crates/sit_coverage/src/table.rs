// crates/sit_coverage/src/table.rs

//! 通用属性表
//!
//! 一个覆盖层的组件行集合，按组件 ID 索引。约束：
//!
//! - 未指定行（ID 0）始终存在且不可删除
//! - 新行 ID 取历史最大 ID + 1，删除后也不复用
//! - 带名称的行名称唯一

use std::fmt;

use sit_foundation::{ComponentId, UNASSIGNED_COMPONENT_ID};
use tracing::debug;

use crate::error::{CoverageError, CoverageResult};
use crate::feature_map::FeatureKind;
use crate::option::UserOption;

/// 属性表行
pub trait AttributeRow: Clone + fmt::Debug {
    /// 该行所属覆盖层中承载属性的要素类型
    const FEATURE_KIND: FeatureKind;

    /// 未指定行
    fn unassigned() -> Self;

    fn component_id(&self) -> ComponentId;

    fn set_component_id(&mut self, id: ComponentId);

    fn user_option(&self) -> UserOption;

    fn set_user_option(&mut self, option: UserOption);

    fn user_text(&self) -> &str;

    fn set_user_text(&mut self, text: String);

    /// 行名称；没有名称列的表返回 `None`
    fn name(&self) -> Option<&str> {
        None
    }
}

/// 属性表
#[derive(Debug, Clone)]
pub struct AttributeTable<R> {
    rows: Vec<R>,
    next_id: ComponentId,
}

impl<R: AttributeRow> Default for AttributeTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: AttributeRow> AttributeTable<R> {
    /// 只含未指定行的新表
    pub fn new() -> Self {
        Self {
            rows: vec![R::unassigned()],
            next_id: UNASSIGNED_COMPONENT_ID + 1,
        }
    }

    /// 批量载入行（导入或反序列化）
    ///
    /// 缺少未指定行时在表头补一行；`next_id` 小于已有最大 ID + 1 时自动抬高。
    pub fn from_rows(rows: Vec<R>, next_id: ComponentId) -> CoverageResult<Self> {
        let mut table = Self {
            rows: Vec::with_capacity(rows.len() + 1),
            next_id: next_id.max(UNASSIGNED_COMPONENT_ID + 1),
        };
        if !rows
            .iter()
            .any(|r| r.component_id() == UNASSIGNED_COMPONENT_ID)
        {
            table.rows.push(R::unassigned());
        }
        for row in rows {
            table.insert_row(row)?;
        }
        Ok(table)
    }

    /// 插入已带 ID 的行
    fn insert_row(&mut self, row: R) -> CoverageResult<()> {
        let id = row.component_id();
        if self.get(id).is_some() {
            return Err(CoverageError::DuplicateComponent { id });
        }
        if let Some(name) = row.name() {
            self.check_name_free(name, None)?;
        }
        self.next_id = self.next_id.max(id + 1);
        self.rows.push(row);
        Ok(())
    }

    fn check_name_free(&self, name: &str, except: Option<ComponentId>) -> CoverageResult<()> {
        let taken = self
            .rows
            .iter()
            .any(|r| Some(r.component_id()) != except && r.name() == Some(name));
        if taken {
            return Err(CoverageError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// 追加一行并分配新 ID
    pub fn add_row(&mut self, mut row: R) -> CoverageResult<ComponentId> {
        let id = self.next_id;
        row.set_component_id(id);
        self.insert_row(row)?;
        debug!(id, "属性表新增行");
        Ok(id)
    }

    /// 删除一行，返回被删除的行
    ///
    /// 只由 [`CoverageComponent::delete_row`](crate::component::CoverageComponent::delete_row)
    /// 调用，以便同时级联要素映射。
    pub(crate) fn delete_row(&mut self, id: ComponentId) -> CoverageResult<R> {
        if id == UNASSIGNED_COMPONENT_ID {
            return Err(CoverageError::CannotDeleteUnassigned);
        }
        let pos = self
            .rows
            .iter()
            .position(|r| r.component_id() == id)
            .ok_or(CoverageError::ComponentNotFound { id })?;
        Ok(self.rows.remove(pos))
    }

    /// 按组件 ID 查找
    pub fn get(&self, id: ComponentId) -> Option<&R> {
        self.rows.iter().find(|r| r.component_id() == id)
    }

    /// 按组件 ID 查找，不存在时返回错误
    pub fn lookup(&self, id: ComponentId) -> CoverageResult<&R> {
        self.get(id).ok_or(CoverageError::ComponentNotFound { id })
    }

    pub(crate) fn lookup_mut(&mut self, id: ComponentId) -> CoverageResult<&mut R> {
        self.rows
            .iter_mut()
            .find(|r| r.component_id() == id)
            .ok_or(CoverageError::ComponentNotFound { id })
    }

    pub(crate) fn ensure_name_free(&self, name: &str, except: ComponentId) -> CoverageResult<()> {
        self.check_name_free(name, Some(except))
    }

    pub fn set_option(&mut self, id: ComponentId, option: UserOption) -> CoverageResult<()> {
        self.lookup_mut(id)?.set_user_option(option);
        Ok(())
    }

    pub fn set_text(&mut self, id: ComponentId, text: impl Into<String>) -> CoverageResult<()> {
        self.lookup_mut(id)?.set_user_text(text.into());
        Ok(())
    }

    /// 表行顺序的全部 ID
    pub fn all_ids(&self) -> Vec<ComponentId> {
        self.rows.iter().map(|r| r.component_id()).collect()
    }

    /// 表行顺序的全部名称（无名称列时为空）
    pub fn all_names(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|r| r.name().map(str::to_string))
            .collect()
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.rows.iter()
    }

    /// 下一个将分配的 ID
    pub fn next_id(&self) -> ComponentId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 表永远至少有未指定行
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bc_table::BoundaryRow;
    use crate::material_table::MaterialRow;

    #[test]
    fn test_new_table_has_unassigned() {
        let table: AttributeTable<BoundaryRow> = AttributeTable::new();
        assert_eq!(table.all_ids(), vec![0]);
        assert_eq!(table.next_id(), 1);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut table: AttributeTable<BoundaryRow> = AttributeTable::new();
        let a = table.add_row(BoundaryRow::default()).unwrap();
        let b = table.add_row(BoundaryRow::default()).unwrap();
        assert_eq!((a, b), (1, 2));
        table.delete_row(b).unwrap();
        let c = table.add_row(BoundaryRow::default()).unwrap();
        assert_eq!(c, 3);
        assert_eq!(table.all_ids(), vec![0, 1, 3]);
    }

    #[test]
    fn test_cannot_delete_unassigned() {
        let mut table: AttributeTable<BoundaryRow> = AttributeTable::new();
        assert!(matches!(
            table.delete_row(0),
            Err(CoverageError::CannotDeleteUnassigned)
        ));
        assert!(matches!(
            table.delete_row(42),
            Err(CoverageError::ComponentNotFound { id: 42 })
        ));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_from_rows_inserts_missing_unassigned() {
        let row = MaterialRow::new(3, "clay", UserOption::B, "text");
        let table = AttributeTable::from_rows(vec![row], 0).unwrap();
        assert_eq!(table.all_ids(), vec![0, 3]);
        assert_eq!(table.next_id(), 4);
    }

    #[test]
    fn test_from_rows_rejects_duplicates() {
        let rows = vec![
            MaterialRow::unassigned(),
            MaterialRow::new(1, "clay", UserOption::A, ""),
            MaterialRow::new(2, "clay", UserOption::A, ""),
        ];
        assert!(matches!(
            AttributeTable::from_rows(rows, 0),
            Err(CoverageError::DuplicateName { .. })
        ));

        let rows = vec![BoundaryRow::unassigned(), BoundaryRow::unassigned()];
        assert!(matches!(
            AttributeTable::from_rows(rows, 0),
            Err(CoverageError::DuplicateComponent { id: 0 })
        ));
    }

    #[test]
    fn test_set_option_and_text() {
        let mut table: AttributeTable<BoundaryRow> = AttributeTable::new();
        let id = table.add_row(BoundaryRow::default()).unwrap();
        table.set_option(id, UserOption::C).unwrap();
        table.set_text(id, "inflow").unwrap();
        let row = table.lookup(id).unwrap();
        assert_eq!(row.user_option, UserOption::C);
        assert_eq!(row.user_text, "inflow");
        assert!(table.set_option(99, UserOption::A).is_err());
    }
}
