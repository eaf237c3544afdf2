// crates/sit_coverage/src/bc_table.rs

//! 边界条件属性表

use serde::{Deserialize, Serialize};
use sit_foundation::{ComponentId, UNASSIGNED_COMPONENT_ID};

use crate::feature_map::FeatureKind;
use crate::option::{UserOption, DEFAULT_USER_TEXT};
use crate::table::{AttributeRow, AttributeTable};

/// 边界条件行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryRow {
    pub comp_id: ComponentId,
    #[serde(default)]
    pub user_option: UserOption,
    #[serde(default)]
    pub user_text: String,
}

impl BoundaryRow {
    pub fn new(comp_id: ComponentId, user_option: UserOption, user_text: impl Into<String>) -> Self {
        Self {
            comp_id,
            user_option,
            user_text: user_text.into(),
        }
    }
}

impl Default for BoundaryRow {
    fn default() -> Self {
        Self::unassigned()
    }
}

impl AttributeRow for BoundaryRow {
    const FEATURE_KIND: FeatureKind = FeatureKind::Arc;

    fn unassigned() -> Self {
        Self::new(UNASSIGNED_COMPONENT_ID, UserOption::A, DEFAULT_USER_TEXT)
    }

    fn component_id(&self) -> ComponentId {
        self.comp_id
    }

    fn set_component_id(&mut self, id: ComponentId) {
        self.comp_id = id;
    }

    fn user_option(&self) -> UserOption {
        self.user_option
    }

    fn set_user_option(&mut self, option: UserOption) {
        self.user_option = option;
    }

    fn user_text(&self) -> &str {
        &self.user_text
    }

    fn set_user_text(&mut self, text: String) {
        self.user_text = text;
    }
}

/// 边界条件表
pub type BoundaryTable = AttributeTable<BoundaryRow>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_row() {
        let row = BoundaryRow::default();
        assert_eq!(row.comp_id, 0);
        assert_eq!(row.user_option, UserOption::A);
        assert_eq!(row.user_text, "Hello World!");
        assert_eq!(row.name(), None);
    }

    #[test]
    fn test_table_without_names() {
        let mut table = BoundaryTable::new();
        table
            .add_row(BoundaryRow::new(0, UserOption::B, "wall"))
            .unwrap();
        table
            .add_row(BoundaryRow::new(0, UserOption::B, "wall"))
            .unwrap();
        assert_eq!(table.all_ids(), vec![0, 1, 2]);
        assert!(table.all_names().is_empty());
    }
}
