// crates/sit_coverage/src/material_table.rs

//! 材质属性表

use serde::{Deserialize, Serialize};
use sit_foundation::{ComponentId, UNASSIGNED_COMPONENT_ID};

use crate::error::{CoverageError, CoverageResult};
use crate::feature_map::FeatureKind;
use crate::option::{UserOption, DEFAULT_USER_TEXT};
use crate::palette::{palette, PolygonTexture, Rgb};
use crate::table::{AttributeRow, AttributeTable};

/// 未指定材质的名称
pub const UNASSIGNED_MATERIAL_NAME: &str = "unassigned";

/// 材质行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRow {
    pub material_id: ComponentId,
    pub name: String,
    #[serde(default)]
    pub user_option: UserOption,
    #[serde(default = "default_user_text")]
    pub user_text: String,
    #[serde(default)]
    pub texture: PolygonTexture,
    #[serde(default)]
    pub color: Rgb,
}

fn default_user_text() -> String {
    DEFAULT_USER_TEXT.to_string()
}

impl MaterialRow {
    /// 新材质，颜色与纹理由调色板按 ID 生成
    pub fn new(
        material_id: ComponentId,
        name: impl Into<String>,
        user_option: UserOption,
        user_text: impl Into<String>,
    ) -> Self {
        let (color, texture) = palette(material_id);
        Self {
            material_id,
            name: name.into(),
            user_option,
            user_text: user_text.into(),
            texture,
            color,
        }
    }
}

impl AttributeRow for MaterialRow {
    const FEATURE_KIND: FeatureKind = FeatureKind::Polygon;

    fn unassigned() -> Self {
        Self::new(
            UNASSIGNED_COMPONENT_ID,
            UNASSIGNED_MATERIAL_NAME,
            UserOption::A,
            DEFAULT_USER_TEXT,
        )
    }

    fn component_id(&self) -> ComponentId {
        self.material_id
    }

    fn set_component_id(&mut self, id: ComponentId) {
        self.material_id = id;
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

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

/// 材质表
pub type MaterialsTable = AttributeTable<MaterialRow>;

impl AttributeTable<MaterialRow> {
    /// 新增材质，名称不可重复，颜色与纹理按新 ID 取调色板
    pub fn add_material(&mut self, name: impl Into<String>) -> CoverageResult<ComponentId> {
        let id = self.next_id();
        let row = MaterialRow::new(id, name, UserOption::A, DEFAULT_USER_TEXT);
        self.add_row(row)
    }

    /// 不与已有名称冲突的默认名称：`base`、`base (2)`、`base (3)` ...
    pub fn unique_name(&self, base: &str) -> String {
        let names = self.all_names();
        if !names.iter().any(|n| n == base) {
            return base.to_string();
        }
        (2..)
            .map(|i| format!("{base} ({i})"))
            .find(|candidate| !names.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    /// 修改材质名称
    pub fn rename_row(&mut self, id: ComponentId, name: impl Into<String>) -> CoverageResult<()> {
        if id == UNASSIGNED_COMPONENT_ID {
            return Err(CoverageError::UnassignedImmutable);
        }
        let name = name.into();
        self.lookup(id)?;
        self.ensure_name_free(&name, id)?;
        self.lookup_mut(id)?.name = name;
        Ok(())
    }

    pub fn set_color(&mut self, id: ComponentId, color: Rgb) -> CoverageResult<()> {
        self.lookup_mut(id)?.color = color;
        Ok(())
    }

    pub fn set_texture(&mut self, id: ComponentId, texture: PolygonTexture) -> CoverageResult<()> {
        self.lookup_mut(id)?.texture = texture;
        Ok(())
    }

    /// 按名称查找材质 ID
    pub fn id_for_name(&self, name: &str) -> Option<ComponentId> {
        self.iter()
            .find(|r| r.name == name)
            .map(|r| r.material_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unassigned_row_defaults() {
        let row = MaterialRow::unassigned();
        assert_eq!(row.material_id, 0);
        assert_eq!(row.name, "unassigned");
        assert_eq!(row.user_option, UserOption::A);
        assert_eq!(row.user_text, "Hello World!");
        assert_eq!(row.texture, PolygonTexture::Solid);
        assert_eq!(row.color, Rgb::BLACK);
    }

    #[test]
    fn test_add_material_uses_palette() {
        let mut table = MaterialsTable::new();
        let id = table.add_material("sand").unwrap();
        let row = table.lookup(id).unwrap();
        assert_eq!(row.color, Rgb::new(170, 0, 0));
        assert_eq!(row.texture, PolygonTexture::Solid);
        assert_eq!(table.all_names(), vec!["unassigned", "sand"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut table = MaterialsTable::new();
        let sand = table.add_material("sand").unwrap();
        let clay = table.add_material("clay").unwrap();
        assert!(matches!(
            table.add_material("sand"),
            Err(CoverageError::DuplicateName { .. })
        ));
        assert!(matches!(
            table.rename_row(clay, "sand"),
            Err(CoverageError::DuplicateName { .. })
        ));
        assert!(matches!(
            table.add_material("unassigned"),
            Err(CoverageError::DuplicateName { .. })
        ));
        // 改成自己的名字不算冲突
        table.rename_row(sand, "sand").unwrap();
        table.rename_row(sand, "gravel").unwrap();
        assert_eq!(table.id_for_name("gravel"), Some(sand));
    }

    #[test]
    fn test_unassigned_name_is_immutable() {
        let mut table = MaterialsTable::new();
        assert!(matches!(
            table.rename_row(0, "water"),
            Err(CoverageError::UnassignedImmutable)
        ));
    }

    #[test]
    fn test_unique_name() {
        let mut table = MaterialsTable::new();
        assert_eq!(table.unique_name("new material"), "new material");
        table.add_material("new material").unwrap();
        assert_eq!(table.unique_name("new material"), "new material (2)");
        table.add_material("new material (2)").unwrap();
        assert_eq!(table.unique_name("new material"), "new material (3)");
    }

    #[test]
    fn test_failed_add_does_not_consume_id() {
        let mut table = MaterialsTable::new();
        table.add_material("sand").unwrap();
        assert!(table.add_material("sand").is_err());
        assert_eq!(table.add_material("clay").unwrap(), 2);
    }

    #[test]
    fn test_set_color_and_texture() {
        let mut table = MaterialsTable::new();
        let id = table.add_material("sand").unwrap();
        table.set_color(id, Rgb::new(1, 2, 3)).unwrap();
        table.set_texture(id, PolygonTexture::Cross).unwrap();
        let row = table.lookup(id).unwrap();
        assert_eq!(row.color, Rgb::new(1, 2, 3));
        assert_eq!(row.texture, PolygonTexture::Cross);
    }
}
