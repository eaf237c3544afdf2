// crates/sit_coverage/src/component.rs

//! 覆盖层组件
//!
//! 组合覆盖层几何、属性表和要素映射。删除属性行时，指向该行的要素
//! 级联改为未指定。

use std::collections::BTreeMap;

use sit_foundation::{normalize_component_id, ComponentId, FeatureId, UNASSIGNED_COMPONENT_ID};
use tracing::{info, warn};
use uuid::Uuid;

use crate::bc_table::BoundaryRow;
use crate::error::{CoverageError, CoverageResult};
use crate::feature_map::{FeatureCompIdMap, FeatureKind};
use crate::geometry::Coverage;
use crate::material_table::MaterialRow;
use crate::schema::{
    check_version, BoundaryComponentData, MaterialsComponentData, BOUNDARY_KEY, MATERIALS_KEY,
};
use crate::store::ComponentStore;
use crate::table::{AttributeRow, AttributeTable};

/// 覆盖层组件
#[derive(Debug, Clone)]
pub struct CoverageComponent<R> {
    pub coverage: Coverage,
    pub table: AttributeTable<R>,
    feature_map: FeatureCompIdMap,
}

/// 材质覆盖层（多边形）
pub type MaterialsCoverage = CoverageComponent<MaterialRow>;

/// 边界条件覆盖层（弧）
pub type BoundaryCoverage = CoverageComponent<BoundaryRow>;

impl<R: AttributeRow> CoverageComponent<R> {
    pub fn new(coverage: Coverage) -> Self {
        Self::with_table(coverage, AttributeTable::new())
    }

    pub fn with_table(coverage: Coverage, table: AttributeTable<R>) -> Self {
        Self {
            coverage,
            table,
            feature_map: FeatureCompIdMap::new(),
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.coverage.uuid
    }

    /// 承载属性的要素类型
    pub fn kind(&self) -> FeatureKind {
        R::FEATURE_KIND
    }

    fn has_feature(&self, feature: FeatureId) -> bool {
        match R::FEATURE_KIND {
            FeatureKind::Polygon => self.coverage.polygon(feature).is_some(),
            FeatureKind::Arc => self.coverage.arc(feature).is_some(),
            FeatureKind::Point => self.coverage.point(feature).is_some(),
        }
    }

    /// 给要素指定组件
    pub fn assign(&mut self, feature: FeatureId, comp: ComponentId) -> CoverageResult<()> {
        if !self.has_feature(feature) {
            return Err(CoverageError::FeatureNotFound {
                kind: R::FEATURE_KIND,
                id: feature,
            });
        }
        self.table.lookup(comp)?;
        self.feature_map
            .assign(self.coverage.uuid, R::FEATURE_KIND, feature, comp);
        Ok(())
    }

    /// 要素的组件 ID（未设置时为 `None`）
    pub fn comp_id(&self, feature: FeatureId) -> Option<ComponentId> {
        self.feature_map
            .comp_id(self.coverage.uuid, R::FEATURE_KIND, feature)
    }

    /// 要素的组件 ID，未设置或为负时按未指定处理
    pub fn resolved_comp_id(&self, feature: FeatureId) -> ComponentId {
        normalize_component_id(self.comp_id(feature))
    }

    /// 全部 要素 → 组件 映射
    pub fn feature_ids(&self) -> BTreeMap<FeatureId, ComponentId> {
        self.feature_map
            .ids(self.coverage.uuid, R::FEATURE_KIND)
            .cloned()
            .unwrap_or_default()
    }

    pub fn feature_map(&self) -> &FeatureCompIdMap {
        &self.feature_map
    }

    /// 删除属性行；返回被改为未指定的要素
    pub fn delete_row(&mut self, id: ComponentId) -> CoverageResult<Vec<FeatureId>> {
        self.table.delete_row(id)?;
        let uuid = self.coverage.uuid;
        let reassigned: Vec<FeatureId> = self
            .feature_map
            .unassign_component(id)
            .into_iter()
            .filter(|(c, k, _)| *c == uuid && *k == R::FEATURE_KIND)
            .map(|(_, _, f)| f)
            .collect();
        if !reassigned.is_empty() {
            info!(id, count = reassigned.len(), "已删除组件，要素改为未指定");
        }
        Ok(reassigned)
    }

    /// 载入保存的映射；指向表中不存在的行的要素改为未指定
    fn load_feature_ids(&mut self, ids: BTreeMap<FeatureId, ComponentId>) {
        for (feature, mut comp) in ids {
            if self.table.get(comp).is_none() {
                warn!(feature, comp, "要素指向不存在的组件，改为未指定");
                comp = UNASSIGNED_COMPONENT_ID;
            }
            self.feature_map
                .assign(self.coverage.uuid, R::FEATURE_KIND, feature, comp);
        }
    }
}

impl CoverageComponent<MaterialRow> {
    pub fn to_data(&self) -> MaterialsComponentData {
        MaterialsComponentData {
            coverage: self.coverage.clone(),
            materials: self.table.rows().to_vec(),
            next_id: self.table.next_id(),
            polygon_comp_ids: self.feature_ids(),
            ..Default::default()
        }
    }

    pub fn from_data(data: MaterialsComponentData) -> CoverageResult<Self> {
        check_version(data.version)?;
        let table = AttributeTable::from_rows(data.materials, data.next_id)?;
        let mut comp = Self::with_table(data.coverage, table);
        comp.load_feature_ids(data.polygon_comp_ids);
        Ok(comp)
    }

    pub fn save_to<S: ComponentStore>(&self, store: &S) -> CoverageResult<()> {
        store.put(MATERIALS_KEY, &self.to_data())?;
        Ok(())
    }

    /// 从存储载入；没有数据时返回 `None`
    pub fn load_from<S: ComponentStore>(store: &S) -> CoverageResult<Option<Self>> {
        store
            .get::<MaterialsComponentData>(MATERIALS_KEY)?
            .map(Self::from_data)
            .transpose()
    }
}

impl CoverageComponent<BoundaryRow> {
    pub fn to_data(&self) -> BoundaryComponentData {
        BoundaryComponentData {
            coverage: self.coverage.clone(),
            bcs: self.table.rows().to_vec(),
            next_id: self.table.next_id(),
            arc_comp_ids: self.feature_ids(),
            ..Default::default()
        }
    }

    pub fn from_data(data: BoundaryComponentData) -> CoverageResult<Self> {
        check_version(data.version)?;
        let table = AttributeTable::from_rows(data.bcs, data.next_id)?;
        let mut comp = Self::with_table(data.coverage, table);
        comp.load_feature_ids(data.arc_comp_ids);
        Ok(comp)
    }

    pub fn save_to<S: ComponentStore>(&self, store: &S) -> CoverageResult<()> {
        store.put(BOUNDARY_KEY, &self.to_data())?;
        Ok(())
    }

    pub fn load_from<S: ComponentStore>(store: &S) -> CoverageResult<Option<Self>> {
        store
            .get::<BoundaryComponentData>(BOUNDARY_KEY)?
            .map(Self::from_data)
            .transpose()
    }
}
