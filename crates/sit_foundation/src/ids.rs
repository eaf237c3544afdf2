// crates/sit_foundation/src/ids.rs

//! 组件与要素标识
//!
//! 组件 ID 是属性表的稳定主键，与覆盖层中几何要素的原始 ID 解耦。
//! 网格节点和单元在内存中一律使用 0 基 `usize` 索引，文件中为 1 基。

/// 属性表组件 ID
pub type ComponentId = i32;

/// 覆盖层要素 ID（弧或多边形）
pub type FeatureId = i64;

/// 保留的"未指定"组件 ID，属性表中始终存在且不可删除
pub const UNASSIGNED_COMPONENT_ID: ComponentId = 0;

/// 将宿主返回的组件 ID 归一化
///
/// 缺失值或负的哨兵值都映射为 [`UNASSIGNED_COMPONENT_ID`]。
#[inline]
pub fn normalize_component_id(id: Option<ComponentId>) -> ComponentId {
    match id {
        Some(id) if id >= 0 => id,
        _ => UNASSIGNED_COMPONENT_ID,
    }
}

/// 0 基索引转文件中的 1 基 ID
#[inline]
pub const fn to_file_id(index: usize) -> usize {
    index + 1
}
