// crates/sit_mesh/src/traits.rs

//! 网格访问与捕捉的抽象接口
//!
//! 映射层只依赖这些 trait，不依赖具体网格实现。

use glam::DVec3;

use crate::error::MeshResult;

/// 网格只读访问
pub trait MeshProvider {
    /// 节点数
    fn point_count(&self) -> usize;

    /// 单元数
    fn cell_count(&self) -> usize;

    /// 节点坐标
    fn locations(&self) -> &[DVec3];

    /// 扁平单元流 `[类型, 节点数, 节点索引...]`
    fn cellstream(&self) -> &[usize];

    /// 单元各节点坐标（按单元内顺序）
    fn cell_locations(&self, cell: usize) -> MeshResult<Vec<DVec3>>;
}

/// 多边形 → 单元捕捉
pub trait PolygonSnapper {
    /// 返回落在多边形内的单元索引，升序
    ///
    /// `outer` 为外环，`holes` 为内环；落在孔内的单元不计入。
    fn cells_in_polygon(&self, outer: &[DVec3], holes: &[Vec<DVec3>]) -> Vec<usize>;
}

/// 弧捕捉结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnappedArc {
    /// 网格节点索引（沿弧方向）
    pub ids: Vec<usize>,
    /// 与 `ids` 对应的节点坐标
    pub locations: Vec<DVec3>,
}

impl SnappedArc {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// 弧 → 网格节点捕捉
pub trait ArcSnapper {
    /// 将弧折线捕捉到网格节点序列；无法捕捉时返回空结果
    fn snap_arc(&self, path: &[DVec3]) -> SnappedArc;
}
