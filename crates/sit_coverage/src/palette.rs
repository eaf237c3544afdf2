// crates/sit_coverage/src/palette.rs

//! 材质显示调色板
//!
//! 48 种固定颜色按组件 ID 循环；每循环一轮纹理前进一格。
//! `palette(id)` 是纯函数，无共享状态。

use serde::{Deserialize, Serialize};
use sit_foundation::ComponentId;

/// RGB 颜色，通道 0–255
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
}

/// 多边形填充纹理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PolygonTexture {
    NoBrush = 0,
    Solid = 1,
    Dense1 = 2,
    Dense2 = 3,
    Dense3 = 4,
    Dense4 = 5,
    Dense5 = 6,
    Dense6 = 7,
    Dense7 = 8,
    Horizontal = 9,
    Vertical = 10,
    Cross = 11,
    BackwardDiagonal = 12,
    ForwardDiagonal = 13,
    DiagonalCross = 14,
}

impl PolygonTexture {
    /// 按编号排列的全部纹理
    pub const ALL: [PolygonTexture; 15] = [
        Self::NoBrush,
        Self::Solid,
        Self::Dense1,
        Self::Dense2,
        Self::Dense3,
        Self::Dense4,
        Self::Dense5,
        Self::Dense6,
        Self::Dense7,
        Self::Horizontal,
        Self::Vertical,
        Self::Cross,
        Self::BackwardDiagonal,
        Self::ForwardDiagonal,
        Self::DiagonalCross,
    ];

    /// 调色板循环的起始纹理
    pub const STARTING: PolygonTexture = PolygonTexture::Solid;

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl Default for PolygonTexture {
    fn default() -> Self {
        Self::STARTING
    }
}

/// 固定调色板
pub const PALETTE: [Rgb; 48] = [
    Rgb::new(0, 0, 0),
    Rgb::new(170, 0, 0),
    Rgb::new(0, 85, 0),
    Rgb::new(170, 85, 0),
    Rgb::new(0, 170, 0),
    Rgb::new(170, 170, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(170, 255, 0),
    Rgb::new(0, 0, 127),
    Rgb::new(170, 0, 127),
    Rgb::new(0, 85, 127),
    Rgb::new(170, 85, 127),
    Rgb::new(0, 170, 127),
    Rgb::new(170, 170, 127),
    Rgb::new(0, 255, 127),
    Rgb::new(170, 255, 127),
    Rgb::new(0, 0, 255),
    Rgb::new(170, 0, 255),
    Rgb::new(0, 85, 255),
    Rgb::new(170, 85, 255),
    Rgb::new(0, 170, 255),
    Rgb::new(170, 170, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(170, 255, 255),
    Rgb::new(85, 0, 0),
    Rgb::new(255, 0, 0),
    Rgb::new(85, 85, 0),
    Rgb::new(255, 85, 0),
    Rgb::new(85, 170, 0),
    Rgb::new(255, 170, 0),
    Rgb::new(85, 255, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(85, 0, 127),
    Rgb::new(255, 0, 127),
    Rgb::new(85, 85, 127),
    Rgb::new(255, 85, 127),
    Rgb::new(85, 170, 127),
    Rgb::new(255, 170, 127),
    Rgb::new(85, 255, 127),
    Rgb::new(255, 255, 127),
    Rgb::new(85, 0, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(85, 85, 255),
    Rgb::new(255, 85, 255),
    Rgb::new(85, 170, 255),
    Rgb::new(255, 170, 255),
    Rgb::new(85, 255, 255),
    Rgb::new(255, 255, 255),
];

/// 组件 ID 对应的显示颜色与纹理
///
/// `color = PALETTE[id % 48]`，`texture = (起始纹理 + id / 48) % 纹理数`。
/// 负 ID 按 0 处理。
pub fn palette(id: ComponentId) -> (Rgb, PolygonTexture) {
    let id = id.max(0) as usize;
    let n_colors = PALETTE.len();
    let n_textures = PolygonTexture::ALL.len();
    let texture = PolygonTexture::ALL[(PolygonTexture::STARTING.index() + id / n_colors) % n_textures];
    (PALETTE[id % n_colors], texture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_first_cycle_is_distinct() {
        let colors: HashSet<Rgb> = (0..48).map(|id| palette(id).0).collect();
        assert_eq!(colors.len(), 48);
        assert!((0..48).all(|id| palette(id).1 == PolygonTexture::Solid));
    }

    #[test]
    fn test_low_ids() {
        assert_eq!(palette(0), (Rgb::BLACK, PolygonTexture::Solid));
        assert_eq!(palette(1), (Rgb::new(170, 0, 0), PolygonTexture::Solid));
    }

    #[test]
    fn test_second_cycle_advances_texture() {
        assert_eq!(palette(48), (PALETTE[0], PolygonTexture::Dense1));
        assert_eq!(palette(49).0, PALETTE[1]);
    }

    #[test]
    fn test_texture_wraps() {
        // 14 轮后回到 NoBrush，再一轮回到 Solid
        assert_eq!(palette(48 * 14).1, PolygonTexture::NoBrush);
        assert_eq!(palette(48 * 15).1, PolygonTexture::Solid);
    }

    #[test]
    fn test_texture_index_roundtrip() {
        for t in PolygonTexture::ALL {
            assert_eq!(PolygonTexture::from_index(t.index()), Some(t));
        }
        assert_eq!(PolygonTexture::from_index(15), None);
    }
}
