// crates/sit_mapping/src/display.rs

//! 捕捉预览输出
//!
//! 目录结构：
//!
//! ```text
//! <component dir>/<uuid>/display_ids/material_<id>.matid
//! <component dir>/<uuid>/display_ids/<option>.display_ids
//! ```
//!
//! 材质文件为闭合环列表 `[{"outer": [x, y, z, ...]}]`，
//! 边界条件文件为折线列表 `[[x, y, z, ...]]`。坐标展平为一维数组。

use std::fs;
use std::path::{Path, PathBuf};

use glam::DVec3;
use serde::{Deserialize, Serialize};
use sit_mesh::MeshProvider;
use tracing::info;
use uuid::Uuid;

use crate::boundary_mapper::BoundaryMapping;
use crate::error::MappingResult;
use crate::material_mapper::MaterialMapping;

/// 预览文件所在的子目录名
pub const DISPLAY_IDS_DIR: &str = "display_ids";

/// 材质预览中的一个多边形
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayPolygon {
    pub outer: Vec<f64>,
}

/// 一次预览写出的结果
#[derive(Debug, Clone, PartialEq)]
pub struct SnapPreview {
    pub uuid: Uuid,
    /// 预览组件目录
    pub path: PathBuf,
    pub files: Vec<PathBuf>,
}

fn flatten(points: &[DVec3]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y, p.z]).collect()
}

/// 捕捉预览写出器
pub struct SnapPreviewWriter {
    component_dir: PathBuf,
}

impl SnapPreviewWriter {
    pub fn new(component_dir: impl Into<PathBuf>) -> Self {
        Self {
            component_dir: component_dir.into(),
        }
    }

    /// 重建 `<component dir>/<uuid>/display_ids/`，已有目录先删除
    fn prepare(&self, uuid: Uuid) -> MappingResult<PathBuf> {
        let path = self.component_dir.join(uuid.to_string());
        if path.exists() {
            fs::remove_dir_all(&path)?;
        }
        fs::create_dir_all(path.join(DISPLAY_IDS_DIR))?;
        Ok(path)
    }

    fn write_json<T: Serialize>(path: &Path, value: &T) -> MappingResult<()> {
        let file = fs::File::create(path)?;
        serde_json::to_writer(file, value)?;
        Ok(())
    }

    pub fn write_materials<M: MeshProvider + ?Sized>(
        &self,
        uuid: Uuid,
        mapping: &MaterialMapping,
        mesh: &M,
    ) -> MappingResult<SnapPreview> {
        info!(%uuid, "写出材质捕捉预览");
        let path = self.prepare(uuid)?;
        let mut files = Vec::new();
        for (id, rings) in mapping.display_polygons(mesh)? {
            let polygons: Vec<DisplayPolygon> = rings
                .iter()
                .map(|r| DisplayPolygon { outer: flatten(r) })
                .collect();
            let file = path.join(DISPLAY_IDS_DIR).join(format!("material_{id}.matid"));
            Self::write_json(&file, &polygons)?;
            files.push(file);
        }
        Ok(SnapPreview { uuid, path, files })
    }

    pub fn write_boundary(&self, uuid: Uuid, mapping: &BoundaryMapping) -> MappingResult<SnapPreview> {
        info!(%uuid, "写出边界条件捕捉预览");
        let path = self.prepare(uuid)?;
        let mut files = Vec::new();
        for (option, lines) in &mapping.display_lines {
            let lines: Vec<Vec<f64>> = lines.iter().map(|l| flatten(l)).collect();
            let file = path
                .join(DISPLAY_IDS_DIR)
                .join(format!("{option}.display_ids"));
            Self::write_json(&file, &lines)?;
            files.push(file);
        }
        Ok(SnapPreview { uuid, path, files })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use sit_coverage::UserOption;
    use sit_mesh::UGrid;

    fn triangle() -> UGrid {
        let locations = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ];
        UGrid::from_cells(locations, &[vec![0, 1, 2]]).unwrap()
    }

    #[test]
    fn test_material_preview_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapPreviewWriter::new(dir.path());
        let mapping = MaterialMapping {
            material_cells: BTreeMap::from([(0, vec![]), (1, vec![0])]),
            diagnostics: vec![],
        };
        let uuid = Uuid::new_v4();
        let preview = writer.write_materials(uuid, &mapping, &triangle()).unwrap();
        assert_eq!(preview.files.len(), 2);

        let file = dir
            .path()
            .join(uuid.to_string())
            .join(DISPLAY_IDS_DIR)
            .join("material_1.matid");
        let polygons: Vec<DisplayPolygon> =
            serde_json::from_str(&fs::read_to_string(file).unwrap()).unwrap();
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].outer.len(), 12);
        assert_eq!(polygons[0].outer[..3], polygons[0].outer[9..]);
    }

    #[test]
    fn test_boundary_preview_replaces_old_directory() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SnapPreviewWriter::new(dir.path());
        let uuid = Uuid::new_v4();
        let stale = dir.path().join(uuid.to_string()).join("stale.txt");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "x").unwrap();

        let mut mapping = BoundaryMapping::default();
        mapping.display_lines.insert(
            UserOption::B,
            vec![vec![DVec3::new(0.0, 0.0, 0.0), DVec3::new(1.0, 0.0, 2.0)]],
        );
        let preview = writer.write_boundary(uuid, &mapping).unwrap();
        assert!(!stale.exists());
        assert_eq!(preview.files.len(), 1);
        assert!(preview.files[0].ends_with("display_ids/B.display_ids"));
        let lines: Vec<Vec<f64>> =
            serde_json::from_str(&fs::read_to_string(&preview.files[0]).unwrap()).unwrap();
        assert_eq!(lines, vec![vec![0.0, 0.0, 0.0, 1.0, 0.0, 2.0]]);
    }
}
