// crates/sit_mapping/tests/mapper_completeness.rs

//! 多边形映射完整性：每个单元恰好出现在一个材质桶中

use std::collections::BTreeSet;

use glam::DVec3;
use sit_coverage::{
    BoundaryCoverage, Coverage, CoverageArc, CoveragePolygon, MaterialsCoverage,
};
use sit_mapping::{CoverageMapper, MappingError, SnapPreviewWriter};
use sit_mesh::{MeshProvider, UGrid};

/// n x n 个单位正方形
fn grid(n: usize) -> UGrid {
    let mut locations = Vec::new();
    for j in 0..=n {
        for i in 0..=n {
            locations.push(DVec3::new(i as f64, j as f64, 0.0));
        }
    }
    let mut cells = Vec::new();
    for j in 0..n {
        for i in 0..n {
            let k = j * (n + 1) + i;
            cells.push(vec![k, k + 1, k + n + 2, k + n + 1]);
        }
    }
    UGrid::from_cells(locations, &cells).unwrap()
}

fn square(x0: f64, y0: f64, size: f64) -> Vec<DVec3> {
    vec![
        DVec3::new(x0, y0, 0.0),
        DVec3::new(x0 + size, y0, 0.0),
        DVec3::new(x0 + size, y0 + size, 0.0),
        DVec3::new(x0, y0 + size, 0.0),
    ]
}

#[test]
fn overlapping_polygons_cover_every_cell_once() {
    let mesh = grid(6);
    let mut coverage = Coverage::new("materials");
    // 故意重叠的几个多边形
    let shapes = [(0.0, 0.0, 3.2), (2.0, 2.0, 3.0), (1.0, 3.5, 2.0), (4.5, 0.0, 1.4)];
    for (i, &(x, y, s)) in shapes.iter().enumerate() {
        coverage.add_polygon(CoveragePolygon {
            id: i as i64 + 1,
            outer: square(x, y, s),
            holes: vec![],
        });
    }
    let mut materials = MaterialsCoverage::new(coverage);
    for i in 0..shapes.len() {
        let id = materials.table.add_material(format!("m{i}")).unwrap();
        materials.assign(i as i64 + 1, id).unwrap();
    }

    let mapping = CoverageMapper::new(Some(&mesh))
        .with_materials(Some(&materials))
        .map()
        .unwrap();
    let buckets = mapping.materials.unwrap();

    let mut seen = BTreeSet::new();
    let mut total = 0;
    for cells in buckets.material_cells.values() {
        total += cells.len();
        seen.extend(cells.iter().copied());
    }
    assert_eq!(total, mesh.cell_count());
    assert_eq!(seen, (0..mesh.cell_count()).collect::<BTreeSet<_>>());
    assert!(buckets.material_cells.contains_key(&0));
}

#[test]
fn missing_mesh_and_coverage_are_errors() {
    let mesh = grid(1);
    let materials = MaterialsCoverage::new(Coverage::new("m"));
    assert!(matches!(
        CoverageMapper::new(None).with_materials(Some(&materials)).map(),
        Err(MappingError::MissingMesh)
    ));
    assert!(matches!(
        CoverageMapper::new(Some(&mesh)).map(),
        Err(MappingError::MissingCoverage(_))
    ));
}

#[test]
fn preview_written_for_both_coverages() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = grid(2);
    let materials = MaterialsCoverage::new(Coverage::new("m"));
    let mut bc = Coverage::new("bc");
    bc.add_point(1, DVec3::new(0.0, 0.0, 0.0));
    bc.add_point(2, DVec3::new(2.0, 0.0, 0.0));
    bc.add_arc(CoverageArc { id: 1, start: 1, end: 2, vertices: vec![] })
        .unwrap();
    let boundary = BoundaryCoverage::new(bc);

    let mapping = CoverageMapper::new(Some(&mesh))
        .with_materials(Some(&materials))
        .with_boundary(Some(&boundary))
        .with_preview(SnapPreviewWriter::new(dir.path()))
        .map()
        .unwrap();

    assert_eq!(mapping.previews.len(), 2);
    assert!(mapping.previews.iter().all(|p| p.path.starts_with(dir.path())));
    let arcs = &mapping.boundary.as_ref().unwrap().arc_id_to_grid_ids;
    assert_eq!(arcs[&1], vec![0, 1, 2]);
    // 没有多边形，全部单元未指定
    assert_eq!(mapping.diagnostics().count(), 1);
}
