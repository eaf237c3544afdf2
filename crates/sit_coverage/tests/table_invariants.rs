// crates/sit_coverage/tests/table_invariants.rs

//! 属性表不变量：任意增删序列后未指定行仍在，名称不重复，ID 不复用，
//! 要素不会指向已删除的行

use std::collections::HashSet;

use glam::DVec3;
use sit_coverage::{
    palette, Coverage, CoverageError, CoveragePolygon, MaterialsCoverage, MemoryStore,
    PolygonTexture, PALETTE,
};

/// 简单线性同余序列，保证测试可重复
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

#[test]
fn unassigned_row_survives_any_sequence() {
    let mut coverage = Coverage::new("Materials");
    for id in 1..=10 {
        coverage.add_polygon(CoveragePolygon {
            id,
            outer: vec![DVec3::ZERO, DVec3::X, DVec3::Y],
            holes: vec![],
        });
    }
    let mut comp = MaterialsCoverage::new(coverage);
    let mut rng = Lcg(42);
    let mut issued = HashSet::new();

    for step in 0..500 {
        match rng.next() % 4 {
            0 | 1 => {
                let name = format!("m{}", rng.next() % 40);
                match comp.table.add_material(name.clone()) {
                    Ok(id) => assert!(issued.insert(id), "id {id} reused at step {step}"),
                    Err(CoverageError::DuplicateName { name: dup }) => assert_eq!(dup, name),
                    Err(e) => panic!("unexpected error: {e}"),
                }
            }
            2 => {
                let ids = comp.table.all_ids();
                let target = ids[(rng.next() as usize) % ids.len()];
                let polygon = (rng.next() % 10) as i64 + 1;
                comp.assign(polygon, target).unwrap();
            }
            _ => {
                let ids = comp.table.all_ids();
                let victim = ids[(rng.next() as usize) % ids.len()];
                let result = comp.delete_row(victim);
                if victim == 0 {
                    assert!(matches!(result, Err(CoverageError::CannotDeleteUnassigned)));
                } else {
                    assert!(result.is_ok());
                }
            }
        }

        let table = &comp.table;
        assert_eq!(table.rows()[0].material_id, 0);
        for (polygon, id) in comp.feature_ids() {
            assert!(table.get(id).is_some(), "polygon {polygon} points at deleted row {id}");
        }
        assert_eq!(table.all_ids().iter().filter(|&&id| id == 0).count(), 1);
        let names = table.all_names();
        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }
}

#[test]
fn deleted_row_stays_unassigned_after_reload() {
    let mut coverage = Coverage::new("Materials");
    coverage.add_polygon(CoveragePolygon {
        id: 2,
        outer: vec![DVec3::ZERO, DVec3::X, DVec3::Y],
        holes: vec![],
    });
    let mut comp = MaterialsCoverage::new(coverage);
    let sand = comp.table.add_material("sand").unwrap();
    comp.assign(2, sand).unwrap();

    assert_eq!(comp.delete_row(sand).unwrap(), vec![2]);
    assert_eq!(comp.comp_id(2), Some(0));

    let store = MemoryStore::new();
    comp.save_to(&store).unwrap();
    let loaded = MaterialsCoverage::load_from(&store).unwrap().unwrap();
    assert_eq!(loaded.comp_id(2), Some(0));
    assert!(loaded.table.get(sand).is_none());
}

#[test]
fn palette_cycles_every_48_ids() {
    for id in 0..48 {
        let (color, texture) = palette(id);
        assert_eq!(color, PALETTE[id as usize]);
        assert_eq!(texture, PolygonTexture::Solid);

        let (again, next_texture) = palette(id + 48);
        assert_eq!(again, color);
        assert_eq!(next_texture.index(), texture.index() + 1);
    }
}
