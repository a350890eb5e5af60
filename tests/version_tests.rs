/// Version history tests — the built-in catalog's deltas and their folding.

use weapon_forge::catalog::{self, Catalog, CatalogDelta};
use weapon_forge::core::version::{VersionController, VersionError};
use weapon_forge::schema::power::Cost;

fn controller() -> VersionController<CatalogDelta> {
    VersionController::new(catalog::history()).unwrap()
}

#[test]
fn four_versions_resolve() {
    let vc = controller();
    assert_eq!(vc.version_count(), 4);
    assert_eq!(vc.latest_version_num(), 3);
    for n in 0..4usize {
        assert!(vc.get_version(n).is_ok(), "version {} should resolve", n);
    }
    assert!(vc.get_version(3.0f64).is_ok());
}

#[test]
fn out_of_range_versions_fail() {
    let vc = controller();
    assert!(matches!(vc.get_version(4usize), Err(VersionError::OutOfRange { .. })));
    assert!(matches!(vc.get_version(-1i64), Err(VersionError::OutOfRange { .. })));
    assert!(matches!(vc.get_version(f64::NAN), Err(VersionError::OutOfRange { .. })));
    assert!(matches!(vc.get_version(f64::INFINITY), Err(VersionError::OutOfRange { .. })));
    assert!(matches!(vc.get_version(2.5f32), Err(VersionError::OutOfRange { .. })));
}

#[test]
fn empty_history_is_rejected() {
    assert!(matches!(
        VersionController::<CatalogDelta>::new(Vec::new()),
        Err(VersionError::EmptyHistory)
    ));
}

fn active_cost(catalog: &Catalog, id: &str) -> Option<Cost> {
    catalog
        .active_powers
        .get(id)
        .and_then(|e| e.payload.as_value())
        .map(|p| p.cost)
}

#[test]
fn removals_apply_from_their_version_on() {
    let vc = controller();
    let v0 = vc.get_version(0usize).unwrap();
    let v1 = vc.get_version(1usize).unwrap();
    let v3 = vc.get_version(3usize).unwrap();
    assert!(v0.passive_powers.contains("passive.disarm"));
    assert!(!v1.passive_powers.contains("passive.disarm"));
    assert!(!v3.passive_powers.contains("passive.disarm"));
}

#[test]
fn modifications_patch_shallowly() {
    let vc = controller();
    let v0 = vc.get_version(0usize).unwrap();
    let v1 = vc.get_version(1usize).unwrap();
    assert_eq!(active_cost(&v0, "active.invisible"), Some(Cost::Charges(3)));
    assert_eq!(active_cost(&v1, "active.invisible"), Some(Cost::Charges(2)));

    let desc = |c: &Catalog| {
        c.active_powers
            .get("active.invisible")
            .and_then(|e| e.payload.as_value())
            .map(|p| p.desc.clone())
    };
    assert_eq!(desc(&v0), desc(&v1));
    assert_eq!(
        v0.active_powers.get("active.invisible").map(|e| &e.condition),
        v1.active_powers.get("active.invisible").map(|e| &e.condition)
    );
}

#[test]
fn clear_empties_a_field() {
    let vc = controller();
    let notes = |n: usize| {
        vc.get_version(n)
            .unwrap()
            .active_powers
            .get("active.fireball")
            .and_then(|e| e.payload.as_value())
            .map(|p| p.notes.clone())
            .unwrap()
    };
    assert_eq!(notes(1), vec!["Save DC 15.".to_string()]);
    assert!(notes(2).is_empty());
}

#[test]
fn weight_and_condition_replacements() {
    let vc = controller();
    let v2 = vc.get_version(2usize).unwrap();
    let v3 = vc.get_version(3usize).unwrap();
    assert_eq!(v2.shapes.get("shape.sword").map(|e| e.weight), Some(1));
    assert_eq!(v3.shapes.get("shape.sword").map(|e| e.weight), Some(2));
    assert_ne!(
        v2.passive_powers.get("passive.returning").map(|e| &e.condition),
        v3.passive_powers.get("passive.returning").map(|e| &e.condition)
    );
}

#[test]
fn additions_keep_delta_order() {
    let vc = controller();
    let ids = |n: usize| -> Vec<String> {
        vc.get_version(n)
            .unwrap()
            .themes
            .ids()
            .map(|id| id.to_string())
            .collect()
    };
    let v0 = ids(0);
    assert_eq!(v0[1], "theme.steampunk");
    let v3 = ids(3);
    assert_eq!(&v3[..v0.len()], &v0[..]);
    assert_eq!(&v3[v0.len()..], &["theme.earth".to_string(), "theme.light".to_string()]);
}

#[test]
fn pushing_a_version_leaves_history_intact() {
    let mut vc = controller();
    let before: Vec<String> = vc
        .get_version(3usize)
        .unwrap()
        .shapes
        .ids()
        .map(|id| id.to_string())
        .collect();
    let next = CatalogDelta {
        shapes: weapon_forge::catalog::CategoryDelta::new().remove("shape.sword"),
        ..CatalogDelta::default()
    };
    assert_eq!(vc.push(next), 4);
    let after: Vec<String> = vc
        .get_version(3usize)
        .unwrap()
        .shapes
        .ids()
        .map(|id| id.to_string())
        .collect();
    assert_eq!(before, after);
    assert!(!vc.get_version(4usize).unwrap().shapes.contains("shape.sword"));
}
