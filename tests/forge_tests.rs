/// Forge integration tests — end-to-end builds against the built-in catalog.

use weapon_forge::catalog;
use weapon_forge::core::pipeline::{ForgeError, WeaponEngine};
use weapon_forge::core::version::VersionError;
use weapon_forge::schema::rarity::Rarity;
use weapon_forge::schema::theme::Theme;
use weapon_forge::schema::weapon::WeaponView;

fn engine() -> WeaponEngine {
    WeaponEngine::builder().build().unwrap()
}

fn sample_ids() -> impl Iterator<Item = String> {
    (0..150).map(|i| format!("blade-{}", i))
}

/// Every build of every sample id at every version and forced rarity.
fn every_variant(engine: &WeaponEngine) -> Vec<WeaponView> {
    let mut views = Vec::new();
    for version in 0..=engine.latest_version_num() {
        for id in sample_ids() {
            views.extend(engine.forge_variants(&id, version).unwrap());
        }
    }
    views
}

#[test]
fn test2_scenario() {
    let view = engine().forge("test2", 0usize).unwrap();
    assert_eq!(view.rarity, Rarity::Common);
    assert_eq!(view.themes, vec![Theme::Steampunk]);
    assert!(view.active_powers.is_empty());
    assert_eq!(view.max_charges, 0);
    assert_eq!(view.passive_powers.len(), 1);
    assert_eq!(
        view.passive_powers[0].desc,
        "A widget on the weapon displays the time."
    );
    assert_eq!(view.recharge, None);
}

#[test]
fn builds_are_byte_identical() {
    let a = engine();
    let b = engine();
    for id in sample_ids().take(40) {
        for version in 0..=a.latest_version_num() {
            let first = serde_json::to_string(&a.forge(&id, version).unwrap()).unwrap();
            let again = serde_json::to_string(&a.forge(&id, version).unwrap()).unwrap();
            let other = serde_json::to_string(&b.forge(&id, version).unwrap()).unwrap();
            assert_eq!(first, again);
            assert_eq!(first, other);
        }
    }
}

#[test]
fn later_versions_leave_earlier_ones_alone() {
    let full = engine();
    let history = catalog::history();
    for cut in 1..history.len() {
        let truncated = WeaponEngine::builder()
            .history(history[..cut].to_vec())
            .build()
            .unwrap();
        for id in sample_ids().take(60) {
            for version in 0..cut {
                assert_eq!(
                    truncated.forge(&id, version).unwrap(),
                    full.forge(&id, version).unwrap(),
                    "{} v{} changed once {} versions existed",
                    id,
                    version,
                    history.len()
                );
            }
        }
    }
}

#[test]
fn charges_cover_every_active() {
    let engine = engine();
    for view in every_variant(&engine) {
        for power in &view.active_powers {
            if let Some(cost) = power.cost.charges() {
                assert!(
                    cost <= view.max_charges,
                    "{} ({}): '{}' costs {} of {}",
                    view.id,
                    view.rarity,
                    power.desc,
                    cost,
                    view.max_charges
                );
            }
        }
        let charged = view.active_powers.iter().any(|p| p.cost.charges().is_some());
        assert_eq!(charged, view.recharge.is_some(), "{}: recharge mismatch", view.id);
    }
}

#[test]
fn power_counts_match_the_tier() {
    let engine = engine();
    for view in every_variant(&engine) {
        let budget = engine.config().budget(view.rarity);
        let charged = view
            .active_powers
            .iter()
            .filter(|p| p.cost.charges().is_some())
            .count();
        let languages = view.sentience.as_ref().map_or(0, |s| s.languages.len());
        assert_eq!(charged, budget.actives as usize, "{} ({})", view.id, view.rarity);
        assert_eq!(
            view.passive_powers.len() + languages,
            budget.passives as usize,
            "{} ({})",
            view.id,
            view.rarity
        );
        assert!(view.max_charges >= budget.charges);
    }
}

#[test]
fn every_weapon_deals_damage() {
    let engine = engine();
    for view in every_variant(&engine) {
        assert!(view.damage.is_nonzero(), "{} has no damage", view.id);
        assert!(!view.description.is_empty());
    }
}

#[test]
fn cores_and_eyes_link_to_one_choice() {
    let engine = engine();
    for view in every_variant(&engine) {
        let cores = view
            .features
            .iter()
            .filter(|f| f.as_str().starts_with("core."))
            .count();
        let eyes = view
            .features
            .iter()
            .filter(|f| f.as_str().starts_with("eye."))
            .count();
        assert!(cores <= 1, "{}: {} distinct cores", view.id, cores);
        assert!(eyes <= 1, "{}: {} distinct eyes", view.id, eyes);
        if eyes == 1 {
            assert!(view.sentience.is_some(), "{}: eye on a non-sentient weapon", view.id);
        }
    }
}

#[test]
fn never_features_only_arrive_attached() {
    let pairs = [
        ("passive.ember-heart", "active.fireball"),
        ("passive.hungering", "active.drain"),
        ("passive.spider-friend", "active.spider"),
    ];
    let engine = engine();
    for view in every_variant(&engine) {
        for (attached, source) in pairs {
            if view.features.iter().any(|f| f.as_str() == attached) {
                assert!(
                    view.features.iter().any(|f| f.as_str() == source),
                    "{}: {} without {}",
                    view.id,
                    attached,
                    source
                );
            }
        }
    }
}

#[test]
fn committed_ids_are_unique() {
    let engine = engine();
    for view in every_variant(&engine) {
        let mut seen = std::collections::HashSet::new();
        for id in &view.features {
            assert!(seen.insert(id), "{}: {} committed twice", view.id, id);
        }
    }
}

#[test]
fn light_and_dark_never_share_a_weapon() {
    let engine = engine();
    for id in sample_ids() {
        for version in 2..=engine.latest_version_num() {
            for view in engine.forge_variants(&id, version).unwrap() {
                assert!(
                    !(view.themes.contains(&Theme::Light) && view.themes.contains(&Theme::Dark)),
                    "{} v{}",
                    id,
                    version
                );
            }
        }
    }
}

#[test]
fn natural_rarity_follows_the_roll() {
    let engine = engine();
    for id in sample_ids() {
        let view = engine.forge(&id, 0usize).unwrap();
        assert_eq!(view.rarity, engine.config().odds.tier_for(view.rarity_roll));
        assert!((0.0..1.0).contains(&view.rarity_roll));
    }
}

#[test]
fn forced_legendary_is_sentient() {
    let engine = engine();
    for id in sample_ids().take(30) {
        let view = engine
            .forge_with_rarity(&id, 0usize, Some(Rarity::Legendary))
            .unwrap();
        let sentience = view.sentience.expect("legendary weapons are always sentient");
        assert_eq!(sentience.personality.len(), 2);
        assert!(sentience.languages.len() <= 2);
        assert!(view.features.iter().any(|f| f.as_str() == "sentient"));
    }
}

#[test]
fn bad_versions_are_rejected() {
    let engine = engine();
    let latest = engine.latest_version_num();
    assert!(matches!(
        engine.forge("test2", latest + 1),
        Err(ForgeError::Version(VersionError::OutOfRange { .. }))
    ));
    assert!(matches!(
        engine.forge("test2", f64::NAN),
        Err(ForgeError::Version(VersionError::OutOfRange { .. }))
    ));
    assert!(matches!(
        engine.forge("test2", 0.5f64),
        Err(ForgeError::Version(VersionError::OutOfRange { .. }))
    ));
    assert!(engine.forge("test2", 1.0f64).is_ok());
}
