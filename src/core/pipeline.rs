/// The weapon assembly pipeline: (id, version, rarity?) → WeaponView.
///
/// Draws happen in a fixed category order so a given id replays exactly
/// against a given catalog version: rarity roll, themes, shape, sentience,
/// per-part materials and embellishments, active powers, passive powers,
/// recharge.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::catalog::{self, Catalog, CatalogDelta};
use crate::core::condition::WeaponState;
use crate::core::config::{ConfigError, ForgeConfig, TierBudget};
use crate::core::describe::DescribeError;
use crate::core::provider::ProviderError;
use crate::core::rng::{self, SeededRng, UniformRng};
use crate::core::version::{VersionController, VersionError, VersionIndex};
use crate::schema::feature::FeatureId;
use crate::schema::rarity::Rarity;
use crate::schema::sentience::{Pronouns, Sentience};
use crate::schema::theme::Theme;
use crate::schema::weapon::{MaterialClass, PartDescription, Weapon, WeaponView};

/// Feature id committed to every sentient weapon.
pub const SENTIENT: &str = "sentient";

/// Recharge text used when a weapon has charged powers but no method is eligible.
pub const DEFAULT_RECHARGE: &str = "at dawn";

const PERSONALITY_TRAITS: usize = 2;
const MAX_EXTRA_LANGUAGES: u32 = 2;

#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("version error: {0}")]
    Version(#[from] VersionError),
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("describe error: {0}")]
    Describe(#[from] DescribeError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// The context every catalog generator sees: the resolved catalog for this
/// build and the weapon so far.
#[derive(Debug, Clone)]
pub struct Draft {
    pub catalog: Arc<Catalog>,
    pub weapon: Weapon,
}

impl WeaponState for Draft {
    fn rarity(&self) -> Rarity {
        self.weapon.rarity
    }

    fn themes(&self) -> &[Theme] {
        &self.weapon.themes
    }

    fn is_committed(&self, id: &str) -> bool {
        self.weapon.has_feature(id)
    }
}

impl Draft {
    fn passive_slots_left(&self, budget: &TierBudget) -> bool {
        self.weapon.passive_powers.len() + self.weapon.language_count() < budget.passives as usize
    }

    /// Commit force-attached ids. Attached passives are realized and listed
    /// while the passive budget allows, and their own attachments follow.
    fn attach(&mut self, ids: &[FeatureId], rng: &mut dyn UniformRng, budget: &TierBudget) {
        let catalog = Arc::clone(&self.catalog);
        let mut pending: Vec<FeatureId> = ids.iter().rev().cloned().collect();
        while let Some(id) = pending.pop() {
            if !self.weapon.commit(id.clone()) {
                continue;
            }
            let Some(element) = catalog.passive_powers.get(id.as_str()) else {
                continue;
            };
            if !self.passive_slots_left(budget) {
                tracing::warn!(
                    "{}: attached passive '{}' exceeds the {} passive budget",
                    self.weapon.id,
                    id,
                    self.weapon.rarity
                );
                continue;
            }
            let power = element.payload.realize(rng, self);
            pending.extend(power.attach.iter().rev().cloned());
            self.weapon.passive_powers.push(power);
        }
    }
}

/// Assemble one weapon against a resolved catalog.
///
/// `rng` must be fresh for this build; the engine seeds it from the id.
pub fn assemble(
    rng: &mut dyn UniformRng,
    id: &str,
    version: usize,
    catalog: Arc<Catalog>,
    config: &ForgeConfig,
    forced: Option<Rarity>,
) -> Result<Weapon, ForgeError> {
    let n = rng.next_f64();
    let rarity = forced.unwrap_or_else(|| config.odds.tier_for(n));
    let budget = *config.budget(rarity);
    tracing::debug!("{} v{}: n = {}, rarity {}", id, version, n, rarity);

    let mut draft = Draft {
        catalog: Arc::clone(&catalog),
        weapon: Weapon::new(id, version, rarity, n),
    };

    let theme_count = if rng::roll(rng, budget.extra_theme) { 2 } else { 1 };
    for _ in 0..theme_count {
        let theme = catalog.themes.draw_required(rng, &draft)?;
        draft.weapon.themes.push(theme.value);
        draft.weapon.commit(theme.id);
    }
    tracing::debug!("{}: themes {:?}", id, draft.weapon.themes);

    let shape = catalog.shapes.draw_required(rng, &draft)?;
    draft.weapon.commit(shape.id);
    let parts = shape.value.parts.clone();
    draft.weapon.shape = Some(shape.value);

    let sentient = match budget.sentience {
        c if c <= 0.0 => false,
        c if c >= 1.0 => true,
        c => rng::roll(rng, c),
    };
    if sentient {
        awaken(rng, &mut draft, &budget);
    }

    let mut described = Vec::with_capacity(parts.len());
    for slot in &parts {
        let pool = match slot.class {
            MaterialClass::Hard => &catalog.hard_materials,
            MaterialClass::Grip => &catalog.grip_materials,
        };
        let material = pool.draw_required(rng, &draft)?;
        draft.weapon.commit(material.id);
        let mut descriptors = material.value.descriptors;
        for descriptor in descriptors.clone() {
            draft.attach(&descriptor.attach, rng, &budget);
        }

        if rng::roll(rng, budget.embellish) {
            if let Some(embellishment) = catalog.embellishments.draw(rng, &draft) {
                draft.weapon.commit(embellishment.id);
                draft.attach(&embellishment.value.attach, rng, &budget);
                descriptors.push(embellishment.value);
            }
        }

        described.push(PartDescription {
            part: slot.name.clone(),
            plural: slot.plural,
            material: material.value.name,
            descriptors,
        });
    }
    draft.weapon.description = Some(described);

    let mut charged = 0;
    while charged < budget.actives {
        let power = catalog.active_powers.draw_required(rng, &draft)?;
        draft.weapon.commit(power.id);
        if power.value.cost.charges().is_some() {
            charged += 1;
        }
        let attach = power.value.attach.clone();
        draft.weapon.active_powers.push(power.value);
        draft.attach(&attach, rng, &budget);
    }

    while draft.passive_slots_left(&budget) {
        let power = catalog.passive_powers.draw_required(rng, &draft)?;
        draft.weapon.commit(power.id);
        let attach = power.value.attach.clone();
        draft.weapon.passive_powers.push(power.value);
        draft.attach(&attach, rng, &budget);
    }
    tracing::debug!(
        "{}: {} actives, {} passives",
        id,
        draft.weapon.active_powers.len(),
        draft.weapon.passive_powers.len()
    );

    let most_expensive = draft
        .weapon
        .active_powers
        .iter()
        .filter_map(|p| p.cost.charges())
        .max();
    draft.weapon.max_charges = budget.charges.max(most_expensive.unwrap_or(0));
    if most_expensive.is_some() {
        let recharge = match catalog.recharge_methods.draw(rng, &draft) {
            Some(method) => {
                draft.weapon.commit(method.id);
                method.value
            }
            None => DEFAULT_RECHARGE.to_string(),
        };
        draft.weapon.recharge = Some(recharge);
    }

    Ok(draft.weapon)
}

fn awaken(rng: &mut dyn UniformRng, draft: &mut Draft, budget: &TierBudget) {
    let catalog = Arc::clone(&draft.catalog);
    draft.weapon.commit(FeatureId::from(SENTIENT));
    let pronouns = rng::choose(rng, &Pronouns::ALL).copied().unwrap_or_default();

    let mut personality = Vec::with_capacity(PERSONALITY_TRAITS);
    for _ in 0..PERSONALITY_TRAITS {
        if let Some(quirk) = catalog.personalities.draw(rng, draft) {
            draft.weapon.commit(quirk.id);
            personality.push(quirk.value);
        }
    }

    let cap = budget.passives.min(MAX_EXTRA_LANGUAGES) as usize;
    let extra = rng::choose_index(rng, cap + 1).unwrap_or(0);
    let mut languages = Vec::with_capacity(extra);
    for _ in 0..extra {
        if let Some(language) = catalog.languages.draw(rng, draft) {
            draft.weapon.commit(language.id);
            languages.push(language.value);
        }
    }

    tracing::debug!(
        "{}: sentient ({}), {} extra languages",
        draft.weapon.id,
        pronouns.label(),
        languages.len()
    );
    draft.weapon.sentience = Some(Sentience {
        pronouns,
        personality,
        languages,
    });
}

/// The top-level weapon engine. Built via `WeaponEngine::builder()`.
///
/// Every catalog version is resolved once at build time and shared
/// read-only between builds.
pub struct WeaponEngine {
    config: ForgeConfig,
    versions: VersionController<CatalogDelta>,
    catalogs: Vec<Arc<Catalog>>,
}

/// Builder for constructing a `WeaponEngine`.
#[derive(Default)]
pub struct WeaponEngineBuilder {
    config: Option<ForgeConfig>,
    config_path: Option<PathBuf>,
    /// Directly provided history (for testing with small catalogs).
    history: Option<Vec<CatalogDelta>>,
}

impl WeaponEngine {
    pub fn builder() -> WeaponEngineBuilder {
        WeaponEngineBuilder::default()
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    pub fn versions(&self) -> &VersionController<CatalogDelta> {
        &self.versions
    }

    pub fn latest_version_num(&self) -> usize {
        self.versions.latest_version_num()
    }

    pub fn catalog<N: VersionIndex>(&self, version: N) -> Result<Arc<Catalog>, ForgeError> {
        let index = self.versions.index_of(version)?;
        Ok(Arc::clone(&self.catalogs[index]))
    }

    /// Build the weapon for `id` at `version` with its natural rarity.
    pub fn forge<N: VersionIndex>(&self, id: &str, version: N) -> Result<WeaponView, ForgeError> {
        self.forge_with_rarity(id, version, None)
    }

    /// Build with an optional forced rarity. The rarity roll is still drawn,
    /// so every variant of an id reports the same `rarity_roll`.
    pub fn forge_with_rarity<N: VersionIndex>(
        &self,
        id: &str,
        version: N,
        rarity: Option<Rarity>,
    ) -> Result<WeaponView, ForgeError> {
        Ok(self.draft(id, version, rarity)?.freeze()?)
    }

    /// One build per rarity tier, lowest first.
    pub fn forge_variants<N: VersionIndex>(
        &self,
        id: &str,
        version: N,
    ) -> Result<Vec<WeaponView>, ForgeError> {
        Rarity::ALL
            .into_iter()
            .map(|rarity| self.forge_with_rarity(id, version, Some(rarity)))
            .collect()
    }

    /// The assembled weapon before freezing.
    pub fn draft<N: VersionIndex>(
        &self,
        id: &str,
        version: N,
        rarity: Option<Rarity>,
    ) -> Result<Weapon, ForgeError> {
        if id.is_empty() {
            return Err(ForgeError::InvalidRequest("weapon id must not be empty".to_string()));
        }
        let index = self.versions.index_of(version)?;
        let mut rng = SeededRng::new(id);
        assemble(
            &mut rng,
            id,
            index,
            Arc::clone(&self.catalogs[index]),
            &self.config,
            rarity,
        )
    }
}

impl WeaponEngineBuilder {
    pub fn config(mut self, config: ForgeConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load the config from a RON file at build time.
    pub fn config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn history(mut self, history: Vec<CatalogDelta>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn build(self) -> Result<WeaponEngine, ForgeError> {
        let config = match (self.config, self.config_path) {
            (Some(config), _) => {
                config.validate()?;
                config
            }
            (None, Some(path)) => ForgeConfig::load_from_ron(&path)?,
            (None, None) => ForgeConfig::default(),
        };

        let history = self.history.unwrap_or_else(catalog::history);
        let versions = VersionController::new(history)?;
        let catalogs: Vec<Arc<Catalog>> = versions.all_versions().into_iter().map(Arc::new).collect();
        tracing::debug!("resolved {} catalog versions", catalogs.len());

        Ok(WeaponEngine {
            config,
            versions,
            catalogs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Element, Pool};
    use crate::core::condition::Condition;
    use crate::core::rng::{CountingRng, ScriptedRng};
    use crate::core::version::{DeltaSet, Delta};
    use crate::schema::feature::ids;
    use crate::schema::power::{ActivePower, Cost, Damage, PassivePower};
    use crate::schema::weapon::{Material, PartSlot, Shape};

    fn tiny_delta() -> CatalogDelta {
        CatalogDelta {
            themes: Delta::new()
                .add(Element::new("theme.fire", Theme::Fire))
                .add(Element::new("theme.ice", Theme::Ice)),
            shapes: Delta::new().add(Element::new(
                "shape.club",
                Shape {
                    name: "club".to_string(),
                    parts: vec![PartSlot::hard("head")],
                    damage: Damage::dice(1, 6),
                },
            )),
            hard_materials: Delta::new().add(Element::new("material.oak", Material::new("oak"))),
            passive_powers: Delta::new()
                .add(Element::new("passive.warm", PassivePower::new("It is warm.")))
                .add(
                    Element::new("passive.bond", PassivePower::new("It knows its wielder."))
                        .when(Condition::never()),
                ),
            active_powers: Delta::new()
                .add(
                    Element::new("active.bonk", ActivePower::new("Bonk.", Cost::Charges(3)))
                        .when(Condition::always().ids_none(ids(["active.spark"]))),
                )
                .add(
                    Element::new(
                        "active.spark",
                        ActivePower::new("Spark.", Cost::Charges(1)).attaching("passive.bond"),
                    )
                    .when(Condition::always().ids_none(ids(["active.bonk"]))),
                )
                .add(Element::new("active.poke", ActivePower::new("Poke.", Cost::AtWill))),
            ..CatalogDelta::default()
        }
    }

    fn tiny_catalog() -> Arc<Catalog> {
        Arc::new(CatalogDelta::resolve(&[tiny_delta()]))
    }

    #[test]
    fn draw_order_is_fixed() {
        let values = vec![
            0.5,  // n → common
            0.9,  // one theme
            0.6,  // ice
            0.0,  // club
            0.0,  // oak
            0.9,  // no embellishment
            0.0,  // passive.warm
        ];
        let mut rng = CountingRng::new(ScriptedRng::new(values));
        let w = assemble(&mut rng, "x", 0, tiny_catalog(), &ForgeConfig::default(), None).unwrap();
        assert_eq!(rng.draws(), 7);
        assert_eq!(w.rarity, Rarity::Common);
        assert_eq!(w.themes, vec![Theme::Ice]);
        assert_eq!(w.passive_powers, vec![PassivePower::new("It is warm.")]);
        assert!(w.active_powers.is_empty());
        assert_eq!(w.max_charges, 0);
        assert_eq!(w.recharge, None);
        let ids: Vec<&str> = w.features().iter().map(FeatureId::as_str).collect();
        assert_eq!(ids, vec!["theme.ice", "shape.club", "material.oak", "passive.warm"]);
    }

    #[test]
    fn forced_rarity_still_draws_n() {
        let mut a = ScriptedRng::new(vec![0.5, 0.9, 0.0, 0.0, 0.0, 0.9, 0.0]);
        let w = assemble(&mut a, "x", 0, tiny_catalog(), &ForgeConfig::default(), Some(Rarity::Common)).unwrap();
        assert_eq!(w.rarity_roll, 0.5);
        assert_eq!(w.themes, vec![Theme::Fire]);
        assert_eq!(a.consumed(), 7);
    }

    #[test]
    fn attached_passives_fill_budget() {
        // uncommon: one charged active, one passive
        let values = vec![
            0.75, // n → uncommon
            0.9,  // one theme
            0.0,  // fire
            0.0,  // club
            0.0,  // oak
            0.9,  // no embellishment
            0.5,  // active.spark (of bonk, spark, poke)
        ];
        let mut rng = ScriptedRng::new(values);
        let w = assemble(&mut rng, "x", 0, tiny_catalog(), &ForgeConfig::default(), None).unwrap();
        assert_eq!(w.rarity, Rarity::Uncommon);
        assert_eq!(w.active_powers.len(), 1);
        assert_eq!(w.passive_powers, vec![PassivePower::new("It knows its wielder.")]);
        assert!(w.has_feature("passive.bond"));
        assert!(!w.has_feature("active.bonk"));
        assert_eq!(w.max_charges, 2);
        assert_eq!(w.recharge.as_deref(), Some(DEFAULT_RECHARGE));
        assert_eq!(rng.consumed(), 7);
    }

    #[test]
    fn at_will_actives_are_extra() {
        let values = vec![
            0.75, // uncommon
            0.9, 0.0, 0.0, 0.0, 0.9, // theme, shape, material, no embellishment
            0.9,  // active.poke (at will)
            0.0,  // active.bonk
            0.0,  // passive.warm
        ];
        let mut rng = ScriptedRng::new(values);
        let w = assemble(&mut rng, "x", 0, tiny_catalog(), &ForgeConfig::default(), None).unwrap();
        let descs: Vec<&str> = w.active_powers.iter().map(|a| a.desc.as_str()).collect();
        assert_eq!(descs, vec!["Poke.", "Bonk."]);
        assert_eq!(w.max_charges, 3);
        assert_eq!(w.passive_powers.len(), 1);
    }

    #[test]
    fn empty_pool_is_a_config_defect() {
        let mut d = tiny_delta();
        d.shapes = Delta::new();
        let catalog = Arc::new(CatalogDelta::resolve(&[d]));
        let mut rng = ScriptedRng::new(vec![0.5]);
        let err = assemble(&mut rng, "x", 0, catalog, &ForgeConfig::default(), None).unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Provider(ProviderError::NoEligibleFeature { ref category }) if category == "shapes"
        ));
    }

    #[test]
    fn engine_rejects_bad_requests() {
        let engine = WeaponEngine::builder().history(vec![tiny_delta()]).build().unwrap();
        assert!(matches!(engine.forge("", 0usize), Err(ForgeError::InvalidRequest(_))));
        assert!(matches!(
            engine.forge("abc", 1usize),
            Err(ForgeError::Version(VersionError::OutOfRange { .. }))
        ));
        assert!(matches!(
            engine.forge("abc", -1i32),
            Err(ForgeError::Version(VersionError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn engine_uses_config_path() {
        let engine = WeaponEngine::builder()
            .config_path("tests/fixtures/generous.ron")
            .history(vec![tiny_delta()])
            .build()
            .unwrap();
        assert_eq!(engine.config().odds.uncommon, 0.5);
    }

    #[test]
    fn engine_rejects_invalid_config() {
        let mut config = ForgeConfig::default();
        config.odds.rare = 0.1;
        let result = WeaponEngine::builder().config(config).build();
        assert!(matches!(result, Err(ForgeError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn variants_share_the_roll() {
        let engine = WeaponEngine::builder().build().unwrap();
        let variants = engine.forge_variants("variant-check", 0usize).unwrap();
        assert_eq!(variants.len(), 5);
        for (view, rarity) in variants.iter().zip(Rarity::ALL) {
            assert_eq!(view.rarity, rarity);
            assert_eq!(view.rarity_roll, variants[0].rarity_roll);
        }
        let natural = engine.forge("variant-check", 0usize).unwrap();
        let picked = engine.config().odds.tier_for(natural.rarity_roll);
        assert_eq!(variants[picked as usize], natural);
    }

    #[test]
    fn catalogs_are_shared() {
        let engine = WeaponEngine::builder().build().unwrap();
        let a = engine.catalog(0usize).unwrap();
        let b = engine.catalog(0usize).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(engine.catalog(engine.latest_version_num() + 1).is_err());
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn check<T: Send + Sync>() {}
        check::<Pool<ActivePower>>();
        check::<WeaponEngine>();
    }
}
