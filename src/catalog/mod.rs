//! The built-in catalog and its version history.
//!
//! Each `vN` module holds one version's deltas. Published versions are
//! frozen: new content goes into a new module appended to [`history`].

pub mod v0;
pub mod v1;
pub mod v2;
pub mod v3;

use crate::core::pipeline::Draft;
use crate::core::provider::{FeatureProvider, ProviderElement};
use crate::core::version::{fold_category, Delta, DeltaSet};
use crate::schema::feature::{Attaching, FeatureId};
use crate::schema::power::{ActivePower, PassivePower};
use crate::schema::theme::Theme;
use crate::schema::weapon::{Descriptor, EnergyCore, Material, Shape};

pub type Element<T> = ProviderElement<T, Draft>;
pub type Pool<T> = FeatureProvider<T, Draft>;
pub type CategoryDelta<T> = Delta<T, Draft>;

/// Every category, resolved for one version.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub themes: Pool<Theme>,
    pub shapes: Pool<Shape>,
    pub hard_materials: Pool<Material>,
    pub grip_materials: Pool<Material>,
    pub embellishments: Pool<Descriptor>,
    pub energy_cores: Pool<EnergyCore>,
    pub eye_colours: Pool<String>,
    pub active_powers: Pool<ActivePower>,
    pub passive_powers: Pool<PassivePower>,
    pub languages: Pool<String>,
    pub personalities: Pool<String>,
    pub recharge_methods: Pool<String>,
}

/// One version's deltas, per category.
#[derive(Default, Clone)]
pub struct CatalogDelta {
    pub themes: CategoryDelta<Theme>,
    pub shapes: CategoryDelta<Shape>,
    pub hard_materials: CategoryDelta<Material>,
    pub grip_materials: CategoryDelta<Material>,
    pub embellishments: CategoryDelta<Descriptor>,
    pub energy_cores: CategoryDelta<EnergyCore>,
    pub eye_colours: CategoryDelta<String>,
    pub active_powers: CategoryDelta<ActivePower>,
    pub passive_powers: CategoryDelta<PassivePower>,
    pub languages: CategoryDelta<String>,
    pub personalities: CategoryDelta<String>,
    pub recharge_methods: CategoryDelta<String>,
}

impl DeltaSet for CatalogDelta {
    type Resolved = Catalog;

    fn resolve(history: &[Self]) -> Catalog {
        Catalog {
            themes: fold_category("themes", true, history.iter().map(|d| &d.themes)),
            shapes: fold_category("shapes", false, history.iter().map(|d| &d.shapes)),
            hard_materials: fold_category("hard_materials", false, history.iter().map(|d| &d.hard_materials)),
            grip_materials: fold_category("grip_materials", false, history.iter().map(|d| &d.grip_materials)),
            embellishments: fold_category("embellishments", false, history.iter().map(|d| &d.embellishments)),
            energy_cores: fold_category("energy_cores", false, history.iter().map(|d| &d.energy_cores)),
            eye_colours: fold_category("eye_colours", false, history.iter().map(|d| &d.eye_colours)),
            active_powers: fold_category("active_powers", true, history.iter().map(|d| &d.active_powers)),
            passive_powers: fold_category("passive_powers", true, history.iter().map(|d| &d.passive_powers)),
            languages: fold_category("languages", true, history.iter().map(|d| &d.languages)),
            personalities: fold_category("personalities", true, history.iter().map(|d| &d.personalities)),
            recharge_methods: fold_category("recharge_methods", false, history.iter().map(|d| &d.recharge_methods)),
        }
    }
}

/// Static facts about one category, for linting and tooling.
#[derive(Debug, Clone)]
pub struct CategorySummary<'a> {
    pub name: &'a str,
    pub ids: Vec<&'a FeatureId>,
    /// Ids whose condition can never pass.
    pub never: Vec<&'a FeatureId>,
    /// Ids whose payload is a generator and can't be inspected statically.
    pub deferred: Vec<&'a FeatureId>,
    /// `(source, target)` force-attach edges from plain payloads.
    pub attachments: Vec<(&'a FeatureId, &'a FeatureId)>,
}

fn summarize<T, C: ?Sized>(pool: &FeatureProvider<T, C>) -> CategorySummary<'_> {
    let mut summary = CategorySummary {
        name: pool.name(),
        ids: Vec::with_capacity(pool.len()),
        never: Vec::new(),
        deferred: Vec::new(),
        attachments: Vec::new(),
    };
    for element in pool.elements() {
        summary.ids.push(&element.id);
        if element.condition.is_never() {
            summary.never.push(&element.id);
        }
        if element.payload.is_deferred() {
            summary.deferred.push(&element.id);
        }
    }
    summary
}

fn summarize_attaching<T: Attaching, C: ?Sized>(pool: &FeatureProvider<T, C>) -> CategorySummary<'_> {
    let mut summary = summarize(pool);
    for element in pool.elements() {
        if let Some(payload) = element.payload.as_value() {
            for target in payload.attachments() {
                summary.attachments.push((&element.id, target));
            }
        }
    }
    summary
}

impl Catalog {
    pub fn summaries(&self) -> Vec<CategorySummary<'_>> {
        vec![
            summarize(&self.themes),
            summarize(&self.shapes),
            summarize(&self.hard_materials),
            summarize(&self.grip_materials),
            summarize_attaching(&self.embellishments),
            summarize(&self.energy_cores),
            summarize(&self.eye_colours),
            summarize_attaching(&self.active_powers),
            summarize_attaching(&self.passive_powers),
            summarize(&self.languages),
            summarize(&self.personalities),
            summarize(&self.recharge_methods),
        ]
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.summaries()
            .iter()
            .any(|s| s.ids.iter().any(|i| i.as_str() == id))
    }
}

/// The full built-in history, version 0 first.
pub fn history() -> Vec<CatalogDelta> {
    vec![v0::delta(), v1::delta(), v2::delta(), v3::delta()]
}

/// `theme.{name}`
pub(crate) fn theme(t: Theme) -> Element<Theme> {
    Element::new(format!("theme.{}", t.name()), t)
}

/// A plain string entry.
pub(crate) fn text(id: &str, value: &str) -> Element<String> {
    Element::new(id, value.to_string())
}
