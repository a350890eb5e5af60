/// Feature providers — conditional pools of catalog entries and linking.

use std::fmt;

use thiserror::Error;

use crate::core::condition::{Condition, WeaponState};
use crate::core::generator::Lazy;
use crate::core::rng::{self, UniformRng};
use crate::schema::feature::FeatureId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("no eligible feature in category '{category}'")]
    NoEligibleFeature { category: String },
}

/// One entry of a pool: identity, lazily realized payload, eligibility.
pub struct ProviderElement<T, C: ?Sized> {
    pub id: FeatureId,
    pub payload: Lazy<T, C>,
    pub condition: Condition,
    /// Relative weight among eligible entries. Defaults to 1.
    pub weight: u32,
}

impl<T, C: ?Sized> ProviderElement<T, C> {
    pub fn new(id: impl Into<FeatureId>, value: T) -> Self {
        Self::from_lazy(id, Lazy::Value(value))
    }

    pub fn deferred<F>(id: impl Into<FeatureId>, f: F) -> Self
    where
        F: Fn(&mut dyn UniformRng, &C) -> T + Send + Sync + 'static,
    {
        Self::from_lazy(id, Lazy::deferred(f))
    }

    pub fn from_lazy(id: impl Into<FeatureId>, payload: Lazy<T, C>) -> Self {
        Self {
            id: id.into(),
            payload,
            condition: Condition::always(),
            weight: 1,
        }
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    pub fn weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }
}

impl<T: Clone, C: ?Sized> Clone for ProviderElement<T, C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            payload: self.payload.clone(),
            condition: self.condition.clone(),
            weight: self.weight,
        }
    }
}

impl<T: fmt::Debug, C: ?Sized> fmt::Debug for ProviderElement<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderElement")
            .field("id", &self.id)
            .field("payload", &self.payload)
            .field("condition", &self.condition)
            .field("weight", &self.weight)
            .finish()
    }
}

/// A realized pick together with the id to commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawn<T> {
    pub id: FeatureId,
    pub value: T,
}

/// Outcome of [`FeatureProvider::pick_or_link_with_element`].
#[derive(Debug, Clone, PartialEq)]
pub enum Pick<T> {
    /// Reused an entry already committed to the weapon.
    Linked(Drawn<T>),
    /// Nothing to link to; drew a fresh entry.
    Fresh(Drawn<T>),
    /// Nothing linked and nothing eligible.
    Fallback(T),
}

impl<T> Pick<T> {
    pub fn id(&self) -> Option<&FeatureId> {
        match self {
            Pick::Linked(d) | Pick::Fresh(d) => Some(&d.id),
            Pick::Fallback(_) => None,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Pick::Linked(d) | Pick::Fresh(d) => d.value,
            Pick::Fallback(v) => v,
        }
    }
}

/// An ordered pool of entries for one catalog category.
pub struct FeatureProvider<T, C: ?Sized> {
    name: String,
    unique: bool,
    elements: Vec<ProviderElement<T, C>>,
}

impl<T, C: ?Sized> FeatureProvider<T, C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unique: false,
            elements: Vec::new(),
        }
    }

    /// Entries already committed to the weapon are never drawn again.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn with(mut self, element: ProviderElement<T, C>) -> Self {
        self.elements.push(element);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn elements(&self) -> &[ProviderElement<T, C>] {
        &self.elements
    }

    pub(crate) fn elements_mut(&mut self) -> &mut Vec<ProviderElement<T, C>> {
        &mut self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ProviderElement<T, C>> {
        self.elements.iter().find(|e| e.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &FeatureId> {
        self.elements.iter().map(|e| &e.id)
    }
}

impl<T, C> FeatureProvider<T, C>
where
    T: Clone,
    C: WeaponState + ?Sized,
{
    /// Entries whose condition passes for `ctx`, in pool order.
    pub fn eligible<'a>(&'a self, ctx: &C) -> Vec<&'a ProviderElement<T, C>> {
        self.elements
            .iter()
            .filter(|e| !(self.unique && ctx.is_committed(e.id.as_str())))
            .filter(|e| e.condition.matches(ctx))
            .collect()
    }

    /// Pick one eligible entry and realize its payload.
    ///
    /// An empty eligible set returns `None` without drawing. Otherwise exactly
    /// one choice draw selects the entry; realizing a deferred payload may
    /// draw further.
    pub fn draw(&self, rng: &mut dyn UniformRng, ctx: &C) -> Option<Drawn<T>> {
        let eligible = self.eligible(ctx);
        let weights: Vec<u32> = eligible.iter().map(|e| e.weight).collect();
        let index = rng::choose_weighted(rng, &weights)?;
        let element = eligible[index];
        tracing::trace!(
            "{}: drew '{}' ({} of {} eligible)",
            self.name,
            element.id,
            index + 1,
            eligible.len()
        );
        Some(Drawn {
            id: element.id.clone(),
            value: element.payload.realize(rng, ctx),
        })
    }

    pub fn draw_required(&self, rng: &mut dyn UniformRng, ctx: &C) -> Result<Drawn<T>, ProviderError> {
        self.draw(rng, ctx).ok_or_else(|| ProviderError::NoEligibleFeature {
            category: self.name.clone(),
        })
    }

    /// Reuse an entry that is already committed to the weapon.
    ///
    /// Once at least `max_group_size` entries of this pool are committed, one
    /// of them is returned: a lone entry without drawing, several via one
    /// choice draw. Below that threshold the choice is still open and `None`
    /// is returned.
    pub fn link_with_element(
        &self,
        rng: &mut dyn UniformRng,
        max_group_size: usize,
        ctx: &C,
    ) -> Option<Drawn<T>> {
        let present: Vec<&ProviderElement<T, C>> = self
            .elements
            .iter()
            .filter(|e| ctx.is_committed(e.id.as_str()))
            .collect();
        if present.is_empty() || present.len() < max_group_size {
            return None;
        }
        let element = if present.len() == 1 {
            present[0]
        } else {
            present[rng::choose_index(rng, present.len())?]
        };
        tracing::trace!("{}: linked to '{}'", self.name, element.id);
        Some(Drawn {
            id: element.id.clone(),
            value: element.payload.realize(rng, ctx),
        })
    }

    /// Link if the group is already decided, else draw fresh, else fall back.
    pub fn pick_or_link_with_element(
        &self,
        rng: &mut dyn UniformRng,
        max_group_size: usize,
        ctx: &C,
        fallback: T,
    ) -> Pick<T> {
        if let Some(linked) = self.link_with_element(rng, max_group_size, ctx) {
            return Pick::Linked(linked);
        }
        match self.draw(rng, ctx) {
            Some(fresh) => Pick::Fresh(fresh),
            None => Pick::Fallback(fallback),
        }
    }
}

impl<T: Clone, C: ?Sized> Clone for FeatureProvider<T, C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            unique: self.unique,
            elements: self.elements.clone(),
        }
    }
}

impl<T: fmt::Debug, C: ?Sized> fmt::Debug for FeatureProvider<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureProvider")
            .field("name", &self.name)
            .field("unique", &self.unique)
            .field("elements", &self.elements)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{CountingRng, ScriptedRng};
    use crate::schema::feature::ids;
    use crate::schema::rarity::Rarity;
    use crate::schema::theme::Theme;
    use crate::schema::weapon::Weapon;

    fn colours() -> FeatureProvider<&'static str, Weapon> {
        FeatureProvider::new("colours")
            .with(ProviderElement::new("red", "red"))
            .with(ProviderElement::new("blue", "blue").when(Condition::always().themes_any([Theme::Ice])))
            .with(ProviderElement::new("green", "green"))
            .with(ProviderElement::new("gold", "gold").when(Condition::never()))
    }

    fn plain() -> Weapon {
        Weapon::new("t", 0, Rarity::Common, 0.0)
    }

    #[test]
    fn draw_filters_by_condition() {
        let pool = colours();
        let w = plain();
        let eligible: Vec<&str> = pool.eligible(&w).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(eligible, vec!["red", "green"]);

        let icy = plain().with_themes([Theme::Ice]);
        let eligible: Vec<&str> = pool.eligible(&icy).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(eligible, vec!["red", "blue", "green"]);
    }

    #[test]
    fn draw_consumes_one_value() {
        let pool = colours();
        let w = plain();
        let mut rng = CountingRng::new(ScriptedRng::new(vec![0.6]));
        let drawn = pool.draw(&mut rng, &w).unwrap();
        assert_eq!(drawn.id.as_str(), "green");
        assert_eq!(drawn.value, "green");
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn empty_pool_does_not_draw() {
        let pool: FeatureProvider<&str, Weapon> = FeatureProvider::new("nothing")
            .with(ProviderElement::new("x", "x").when(Condition::never()));
        let mut rng = CountingRng::new(ScriptedRng::new(vec![0.5]));
        assert!(pool.draw(&mut rng, &plain()).is_none());
        assert_eq!(rng.draws(), 0);
        assert_eq!(
            pool.draw_required(&mut rng, &plain()),
            Err(ProviderError::NoEligibleFeature {
                category: "nothing".to_string()
            })
        );
    }

    #[test]
    fn never_entries_are_never_drawn() {
        let pool = colours();
        let w = plain();
        let mut rng = ScriptedRng::new((0..50).map(|i| i as f64 / 50.0).collect());
        for _ in 0..50 {
            assert_ne!(pool.draw(&mut rng, &w).unwrap().id.as_str(), "gold");
        }
    }

    #[test]
    fn unique_pools_skip_committed_ids() {
        let pool = colours().unique();
        let w = plain().with_feature("red");
        let mut rng = ScriptedRng::new(vec![0.0]);
        assert_eq!(pool.draw(&mut rng, &w).unwrap().id.as_str(), "green");

        let shared = colours();
        let mut rng = ScriptedRng::new(vec![0.0]);
        assert_eq!(shared.draw(&mut rng, &w).unwrap().id.as_str(), "red");
    }

    #[test]
    fn unselected_payloads_are_not_realized() {
        let pool: FeatureProvider<usize, Weapon> = FeatureProvider::new("numbers")
            .with(ProviderElement::new("fixed", 7))
            .with(ProviderElement::deferred("rolled", |rng, _| {
                rng::choose_index(rng, 100).unwrap_or(0)
            }));
        let w = plain();

        let mut rng = CountingRng::new(ScriptedRng::new(vec![0.1, 0.42]));
        assert_eq!(pool.draw(&mut rng, &w).unwrap().value, 7);
        assert_eq!(rng.draws(), 1);

        let mut rng = CountingRng::new(ScriptedRng::new(vec![0.9, 0.42]));
        assert_eq!(pool.draw(&mut rng, &w).unwrap().value, 42);
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn weights_bias_the_single_draw() {
        let pool: FeatureProvider<&str, Weapon> = FeatureProvider::new("weighted")
            .with(ProviderElement::new("common", "common").weight(3))
            .with(ProviderElement::new("rare", "rare"));
        let w = plain();
        let mut rng = CountingRng::new(ScriptedRng::new(vec![0.7, 0.8]));
        assert_eq!(pool.draw(&mut rng, &w).unwrap().id.as_str(), "common");
        assert_eq!(pool.draw(&mut rng, &w).unwrap().id.as_str(), "rare");
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn link_is_open_until_group_is_full() {
        let pool = colours();
        let mut rng = CountingRng::new(ScriptedRng::new(vec![0.5]));
        assert!(pool.link_with_element(&mut rng, 1, &plain()).is_none());

        let one = plain().with_feature("green");
        let linked = pool.link_with_element(&mut rng, 1, &one).unwrap();
        assert_eq!(linked.id.as_str(), "green");
        assert!(pool.link_with_element(&mut rng, 2, &one).is_none());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn link_ties_use_one_draw() {
        let pool = colours();
        let two = plain().with_feature("red").with_feature("green");
        let mut rng = CountingRng::new(ScriptedRng::new(vec![0.75]));
        let linked = pool.link_with_element(&mut rng, 2, &two).unwrap();
        assert_eq!(linked.id.as_str(), "green");
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn link_sees_never_entries() {
        let pool = colours();
        let w = plain().with_feature("gold");
        let mut rng = ScriptedRng::new(vec![]);
        assert_eq!(pool.link_with_element(&mut rng, 1, &w).unwrap().value, "gold");
    }

    #[test]
    fn pick_or_link_branches() {
        let pool = colours();
        let mut rng = ScriptedRng::new(vec![0.0]);

        let linked = pool.pick_or_link_with_element(&mut rng, 1, &plain().with_feature("green"), "none");
        assert!(matches!(linked, Pick::Linked(ref d) if d.value == "green"));
        assert_eq!(rng.consumed(), 0);

        let fresh = pool.pick_or_link_with_element(&mut rng, 1, &plain(), "none");
        assert_eq!(fresh.id().map(FeatureId::as_str), Some("red"));
        assert_eq!(rng.consumed(), 1);

        let empty: FeatureProvider<&str, Weapon> = FeatureProvider::new("empty");
        let fallback = empty.pick_or_link_with_element(&mut rng, 1, &plain(), "none");
        assert_eq!(fallback, Pick::Fallback("none"));
        assert_eq!(fallback.into_value(), "none");
        assert_eq!(rng.consumed(), 1);
    }

    #[test]
    fn exclusive_conditions() {
        let pool: FeatureProvider<&str, Weapon> = FeatureProvider::new("powers")
            .unique()
            .with(ProviderElement::new("fireball", "fireball").when(Condition::always().ids_none(ids(["frostbolt"]))))
            .with(ProviderElement::new("frostbolt", "frostbolt").when(Condition::always().ids_none(ids(["fireball"]))))
            .with(ProviderElement::new("shove", "shove"));
        let w = plain().with_feature("fireball");
        let eligible: Vec<&str> = pool.eligible(&w).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(eligible, vec!["shove"]);
    }
}
