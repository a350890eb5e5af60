/// Eligibility conditions — pure predicates over an in-progress weapon.
///
/// A condition has three independent axes (rarity, themes, committed ids).
/// A missing axis places no constraint; present axes must all pass.

use serde::{Deserialize, Serialize};

use crate::schema::feature::FeatureId;
use crate::schema::rarity::Rarity;
use crate::schema::theme::Theme;

/// The parts of a weapon's state that conditions may inspect.
pub trait WeaponState {
    fn rarity(&self) -> Rarity;
    fn themes(&self) -> &[Theme];
    fn is_committed(&self, id: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RarityCmp {
    Eq(Rarity),
    Lte(Rarity),
    Gte(Rarity),
}

impl RarityCmp {
    pub fn accepts(&self, rarity: Rarity) -> bool {
        match *self {
            RarityCmp::Eq(r) => rarity == r,
            RarityCmp::Lte(r) => rarity <= r,
            RarityCmp::Gte(r) => rarity >= r,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeCond {
    /// At least one of the weapon's themes is listed.
    Any(Vec<Theme>),
    /// None of the weapon's themes is listed.
    None(Vec<Theme>),
}

impl ThemeCond {
    pub fn accepts(&self, themes: &[Theme]) -> bool {
        match self {
            ThemeCond::Any(wanted) => themes.iter().any(|t| wanted.contains(t)),
            ThemeCond::None(banned) => !themes.iter().any(|t| banned.contains(t)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdCond {
    /// At least one listed id is committed.
    Any(Vec<FeatureId>),
    /// No listed id is committed.
    None(Vec<FeatureId>),
    /// Never eligible for a normal draw; the feature can only be force-attached.
    Never,
}

impl IdCond {
    pub fn accepts<S: WeaponState + ?Sized>(&self, state: &S) -> bool {
        match self {
            IdCond::Any(ids) => ids.iter().any(|id| state.is_committed(id.as_str())),
            IdCond::None(ids) => !ids.iter().any(|id| state.is_committed(id.as_str())),
            IdCond::Never => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<RarityCmp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub themes: Option<ThemeCond>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<IdCond>,
}

impl Condition {
    /// No constraint on any axis.
    pub fn always() -> Self {
        Self::default()
    }

    pub fn never() -> Self {
        Self {
            ids: Some(IdCond::Never),
            ..Self::default()
        }
    }

    pub fn rarity_eq(mut self, r: Rarity) -> Self {
        self.rarity = Some(RarityCmp::Eq(r));
        self
    }

    pub fn rarity_lte(mut self, r: Rarity) -> Self {
        self.rarity = Some(RarityCmp::Lte(r));
        self
    }

    pub fn rarity_gte(mut self, r: Rarity) -> Self {
        self.rarity = Some(RarityCmp::Gte(r));
        self
    }

    pub fn themes_any(mut self, themes: impl IntoIterator<Item = Theme>) -> Self {
        self.themes = Some(ThemeCond::Any(themes.into_iter().collect()));
        self
    }

    pub fn themes_none(mut self, themes: impl IntoIterator<Item = Theme>) -> Self {
        self.themes = Some(ThemeCond::None(themes.into_iter().collect()));
        self
    }

    pub fn ids_any(mut self, ids: Vec<FeatureId>) -> Self {
        self.ids = Some(IdCond::Any(ids));
        self
    }

    pub fn ids_none(mut self, ids: Vec<FeatureId>) -> Self {
        self.ids = Some(IdCond::None(ids));
        self
    }

    pub fn is_never(&self) -> bool {
        matches!(self.ids, Some(IdCond::Never))
    }

    pub fn matches<S: WeaponState + ?Sized>(&self, state: &S) -> bool {
        if let Some(cmp) = &self.rarity {
            if !cmp.accepts(state.rarity()) {
                return false;
            }
        }
        if let Some(themes) = &self.themes {
            if !themes.accepts(state.themes()) {
                return false;
            }
        }
        if let Some(ids) = &self.ids {
            if !ids.accepts(state) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::feature::ids;
    use crate::schema::weapon::Weapon;

    fn weapon(rarity: Rarity, themes: &[Theme], features: &[&str]) -> Weapon {
        let mut w = Weapon::new("t", 0, rarity, 0.5).with_themes(themes.iter().copied());
        for f in features {
            w.commit(FeatureId::from(*f));
        }
        w
    }

    #[test]
    fn empty_condition_always_matches() {
        let w = weapon(Rarity::Common, &[], &[]);
        assert!(Condition::always().matches(&w));
    }

    #[test]
    fn rarity_comparators() {
        let rare = weapon(Rarity::Rare, &[], &[]);
        assert!(Condition::always().rarity_eq(Rarity::Rare).matches(&rare));
        assert!(!Condition::always().rarity_eq(Rarity::Epic).matches(&rare));
        assert!(Condition::always().rarity_lte(Rarity::Rare).matches(&rare));
        assert!(Condition::always().rarity_lte(Rarity::Legendary).matches(&rare));
        assert!(!Condition::always().rarity_lte(Rarity::Uncommon).matches(&rare));
        assert!(Condition::always().rarity_gte(Rarity::Common).matches(&rare));
        assert!(!Condition::always().rarity_gte(Rarity::Epic).matches(&rare));
    }

    #[test]
    fn theme_any_and_none() {
        let w = weapon(Rarity::Common, &[Theme::Fire, Theme::Wizard], &[]);
        assert!(Condition::always().themes_any([Theme::Ice, Theme::Fire]).matches(&w));
        assert!(!Condition::always().themes_any([Theme::Ice]).matches(&w));
        assert!(Condition::always().themes_none([Theme::Ice]).matches(&w));
        assert!(!Condition::always().themes_none([Theme::Wizard]).matches(&w));

        let plain = weapon(Rarity::Common, &[], &[]);
        assert!(!Condition::always().themes_any([Theme::Ice]).matches(&plain));
        assert!(Condition::always().themes_none([Theme::Ice]).matches(&plain));
    }

    #[test]
    fn id_axis() {
        let w = weapon(Rarity::Common, &[], &["core.frost"]);
        assert!(Condition::always().ids_any(ids(["core.frost", "x"])).matches(&w));
        assert!(!Condition::always().ids_any(ids(["x"])).matches(&w));
        assert!(Condition::always().ids_none(ids(["x"])).matches(&w));
        assert!(!Condition::always().ids_none(ids(["core.frost"])).matches(&w));
        assert!(!Condition::never().matches(&w));
        assert!(Condition::never().is_never());
    }

    #[test]
    fn all_axes_must_pass() {
        let w = weapon(Rarity::Epic, &[Theme::Ice], &["sentient"]);
        let cond = Condition::always()
            .rarity_gte(Rarity::Rare)
            .themes_any([Theme::Ice])
            .ids_any(ids(["sentient"]));
        assert!(cond.matches(&w));

        let wrong_theme = weapon(Rarity::Epic, &[Theme::Fire], &["sentient"]);
        assert!(!cond.matches(&wrong_theme));
        let too_common = weapon(Rarity::Uncommon, &[Theme::Ice], &["sentient"]);
        assert!(!cond.matches(&too_common));
    }

    #[test]
    fn ron_shape() {
        let cond: Condition =
            ron::from_str(r#"(rarity: Some(gte(rare)), themes: Some(any([fire, ice])))"#).unwrap();
        assert_eq!(
            cond,
            Condition::always()
                .rarity_gte(Rarity::Rare)
                .themes_any([Theme::Fire, Theme::Ice])
        );
    }
}
