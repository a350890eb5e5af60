use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::feature::{Attaching, FeatureId};
use super::power::{ActivePower, Damage, PassivePower};
use super::rarity::Rarity;
use super::sentience::{Pronouns, Sentience};
use super::theme::Theme;
use crate::core::condition::WeaponState;
use crate::core::describe::{describe, DescribeError};
use crate::core::version::{Field, Patchable};

/// Whether a descriptor reads "has ..." or "is ...".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorKind {
    Possession,
    Property,
}

/// A fragment of prose attached to one part of the weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    pub text: String,
    pub kind: DescriptorKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attach: Vec<FeatureId>,
}

impl Descriptor {
    /// "has {text}"
    pub fn possession(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: DescriptorKind::Possession,
            attach: Vec::new(),
        }
    }

    /// "is {text}"
    pub fn property(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: DescriptorKind::Property,
            attach: Vec::new(),
        }
    }

    pub fn attaching(mut self, id: impl Into<FeatureId>) -> Self {
        self.attach.push(id.into());
        self
    }
}

impl Attaching for Descriptor {
    fn attachments(&self) -> &[FeatureId] {
        &self.attach
    }
}

impl Patchable for Descriptor {
    type Patch = Descriptor;

    fn patch(&mut self, patch: &Descriptor) {
        *self = patch.clone();
    }
}

/// Which material pool a part draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialClass {
    /// Blades, heads, shafts.
    Hard,
    /// Grips, wraps, straps.
    Grip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSlot {
    pub name: String,
    pub plural: bool,
    pub class: MaterialClass,
}

impl PartSlot {
    pub fn hard(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plural: false,
            class: MaterialClass::Hard,
        }
    }

    pub fn grip(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plural: false,
            class: MaterialClass::Grip,
        }
    }

    pub fn plural(mut self) -> Self {
        self.plural = true;
        self
    }
}

/// The overall form of the weapon: its parts and base damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub name: String,
    pub parts: Vec<PartSlot>,
    pub damage: Damage,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapePatch {
    #[serde(default)]
    pub name: Field<String>,
    #[serde(default)]
    pub parts: Field<Vec<PartSlot>>,
    #[serde(default)]
    pub damage: Field<Damage>,
}

impl Patchable for Shape {
    type Patch = ShapePatch;

    fn patch(&mut self, patch: &ShapePatch) {
        patch.name.apply(&mut self.name);
        patch.parts.apply(&mut self.parts);
        patch.damage.apply(&mut self.damage);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    #[serde(default)]
    pub descriptors: Vec<Descriptor>,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptors: Vec::new(),
        }
    }

    pub fn with(mut self, descriptor: Descriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialPatch {
    #[serde(default)]
    pub name: Field<String>,
    #[serde(default)]
    pub descriptors: Field<Vec<Descriptor>>,
}

impl Patchable for Material {
    type Patch = MaterialPatch;

    fn patch(&mut self, patch: &MaterialPatch) {
        patch.name.apply(&mut self.name);
        patch.descriptors.apply(&mut self.descriptors);
    }
}

/// The power source shared by every part that mentions "the core".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyCore {
    pub name: String,
    pub colour: String,
}

impl Patchable for EnergyCore {
    type Patch = EnergyCore;

    fn patch(&mut self, patch: &EnergyCore) {
        *self = patch.clone();
    }
}

/// Structured description of one part, consumed by the formatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDescription {
    pub part: String,
    pub plural: bool,
    pub material: String,
    pub descriptors: Vec<Descriptor>,
}

/// The in-progress weapon record.
///
/// Created empty for one build and filled in by the assembly pipeline in a
/// single pass. The committed feature-id set is the only state conditions
/// and linking look at besides rarity and themes.
#[derive(Debug, Clone)]
pub struct Weapon {
    pub id: String,
    pub version: usize,
    pub rarity: Rarity,
    pub rarity_roll: f64,
    pub themes: Vec<Theme>,
    pub shape: Option<Shape>,
    pub sentience: Option<Sentience>,
    /// Per-part descriptors; `None` until every part has been assembled.
    pub description: Option<Vec<PartDescription>>,
    pub active_powers: Vec<ActivePower>,
    pub passive_powers: Vec<PassivePower>,
    pub max_charges: u32,
    pub recharge: Option<String>,
    features: Vec<FeatureId>,
    feature_set: FxHashSet<FeatureId>,
}

impl Weapon {
    pub fn new(id: impl Into<String>, version: usize, rarity: Rarity, rarity_roll: f64) -> Self {
        Self {
            id: id.into(),
            version,
            rarity,
            rarity_roll,
            themes: Vec::new(),
            shape: None,
            sentience: None,
            description: None,
            active_powers: Vec::new(),
            passive_powers: Vec::new(),
            max_charges: 0,
            recharge: None,
            features: Vec::new(),
            feature_set: FxHashSet::default(),
        }
    }

    pub fn with_themes(mut self, themes: impl IntoIterator<Item = Theme>) -> Self {
        self.themes.extend(themes);
        self
    }

    pub fn with_feature(mut self, id: impl Into<FeatureId>) -> Self {
        self.commit(id.into());
        self
    }

    /// Record a feature id. Returns false if it was already committed.
    pub fn commit(&mut self, id: FeatureId) -> bool {
        if self.feature_set.contains(&id) {
            return false;
        }
        self.feature_set.insert(id.clone());
        self.features.push(id);
        true
    }

    pub fn has_feature(&self, id: &str) -> bool {
        self.feature_set.contains(id)
    }

    /// Committed ids in commit order.
    pub fn features(&self) -> &[FeatureId] {
        &self.features
    }

    pub fn pronouns(&self) -> Pronouns {
        self.sentience
            .as_ref()
            .map(|s| s.pronouns)
            .unwrap_or_default()
    }

    /// Extra languages spoken by a sentient weapon.
    pub fn language_count(&self) -> usize {
        self.sentience.as_ref().map_or(0, |s| s.languages.len())
    }

    /// Base damage of the shape plus every passive bonus.
    pub fn damage(&self) -> Damage {
        let base = self
            .shape
            .as_ref()
            .map(|s| s.damage)
            .unwrap_or_default();
        self.passive_powers
            .iter()
            .filter_map(|p| p.damage_bonus)
            .fold(base, |acc, bonus| acc + bonus)
    }

    /// Freeze into the read-only view model, rendering the prose description.
    pub fn freeze(self) -> Result<WeaponView, DescribeError> {
        let description = describe(&self)?;
        let damage = self.damage();
        let shape = self.shape.ok_or(DescribeError::IncompleteWeapon)?;
        Ok(WeaponView {
            id: self.id,
            version: self.version,
            rarity: self.rarity,
            rarity_roll: self.rarity_roll,
            themes: self.themes,
            shape: shape.name,
            damage,
            active_powers: self.active_powers,
            passive_powers: self.passive_powers,
            max_charges: self.max_charges,
            recharge: self.recharge,
            sentience: self.sentience,
            description,
            features: self.features,
        })
    }
}

impl WeaponState for Weapon {
    fn rarity(&self) -> Rarity {
        self.rarity
    }

    fn themes(&self) -> &[Theme] {
        &self.themes
    }

    fn is_committed(&self, id: &str) -> bool {
        self.has_feature(id)
    }
}

/// The finished weapon as handed to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponView {
    pub id: String,
    pub version: usize,
    pub rarity: Rarity,
    /// The rarity position `n` drawn for this id, in `[0, 1)`.
    pub rarity_roll: f64,
    pub themes: Vec<Theme>,
    pub shape: String,
    pub damage: Damage,
    pub active_powers: Vec<ActivePower>,
    pub passive_powers: Vec<PassivePower>,
    pub max_charges: u32,
    pub recharge: Option<String>,
    pub sentience: Option<Sentience>,
    pub description: String,
    pub features: Vec<FeatureId>,
}
