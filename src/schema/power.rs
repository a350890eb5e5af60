use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

use super::feature::{Attaching, FeatureId};
use crate::core::version::{Field, Patchable};

/// Damage dice plus a flat modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Damage {
    #[serde(default)]
    pub d4: u32,
    #[serde(default)]
    pub d6: u32,
    #[serde(default)]
    pub d8: u32,
    #[serde(default)]
    pub d10: u32,
    #[serde(default)]
    pub d12: u32,
    #[serde(default)]
    pub d20: u32,
    #[serde(default)]
    pub flat: i32,
}

impl Damage {
    /// `count` dice with `sides` faces. Unsupported die sizes become a flat bonus.
    pub fn dice(count: u32, sides: u32) -> Self {
        let mut d = Damage::default();
        match sides {
            4 => d.d4 = count,
            6 => d.d6 = count,
            8 => d.d8 = count,
            10 => d.d10 = count,
            12 => d.d12 = count,
            20 => d.d20 = count,
            other => d.flat = (count * other) as i32,
        }
        d
    }

    pub fn flat(amount: i32) -> Self {
        Damage {
            flat: amount,
            ..Damage::default()
        }
    }

    pub fn is_nonzero(&self) -> bool {
        self.d4 + self.d6 + self.d8 + self.d10 + self.d12 + self.d20 > 0 || self.flat != 0
    }
}

impl Add for Damage {
    type Output = Damage;

    fn add(self, rhs: Damage) -> Damage {
        Damage {
            d4: self.d4 + rhs.d4,
            d6: self.d6 + rhs.d6,
            d8: self.d8 + rhs.d8,
            d10: self.d10 + rhs.d10,
            d12: self.d12 + rhs.d12,
            d20: self.d20 + rhs.d20,
            flat: self.flat + rhs.flat,
        }
    }
}

impl fmt::Display for Damage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dice = [
            (self.d20, 20),
            (self.d12, 12),
            (self.d10, 10),
            (self.d8, 8),
            (self.d6, 6),
            (self.d4, 4),
        ];
        let mut terms: Vec<String> = dice
            .iter()
            .filter(|(count, _)| *count > 0)
            .map(|(count, sides)| format!("{}d{}", count, sides))
            .collect();
        if self.flat != 0 || terms.is_empty() {
            terms.push(self.flat.to_string());
        }
        f.write_str(&terms.join(" + "))
    }
}

/// What an active power costs to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cost {
    AtWill,
    Charges(u32),
}

impl Default for Cost {
    fn default() -> Self {
        Cost::Charges(1)
    }
}

impl Cost {
    /// Charge cost, or `None` for unlimited-use powers.
    pub fn charges(&self) -> Option<u32> {
        match self {
            Cost::AtWill => None,
            Cost::Charges(n) => Some(*n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePower {
    pub desc: String,
    pub cost: Cost,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attach: Vec<FeatureId>,
}

impl ActivePower {
    pub fn new(desc: impl Into<String>, cost: Cost) -> Self {
        Self {
            desc: desc.into(),
            cost,
            notes: Vec::new(),
            attach: Vec::new(),
        }
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn attaching(mut self, id: impl Into<FeatureId>) -> Self {
        self.attach.push(id.into());
        self
    }
}

impl Attaching for ActivePower {
    fn attachments(&self) -> &[FeatureId] {
        &self.attach
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivePowerPatch {
    #[serde(default)]
    pub desc: Field<String>,
    #[serde(default)]
    pub cost: Field<Cost>,
    #[serde(default)]
    pub notes: Field<Vec<String>>,
}

impl Patchable for ActivePower {
    type Patch = ActivePowerPatch;

    fn patch(&mut self, patch: &ActivePowerPatch) {
        patch.desc.apply(&mut self.desc);
        patch.cost.apply(&mut self.cost);
        patch.notes.apply(&mut self.notes);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassivePower {
    pub desc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_bonus: Option<Damage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attach: Vec<FeatureId>,
}

impl PassivePower {
    pub fn new(desc: impl Into<String>) -> Self {
        Self {
            desc: desc.into(),
            damage_bonus: None,
            attach: Vec::new(),
        }
    }

    pub fn with_damage(mut self, bonus: Damage) -> Self {
        self.damage_bonus = Some(bonus);
        self
    }

    pub fn attaching(mut self, id: impl Into<FeatureId>) -> Self {
        self.attach.push(id.into());
        self
    }
}

impl Attaching for PassivePower {
    fn attachments(&self) -> &[FeatureId] {
        &self.attach
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassivePowerPatch {
    #[serde(default)]
    pub desc: Field<String>,
    #[serde(default)]
    pub damage_bonus: Field<Damage>,
}

impl Patchable for PassivePower {
    type Patch = PassivePowerPatch;

    fn patch(&mut self, patch: &PassivePowerPatch) {
        patch.desc.apply(&mut self.desc);
        patch.damage_bonus.apply_opt(&mut self.damage_bonus);
    }
}
