/// Forge configuration — rarity odds and per-tier budgets, loadable from RON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::rarity::Rarity;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Ascending percentile thresholds. The tier is the highest one the rarity
/// roll meets; below `uncommon` the weapon is common.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityOdds {
    pub uncommon: f64,
    pub rare: f64,
    pub epic: f64,
    pub legendary: f64,
}

impl Default for RarityOdds {
    fn default() -> Self {
        Self {
            uncommon: 0.70,
            rare: 0.85,
            epic: 0.95,
            legendary: 0.99,
        }
    }
}

impl RarityOdds {
    /// Lower bound of `rarity`'s band.
    pub fn threshold(&self, rarity: Rarity) -> f64 {
        match rarity {
            Rarity::Common => 0.0,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Epic => self.epic,
            Rarity::Legendary => self.legendary,
        }
    }

    pub fn tier_for(&self, n: f64) -> Rarity {
        Rarity::ALL
            .into_iter()
            .rev()
            .find(|r| n >= self.threshold(*r))
            .unwrap_or(Rarity::Common)
    }
}

/// What one rarity tier is entitled to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierBudget {
    /// Charged active powers. At-will actives come on top.
    pub actives: u32,
    /// Passive powers plus extra languages.
    pub passives: u32,
    /// Baseline for max charges.
    pub charges: u32,
    /// Chance of a second theme.
    pub extra_theme: f64,
    /// Chance, per part, of an embellishment.
    pub embellish: f64,
    /// Chance of sentience.
    pub sentience: f64,
}

impl TierBudget {
    fn validate(&self, tier: Rarity) -> Result<(), ConfigError> {
        for (name, chance) in [
            ("extra_theme", self.extra_theme),
            ("embellish", self.embellish),
            ("sentience", self.sentience),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::Invalid(format!(
                    "{} {} chance {} is outside [0, 1]",
                    tier, name, chance
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Budgets {
    pub common: TierBudget,
    pub uncommon: TierBudget,
    pub rare: TierBudget,
    pub epic: TierBudget,
    pub legendary: TierBudget,
}

impl Default for Budgets {
    fn default() -> Self {
        let tier = |actives, passives, charges, extra_theme, embellish, sentience| TierBudget {
            actives,
            passives,
            charges,
            extra_theme,
            embellish,
            sentience,
        };
        Self {
            common: tier(0, 1, 0, 0.25, 0.2, 0.0),
            uncommon: tier(1, 1, 2, 0.35, 0.35, 0.0),
            rare: tier(1, 2, 3, 0.5, 0.5, 0.0),
            epic: tier(2, 2, 4, 0.6, 0.65, 0.5),
            legendary: tier(3, 3, 5, 0.75, 0.8, 1.0),
        }
    }
}

impl Budgets {
    pub fn for_rarity(&self, rarity: Rarity) -> &TierBudget {
        match rarity {
            Rarity::Common => &self.common,
            Rarity::Uncommon => &self.uncommon,
            Rarity::Rare => &self.rare,
            Rarity::Epic => &self.epic,
            Rarity::Legendary => &self.legendary,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    pub odds: RarityOdds,
    pub budgets: Budgets,
}

impl ForgeConfig {
    /// Load and validate a config from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<ForgeConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse and validate a config from a RON string. Missing fields keep
    /// their defaults.
    pub fn parse_ron(input: &str) -> Result<ForgeConfig, ConfigError> {
        let config: ForgeConfig = ron::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = [
            self.odds.uncommon,
            self.odds.rare,
            self.odds.epic,
            self.odds.legendary,
        ];
        if thresholds.iter().any(|t| !(*t > 0.0 && *t <= 1.0)) {
            return Err(ConfigError::Invalid(format!(
                "rarity odds must lie in (0, 1], got {:?}",
                thresholds
            )));
        }
        if thresholds.windows(2).any(|w| w[0] > w[1]) {
            return Err(ConfigError::Invalid(format!(
                "rarity odds must be ascending, got {:?}",
                thresholds
            )));
        }
        for rarity in Rarity::ALL {
            self.budgets.for_rarity(rarity).validate(rarity)?;
        }
        Ok(())
    }

    pub fn budget(&self, rarity: Rarity) -> &TierBudget {
        self.budgets.for_rarity(rarity)
    }
}
