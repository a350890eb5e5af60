use serde::{Deserialize, Serialize};
use std::fmt;

/// The five ordered rarity tiers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// All tiers, lowest first.
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }

    pub fn parse(s: &str) -> Option<Rarity> {
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_totally_ordered() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Uncommon < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Epic);
        assert!(Rarity::Epic < Rarity::Legendary);
        let mut sorted = Rarity::ALL;
        sorted.sort();
        assert_eq!(sorted, Rarity::ALL);
    }

    #[test]
    fn parse_names() {
        assert_eq!(Rarity::parse("epic"), Some(Rarity::Epic));
        assert_eq!(Rarity::parse(" Legendary "), Some(Rarity::Legendary));
        assert_eq!(Rarity::parse("mythic"), None);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let s = serde_json::to_string(&Rarity::Uncommon).unwrap();
        assert_eq!(s, "\"uncommon\"");
    }
}
