use serde::{Deserialize, Serialize};
use std::fmt;

/// A thematic tag steering which catalog entries are eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Fire,
    Steampunk,
    Ice,
    Nature,
    Wizard,
    Dark,
    Cloud,
    Sweet,
    Earth,
    Light,
}

impl Theme {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::Steampunk => "steampunk",
            Self::Ice => "ice",
            Self::Nature => "nature",
            Self::Wizard => "wizard",
            Self::Dark => "dark",
            Self::Cloud => "cloud",
            Self::Sweet => "sweet",
            Self::Earth => "earth",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl crate::core::version::Patchable for Theme {
    type Patch = Theme;

    fn patch(&mut self, patch: &Theme) {
        *self = *patch;
    }
}
