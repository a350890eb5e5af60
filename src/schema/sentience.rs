use serde::{Deserialize, Serialize};

/// Pronoun set a weapon is referred to by. Non-sentient weapons are `ItIts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Pronouns {
    /// she/her/her
    SheHer,
    /// he/him/his
    HeHim,
    /// they/them/their
    TheyThem,
    /// it/it/its
    #[default]
    ItIts,
}

impl Pronouns {
    pub const ALL: [Pronouns; 4] = [
        Pronouns::SheHer,
        Pronouns::HeHim,
        Pronouns::TheyThem,
        Pronouns::ItIts,
    ];

    /// Nominative/subject form: "she", "he", "they", "it".
    pub fn subject(&self) -> &'static str {
        match self {
            Self::SheHer => "she",
            Self::HeHim => "he",
            Self::TheyThem => "they",
            Self::ItIts => "it",
        }
    }

    /// Possessive determiner: "her", "his", "their", "its".
    pub fn possessive(&self) -> &'static str {
        match self {
            Self::SheHer => "her",
            Self::HeHim => "his",
            Self::TheyThem => "their",
            Self::ItIts => "its",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SheHer => "she/her",
            Self::HeHim => "he/him",
            Self::TheyThem => "they/them",
            Self::ItIts => "it/its",
        }
    }
}

/// The mind inhabiting a sentient weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentience {
    pub pronouns: Pronouns,
    pub personality: Vec<String>,
    /// Languages spoken beyond Common; each one takes a passive power slot.
    pub languages: Vec<String>,
}

impl Sentience {
    /// One-line summary, e.g. "Sentient (she/her). Proud, curious. Speaks Common and Elvish."
    pub fn summary(&self) -> String {
        let mut spoken = vec!["Common".to_string()];
        spoken.extend(self.languages.iter().cloned());
        let speaks = match spoken.len() {
            1 => spoken[0].clone(),
            n => format!("{} and {}", spoken[..n - 1].join(", "), spoken[n - 1]),
        };
        let mut out = format!("Sentient ({}).", self.pronouns.label());
        if !self.personality.is_empty() {
            out.push_str(&format!(" {}.", capitalize(&self.personality.join(", "))));
        }
        out.push_str(&format!(" {} speaks {}.", capitalize(self.pronouns.subject()), speaks));
        out
    }
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
