/// Description formatter — per-part descriptors to English prose.

use thiserror::Error;

use crate::schema::sentience::{capitalize, Pronouns};
use crate::schema::weapon::{DescriptorKind, PartDescription, Weapon};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DescribeError {
    #[error("weapon description was never assembled")]
    IncompleteWeapon,
}

/// Render a weapon's part descriptors.
pub fn describe(weapon: &Weapon) -> Result<String, DescribeError> {
    let parts = weapon
        .description
        .as_ref()
        .ok_or(DescribeError::IncompleteWeapon)?;
    Ok(describe_parts(parts, weapon.pronouns()))
}

/// One part rendered as a lowercase clause.
struct Clause {
    text: String,
    /// The clause already contains its own "and".
    internal_and: bool,
}

/// "a", "a and b", "a, b, and c".
pub fn join_and(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [a, b] => format!("{} and {}", a, b),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}

fn clause(part: &PartDescription, possessive: &str) -> Clause {
    let (be, have) = if part.plural { ("are", "have") } else { ("is", "has") };

    let mut segments = vec![format!("{} made of {}", be, part.material)];
    let mut possessions: Vec<String> = Vec::new();
    let mut long_run = false;

    let mut flush = |possessions: &mut Vec<String>, segments: &mut Vec<String>| {
        if possessions.is_empty() {
            return;
        }
        long_run |= possessions.len() > 1;
        segments.push(format!("{} {}", have, join_and(possessions)));
        possessions.clear();
    };

    for descriptor in &part.descriptors {
        match descriptor.kind {
            DescriptorKind::Possession => possessions.push(descriptor.text.clone()),
            DescriptorKind::Property => {
                flush(&mut possessions, &mut segments);
                segments.push(format!("{} {}", be, descriptor.text));
            }
        }
    }
    flush(&mut possessions, &mut segments);

    Clause {
        internal_and: long_run || segments.len() > 1,
        text: format!("{} {} {}", possessive, part.part, join_and(&segments)),
    }
}

/// Render parts with the given pronoun set.
///
/// Adjacent clauses pair up into one sentence joined by ", and" when neither
/// already contains an "and"; anything else stands as its own sentence.
pub fn describe_parts(parts: &[PartDescription], pronouns: Pronouns) -> String {
    let clauses: Vec<Clause> = parts
        .iter()
        .map(|p| clause(p, pronouns.possessive()))
        .collect();

    let mut sentences = Vec::new();
    let mut i = 0;
    while i < clauses.len() {
        let current = &clauses[i];
        match clauses.get(i + 1) {
            Some(next) if !current.internal_and && !next.internal_and => {
                sentences.push(format!("{}, and {}.", capitalize(&current.text), next.text));
                i += 2;
            }
            _ => {
                sentences.push(format!("{}.", capitalize(&current.text)));
                i += 1;
            }
        }
    }
    sentences.join(" ")
}
