//! Owner token policy for dynamic field names.

use serde::{Deserialize, Serialize};

/// How an owner string becomes the token embedded in a dynamic field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerPolicy {
    /// Use the owner verbatim.
    #[default]
    Raw,
    /// Lowercase, and replace every character outside `[a-z0-9]` with `-`.
    ///
    /// Distinct display names may collapse to one token ("Ann Lee" and
    /// "ann.lee"); the registry reports such collisions.
    Normalized,
}

impl OwnerPolicy {
    /// Derive the owner token for `owner`.
    pub fn token(&self, owner: &str) -> String {
        match self {
            Self::Raw => owner.to_string(),
            Self::Normalized => normalize_owner(owner),
        }
    }
}

/// Lowercase an owner name and map characters outside `[a-z0-9]` to `-`.
pub fn normalize_owner(owner: &str) -> String {
    owner
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '-' })
        .collect()
}
