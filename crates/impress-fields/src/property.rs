//! Behavioral tags attached to fields.
//!
//! Renderers and exporters consult these to choose editors and value
//! encodings (multi-line vs single-line, verbatim, markdown, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single behavioral tag of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldProperty {
    MultilineText,
    Verbatim,
    Comment,
    Markdown,
    PersonNames,
    Numeric,
    Date,
    Identifier,
    External,
    JournalName,
    BookName,
}

impl FieldProperty {
    /// Every property, in declaration order.
    pub const ALL: [FieldProperty; 11] = [
        Self::MultilineText,
        Self::Verbatim,
        Self::Comment,
        Self::Markdown,
        Self::PersonNames,
        Self::Numeric,
        Self::Date,
        Self::Identifier,
        Self::External,
        Self::JournalName,
        Self::BookName,
    ];

    /// Display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MultilineText => "Multi-line text",
            Self::Verbatim => "Verbatim",
            Self::Comment => "Comment",
            Self::Markdown => "Markdown",
            Self::PersonNames => "Person names",
            Self::Numeric => "Numeric",
            Self::Date => "Date",
            Self::Identifier => "Identifier",
            Self::External => "External link",
            Self::JournalName => "Journal name",
            Self::BookName => "Book name",
        }
    }

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// An immutable, closed set of [`FieldProperty`] tags.
///
/// Stored as a bitset so that every field kind can declare its set as a
/// `const`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldProperties(u16);

impl FieldProperties {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build a set from a list of properties.
    pub const fn of(properties: &[FieldProperty]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < properties.len() {
            bits |= properties[i].bit();
            i += 1;
        }
        Self(bits)
    }

    /// Return a copy of this set with `property` added.
    pub const fn with(self, property: FieldProperty) -> Self {
        Self(self.0 | property.bit())
    }

    pub const fn contains(&self, property: FieldProperty) -> bool {
        self.0 & property.bit() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the contained properties in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = FieldProperty> + '_ {
        FieldProperty::ALL
            .into_iter()
            .filter(move |p| self.contains(*p))
    }
}

impl fmt::Debug for FieldProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<FieldProperty> for FieldProperties {
    fn from_iter<I: IntoIterator<Item = FieldProperty>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, property| set.with(property))
    }
}

impl Serialize for FieldProperties {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for FieldProperties {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let properties = Vec::<FieldProperty>::deserialize(deserializer)?;
        Ok(properties.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn of_and_contains() {
        let set = FieldProperties::of(&[FieldProperty::Comment, FieldProperty::Markdown]);
        assert!(set.contains(FieldProperty::Comment));
        assert!(set.contains(FieldProperty::Markdown));
        assert!(!set.contains(FieldProperty::Verbatim));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn empty_set() {
        let set = FieldProperties::empty();
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn iter_follows_declaration_order() {
        let set: FieldProperties = [FieldProperty::Markdown, FieldProperty::MultilineText]
            .into_iter()
            .collect();
        let props: Vec<_> = set.iter().collect();
        assert_eq!(props, vec![FieldProperty::MultilineText, FieldProperty::Markdown]);
    }

    #[test]
    fn with_is_idempotent() {
        let once = FieldProperties::empty().with(FieldProperty::Date);
        let twice = once.with(FieldProperty::Date);
        assert_eq!(once, twice);
    }

    #[test]
    fn serde_as_list() {
        let set = FieldProperties::of(&[FieldProperty::Verbatim, FieldProperty::Comment]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["verbatim","comment"]"#);
        let back: FieldProperties = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
