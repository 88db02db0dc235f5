//! Field identity.
//!
//! A [`Field`] is the key of one metadata slot on an entry. Standard fields,
//! fields minted at runtime for a specific owner, and arbitrary user-coined
//! keys all share one type. Equality, hashing and ordering are defined over
//! the canonical [`Field::name`] only, so two fields built independently from
//! the same inputs are interchangeable as map keys.

use crate::property::{FieldProperties, FieldProperty};
use crate::standard::StandardField;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

const SUMMARY_PROPERTIES: FieldProperties = FieldProperties::of(&[FieldProperty::MultilineText]);
const USER_NOTE_PROPERTIES: FieldProperties = FieldProperties::of(&[
    FieldProperty::Comment,
    FieldProperty::MultilineText,
    FieldProperty::Verbatim,
    FieldProperty::Markdown,
]);

/// Namespace of a dynamically minted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldNamespace {
    /// Per-user summary of an entry.
    Summary,
    /// Per-user free-form note.
    UserNote,
}

impl FieldNamespace {
    pub const ALL: [FieldNamespace; 2] = [Self::Summary, Self::UserNote];

    /// Prefix joined with the owner token to form the field name.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Summary => "summary-",
            Self::UserNote => "userNote-",
        }
    }

    pub fn properties(&self) -> FieldProperties {
        match self {
            Self::Summary => SUMMARY_PROPERTIES,
            Self::UserNote => USER_NOTE_PROPERTIES,
        }
    }

    /// Split a field name into this namespace's owner token, if it carries
    /// the namespace prefix.
    pub fn strip<'a>(&self, name: &'a str) -> Option<&'a str> {
        name.strip_prefix(self.prefix())
    }
}

/// A field minted at runtime for one owner.
#[derive(Clone)]
pub struct DynamicField {
    namespace: FieldNamespace,
    owner: Arc<str>,
    name: Arc<str>,
}

impl DynamicField {
    /// Build the field for `owner`. The owner is used verbatim; an empty
    /// owner yields the bare prefix as name.
    pub fn new(namespace: FieldNamespace, owner: &str) -> Self {
        let name = format!("{}{}", namespace.prefix(), owner);
        Self {
            namespace,
            owner: Arc::from(owner),
            name: Arc::from(name),
        }
    }

    pub fn namespace(&self) -> FieldNamespace {
        self.namespace
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for DynamicField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicField")
            .field("namespace", &self.namespace)
            .field("owner", &self.owner)
            .finish()
    }
}

/// The identity of a metadata slot.
#[derive(Clone)]
pub enum Field {
    /// A fixed, well-known key.
    Standard(StandardField),
    /// A key minted per owner (see [`crate::FieldRegistry`]).
    Dynamic(DynamicField),
    /// Any other key found on an entry.
    Custom(Arc<str>),
}

impl Field {
    pub const fn standard(field: StandardField) -> Self {
        Self::Standard(field)
    }

    pub fn dynamic(namespace: FieldNamespace, owner: &str) -> Self {
        Self::Dynamic(DynamicField::new(namespace, owner))
    }

    /// The summary field of `owner`.
    pub fn summary(owner: &str) -> Self {
        Self::dynamic(FieldNamespace::Summary, owner)
    }

    /// The note field of `owner`.
    pub fn user_note(owner: &str) -> Self {
        Self::dynamic(FieldNamespace::UserNote, owner)
    }

    /// A user-coined key, taken verbatim.
    pub fn custom(name: &str) -> Self {
        Self::Custom(Arc::from(name))
    }

    /// Resolve a key as found in a file. See [`crate::parse_field`].
    pub fn parse(name: &str) -> Self {
        crate::parse::parse_field(name)
    }

    /// Canonical name, used as serialization key and as the sole basis of
    /// equality.
    pub fn name(&self) -> &str {
        match self {
            Self::Standard(field) => field.name(),
            Self::Dynamic(field) => field.name(),
            Self::Custom(name) => name.as_ref(),
        }
    }

    /// Name shown to users.
    pub fn display_name(&self) -> String {
        match self {
            Self::Standard(field) => field.display_name().to_string(),
            Self::Dynamic(field) => match field.namespace() {
                FieldNamespace::Summary => format!("Summary ({})", field.owner()),
                FieldNamespace::UserNote => format!("Note ({})", field.owner()),
            },
            Self::Custom(name) => name.to_string(),
        }
    }

    pub fn properties(&self) -> FieldProperties {
        match self {
            Self::Standard(field) => field.properties(),
            Self::Dynamic(field) => field.namespace().properties(),
            Self::Custom(_) => FieldProperties::empty(),
        }
    }

    pub fn is_standard(&self) -> bool {
        matches!(self, Self::Standard(_))
    }

    pub fn has_property(&self, property: FieldProperty) -> bool {
        self.properties().contains(property)
    }

    pub fn is_multiline(&self) -> bool {
        self.has_property(FieldProperty::MultilineText)
    }

    /// The standard field behind this identity, if any.
    pub fn as_standard(&self) -> Option<StandardField> {
        match self {
            Self::Standard(field) => Some(*field),
            _ => None,
        }
    }

    /// The owner token of a dynamic field.
    pub fn owner(&self) -> Option<&str> {
        match self {
            Self::Dynamic(field) => Some(field.owner()),
            _ => None,
        }
    }
}

impl From<StandardField> for Field {
    fn from(field: StandardField) -> Self {
        Self::Standard(field)
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Field {}

impl PartialEq<StandardField> for Field {
    fn eq(&self, other: &StandardField) -> bool {
        self.name() == other.name()
    }
}

impl Hash for Field {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl PartialOrd for Field {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Field {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name().cmp(other.name())
    }
}

// Lets hash maps keyed by `Field` be queried with a plain name. `Hash` of
// `Field` and `str` agree because both hash the name string.
impl Borrow<str> for Field {
    fn borrow(&self) -> &str {
        self.name()
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard(field) => write!(f, "Standard({})", field.name()),
            Self::Dynamic(field) => write!(f, "Dynamic({})", field.name()),
            Self::Custom(name) => write!(f, "Custom({})", name),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Field {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(crate::parse::parse_field(&name))
    }
}
