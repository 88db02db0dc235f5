//! Fields shown by an entry editor
//!
//! A [`DynamicFieldSet`] combines a base list (fixed, or taken from the
//! entry's type) with fields the user added during the session. The display
//! list is recomputed from these on every call.

use impress_domain::{BibEntry, Field, StandardField};
use indexmap::IndexSet;

use super::layout::{RowLayout, RowWeights};

/// Field always displayed last.
pub const SENTINEL_FIELD: StandardField = StandardField::UserSummary;

/// Where the base fields come from.
#[derive(Debug, Clone, PartialEq)]
pub enum BaseFields {
    /// The same list for every entry.
    Fixed(Vec<Field>),
    /// The base fields of each entry's type.
    EntryType,
}

/// Base fields plus an append-only list of user-added fields.
#[derive(Debug, Clone)]
pub struct DynamicFieldSet {
    base: BaseFields,
    extensions: IndexSet<Field>,
}

impl DynamicFieldSet {
    pub fn new(base: BaseFields) -> Self {
        Self {
            base,
            extensions: IndexSet::new(),
        }
    }

    /// A set with no base fields.
    pub fn empty() -> Self {
        Self::new(BaseFields::Fixed(Vec::new()))
    }

    /// A set whose base list is the entry type's fields.
    pub fn for_entry_types() -> Self {
        Self::new(BaseFields::EntryType)
    }

    pub fn base(&self) -> &BaseFields {
        &self.base
    }

    /// Append `field` unless already present. Returns whether it was added.
    pub fn add(&mut self, field: impl Into<Field>) -> bool {
        let field = field.into();
        let added = self.extensions.insert(field);
        if !added {
            tracing::debug!("field already in set");
        }
        added
    }

    pub fn contains(&self, field: &Field) -> bool {
        self.extensions.contains(field)
    }

    /// User-added fields in insertion order.
    pub fn extensions(&self) -> impl Iterator<Item = &Field> {
        self.extensions.iter()
    }

    pub fn extension_count(&self) -> usize {
        self.extensions.len()
    }

    /// Base fields, then extensions, then the sentinel. Each field appears
    /// once, at its first position; the sentinel is always last.
    pub fn display_order(&self, entry: &BibEntry) -> Vec<Field> {
        let base = match &self.base {
            BaseFields::Fixed(fields) => fields.clone(),
            BaseFields::EntryType => entry.entry_type.base_fields(),
        };
        let sentinel = Field::standard(SENTINEL_FIELD);

        let mut order: IndexSet<Field> = base
            .into_iter()
            .chain(self.extensions.iter().cloned())
            .filter(|field| *field != sentinel)
            .collect();
        order.insert(sentinel);
        order.into_iter().collect()
    }

    /// Layout for the extension rows plus the action row.
    pub fn row_layout(&self, weights: RowWeights) -> RowLayout {
        RowLayout::compressed(self.extension_count(), weights)
    }
}

impl Default for DynamicFieldSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl Extend<Field> for DynamicFieldSet {
    fn extend<I: IntoIterator<Item = Field>>(&mut self, iter: I) {
        for field in iter {
            self.add(field);
        }
    }
}
