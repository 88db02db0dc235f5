//! Bibliographic entry model

use impress_fields::{parse_field, Field, StandardField};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::entry_type::EntryType;
use crate::pages::PageRange;

/// A bibliographic entry: an ordered mapping from field to value.
///
/// A missing field means "not set" and is distinct from an empty value.
/// Field order is insertion order and survives removals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BibEntry {
    pub id: String,
    pub cite_key: String,
    pub entry_type: EntryType,
    fields: IndexMap<Field, String>,
}

impl BibEntry {
    /// Create an empty entry with a fresh id.
    pub fn new(cite_key: impl Into<String>, entry_type: EntryType) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            cite_key: cite_key.into(),
            entry_type,
            fields: IndexMap::new(),
        }
    }

    /// Builder method to set a field.
    pub fn with_field(mut self, field: impl Into<Field>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Get a field value.
    pub fn get(&self, field: &Field) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Get a field value by key, parsed the way file keys are
    /// (standard keys are case-insensitive).
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        self.get(&parse_field(name))
    }

    pub fn has(&self, field: &Field) -> bool {
        self.fields.contains_key(field)
    }

    /// Set a field, returning the previous value. An existing field keeps
    /// its position.
    pub fn set(&mut self, field: impl Into<Field>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(field.into(), value.into())
    }

    /// Set a field, placing it at `index` if it is not already present.
    /// An existing field keeps its position. The index is clamped to the
    /// field count.
    pub fn insert_at(
        &mut self,
        index: usize,
        field: impl Into<Field>,
        value: impl Into<String>,
    ) -> Option<String> {
        let field = field.into();
        if let Some(current) = self.fields.get_mut(&field) {
            return Some(std::mem::replace(current, value.into()));
        }
        let index = index.min(self.fields.len());
        self.fields.shift_insert(index, field, value.into());
        None
    }

    /// Position of `field` in the entry's field order.
    pub fn position(&self, field: &Field) -> Option<usize> {
        self.fields.get_index_of(field)
    }

    /// Remove a field, returning its value. Remaining fields keep their order.
    pub fn clear(&mut self, field: &Field) -> Option<String> {
        self.fields.shift_remove(field)
    }

    /// Iterate fields in order.
    pub fn fields(&self) -> impl Iterator<Item = (&Field, &str)> {
        self.fields.iter().map(|(field, value)| (field, value.as_str()))
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Page range derived from the `pages` field.
    pub fn page_range(&self) -> Option<PageRange> {
        self.get(&Field::standard(StandardField::Pages))
            .and_then(PageRange::parse)
    }

    /// Number of pages derived from the `pages` field. Computed on demand,
    /// never cached.
    pub fn page_count(&self) -> Option<u32> {
        self.page_range().and_then(|range| range.count())
    }

    /// Recompute `pagetotal` from `pages` and store it.
    ///
    /// Returns the new total, or `None` (leaving `pagetotal` untouched) when
    /// `pages` is missing or not a parsable range.
    pub fn set_page_total(&mut self) -> Option<u32> {
        let total = self.page_count()?;
        self.set(StandardField::PageTotal, total.to_string());
        Some(total)
    }
}
