//! The per-user summary tab of the entry editor

use impress_domain::{BibEntry, Field};
use impress_fields::FieldRegistry;

use super::field_set::DynamicFieldSet;
use super::layout::{RowLayout, RowWeights};

/// Editor tab listing per-user summaries of an entry.
///
/// Shows every summary added this session, followed by the shared
/// `usersummary` field.
#[derive(Debug, Clone)]
pub struct UserSummaryTab<'r> {
    registry: &'r FieldRegistry,
    summaries: DynamicFieldSet,
}

impl<'r> UserSummaryTab<'r> {
    pub const NAME: &'static str = "User";
    pub const TITLE: &'static str = "Summary";

    pub fn new(registry: &'r FieldRegistry) -> Self {
        Self {
            registry,
            summaries: DynamicFieldSet::empty(),
        }
    }

    /// Tab backed by the process-wide registry.
    pub fn with_global_registry() -> UserSummaryTab<'static> {
        UserSummaryTab::new(FieldRegistry::global())
    }

    /// Add the summary field for `owner`. Returns the field and whether it
    /// was newly added.
    pub fn add_user_summary(&mut self, owner: &str) -> (Field, bool) {
        let field = self.registry.dynamic_field(owner);
        let added = self.summaries.add(field.clone());
        if added {
            tracing::debug!(field = %field, "user summary added");
        }
        (field, added)
    }

    /// Summaries added so far, in order.
    pub fn user_summaries(&self) -> impl Iterator<Item = &Field> {
        self.summaries.extensions()
    }

    pub fn fields_to_show(&self, entry: &BibEntry) -> Vec<Field> {
        self.summaries.display_order(entry)
    }

    /// Layout with one content row per displayed field.
    pub fn layout(&self, entry: &BibEntry, weights: RowWeights) -> RowLayout {
        RowLayout::compressed(self.fields_to_show(entry).len(), weights)
    }
}
