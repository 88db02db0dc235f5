//! The "calculate page totals" library action

use impress_domain::{BibEntry, Field, StandardField};

use super::EntryTransform;
use crate::error::TransformError;

/// Recompute `pagetotal` from `pages` on every entry.
///
/// Entries without a parsable `pages` range, or whose stored total already
/// matches, are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalculatePageTotals;

impl CalculatePageTotals {
    pub const LABEL: &'static str = "Calculate page totals";

    /// Message shown once the action completes.
    pub const DONE_MESSAGE: &'static str = "Page Total Calculated.";
}

impl EntryTransform for CalculatePageTotals {
    fn apply(&self, entry: &BibEntry) -> Result<Option<BibEntry>, TransformError> {
        let Some(total) = entry.page_count() else {
            return Ok(None);
        };
        let total = total.to_string();
        if entry.get(&Field::standard(StandardField::PageTotal)) == Some(total.as_str()) {
            return Ok(None);
        }

        let mut updated = entry.clone();
        updated.set(StandardField::PageTotal, total);
        Ok(Some(updated))
    }

    fn label(&self) -> &str {
        Self::LABEL
    }

    fn done_message(&self) -> Option<&str> {
        Some(Self::DONE_MESSAGE)
    }
}
