//! Bulk entry transformation
//!
//! A [`BulkOperation`] walks a point-in-time snapshot of a library's entries
//! and applies an [`EntryTransform`] to each one. It never touches the live
//! library: the run produces [`EntryChange`] deltas that the caller applies
//! and records as a single [`CompoundEdit`](crate::undo::CompoundEdit).
//!
//! Cancellation is cooperative and polled before each entry. A transform
//! failure stops the run and carries the partial outcome in the error.

mod page_totals;
mod worker;

pub use page_totals::*;
pub use worker::*;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;

use impress_domain::{BibEntry, EntryType, Library};

use crate::config::BulkConfig;
use crate::error::{BulkError, TransformError};
use crate::undo::{CompoundEdit, FieldChange};

/// Per-entry transform applied by a bulk operation.
///
/// `Ok(Some(entry))` marks the entry processed (it may be returned unchanged),
/// `Ok(None)` marks it skipped. Re-applying a transform to its own output
/// must not change the result.
pub trait EntryTransform {
    fn apply(&self, entry: &BibEntry) -> Result<Option<BibEntry>, TransformError>;

    /// Human-readable name, used for logging and undo labels.
    fn label(&self) -> &str {
        "Transform"
    }

    /// Message to show when a run completes without cancellation.
    fn done_message(&self) -> Option<&str> {
        None
    }
}

impl<T: EntryTransform + ?Sized> EntryTransform for &T {
    fn apply(&self, entry: &BibEntry) -> Result<Option<BibEntry>, TransformError> {
        (**self).apply(entry)
    }

    fn label(&self) -> &str {
        (**self).label()
    }

    fn done_message(&self) -> Option<&str> {
        (**self).done_message()
    }
}

impl<T: EntryTransform + ?Sized> EntryTransform for Box<T> {
    fn apply(&self, entry: &BibEntry) -> Result<Option<BibEntry>, TransformError> {
        (**self).apply(entry)
    }

    fn label(&self) -> &str {
        (**self).label()
    }

    fn done_message(&self) -> Option<&str> {
        (**self).done_message()
    }
}

/// A transform backed by a closure. Build one with [`transform_fn`].
pub struct FnTransform<F> {
    label: String,
    func: F,
}

/// Wrap a closure as a labelled [`EntryTransform`].
pub fn transform_fn<F>(label: impl Into<String>, func: F) -> FnTransform<F>
where
    F: Fn(&BibEntry) -> Result<Option<BibEntry>, TransformError>,
{
    FnTransform {
        label: label.into(),
        func,
    }
}

impl<F> EntryTransform for FnTransform<F>
where
    F: Fn(&BibEntry) -> Result<Option<BibEntry>, TransformError>,
{
    fn apply(&self, entry: &BibEntry) -> Result<Option<BibEntry>, TransformError> {
        (self.func)(entry)
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. The entry in flight still completes.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Live progress counter for a running operation.
#[derive(Clone, Debug)]
pub struct BulkProgress {
    total: usize,
    completed: Arc<AtomicUsize>,
}

impl BulkProgress {
    fn new(total: usize) -> Self {
        Self {
            total,
            completed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Entries visited so far (processed or skipped).
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Fraction done in `0.0..=1.0`. An empty run counts as done.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed() as f64 / self.total as f64
        }
    }

    fn advance(&self) -> usize {
        self.completed.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Events emitted while a bulk operation runs.
#[derive(Clone, Debug, PartialEq)]
pub enum BulkEvent {
    Started { name: String, total: usize },
    Progress { completed: usize, total: usize },
    Finished { processed: usize, skipped: usize, cancelled: bool },
    Failed { index: usize, cite_key: String, message: String },
}

/// Delta for one entry: what changed between the snapshot and the
/// transform's output.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryChange {
    pub entry_id: String,
    pub cite_key: String,
    pub field_changes: Vec<FieldChange>,
    pub entry_type_change: Option<(EntryType, EntryType)>,
    pub cite_key_change: Option<(String, String)>,
}

impl EntryChange {
    /// Diff two versions of the same entry. Returns `None` when nothing
    /// observable changed.
    pub fn between(before: &BibEntry, after: &BibEntry) -> Option<Self> {
        let mut field_changes = Vec::new();

        for (old_index, (field, old)) in before.fields().enumerate() {
            let new = after.get(field);
            if new != Some(old) {
                field_changes.push(FieldChange {
                    field: field.clone(),
                    old: Some(old.to_string()),
                    new: new.map(str::to_string),
                    old_index: Some(old_index),
                    new_index: after.position(field),
                });
            }
        }

        for (new_index, (field, new)) in after.fields().enumerate() {
            if !before.has(field) {
                field_changes.push(FieldChange {
                    field: field.clone(),
                    old: None,
                    new: Some(new.to_string()),
                    old_index: None,
                    new_index: Some(new_index),
                });
            }
        }

        let entry_type_change =
            (before.entry_type != after.entry_type).then(|| (before.entry_type, after.entry_type));
        let cite_key_change = (before.cite_key != after.cite_key)
            .then(|| (before.cite_key.clone(), after.cite_key.clone()));

        let change = Self {
            entry_id: before.id.clone(),
            cite_key: before.cite_key.clone(),
            field_changes,
            entry_type_change,
            cite_key_change,
        };
        (!change.is_empty()).then_some(change)
    }

    pub fn is_empty(&self) -> bool {
        self.field_changes.is_empty()
            && self.entry_type_change.is_none()
            && self.cite_key_change.is_none()
    }

    /// Write the new values into `entry`.
    ///
    /// Added fields are inserted last, in ascending position, so each lands
    /// at its recorded index.
    pub fn apply(&self, entry: &mut BibEntry) {
        let (adds, others): (Vec<_>, Vec<_>) =
            self.field_changes.iter().partition(|change| change.adds_field());
        for change in others.into_iter().chain(adds) {
            change.apply(entry);
        }
        if let Some((_, new)) = self.entry_type_change {
            entry.entry_type = new;
        }
        if let Some((_, new)) = &self.cite_key_change {
            entry.cite_key = new.clone();
        }
    }

    /// Restore the old values into `entry`, putting removed fields back at
    /// their original positions.
    pub fn revert(&self, entry: &mut BibEntry) {
        let (removals, others): (Vec<_>, Vec<_>) = self
            .field_changes
            .iter()
            .partition(|change| change.removes_field());
        for change in others.into_iter().rev().chain(removals) {
            change.revert(entry);
        }
        if let Some((old, _)) = self.entry_type_change {
            entry.entry_type = old;
        }
        if let Some((old, _)) = &self.cite_key_change {
            entry.cite_key = old.clone();
        }
    }
}

/// Result of a bulk run (complete, cancelled, or partial on failure).
#[derive(Clone, Debug, PartialEq)]
pub struct BulkOutcome {
    pub name: String,
    pub total: usize,
    pub processed: usize,
    pub skipped: usize,
    pub cancelled: bool,
    pub changes: Vec<EntryChange>,
}

impl BulkOutcome {
    pub fn new(name: impl Into<String>, total: usize) -> Self {
        Self {
            name: name.into(),
            total,
            processed: 0,
            skipped: 0,
            cancelled: false,
            changes: Vec::new(),
        }
    }

    /// Entries visited (processed or skipped).
    pub fn visited(&self) -> usize {
        self.processed + self.skipped
    }

    /// Entries never reached.
    pub fn unvisited(&self) -> usize {
        self.total.saturating_sub(self.visited())
    }

    /// Number of entries whose values actually changed.
    pub fn changed(&self) -> usize {
        self.changes.len()
    }

    /// Bundle all deltas into one undoable edit.
    pub fn into_compound_edit(self) -> CompoundEdit {
        CompoundEdit::new(self.name, self.changes)
    }
}

/// One cancellable run of a transform over a snapshot of entries.
pub struct BulkOperation {
    name: String,
    entries: Vec<BibEntry>,
    cancel: CancellationToken,
    progress: BulkProgress,
    config: BulkConfig,
    events: Option<Sender<BulkEvent>>,
}

impl BulkOperation {
    /// Create an operation over a copy of `entries`.
    pub fn new(name: impl Into<String>, entries: &[BibEntry]) -> Self {
        Self::from_snapshot(name, entries.to_vec())
    }

    /// Create an operation over a snapshot of the library's entries.
    pub fn from_library(name: impl Into<String>, library: &Library) -> Self {
        Self::from_snapshot(name, library.snapshot())
    }

    fn from_snapshot(name: impl Into<String>, entries: Vec<BibEntry>) -> Self {
        let progress = BulkProgress::new(entries.len());
        Self {
            name: name.into(),
            entries,
            cancel: CancellationToken::new(),
            progress,
            config: BulkConfig::default(),
            events: None,
        }
    }

    /// Builder method to set configuration.
    pub fn with_config(mut self, config: BulkConfig) -> Self {
        self.config = config;
        self
    }

    /// Builder method to send [`BulkEvent`]s to `sender`.
    pub fn with_events(mut self, sender: Sender<BulkEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Token that cancels this operation from another thread.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Handle for observing progress from another thread.
    pub fn progress(&self) -> BulkProgress {
        self.progress.clone()
    }

    /// Run the transform over every snapshot entry, in order.
    pub fn run<T: EntryTransform + ?Sized>(self, transform: &T) -> Result<BulkOutcome, BulkError> {
        let total = self.entries.len();
        let interval = self.config.progress_interval.max(1);
        let mut outcome = BulkOutcome::new(self.name.clone(), total);

        tracing::info!(operation = %self.name, transform = transform.label(), total, "bulk operation started");
        self.emit(BulkEvent::Started {
            name: self.name.clone(),
            total,
        });

        for (index, entry) in self.entries.iter().enumerate() {
            if self.cancel.is_cancelled() {
                outcome.cancelled = true;
                tracing::info!(
                    operation = %self.name,
                    visited = outcome.visited(),
                    total,
                    "bulk operation cancelled"
                );
                break;
            }

            match transform.apply(entry) {
                Ok(Some(updated)) => {
                    outcome.processed += 1;
                    if let Some(change) = EntryChange::between(entry, &updated) {
                        outcome.changes.push(change);
                    }
                }
                Ok(None) => {
                    outcome.skipped += 1;
                    tracing::debug!(cite_key = %entry.cite_key, "entry skipped");
                }
                Err(source) => {
                    tracing::warn!(
                        operation = %self.name,
                        index,
                        cite_key = %entry.cite_key,
                        error = %source,
                        "bulk transform failed"
                    );
                    self.emit(BulkEvent::Failed {
                        index,
                        cite_key: entry.cite_key.clone(),
                        message: source.to_string(),
                    });
                    return Err(BulkError::TransformFailed {
                        index,
                        cite_key: entry.cite_key.clone(),
                        partial: Box::new(outcome),
                        source,
                    });
                }
            }

            let completed = self.progress.advance();
            if completed % interval == 0 || completed == total {
                self.emit(BulkEvent::Progress { completed, total });
            }
        }

        tracing::info!(
            operation = %self.name,
            processed = outcome.processed,
            skipped = outcome.skipped,
            changed = outcome.changed(),
            cancelled = outcome.cancelled,
            "bulk operation finished"
        );
        self.emit(BulkEvent::Finished {
            processed: outcome.processed,
            skipped: outcome.skipped,
            cancelled: outcome.cancelled,
        });
        Ok(outcome)
    }

    fn emit(&self, event: BulkEvent) {
        if let Some(sender) = &self.events {
            // Receiver dropped means nobody is listening any more.
            let _ = sender.send(event);
        }
    }
}

impl std::fmt::Debug for BulkOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkOperation")
            .field("name", &self.name)
            .field("entries", &self.entries.len())
            .field("cancelled", &self.cancel.is_cancelled())
            .field("completed", &self.progress.completed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impress_domain::{Field, StandardField};
    use std::sync::mpsc;

    fn entries(n: usize) -> Vec<BibEntry> {
        (0..n)
            .map(|i| {
                BibEntry::new(format!("key{}", i), EntryType::Article)
                    .with_field(StandardField::Title, format!("Title {}", i))
            })
            .collect()
    }

    #[test]
    fn test_identity_transform_records_no_changes() {
        let snapshot = entries(4);
        let outcome = BulkOperation::new("Identity", &snapshot)
            .run(&transform_fn("identity", |e: &BibEntry| Ok(Some(e.clone()))))
            .unwrap();
        assert_eq!(outcome.processed, 4);
        assert_eq!(outcome.skipped, 0);
        assert!(outcome.changes.is_empty());
        assert!(!outcome.cancelled);
    }

    #[test]
    fn test_entry_change_between() {
        let before = BibEntry::new("k", EntryType::Article)
            .with_field(StandardField::Title, "Old")
            .with_field(StandardField::Note, "gone");
        let mut after = before.clone();
        after.set(StandardField::Title, "New");
        after.clear(&Field::standard(StandardField::Note));
        after.set(StandardField::Year, "2024");
        after.entry_type = EntryType::Book;

        let change = EntryChange::between(&before, &after).unwrap();
        assert_eq!(change.field_changes.len(), 3);
        assert_eq!(change.entry_type_change, Some((EntryType::Article, EntryType::Book)));
        assert!(change.cite_key_change.is_none());

        let mut live = before.clone();
        change.apply(&mut live);
        assert_eq!(live, after);
        change.revert(&mut live);
        assert_eq!(live, before);
    }

    #[test]
    fn test_unchanged_entry_has_no_delta() {
        let entry = entries(1).remove(0);
        assert!(EntryChange::between(&entry, &entry.clone()).is_none());
    }

    #[test]
    fn test_progress_counts_visited_entries() {
        let snapshot = entries(3);
        let op = BulkOperation::new("Count", &snapshot);
        let progress = op.progress();
        assert_eq!(progress.fraction(), 0.0);
        op.run(&transform_fn("skip", |_: &BibEntry| Ok(None))).unwrap();
        assert_eq!(progress.completed(), 3);
        assert_eq!(progress.fraction(), 1.0);
    }

    #[test]
    fn test_events_emitted() {
        let (tx, rx) = mpsc::channel();
        let snapshot = entries(2);
        BulkOperation::new("Events", &snapshot)
            .with_config(BulkConfig {
                progress_interval: 1,
                notify_on_start: false,
            })
            .with_events(tx)
            .run(&transform_fn("id", |e: &BibEntry| Ok(Some(e.clone()))))
            .unwrap();

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events.first(),
            Some(&BulkEvent::Started {
                name: "Events".into(),
                total: 2
            })
        );
        assert!(events.contains(&BulkEvent::Progress {
            completed: 2,
            total: 2
        }));
        assert_eq!(
            events.last(),
            Some(&BulkEvent::Finished {
                processed: 2,
                skipped: 0,
                cancelled: false
            })
        );
    }

    #[test]
    fn test_empty_snapshot() {
        let outcome = BulkOperation::new("Empty", &[])
            .run(&transform_fn("id", |e: &BibEntry| Ok(Some(e.clone()))))
            .unwrap();
        assert_eq!(outcome.visited(), 0);
        assert_eq!(outcome.unvisited(), 0);
    }
}
