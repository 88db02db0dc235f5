//! Library actions: a bulk run plus its side effects
//!
//! An action notifies the user, runs a transform over a library snapshot,
//! applies the resulting deltas, records them as one undo step, and reports
//! how the run ended.

use impress_domain::Library;

use crate::bulk::{BulkOperation, BulkOutcome, EntryTransform};
use crate::config::BulkConfig;
use crate::error::{BulkError, Result};
use crate::notify::{BulkReport, Notifier};
use crate::undo::UndoSink;

/// Run `transform` over every entry of `library` on the calling thread.
///
/// Changes made before a cancellation or failure are still applied and
/// recorded, so a single undo rolls them back. A failure is notified and
/// then returned as an error.
pub fn run_library_action<T>(
    library: &mut Library,
    transform: &T,
    notifier: &dyn Notifier,
    undo: &mut dyn UndoSink,
    config: &BulkConfig,
) -> Result<BulkReport>
where
    T: EntryTransform + ?Sized,
{
    let name = transform.label().to_string();
    if config.notify_on_start {
        notifier.notify(&format!("{}...", name));
    }

    let result = BulkOperation::from_library(name.as_str(), library)
        .with_config(config.clone())
        .run(transform);
    finish_library_action(library, &name, result, transform.done_message(), notifier, undo)
}

/// Apply the result of a bulk run (for example one joined from a
/// [`BulkHandle`](crate::bulk::BulkHandle)) to `library`.
///
/// Changes for entries deleted while the run was in flight are dropped.
pub fn finish_library_action(
    library: &mut Library,
    name: &str,
    result: std::result::Result<BulkOutcome, BulkError>,
    done_message: Option<&str>,
    notifier: &dyn Notifier,
    undo: &mut dyn UndoSink,
) -> Result<BulkReport> {
    match result {
        Ok(outcome) => {
            let report = BulkReport::from_outcome(&outcome);
            let cancelled = outcome.cancelled;
            commit(library, outcome, undo)?;
            if let Some(message) = done_message.filter(|_| !cancelled) {
                notifier.notify(message);
            }
            notifier.notify(&report.to_string());
            Ok(report)
        }
        Err(err) => {
            if let Some(partial) = err.partial_outcome() {
                commit(library, partial.clone(), undo)?;
            }
            let report = BulkReport::from_error(name, &err);
            notifier.notify(&report.to_string());
            Err(err.into())
        }
    }
}

fn commit(library: &mut Library, outcome: BulkOutcome, undo: &mut dyn UndoSink) -> Result<()> {
    let mut edit = outcome.into_compound_edit();
    edit.retain_existing(library);
    if edit.is_empty() {
        return Ok(());
    }
    edit.apply(library)?;
    tracing::info!(edit = %edit.name, entries = edit.len(), "recorded compound edit");
    undo.record(edit);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bulk::CalculatePageTotals;
    use crate::undo::UndoHistory;
    use impress_domain::{BibEntry, EntryType, StandardField};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<String>>);

    impl Notifier for Recorder {
        fn notify(&self, message: &str) {
            self.0.borrow_mut().push(message.to_string());
        }
    }

    #[test]
    fn test_page_totals_action() {
        let mut lib = Library::new("Lib").with_entries([
            BibEntry::new("a", EntryType::Article).with_field(StandardField::Pages, "100--109"),
            BibEntry::new("b", EntryType::Misc),
        ]);
        let notifier = Recorder::default();
        let mut history = UndoHistory::new();

        let report = run_library_action(
            &mut lib,
            &CalculatePageTotals,
            &notifier,
            &mut history,
            &BulkConfig::default(),
        )
        .unwrap();

        assert_eq!(
            report,
            BulkReport::Completed {
                name: CalculatePageTotals::LABEL.into(),
                processed: 1,
                skipped: 1,
                changed: 1,
            }
        );
        assert_eq!(lib.entries()[0].get_by_name("pagetotal"), Some("10"));
        assert_eq!(history.len(), 1);

        let messages = notifier.0.borrow();
        assert_eq!(messages[0], "Calculate page totals...");
        assert_eq!(messages[1], CalculatePageTotals::DONE_MESSAGE);
        assert_eq!(messages.len(), 3);
    }

    #[test]
    fn test_no_changes_records_nothing() {
        let mut lib = Library::new("Lib").with_entries([BibEntry::new("b", EntryType::Misc)]);
        let mut history = UndoHistory::new();
        run_library_action(
            &mut lib,
            &CalculatePageTotals,
            &Recorder::default(),
            &mut history,
            &BulkConfig::default(),
        )
        .unwrap();
        assert!(history.is_empty());
    }
}
