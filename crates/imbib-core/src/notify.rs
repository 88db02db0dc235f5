//! User-facing notifications for library actions

use std::fmt;

use crate::bulk::BulkOutcome;
use crate::error::BulkError;

/// One-way message sink, typically a status bar or toast.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Notifier that writes messages to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(target: "imbib::notify", "{}", message);
    }
}

/// Short summary of how a bulk run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkReport {
    Completed {
        name: String,
        processed: usize,
        skipped: usize,
        changed: usize,
    },
    Cancelled {
        name: String,
        processed: usize,
        skipped: usize,
        total: usize,
    },
    Failed {
        name: String,
        processed: usize,
        cite_key: String,
        message: String,
    },
}

impl BulkReport {
    pub fn from_outcome(outcome: &BulkOutcome) -> Self {
        if outcome.cancelled {
            Self::Cancelled {
                name: outcome.name.clone(),
                processed: outcome.processed,
                skipped: outcome.skipped,
                total: outcome.total,
            }
        } else {
            Self::Completed {
                name: outcome.name.clone(),
                processed: outcome.processed,
                skipped: outcome.skipped,
                changed: outcome.changed(),
            }
        }
    }

    /// Report for a failed run. Errors without a partial outcome report
    /// nothing processed.
    pub fn from_error(name: &str, error: &BulkError) -> Self {
        match error {
            BulkError::TransformFailed {
                cite_key,
                partial,
                source,
                ..
            } => Self::Failed {
                name: name.to_string(),
                processed: partial.processed,
                cite_key: cite_key.clone(),
                message: source.to_string(),
            },
            other => Self::Failed {
                name: name.to_string(),
                processed: 0,
                cite_key: String::new(),
                message: other.to_string(),
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for BulkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed {
                name,
                processed,
                skipped,
                changed,
            } => write!(
                f,
                "{}: {} processed, {} skipped, {} changed.",
                name, processed, skipped, changed
            ),
            Self::Cancelled {
                name,
                processed,
                skipped,
                total,
            } => write!(
                f,
                "{} cancelled after {} of {} entries ({} processed, {} skipped).",
                name,
                processed + skipped,
                total,
                processed,
                skipped
            ),
            Self::Failed {
                name,
                processed,
                cite_key,
                message,
            } if cite_key.is_empty() => {
                write!(f, "{} failed after {} processed: {}", name, processed, message)
            }
            Self::Failed {
                name,
                processed,
                cite_key,
                message,
            } => write!(
                f,
                "{} failed on '{}' after {} processed: {}",
                name, cite_key, processed, message
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;

    #[test]
    fn test_completed_message() {
        let mut outcome = BulkOutcome::new("Page totals", 4);
        outcome.processed = 3;
        outcome.skipped = 1;
        assert_eq!(
            BulkReport::from_outcome(&outcome).to_string(),
            "Page totals: 3 processed, 1 skipped, 0 changed."
        );
    }

    #[test]
    fn test_cancelled_message() {
        let mut outcome = BulkOutcome::new("Page totals", 10);
        outcome.processed = 2;
        outcome.skipped = 1;
        outcome.cancelled = true;
        assert_eq!(
            BulkReport::from_outcome(&outcome).to_string(),
            "Page totals cancelled after 3 of 10 entries (2 processed, 1 skipped)."
        );
    }

    #[test]
    fn test_failed_message() {
        let mut partial = BulkOutcome::new("Fix", 5);
        partial.processed = 2;
        let err = BulkError::TransformFailed {
            index: 2,
            cite_key: "c3".into(),
            partial: Box::new(partial),
            source: TransformError::Failed("bad value".into()),
        };
        let report = BulkReport::from_error("Fix", &err);
        assert!(report.is_failure());
        assert_eq!(report.to_string(), "Fix failed on 'c3' after 2 processed: bad value");
    }

    #[test]
    fn test_panic_message() {
        let report = BulkReport::from_error("Fix", &BulkError::WorkerPanicked);
        assert_eq!(report.to_string(), "Fix failed after 0 processed: Bulk worker panicked");
    }
}
