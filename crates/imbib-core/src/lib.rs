//! imbib-core: Bulk entry actions and editor models for the imbib reference manager
//!
//! This crate builds on `impress-fields` (field identity) and
//! `impress-domain` (entries and libraries):
//!
//! - **Bulk**: cancellable, progress-reporting transforms over a library
//!   snapshot that produce deltas instead of mutating in place
//! - **Undo**: compound edits grouping every delta of a run into one step
//! - **Actions**: notify, run, apply and record a library action
//! - **Editor**: dynamic field sets, the user summary tab and row layout
//! - **Config**: TOML/JSON settings for all of the above
//!
//! # Two-phase bulk edits
//!
//! ```text
//! Library ──snapshot──▶ BulkOperation ──deltas──▶ CompoundEdit ──apply──▶ Library
//!                                                      └──record──▶ UndoHistory
//! ```

pub mod actions;
pub mod bulk;
pub mod config;
pub mod editor;
pub mod error;
pub mod notify;
pub mod undo;

pub use actions::{finish_library_action, run_library_action};
pub use bulk::{
    transform_fn, BulkEvent, BulkHandle, BulkOperation, BulkOutcome, BulkProgress, BulkWorker,
    CalculatePageTotals, CancellationToken, EntryChange, EntryTransform, FnTransform,
};
pub use config::{BulkConfig, ConfigError, EditorConfig, FieldConfig, ImbibConfig};
pub use editor::{BaseFields, DynamicFieldSet, Row, RowKind, RowLayout, RowWeights, UserSummaryTab};
pub use error::{BulkError, ImbibError, Result, TransformError};
pub use notify::{BulkReport, Notifier, TracingNotifier};
pub use undo::{CompoundEdit, FieldChange, UndoHistory, UndoSink};

pub use impress_domain::{BibEntry, EntryType, Library};
pub use impress_fields::{Field, FieldRegistry, OwnerPolicy, StandardField};
