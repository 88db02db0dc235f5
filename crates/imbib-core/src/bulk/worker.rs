//! Background worker for bulk operations
//!
//! Runs one [`BulkOperation`] on a dedicated named thread and reports
//! [`BulkEvent`]s over an mpsc channel.

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use super::{BulkEvent, BulkOperation, BulkOutcome, BulkProgress, CancellationToken, EntryTransform};
use crate::error::BulkError;

/// Spawns bulk operations onto a background thread.
pub struct BulkWorker;

impl BulkWorker {
    /// Start `operation` with `transform` on a new thread.
    pub fn spawn<T>(operation: BulkOperation, transform: T) -> Result<BulkHandle, BulkError>
    where
        T: EntryTransform + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let cancel = operation.cancellation_token();
        let progress = operation.progress();
        let name = operation.name().to_string();
        let operation = operation.with_events(tx);

        let thread = thread::Builder::new()
            .name(format!("bulk-{}", name))
            .spawn(move || operation.run(&transform))
            .map_err(BulkError::WorkerSpawn)?;

        tracing::debug!(operation = %name, "bulk worker started");
        Ok(BulkHandle {
            name,
            cancel,
            progress,
            events: rx,
            thread,
        })
    }
}

/// Handle to a running bulk operation.
pub struct BulkHandle {
    name: String,
    cancel: CancellationToken,
    progress: BulkProgress,
    events: Receiver<BulkEvent>,
    thread: JoinHandle<Result<BulkOutcome, BulkError>>,
}

impl BulkHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ask the worker to stop before the next entry.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn progress(&self) -> &BulkProgress {
        &self.progress
    }

    /// Event stream. Ends once the worker finishes.
    pub fn events(&self) -> &Receiver<BulkEvent> {
        &self.events
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the worker and return its outcome.
    pub fn join(self) -> Result<BulkOutcome, BulkError> {
        match self.thread.join() {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(operation = %self.name, "bulk worker panicked");
                Err(BulkError::WorkerPanicked)
            }
        }
    }
}

impl std::fmt::Debug for BulkHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkHandle")
            .field("name", &self.name)
            .field("completed", &self.progress.completed())
            .field("total", &self.progress.total())
            .finish()
    }
}
