//! Compound edits and undo history
//!
//! A bulk run produces one [`CompoundEdit`]; applying or reverting it touches
//! every affected entry as a single step.

use chrono::{DateTime, Utc};
use impress_domain::{BibEntry, DomainError, Field, Library};

use crate::bulk::EntryChange;

/// Change of one field on one entry. `None` means "not set".
///
/// `old_index` and `new_index` are the field's positions before and after
/// the change, used to put a re-added field back where it was.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldChange {
    pub field: Field,
    pub old: Option<String>,
    pub new: Option<String>,
    pub old_index: Option<usize>,
    pub new_index: Option<usize>,
}

impl FieldChange {
    pub fn apply(&self, entry: &mut BibEntry) {
        self.write(entry, self.old.as_deref(), self.new.as_deref(), self.new_index);
    }

    pub fn revert(&self, entry: &mut BibEntry) {
        self.write(entry, self.new.as_deref(), self.old.as_deref(), self.old_index);
    }

    /// Whether applying this change adds the field to the entry.
    pub fn adds_field(&self) -> bool {
        self.old.is_none() && self.new.is_some()
    }

    /// Whether applying this change removes the field from the entry.
    pub fn removes_field(&self) -> bool {
        self.old.is_some() && self.new.is_none()
    }

    fn write(
        &self,
        entry: &mut BibEntry,
        expected: Option<&str>,
        value: Option<&str>,
        index: Option<usize>,
    ) {
        let current = entry.get(&self.field);
        if current != expected {
            tracing::warn!(
                cite_key = %entry.cite_key,
                field = %self.field,
                "field changed since the edit was computed; overwriting"
            );
        }
        match value {
            Some(value) => match index {
                Some(index) => {
                    entry.insert_at(index, self.field.clone(), value);
                }
                None => {
                    entry.set(self.field.clone(), value);
                }
            },
            None => {
                entry.clear(&self.field);
            }
        }
    }
}

/// A named group of entry changes undone and redone as one step.
#[derive(Clone, Debug, PartialEq)]
pub struct CompoundEdit {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub changes: Vec<EntryChange>,
}

impl CompoundEdit {
    pub fn new(name: impl Into<String>, changes: Vec<EntryChange>) -> Self {
        Self {
            name: name.into(),
            created_at: Utc::now(),
            changes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Drop changes whose entry is no longer in the library.
    pub fn retain_existing(&mut self, library: &Library) {
        self.changes.retain(|change| {
            let exists = library.get(&change.entry_id).is_some();
            if !exists {
                tracing::warn!(
                    edit = %self.name,
                    cite_key = %change.cite_key,
                    "entry removed during bulk run; dropping its change"
                );
            }
            exists
        });
    }

    /// Apply every change. Fails without touching the library if any target
    /// entry is missing.
    pub fn apply(&self, library: &mut Library) -> Result<(), DomainError> {
        self.check_targets(library)?;
        for change in &self.changes {
            change.apply(library.entry_mut(&change.entry_id)?);
        }
        Ok(())
    }

    /// Revert every change, last entry first. Same atomicity as [`apply`](Self::apply).
    pub fn revert(&self, library: &mut Library) -> Result<(), DomainError> {
        self.check_targets(library)?;
        for change in self.changes.iter().rev() {
            change.revert(library.entry_mut(&change.entry_id)?);
        }
        Ok(())
    }

    fn check_targets(&self, library: &Library) -> Result<(), DomainError> {
        match self
            .changes
            .iter()
            .find(|change| library.get(&change.entry_id).is_none())
        {
            Some(missing) => Err(DomainError::EntryNotFound(missing.entry_id.clone())),
            None => Ok(()),
        }
    }
}

/// Receiver of compound edits.
pub trait UndoSink {
    fn record(&mut self, edit: CompoundEdit);
}

/// In-memory undo/redo stacks.
#[derive(Debug, Default)]
pub struct UndoHistory {
    undo: Vec<CompoundEdit>,
    redo: Vec<CompoundEdit>,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Name of the edit the next undo would revert.
    pub fn undo_name(&self) -> Option<&str> {
        self.undo.last().map(|edit| edit.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.undo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo.is_empty()
    }

    /// Revert the most recent edit. Returns `Ok(false)` when there is nothing
    /// to undo. On error the edit stays on the undo stack.
    pub fn undo(&mut self, library: &mut Library) -> Result<bool, DomainError> {
        let Some(edit) = self.undo.pop() else {
            return Ok(false);
        };
        if let Err(err) = edit.revert(library) {
            self.undo.push(edit);
            return Err(err);
        }
        tracing::debug!(edit = %edit.name, "undo");
        self.redo.push(edit);
        Ok(true)
    }

    /// Re-apply the most recently undone edit.
    pub fn redo(&mut self, library: &mut Library) -> Result<bool, DomainError> {
        let Some(edit) = self.redo.pop() else {
            return Ok(false);
        };
        if let Err(err) = edit.apply(library) {
            self.redo.push(edit);
            return Err(err);
        }
        tracing::debug!(edit = %edit.name, "redo");
        self.undo.push(edit);
        Ok(true)
    }
}

impl UndoSink for UndoHistory {
    fn record(&mut self, edit: CompoundEdit) {
        self.redo.clear();
        self.undo.push(edit);
    }
}
