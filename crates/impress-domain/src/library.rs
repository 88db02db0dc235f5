//! Library representation

use serde::{Deserialize, Serialize};

use crate::entry::BibEntry;
use crate::error::{DomainError, Result};

/// A library (collection of entries, typically from a .bib file)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Library {
    pub id: String,
    pub name: String,
    pub file_path: Option<String>,
    entries: Vec<BibEntry>,
}

impl Library {
    /// Create a new, empty library
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            file_path: None,
            entries: Vec::new(),
        }
    }

    /// Create a new library from a file path
    pub fn from_file(name: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            file_path: Some(file_path.into()),
            ..Self::new(name)
        }
    }

    /// Builder method to add entries
    pub fn with_entries(mut self, entries: impl IntoIterator<Item = BibEntry>) -> Self {
        self.entries.extend(entries);
        self
    }

    pub fn entries(&self) -> &[BibEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Point-in-time copy of all entries.
    ///
    /// Later insertions, removals and edits on the library are not visible
    /// through the snapshot.
    pub fn snapshot(&self) -> Vec<BibEntry> {
        self.entries.clone()
    }

    /// Append an entry, returning its id.
    pub fn insert(&mut self, entry: BibEntry) -> String {
        let id = entry.id.clone();
        self.entries.push(entry);
        id
    }

    /// Remove an entry by id.
    pub fn remove(&mut self, id: &str) -> Result<BibEntry> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| DomainError::EntryNotFound(id.to_string()))?;
        Ok(self.entries.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&BibEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut BibEntry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }

    /// Look up an entry by citation key.
    pub fn find_by_cite_key(&self, cite_key: &str) -> Option<&BibEntry> {
        self.entries.iter().find(|entry| entry.cite_key == cite_key)
    }

    /// Mutable access to an entry that must exist.
    pub fn entry_mut(&mut self, id: &str) -> Result<&mut BibEntry> {
        self.get_mut(id)
            .ok_or_else(|| DomainError::EntryNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntryType;

    #[test]
    fn test_library_new() {
        let lib = Library::new("My Papers");
        assert_eq!(lib.name, "My Papers");
        assert!(lib.is_empty());
        assert!(lib.file_path.is_none());
    }

    #[test]
    fn test_library_from_file() {
        let lib = Library::from_file("Work", "/Users/me/work.bib");
        assert_eq!(lib.name, "Work");
        assert_eq!(lib.file_path, Some("/Users/me/work.bib".to_string()));
    }

    #[test]
    fn test_snapshot_is_isolated() {
        let mut lib = Library::new("Lib").with_entries([
            BibEntry::new("a", EntryType::Article),
            BibEntry::new("b", EntryType::Book),
        ]);
        let snapshot = lib.snapshot();
        let removed = snapshot[0].id.clone();

        lib.insert(BibEntry::new("c", EntryType::Misc));
        lib.remove(&removed).unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(lib.len(), 2);
        assert!(lib.get(&removed).is_none());
    }

    #[test]
    fn test_remove_missing_entry() {
        let mut lib = Library::new("Lib");
        let err = lib.remove("nope").unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_find_by_cite_key() {
        let lib = Library::new("Lib").with_entries([BibEntry::new("smith2020", EntryType::Article)]);
        assert!(lib.find_by_cite_key("smith2020").is_some());
        assert!(lib.find_by_cite_key("jones2021").is_none());
    }
}
