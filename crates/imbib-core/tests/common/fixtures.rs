//! Shared builders for integration tests

use std::cell::RefCell;

use imbib_core::{BibEntry, EntryType, Library, Notifier, StandardField};

/// Install a test subscriber once; honours `RUST_LOG`.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `n` articles keyed `e1`..`en`, each with a title.
pub fn sample_entries(n: usize) -> Vec<BibEntry> {
    (1..=n)
        .map(|i| {
            BibEntry::new(format!("e{}", i), EntryType::Article)
                .with_field(StandardField::Title, format!("Paper {}", i))
        })
        .collect()
}

/// An article with a `pages` value.
#[allow(dead_code)]
pub fn entry_with_pages(cite_key: &str, pages: &str) -> BibEntry {
    BibEntry::new(cite_key, EntryType::Article).with_field(StandardField::Pages, pages)
}

#[allow(dead_code)]
pub fn sample_library(n: usize) -> Library {
    Library::new("Test Library").with_entries(sample_entries(n))
}

/// Notifier that keeps every message.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.messages.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
