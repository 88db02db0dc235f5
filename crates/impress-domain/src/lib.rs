//! Bibliographic domain types for the impress suite
//!
//! This crate provides the entry metadata model:
//! - BibEntry: an ordered mapping from field identity to value
//! - EntryType: article, book, thesis, ... and their base field sets
//! - PageRange: page range parsing behind derived page totals
//! - Library: an ordered collection of entries with snapshot access
//!
//! Field identities come from `impress-fields` and are re-exported here.

pub mod entry;
pub mod entry_type;
pub mod error;
pub mod library;
pub mod pages;

pub use entry::*;
pub use entry_type::*;
pub use error::*;
pub use library::*;
pub use pages::*;

pub use impress_fields::{Field, FieldNamespace, FieldProperty, StandardField};
