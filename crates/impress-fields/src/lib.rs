//! impress-fields: Field identity, field properties, and the dynamic field registry.
//!
//! A field is the key of one metadata slot on a bibliographic entry. Three
//! kinds coexist under one [`Field`] type:
//! - standard fields (`title`, `pages`, ...), fixed at compile time
//! - dynamic fields minted per owner (`summary-alice`, `userNote-bob`)
//! - custom fields, any other key a user or file introduces
//!
//! Fields compare and hash by their canonical name, never by origin.
//! Each kind declares a fixed [`FieldProperties`] set that renderers and
//! exporters consult (multi-line, verbatim, markdown, ...).

pub mod config;
pub mod field;
pub mod parse;
pub mod property;
pub mod registry;
pub mod standard;

pub use config::*;
pub use field::*;
pub use parse::*;
pub use property::*;
pub use registry::*;
pub use standard::*;
