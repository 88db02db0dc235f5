//! Field name parsing.
//!
//! Maps a raw key (as found in a bibliography file or typed by a user) to
//! its [`Field`] identity.

use crate::field::{Field, FieldNamespace};
use crate::standard::StandardField;

/// Parse a field key into a Field.
///
/// - standard keys match case-insensitively and are canonicalized
///   (`TITLE` -> `title`)
/// - keys carrying a dynamic namespace prefix become dynamic fields
///   (`summary-alice`)
/// - anything else is kept verbatim as a custom field
///
/// The key is taken as-is, surrounding whitespace included, so that
/// `parse_field(f.name()) == f` holds for every standard and dynamic field.
/// Never fails.
///
/// # Examples
/// ```
/// use impress_fields::{parse_field, Field, StandardField};
/// assert_eq!(parse_field("Title"), Field::standard(StandardField::Title));
/// assert_eq!(parse_field("summary-alice"), Field::summary("alice"));
/// assert!(!parse_field("x-rating").is_standard());
/// ```
pub fn parse_field(input: &str) -> Field {
    if let Some(field) = StandardField::from_name(input) {
        return Field::Standard(field);
    }

    for namespace in FieldNamespace::ALL {
        if let Some(owner) = namespace.strip(input) {
            return Field::dynamic(namespace, owner);
        }
    }

    Field::custom(input)
}

/// Parse a comma- or semicolon-separated list of field keys, trimming each
/// key and dropping blanks and repeated keys while keeping first-seen order.
pub fn parse_field_list(input: &str) -> Vec<Field> {
    let mut fields: Vec<Field> = Vec::new();
    for part in input.split([',', ';']) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let field = parse_field(part);
        if !fields.contains(&field) {
            fields.push(field);
        }
    }
    fields
}
