//! The fixed, well-known field keys.

use crate::property::{FieldProperties, FieldProperty};
use serde::{Deserialize, Serialize};

const NONE: FieldProperties = FieldProperties::empty();
const PERSONS: FieldProperties = FieldProperties::of(&[FieldProperty::PersonNames]);
const NUMERIC: FieldProperties = FieldProperties::of(&[FieldProperty::Numeric]);
const DATE: FieldProperties = FieldProperties::of(&[FieldProperty::Date]);
const MULTILINE: FieldProperties = FieldProperties::of(&[FieldProperty::MultilineText]);
const VERBATIM_LINK: FieldProperties =
    FieldProperties::of(&[FieldProperty::Verbatim, FieldProperty::External]);
const IDENTIFIER: FieldProperties =
    FieldProperties::of(&[FieldProperty::Identifier, FieldProperty::Verbatim]);
const COMMENT: FieldProperties = FieldProperties::of(&[
    FieldProperty::Comment,
    FieldProperty::MultilineText,
    FieldProperty::Verbatim,
    FieldProperty::Markdown,
]);

/// A standard bibliographic field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardField {
    Abstract,
    Address,
    Author,
    BookTitle,
    Chapter,
    Comment,
    Doi,
    Edition,
    Editor,
    Eprint,
    File,
    HowPublished,
    Institution,
    Isbn,
    Issn,
    Journal,
    Keywords,
    Month,
    Note,
    Number,
    Organization,
    Owner,
    Pages,
    PageTotal,
    Publisher,
    Review,
    School,
    Series,
    Title,
    Url,
    /// Sentinel shown last in the user summary editor.
    UserSummary,
    Volume,
    Year,
}

impl StandardField {
    /// Every standard field, sorted by name.
    pub const ALL: [StandardField; 33] = [
        Self::Abstract,
        Self::Address,
        Self::Author,
        Self::BookTitle,
        Self::Chapter,
        Self::Comment,
        Self::Doi,
        Self::Edition,
        Self::Editor,
        Self::Eprint,
        Self::File,
        Self::HowPublished,
        Self::Institution,
        Self::Isbn,
        Self::Issn,
        Self::Journal,
        Self::Keywords,
        Self::Month,
        Self::Note,
        Self::Number,
        Self::Organization,
        Self::Owner,
        Self::Pages,
        Self::PageTotal,
        Self::Publisher,
        Self::Review,
        Self::School,
        Self::Series,
        Self::Title,
        Self::Url,
        Self::UserSummary,
        Self::Volume,
        Self::Year,
    ];

    /// Canonical (lowercase) key used for serialization.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Abstract => "abstract",
            Self::Address => "address",
            Self::Author => "author",
            Self::BookTitle => "booktitle",
            Self::Chapter => "chapter",
            Self::Comment => "comment",
            Self::Doi => "doi",
            Self::Edition => "edition",
            Self::Editor => "editor",
            Self::Eprint => "eprint",
            Self::File => "file",
            Self::HowPublished => "howpublished",
            Self::Institution => "institution",
            Self::Isbn => "isbn",
            Self::Issn => "issn",
            Self::Journal => "journal",
            Self::Keywords => "keywords",
            Self::Month => "month",
            Self::Note => "note",
            Self::Number => "number",
            Self::Organization => "organization",
            Self::Owner => "owner",
            Self::Pages => "pages",
            Self::PageTotal => "pagetotal",
            Self::Publisher => "publisher",
            Self::Review => "review",
            Self::School => "school",
            Self::Series => "series",
            Self::Title => "title",
            Self::Url => "url",
            Self::UserSummary => "usersummary",
            Self::Volume => "volume",
            Self::Year => "year",
        }
    }

    /// Display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Abstract => "Abstract",
            Self::Address => "Address",
            Self::Author => "Author",
            Self::BookTitle => "Book title",
            Self::Chapter => "Chapter",
            Self::Comment => "Comment",
            Self::Doi => "DOI",
            Self::Edition => "Edition",
            Self::Editor => "Editor",
            Self::Eprint => "Eprint",
            Self::File => "File",
            Self::HowPublished => "How published",
            Self::Institution => "Institution",
            Self::Isbn => "ISBN",
            Self::Issn => "ISSN",
            Self::Journal => "Journal",
            Self::Keywords => "Keywords",
            Self::Month => "Month",
            Self::Note => "Note",
            Self::Number => "Number",
            Self::Organization => "Organization",
            Self::Owner => "Owner",
            Self::Pages => "Pages",
            Self::PageTotal => "Page total",
            Self::Publisher => "Publisher",
            Self::Review => "Review",
            Self::School => "School",
            Self::Series => "Series",
            Self::Title => "Title",
            Self::Url => "URL",
            Self::UserSummary => "Summary",
            Self::Volume => "Volume",
            Self::Year => "Year",
        }
    }

    /// The fixed property set of this field.
    pub fn properties(&self) -> FieldProperties {
        match self {
            Self::Author | Self::Editor => PERSONS,
            Self::Year | Self::Volume | Self::Number | Self::Chapter | Self::PageTotal => NUMERIC,
            Self::Edition => NUMERIC,
            Self::Month => DATE,
            Self::Abstract | Self::Note | Self::Review | Self::UserSummary => MULTILINE,
            Self::Comment => COMMENT,
            Self::Url | Self::File => VERBATIM_LINK,
            Self::Doi | Self::Isbn | Self::Issn | Self::Eprint => IDENTIFIER,
            Self::Journal => FieldProperties::of(&[FieldProperty::JournalName]),
            Self::BookTitle => FieldProperties::of(&[FieldProperty::BookName]),
            Self::Keywords | Self::Owner => FieldProperties::of(&[FieldProperty::Verbatim]),
            Self::Address
            | Self::HowPublished
            | Self::Institution
            | Self::Organization
            | Self::Pages
            | Self::Publisher
            | Self::School
            | Self::Series
            | Self::Title => NONE,
        }
    }

    /// Look up a standard field by key (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Self::ALL.into_iter().find(|field| field.name() == lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_roundtrip() {
        for field in StandardField::ALL {
            assert_eq!(StandardField::from_name(field.name()), Some(field));
        }
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(StandardField::from_name("TITLE"), Some(StandardField::Title));
        assert_eq!(StandardField::from_name("PageTotal"), Some(StandardField::PageTotal));
        assert_eq!(StandardField::from_name("summary-alice"), None);
    }

    #[test]
    fn names_are_sorted_and_unique() {
        let names: Vec<_> = StandardField::ALL.iter().map(|f| f.name()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn comment_is_markdown_multiline() {
        let props = StandardField::Comment.properties();
        assert!(props.contains(FieldProperty::Markdown));
        assert!(props.contains(FieldProperty::MultilineText));
        assert!(StandardField::UserSummary.properties().contains(FieldProperty::MultilineText));
    }
}
