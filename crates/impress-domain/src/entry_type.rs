//! Bibliographic entry types and their base field sets

use impress_fields::{Field, StandardField};
use serde::{Deserialize, Serialize};

/// Entry type of a bibliographic entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Article,
    Book,
    InBook,
    InCollection,
    InProceedings,
    MastersThesis,
    #[default]
    Misc,
    PhdThesis,
    Proceedings,
    TechReport,
    Unpublished,
    Online,
    Software,
}

impl EntryType {
    /// Parse an entry type from a string (case-insensitive).
    ///
    /// Unknown types map to `Misc`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "article" => Self::Article,
            "book" => Self::Book,
            "inbook" => Self::InBook,
            "incollection" => Self::InCollection,
            "inproceedings" | "conference" => Self::InProceedings,
            "mastersthesis" => Self::MastersThesis,
            "phdthesis" => Self::PhdThesis,
            "proceedings" => Self::Proceedings,
            "techreport" => Self::TechReport,
            "unpublished" => Self::Unpublished,
            "online" | "electronic" | "www" => Self::Online,
            "software" => Self::Software,
            _ => Self::Misc,
        }
    }

    /// Canonical string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Book => "book",
            Self::InBook => "inbook",
            Self::InCollection => "incollection",
            Self::InProceedings => "inproceedings",
            Self::MastersThesis => "mastersthesis",
            Self::Misc => "misc",
            Self::PhdThesis => "phdthesis",
            Self::Proceedings => "proceedings",
            Self::TechReport => "techreport",
            Self::Unpublished => "unpublished",
            Self::Online => "online",
            Self::Software => "software",
        }
    }

    /// Fields shown for every entry of this type, in display order.
    pub fn base_fields(&self) -> Vec<Field> {
        use StandardField::*;

        let specific: &[StandardField] = match self {
            Self::Article => &[Author, Title, Journal, Year, Volume, Number, Pages],
            Self::Book => &[Author, Editor, Title, Publisher, Year, Edition, Isbn],
            Self::InBook => &[Author, Title, Chapter, Pages, Publisher, Year],
            Self::InCollection => &[Author, Title, BookTitle, Editor, Publisher, Pages, Year],
            Self::InProceedings => &[Author, Title, BookTitle, Pages, Organization, Year],
            Self::MastersThesis | Self::PhdThesis => &[Author, Title, School, Year],
            Self::Proceedings => &[Editor, Title, Publisher, Year],
            Self::TechReport => &[Author, Title, Institution, Number, Year],
            Self::Unpublished => &[Author, Title, Note, Year],
            Self::Online => &[Author, Title, Url, Year],
            Self::Software => &[Author, Title, Url, Year],
            Self::Misc => &[Author, Title, HowPublished, Year],
        };

        specific
            .iter()
            .chain([Doi, Abstract].iter())
            .map(|field| Field::standard(*field))
            .collect()
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_type_parsing() {
        assert_eq!(EntryType::parse("article"), EntryType::Article);
        assert_eq!(EntryType::parse("ARTICLE"), EntryType::Article);
        assert_eq!(EntryType::parse("conference"), EntryType::InProceedings);
        assert_eq!(EntryType::parse("unknown_type"), EntryType::Misc);
    }

    #[test]
    fn test_base_fields_start_with_type_specific() {
        let fields = EntryType::Article.base_fields();
        assert_eq!(fields.first(), Some(&Field::standard(StandardField::Author)));
        assert!(fields.contains(&Field::standard(StandardField::Journal)));
        assert_eq!(fields.last(), Some(&Field::standard(StandardField::Abstract)));
    }

    #[test]
    fn test_base_fields_have_no_duplicates() {
        for entry_type in [EntryType::Article, EntryType::Book, EntryType::Misc] {
            let fields = entry_type.base_fields();
            let mut names: Vec<_> = fields.iter().map(|f| f.name()).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), fields.len());
        }
    }
}
