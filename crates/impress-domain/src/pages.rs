//! Page range parsing and page totals

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    // "12--20", "12-20", "12–20" (en dash), "12 — 20", "S12-S20"
    static ref RANGE_REGEX: Regex =
        Regex::new(r"^\s*([A-Za-z]*)(\d+)\s*(?:-{1,3}|–|—)\s*([A-Za-z]*)(\d+)\s*$").unwrap();
    static ref SINGLE_PAGE_REGEX: Regex = Regex::new(r"^\s*[A-Za-z]*(\d+)\s*$").unwrap();
}

/// An inclusive numeric page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub first: u32,
    pub last: u32,
}

impl PageRange {
    /// Parse a `pages` value.
    ///
    /// Accepts a single page or a range separated by one to three hyphens or
    /// an en/em dash, with an optional letter prefix (`S12--S20`). Returns
    /// `None` for anything else, including descending ranges, ranges whose
    /// endpoints carry different prefixes, and ranges too long to count.
    pub fn parse(value: &str) -> Option<Self> {
        if let Some(caps) = RANGE_REGEX.captures(value) {
            if !caps[1].eq_ignore_ascii_case(&caps[3]) {
                return None;
            }
            let first: u32 = caps[2].parse().ok()?;
            let last: u32 = caps[4].parse().ok()?;
            let range = Self { first, last };
            return range.count().map(|_| range);
        }

        let caps = SINGLE_PAGE_REGEX.captures(value)?;
        let page: u32 = caps[1].parse().ok()?;
        Some(Self {
            first: page,
            last: page,
        })
    }

    /// Number of pages covered, both endpoints included. `None` when the
    /// range is descending or its count does not fit in a `u32`.
    pub fn count(&self) -> Option<u32> {
        self.last.checked_sub(self.first)?.checked_add(1)
    }
}
