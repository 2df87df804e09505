//! Table-of-contents model.
//!
//! A TOC is parsed from a small pipe-delimited text file kept next to
//! the page images. `start`/`end` values are the book's *printed* page
//! numbers as authored; the offset that aligns them with the scanned
//! image sequence is stored here but applied only by the
//! [`PageMap`](crate::mapper::PageMap).

use std::collections::BTreeMap;

use serde::Serialize;

mod parser;

pub use parser::{
    Diagnostic, ParseOutcome, SkipReason, find_toc_file, parse_toc, parse_toc_file,
};

/// Extra `key=value` metadata on a chapter or section. Values that are
/// all decimal digits are coerced to integers, everything else stays a
/// string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    Int(i64),
    Text(String),
}

/// The parsed table of contents: chapters in declaration order plus the
/// page-numbering offset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Toc {
    pub chapters: Vec<Chapter>,
    pub offset: i64,
}

/// One chapter: a code, a title, an inclusive printed-page range, and
/// its sections in declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct Chapter {
    pub code: String,
    pub title: String,
    pub start: i64,
    pub end: i64,
    pub sections: Vec<Section>,
    /// Unrecognized `key=value` pairs, kept for forward compatibility
    /// but not part of the viewer payload.
    #[serde(skip)]
    pub extra: BTreeMap<String, MetaValue>,
}

/// One section within a chapter. Same shape as a chapter minus nesting.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub code: String,
    pub title: String,
    pub start: i64,
    pub end: i64,
    #[serde(skip)]
    pub extra: BTreeMap<String, MetaValue>,
}

impl Toc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of sections across all chapters.
    pub fn section_count(&self) -> usize {
        self.chapters.iter().map(|c| c.sections.len()).sum()
    }
}

impl Chapter {
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            start: 1,
            end: 1,
            sections: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_pages(mut self, start: i64, end: i64) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }
}

impl Section {
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            start: 1,
            end: 1,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_pages(mut self, start: i64, end: i64) -> Self {
        self.start = start;
        self.end = end;
        self
    }
}
