//! Page-index mapping: aligning printed page numbers with image files.
//!
//! TOC entries are authored against a book's printed pagination, which
//! rarely starts at image #1 (covers and front matter come first). The
//! offset bridges the two: image index `i` shows printed page
//! `i + 1 - offset`. Book pages can legitimately be zero or negative
//! for front-matter images.

use serde::Serialize;

use crate::toc::Toc;

/// The page-number projection for one discovered image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub image_index: usize,
    pub book_page: i64,
}

/// Maps between 0-based image indices and printed book page numbers for
/// one book.
#[derive(Debug, Clone, Copy)]
pub struct PageMap {
    page_count: usize,
    offset: i64,
}

/// A TOC entry whose printed page range has no matching image, e.g. a
/// TOC authored for a longer edition than what was scanned. Retained as
/// data, reported here, never a build failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    pub code: String,
    pub title: String,
    pub start: i64,
    pub end: i64,
}

impl PageMap {
    pub fn new(page_count: usize, offset: i64) -> Self {
        Self { page_count, offset }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Printed page number shown by image index `i`.
    pub fn book_page(&self, image_index: usize) -> i64 {
        image_index as i64 + 1 - self.offset
    }

    /// Reverse lookup: the image index showing a printed page number,
    /// or `None` when the page falls outside the discovered range.
    pub fn image_index(&self, book_page: i64) -> Option<usize> {
        let index = book_page - 1 + self.offset;
        if index >= 0 && (index as usize) < self.page_count {
            Some(index as usize)
        } else {
            None
        }
    }

    /// Per-page projection records, in image order.
    pub fn page_infos(&self) -> Vec<PageInfo> {
        (0..self.page_count)
            .map(|i| PageInfo {
                image_index: i,
                book_page: self.book_page(i),
            })
            .collect()
    }

    /// TOC entries (chapters and sections) whose printed range does not
    /// fully map onto discovered images. An entry is resolved when both
    /// its `start` and `end` have a matching image index.
    pub fn unresolved_entries(&self, toc: &Toc) -> Vec<Unresolved> {
        let mut unresolved = Vec::new();
        for chapter in &toc.chapters {
            if !self.covers(chapter.start, chapter.end) {
                unresolved.push(Unresolved {
                    code: chapter.code.clone(),
                    title: chapter.title.clone(),
                    start: chapter.start,
                    end: chapter.end,
                });
            }
            for section in &chapter.sections {
                if !self.covers(section.start, section.end) {
                    unresolved.push(Unresolved {
                        code: section.code.clone(),
                        title: section.title.clone(),
                        start: section.start,
                        end: section.end,
                    });
                }
            }
        }
        unresolved
    }

    fn covers(&self, start: i64, end: i64) -> bool {
        self.image_index(start).is_some() && self.image_index(end).is_some()
    }
}
