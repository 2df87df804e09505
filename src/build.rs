//! Build driver: one book at a time, and a batch over a books root.
//!
//! A failing book never aborts the batch; the batch report records
//! which books failed and why, and the caller decides how to present
//! that.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::mapper::PageMap;
use crate::pages::{find_images, resolve_page_source};
use crate::toc::{ParseOutcome, find_toc_file, parse_toc_file};
use crate::viewer::{ViewerData, render_viewer};

/// Outcome of building one viewer.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub book: String,
    pub pages: usize,
    pub chapters: usize,
    pub sections: usize,
    pub offset: i64,
    /// TOC lines skipped by the parser.
    pub skipped_lines: usize,
    /// TOC entries whose printed range has no matching image.
    pub unresolved: usize,
    /// Path of the written viewer file.
    pub output: PathBuf,
}

/// One failed book in a batch.
#[derive(Debug)]
pub struct BookFailure {
    pub book: String,
    pub error: Error,
}

/// Outcome of a batch build.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub built: Vec<BuildReport>,
    pub failed: Vec<BookFailure>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.built.len() + self.failed.len()
    }
}

/// Build the viewer for a single book directory and write it as
/// `<book_dir>/<output_name>`.
pub fn build_viewer(book_dir: &Path, template: &str, cfg: &BuildConfig) -> Result<BuildReport> {
    let book = book_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| book_dir.display().to_string());

    let source = resolve_page_source(book_dir, cfg)?;
    // non-empty: the resolver only returns a directory that held images
    let images = find_images(&source.dir, cfg)?;

    let outcome = match find_toc_file(book_dir)? {
        Some(toc_path) => parse_toc_file(&toc_path)?,
        None => ParseOutcome::default(),
    };

    let map = PageMap::new(images.len(), outcome.toc.offset);
    let unresolved = map.unresolved_entries(&outcome.toc);
    let page_infos = map.page_infos();

    let data = ViewerData {
        book_name: &book,
        img_base: &source.img_base,
        pages: &images,
        toc: &outcome.toc,
        page_infos: &page_infos,
    };
    let html = render_viewer(template, &data)?;

    let output = book_dir.join(&cfg.output_name);
    fs::write(&output, html)?;

    Ok(BuildReport {
        book,
        pages: images.len(),
        chapters: outcome.toc.chapters.len(),
        sections: outcome.toc.section_count(),
        offset: outcome.toc.offset,
        skipped_lines: outcome.diagnostics.len(),
        unresolved: unresolved.len(),
        output,
    })
}

/// List the book directories under a books root: immediate
/// subdirectories with a resolvable page source, dot-dirs skipped,
/// sorted by lower-cased name. Directories without pages are not
/// books and are left out; a directory that fails to scan (e.g.
/// unreadable) stays in the list so the batch can record its failure
/// per book instead of aborting.
pub fn discover_books(books_root: &Path, cfg: &BuildConfig) -> Result<Vec<PathBuf>> {
    if !books_root.is_dir() {
        return Err(Error::BookNotFound(books_root.to_path_buf()));
    }

    let mut books = Vec::new();
    for entry in fs::read_dir(books_root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        match resolve_page_source(&entry.path(), cfg) {
            Ok(_) => books.push(entry.path()),
            Err(Error::NoPageSource(_)) | Err(Error::NoImages(_)) => {}
            Err(_) => books.push(entry.path()),
        }
    }

    books.sort_by_key(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });
    Ok(books)
}

/// Build viewers for every book under `books_root`. Per-book failures
/// are collected, never propagated.
pub fn build_all(books_root: &Path, template: &str, cfg: &BuildConfig) -> Result<BatchReport> {
    let mut report = BatchReport::default();
    for book_dir in discover_books(books_root, cfg)? {
        match build_viewer(&book_dir, template, cfg) {
            Ok(built) => report.built.push(built),
            Err(error) => report.failed.push(BookFailure {
                book: book_dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                error,
            }),
        }
    }
    Ok(report)
}
