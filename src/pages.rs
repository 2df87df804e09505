//! Page discovery: which directory holds a book's images, and in what
//! order they are read.
//!
//! A book's pages either sit directly in the book directory or in one
//! subfolder (scans are usually delivered that way). Thumbnail folders
//! (`thumbs/`, `tn/`, ...) are never treated as a page source.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::sort::natural_sort;

/// The directory actually holding a book's pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSource {
    /// Absolute directory containing the images.
    pub dir: PathBuf,
    /// Path prefix for the viewer's image URLs: empty when pages sit in
    /// the book root, else the subfolder name.
    pub img_base: String,
}

/// List the recognized image file names directly inside `dir`, in
/// natural order. A missing directory yields an empty list; any other
/// read failure is an I/O error.
pub fn find_images(dir: &Path, cfg: &BuildConfig) -> Result<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if cfg.is_image_name(&name) {
            images.push(name);
        }
    }

    natural_sort(&mut images);
    Ok(images)
}

/// Resolve which directory holds the book's pages.
///
/// The book directory itself is authoritative when it directly contains
/// at least one image; subfolders are not consulted in that case.
/// Otherwise immediate subdirectories are scanned in name order
/// (thumbnail aliases skipped) and the first one containing an image
/// wins. Scan order is name-sorted, never raw OS enumeration order, so
/// repeated builds resolve identically.
///
/// When no candidate directory exists at all the error is
/// [`Error::NoPageSource`]; when candidate folders exist but none holds
/// a recognized image it is [`Error::NoImages`], so callers can tell
/// "no folder" from "empty folder".
pub fn resolve_page_source(book_dir: &Path, cfg: &BuildConfig) -> Result<PageSource> {
    if !book_dir.is_dir() {
        return Err(Error::BookNotFound(book_dir.to_path_buf()));
    }

    if !find_images(book_dir, cfg)?.is_empty() {
        return Ok(PageSource {
            dir: book_dir.to_path_buf(),
            img_base: String::new(),
        });
    }

    let mut subdirs = Vec::new();
    for entry in fs::read_dir(book_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            subdirs.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    subdirs.sort();

    let mut candidates = 0;
    for name in subdirs {
        if cfg.is_thumb_dir(&name) {
            continue;
        }
        candidates += 1;
        let dir = book_dir.join(&name);
        if !find_images(&dir, cfg)?.is_empty() {
            return Ok(PageSource {
                dir,
                img_base: name,
            });
        }
    }

    if candidates > 0 {
        Err(Error::NoImages(book_dir.to_path_buf()))
    } else {
        Err(Error::NoPageSource(book_dir.to_path_buf()))
    }
}
