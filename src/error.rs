//! Error types for folio operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building a book viewer.
///
/// Per-book failures (`BookNotFound`, `NoPageSource`, `NoImages`, `Io`)
/// never abort a batch build; the batch driver records them and moves on
/// to the next book. Malformed TOC lines are not errors at all — the
/// parser reports them as [`Diagnostic`](crate::toc::Diagnostic)s.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("book directory not found: {}", .0.display())]
    BookNotFound(PathBuf),

    #[error("no page source found in {}", .0.display())]
    NoPageSource(PathBuf),

    #[error("page folders exist but contain no recognized images: {}", .0.display())]
    NoImages(PathBuf),

    #[error("viewer template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
