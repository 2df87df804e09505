//! # folio
//!
//! A builder for static HTML page viewers over directories of scanned
//! book images.
//!
//! Each "book" is a directory of page images plus an optional
//! pipe-delimited table-of-contents text file. folio discovers and
//! naturally orders the pages, parses the TOC into a chapter/section
//! tree, aligns the TOC's printed page numbers with the image sequence
//! via a page offset, and writes one `viewer.html` per book from a
//! placeholder template.
//!
//! ## Quick Start
//!
//! ```no_run
//! use folio::{BuildConfig, build_all};
//!
//! let cfg = BuildConfig::new();
//! let template = std::fs::read_to_string("viewer-template.html").unwrap();
//! let report = build_all("books".as_ref(), &template, &cfg).unwrap();
//! println!("built {}/{} viewers", report.built.len(), report.total());
//! ```
//!
//! ## Working with TOCs
//!
//! ```
//! use folio::{PageMap, parse_toc};
//!
//! let outcome = parse_toc("# offset=2\nCHAPTER|1|Kinematics|start=1|end=12");
//! let map = PageMap::new(40, outcome.toc.offset);
//!
//! // printed page 1 is the third image (two pages of front matter)
//! assert_eq!(map.image_index(1), Some(2));
//! assert_eq!(map.book_page(0), -1);
//! ```

pub mod build;
pub mod config;
pub mod error;
pub mod mapper;
pub mod pages;
pub mod sort;
pub mod toc;
pub mod viewer;

pub use build::{BatchReport, BookFailure, BuildReport, build_all, build_viewer, discover_books};
pub use config::BuildConfig;
pub use error::{Error, Result};
pub use mapper::{PageInfo, PageMap, Unresolved};
pub use pages::{PageSource, find_images, resolve_page_source};
pub use sort::{natural_cmp, natural_key, natural_sort};
pub use toc::{
    Chapter, Diagnostic, MetaValue, ParseOutcome, Section, SkipReason, Toc, find_toc_file,
    parse_toc, parse_toc_file,
};
pub use viewer::{ViewerData, render_viewer};
