//! Viewer assembly: embedding book data into the HTML template.
//!
//! The template is a static HTML file with `__PLACEHOLDER__` markers.
//! Everything structured is embedded as literal JSON so the viewer's
//! script can consume it directly; integers stay integers, strings stay
//! strings, and ordering is preserved.

use crate::error::Result;
use crate::mapper::PageInfo;
use crate::toc::Toc;

/// Everything the template needs for one book.
#[derive(Debug, Clone)]
pub struct ViewerData<'a> {
    /// Book directory name, shown as the title.
    pub book_name: &'a str,
    /// Image URL prefix: empty when pages sit in the book root.
    pub img_base: &'a str,
    /// Ordered image file names.
    pub pages: &'a [String],
    /// Chapter tree plus offset.
    pub toc: &'a Toc,
    /// Per-page book-page projection, in image order.
    pub page_infos: &'a [PageInfo],
}

/// Substitute the viewer data into a template.
///
/// Placeholders: `__BOOK_NAME__` (raw text), `__IMG_BASE__`,
/// `__PAGES__`, `__PAGE_INFO__`, `__TOC__` (JSON), and
/// `__PAGE_OFFSET__` (bare integer).
pub fn render_viewer(template: &str, data: &ViewerData<'_>) -> Result<String> {
    let html = template
        .replace("__BOOK_NAME__", data.book_name)
        .replace("__IMG_BASE__", &serde_json::to_string(data.img_base)?)
        .replace("__PAGES__", &serde_json::to_string(data.pages)?)
        .replace("__PAGE_INFO__", &serde_json::to_string(data.page_infos)?)
        .replace("__TOC__", &serde_json::to_string(data.toc)?)
        .replace("__PAGE_OFFSET__", &data.toc.offset.to_string());
    Ok(html)
}
