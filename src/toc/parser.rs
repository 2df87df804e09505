//! Parser for the pipe-delimited TOC grammar.
//!
//! The grammar is hand-authored and intentionally forgiving: malformed
//! lines are skipped, never fatal. Each skip is recorded as a
//! [`Diagnostic`] so callers can report how much of a file was ignored
//! without treating it as an error.
//!
//! ```text
//! # offset=2
//! CHAPTER|2.1|Kinematics|start=1|end=12
//! SECTION|2.1.1|SUVAT|start=1|end=4
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{Chapter, MetaValue, Section, Toc};
use crate::error::Result;

/// Why a TOC line was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// First token is not CHAPTER, SECTION, or OFFSET.
    UnknownKind(String),
    /// A record with fewer tokens than its kind requires.
    TooFewTokens,
    /// A SECTION line before any CHAPTER line.
    SectionWithoutChapter,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnknownKind(kind) => write!(f, "unknown record kind {kind:?}"),
            SkipReason::TooFewTokens => write!(f, "too few tokens"),
            SkipReason::SectionWithoutChapter => write!(f, "SECTION before any CHAPTER"),
        }
    }
}

/// One skipped line: 1-based line number plus the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub reason: SkipReason,
}

/// Result of parsing a TOC: the accepted structure plus every line that
/// was ignored.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub toc: Toc,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse TOC text into chapters, sections, and the page offset.
///
/// Offsets come in two equivalent forms, both of which appear in
/// hand-authored files: the `# offset=<int>` directive and the older
/// `OFFSET|<int>` record. Either may appear anywhere; the last one
/// parsed wins, and a malformed integer leaves the offset unchanged.
/// Raw `start`/`end` values are stored as authored; the offset is not
/// applied here.
pub fn parse_toc(text: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    let mut current: Option<usize> = None;

    for (lineno, raw) in text.lines().enumerate() {
        let lineno = lineno + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix('#') {
            if let Some((key, value)) = rest.split_once('=')
                && key.trim().eq_ignore_ascii_case("offset")
                && let Ok(offset) = value.trim().parse::<i64>()
            {
                outcome.toc.offset = offset;
            }
            continue;
        }

        let tokens: Vec<&str> = line
            .split('|')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        let Some(&kind) = tokens.first() else {
            outcome.diagnostics.push(Diagnostic {
                line: lineno,
                reason: SkipReason::TooFewTokens,
            });
            continue;
        };

        if kind.eq_ignore_ascii_case("OFFSET") {
            match tokens.get(1) {
                Some(value) => {
                    if let Ok(offset) = value.parse::<i64>() {
                        outcome.toc.offset = offset;
                    }
                }
                None => outcome.diagnostics.push(Diagnostic {
                    line: lineno,
                    reason: SkipReason::TooFewTokens,
                }),
            }
        } else if kind.eq_ignore_ascii_case("CHAPTER") {
            if tokens.len() < 3 {
                outcome.diagnostics.push(Diagnostic {
                    line: lineno,
                    reason: SkipReason::TooFewTokens,
                });
                continue;
            }
            let (start, end, extra) = parse_page_range(&tokens[3..]);
            let mut chapter = Chapter::new(tokens[1], tokens[2]).with_pages(start, end);
            chapter.extra = extra;
            outcome.toc.chapters.push(chapter);
            current = Some(outcome.toc.chapters.len() - 1);
        } else if kind.eq_ignore_ascii_case("SECTION") {
            if tokens.len() < 3 {
                outcome.diagnostics.push(Diagnostic {
                    line: lineno,
                    reason: SkipReason::TooFewTokens,
                });
                continue;
            }
            let Some(chapter_idx) = current else {
                outcome.diagnostics.push(Diagnostic {
                    line: lineno,
                    reason: SkipReason::SectionWithoutChapter,
                });
                continue;
            };
            let (start, end, extra) = parse_page_range(&tokens[3..]);
            let mut section = Section::new(tokens[1], tokens[2]).with_pages(start, end);
            section.extra = extra;
            outcome.toc.chapters[chapter_idx].sections.push(section);
        } else {
            outcome.diagnostics.push(Diagnostic {
                line: lineno,
                reason: SkipReason::UnknownKind(kind.to_string()),
            });
        }
    }

    outcome
}

/// Parse trailing `key=value` tokens, pulling out the typed `start` and
/// `end` (defaults: start 1, end = start). Remaining pairs stay in the
/// extra map.
fn parse_page_range(tokens: &[&str]) -> (i64, i64, BTreeMap<String, MetaValue>) {
    let mut extra = BTreeMap::new();
    for token in tokens {
        // split on the first '=' only; values may contain '='
        if let Some((key, value)) = token.split_once('=') {
            let value = value.trim();
            let parsed = if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
                value
                    .parse::<i64>()
                    .map(MetaValue::Int)
                    .unwrap_or_else(|_| MetaValue::Text(value.to_string()))
            } else {
                MetaValue::Text(value.to_string())
            };
            extra.insert(key.trim().to_string(), parsed);
        }
    }

    let start = match extra.remove("start") {
        Some(MetaValue::Int(n)) => n,
        Some(other) => {
            extra.insert("start".to_string(), other);
            1
        }
        None => 1,
    };
    let end = match extra.remove("end") {
        Some(MetaValue::Int(n)) => n,
        Some(other) => {
            extra.insert("end".to_string(), other);
            start
        }
        None => start,
    };

    (start, end, extra)
}

/// Parse a TOC file from disk. An absent file is not an error: it
/// yields an empty TOC with offset 0. The bytes are decoded as UTF-8
/// with substitution, so stray invalid bytes in a hand-edited file
/// never abort the build.
pub fn parse_toc_file(path: &Path) -> Result<ParseOutcome> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ParseOutcome::default()),
        Err(e) => return Err(e.into()),
    };
    let (text, _, _) = encoding_rs::UTF_8.decode(&bytes);
    Ok(parse_toc(&text))
}

/// Locate the TOC file in a book directory: among `*.txt` files in name
/// order, the first whose name contains "toc" (case-insensitive) is
/// preferred, else the first one. `None` when the book has no TOC.
pub fn find_toc_file(book_dir: &Path) -> Result<Option<PathBuf>> {
    let mut txt_files = Vec::new();
    for entry in fs::read_dir(book_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.to_lowercase().ends_with(".txt") {
            txt_files.push(name);
        }
    }
    txt_files.sort();

    let chosen = txt_files
        .iter()
        .find(|name| name.to_lowercase().contains("toc"))
        .or_else(|| txt_files.first());

    Ok(chosen.map(|name| book_dir.join(name)))
}
