//! End-to-end build tests over real (temporary) book directory trees.

use std::fs;
use std::path::{Path, PathBuf};

use folio::{BuildConfig, Error, build_all, build_viewer, discover_books};

const TEMPLATE: &str = "<html><head><title>__BOOK_NAME__</title></head>\
<body><script>\
const IMG_BASE=__IMG_BASE__;\
const PAGES=__PAGES__;\
const PAGE_INFO=__PAGE_INFO__;\
const TOC=__TOC__;\
const PAGE_OFFSET=__PAGE_OFFSET__;\
</script></body></html>";

/// Create a book directory with page image files (in `subdir` when
/// given) and an optional TOC file.
fn make_book(
    root: &Path,
    name: &str,
    subdir: Option<&str>,
    pages: &[&str],
    toc: Option<&str>,
) -> PathBuf {
    let book_dir = root.join(name);
    let pages_dir = match subdir {
        Some(sub) => book_dir.join(sub),
        None => book_dir.clone(),
    };
    fs::create_dir_all(&pages_dir).unwrap();
    for page in pages {
        fs::write(pages_dir.join(page), b"").unwrap();
    }
    if let Some(toc) = toc {
        fs::write(book_dir.join("toc.txt"), toc).unwrap();
    }
    book_dir
}

fn viewer_json(book_dir: &Path, marker: &str) -> serde_json::Value {
    let html = fs::read_to_string(book_dir.join("viewer.html")).unwrap();
    let start = html.find(marker).unwrap() + marker.len();
    let end = html[start..].find(';').unwrap() + start;
    serde_json::from_str(&html[start..end]).unwrap()
}

#[test]
fn test_build_book_with_subfolder_and_toc() {
    let tmp = tempfile::tempdir().unwrap();
    let book = make_book(
        tmp.path(),
        "Mechanics",
        Some("pages"),
        &["p10.webp", "p2.webp", "p1.webp"],
        Some("# offset=2\nCHAPTER|1|Kinematics|start=1|end=12\nSECTION|1.1|SUVAT|start=1|end=4\n"),
    );

    let report = build_viewer(&book, TEMPLATE, &BuildConfig::new()).unwrap();
    assert_eq!(report.pages, 3);
    assert_eq!(report.chapters, 1);
    assert_eq!(report.sections, 1);
    assert_eq!(report.offset, 2);
    assert_eq!(report.skipped_lines, 0);

    let html = fs::read_to_string(book.join("viewer.html")).unwrap();
    assert!(html.contains("<title>Mechanics</title>"));
    assert!(html.contains("const IMG_BASE=\"pages\";"));

    // pages come out naturally ordered
    let pages = viewer_json(&book, "const PAGES=");
    assert_eq!(
        pages,
        serde_json::json!(["p1.webp", "p2.webp", "p10.webp"])
    );

    let toc = viewer_json(&book, "const TOC=");
    assert_eq!(toc["offset"], 2);
    assert_eq!(toc["chapters"][0]["title"], "Kinematics");
    assert_eq!(toc["chapters"][0]["sections"][0]["code"], "1.1");
}

#[test]
fn test_build_book_without_toc() {
    let tmp = tempfile::tempdir().unwrap();
    let book = make_book(tmp.path(), "Album", None, &["1.jpg", "2.jpg"], None);

    let report = build_viewer(&book, TEMPLATE, &BuildConfig::new()).unwrap();
    assert_eq!(report.chapters, 0);
    assert_eq!(report.offset, 0);

    let toc = viewer_json(&book, "const TOC=");
    assert_eq!(toc, serde_json::json!({ "chapters": [], "offset": 0 }));
}

#[test]
fn test_offset_mapping_in_page_info() {
    let tmp = tempfile::tempdir().unwrap();
    let book = make_book(
        tmp.path(),
        "Offset",
        None,
        &["1.png", "2.png", "3.png", "4.png", "5.png"],
        Some("# offset=3\n"),
    );

    build_viewer(&book, TEMPLATE, &BuildConfig::new()).unwrap();

    let info = viewer_json(&book, "const PAGE_INFO=");
    let book_pages: Vec<i64> = info
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["book_page"].as_i64().unwrap())
        .collect();
    assert_eq!(book_pages, vec![-2, -1, 0, 1, 2]);
}

#[test]
fn test_thumbs_folder_not_used_as_page_source() {
    let tmp = tempfile::tempdir().unwrap();
    let book = make_book(tmp.path(), "Scans", Some("Thumbs"), &["t1.webp"], None);
    fs::create_dir(book.join("pages")).unwrap();
    fs::write(book.join("pages/p1.webp"), b"").unwrap();

    build_viewer(&book, TEMPLATE, &BuildConfig::new()).unwrap();

    let html = fs::read_to_string(book.join("viewer.html")).unwrap();
    assert!(html.contains("const IMG_BASE=\"pages\";"));
}

#[test]
fn test_unresolved_chapter_retained_not_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let pages: Vec<String> = (1..=10).map(|i| format!("{i}.png")).collect();
    let page_refs: Vec<&str> = pages.iter().map(|s| s.as_str()).collect();
    let book = make_book(
        tmp.path(),
        "ShortScan",
        None,
        &page_refs,
        Some("CHAPTER|C1|Intro|start=1|end=5\nCHAPTER|C9|Appendix|start=100\n"),
    );

    let report = build_viewer(&book, TEMPLATE, &BuildConfig::new()).unwrap();
    assert_eq!(report.unresolved, 1);

    // the out-of-range chapter is still in the payload
    let toc = viewer_json(&book, "const TOC=");
    assert_eq!(toc["chapters"].as_array().unwrap().len(), 2);
    assert_eq!(toc["chapters"][1]["start"], 100);
}

#[test]
fn test_malformed_toc_lines_counted_not_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let book = make_book(
        tmp.path(),
        "Messy",
        None,
        &["1.gif"],
        Some("SECTION|S1|Orphan\nCHAPTER|C1\nWHAT|ever|x\nCHAPTER|C1|Intro\n"),
    );

    let report = build_viewer(&book, TEMPLATE, &BuildConfig::new()).unwrap();
    assert_eq!(report.skipped_lines, 3);
    assert_eq!(report.chapters, 1);
}

#[test]
fn test_missing_book_dir_reports_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let err = build_viewer(&tmp.path().join("nope"), TEMPLATE, &BuildConfig::new()).unwrap_err();
    assert!(matches!(err, Error::BookNotFound(_)));
}

#[test]
fn test_book_without_images_reports_no_page_source() {
    let tmp = tempfile::tempdir().unwrap();
    let book = tmp.path().join("Empty");
    fs::create_dir(&book).unwrap();
    fs::write(book.join("toc.txt"), "CHAPTER|C1|Intro\n").unwrap();

    let err = build_viewer(&book, TEMPLATE, &BuildConfig::new()).unwrap_err();
    assert!(matches!(err, Error::NoPageSource(_)));
}

#[test]
fn test_discover_books_filters_and_sorts() {
    let tmp = tempfile::tempdir().unwrap();
    make_book(tmp.path(), "beta", None, &["1.png"], None);
    make_book(tmp.path(), "Alpha", None, &["1.png"], None);
    make_book(tmp.path(), ".hidden", None, &["1.png"], None);
    fs::create_dir(tmp.path().join("no-images")).unwrap();

    let books = discover_books(tmp.path(), &BuildConfig::new()).unwrap();
    let names: Vec<_> = books
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["Alpha", "beta"]);
}

#[test]
fn test_batch_builds_every_book() {
    let tmp = tempfile::tempdir().unwrap();
    make_book(tmp.path(), "One", None, &["1.png"], None);
    make_book(tmp.path(), "Two", Some("pages"), &["1.png"], Some("# offset=1\n"));
    fs::create_dir(tmp.path().join("not-a-book")).unwrap();

    let batch = build_all(tmp.path(), TEMPLATE, &BuildConfig::new()).unwrap();
    assert_eq!(batch.built.len(), 2);
    assert!(batch.failed.is_empty());
    assert!(tmp.path().join("One/viewer.html").is_file());
    assert!(tmp.path().join("Two/viewer.html").is_file());
}

#[test]
fn test_custom_output_name() {
    let tmp = tempfile::tempdir().unwrap();
    let book = make_book(tmp.path(), "Custom", None, &["1.png"], None);

    let cfg = BuildConfig::new().with_output_name("looker.html");
    build_viewer(&book, TEMPLATE, &cfg).unwrap();
    assert!(book.join("looker.html").is_file());
    assert!(!book.join("viewer.html").exists());
}

#[test]
fn test_empty_page_folder_reports_no_images() {
    let tmp = tempfile::tempdir().unwrap();
    let book = tmp.path().join("Hollow");
    fs::create_dir_all(book.join("pages")).unwrap();
    fs::write(book.join("pages/notes.txt"), "").unwrap();

    let err = build_viewer(&book, TEMPLATE, &BuildConfig::new()).unwrap_err();
    assert!(matches!(err, Error::NoImages(_)));

    // and the batch leaves it out rather than failing on it
    let batch = build_all(tmp.path(), TEMPLATE, &BuildConfig::new()).unwrap();
    assert_eq!(batch.total(), 0);
}

#[cfg(unix)]
#[test]
fn test_unreadable_book_does_not_abort_batch() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    make_book(tmp.path(), "Good", None, &["1.png"], None);
    let bad = make_book(tmp.path(), "Bad", None, &["1.png"], None);
    fs::set_permissions(&bad, fs::Permissions::from_mode(0o000)).unwrap();
    // mode 000 does not stop a privileged test runner
    let readable = fs::read_dir(&bad).is_ok();

    let batch = build_all(tmp.path(), TEMPLATE, &BuildConfig::new()).unwrap();
    fs::set_permissions(&bad, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(batch.built.iter().any(|r| r.book == "Good"));
    if readable {
        assert!(batch.failed.is_empty());
    } else {
        assert_eq!(batch.failed.len(), 1);
        assert_eq!(batch.failed[0].book, "Bad");
        assert!(matches!(batch.failed[0].error, Error::Io(_)));
    }
}

#[test]
fn test_missing_books_root_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let err = build_all(&tmp.path().join("gone"), TEMPLATE, &BuildConfig::new()).unwrap_err();
    assert!(matches!(err, Error::BookNotFound(_)));
}
