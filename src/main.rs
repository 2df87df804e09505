//! folio - Book viewer builder

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use folio::{BuildConfig, Error, build_all, build_viewer};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about = "Build HTML viewers for page-image book galleries", long_about = None)]
#[command(after_help = "EXAMPLES:
    folio books                  Build viewers for every book under books/
    folio books -b books/Mechanics
                                 Rebuild a single book
    folio books -t my-template.html -o looker.html
                                 Custom template and output name")]
struct Cli {
    /// Books root directory (each subdirectory is one book)
    #[arg(value_name = "BOOKS_ROOT")]
    books_root: PathBuf,

    /// Viewer template file with __PLACEHOLDER__ markers
    #[arg(short, long, value_name = "FILE", default_value = "viewer-template.html")]
    template: PathBuf,

    /// Build one book directory instead of the whole root
    #[arg(short, long, value_name = "DIR")]
    book: Option<PathBuf>,

    /// File name of the generated viewer
    #[arg(short, long, value_name = "NAME", default_value = "viewer.html")]
    output: String,

    /// Suppress per-book progress output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> folio::Result<ExitCode> {
    let cfg = BuildConfig::new().with_output_name(&cli.output);

    let template = match std::fs::read_to_string(&cli.template) {
        Ok(template) => template,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::TemplateNotFound(cli.template.clone()));
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(book_dir) = &cli.book {
        let report = build_viewer(book_dir, &template, &cfg)?;
        if !cli.quiet {
            print_report(&report);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let batch = build_all(&cli.books_root, &template, &cfg)?;
    if !cli.quiet {
        for report in &batch.built {
            print_report(report);
        }
        for failure in &batch.failed {
            println!("{}: failed: {}", failure.book, failure.error);
        }
        println!("built {}/{} viewers", batch.built.len(), batch.total());
    }

    if batch.total() == 0 {
        eprintln!(
            "no books found under {} (expected {}/<Book>/pages...)",
            cli.books_root.display(),
            cli.books_root.display()
        );
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn print_report(report: &folio::BuildReport) {
    println!(
        "{}: {} pages, {} chapters, {} sections, offset={}",
        report.book, report.pages, report.chapters, report.sections, report.offset
    );
    if report.skipped_lines > 0 {
        println!("  skipped {} malformed TOC line(s)", report.skipped_lines);
    }
    if report.unresolved > 0 {
        println!(
            "  {} TOC entr(ies) outside the scanned page range",
            report.unresolved
        );
    }
}
