//! # caritive
//!
//! Scan PDF documents for words of absence and privation ("without",
//! "homeless", "absence", "privation", ...) and report the matching pages in
//! a Word document.
//!
//! ## Quick Start
//!
//! ```no_run
//! use caritive::scan_directory;
//!
//! fn main() -> caritive::Result<()> {
//!     let summary = scan_directory("papers")?;
//!     println!(
//!         "{} files, {} with results",
//!         summary.total(),
//!         summary.with_results()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Extraction**: layout-aware text per page, with a simple fallback
//! - **Cleanup**: repairs letter-spaced and fragmented words
//! - **Matching**: one case-insensitive pattern, connectives like "unless"
//!   and "nevertheless" excluded
//! - **Output**: page labels in bold, every term highlighted, result count on top

pub mod cleanup;
pub mod detect;
pub mod error;
pub mod extract;
pub mod findings;
pub mod highlight;
pub mod matcher;
pub mod model;
pub mod render;
pub mod scan;

// Re-export commonly used types
pub use cleanup::{cleanup, CleanupOptions, CleanupPipeline};
pub use error::{Error, Result};
pub use extract::{
    ErrorMode, ExtractStrategy, LayoutExtractor, PageExtractor, PageText, SimpleExtractor,
};
pub use findings::{build_document, page_label, Findings};
pub use matcher::{find_matches, KeywordFamily, KeywordMatch, PageMatches};
pub use model::{Document, HighlightColor, InlineContent, Paragraph, TextRun, TextStyle};
pub use scan::{FileReport, Outcome, RunSummary, ScanOptions, Scanner};

use std::path::Path;

/// Scan every PDF of a directory with default options.
///
/// Outputs are written next to the inputs.
///
/// # Example
///
/// ```no_run
/// use caritive::scan_directory;
///
/// let summary = scan_directory(".").unwrap();
/// println!("{} failed", summary.failed());
/// ```
pub fn scan_directory<P: AsRef<Path>>(dir: P) -> Result<RunSummary> {
    Scanner::new().run(dir, |_, _, _| {})
}

/// Scan every PDF of a directory with custom options.
///
/// # Example
///
/// ```no_run
/// use caritive::{scan_directory_with_options, ScanOptions};
///
/// let options = ScanOptions::new()
///     .with_output_dir("reports")
///     .lenient();
/// let summary = scan_directory_with_options("papers", options).unwrap();
/// ```
pub fn scan_directory_with_options<P: AsRef<Path>>(
    dir: P,
    options: ScanOptions,
) -> Result<RunSummary> {
    Scanner::with_options(options).run(dir, |_, _, _| {})
}

/// Scan a single PDF and write its output document next to it.
///
/// Unlike a directory scan, a failure is returned instead of being written
/// to an error log.
pub fn scan_file<P: AsRef<Path>>(path: P) -> Result<Outcome> {
    Scanner::new().process_file(path)
}

/// Find the accepted pages of a PDF without writing any output.
///
/// # Example
///
/// ```no_run
/// use caritive::find_pages_in_file;
///
/// let findings = find_pages_in_file("paper.pdf").unwrap();
/// for (label, text) in findings.pages() {
///     println!("{}: {} chars", label, text.len());
/// }
/// ```
pub fn find_pages_in_file<P: AsRef<Path>>(path: P) -> Result<Findings> {
    Scanner::new().collect_findings(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_missing_directory() {
        let result = scan_directory("/nonexistent/caritive/dir");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let summary = scan_directory(dir.path()).unwrap();
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_find_pages_rejects_non_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.pdf");
        std::fs::write(&path, "without a header").unwrap();
        assert!(matches!(
            find_pages_in_file(&path),
            Err(Error::UnknownFormat)
        ));
    }
}
