//! Directory scanning: one output document per PDF.
//!
//! For each input the [`Scanner`] extracts the pages with the layout-aware
//! strategy, cleans and matches them, and retries with simple extraction
//! when nothing was accepted. Depending on the result it writes
//! `<name>_searchResults.docx`, `<name>_nothingFound.docx` or, when
//! processing fails, `<name>_error.txt`.

mod options;
mod outcome;

pub use options::ScanOptions;
pub use outcome::{FileReport, Outcome, RunSummary};

use std::error::Error as StdError;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cleanup::CleanupPipeline;
use crate::detect;
use crate::error::{Error, Result};
use crate::extract::{LayoutExtractor, PageExtractor, SimpleExtractor};
use crate::findings::{build_document, page_label, Findings};
use crate::highlight::{add_summary, count_highlighted, highlight};
use crate::matcher::find_matches;
use crate::model::{Document, Paragraph};
use crate::render::write_docx;

/// Text of the single paragraph written when a PDF has no match.
pub const NOTHING_FOUND_TEXT: &str = "Nothing found in this pdf file.";

/// Suffix of the results document.
pub const RESULTS_SUFFIX: &str = "_searchResults.docx";
/// Suffix of the no-match document.
pub const NOTHING_FOUND_SUFFIX: &str = "_nothingFound.docx";
/// Suffix of the error log.
pub const ERROR_SUFFIX: &str = "_error.txt";

/// Scanner applying one set of options to every input.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    options: ScanOptions,
    pipeline: CleanupPipeline,
}

impl Scanner {
    /// Create a scanner with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner with custom options.
    pub fn with_options(options: ScanOptions) -> Self {
        let pipeline = CleanupPipeline::new(options.cleanup.clone());
        Self { options, pipeline }
    }

    /// Get the scan options.
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// List the PDF inputs of a directory.
    ///
    /// Only regular files whose name ends with `.pdf` are returned.
    pub fn discover<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        let mut inputs = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            // Follows symlinks, so a link to a PDF is scanned like the file
            if !entry.path().is_file() {
                continue;
            }
            let name = entry.file_name();
            if name.to_str().is_some_and(detect::has_pdf_extension) {
                inputs.push(entry.path());
            }
        }

        if self.options.sort_inputs {
            inputs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        }
        Ok(inputs)
    }

    /// Scan every PDF of a directory, reporting progress before each file.
    ///
    /// The callback receives the 1-based index, the number of inputs and the
    /// file name. A failing file gets an error log and the scan moves on.
    pub fn run<P, F>(&self, dir: P, mut on_progress: F) -> Result<RunSummary>
    where
        P: AsRef<Path>,
        F: FnMut(usize, usize, &str),
    {
        let inputs = self.discover(dir.as_ref())?;
        let total = inputs.len();
        log::info!("Found {} PDF files in {}", total, dir.as_ref().display());

        let mut summary = RunSummary::default();
        for (index, input) in inputs.into_iter().enumerate() {
            on_progress(index + 1, total, &file_name(&input));

            let outcome = match self.process_file(&input) {
                Ok(outcome) => outcome,
                Err(e) => {
                    log::error!("Failed to process {}: {}", input.display(), e);
                    let output = match self.write_error_log(&input, &e) {
                        Ok(path) => Some(path),
                        Err(log_err) => {
                            log::error!("Could not write error log: {}", log_err);
                            None
                        }
                    };
                    Outcome::Failed {
                        output,
                        error: e.to_string(),
                    }
                }
            };
            summary.files.push(FileReport { input, outcome });
        }

        Ok(summary)
    }

    /// Scan one PDF and write its output document.
    pub fn process_file<P: AsRef<Path>>(&self, path: P) -> Result<Outcome> {
        let path = path.as_ref();
        let findings = self.collect_findings(path)?;
        let base = output_base_name(&file_name(path));
        let out_dir = self.output_dir_for(path);

        if findings.is_empty() {
            let output = out_dir.join(format!("{}{}", base, NOTHING_FOUND_SUFFIX));
            write_docx(&nothing_found_document(), &output)?;
            log::info!("Nothing found, wrote {}", output.display());
            return Ok(Outcome::NothingFound { output });
        }

        let mut doc = build_document(&findings);
        highlight(&mut doc);
        let results = count_highlighted(&doc);
        add_summary(&mut doc, results);

        let output = out_dir.join(format!("{}{}", base, RESULTS_SUFFIX));
        write_docx(&doc, &output)?;
        log::info!(
            "{} results on {} pages, wrote {}",
            results,
            findings.page_count(),
            output.display()
        );
        Ok(Outcome::Results {
            output,
            results,
            pages: findings.page_count(),
        })
    }

    /// Extract, clean and match the pages of one PDF without writing anything.
    pub fn collect_findings<P: AsRef<Path>>(&self, path: P) -> Result<Findings> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let version = detect::version_from_bytes(&data)?;
        log::debug!("{}: PDF {}", path.display(), version);

        let layout = LayoutExtractor::from_bytes(&data, self.options.error_mode)?;
        self.findings_with_fallback(&layout, || {
            log::warn!(
                "No match with layout extraction, retrying {} with simple extraction",
                path.display()
            );
            SimpleExtractor::from_bytes(&data)
        })
    }

    /// Match the primary extractor's pages, then retry with the fallback
    /// extractor when nothing matched and the fallback is enabled.
    fn findings_with_fallback<L, S, F>(&self, primary: &L, fallback: F) -> Result<Findings>
    where
        L: PageExtractor,
        S: PageExtractor,
        F: FnOnce() -> Result<S>,
    {
        let findings = find_pages(primary, Some(&self.pipeline))?;
        if !findings.is_empty() || !self.options.use_fallback {
            return Ok(findings);
        }

        let simple = fallback()?;
        let pipeline = self
            .options
            .apply_cleanup_on_fallback
            .then_some(&self.pipeline);
        find_pages(&simple, pipeline)
    }

    fn output_dir_for(&self, input: &Path) -> PathBuf {
        match &self.options.output_dir {
            Some(dir) => dir.clone(),
            None => input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        }
    }

    fn write_error_log(&self, input: &Path, error: &Error) -> Result<PathBuf> {
        let name = file_name(input);
        let output = self
            .output_dir_for(input)
            .join(format!("{}{}", output_base_name(&name), ERROR_SUFFIX));
        fs::write(&output, error_report(&name, error))?;
        Ok(output)
    }
}

/// Run an extractor over every page and keep the accepted ones.
///
/// When a cleanup pipeline is given, each page text is cleaned before
/// matching and stored cleaned.
pub fn find_pages<E: PageExtractor>(
    extractor: &E,
    pipeline: Option<&CleanupPipeline>,
) -> Result<Findings> {
    let mut findings = Findings::new();
    for page in extractor.pages() {
        let page = page?;
        let text = match pipeline {
            Some(pipeline) => pipeline.process(&page.text),
            None => page.text,
        };

        let matches = find_matches(&text);
        if matches.is_accepted(&text)? {
            log::debug!(
                "{} extraction, page {}/{}: {} matches",
                extractor.strategy(),
                page.number,
                page.total,
                matches.len()
            );
            findings.push_page(page_label(page.number, page.total), text);
        }
    }
    Ok(findings)
}

/// Base name of the outputs for an input file name: spaces become
/// underscores and the 4-character extension is dropped.
pub fn output_base_name(file_name: &str) -> String {
    let replaced = file_name.replace(' ', "_");
    let keep = replaced.chars().count().saturating_sub(4);
    replaced.chars().take(keep).collect()
}

/// Document written for a PDF without matches.
pub fn nothing_found_document() -> Document {
    let mut doc = Document::new();
    doc.add_paragraph(Paragraph::with_text(NOTHING_FOUND_TEXT));
    doc
}

/// Text of an error log: timestamp, file, error and its cause chain.
pub fn error_report(file_name: &str, error: &Error) -> String {
    let mut report = String::new();
    let _ = writeln!(
        report,
        "[{}] Error while processing {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        file_name
    );
    let _ = writeln!(report, "{}", error);

    let mut source = error.source();
    while let Some(cause) = source {
        let _ = writeln!(report, "Caused by: {}", cause);
        source = cause.source();
    }
    report
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractStrategy;
    use std::io;

    struct Fixed(Vec<&'static str>);

    impl PageExtractor for Fixed {
        fn strategy(&self) -> ExtractStrategy {
            ExtractStrategy::Simple
        }

        fn page_count(&self) -> u32 {
            self.0.len() as u32
        }

        fn page_text(&self, number: u32) -> Result<String> {
            self.0
                .get(number as usize - 1)
                .map(|s| s.to_string())
                .ok_or(Error::PageOutOfRange(number, self.page_count()))
        }
    }

    fn unreachable_fallback() -> Result<Fixed> {
        Err(Error::Other("fallback should not run".to_string()))
    }

    #[test]
    fn test_output_base_name() {
        assert_eq!(output_base_name("report.pdf"), "report");
        assert_eq!(output_base_name("annual report 2020.pdf"), "annual_report_2020");
        assert_eq!(output_base_name("a.pdf"), "a");
        assert_eq!(output_base_name(".pdf"), "");
    }

    #[test]
    fn test_nothing_found_document() {
        let doc = nothing_found_document();
        assert_eq!(doc.paragraph_count(), 1);
        assert_eq!(doc.plain_text(), "Nothing found in this pdf file.");
    }

    #[test]
    fn test_error_report_includes_cause() {
        let err = Error::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let report = error_report("lost.pdf", &err);

        assert!(report.starts_with('['));
        assert!(report.contains("Error while processing lost.pdf"));
        assert!(report.contains("I/O error: gone"));
        assert!(report.contains("Caused by: gone"));
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.pdf", "notes.txt", "c.PDF", "a.pdf.bak"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("folder.pdf")).unwrap();

        let inputs = Scanner::new().discover(dir.path()).unwrap();
        let names: Vec<String> = inputs.iter().map(|p| file_name(p)).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_non_pdf_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.pdf");
        fs::write(&path, b"just text").unwrap();

        let err = Scanner::new().process_file(&path).unwrap_err();
        assert!(matches!(err, Error::UnknownFormat));
    }

    #[test]
    fn test_fallback_runs_when_layout_finds_nothing() {
        let primary = Fixed(vec!["Prices are listed below.", "Plain page."]);
        let findings = Scanner::new()
            .findings_with_fallback(&primary, || {
                Ok(Fixed(vec!["Prices are listed below.", "Sold without warranty."]))
            })
            .unwrap();

        let pages: Vec<_> = findings.pages().collect();
        assert_eq!(pages, vec![("Page 2/2", "Sold without warranty.")]);
    }

    #[test]
    fn test_fallback_skipped_when_layout_matches() {
        let primary = Fixed(vec!["A homeless shelter opened."]);
        let findings = Scanner::new()
            .findings_with_fallback(&primary, unreachable_fallback)
            .unwrap();

        assert_eq!(findings.page_count(), 1);
    }

    #[test]
    fn test_fallback_disabled() {
        let primary = Fixed(vec!["Plain page."]);
        let scanner = Scanner::with_options(ScanOptions::new().with_fallback(false));
        let findings = scanner
            .findings_with_fallback(&primary, unreachable_fallback)
            .unwrap();

        assert!(findings.is_empty());
    }

    #[test]
    fn test_fallback_cleanup_flag() {
        let primary = Fixed(vec!["Plain page."]);
        let fallback = || -> Result<Fixed> { Ok(Fixed(vec!["goods  w i t h o u t  notice"])) };

        let raw = Scanner::new()
            .findings_with_fallback(&primary, fallback)
            .unwrap();
        assert!(raw.is_empty());

        let scanner = Scanner::with_options(ScanOptions::new().with_cleanup_on_fallback(true));
        let cleaned = scanner.findings_with_fallback(&primary, fallback).unwrap();
        let pages: Vec<_> = cleaned.pages().collect();
        assert_eq!(pages, vec![("Page 1/1", "goods without notice")]);
    }

    #[test]
    fn test_find_pages_cleans_only_with_pipeline() {
        let extractor = Fixed(vec!["goods  w i t h o u t  notice"]);
        assert!(find_pages(&extractor, None).unwrap().is_empty());

        let pipeline = CleanupPipeline::default();
        let findings = find_pages(&extractor, Some(&pipeline)).unwrap();
        assert_eq!(findings.page_count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_follows_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("real.txt");
        fs::write(&target, b"%PDF-1.5").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("linked.pdf")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("dangling.pdf"))
            .unwrap();

        let inputs = Scanner::new().discover(dir.path()).unwrap();
        let names: Vec<String> = inputs.iter().map(|p| file_name(p)).collect();
        assert_eq!(names, vec!["linked.pdf"]);
    }
}
