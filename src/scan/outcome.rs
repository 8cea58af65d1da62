//! Per-file outcomes and run totals.

use std::path::PathBuf;

/// What a scanned PDF produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Matching pages were found and written to a results document
    Results {
        /// Path of the written `_searchResults.docx`
        output: PathBuf,
        /// Number of highlighted terms
        results: usize,
        /// Number of accepted pages
        pages: usize,
    },
    /// No page matched under any strategy
    NothingFound {
        /// Path of the written `_nothingFound.docx`
        output: PathBuf,
    },
    /// Processing failed and an error log was written
    Failed {
        /// Path of the `_error.txt` log, if it could be written
        output: Option<PathBuf>,
        /// Error message
        error: String,
    },
}

impl Outcome {
    /// Path of the file written for this input, if any.
    pub fn output(&self) -> Option<&PathBuf> {
        match self {
            Outcome::Results { output, .. } | Outcome::NothingFound { output } => Some(output),
            Outcome::Failed { output, .. } => output.as_ref(),
        }
    }

    /// Check if processing failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

/// Outcome of one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// The scanned PDF
    pub input: PathBuf,
    /// What it produced
    pub outcome: Outcome,
}

/// Totals of a directory scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// One report per input, in processing order
    pub files: Vec<FileReport>,
}

impl RunSummary {
    /// Number of processed files.
    pub fn total(&self) -> usize {
        self.files.len()
    }

    /// Number of files with matching pages.
    pub fn with_results(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Results { .. }))
    }

    /// Number of files without matches.
    pub fn nothing_found(&self) -> usize {
        self.count(|o| matches!(o, Outcome::NothingFound { .. }))
    }

    /// Number of failed files.
    pub fn failed(&self) -> usize {
        self.count(Outcome::is_failure)
    }

    /// Total number of highlighted terms across all files.
    pub fn total_results(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f.outcome {
                Outcome::Results { results, .. } => results,
                _ => 0,
            })
            .sum()
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }
}
