//! Extraction options.

use std::fmt;

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Skip pages whose content cannot be decoded and continue
    Lenient,
}

/// Which extraction strategy produced a page text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractStrategy {
    /// Layout-aware extraction over the page content streams
    Layout,
    /// Raw per-page text without layout analysis
    Simple,
}

impl fmt::Display for ExtractStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractStrategy::Layout => write!(f, "layout"),
            ExtractStrategy::Simple => write!(f, "simple"),
        }
    }
}
