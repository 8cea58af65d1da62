//! Raw per-page text through pdf-extract.
//!
//! pdf-extract can panic on malformed input instead of returning an error,
//! so the call is wrapped in [`std::panic::catch_unwind`].

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use super::{ExtractStrategy, PageExtractor};
use crate::detect;
use crate::error::{Error, Result};

/// Extractor returning the unstructured text of each page.
///
/// pdf-extract decodes the whole document at once, so the pages are
/// extracted when the extractor is opened.
#[derive(Debug, Clone)]
pub struct SimpleExtractor {
    pages: Vec<String>,
}

impl SimpleExtractor {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Extract from an in-memory PDF.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        detect::version_from_bytes(data)?;
        let pages = extract_pages(data)?;
        log::debug!("Simple extraction: {} pages", pages.len());
        Ok(Self { pages })
    }
}

fn extract_pages(data: &[u8]) -> Result<Vec<String>> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(data)
    }));
    match result {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(Error::from(e)),
        Err(_) => Err(Error::TextExtract(
            "extraction panicked (malformed document)".into(),
        )),
    }
}

impl PageExtractor for SimpleExtractor {
    fn strategy(&self) -> ExtractStrategy {
        ExtractStrategy::Simple
    }

    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, number: u32) -> Result<String> {
        number
            .checked_sub(1)
            .and_then(|index| self.pages.get(index as usize))
            .cloned()
            .ok_or(Error::PageOutOfRange(number, self.page_count()))
    }
}
