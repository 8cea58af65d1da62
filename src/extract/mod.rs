//! Per-page text extraction.
//!
//! Two strategies are available: [`LayoutExtractor`] walks the page content
//! streams and rebuilds text boxes from glyph positions, [`SimpleExtractor`]
//! returns the raw text of each page. Both are consumed through the
//! [`PageExtractor`] trait, which yields pages lazily and in order.

mod layout;
mod options;
mod simple;

pub use layout::{decode_text_simple, LayoutExtractor, TextBlock, TextLine, TextSpan};
pub use options::{ErrorMode, ExtractStrategy};
pub use simple::SimpleExtractor;

use crate::error::Result;

/// Text of a single page, with its position in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// 1-based page number
    pub number: u32,
    /// Total number of pages in the document
    pub total: u32,
    /// Extracted text
    pub text: String,
}

/// A source of per-page plain text.
pub trait PageExtractor {
    /// Strategy implemented by this extractor.
    fn strategy(&self) -> ExtractStrategy;

    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Extract the text of a page (1-indexed).
    fn page_text(&self, number: u32) -> Result<String>;

    /// Iterate over all pages in order, extracting each one on demand.
    fn pages(&self) -> Pages<'_, Self>
    where
        Self: Sized,
    {
        Pages {
            extractor: self,
            next: 1,
            total: self.page_count(),
        }
    }
}

/// Lazy page iterator returned by [`PageExtractor::pages`].
pub struct Pages<'a, E: ?Sized> {
    extractor: &'a E,
    next: u32,
    total: u32,
}

impl<E: PageExtractor + ?Sized> Iterator for Pages<'_, E> {
    type Item = Result<PageText>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.total {
            return None;
        }
        let number = self.next;
        self.next += 1;
        let total = self.total;
        Some(
            self.extractor
                .page_text(number)
                .map(|text| PageText {
                    number,
                    total,
                    text,
                }),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total + 1).saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}
