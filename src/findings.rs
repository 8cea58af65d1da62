//! Accepted pages of one PDF and the document builder.

use crate::model::{Document, Paragraph};

/// Accepted pages of one document, stored flat as
/// `[label, text, label, text, ...]`.
///
/// The highlighter relies on this layout: every paragraph at an even index
/// of the built document is a page label, every odd one is page text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    entries: Vec<String>,
}

impl Findings {
    /// Create an empty set of findings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted page.
    pub fn push_page(&mut self, label: impl Into<String>, text: impl Into<String>) {
        self.entries.push(label.into());
        self.entries.push(text.into());
    }

    /// Number of entries (always even).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no page was accepted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of accepted pages.
    pub fn page_count(&self) -> usize {
        self.entries.len() / 2
    }

    /// The raw interleaved entries.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Iterate over `(label, text)` pairs.
    pub fn pages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .chunks_exact(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

/// Human-readable page label, e.g. `Page 2/3`.
pub fn page_label(number: u32, total: u32) -> String {
    format!("Page {}/{}", number, total)
}

/// One unformatted paragraph per findings entry, in order.
pub fn build_document(findings: &Findings) -> Document {
    let mut doc = Document::new();
    for entry in findings.entries() {
        doc.add_paragraph(Paragraph::with_text(entry.as_str()));
    }
    doc
}
