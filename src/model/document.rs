//! Document-level types.

use super::{HighlightColor, Paragraph};

/// An output document: a flat sequence of paragraphs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Paragraphs in the document
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a paragraph to the document.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Get the number of paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Check if the document has no paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Number of runs carrying the given highlight, across all paragraphs.
    pub fn count_highlighted(&self, color: HighlightColor) -> usize {
        self.paragraphs
            .iter()
            .flat_map(|p| p.runs())
            .filter(|run| run.is_highlighted_with(color))
            .count()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
