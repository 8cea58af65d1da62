//! Paragraph and run-level types.

/// A paragraph of the output document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    /// Runs and breaks, in reading order
    pub content: Vec<InlineContent>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with one unformatted run.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.add_run(TextRun::new(text));
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.content.push(InlineContent::Text(run));
    }

    /// Add a line break.
    pub fn add_line_break(&mut self) {
        self.content.push(InlineContent::LineBreak);
    }

    /// Remove all runs and breaks.
    pub fn clear(&mut self) {
        self.content.clear();
    }

    /// Text runs of the paragraph, skipping breaks.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.content.iter().filter_map(|c| match c {
            InlineContent::Text(run) => Some(run),
            InlineContent::LineBreak => None,
        })
    }

    /// Mutable access to the text runs.
    pub fn runs_mut(&mut self) -> impl Iterator<Item = &mut TextRun> {
        self.content.iter_mut().filter_map(|c| match c {
            InlineContent::Text(run) => Some(run),
            InlineContent::LineBreak => None,
        })
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                InlineContent::Text(run) => run.text.as_str(),
                InlineContent::LineBreak => "\n",
            })
            .collect()
    }

    /// Check if the paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() || self.plain_text().trim().is_empty()
    }
}

/// Inline content within a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineContent {
    /// A text run with styling
    Text(TextRun),

    /// A line break
    LineBreak,
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                bold: true,
                ..Default::default()
            },
        }
    }

    /// Create a highlighted text run.
    pub fn highlighted(text: impl Into<String>, color: HighlightColor) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                highlight: Some(color),
                ..Default::default()
            },
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check if this run carries the given highlight.
    pub fn is_highlighted_with(&self, color: HighlightColor) -> bool {
        self.style.highlight == Some(color)
    }
}

/// Text styling properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Background highlight
    pub highlight: Option<HighlightColor>,
}

/// Highlight colours understood by word processors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightColor {
    /// Yellow marker
    Yellow,
}

impl HighlightColor {
    /// The WordprocessingML `w:highlight` value.
    pub fn as_str(self) -> &'static str {
        match self {
            HighlightColor::Yellow => "yellow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_with_breaks() {
        let mut p = Paragraph::new();
        p.add_run(TextRun::bold("Summary."));
        p.add_line_break();
        p.add_line_break();
        p.add_text("Page 1/2");
        assert_eq!(p.plain_text(), "Summary.\n\nPage 1/2");
        assert_eq!(p.runs().count(), 2);
    }

    #[test]
    fn test_highlighted_run() {
        let run = TextRun::highlighted("without", HighlightColor::Yellow);
        assert!(run.is_highlighted_with(HighlightColor::Yellow));
        assert!(!run.style.bold);
        assert!(!TextRun::bold("Page 1/1").is_highlighted_with(HighlightColor::Yellow));
    }

    #[test]
    fn test_clear_and_empty() {
        let mut p = Paragraph::with_text("   ");
        assert!(p.is_empty());
        p.clear();
        assert!(p.content.is_empty());
    }
}
