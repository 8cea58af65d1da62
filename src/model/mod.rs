//! Output document model.
//!
//! A small word-processing model (paragraphs made of styled runs) that the
//! builder and highlighter manipulate before the docx writer serializes it.

mod document;
mod paragraph;

pub use document::Document;
pub use paragraph::{HighlightColor, InlineContent, Paragraph, TextRun, TextStyle};
