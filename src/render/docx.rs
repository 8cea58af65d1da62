//! Word (.docx) rendering.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use docx_rs::{BreakType, Docx, Paragraph as DocxParagraph, Run};

use crate::error::{Error, Result};
use crate::model::{Document, InlineContent, TextRun};

/// Convert a document to a docx-rs document tree.
pub fn to_docx(doc: &Document) -> Docx {
    doc.paragraphs.iter().fold(Docx::new(), |docx, paragraph| {
        let para = paragraph
            .content
            .iter()
            .fold(DocxParagraph::new(), |para, item| match item {
                InlineContent::Text(run) => para.add_run(render_run(run)),
                InlineContent::LineBreak => {
                    para.add_run(Run::new().add_break(BreakType::TextWrapping))
                }
            });
        docx.add_paragraph(para)
    })
}

fn render_run(run: &TextRun) -> Run {
    let mut out = Run::new().add_text(run.text.as_str());
    if run.style.bold {
        out = out.bold();
    }
    if let Some(color) = run.style.highlight {
        out = out.highlight(color.as_str());
    }
    out
}

/// Serialize a document to docx bytes.
pub fn to_docx_bytes(doc: &Document) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    to_docx(doc)
        .build()
        .pack(&mut buffer)
        .map_err(|e| Error::Docx(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Write a document to a .docx file.
pub fn write_docx<P: AsRef<Path>>(doc: &Document, path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_docx_bytes(doc)?)?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}
