//! Rendering module for writing output documents.

mod docx;

pub use docx::{to_docx, to_docx_bytes, write_docx};
