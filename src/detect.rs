//! Input discovery helpers: PDF header checks and file-name filtering.

use crate::error::{Error, Result};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Extension a directory entry must end with to be scanned.
///
/// Matching is literal and case-sensitive: `report.PDF` is not picked up.
pub const PDF_EXTENSION: &str = ".pdf";

/// Return the PDF version announced by a header such as `%PDF-1.7`.
pub fn version_from_bytes(data: &[u8]) -> Result<String> {
    let rest = data.strip_prefix(PDF_MAGIC).ok_or(Error::UnknownFormat)?;
    let version_bytes = rest.get(..VERSION_LEN).ok_or(Error::UnknownFormat)?;
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }
    Ok(version)
}

fn is_valid_version(version: &str) -> bool {
    let b = version.as_bytes();
    b.len() == VERSION_LEN && b[0].is_ascii_digit() && b[1] == b'.' && b[2].is_ascii_digit()
}

/// Whether a file name qualifies as scanner input.
pub fn has_pdf_extension(file_name: &str) -> bool {
    file_name.ends_with(PDF_EXTENSION)
}
