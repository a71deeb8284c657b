//! PDF header sniffing.
//!
//! Input files are checked for the `%PDF-x.y` marker before they are handed
//! to lopdf, so that a mis-selected file fails with a clear message instead
//! of a parser error from deep inside the object reader.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Read the header of `path` and return the declared PDF version.
pub fn sniff_pdf_version<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut header = [0u8; 16];
    let mut file = File::open(path)?;
    let read = file.read(&mut header)?;
    pdf_version_from_bytes(&header[..read])
}

/// Return the PDF version declared by `data`, which must start with the file header.
pub fn pdf_version_from_bytes(data: &[u8]) -> Result<String> {
    let version_bytes = data
        .strip_prefix(PDF_MAGIC)
        .and_then(|rest| rest.get(..VERSION_LEN))
        .ok_or(Error::UnknownFormat)?;

    let version = String::from_utf8_lossy(version_bytes).to_string();
    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }
    Ok(version)
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == VERSION_LEN
        && bytes[0].is_ascii_digit()
        && bytes[1] == b'.'
        && bytes[2].is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_version_from_header() {
        assert_eq!(pdf_version_from_bytes(b"%PDF-1.7\n%\xe2\xe3").unwrap(), "1.7");
        assert_eq!(pdf_version_from_bytes(b"%PDF-2.0\n").unwrap(), "2.0");
    }

    #[test]
    fn test_rejects_other_formats() {
        assert!(matches!(
            pdf_version_from_bytes(b"PK\x03\x04docx"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(
            pdf_version_from_bytes(b"%PDF"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(
            pdf_version_from_bytes(b"%PDF-x.y"),
            Err(Error::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_sniff_short_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF").unwrap();
        assert!(matches!(
            sniff_pdf_version(file.path()),
            Err(Error::UnknownFormat)
        ));
    }
}
