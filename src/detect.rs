//! SongBeamer format detection.

use crate::error::{Error, Result};
use crate::parser::{LineEnding, PROPERTY_MARKER, SLIDE_SEPARATOR, VERSE_SEPARATOR};
use std::fs;
use std::path::Path;

/// SongBeamer format information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SngFormat {
    /// Value of the `#Version=` header, if present
    pub version: Option<i64>,
    /// Whether the data starts with a UTF-8 byte order mark
    pub has_bom: bool,
    /// Line terminators needed to read the document
    pub line_ending: LineEnding,
}

impl std::fmt::Display for SngFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.version {
            Some(version) => write!(f, "SongBeamer song (version {})", version),
            None => write!(f, "SongBeamer song"),
        }
    }
}

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Detect the format from a file path.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<SngFormat> {
    let data = fs::read(path)?;
    detect_format_from_bytes(&data)
}

/// Detect the format from bytes.
///
/// # Returns
/// * `Ok(SngFormat)` if the first non-blank line is a property or separator
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<SngFormat> {
    let has_bom = data.starts_with(UTF8_BOM);
    let body = if has_bom { &data[UTF8_BOM.len()..] } else { data };
    let text = String::from_utf8_lossy(body);

    let mut format = detect_format_from_str(&text)?;
    format.has_bom = has_bom;
    Ok(format)
}

/// Detect the format from text.
pub fn detect_format_from_str(text: &str) -> Result<SngFormat> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let first = text
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .find(|line| !line.trim().is_empty())
        .ok_or(Error::UnknownFormat)?;

    if !is_header_or_separator(first) {
        return Err(Error::UnknownFormat);
    }

    let line_ending = if text.contains('\n') && !has_only_crlf(text) {
        LineEnding::Any
    } else {
        LineEnding::Crlf
    };

    let version = LineEnding::Any
        .split(text)
        .into_iter()
        .find_map(|line| line.strip_prefix("#Version="))
        .and_then(|v| v.trim().parse().ok());

    Ok(SngFormat {
        version,
        has_bom: false,
        line_ending,
    })
}

fn is_header_or_separator(line: &str) -> bool {
    line.starts_with(PROPERTY_MARKER) || line == VERSE_SEPARATOR || line == SLIDE_SEPARATOR
}

fn has_only_crlf(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == b'\n')
        .all(|(i, _)| i > 0 && bytes[i - 1] == b'\r')
}

/// Check if a file looks like a SongBeamer song.
pub fn is_sng<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes look like a SongBeamer song.
pub fn is_sng_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
