//! Document framing: line splitting and header/body boundary detection.

use super::LineEnding;
use crate::error::{Error, Result};

/// Line that starts a new verse.
pub const VERSE_SEPARATOR: &str = "---";
/// Line that starts a new slide within a verse.
pub const SLIDE_SEPARATOR: &str = "--";

/// A document split into header and body lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Property lines before the first separator
    pub header: Vec<&'a str>,
    /// Body lines, starting with the separator that opened the body
    pub body: Vec<&'a str>,
}

/// Split a raw document into header and body.
pub fn split_document(text: &str, line_ending: LineEnding) -> Result<Frame<'_>> {
    let lines = line_ending.split(text.trim());

    let start = find_body_start(&lines).ok_or_else(|| Error::NoBodyFound {
        lines: lines.iter().map(|s| s.to_string()).collect(),
    })?;
    log::debug!("Body starts at line {} ({:?})", start, lines[start]);

    let mut body = lines[start..].to_vec();
    strip_trailing_noise(&mut body);

    Ok(Frame {
        header: lines[..start].to_vec(),
        body,
    })
}

/// Index of the first separator line.
///
/// Normally that is the first verse separator. Legacy files may open the body
/// with a slide separator instead, so an earlier `--` wins.
pub fn find_body_start(lines: &[&str]) -> Option<usize> {
    let verse = lines.iter().position(|l| *l == VERSE_SEPARATOR);
    let slide = lines.iter().position(|l| *l == SLIDE_SEPARATOR);

    match (verse, slide) {
        (Some(v), Some(s)) if s < v => Some(s),
        (Some(v), _) => Some(v),
        (None, s) => s,
    }
}

/// Drop trailing blank and separator-only lines.
pub fn strip_trailing_noise(body: &mut Vec<&str>) {
    while let Some(last) = body.last() {
        let trimmed = last.trim();
        if trimmed.is_empty() || trimmed == VERSE_SEPARATOR || trimmed == SLIDE_SEPARATOR {
            body.pop();
        } else {
            break;
        }
    }
}
