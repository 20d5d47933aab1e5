//! Error types for unsng library.

use std::io;
use thiserror::Error;

/// Result type alias for unsng operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while decoding a song.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input does not look like a SongBeamer document.
    #[error("Unknown file format: not a SongBeamer song")]
    UnknownFormat,

    /// The input bytes could not be decoded as text.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Neither a verse separator nor a slide separator was found.
    #[error("Could not find text part in song data ({} lines)", .lines.len())]
    NoBodyFound {
        /// All lines of the document
        lines: Vec<String>,
    },

    /// A non-blank header line does not begin with `#`.
    #[error("Malformed property (does not begin with #): {line:?}")]
    MalformedProperty {
        /// The offending line
        line: String,
        /// The header lines it was found in
        lines: Vec<String>,
    },

    /// A user-defined verse tag does not have the `$$K=text` shape.
    #[error("Invalid user-defined tag: {tag:?}")]
    InvalidTag {
        /// The offending tag candidate
        tag: String,
        /// The body lines it was found in
        lines: Vec<String>,
    },

    /// A `BackgroundImage` color literal is not `color://$XXXXXXXX`.
    #[error("Invalid color literal: {value:?}")]
    InvalidColor {
        /// The raw property value
        value: String,
    },

    /// An integer property holds something other than an integer.
    #[error("Invalid integer for property {key}: {value:?}")]
    InvalidInteger {
        /// Property name
        key: String,
        /// The raw property value
        value: String,
    },

    /// A base64 property payload could not be decoded.
    #[error("Invalid base64 payload for property {key}: {message}")]
    InvalidBase64 {
        /// Property name
        key: String,
        /// Decoder message
        message: String,
    },

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// The line that caused a structural error, if any.
    pub fn offending_line(&self) -> Option<&str> {
        match self {
            Error::MalformedProperty { line, .. } => Some(line),
            Error::InvalidTag { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Whether this error comes from decoding the document structure
    /// rather than from I/O or rendering.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::NoBodyFound { .. }
                | Error::MalformedProperty { .. }
                | Error::InvalidTag { .. }
                | Error::InvalidColor { .. }
                | Error::InvalidInteger { .. }
                | Error::InvalidBase64 { .. }
        )
    }
}
