//! Parsing options and configuration.

/// Options for parsing SongBeamer documents.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Error handling mode for property values and byte decoding
    pub error_mode: ErrorMode,

    /// Accepted line terminators
    pub line_ending: LineEnding,

    /// Normalize text lines and string properties to Unicode NFC
    pub normalize_unicode: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip invalid property values).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set accepted line terminators.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Accept bare `\n` in addition to `\r\n`.
    pub fn any_line_ending(mut self) -> Self {
        self.line_ending = LineEnding::Any;
        self
    }

    /// Enable or disable Unicode NFC normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }
}

/// Error handling mode during parsing.
///
/// Only value coercion (integers, colors, base64) and byte decoding are
/// affected. Structural errors are always fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Log and skip invalid property values
    Lenient,
}

/// Line terminators recognized when splitting a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Only `\r\n`, as written by SongBeamer
    #[default]
    Crlf,
    /// `\r\n` or bare `\n`
    Any,
}

impl LineEnding {
    /// Split text into lines according to this mode.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match self {
            LineEnding::Crlf => text.split("\r\n").collect(),
            LineEnding::Any => text
                .split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .lenient()
            .any_line_ending()
            .with_unicode_normalization(true);

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.line_ending, LineEnding::Any);
        assert!(options.normalize_unicode);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.line_ending, LineEnding::Crlf);
        assert!(!options.normalize_unicode);
    }

    #[test]
    fn test_line_ending_split() {
        assert_eq!(LineEnding::Crlf.split("a\r\nb\nc"), ["a", "b\nc"]);
        assert_eq!(LineEnding::Any.split("a\r\nb\nc"), ["a", "b", "c"]);
    }
}
