//! SongBeamer document parser.

use super::body::BodyDecoder;
use super::frame::split_document;
use super::properties::PropertyDecoder;
use super::{ErrorMode, ParseOptions};
use crate::error::{Error, Result};
use crate::model::Song;
use std::borrow::Cow;
use std::fs;
use std::io::Read;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

const UTF8_BOM: &str = "\u{feff}";

/// Parser for SongBeamer `.sng` documents.
#[derive(Debug, Clone)]
pub struct SngParser {
    text: String,
    options: ParseOptions,
}

impl SngParser {
    /// Create a parser over document text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::from_text_with_options(text, ParseOptions::default())
    }

    /// Create a parser over document text with custom options.
    pub fn from_text_with_options(text: impl Into<String>, options: ParseOptions) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }

    /// Open a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Create a parser from raw bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Create a parser from raw bytes with custom options.
    ///
    /// The bytes must be UTF-8 (a leading BOM is dropped). In lenient mode
    /// anything else is read as Latin-1, which older SongBeamer versions
    /// wrote.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let text = decode_text(data, options.error_mode)?;
        Ok(Self::from_text_with_options(text, options))
    }

    /// Create a parser from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Create a parser from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Parser options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Decode the document.
    pub fn parse(&self) -> Result<Song> {
        let text = self.text.strip_prefix(UTF8_BOM).unwrap_or(self.text.as_str());
        let text: Cow<'_, str> = if self.options.normalize_unicode {
            Cow::Owned(text.nfc().collect())
        } else {
            Cow::Borrowed(text)
        };

        let frame = split_document(&text, self.options.line_ending)?;

        let mut properties = PropertyDecoder::new(self.options.error_mode).decode(&frame.header)?;
        let texts = BodyDecoder::new().decode(&frame.body, &mut properties)?;

        log::debug!(
            "Decoded {} properties and {} verses",
            properties.len(),
            texts.len()
        );
        Ok(Song::new(properties, texts))
    }
}

fn decode_text(data: &[u8], error_mode: ErrorMode) -> Result<String> {
    let data = data.strip_prefix(UTF8_BOM.as_bytes()).unwrap_or(data);
    match std::str::from_utf8(data) {
        Ok(text) => Ok(text.to_string()),
        Err(e) if error_mode == ErrorMode::Lenient => {
            log::warn!("Input is not UTF-8 ({}), reading as Latin-1", e);
            Ok(data.iter().map(|&b| char::from(b)).collect())
        }
        Err(e) => Err(Error::Encoding(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text() {
        let song = SngParser::from_text("#Title=Test\r\n---\r\nVerse\r\nLine")
            .parse()
            .unwrap();
        assert_eq!(song.title(), Some("Test"));
        assert_eq!(song.verse("Verse").map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_bom_is_dropped() {
        let song = SngParser::from_bytes(b"\xef\xbb\xbf#Title=Test\r\n---\r\nVerse\r\nLine")
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(song.title(), Some("Test"));
    }

    #[test]
    fn test_latin1_requires_lenient() {
        let data = b"#Title=Gr\xfc\xdfe\r\n---\r\nVerse\r\nLine";
        assert!(matches!(
            SngParser::from_bytes(data),
            Err(Error::Encoding(_))
        ));

        let song = SngParser::from_bytes_with_options(data, ParseOptions::new().lenient())
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(song.title(), Some("Grüße"));
    }

    #[test]
    fn test_unicode_normalization() {
        // "e" followed by a combining acute accent
        let text = "---\r\nVerse\r\nCaf\u{0065}\u{0301}";
        let options = ParseOptions::new().with_unicode_normalization(true);
        let song = SngParser::from_text_with_options(text, options).parse().unwrap();
        let line = song.verse("Verse").unwrap()[0].rows()[0].get(0).unwrap();
        assert_eq!(line, "Caf\u{e9}");
    }

    #[test]
    fn test_from_reader() {
        let reader = std::io::Cursor::new(b"---\r\nChorus\r\nLa".to_vec());
        let song = SngParser::from_reader(reader).unwrap().parse().unwrap();
        assert!(song.verse("Chorus").is_some());
    }
}
