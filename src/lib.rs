//! # unsng
//!
//! SongBeamer song decoding library for Rust.
//!
//! This library reads SongBeamer `.sng` lyrics documents and turns them into
//! a structured song: typed header properties plus verses, slides and
//! language-aligned rows, ready to serialize as JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unsng::{parse_file, render};
//!
//! fn main() -> unsng::Result<()> {
//!     let song = parse_file("Amazing Grace.sng")?;
//!
//!     let json = render::to_json(&song, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typed properties**: lists, integers, base64 payloads, colors
//! - **Verse tags**: declared order, recognized tags, `$$` user tags, free-text titles
//! - **Multiple languages**: lines regrouped into rows of `LangCount`
//! - **Legacy tolerance**: bodies opened by `--`, lenient value coercion

pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_sng, SngFormat};
pub use error::{Error, Result};
pub use model::{Properties, PropertyValue, Row, Slide, Song, Verse, VerseMap};
pub use parser::{ErrorMode, LineEnding, ParseOptions, SngParser, TagClass};
pub use render::{JsonFormat, RenderOptions};

use std::io::Read;
use std::path::Path;

/// Parse song text.
///
/// # Example
///
/// ```
/// let song = unsng::parse_str("#Title=Hello\r\n---\r\nVerse\r\nHello world").unwrap();
/// assert_eq!(song.title(), Some("Hello"));
/// assert_eq!(song.verse_order(), ["Verse"]);
/// ```
pub fn parse_str(text: &str) -> Result<Song> {
    SngParser::from_text(text).parse()
}

/// Parse song text with custom options.
pub fn parse_str_with_options(text: &str, options: ParseOptions) -> Result<Song> {
    SngParser::from_text_with_options(text, options).parse()
}

/// Parse a song file.
///
/// # Example
///
/// ```no_run
/// let song = unsng::parse_file("song.sng").unwrap();
/// println!("Verses: {}", song.texts.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Song> {
    SngParser::open(path)?.parse()
}

/// Parse a song file with custom options.
///
/// # Example
///
/// ```no_run
/// use unsng::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient().any_line_ending();
/// let song = parse_file_with_options("song.sng", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Song> {
    SngParser::open_with_options(path, options)?.parse()
}

/// Parse a song from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Song> {
    SngParser::from_bytes(data)?.parse()
}

/// Parse a song from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Song> {
    SngParser::from_bytes_with_options(data, options)?.parse()
}

/// Parse a song from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Song> {
    SngParser::from_reader(reader)?.parse()
}

/// Extract plain lyrics from a song file.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let song = parse_file(path)?;
    render::to_text(&song, &RenderOptions::default())
}

/// Convert a song file to JSON.
///
/// # Example
///
/// ```no_run
/// use unsng::{to_json, JsonFormat};
///
/// let json = to_json("song.sng", JsonFormat::Pretty).unwrap();
/// std::fs::write("song.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let song = parse_file(path)?;
    render::to_json(&song, format)
}

/// Builder for parsing and converting songs.
///
/// # Example
///
/// ```no_run
/// use unsng::Unsng;
///
/// let text = Unsng::new()
///     .lenient()
///     .with_language(0)
///     .parse("song.sng")?
///     .to_text()?;
/// # Ok::<(), unsng::Error>(())
/// ```
pub struct Unsng {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Unsng {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Accept bare `\n` line endings.
    pub fn any_line_ending(mut self) -> Self {
        self.parse_options = self.parse_options.any_line_ending();
        self
    }

    /// Normalize text to Unicode NFC.
    pub fn normalized(mut self) -> Self {
        self.parse_options = self.parse_options.with_unicode_normalization(true);
        self
    }

    /// Render only one language slot.
    pub fn with_language(mut self, lang: usize) -> Self {
        self.render_options = self.render_options.with_language(lang);
        self
    }

    /// Render verses in source order instead of `VerseOrder`.
    pub fn source_order(mut self) -> Self {
        self.render_options = self.render_options.with_verse_order(false);
        self
    }

    /// Parse a song file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UnsngResult> {
        let song = SngParser::open_with_options(path, self.parse_options)?.parse()?;
        Ok(UnsngResult {
            song,
            render_options: self.render_options,
        })
    }

    /// Parse song text.
    pub fn parse_str(self, text: &str) -> Result<UnsngResult> {
        let song = SngParser::from_text_with_options(text, self.parse_options).parse()?;
        Ok(UnsngResult {
            song,
            render_options: self.render_options,
        })
    }
}

impl Default for Unsng {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a song.
pub struct UnsngResult {
    /// The parsed song
    pub song: Song,
    /// Render options to use
    render_options: RenderOptions,
}

impl UnsngResult {
    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.song, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.song, format)
    }

    /// Get the song.
    pub fn song(&self) -> &Song {
        &self.song
    }
}
