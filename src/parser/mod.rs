//! SongBeamer parsing module.
//!
//! Decoding runs in two phases over the document's lines: the header block
//! (`#Key=Value` properties) and then the body block (verses separated by
//! `---`, slides separated by `--`).

mod body;
mod frame;
mod options;
mod properties;
mod sng_parser;
mod tag;

pub use body::BodyDecoder;
pub use frame::{find_body_start, split_document, Frame, SLIDE_SEPARATOR, VERSE_SEPARATOR};
pub use options::{ErrorMode, LineEnding, ParseOptions};
pub use properties::{PropertyDecoder, PROPERTY_MARKER};
pub use sng_parser::SngParser;
pub use tag::{classify_tag, parse_tag, TagClass, RECOGNIZED_TAGS, USER_TAG_PREFIX};
