//! Song model types.
//!
//! This module defines the structure produced by the parser: a header
//! property table plus a map of verses, each verse a sequence of slides,
//! each slide a sequence of language-aligned rows.

mod property;
mod song;
mod verse;

pub use property::{
    Properties, PropertyValue, BACKGROUND_COLOR, LANG, LANG_COUNT, TITLE, VERSE_ORDER,
};
pub use song::Song;
pub use verse::{Row, Slide, Verse, VerseMap};
