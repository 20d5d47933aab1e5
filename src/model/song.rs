//! Song-level type.

use super::{Properties, Slide, VerseMap};
use serde::{Deserialize, Serialize};

/// A decoded SongBeamer song.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Header properties
    #[serde(rename = "props")]
    pub properties: Properties,

    /// Verses keyed by label
    pub texts: VerseMap,
}

impl Song {
    /// Create a song from its parts.
    pub fn new(properties: Properties, texts: VerseMap) -> Self {
        Self { properties, texts }
    }

    /// First non-empty title.
    pub fn title(&self) -> Option<&str> {
        self.properties.title()
    }

    /// Number of languages per row.
    pub fn lang_count(&self) -> usize {
        self.properties.lang_count()
    }

    /// Verse order, declared or discovered.
    pub fn verse_order(&self) -> &[String] {
        self.properties.verse_order()
    }

    /// Slides of a verse.
    pub fn verse(&self, label: &str) -> Option<&[Slide]> {
        self.texts.get(label)
    }

    /// Check if the song has no verses.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Verses in singing order.
    ///
    /// Labels from `VerseOrder` come first (repeats included, unknown
    /// labels skipped), followed by verses the order never mentions.
    pub fn ordered_verses(&self) -> Vec<(&str, &[Slide])> {
        let order = self.verse_order();
        let mut result: Vec<(&str, &[Slide])> = order
            .iter()
            .filter_map(|label| self.texts.get(label).map(|s| (label.as_str(), s)))
            .collect();

        for verse in &self.texts {
            if !order.iter().any(|label| *label == verse.label) {
                result.push((verse.label.as_str(), verse.slides.as_slice()));
            }
        }
        result
    }

    /// All lines of one language, verse by verse in source order.
    pub fn language_text(&self, lang: usize) -> String {
        self.texts
            .iter()
            .flat_map(|verse| verse.slides.iter())
            .flat_map(|slide| slide.language_lines(lang))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
