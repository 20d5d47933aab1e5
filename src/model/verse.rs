//! Verse, slide and row types.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One language-aligned group of parallel lines.
///
/// Slot `i` holds the line for language `i`. A row may be shorter than the
/// song's language count when its slide ends mid-group (a partial row).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Vec<String>);

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Line for a language slot.
    pub fn get(&self, lang: usize) -> Option<&str> {
        self.0.get(lang).map(String::as_str)
    }

    /// All language slots in order.
    pub fn lines(&self) -> &[String] {
        &self.0
    }

    /// Number of filled language slots.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the row has no lines.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the row is missing trailing language slots.
    pub fn is_partial(&self, lang_count: usize) -> bool {
        self.0.len() < lang_count
    }

    pub(crate) fn push(&mut self, line: String) {
        self.0.push(line);
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Row(iter.into_iter().map(Into::into).collect())
    }
}

/// A slide: one screenful of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slide(Vec<Row>);

impl Slide {
    /// Create an empty slide.
    pub fn new() -> Self {
        Self::default()
    }

    /// Group a flat list of lines into rows of `lang_count` lines each.
    ///
    /// Line `i` lands in row `i / lang_count`, slot `i % lang_count`. When
    /// the line count is not a multiple of `lang_count` the last row is
    /// partial; it is never padded.
    pub fn from_lines<I>(lines: I, lang_count: usize) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let lang_count = lang_count.max(1);
        let mut rows: Vec<Row> = Vec::new();
        for (i, line) in lines.into_iter().enumerate() {
            if i % lang_count == 0 {
                rows.push(Row::new());
            }
            if let Some(row) = rows.last_mut() {
                row.push(line);
            }
        }
        Slide(rows)
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.0
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.0.len()
    }

    /// Check if the slide has no rows.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lines of one language, in row order.
    pub fn language_lines(&self, lang: usize) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(move |row| row.get(lang))
    }

    /// Add a row.
    pub fn push_row(&mut self, row: Row) {
        self.0.push(row);
    }
}

/// A labelled verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    /// Tag, user-defined tag text, or free-text title
    pub label: String,
    /// Slides in order
    pub slides: Vec<Slide>,
}

impl Verse {
    /// Create a verse.
    pub fn new(label: impl Into<String>, slides: Vec<Slide>) -> Self {
        Self {
            label: label.into(),
            slides,
        }
    }

    /// Total number of rows across all slides.
    pub fn row_count(&self) -> usize {
        self.slides.iter().map(Slide::row_count).sum()
    }
}

/// Verses keyed by label, in the order they first appeared.
///
/// Serializes as a map from label to slides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerseMap {
    verses: Vec<Verse>,
}

impl VerseMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a verse. An existing label keeps its position and has its
    /// slides replaced.
    pub fn insert(&mut self, label: impl Into<String>, slides: Vec<Slide>) {
        let label = label.into();
        match self.verses.iter_mut().find(|v| v.label == label) {
            Some(existing) => existing.slides = slides,
            None => self.verses.push(Verse::new(label, slides)),
        }
    }

    /// Slides of a verse.
    pub fn get(&self, label: &str) -> Option<&[Slide]> {
        self.verses
            .iter()
            .find(|v| v.label == label)
            .map(|v| v.slides.as_slice())
    }

    /// Check if a label is present.
    pub fn contains(&self, label: &str) -> bool {
        self.verses.iter().any(|v| v.label == label)
    }

    /// Labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.verses.iter().map(|v| v.label.as_str())
    }

    /// Verses in order.
    pub fn iter(&self) -> impl Iterator<Item = &Verse> {
        self.verses.iter()
    }

    /// Number of verses.
    pub fn len(&self) -> usize {
        self.verses.len()
    }

    /// Check if there are no verses.
    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// Total number of slides across all verses.
    pub fn slide_count(&self) -> usize {
        self.verses.iter().map(|v| v.slides.len()).sum()
    }
}

impl<'a> IntoIterator for &'a VerseMap {
    type Item = &'a Verse;
    type IntoIter = std::slice::Iter<'a, Verse>;

    fn into_iter(self) -> Self::IntoIter {
        self.verses.iter()
    }
}

impl Serialize for VerseMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.verses.len()))?;
        for verse in &self.verses {
            map.serialize_entry(&verse.label, &verse.slides)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for VerseMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VerseMapVisitor;

        impl<'de> Visitor<'de> for VerseMapVisitor {
            type Value = VerseMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from verse label to slides")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<VerseMap, A::Error> {
                let mut verses = VerseMap::new();
                while let Some((label, slides)) = access.next_entry::<String, Vec<Slide>>()? {
                    verses.insert(label, slides);
                }
                Ok(verses)
            }
        }

        deserializer.deserialize_map(VerseMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_slide_from_lines_interleaves_languages() {
        let slide = Slide::from_lines(lines(&["Hello", "Hallo", "World", "Welt"]), 2);
        assert_eq!(slide.row_count(), 2);
        assert_eq!(slide.rows()[0].lines(), ["Hello", "Hallo"]);
        assert_eq!(slide.rows()[1].lines(), ["World", "Welt"]);
        assert_eq!(slide.language_lines(1).collect::<Vec<_>>(), ["Hallo", "Welt"]);
    }

    #[test]
    fn test_slide_from_lines_partial_row() {
        let slide = Slide::from_lines(lines(&["a", "b", "c"]), 2);
        assert_eq!(slide.row_count(), 2);
        assert!(!slide.rows()[0].is_partial(2));
        assert!(slide.rows()[1].is_partial(2));
        assert_eq!(slide.rows()[1].lines(), ["c"]);
    }

    #[test]
    fn test_slide_from_lines_zero_lang_count() {
        let slide = Slide::from_lines(lines(&["a", "b"]), 0);
        assert_eq!(slide.row_count(), 2);
    }

    #[test]
    fn test_verse_map_replace_keeps_position() {
        let mut map = VerseMap::new();
        map.insert("Verse", vec![Slide::new()]);
        map.insert("Chorus", vec![Slide::new()]);
        map.insert("Verse", vec![Slide::new(), Slide::new()]);

        assert_eq!(map.labels().collect::<Vec<_>>(), ["Verse", "Chorus"]);
        assert_eq!(map.get("Verse").map(<[Slide]>::len), Some(2));
        assert_eq!(map.slide_count(), 3);
    }

    #[test]
    fn test_verse_map_serializes_in_order() {
        let mut map = VerseMap::new();
        map.insert("Zeta", vec![Slide::from_lines(lines(&["z"]), 1)]);
        map.insert("Alpha", vec![Slide::from_lines(lines(&["a"]), 1)]);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"Zeta":[[["z"]]],"Alpha":[[["a"]]]}"#);

        let back: VerseMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
