//! Body decoding: verses, slides and language rows.

use super::frame::{SLIDE_SEPARATOR, VERSE_SEPARATOR};
use super::tag::classify_tag;
use crate::error::{Error, Result};
use crate::model::{Properties, Slide, VerseMap};

/// Raw lines of one verse before language grouping.
#[derive(Debug)]
struct RawVerse {
    label: String,
    slides: Vec<Vec<String>>,
}

/// Collects lines into verses and slides in source order.
#[derive(Debug, Default)]
struct VerseCollector {
    verses: Vec<RawVerse>,
    current: Option<usize>,
}

impl VerseCollector {
    /// Start a verse. An existing label is emptied and becomes current again.
    fn open(&mut self, label: &str) {
        match self.verses.iter().position(|v| v.label == label) {
            Some(pos) => {
                log::debug!("Verse {:?} opened again, replacing its slides", label);
                self.verses[pos].slides = vec![Vec::new()];
                self.current = Some(pos);
            }
            None => {
                self.verses.push(RawVerse {
                    label: label.to_string(),
                    slides: vec![Vec::new()],
                });
                self.current = Some(self.verses.len() - 1);
            }
        }
    }

    fn current_mut(&mut self) -> &mut RawVerse {
        if self.current.is_none() {
            self.open("");
        }
        let index = self.current.unwrap_or(0);
        &mut self.verses[index]
    }

    /// Start a new slide unless the current one is still empty.
    fn new_slide(&mut self) {
        let verse = self.current_mut();
        if verse.slides.last().map_or(true, |s| !s.is_empty()) {
            verse.slides.push(Vec::new());
        }
    }

    fn push_line(&mut self, line: &str) {
        let verse = self.current_mut();
        match verse.slides.last_mut() {
            Some(slide) => slide.push(line.to_string()),
            None => verse.slides.push(vec![line.to_string()]),
        }
    }

    /// Group every slide's lines into rows of `lang_count`.
    fn finish(self, lang_count: usize) -> VerseMap {
        let mut map = VerseMap::new();
        for verse in self.verses {
            let slides = verse
                .slides
                .into_iter()
                .map(|lines| Slide::from_lines(lines, lang_count))
                .collect();
            map.insert(verse.label, slides);
        }
        map
    }
}

/// Decoder for the body block.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyDecoder;

impl BodyDecoder {
    /// Create a decoder.
    pub fn new() -> Self {
        Self
    }

    /// Decode body lines into verses.
    ///
    /// `props` supplies `VerseOrder` and `LangCount`. Tags found in the body
    /// that the order does not list yet are appended to `VerseOrder`.
    pub fn decode(&self, body: &[&str], props: &mut Properties) -> Result<VerseMap> {
        let mut lines = body.to_vec();
        // Legacy layout: body opened by a slide separator.
        if lines.first() == Some(&SLIDE_SEPARATOR) {
            lines[0] = VERSE_SEPARATOR;
        }

        let declared = !props.verse_order().is_empty();
        let mut collector = VerseCollector::default();

        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];

            if line == VERSE_SEPARATOR {
                match lines.get(i + 1).copied() {
                    Some(SLIDE_SEPARATOR) => {
                        // An empty verse; fold the slide separator into this one.
                        lines[i + 1] = VERSE_SEPARATOR;
                    }
                    Some(VERSE_SEPARATOR) | None => {
                        i += 1;
                    }
                    Some(candidate) => {
                        let class = classify_tag(candidate, props.verse_order(), declared)
                            .map_err(|e| with_body_lines(e, body))?;
                        let label = class.label();

                        if class.is_discovered() && !props.verse_order().iter().any(|t| t == label)
                        {
                            log::debug!("Adding discovered tag {:?} to VerseOrder", label);
                            props.push_verse_order(label);
                        }

                        collector.open(label);
                        i += if class.consumes_line() { 2 } else { 1 };
                    }
                }
                continue;
            }

            if line == SLIDE_SEPARATOR {
                collector.new_slide();
            } else {
                collector.push_line(line);
            }
            i += 1;
        }

        Ok(collector.finish(props.lang_count()))
    }
}

fn with_body_lines(err: Error, body: &[&str]) -> Error {
    match err {
        Error::InvalidTag { tag, .. } => Error::InvalidTag {
            tag,
            lines: body.iter().map(|s| s.to_string()).collect(),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PropertyValue, LANG_COUNT, VERSE_ORDER};

    fn props(lang_count: i64, verse_order: &[&str]) -> Properties {
        let mut props = Properties::new();
        props.insert(LANG_COUNT, PropertyValue::Integer(lang_count));
        props.insert(
            VERSE_ORDER,
            PropertyValue::List(verse_order.iter().map(|s| s.to_string()).collect()),
        );
        props
    }

    fn rows(map: &VerseMap, label: &str) -> Vec<Vec<Vec<String>>> {
        map.get(label)
            .unwrap_or_else(|| panic!("missing verse {:?}", label))
            .iter()
            .map(|slide| slide.rows().iter().map(|r| r.lines().to_vec()).collect())
            .collect()
    }

    #[test]
    fn test_recognized_tags_extend_verse_order() {
        let mut props = props(1, &[]);
        let body = ["---", "Verse", "a", "b", "---", "Chorus", "c"];
        let map = BodyDecoder::new().decode(&body, &mut props).unwrap();

        assert_eq!(map.labels().collect::<Vec<_>>(), ["Verse", "Chorus"]);
        assert_eq!(rows(&map, "Verse"), vec![vec![vec!["a"], vec!["b"]]]);
        assert_eq!(props.verse_order(), ["Verse", "Chorus"]);
    }

    #[test]
    fn test_repeated_tag_not_duplicated_in_order() {
        let mut props = props(1, &[]);
        let body = ["---", "Chorus", "first", "---", "Chorus", "second"];
        let map = BodyDecoder::new().decode(&body, &mut props).unwrap();

        assert_eq!(props.verse_order(), ["Chorus"]);
        assert_eq!(map.len(), 1);
        assert_eq!(rows(&map, "Chorus"), vec![vec![vec!["second"]]]);
    }

    #[test]
    fn test_free_text_title_stays_in_verse() {
        let mut props = props(1, &[]);
        let body = ["---", "Amazing grace", "how sweet the sound"];
        let map = BodyDecoder::new().decode(&body, &mut props).unwrap();

        assert_eq!(
            rows(&map, "Amazing grace"),
            vec![vec![vec!["Amazing grace"], vec!["how sweet the sound"]]]
        );
        assert!(props.verse_order().is_empty());
    }

    #[test]
    fn test_declared_tag_precedence() {
        let mut props = props(1, &["Verse 1", "Chorus"]);
        let body = ["---", "Chorus", "la", "---", "Verse 1", "lu"];
        let map = BodyDecoder::new().decode(&body, &mut props).unwrap();

        assert_eq!(rows(&map, "Chorus"), vec![vec![vec!["la"]]]);
        assert_eq!(rows(&map, "Verse 1"), vec![vec![vec!["lu"]]]);
        assert_eq!(props.verse_order(), ["Verse 1", "Chorus"]);
    }

    #[test]
    fn test_undeclared_tag_appended_to_declared_order() {
        let mut props = props(1, &["Chorus"]);
        let body = ["---", "Bridge", "x", "---", "Chorus", "y"];
        BodyDecoder::new().decode(&body, &mut props).unwrap();
        assert_eq!(props.verse_order(), ["Chorus", "Bridge"]);
    }

    #[test]
    fn test_user_defined_tag() {
        let mut props = props(1, &[]);
        let body = ["---", "$$M=Outro", "bye"];
        let map = BodyDecoder::new().decode(&body, &mut props).unwrap();
        assert_eq!(rows(&map, "Outro"), vec![vec![vec!["bye"]]]);
        assert_eq!(props.verse_order(), ["Outro"]);
    }

    #[test]
    fn test_invalid_user_tag_carries_lines() {
        let mut props = props(1, &[]);
        let body = ["---", "$$Outro", "bye"];
        let result = BodyDecoder::new().decode(&body, &mut props);
        match result {
            Err(Error::InvalidTag { tag, lines }) => {
                assert_eq!(tag, "$$Outro");
                assert_eq!(lines, ["---", "$$Outro", "bye"]);
            }
            other => panic!("expected InvalidTag, got {:?}", other),
        }
    }

    #[test]
    fn test_consecutive_verse_separators_collapse() {
        let single = ["---", "Verse", "a", "---", "Chorus", "b"];
        let double = ["---", "Verse", "a", "---", "---", "Chorus", "b"];

        let mut p1 = props(1, &[]);
        let mut p2 = props(1, &[]);
        let m1 = BodyDecoder::new().decode(&single, &mut p1).unwrap();
        let m2 = BodyDecoder::new().decode(&double, &mut p2).unwrap();
        assert_eq!(m1, m2);
        assert_eq!(p1, p2);
    }

    #[test]
    fn test_verse_then_slide_separator() {
        let mut props = props(1, &[]);
        let body = ["---", "Verse", "a", "---", "--", "Chorus", "b"];
        let map = BodyDecoder::new().decode(&body, &mut props).unwrap();

        assert_eq!(map.labels().collect::<Vec<_>>(), ["Verse", "Chorus"]);
        assert!(map.iter().all(|v| !v.slides.is_empty()));
    }

    #[test]
    fn test_slide_separator_after_tag_does_not_leave_empty_slide() {
        let mut props = props(1, &[]);
        let body = ["---", "Chorus", "--", "a", "--", "--", "b"];
        let map = BodyDecoder::new().decode(&body, &mut props).unwrap();
        assert_eq!(rows(&map, "Chorus"), vec![vec![vec!["a"]], vec![vec!["b"]]]);
    }

    #[test]
    fn test_legacy_slide_separator_start() {
        let mut props = props(1, &[]);
        let body = ["--", "Verse", "a", "--", "b"];
        let map = BodyDecoder::new().decode(&body, &mut props).unwrap();
        assert_eq!(rows(&map, "Verse"), vec![vec![vec!["a"]], vec![vec!["b"]]]);
    }

    #[test]
    fn test_language_rows() {
        let mut props = props(2, &["Vers1", "Chorus"]);
        let body = ["---", "Vers1", "Hello", "Hallo", "--", "World", "Welt"];
        let map = BodyDecoder::new().decode(&body, &mut props).unwrap();
        assert_eq!(
            rows(&map, "Vers1"),
            vec![vec![vec!["Hello", "Hallo"]], vec![vec!["World", "Welt"]]]
        );
    }

    #[test]
    fn test_partial_row() {
        let mut props = props(2, &[]);
        let body = ["---", "Verse", "one", "eins", "two"];
        let map = BodyDecoder::new().decode(&body, &mut props).unwrap();
        let slide = &map.get("Verse").unwrap()[0];

        assert_eq!(slide.row_count(), 2);
        assert!(slide.rows()[1].is_partial(2));
        assert_eq!(slide.rows()[1].lines(), ["two"]);
    }

    #[test]
    fn test_empty_verse_keeps_one_slide() {
        let mut props = props(1, &[]);
        let body = ["---", "Intro", "---", "Verse", "a"];
        let map = BodyDecoder::new().decode(&body, &mut props).unwrap();
        let intro = map.get("Intro").unwrap();
        assert_eq!(intro.len(), 1);
        assert!(intro[0].is_empty());
    }
}
