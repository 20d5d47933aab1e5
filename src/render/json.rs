//! JSON rendering for songs.

use crate::error::{Error, Result};
use crate::model::Song;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a song to JSON of the shape `{"props": {...}, "texts": {...}}`.
pub fn to_json(song: &Song, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(song),
        JsonFormat::Compact => serde_json::to_string(song),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Properties, PropertyValue, Slide, VerseMap, TITLE};

    fn sample_song() -> Song {
        let mut props = Properties::new();
        props.insert(TITLE, PropertyValue::List(vec!["Test".to_string()]));
        let mut texts = VerseMap::new();
        texts.insert(
            "Chorus",
            vec![Slide::from_lines(vec!["Hello".to_string()], 1)],
        );
        Song::new(props, texts)
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample_song(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"props\""));
        assert!(json.contains("\"Title\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample_song(), JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"props":{"Title":["Test"]},"texts":{"Chorus":[[["Hello"]]]}}"#
        );
    }
}
