//! Header property types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `LangCount` property name.
pub const LANG_COUNT: &str = "LangCount";
/// `VerseOrder` property name.
pub const VERSE_ORDER: &str = "VerseOrder";
/// `Title` property name.
pub const TITLE: &str = "Title";
/// `Lang` property name.
pub const LANG: &str = "Lang";
/// `BackgroundColor` property name (rewritten from `BackgroundImage`).
pub const BACKGROUND_COLOR: &str = "BackgroundColor";

/// A decoded header value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Integer value (`Version`, `LangCount`, `CCLI`, ...)
    Integer(i64),
    /// Plain string value
    Text(String),
    /// Ordered list of strings (`Title`, `VerseOrder`, `Keywords`, ...)
    List(Vec<String>),
    /// Background color with alpha discarded
    Color {
        /// 24-bit RGB value
        rgb: u32,
    },
}

impl PropertyValue {
    /// Get the value as a string, if it is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the value as a list, if it is one.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            PropertyValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get the RGB value, if this is a color.
    pub fn as_rgb(&self) -> Option<u32> {
        match self {
            PropertyValue::Color { rgb } => Some(*rgb),
            _ => None,
        }
    }

    /// Trim surrounding whitespace from the value and every list element.
    pub(crate) fn trimmed(self) -> Self {
        match self {
            PropertyValue::Text(s) => PropertyValue::Text(s.trim().to_string()),
            PropertyValue::List(items) => {
                PropertyValue::List(items.iter().map(|s| s.trim().to_string()).collect())
            }
            other => other,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        PropertyValue::Integer(n)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(items: Vec<String>) -> Self {
        PropertyValue::List(items)
    }
}

/// Header property table.
///
/// Keys are case-sensitive. After decoding, `LangCount` and `VerseOrder`
/// are always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
    entries: BTreeMap<String, PropertyValue>,
}

impl Properties {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a property by name.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    /// Insert or replace a property.
    pub fn insert(&mut self, key: impl Into<String>, value: PropertyValue) {
        self.entries.insert(key.into(), value);
    }

    /// Remove a property.
    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.entries.remove(key)
    }

    /// Check whether a property is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over properties in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Get a string property.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropertyValue::as_text)
    }

    /// Get an integer property.
    pub fn get_integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(PropertyValue::as_integer)
    }

    /// Get a list property.
    pub fn get_list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(PropertyValue::as_list)
    }

    /// Number of languages per row. Defaults to 1.
    pub fn lang_count(&self) -> usize {
        self.get_integer(LANG_COUNT)
            .filter(|n| *n > 0)
            .map_or(1, |n| n as usize)
    }

    /// Declared (or discovered) verse order.
    pub fn verse_order(&self) -> &[String] {
        self.get_list(VERSE_ORDER).unwrap_or(&[])
    }

    /// Append a tag to the verse order, creating the list when missing or
    /// not a list.
    pub(crate) fn push_verse_order(&mut self, tag: impl Into<String>) {
        match self.entries.get_mut(VERSE_ORDER) {
            Some(PropertyValue::List(items)) => items.push(tag.into()),
            _ => self.insert(VERSE_ORDER, PropertyValue::List(vec![tag.into()])),
        }
    }

    /// Make sure `VerseOrder` holds a list.
    pub(crate) fn ensure_verse_order(&mut self) {
        if !matches!(self.get(VERSE_ORDER), Some(PropertyValue::List(_))) {
            self.insert(VERSE_ORDER, PropertyValue::List(Vec::new()));
        }
    }

    /// First non-empty title.
    pub fn title(&self) -> Option<&str> {
        self.get_list(TITLE)?
            .iter()
            .map(String::as_str)
            .find(|t| !t.is_empty())
    }

    /// Background color as 24-bit RGB.
    pub fn background_color(&self) -> Option<u32> {
        self.get(BACKGROUND_COLOR).and_then(PropertyValue::as_rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_missing() {
        let props = Properties::new();
        assert_eq!(props.lang_count(), 1);
        assert!(props.verse_order().is_empty());
        assert_eq!(props.title(), None);
    }

    #[test]
    fn test_push_verse_order_replaces_non_list() {
        let mut props = Properties::new();
        props.insert(VERSE_ORDER, PropertyValue::from("Chorus"));
        props.push_verse_order("Verse");
        assert_eq!(props.verse_order(), ["Verse".to_string()]);

        props.push_verse_order("Bridge");
        assert_eq!(props.verse_order(), ["Verse".to_string(), "Bridge".to_string()]);
    }

    #[test]
    fn test_ensure_verse_order() {
        let mut props = Properties::new();
        props.ensure_verse_order();
        assert_eq!(props.get_list(VERSE_ORDER), Some(&[][..]));

        props.insert(VERSE_ORDER, PropertyValue::Integer(3));
        props.ensure_verse_order();
        assert!(props.verse_order().is_empty());

        props.push_verse_order("Verse");
        props.ensure_verse_order();
        assert_eq!(props.verse_order(), ["Verse".to_string()]);
    }

    #[test]
    fn test_title_skips_empty_slots() {
        let mut props = Properties::new();
        props.insert(
            TITLE,
            PropertyValue::List(vec![String::new(), "Amazing Grace".to_string()]),
        );
        assert_eq!(props.title(), Some("Amazing Grace"));
    }

    #[test]
    fn test_value_serialization() {
        let color = PropertyValue::Color { rgb: 0x112233 };
        assert_eq!(serde_json::to_string(&color).unwrap(), r#"{"rgb":1122867}"#);

        let list = PropertyValue::List(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["a","b"]"#);

        assert_eq!(serde_json::to_string(&PropertyValue::Integer(2)).unwrap(), "2");
    }

    #[test]
    fn test_value_deserialization() {
        let value: PropertyValue = serde_json::from_str(r#"{"rgb":255}"#).unwrap();
        assert_eq!(value.as_rgb(), Some(255));

        let value: PropertyValue = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(value.as_text(), Some("text"));
    }
}
