//! Verse tag classification.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix of a user-defined tag line (`$$K=text`).
pub const USER_TAG_PREFIX: &str = "$$";

/// Verse tags SongBeamer recognizes, in German and English spellings.
pub const RECOGNIZED_TAGS: &[&str] = &[
    "Unbekannt",
    "Unbennant",
    "Unknown",
    "Intro",
    "Vers",
    "Verse",
    "Strophe",
    "Pre-Bridge",
    "Bridge",
    "Misc",
    "Pre-Refrain",
    "Refrain",
    "Pre-Chorus",
    "Chorus",
    "Pre-Coda",
    "Zwischenspiel",
    "Interlude",
    "Coda",
    "Ending",
    "Teil",
    "Part",
];

static USER_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\$\$[A-Za-z]=([\x{00C0}-\x{017F}A-Za-z0-9 ]+ ?(?:\([A-Za-z]\))?)")
        .expect("user tag pattern is valid")
});

/// How the line after a verse separator was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagClass {
    /// Listed in the song's pre-declared `VerseOrder`
    Declared(String),
    /// One of [`RECOGNIZED_TAGS`]
    Recognized(String),
    /// Text of a `$$K=text` tag
    UserDefined(String),
    /// Not a tag; the raw line titles the verse
    FreeText(String),
}

impl TagClass {
    /// Label the verse is keyed under.
    pub fn label(&self) -> &str {
        match self {
            TagClass::Declared(s)
            | TagClass::Recognized(s)
            | TagClass::UserDefined(s)
            | TagClass::FreeText(s) => s,
        }
    }

    /// Whether the tag line is consumed. Free-text titles stay in the
    /// verse as its first line.
    pub fn consumes_line(&self) -> bool {
        !matches!(self, TagClass::FreeText(_))
    }

    /// Whether the tag should be added to `VerseOrder` when missing.
    pub fn is_discovered(&self) -> bool {
        matches!(self, TagClass::Recognized(_) | TagClass::UserDefined(_))
    }
}

/// Extract the tag a candidate line names, if any.
///
/// Returns `Ok(None)` for lines that are not tags at all.
pub fn parse_tag(candidate: &str) -> Result<Option<String>> {
    if candidate.starts_with(USER_TAG_PREFIX) {
        return USER_TAG
            .captures(candidate)
            .and_then(|caps| caps.get(1))
            .map(|m| Some(m.as_str().trim_end().to_string()))
            .ok_or_else(|| Error::InvalidTag {
                tag: candidate.to_string(),
                lines: Vec::new(),
            });
    }

    Ok(RECOGNIZED_TAGS
        .contains(&candidate)
        .then(|| candidate.to_string()))
}

/// Classify the line following a verse separator.
///
/// `declared` tells whether `VerseOrder` was non-empty before the body was
/// decoded; only then can a candidate resolve to [`TagClass::Declared`].
pub fn classify_tag(candidate: &str, verse_order: &[String], declared: bool) -> Result<TagClass> {
    let tag = parse_tag(candidate)?;

    if declared {
        let key = tag.as_deref().unwrap_or(candidate);
        if verse_order.iter().any(|t| t == key) {
            return Ok(TagClass::Declared(key.to_string()));
        }
    }

    Ok(match tag {
        Some(tag) if candidate.starts_with(USER_TAG_PREFIX) => TagClass::UserDefined(tag),
        Some(tag) => TagClass::Recognized(tag),
        None => TagClass::FreeText(candidate.to_string()),
    })
}
