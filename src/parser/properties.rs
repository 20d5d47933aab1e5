//! Header property decoding.
//!
//! Each header line has the shape `#Key=Value`. Values are coerced per key
//! through a static rule table; keys without a rule are kept as strings.

use super::ErrorMode;
use crate::error::{Error, Result};
use crate::model::{Properties, PropertyValue, BACKGROUND_COLOR, LANG, LANG_COUNT, TITLE};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use once_cell::sync::Lazy;
use regex::Regex;

/// Marker every header line starts with.
pub const PROPERTY_MARKER: char = '#';

static PROPERTY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(\([A-Za-z0-9]\)|[A-Za-z0-9]+)=(.*)").expect("property pattern is valid")
});

static COLOR_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^color://\$([0-9a-fA-F]{8})").expect("color pattern is valid")
});

/// Highest number of `TitleLang<N>`/`FontLang<N>` slots kept.
pub const MAX_LANG_SLOTS: usize = 64;

// SongBeamer writes padded base64, but hand-edited files often lose it.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Which header keys a rule applies to.
#[derive(Debug, Clone, Copy)]
enum KeyPattern {
    /// The key itself
    Exact(&'static str),
    /// `<prefix><N>` with a decimal index `N`
    Indexed(&'static str),
}

impl KeyPattern {
    /// Match a key, returning the index for indexed patterns.
    fn matches(&self, key: &str) -> Option<Option<usize>> {
        match self {
            KeyPattern::Exact(name) => (key == *name).then_some(None),
            KeyPattern::Indexed(prefix) => {
                let suffix = key.strip_prefix(prefix)?;
                if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                suffix.parse().ok().map(Some)
            }
        }
    }
}

/// Everything a transform may look at.
struct RuleInput<'a> {
    key: &'a str,
    value: &'a str,
    index: Option<usize>,
    table: &'a Properties,
}

/// Resulting key and value, or `None` to skip the line.
type Decoded = Option<(String, PropertyValue)>;

type Transform = fn(&RuleInput<'_>) -> Result<Decoded>;

struct Rule {
    pattern: KeyPattern,
    transform: Transform,
}

const fn rule(pattern: KeyPattern, transform: Transform) -> Rule {
    Rule { pattern, transform }
}

static RULES: &[Rule] = &[
    rule(KeyPattern::Exact("Title"), wrap_list),
    rule(KeyPattern::Indexed("TitleLang"), title_lang),
    rule(KeyPattern::Exact("Font"), wrap_list),
    rule(KeyPattern::Indexed("FontLang"), font_lang),
    rule(KeyPattern::Exact("VerseOrder"), verse_order),
    rule(KeyPattern::Exact("Comments"), comments),
    rule(KeyPattern::Exact("Chords"), chords),
    rule(KeyPattern::Exact("Keywords"), keywords),
    rule(KeyPattern::Exact("Categories"), categories),
    rule(KeyPattern::Exact("BackgroundImage"), background_image),
    rule(KeyPattern::Exact("(c)"), copyright),
    rule(KeyPattern::Exact("Version"), integer),
    rule(KeyPattern::Exact("FontSize"), integer),
    rule(KeyPattern::Exact("Tempo"), integer),
    rule(KeyPattern::Exact(LANG_COUNT), integer),
    rule(KeyPattern::Exact("ChurchSongID"), integer),
    rule(KeyPattern::Exact("CCLI"), integer),
];

fn keep(input: &RuleInput<'_>, value: PropertyValue) -> Result<Decoded> {
    Ok(Some((input.key.to_string(), value)))
}

fn split_list(value: &str, separator: char) -> PropertyValue {
    PropertyValue::List(value.split(separator).map(str::to_string).collect())
}

fn wrap_list(input: &RuleInput<'_>) -> Result<Decoded> {
    keep(input, PropertyValue::List(vec![input.value.to_string()]))
}

fn place_indexed(input: &RuleInput<'_>, target: &str) -> Result<Decoded> {
    let index = input.index.unwrap_or(0);
    let Some(len) = index.checked_add(1).filter(|len| *len <= MAX_LANG_SLOTS) else {
        log::warn!("Skipping {}: slot index {} out of range", input.key, index);
        return Ok(None);
    };
    let mut items = input.table.get_list(target).map(<[String]>::to_vec).unwrap_or_default();
    if items.len() < len {
        items.resize(len, String::new());
    }
    items[index] = input.value.to_string();
    Ok(Some((target.to_string(), PropertyValue::List(items))))
}

fn title_lang(input: &RuleInput<'_>) -> Result<Decoded> {
    place_indexed(input, TITLE)
}

fn font_lang(input: &RuleInput<'_>) -> Result<Decoded> {
    place_indexed(input, "Font")
}

fn verse_order(input: &RuleInput<'_>) -> Result<Decoded> {
    let tags = input
        .value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    keep(input, PropertyValue::List(tags))
}

fn decode_base64(input: &RuleInput<'_>) -> Result<String> {
    let bytes = BASE64
        .decode(input.value.trim())
        .map_err(|e| Error::InvalidBase64 {
            key: input.key.to_string(),
            message: e.to_string(),
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn comments(input: &RuleInput<'_>) -> Result<Decoded> {
    let text = decode_base64(input)?;
    keep(input, PropertyValue::Text(text))
}

fn chords(input: &RuleInput<'_>) -> Result<Decoded> {
    let text = decode_base64(input)?;
    keep(input, split_list(&text, '\r'))
}

fn keywords(input: &RuleInput<'_>) -> Result<Decoded> {
    keep(input, split_list(input.value, ' '))
}

fn categories(input: &RuleInput<'_>) -> Result<Decoded> {
    keep(input, split_list(input.value, ','))
}

/// `color://$XXXXXXXX` becomes `BackgroundColor`. The eight hex digits are
/// read as one 32-bit number and only the low 24 bits are kept.
fn background_image(input: &RuleInput<'_>) -> Result<Decoded> {
    if !input.value.starts_with("color://") {
        return keep(input, PropertyValue::Text(input.value.to_string()));
    }

    let invalid = || Error::InvalidColor {
        value: input.value.to_string(),
    };
    let hex = COLOR_LITERAL
        .captures(input.value)
        .and_then(|caps| caps.get(1))
        .ok_or_else(invalid)?;
    let value = u32::from_str_radix(hex.as_str(), 16).map_err(|_| invalid())?;

    Ok(Some((
        BACKGROUND_COLOR.to_string(),
        PropertyValue::Color {
            rgb: value & 0x00FF_FFFF,
        },
    )))
}

fn copyright(input: &RuleInput<'_>) -> Result<Decoded> {
    Ok(Some(("Copyright".to_string(), split_list(input.value, '|'))))
}

fn integer(input: &RuleInput<'_>) -> Result<Decoded> {
    let raw = input.value.trim();
    if raw.is_empty() {
        log::debug!("Skipping empty integer property {}", input.key);
        return Ok(None);
    }

    let invalid = || Error::InvalidInteger {
        key: input.key.to_string(),
        value: input.value.to_string(),
    };
    let value: i64 = raw.parse().map_err(|_| invalid())?;
    if input.key == LANG_COUNT && value < 1 {
        return Err(invalid());
    }
    keep(input, PropertyValue::Integer(value))
}

/// Decoder for the header block.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyDecoder {
    error_mode: ErrorMode,
}

impl PropertyDecoder {
    /// Create a decoder.
    pub fn new(error_mode: ErrorMode) -> Self {
        Self { error_mode }
    }

    /// Decode header lines into a property table.
    ///
    /// Blank lines are ignored. Lines that start with `#` but are not
    /// `#Key=Value` are skipped. Any other line is a
    /// [`Error::MalformedProperty`].
    pub fn decode(&self, lines: &[&str]) -> Result<Properties> {
        let mut props = Properties::new();

        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            if !line.starts_with(PROPERTY_MARKER) {
                return Err(Error::MalformedProperty {
                    line: line.to_string(),
                    lines: lines.iter().map(|s| s.to_string()).collect(),
                });
            }

            let Some(caps) = PROPERTY_LINE.captures(line) else {
                log::debug!("Skipping unrecognized header line {:?}", line);
                continue;
            };
            let key = caps.get(1).map_or("", |m| m.as_str());
            let value = caps.get(2).map_or("", |m| m.as_str());

            match self.decode_property(&props, key, value) {
                Ok(Some((key, value))) => props.insert(key, value.trimmed()),
                Ok(None) => {}
                Err(e) if self.is_recoverable(&e) => {
                    log::warn!("Skipping property {}: {}", key, e);
                }
                Err(e) => return Err(e),
            }
        }

        normalize_lang(&mut props);
        if !props.contains_key(LANG_COUNT) {
            props.insert(LANG_COUNT, PropertyValue::Integer(1));
        }
        props.ensure_verse_order();

        Ok(props)
    }

    fn decode_property(&self, table: &Properties, key: &str, value: &str) -> Result<Decoded> {
        for rule in RULES {
            if let Some(index) = rule.pattern.matches(key) {
                let input = RuleInput {
                    key,
                    value,
                    index,
                    table,
                };
                return (rule.transform)(&input);
            }
        }
        Ok(Some((key.to_string(), PropertyValue::Text(value.to_string()))))
    }

    fn is_recoverable(&self, err: &Error) -> bool {
        self.error_mode == ErrorMode::Lenient
            && matches!(
                err,
                Error::InvalidColor { .. }
                    | Error::InvalidInteger { .. }
                    | Error::InvalidBase64 { .. }
            )
    }
}

/// Turn `Lang` into a language code list.
///
/// For multi-language songs the second slot receives the complementary code
/// (`de` pairs with `en`). The first slot reads `en` unless that would
/// repeat the second slot.
fn normalize_lang(props: &mut Properties) {
    let lang_count = props.lang_count();
    let original = match props.get(LANG) {
        Some(PropertyValue::Text(s)) => s.clone(),
        Some(PropertyValue::List(items)) => items.first().cloned().unwrap_or_default(),
        _ => return,
    };

    let langs = if lang_count > 1 {
        let second = if original == "de" { "en" } else { "de" };
        let first = if second == "en" { original } else { "en".to_string() };
        vec![first, second.to_string()]
    } else {
        vec![original]
    };
    props.insert(LANG, PropertyValue::List(langs));
}
