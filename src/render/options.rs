//! Rendering options and configuration.

/// Options for rendering song content as text.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Visit verses in `VerseOrder` (repeats included) instead of source order
    pub follow_verse_order: bool,

    /// Only render this language slot
    pub language: Option<usize>,

    /// Write a `[label]` line before each verse
    pub include_labels: bool,

    /// Joins the lines of one row when all languages are rendered
    pub language_separator: String,

    /// Written between slides
    pub slide_separator: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow the song's verse order, or keep source order.
    pub fn with_verse_order(mut self, follow: bool) -> Self {
        self.follow_verse_order = follow;
        self
    }

    /// Restrict output to one language slot.
    pub fn with_language(mut self, lang: usize) -> Self {
        self.language = Some(lang);
        self
    }

    /// Enable or disable verse labels.
    pub fn with_labels(mut self, include: bool) -> Self {
        self.include_labels = include;
        self
    }

    /// Set the separator between parallel language lines.
    pub fn with_language_separator(mut self, separator: impl Into<String>) -> Self {
        self.language_separator = separator.into();
        self
    }

    /// Set the separator between slides.
    pub fn with_slide_separator(mut self, separator: impl Into<String>) -> Self {
        self.slide_separator = separator.into();
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            follow_verse_order: true,
            language: None,
            include_labels: true,
            language_separator: " / ".to_string(),
            slide_separator: "\n".to_string(),
        }
    }
}
