//! Plain text rendering for songs.

use crate::error::{Error, Result};
use crate::model::{Row, Slide, Song};

use super::RenderOptions;

/// Convert a song to plain lyrics text.
pub fn to_text(song: &Song, options: &RenderOptions) -> Result<String> {
    if let Some(lang) = options.language {
        if lang >= song.lang_count() {
            return Err(Error::Render(format!(
                "Language {} is out of range (song has {} languages)",
                lang,
                song.lang_count()
            )));
        }
    }

    let verses: Vec<(&str, &[Slide])> = if options.follow_verse_order {
        song.ordered_verses()
    } else {
        song.texts
            .iter()
            .map(|v| (v.label.as_str(), v.slides.as_slice()))
            .collect()
    };

    let slide_joiner = format!("\n{}", options.slide_separator);
    let blocks: Vec<String> = verses
        .into_iter()
        .map(|(label, slides)| {
            let body = slides
                .iter()
                .map(|slide| render_slide(slide, options))
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join(&slide_joiner);
            if options.include_labels {
                format!("[{}]\n{}", label, body)
            } else {
                body
            }
        })
        .collect();

    Ok(blocks.join("\n\n").trim().to_string())
}

fn render_slide(slide: &Slide, options: &RenderOptions) -> String {
    slide
        .rows()
        .iter()
        .filter_map(|row| render_row(row, options))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_row(row: &Row, options: &RenderOptions) -> Option<String> {
    match options.language {
        Some(lang) => row.get(lang).map(str::to_string),
        None => Some(row.lines().join(&options.language_separator)),
    }
}
