//! Integration tests for song rendering.

use serde_json::{json, Value};
use unsng::render::{to_json, to_text, JsonFormat, RenderOptions};
use unsng::{parse_str, Song};

fn sample_song() -> Song {
    let text = [
        "#LangCount=2",
        "#Title=Hallelujah",
        "#TitleLang1=Halleluja",
        "#BackgroundImage=color://$00FFCC00",
        "#VerseOrder=Chorus,Verse,Chorus",
        "---",
        "Verse",
        "Praise him",
        "Lobt ihn",
        "---",
        "Chorus",
        "Hallelujah",
        "Halleluja",
        "--",
        "Amen",
    ]
    .join("\r\n");
    parse_str(&text).unwrap()
}

#[test]
fn test_json_shape() {
    let json = to_json(&sample_song(), JsonFormat::Compact).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["props"]["LangCount"], json!(2));
    assert_eq!(value["props"]["Title"], json!(["Hallelujah", "Halleluja"]));
    assert_eq!(value["props"]["BackgroundColor"], json!({ "rgb": 0xFFCC00 }));
    assert_eq!(value["props"]["VerseOrder"], json!(["Chorus", "Verse", "Chorus"]));
    assert_eq!(value["texts"]["Verse"], json!([[["Praise him", "Lobt ihn"]]]));
    assert_eq!(
        value["texts"]["Chorus"],
        json!([[["Hallelujah", "Halleluja"]], [["Amen"]]])
    );
}

#[test]
fn test_json_keeps_verse_order_of_appearance() {
    let json = to_json(&sample_song(), JsonFormat::Compact).unwrap();
    let verse = json.find("\"Verse\":[").unwrap();
    let chorus = json.find("\"Chorus\":[").unwrap();
    assert!(verse < chorus);
}

#[test]
fn test_json_round_trip() {
    let song = sample_song();
    let json = to_json(&song, JsonFormat::Pretty).unwrap();
    let back: Song = serde_json::from_str(&json).unwrap();
    assert_eq!(back, song);
}

#[test]
fn test_text_repeats_verses_from_order() {
    let text = to_text(&sample_song(), &RenderOptions::new().with_language(0)).unwrap();
    assert_eq!(
        text,
        "[Chorus]\nHallelujah\n\nAmen\n\n[Verse]\nPraise him\n\n[Chorus]\nHallelujah\n\nAmen"
    );
}

#[test]
fn test_text_partial_row_in_all_languages() {
    let options = RenderOptions::new()
        .with_verse_order(false)
        .with_labels(false);
    let text = to_text(&sample_song(), &options).unwrap();
    assert_eq!(
        text,
        "Praise him / Lobt ihn\n\nHallelujah / Halleluja\n\nAmen"
    );
}
