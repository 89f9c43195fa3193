//! Integration tests for the chordsheet engine
//!
//! Tests the full pipeline from a song document to rendered and transposed
//! output, through the public API only.

use chordsheet::{
    all_keys, all_keys_with_minor, render_lyrics, render_song, render_transposed, segment, transpose_chord,
    transpose_lyrics, transpose_source, Accidentals, ChordSheetError, Key, LineKind, RenderedLine, SongFormat,
};

fn key(s: &str) -> Key {
    s.parse().unwrap()
}

const IMAGINE: &str = r#"---
title: Imagine
artist: John Lennon
key: C
---
[Verse 1]
C           F
Imagine there's no heaven
C           F
It's easy if you try

[Chorus]
F    G    C    E7
You may say I'm a dreamer
"#;

#[test]
fn test_render_document_in_original_key() {
    let render = render_song(IMAGINE, None).unwrap();
    assert_eq!(render.metadata.title.as_deref(), Some("Imagine"));
    assert_eq!(render.format, SongFormat::ChordsAbove);
    assert!(render.html.contains(r#"<div class="song-topic"><b>Verse 1</b></div>"#));
    assert!(render.html.contains(r#"<div class="chord-line" style="white-space: pre;">C           F"#));
    assert!(render
        .html
        .contains(r#"<div class="lyrics-line" style="white-space: pre;">Imagine there's no heaven</div>"#));
}

#[test]
fn test_render_document_in_other_key() {
    let render = render_song(IMAGINE, Some("D")).unwrap();
    assert!(render.html.contains("D           G"));
    assert!(render.html.contains("G    A    D    F#7"));
    assert!(!render.html.contains("C           F"));
}

#[test]
fn test_one_line_per_source_line_pair() {
    let render = render_song(IMAGINE, None).unwrap();
    let kinds: Vec<&str> = render
        .lines
        .iter()
        .map(|line| match line {
            RenderedLine::Heading { .. } => "heading",
            RenderedLine::Blank => "blank",
            RenderedLine::Lyric { .. } => "lyric",
            RenderedLine::Chords { .. } => "chords",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["heading", "chords", "chords", "blank", "heading", "chords", "blank"]
    );
}

#[test]
fn test_inline_song_renders_chord_rows() {
    let html = render_lyrics("[Refrão]\n[Am7]Praticam todo [F]dia", "C", "C").unwrap();
    let expected = [
        r#"<div class="song-topic"><b>Refrão</b></div>"#,
        r#"<div class="chord-line" style="white-space: pre;">Am7           F  </div>"#,
        r#"<div class="lyrics-line" style="white-space: pre;">Praticam todo dia</div>"#,
    ]
    .join("\n");
    assert_eq!(html, expected);
}

#[test]
fn test_mixed_layouts() {
    let lyrics = "G     D\nFirst line\n[Em]Second [C]line";
    let song = segment(lyrics);
    assert_eq!(song.format, SongFormat::Mixed);
    assert_eq!(song.source_line_count(), 3);

    let html = render_transposed(lyrics, key("G"), key("A"));
    assert!(html.contains(">A     E   </div>"));
    assert!(html.contains(">F#m    D   </div>"));
}

#[test]
fn test_arbitrary_text_never_fails() {
    let inputs = [
        "",
        "\n\n\n",
        "[",
        "]]][[[",
        "[]",
        "(((",
        "C/",
        "H G\nwords",
        "🎸 [C]ção [Dm]<script>",
        "\r\n\r\n",
        "[C][C][C][C]",
    ];
    for input in inputs {
        let song = segment(input);
        assert_eq!(song.source_line_count(), input.split('\n').count(), "{:?}", input);
        for target in all_keys_with_minor() {
            render_transposed(input, key("C"), target);
        }
    }
}

#[test]
fn test_html_is_escaped() {
    let html = render_lyrics("C\n<script>alert('x')</script>", "C", "C").unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
}

#[test]
fn test_unknown_keys_are_errors() {
    assert!(matches!(render_lyrics("C\nla", "C", "H"), Err(ChordSheetError::UnknownKey(_))));
    assert!(matches!(render_song(IMAGINE, Some("Cb#")), Err(ChordSheetError::UnknownKey(_))));
    assert!(matches!(transpose_source("C\nla", "", "C"), Err(ChordSheetError::UnknownKey(_))));
}

#[test]
fn test_transpose_source_round_trip() {
    let lyrics = "[Intro]\nC   G/B   Am7   F\nWhen I find myself\n[Dm]Mother [G7]Mary";
    for target in all_keys() {
        let moved = transpose_lyrics(lyrics, key("C"), target, Accidentals::Sharps);
        let back = transpose_lyrics(&moved, target, key("C"), Accidentals::Sharps);
        assert_eq!(back, lyrics, "via {}", target);
    }
}

#[test]
fn test_column_alignment_survives_every_key() {
    let song = segment("C   G/B   Am7   F\nWhen I find myself in times of trouble");
    let columns: Vec<usize> = song.lines[0].chords.iter().map(|c| c.column).collect();
    assert_eq!(columns, vec![0, 4, 10, 16]);

    for target in all_keys_with_minor() {
        let render = render_song(
            "---\nkey: C\n---\nC   G/B   Am7   F\nWhen I find myself in times of trouble",
            Some(target.to_string().as_str()),
        )
        .unwrap();
        match &render.lines[0] {
            RenderedLine::Chords { chords, columns: written, .. } => {
                assert_eq!(written, &columns);
                let row: Vec<char> = chords.chars().collect();
                for &column in &columns {
                    assert!(row[column].is_ascii_uppercase(), "{} in {}", chords, target);
                }
            }
            other => panic!("expected chord row, got {:?}", other),
        }
    }
}

#[test]
fn test_scenario_chords() {
    assert_eq!(transpose_chord("Bb/D", key("C"), key("D")), "C/E");
    assert_eq!(transpose_chord("Am7", key("A"), key("C")), "Cm7");
    assert_eq!(transpose_chord("F", key("A"), key("C")), "G#");
}

#[test]
fn test_heading_lines_are_not_chords() {
    let song = segment("[C]\n[Am]");
    assert!(song.lines.iter().all(|line| line.kind == LineKind::Heading));
    assert_eq!(song.chord_count(), 0);
}
