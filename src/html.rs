//! Layout-preserving renderer.
//!
//! Every output format goes through [`render_lines`], which builds one
//! [`RenderedLine`] per processed line. Chord rows are filled column by
//! column: each transposed chord is written at the column its ORIGINAL token
//! occupied, so chords never drift against the lyrics when their spelling
//! changes length.

use crate::ast::{LineKind, ProcessedLine, ProcessedSong};
use crate::pitch::{Accidentals, Key};
use crate::transpose::transpose_parsed;
use serde::Serialize;

/// One rendered display line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RenderedLine {
    Heading {
        name: String,
    },
    Blank,
    Lyric {
        text: String,
    },
    Chords {
        /// Chord row, as wide as the wider of the lyrics and the original chords
        chords: String,
        lyrics: String,
        /// Columns written in the chord row, left to right
        columns: Vec<usize>,
    },
}

/// Write `text` into `buffer` starting at `column`, padding with spaces and
/// growing the buffer as needed.
pub(crate) fn overlay(buffer: &mut Vec<char>, column: usize, text: &str) {
    for (i, c) in text.chars().enumerate() {
        let index = column + i;
        if index >= buffer.len() {
            buffer.resize(index, ' ');
            buffer.push(c);
        } else {
            buffer[index] = c;
        }
    }
}

fn chord_row(line: &ProcessedLine, from: Key, to: Key, accidentals: Accidentals) -> String {
    let width = line
        .chords
        .iter()
        .map(|chord| chord.end_column())
        .max()
        .unwrap_or(0)
        .max(line.width());

    let mut buffer = vec![' '; width];
    for position in &line.chords {
        let transposed = transpose_parsed(&position.chord, from, to, accidentals).to_string();
        overlay(&mut buffer, position.column, &transposed);
    }
    buffer.into_iter().collect()
}

/// Build the render tree of a song in the target key.
pub fn render_lines(song: &ProcessedSong, from: Key, to: Key, accidentals: Accidentals) -> Vec<RenderedLine> {
    song.lines
        .iter()
        .map(|line| match line.kind {
            LineKind::Blank => RenderedLine::Blank,
            LineKind::Heading => RenderedLine::Heading {
                name: line.heading_name().unwrap_or(line.text.trim()).to_string(),
            },
            _ if line.has_chords() => RenderedLine::Chords {
                chords: chord_row(line, from, to, accidentals),
                lyrics: line.text.clone(),
                columns: line.chords.iter().map(|chord| chord.column).collect(),
            },
            _ => RenderedLine::Lyric {
                text: line.text.clone(),
            },
        })
        .collect()
}

/// Render a song as HTML in the target key, spelled with sharps.
///
/// ```
/// use chordsheet::{html, parser, Key};
///
/// let song = parser::segment("[Refrão]\nC  G\nOlá");
/// let c: Key = "C".parse().unwrap();
/// let out = html::render(&song, c, c);
/// assert!(out.starts_with(r#"<div class="song-topic"><b>Refrão</b></div>"#));
/// assert!(out.contains(r#"<div class="chord-line" style="white-space: pre;">C  G</div>"#));
/// ```
pub fn render(song: &ProcessedSong, from: Key, to: Key) -> String {
    render_with(song, from, to, Accidentals::Sharps)
}

/// Render a song as HTML with a spelling preference.
pub fn render_with(song: &ProcessedSong, from: Key, to: Key, accidentals: Accidentals) -> String {
    to_html(&render_lines(song, from, to, accidentals))
}

/// HTML markup for a render tree; blocks are joined with newlines.
pub fn to_html(lines: &[RenderedLine]) -> String {
    let mut html = String::new();

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            html.push('\n');
        }
        match line {
            RenderedLine::Heading { name } => {
                html.push_str(&format!(r#"<div class="song-topic"><b>{}</b></div>"#, escape_html(name)));
            }
            RenderedLine::Blank => {
                html.push_str(r#"<div class="lyrics-line empty"></div>"#);
            }
            RenderedLine::Lyric { text } => {
                html.push_str(&lyric_div(text));
            }
            RenderedLine::Chords { chords, lyrics, .. } => {
                html.push_str(&format!(
                    r#"<div class="chord-line" style="white-space: pre;">{}</div>"#,
                    escape_html(chords)
                ));
                html.push('\n');
                html.push_str(&lyric_div(lyrics));
            }
        }
    }

    html
}

fn lyric_div(text: &str) -> String {
    format!(r#"<div class="lyrics-line" style="white-space: pre;">{}</div>"#, escape_html(text))
}

/// Render a song as monospaced plain text, chord rows above lyric rows.
pub fn render_text(song: &ProcessedSong, from: Key, to: Key, accidentals: Accidentals) -> String {
    to_text(&render_lines(song, from, to, accidentals))
}

pub fn to_text(lines: &[RenderedLine]) -> String {
    lines
        .iter()
        .map(|line| match line {
            RenderedLine::Heading { name } => format!("[{}]", name),
            RenderedLine::Blank => String::new(),
            RenderedLine::Lyric { text } => text.clone(),
            RenderedLine::Chords { chords, lyrics, .. } => format!("{}\n{}", chords.trim_end(), lyrics),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::segment;
    use crate::pitch::all_keys_with_minor;

    fn key(s: &str) -> Key {
        s.parse().unwrap()
    }

    fn chord_rows(lines: &[RenderedLine]) -> Vec<&str> {
        lines
            .iter()
            .filter_map(|line| match line {
                RenderedLine::Chords { chords, .. } => Some(chords.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_transposed_row_keeps_columns() {
        let song = segment("C           F\nImagine there's no heaven");
        let lines = render_lines(&song, key("C"), key("D"), Accidentals::Sharps);
        let row = chord_rows(&lines)[0];
        assert_eq!(row.trim_end(), "D           G");
        assert_eq!(row.chars().count(), "Imagine there's no heaven".len());
    }

    #[test]
    fn test_row_is_not_trimmed() {
        let song = segment("  C\nHello world");
        let lines = render_lines(&song, key("C"), key("C"), Accidentals::Sharps);
        assert_eq!(chord_rows(&lines)[0], "  C        ");
    }

    #[test]
    fn test_longer_chord_overwrites_and_grows() {
        // In F the second chord becomes "A#" and runs past the lyrics.
        let song = segment("C F\nab");
        let lines = render_lines(&song, key("C"), key("D"), Accidentals::Sharps);
        assert_eq!(chord_rows(&lines)[0], "D G");

        let song = segment("C F\nab");
        let lines = render_lines(&song, key("C"), key("F"), Accidentals::Sharps);
        assert_eq!(chord_rows(&lines)[0], "F A#");
    }

    #[test]
    fn test_collision_later_chord_wins() {
        let song = segment("E G\nxyz");
        let lines = render_lines(&song, key("C"), key("D"), Accidentals::Sharps);
        assert_eq!(chord_rows(&lines)[0], "F#A");
    }

    #[test]
    fn test_inline_rows() {
        let song = segment("[Am7]Praticam todo [F]dia");
        let lines = render_lines(&song, key("C"), key("C"), Accidentals::Sharps);
        assert_eq!(
            lines[0],
            RenderedLine::Chords {
                chords: "Am7           F  ".to_string(),
                lyrics: "Praticam todo dia".to_string(),
                columns: vec![0, 14],
            }
        );
    }

    #[test]
    fn test_columns_preserved_for_every_key() {
        let raw = "C   G/B  Am7   F\nWhen I find myself in times\n[Dm]Let it [G7]be";
        let song = segment(raw);
        for target in all_keys_with_minor() {
            let lines = render_lines(&song, key("C"), target, Accidentals::Sharps);
            for (line, processed) in lines.iter().zip(&song.lines) {
                if let RenderedLine::Chords { chords, columns, .. } = line {
                    let expected: Vec<usize> = processed.chords.iter().map(|c| c.column).collect();
                    assert_eq!(columns, &expected);
                    let row: Vec<char> = chords.chars().collect();
                    for &column in columns {
                        assert_ne!(row[column], ' ', "column {} in key {}", column, target);
                    }
                }
            }
        }
    }

    #[test]
    fn test_html_markup() {
        let song = segment("[Intro]\n\nC  G\nOi <b>\nplain & simple");
        let html = render(&song, key("C"), key("C"));
        let expected = [
            r#"<div class="song-topic"><b>Intro</b></div>"#,
            r#"<div class="lyrics-line empty"></div>"#,
            r#"<div class="chord-line" style="white-space: pre;">C  G  </div>"#,
            r#"<div class="lyrics-line" style="white-space: pre;">Oi &lt;b&gt;</div>"#,
            r#"<div class="lyrics-line" style="white-space: pre;">plain &amp; simple</div>"#,
        ]
        .join("\n");
        assert_eq!(html, expected);
    }

    #[test]
    fn test_flat_spelling() {
        let song = segment("G  C\nla la");
        let html = render_with(&song, key("C"), key("F"), Accidentals::Flats);
        assert!(html.contains(">C  F </div>"));
        let html = render_with(&song, key("C"), key("Eb"), Accidentals::Flats);
        assert!(html.contains(">Bb Eb</div>"));
    }

    #[test]
    fn test_render_text() {
        let song = segment("[Verse]\nC     G\nHello world");
        let text = render_text(&song, key("C"), key("G"), Accidentals::Sharps);
        assert_eq!(text, "[Verse]\nG     D\nHello world");
    }

    #[test]
    fn test_render_tree_json() {
        let song = segment("[V]\n\nplain");
        let lines = render_lines(&song, key("C"), key("C"), Accidentals::Sharps);
        let json = serde_json::to_string(&lines).unwrap();
        assert_eq!(
            json,
            r#"[{"type":"heading","name":"V"},{"type":"blank"},{"type":"lyric","text":"plain"}]"#
        );
    }

    #[test]
    fn test_overlay_pads_gaps() {
        let mut buffer = vec!['a'];
        overlay(&mut buffer, 3, "bc");
        assert_eq!(buffer.iter().collect::<String>(), "a  bc");
    }
}
