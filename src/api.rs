//! # Public API
//!
//! String-keyed entry points for hosts that deal in plain text: the CLI, the
//! WebAssembly bindings and anything else that receives key names from a user.
//!
//! ## Functions
//!
//! - [`render_lyrics()`] - raw lyrics in one key to HTML in another
//! - [`render_song()`] - full document (frontmatter + lyrics) to a render
//! - [`transpose_source()`] - rewrite the lyrics source in another key
//! - [`transpose_symbol()`] - transpose a single chord symbol
//!
//! ## Typical Usage
//!
//! ```rust
//! use chordsheet::render_song;
//!
//! let document = r#"---
//! title: Imagine
//! key: C
//! ---
//! C           F
//! Imagine there's no heaven
//! "#;
//!
//! let render = render_song(document, Some("D"))?;
//! assert_eq!(render.display_key.to_string(), "D");
//! assert!(render.html.contains("D           G"));
//! # Ok::<(), chordsheet::ChordSheetError>(())
//! ```

use crate::ast::{Metadata, SongFormat};
use crate::html::{render_lines, to_html, RenderedLine};
use crate::parser::{parse_song, segment};
use crate::pitch::{Accidentals, Key};
use crate::transpose::{transpose_chord_with, transpose_lyrics};
use crate::ChordSheetError;
use serde::Serialize;

/// A song document rendered in a chosen key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongRender {
    pub metadata: Metadata,
    pub original_key: Key,
    pub display_key: Key,
    pub format: SongFormat,
    pub lines: Vec<RenderedLine>,
    pub html: String,
}

fn parse_key(name: &str) -> Result<Key, ChordSheetError> {
    name.parse()
}

/// Render raw lyrics written in `from` as HTML in `to`.
///
/// # Example
/// ```rust
/// use chordsheet::render_lyrics;
///
/// let html = render_lyrics("[Am7]Praticam todo [F]dia", "A", "C")?;
/// assert!(html.contains("Cm7           G#"));
/// # Ok::<(), chordsheet::ChordSheetError>(())
/// ```
///
/// # Errors
/// Returns [`ChordSheetError::UnknownKey`] if either key name is not one of
/// the 24 supported keys. The lyrics themselves never cause an error.
pub fn render_lyrics(lyrics: &str, from: &str, to: &str) -> Result<String, ChordSheetError> {
    render_lyrics_with(lyrics, from, to, Accidentals::Sharps)
}

/// Like [`render_lyrics`], with a spelling preference.
pub fn render_lyrics_with(
    lyrics: &str,
    from: &str,
    to: &str,
    accidentals: Accidentals,
) -> Result<String, ChordSheetError> {
    let from = parse_key(from)?;
    let to = parse_key(to)?;
    let song = segment(lyrics);
    Ok(to_html(&render_lines(&song, from, to, accidentals)))
}

/// Parse a song document and render it.
///
/// `display_key` overrides the document's `display-key`; without either the
/// song is shown in its original key.
///
/// # Errors
/// Returns [`ChordSheetError::MetadataError`] for broken frontmatter and
/// [`ChordSheetError::UnknownKey`] for an unknown `display_key`.
pub fn render_song(document: &str, display_key: Option<&str>) -> Result<SongRender, ChordSheetError> {
    let song = parse_song(document)?;
    let original_key = song.original_key();
    let display_key = match display_key {
        Some(name) => parse_key(name)?,
        None => song.default_display_key(),
    };

    let processed = segment(&song.lyrics);
    let lines = render_lines(&processed, original_key, display_key, song.metadata.accidentals);
    let html = to_html(&lines);

    Ok(SongRender {
        metadata: song.metadata,
        original_key,
        display_key,
        format: processed.format,
        lines,
        html,
    })
}

/// Rewrite raw lyrics so their chords are in another key.
///
/// # Example
/// ```rust
/// use chordsheet::transpose_source;
///
/// let moved = transpose_source("C           F\nImagine there's no heaven", "C", "D")?;
/// assert_eq!(moved, "D           G\nImagine there's no heaven");
/// # Ok::<(), chordsheet::ChordSheetError>(())
/// ```
pub fn transpose_source(lyrics: &str, from: &str, to: &str) -> Result<String, ChordSheetError> {
    Ok(transpose_lyrics(lyrics, parse_key(from)?, parse_key(to)?, Accidentals::Sharps))
}

/// Transpose one chord symbol between named keys.
pub fn transpose_symbol(chord: &str, from: &str, to: &str, accidentals: Accidentals) -> Result<String, ChordSheetError> {
    Ok(transpose_chord_with(chord, parse_key(from)?, parse_key(to)?, accidentals))
}
