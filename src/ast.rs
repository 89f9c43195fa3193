//! # Song Model Types
//!
//! Value types produced by segmentation and consumed by the renderer.
//!
//! ## Type Hierarchy
//! ```text
//! Song
//!   ├── Metadata (title, artist, key, display key, accidentals)
//!   └── lyrics: String (raw text, the only input to segmentation)
//!
//! ProcessedSong
//!   ├── format: SongFormat (chords-above | bracket-inline | mixed)
//!   └── Vec<ProcessedLine>
//!         ├── text: String (lyric text, verbatim)
//!         ├── kind: LineKind (Blank | Heading | Lyric | ChordsAbove | Inline)
//!         ├── source_line / source_span
//!         └── Vec<ChordPosition>
//!               ├── text: String (token as written)
//!               ├── chord: Chord
//!               ├── column (characters, in the chord row)
//!               └── line (index of the ProcessedLine)
//! ```
//!
//! ## Key Concepts
//!
//! ### Immutability
//! A `ProcessedSong` is computed once per lyrics text and never mutated.
//! Rendering in another key builds new output from it, so the layout of the
//! original key can always be reproduced.
//!
//! ### Source spans
//! A chords-above line consumes two source lines (chord row + lyric row);
//! every other line consumes one. The spans of a song always add up to the
//! number of lines in the input.

use crate::chord::Chord;
use crate::lexer::text_width;
use crate::pitch::{Accidentals, Key};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source layout of a song's chords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SongFormat {
    /// Chord rows above lyric rows (also used for songs without chords)
    #[default]
    ChordsAbove,
    /// `[C]word` annotations inside lyric text
    BracketInline,
    /// Both layouts occur in the same song
    Mixed,
}

impl SongFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SongFormat::ChordsAbove => "chords-above",
            SongFormat::BracketInline => "bracket-inline",
            SongFormat::Mixed => "mixed",
        }
    }
}

impl fmt::Display for SongFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a processed line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineKind {
    /// Empty line
    Blank,
    /// `[Chorus]` style section title
    Heading,
    /// Plain text without chords
    Lyric,
    /// Lyric row annotated by the chord row above it
    ChordsAbove,
    /// Lyric row with its `[Chord]` spans extracted
    Inline,
}

/// A chord found in the source, anchored to a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordPosition {
    /// Token exactly as written in the source
    pub text: String,
    #[serde(skip)]
    pub chord: Chord,
    /// Character column in the chord row
    pub column: usize,
    /// Index of the processed line this chord annotates
    pub line: usize,
}

impl ChordPosition {
    /// Width of the original token in columns
    pub fn width(&self) -> usize {
        text_width(&self.text)
    }

    /// First column after the original token
    pub fn end_column(&self) -> usize {
        self.column + self.width()
    }
}

/// One displayed line of a song.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedLine {
    pub text: String,
    pub kind: LineKind,
    /// Left to right, columns strictly increasing
    pub chords: Vec<ChordPosition>,
    /// Zero-based index of the first source line
    pub source_line: usize,
    /// Number of source lines consumed (1 or 2)
    pub source_span: usize,
}

impl ProcessedLine {
    pub fn has_chords(&self) -> bool {
        !self.chords.is_empty()
    }

    /// Section name with the brackets stripped, for heading lines.
    pub fn heading_name(&self) -> Option<&str> {
        if self.kind != LineKind::Heading {
            return None;
        }
        let trimmed = self.text.trim();
        trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
    }

    /// Width of the lyric text in columns
    pub fn width(&self) -> usize {
        text_width(&self.text)
    }
}

/// Segmented song: display lines plus detected format.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProcessedSong {
    pub lines: Vec<ProcessedLine>,
    pub format: SongFormat,
}

impl ProcessedSong {
    /// Number of raw input lines this song was built from
    pub fn source_line_count(&self) -> usize {
        self.lines.iter().map(|line| line.source_span).sum()
    }

    /// All chord positions in reading order
    pub fn chords(&self) -> impl Iterator<Item = &ChordPosition> {
        self.lines.iter().flat_map(|line| line.chords.iter())
    }

    pub fn chord_count(&self) -> usize {
        self.chords().count()
    }
}

/// Document metadata from the YAML frontmatter
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    /// Key the lyrics were written in
    pub key: Option<Key>,
    /// Key to show by default; falls back to `key`
    pub display_key: Option<Key>,
    pub accidentals: Accidentals,
}

/// Raw metadata for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RawMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub key: Option<String>,
    pub display_key: Option<String>,
    pub accidentals: Option<String>,
}

/// A song record: metadata plus raw lyrics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub metadata: Metadata,
    pub lyrics: String,
}

impl Song {
    /// Key the lyrics were written in; C when the document does not say.
    pub fn original_key(&self) -> Key {
        self.metadata.key.unwrap_or(Key::major(crate::pitch::PitchClass::C))
    }

    /// Key to display when the viewer has not picked one.
    pub fn default_display_key(&self) -> Key {
        self.metadata.display_key.unwrap_or_else(|| self.original_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::parse_chord;

    fn position(text: &str, column: usize) -> ChordPosition {
        ChordPosition {
            text: text.to_string(),
            chord: parse_chord(text).unwrap(),
            column,
            line: 0,
        }
    }

    #[test]
    fn test_chord_position_width() {
        let p = position("C#m7", 4);
        assert_eq!(p.width(), 4);
        assert_eq!(p.end_column(), 8);
    }

    #[test]
    fn test_heading_name() {
        let line = ProcessedLine {
            text: "  [Refrão] ".to_string(),
            kind: LineKind::Heading,
            chords: vec![],
            source_line: 0,
            source_span: 1,
        };
        assert_eq!(line.heading_name(), Some("Refrão"));

        let lyric = ProcessedLine { kind: LineKind::Lyric, ..line };
        assert_eq!(lyric.heading_name(), None);
    }

    #[test]
    fn test_song_format_names() {
        assert_eq!(SongFormat::ChordsAbove.to_string(), "chords-above");
        assert_eq!(SongFormat::BracketInline.to_string(), "bracket-inline");
        assert_eq!(serde_json::to_string(&SongFormat::Mixed).unwrap(), "\"mixed\"");
    }

    #[test]
    fn test_song_keys_default() {
        let song = Song::default();
        assert_eq!(song.original_key().to_string(), "C");
        assert_eq!(song.default_display_key().to_string(), "C");
    }
}
