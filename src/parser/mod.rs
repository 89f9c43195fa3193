//! Line classification, chord extraction and document parsing.
//!
//! [`segment`] walks the raw lyrics once, pairing each chord row with the
//! lyric row under it and pulling `[Chord]` spans out of inline lines.
//! [`parse_song`] splits a document into YAML frontmatter and lyrics.

use crate::ast::{ChordPosition, LineKind, Metadata, ProcessedLine, ProcessedSong, RawMetadata, Song, SongFormat};
use crate::chord::{is_valid_chord, parse_chord};
use crate::error::ChordSheetError;
use crate::lexer::{split_lines, text_width, tokenize_line};
use crate::pitch::{Accidentals, Key};
use once_cell::sync::Lazy;
use regex::Regex;

static SECTION_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[[^\]]+\]$").expect("section heading pattern"));

/// A bracketed span; group 1 is the text between the brackets.
pub(crate) static INLINE_CHORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]").expect("inline chord pattern"));

/// Whether the trimmed line is a single `[Name]` section title.
pub fn is_section_heading(line: &str) -> bool {
    SECTION_HEADING.is_match(line.trim())
}

/// Whether every token of the line is a chord symbol.
///
/// Empty lines and section headings are never chord lines.
///
/// ```
/// use chordsheet::parser::is_chord_line;
///
/// assert!(is_chord_line("  C     G/B   Am7"));
/// assert!(is_chord_line("(Am) G"));
/// assert!(!is_chord_line("Am I dreaming"));
/// assert!(!is_chord_line("[Refrão]"));
/// ```
pub fn is_chord_line(line: &str) -> bool {
    if line.trim().is_empty() || is_section_heading(line) {
        return false;
    }
    let tokens = tokenize_line(line);
    !tokens.is_empty() && tokens.iter().all(|token| is_valid_chord(token.text))
}

/// Chords of a chord row, anchored at the columns where they were written.
pub fn extract_chord_row(line: &str, line_index: usize) -> Vec<ChordPosition> {
    tokenize_line(line)
        .into_iter()
        .filter_map(|token| {
            let chord = parse_chord(token.text)?;
            Some(ChordPosition {
                text: token.text.to_string(),
                chord,
                column: token.column,
                line: line_index,
            })
        })
        .collect()
}

/// Pull `[Chord]` spans out of a lyric line.
///
/// Returns the lyric text with those spans removed and the chords anchored
/// at the column where each span started in that text. Bracketed text that
/// is not a chord (`[x2]`) stays in the lyrics. Returns `None` when the line
/// has no chord spans.
pub fn extract_inline_chords(line: &str, line_index: usize) -> Option<(String, Vec<ChordPosition>)> {
    let mut text = String::with_capacity(line.len());
    let mut chords: Vec<ChordPosition> = Vec::new();
    let mut last_end = 0;

    for caps in INLINE_CHORD.captures_iter(line) {
        let (Some(span), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Some(chord) = parse_chord(inner.as_str()) else {
            continue;
        };

        text.push_str(&line[last_end..span.start()]);
        last_end = span.end();

        // Chords written back to back would overlap in the chord row.
        let min_column = chords.last().map_or(0, |prev| prev.end_column() + 1);
        let column = text_width(&text).max(min_column);

        chords.push(ChordPosition {
            text: inner.as_str().trim().to_string(),
            chord,
            column,
            line: line_index,
        });
    }

    if chords.is_empty() {
        return None;
    }
    text.push_str(&line[last_end..]);
    Some((text, chords))
}

/// Segment raw lyrics into display lines.
///
/// A chord line is paired with the following line when that line exists and
/// is not itself a chord line; the pair becomes one `ChordsAbove` line. A
/// chord line with nothing to pair with stays plain text.
///
/// ```
/// use chordsheet::ast::{LineKind, SongFormat};
/// use chordsheet::parser::segment;
///
/// let song = segment("C           F\nImagine there's no heaven");
/// assert_eq!(song.lines.len(), 1);
/// assert_eq!(song.lines[0].kind, LineKind::ChordsAbove);
/// assert_eq!(song.lines[0].chords[1].column, 12);
/// assert_eq!(song.format, SongFormat::ChordsAbove);
/// ```
pub fn segment(raw: &str) -> ProcessedSong {
    let source = split_lines(raw);
    let mut lines: Vec<ProcessedLine> = Vec::with_capacity(source.len());
    let mut has_chords_above = false;
    let mut has_inline = false;
    let mut i = 0;

    while i < source.len() {
        let current = source[i];
        let line_index = lines.len();

        let paired = is_chord_line(current) && source.get(i + 1).is_some_and(|next| !is_chord_line(next));

        let line = if paired {
            has_chords_above = true;
            ProcessedLine {
                text: source[i + 1].to_string(),
                kind: LineKind::ChordsAbove,
                chords: extract_chord_row(current, line_index),
                source_line: i,
                source_span: 2,
            }
        } else if current.trim().is_empty() {
            plain_line(current, LineKind::Blank, i)
        } else if is_section_heading(current) {
            plain_line(current, LineKind::Heading, i)
        } else if let Some((text, chords)) = extract_inline_chords(current, line_index) {
            has_inline = true;
            ProcessedLine {
                text,
                kind: LineKind::Inline,
                chords,
                source_line: i,
                source_span: 1,
            }
        } else {
            plain_line(current, LineKind::Lyric, i)
        };

        log::trace!("line {}: {:?} spanning {}", i, line.kind, line.source_span);
        i += line.source_span;
        lines.push(line);
    }

    let format = match (has_chords_above, has_inline) {
        (true, true) => SongFormat::Mixed,
        (false, true) => SongFormat::BracketInline,
        _ => SongFormat::ChordsAbove,
    };

    let song = ProcessedSong { lines, format };
    log::debug!(
        "Segmented {} source lines into {} lines with {} chords ({})",
        source.len(),
        song.lines.len(),
        song.chord_count(),
        song.format
    );
    song
}

fn plain_line(text: &str, kind: LineKind, source_line: usize) -> ProcessedLine {
    ProcessedLine {
        text: text.to_string(),
        kind,
        chords: Vec::new(),
        source_line,
        source_span: 1,
    }
}

/// Extract the metadata block from a document.
///
/// The block sits between two `---` lines at the top or the bottom of the
/// file; only blank lines may come before a leading block or after a
/// trailing one. `---` lines anywhere else are lyrics. Returns
/// (metadata_content, remaining_lyrics).
pub fn extract_metadata(source: &str) -> (Option<String>, String) {
    let lines = split_lines(source);

    let leading = lines.iter().position(|line| !line.trim().is_empty()).and_then(|start| {
        let end = start + 1 + lines[start + 1..].iter().position(|line| is_marker(line))?;
        is_marker(lines[start]).then_some((start, end))
    });
    let trailing = || {
        let end = lines.iter().rposition(|line| !line.trim().is_empty())?;
        let start = lines[..end].iter().rposition(|line| is_marker(line))?;
        is_marker(lines[end]).then_some((start, end))
    };

    match leading.or_else(trailing) {
        Some((start, end)) => {
            let content = lines[start + 1..end].join("\n");
            let remaining: Vec<&str> = lines[..start]
                .iter()
                .chain(lines[end + 1..].iter())
                .copied()
                .collect();
            (Some(content), remaining.join("\n"))
        }
        None => (None, source.to_string()),
    }
}

fn is_marker(line: &str) -> bool {
    line.trim() == "---"
}

/// Parse the YAML content of a metadata block.
pub fn parse_metadata(content: &str) -> Result<Metadata, ChordSheetError> {
    let raw: RawMetadata = if content.trim().is_empty() {
        RawMetadata::default()
    } else {
        serde_yaml::from_str(content).map_err(|e| ChordSheetError::MetadataError(e.to_string()))?
    };

    let key = raw.key.as_deref().map(parse_metadata_key).transpose()?;
    let display_key = raw.display_key.as_deref().map(parse_metadata_key).transpose()?;
    let accidentals = match raw.accidentals.as_deref() {
        Some(value) => value.parse::<Accidentals>()?,
        None => Accidentals::default(),
    };

    Ok(Metadata {
        title: raw.title,
        artist: raw.artist,
        key,
        display_key,
        accidentals,
    })
}

fn parse_metadata_key(value: &str) -> Result<Key, ChordSheetError> {
    value
        .parse()
        .map_err(|_| ChordSheetError::MetadataError(format!("Invalid key: {}", value)))
}

/// Parse a song document: optional frontmatter plus lyrics.
///
/// ```
/// use chordsheet::parser::parse_song;
///
/// let song = parse_song("---\ntitle: Imagine\nkey: C\n---\nC  F\nImagine").unwrap();
/// assert_eq!(song.metadata.title.as_deref(), Some("Imagine"));
/// assert_eq!(song.original_key().to_string(), "C");
/// assert_eq!(song.lyrics, "C  F\nImagine");
/// ```
pub fn parse_song(source: &str) -> Result<Song, ChordSheetError> {
    let (metadata_content, lyrics) = extract_metadata(source);

    let metadata = match metadata_content {
        Some(content) => parse_metadata(&content)?,
        None => Metadata::default(),
    };

    Ok(Song { metadata, lyrics })
}
