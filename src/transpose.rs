//! Chord transposition between keys.
//!
//! A chord root is located in the source key's progression and replaced by the
//! pitch at the same position of the target key's progression. Slash basses
//! move the same way. Quality and extension are never touched, so `m7` stays
//! `m7` whatever the keys are.

use crate::ast::{ChordPosition, LineKind};
use crate::chord::{parse_chord, Chord};
use crate::html::overlay;
use crate::lexer::split_lines;
use crate::parser::{segment, INLINE_CHORD};
use crate::pitch::{Accidentals, Key, PitchClass};

/// Move a pitch class from one key to another by progression position.
pub fn transpose_pitch(pitch: PitchClass, from: Key, to: Key) -> PitchClass {
    to.pitch_at(from.degree_of(pitch))
}

/// Transpose an already parsed chord.
pub fn transpose_parsed(chord: &Chord, from: Key, to: Key, accidentals: Accidentals) -> Chord {
    let root = transpose_pitch(chord.root_pitch(), from, to);
    let bass = chord.bass_pitch().map(|b| transpose_pitch(b, from, to));
    chord.with_pitches(root, bass, accidentals)
}

/// Transpose a chord symbol, spelling the result with sharps.
///
/// Text that is not a chord comes back unchanged.
///
/// # Example
/// ```
/// use chordsheet::{transpose_chord, Key};
///
/// let c: Key = "C".parse().unwrap();
/// let d: Key = "D".parse().unwrap();
/// assert_eq!(transpose_chord("Bb/D", c, d), "C/E");
/// assert_eq!(transpose_chord("Am7", c, d), "Bm7");
/// assert_eq!(transpose_chord("Intro", c, d), "Intro");
/// ```
pub fn transpose_chord(chord: &str, from: Key, to: Key) -> String {
    transpose_chord_with(chord, from, to, Accidentals::Sharps)
}

/// Transpose a chord symbol with a spelling preference.
pub fn transpose_chord_with(chord: &str, from: Key, to: Key, accidentals: Accidentals) -> String {
    match parse_chord(chord) {
        Some(parsed) => transpose_parsed(&parsed, from, to, accidentals).to_string(),
        None => {
            log::debug!("Leaving unrecognized chord '{}' untouched", chord);
            chord.to_string()
        }
    }
}

/// Rewrite raw lyrics so every chord is in the target key.
///
/// Chord rows keep each chord at its original column unless a longer chord
/// before it would run into it; `[Chord]` spans are rewritten in place, also
/// on the lyric row under a chord row. Everything else is copied verbatim.
pub fn transpose_lyrics(raw: &str, from: Key, to: Key, accidentals: Accidentals) -> String {
    let source_lines = split_lines(raw);
    let song = segment(raw);
    let mut output: Vec<String> = source_lines.iter().map(|line| line.to_string()).collect();

    for line in &song.lines {
        let source = source_lines[line.source_line];
        match line.kind {
            LineKind::ChordsAbove => {
                output[line.source_line] = rewrite_chord_row(source, &line.chords, from, to, accidentals);
                let lyric_line = line.source_line + 1;
                output[lyric_line] = rewrite_inline(source_lines[lyric_line], from, to, accidentals);
            }
            LineKind::Inline => {
                output[line.source_line] = rewrite_inline(source, from, to, accidentals);
            }
            _ => {}
        }
    }

    output.join("\n")
}

/// Blank out each original token, then write its transposed text at the same
/// column. A chord that would touch the one before it is pushed right so the
/// row still splits into the same chords.
fn rewrite_chord_row(row: &str, chords: &[ChordPosition], from: Key, to: Key, accidentals: Accidentals) -> String {
    let mut buffer: Vec<char> = row.chars().collect();
    for position in chords {
        for cell in buffer.iter_mut().take(position.end_column()).skip(position.column) {
            *cell = ' ';
        }
    }
    let mut min_column = 0;
    for position in chords {
        let transposed = transpose_parsed(&position.chord, from, to, accidentals).to_string();
        let column = position.column.max(min_column);
        overlay(&mut buffer, column, &transposed);
        min_column = column + transposed.chars().count() + 1;
    }
    buffer.into_iter().collect::<String>().trim_end().to_string()
}

fn rewrite_inline(line: &str, from: Key, to: Key, accidentals: Accidentals) -> String {
    INLINE_CHORD
        .replace_all(line, |caps: &regex::Captures| match parse_chord(&caps[1]) {
            Some(chord) => format!("[{}]", transpose_parsed(&chord, from, to, accidentals)),
            None => caps[0].to_string(),
        })
        .into_owned()
}
