//! Chord symbol grammar
//!
//! Decides which strings are chord tokens and splits them into root, quality,
//! extension and optional slash bass.
//!
//! # Grammar
//! ```text
//! chord     := root quality? extension? ("/" bass)?
//! root      := [A-G] [#b]?
//! quality   := maj | min | m | M | sus2 | sus4 | sus | dim | aug | + | ° | ø | add
//! extension := 1[0-3] | [2-9] | add[2-9] | add1[0-3]
//! bass      := [A-G] [#b]?
//! ```
//!
//! The whole token must be consumed. When several readings of a prefix are
//! possible the alternatives are tried in the order above and the first
//! reading that consumes the whole token wins, the way a backtracking regex
//! engine would resolve them.
//!
//! Root letters are uppercase only: `"A"` is a chord, `"a"` is a word.

use crate::error::ChordSheetError;
use crate::pitch::{Accidental, Accidentals, Note, NoteName, PitchClass};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Chord quality keyword, kept in the spelling the author used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    Maj,            // maj
    Min,            // min
    Minor,          // m
    Major,          // M
    Sus2,           // sus2
    Sus4,           // sus4
    Sus,            // sus
    Dim,            // dim
    Aug,            // aug
    Plus,           // +
    Diminished,     // °
    HalfDiminished, // ø
    Add,            // add
}

impl Quality {
    /// Alternatives in match order
    pub const ALL: [Quality; 13] = [
        Quality::Maj,
        Quality::Min,
        Quality::Minor,
        Quality::Major,
        Quality::Sus2,
        Quality::Sus4,
        Quality::Sus,
        Quality::Dim,
        Quality::Aug,
        Quality::Plus,
        Quality::Diminished,
        Quality::HalfDiminished,
        Quality::Add,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Maj => "maj",
            Quality::Min => "min",
            Quality::Minor => "m",
            Quality::Major => "M",
            Quality::Sus2 => "sus2",
            Quality::Sus4 => "sus4",
            Quality::Sus => "sus",
            Quality::Dim => "dim",
            Quality::Aug => "aug",
            Quality::Plus => "+",
            Quality::Diminished => "°",
            Quality::HalfDiminished => "ø",
            Quality::Add => "add",
        }
    }
}

/// Numeric tension (`7`, `13`) or added tone (`add9`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    Tension(u8),
    Add(u8),
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extension::Tension(n) => write!(f, "{}", n),
            Extension::Add(n) => write!(f, "add{}", n),
        }
    }
}

/// A parsed chord symbol.
///
/// `Display` re-serializes the chord; the result is always accepted by
/// [`parse_chord`] again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Chord {
    pub root: Note,
    pub quality: Option<Quality>,
    pub extension: Option<Extension>,
    pub bass: Option<Note>,
}

impl Chord {
    pub fn root_pitch(&self) -> PitchClass {
        self.root.pitch_class()
    }

    pub fn bass_pitch(&self) -> Option<PitchClass> {
        self.bass.map(Note::pitch_class)
    }

    /// Quality and extension exactly as written (`"m7"`, `"sus4"`, `""`)
    pub fn suffix(&self) -> String {
        let mut suffix = String::new();
        if let Some(quality) = self.quality {
            suffix.push_str(quality.as_str());
        }
        if let Some(extension) = self.extension {
            suffix.push_str(&extension.to_string());
        }
        suffix
    }

    /// Same chord with root and bass replaced; quality and extension untouched.
    pub fn with_pitches(&self, root: PitchClass, bass: Option<PitchClass>, accidentals: Accidentals) -> Self {
        Self {
            root: root.to_note(accidentals),
            quality: self.quality,
            extension: self.extension,
            bass: bass.map(|b| b.to_note(accidentals)),
        }
    }

    /// Respell root and bass with canonical sharps.
    pub fn normalized(&self) -> Self {
        self.with_pitches(self.root_pitch(), self.bass_pitch(), Accidentals::Sharps)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.suffix())?;
        if let Some(bass) = self.bass {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

impl From<Chord> for String {
    fn from(chord: Chord) -> Self {
        chord.to_string()
    }
}

impl FromStr for Chord {
    type Err = ChordSheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_chord(s).ok_or_else(|| ChordSheetError::InvalidChord(s.to_string()))
    }
}

/// Parse a chord token, or `None` if the token is not entirely a chord.
///
/// # Examples
/// ```
/// use chordsheet::chord::{parse_chord, Quality};
///
/// let am = parse_chord("Am").unwrap();
/// assert_eq!(am.root.to_string(), "A");
/// assert_eq!(am.quality, Some(Quality::Minor));
///
/// assert!(parse_chord("Bb/D").is_some());
/// assert!(parse_chord("Amor").is_none());
/// assert!(parse_chord("a").is_none());
/// ```
pub fn parse_chord(token: &str) -> Option<Chord> {
    let token = token.trim();
    let (root, rest) = parse_note_prefix(token)?;

    for (quality, after_quality) in quality_candidates(rest) {
        for (extension, after_extension) in extension_candidates(after_quality) {
            if let Some(bass) = parse_bass(after_extension) {
                return Some(Chord {
                    root,
                    quality,
                    extension,
                    bass,
                });
            }
        }
    }
    None
}

/// Whether `token` is a chord symbol.
pub fn is_valid_chord(token: &str) -> bool {
    parse_chord(token).is_some()
}

/// Letter plus optional accidental at the start of `s`.
fn parse_note_prefix(s: &str) -> Option<(Note, &str)> {
    let mut chars = s.chars();
    let name = NoteName::from_char(chars.next()?)?;
    match chars.next().and_then(Accidental::from_char) {
        Some(accidental) => Some((Note::new(name, accidental), &s[2..])),
        None => Some((Note::new(name, Accidental::Natural), &s[1..])),
    }
}

fn quality_candidates(s: &str) -> Vec<(Option<Quality>, &str)> {
    let mut candidates: Vec<(Option<Quality>, &str)> = Quality::ALL
        .iter()
        .filter_map(|&q| s.strip_prefix(q.as_str()).map(|rest| (Some(q), rest)))
        .collect();
    candidates.push((None, s));
    candidates
}

fn extension_candidates(s: &str) -> Vec<(Option<Extension>, &str)> {
    let mut candidates = Vec::new();
    if let Some((n, rest)) = parse_tension(s) {
        candidates.push((Some(Extension::Tension(n)), rest));
    }
    if let Some((n, rest)) = s.strip_prefix("add").and_then(parse_tension) {
        candidates.push((Some(Extension::Add(n)), rest));
    }
    candidates.push((None, s));
    candidates
}

/// `1[0-3]` or `[2-9]`
fn parse_tension(s: &str) -> Option<(u8, &str)> {
    match s.as_bytes() {
        [b'1', d @ b'0'..=b'3', ..] => Some((10 + (*d - b'0'), &s[2..])),
        [d @ b'2'..=b'9', ..] => Some((*d - b'0', &s[1..])),
        _ => None,
    }
}

/// Remainder must be empty or exactly `/` + note.
fn parse_bass(s: &str) -> Option<Option<Note>> {
    if s.is_empty() {
        return Some(None);
    }
    let note = Note::parse(s.strip_prefix('/')?)?;
    Some(Some(note))
}
