//! # Pitch and Key Model
//!
//! The 12-tone chromatic circle, note spellings, enharmonic normalization and
//! musical keys.
//!
//! ## Key Concepts
//!
//! ### Pitch classes
//! Twelve classes, canonically spelled with sharps:
//! `C C# D D# E F F# G G# A A# B`. Index arithmetic is always `mod 12`, so the
//! successor of `B` is `C`.
//!
//! ### Note spellings
//! A [`Note`] is what the author actually typed (`Bb`, `C#`, `E`). Its pitch
//! class is computed by semitone arithmetic, so `Cb` is `B` and `E#` is `F`.
//!
//! ### Keys and progressions
//! A [`Key`] is a tonic plus a major/minor flag. Its progression is the
//! chromatic sequence rotated to start at the tonic. Minor keys rotate from
//! their own tonic exactly like major keys; transposition works on semitone
//! offsets, not on scale degrees.
//!
//! ## Example
//! ```rust
//! use chordsheet::{Key, PitchClass};
//!
//! let key: Key = "Bb".parse().unwrap();
//! assert_eq!(key.tonic, PitchClass::As);
//! assert_eq!(key.progression()[2], PitchClass::C);
//! assert_eq!(key.to_string(), "A#");
//! ```

use crate::error::ChordSheetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Flat spellings folded to their sharp equivalent by [`normalize_note_name`].
pub const ENHARMONIC_ALIASES: [(&str, &str); 5] = [
    ("Db", "C#"),
    ("Eb", "D#"),
    ("Gb", "F#"),
    ("Ab", "G#"),
    ("Bb", "A#"),
];

/// Fold one of the five common flat names to its sharp spelling.
///
/// Every other input, valid note or not, is returned unchanged.
pub fn normalize_note_name(name: &str) -> &str {
    ENHARMONIC_ALIASES
        .iter()
        .find(|(flat, _)| *flat == name)
        .map(|(_, sharp)| *sharp)
        .unwrap_or(name)
}

/// Note letters A through G
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NoteName {
    #[default]
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    /// Only uppercase letters are note names; "a" is always a word.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
            NoteName::A => 'A',
            NoteName::B => 'B',
        }
    }

    /// Semitone offset from C
    pub fn semitone(self) -> i32 {
        match self {
            NoteName::C => 0,
            NoteName::D => 2,
            NoteName::E => 4,
            NoteName::F => 5,
            NoteName::G => 7,
            NoteName::A => 9,
            NoteName::B => 11,
        }
    }
}

/// Accidental written after a note letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    #[default]
    Natural, // (none)
    Sharp,   // #
    Flat,    // b
}

impl Accidental {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Accidental::Sharp),
            'b' => Some(Accidental::Flat),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        }
    }

    fn offset(self) -> i32 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }
}

/// Preferred spelling for transposed notes.
///
/// `Sharps` is the canonical output; `Flats` spells the five black keys as
/// `Db Eb Gb Ab Bb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidentals {
    #[default]
    Sharps,
    Flats,
}

impl FromStr for Accidentals {
    type Err = ChordSheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sharps" | "sharp" | "#" => Ok(Accidentals::Sharps),
            "flats" | "flat" | "b" => Ok(Accidentals::Flats),
            other => Err(ChordSheetError::MetadataError(format!(
                "accidentals must be 'sharps' or 'flats', got '{}'",
                other
            ))),
        }
    }
}

/// A spelled note: letter plus accidental, as written in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Note {
    pub name: NoteName,
    pub accidental: Accidental,
}

impl Note {
    pub fn new(name: NoteName, accidental: Accidental) -> Self {
        Self { name, accidental }
    }

    /// Parse an exact note spelling such as `"C"`, `"F#"` or `"Bb"`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let name = NoteName::from_char(chars.next()?)?;
        let accidental = match chars.next() {
            None => return Some(Self::new(name, Accidental::Natural)),
            Some(c) => Accidental::from_char(c)?,
        };
        if chars.next().is_some() {
            return None;
        }
        Some(Self::new(name, accidental))
    }

    pub fn pitch_class(self) -> PitchClass {
        PitchClass::from_index(self.name.semitone() + self.accidental.offset())
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name.as_char(), self.accidental.symbol())
    }
}

/// One of the twelve pitch classes, named with sharps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchClass {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

/// The chromatic sequence in canonical order, index 0 = C.
pub const CHROMATIC_SCALE: [PitchClass; 12] = [
    PitchClass::C,
    PitchClass::Cs,
    PitchClass::D,
    PitchClass::Ds,
    PitchClass::E,
    PitchClass::F,
    PitchClass::Fs,
    PitchClass::G,
    PitchClass::Gs,
    PitchClass::A,
    PitchClass::As,
    PitchClass::B,
];

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];
const SOLFEGE_NAMES: [&str; 12] = [
    "Dó", "Dó#", "Ré", "Ré#", "Mi", "Fá", "Fá#", "Sol", "Sol#", "Lá", "Lá#", "Si",
];

impl PitchClass {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wraps in both directions: -1 is B, 12 is C.
    pub fn from_index(index: i32) -> Self {
        CHROMATIC_SCALE[index.rem_euclid(12) as usize]
    }

    /// Canonical (sharp) name
    pub fn name(self) -> &'static str {
        SHARP_NAMES[self.index()]
    }

    pub fn flat_name(self) -> &'static str {
        FLAT_NAMES[self.index()]
    }

    /// Fixed-do name used by the key picker (`Dó`, `Ré#`, ...)
    pub fn solfege(self) -> &'static str {
        SOLFEGE_NAMES[self.index()]
    }

    pub fn spelled(self, accidentals: Accidentals) -> &'static str {
        match accidentals {
            Accidentals::Sharps => self.name(),
            Accidentals::Flats => self.flat_name(),
        }
    }

    /// The note spelling of this class under a spelling preference.
    pub fn to_note(self, accidentals: Accidentals) -> Note {
        // Every entry of both name tables is a valid spelling
        Note::parse(self.spelled(accidentals)).unwrap_or_default()
    }

    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_index(self.index() as i32 + semitones)
    }

    /// Accepts any spelling `Note::parse` accepts, after folding flat aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        Note::parse(normalize_note_name(name.trim())).map(Note::pitch_class)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mode of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

/// A tonal center: tonic plus mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Key {
    pub tonic: PitchClass,
    pub mode: Mode,
}

impl Key {
    pub fn new(tonic: PitchClass, mode: Mode) -> Self {
        Self { tonic, mode }
    }

    pub fn major(tonic: PitchClass) -> Self {
        Self::new(tonic, Mode::Major)
    }

    pub fn minor(tonic: PitchClass) -> Self {
        Self::new(tonic, Mode::Minor)
    }

    /// The chromatic sequence rotated to start at the tonic.
    pub fn progression(&self) -> [PitchClass; 12] {
        let offset = self.tonic.index() as i32;
        std::array::from_fn(|i| PitchClass::from_index(offset + i as i32))
    }

    /// Position of a pitch class within this key's progression.
    pub fn degree_of(&self, pitch: PitchClass) -> usize {
        (pitch.index() as i32 - self.tonic.index() as i32).rem_euclid(12) as usize
    }

    /// Pitch class at a position of this key's progression.
    pub fn pitch_at(&self, degree: usize) -> PitchClass {
        self.progression()[degree % 12]
    }

    /// Move the tonic by `semitones`, keeping the mode.
    pub fn step(&self, semitones: i32) -> Self {
        Self::new(self.tonic.transpose(semitones), self.mode)
    }

    pub fn next(&self) -> Self {
        self.step(1)
    }

    pub fn previous(&self) -> Self {
        self.step(-1)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            Mode::Major => write!(f, "{}", self.tonic),
            Mode::Minor => write!(f, "{}m", self.tonic),
        }
    }
}

impl FromStr for Key {
    type Err = ChordSheetError;

    /// Parse a key name like "G", "F#", "Bb", or a minor key like "Am", "Ebm".
    ///
    /// Only natural and sharp tonics plus the five flats of
    /// [`ENHARMONIC_ALIASES`] name a key; `Cb`, `Fb`, `E#` and `B#` do not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (tonic_name, mode) = match trimmed.strip_suffix('m') {
            Some(tonic) if !tonic.is_empty() => (tonic, Mode::Minor),
            _ => (trimmed, Mode::Major),
        };
        Some(normalize_note_name(tonic_name))
            .filter(|name| SHARP_NAMES.contains(name))
            .and_then(PitchClass::from_name)
            .map(|tonic| Key::new(tonic, mode))
            .ok_or_else(|| ChordSheetError::UnknownKey(s.to_string()))
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for Key {
    type Error = ChordSheetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The twelve major keys in chromatic order, starting at C.
pub fn all_keys() -> Vec<Key> {
    CHROMATIC_SCALE.iter().map(|&pc| Key::major(pc)).collect()
}

/// The twelve major keys followed by the twelve minor keys.
pub fn all_keys_with_minor() -> Vec<Key> {
    all_keys()
        .into_iter()
        .chain(CHROMATIC_SCALE.iter().map(|&pc| Key::minor(pc)))
        .collect()
}
