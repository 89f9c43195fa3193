//! Harmony helpers: chord classification, diatonic suggestions and
//! recognition of common progressions.
//!
//! Scale degrees are measured on the major scale of the key's tonic, so a
//! minor key is read through its tonic's major scale.

use crate::chord::{Chord, Quality};
use crate::pitch::{Accidentals, Key, PitchClass};
use serde::Serialize;
use std::fmt;

/// Semitone offsets of the major scale degrees I through VII.
pub const MAJOR_SCALE: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Broad family a chord belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChordKind {
    Major,
    Minor,
    Suspended,
    Diminished,
    Augmented,
    HalfDiminished,
    Added,
}

impl ChordKind {
    pub fn of(chord: &Chord) -> Self {
        match chord.quality {
            None | Some(Quality::Maj) | Some(Quality::Major) => ChordKind::Major,
            Some(Quality::Min) | Some(Quality::Minor) => ChordKind::Minor,
            Some(Quality::Sus) | Some(Quality::Sus2) | Some(Quality::Sus4) => ChordKind::Suspended,
            Some(Quality::Dim) | Some(Quality::Diminished) => ChordKind::Diminished,
            Some(Quality::Aug) | Some(Quality::Plus) => ChordKind::Augmented,
            Some(Quality::HalfDiminished) => ChordKind::HalfDiminished,
            Some(Quality::Add) => ChordKind::Added,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChordKind::Major => "Major",
            ChordKind::Minor => "Minor",
            ChordKind::Suspended => "Suspended",
            ChordKind::Diminished => "Diminished",
            ChordKind::Augmented => "Augmented",
            ChordKind::HalfDiminished => "Half-diminished",
            ChordKind::Added => "Added",
        }
    }
}

/// Human readable description of a chord's type.
///
/// ```
/// use chordsheet::{parse_chord, theory::describe};
///
/// assert_eq!(describe(&parse_chord("G7").unwrap()), "Major with 7");
/// assert_eq!(describe(&parse_chord("Am").unwrap()), "Minor");
/// assert_eq!(describe(&parse_chord("Dsus4").unwrap()), "Suspended 4");
/// ```
pub fn describe(chord: &Chord) -> String {
    let kind = ChordKind::of(chord);
    let extension = chord.extension.map(|e| e.to_string());

    match (kind, chord.quality, extension) {
        (ChordKind::Major | ChordKind::Minor, _, Some(ext)) => format!("{} with {}", kind.name(), ext),
        (ChordKind::Suspended, Some(Quality::Sus2), _) => "Suspended 2".to_string(),
        (ChordKind::Suspended, Some(Quality::Sus4), _) => "Suspended 4".to_string(),
        (ChordKind::Added, _, Some(ext)) => format!("Added {}", ext),
        _ => kind.name().to_string(),
    }
}

fn degree_pitch(key: Key, degree: usize) -> PitchClass {
    key.tonic.transpose(MAJOR_SCALE[degree])
}

/// Chords that usually fit a key: I, ii m, iii m, IV, V, vi m, I7, V7, IVmaj7, vi m7.
pub fn suggested_chords(key: Key, accidentals: Accidentals) -> Vec<String> {
    let name = |degree: usize| degree_pitch(key, degree).spelled(accidentals);
    let (i, ii, iii, iv, v, vi) = (name(0), name(1), name(2), name(3), name(4), name(5));

    vec![
        i.to_string(),
        format!("{}m", ii),
        format!("{}m", iii),
        iv.to_string(),
        v.to_string(),
        format!("{}m", vi),
        format!("{}7", i),
        format!("{}7", v),
        format!("{}maj7", iv),
        format!("{}m7", vi),
    ]
}

/// Scale degree (1 to 7) of a pitch in the key, if it is diatonic.
pub fn scale_degree(key: Key, pitch: PitchClass) -> Option<usize> {
    let interval = (pitch.index() as i32 - key.tonic.index() as i32).rem_euclid(12);
    MAJOR_SCALE.iter().position(|&step| step == interval).map(|i| i + 1)
}

/// Well-known chord progressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommonProgression {
    Pop,
    Alternative,
    Classic,
    Fifties,
    Jazz,
    Romantic,
    Custom,
}

impl CommonProgression {
    const KNOWN: [(CommonProgression, &'static [usize]); 6] = [
        (CommonProgression::Pop, &[1, 5, 6, 4]),
        (CommonProgression::Alternative, &[6, 4, 1, 5]),
        (CommonProgression::Classic, &[1, 4, 5, 1]),
        (CommonProgression::Fifties, &[1, 6, 4, 5]),
        (CommonProgression::Jazz, &[2, 5, 1]),
        (CommonProgression::Romantic, &[1, 3, 4, 5]),
    ];

    pub fn numerals(self) -> &'static str {
        match self {
            CommonProgression::Pop => "I-V-vi-IV",
            CommonProgression::Alternative => "vi-IV-I-V",
            CommonProgression::Classic => "I-IV-V-I",
            CommonProgression::Fifties => "I-vi-IV-V",
            CommonProgression::Jazz => "ii-V-I",
            CommonProgression::Romantic => "I-iii-IV-V",
            CommonProgression::Custom => "custom",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CommonProgression::Pop => "pop progression",
            CommonProgression::Alternative => "alternative progression",
            CommonProgression::Classic => "classic progression",
            CommonProgression::Fifties => "50s progression",
            CommonProgression::Jazz => "jazz progression",
            CommonProgression::Romantic => "romantic progression",
            CommonProgression::Custom => "custom progression",
        }
    }
}

impl fmt::Display for CommonProgression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommonProgression::Custom => f.write_str(self.name()),
            _ => write!(f, "{} ({})", self.numerals(), self.name()),
        }
    }
}

/// Recognize a progression from chord roots.
///
/// Roots outside the key's major scale are skipped; the remaining degrees
/// must match a known progression exactly.
pub fn detect_progression(chords: &[Chord], key: Key) -> CommonProgression {
    let degrees: Vec<usize> = chords
        .iter()
        .filter_map(|chord| scale_degree(key, chord.root_pitch()))
        .collect();

    CommonProgression::KNOWN
        .iter()
        .find(|(_, pattern)| *pattern == degrees.as_slice())
        .map_or(CommonProgression::Custom, |(progression, _)| *progression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::parse_chord;

    fn key(s: &str) -> Key {
        s.parse().unwrap()
    }

    fn chords(symbols: &[&str]) -> Vec<Chord> {
        symbols.iter().map(|s| parse_chord(s).unwrap()).collect()
    }

    #[test]
    fn test_chord_kinds() {
        let kind = |s: &str| ChordKind::of(&parse_chord(s).unwrap());
        assert_eq!(kind("C"), ChordKind::Major);
        assert_eq!(kind("CM7"), ChordKind::Major);
        assert_eq!(kind("Cmin"), ChordKind::Minor);
        assert_eq!(kind("Csus"), ChordKind::Suspended);
        assert_eq!(kind("C°"), ChordKind::Diminished);
        assert_eq!(kind("C+"), ChordKind::Augmented);
        assert_eq!(kind("Cø7"), ChordKind::HalfDiminished);
        assert_eq!(kind("Cadd9"), ChordKind::Added);
    }

    #[test]
    fn test_descriptions() {
        let describe_symbol = |s: &str| describe(&parse_chord(s).unwrap());
        assert_eq!(describe_symbol("C"), "Major");
        assert_eq!(describe_symbol("Cmaj7"), "Major with 7");
        assert_eq!(describe_symbol("F#m7"), "Minor with 7");
        assert_eq!(describe_symbol("Asus2"), "Suspended 2");
        assert_eq!(describe_symbol("Bdim"), "Diminished");
        assert_eq!(describe_symbol("Eaug"), "Augmented");
        assert_eq!(describe_symbol("Cadd9"), "Added 9");
        assert_eq!(describe_symbol("Cmadd9"), "Minor with add9");
    }

    #[test]
    fn test_suggested_chords_in_c() {
        assert_eq!(
            suggested_chords(key("C"), Accidentals::Sharps),
            vec!["C", "Dm", "Em", "F", "G", "Am", "C7", "G7", "Fmaj7", "Am7"]
        );
    }

    #[test]
    fn test_suggested_chords_spelling() {
        let flats = suggested_chords(key("Eb"), Accidentals::Flats);
        assert_eq!(&flats[..6], &["Eb", "Fm", "Gm", "Ab", "Bb", "Cm"]);
        let sharps = suggested_chords(key("E"), Accidentals::Sharps);
        assert_eq!(&sharps[..6], &["E", "F#m", "G#m", "A", "B", "C#m"]);
    }

    #[test]
    fn test_scale_degree() {
        assert_eq!(scale_degree(key("G"), PitchClass::G), Some(1));
        assert_eq!(scale_degree(key("G"), PitchClass::Fs), Some(7));
        assert_eq!(scale_degree(key("G"), PitchClass::F), None);
    }

    #[test]
    fn test_detect_progressions() {
        assert_eq!(detect_progression(&chords(&["C", "G", "Am", "F"]), key("C")), CommonProgression::Pop);
        assert_eq!(detect_progression(&chords(&["Em", "C", "G", "D"]), key("G")), CommonProgression::Alternative);
        assert_eq!(detect_progression(&chords(&["D", "G", "A", "D"]), key("D")), CommonProgression::Classic);
        assert_eq!(detect_progression(&chords(&["C", "Am", "F", "G"]), key("C")), CommonProgression::Fifties);
        assert_eq!(detect_progression(&chords(&["Dm7", "G7", "Cmaj7"]), key("C")), CommonProgression::Jazz);
        assert_eq!(detect_progression(&chords(&["A", "C#m", "D", "E"]), key("A")), CommonProgression::Romantic);
    }

    #[test]
    fn test_non_diatonic_roots_are_skipped() {
        let progression = detect_progression(&chords(&["C", "Eb", "G", "Am", "F"]), key("C"));
        assert_eq!(progression, CommonProgression::Pop);
    }

    #[test]
    fn test_custom_progression() {
        let progression = detect_progression(&chords(&["C", "F"]), key("C"));
        assert_eq!(progression, CommonProgression::Custom);
        assert_eq!(progression.to_string(), "custom progression");
        assert_eq!(CommonProgression::Jazz.to_string(), "ii-V-I (jazz progression)");
    }
}
