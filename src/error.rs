//! # Error Types
//!
//! This module defines the error type for the chordsheet engine.
//!
//! Most content problems are NOT errors: an unparseable chord passes through a
//! transposition unchanged and an unclassifiable line renders as plain lyrics.
//! Errors are reserved for caller mistakes and broken configuration.
//!
//! ## Error Types
//! - `UnknownKey` - a key name outside the 12 major + 12 minor keys
//! - `InvalidChord` - explicit `str::parse::<Chord>()` on a non-chord
//! - `MetadataError` - malformed YAML frontmatter in a song document
//! - `Io` - file access from the command line tool
//!
//! ## Usage
//! ```rust
//! use chordsheet::{render_lyrics, ChordSheetError};
//!
//! match render_lyrics("C\nHello", "C", "H") {
//!     Ok(html) => println!("{}", html),
//!     Err(ChordSheetError::UnknownKey(key)) => eprintln!("No such key: {}", key),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChordSheetError {
    /// A key outside the supported set was requested.
    ///
    /// This signals a bug in the caller (the key picker only offers valid keys),
    /// so it is surfaced instead of being absorbed.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChordSheetError;
    /// let err = ChordSheetError::UnknownKey("H".to_string());
    /// assert_eq!(err.to_string(), "Unknown key: 'H'");
    /// ```
    #[error("Unknown key: '{0}'")]
    UnknownKey(String),

    /// A string that does not match the chord grammar was parsed explicitly.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChordSheetError;
    /// let err = ChordSheetError::InvalidChord("Amor".to_string());
    /// assert_eq!(err.to_string(), "Invalid chord symbol: 'Amor'");
    /// ```
    #[error("Invalid chord symbol: '{0}'")]
    InvalidChord(String),

    /// Invalid metadata error.
    ///
    /// Occurs when the YAML frontmatter of a song document cannot be parsed or
    /// holds an unsupported value.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChordSheetError;
    /// let err = ChordSheetError::MetadataError("accidentals must be 'sharps' or 'flats'".to_string());
    /// assert_eq!(err.to_string(), "Invalid metadata: accidentals must be 'sharps' or 'flats'");
    /// ```
    #[error("Invalid metadata: {0}")]
    MetadataError(String),

    #[error("Error accessing '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
