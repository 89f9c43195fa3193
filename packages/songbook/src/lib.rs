//! Sample song documents embedded at build time from `songs/*.chords`.

include!(concat!(env!("OUT_DIR"), "/songs.rs"));

use chordsheet::{parse_song, ChordSheetError, Song};

/// An embedded song document with its name
#[derive(Debug, Clone)]
pub struct SongFile {
    pub name: String,
    pub content: String,
}

impl SongFile {
    /// Parse the document into metadata and lyrics
    pub fn parse(&self) -> Result<Song, ChordSheetError> {
        parse_song(&self.content)
    }
}

/// Get all embedded songs
pub fn get_all_songs() -> Vec<SongFile> {
    SONGS
        .iter()
        .map(|(name, content)| SongFile {
            name: name.to_string(),
            content: content.to_string(),
        })
        .collect()
}

/// Get a song by name (file stem, e.g. `"imagine"`)
pub fn get_song(name: &str) -> Option<SongFile> {
    SONGS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(name, content)| SongFile {
            name: name.to_string(),
            content: content.to_string(),
        })
}

/// List all song names
pub fn list_songs() -> Vec<&'static str> {
    SONGS.iter().map(|(name, _)| *name).collect()
}
