use chordsheet::theory::{detect_progression, suggested_chords as diatonic_chords};
use chordsheet::{parse_chord, Accidentals, ChordSheetError, Key, ProcessedSong};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct BindingError {
    kind: &'static str,
    message: String,
}

fn error_to_js(e: ChordSheetError) -> JsValue {
    let kind = match &e {
        ChordSheetError::UnknownKey(_) => "unknown-key",
        ChordSheetError::InvalidChord(_) => "invalid-chord",
        ChordSheetError::MetadataError(_) => "metadata",
        ChordSheetError::Io { .. } => "io",
    };
    let error = BindingError {
        kind,
        message: e.to_string(),
    };
    let payload = serde_json::to_string(&error).unwrap_or(error.message);
    JsValue::from_str(&payload)
}

fn parse_key(name: &str) -> Result<Key, JsValue> {
    name.parse().map_err(error_to_js)
}

fn parse_accidentals(flats: bool) -> Accidentals {
    if flats {
        Accidentals::Flats
    } else {
        Accidentals::Sharps
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// Render raw lyrics written in `from` as HTML in `to`
#[wasm_bindgen]
pub fn render_lyrics(lyrics: &str, from: &str, to: &str, flats: bool) -> Result<String, JsValue> {
    chordsheet::render_lyrics_with(lyrics, from, to, parse_accidentals(flats)).map_err(error_to_js)
}

/// Render a full song document; returns the render as a JS object
#[wasm_bindgen]
pub fn render_song(document: &str, display_key: Option<String>) -> Result<JsValue, JsValue> {
    let render = chordsheet::render_song(document, display_key.as_deref()).map_err(error_to_js)?;
    serde_wasm_bindgen::to_value(&render).map_err(JsValue::from)
}

/// Transpose a single chord symbol; unknown symbols come back unchanged
#[wasm_bindgen]
pub fn transpose_chord(chord: &str, from: &str, to: &str, flats: bool) -> Result<String, JsValue> {
    chordsheet::transpose_symbol(chord, from, to, parse_accidentals(flats)).map_err(error_to_js)
}

/// Rewrite lyrics source in another key
#[wasm_bindgen]
pub fn transpose_lyrics(lyrics: &str, from: &str, to: &str, flats: bool) -> Result<String, JsValue> {
    Ok(chordsheet::transpose_lyrics(
        lyrics,
        parse_key(from)?,
        parse_key(to)?,
        parse_accidentals(flats),
    ))
}

#[wasm_bindgen]
pub fn is_valid_chord(token: &str) -> bool {
    chordsheet::is_valid_chord(token)
}

#[derive(Serialize)]
struct KeyEntry {
    name: String,
    solfege: &'static str,
}

/// Supported keys as a JSON array of `{name, solfege}`
#[wasm_bindgen]
pub fn list_keys(include_minor: bool) -> String {
    let keys = if include_minor {
        chordsheet::all_keys_with_minor()
    } else {
        chordsheet::all_keys()
    };
    let entries: Vec<KeyEntry> = keys
        .into_iter()
        .map(|key| KeyEntry {
            name: key.to_string(),
            solfege: key.tonic.solfege(),
        })
        .collect();
    serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string())
}

/// Key one semitone up (`step > 0`) or down (`step < 0`)
#[wasm_bindgen]
pub fn step_key(key: &str, step: i32) -> Result<String, JsValue> {
    Ok(parse_key(key)?.step(step).to_string())
}

/// Chords that usually fit a key, as a JSON array
#[wasm_bindgen]
pub fn suggested_chords(key: &str, flats: bool) -> Result<String, JsValue> {
    let chords = diatonic_chords(parse_key(key)?, parse_accidentals(flats));
    Ok(serde_json::to_string(&chords).unwrap_or_else(|_| "[]".to_string()))
}

/// Name of the progression formed by the given chord symbols
#[wasm_bindgen]
pub fn progression_name(chords: Vec<String>, key: &str) -> Result<String, JsValue> {
    let parsed: Vec<_> = chords.iter().filter_map(|symbol| parse_chord(symbol)).collect();
    Ok(detect_progression(&parsed, parse_key(key)?).to_string())
}

/// Names of the embedded sample songs, as a JSON array
#[wasm_bindgen]
pub fn list_songs() -> String {
    serde_json::to_string(&chordsheet_songbook::list_songs()).unwrap_or_else(|_| "[]".to_string())
}

#[wasm_bindgen]
pub fn get_song(name: &str) -> Option<String> {
    chordsheet_songbook::get_song(name).map(|song| song.content)
}

/// Segmentation cache for a song viewer.
///
/// Segmentation only depends on the lyrics text, so a viewer that switches
/// keys re-renders from the cached [`ProcessedSong`] and only re-segments
/// when the text changes.
#[wasm_bindgen]
pub struct SongView {
    lyrics: String,
    song: ProcessedSong,
}

impl Default for SongView {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl SongView {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let lyrics = String::new();
        let song = chordsheet::segment(&lyrics);
        Self { lyrics, song }
    }

    /// Replace the lyrics; returns whether they were re-segmented
    pub fn set_lyrics(&mut self, lyrics: &str) -> bool {
        if self.lyrics == lyrics {
            return false;
        }
        self.lyrics = lyrics.to_string();
        self.song = chordsheet::segment(lyrics);
        log::debug!("SongView re-segmented {} lines", self.song.lines.len());
        true
    }

    pub fn render(&self, from: &str, to: &str, flats: bool) -> Result<String, JsValue> {
        let from = parse_key(from)?;
        let to = parse_key(to)?;
        Ok(chordsheet::html::render_with(&self.song, from, to, parse_accidentals(flats)))
    }

    /// Render tree as a JS array
    pub fn render_lines(&self, from: &str, to: &str, flats: bool) -> Result<JsValue, JsValue> {
        let lines = chordsheet::render_lines(&self.song, parse_key(from)?, parse_key(to)?, parse_accidentals(flats));
        serde_wasm_bindgen::to_value(&lines).map_err(JsValue::from)
    }

    /// `chords-above`, `bracket-inline` or `mixed`
    pub fn format(&self) -> String {
        self.song.format.to_string()
    }

    pub fn chord_count(&self) -> usize {
        self.song.chord_count()
    }
}
