pub mod api;
pub mod ast;
pub mod chord;
pub mod error;
pub mod html;
pub mod lexer;
pub mod parser;
pub mod pitch;
pub mod theory;
pub mod transpose;

pub use api::{render_lyrics, render_lyrics_with, render_song, transpose_source, transpose_symbol, SongRender};
pub use ast::*;
pub use chord::{is_valid_chord, parse_chord, Chord, Extension, Quality};
pub use error::*;
pub use html::{render, render_lines, render_text, RenderedLine};
pub use parser::{parse_song, segment};
pub use pitch::{all_keys, all_keys_with_minor, Accidentals, Key, Mode, Note, PitchClass};
pub use transpose::{transpose_chord, transpose_chord_with, transpose_lyrics};

/// Segment raw lyrics and render them as HTML in another key.
pub fn render_transposed(lyrics: &str, from: Key, to: Key) -> String {
    render(&segment(lyrics), from, to)
}
