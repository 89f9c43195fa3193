use chordsheet::html::to_text;
use chordsheet::parser::extract_metadata;
use chordsheet::theory::describe;
use chordsheet::transpose::transpose_parsed;
use chordsheet::{
    all_keys, all_keys_with_minor, parse_song, render_song, transpose_lyrics, Accidentals, Chord, ChordSheetError, Key,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "chordsheet", about = "Render and transpose chord sheets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a song document
    Render {
        /// Song document (YAML frontmatter + lyrics)
        file: PathBuf,

        /// Key to display (default: the document's display-key or key)
        #[arg(long)]
        key: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Rewrite a song document in another key
    Transpose {
        file: PathBuf,

        /// Target key (e.g. D, Bb, F#m)
        #[arg(long)]
        key: String,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the supported keys
    Keys {
        /// Include the twelve minor keys
        #[arg(long)]
        minor: bool,
    },
    /// Inspect or transpose a single chord symbol
    Chord {
        symbol: String,

        #[arg(long, requires = "to")]
        from: Option<String>,

        #[arg(long, requires = "from")]
        to: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Html,
    Text,
    Json,
}

fn read_file(path: &Path) -> Result<String, ChordSheetError> {
    fs::read_to_string(path).map_err(|source| ChordSheetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn emit(content: &str, output: Option<&Path>) -> Result<(), ChordSheetError> {
    match output {
        Some(path) => {
            fs::write(path, content).map_err(|source| ChordSheetError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Replace the top-level `key:` entry of a frontmatter block in place,
/// adding one at the end if missing.
fn with_key(metadata: &str, key: Key) -> String {
    let entry = format!("key: {}", key);
    let mut replaced = false;
    let mut lines: Vec<String> = metadata
        .lines()
        .map(|line| {
            if !replaced && line.starts_with("key:") {
                replaced = true;
                entry.clone()
            } else {
                line.to_string()
            }
        })
        .collect();
    if !replaced {
        lines.push(entry);
    }
    lines.join("\n")
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Render {
            file,
            key,
            format,
            output,
        } => {
            let document = read_file(&file)?;
            let render = render_song(&document, key.as_deref())?;
            log::info!(
                "Rendering {} from {} in {}",
                file.display(),
                render.original_key,
                render.display_key
            );
            let content = match format {
                OutputFormat::Html => render.html.clone(),
                OutputFormat::Text => to_text(&render.lines),
                OutputFormat::Json => serde_json::to_string_pretty(&render)?,
            };
            emit(&content, output.as_deref())?;
        }
        Commands::Transpose { file, key, output } => {
            let document = read_file(&file)?;
            let target: Key = key.parse()?;
            let song = parse_song(&document)?;
            let from = song.original_key();
            let lyrics = transpose_lyrics(&song.lyrics, from, target, song.metadata.accidentals);

            let content = match extract_metadata(&document).0 {
                Some(metadata) => format!("---\n{}\n---\n{}", with_key(&metadata, target), lyrics),
                None => lyrics,
            };
            log::info!("Transposed {} from {} to {}", file.display(), from, target);
            emit(&content, output.as_deref())?;
        }
        Commands::Keys { minor } => {
            let keys = if minor { all_keys_with_minor() } else { all_keys() };
            for key in keys {
                println!("{:<4} {}", key.to_string(), key.tonic.solfege());
            }
        }
        Commands::Chord { symbol, from, to } => {
            let chord: Chord = symbol.parse()?;
            println!("{}  {}", chord, describe(&chord));
            if let (Some(from), Some(to)) = (from, to) {
                let from: Key = from.parse()?;
                let to: Key = to.parse()?;
                let moved = transpose_parsed(&chord, from, to, Accidentals::Sharps);
                println!("{} -> {}: {}", from, to, moved);
            }
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> Key {
        s.parse().unwrap()
    }

    #[test]
    fn test_with_key_rewrites_top_level_entry_in_place() {
        let metadata = "title: Imagine\nkey: C\nrelease:\n  key: Bb\nartist: John Lennon";
        assert_eq!(
            with_key(metadata, key("D")),
            "title: Imagine\nkey: D\nrelease:\n  key: Bb\nartist: John Lennon"
        );
    }

    #[test]
    fn test_with_key_appends_when_missing() {
        assert_eq!(with_key("title: Imagine", key("F#m")), "title: Imagine\nkey: F#m");
        assert_eq!(with_key("", key("G")), "key: G");
    }
}
