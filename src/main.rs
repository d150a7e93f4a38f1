use anyhow::{bail, Context, Result};
use chordshift::{Song, SongView, Songbook, TranspositionRequest};
use clap::Parser;
use env_logger::Env;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Transpose the chords of a lyric sheet, leaving the lyrics alone.
#[derive(Parser, Debug)]
#[command(name = "chordshift", version)]
struct Cli {
    /// Plain-text song, or a YAML songbook (.yaml / .yml)
    input: PathBuf,

    /// Song to pick from a songbook
    #[arg(short, long)]
    song: Option<String>,

    /// Declared key of a plain-text song (defaults to C)
    #[arg(short, long)]
    key: Option<String>,

    /// Move every chord by this many semitones
    #[arg(long, allow_hyphen_values = true, conflicts_with = "to")]
    steps: Option<i32>,

    /// Target key label, e.g. "Bb" or "F#m"
    #[arg(long)]
    to: Option<String>,

    /// Spell transposed roots with flats (only with --steps)
    #[arg(long, requires = "steps")]
    flats: bool,

    /// Print the available target keys instead of the song
    #[arg(long)]
    list_keys: bool,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn is_songbook(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn load_song(cli: &Cli) -> Result<Song> {
    let content = fs::read_to_string(&cli.input)
        .with_context(|| format!("Error reading file '{}'", cli.input.display()))?;

    if !is_songbook(&cli.input) {
        return Ok(Song {
            name: cli.input.display().to_string(),
            text: Some(content),
            tonality: cli.key.clone(),
            ..Song::default()
        });
    }

    let book = Songbook::from_yaml(&content)?;
    info!("Loaded {} songs from {}", book.len(), cli.input.display());
    let song = match &cli.song {
        Some(name) => book.find(name)?.clone(),
        None => match book.songs() {
            [only] => only.clone(),
            _ => bail!("Songbook has {} songs, pick one with --song", book.len()),
        },
    };
    Ok(song)
}

fn render(cli: &Cli, view: &mut SongView) -> Result<String> {
    if cli.list_keys {
        let lines: Vec<String> = view
            .options()
            .iter()
            .map(|o| format!("{:>4}  {}", format!("{:+}", o.delta), o.display()))
            .collect();
        return Ok(lines.join("\n") + "\n");
    }

    if let Some(steps) = cli.steps {
        return Ok(view.render(TranspositionRequest::new(steps, cli.flats)));
    }

    if let Some(target) = &cli.to {
        let original = view
            .tonality()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "an unknown key".to_string());
        return view
            .select_by_label(target)
            .ok_or_else(|| chordshift::ChordError::UnknownTarget {
                target: target.clone(),
                original,
            })
            .map_err(Into::into);
    }

    Ok(view.render_current())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let song = load_song(&cli)?;
    info!("Transposing '{}'", song.name);

    let mut view = song.view();
    let result = render(&cli, &mut view)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &result)
                .with_context(|| format!("Error writing to '{}'", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", result),
    }
    Ok(())
}
