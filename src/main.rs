// Quietstorm command line
// Generate, preview and export R&B progressions without a UI

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use quietstorm_lib::arranger::ExportType;
use quietstorm_lib::commands::{
    self, CommandResult, ExportInput, GenerateInput, ProgressionInput, SongInput,
};
use quietstorm_lib::config::AppConfig;
use quietstorm_lib::library::ALL_CATEGORY;
use quietstorm_lib::playback::OfflineEngine;
use quietstorm_lib::{Catalog, Session};

#[derive(Debug, Parser)]
#[command(name = "quietstorm", version, about = "R&B chord progression generator")]
struct Cli {
    /// Seed for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List artist styles
    Artists,

    /// List numeral progressions
    Progressions {
        #[arg(long, default_value = ALL_CATEGORY)]
        category: String,
    },

    /// Generate a batch of arrangements
    Generate {
        #[arg(long)]
        artist: Option<String>,

        /// Catalog progression name
        #[arg(long)]
        progression: Option<String>,

        /// Roman numerals, comma separated
        #[arg(long, value_delimiter = ',')]
        numerals: Option<Vec<String>>,

        /// Chord names, comma separated
        #[arg(long, value_delimiter = ',')]
        chords: Option<Vec<String>>,

        /// Index of the artist's own progression
        #[arg(long)]
        literal: Option<usize>,

        #[arg(long, default_value = "C")]
        key: String,

        #[arg(long)]
        variation_level: Option<f64>,

        /// Arrangement to preview or export (0-based)
        #[arg(long, default_value_t = 0)]
        select: usize,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate a full song for an artist
    Song {
        #[arg(long)]
        artist: String,

        /// Semitones
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        transpose: i32,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Play a progression exactly as written
    Progression {
        #[arg(long)]
        artist: Option<String>,

        /// Chord names, comma separated
        #[arg(long, value_delimiter = ',')]
        chords: Option<Vec<String>>,

        #[arg(long)]
        literal: Option<usize>,

        #[arg(long, default_value = "C")]
        key: String,

        #[arg(long)]
        tempo: Option<u32>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Write a MIDI file of this type (full, chords, piano, bass, melody, drums, pad, strings, guitar)
    #[arg(long)]
    export: Option<String>,

    /// Run the schedule through the offline engine and summarize it
    #[arg(long)]
    preview: bool,
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

fn load_config(path: Option<PathBuf>) -> CommandResult<AppConfig> {
    match path.or_else(AppConfig::default_path) {
        Some(path) => Ok(AppConfig::load(&path)?),
        None => Ok(AppConfig::default()),
    }
}

fn print<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T)) -> CommandResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        text(value);
    }
    Ok(())
}

fn finish(session: &mut Session<OfflineEngine>, output: OutputArgs, json: bool) -> CommandResult<()> {
    if output.preview {
        let preview = commands::preview(session)?;
        print(json, &preview, |p| {
            println!(
                "{}: {:.1}s, {} notes, {} chord changes",
                p.title,
                p.total_seconds,
                p.notes,
                p.chord_changes.len()
            );
            for (voice, count) in &p.notes_per_voice {
                println!("  {:<8} {}", voice, count);
            }
        })?;
    }

    if let Some(export_type) = output.export {
        let export = commands::export_midi_command(
            session,
            ExportInput {
                export_type,
                save: true,
            },
        )?;
        let path = export.path.clone().unwrap_or_else(|| PathBuf::from(&export.filename));
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "path": path,
                    "export_type": export.export_type,
                    "sha256": export.sha256,
                    "size": export.size,
                })
            );
        } else {
            println!(
                "Wrote {} ({}, {} bytes, sha256 {})",
                path.display(),
                export.export_type.to_string(),
                export.size,
                &export.sha256[..12]
            );
        }
    }
    Ok(())
}

fn run(cli: Cli) -> CommandResult<()> {
    let config = load_config(cli.config)?;
    let mut session = Session::new(Catalog::load(), config, OfflineEngine::new(), cli.seed);
    let json = cli.json;

    match cli.command {
        Command::Artists => {
            let artists = commands::list_artists(&session);
            print(json, &artists, |artists| {
                for a in artists {
                    println!(
                        "{:<14} {:<16} {}-{} BPM  {}",
                        a.id, a.name, a.tempo_range.0, a.tempo_range.1, a.description
                    );
                }
            })
        }

        Command::Progressions { category } => {
            let progressions = commands::list_progressions(&session, &category);
            print(json, &progressions, |progressions| {
                for p in progressions {
                    println!("{:<22} {:<28} {}", p.name, p.numerals.join(" "), p.category);
                }
            })
        }

        Command::Generate {
            artist,
            progression,
            numerals,
            chords,
            literal,
            key,
            variation_level,
            select,
            output,
        } => {
            let arrangements = commands::generate(
                &mut session,
                GenerateInput {
                    artist,
                    progression,
                    literal,
                    numerals,
                    chords,
                    key: Some(key),
                    variation_level,
                },
            )?;
            print(json, &arrangements, |arrangements| {
                for a in arrangements {
                    let names: Vec<&str> = a.chords.iter().map(|c| c.name.as_str()).collect();
                    println!(
                        "{:<10} {} BPM  swing {:.2}  {}  [{}]",
                        a.name,
                        a.tempo,
                        a.swing,
                        a.description,
                        names.join(" ")
                    );
                }
            })?;
            commands::select_arrangement(&mut session, select)?;
            finish(&mut session, output, json)
        }

        Command::Song {
            artist,
            transpose,
            output,
        } => {
            let song = commands::generate_song(&mut session, SongInput { artist, transpose })?;
            print(json, &song, |song| {
                println!(
                    "{} - {} at {} BPM, {} bars ({})",
                    song.artist, song.structure, song.tempo, song.total_bars, song.duration_formatted
                );
                for section in &song.sections {
                    let names: Vec<&str> = section.chords.iter().map(|c| c.name.as_str()).collect();
                    println!(
                        "  bar {:>3}  {:<10} {:>2} bars  [{}]",
                        section.start_bar + 1,
                        section.name,
                        section.bars,
                        names.join(" ")
                    );
                }
            })?;
            finish(&mut session, output, json)
        }

        Command::Progression {
            artist,
            chords,
            literal,
            key,
            tempo,
            output,
        } => {
            let loaded = commands::use_progression(
                &mut session,
                ProgressionInput {
                    artist,
                    literal,
                    chords,
                    key: Some(key),
                    tempo,
                },
            )?;
            print(json, &loaded, |p| {
                println!("{} at {} BPM: {}", p.title, p.tempo, p.chords.join(" "));
            })?;
            finish(&mut session, output, json)
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e.message());
            eprintln!("error: {}", e.message());
            ExitCode::FAILURE
        }
    }
}
