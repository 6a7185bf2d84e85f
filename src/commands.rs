// Commands - UI boundary
// String-typed inputs from a client in, serializable results out
use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::arranger::{Arrangement, ExportType, ProgressionSource, SongArrangement};
use crate::library::{ArtistStyle, ArtistSummary, Category, NumeralProgression};
use crate::playback::{Cue, OfflineEngine, SynthEngine};
use crate::state::{AudioStatus, Session, SessionError};
use crate::theory::notes::parse_pitch_class;

#[derive(Debug, Serialize)]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<E: std::fmt::Display> From<E> for CommandError {
    fn from(error: E) -> Self {
        CommandError {
            message: error.to_string(),
        }
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Parse a key name such as "C", "F#" or "Bb"
pub fn parse_key(key: &str) -> CommandResult<u8> {
    match parse_pitch_class(key.trim()) {
        Some((pitch_class, consumed)) if consumed == key.trim().len() => Ok(pitch_class),
        _ => Err(CommandError {
            message: format!("Unknown key: {}", key),
        }),
    }
}

// ==================== CATALOG COMMANDS ====================

pub fn list_artists<E: SynthEngine>(session: &Session<E>) -> Vec<ArtistSummary> {
    session.catalog().list_artists()
}

pub fn get_artist<E: SynthEngine>(session: &Session<E>, id: &str) -> CommandResult<ArtistStyle> {
    session
        .catalog()
        .artist(id)
        .cloned()
        .ok_or_else(|| CommandError::from(SessionError::UnknownArtist(id.to_string())))
}

pub fn list_categories<E: SynthEngine>(session: &Session<E>) -> Vec<Category> {
    session.catalog().categories.clone()
}

/// Numeral progressions in a category (`all` for every one)
pub fn list_progressions<E: SynthEngine>(
    session: &Session<E>,
    category: &str,
) -> Vec<NumeralProgression> {
    session
        .catalog()
        .progressions_in(category)
        .into_iter()
        .cloned()
        .collect()
}

// ==================== GENERATION COMMANDS ====================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateInput {
    pub artist: Option<String>,
    /// Catalog numeral progression by name
    pub progression: Option<String>,
    /// Index into the artist's literal progressions
    pub literal: Option<usize>,
    /// Explicit roman numerals
    pub numerals: Option<Vec<String>>,
    /// Explicit chord names
    pub chords: Option<Vec<String>>,
    pub key: Option<String>,
    pub variation_level: Option<f64>,
}

fn progression_source<E: SynthEngine>(
    session: &Session<E>,
    input: &GenerateInput,
) -> CommandResult<ProgressionSource> {
    if let Some(numerals) = &input.numerals {
        return Ok(ProgressionSource::Numerals(numerals.clone()));
    }
    if let Some(chords) = &input.chords {
        return Ok(ProgressionSource::Names(chords.clone()));
    }
    if let Some(name) = &input.progression {
        let progression = session
            .catalog()
            .numeral_progression(name)
            .ok_or_else(|| CommandError {
                message: format!("Unknown progression: {}", name),
            })?;
        return Ok(ProgressionSource::Numerals(progression.numerals.clone()));
    }

    let artist_id = input.artist.as_deref().ok_or_else(|| CommandError {
        message: "Give numerals, chords, a progression name or an artist".to_string(),
    })?;
    let artist = get_artist(session, artist_id)?;
    let index = input.literal.unwrap_or(0);
    let literal = artist.literal_progression(index).ok_or_else(|| CommandError {
        message: format!("{} has no progression {}", artist.name, index),
    })?;
    Ok(ProgressionSource::Names(literal.chords.clone()))
}

pub fn generate<E: SynthEngine>(
    session: &mut Session<E>,
    input: GenerateInput,
) -> CommandResult<Vec<Arrangement>> {
    let key = match &input.key {
        Some(key) => parse_key(key)?,
        None => 0,
    };
    let source = progression_source(session, &input)?;

    let arrangements = session.generate(input.artist.as_deref(), source, key, input.variation_level)?;
    Ok(arrangements.to_vec())
}

#[derive(Debug, Deserialize)]
pub struct SongInput {
    pub artist: String,
    #[serde(default)]
    pub transpose: i32,
}

pub fn generate_song<E: SynthEngine>(
    session: &mut Session<E>,
    input: SongInput,
) -> CommandResult<SongArrangement> {
    Ok(session.generate_song(&input.artist, input.transpose)?.clone())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProgressionInput {
    pub artist: Option<String>,
    /// Index into the artist's literal progressions
    pub literal: Option<usize>,
    pub chords: Option<Vec<String>>,
    pub key: Option<String>,
    pub tempo: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ProgressionOutput {
    pub title: String,
    pub chords: Vec<String>,
    pub tempo: u32,
    pub total_beats: f64,
}

/// Load a progression to play and export exactly as written
pub fn use_progression<E: SynthEngine>(
    session: &mut Session<E>,
    input: ProgressionInput,
) -> CommandResult<ProgressionOutput> {
    let key = match &input.key {
        Some(key) => parse_key(key)?,
        None => 0,
    };
    let chords = match (&input.chords, &input.artist) {
        (Some(chords), _) => chords.clone(),
        (None, Some(artist_id)) => {
            let artist = get_artist(session, artist_id)?;
            let index = input.literal.unwrap_or(0);
            artist
                .literal_progression(index)
                .map(|p| p.chords.clone())
                .ok_or_else(|| CommandError {
                    message: format!("{} has no progression {}", artist.name, index),
                })?
        }
        (None, None) => {
            return Err(CommandError {
                message: "Give chords or an artist".to_string(),
            })
        }
    };

    let performance = session.use_progression(input.artist.as_deref(), &chords, key, input.tempo)?;
    Ok(ProgressionOutput {
        title: performance.title.clone(),
        chords: performance.slots.iter().map(|s| s.chord.name.clone()).collect(),
        tempo: performance.tempo,
        total_beats: performance.total_beats(),
    })
}

pub fn select_arrangement<E: SynthEngine>(
    session: &mut Session<E>,
    index: usize,
) -> CommandResult<Arrangement> {
    session.select(index)?;
    session
        .selected_arrangement()
        .cloned()
        .ok_or_else(|| CommandError::from(SessionError::NoArrangement))
}

// ==================== PLAYBACK COMMANDS ====================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlaybackInput {
    pub tempo: Option<u32>,
    pub swing: Option<f64>,
    pub reverb: Option<f64>,
    pub humanize: Option<bool>,
    /// Instrument name to on/off
    pub instruments: BTreeMap<String, bool>,
}

#[derive(Debug, Serialize)]
pub struct PlaybackStatus {
    pub is_playing: bool,
    pub playhead: Option<usize>,
    pub audio: AudioStatus,
    pub total_seconds: Option<f64>,
}

fn status<E: SynthEngine>(session: &Session<E>, total_seconds: Option<f64>) -> PlaybackStatus {
    PlaybackStatus {
        is_playing: session.is_playing(),
        playhead: session.playhead(),
        audio: session.audio_status().clone(),
        total_seconds,
    }
}

/// Apply user playback settings; unknown instruments are ignored
pub fn update_playback<E: SynthEngine>(session: &mut Session<E>, input: PlaybackInput) {
    if input.tempo.is_some() {
        session.set_tempo(input.tempo);
    }
    if input.swing.is_some() {
        session.set_swing(input.swing);
    }
    if let Some(reverb) = input.reverb {
        session.set_reverb(reverb);
    }
    if let Some(humanize) = input.humanize {
        session.set_humanize(humanize);
    }
    for (instrument, enabled) in &input.instruments {
        session.set_instrument(instrument, *enabled);
    }
}

pub fn play<E: SynthEngine>(session: &mut Session<E>) -> CommandResult<PlaybackStatus> {
    let total = session.play()?;
    Ok(status(session, Some(total)))
}

pub fn stop<E: SynthEngine>(session: &mut Session<E>) -> PlaybackStatus {
    session.stop();
    status(session, None)
}

pub fn toggle_play<E: SynthEngine>(session: &mut Session<E>) -> CommandResult<PlaybackStatus> {
    session.toggle_play()?;
    Ok(status(session, None))
}

/// Engine callback entry point
pub fn cue<E: SynthEngine>(session: &mut Session<E>, cue: Cue) -> PlaybackStatus {
    session.handle_cue(cue);
    status(session, None)
}

#[derive(Debug, Serialize)]
pub struct PreviewOutput {
    pub title: String,
    pub total_seconds: f64,
    pub notes: usize,
    pub notes_per_voice: BTreeMap<String, usize>,
    /// (seconds, chord slot) for every chord change
    pub chord_changes: Vec<(f64, usize)>,
}

/// Play the focused performance through the offline engine to the end
pub fn preview(session: &mut Session<OfflineEngine>) -> CommandResult<PreviewOutput> {
    let title = session
        .performance()
        .map(|p| p.title)
        .ok_or_else(|| CommandError::from(SessionError::NoArrangement))?;
    session.engine_mut().history.clear();
    let total_seconds = session.play()?;

    let mut notes_per_voice = BTreeMap::new();
    for note in &session.engine().history {
        *notes_per_voice
            .entry(note.voice.to_string().to_string())
            .or_insert(0) += 1;
    }
    let notes = session.engine().history.len();

    let mut chord_changes: Vec<(f64, usize)> = session
        .engine()
        .pending_cues
        .iter()
        .filter_map(|&(at, cue)| match cue {
            Cue::ChordChange { index } => Some((at, index)),
            Cue::Finished => None,
        })
        .collect();
    chord_changes.sort_by(|a, b| a.0.total_cmp(&b.0));

    let fired = session.engine_mut().advance_to(total_seconds);
    for cue in fired {
        session.handle_cue(cue);
    }

    Ok(PreviewOutput {
        title,
        total_seconds,
        notes,
        notes_per_voice,
        chord_changes,
    })
}

// ==================== EXPORT COMMANDS ====================

#[derive(Debug, Deserialize)]
pub struct ExportInput {
    pub export_type: String,
    /// Write into the export directory as well as returning bytes
    #[serde(default)]
    pub save: bool,
}

#[derive(Debug, Serialize)]
pub struct ExportOutput {
    pub filename: String,
    pub export_type: ExportType,
    pub sha256: String,
    pub size: usize,
    pub path: Option<PathBuf>,
    pub bytes: Vec<u8>,
}

pub fn export_midi_command<E: SynthEngine>(
    session: &Session<E>,
    input: ExportInput,
) -> CommandResult<ExportOutput> {
    let export_type = ExportType::from_string(&input.export_type);
    let artifact = session.export(export_type)?;

    let path = if input.save {
        Some(session.save_export(export_type)?.path)
    } else {
        None
    };

    Ok(ExportOutput {
        filename: artifact.filename,
        export_type,
        sha256: artifact.sha256,
        size: artifact.bytes.len(),
        path,
        bytes: artifact.bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, ExportConfig};
    use crate::library::Catalog;
    use tempfile::TempDir;

    fn session(dir: &TempDir) -> Session<OfflineEngine> {
        let config = AppConfig {
            export: ExportConfig {
                directory: Some(dir.path().to_path_buf()),
                trace: false,
            },
            ..Default::default()
        };
        Session::new(Catalog::load(), config, OfflineEngine::new(), Some(7))
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("C").unwrap(), 0);
        assert_eq!(parse_key("F#").unwrap(), 6);
        assert_eq!(parse_key("Bb").unwrap(), 10);
        assert!(parse_key("H").is_err());
        assert!(parse_key("C#m").is_err());
    }

    #[test]
    fn test_generate_from_catalog_progression() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);
        let name = session.catalog().numeral_progressions[0].name.clone();

        let arrangements = generate(
            &mut session,
            GenerateInput {
                progression: Some(name),
                key: Some("Eb".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(arrangements.len(), 6);
        assert!(arrangements.iter().all(|a| a.key == 3));
    }

    #[test]
    fn test_generate_from_artist_literal() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);

        let arrangements = generate(
            &mut session,
            GenerateInput {
                artist: Some("sza".to_string()),
                literal: Some(1),
                ..Default::default()
            },
        )
        .unwrap();
        let expected = session.catalog().artist("sza").unwrap().progressions[1].chords.clone();
        assert_eq!(arrangements[0].progression, expected);
    }

    #[test]
    fn test_generate_needs_a_source() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);
        let error = generate(&mut session, GenerateInput::default()).unwrap_err();
        assert!(error.message().contains("Give numerals"));
    }

    #[test]
    fn test_unknown_artist_message() {
        let dir = TempDir::new().unwrap();
        let session = session(&dir);
        assert_eq!(
            get_artist(&session, "nobody").unwrap_err().message(),
            "Unknown artist: nobody"
        );
    }

    #[test]
    fn test_use_progression_and_export() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);

        let output = use_progression(
            &mut session,
            ProgressionInput {
                chords: Some(vec!["Cmaj7".into(), "Am7".into(), "Fmaj7".into(), "G7".into()]),
                tempo: Some(90),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(output.tempo, 90);
        assert_eq!(output.total_beats, 16.0);

        let export = export_midi_command(
            &session,
            ExportInput {
                export_type: "chords".to_string(),
                save: true,
            },
        )
        .unwrap();
        assert_eq!(export.filename, "rnb_chords_C_90bpm.mid");
        assert_eq!(export.path, Some(dir.path().join("rnb_chords_C_90bpm.mid")));
        assert_eq!(export.size, export.bytes.len());
    }

    #[test]
    fn test_playback_settings_and_preview() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);
        generate_song(
            &mut session,
            SongInput {
                artist: "dark_rnb".to_string(),
                transpose: 0,
            },
        )
        .unwrap();

        let mut instruments = BTreeMap::new();
        instruments.insert("drums".to_string(), false);
        update_playback(
            &mut session,
            PlaybackInput {
                tempo: Some(100),
                instruments,
                ..Default::default()
            },
        );

        let preview = preview(&mut session).unwrap();
        let bars = session.song().unwrap().total_bars as usize;
        assert_eq!(preview.chord_changes.len(), bars);
        assert!((preview.total_seconds - bars as f64 * 4.0 * 0.6).abs() < 1e-9);
        assert!(!preview.notes_per_voice.contains_key("kick"));
        assert!(preview.notes_per_voice.contains_key("bass"));
        assert!(!session.is_playing());
    }

    #[test]
    fn test_play_stop_status() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir);
        generate(
            &mut session,
            GenerateInput {
                numerals: Some(vec!["IImin7".into(), "V7".into(), "Imaj7".into()]),
                ..Default::default()
            },
        )
        .unwrap();

        let playing = play(&mut session).unwrap();
        assert!(playing.is_playing);
        assert!(playing.total_seconds.is_some());

        let status = cue(&mut session, Cue::ChordChange { index: 2 });
        assert_eq!(status.playhead, Some(2));

        let stopped = stop(&mut session);
        assert!(!stopped.is_playing);
        assert_eq!(stopped.playhead, None);
    }
}
