// Session - Top-level controller
// Owns selection, play state and the engine; generators and exporter only return values

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use thiserror::Error;

use crate::arranger::chord::Chord;
use crate::arranger::midi::{self, ExportError, ExportType};
use crate::arranger::patterns::DrumStyle;
use crate::arranger::performance::Performance;
use crate::arranger::song::{generate_song_arrangement, SongArrangement};
use crate::arranger::variations::{generate_variations, Arrangement, ProgressionSource};
use crate::config::AppConfig;
use crate::library::{ArtistStyle, Catalog};
use crate::pipeline::{Stage, TraceEntry, TraceWriter};
use crate::playback::{build_schedule, Cue, EngineError, PlaybackOptions, Player, SynthEngine};
use crate::theory::note_name;
use super::storage::{self, StorageError, StoredExport};

/// Name used in files when no artist is selected
const DEFAULT_ARTIST_SLUG: &str = "rnb";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No arrangement generated yet")]
    NoArrangement,

    #[error("Arrangement {index} out of range (have {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unknown artist: {0}")]
    UnknownArtist(String),

    #[error("Audio not ready: {0}")]
    AudioNotReady(String),

    #[error("Engine error: {0}")]
    Engine(EngineError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Whether the audio context can make sound
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum AudioStatus {
    Uninitialized,
    Ready,
    NotReady(String),
}

/// What play and export act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    Variations,
    Song,
    /// A fixed progression played as written with split-hand voicing
    Progression,
}

/// MIDI bytes ready to save or hand to a client
#[derive(Debug, Clone, Serialize)]
pub struct ExportArtifact {
    pub filename: String,
    pub export_type: ExportType,
    pub sha256: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

pub struct Session<E: SynthEngine> {
    catalog: Catalog,
    config: AppConfig,
    rng: ChaCha8Rng,
    player: Player<E>,
    trace: Option<TraceWriter>,

    artist_id: Option<String>,
    arrangements: Vec<Arrangement>,
    song: Option<SongArrangement>,
    fixed: Option<(Performance, u8)>,
    focus: Focus,
    selected: Option<usize>,

    tempo_override: Option<u32>,
    swing_override: Option<f64>,
    playback: PlaybackOptions,

    is_playing: bool,
    playhead: Option<usize>,
    audio: AudioStatus,
}

impl<E: SynthEngine> Session<E> {
    /// # Arguments
    /// * `catalog` - Loaded once and only read afterwards
    /// * `config` - Generator, playback and export defaults
    /// * `engine` - Synth engine playback drives
    /// * `seed` - Fixed seed for reproducible sessions; `None` seeds from entropy
    pub fn new(catalog: Catalog, config: AppConfig, engine: E, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let trace = config
            .export
            .trace
            .then(|| TraceWriter::in_dir(&config.export.export_dir()));

        Session {
            catalog,
            playback: config.playback,
            config,
            rng,
            player: Player::new(engine),
            trace,
            artist_id: None,
            arrangements: Vec::new(),
            song: None,
            fixed: None,
            focus: Focus::Variations,
            selected: None,
            tempo_override: None,
            swing_override: None,
            is_playing: false,
            playhead: None,
            audio: AudioStatus::Uninitialized,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn arrangements(&self) -> &[Arrangement] {
        &self.arrangements
    }

    pub fn song(&self) -> Option<&SongArrangement> {
        self.song.as_ref()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_arrangement(&self) -> Option<&Arrangement> {
        self.selected.and_then(|i| self.arrangements.get(i))
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Chord slot currently sounding, if playing
    pub fn playhead(&self) -> Option<usize> {
        self.playhead
    }

    pub fn audio_status(&self) -> &AudioStatus {
        &self.audio
    }

    pub fn playback_options(&self) -> &PlaybackOptions {
        &self.playback
    }

    pub fn engine(&self) -> &E {
        self.player.engine()
    }

    pub fn engine_mut(&mut self) -> &mut E {
        self.player.engine_mut()
    }

    fn artist(&self, id: &str) -> Result<&ArtistStyle, SessionError> {
        self.catalog
            .artist(id)
            .ok_or_else(|| SessionError::UnknownArtist(id.to_string()))
    }

    /// Replace the arrangement batch
    ///
    /// Playback of the old batch is stopped before anything is replaced.
    /// The first new arrangement becomes the selection.
    pub fn generate(
        &mut self,
        artist_id: Option<&str>,
        progression: ProgressionSource,
        key: u8,
        variation_level: Option<f64>,
    ) -> Result<&[Arrangement], SessionError> {
        let mut options = self.config.generator.options();
        let canonical_id = match artist_id {
            Some(id) => {
                let artist = self.artist(id)?;
                options = options.with_artist(artist);
                Some(artist.id.clone())
            }
            None => None,
        };
        if variation_level.is_some() {
            options.variation_level = variation_level;
        }

        self.stop();

        let arrangements =
            generate_variations(&self.catalog, &progression, key, &options, &mut self.rng);

        self.trace_entry(
            TraceEntry::new(
                Stage::Generate,
                1.0,
                format!("Generated {} arrangements", arrangements.len()),
            )
            .with_data(serde_json::json!({
                "artist": canonical_id,
                "key": note_name(key % 12),
                "progression": progression.tokens(),
                "ids": arrangements.iter().map(|a| a.id.to_string()).collect::<Vec<_>>(),
            })),
        );

        self.artist_id = canonical_id;
        self.selected = (!arrangements.is_empty()).then_some(0);
        self.arrangements = arrangements;
        self.focus = Focus::Variations;
        Ok(&self.arrangements)
    }

    /// Generate a full song for an artist and focus it
    pub fn generate_song(
        &mut self,
        artist_id: &str,
        transpose: i32,
    ) -> Result<&SongArrangement, SessionError> {
        let octave = self.config.generator.octave;
        let artist = self.artist(artist_id)?.clone();

        self.stop();

        let song = generate_song_arrangement(&artist, transpose, octave, &mut self.rng);

        self.trace_entry(
            TraceEntry::new(
                Stage::Song,
                1.0,
                format!("{} for {}", song.structure, song.artist),
            )
            .with_data(serde_json::json!({
                "tempo": song.tempo,
                "bars": song.total_bars,
                "duration": song.duration_formatted,
            })),
        );

        self.artist_id = Some(artist.id);
        self.focus = Focus::Song;
        Ok(self.song.insert(song))
    }

    /// Load a progression to play exactly as written
    ///
    /// Chords get the two-handed keyboard voicing, transposed up by `key`,
    /// and comp on beats 1 and 3. Tempo defaults to the low end of the
    /// artist's range (or the configured range), swing to the artist's.
    pub fn use_progression(
        &mut self,
        artist_id: Option<&str>,
        chords: &[String],
        key: u8,
        tempo: Option<u32>,
    ) -> Result<&Performance, SessionError> {
        let octave = self.config.generator.octave;
        let (artist_id, title, default_tempo, swing) = match artist_id {
            Some(id) => {
                let artist = self.artist(id)?;
                (Some(artist.id.clone()), artist.name.clone(), artist.tempo_range.0, artist.swing)
            }
            None => (None, "Progression".to_string(), self.config.generator.tempo_range.0, 0.0),
        };

        self.stop();

        let key = key % 12;
        let voiced = chords
            .iter()
            .map(|name| Chord::split_hand(name, octave).transposed(key as i32))
            .collect();
        let performance =
            Performance::from_chords(&title, voiced, tempo.unwrap_or(default_tempo), swing);

        log::info!(
            "Loaded {} chord progression in {} at {} BPM",
            chords.len(),
            note_name(key),
            performance.tempo
        );

        self.artist_id = artist_id;
        self.focus = Focus::Progression;
        let (performance, _) = self.fixed.insert((performance, key));
        Ok(performance)
    }

    /// Select an arrangement from the current batch
    pub fn select(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.arrangements.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: self.arrangements.len(),
            });
        }
        if self.selected != Some(index) {
            self.stop();
        }
        self.selected = Some(index);
        self.focus = Focus::Variations;
        Ok(())
    }

    /// Switch between the variation batch and the song
    pub fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            self.stop();
            self.focus = focus;
        }
    }

    /// Override the arrangement tempo for play and export
    pub fn set_tempo(&mut self, tempo: Option<u32>) {
        self.tempo_override = tempo.map(|t| t.clamp(20, 300));
    }

    pub fn set_swing(&mut self, swing: Option<f64>) {
        self.swing_override = swing.map(|s| s.clamp(0.0, 1.0));
    }

    pub fn set_reverb(&mut self, amount: f64) {
        self.playback.reverb = amount.clamp(0.0, 1.0);
    }

    pub fn set_humanize(&mut self, enabled: bool) {
        self.playback.humanizer.enabled = enabled;
    }

    /// # Returns
    /// Whether the instrument name was recognized
    pub fn set_instrument(&mut self, instrument: &str, enabled: bool) -> bool {
        self.playback.instruments.set(instrument, enabled)
    }

    fn drum_style(&self) -> DrumStyle {
        self.artist_id
            .as_deref()
            .and_then(|id| self.catalog.artist(id))
            .map(|a| a.drum_style)
            .unwrap_or(DrumStyle::TrapSoul)
    }

    /// The focused arrangement or song as a performance, with overrides applied
    pub fn performance(&self) -> Option<Performance> {
        let mut performance = match self.focus {
            Focus::Song => Performance::from_song(self.song.as_ref()?),
            Focus::Progression => self.fixed.as_ref()?.0.clone(),
            Focus::Variations => {
                Performance::from_arrangement(self.selected_arrangement()?, self.drum_style().pattern())
            }
        };
        if let Some(tempo) = self.tempo_override {
            performance.tempo = tempo;
        }
        if let Some(swing) = self.swing_override {
            performance.swing = swing;
        }
        Some(performance)
    }

    /// Bring up the audio context
    ///
    /// Failure is kept as `AudioStatus::NotReady` and returned; generation
    /// and export keep working either way.
    pub fn activate_audio(&mut self) -> Result<(), SessionError> {
        match self.player.activate() {
            Ok(()) => {
                self.audio = AudioStatus::Ready;
                Ok(())
            }
            Err(e) => {
                let reason = e.to_string();
                log::warn!("Audio activation failed: {}", reason);
                self.audio = AudioStatus::NotReady(reason.clone());
                Err(SessionError::AudioNotReady(reason))
            }
        }
    }

    /// Schedule the focused performance and start playing
    ///
    /// # Returns
    /// Total playback length in seconds
    pub fn play(&mut self) -> Result<f64, SessionError> {
        let performance = self.performance().ok_or(SessionError::NoArrangement)?;

        if self.audio != AudioStatus::Ready {
            self.activate_audio()?;
        }

        let schedule = build_schedule(&performance, &self.playback, &mut self.rng);
        let total = match self.player.schedule(&schedule) {
            Ok(total) => total,
            Err(EngineError::NotReady(reason)) => {
                self.audio = AudioStatus::NotReady(reason.clone());
                self.is_playing = false;
                self.playhead = None;
                return Err(SessionError::AudioNotReady(reason));
            }
            Err(e) => {
                self.is_playing = false;
                self.playhead = None;
                return Err(SessionError::Engine(e));
            }
        };

        self.is_playing = true;
        self.playhead = None;
        log::info!("Playing '{}' ({:.1}s)", performance.title, total);
        Ok(total)
    }

    /// Silence everything and reset the playhead
    pub fn stop(&mut self) {
        if self.is_playing || self.player.is_scheduled() {
            self.player.stop();
            log::debug!("Playback stopped");
        }
        self.is_playing = false;
        self.playhead = None;
    }

    /// # Returns
    /// Whether playback is running afterwards
    pub fn toggle_play(&mut self) -> Result<bool, SessionError> {
        if self.is_playing {
            self.stop();
            Ok(false)
        } else {
            self.play()?;
            Ok(true)
        }
    }

    /// Apply a cue the engine fired
    pub fn handle_cue(&mut self, cue: Cue) {
        if !self.is_playing {
            return;
        }
        match cue {
            Cue::ChordChange { index } => self.playhead = Some(index),
            Cue::Finished => self.stop(),
        }
    }

    fn export_names(&self) -> (String, u8, Option<usize>) {
        let artist = self
            .artist_id
            .clone()
            .unwrap_or_else(|| DEFAULT_ARTIST_SLUG.to_string());
        match self.focus {
            Focus::Song => {
                let key = self
                    .song
                    .as_ref()
                    .map(|s| s.transpose.rem_euclid(12) as u8)
                    .unwrap_or(0);
                (artist, key, None)
            }
            Focus::Progression => {
                let key = self.fixed.as_ref().map(|(_, key)| *key).unwrap_or(0);
                (artist, key, None)
            }
            Focus::Variations => {
                let key = self.selected_arrangement().map(|a| a.key).unwrap_or(0);
                (artist, key, self.selected.map(|i| i + 1))
            }
        }
    }

    /// Render the focused performance to MIDI bytes
    ///
    /// Works without audio. With nothing generated the result is a minimal
    /// valid file with no notes.
    pub fn export(&self, export_type: ExportType) -> Result<ExportArtifact, SessionError> {
        let (artist, key, variation) = self.export_names();

        let (bytes, tempo) = match self.performance() {
            Some(performance) => (midi::export_performance(&performance, export_type)?, performance.tempo),
            None => {
                let tempo = self.tempo_override.unwrap_or(self.config.generator.tempo_range.0);
                (midi::export_midi(&[], tempo as f64, "quietstorm"), tempo)
            }
        };

        Ok(ExportArtifact {
            filename: midi::export_filename(&artist, export_type, key, tempo, variation),
            export_type,
            sha256: storage::calculate_sha256(&bytes),
            bytes,
        })
    }

    /// Export and write the file into the configured export directory
    pub fn save_export(&self, export_type: ExportType) -> Result<StoredExport, SessionError> {
        let artifact = self.export(export_type)?;
        let stored = storage::store_export(
            &self.config.export.export_dir(),
            &artifact.filename,
            &artifact.bytes,
        )?;

        self.trace_entry(
            TraceEntry::new(Stage::Export, 1.0, format!("Exported {}", artifact.filename))
                .with_data(serde_json::json!({
                    "type": export_type.to_string(),
                    "path": stored.path,
                    "sha256": stored.sha256,
                    "bytes": stored.size,
                })),
        );
        Ok(stored)
    }

    fn trace_entry(&self, entry: TraceEntry) {
        if let Some(writer) = &self.trace {
            if let Err(e) = writer.write(&entry) {
                log::warn!("Failed to write trace to {}: {}", writer.path().display(), e);
            }
        }
    }
}
