// Synth Engine - Injected audio collaborator
// Playback talks to sound only through this trait; OfflineEngine records calls

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::arranger::performance::Layer;
use crate::theory::midi_to_note_name;
use super::schedule::{Action, ScheduledTask};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Audio not ready: {0}")]
    NotReady(String),

    #[error("Engine rejected task at {at:.3}s: {reason}")]
    Rejected { at: f64, reason: String },
}

/// Effect sends the core can adjust
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Reverb,
}

/// Timed notifications the engine hands back to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "cue")]
pub enum Cue {
    /// Chord slot `index` starts sounding
    ChordChange { index: usize },
    /// Playback reached the end of the performance
    Finished,
}

/// External synthesis engine
///
/// Times are seconds on the engine's transport. The engine owns its clock
/// and fires cues back through whatever mechanism it drives; the core never
/// touches synthesis internals.
pub trait SynthEngine {
    /// Start the audio context; may fail until the platform allows audio
    fn activate(&mut self) -> Result<(), EngineError>;

    fn set_tempo(&mut self, bpm: f64);

    /// Set wet level [0.0, 1.0] of an effect send
    fn set_effect_wetness(&mut self, effect: Effect, amount: f64);

    /// Play `pitch` (e.g. "E4") on `voice` for `duration` seconds at `at`
    fn trigger_note(&mut self, voice: Layer, pitch: &str, duration: f64, at: f64, velocity: f64);

    fn schedule_callback(&mut self, cue: Cue, at: f64) -> Result<(), EngineError>;

    /// Hand over a whole sorted task list
    ///
    /// Engines with a native batch primitive override this; the default
    /// dispatches each task to `trigger_note` / `schedule_callback`.
    fn schedule_batch(&mut self, tasks: &[ScheduledTask]) -> Result<(), EngineError> {
        for task in tasks {
            match task.action {
                Action::Note {
                    voice,
                    pitch,
                    duration,
                    velocity,
                } => {
                    let name = midi_to_note_name(pitch);
                    self.trigger_note(voice, &name, duration, task.time, velocity as f64 / 127.0);
                }
                Action::Cue(cue) => self.schedule_callback(cue, task.time)?,
            }
        }
        Ok(())
    }

    fn start_transport(&mut self);

    /// Drop every callback and note that has not fired yet
    fn cancel_all_scheduled(&mut self);

    /// Force-release every sounding voice
    fn stop_and_release_all(&mut self);

    /// Stop the transport and rewind it to zero
    fn reset_transport(&mut self);
}

/// A note handed to the offline engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggeredNote {
    pub voice: Layer,
    pub pitch: String,
    pub duration: f64,
    pub at: f64,
    pub velocity: f64,
}

/// Engine without audio output
///
/// Keeps every call so tests and the CLI preview can inspect a schedule,
/// and advances a virtual clock on request.
#[derive(Debug, Default)]
pub struct OfflineEngine {
    /// Make `activate` fail, as a browser does before a user gesture
    pub refuse_activation: bool,
    pub active: bool,
    pub running: bool,
    pub position: f64,
    pub tempo: f64,
    pub wetness: HashMap<Effect, f64>,
    pub pending_notes: Vec<TriggeredNote>,
    pub pending_cues: Vec<(f64, Cue)>,
    pub sounding: Vec<TriggeredNote>,
    /// Every note ever triggered, including cancelled ones
    pub history: Vec<TriggeredNote>,
    pub releases: usize,
}

impl OfflineEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing() -> Self {
        OfflineEngine {
            refuse_activation: true,
            ..Default::default()
        }
    }

    /// Move the virtual clock to `time`, returning cues that fired on the way
    ///
    /// Notes whose start has passed move to `sounding`; notes that have
    /// also ended drop out.
    pub fn advance_to(&mut self, time: f64) -> Vec<Cue> {
        if !self.running {
            return Vec::new();
        }
        self.position = time;

        let (started, waiting): (Vec<_>, Vec<_>) =
            self.pending_notes.drain(..).partition(|n| n.at <= time);
        self.pending_notes = waiting;
        self.sounding.extend(started);
        self.sounding.retain(|n| n.at + n.duration > time);

        let mut fired = Vec::new();
        self.pending_cues.retain(|&(at, cue)| {
            if at <= time {
                fired.push((at, cue));
                false
            } else {
                true
            }
        });
        fired.sort_by(|a, b| a.0.total_cmp(&b.0));
        fired.into_iter().map(|(_, cue)| cue).collect()
    }

    pub fn is_silent(&self) -> bool {
        self.pending_notes.is_empty() && self.pending_cues.is_empty() && self.sounding.is_empty()
    }
}

impl SynthEngine for OfflineEngine {
    fn activate(&mut self) -> Result<(), EngineError> {
        if self.refuse_activation {
            return Err(EngineError::NotReady(
                "audio context requires a user gesture".to_string(),
            ));
        }
        self.active = true;
        Ok(())
    }

    fn set_tempo(&mut self, bpm: f64) {
        self.tempo = bpm;
    }

    fn set_effect_wetness(&mut self, effect: Effect, amount: f64) {
        self.wetness.insert(effect, amount);
    }

    fn trigger_note(&mut self, voice: Layer, pitch: &str, duration: f64, at: f64, velocity: f64) {
        let note = TriggeredNote {
            voice,
            pitch: pitch.to_string(),
            duration,
            at,
            velocity,
        };
        self.history.push(note.clone());
        self.pending_notes.push(note);
    }

    fn schedule_callback(&mut self, cue: Cue, at: f64) -> Result<(), EngineError> {
        if !at.is_finite() {
            return Err(EngineError::Rejected {
                at,
                reason: "time is not finite".to_string(),
            });
        }
        self.pending_cues.push((at, cue));
        Ok(())
    }

    fn start_transport(&mut self) {
        self.running = true;
    }

    fn cancel_all_scheduled(&mut self) {
        self.pending_notes.clear();
        self.pending_cues.clear();
    }

    fn stop_and_release_all(&mut self) {
        self.sounding.clear();
        self.releases += 1;
    }

    fn reset_transport(&mut self) {
        self.running = false;
        self.position = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(time: f64, action: Action) -> ScheduledTask {
        ScheduledTask { time, action }
    }

    #[test]
    fn test_default_batch_dispatch() {
        let mut engine = OfflineEngine::new();
        let tasks = vec![
            task(0.0, Action::Cue(Cue::ChordChange { index: 0 })),
            task(
                0.0,
                Action::Note {
                    voice: Layer::Chords,
                    pitch: 64,
                    duration: 1.0,
                    velocity: 127,
                },
            ),
            task(2.0, Action::Cue(Cue::Finished)),
        ];

        engine.schedule_batch(&tasks).unwrap();

        assert_eq!(engine.pending_notes.len(), 1);
        assert_eq!(engine.pending_notes[0].pitch, "E4");
        assert_eq!(engine.pending_notes[0].velocity, 1.0);
        assert_eq!(engine.pending_cues.len(), 2);
    }

    #[test]
    fn test_advance_fires_cues_in_order() {
        let mut engine = OfflineEngine::new();
        engine.schedule_callback(Cue::Finished, 4.0).unwrap();
        engine.schedule_callback(Cue::ChordChange { index: 1 }, 2.0).unwrap();
        engine.schedule_callback(Cue::ChordChange { index: 0 }, 0.0).unwrap();

        // Transport not started yet
        assert!(engine.advance_to(10.0).is_empty());

        engine.start_transport();
        assert_eq!(
            engine.advance_to(2.5),
            vec![Cue::ChordChange { index: 0 }, Cue::ChordChange { index: 1 }]
        );
        assert_eq!(engine.advance_to(5.0), vec![Cue::Finished]);
    }

    #[test]
    fn test_notes_sound_then_end() {
        let mut engine = OfflineEngine::new();
        engine.trigger_note(Layer::Bass, "C2", 1.0, 0.5, 0.8);
        engine.start_transport();

        engine.advance_to(1.0);
        assert_eq!(engine.sounding.len(), 1);
        engine.advance_to(2.0);
        assert!(engine.is_silent());
    }

    #[test]
    fn test_refused_activation() {
        let mut engine = OfflineEngine::refusing();
        assert!(matches!(engine.activate(), Err(EngineError::NotReady(_))));
        assert!(!engine.active);
    }

    #[test]
    fn test_rejects_non_finite_time() {
        let mut engine = OfflineEngine::new();
        assert!(engine.schedule_callback(Cue::Finished, f64::NAN).is_err());
    }
}
