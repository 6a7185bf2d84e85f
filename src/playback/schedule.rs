// Schedule - Flat timeline of playback tasks
// Built up front from a performance, then handed to the engine in one batch

use std::cmp::Ordering;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arranger::performance::{Layer, Performance};
use crate::groove::{Humanizer, SwingRule};
use crate::theory::Pitch;
use super::engine::Cue;

/// Reverb wetness ceiling for playback
pub const MAX_REVERB: f64 = 0.6;

/// Melody swing threshold, matching the chord rhythms
const MELODY_SWING_THRESHOLD: f64 = 0.3;

/// Hi-hats swing on the "and" at a fraction of the chord swing
const HIHAT_SWING_FACTOR: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Action {
    /// `duration` is in seconds, `velocity` 0-127
    Note {
        voice: Layer,
        pitch: Pitch,
        duration: f64,
        velocity: u8,
    },
    Cue(Cue),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Seconds from transport start
    pub time: f64,
    pub action: Action,
}

/// Instrument on/off switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentToggles {
    pub chords: bool,
    pub pad: bool,
    pub strings: bool,
    pub guitar: bool,
    pub bass: bool,
    pub melody: bool,
    pub drums: bool,
}

impl Default for InstrumentToggles {
    fn default() -> Self {
        InstrumentToggles {
            chords: true,
            pad: true,
            strings: true,
            guitar: true,
            bass: true,
            melody: true,
            drums: true,
        }
    }
}

impl InstrumentToggles {
    /// Flip one instrument by name; unknown names change nothing
    ///
    /// # Returns
    /// Whether the name was recognized
    pub fn set(&mut self, instrument: &str, enabled: bool) -> bool {
        let slot = match instrument.to_ascii_lowercase().as_str() {
            "chords" | "piano" | "keys" => &mut self.chords,
            "pad" => &mut self.pad,
            "strings" => &mut self.strings,
            "guitar" => &mut self.guitar,
            "bass" => &mut self.bass,
            "melody" | "lead" => &mut self.melody,
            "drums" => &mut self.drums,
            _ => {
                log::warn!("Unknown instrument '{}', ignoring toggle", instrument);
                return false;
            }
        };
        *slot = enabled;
        true
    }

    /// Layers that sound, in slot order
    pub fn layers(&self) -> Vec<Layer> {
        let mut layers = Vec::new();
        if self.chords {
            layers.extend([Layer::Chords, Layer::LeftHand]);
        }
        if self.pad {
            layers.push(Layer::Pad);
        }
        if self.strings {
            layers.push(Layer::Strings);
        }
        if self.guitar {
            layers.push(Layer::Guitar);
        }
        if self.bass {
            layers.push(Layer::Bass);
        }
        if self.melody {
            layers.push(Layer::Melody);
        }
        if self.drums {
            layers.extend(Layer::DRUMS);
        }
        layers
    }
}

/// Playback settings chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackOptions {
    pub instruments: InstrumentToggles,
    pub humanizer: Humanizer,
    pub reverb: f64,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        PlaybackOptions {
            instruments: InstrumentToggles::default(),
            humanizer: Humanizer::default(),
            reverb: 0.3,
        }
    }
}

/// Everything the engine needs for one playback run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    pub tempo: u32,
    pub reverb: f64,
    pub total_seconds: f64,
    /// Sorted by time; ties keep build order
    pub tasks: Vec<ScheduledTask>,
}

impl Schedule {
    pub fn note_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| matches!(t.action, Action::Note { .. }))
            .count()
    }
}

/// Swing rule a layer plays with
pub fn swing_rule(layer: Layer, performance: &Performance) -> SwingRule {
    match layer {
        Layer::Chords | Layer::LeftHand => SwingRule::off_beat(performance.chord_rhythm.swing_threshold),
        Layer::Bass => SwingRule::off_beat(performance.bass_pattern.swing_threshold),
        Layer::Melody => SwingRule::off_beat(MELODY_SWING_THRESHOLD),
        Layer::HiHat => SwingRule::AndOnly {
            factor: HIHAT_SWING_FACTOR,
        },
        Layer::Pad | Layer::Strings | Layer::Guitar | Layer::Kick | Layer::Snare | Layer::OpenHat => {
            SwingRule::Straight
        }
    }
}

/// Build the playback timeline for a performance
///
/// One cue per chord slot at its start, every enabled note with swing and
/// humanization applied, and a final `Finished` cue at the end.
///
/// # Arguments
/// * `performance` - What to play
/// * `options` - Instrument toggles, humanization and reverb
/// * `rng` - Source for humanization; rolled once per note
///
/// # Returns
/// Tasks sorted by time, plus total length in seconds
pub fn build_schedule<R: Rng + ?Sized>(
    performance: &Performance,
    options: &PlaybackOptions,
    rng: &mut R,
) -> Schedule {
    let seconds_per_beat = performance.seconds_per_beat();
    let total_seconds = performance.total_seconds();
    let mut tasks = Vec::new();

    for (index, slot) in performance.slots.iter().enumerate() {
        tasks.push(ScheduledTask {
            time: slot.start_beat * seconds_per_beat,
            action: Action::Cue(Cue::ChordChange { index }),
        });
    }

    let layers = options.instruments.layers();
    for note in performance.notes(&layers) {
        let swing = swing_rule(note.layer, performance).offset_seconds(
            note.offset,
            performance.swing,
            seconds_per_beat,
        );
        let jitter = options.humanizer.timing_offset(note.layer, rng);

        tasks.push(ScheduledTask {
            time: (note.start * seconds_per_beat + swing + jitter).max(0.0),
            action: Action::Note {
                voice: note.layer,
                pitch: note.pitch,
                duration: note.duration * seconds_per_beat,
                velocity: options.humanizer.velocity(note.velocity, rng),
            },
        });
    }

    tasks.push(ScheduledTask {
        time: total_seconds,
        action: Action::Cue(Cue::Finished),
    });

    tasks.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(Ordering::Equal));

    log::debug!(
        "Built schedule for '{}': {} tasks over {:.2}s",
        performance.title,
        tasks.len(),
        total_seconds
    );

    Schedule {
        tempo: performance.tempo,
        reverb: options.reverb.clamp(0.0, MAX_REVERB),
        total_seconds,
        tasks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arranger::chord::Chord;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn performance(swing: f64) -> Performance {
        let chords = ["Cmaj7", "Am7", "Fmaj7", "G7"]
            .iter()
            .map(|name| Chord::split_hand(name, 3))
            .collect();
        Performance::from_chords("Test", chords, 120, swing)
    }

    fn mechanical() -> PlaybackOptions {
        PlaybackOptions {
            humanizer: Humanizer::off(),
            ..Default::default()
        }
    }

    fn note_times(schedule: &Schedule, layer: Layer) -> Vec<f64> {
        schedule
            .tasks
            .iter()
            .filter_map(|t| match t.action {
                Action::Note { voice, .. } if voice == layer => Some(t.time),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_cues_per_chord_and_finish() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let schedule = build_schedule(&performance(0.0), &mechanical(), &mut rng);

        let cues: Vec<(f64, Cue)> = schedule
            .tasks
            .iter()
            .filter_map(|t| match t.action {
                Action::Cue(cue) => Some((t.time, cue)),
                _ => None,
            })
            .collect();

        // 0.5s per beat, 4 beats per chord
        assert_eq!(cues[0], (0.0, Cue::ChordChange { index: 0 }));
        assert_eq!(cues[3], (6.0, Cue::ChordChange { index: 3 }));
        assert_eq!(cues.last(), Some(&(8.0, Cue::Finished)));
        assert_eq!(schedule.total_seconds, 8.0);
    }

    #[test]
    fn test_tasks_sorted() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let schedule = build_schedule(&performance(0.2), &PlaybackOptions::default(), &mut rng);
        assert!(schedule.tasks.windows(2).all(|w| w[0].time <= w[1].time));
        assert!(schedule.tasks.iter().all(|t| t.time >= 0.0));
    }

    #[test]
    fn test_swing_only_on_off_beats() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut perf = performance(0.2);
        perf.chord_rhythm = crate::arranger::patterns::chord_rhythms()
            .into_iter()
            .find(|r| r.name == "Syncopated")
            .unwrap();
        let schedule = build_schedule(&perf, &mechanical(), &mut rng);

        let chords = note_times(&schedule, Layer::Chords);
        // Hits at 0, 1.5 and 2.5 beats; the last two are swung by 0.2 * 0.5s
        assert_eq!(chords[0], 0.0);
        assert!(chords.contains(&(1.5 * 0.5 + 0.1)));
        assert!(chords.contains(&(2.5 * 0.5 + 0.1)));
    }

    #[test]
    fn test_hihat_swings_less() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let schedule = build_schedule(&performance(0.2), &mechanical(), &mut rng);

        let hats = note_times(&schedule, Layer::HiHat);
        // Sixteenths: the "and" at 0.5 beats gets 0.3 of the swing
        assert!(hats.iter().any(|&t| (t - (0.25 + 0.03)).abs() < 1e-9));
        // The "e" at 0.25 beats stays put
        assert!(hats.iter().any(|&t| (t - 0.125).abs() < 1e-9));
    }

    #[test]
    fn test_humanize_rerolls_each_note() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let schedule = build_schedule(&performance(0.0), &PlaybackOptions::default(), &mut rng);

        let velocities: Vec<u8> = schedule
            .tasks
            .iter()
            .filter_map(|t| match t.action {
                Action::Note { velocity, .. } => Some(velocity),
                _ => None,
            })
            .collect();
        assert!(velocities.iter().all(|v| (40..=127).contains(v)));
        assert!(velocities.iter().any(|&v| v != velocities[0]));

        // Kick jitter stays within 2.5 ms of the grid
        let kicks = note_times(&schedule, Layer::Kick);
        assert!((kicks[0] - 0.0).abs() <= 0.0025);
    }

    #[test]
    fn test_toggles_filter_layers() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut options = mechanical();
        options.instruments = InstrumentToggles {
            chords: false,
            pad: false,
            strings: false,
            guitar: false,
            bass: true,
            melody: false,
            drums: false,
        };
        let schedule = build_schedule(&performance(0.0), &options, &mut rng);

        assert!(schedule.tasks.iter().all(|t| match t.action {
            Action::Note { voice, .. } => voice == Layer::Bass,
            Action::Cue(_) => true,
        }));
        assert_eq!(schedule.note_count(), 8);
    }

    #[test]
    fn test_toggle_by_name() {
        let mut toggles = InstrumentToggles::default();
        assert!(toggles.set("Drums", false));
        assert!(!toggles.drums);
        assert!(!toggles.set("kazoo", false));
        assert!(!toggles.layers().contains(&Layer::Kick));
    }

    #[test]
    fn test_reverb_clamped() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let options = PlaybackOptions {
            reverb: 0.9,
            ..mechanical()
        };
        assert_eq!(build_schedule(&performance(0.0), &options, &mut rng).reverb, MAX_REVERB);
    }
}
