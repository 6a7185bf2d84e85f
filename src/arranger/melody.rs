// Melody Generator - Scale-degree random walk over one chord span
// Style presets tune step, leap and rest behaviour

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::theory::{scale_pitch_classes, Pitch, ScaleKind};
use super::chord::Chord;
use super::patterns::CHORD_SPAN_BEATS;

/// Middle C; degree 0 of the walk sits in this octave
const MELODY_BASE: Pitch = 60;

/// Durations the beat cursor advances by after each note
const NOTE_DURATIONS: [f64; 5] = [0.25, 0.33, 0.5, 0.75, 1.0];

/// Gaps skipped on a rest
const REST_DURATIONS: [f64; 2] = [0.25, 0.5];

/// A single-chord melody: `notes[i]` starts at beat `rhythm[i]` of the chord
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Melody {
    pub notes: Vec<Pitch>,
    pub rhythm: Vec<f64>,
}

impl Melody {
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MelodyStyle {
    Balanced,
    Stepwise,
    Leapy,
    Rhythmic,
}

/// Walk parameters for a style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleParams {
    /// Probability of moving one degree instead of leaping
    pub step_chance: f64,
    /// Largest leap in scale degrees, either direction
    pub leap_max: i32,
    /// Probability of skipping time instead of emitting a note
    pub rest_chance: f64,
}

impl MelodyStyle {
    /// Cycle order used across a batch of arrangements
    pub const ALL: [MelodyStyle; 4] = [
        MelodyStyle::Balanced,
        MelodyStyle::Stepwise,
        MelodyStyle::Leapy,
        MelodyStyle::Rhythmic,
    ];

    pub fn from_string(s: &str) -> Self {
        match s {
            "balanced" => MelodyStyle::Balanced,
            "stepwise" => MelodyStyle::Stepwise,
            "leapy" => MelodyStyle::Leapy,
            "rhythmic" => MelodyStyle::Rhythmic,
            _ => MelodyStyle::Balanced, // Default
        }
    }

    pub fn to_string(&self) -> &'static str {
        match self {
            MelodyStyle::Balanced => "balanced",
            MelodyStyle::Stepwise => "stepwise",
            MelodyStyle::Leapy => "leapy",
            MelodyStyle::Rhythmic => "rhythmic",
        }
    }

    pub fn params(&self) -> StyleParams {
        match self {
            MelodyStyle::Balanced => StyleParams {
                step_chance: 0.6,
                leap_max: 3,
                rest_chance: 0.1,
            },
            MelodyStyle::Stepwise => StyleParams {
                step_chance: 0.85,
                leap_max: 2,
                rest_chance: 0.05,
            },
            MelodyStyle::Leapy => StyleParams {
                step_chance: 0.3,
                leap_max: 5,
                rest_chance: 0.15,
            },
            MelodyStyle::Rhythmic => StyleParams {
                step_chance: 0.5,
                leap_max: 3,
                rest_chance: 0.2,
            },
        }
    }
}

/// Generate a melody over one chord
///
/// # Arguments
/// * `chord` - Chord whose root anchors the scale
/// * `scale` - Scale laid over the root
/// * `length` - Maximum number of notes
/// * `style` - Walk preset
/// * `rng` - Random source
///
/// # Returns
/// Up to `length` notes, all starting before the end of the chord span
pub fn generate_melody<R: Rng + ?Sized>(
    chord: &Chord,
    scale: ScaleKind,
    length: usize,
    style: MelodyStyle,
    rng: &mut R,
) -> Melody {
    let pitch_classes = scale_pitch_classes(chord.root(), scale);
    let scale_len = pitch_classes.len() as i32;
    let params = style.params();

    let mut melody = Melody::default();
    let mut beat = 0.0;
    let mut index: i32 = rng.gen_range(0..=3);

    while melody.notes.len() < length && beat < CHORD_SPAN_BEATS {
        if rng.gen_bool(params.rest_chance) {
            beat += REST_DURATIONS.choose(rng).copied().unwrap_or(0.25);
            continue;
        }

        let next = if rng.gen_bool(params.step_chance) {
            if rng.gen_bool(0.5) {
                index + 1
            } else {
                index - 1
            }
        } else {
            index + rng.gen_range(-params.leap_max..=params.leap_max)
        };
        index = next.clamp(0, scale_len + 3);

        let degree = pitch_classes[(index % scale_len) as usize] as Pitch;
        melody.notes.push(MELODY_BASE + degree + 12 * (index / scale_len));
        melody.rhythm.push(beat);

        beat += NOTE_DURATIONS.choose(rng).copied().unwrap_or(0.5);
    }

    melody
}
