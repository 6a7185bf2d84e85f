// Swing - Off-beat delay rules
// Only off-beat subdivisions are delayed; on-beat hits never move

use serde::{Deserialize, Serialize};

/// Tolerance for deciding a beat offset sits exactly on the "and"
const AND_TOLERANCE: f64 = 1e-6;

/// When and how much a hit is swung
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "rule")]
pub enum SwingRule {
    /// Never swung
    Straight,

    /// Swung when the fractional part of the beat offset exceeds `threshold`
    OffBeat { threshold: f64, factor: f64 },

    /// Swung only on the eighth-note "and" (fraction 0.5)
    AndOnly { factor: f64 },
}

impl SwingRule {
    /// Chord-rhythm and melody rule
    pub fn off_beat(threshold: f64) -> Self {
        SwingRule::OffBeat {
            threshold,
            factor: 1.0,
        }
    }

    /// Whether a hit at `beat_offset` (within its chord span) is swung
    pub fn applies(&self, beat_offset: f64) -> bool {
        let frac = beat_offset.rem_euclid(1.0);
        match *self {
            SwingRule::Straight => false,
            SwingRule::OffBeat { threshold, .. } => frac > threshold,
            SwingRule::AndOnly { .. } => (frac - 0.5).abs() < AND_TOLERANCE,
        }
    }

    fn factor(&self) -> f64 {
        match *self {
            SwingRule::Straight => 0.0,
            SwingRule::OffBeat { factor, .. } | SwingRule::AndOnly { factor } => factor,
        }
    }

    /// Delay in seconds for a hit
    ///
    /// # Arguments
    /// * `beat_offset` - Hit position within its chord span, in beats
    /// * `swing` - Swing fraction of a beat [0.0, 1.0]
    /// * `seconds_per_beat` - 60 / BPM
    pub fn offset_seconds(&self, beat_offset: f64, swing: f64, seconds_per_beat: f64) -> f64 {
        if !self.applies(beat_offset) {
            return 0.0;
        }
        swing.clamp(0.0, 1.0) * seconds_per_beat * self.factor()
    }
}
