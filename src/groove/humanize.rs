// Humanize - Micro-timing and velocity jitter
// Every event rolls its own offsets; nothing is shared between hits

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arranger::performance::Layer;

/// Velocity floor after jitter so hits never vanish
pub const MIN_HUMANIZED_VELOCITY: u8 = 40;
pub const MAX_VELOCITY: u8 = 127;

/// Humanization settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Humanizer {
    /// Disable to get a mechanical, fully repeatable schedule
    pub enabled: bool,

    /// Maximum velocity change either way
    pub velocity_jitter: u8,
}

impl Default for Humanizer {
    fn default() -> Self {
        Humanizer {
            enabled: true,
            velocity_jitter: 15,
        }
    }
}

impl Humanizer {
    pub fn off() -> Self {
        Humanizer {
            enabled: false,
            ..Default::default()
        }
    }

    /// Half-range of timing jitter for a layer, in milliseconds
    pub fn timing_bound_ms(layer: Layer) -> f64 {
        match layer {
            Layer::Chords | Layer::LeftHand => 5.0,
            Layer::Pad | Layer::Strings => 10.0,
            Layer::Guitar => 6.0,
            Layer::Bass => 4.0,
            Layer::Melody => 8.0,
            Layer::Kick => 2.5,
            Layer::Snare => 4.0,
            Layer::HiHat | Layer::OpenHat => 3.0,
        }
    }

    /// Random timing offset in seconds, uniform in +/- the layer bound
    pub fn timing_offset<R: Rng + ?Sized>(&self, layer: Layer, rng: &mut R) -> f64 {
        if !self.enabled {
            return 0.0;
        }
        let bound = Self::timing_bound_ms(layer);
        rng.gen_range(-bound..=bound) / 1000.0
    }

    /// Jittered velocity clamped to [40, 127]
    ///
    /// With humanization off the velocity passes through unchanged.
    pub fn velocity<R: Rng + ?Sized>(&self, velocity: u8, rng: &mut R) -> u8 {
        if !self.enabled {
            return velocity;
        }
        let jitter = self.velocity_jitter as i32;
        let offset = if jitter == 0 {
            0
        } else {
            rng.gen_range(-jitter..=jitter)
        };
        (velocity as i32 + offset).clamp(MIN_HUMANIZED_VELOCITY as i32, MAX_VELOCITY as i32) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_timing_within_layer_bounds() {
        let humanizer = Humanizer::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        for layer in Layer::ALL {
            let bound = Humanizer::timing_bound_ms(layer) / 1000.0;
            for _ in 0..200 {
                let offset = humanizer.timing_offset(layer, &mut rng);
                assert!(offset.abs() <= bound + 1e-12, "{:?} {}", layer, offset);
            }
        }
    }

    #[test]
    fn test_velocity_clamped() {
        let humanizer = Humanizer::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        for _ in 0..500 {
            let low = humanizer.velocity(45, &mut rng);
            let high = humanizer.velocity(125, &mut rng);
            assert!((40..=60).contains(&low));
            assert!((110..=127).contains(&high));
        }
    }

    #[test]
    fn test_rerolled_per_event() {
        let humanizer = Humanizer::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let velocities: Vec<u8> = (0..32).map(|_| humanizer.velocity(80, &mut rng)).collect();
        assert!(velocities.iter().any(|&v| v != velocities[0]));
    }

    #[test]
    fn test_off_is_identity() {
        let humanizer = Humanizer::off();
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        assert_eq!(humanizer.timing_offset(Layer::Pad, &mut rng), 0.0);
        assert_eq!(humanizer.velocity(12, &mut rng), 12);
    }
}
