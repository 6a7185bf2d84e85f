// Player - Owns the engine handle and one scheduled run at a time
// Scheduling replaces any previous run; stop is all-or-nothing

use super::engine::{Effect, EngineError, SynthEngine};
use super::schedule::Schedule;

pub struct Player<E: SynthEngine> {
    engine: E,
    scheduled: bool,
}

impl<E: SynthEngine> Player<E> {
    pub fn new(engine: E) -> Self {
        Player {
            engine,
            scheduled: false,
        }
    }

    pub fn activate(&mut self) -> Result<(), EngineError> {
        self.engine.activate()
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Hand a schedule to the engine and start the transport
    ///
    /// A run already in progress is fully stopped first. If the engine
    /// rejects part of the batch, everything handed over so far is
    /// cancelled again before the error is returned.
    ///
    /// # Returns
    /// Total playback length in seconds
    pub fn schedule(&mut self, schedule: &Schedule) -> Result<f64, EngineError> {
        if self.scheduled {
            self.stop();
        }

        self.engine.set_tempo(schedule.tempo as f64);
        self.engine.set_effect_wetness(Effect::Reverb, schedule.reverb);

        if let Err(e) = self.engine.schedule_batch(&schedule.tasks) {
            log::warn!("Engine rejected schedule: {}", e);
            self.stop();
            return Err(e);
        }

        self.engine.start_transport();
        self.scheduled = true;

        log::info!(
            "Scheduled {} notes over {:.2}s at {} BPM",
            schedule.note_count(),
            schedule.total_seconds,
            schedule.tempo
        );
        Ok(schedule.total_seconds)
    }

    /// Cancel pending tasks, release sounding voices and rewind the transport
    pub fn stop(&mut self) {
        self.engine.cancel_all_scheduled();
        self.engine.stop_and_release_all();
        self.engine.reset_transport();
        self.scheduled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arranger::chord::Chord;
    use crate::arranger::performance::Performance;
    use crate::playback::engine::{Cue, OfflineEngine};
    use crate::playback::schedule::{build_schedule, PlaybackOptions};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn schedule() -> Schedule {
        let chords = vec![Chord::split_hand("Cmaj7", 3), Chord::split_hand("G7", 3)];
        let performance = Performance::from_chords("Test", chords, 90, 0.1);
        build_schedule(
            &performance,
            &PlaybackOptions::default(),
            &mut ChaCha8Rng::seed_from_u64(9),
        )
    }

    #[test]
    fn test_schedule_configures_engine() {
        let mut player = Player::new(OfflineEngine::new());
        let schedule = schedule();

        let total = player.schedule(&schedule).unwrap();

        assert!((total - 8.0 * 60.0 / 90.0).abs() < 1e-9);
        assert!(player.is_scheduled());
        let engine = player.engine();
        assert_eq!(engine.tempo, 90.0);
        assert_eq!(engine.wetness.get(&Effect::Reverb), Some(&0.3));
        assert_eq!(engine.pending_notes.len(), schedule.note_count());
        assert!(engine.running);
    }

    #[test]
    fn test_schedule_is_idempotent() {
        let mut player = Player::new(OfflineEngine::new());
        let schedule = schedule();

        player.schedule(&schedule).unwrap();
        player.schedule(&schedule).unwrap();

        // Second run replaced the first instead of stacking on it
        assert_eq!(player.engine().pending_notes.len(), schedule.note_count());
        assert_eq!(player.engine().pending_cues.len(), 3);
        assert_eq!(player.engine().releases, 1);
    }

    #[test]
    fn test_stop_clears_everything() {
        let mut player = Player::new(OfflineEngine::new());
        player.schedule(&schedule()).unwrap();

        let cues = player.engine_mut().advance_to(1.0);
        assert_eq!(cues, vec![Cue::ChordChange { index: 0 }]);
        assert!(!player.engine().sounding.is_empty());

        player.stop();

        let engine = player.engine();
        assert!(engine.is_silent());
        assert!(!engine.running);
        assert_eq!(engine.position, 0.0);
        assert!(!player.is_scheduled());
    }
}
