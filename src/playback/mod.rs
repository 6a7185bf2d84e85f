// Playback - Scheduling performances onto an injected synth engine
// Pure schedule building, engine trait, and the player that drives it

pub mod engine;
pub mod player;
pub mod schedule;

pub use engine::{Cue, Effect, EngineError, OfflineEngine, SynthEngine, TriggeredNote};
pub use player::Player;
pub use schedule::{
    build_schedule, Action, InstrumentToggles, PlaybackOptions, Schedule, ScheduledTask,
    MAX_REVERB,
};
