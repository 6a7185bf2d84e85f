// Arranger - Chords, variations, songs and MIDI export
// Turns catalog progressions into performances that play or export

pub mod chord;
pub mod melody;
pub mod midi;
pub mod patterns;
pub mod performance;
pub mod song;
pub mod variations;
pub mod voicing;

// Re-export main types
pub use chord::Chord;
pub use melody::{generate_melody, Melody, MelodyStyle};
pub use midi::{
    export_filename, export_midi, export_performance, validate_midi, ExportError, ExportType,
    NoteEvent,
};
pub use patterns::{BassPattern, ChordRhythm, DrumPattern, DrumStyle, StyleBass, CHORD_SPAN_BEATS};
pub use performance::{ChordSlot, Layer, PerformedNote, Performance};
pub use song::{generate_song_arrangement, Section, SectionType, SongArrangement, SongForm};
pub use variations::{generate_variations, Arrangement, GeneratorOptions, ProgressionSource};
pub use voicing::Voicing;
