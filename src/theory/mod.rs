// Theory - Static music-theory tables
// Note names, chord qualities, scales and chord/numeral parsing

pub mod chords;
pub mod notes;
pub mod parse;
pub mod scales;

// Re-export main types
pub use chords::{ChordQuality, ChordType, CHORD_TYPES};
pub use notes::{
    clamp_midi, midi_to_note_name, note_name, note_name_to_midi, octave_of, pitch_class,
    root_midi, Pitch, NOTE_NAMES,
};
pub use parse::{
    parse_chord_name, parse_chord_name_or_default, resolve_numeral, resolve_numeral_or_default,
    ChordSymbol, ParseError,
};
pub use scales::{scale_pitch_classes, ScaleKind};
