// Note Names - Pitch classes, octaves and MIDI note naming
// Middle C is MIDI 60 (C4); octave = floor(midi / 12) - 1

/// A MIDI pitch. Kept signed and unbounded while chords are built and
/// transposed; clamped into 0-127 only when written to a file.
pub type Pitch = i32;

/// The 12 pitch-class names, indexed from C
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Pitch class (0-11) of a MIDI pitch
pub fn pitch_class(midi: Pitch) -> u8 {
    midi.rem_euclid(12) as u8
}

/// Octave number of a MIDI pitch (60 -> 4)
pub fn octave_of(midi: Pitch) -> i32 {
    midi.div_euclid(12) - 1
}

/// Name of a pitch class, using sharps
pub fn note_name(pitch_class: u8) -> &'static str {
    NOTE_NAMES[(pitch_class % 12) as usize]
}

/// MIDI pitch of a pitch class placed in an octave (C3 = 48)
pub fn root_midi(pitch_class: u8, octave: i32) -> Pitch {
    (octave + 1) * 12 + (pitch_class % 12) as Pitch
}

/// Clamp a pitch into the valid MIDI range
pub fn clamp_midi(midi: Pitch) -> u8 {
    midi.clamp(0, 127) as u8
}

/// Convert a MIDI pitch to a note name with octave (e.g. 61 -> "C#4")
pub fn midi_to_note_name(midi: Pitch) -> String {
    format!("{}{}", note_name(pitch_class(midi)), octave_of(midi))
}

/// Parse a note letter with optional accidental at the start of `input`
///
/// Flats are normalized by taking the natural note's index and stepping
/// down one semitone, so "Db" and "C#" both give 1 and "Cb" gives 11.
///
/// # Returns
/// The pitch class and the number of bytes consumed
pub fn parse_pitch_class(input: &str) -> Option<(u8, usize)> {
    let mut chars = input.chars();
    let natural: i32 = match chars.next()? {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };

    match chars.next() {
        Some('#') => Some(((natural + 1).rem_euclid(12) as u8, 2)),
        Some('b') => Some(((natural - 1).rem_euclid(12) as u8, 2)),
        _ => Some((natural as u8, 1)),
    }
}

/// Convert a note name with octave to a MIDI pitch ("C4" -> 60, "Bb2" -> 46)
pub fn note_name_to_midi(name: &str) -> Option<Pitch> {
    let (pc, consumed) = parse_pitch_class(name)?;
    let octave: i32 = name[consumed..].parse().ok()?;
    let midi = root_midi(pc, octave);

    if (0..=127).contains(&midi) {
        Some(midi)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_class_and_octave() {
        assert_eq!(pitch_class(60), 0);
        assert_eq!(pitch_class(61), 1);
        assert_eq!(octave_of(60), 4);
        assert_eq!(octave_of(48), 3);
        assert_eq!(octave_of(0), -1);

        // Negative pitches still map into 0-11
        assert_eq!(pitch_class(-1), 11);
    }

    #[test]
    fn test_root_midi() {
        assert_eq!(root_midi(0, 3), 48); // C3
        assert_eq!(root_midi(9, 3), 57); // A3
        assert_eq!(root_midi(0, 4), 60); // Middle C
    }

    #[test]
    fn test_midi_to_note_name() {
        assert_eq!(midi_to_note_name(60), "C4");
        assert_eq!(midi_to_note_name(64), "E4");
        assert_eq!(midi_to_note_name(70), "A#4");
        assert_eq!(midi_to_note_name(21), "A0");
    }

    #[test]
    fn test_parse_pitch_class_accidentals() {
        assert_eq!(parse_pitch_class("C"), Some((0, 1)));
        assert_eq!(parse_pitch_class("F#m9"), Some((6, 2)));
        assert_eq!(parse_pitch_class("Ebmaj7"), Some((3, 2)));
        assert_eq!(parse_pitch_class("Cb"), Some((11, 2)));
        assert_eq!(parse_pitch_class("H"), None);
        assert_eq!(parse_pitch_class(""), None);
    }

    #[test]
    fn test_note_name_to_midi() {
        assert_eq!(note_name_to_midi("C4"), Some(60));
        assert_eq!(note_name_to_midi("Bb2"), Some(46));
        assert_eq!(note_name_to_midi("C-1"), Some(0));
        assert_eq!(note_name_to_midi("C"), None);
        assert_eq!(note_name_to_midi("G9"), Some(127));
        assert_eq!(note_name_to_midi("A9"), None);
    }

    #[test]
    fn test_clamp_midi() {
        assert_eq!(clamp_midi(-5), 0);
        assert_eq!(clamp_midi(64), 64);
        assert_eq!(clamp_midi(140), 127);
    }
}
