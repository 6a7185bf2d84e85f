// Chord Instances - Concrete MIDI note sets built from chord symbols
// Instantiation (octave, inversion, voicing), split-hand voicing and transposition

use serde::{Deserialize, Serialize};

use crate::theory::{parse_chord_name_or_default, root_midi, ChordQuality, ChordSymbol, Pitch};
use super::voicing::Voicing;

/// A resolved chord. Never mutated in place: transposition and re-voicing
/// return new values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    /// Display name ("Fmaj9", or the symbol's own spelling)
    pub name: String,

    pub symbol: ChordSymbol,

    /// Voiced MIDI notes, ascending
    pub notes: Vec<Pitch>,

    /// Separate bass note played by the bass layer and the piano left hand
    pub bass_note: Option<Pitch>,

    /// Number of single-note octave promotions applied
    pub inversion: u8,

    pub voicing: Voicing,
}

impl Chord {
    /// Build a chord in an octave, then invert and voice it
    ///
    /// Steps run in a fixed order:
    /// 1. notes = root of `octave` + each interval
    /// 2. `inversion` times, raise the note at index `i mod len` an octave
    ///    (cumulative, so low notes can be raised more than once as `i` wraps)
    /// 3. sort ascending
    /// 4. apply the voicing
    ///
    /// The bass note sits an octave below the chord root.
    pub fn instantiate(symbol: ChordSymbol, octave: i32, inversion: u8, voicing: Voicing) -> Self {
        let root = root_midi(symbol.root, octave);
        let mut notes: Vec<Pitch> = symbol
            .quality
            .intervals()
            .iter()
            .map(|&interval| root + interval as Pitch)
            .collect();

        let len = notes.len();
        for i in 0..inversion as usize {
            notes[i % len] += 12;
        }
        notes.sort_unstable();

        Chord {
            name: symbol.name(),
            symbol,
            notes: voicing.apply(&notes),
            bass_note: Some(root - 12),
            inversion,
            voicing,
        }
    }

    /// Build a chord from a name in close position, keeping the name as written
    pub fn from_name(name: &str, octave: i32) -> Self {
        let symbol = parse_chord_name_or_default(name);
        Chord {
            name: name.to_string(),
            ..Chord::instantiate(symbol, octave, 0, Voicing::Close)
        }
    }

    /// Two-handed keyboard voicing used by the literal progression library
    ///
    /// The left hand (`bass_note`) plays the root in `octave`; the right hand
    /// (`notes`) stacks the remaining chord tones above the root one octave
    /// up. Cmaj7 in octave 3 gives bass 48 and notes 64, 67, 71.
    pub fn split_hand(name: &str, octave: i32) -> Self {
        let symbol = parse_chord_name_or_default(name);
        let left = root_midi(symbol.root, octave);
        let right_root = root_midi(symbol.root, octave + 1);

        let notes = symbol
            .quality
            .intervals()
            .iter()
            .skip(1)
            .map(|&interval| right_root + interval as Pitch)
            .collect();

        Chord {
            name: name.to_string(),
            symbol,
            notes,
            bass_note: Some(left),
            inversion: 0,
            voicing: Voicing::Close,
        }
    }

    /// Copy of this chord with another quality, rebuilt in the same octave
    /// with the same inversion and voicing
    pub fn with_quality(&self, quality: ChordQuality, octave: i32) -> Self {
        Chord::instantiate(
            ChordSymbol::new(self.symbol.root, quality),
            octave,
            self.inversion,
            self.voicing,
        )
    }

    /// Copy of this chord moved by `semitones`
    pub fn transposed(&self, semitones: i32) -> Self {
        if semitones == 0 {
            return self.clone();
        }

        let symbol = self.symbol.transposed(semitones);
        Chord {
            name: symbol.name(),
            symbol,
            notes: self.notes.iter().map(|n| n + semitones).collect(),
            bass_note: self.bass_note.map(|b| b + semitones),
            inversion: self.inversion,
            voicing: self.voicing,
        }
    }

    /// Root pitch class
    pub fn root(&self) -> u8 {
        self.symbol.root
    }

    pub fn quality(&self) -> ChordQuality {
        self.symbol.quality
    }

    /// Bass note, or the lowest chord note when none was assigned
    pub fn bass_or_lowest(&self) -> Option<Pitch> {
        self.bass_note.or_else(|| self.notes.first().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::pitch_class;

    #[test]
    fn test_instantiate_close_root_position() {
        let chord = Chord::instantiate(ChordSymbol::new(0, ChordQuality::Maj7), 3, 0, Voicing::Close);
        assert_eq!(chord.notes, vec![48, 52, 55, 59]);
        assert_eq!(chord.bass_note, Some(36));
        assert_eq!(chord.name, "Cmaj7");
    }

    #[test]
    fn test_close_root_position_for_all_qualities() {
        for quality in ChordQuality::ALL {
            for root in 0..12 {
                let chord = Chord::instantiate(ChordSymbol::new(root, quality), 3, 0, Voicing::Close);
                assert_eq!(chord.notes.len(), quality.intervals().len());
                assert!(
                    chord.notes.windows(2).all(|w| w[0] < w[1]),
                    "{} not strictly ascending",
                    chord.name
                );
            }
        }
    }

    #[test]
    fn test_rootless_for_all_qualities() {
        for quality in ChordQuality::ALL {
            let close = Chord::instantiate(ChordSymbol::new(2, quality), 3, 0, Voicing::Close);
            let rootless = Chord::instantiate(ChordSymbol::new(2, quality), 3, 0, Voicing::Rootless);
            assert_eq!(rootless.notes.len(), quality.intervals().len() - 1);
            assert!(!rootless.notes.contains(&close.notes[0]));
        }
    }

    #[test]
    fn test_count_preserving_voicings() {
        for voicing in [Voicing::Drop2, Voicing::Drop3, Voicing::Drop24, Voicing::Spread] {
            for quality in ChordQuality::ALL {
                let chord = Chord::instantiate(ChordSymbol::new(5, quality), 3, 1, voicing);
                assert_eq!(chord.notes.len(), quality.intervals().len());
            }
        }
    }

    #[test]
    fn test_shell_is_three_notes() {
        for quality in ChordQuality::ALL {
            let chord = Chord::instantiate(ChordSymbol::new(7, quality), 3, 0, Voicing::Shell);
            assert_eq!(chord.notes.len(), 3);
        }
    }

    #[test]
    fn test_cumulative_inversion() {
        let symbol = ChordSymbol::new(0, ChordQuality::Maj7);

        // First inversion: C up an octave
        let first = Chord::instantiate(symbol, 3, 1, Voicing::Close);
        assert_eq!(first.notes, vec![52, 55, 59, 60]);

        // Second inversion: C and E up
        let second = Chord::instantiate(symbol, 3, 2, Voicing::Close);
        assert_eq!(second.notes, vec![55, 59, 60, 64]);

        // Sus2 has 3 notes, so the fourth promotion wraps back to index 0
        let wrapped = Chord::instantiate(ChordSymbol::new(0, ChordQuality::Sus2), 3, 4, Voicing::Close);
        assert_eq!(wrapped.notes, vec![62, 67, 72]);
    }

    #[test]
    fn test_split_hand_voicing() {
        let chord = Chord::split_hand("Cmaj7", 3);
        assert_eq!(chord.bass_note, Some(48));
        assert_eq!(chord.notes, vec![64, 67, 71]);

        let chord = Chord::split_hand("Am7", 3);
        assert_eq!(chord.bass_note, Some(57));
        assert_eq!(chord.notes, vec![72, 76, 79]);
    }

    #[test]
    fn test_from_name_keeps_spelling() {
        let chord = Chord::from_name("Bbmaj9", 3);
        assert_eq!(chord.name, "Bbmaj9");
        assert_eq!(chord.root(), 10);
        assert_eq!(chord.notes[0], 58);
        assert_eq!(chord.bass_note, Some(46));
    }

    #[test]
    fn test_transpose_round_trip() {
        let original = Chord::instantiate(ChordSymbol::new(9, ChordQuality::Min11), 3, 2, Voicing::Drop2);
        for n in -14..=14 {
            let back = original.transposed(n).transposed(-n);
            assert_eq!(back.notes, original.notes);
            assert_eq!(back.bass_note, original.bass_note);
            assert_eq!(back.root(), original.root());
        }
    }

    #[test]
    fn test_transpose_moves_root() {
        let chord = Chord::from_name("Cmaj7", 3).transposed(2);
        assert_eq!(chord.root(), 2);
        assert_eq!(chord.name, "Dmaj7");
        assert_eq!(pitch_class(chord.notes[0]), 2);
    }

    #[test]
    fn test_with_quality() {
        let chord = Chord::instantiate(ChordSymbol::new(0, ChordQuality::Maj7), 3, 0, Voicing::Close);
        let ninth = chord.with_quality(ChordQuality::Maj9, 3);
        assert_eq!(ninth.notes, vec![48, 52, 55, 59, 62]);
    }
}
