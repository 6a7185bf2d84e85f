// Performance - Normalized, playable view of any arrangement
// Chord slots laid end to end, flattened into per-layer notes

use serde::{Deserialize, Serialize};

use crate::theory::Pitch;
use super::chord::Chord;
use super::melody::Melody;
use super::patterns::{
    piano_comp, BassPattern, ChordRhythm, DrumPattern, DrumStyle, StyleBass, CHORD_SPAN_BEATS,
    MIDI_CLOSED_HIHAT, MIDI_KICK, MIDI_OPEN_HIHAT, MIDI_SNARE,
};
use super::song::{energy_velocity, SongArrangement};
use super::variations::Arrangement;

/// Pad and string sustain, just short of the chord span
const SUSTAIN_BEATS: f64 = 3.8;

/// Guitar strum spacing between chord tones
const STRUM_STEP_BEATS: f64 = 0.15;
const GUITAR_BEATS: f64 = 1.5;

/// Chord-tone melody used when a slot has no generated melody
const FALLBACK_MELODY_BEATS: [f64; 4] = [0.0, 0.5, 1.5, 2.5];
const FALLBACK_MELODY_DURATION: f64 = 0.4;

/// Longest a generated melody note is held
const MAX_MELODY_NOTE_BEATS: f64 = 1.0;

/// Instrument layer; doubles as the synth voice id during playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Keys right hand, played in the chord rhythm
    Chords,
    /// Keys left hand: the bass note in the chord rhythm
    LeftHand,
    Pad,
    Strings,
    Guitar,
    Bass,
    Melody,
    Kick,
    Snare,
    HiHat,
    OpenHat,
}

impl Layer {
    pub const ALL: [Layer; 11] = [
        Layer::Chords,
        Layer::LeftHand,
        Layer::Pad,
        Layer::Strings,
        Layer::Guitar,
        Layer::Bass,
        Layer::Melody,
        Layer::Kick,
        Layer::Snare,
        Layer::HiHat,
        Layer::OpenHat,
    ];

    pub const DRUMS: [Layer; 4] = [Layer::Kick, Layer::Snare, Layer::HiHat, Layer::OpenHat];

    /// MIDI channel (0-based; 9 is General MIDI drums)
    pub fn channel(&self) -> u8 {
        match self {
            Layer::Chords | Layer::LeftHand => 0,
            Layer::Pad => 1,
            Layer::Strings => 2,
            Layer::Guitar => 3,
            Layer::Bass => 4,
            Layer::Melody => 5,
            Layer::Kick | Layer::Snare | Layer::HiHat | Layer::OpenHat => 9,
        }
    }

    /// Velocity before energy scaling and humanization
    pub fn base_velocity(&self) -> u8 {
        match self {
            Layer::Chords | Layer::LeftHand => 80,
            Layer::Pad => 60,
            Layer::Strings => 55,
            Layer::Guitar => 70,
            Layer::Bass => 95,
            Layer::Melody => 85,
            Layer::Kick => 100,
            Layer::Snare => 90,
            Layer::HiHat => 65,
            Layer::OpenHat => 60,
        }
    }

    pub fn is_drum(&self) -> bool {
        self.channel() == 9
    }

    pub fn to_string(&self) -> &'static str {
        match self {
            Layer::Chords => "chords",
            Layer::LeftHand => "left_hand",
            Layer::Pad => "pad",
            Layer::Strings => "strings",
            Layer::Guitar => "guitar",
            Layer::Bass => "bass",
            Layer::Melody => "melody",
            Layer::Kick => "kick",
            Layer::Snare => "snare",
            Layer::HiHat => "hi_hat",
            Layer::OpenHat => "open_hat",
        }
    }
}

/// One chord occupying a span of the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordSlot {
    pub chord: Chord,

    /// Absolute start in beats
    pub start_beat: f64,

    pub span_beats: f64,

    /// Section energy for song slots; `None` plays at base velocities
    pub energy: Option<f64>,

    pub melody: Option<Melody>,

    /// Index of the owning section (songs) or chord (arrangements)
    pub group: usize,
}

impl ChordSlot {
    /// Layer velocity after section-energy scaling
    ///
    /// The chord layer maps energy straight to `round(70 + energy * 20)`;
    /// other layers scale their base velocity by the same ratio against 80.
    pub fn velocity(&self, layer: Layer) -> u8 {
        match self.energy {
            None => layer.base_velocity(),
            Some(energy) if layer == Layer::Chords => energy_velocity(energy),
            Some(energy) => {
                let ratio = energy_velocity(energy) as f64 / 80.0;
                (layer.base_velocity() as f64 * ratio).round().clamp(1.0, 127.0) as u8
            }
        }
    }
}

/// A note produced by flattening a performance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformedNote {
    pub layer: Layer,
    /// Index of the chord slot it belongs to
    pub slot: usize,
    pub pitch: Pitch,
    /// Absolute start in beats
    pub start: f64,
    /// Start relative to the slot, used for swing decisions
    pub offset: f64,
    pub duration: f64,
    pub velocity: u8,
}

/// What plays, when, and with which patterns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    pub title: String,
    pub tempo: u32,
    pub swing: f64,
    pub slots: Vec<ChordSlot>,
    pub chord_rhythm: ChordRhythm,
    pub bass_pattern: BassPattern,
    pub drum_pattern: DrumPattern,
}

impl Performance {
    /// Fixed progression played with keyboard comping
    pub fn from_chords(title: &str, chords: Vec<Chord>, tempo: u32, swing: f64) -> Self {
        let slots = chords
            .into_iter()
            .enumerate()
            .map(|(i, chord)| ChordSlot {
                chord,
                start_beat: i as f64 * CHORD_SPAN_BEATS,
                span_beats: CHORD_SPAN_BEATS,
                energy: None,
                melody: None,
                group: i,
            })
            .collect();

        Performance {
            title: title.to_string(),
            tempo,
            swing,
            slots,
            chord_rhythm: piano_comp(),
            bass_pattern: StyleBass::RootFifth.pattern(),
            drum_pattern: DrumStyle::TrapSoul.pattern(),
        }
    }

    /// Generated arrangement, one chord per span
    pub fn from_arrangement(arrangement: &Arrangement, drum_pattern: DrumPattern) -> Self {
        let slots = arrangement
            .chords
            .iter()
            .enumerate()
            .map(|(i, chord)| ChordSlot {
                chord: chord.clone(),
                start_beat: i as f64 * CHORD_SPAN_BEATS,
                span_beats: CHORD_SPAN_BEATS,
                energy: None,
                melody: arrangement
                    .melodies
                    .as_ref()
                    .and_then(|m| m.get(i))
                    .cloned(),
                group: i,
            })
            .collect();

        Performance {
            title: arrangement.name.clone(),
            tempo: arrangement.tempo,
            swing: arrangement.swing,
            slots,
            chord_rhythm: arrangement.chord_rhythm.clone(),
            bass_pattern: arrangement.bass_pattern.clone(),
            drum_pattern,
        }
    }

    /// Full song: each section cycles its progression one chord per bar
    pub fn from_song(song: &SongArrangement) -> Self {
        let mut slots = Vec::new();
        for (group, section) in song.sections.iter().enumerate() {
            if section.chords.is_empty() {
                continue;
            }
            for bar in 0..section.bars {
                let chord = &section.chords[bar as usize % section.chords.len()];
                slots.push(ChordSlot {
                    chord: chord.clone(),
                    start_beat: (section.start_bar + bar) as f64 * CHORD_SPAN_BEATS,
                    span_beats: CHORD_SPAN_BEATS,
                    energy: Some(section.energy),
                    melody: None,
                    group,
                });
            }
        }

        Performance {
            title: format!("{} - {}", song.artist, song.structure),
            tempo: song.tempo,
            swing: song.swing,
            slots,
            chord_rhythm: piano_comp(),
            bass_pattern: song.bass_pattern.clone(),
            drum_pattern: song.drum_pattern.clone(),
        }
    }

    pub fn total_beats(&self) -> f64 {
        self.slots
            .iter()
            .map(|s| s.start_beat + s.span_beats)
            .fold(0.0, f64::max)
    }

    pub fn seconds_per_beat(&self) -> f64 {
        if self.tempo == 0 {
            return 0.0;
        }
        60.0 / self.tempo as f64
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_beats() * self.seconds_per_beat()
    }

    /// Flatten the requested layers into notes, slot by slot
    ///
    /// Within a slot, layers appear in the order given and notes within a
    /// layer in pattern order. Hits at or past the slot span are dropped.
    pub fn notes(&self, layers: &[Layer]) -> Vec<PerformedNote> {
        let mut notes = Vec::new();
        for (index, slot) in self.slots.iter().enumerate() {
            for &layer in layers {
                self.slot_layer_notes(index, slot, layer, &mut notes);
            }
        }
        notes
    }

    fn slot_layer_notes(&self, index: usize, slot: &ChordSlot, layer: Layer, out: &mut Vec<PerformedNote>) {
        let velocity = slot.velocity(layer);
        let mut push = |pitch: Pitch, offset: f64, duration: f64| {
            if offset < 0.0 || offset >= slot.span_beats {
                return;
            }
            out.push(PerformedNote {
                layer,
                slot: index,
                pitch,
                start: slot.start_beat + offset,
                offset,
                duration,
                velocity,
            });
        };

        let chord = &slot.chord;
        match layer {
            Layer::Chords => {
                for hit in &self.chord_rhythm.hits {
                    for &note in &chord.notes {
                        push(note, hit.beat, hit.duration);
                    }
                }
            }
            Layer::LeftHand => {
                if let Some(bass) = chord.bass_note {
                    for hit in &self.chord_rhythm.hits {
                        push(bass, hit.beat, hit.duration);
                    }
                }
            }
            Layer::Pad => {
                for &note in &chord.notes {
                    push(note + 12, 0.0, SUSTAIN_BEATS);
                }
            }
            Layer::Strings => {
                for &note in &chord.notes {
                    push(note, 0.0, SUSTAIN_BEATS);
                }
            }
            Layer::Guitar => {
                for (i, &note) in chord.notes.iter().enumerate() {
                    push(note, i as f64 * STRUM_STEP_BEATS, GUITAR_BEATS);
                }
            }
            Layer::Bass => {
                if let Some(root) = chord.bass_or_lowest() {
                    for hit in &self.bass_pattern.hits {
                        push(root + hit.interval, hit.beat, hit.duration);
                    }
                }
            }
            Layer::Melody => match &slot.melody {
                Some(melody) => {
                    for (i, (&note, &beat)) in melody.notes.iter().zip(&melody.rhythm).enumerate() {
                        let next = melody.rhythm.get(i + 1).copied().unwrap_or(slot.span_beats);
                        push(note, beat, (next - beat).clamp(0.1, MAX_MELODY_NOTE_BEATS));
                    }
                }
                None => {
                    for (&beat, &note) in FALLBACK_MELODY_BEATS.iter().zip(&chord.notes) {
                        push(note + 12, beat, FALLBACK_MELODY_DURATION);
                    }
                }
            },
            Layer::Kick => {
                for &beat in &self.drum_pattern.kick {
                    push(MIDI_KICK as Pitch, beat, 0.25);
                }
            }
            Layer::Snare => {
                for &beat in &self.drum_pattern.snare {
                    push(MIDI_SNARE as Pitch, beat, 0.2);
                }
            }
            Layer::HiHat => {
                for &beat in &self.drum_pattern.hihat {
                    push(MIDI_CLOSED_HIHAT as Pitch, beat, 0.1);
                }
            }
            Layer::OpenHat => {
                for &beat in &self.drum_pattern.open_hat {
                    push(MIDI_OPEN_HIHAT as Pitch, beat, 0.2);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arranger::song::generate_song_arrangement;
    use crate::library::Catalog;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn progression() -> Vec<Chord> {
        ["Cmaj7", "Am7", "Fmaj7", "G7"]
            .iter()
            .map(|name| Chord::split_hand(name, 3))
            .collect()
    }

    #[test]
    fn test_slots_laid_end_to_end() {
        let performance = Performance::from_chords("Test", progression(), 90, 0.1);

        let starts: Vec<f64> = performance.slots.iter().map(|s| s.start_beat).collect();
        assert_eq!(starts, vec![0.0, 4.0, 8.0, 12.0]);
        assert_eq!(performance.total_beats(), 16.0);
        assert!((performance.total_seconds() - 16.0 * 60.0 / 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_chord_layer_uses_rhythm_hits() {
        let performance = Performance::from_chords("Test", progression(), 90, 0.0);
        let notes = performance.notes(&[Layer::Chords]);

        // Two comping hits of three right-hand notes per chord
        assert_eq!(notes.len(), 4 * 2 * 3);
        assert_eq!(notes[0].pitch, 64);
        assert_eq!(notes[0].start, 0.0);
        assert_eq!(notes[3].start, 2.0);
        assert!(notes.iter().all(|n| n.velocity == 80 && n.duration == 1.5));
    }

    #[test]
    fn test_layer_channels_and_shapes() {
        let performance = Performance::from_chords("Test", progression(), 90, 0.0);

        let pad = performance.notes(&[Layer::Pad]);
        assert_eq!(pad[0].pitch, 76);
        assert_eq!(pad[0].duration, 3.8);

        let guitar = performance.notes(&[Layer::Guitar]);
        let offsets: Vec<f64> = guitar.iter().take(3).map(|n| n.offset).collect();
        assert!((offsets[1] - 0.15).abs() < 1e-12);
        assert!((offsets[2] - 0.30).abs() < 1e-12);

        let bass = performance.notes(&[Layer::Bass]);
        // Root-fifth off the left-hand C3
        assert_eq!(bass[0].pitch, 48);
        assert_eq!(bass[1].pitch, 55);

        assert_eq!(Layer::Bass.channel(), 4);
        assert!(Layer::OpenHat.is_drum());
    }

    #[test]
    fn test_fallback_melody_from_chord_tones() {
        let performance = Performance::from_chords("Test", progression(), 90, 0.0);
        let melody = performance.notes(&[Layer::Melody]);

        // Three treble notes, so only three of the four fallback beats play
        let first: Vec<(Pitch, f64)> = melody.iter().take(3).map(|n| (n.pitch, n.offset)).collect();
        assert_eq!(first, vec![(76, 0.0), (79, 0.5), (83, 1.5)]);
    }

    #[test]
    fn test_generated_melody_durations() {
        let mut performance = Performance::from_chords("Test", progression(), 90, 0.0);
        performance.slots[0].melody = Some(Melody {
            notes: vec![60, 62, 65],
            rhythm: vec![0.0, 0.5, 3.5],
        });

        let melody: Vec<PerformedNote> = performance
            .notes(&[Layer::Melody])
            .into_iter()
            .filter(|n| n.slot == 0)
            .collect();
        let durations: Vec<f64> = melody.iter().map(|n| n.duration).collect();
        assert_eq!(durations, vec![0.5, 1.0, 0.5]);
    }

    #[test]
    fn test_song_cycles_chords_per_bar() {
        let catalog = Catalog::load();
        let sza = catalog.artist("sza").unwrap();
        let song = generate_song_arrangement(sza, 0, 3, &mut ChaCha8Rng::seed_from_u64(4));
        let performance = Performance::from_song(&song);

        assert_eq!(performance.slots.len() as u32, song.total_bars);
        assert_eq!(performance.total_beats(), song.total_beats as f64);

        let intro = &song.sections[0];
        for bar in 0..intro.bars as usize {
            assert_eq!(
                performance.slots[bar].chord,
                intro.chords[bar % intro.chords.len()]
            );
        }
    }

    #[test]
    fn test_song_energy_scales_velocity() {
        let slot = |energy| ChordSlot {
            chord: Chord::from_name("Cmaj7", 3),
            start_beat: 0.0,
            span_beats: 4.0,
            energy,
            melody: None,
            group: 0,
        };

        assert_eq!(slot(None).velocity(Layer::Chords), 80);
        assert_eq!(slot(Some(1.0)).velocity(Layer::Chords), 90);
        assert_eq!(slot(Some(0.25)).velocity(Layer::Chords), 75);
        // 95 * 90 / 80
        assert_eq!(slot(Some(1.0)).velocity(Layer::Bass), 107);
        assert_eq!(slot(Some(0.3)).velocity(Layer::Kick), 95);
    }

    #[test]
    fn test_drum_hits_per_slot() {
        let performance = Performance::from_chords("Test", progression(), 90, 0.0);
        let kicks = performance.notes(&[Layer::Kick]);
        // Trap soul kick: four per bar
        assert_eq!(kicks.len(), 16);
        assert!(kicks.iter().all(|n| n.pitch == 36 && n.layer.channel() == 9));
    }
}
