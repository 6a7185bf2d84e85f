// Rhythm Patterns - Chord-rhythm, bass and drum pattern tables
// Every hit sits inside one chord's span (4 beats)

use serde::{Deserialize, Serialize};

/// Beats each chord occupies
pub const CHORD_SPAN_BEATS: f64 = 4.0;

/// General MIDI drum notes
pub const MIDI_KICK: u8 = 36; // C1
pub const MIDI_SNARE: u8 = 38; // D1
pub const MIDI_CLOSED_HIHAT: u8 = 42; // F#1
pub const MIDI_OPEN_HIHAT: u8 = 46; // A#1

/// Off-beat threshold for chord rhythms: hits whose beat fraction exceeds
/// this are swung
const CHORD_SWING_THRESHOLD: f64 = 0.3;

/// Off-beat threshold for bass patterns
const BASS_SWING_THRESHOLD: f64 = 0.4;

/// A chord stab within the chord span
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RhythmHit {
    pub beat: f64,
    pub duration: f64,
}

/// A bass note within the chord span, relative to the chord's bass note
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BassHit {
    pub beat: f64,
    pub interval: i32,
    pub duration: f64,
}

/// How the chord layer is played across a chord span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordRhythm {
    pub name: String,
    pub hits: Vec<RhythmHit>,
    pub swing_threshold: f64,
}

/// How the bass layer is played across a chord span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BassPattern {
    pub name: String,
    pub hits: Vec<BassHit>,
    pub swing_threshold: f64,
}

/// One bar of drums as beat offsets per instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrumPattern {
    pub name: String,
    pub kick: Vec<f64>,
    pub snare: Vec<f64>,
    pub hihat: Vec<f64>,
    pub open_hat: Vec<f64>,
}

fn hits(pairs: &[(f64, f64)]) -> Vec<RhythmHit> {
    pairs
        .iter()
        .map(|&(beat, duration)| RhythmHit { beat, duration })
        .collect()
}

fn bass_hits(triples: &[(f64, i32, f64)]) -> Vec<BassHit> {
    triples
        .iter()
        .map(|&(beat, interval, duration)| BassHit { beat, interval, duration })
        .collect()
}

fn chord_rhythm(name: &str, pairs: &[(f64, f64)]) -> ChordRhythm {
    ChordRhythm {
        name: name.to_string(),
        hits: hits(pairs),
        swing_threshold: CHORD_SWING_THRESHOLD,
    }
}

fn bass_pattern(name: &str, triples: &[(f64, i32, f64)]) -> BassPattern {
    BassPattern {
        name: name.to_string(),
        hits: bass_hits(triples),
        swing_threshold: BASS_SWING_THRESHOLD,
    }
}

/// Chord-rhythm catalog the variation generator draws from
pub fn chord_rhythms() -> Vec<ChordRhythm> {
    vec![
        chord_rhythm("Whole Notes", &[(0.0, 4.0)]),
        chord_rhythm("Half Notes", &[(0.0, 2.0), (2.0, 2.0)]),
        chord_rhythm("Syncopated", &[(0.0, 1.5), (1.5, 1.0), (2.5, 1.5)]),
        chord_rhythm("R&B Pump", &[(0.0, 0.5), (0.75, 0.5), (2.0, 1.0), (3.5, 0.5)]),
        chord_rhythm("Neo Soul Stabs", &[(0.0, 0.25), (1.0, 0.5), (2.5, 0.25), (3.0, 0.5)]),
        chord_rhythm("Gospel Bounce", &[(0.0, 1.0), (1.5, 0.5), (2.0, 1.0), (3.5, 0.5)]),
        chord_rhythm("Trap Soul", &[(0.0, 2.0), (2.5, 1.5)]),
        chord_rhythm("Ballad", &[(0.0, 3.0), (3.5, 0.5)]),
    ]
}

/// Keyboard comping on beats 1 and 3, used for fixed progressions and songs
pub fn piano_comp() -> ChordRhythm {
    chord_rhythm("Piano Comp", &[(0.0, 1.5), (2.0, 1.5)])
}

/// Bass catalog the variation generator draws from
pub fn generator_bass_patterns() -> Vec<BassPattern> {
    vec![
        bass_pattern("Simple Root-Fifth", &[(0.0, 0, 1.5), (2.0, 7, 1.5)]),
        bass_pattern(
            "Walking",
            &[(0.0, 0, 0.75), (1.0, 4, 0.75), (2.0, 7, 0.75), (3.0, 5, 0.75)],
        ),
        bass_pattern(
            "Syncopated Groove",
            &[(0.0, 0, 1.0), (1.5, 0, 0.5), (2.5, 7, 1.0), (3.75, 5, 0.25)],
        ),
        bass_pattern(
            "Octave Bounce",
            &[(0.0, 0, 0.5), (0.75, 12, 0.5), (2.0, 0, 0.5), (2.75, 12, 0.5)],
        ),
        bass_pattern("PND Dark", &[(0.0, 0, 2.5), (3.0, -5, 1.0)]),
        bass_pattern(
            "Bryson Trap",
            &[(0.0, 0, 0.75), (1.0, 0, 0.25), (1.5, 0, 0.25), (2.5, 7, 1.0)],
        ),
        bass_pattern(
            "Gospel Run",
            &[(0.0, 0, 0.5), (0.5, 2, 0.5), (1.0, 4, 0.5), (1.5, 5, 0.5), (2.0, 7, 1.5)],
        ),
        bass_pattern("Minimal", &[(0.0, 0, 3.5)]),
    ]
}

/// Bass patterns named by artist styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleBass {
    Sustained,
    RootFifth,
    Walking,
    Octave,
    Syncopated,
    Trap,
}

impl StyleBass {
    pub fn from_string(s: &str) -> Self {
        match s {
            "sustained" => StyleBass::Sustained,
            "rootFifth" => StyleBass::RootFifth,
            "walking" => StyleBass::Walking,
            "octave" => StyleBass::Octave,
            "syncopated" => StyleBass::Syncopated,
            "trap" => StyleBass::Trap,
            _ => StyleBass::RootFifth, // Default
        }
    }

    pub fn to_string(&self) -> &'static str {
        match self {
            StyleBass::Sustained => "sustained",
            StyleBass::RootFifth => "rootFifth",
            StyleBass::Walking => "walking",
            StyleBass::Octave => "octave",
            StyleBass::Syncopated => "syncopated",
            StyleBass::Trap => "trap",
        }
    }

    pub fn pattern(&self) -> BassPattern {
        match self {
            StyleBass::Sustained => bass_pattern("Sustained", &[(0.0, 0, 3.5)]),
            StyleBass::RootFifth => bass_pattern("Root-Fifth", &[(0.0, 0, 1.5), (2.0, 7, 1.5)]),
            StyleBass::Walking => bass_pattern(
                "Walking",
                &[(0.0, 0, 0.9), (1.0, 3, 0.9), (2.0, 5, 0.9), (3.0, 7, 0.9)],
            ),
            StyleBass::Octave => bass_pattern(
                "Octave",
                &[(0.0, 0, 0.7), (1.0, 12, 0.7), (2.0, 0, 0.7), (3.0, 12, 0.7)],
            ),
            StyleBass::Syncopated => bass_pattern(
                "Syncopated",
                &[(0.0, 0, 1.2), (1.5, 0, 0.5), (2.5, 7, 1.2)],
            ),
            StyleBass::Trap => bass_pattern("Trap 808", &[(0.0, 0, 1.8), (2.5, 0, 0.3), (3.0, -5, 0.8)]),
        }
    }
}

/// Drum patterns named by artist styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DrumStyle {
    TrapSoul,
    TrapBounce,
    SlowJam,
    NeoSoul,
    Minimal,
    HalfTime,
    ClassicRnb,
    Bounce,
}

impl DrumStyle {
    pub const ALL: [DrumStyle; 8] = [
        DrumStyle::TrapSoul,
        DrumStyle::TrapBounce,
        DrumStyle::SlowJam,
        DrumStyle::NeoSoul,
        DrumStyle::Minimal,
        DrumStyle::HalfTime,
        DrumStyle::ClassicRnb,
        DrumStyle::Bounce,
    ];

    pub fn from_string(s: &str) -> Self {
        match s {
            "trapSoul" => DrumStyle::TrapSoul,
            "trapBounce" => DrumStyle::TrapBounce,
            "slowJam" => DrumStyle::SlowJam,
            "neoSoul" => DrumStyle::NeoSoul,
            "minimal" => DrumStyle::Minimal,
            "halfTime" => DrumStyle::HalfTime,
            "classicRnb" | "classicRnB" => DrumStyle::ClassicRnb,
            "bounce" => DrumStyle::Bounce,
            _ => DrumStyle::TrapSoul, // Default
        }
    }

    pub fn to_string(&self) -> &'static str {
        match self {
            DrumStyle::TrapSoul => "trapSoul",
            DrumStyle::TrapBounce => "trapBounce",
            DrumStyle::SlowJam => "slowJam",
            DrumStyle::NeoSoul => "neoSoul",
            DrumStyle::Minimal => "minimal",
            DrumStyle::HalfTime => "halfTime",
            DrumStyle::ClassicRnb => "classicRnb",
            DrumStyle::Bounce => "bounce",
        }
    }

    pub fn pattern(&self) -> DrumPattern {
        let sixteenths: Vec<f64> = (0..16).map(|i| i as f64 * 0.25).collect();
        let eighths: Vec<f64> = (0..8).map(|i| i as f64 * 0.5).collect();

        let (name, kick, snare, hihat, open_hat) = match self {
            DrumStyle::TrapSoul => (
                "Trap Soul",
                vec![0.0, 0.75, 2.0, 2.5],
                vec![1.0, 3.0],
                sixteenths,
                vec![1.75, 3.75],
            ),
            DrumStyle::TrapBounce => (
                "Trap Bounce",
                vec![0.0, 0.5, 2.0, 2.75, 3.5],
                vec![1.0, 3.0],
                sixteenths,
                vec![0.75, 2.75],
            ),
            DrumStyle::SlowJam => (
                "Slow Jam",
                vec![0.0, 2.5],
                vec![1.0, 3.0],
                eighths,
                vec![3.5],
            ),
            DrumStyle::NeoSoul => (
                "Neo Soul",
                vec![0.0, 1.5, 2.75],
                vec![1.0, 3.0],
                eighths,
                vec![1.5, 3.5],
            ),
            DrumStyle::Minimal => (
                "Minimal",
                vec![0.0, 2.0],
                vec![1.0, 3.0],
                vec![0.0, 1.0, 2.0, 3.0],
                vec![],
            ),
            DrumStyle::HalfTime => (
                "Half Time",
                vec![0.0, 3.0],
                vec![2.0],
                eighths,
                vec![1.5],
            ),
            DrumStyle::ClassicRnb => (
                "Classic R&B",
                vec![0.0, 1.5, 2.0, 3.5],
                vec![1.0, 3.0],
                eighths,
                vec![1.0, 3.0],
            ),
            DrumStyle::Bounce => (
                "Bounce",
                vec![0.0, 0.5, 2.0, 2.5],
                vec![1.0, 3.0],
                sixteenths,
                vec![0.75, 2.75],
            ),
        };

        DrumPattern {
            name: name.to_string(),
            kick,
            snare,
            hihat,
            open_hat,
        }
    }
}

impl ChordRhythm {
    /// Check every hit starts inside the span
    pub fn fits_span(&self, span_beats: f64) -> bool {
        self.hits.iter().all(|h| h.beat >= 0.0 && h.beat < span_beats)
    }
}

impl BassPattern {
    pub fn fits_span(&self, span_beats: f64) -> bool {
        self.hits.iter().all(|h| h.beat >= 0.0 && h.beat < span_beats)
    }
}

impl DrumPattern {
    pub fn fits_span(&self, span_beats: f64) -> bool {
        [&self.kick, &self.snare, &self.hihat, &self.open_hat]
            .iter()
            .flat_map(|lane| lane.iter())
            .all(|&beat| beat >= 0.0 && beat < span_beats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(chord_rhythms().len(), 8);
        assert_eq!(generator_bass_patterns().len(), 8);
        assert_eq!(DrumStyle::ALL.len(), 8);
    }

    #[test]
    fn test_all_hits_inside_chord_span() {
        for rhythm in chord_rhythms().iter().chain(std::iter::once(&piano_comp())) {
            assert!(rhythm.fits_span(CHORD_SPAN_BEATS), "{}", rhythm.name);
        }
        for bass in generator_bass_patterns() {
            assert!(bass.fits_span(CHORD_SPAN_BEATS), "{}", bass.name);
        }
        for style in [
            StyleBass::Sustained,
            StyleBass::RootFifth,
            StyleBass::Walking,
            StyleBass::Octave,
            StyleBass::Syncopated,
            StyleBass::Trap,
        ] {
            assert!(style.pattern().fits_span(CHORD_SPAN_BEATS));
        }
        for style in DrumStyle::ALL {
            assert!(style.pattern().fits_span(CHORD_SPAN_BEATS), "{:?}", style);
        }
    }

    #[test]
    fn test_fits_span_rejects_late_hit() {
        let rhythm = ChordRhythm {
            name: "Late".to_string(),
            hits: vec![RhythmHit { beat: 4.0, duration: 1.0 }],
            swing_threshold: 0.3,
        };
        assert!(!rhythm.fits_span(CHORD_SPAN_BEATS));
    }

    #[test]
    fn test_trap_soul_drums() {
        let pattern = DrumStyle::TrapSoul.pattern();
        assert_eq!(pattern.kick, vec![0.0, 0.75, 2.0, 2.5]);
        assert_eq!(pattern.hihat.len(), 16);
        assert_eq!(pattern.open_hat, vec![1.75, 3.75]);
    }

    #[test]
    fn test_string_round_trips() {
        for style in DrumStyle::ALL {
            assert_eq!(DrumStyle::from_string(style.to_string()), style);
        }
        assert_eq!(StyleBass::from_string("trap"), StyleBass::Trap);
        assert_eq!(StyleBass::from_string("???"), StyleBass::RootFifth);
    }

    #[test]
    fn test_trap_bass_dips_below_root() {
        let trap = StyleBass::Trap.pattern();
        assert_eq!(trap.hits.last().map(|h| h.interval), Some(-5));
    }
}
