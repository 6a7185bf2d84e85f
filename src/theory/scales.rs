// Scales - Interval sets used by the melody generator
// Unknown scale names fall back to minor pentatonic

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleKind {
    Major,
    Minor,
    Dorian,
    Mixolydian,
    PentatonicMajor,
    PentatonicMinor,
    Blues,
    HarmonicMinor,
    MelodicMinor,
}

impl ScaleKind {
    pub const ALL: [ScaleKind; 9] = [
        ScaleKind::Major,
        ScaleKind::Minor,
        ScaleKind::Dorian,
        ScaleKind::Mixolydian,
        ScaleKind::PentatonicMajor,
        ScaleKind::PentatonicMinor,
        ScaleKind::Blues,
        ScaleKind::HarmonicMinor,
        ScaleKind::MelodicMinor,
    ];

    /// Semitone offsets from the scale root
    pub fn intervals(&self) -> &'static [u8] {
        match self {
            ScaleKind::Major => &[0, 2, 4, 5, 7, 9, 11],
            ScaleKind::Minor => &[0, 2, 3, 5, 7, 8, 10],
            ScaleKind::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            ScaleKind::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            ScaleKind::PentatonicMajor => &[0, 2, 4, 7, 9],
            ScaleKind::PentatonicMinor => &[0, 3, 5, 7, 10],
            ScaleKind::Blues => &[0, 3, 5, 6, 7, 10],
            ScaleKind::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            ScaleKind::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScaleKind::Major => "Major (Ionian)",
            ScaleKind::Minor => "Natural Minor",
            ScaleKind::Dorian => "Dorian (Neo Soul)",
            ScaleKind::Mixolydian => "Mixolydian",
            ScaleKind::PentatonicMajor => "Pentatonic Major",
            ScaleKind::PentatonicMinor => "Pentatonic Minor",
            ScaleKind::Blues => "Blues Scale",
            ScaleKind::HarmonicMinor => "Harmonic Minor",
            ScaleKind::MelodicMinor => "Melodic Minor",
        }
    }

    /// Look up a scale by catalog id or alias
    pub fn lookup(s: &str) -> Option<Self> {
        match s {
            "major" | "ionian" => Some(ScaleKind::Major),
            "minor" | "naturalMinor" | "aeolian" => Some(ScaleKind::Minor),
            "dorian" => Some(ScaleKind::Dorian),
            "mixolydian" => Some(ScaleKind::Mixolydian),
            "pentatonicMajor" | "majorPentatonic" => Some(ScaleKind::PentatonicMajor),
            "pentatonicMinor" | "minorPentatonic" => Some(ScaleKind::PentatonicMinor),
            "blues" => Some(ScaleKind::Blues),
            "harmonicMinor" => Some(ScaleKind::HarmonicMinor),
            "melodicMinor" => Some(ScaleKind::MelodicMinor),
            _ => None,
        }
    }

    /// Parse from string, falling back to minor pentatonic
    pub fn from_string(s: &str) -> Self {
        Self::lookup(s).unwrap_or_else(|| {
            log::warn!("Unknown scale '{}', using pentatonicMinor", s);
            ScaleKind::PentatonicMinor
        })
    }

    pub fn to_string(&self) -> &'static str {
        match self {
            ScaleKind::Major => "major",
            ScaleKind::Minor => "minor",
            ScaleKind::Dorian => "dorian",
            ScaleKind::Mixolydian => "mixolydian",
            ScaleKind::PentatonicMajor => "pentatonicMajor",
            ScaleKind::PentatonicMinor => "pentatonicMinor",
            ScaleKind::Blues => "blues",
            ScaleKind::HarmonicMinor => "harmonicMinor",
            ScaleKind::MelodicMinor => "melodicMinor",
        }
    }
}

/// Pitch classes of a scale built on `root`
pub fn scale_pitch_classes(root: u8, scale: ScaleKind) -> Vec<u8> {
    scale
        .intervals()
        .iter()
        .map(|interval| (root % 12 + interval) % 12)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(ScaleKind::lookup("naturalMinor"), Some(ScaleKind::Minor));
        assert_eq!(ScaleKind::lookup("minorPentatonic"), Some(ScaleKind::PentatonicMinor));
        assert_eq!(ScaleKind::lookup("lydian"), None);
    }

    #[test]
    fn test_unknown_scale_defaults_to_pentatonic_minor() {
        assert_eq!(ScaleKind::from_string("whole-tone"), ScaleKind::PentatonicMinor);
    }

    #[test]
    fn test_round_trip_ids() {
        for scale in ScaleKind::ALL {
            assert_eq!(ScaleKind::from_string(scale.to_string()), scale);
        }
    }

    #[test]
    fn test_scale_pitch_classes() {
        // A minor pentatonic: A C D E G
        assert_eq!(scale_pitch_classes(9, ScaleKind::PentatonicMinor), vec![9, 0, 2, 4, 7]);
        // C blues keeps the flat five
        assert_eq!(scale_pitch_classes(0, ScaleKind::Blues), vec![0, 3, 5, 6, 7, 10]);
    }
}
