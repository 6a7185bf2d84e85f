// Chord Types - Immutable chord-quality catalog
// Interval sets, display names, colors and generation tags

use serde::{Deserialize, Serialize};

/// Chord quality, keyed by its catalog symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordQuality {
    #[serde(rename = "maj7")]
    Maj7,
    #[serde(rename = "maj9")]
    Maj9,
    #[serde(rename = "min7")]
    Min7,
    #[serde(rename = "min9")]
    Min9,
    #[serde(rename = "min11")]
    Min11,
    #[serde(rename = "dom7")]
    Dom7,
    #[serde(rename = "dom9")]
    Dom9,
    #[serde(rename = "7#9")]
    Dom7Sharp9,
    #[serde(rename = "13")]
    Dom13,
    #[serde(rename = "6/9")]
    SixNine,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "m6")]
    Min6,
    #[serde(rename = "sus2")]
    Sus2,
    #[serde(rename = "sus4")]
    Sus4,
    #[serde(rename = "7sus4")]
    SevenSus4,
    #[serde(rename = "add9")]
    Add9,
    #[serde(rename = "dim7")]
    Dim7,
    #[serde(rename = "m7b5")]
    HalfDim7,
    #[serde(rename = "aug")]
    Aug,
    #[serde(rename = "maj7#11")]
    Maj7Sharp11,
}

/// Catalog entry for a chord quality
#[derive(Debug, Clone, Serialize)]
pub struct ChordType {
    pub quality: ChordQuality,

    /// Canonical symbol used in chord names ("maj7", "7#9")
    pub symbol: &'static str,

    /// Display name
    pub name: &'static str,

    /// Semitones above the root, ascending, always starting at 0
    pub intervals: &'static [u8],

    /// UI color tag; not part of the audio or MIDI output
    pub color: &'static str,

    /// Harmonic functions this quality usually serves
    pub functions: &'static [&'static str],

    /// Mood tags used only by generation heuristics
    pub moods: &'static [&'static str],
}

/// Chord catalog, in `ChordQuality` declaration order
pub static CHORD_TYPES: [ChordType; 20] = [
    ChordType {
        quality: ChordQuality::Maj7,
        symbol: "maj7",
        name: "Major 7",
        intervals: &[0, 4, 7, 11],
        color: "#6366f1",
        functions: &["I", "IV"],
        moods: &["smooth", "warm", "open", "positive"],
    },
    ChordType {
        quality: ChordQuality::Maj9,
        symbol: "maj9",
        name: "Major 9",
        intervals: &[0, 4, 7, 11, 14],
        color: "#8b5cf6",
        functions: &["I", "IV"],
        moods: &["lush", "jazzy", "elegant"],
    },
    ChordType {
        quality: ChordQuality::Min7,
        symbol: "min7",
        name: "Minor 7",
        intervals: &[0, 3, 7, 10],
        color: "#a855f7",
        functions: &["ii", "iii", "vi", "i"],
        moods: &["emotional", "intimate", "sad", "dark"],
    },
    ChordType {
        quality: ChordQuality::Min9,
        symbol: "min9",
        name: "Minor 9",
        intervals: &[0, 3, 7, 10, 14],
        color: "#d946ef",
        functions: &["ii", "iii", "vi", "i"],
        moods: &["dreamy", "lush", "dark", "modern"],
    },
    ChordType {
        quality: ChordQuality::Min11,
        symbol: "min11",
        name: "Minor 11",
        intervals: &[0, 3, 7, 10, 14, 17],
        color: "#ec4899",
        functions: &["ii", "iii", "vi", "i"],
        moods: &["atmospheric", "cinematic", "floaty"],
    },
    ChordType {
        quality: ChordQuality::Dom7,
        symbol: "dom7",
        name: "Dominant 7",
        intervals: &[0, 4, 7, 10],
        color: "#f43f5e",
        functions: &["V", "bVII"],
        moods: &["bluesy", "tense", "resolving"],
    },
    ChordType {
        quality: ChordQuality::Dom9,
        symbol: "dom9",
        name: "Dominant 9",
        intervals: &[0, 4, 7, 10, 14],
        color: "#f97316",
        functions: &["V", "bVII"],
        moods: &["soulful", "funky", "bluesy"],
    },
    ChordType {
        quality: ChordQuality::Dom7Sharp9,
        symbol: "7#9",
        name: "7#9",
        intervals: &[0, 4, 7, 10, 15],
        color: "#ef4444",
        functions: &["V"],
        moods: &["edgy", "bluesy", "psychedelic"],
    },
    ChordType {
        quality: ChordQuality::Dom13,
        symbol: "13",
        name: "13th",
        intervals: &[0, 4, 7, 10, 14, 21],
        color: "#eab308",
        functions: &["V"],
        moods: &["soulful", "jazzy", "rich", "old-school"],
    },
    ChordType {
        quality: ChordQuality::SixNine,
        symbol: "6/9",
        name: "6/9",
        intervals: &[0, 4, 7, 9, 14],
        color: "#f97316",
        functions: &["I", "IV"],
        moods: &["warm", "gospel", "open"],
    },
    ChordType {
        quality: ChordQuality::Six,
        symbol: "6",
        name: "Major 6",
        intervals: &[0, 4, 7, 9],
        color: "#0ea5e9",
        functions: &["I", "IV"],
        moods: &["sweet", "vintage"],
    },
    ChordType {
        quality: ChordQuality::Min6,
        symbol: "m6",
        name: "Minor 6",
        intervals: &[0, 3, 7, 9],
        color: "#0284c7",
        functions: &["i", "iv"],
        moods: &["noir", "bittersweet"],
    },
    ChordType {
        quality: ChordQuality::Sus2,
        symbol: "sus2",
        name: "Sus2",
        intervals: &[0, 2, 7],
        color: "#22c55e",
        functions: &["I", "IV", "V"],
        moods: &["open", "airy", "modern"],
    },
    ChordType {
        quality: ChordQuality::Sus4,
        symbol: "sus4",
        name: "Sus4",
        intervals: &[0, 5, 7],
        color: "#14b8a6",
        functions: &["I", "IV", "V"],
        moods: &["suspended", "tense", "anticipation"],
    },
    ChordType {
        quality: ChordQuality::SevenSus4,
        symbol: "7sus4",
        name: "7sus4",
        intervals: &[0, 5, 7, 10],
        color: "#06b6d4",
        functions: &["V"],
        moods: &["soulful", "open", "gospel"],
    },
    ChordType {
        quality: ChordQuality::Add9,
        symbol: "add9",
        name: "Add9",
        intervals: &[0, 4, 7, 14],
        color: "#0ea5e9",
        functions: &["I", "IV", "vi"],
        moods: &["modern", "airy", "emotional"],
    },
    ChordType {
        quality: ChordQuality::Dim7,
        symbol: "dim7",
        name: "Dim7",
        intervals: &[0, 3, 6, 9],
        color: "#64748b",
        functions: &["vii°"],
        moods: &["dark", "passing", "tense"],
    },
    ChordType {
        quality: ChordQuality::HalfDim7,
        symbol: "m7b5",
        name: "Half Dim",
        intervals: &[0, 3, 6, 10],
        color: "#78716c",
        functions: &["vii°", "ii"],
        moods: &["jazzy", "dark", "sophisticated"],
    },
    ChordType {
        quality: ChordQuality::Aug,
        symbol: "aug",
        name: "Augmented",
        intervals: &[0, 4, 8],
        color: "#22c55e",
        functions: &["V"],
        moods: &["unstable", "dreamy"],
    },
    ChordType {
        quality: ChordQuality::Maj7Sharp11,
        symbol: "maj7#11",
        name: "Maj7#11",
        intervals: &[0, 4, 7, 11, 18],
        color: "#7c3aed",
        functions: &["IV"],
        moods: &["dreamy", "floating", "lydian"],
    },
];

impl ChordQuality {
    /// Every quality, in catalog order
    pub const ALL: [ChordQuality; 20] = [
        ChordQuality::Maj7,
        ChordQuality::Maj9,
        ChordQuality::Min7,
        ChordQuality::Min9,
        ChordQuality::Min11,
        ChordQuality::Dom7,
        ChordQuality::Dom9,
        ChordQuality::Dom7Sharp9,
        ChordQuality::Dom13,
        ChordQuality::SixNine,
        ChordQuality::Six,
        ChordQuality::Min6,
        ChordQuality::Sus2,
        ChordQuality::Sus4,
        ChordQuality::SevenSus4,
        ChordQuality::Add9,
        ChordQuality::Dim7,
        ChordQuality::HalfDim7,
        ChordQuality::Aug,
        ChordQuality::Maj7Sharp11,
    ];

    /// Catalog entry for this quality
    pub fn definition(self) -> &'static ChordType {
        &CHORD_TYPES[self as usize]
    }

    pub fn intervals(self) -> &'static [u8] {
        self.definition().intervals
    }

    pub fn symbol(self) -> &'static str {
        self.definition().symbol
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }

    /// Look up a quality by its canonical symbol
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|q| q.symbol() == symbol)
    }

    /// Related extensions a generator may swap this quality for.
    /// Repeated entries weight the draw toward keeping the original.
    pub fn substitutions(self) -> &'static [ChordQuality] {
        use ChordQuality::*;
        match self {
            Maj7 => &[Maj9, Maj7, SixNine, Add9],
            Min7 => &[Min9, Min7, Min11, Min7],
            Dom7 => &[Dom9, Dom7, Dom13, Dom7],
            _ => &[],
        }
    }
}

impl std::fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}
