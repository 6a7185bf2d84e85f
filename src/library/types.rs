// Library Type Definitions
// Artist styles are harmonic systems plus a groove, not just chord lists

use serde::{Deserialize, Serialize};

use crate::arranger::patterns::{DrumStyle, StyleBass};
use crate::arranger::song::{SectionType, SongForm};
use crate::theory::{ChordQuality, ScaleKind};

/// Roman-numeral progression resolved against a key at generation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumeralProgression {
    pub name: String,
    pub numerals: Vec<String>,
    pub description: String,
    /// Category id used for filtering ("pnd", "neosoul", ...)
    pub category: String,
    pub color: String,
}

/// Chord-name progression written in a fixed key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralProgression {
    pub name: String,
    pub chords: Vec<String>,
    pub description: String,
}

/// Filter entry for numeral progressions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// Authored progressions for one section type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionProgressions {
    pub section: SectionType,
    pub progressions: Vec<Vec<String>>,
}

/// Complete artist style definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistStyle {
    /// Lookup key ("sza", "summer_walker")
    pub id: String,
    pub name: String,
    pub description: String,
    pub color: String,
    /// Inclusive BPM range
    pub tempo_range: (u32, u32),
    pub swing: f64,
    pub style_tags: Vec<String>,
    /// Signature chords; the first four stand in for missing section progressions
    pub chord_bank: Vec<String>,
    pub preferred_types: Vec<ChordQuality>,
    /// Free-text production hint
    pub hint: String,
    pub song_form: SongForm,
    pub sections: Vec<SectionProgressions>,
    pub drum_style: DrumStyle,
    pub bass_style: StyleBass,
    pub scales: Vec<ScaleKind>,
    pub progressions: Vec<LiteralProgression>,
}

/// Artist summary for listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tempo_range: (u32, u32),
    pub progression_count: usize,
}

impl ArtistStyle {
    /// Progressions to choose from for a section, falling back to the
    /// opening of the chord bank when none were authored
    pub fn section_progressions(&self, section: SectionType) -> Vec<Vec<String>> {
        match self.sections.iter().find(|s| s.section == section) {
            Some(entry) if !entry.progressions.is_empty() => entry.progressions.clone(),
            _ => vec![self.chord_bank.iter().take(4).cloned().collect()],
        }
    }

    pub fn literal_progression(&self, index: usize) -> Option<&LiteralProgression> {
        self.progressions.get(index)
    }

    pub fn summary(&self) -> ArtistSummary {
        ArtistSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            tempo_range: self.tempo_range,
            progression_count: self.progressions.len(),
        }
    }
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn section(section: SectionType, progressions: &[&[&str]]) -> SectionProgressions {
    SectionProgressions {
        section,
        progressions: progressions.iter().map(|p| strings(p)).collect(),
    }
}

pub(crate) fn literal(name: &str, chords: &[&str], description: &str) -> LiteralProgression {
    LiteralProgression {
        name: name.to_string(),
        chords: strings(chords),
        description: description.to_string(),
    }
}
