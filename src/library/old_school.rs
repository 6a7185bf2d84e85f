// Old School R&B Style
// 90s slow jams: dominant turnarounds and a classic backbeat

use crate::arranger::patterns::{DrumStyle, StyleBass};
use crate::arranger::song::{SectionType, SongForm};
use crate::theory::{ChordQuality, ScaleKind};
use super::types::*;

/// Create the old school style
///
/// Only verse and chorus progressions are authored; the other sections
/// fall back to the chord bank.
pub fn old_school_style() -> ArtistStyle {
    ArtistStyle {
        id: "old_school".to_string(),
        name: "Old School R&B".to_string(),
        description: "90s Classic Soul".to_string(),
        color: "#0891b2".to_string(),
        tempo_range: (62, 76),
        swing: 0.1,
        style_tags: strings(&["classic", "slow-jam", "harmonies", "90s"]),
        chord_bank: strings(&["Ebmaj7", "Cm7", "Fm7", "Bb7", "Dm7", "G7", "Cmaj7", "Abmaj7"]),
        preferred_types: vec![ChordQuality::Maj7, ChordQuality::Min7, ChordQuality::Dom7],
        hint: "90s slow jam with ii-V-I turnarounds, lush harmonies and a steady backbeat"
            .to_string(),
        song_form: SongForm::BalladSlow,
        sections: vec![
            section(
                SectionType::Verse,
                &[&["Ebmaj7", "Cm7", "Fm7", "Bb7"], &["Bbmaj7", "Gm7", "Cm7", "F7"]],
            ),
            section(
                SectionType::Chorus,
                &[&["Fmaj7", "Dm7", "Gm7", "C7"], &["Cm9", "Fm7", "Abmaj7", "G7"]],
            ),
        ],
        drum_style: DrumStyle::ClassicRnb,
        bass_style: StyleBass::Syncopated,
        scales: vec![ScaleKind::Major, ScaleKind::PentatonicMajor, ScaleKind::Blues],
        progressions: vec![
            literal("ii-V-I", &["Dm7", "G7", "Cmaj7"], "Jazz standard R&B"),
            literal("Jodeci", &["Cm9", "Fm7", "Abmaj7", "G7"], "Jodeci ballad"),
            literal("Boyz II Men", &["Bbmaj7", "Gm7", "Cm7", "F7"], "Classic ballad"),
            literal("90s Slow Jam", &["Ebmaj7", "Cm7", "Fm7", "Bb7"], "Slow jam classic"),
            literal("R Kelly Era", &["Fmaj7", "Dm7", "Gm7", "C7"], "90s R&B"),
        ],
    }
}
