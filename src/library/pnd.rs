// PartyNextDoor Style
// Dark, moody Toronto sound: minor 9ths over sparse drums

use crate::arranger::patterns::{DrumStyle, StyleBass};
use crate::arranger::song::{SectionType, SongForm};
use crate::theory::{ChordQuality, ScaleKind};
use super::types::*;

/// Create the PartyNextDoor style
///
/// Characteristics:
/// - 65-75 BPM, almost straight
/// - Minimal drums, sustained bass
/// - i-bVI-bVII loops
pub fn pnd_style() -> ArtistStyle {
    ArtistStyle {
        id: "pnd".to_string(),
        name: "PartyNextDoor".to_string(),
        description: "Dark, Moody, Toronto Sound".to_string(),
        color: "#7c3aed".to_string(),
        tempo_range: (65, 75),
        swing: 0.08,
        style_tags: strings(&["dark", "moody", "minimal", "nocturnal", "OVO"]),
        chord_bank: strings(&["Dm9", "Fmaj7#11", "Em11", "Gmaj7", "Bbmaj9", "Am9", "Cm9", "Ebmaj7"]),
        preferred_types: vec![
            ChordQuality::Min7,
            ChordQuality::Min9,
            ChordQuality::Min11,
            ChordQuality::Maj7,
        ],
        hint: "Dark Toronto R&B with moody minor 9 chords and minimal atmospheric pads".to_string(),
        song_form: SongForm::DarkMinimal,
        sections: vec![
            section(SectionType::Intro, &[&["Dm9", "Bbmaj9"], &["Am9", "Gmaj7"]]),
            section(
                SectionType::Verse,
                &[
                    &["Dm9", "Bbmaj9", "Cmaj7"],
                    &["Am9", "Dm9", "Gmaj7"],
                    &["Em11", "Dm9", "Bbmaj9", "Am9"],
                ],
            ),
            section(
                SectionType::PreChorus,
                &[&["Fmaj7#11", "Em11", "Dm9", "Am9"], &["Gmaj7", "Am9", "Dm9", "Bbmaj9"]],
            ),
            section(
                SectionType::Chorus,
                &[
                    &["Am9", "Fmaj7#11", "Dm9", "Gmaj7"],
                    &["Dm9", "Bbmaj9", "Gmaj7", "Am9"],
                    &["Em11", "Dm9", "Bbmaj9", "Cmaj7"],
                ],
            ),
            section(
                SectionType::Bridge,
                &[&["Cm9", "Bbmaj9", "Ebmaj7", "Dm9"], &["Fmaj7#11", "Dm9", "Am9", "Gmaj7"]],
            ),
            section(SectionType::Breakdown, &[&["Dm9", "Am9"], &["Bbmaj9", "Gmaj7"]]),
            section(SectionType::Drop, &[&["Dm9", "Bbmaj9", "Cmaj7"]]),
            section(SectionType::Outro, &[&["Dm9", "Bbmaj9", "Am9"], &["Gmaj7", "Dm9"]]),
        ],
        drum_style: DrumStyle::Minimal,
        bass_style: StyleBass::Sustained,
        scales: vec![ScaleKind::Minor, ScaleKind::PentatonicMinor, ScaleKind::Blues],
        progressions: vec![
            literal("PND Dark", &["Cm9", "Abmaj7", "Bb7"], "Classic dark vibes"),
            literal("PND Caribbean", &["Gm7", "Ebmaj7", "F7#9"], "Caribbean influence"),
            literal("PND Jazzy", &["Dm7b5", "G7", "Cm9"], "Jazz-influenced dark"),
            literal("PND Late Night", &["Cm9", "Abmaj9", "Bb9", "Gm7"], "Toronto nights"),
            literal("PND Moody", &["Ebmaj7", "Cm9", "Fm7", "Bb7"], "Moody atmosphere"),
        ],
    }
}
