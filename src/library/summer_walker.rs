// Summer Walker Style
// Soft, warm and intimate; E major ballad voicings

use crate::arranger::patterns::{DrumStyle, StyleBass};
use crate::arranger::song::{SectionType, SongForm};
use crate::theory::{ChordQuality, ScaleKind};
use super::types::*;

pub fn summer_walker_style() -> ArtistStyle {
    ArtistStyle {
        id: "summer_walker".to_string(),
        name: "Summer Walker".to_string(),
        description: "Soft, Warm, Intimate R&B".to_string(),
        color: "#be185d".to_string(),
        tempo_range: (72, 82),
        swing: 0.18,
        style_tags: strings(&["warm", "intimate", "melancholy", "acoustic", "soft"]),
        chord_bank: strings(&["Emaj7", "C#m7", "F#m9", "Amaj9", "B7", "G#m7", "Dmaj7", "F#m7"]),
        preferred_types: vec![
            ChordQuality::Maj7,
            ChordQuality::Min7,
            ChordQuality::Min9,
            ChordQuality::Dom7,
        ],
        hint: "Soft, warm, intimate R&B with gentle maj7/m7 chords and soulful, simple melodies"
            .to_string(),
        song_form: SongForm::BalladSlow,
        sections: vec![
            section(SectionType::Intro, &[&["Emaj7", "Amaj9"], &["C#m7", "F#m9"]]),
            section(
                SectionType::Verse,
                &[
                    &["Emaj7", "G#m7", "C#m7", "Amaj9"],
                    &["F#m9", "Emaj7", "Amaj9", "B7"],
                    &["C#m7", "Amaj9", "Emaj7", "G#m7"],
                ],
            ),
            section(
                SectionType::PreChorus,
                &[&["Amaj9", "B7", "C#m7", "G#m7"], &["F#m9", "G#m7", "Amaj9", "B7"]],
            ),
            section(
                SectionType::Chorus,
                &[
                    &["Emaj7", "C#m7", "Amaj9", "B7"],
                    &["C#m7", "Amaj9", "Emaj7", "B7"],
                    &["Amaj9", "Emaj7", "C#m7", "G#m7"],
                ],
            ),
            section(
                SectionType::Bridge,
                &[&["F#m7", "B7", "Emaj7"], &["Dmaj7", "C#m7", "F#m9", "Amaj9"]],
            ),
            section(SectionType::Breakdown, &[&["Emaj7", "C#m7"], &["Amaj9", "B7"]]),
            section(SectionType::Drop, &[&["Emaj7", "C#m7", "Amaj9"]]),
            section(SectionType::Outro, &[&["Emaj7", "Amaj9", "C#m7"], &["F#m9", "Emaj7"]]),
        ],
        drum_style: DrumStyle::SlowJam,
        bass_style: StyleBass::RootFifth,
        scales: vec![ScaleKind::Major, ScaleKind::Minor, ScaleKind::Dorian],
        progressions: vec![
            literal("Summer Classic", &["Am7", "Dm7", "Em7"], "Soft classic R&B"),
            literal("Summer Warm", &["Bbmaj7", "Fmaj7", "Gm7"], "Warm progression"),
            literal("Summer Over It", &["Am7", "Dm7", "Fmaj7", "Em7"], "Over It vibes"),
            literal("Summer Soulful", &["Dm9", "Am7", "Em9", "Fmaj7"], "Soulful warmth"),
            literal("Summer Intimate", &["Fm9", "Bbmaj7", "Gm7", "Cm7"], "Late night"),
        ],
    }
}
