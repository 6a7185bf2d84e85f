// Bryson Tiller Style
// Trap soul: punchy drums, 808 bass, emotional minor 7ths

use crate::arranger::patterns::{DrumStyle, StyleBass};
use crate::arranger::song::{SectionType, SongForm};
use crate::theory::{ChordQuality, ScaleKind};
use super::types::*;

/// Create the Bryson Tiller style
pub fn bryson_style() -> ArtistStyle {
    ArtistStyle {
        id: "bryson".to_string(),
        name: "Bryson Tiller".to_string(),
        description: "Trap Soul - Emotional but Rhythmic".to_string(),
        color: "#dc2626".to_string(),
        tempo_range: (85, 100),
        swing: 0.12,
        style_tags: strings(&["trap-soul", "emotional", "rhythmic", "punchy", "introspective"]),
        chord_bank: strings(&["Am7", "Dm9", "G7sus4", "Em7b5", "Fmaj7", "Cmaj7", "Em7", "Bm7b5"]),
        preferred_types: vec![
            ChordQuality::Min7,
            ChordQuality::Min9,
            ChordQuality::Dom7,
            ChordQuality::Add9,
            ChordQuality::SevenSus4,
        ],
        hint: "Trap-soul R&B with punchy drums, emotional minor 7/9 chords and rhythmic melodies"
            .to_string(),
        song_form: SongForm::TrapSoul,
        sections: vec![
            section(SectionType::Intro, &[&["Am7", "Fmaj7"], &["Dm9", "Em7"]]),
            section(
                SectionType::Verse,
                &[
                    &["Am7", "Dm9", "Em7"],
                    &["Am7", "Fmaj7", "Dm9", "Em7"],
                    &["Dm9", "Am7", "G7sus4", "Fmaj7"],
                ],
            ),
            section(
                SectionType::PreChorus,
                &[&["Fmaj7", "G7sus4", "Am7", "Em7"], &["Dm9", "Em7b5", "Am7", "Fmaj7"]],
            ),
            section(
                SectionType::Chorus,
                &[
                    &["Am7", "Fmaj7", "G7sus4", "Cmaj7"],
                    &["Dm9", "Am7", "Fmaj7", "G7sus4"],
                    &["Am7", "Fmaj7", "Cmaj7", "G7sus4"],
                ],
            ),
            section(
                SectionType::Bridge,
                &[&["Em7b5", "Am7", "Dm9", "Fmaj7"], &["Bm7b5", "Am7", "G7sus4", "Fmaj7"]],
            ),
            section(SectionType::Breakdown, &[&["Am7", "Fmaj7"], &["Dm9", "G7sus4"]]),
            section(SectionType::Drop, &[&["Am7", "Fmaj7", "G7sus4", "Cmaj7"]]),
            section(SectionType::Outro, &[&["Am7", "Fmaj7", "Dm9"], &["G7sus4", "Am7"]]),
        ],
        drum_style: DrumStyle::TrapBounce,
        bass_style: StyleBass::Trap,
        scales: vec![ScaleKind::PentatonicMinor, ScaleKind::Blues, ScaleKind::Minor],
        progressions: vec![
            literal("Bryson Trap Soul", &["Cm7", "Abmaj7", "Bb7"], "Classic trap soul"),
            literal("Bryson Smooth", &["Fm7", "Dbmaj7", "Ebadd9"], "Smooth and dark"),
            literal("Bryson Dont", &["Cm7", "Abmaj7", "Bb7", "Gm7"], "Don't style"),
            literal("Bryson Exchange", &["Fm7", "Dbmaj7", "Ebmaj7", "Cm9"], "Exchange vibes"),
            literal("Bryson Melodic", &["Gm9", "Ebmaj7", "Dm7", "Cm9"], "Melodic trap"),
        ],
    }
}
