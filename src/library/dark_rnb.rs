// Dark R&B Style
// Haunting and nocturnal; i-bVI-bVII over minimal drums

use crate::arranger::patterns::{DrumStyle, StyleBass};
use crate::arranger::song::{SectionType, SongForm};
use crate::theory::{ChordQuality, ScaleKind};
use super::types::*;

pub fn dark_rnb_style() -> ArtistStyle {
    ArtistStyle {
        id: "dark_rnb".to_string(),
        name: "Dark R&B".to_string(),
        description: "Haunting, Atmospheric, Nocturnal".to_string(),
        color: "#1e293b".to_string(),
        tempo_range: (65, 75),
        swing: 0.06,
        style_tags: strings(&["dark", "haunting", "atmospheric", "nocturnal", "moody"]),
        chord_bank: strings(&["Am9", "Fmaj7", "Gmaj7", "Em11", "Dm9", "Bbmaj9", "Cm9", "Ebmaj7"]),
        preferred_types: vec![ChordQuality::Min9, ChordQuality::Min11, ChordQuality::Maj7],
        hint: "Moody verses, nocturnal vibes with i-bVI-bVII progressions".to_string(),
        song_form: SongForm::DarkMinimal,
        sections: vec![
            section(SectionType::Intro, &[&["Am9", "Fmaj7"], &["Em11", "Dm9"]]),
            section(
                SectionType::Verse,
                &[
                    &["Am9", "Fmaj7", "Gmaj7"],
                    &["Em11", "Dm9", "Am9", "Fmaj7"],
                    &["Dm9", "Am9", "Gmaj7", "Fmaj7"],
                ],
            ),
            section(
                SectionType::PreChorus,
                &[&["Fmaj7", "Gmaj7", "Am9", "Em11"], &["Dm9", "Em11", "Am9", "Fmaj7"]],
            ),
            section(
                SectionType::Chorus,
                &[
                    &["Am9", "Fmaj7", "Gmaj7", "Em11"],
                    &["Em11", "Am9", "Fmaj7", "Gmaj7"],
                    &["Dm9", "Am9", "Fmaj7", "Gmaj7"],
                ],
            ),
            section(
                SectionType::Bridge,
                &[&["Cm9", "Bbmaj9", "Ebmaj7", "Am9"], &["Dm9", "Am9", "Em11", "Fmaj7"]],
            ),
            section(SectionType::Breakdown, &[&["Am9", "Em11"], &["Fmaj7", "Dm9"]]),
            section(SectionType::Drop, &[&["Am9", "Fmaj7", "Gmaj7"]]),
            section(SectionType::Outro, &[&["Am9", "Fmaj7", "Gmaj7"], &["Em11", "Am9"]]),
        ],
        drum_style: DrumStyle::Minimal,
        bass_style: StyleBass::Sustained,
        scales: vec![ScaleKind::Minor, ScaleKind::PentatonicMinor, ScaleKind::Blues],
        progressions: vec![
            literal("Dark Haunting", &["Em9", "Cmaj7", "Dadd9", "Bm7"], "Haunting vibes"),
            literal("Dark Weeknd", &["Am9", "Fmaj7", "Dm9", "Em7"], "Weeknd style"),
            literal("Dark Ambient", &["Bm9", "Gmaj7", "Dmaj7", "Am9"], "Ambient dark"),
            literal("Dark Minor", &["Dm9", "Bbmaj7", "Gm9", "Am7"], "Deep minor"),
            literal("Dark Ethereal", &["Em11", "Cmaj9", "Am9", "Bm7"], "Ethereal darkness"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_rnb_style() {
        let style = dark_rnb_style();

        assert_eq!(style.tempo_range, (65, 75));
        assert_eq!(style.drum_style, DrumStyle::Minimal);
        assert_eq!(style.scales[0], ScaleKind::Minor);
    }
}
