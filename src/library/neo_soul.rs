// Neo Soul Style
// ii-V-I turnarounds, 13ths and a walking bass behind the beat

use crate::arranger::patterns::{DrumStyle, StyleBass};
use crate::arranger::song::{SectionType, SongForm};
use crate::theory::{ChordQuality, ScaleKind};
use super::types::*;

/// Create the neo soul style
///
/// Heaviest swing in the catalog (0.22) and the only style using the
/// walking bass pattern.
pub fn neo_soul_style() -> ArtistStyle {
    ArtistStyle {
        id: "neo_soul".to_string(),
        name: "Neo Soul".to_string(),
        description: "D'Angelo / Erykah Badu Style".to_string(),
        color: "#15803d".to_string(),
        tempo_range: (80, 95),
        swing: 0.22,
        style_tags: strings(&["soulful", "jazzy", "groovy", "organic", "warm"]),
        chord_bank: strings(&["Dm9", "G13", "Cmaj9", "Am9", "Fmaj9", "Em7", "Bbmaj7", "A7#9"]),
        preferred_types: vec![
            ChordQuality::Min9,
            ChordQuality::Dom9,
            ChordQuality::Maj9,
            ChordQuality::Dom13,
        ],
        hint: "Neo-soul with ii-V-I turnarounds, jazzy extensions, behind the beat groove"
            .to_string(),
        song_form: SongForm::NeoSoul,
        sections: vec![
            section(SectionType::Intro, &[&["Dm9", "G13"], &["Fmaj9", "Em7"]]),
            section(
                SectionType::Verse,
                &[
                    &["Dm9", "G13", "Cmaj9", "Am9"],
                    &["Fmaj9", "Em7", "Am9", "Dm9"],
                    &["Am9", "Dm9", "G13", "Cmaj9"],
                ],
            ),
            section(
                SectionType::PreChorus,
                &[&["Fmaj9", "G13", "Am9", "Em7"], &["Dm9", "Em7", "Fmaj9", "G13"]],
            ),
            section(
                SectionType::Chorus,
                &[
                    &["Cmaj9", "Am9", "Dm9", "G13"],
                    &["Fmaj9", "Em7", "Dm9", "G13"],
                    &["Am9", "Fmaj9", "Dm9", "G13"],
                ],
            ),
            section(
                SectionType::Bridge,
                &[&["Bbmaj7", "A7#9", "Dm9", "G13"], &["Em7", "Am9", "Dm9", "G13"]],
            ),
            section(SectionType::Breakdown, &[&["Dm9", "Am9"], &["Fmaj9", "G13"]]),
            section(SectionType::Drop, &[&["Dm9", "G13", "Cmaj9"]]),
            section(SectionType::Outro, &[&["Dm9", "G13", "Cmaj9"], &["Am9", "Dm9", "G13"]]),
        ],
        drum_style: DrumStyle::NeoSoul,
        bass_style: StyleBass::Walking,
        scales: vec![ScaleKind::Dorian, ScaleKind::MelodicMinor, ScaleKind::Blues],
        progressions: vec![
            literal("Neo Soul Groove", &["Dm9", "G13", "Cmaj9", "Am9"], "Classic neo soul"),
            literal("Erykah Badu", &["Fmaj9", "Em7", "Am9", "Dm7"], "Baduizm style"),
            literal("D'Angelo", &["Gm9", "C13", "Fmaj9", "Bbmaj7"], "Voodoo vibes"),
            literal("Maxwell", &["Ebmaj9", "Cm9", "Fm9", "Bb13"], "Urban Suite"),
            literal("Jill Scott", &["Am9", "Dm9", "Gmaj9", "Cmaj9"], "Jill Scott feel"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neo_soul_style() {
        let style = neo_soul_style();

        assert_eq!(style.song_form, SongForm::NeoSoul);
        assert_eq!(style.bass_style, StyleBass::Walking);
        assert_eq!(style.progressions[2].chords[1], "C13");
    }
}
