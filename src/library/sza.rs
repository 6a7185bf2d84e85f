// SZA Style
// Ethereal, floating: open maj7/maj9 chords and airy add9 colour

use crate::arranger::patterns::{DrumStyle, StyleBass};
use crate::arranger::song::{SectionType, SongForm};
use crate::theory::{ChordQuality, ScaleKind};
use super::types::*;

/// Create the SZA style
///
/// Characteristics:
/// - 75-85 BPM with a loose, behind-the-beat swing
/// - Neo-soul drums under a root-fifth bass
/// - Verse loops built on vi-IV-I-V shapes
pub fn sza_style() -> ArtistStyle {
    ArtistStyle {
        id: "sza".to_string(),
        name: "SZA".to_string(),
        description: "Ethereal, Floating, Emotional".to_string(),
        color: "#ea580c".to_string(),
        tempo_range: (75, 85),
        swing: 0.15,
        style_tags: strings(&["ethereal", "floaty", "emotional", "spacey", "nostalgic"]),
        chord_bank: strings(&["Cmaj7", "Fmaj9", "Am9", "Dm7", "E7#9", "Gadd9", "Em7", "Gsus2"]),
        preferred_types: vec![
            ChordQuality::Maj7,
            ChordQuality::Maj9,
            ChordQuality::Min7,
            ChordQuality::Min9,
            ChordQuality::Add9,
        ],
        hint: "Ethereal, airy, nostalgic R&B with open maj7/maj9 chords and floaty melodies"
            .to_string(),
        song_form: SongForm::Standard,
        sections: vec![
            section(SectionType::Intro, &[&["Fmaj9", "Gadd9"], &["Am9", "Fmaj9"]]),
            section(
                SectionType::Verse,
                &[
                    &["Am9", "Fmaj9", "Cmaj7", "Gadd9"],
                    &["Dm7", "Am9", "Fmaj9", "Em7"],
                    &["Cmaj7", "Em7", "Am9", "Fmaj9"],
                ],
            ),
            section(
                SectionType::PreChorus,
                &[&["Dm7", "E7#9", "Am9", "Fmaj9"], &["Fmaj9", "Gadd9", "Am9", "Em7"]],
            ),
            section(
                SectionType::Chorus,
                &[
                    &["Cmaj7", "Gadd9", "Am9", "Fmaj9"],
                    &["Fmaj9", "Cmaj7", "Gadd9", "Am9"],
                    &["Am9", "Fmaj9", "Cmaj7", "Gadd9"],
                ],
            ),
            section(
                SectionType::Bridge,
                &[&["Dm7", "Cmaj7", "Am9", "E7#9"], &["Em7", "Fmaj9", "Dm7", "Gadd9"]],
            ),
            section(SectionType::Breakdown, &[&["Am9", "Fmaj9"], &["Cmaj7", "Gadd9"]]),
            section(SectionType::Drop, &[&["Fmaj9", "Gadd9", "Am9"]]),
            section(
                SectionType::Outro,
                &[&["Fmaj9", "Cmaj7", "Am9"], &["Gadd9", "Fmaj9", "Cmaj7"]],
            ),
        ],
        drum_style: DrumStyle::NeoSoul,
        bass_style: StyleBass::RootFifth,
        scales: vec![ScaleKind::Dorian, ScaleKind::Major, ScaleKind::PentatonicMinor],
        progressions: vec![
            literal("SZA Spacey", &["Fmaj9", "Gsus2", "Em7"], "Classic floaty wash"),
            literal("SZA Soft", &["Dm9", "Am7", "Cadd9"], "Soft & emotional"),
            literal("SZA CTRL", &["Am9", "Fmaj9", "Dm9", "Em7"], "CTRL album vibes"),
            literal("SZA Alt Soul", &["Em7", "Cmaj7", "Dadd9", "Bm7"], "Alternative soul"),
            literal("SZA Dreamy", &["Fmaj7", "Gsus2", "Am9", "Em7"], "Extended dreamy"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sza_style() {
        let style = sza_style();

        assert_eq!(style.id, "sza");
        assert_eq!(style.tempo_range, (75, 85));
        assert_eq!(style.song_form, SongForm::Standard);
        assert_eq!(style.drum_style, DrumStyle::NeoSoul);
        assert_eq!(style.progressions.len(), 5);
        assert_eq!(style.section_progressions(SectionType::Verse).len(), 3);
    }
}
