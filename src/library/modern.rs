// Modern R&B Style
// Frank Ocean / Daniel Caesar: maj9 and sus colours over a bounce

use crate::arranger::patterns::{DrumStyle, StyleBass};
use crate::arranger::song::{SectionType, SongForm};
use crate::theory::{ChordQuality, ScaleKind};
use super::types::*;

pub fn modern_style() -> ArtistStyle {
    ArtistStyle {
        id: "modern".to_string(),
        name: "Modern R&B".to_string(),
        description: "Frank Ocean, Daniel Caesar".to_string(),
        color: "#6366f1".to_string(),
        tempo_range: (70, 90),
        swing: 0.14,
        style_tags: strings(&["modern", "dreamy", "alternative", "lush"]),
        chord_bank: strings(&["Cmaj9", "Am9", "Fmaj9", "Gsus2", "Gmaj9", "Em9", "Dadd9", "Dm9"]),
        preferred_types: vec![
            ChordQuality::Maj9,
            ChordQuality::Min9,
            ChordQuality::Sus2,
            ChordQuality::Add9,
        ],
        hint: "Modern alternative R&B with lush maj9/min9 chords and airy sus colours".to_string(),
        song_form: SongForm::Standard,
        sections: vec![
            section(
                SectionType::Verse,
                &[&["Cmaj9", "Am9", "Fmaj9", "Gsus2"], &["Am9", "Em7", "Fmaj9", "Dm9"]],
            ),
            section(
                SectionType::Chorus,
                &[&["Gmaj9", "Em9", "Cmaj9", "Dadd9"], &["Dm9", "Am9", "Fmaj7", "G7"]],
            ),
            section(SectionType::Bridge, &[&["Bbmaj9", "Gm9", "Ebmaj7", "F9"]]),
        ],
        drum_style: DrumStyle::Bounce,
        bass_style: StyleBass::Octave,
        scales: vec![ScaleKind::PentatonicMajor, ScaleKind::Dorian, ScaleKind::Mixolydian],
        progressions: vec![
            literal("Frank Ocean", &["Cmaj9", "Am9", "Fmaj9", "Gsus2"], "Blonde vibes"),
            literal("Daniel Caesar", &["Gmaj9", "Em9", "Cmaj9", "Dadd9"], "Get You style"),
            literal("Giveon", &["Dm9", "Am9", "Fmaj7", "G7"], "Deep baritone"),
            literal("H.E.R.", &["Bbmaj9", "Gm9", "Ebmaj7", "F9"], "Focus R&B"),
            literal("Brent Faiyaz", &["Am9", "Em7", "Fmaj9", "Dm9"], "Wasteland"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modern_style() {
        let style = modern_style();

        assert_eq!(style.drum_style, DrumStyle::Bounce);
        assert_eq!(style.bass_style, StyleBass::Octave);
        assert_eq!(style.progressions.len(), 5);
    }
}
