// Song Structure - Multi-section song arrangements
// Expands an artist style into intro/verse/chorus/... sections with energy

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::library::ArtistStyle;
use super::chord::Chord;
use super::patterns::{BassPattern, DrumPattern};

/// Beats in one bar of every song form
pub const BEATS_PER_BAR: u32 = 4;

/// Type of song section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionType {
    /// Sets the mood
    Intro,

    Verse,

    /// Builds tension into the chorus
    PreChorus,

    /// Main hook, full energy
    Chorus,

    Bridge,

    /// Stripped back
    Breakdown,

    /// Impact moment after a breakdown
    Drop,

    Outro,
}

impl SectionType {
    pub const ALL: [SectionType; 8] = [
        SectionType::Intro,
        SectionType::Verse,
        SectionType::PreChorus,
        SectionType::Chorus,
        SectionType::Bridge,
        SectionType::Breakdown,
        SectionType::Drop,
        SectionType::Outro,
    ];

    /// Convert from string representation
    pub fn from_string(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "intro" => SectionType::Intro,
            "verse" => SectionType::Verse,
            "prechorus" | "pre_chorus" | "pre-chorus" => SectionType::PreChorus,
            "chorus" => SectionType::Chorus,
            "bridge" => SectionType::Bridge,
            "breakdown" => SectionType::Breakdown,
            "drop" => SectionType::Drop,
            "outro" => SectionType::Outro,
            _ => SectionType::Verse, // Default
        }
    }

    /// Convert to string representation
    pub fn to_string(&self) -> &'static str {
        match self {
            SectionType::Intro => "intro",
            SectionType::Verse => "verse",
            SectionType::PreChorus => "preChorus",
            SectionType::Chorus => "chorus",
            SectionType::Bridge => "bridge",
            SectionType::Breakdown => "breakdown",
            SectionType::Drop => "drop",
            SectionType::Outro => "outro",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SectionType::Intro => "Intro",
            SectionType::Verse => "Verse",
            SectionType::PreChorus => "Pre-Chorus",
            SectionType::Chorus => "Chorus",
            SectionType::Bridge => "Bridge",
            SectionType::Breakdown => "Breakdown",
            SectionType::Drop => "Drop",
            SectionType::Outro => "Outro",
        }
    }

    /// Canonical length in bars
    pub fn bars(&self) -> u32 {
        match self {
            SectionType::Verse | SectionType::Chorus => 8,
            _ => 4,
        }
    }

    /// Energy in [0, 1]; scales velocity, never pitch
    pub fn energy(&self) -> f64 {
        match self {
            SectionType::Intro => 0.3,
            SectionType::Verse => 0.5,
            SectionType::PreChorus => 0.7,
            SectionType::Chorus => 1.0,
            SectionType::Bridge => 0.6,
            SectionType::Breakdown => 0.25,
            SectionType::Drop => 0.9,
            SectionType::Outro => 0.3,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SectionType::Intro => "Set the mood",
            SectionType::Verse => "Tell the story - sparse m7 chords",
            SectionType::PreChorus => "Build tension - 9, 11, 13 extensions",
            SectionType::Chorus => "Main hook - lush maj7/maj9",
            SectionType::Bridge => "Change it up - modal (Dorian/Melodic Minor)",
            SectionType::Breakdown => "Strip it back",
            SectionType::Drop => "Impact moment",
            SectionType::Outro => "Fade out",
        }
    }
}

/// Fixed section orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SongForm {
    Standard,
    TrapSoul,
    DarkMinimal,
    BalladSlow,
    NeoSoul,
}

impl SongForm {
    pub fn from_string(s: &str) -> Self {
        match s {
            "standard" => SongForm::Standard,
            "trapSoul" => SongForm::TrapSoul,
            "darkMinimal" => SongForm::DarkMinimal,
            "balladSlow" => SongForm::BalladSlow,
            "neoSoul" => SongForm::NeoSoul,
            _ => SongForm::Standard, // Default
        }
    }

    pub fn to_string(&self) -> &'static str {
        match self {
            SongForm::Standard => "standard",
            SongForm::TrapSoul => "trapSoul",
            SongForm::DarkMinimal => "darkMinimal",
            SongForm::BalladSlow => "balladSlow",
            SongForm::NeoSoul => "neoSoul",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SongForm::Standard => "Standard R&B",
            SongForm::TrapSoul => "Trap Soul",
            SongForm::DarkMinimal => "Dark Minimal",
            SongForm::BalladSlow => "Slow Ballad",
            SongForm::NeoSoul => "Neo Soul",
        }
    }

    pub fn sections(&self) -> &'static [SectionType] {
        use SectionType::*;
        match self {
            SongForm::Standard => &[
                Intro, Verse, PreChorus, Chorus, Verse, PreChorus, Chorus, Bridge, Chorus, Outro,
            ],
            SongForm::TrapSoul => &[
                Intro, Verse, Chorus, Verse, Chorus, Breakdown, Drop, Chorus, Outro,
            ],
            SongForm::DarkMinimal => &[Intro, Verse, Chorus, Verse, Chorus, Breakdown, Outro],
            SongForm::BalladSlow => &[
                Intro, Verse, Verse, Chorus, Verse, Chorus, Bridge, Chorus, Outro,
            ],
            SongForm::NeoSoul => &[
                Intro, Verse, PreChorus, Chorus, Verse, Chorus, Bridge, Breakdown, Chorus, Outro,
            ],
        }
    }
}

/// One section of a song
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub section_type: SectionType,

    pub name: String,

    /// Starting bar number (0-indexed)
    pub start_bar: u32,

    pub bars: u32,

    pub energy: f64,

    pub description: String,

    /// Chord names as authored, before transposition
    pub progression: Vec<String>,

    pub chords: Vec<Chord>,
}

impl Section {
    /// Ending bar number (exclusive)
    pub fn end_bar(&self) -> u32 {
        self.start_bar + self.bars
    }

    pub fn contains_bar(&self, bar: u32) -> bool {
        bar >= self.start_bar && bar < self.end_bar()
    }

    /// Chord-layer velocity for this section's energy
    pub fn velocity(&self) -> u8 {
        energy_velocity(self.energy)
    }
}

/// `round(70 + energy * 20)`
pub fn energy_velocity(energy: f64) -> u8 {
    (70.0 + energy.clamp(0.0, 1.0) * 20.0).round() as u8
}

/// A full song for one artist style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongArrangement {
    pub artist: String,
    pub artist_id: String,
    pub form: SongForm,
    /// Display name of the form
    pub structure: String,
    pub tempo: u32,
    pub swing: f64,
    /// Semitones applied to every authored chord
    pub transpose: i32,
    pub sections: Vec<Section>,
    pub total_bars: u32,
    pub total_beats: u32,
    pub duration_seconds: f64,
    pub duration_formatted: String,
    pub drum_pattern: DrumPattern,
    pub bass_pattern: BassPattern,
    pub style_tags: Vec<String>,
    pub hint: String,
    pub color: String,
}

impl SongArrangement {
    /// Get the section playing at a bar
    pub fn section_at_bar(&self, bar: u32) -> Option<&Section> {
        self.sections.iter().find(|s| s.contains_bar(bar))
    }
}

/// Song length in seconds: `(bars * 4 / tempo) * 60`
pub fn song_duration_seconds(total_bars: u32, tempo: u32) -> f64 {
    if tempo == 0 {
        return 0.0;
    }
    (total_bars * BEATS_PER_BAR) as f64 / tempo as f64 * 60.0
}

/// Format seconds as `M:SS`
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Generate a full song for an artist style
///
/// # Arguments
/// * `artist` - Style supplying the form, progressions, tempo and groove
/// * `transpose` - Semitones applied to every chord
/// * `octave` - Octave chords are built in
/// * `rng` - Random source for tempo and progression choice
///
/// # Returns
/// Sections laid end to end with their chosen progressions resolved
pub fn generate_song_arrangement<R: Rng + ?Sized>(
    artist: &ArtistStyle,
    transpose: i32,
    octave: i32,
    rng: &mut R,
) -> SongArrangement {
    let (min_tempo, max_tempo) = artist.tempo_range;
    let tempo = rng.gen_range(min_tempo.min(max_tempo)..=max_tempo.max(min_tempo));

    let mut start_bar = 0;
    let sections: Vec<Section> = artist
        .song_form
        .sections()
        .iter()
        .map(|&section_type| {
            let choices = artist.section_progressions(section_type);
            let progression = choices.choose(rng).cloned().unwrap_or_default();
            let chords = progression
                .iter()
                .map(|name| Chord::from_name(name, octave).transposed(transpose))
                .collect();

            let section = Section {
                section_type,
                name: section_type.display_name().to_string(),
                start_bar,
                bars: section_type.bars(),
                energy: section_type.energy(),
                description: section_type.description().to_string(),
                progression,
                chords,
            };
            start_bar += section.bars;
            section
        })
        .collect();

    let total_bars = start_bar;
    let duration_seconds = song_duration_seconds(total_bars, tempo);

    log::info!(
        "Generated {} song for {}: {} sections, {} bars at {} BPM ({})",
        artist.song_form.name(),
        artist.name,
        sections.len(),
        total_bars,
        tempo,
        format_duration(duration_seconds)
    );

    SongArrangement {
        artist: artist.name.clone(),
        artist_id: artist.id.clone(),
        form: artist.song_form,
        structure: artist.song_form.name().to_string(),
        tempo,
        swing: artist.swing,
        transpose,
        sections,
        total_bars,
        total_beats: total_bars * BEATS_PER_BAR,
        duration_seconds,
        duration_formatted: format_duration(duration_seconds),
        drum_pattern: artist.drum_style.pattern(),
        bass_pattern: artist.bass_style.pattern(),
        style_tags: artist.style_tags.clone(),
        hint: artist.hint.clone(),
        color: artist.color.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Catalog;
    use crate::theory::pitch_class;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_section_type_table() {
        assert_eq!(SectionType::Verse.bars(), 8);
        assert_eq!(SectionType::PreChorus.bars(), 4);
        assert_eq!(SectionType::Chorus.energy(), 1.0);
        assert_eq!(SectionType::from_string("preChorus"), SectionType::PreChorus);
        assert_eq!(SectionType::from_string("unknown"), SectionType::Verse);
    }

    #[test]
    fn test_energy_velocity() {
        assert_eq!(energy_velocity(1.0), 90);
        assert_eq!(energy_velocity(0.25), 75);
        assert_eq!(energy_velocity(0.3), 76);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0:00");
        assert_eq!(format_duration(59.9), "0:59");
        assert_eq!(format_duration(125.0), "2:05");
    }

    #[test]
    fn test_standard_song_layout() {
        let catalog = Catalog::load();
        let sza = catalog.artist("sza").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let song = generate_song_arrangement(sza, 0, 3, &mut rng);

        // 4 + 8 + 4 + 8 + 8 + 4 + 8 + 4 + 8 + 4
        assert_eq!(song.sections.len(), 10);
        assert_eq!(song.total_bars, 60);
        assert_eq!(song.total_beats, 240);
        assert!((75..=85).contains(&song.tempo));
        let expected = 240.0 / song.tempo as f64 * 60.0;
        assert!((song.duration_seconds - expected).abs() < 1e-9);

        // Sections are contiguous
        for pair in song.sections.windows(2) {
            assert_eq!(pair[0].end_bar(), pair[1].start_bar);
        }
        assert_eq!(song.section_at_bar(0).map(|s| s.section_type), Some(SectionType::Intro));
        assert_eq!(song.section_at_bar(59).map(|s| s.section_type), Some(SectionType::Outro));
        assert!(song.section_at_bar(60).is_none());
    }

    #[test]
    fn test_song_transposes_chords() {
        let catalog = Catalog::load();
        let neo = catalog.artist("neo_soul").unwrap();

        let plain = generate_song_arrangement(neo, 0, 3, &mut ChaCha8Rng::seed_from_u64(9));
        let up = generate_song_arrangement(neo, 3, 3, &mut ChaCha8Rng::seed_from_u64(9));

        for (a, b) in plain.sections.iter().zip(&up.sections) {
            assert_eq!(a.progression, b.progression);
            for (x, y) in a.chords.iter().zip(&b.chords) {
                assert_eq!(pitch_class(y.notes[0]), pitch_class(x.notes[0] + 3));
            }
        }
    }

    #[test]
    fn test_song_uses_artist_groove() {
        let catalog = Catalog::load();
        let bryson = catalog.artist("bryson").unwrap();
        let song = generate_song_arrangement(bryson, 0, 3, &mut ChaCha8Rng::seed_from_u64(1));

        assert_eq!(song.form, SongForm::TrapSoul);
        assert_eq!(song.drum_pattern.name, "Trap Bounce");
        assert_eq!(song.bass_pattern.name, "Trap 808");
        assert_eq!(song.structure, "Trap Soul");
    }
}
