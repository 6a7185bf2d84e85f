// Variation Generator - Batches of distinct arrangements from one progression
// Tempo, swing, rhythm, bass, substitutions, inversions, voicings and melodies

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::library::{ArtistStyle, Catalog};
use crate::theory::{
    note_name, parse_chord_name_or_default, resolve_numeral_or_default, ChordSymbol, ScaleKind,
};
use super::chord::Chord;
use super::melody::{generate_melody, Melody, MelodyStyle};
use super::patterns::{BassPattern, ChordRhythm};
use super::voicing::Voicing;

/// Scales cycled across a batch when no scale is forced
pub const MELODY_SCALE_CYCLE: [ScaleKind; 5] = [
    ScaleKind::PentatonicMinor,
    ScaleKind::Dorian,
    ScaleKind::Minor,
    ScaleKind::Blues,
    ScaleKind::PentatonicMajor,
];

/// Where a base progression's chords come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "tokens")]
pub enum ProgressionSource {
    /// Roman numerals resolved against the key root
    Numerals(Vec<String>),
    /// Chord names, transposed up by the key root
    Names(Vec<String>),
}

impl ProgressionSource {
    pub fn tokens(&self) -> &[String] {
        match self {
            ProgressionSource::Numerals(tokens) | ProgressionSource::Names(tokens) => tokens,
        }
    }

    /// Resolve every token; unparseable tokens take the fallback chord
    pub fn resolve(&self, key: u8) -> Vec<ChordSymbol> {
        match self {
            ProgressionSource::Numerals(tokens) => tokens
                .iter()
                .map(|t| resolve_numeral_or_default(t, key))
                .collect(),
            ProgressionSource::Names(tokens) => tokens
                .iter()
                .map(|t| parse_chord_name_or_default(t).transposed(key as i32))
                .collect(),
        }
    }
}

/// Options for a generation batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    /// Number of arrangements to produce
    pub count: usize,

    /// Octave chords are built in (3 puts C at MIDI 48)
    pub octave: i32,

    /// Inclusive BPM range sampled per arrangement
    pub tempo_range: (u32, u32),

    /// Swing fraction range sampled per arrangement
    pub swing_range: (f64, f64),

    /// Fixed variation level; `None` ramps `0.3 + 0.1 * i` across the batch
    pub variation_level: Option<f64>,

    /// Fixed melody style; `None` cycles the styles
    pub melody_style: Option<MelodyStyle>,

    /// Fixed melody scale; `None` cycles `MELODY_SCALE_CYCLE`
    pub scale: Option<ScaleKind>,

    pub include_melody: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            count: 6,
            octave: 3,
            tempo_range: (70, 100),
            swing_range: (0.08, 0.22),
            variation_level: None,
            melody_style: None,
            scale: None,
            include_melody: true,
        }
    }
}

impl GeneratorOptions {
    /// Take tempo from the artist's range and swing from around its feel
    pub fn with_artist(mut self, artist: &ArtistStyle) -> Self {
        self.tempo_range = artist.tempo_range;
        self.swing_range = ((artist.swing - 0.05).max(0.0), (artist.swing + 0.05).min(1.0));
        self
    }
}

/// One generated take on a progression. Never mutated after generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrangement {
    pub id: Uuid,

    /// Position in its batch (0-based)
    pub index: usize,

    /// "Version N"
    pub name: String,

    /// "{rhythm} chords, {bass} bass"
    pub description: String,

    /// Key root pitch class
    pub key: u8,

    /// Progression tokens as given
    pub progression: Vec<String>,

    pub chords: Vec<Chord>,

    pub tempo: u32,

    pub swing: f64,

    pub chord_rhythm: ChordRhythm,

    pub bass_pattern: BassPattern,

    /// One melody per chord, when melodies were requested
    pub melodies: Option<Vec<Melody>>,

    pub melody_style: MelodyStyle,

    pub scale: ScaleKind,

    pub variation_level: f64,
}

impl Arrangement {
    pub fn key_name(&self) -> &'static str {
        note_name(self.key)
    }
}

/// Generate a batch of arrangements from one progression
///
/// # Arguments
/// * `catalog` - Source of the chord-rhythm and bass-pattern tables
/// * `progression` - Base progression
/// * `key` - Key root pitch class (0 = C)
/// * `options` - Batch options
/// * `rng` - Random source; ids come from it too, so a seed fixes the batch
///
/// # Returns
/// `options.count` arrangements with distinct ids
pub fn generate_variations<R: Rng + ?Sized>(
    catalog: &Catalog,
    progression: &ProgressionSource,
    key: u8,
    options: &GeneratorOptions,
    rng: &mut R,
) -> Vec<Arrangement> {
    let key = key % 12;
    let symbols = progression.resolve(key);

    let arrangements: Vec<Arrangement> = (0..options.count)
        .map(|index| generate_one(catalog, progression, &symbols, key, index, options, rng))
        .collect();

    log::info!(
        "Generated {} arrangements of {} chords in {}",
        arrangements.len(),
        symbols.len(),
        note_name(key)
    );
    arrangements
}

fn generate_one<R: Rng + ?Sized>(
    catalog: &Catalog,
    progression: &ProgressionSource,
    symbols: &[ChordSymbol],
    key: u8,
    index: usize,
    options: &GeneratorOptions,
    rng: &mut R,
) -> Arrangement {
    let variation_level = options
        .variation_level
        .unwrap_or(0.3 + 0.1 * index as f64)
        .clamp(0.0, 1.0);
    let melody_style = options
        .melody_style
        .unwrap_or(MelodyStyle::ALL[index % MelodyStyle::ALL.len()]);
    let scale = options
        .scale
        .unwrap_or(MELODY_SCALE_CYCLE[index % MELODY_SCALE_CYCLE.len()]);

    let (min_tempo, max_tempo) = options.tempo_range;
    let tempo = rng.gen_range(min_tempo.min(max_tempo)..=max_tempo.max(min_tempo));
    let (min_swing, max_swing) = options.swing_range;
    let swing = if max_swing > min_swing {
        rng.gen_range(min_swing..max_swing)
    } else {
        min_swing
    };

    let chord_rhythm = catalog
        .chord_rhythms
        .choose(rng)
        .cloned()
        .unwrap_or_else(super::patterns::piano_comp);
    let bass_pattern = catalog
        .bass_patterns
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| super::patterns::StyleBass::RootFifth.pattern());

    let chords: Vec<Chord> = symbols
        .iter()
        .map(|&symbol| vary_chord(symbol, variation_level, options.octave, rng))
        .collect();

    let melodies = options.include_melody.then(|| {
        chords
            .iter()
            .map(|chord| {
                let length = rng.gen_range(4..=8);
                generate_melody(chord, scale, length, melody_style, rng)
            })
            .collect()
    });

    let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();

    log::debug!(
        "Version {}: {} BPM, swing {:.2}, {} / {}",
        index + 1,
        tempo,
        swing,
        chord_rhythm.name,
        bass_pattern.name
    );

    Arrangement {
        id,
        index,
        name: format!("Version {}", index + 1),
        description: format!("{} chords, {} bass", chord_rhythm.name, bass_pattern.name),
        key,
        progression: progression.tokens().to_vec(),
        chords,
        tempo,
        swing,
        chord_rhythm,
        bass_pattern,
        melodies,
        melody_style,
        scale,
        variation_level,
    }
}

/// Substitute, invert and voice one chord
fn vary_chord<R: Rng + ?Sized>(
    symbol: ChordSymbol,
    variation_level: f64,
    octave: i32,
    rng: &mut R,
) -> Chord {
    let mut symbol = symbol;
    if rng.gen_bool((variation_level * 0.5).clamp(0.0, 1.0)) {
        if let Some(&quality) = symbol.quality.substitutions().choose(rng) {
            symbol = ChordSymbol::new(symbol.root, quality);
        }
    }

    let inversion = rng.gen_range(0..=2);
    let voicing = Voicing::ALL.choose(rng).copied().unwrap_or(Voicing::Close);

    Chord::instantiate(symbol, octave, inversion, voicing)
}
