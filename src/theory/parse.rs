// Chord Parsing - Chord names and roman numerals to chord symbols
// Strict Result-returning parsers plus logging fallbacks for batch generation

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::chords::ChordQuality;
use super::notes::{note_name, parse_pitch_class};

/// Errors produced by the strict parsers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Empty chord name")]
    Empty,

    #[error("Unknown root note in '{0}'")]
    UnknownRoot(String),

    #[error("Unknown chord quality '{suffix}' in '{input}'")]
    UnknownQuality { input: String, suffix: String },

    #[error("Unknown roman numeral in '{0}'")]
    UnknownNumeral(String),
}

/// A parsed chord: root pitch class and quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChordSymbol {
    /// Root pitch class (0-11)
    pub root: u8,
    pub quality: ChordQuality,
}

impl ChordSymbol {
    /// Chord used when a name or numeral cannot be parsed
    pub const FALLBACK: ChordSymbol = ChordSymbol {
        root: 0,
        quality: ChordQuality::Maj7,
    };

    pub fn new(root: u8, quality: ChordQuality) -> Self {
        ChordSymbol {
            root: root % 12,
            quality,
        }
    }

    /// Same quality, root moved by `semitones`
    pub fn transposed(&self, semitones: i32) -> Self {
        ChordSymbol {
            root: (self.root as i32 + semitones).rem_euclid(12) as u8,
            quality: self.quality,
        }
    }

    /// Display name using sharp spellings ("F#min9")
    pub fn name(&self) -> String {
        format!("{}{}", note_name(self.root), self.quality.symbol())
    }
}

/// Quality tokens in match priority order, most specific first.
/// Short aliases map onto the canonical catalog entries.
const QUALITY_TOKENS: &[(&str, ChordQuality)] = &[
    ("maj7#11", ChordQuality::Maj7Sharp11),
    ("M7#11", ChordQuality::Maj7Sharp11),
    ("maj9", ChordQuality::Maj9),
    ("Maj9", ChordQuality::Maj9),
    ("M9", ChordQuality::Maj9),
    ("maj7", ChordQuality::Maj7),
    ("Maj7", ChordQuality::Maj7),
    ("M7", ChordQuality::Maj7),
    ("min11", ChordQuality::Min11),
    ("m11", ChordQuality::Min11),
    ("min9", ChordQuality::Min9),
    ("m9", ChordQuality::Min9),
    ("-9", ChordQuality::Min9),
    ("m7b5", ChordQuality::HalfDim7),
    ("ø7", ChordQuality::HalfDim7),
    ("ø", ChordQuality::HalfDim7),
    ("min7", ChordQuality::Min7),
    ("m7", ChordQuality::Min7),
    ("-7", ChordQuality::Min7),
    ("7sus4", ChordQuality::SevenSus4),
    ("7#9", ChordQuality::Dom7Sharp9),
    ("dom9", ChordQuality::Dom9),
    ("dom7", ChordQuality::Dom7),
    ("13", ChordQuality::Dom13),
    ("6/9", ChordQuality::SixNine),
    ("69", ChordQuality::SixNine),
    ("add9", ChordQuality::Add9),
    ("sus2", ChordQuality::Sus2),
    ("sus4", ChordQuality::Sus4),
    ("dim7", ChordQuality::Dim7),
    ("aug", ChordQuality::Aug),
    ("m6", ChordQuality::Min6),
    ("6", ChordQuality::Six),
    ("9", ChordQuality::Dom9),
    ("7", ChordQuality::Dom7),
];

/// Match a whole quality suffix against the token table
pub fn match_quality(suffix: &str) -> Option<ChordQuality> {
    QUALITY_TOKENS
        .iter()
        .find(|(token, _)| *token == suffix)
        .map(|(_, quality)| *quality)
}

/// Quality for a suffix, including the bare forms ("" and "m"/"min")
fn chord_name_quality(suffix: &str) -> Option<ChordQuality> {
    match suffix {
        "" => Some(ChordQuality::Maj7),
        "m" | "min" => Some(ChordQuality::Min7),
        _ => match_quality(suffix),
    }
}

/// Parse a chord name such as "Ebmaj7", "F#m9" or "Bb7"
///
/// # Arguments
/// * `name` - Root letter, optional `#`/`b`, then a quality suffix
///
/// # Returns
/// The root pitch class and quality, or a `ParseError` naming what failed
pub fn parse_chord_name(name: &str) -> Result<ChordSymbol, ParseError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ParseError::Empty);
    }

    let (root, consumed) =
        parse_pitch_class(name).ok_or_else(|| ParseError::UnknownRoot(name.to_string()))?;
    let suffix = &name[consumed..];

    let quality = chord_name_quality(suffix).ok_or_else(|| ParseError::UnknownQuality {
        input: name.to_string(),
        suffix: suffix.to_string(),
    })?;

    Ok(ChordSymbol::new(root, quality))
}

/// Parse a chord name, resolving anything unparseable to C maj7
///
/// Used by generators so a bad name never aborts a batch; the failure is
/// reported as a warning instead.
pub fn parse_chord_name_or_default(name: &str) -> ChordSymbol {
    parse_chord_name(name).unwrap_or_else(|e| {
        log::warn!("{}; using {}", e, ChordSymbol::FALLBACK.name());
        ChordSymbol::FALLBACK
    })
}

/// Semitone offset of a base numeral above the key root
fn numeral_offset(flat: bool, base: &str) -> Option<u8> {
    let offset = match (flat, base) {
        (false, "I") => 0,
        (false, "II") => 2,
        (false, "III") => 4,
        (false, "IV") => 5,
        (false, "V") => 7,
        (false, "VI") => 9,
        (false, "VII") => 11,
        (true, "II") => 1,
        (true, "III") => 3,
        (true, "V") => 6,
        (true, "VI") => 8,
        (true, "VII") => 10,
        _ => return None,
    };
    Some(offset)
}

/// Split "bVImaj7" into (flat, "VI", "maj7")
fn split_numeral(token: &str) -> (bool, &str, &str) {
    let (flat, rest) = match token.strip_prefix('b') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    let base_len = rest
        .char_indices()
        .find(|(_, c)| *c != 'I' && *c != 'V')
        .map(|(i, _)| i)
        .unwrap_or(rest.len());

    (flat, &rest[..base_len], &rest[base_len..])
}

/// Quality for a numeral tail. Never fails: bare and unrecognized tails
/// become maj7, "min"/"m" become min7, and a trailing 7 becomes dom7.
fn numeral_quality(suffix: &str) -> ChordQuality {
    if let Some(quality) = match_quality(suffix) {
        return quality;
    }
    if suffix == "min" || suffix == "m" {
        return ChordQuality::Min7;
    }
    if suffix.ends_with('7') {
        return ChordQuality::Dom7;
    }
    if !suffix.is_empty() {
        log::debug!("Unrecognized numeral quality '{}', using maj7", suffix);
    }
    ChordQuality::Maj7
}

/// Resolve a roman numeral ("I", "bVI", "IVmaj9", "VImin7") against a key
///
/// # Arguments
/// * `token` - Numeral with optional leading `b` and quality suffix
/// * `key_root` - Pitch class of the key (0 = C)
///
/// # Returns
/// The chord with root `(key_root + offset) mod 12`, or
/// `ParseError::UnknownNumeral` if the base numeral is not in the table
pub fn resolve_numeral(token: &str, key_root: u8) -> Result<ChordSymbol, ParseError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ParseError::Empty);
    }

    let (flat, base, suffix) = split_numeral(token);
    let offset =
        numeral_offset(flat, base).ok_or_else(|| ParseError::UnknownNumeral(token.to_string()))?;

    Ok(ChordSymbol::new((key_root % 12 + offset) % 12, numeral_quality(suffix)))
}

/// Resolve a numeral, treating an unknown base numeral as offset 0
pub fn resolve_numeral_or_default(token: &str, key_root: u8) -> ChordSymbol {
    match resolve_numeral(token, key_root) {
        Ok(symbol) => symbol,
        Err(e) => {
            log::warn!("{}; using the key root", e);
            let (_, _, suffix) = split_numeral(token.trim());
            ChordSymbol::new(key_root, numeral_quality(suffix))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sharp_minor_ninth() {
        let chord = parse_chord_name("F#m9").unwrap();
        assert_eq!(chord.root, 6); // F#
        assert_eq!(chord.quality, ChordQuality::Min9);
    }

    #[test]
    fn test_parse_flats_normalize_down_a_semitone() {
        let chord = parse_chord_name("Ebmaj7").unwrap();
        assert_eq!(chord.root, 3);
        assert_eq!(chord.quality, ChordQuality::Maj7);

        let chord = parse_chord_name("Bb7").unwrap();
        assert_eq!(chord.root, 10);
        assert_eq!(chord.quality, ChordQuality::Dom7);
    }

    #[test]
    fn test_specific_tokens_win() {
        assert_eq!(parse_chord_name("Cmaj9").unwrap().quality, ChordQuality::Maj9);
        assert_eq!(parse_chord_name("Em7b5").unwrap().quality, ChordQuality::HalfDim7);
        assert_eq!(parse_chord_name("G7sus4").unwrap().quality, ChordQuality::SevenSus4);
        assert_eq!(parse_chord_name("E7#9").unwrap().quality, ChordQuality::Dom7Sharp9);
        assert_eq!(parse_chord_name("Fmaj7#11").unwrap().quality, ChordQuality::Maj7Sharp11);
        assert_eq!(parse_chord_name("G13").unwrap().quality, ChordQuality::Dom13);
        assert_eq!(parse_chord_name("Dm11").unwrap().quality, ChordQuality::Min11);
        assert_eq!(parse_chord_name("F9").unwrap().quality, ChordQuality::Dom9);
    }

    #[test]
    fn test_bare_root_and_minor() {
        assert_eq!(parse_chord_name("A").unwrap(), ChordSymbol::new(9, ChordQuality::Maj7));
        assert_eq!(parse_chord_name("Am").unwrap(), ChordSymbol::new(9, ChordQuality::Min7));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_chord_name(""), Err(ParseError::Empty));
        assert!(matches!(parse_chord_name("Hmaj7"), Err(ParseError::UnknownRoot(_))));
        assert!(matches!(
            parse_chord_name("Cwobble"),
            Err(ParseError::UnknownQuality { .. })
        ));
    }

    #[test]
    fn test_parse_fallback_is_c_maj7() {
        assert_eq!(parse_chord_name_or_default("nonsense"), ChordSymbol::FALLBACK);
        assert_eq!(parse_chord_name_or_default("Dwobble"), ChordSymbol::FALLBACK);
    }

    #[test]
    fn test_resolve_flat_six_in_c() {
        let chord = resolve_numeral("bVImaj7", 0).unwrap();
        assert_eq!(chord.root, 8); // Ab
        assert_eq!(chord.quality, ChordQuality::Maj7);
    }

    #[test]
    fn test_resolve_numeral_qualities() {
        assert_eq!(resolve_numeral("IVmaj9", 0).unwrap(), ChordSymbol::new(5, ChordQuality::Maj9));
        assert_eq!(resolve_numeral("VImin7", 0).unwrap(), ChordSymbol::new(9, ChordQuality::Min7));
        assert_eq!(resolve_numeral("Imin9", 2).unwrap(), ChordSymbol::new(2, ChordQuality::Min9));
        assert_eq!(resolve_numeral("IV6/9", 0).unwrap(), ChordSymbol::new(5, ChordQuality::SixNine));
        assert_eq!(resolve_numeral("I", 7).unwrap(), ChordSymbol::new(7, ChordQuality::Maj7));
        assert_eq!(resolve_numeral("IIIm", 0).unwrap(), ChordSymbol::new(4, ChordQuality::Min7));
    }

    #[test]
    fn test_trailing_seven_is_dominant() {
        assert_eq!(resolve_numeral("V7", 0).unwrap(), ChordSymbol::new(7, ChordQuality::Dom7));
        assert_eq!(resolve_numeral("bVII7", 0).unwrap(), ChordSymbol::new(10, ChordQuality::Dom7));
    }

    #[test]
    fn test_key_wraps_mod_12() {
        // VII in B is A#
        assert_eq!(resolve_numeral("VII", 11).unwrap().root, 10);
    }

    #[test]
    fn test_unknown_numeral() {
        assert!(matches!(resolve_numeral("VIII", 0), Err(ParseError::UnknownNumeral(_))));
        assert!(matches!(resolve_numeral("bIV", 0), Err(ParseError::UnknownNumeral(_))));

        // Fallback keeps the quality but uses offset 0
        let chord = resolve_numeral_or_default("VIIImin9", 5);
        assert_eq!(chord, ChordSymbol::new(5, ChordQuality::Min9));
    }

    #[test]
    fn test_symbol_name() {
        assert_eq!(ChordSymbol::new(6, ChordQuality::Min9).name(), "F#min9");
        assert_eq!(ChordSymbol::new(0, ChordQuality::Maj7).transposed(-1).root, 11);
    }
}
