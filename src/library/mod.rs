// Library Module
// Versioned, read-only catalog of artist styles, progressions and patterns

pub mod types;
mod bryson;
mod dark_rnb;
mod modern;
mod neo_soul;
mod numerals;
mod old_school;
mod pnd;
mod summer_walker;
mod sza;

use crate::arranger::patterns::{self, BassPattern, ChordRhythm};

pub use numerals::ALL_CATEGORY;
pub use types::{
    ArtistStyle, ArtistSummary, Category, LiteralProgression, NumeralProgression,
    SectionProgressions,
};

/// Bumped whenever catalog content changes
pub const CATALOG_VERSION: u32 = 1;

/// Everything the generators read. Built once and shared by reference;
/// nothing mutates it after `load`.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub version: u32,
    pub artists: Vec<ArtistStyle>,
    pub numeral_progressions: Vec<NumeralProgression>,
    pub categories: Vec<Category>,
    pub chord_rhythms: Vec<ChordRhythm>,
    pub bass_patterns: Vec<BassPattern>,
}

impl Catalog {
    pub fn load() -> Self {
        let catalog = Catalog {
            version: CATALOG_VERSION,
            artists: vec![
                sza::sza_style(),
                pnd::pnd_style(),
                bryson::bryson_style(),
                summer_walker::summer_walker_style(),
                dark_rnb::dark_rnb_style(),
                neo_soul::neo_soul_style(),
                old_school::old_school_style(),
                modern::modern_style(),
            ],
            numeral_progressions: numerals::numeral_progressions(),
            categories: numerals::categories(),
            chord_rhythms: patterns::chord_rhythms(),
            bass_patterns: patterns::generator_bass_patterns(),
        };

        log::info!(
            "Loaded catalog v{}: {} artists, {} numeral progressions",
            catalog.version,
            catalog.artists.len(),
            catalog.numeral_progressions.len()
        );
        catalog
    }

    /// Get an artist style by id
    ///
    /// Matching ignores case, and `-`, `_` and spaces, so "Summer Walker",
    /// "summer-walker" and "summerWalker" all resolve.
    pub fn artist(&self, id: &str) -> Option<&ArtistStyle> {
        let wanted = normalize_id(id);
        self.artists
            .iter()
            .find(|a| normalize_id(&a.id) == wanted || normalize_id(&a.name) == wanted)
    }

    /// List all artists with summaries
    pub fn list_artists(&self) -> Vec<ArtistSummary> {
        self.artists.iter().map(|a| a.summary()).collect()
    }

    /// Numeral progressions in a category; `all` returns every one
    pub fn progressions_in(&self, category: &str) -> Vec<&NumeralProgression> {
        self.numeral_progressions
            .iter()
            .filter(|p| category == ALL_CATEGORY || p.category == category)
            .collect()
    }

    pub fn numeral_progression(&self, name: &str) -> Option<&NumeralProgression> {
        self.numeral_progressions
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::load()
    }
}

fn normalize_id(id: &str) -> String {
    id.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(|c| c.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arranger::patterns::CHORD_SPAN_BEATS;
    use crate::arranger::song::SectionType;
    use crate::theory::parse_chord_name;

    #[test]
    fn test_artist_lookup() {
        let catalog = Catalog::load();

        assert!(catalog.artist("sza").is_some());
        assert_eq!(
            catalog.artist("summerWalker").map(|a| a.id.as_str()),
            Some("summer_walker")
        );
        assert_eq!(catalog.artist("Dark R&B").map(|a| a.id.as_str()), Some("dark_rnb"));
        assert_eq!(catalog.artist("dark-rnb").map(|a| a.id.as_str()), Some("dark_rnb"));
        assert!(catalog.artist("NON_EXISTENT").is_none());
    }

    #[test]
    fn test_list_artists() {
        let catalog = Catalog::load();
        let artists = catalog.list_artists();

        assert_eq!(artists.len(), 8);
        assert!(artists.iter().any(|a| a.name == "Neo Soul"));
        assert!(artists.iter().all(|a| a.tempo_range.0 <= a.tempo_range.1));
    }

    #[test]
    fn test_category_filter() {
        let catalog = Catalog::load();

        assert_eq!(catalog.progressions_in(ALL_CATEGORY).len(), 45);
        let neo = catalog.progressions_in("neosoul");
        assert_eq!(neo.len(), 6);
        assert!(neo.iter().all(|p| p.category == "neosoul"));
        assert!(catalog.progressions_in("polka").is_empty());
    }

    #[test]
    fn test_every_authored_chord_parses() {
        let catalog = Catalog::load();
        for artist in &catalog.artists {
            let authored = artist
                .sections
                .iter()
                .flat_map(|s| s.progressions.iter().flatten())
                .chain(artist.chord_bank.iter())
                .chain(artist.progressions.iter().flat_map(|p| p.chords.iter()));
            for name in authored {
                assert!(parse_chord_name(name).is_ok(), "{} ({})", name, artist.id);
            }
        }
    }

    #[test]
    fn test_every_section_has_a_progression() {
        let catalog = Catalog::load();
        for artist in &catalog.artists {
            for section in SectionType::ALL {
                let progressions = artist.section_progressions(section);
                assert!(!progressions.is_empty());
                assert!(progressions.iter().all(|p| !p.is_empty()));
            }
        }
    }

    #[test]
    fn test_catalog_patterns_fit_span() {
        let catalog = Catalog::load();
        assert_eq!(catalog.version, CATALOG_VERSION);
        assert!(catalog.chord_rhythms.iter().all(|r| r.fits_span(CHORD_SPAN_BEATS)));
        assert!(catalog.bass_patterns.iter().all(|b| b.fits_span(CHORD_SPAN_BEATS)));
    }
}
