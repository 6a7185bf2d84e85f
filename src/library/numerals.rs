// Numeral Progressions - Key-independent progressions grouped by category
// Resolved against the chosen key root when a batch is generated

use super::types::{Category, NumeralProgression};

/// Category id that matches every progression
pub const ALL_CATEGORY: &str = "all";

fn category(id: &str, name: &str, color: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        color: color.to_string(),
    }
}

/// Filter categories in display order, `all` first
pub fn categories() -> Vec<Category> {
    vec![
        category(ALL_CATEGORY, "All Styles", "#a855f7"),
        category("pnd", "PartyNextDoor", "#7c3aed"),
        category("bryson", "Bryson Tiller", "#dc2626"),
        category("sza", "SZA", "#ea580c"),
        category("rkelly", "R. Kelly Era", "#0891b2"),
        category("oldschool", "Old School", "#be185d"),
        category("neosoul", "Neo Soul", "#15803d"),
        category("modern", "Modern R&B", "#6366f1"),
    ]
}

/// (category, color, [(name, numerals, description)])
type CategoryTable = (&'static str, &'static str, &'static [(&'static str, &'static [&'static str], &'static str)]);

const TABLE: &[CategoryTable] = &[
    ("pnd", "#7c3aed", &[
        ("PND Dark Vibes", &["Imin9", "bVImaj7", "bVIImaj7", "Imin7"], "PartyNextDoor moody Toronto sound"),
        ("PND Recognize", &["Imin7", "IVmin7", "bVImaj7", "V7"], "That \"Recognize\" atmosphere"),
        ("OVO Nights", &["VImin9", "IVmaj7", "Imin7", "V7"], "Late night OVO vibes"),
        ("PND Come and See Me", &["Imin7", "bVIImaj7", "IVmin7", "bVImaj7"], "Emotional PND ballad style"),
        ("PND Break From Toronto", &["Imin9", "bVImaj7", "IVmin7", "V7"], "Haunting late-night feel"),
    ]),
    ("bryson", "#dc2626", &[
        ("Bryson Don't", &["VImin7", "IVmaj7", "Imaj7", "V7"], "That \"Don't\" trap soul sound"),
        ("Bryson Exchange", &["IImin9", "V7", "Imaj9", "VImin7"], "Smooth Bryson melodies"),
        ("Trap Soul", &["Imin7", "bVImaj9", "IVmin7", "bVII7"], "Classic TRAPSOUL album feel"),
        ("Anniversary Vibes", &["Imaj9", "VImin7", "IImin7", "V7"], "Anniversary album atmosphere"),
        ("Bryson Right My Wrongs", &["Imin7", "bVImaj7", "bVII7", "Imin7"], "Emotional apology track"),
    ]),
    ("sza", "#ea580c", &[
        ("SZA CTRL", &["IVmaj9", "IIImin7", "VImin9", "Imaj7"], "CTRL album neo-soul jazz"),
        ("SZA Love Galore", &["IImin9", "V7", "Imaj7", "VImin7"], "That \"Love Galore\" bounce"),
        ("SZA Good Days", &["Imaj9", "IVmaj7", "VImin7", "IIImin7"], "Dreamy uplifting SZA"),
        ("SZA Kill Bill", &["Imin7", "IVmaj7", "bVImaj7", "V7"], "SOS era dark pop R&B"),
        ("SZA The Weekend", &["VImin9", "IVmaj7", "V7", "Imaj7"], "Smooth subtle groove"),
        ("SZA Snooze", &["Imaj7", "VImin7", "IVmaj7", "IImin7"], "Tender ballad vibes"),
    ]),
    ("rkelly", "#0891b2", &[
        ("Bump N Grind", &["Imaj7", "IVmaj7", "IImin7", "V7"], "90s slow jam classic"),
        ("Ignition", &["Imaj7", "VImin7", "IVmaj7", "V7"], "That bounce remix feel"),
        ("Stepper", &["Imaj9", "IImin7", "IIImin7", "IVmaj7"], "Chicago stepper groove"),
        ("12 Play", &["IImin9", "V7", "Imaj9", "VImin7"], "Silky 12 Play era"),
        ("I Believe", &["Imaj7", "Imin7", "IVmaj7", "V7"], "Gospel-influenced ballad"),
        ("Honey Love", &["Imaj9", "IVmaj7", "Imaj9", "V7"], "Slow sensual groove"),
    ]),
    ("oldschool", "#be185d", &[
        ("Jodeci Freek'n You", &["Imin9", "IVmin7", "bVImaj7", "V7"], "Jodeci dark sensual vibes"),
        ("Boyz II Men", &["Imaj7", "VImin7", "IImin7", "V7"], "End Of The Road harmonies"),
        ("TLC Creep", &["Imin7", "IVmaj7", "bVIImaj7", "bVImaj7"], "TLC smooth groove"),
        ("Aaliyah One In A Million", &["IImin7", "V7", "Imaj7", "IVmaj7"], "Timbaland-Aaliyah futuristic"),
        ("Usher Confessions", &["Imin7", "bVImaj7", "bVIImaj7", "V7"], "Confessions era drama"),
        ("Keith Sweat", &["Imaj7", "IImin7", "IVmaj7", "V7"], "New Jack Swing slow jam"),
        ("Mary J. Blige", &["Imin7", "IVmin7", "bVImaj7", "V7"], "Queen of Hip-Hop Soul"),
        ("SWV Weak", &["Imaj7", "VImin7", "IVmaj7", "V7"], "Classic SWV ballad"),
        ("Toni Braxton", &["Imin7", "bVImaj7", "bVII7", "Imin7"], "Un-Break My Heart drama"),
    ]),
    ("neosoul", "#15803d", &[
        ("D'Angelo Untitled", &["IVmaj7", "IIImin7", "VImin7", "V7"], "Voodoo album neo-soul"),
        ("Erykah Badu", &["IImin9", "V7", "Imaj9", "IVmaj7"], "Baduizm vibes"),
        ("Lauryn Hill", &["Imaj7", "VImin7", "IImin7", "V7"], "Miseducation classic"),
        ("Maxwell", &["IImin9", "IIImin7", "IVmaj7", "V7"], "Urban Hang Suite smooth"),
        ("Musiq Soulchild", &["Imaj9", "IVmaj7", "IImin7", "V7"], "Just Friends vibes"),
        ("Jill Scott", &["IImin9", "V7", "Imaj7", "VImin7"], "Golden warmth"),
    ]),
    ("modern", "#6366f1", &[
        ("Frank Ocean", &["VImin9", "IV6/9", "Imaj9", "V7"], "Blonde/Channel Orange dreamy"),
        ("The Weeknd", &["Imin7", "bVImaj7", "IVmaj7", "bVIImaj7"], "Dark Toronto pop R&B"),
        ("Daniel Caesar", &["Imaj9", "IVmaj7", "VImin7", "V7"], "Get You gospel soul"),
        ("Summer Walker", &["Imin7", "IVmin7", "bVImaj7", "V7"], "Over It vulnerable vibes"),
        ("Giveon", &["Imaj7", "VImin7", "IImin9", "V7"], "Deep baritone soul"),
        ("H.E.R.", &["IImin9", "V7", "Imaj9", "IVmaj7"], "Focus R&B soul"),
        ("Brent Faiyaz", &["Imin7", "bVImaj7", "bVII7", "V7"], "Wasteland dark vibes"),
        ("Lucky Daye", &["IVmaj9", "IIImin7", "VImin7", "V7"], "Painted funky soul"),
    ]),
];

/// Every numeral progression, grouped by category in table order
pub fn numeral_progressions() -> Vec<NumeralProgression> {
    TABLE
        .iter()
        .flat_map(|(category, color, entries)| {
            entries.iter().map(move |(name, numerals, description)| NumeralProgression {
                name: name.to_string(),
                numerals: numerals.iter().map(|n| n.to_string()).collect(),
                description: description.to_string(),
                category: category.to_string(),
                color: color.to_string(),
            })
        })
        .collect()
}
