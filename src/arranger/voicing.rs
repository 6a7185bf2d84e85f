// Voicings - Named transforms over an ordered chord note list
// Applied after inversion and sorting, before scheduling

use serde::{Deserialize, Serialize};

use crate::theory::Pitch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Voicing {
    /// Identity
    Close,
    /// Second note from the bottom dropped an octave
    Drop2,
    /// Third note from the bottom dropped an octave
    Drop3,
    /// Second and fourth notes dropped an octave
    Drop24,
    /// Notes pushed apart by a growing offset
    Spread,
    /// Root, third and seventh
    Shell,
    /// Lowest note removed
    Rootless,
}

impl Voicing {
    pub const ALL: [Voicing; 7] = [
        Voicing::Close,
        Voicing::Drop2,
        Voicing::Drop3,
        Voicing::Drop24,
        Voicing::Spread,
        Voicing::Shell,
        Voicing::Rootless,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Voicing::Close => "Close Position",
            Voicing::Drop2 => "Drop 2",
            Voicing::Drop3 => "Drop 3",
            Voicing::Drop24 => "Drop 2+4",
            Voicing::Spread => "Spread",
            Voicing::Shell => "Shell (Root+3+7)",
            Voicing::Rootless => "Rootless",
        }
    }

    /// Parse from string; unknown voicings pass notes through unchanged
    pub fn from_string(s: &str) -> Self {
        match s {
            "close" => Voicing::Close,
            "drop2" => Voicing::Drop2,
            "drop3" => Voicing::Drop3,
            "drop24" => Voicing::Drop24,
            "spread" => Voicing::Spread,
            "shell" => Voicing::Shell,
            "rootless" => Voicing::Rootless,
            _ => Voicing::Close,
        }
    }

    pub fn to_string(&self) -> &'static str {
        match self {
            Voicing::Close => "close",
            Voicing::Drop2 => "drop2",
            Voicing::Drop3 => "drop3",
            Voicing::Drop24 => "drop24",
            Voicing::Spread => "spread",
            Voicing::Shell => "shell",
            Voicing::Rootless => "rootless",
        }
    }

    /// Indices lowered by an octave for the drop voicings
    fn drop_indices(&self) -> &'static [usize] {
        match self {
            Voicing::Drop2 => &[1],
            Voicing::Drop3 => &[2],
            Voicing::Drop24 => &[1, 3],
            _ => &[],
        }
    }

    /// Apply the voicing to an ascending note list
    ///
    /// Close, drop and spread keep the note count. Shell always returns
    /// three notes (root, third, seventh or top note) when given at least
    /// three, and rootless drops exactly the lowest note.
    pub fn apply(&self, notes: &[Pitch]) -> Vec<Pitch> {
        match self {
            Voicing::Close => notes.to_vec(),
            Voicing::Drop2 | Voicing::Drop3 | Voicing::Drop24 => {
                let mut result = notes.to_vec();
                for &idx in self.drop_indices() {
                    if let Some(note) = result.get_mut(idx) {
                        *note -= 12;
                    }
                }
                result.sort_unstable();
                result
            }
            Voicing::Spread => {
                if notes.is_empty() {
                    return Vec::new();
                }
                let step = 12 / notes.len() as Pitch;
                notes
                    .iter()
                    .enumerate()
                    .map(|(i, &note)| note + i as Pitch * step)
                    .collect()
            }
            Voicing::Shell => {
                if notes.len() < 3 {
                    return notes.to_vec();
                }
                // Triads have no seventh; take the top note instead
                let top = if notes.len() > 3 { 3 } else { notes.len() - 1 };
                vec![notes[0], notes[1], notes[top]]
            }
            Voicing::Rootless => notes.iter().skip(1).copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cmaj7 in close position at C3
    const CMAJ7: [Pitch; 4] = [48, 52, 55, 59];

    #[test]
    fn test_close_is_identity() {
        assert_eq!(Voicing::Close.apply(&CMAJ7), CMAJ7.to_vec());
    }

    #[test]
    fn test_drop2() {
        // E drops to E2 and becomes the bass
        assert_eq!(Voicing::Drop2.apply(&CMAJ7), vec![40, 48, 55, 59]);
    }

    #[test]
    fn test_drop3_and_drop24() {
        assert_eq!(Voicing::Drop3.apply(&CMAJ7), vec![43, 48, 52, 59]);
        assert_eq!(Voicing::Drop24.apply(&CMAJ7), vec![40, 47, 48, 55]);
    }

    #[test]
    fn test_drop_ignores_missing_indices() {
        // Three-note chord has no fourth note to drop
        assert_eq!(Voicing::Drop24.apply(&[48, 52, 55]), vec![40, 48, 55]);
    }

    #[test]
    fn test_spread() {
        // 12 / 4 = 3 semitones per step
        assert_eq!(Voicing::Spread.apply(&CMAJ7), vec![48, 55, 61, 68]);
        assert!(Voicing::Spread.apply(&[]).is_empty());
    }

    #[test]
    fn test_shell() {
        assert_eq!(Voicing::Shell.apply(&CMAJ7), vec![48, 52, 59]);
        assert_eq!(Voicing::Shell.apply(&[48, 52, 55, 59, 62]), vec![48, 52, 59]);
        assert_eq!(Voicing::Shell.apply(&[48, 50, 55]), vec![48, 50, 55]);
    }

    #[test]
    fn test_rootless() {
        assert_eq!(Voicing::Rootless.apply(&CMAJ7), vec![52, 55, 59]);
    }

    #[test]
    fn test_from_string_unknown_is_close() {
        assert_eq!(Voicing::from_string("drop24"), Voicing::Drop24);
        assert_eq!(Voicing::from_string("quartal"), Voicing::Close);
    }
}
