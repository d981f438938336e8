use rand::Rng;
use serde::{Deserialize, Serialize};

/// Eighth-note hit templates, tiled over the phrase.
pub const RHYTHM_PATTERNS: [[bool; 8]; 5] = [
    // straight eighths
    [true, false, true, false, true, false, true, false],
    // syncopated
    [true, false, false, true, true, false, false, true],
    // shuffle
    [true, true, false, true, false, true, true, false],
    [true, false, true, true, false, true, false, false],
    // sparse
    [true, false, false, false, true, false, true, false],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    Strong,
    Medium,
    Weak,
}

impl Emphasis {
    /// Downbeats of each half bar are strong, other on-beats medium.
    pub fn at(step: usize) -> Self {
        if step % 4 == 0 {
            Self::Strong
        } else if step % 2 == 0 {
            Self::Medium
        } else {
            Self::Weak
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhythmStep {
    pub hit: bool,
    /// Eighth-note slot within the bar, 0..8
    pub subdivision: u8,
    pub emphasis: Emphasis,
}

/// Tile `pattern` over `length` steps.
pub fn rhythm_from_pattern(pattern: &[bool; 8], length: usize) -> Vec<RhythmStep> {
    (0..length)
        .map(|i| RhythmStep {
            hit: pattern[i % pattern.len()],
            subdivision: (i % 8) as u8,
            emphasis: Emphasis::at(i),
        })
        .collect()
}

/// Pick one of [`RHYTHM_PATTERNS`] and tile it over `length` steps.
pub fn generate_rhythm<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Vec<RhythmStep> {
    let pattern = &RHYTHM_PATTERNS[rng.gen_range(0..RHYTHM_PATTERNS.len())];
    rhythm_from_pattern(pattern, length)
}
