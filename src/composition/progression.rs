use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scale degree a bar is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordDegree {
    I,
    IV,
    V,
}

impl ChordDegree {
    /// Semitones above the key.
    pub fn offset(self) -> u8 {
        match self {
            Self::I => 0,
            Self::IV => 5,
            Self::V => 7,
        }
    }
}

impl fmt::Display for ChordDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::I => "I",
            Self::IV => "IV",
            Self::V => "V",
        })
    }
}

/// One bar of a progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub chord: ChordDegree,
    pub beats: u32,
}

const fn bar(chord: ChordDegree, beats: u32) -> Bar {
    Bar { chord, beats }
}

use ChordDegree::{I, IV, V};

const TWELVE_BAR: [Bar; 12] = [
    bar(I, 4),
    bar(I, 4),
    bar(I, 4),
    bar(I, 4),
    bar(IV, 4),
    bar(IV, 4),
    bar(I, 4),
    bar(I, 4),
    bar(V, 4),
    bar(IV, 4),
    bar(I, 4),
    bar(V, 4),
];

const EIGHT_BAR: [Bar; 8] = [
    bar(I, 2),
    bar(IV, 2),
    bar(I, 2),
    bar(V, 2),
    bar(IV, 2),
    bar(I, 2),
    bar(V, 2),
    bar(I, 2),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Progression {
    #[default]
    TwelveBar,
    EightBar,
}

impl Progression {
    pub const ALL: [Progression; 2] = [Progression::TwelveBar, Progression::EightBar];

    pub fn name(self) -> &'static str {
        match self {
            Self::TwelveBar => "twelve_bar",
            Self::EightBar => "eight_bar",
        }
    }

    pub fn bars(self) -> &'static [Bar] {
        match self {
            Self::TwelveBar => &TWELVE_BAR,
            Self::EightBar => &EIGHT_BAR,
        }
    }
}

impl fmt::Display for Progression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Progression {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| ConfigurationError::UnknownProgression(s.to_string()))
    }
}
