use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/*
Pentatonic Scales
=================

Every scale is a root plus a fixed, ascending interval pattern:

    minor   0  3  5  7  10        (1 b3 4 5 b7)
    major   0  2  4  7  9         (1 2 3 5 6)
    blues   0  3  5  6  7  10     (minor pentatonic + b5)

The extra b5 of the blues scale is the "blue note", a tritone above the
root. Pitches are MIDI note numbers, tuned 12-TET against A4 = 440 Hz:

    f = 440 · 2^((p - 69) / 12)
*/

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Semitones from the root to the blue note.
pub const BLUE_NOTE_INTERVAL: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Minor,
    Major,
    #[default]
    Blues,
}

impl ScaleType {
    pub const ALL: [ScaleType; 3] = [ScaleType::Minor, ScaleType::Major, ScaleType::Blues];

    pub fn intervals(self) -> &'static [u8] {
        match self {
            Self::Minor => &[0, 3, 5, 7, 10],
            Self::Major => &[0, 2, 4, 7, 9],
            Self::Blues => &[0, 3, 5, 6, 7, 10],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Major => "major",
            Self::Blues => "blues",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScaleType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| ConfigurationError::UnknownScale(s.to_string()))
    }
}

/// A scale rooted on a concrete MIDI note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    root: u8,
    scale_type: ScaleType,
    pitches: Vec<u8>,
}

impl Scale {
    pub fn root(&self) -> u8 {
        self.root
    }

    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    /// Scale pitches, strictly ascending, starting at the root.
    pub fn pitches(&self) -> &[u8] {
        &self.pitches
    }

    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    pub fn note_names(&self) -> Vec<&'static str> {
        self.pitches.iter().map(|&p| midi_to_note_name(p)).collect()
    }

    /// The b5 of the scale, if the scale contains one.
    pub fn blue_note(&self) -> Option<u8> {
        self.root
            .checked_add(BLUE_NOTE_INTERVAL)
            .filter(|blue| self.pitches.contains(blue))
    }

    /// Whether `pitch` sits a tritone above this scale's root, in any octave.
    pub fn is_blue_note(&self, pitch: u8) -> bool {
        is_blue_note(self.root, pitch)
    }
}

/// Lay `scale_type`'s interval pattern onto `root`.
pub fn generate_scale(root: u8, scale_type: ScaleType) -> Result<Scale, ConfigurationError> {
    let pitches = scale_type
        .intervals()
        .iter()
        .map(|&interval| root.checked_add(interval).filter(|&p| p <= 127))
        .collect::<Option<Vec<u8>>>()
        .ok_or(ConfigurationError::KeyOutOfRange(root))?;

    Ok(Scale {
        root,
        scale_type,
        pitches,
    })
}

pub fn is_blue_note(root: u8, pitch: u8) -> bool {
    (i16::from(pitch) - i16::from(root)).rem_euclid(12) == i16::from(BLUE_NOTE_INTERVAL)
}

pub fn midi_to_freq(pitch: f32) -> f32 {
    440.0 * 2f32.powf((pitch - 69.0) / 12.0)
}

/// Fractional inverse of [`midi_to_freq`].
pub fn freq_to_midi(frequency: f32) -> f32 {
    69.0 + 12.0 * (frequency / 440.0).log2()
}

pub fn midi_to_note_name(pitch: u8) -> &'static str {
    NOTE_NAMES[usize::from(pitch % 12)]
}
