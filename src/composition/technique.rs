use serde::{Deserialize, Serialize};
use std::fmt;

/// How a note is articulated. Drives the voice's pitch and gain modulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Technique {
    /// Pitch rises from a tone below into the note
    Bend,
    /// Pitch glides up from further below
    Slide,
    Vibrato,
    /// Harmonics start bright and settle
    Hammer,
    /// Note starts at half level with no pick attack
    Pull,
    #[default]
    Normal,
}

impl Technique {
    pub const ALL: [Technique; 6] = [
        Technique::Bend,
        Technique::Slide,
        Technique::Vibrato,
        Technique::Hammer,
        Technique::Pull,
        Technique::Normal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Bend => "bend",
            Self::Slide => "slide",
            Self::Vibrato => "vibrato",
            Self::Hammer => "hammer",
            Self::Pull => "pull",
            Self::Normal => "normal",
        }
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
