use crate::dsp::EnvelopeShape;
use serde::{Deserialize, Serialize};

/// Fundamental plus five overtones.
pub const HARMONIC_COUNT: usize = 6;

/// Partials at or below this relative amplitude are not rendered.
pub const PARTIAL_THRESHOLD: f32 = 0.01;

/// Voice settings shared by every note.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthParams {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
    /// Relative amplitude of partial `n`, which sounds at `(n + 1) · f`
    pub harmonics: [f32; HARMONIC_COUNT],
}

impl Default for SynthParams {
    fn default() -> Self {
        let shape = EnvelopeShape::default();
        Self {
            attack: shape.attack,
            decay: shape.decay,
            sustain: shape.sustain,
            release: shape.release,
            harmonics: [1.0, 0.5, 0.25, 0.15, 0.1, 0.05],
        }
    }
}

impl SynthParams {
    pub fn envelope_shape(&self) -> EnvelopeShape {
        EnvelopeShape {
            attack: self.attack,
            decay: self.decay,
            sustain: self.sustain,
            release: self.release,
        }
    }

    /// Indices of the partials loud enough to render.
    pub fn audible_partials(&self) -> impl Iterator<Item = usize> + '_ {
        self.harmonics
            .iter()
            .enumerate()
            .filter(|(_, &amplitude)| amplitude > PARTIAL_THRESHOLD)
            .map(|(index, _)| index)
    }
}
