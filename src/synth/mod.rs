// Per-note voices: additive guitar tone, programmed envelope and the
// articulation (bend, slide, vibrato, ...) each note is played with.

pub mod params;
pub mod technique;
pub mod voice;

pub use params::SynthParams;
pub use voice::Voice;

use crate::composition::Technique;

/// Build the voice for one note, starting at frame 0.
pub fn render_note(
    frequency: f32,
    duration: f32,
    technique: Technique,
    params: &SynthParams,
    sample_rate: f32,
) -> Voice {
    Voice::new(frequency, duration, technique, params, sample_rate, 0)
}
