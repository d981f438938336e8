pub mod composition; // Scales, progressions, licks and solos
pub mod dsp;
pub mod effects; // Pedal modules, chain routing and presets
pub mod engine; // Audio session, scheduling and rendering
pub mod error;
pub mod graph; // Block-rendering effect nodes
pub mod synth; // Per-note voices and technique modulation

pub use composition::{
    generator::{SoloGenerator, SoloOptions},
    progression::Progression,
    scale::{generate_scale, midi_to_freq, ScaleType},
    solo::Solo,
};
pub use effects::{EffectKind, Preset};
pub use engine::{config::EngineConfig, AudioEngine};
pub use error::{ConfigurationError, EngineError, PreconditionError};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
