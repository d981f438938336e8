//! Error types shared by the composition and audio engines.

use thiserror::Error;

/// A name or option that does not describe anything the engine knows about.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("unknown scale type `{0}` (expected minor, major or blues)")]
    UnknownScale(String),

    #[error("unknown progression `{0}` (expected twelve_bar or eight_bar)")]
    UnknownProgression(String),

    #[error("unknown effect preset `{0}`")]
    UnknownPreset(String),

    #[error("unknown effect module `{0}`")]
    UnknownEffect(String),

    #[error("root note {0} is out of range: the scale would leave MIDI 0..=127")]
    KeyOutOfRange(u8),

    #[error("invalid solo options: {0}")]
    InvalidOptions(&'static str),

    #[error("unsupported export document `{format}` version `{version}`")]
    UnsupportedExport { format: String, version: String },
}

/// A playback call made while the engine could not honor it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("the audio engine is not initialized")]
    NotInitialized,

    #[error("the audio engine is already initialized")]
    AlreadyInitialized,

    #[error("a solo is already playing")]
    AlreadyPlaying,

    #[error("the solo contains no notes")]
    EmptySolo,

    #[error("the solo has no phrases (use play_progression for sectioned solos)")]
    MissingPhrases,

    #[error("the solo has no sections (use play_solo for phrased solos)")]
    MissingSections,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error("audio device error: {0}")]
    AudioDevice(String),

    #[error("engine command queue is full")]
    QueueFull,

    #[error("failed to (de)serialize solo document")]
    Serialization(#[from] serde_json::Error),
}
