//! Procedural blues soloing.
//!
//! A solo is built from scales ([`scale`]), optionally laid over a chord
//! progression ([`progression`]). Melodies come from a bounded random walk
//! over scale degrees ([`lick`]) zipped with a fixed rhythm template
//! ([`rhythm`]). [`generator`] stitches the pieces into a [`solo::Solo`],
//! and [`export`] writes it out as a JSON document.

pub mod export;
pub mod generator;
pub mod lick;
pub mod progression;
pub mod rhythm;
pub mod scale;
pub mod solo;
pub mod technique;

pub use generator::{SoloGenerator, SoloOptions};
pub use progression::{ChordDegree, Progression};
pub use rhythm::{Emphasis, RhythmStep};
pub use scale::{Scale, ScaleType};
pub use solo::{Note, Phrase, Section, Solo, SoloBody, SoloMetadata};
pub use technique::Technique;
