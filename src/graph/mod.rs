//! Block-rendering effect nodes.
//!
//! Each node wraps the low-level DSP primitives with the knob layout of one
//! pedal: a settings struct in user units, a parameter enum for single-knob
//! updates, and a fixed internal topology that is re-parameterized in place.

/// Feed-forward compressor with a wide soft knee.
pub mod compressor;
/// Three-band shelving/peaking EQ.
pub mod eq;
/// Chorus (modulated short delay).
pub mod chorus;
/// Feedback echo.
pub mod delay;
/// Guitar overdrive.
pub mod distortion;
/// Flanger (modulated very short delay with feedback).
pub mod flanger;
/// Core traits shared by all graph nodes.
pub mod node;
/// Six-stage all-pass phaser.
pub mod phaser;
/// Convolution reverb with a synthesized room.
pub mod reverb;
/// Band-pass wah with optional auto sweep.
pub mod wah;

pub use node::{Configurable, GraphNode, RenderCtx};
