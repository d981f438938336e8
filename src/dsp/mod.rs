//! Low-level DSP primitives used by the voices and effect nodes.
//!
//! Everything here is allocation-free once constructed, so the primitives can
//! be embedded directly inside voice and effect structs that live on the audio
//! thread. They stay focused on signal-processing math; routing and parameter
//! plumbing happen one level up in `graph` and `effects`.

/// Timed parameter automation (set / linear / exponential ramps).
pub mod automation;
/// RBJ cookbook biquad filters.
pub mod biquad;
/// Uniformly partitioned FFT convolution.
pub mod convolution;
/// Circular delay line with fractional reads.
pub mod delay;
/// Guitar-style waveshaping curve.
pub mod distortion;
/// Envelope follower and compressor gain computer.
pub mod dynamics;
/// Programmed per-note amplitude envelope.
pub mod envelope;
/// Sine low frequency oscillator.
pub mod lfo;
/// Dry/wet blending and bus summing.
pub mod mix;
/// Audio-rate oscillators.
pub mod oscillator;

pub use automation::Automation;
pub use biquad::Biquad;
pub use envelope::{Envelope, EnvelopeShape};
