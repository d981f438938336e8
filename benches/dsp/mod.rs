//! Benchmarks for low-level DSP primitives.

mod biquad;
mod convolution;
mod delay;
mod distortion;
mod oscillator;

pub use biquad::bench_biquad;
pub use convolution::bench_convolution;
pub use delay::bench_delay;
pub use distortion::bench_distortion;
pub use oscillator::bench_oscillator;
