//! Benchmarks for real-world signal paths.

mod pedals;
mod voices;

pub use pedals::bench_pedals;
pub use voices::bench_voices;
