//! Benchmarks for audio-rate oscillators.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use blues_solo::dsp::oscillator::OscillatorBlock;

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let sample_rate = 48_000.0;

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut saw = OscillatorBlock::sawtooth();
        group.bench_with_input(BenchmarkId::new("sawtooth", size), &size, |b, _| {
            b.iter(|| saw.render(black_box(&mut buffer), black_box(220.0), sample_rate))
        });

        let mut sine = OscillatorBlock::sine();
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| sine.render(black_box(&mut buffer), black_box(440.0), sample_rate))
        });
    }

    group.finish();
}
