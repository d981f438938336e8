//! Benchmarks for the overdrive curve.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use blues_solo::dsp::distortion::guitar_curve;

use crate::BLOCK_SIZES;

pub fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/distortion");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();
        let mut buffer = input.clone();

        for &(name, k) in &[("gain_35", 35.0f32), ("gain_75", 75.0)] {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for (out, &sample) in buffer.iter_mut().zip(&input) {
                        *out = guitar_curve(black_box(sample), black_box(k));
                    }
                })
            });
        }
    }

    group.finish();
}
