//! Benchmarks for the RBJ biquad sections.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use blues_solo::dsp::biquad::{Biquad, Coefficients};

use crate::BLOCK_SIZES;

pub fn bench_biquad(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/biquad");
    let sample_rate = 48_000.0;

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();
        let mut buffer = input.clone();

        // Voice tone filter
        let mut lowpass = Biquad::new(Coefficients::lowpass(3000.0, 1.0, sample_rate));
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                lowpass.render(black_box(&mut buffer));
            })
        });

        // Wah sweep: coefficients recomputed every sample
        let mut wah = Biquad::new(Coefficients::bandpass(800.0, 5.0, sample_rate));
        group.bench_with_input(BenchmarkId::new("bandpass_swept", size), &size, |b, _| {
            b.iter(|| {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let frequency = 400.0 + (i as f32 * 0.01).sin().abs() * 1600.0;
                    wah.set_coefficients(Coefficients::bandpass(frequency, 5.0, sample_rate));
                    *sample = wah.process(black_box(input[i]));
                }
            })
        });

        // Three-band EQ as three cascaded sections
        let mut eq = [
            Biquad::new(Coefficients::lowshelf(200.0, 4.0, sample_rate)),
            Biquad::new(Coefficients::peaking(1000.0, 1.0, 3.0, sample_rate)),
            Biquad::new(Coefficients::highshelf(3000.0, 2.0, sample_rate)),
        ];
        group.bench_with_input(BenchmarkId::new("eq_three_band", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                for band in &mut eq {
                    band.render(black_box(&mut buffer));
                }
            })
        });
    }

    group.finish();
}
