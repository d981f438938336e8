//! Benchmarks for delay line operations.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use blues_solo::dsp::delay::DelayLine;

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    // Delay times in samples
    let delay_times: &[usize] = &[
        480,   // 10ms at 48kHz
        12000, // 250ms, the lead preset echo
        48000, // 1 second at 48kHz
    ];

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        for &delay_samples in delay_times {
            let delay_ms = delay_samples as f32 / 48.0;

            let mut delay = DelayLine::new(96_000);
            let mut buffer = input.clone();
            group.bench_with_input(
                BenchmarkId::new(format!("render_{}ms", delay_ms as u32), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        buffer.copy_from_slice(&input);
                        delay.render(black_box(&mut buffer), black_box(delay_samples));
                    })
                },
            );
        }

        // Fractional read with a swept tap, as in chorus and flanger
        let mut delay = DelayLine::new(4800);
        for &sample in &input {
            delay.write(sample);
        }
        group.bench_with_input(BenchmarkId::new("read_interpolated", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for (i, &sample) in input.iter().enumerate() {
                    let tap = 960.0 + (i as f32 * 0.01).sin() * 96.0;
                    sum += delay.read_interpolated(black_box(tap));
                    delay.write(sample);
                }
                sum
            })
        });
    }

    group.finish();
}
