//! Benchmarks for partitioned convolution (the master reverb).

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use blues_solo::dsp::convolution::PartitionedConvolver;
use blues_solo::graph::reverb::{generate_impulse_response, CONVOLUTION_PARTITION};
use rand::{rngs::StdRng, SeedableRng};

use crate::BLOCK_SIZES;

pub fn bench_convolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/convolution");
    let sample_rate = 48_000.0;
    let mut rng = StdRng::seed_from_u64(1);

    let rooms: &[(&str, f32)] = &[
        ("room_0.5s", 0.5),
        ("room_2s", 2.0), // master bus default
    ];

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.05).sin() * 0.2).collect();
        let mut buffer = input.clone();

        for &(name, seconds) in rooms {
            let ir = generate_impulse_response(&mut rng, sample_rate, seconds, 3.0);
            let mut convolver = PartitionedConvolver::new(&ir, CONVOLUTION_PARTITION);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    convolver.render(black_box(&mut buffer));
                })
            });
        }
    }

    group.finish();
}
