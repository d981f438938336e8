//! Benchmarks for guitar voices.
//!
//! One voice per note, rendered the way the renderer mixes them into the
//! dry bus.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use blues_solo::composition::Technique;
use blues_solo::synth::{SynthParams, Voice};

use crate::BLOCK_SIZES;

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let sample_rate = 48_000.0;
    let params = SynthParams::default();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Long notes so the voice never finishes mid-benchmark
        for technique in [Technique::Normal, Technique::Bend, Technique::Vibrato] {
            let mut voice = Voice::new(220.0, 3600.0, technique, &params, sample_rate, 0);
            let mut frame = 0u64;
            group.bench_with_input(BenchmarkId::new(technique.name(), size), &size, |b, _| {
                b.iter(|| {
                    buffer.fill(0.0);
                    voice.render_add(black_box(&mut buffer), frame);
                    frame += size as u64;
                })
            });
        }

        // A chord's worth of overlapping notes
        let mut voices: Vec<Voice> = [196.0, 247.0, 294.0, 392.0]
            .iter()
            .map(|&f| Voice::new(f, 3600.0, Technique::Normal, &params, sample_rate, 0))
            .collect();
        let mut frame = 0u64;
        group.bench_with_input(BenchmarkId::new("four_voices", size), &size, |b, _| {
            b.iter(|| {
                buffer.fill(0.0);
                for voice in &mut voices {
                    voice.render_add(black_box(&mut buffer), frame);
                }
                frame += size as u64;
            })
        });
    }

    group.finish();
}
