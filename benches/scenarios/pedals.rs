//! Benchmarks for the pedalboard.
//!
//! Every pedal alone, then the full board in chain order.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use blues_solo::effects::{build_chain, EffectKind, EffectModule, EnabledSet};
use blues_solo::graph::{GraphNode, RenderCtx};

use crate::BLOCK_SIZES;

pub fn bench_pedals(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/pedals");
    let sample_rate = 48_000.0;
    let ctx = RenderCtx::new(sample_rate);

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.03).sin() * 0.5).collect();
        let mut buffer = input.clone();

        for kind in EffectKind::CHAIN_ORDER {
            let mut module = EffectModule::new(kind, sample_rate);
            group.bench_with_input(BenchmarkId::new(kind.name(), size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    module.render_block(black_box(&mut buffer), &ctx);
                })
            });
        }

        let mut board = EffectModule::board(sample_rate);
        let chain = build_chain(EffectKind::CHAIN_ORDER.into_iter().collect::<EnabledSet>());
        group.bench_with_input(BenchmarkId::new("full_board", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                chain.route(&mut board, black_box(&mut buffer), &ctx);
            })
        });
    }

    group.finish();
}
