use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gambit_engine::fen::Fen;
use gambit_engine::perft::*;
use gambit_engine::*;

pub fn criterion_perft_small_benchmark(c: &mut Criterion) {
    // Setup
    let mut start = Game::start_position();
    let mut kiwipete =
        Game::parse_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();

    // Benchmarks

    c.bench_function("start_position: perft(1)", |b| {
        b.iter(|| {
            let info = perft(black_box(&mut start), black_box(1)).unwrap();
            assert_eq!(info.nodes, 20);
        })
    });

    c.bench_function("start_position: perft(2)", |b| {
        b.iter(|| {
            let info = perft(black_box(&mut start), black_box(2)).unwrap();
            assert_eq!(info.nodes, 400);
        })
    });

    c.bench_function("start_position: perft(3)", |b| {
        b.iter(|| {
            let info = perft(black_box(&mut start), black_box(3)).unwrap();
            assert_eq!(info.nodes, 8_902);
        })
    });

    c.bench_function("kiwipete: perft(2)", |b| {
        b.iter(|| {
            let info = perft(black_box(&mut kiwipete), black_box(2)).unwrap();
            assert_eq!(info.nodes, 2_039);
        })
    });
}

/// Large number of positions to search, > 100,000
pub fn criterion_perft_large_benchmark(c: &mut Criterion) {
    let mut start = Game::start_position();

    c.bench_function("start_position: perft(4)", |b| {
        b.iter(|| {
            let info = perft(black_box(&mut start), black_box(4)).unwrap();
            assert_eq!(info.nodes, 197_281);
        })
    });
}

criterion_group! {
    name = small_benches;
    config = Criterion::default().without_plots().sample_size(30);
    targets = criterion_perft_small_benchmark
}
criterion_group! {
    name = large_benches;
    config = Criterion::default().without_plots().sample_size(10);
    targets = criterion_perft_large_benchmark
}
criterion_main!(small_benches, large_benches);
