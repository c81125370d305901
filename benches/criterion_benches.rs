use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sokoban_solver::config::SearchConfig;
use sokoban_solver::{LoadLevel, Solve};

fn bench_two_boxes(c: &mut Criterion) {
    bench_level(c, &SearchConfig::default(), "levels/custom/04-two-boxes.txt");
}

fn bench_original_1(c: &mut Criterion) {
    bench_level(c, &SearchConfig::default(), "levels/original/1.txt");
}

fn bench_original_1_greedy(c: &mut Criterion) {
    // weighted for a single state, greedy from then on
    let config = SearchConfig {
        weighted_from: 1,
        greedy_after: 1,
    };
    bench_level(c, &config, "levels/original/1.txt");
}

fn bench_level(c: &mut Criterion, config: &SearchConfig, level_path: &str) {
    let level = level_path.load_level().unwrap();
    let name = format!(
        "{} ({}/{})",
        level_path, config.weighted_from, config.greedy_after
    );

    c.bench_function(&name, |b| {
        b.iter(|| level.solve(black_box(config), black_box(false)))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_two_boxes, bench_original_1, bench_original_1_greedy
}
criterion_main!(benches);
