use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use juliox::painter::{GreyscalePainter, Painter};
use juliox::{build_grid, DivergenceConfig, Region};

fn bench_build_grid(crit: &mut Criterion) {
    let region = Region::default();
    let mut group = crit.benchmark_group("build_grid");
    for resolution in [500, 1000, 2000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(resolution),
            &resolution,
            |b, &resolution| b.iter(|| build_grid(black_box(&region), resolution)),
        );
    }
    group.finish();
}

fn bench_paint(crit: &mut Criterion) {
    let map = DivergenceConfig::default()
        .with_window(20, 100)
        .with_resolution(1000)
        .over(&Region::default())
        .expect("valid config");
    let painter = GreyscalePainter::new();
    crit.bench_function("paint-1000", |b| b.iter(|| painter.paint(black_box(&map))));
}

criterion_group!(benches, bench_build_grid, bench_paint);
criterion_main!(benches);
