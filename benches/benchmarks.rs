use bellplot::render::{density_samples, render, PlotSpec, RenderOptions, Viewport};
use bellplot::solver::{solve, DistributionParameters, QueryState};
use bellplot::stats::Normal;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

pub fn bench_solve(c: &mut Criterion) {
    let params = DistributionParameters::new(500.0, 100.0).unwrap();

    c.bench_function("solve for probability", |b| {
        b.iter(|| {
            solve(
                params,
                QueryState {
                    score: Some(black_box(650.0)),
                    probability: None,
                },
            )
        })
    });
    c.bench_function("solve for score", |b| {
        b.iter(|| {
            solve(
                params,
                QueryState {
                    score: None,
                    probability: Some(black_box(0.975)),
                },
            )
        })
    });
}

pub fn bench_density(c: &mut Criterion) {
    let normal = Normal::standard();
    c.bench_function("density samples", |b| {
        b.iter(|| density_samples(black_box(&normal)))
    });
}

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("Render");
    group.sample_size(10);

    let spec = PlotSpec {
        mean: 500.0,
        deviation: 100.0,
        score: 650.0,
        probability: 0.9331927987311419,
    };
    let viewport = Viewport::new(1920, 1080);

    for dpi in [50, 100, 200] {
        group.bench_with_input(BenchmarkId::new("render", dpi), &dpi, |b, dpi| {
            let options = RenderOptions {
                dpi: *dpi,
                ..Default::default()
            };
            b.iter(|| render(&spec, viewport, &options).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_solve, bench_density, bench_render);
criterion_main!(benches);
