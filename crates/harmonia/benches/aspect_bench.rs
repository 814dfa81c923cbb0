use criterion::{black_box, criterion_group, criterion_main, Criterion};
use harmonia::aspects::AspectAnalyzer;
use harmonia::{CelestialBody, Position};

fn positions(offset: f64) -> Vec<Position> {
    CelestialBody::ALL
        .iter()
        .enumerate()
        .map(|(i, &body)| Position {
            body,
            longitude: (i as f64 * 37.0 + offset) % 360.0,
            latitude: 0.0,
            distance_au: 1.0,
            daily_speed: 1.0,
        })
        .collect()
}

fn bench_detect_aspect(c: &mut Criterion) {
    let analyzer = AspectAnalyzer::new();

    c.bench_function("detect_aspect", |b| {
        b.iter(|| {
            analyzer.detect_aspect(
                black_box(100.0),
                black_box(282.0),
                black_box(CelestialBody::Sun),
                black_box(CelestialBody::Saturn),
            )
        })
    });
}

fn bench_detect_all(c: &mut Criterion) {
    let analyzer = AspectAnalyzer::new();
    let natal = positions(0.0);
    let transit = positions(13.5);

    c.bench_function("detect_all", |b| {
        b.iter(|| analyzer.detect_all(black_box(&natal), black_box(&transit)))
    });
}

criterion_group!(benches, bench_detect_aspect, bench_detect_all);
criterion_main!(benches);
