use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use sdf::{distance, render, Resolution};

fn bench_distance(c: &mut Criterion) {
    c.bench_function("scene_distance", |b| {
        b.iter(|| distance(black_box(Vec3::new(0.1, 0.2, 0.3)), black_box(2.0)));
    });
}

fn bench_frame(c: &mut Criterion) {
    let resolution = Resolution::new(320, 180);
    c.bench_function("cpu_frame_320x180", |b| {
        b.iter(|| render(black_box(2.0), &resolution));
    });
}

criterion_group!(benches, bench_distance, bench_frame);
criterion_main!(benches);
