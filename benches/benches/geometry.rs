// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `panview_geometry` conversions and constraints.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use panview_geometry::{CoordFrame, GeometryModel, Transform};

fn model() -> GeometryModel {
    let mut geometry = GeometryModel::new(Size::new(1280.0, 720.0), 64.0);
    geometry.set_scene_rect(Rect::new(0.0, 0.0, 16384.0, 9216.0));
    geometry.set_scene_default_rect(Some(Rect::new(4096.0, 2048.0, 8192.0, 4096.0)));
    geometry
}

fn bench_conversions(c: &mut Criterion) {
    let geometry = model();
    let t = Transform::relative(Point::new(0.4, 0.6), 2.5);
    let points: Vec<Point> = (0..1024)
        .map(|i| Point::new(f64::from(i % 32) * 40.0, f64::from(i / 32) * 22.5))
        .collect();

    let mut group = c.benchmark_group("geometry/convert");
    for frame in [CoordFrame::View, CoordFrame::Relative] {
        group.bench_with_input(
            BenchmarkId::new("to_scene_point", format!("{frame:?}")),
            &frame,
            |b, &frame| {
                b.iter(|| {
                    let mut acc = Point::ZERO;
                    for &p in &points {
                        let s = geometry.to_scene_point(black_box(p), frame, &t);
                        acc.x += s.x;
                        acc.y += s.y;
                    }
                    black_box(acc)
                });
            },
        );
    }
    group.bench_function("to_view_rect", |b| {
        let rect = Rect::new(5000.0, 3000.0, 5200.0, 3100.0);
        b.iter(|| black_box(geometry.to_view_rect(black_box(rect), CoordFrame::Scene, &t)));
    });
    group.finish();
}

fn bench_constraints(c: &mut Criterion) {
    let geometry = model();
    let mut group = c.benchmark_group("geometry/constrain");
    group.bench_function("constrain", |b| {
        let t = Transform::scene(Point::new(-1e5, 3e4), 40.0);
        b.iter(|| black_box(geometry.constrain(black_box(t), None)));
    });
    group.bench_function("apply_zoom_pivot", |b| {
        let t = Transform::relative(Point::new(0.5, 0.5), 1.0);
        let pivot = Some((Point::new(300.0, 200.0), CoordFrame::View));
        b.iter(|| black_box(geometry.apply_zoom(&t, black_box(0.25), pivot)));
    });
    group.bench_function("fit_rect", |b| {
        let t = Transform::default();
        let rect = Rect::new(100.0, 100.0, 900.0, 500.0);
        b.iter(|| black_box(geometry.fit_rect(black_box(rect), CoordFrame::Scene, &t)));
    });
    group.finish();
}

criterion_group!(benches, bench_conversions, bench_constraints);
criterion_main!(benches);
