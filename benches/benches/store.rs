// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `panview_store`: action dispatch, animation ticks and
//! linked-view fan-out.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size, Vec2};
use panview_geometry::CoordFrame;
use panview_gesture::{PointerInput, PointerState};
use panview_store::{
    Action, AnimationOptions, SyncBus, TransformStore, Viewer, ViewerConfig, link_stores,
};

const SCENE: Rect = Rect::new(0.0, 0.0, 8192.0, 6144.0);

fn store() -> TransformStore {
    let mut store = TransformStore::new(Size::new(1280.0, 720.0), 32.0);
    store.dispatch(Action::SceneRect(SCENE));
    store.dispatch(Action::zoom(2.0));
    store
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("store/dispatch");
    group.bench_function("pan_view", |b| {
        let mut store = store();
        let mut sign = 1.0;
        b.iter(|| {
            sign = -sign;
            store.dispatch(black_box(Action::pan(Vec2::new(sign * 8.0, 0.0), CoordFrame::View)))
        });
    });
    group.bench_function("zoom_at", |b| {
        let mut store = store();
        let mut sign = 1.0;
        b.iter(|| {
            sign = -sign;
            store.dispatch(black_box(Action::zoom_at(
                sign * 0.1,
                Point::new(400.0, 300.0),
                CoordFrame::View,
            )))
        });
    });
    group.bench_function("animated_zoom_60_frames", |b| {
        b.iter_batched(
            store,
            |mut store| {
                store.dispatch(Action::zoom(1.0).animated(AnimationOptions::new(1000.0)));
                for frame in 0..=60 {
                    store.tick(f64::from(frame) * 1000.0 / 60.0);
                }
                black_box(store.transform())
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_linked(c: &mut Criterion) {
    let mut group = c.benchmark_group("store/linked");
    for n in [2_usize, 8, 32] {
        group.bench_with_input(BenchmarkId::new("publish_and_sync", n), &n, |b, &n| {
            let bus = SyncBus::new();
            let mut stores: Vec<TransformStore> = (0..n).map(|_| store()).collect();
            {
                let mut refs: Vec<&mut TransformStore> = stores.iter_mut().collect();
                link_stores(&bus, &mut refs);
            }
            let mut sign = 1.0;
            b.iter(|| {
                sign = -sign;
                stores[0].dispatch(Action::pan(Vec2::new(sign * 4.0, 0.0), CoordFrame::View));
                for store in &mut stores[1..] {
                    store.sync();
                }
                black_box(stores[n - 1].center())
            });
        });
    }
    group.finish();
}

fn bench_viewer_input(c: &mut Criterion) {
    c.bench_function("viewer/wheel", |b| {
        let mut viewer = Viewer::new(Size::new(1280.0, 720.0), ViewerConfig::default());
        viewer.dispatch(Action::SceneRect(SCENE));
        let mut sign = 1.0;
        b.iter(|| {
            sign = -sign;
            let input = PointerInput::Wheel {
                delta: Vec2::new(0.0, sign * 2.0),
                state: PointerState::new(Point::new(640.0, 360.0), 0.0),
            };
            black_box(viewer.handle_input(input))
        });
    });
}

criterion_group!(benches, bench_dispatch, bench_linked, bench_viewer_input);
criterion_main!(benches);
