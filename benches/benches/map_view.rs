// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use peniko::color::palette::css;
use understory_map_view::{
    Endpoints, LineColumns, MarkerColumns, NodeRef, PointerEvent, RecordingSurface, Scene,
    SceneConfig,
};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn gen_f64(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * f64::from(self.next_u32()) / f64::from(u32::MAX)
    }

    fn gen_range_usize(&mut self, upper_exclusive: usize) -> usize {
        if upper_exclusive == 0 {
            return 0;
        }
        (self.next_u32() as usize) % upper_exclusive
    }
}

/// `n` markers scattered over a small lat/lon box, joined by `n` lines.
fn build_scene(n: usize, seed: u64) -> (Scene, RecordingSurface) {
    let mut rng = Lcg::new(seed);
    let positions: Vec<Point> = (0..n)
        .map(|_| Point::new(rng.gen_f64(-3.0, 2.0), rng.gen_f64(50.0, 56.0)))
        .collect();
    let starts: Vec<NodeRef> = (0..n).map(NodeRef::marker).collect();
    let ends: Vec<NodeRef> = (0..n)
        .map(|_| NodeRef::marker(rng.gen_range_usize(n)))
        .collect();
    let names = vec![""; n];

    let mut surface = RecordingSurface::new();
    let mut scene = Scene::new(SceneConfig::new(Size::new(1280.0, 720.0)), &mut surface);
    scene
        .create_markers(&MarkerColumns {
            positions: &positions,
            radii: &vec![4.0; n],
            colors: &vec![css::RED; n],
            names: &names,
            infos: None,
        })
        .expect("columns have equal length");
    scene
        .create_lines(&LineColumns {
            starts: Endpoints::Nodes(&starts),
            ends: Endpoints::Nodes(&ends),
            widths: &vec![1.0; n],
            colors: &vec![css::BLACK; n],
            names: &names,
            infos: None,
            prefer_explicit: false,
        })
        .expect("node references are in range");
    (scene, surface)
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_view_fit");
    group.sample_size(50);

    for &n in &[256_usize, 4_096, 32_768] {
        let (scene, _) = build_scene(n, 0x5CA1_E000_0000_0001);
        group.bench_function(format!("extremes(n={n})"), |b| {
            b.iter(|| black_box(scene.extremes()));
        });
        group.bench_function(format!("fit_and_render(n={n})"), |b| {
            b.iter_batched(
                || build_scene(n, 0x5CA1_E000_0000_0001),
                |(mut scene, mut surface)| {
                    scene.fit(kurbo::Vec2::new(0.1, 0.1));
                    scene.render(&mut surface);
                    black_box(surface.live_count());
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_zoom(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_view_zoom");
    group.sample_size(50);

    for &n in &[256_usize, 4_096, 32_768] {
        let (mut scene, mut surface) = build_scene(n, 0x200A_0000_0000_0002);
        scene.render(&mut surface);
        let pointer = Point::new(640.0, 360.0);
        let mut delta = 120.0;
        group.bench_function(format!("wheel_relayout(n={n})"), |b| {
            b.iter(|| {
                // Alternate in and out so the zoom stays inside its limits.
                scene.zoom(PointerEvent::wheel(pointer, delta), &mut surface);
                delta = -delta;
                black_box(scene.view().zoom());
            });
        });
        group.bench_function(format!("drag_relayout(n={n})"), |b| {
            let mut x = 0.0;
            scene.drag_start(PointerEvent::at(Point::new(x, 0.0)));
            b.iter(|| {
                x += 1.0;
                scene.drag_motion(PointerEvent::at(Point::new(x, 0.0)), &mut surface);
                black_box(scene.view().offset());
            });
            scene.drag_end();
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fit, bench_zoom);
criterion_main!(benches);
