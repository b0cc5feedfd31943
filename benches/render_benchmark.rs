//! Benchmark for the rasterizers and the traced frame.

#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use unicorn_raster::color::Color;
use unicorn_raster::config::{RenderConfig, SceneConfig};
use unicorn_raster::framebuffer::Framebuffer;
use unicorn_raster::geometry::Point3d;
use unicorn_raster::render::{connect_circles, fill_circle, Disc};
use unicorn_raster::tracer::{draw_tracer, DirectionalLightTracer};

const PINK: Color = Color::new(235, 200, 220);
const GOLD: Color = Color::new(250, 230, 120);

fn circle_fill_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("circle_fill");
    let mut fb = Framebuffer::new(512, 512).unwrap();

    for radius in [8.0, 64.0, 240.0] {
        group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |b, &r| {
            b.iter(|| {
                fill_circle(&mut fb, black_box(256.0), black_box(256.0), r, PINK, 0.5);
            });
        });
    }

    group.finish();
}

fn connector_fill_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("connector_fill");
    let mut fb = Framebuffer::new(512, 512).unwrap();

    for (name, r1, r2) in [("cylinder", 30.0, 30.0), ("tapered", 60.0, 8.0)] {
        group.bench_function(name, |b| {
            b.iter(|| {
                connect_circles(
                    &mut fb,
                    black_box(Disc::new(100.0, 120.0, r1, PINK)),
                    black_box(Disc::new(400.0, 380.0, r2, GOLD)),
                    0.5,
                );
            });
        });
    }

    group.finish();
}

fn traced_frame_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("traced_frame");

    for size in [200u32, 400] {
        let config = RenderConfig {
            width: size,
            height: size,
            scene: SceneConfig::demo(),
            ..RenderConfig::default()
        };
        let (mut scene, figure) = config.build_scene();
        figure.project(&mut scene, &config.world_view()).unwrap();
        let mut fb = Framebuffer::new(size, size).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{size}x{size}")),
            &size,
            |b, _| {
                b.iter(|| {
                    let light = DirectionalLightTracer::new(Point3d::new(0.0, 1.0, 0.5));
                    let root = figure
                        .compose(&scene, Some(Box::new(light)), Vec::new())
                        .unwrap();
                    draw_tracer(&*root, &mut fb, |_| {});
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    circle_fill_benchmark,
    connector_fill_benchmark,
    traced_frame_benchmark
);
criterion_main!(benches);
