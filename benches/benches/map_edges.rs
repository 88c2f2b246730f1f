// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use waymark_map::{EdgeIndex, MapGraph, Tile, Viewport};

/// Square street grid with `n * n` intersections and 20-unit blocks.
fn street_grid(n: u32) -> MapGraph<u32> {
    let mut g = MapGraph::new();
    for y in 0..n {
        for x in 0..n {
            g.insert_node(y * n + x, Point::new(f64::from(x) * 20.0, f64::from(y) * 20.0));
        }
    }
    let mut edge = 0;
    for y in 0..n {
        for x in 0..n {
            let id = y * n + x;
            if x + 1 < n {
                let _ = g.insert_edge(edge, id, id + 1, 0);
                edge += 1;
            }
            if y + 1 < n {
                let _ = g.insert_edge(edge, id, id + n, 1);
                edge += 1;
            }
        }
    }
    g
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_index_build");
    for &n in &[64u32, 128] {
        let g = street_grid(n);
        group.throughput(Throughput::Elements(g.edge_count() as u64));
        group.bench_function(format!("from_graph_n{}", n), |b| {
            b.iter(|| black_box(EdgeIndex::from_graph(&g).len()))
        });
    }
    group.finish();
}

fn bench_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_index_frames");
    let g = street_grid(128);
    let index = EdgeIndex::from_graph(&g);
    group.bench_function("pan_and_query_viewport", |b| {
        b.iter(|| {
            let mut view = Viewport::new();
            view.zoom_at(Point::ZERO, 2.0);
            let mut total = 0usize;
            for _ in 0..64 {
                view.pan_by(Vec2::new(-17.0, -9.0));
                let visible = view.visible_world_rect(Size::new(1280.0, 720.0));
                total += index.query(visible).count();
            }
            black_box(total);
        })
    });
    group.bench_function("render_tiles", |b| {
        let visible = kurbo::Rect::new(300.0, 300.0, 1900.0, 1200.0);
        b.iter(|| {
            let total: usize = Tile::tiles_covering(visible, 256.0)
                .map(|t| index.query(t.query_rect(5.0)).count())
                .sum();
            black_box(total);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_frames);
criterion_main!(benches);
