// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan and zoom over a street grid and list what each frame needs to draw.
//!
//! Run:
//! - `cargo run -p waymark_demos --example map_viewport`
//! - `RUST_LOG=debug cargo run -p waymark_demos --example map_viewport` to see the index build

use kurbo::{Point, Size, Vec2};
use tracing_subscriber::EnvFilter;
use waymark_map::{EdgeIndex, MapGraph, Tile, Viewport};

const BLOCK: f64 = 25.0;
const SIDE: u32 = 60;
const SCREEN: Size = Size::new(640.0, 480.0);

fn street_grid() -> MapGraph<String> {
    let mut graph = MapGraph::new();
    for y in 0..SIDE {
        for x in 0..SIDE {
            graph.insert_node(
                format!("n{x}_{y}"),
                Point::new(f64::from(x) * BLOCK, f64::from(y) * BLOCK),
            );
        }
    }
    for y in 0..SIDE {
        for x in 0..SIDE {
            let here = format!("n{x}_{y}");
            if x + 1 < SIDE {
                let road = format!("street{y}");
                let edge = format!("e{x}_{y}_east");
                if let Err(e) = graph.insert_edge(edge, here.clone(), format!("n{}_{y}", x + 1), road) {
                    eprintln!("skipping edge: {e}");
                }
            }
            if y + 1 < SIDE {
                let road = format!("avenue{x}");
                let edge = format!("e{x}_{y}_south");
                if let Err(e) = graph.insert_edge(edge, here, format!("n{x}_{}", y + 1), road) {
                    eprintln!("skipping edge: {e}");
                }
            }
        }
    }
    graph
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let graph = street_grid();
    let index = EdgeIndex::from_graph(&graph);
    println!(
        "{} nodes, {} edges, index height {}",
        graph.node_count(),
        graph.edge_count(),
        index.tree().height()
    );

    let mut view = Viewport::new();
    let frames: [(&str, Vec2, f64); 4] = [
        ("start", Vec2::ZERO, 1.0),
        ("drag", Vec2::new(-300.0, -200.0), 1.0),
        ("zoom in", Vec2::ZERO, 3.0),
        ("zoom out", Vec2::ZERO, 0.25),
    ];
    for (label, drag, scale) in frames {
        view.pan_by(drag);
        view.zoom_at(Point::new(SCREEN.width / 2.0, SCREEN.height / 2.0), scale);
        let visible = view.visible_world_rect(SCREEN);
        let edges = index.query_padded(visible, 1.0).count();
        let tiles = Tile::tiles_covering(visible, 256.0).count();
        println!(
            "{label:>8}: scale={:.2} world={:.0?} edges={edges} tiles={tiles}",
            view.scale(),
            (visible.x0, visible.y0, visible.x1, visible.y1)
        );
    }

    // Roads leaving one intersection.
    let corner = "n10_10".to_string();
    let leaving: Vec<String> = graph
        .adjacent(&corner)
        .filter_map(|id| graph.edge(id).map(|e| format!("{id} via {}", e.road)))
        .collect();
    println!("{corner}: {leaving:?}");
}
