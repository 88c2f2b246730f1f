// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental inserts versus a bulk build, with tree maintenance logged.
//!
//! Run:
//! - `RUST_LOG=waymark_index=debug cargo run -p waymark_demos --example tree_basics`

use tracing_subscriber::EnvFilter;
use waymark_index::{Aabb2D, Params, RStarTree};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cells: Vec<(Aabb2D<i64>, u32)> = (0..1000_u32)
        .map(|i| {
            let col = i64::from(i % 40);
            let row = i64::from(i / 40);
            (Aabb2D::new(col * 2, row * 2, col * 2 + 1, row * 2 + 1), i)
        })
        .collect();

    let mut incremental = RStarTree::with_params(Params::with_max_children(16));
    incremental.extend(cells.iter().copied());
    let bulk = RStarTree::from_items_with_params(cells.iter().copied(), Params::with_max_children(16));

    for (name, tree) in [("incremental", &incremental), ("bulk", &bulk)] {
        println!(
            "{name}: len={} height={} bound={:?} valid={:?}",
            tree.len(),
            tree.height(),
            tree.bound(),
            tree.check_invariants()
        );
    }

    let window = Aabb2D::new(10, 10, 14, 12);
    let mut hits: Vec<u32> = incremental.search(window).map(|e| e.payload).collect();
    hits.sort_unstable();
    println!("cells in {window:?}: {hits:?}");

    let at = incremental.query_point(21, 21).map(|e| e.payload).collect::<Vec<_>>();
    println!("cells at (21,21): {at:?}");
}
