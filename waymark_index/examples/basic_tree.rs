// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Waymark Index: insert, bulk load, and query.

use waymark_index::{Aabb2D, Params, RStarTree};

fn main() {
    let mut tree: RStarTree<i64, u32> = RStarTree::with_params(Params::with_max_children(8));
    for i in 0..64_i64 {
        let x = (i % 8) * 10;
        let y = (i / 8) * 10;
        tree.insert(Aabb2D::<i64>::from_xywh(x, y, 8, 8), u32::try_from(i).unwrap_or(u32::MAX));
    }
    println!("len={} height={} bound={:?}", tree.len(), tree.height(), tree.bound());

    // Query a rectangle spanning four cells
    let hits: Vec<u32> = tree
        .search(Aabb2D::new(15, 15, 25, 25))
        .map(|e| e.payload)
        .collect();
    println!("hits in (15,15)-(25,25): {hits:?}");

    // Bulk load the same layout
    let packed: RStarTree<i64, u32> = tree.iter().map(|e| (e.aabb, e.payload)).collect();
    println!(
        "packed len={} height={} valid={}",
        packed.len(),
        packed.height(),
        packed.check_invariants().is_ok()
    );
}
