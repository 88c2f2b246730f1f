// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sort-Tile-Recursive bulk loading.
//!
//! Each pass packs one level: items are sorted by x-center, cut into
//! `ceil(sqrt(pages))` vertical slices, each slice is sorted by y-center and cut
//! into runs of at most `max_children`. Every run becomes a node, and the nodes
//! feed the next pass until one remains.
//!
//! Slices and runs are sized evenly rather than filled greedily, so no node is
//! left with a tiny remainder: whenever a level holds more than one node, each
//! of them holds at least `max_children / 2` items.

use alloc::vec::Vec;

use crate::node::{Entry, Node, NodeId};
use crate::params::Params;
use crate::tree::RStarTree;
use crate::types::{Aabb2D, Scalar, cmp_partial};

impl<T: Scalar, P> RStarTree<T, P> {
    /// Build a packed tree from a static set of `(rectangle, payload)` pairs with default [`Params`].
    ///
    /// This is much faster than inserting one by one and yields a tree of comparable
    /// or better quality.
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (Aabb2D<T>, P)>,
    {
        Self::from_items_with_params(items, Params::default())
    }

    /// Build a packed tree from `(rectangle, payload)` pairs with the given parameters.
    ///
    /// # Panics
    ///
    /// Panics if `params` fails [`Params::validate`].
    pub fn from_items_with_params<I>(items: I, params: Params) -> Self
    where
        I: IntoIterator<Item = (Aabb2D<T>, P)>,
    {
        let mut tree = Self::with_params(params);
        let entries: Vec<Entry<T, P>> = items
            .into_iter()
            .map(|(aabb, payload)| Entry::new(aabb, payload))
            .collect();
        if entries.is_empty() {
            return tree;
        }
        let max = tree.params.max_children;
        tree.len = entries.len();

        let mut level: Vec<NodeId> = tile(entries, max, |e: &Entry<T, P>| e.aabb)
            .into_iter()
            .map(|run| tree.push_node(Node::leaf(run, None)))
            .collect();
        tree.height = 1;

        while level.len() > 1 {
            let runs = {
                let arena = &tree.arena;
                tile(level, max, |id: &NodeId| arena[id.get()].bbox)
            };
            level = runs
                .into_iter()
                .map(|run| tree.push_internal(run))
                .collect();
            tree.height += 1;
        }
        tree.root = level.first().copied();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            entries = tree.len,
            height = tree.height,
            nodes = tree.arena.len(),
            "bulk build"
        );
        tree
    }
}

impl<T: Scalar, P> FromIterator<(Aabb2D<T>, P)> for RStarTree<T, P> {
    fn from_iter<I: IntoIterator<Item = (Aabb2D<T>, P)>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

/// Group `items` into runs for one tree level.
fn tile<T, I, F>(mut items: Vec<I>, max: usize, bbox_of: F) -> Vec<Vec<I>>
where
    T: Scalar,
    F: Fn(&I) -> Aabb2D<T>,
{
    let n = items.len();
    let pages = n.div_ceil(max);
    let mut slices = 1_usize;
    while slices * slices < pages {
        slices += 1;
    }

    // `left + right` and `top + bottom` order like the centers without halving.
    let x_key = |b: Aabb2D<T>| T::widen(b.min_x) + T::widen(b.max_x);
    let y_key = |b: Aabb2D<T>| T::widen(b.min_y) + T::widen(b.max_y);

    items.sort_by(|a, b| cmp_partial(&x_key(bbox_of(a)), &x_key(bbox_of(b))));
    let mut runs = Vec::with_capacity(pages);
    let mut rest = items.into_iter();
    for slice_len in even_sizes(n, slices * max) {
        let mut slice: Vec<I> = rest.by_ref().take(slice_len).collect();
        slice.sort_by(|a, b| cmp_partial(&y_key(bbox_of(a)), &y_key(bbox_of(b))));
        let mut slice_rest = slice.into_iter();
        for run_len in even_sizes(slice_len, max) {
            runs.push(slice_rest.by_ref().take(run_len).collect());
        }
    }
    runs
}

/// Sizes of the fewest chunks of at most `cap` covering `len`, differing by at most one.
fn even_sizes(len: usize, cap: usize) -> impl Iterator<Item = usize> {
    let count = len.div_ceil(cap);
    let (base, extra) = if count == 0 {
        (0, 0)
    } else {
        (len / count, len % count)
    };
    (0..count).map(move |i| base + usize::from(i < extra))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use alloc::vec;

    fn grid_items(side: i64) -> Vec<(Aabb2D<i64>, u32)> {
        let mut out = Vec::new();
        for y in 0..side {
            for x in 0..side {
                let id = u32::try_from(y * side + x).unwrap();
                out.push((Aabb2D::new(x, y, x + 1, y + 1), id));
            }
        }
        out
    }

    #[test]
    fn even_sizes_cover_and_respect_cap() {
        let sizes: Vec<_> = even_sizes(33, 32).collect();
        assert_eq!(sizes, vec![17, 16]);
        let sizes: Vec<_> = even_sizes(64, 32).collect();
        assert_eq!(sizes, vec![32, 32]);
        let sizes: Vec<_> = even_sizes(5, 32).collect();
        assert_eq!(sizes, vec![5]);
        assert_eq!(even_sizes(0, 8).count(), 0);
        for len in 1..200 {
            let sizes: Vec<_> = even_sizes(len, 7).collect();
            assert_eq!(sizes.iter().sum::<usize>(), len);
            assert!(sizes.iter().all(|&s| s <= 7 && s > 0));
        }
    }

    #[test]
    fn empty_input_builds_empty_tree() {
        let tree = RStarTree::<i64, u32>::from_items(Vec::new());
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn small_input_is_a_single_leaf() {
        let tree = RStarTree::from_items(grid_items(3));
        assert_eq!(tree.len(), 9);
        assert_eq!(tree.height(), 1);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn one_past_capacity_still_meets_minimum() {
        let items: Vec<_> = grid_items(6).into_iter().take(33).collect();
        let tree = RStarTree::from_items(items);
        assert_eq!(tree.height(), 2);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn bulk_build_is_balanced_and_complete() {
        for side in [10, 31, 57] {
            let tree = RStarTree::from_items_with_params(grid_items(side), Params::with_max_children(8));
            tree.check_invariants().unwrap();
            let ids: BTreeSet<u32> = tree.iter().map(|e| e.payload).collect();
            assert_eq!(ids.len(), usize::try_from(side * side).unwrap());
        }
    }

    #[test]
    fn collect_bulk_builds() {
        let tree: RStarTree<i64, u32> = grid_items(20).into_iter().collect();
        assert_eq!(tree.len(), 400);
        let hits: Vec<_> = tree
            .search(Aabb2D::new(5, 5, 5, 5))
            .map(|e| e.payload)
            .collect();
        // The four cells meeting at (5, 5).
        assert_eq!(hits.len(), 4);
    }
}
