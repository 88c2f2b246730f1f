// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial index over the edges of a [`MapGraph`].

use kurbo::Rect;
use waymark_index::{Aabb2D, RStarTreeF64};

use crate::graph::MapGraph;

/// R*-tree of edge bounds keyed by edge id.
///
/// Bounds are the endpoint rectangles from [`MapGraph::edge_bounds`], so a query
/// returns every edge whose segment *might* cross the query rectangle. Callers
/// that need exact hits test the segment afterwards.
#[derive(Debug)]
pub struct EdgeIndex<I> {
    tree: RStarTreeF64<I>,
}

impl<I> Default for EdgeIndex<I> {
    fn default() -> Self {
        Self {
            tree: RStarTreeF64::new(),
        }
    }
}

impl<I: Ord + Clone> EdgeIndex<I> {
    /// Bulk-build an index over every edge of `graph`.
    pub fn from_graph(graph: &MapGraph<I>) -> Self {
        let items = graph.edges().filter_map(|(id, _)| {
            graph
                .edge_bounds(id)
                .map(|bounds| (rect_to_aabb(bounds), id.clone()))
        });
        let tree = RStarTreeF64::from_items(items);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            edges = graph.edge_count(),
            indexed = tree.len(),
            "built edge index"
        );
        Self { tree }
    }
}

impl<I> EdgeIndex<I> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one edge with its bounds.
    pub fn insert(&mut self, bounds: Rect, id: I) {
        self.tree.insert(rect_to_aabb(bounds), id);
    }

    /// Ids of the edges whose bounds meet `rect` (edges inclusive).
    pub fn query(&self, rect: Rect) -> impl Iterator<Item = &I> + '_ {
        self.tree.search(rect_to_aabb(rect)).map(|e| &e.payload)
    }

    /// Like [`query`](Self::query) with `rect` grown by `pad` on every side.
    ///
    /// Use this to include strokes whose width reaches into `rect`.
    pub fn query_padded(&self, rect: Rect, pad: f64) -> impl Iterator<Item = &I> + '_ {
        self.query(rect.inflate(pad, pad))
    }

    /// Number of indexed edges.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether no edge is indexed.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The underlying tree.
    pub fn tree(&self) -> &RStarTreeF64<I> {
        &self.tree
    }
}

/// Convert a kurbo rectangle into an index rectangle, ordering its corners.
pub fn rect_to_aabb(r: Rect) -> Aabb2D<f64> {
    Aabb2D::from_corners(r.x0, r.y0, r.x1, r.y1)
}

/// Convert an index rectangle back into a kurbo rectangle.
pub fn aabb_to_rect(a: Aabb2D<f64>) -> Rect {
    Rect::new(a.min_x, a.min_y, a.max_x, a.max_y)
}
