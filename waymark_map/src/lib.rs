// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Map: Kurbo-native glue between a road map and [`waymark_index`].
//!
//! A map is a graph of positioned nodes joined by road edges. Drawing it only
//! needs the edges near the visible area, and this crate answers that question:
//!
//! - [`MapGraph`]: nodes, edges and per-node adjacency; edge segments and bounds.
//! - [`EdgeIndex`]: an R*-tree of edge bounds, bulk-built from a graph.
//! - [`Viewport`]: pan and zoom, world↔screen transforms, and the visible world rectangle.
//! - [`Tile`]: fixed-size render tiles and the padded query rectangle for each.
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use waymark_map::{EdgeIndex, MapGraph, Viewport};
//!
//! let mut graph = MapGraph::new();
//! graph.insert_node("a", Point::new(0.0, 0.0));
//! graph.insert_node("b", Point::new(400.0, 300.0));
//! graph.insert_node("c", Point::new(5000.0, 5000.0));
//! graph.insert_edge("ab", "a", "b", "main").unwrap();
//! graph.insert_edge("bc", "b", "c", "main").unwrap();
//!
//! let index = EdgeIndex::from_graph(&graph);
//!
//! // Zoom in around the screen origin and look at what an 800×600 screen shows.
//! let mut view = Viewport::new();
//! view.zoom_at(Point::ZERO, 4.0);
//! let visible = view.visible_world_rect(Size::new(800.0, 600.0));
//! assert_eq!(visible, kurbo::Rect::new(0.0, 0.0, 200.0, 150.0));
//!
//! // Only the short edge reaches into view.
//! let hits: Vec<_> = index.query(visible).copied().collect();
//! assert_eq!(hits, ["ab"]);
//! ```

#![no_std]

extern crate alloc;

mod error;
mod graph;
mod index;
mod tiles;
mod viewport;

pub use error::MapError;
pub use graph::{MapEdge, MapGraph};
pub use index::{EdgeIndex, aabb_to_rect, rect_to_aabb};
pub use tiles::Tile;
pub use viewport::Viewport;
