// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Index: an R*-tree over 2D axis-aligned rectangles.
//!
//! The tree stores `(rectangle, payload)` pairs and answers "which rectangles
//! intersect this one?" without scanning every entry.
//!
//! - Insert one entry at a time with [`RStarTree::insert`], or build a packed tree
//!   from a static set with [`RStarTree::from_items`] (Sort-Tile-Recursive).
//! - Query lazily with [`RStarTree::search`] or [`RStarTree::query_point`]; the
//!   returned [`Search`] iterator only descends into subtrees whose bound meets the query.
//! - Tune node capacity and the heuristics through [`Params`].
//!
//! Insertion follows the R*-tree of Beckmann et al.: nearly-minimum-overlap subtree
//! selection above the leaves, forced reinsertion on the first overflow at each level,
//! and a margin-then-overlap split.
//!
//! It is generic over the scalar type `T` and does not depend on any geometry crate.
//! Areas and margins are computed in a widened accumulator (f32→f64, f64→f64, i64→i128).
//!
//! # Example
//!
//! ```rust
//! use waymark_index::{Aabb2D, RStarTree};
//!
//! let mut tree: RStarTree<i64, u32> = RStarTree::new();
//! tree.insert(Aabb2D::new(0, 0, 10, 10), 1);
//! tree.insert(Aabb2D::new(5, 5, 15, 15), 2);
//! tree.insert(Aabb2D::new(40, 40, 50, 50), 3);
//!
//! // Edges are inclusive: a rectangle touching another one intersects it.
//! let mut hits: Vec<u32> = tree
//!     .search(Aabb2D::new(10, 10, 12, 12))
//!     .map(|e| e.payload)
//!     .collect();
//! hits.sort();
//! assert_eq!(hits, [1, 2]);
//!
//! assert_eq!(tree.query_point(45, 45).count(), 1);
//! ```
//!
//! Bulk loading a static set:
//!
//! ```rust
//! use waymark_index::{Aabb2D, RStarTreeF64};
//!
//! let tree: RStarTreeF64<usize> = (0..1000)
//!     .map(|i| {
//!         let x = (i % 40) as f64;
//!         let y = (i / 40) as f64;
//!         (Aabb2D::<f64>::from_xywh(x, y, 1.0, 1.0), i)
//!     })
//!     .collect();
//! assert_eq!(tree.len(), 1000);
//! assert!(tree.check_invariants().is_ok());
//! ```
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. Comparisons that
//! involve NaN are treated as ties, which keeps the tree consistent but makes
//! query results for such rectangles unspecified.
//!
//! ### Logging
//!
//! With the `tracing` feature, splits, forced reinsertions, root growth, and bulk
//! builds emit `debug` events, and every insert emits a `trace` event.

#![no_std]

extern crate alloc;

mod bulk;
mod check;
mod choose;
pub mod error;
mod node;
pub mod params;
mod query;
mod split;
mod tree;
pub mod types;

pub use error::{InvariantError, ParamsError};
pub use node::{Entry, NodeId};
pub use params::Params;
pub use query::Search;
pub use tree::{RStarTree, RStarTreeF32, RStarTreeF64, RStarTreeI64};
pub use types::{Aabb2D, Scalar, ScalarAcc, area};
