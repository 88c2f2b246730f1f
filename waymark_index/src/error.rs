// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types: invalid configuration and structural invariant violations.

use core::fmt;

use crate::node::NodeId;

/// Rejected [`Params`](crate::Params) combination.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParamsError {
    /// `max_children` is below the smallest fanout the split can handle.
    MaxTooSmall {
        /// The rejected maximum.
        max_children: usize,
    },
    /// `min_children` is below 2 or above half of `max_children`.
    MinOutOfRange {
        /// The rejected minimum.
        min_children: usize,
        /// The configured maximum.
        max_children: usize,
    },
    /// Forced reinsertion would remove nothing, or would leave the node underfull.
    ReinsertOutOfRange {
        /// The rejected reinsertion count.
        reinsert_count: usize,
    },
    /// The overlap heuristic needs at least one candidate.
    NoOverlapCandidates,
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxTooSmall { max_children } => {
                write!(f, "max_children must be at least 4, got {max_children}")
            }
            Self::MinOutOfRange {
                min_children,
                max_children,
            } => write!(
                f,
                "min_children must be in 2..={}, got {min_children}",
                max_children / 2
            ),
            Self::ReinsertOutOfRange { reinsert_count } => write!(
                f,
                "reinsert_count {reinsert_count} must be positive and keep the node at least min_children full"
            ),
            Self::NoOverlapCandidates => f.write_str("overlap_candidates must be positive"),
        }
    }
}

impl core::error::Error for ParamsError {}

/// A structural invariant that [`RStarTree::check_invariants`](crate::RStarTree::check_invariants) found broken.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantError {
    /// A node's bound is not the exact union of its children's bounds.
    BoundMismatch {
        /// The offending node.
        node: NodeId,
    },
    /// A node holds fewer or more children than allowed.
    Fanout {
        /// The offending node.
        node: NodeId,
        /// Number of children found.
        len: usize,
    },
    /// A leaf sits at a different depth than the first leaf encountered.
    Unbalanced {
        /// The offending leaf.
        node: NodeId,
        /// Its depth below the root.
        depth: usize,
        /// Depth of the other leaves.
        expected: usize,
    },
    /// A child's parent link does not point back at the node holding it.
    ParentLink {
        /// The child with the wrong back-reference.
        node: NodeId,
    },
    /// The number of reachable entries differs from the tree's length.
    LenMismatch {
        /// Entries reachable from the root.
        found: usize,
        /// The tree's recorded length.
        expected: usize,
    },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundMismatch { node } => {
                write!(f, "bound of {node:?} is not the union of its children")
            }
            Self::Fanout { node, len } => write!(f, "{node:?} holds {len} children"),
            Self::Unbalanced {
                node,
                depth,
                expected,
            } => write!(f, "leaf {node:?} at depth {depth}, expected {expected}"),
            Self::ParentLink { node } => write!(f, "{node:?} has a stale parent link"),
            Self::LenMismatch { found, expected } => {
                write!(f, "found {found} entries, tree records {expected}")
            }
        }
    }
}

impl core::error::Error for InvariantError {}
