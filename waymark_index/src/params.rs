// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning parameters for the R*-tree.

use crate::error::ParamsError;

/// Node capacity and heuristic tuning for an [`RStarTree`](crate::RStarTree).
///
/// The defaults follow the R*-tree paper: `min_children` is 40% of
/// `max_children`, and forced reinsertion removes 30% of an overflowing node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Params {
    /// Maximum number of entries per leaf / children per internal node.
    pub max_children: usize,
    /// Minimum number of entries per non-root node.
    pub min_children: usize,
    /// Number of items removed from an overflowing node by forced reinsertion.
    pub reinsert_count: usize,
    /// How many least-enlargement candidates the overlap heuristic considers
    /// when descending into leaves.
    pub overlap_candidates: usize,
}

impl Params {
    /// Default maximum fanout.
    pub const DEFAULT_MAX_CHILDREN: usize = 32;

    /// Default number of candidates for the nearly-minimum-overlap heuristic.
    pub const DEFAULT_OVERLAP_CANDIDATES: usize = 32;

    /// Derive a parameter set from a maximum fanout using the paper's ratios.
    ///
    /// The result is not validated; see [`Params::validate`].
    pub const fn with_max_children(max_children: usize) -> Self {
        Self {
            max_children,
            min_children: round_ratio(max_children, 4),
            reinsert_count: round_ratio(max_children, 3),
            overlap_candidates: Self::DEFAULT_OVERLAP_CANDIDATES,
        }
    }

    /// Check that the parameters describe a tree the algorithms can maintain.
    ///
    /// A split of `max_children + 1` items must leave both halves with at least
    /// `min_children`, and forced reinsertion must not underfill the node it shrinks.
    pub fn validate(self) -> Result<Self, ParamsError> {
        if self.max_children < 4 {
            return Err(ParamsError::MaxTooSmall {
                max_children: self.max_children,
            });
        }
        if self.min_children < 2 || self.min_children > self.max_children / 2 {
            return Err(ParamsError::MinOutOfRange {
                min_children: self.min_children,
                max_children: self.max_children,
            });
        }
        if self.reinsert_count == 0
            || self.max_children + 1 - self.min_children < self.reinsert_count
        {
            return Err(ParamsError::ReinsertOutOfRange {
                reinsert_count: self.reinsert_count,
            });
        }
        if self.overlap_candidates == 0 {
            return Err(ParamsError::NoOverlapCandidates);
        }
        Ok(self)
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::with_max_children(Self::DEFAULT_MAX_CHILDREN)
    }
}

/// `round(n * tenths / 10)` in integer arithmetic.
const fn round_ratio(n: usize, tenths: usize) -> usize {
    (n * tenths + 5) / 10
}
