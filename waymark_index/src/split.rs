// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! R*-tree node split: choose the split axis by margin, then the distribution by overlap.
//!
//! For each axis the items are sorted by each of the two box edges on that axis. For every
//! split point `k` that leaves both groups with at least `min_children` items, the two group
//! bounds `LB_k` and `RB_k` are evaluated:
//!
//! - the axis score (margin) is the sum of `semiperimeter(LB_k) + semiperimeter(RB_k)` over
//!   both edges and all `k`; the axis with the smallest margin wins;
//! - within the winning axis, the distribution with the smallest `overlap(LB_k, RB_k)` wins,
//!   with ties broken by the smaller `area(LB_k) + area(RB_k)`.
//!
//! Group bounds come from prefix/suffix unions, so each edge costs one sort plus O(n).

use alloc::vec::Vec;

use crate::types::{Aabb2D, Scalar, cmp_partial, union_aabb};

/// Box edge used as the sort key of a candidate distribution.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Edge {
    MinX,
    MaxX,
    MinY,
    MaxY,
}

impl Edge {
    fn key<T: Copy>(self, b: &Aabb2D<T>) -> T {
        match self {
            Self::MinX => b.min_x,
            Self::MaxX => b.max_x,
            Self::MinY => b.min_y,
            Self::MaxY => b.max_y,
        }
    }
}

const AXES: [[Edge; 2]; 2] = [[Edge::MinX, Edge::MaxX], [Edge::MinY, Edge::MaxY]];

#[derive(Copy, Clone, Debug)]
struct Distribution<A> {
    edge: Edge,
    index: usize,
    overlap: A,
    area: A,
}

impl<A: PartialOrd> Distribution<A> {
    fn is_better_than(&self, other: &Self) -> bool {
        self.overlap < other.overlap || (self.overlap == other.overlap && self.area < other.area)
    }
}

/// Split an overflowing item list in two.
///
/// The first group stays in `items`; the second group is returned. Both groups hold at least
/// `min_children` items as long as `items.len() >= 2 * min_children`.
pub(crate) fn split_items<T, I, F>(items: &mut Vec<I>, min_children: usize, bbox_of: F) -> Vec<I>
where
    T: Scalar,
    F: Fn(&I) -> Aabb2D<T>,
{
    let n = items.len();
    debug_assert!(
        min_children >= 1 && n >= 2 * min_children,
        "cannot split {n} items into groups of at least {min_children}"
    );
    let boxes: Vec<Aabb2D<T>> = items.iter().map(&bbox_of).collect();

    let mut chosen: Option<(T::Acc, Distribution<T::Acc>)> = None;
    for axis in AXES {
        let mut margin = T::acc_from_usize(0);
        let mut best: Option<Distribution<T::Acc>> = None;
        for edge in axis {
            let mut order: Vec<usize> = (0..n).collect();
            order.sort_by(|&a, &b| cmp_partial(&edge.key(&boxes[a]), &edge.key(&boxes[b])));

            let prefix = running_unions(order.iter().map(|&i| boxes[i]));
            let mut suffix = running_unions(order.iter().rev().map(|&i| boxes[i]));
            suffix.reverse();

            for k in min_children..=(n - min_children) {
                let lb = prefix[k - 1];
                let rb = suffix[k];
                margin = T::acc_add(margin, T::acc_add(lb.semiperimeter(), rb.semiperimeter()));
                let candidate = Distribution {
                    edge,
                    index: k,
                    overlap: lb.intersection_area(&rb),
                    area: T::acc_add(lb.area(), rb.area()),
                };
                if best.as_ref().is_none_or(|b| candidate.is_better_than(b)) {
                    best = Some(candidate);
                }
            }
        }
        if let Some(best) = best
            && chosen.as_ref().is_none_or(|(m, _)| margin < *m)
        {
            chosen = Some((margin, best));
        }
    }

    let Some((_, dist)) = chosen else {
        // Only reachable with too few items to honor `min_children`; fall back to halves.
        let at = n / 2;
        return items.split_off(at);
    };

    // Stable sort from the original order reproduces the evaluated permutation.
    items.sort_by(|a, b| cmp_partial(&dist.edge.key(&bbox_of(a)), &dist.edge.key(&bbox_of(b))));
    items.split_off(dist.index)
}

/// Union of each prefix of `boxes`: element `i` covers `boxes[0..=i]`.
fn running_unions<T, I>(boxes: I) -> Vec<Aabb2D<T>>
where
    T: PartialOrd + Copy,
    I: ExactSizeIterator<Item = Aabb2D<T>>,
{
    let mut out: Vec<Aabb2D<T>> = Vec::with_capacity(boxes.len());
    for bb in boxes {
        let acc = match out.last() {
            Some(prev) => union_aabb(*prev, bb),
            None => bb,
        };
        out.push(acc);
    }
    out
}
