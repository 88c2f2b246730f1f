// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Subtree selection during descent.

use alloc::vec::Vec;

use crate::node::{Node, NodeId};
use crate::types::{Aabb2D, Scalar, cmp_partial, enlargement, union_aabb};

/// Pick the child of an internal node that should receive `bbox`.
///
/// One level above the leaves the nearly-minimum-overlap rule applies: the
/// `overlap_candidates` children needing the least enlargement are ranked by how much their
/// overlap with their siblings grows, then by enlargement, then by area.
/// Higher up the least-enlargement rule applies, with ties going to the smaller
/// area and then to the later child.
pub(crate) fn choose_subtree<T: Scalar, P>(
    arena: &[Node<T, P>],
    children: &[NodeId],
    bbox: &Aabb2D<T>,
    leaf_children: bool,
    overlap_candidates: usize,
) -> NodeId {
    debug_assert!(!children.is_empty(), "internal nodes always have children");
    if leaf_children {
        least_overlap_growth(arena, children, bbox, overlap_candidates)
    } else {
        least_enlargement(arena, children, bbox)
    }
}

fn least_enlargement<T: Scalar, P>(
    arena: &[Node<T, P>],
    children: &[NodeId],
    bbox: &Aabb2D<T>,
) -> NodeId {
    let mut best = children[0];
    let first = arena[best.get()].bbox;
    let mut best_enlarge = enlargement(&first, bbox);
    let mut best_area = first.area();
    for &id in &children[1..] {
        let cb = arena[id.get()].bbox;
        let enlarge = enlargement(&cb, bbox);
        let area = cb.area();
        if enlarge < best_enlarge || (enlarge == best_enlarge && area <= best_area) {
            best = id;
            best_enlarge = enlarge;
            best_area = area;
        }
    }
    best
}

struct Candidate<A> {
    id: NodeId,
    overlap_growth: A,
    enlarge: A,
    area: A,
}

impl<A: PartialOrd> Candidate<A> {
    fn is_better_than(&self, other: &Self) -> bool {
        if self.overlap_growth != other.overlap_growth {
            return self.overlap_growth < other.overlap_growth;
        }
        if self.enlarge != other.enlarge {
            return self.enlarge < other.enlarge;
        }
        self.area < other.area
    }
}

fn least_overlap_growth<T: Scalar, P>(
    arena: &[Node<T, P>],
    children: &[NodeId],
    bbox: &Aabb2D<T>,
    overlap_candidates: usize,
) -> NodeId {
    let mut ranked: Vec<(NodeId, T::Acc)> = children
        .iter()
        .map(|&id| (id, enlargement(&arena[id.get()].bbox, bbox)))
        .collect();
    ranked.sort_by(|a, b| cmp_partial(&a.1, &b.1));
    ranked.truncate(overlap_candidates);

    let mut best: Option<Candidate<T::Acc>> = None;
    for (id, enlarge) in ranked {
        let before = arena[id.get()].bbox;
        let after = union_aabb(before, *bbox);
        let mut overlap_before = T::acc_from_usize(0);
        let mut overlap_after = T::acc_from_usize(0);
        for &other in children {
            if other == id {
                continue;
            }
            let ob = arena[other.get()].bbox;
            overlap_before = T::acc_add(overlap_before, ob.intersection_area(&before));
            overlap_after = T::acc_add(overlap_after, ob.intersection_area(&after));
        }
        let candidate = Candidate {
            id,
            overlap_growth: overlap_after - overlap_before,
            enlarge,
            area: before.area(),
        };
        if best.as_ref().is_none_or(|b| candidate.is_better_than(b)) {
            best = Some(candidate);
        }
    }
    best.map_or(children[0], |c| c.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Entry;
    use alloc::vec;

    fn arena_of(boxes: &[Aabb2D<i64>]) -> (Vec<Node<i64, ()>>, Vec<NodeId>) {
        let arena: Vec<_> = boxes
            .iter()
            .map(|&b| Node::leaf(vec![Entry::new(b, ())], None))
            .collect();
        let ids = (0..arena.len()).map(NodeId::new).collect();
        (arena, ids)
    }

    #[test]
    fn least_enlargement_prefers_containing_child() {
        let (arena, ids) = arena_of(&[
            Aabb2D::new(0, 0, 10, 10),
            Aabb2D::new(20, 20, 30, 30),
        ]);
        let pick = choose_subtree(&arena, &ids, &Aabb2D::new(22, 22, 23, 23), false, 32);
        assert_eq!(pick, ids[1]);
    }

    #[test]
    fn least_enlargement_ties_go_to_smaller_then_later() {
        // Both contain the probe: enlargement ties at zero, the smaller box wins.
        let (arena, ids) = arena_of(&[Aabb2D::new(0, 0, 100, 100), Aabb2D::new(0, 0, 10, 10)]);
        let probe = Aabb2D::new(1, 1, 2, 2);
        assert_eq!(choose_subtree(&arena, &ids, &probe, false, 32), ids[1]);

        // Identical boxes: the later child wins.
        let (arena, ids) = arena_of(&[Aabb2D::new(0, 0, 10, 10), Aabb2D::new(0, 0, 10, 10)]);
        assert_eq!(choose_subtree(&arena, &ids, &probe, false, 32), ids[1]);
    }

    #[test]
    fn overlap_rule_avoids_growing_into_siblings() {
        // Growing child 0 to the right would run into child 2; growing child 2
        // downward costs more area but overlaps nothing.
        let (arena, ids) = arena_of(&[
            Aabb2D::new(0, 0, 10, 10),
            Aabb2D::new(100, 100, 110, 110),
            Aabb2D::new(11, 5, 20, 20),
        ]);
        let probe = Aabb2D::new(12, 0, 13, 1);
        let area_pick = choose_subtree(&arena, &ids, &probe, false, 32);
        let overlap_pick = choose_subtree(&arena, &ids, &probe, true, 32);
        assert_eq!(area_pick, ids[0]);
        assert_eq!(overlap_pick, ids[2]);
    }

    #[test]
    fn overlap_rule_only_considers_top_candidates() {
        let (arena, ids) = arena_of(&[
            Aabb2D::new(0, 0, 10, 10),
            Aabb2D::new(100, 100, 110, 110),
            Aabb2D::new(11, 5, 20, 20),
        ]);
        let probe = Aabb2D::new(12, 0, 13, 1);
        // With a single candidate the heuristic degrades to least enlargement.
        assert_eq!(choose_subtree(&arena, &ids, &probe, true, 1), ids[0]);
    }
}
