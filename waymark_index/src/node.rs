// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entries and the arena node representation.

use alloc::vec::Vec;

use crate::types::{Aabb2D, Scalar};

/// A payload stored in the tree together with its bounding rectangle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<T, P> {
    /// Bounding rectangle of the payload.
    pub aabb: Aabb2D<T>,
    /// Caller-supplied identifier.
    pub payload: P,
}

impl<T, P> Entry<T, P> {
    /// Pair a payload with its bounding rectangle.
    pub const fn new(aabb: Aabb2D<T>, payload: P) -> Self {
        Self { aabb, payload }
    }
}

/// Index of a node in the tree's arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) const fn new(i: usize) -> Self {
        Self(i)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Children<T, P> {
    Leaf(Vec<Entry<T, P>>),
    Internal(Vec<NodeId>),
}

impl<T, P> Children<T, P> {
    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Leaf(entries) => entries.len(),
            Self::Internal(nodes) => nodes.len(),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<T, P> {
    pub(crate) bbox: Aabb2D<T>,
    /// Back-reference for upward bound propagation; `None` for the root.
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Children<T, P>,
}

impl<T: Scalar, P> Node<T, P> {
    pub(crate) fn leaf(entries: Vec<Entry<T, P>>, parent: Option<NodeId>) -> Self {
        debug_assert!(!entries.is_empty(), "leaf nodes are never created empty");
        let bbox = entries_bbox(&entries);
        Self {
            bbox,
            parent,
            children: Children::Leaf(entries),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self.children, Children::Leaf(_))
    }
}

/// Bounding box of a non-empty entry list.
pub(crate) fn entries_bbox<T: Scalar, P>(entries: &[Entry<T, P>]) -> Aabb2D<T> {
    Aabb2D::union_many(entries.iter().map(|e| e.aabb))
        .unwrap_or_else(|| Aabb2D::new(T::zero(), T::zero(), T::zero(), T::zero()))
}

/// Bounding box of a non-empty list of child nodes.
pub(crate) fn nodes_bbox<T: Scalar, P>(arena: &[Node<T, P>], ids: &[NodeId]) -> Aabb2D<T> {
    Aabb2D::union_many(ids.iter().map(|id| arena[id.get()].bbox))
        .unwrap_or_else(|| Aabb2D::new(T::zero(), T::zero(), T::zero(), T::zero()))
}
