// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy range query traversal.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::slice;

use crate::node::{Children, Entry, Node, NodeId};
use crate::tree::RStarTree;
use crate::types::{Aabb2D, Scalar};

/// Iterator over the entries intersecting a query rectangle.
///
/// Created by [`RStarTree::search`], [`RStarTree::query_point`] and [`RStarTree::iter`].
/// Nodes are visited depth-first in child order, and only when their bound intersects
/// the query. Dropping the iterator early is fine: it borrows the tree immutably and
/// leaves it untouched.
pub struct Search<'a, T: Scalar, P> {
    arena: &'a [Node<T, P>],
    /// `None` matches everything.
    query: Option<Aabb2D<T>>,
    stack: Vec<NodeId>,
    leaf: slice::Iter<'a, Entry<T, P>>,
}

impl<'a, T: Scalar, P> Search<'a, T, P> {
    pub(crate) fn new(tree: &'a RStarTree<T, P>, query: Option<Aabb2D<T>>) -> Self {
        let mut search = Self {
            arena: &tree.arena,
            query,
            stack: Vec::new(),
            leaf: slice::Iter::default(),
        };
        if let Some(root) = tree.root
            && search.matches(&tree.arena[root.get()].bbox)
        {
            search.stack.push(root);
        }
        search
    }

    fn matches(&self, bbox: &Aabb2D<T>) -> bool {
        self.query.as_ref().is_none_or(|q| q.intersects(bbox))
    }
}

impl<'a, T: Scalar, P> Iterator for Search<'a, T, P> {
    type Item = &'a Entry<T, P>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let query = self.query;
            if let Some(entry) = self
                .leaf
                .find(|e| query.as_ref().is_none_or(|q| q.intersects(&e.aabb)))
            {
                return Some(entry);
            }
            let id = self.stack.pop()?;
            let arena = self.arena;
            match &arena[id.get()].children {
                Children::Leaf(entries) => self.leaf = entries.iter(),
                Children::Internal(children) => {
                    // Reverse so that children pop in their stored order.
                    for child in children.iter().rev() {
                        if self.matches(&arena[child.get()].bbox) {
                            self.stack.push(*child);
                        }
                    }
                }
            }
        }
    }
}

impl<T: Scalar, P> Debug for Search<'_, T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Search")
            .field("query", &self.query)
            .field("pending_nodes", &self.stack.len())
            .field("pending_entries", &self.leaf.len())
            .finish()
    }
}
