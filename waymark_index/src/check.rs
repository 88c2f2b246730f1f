// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural self-check.

use alloc::vec;
#[cfg(test)]
use alloc::vec::Vec;

use crate::error::InvariantError;
use crate::node::{Children, entries_bbox, nodes_bbox};
#[cfg(test)]
use crate::node::NodeId;
use crate::tree::RStarTree;
use crate::types::Scalar;

impl<T: Scalar, P> RStarTree<T, P> {
    /// Walk the whole tree and verify its structural invariants.
    ///
    /// Checks that every bound is the exact union of its children, that non-root
    /// nodes hold between `min_children` and `max_children` items (the root between
    /// one and `max_children`), that all leaves sit at the same depth, that parent
    /// links point back at the holding node, and that the entry count matches
    /// [`len`](Self::len).
    ///
    /// Runs in time linear in the size of the tree; intended for tests and debugging.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let Some(root) = self.root else {
            if self.len != 0 {
                return Err(InvariantError::LenMismatch {
                    found: 0,
                    expected: self.len,
                });
            }
            return Ok(());
        };
        if self.arena[root.get()].parent.is_some() {
            return Err(InvariantError::ParentLink { node: root });
        }

        let expected_depth = self.height - 1;
        let mut found = 0_usize;
        let mut stack = vec![(root, 0_usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.arena[id.get()];
            let len = node.children.len();
            let lower = if id == root {
                1
            } else {
                self.params.min_children
            };
            if len < lower || len > self.params.max_children {
                return Err(InvariantError::Fanout { node: id, len });
            }
            match &node.children {
                Children::Leaf(entries) => {
                    if depth != expected_depth {
                        return Err(InvariantError::Unbalanced {
                            node: id,
                            depth,
                            expected: expected_depth,
                        });
                    }
                    if entries_bbox(entries) != node.bbox {
                        return Err(InvariantError::BoundMismatch { node: id });
                    }
                    found += len;
                }
                Children::Internal(children) => {
                    if depth >= expected_depth {
                        return Err(InvariantError::Unbalanced {
                            node: id,
                            depth,
                            expected: expected_depth,
                        });
                    }
                    if nodes_bbox(&self.arena, children) != node.bbox {
                        return Err(InvariantError::BoundMismatch { node: id });
                    }
                    for &child in children {
                        if self.arena[child.get()].parent != Some(id) {
                            return Err(InvariantError::ParentLink { node: child });
                        }
                        stack.push((child, depth + 1));
                    }
                }
            }
        }

        if found != self.len {
            return Err(InvariantError::LenMismatch {
                found,
                expected: self.len,
            });
        }
        Ok(())
    }

    /// Ids of nodes reachable from the root, in depth-first order.
    #[cfg(test)]
    pub(crate) fn reachable_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<_> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Children::Internal(children) = &self.arena[id.get()].children {
                stack.extend(children.iter().copied());
            }
        }
        out
    }
}
