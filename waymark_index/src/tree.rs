// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The R*-tree: arena storage, insertion, overflow treatment, and accessors.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::choose::choose_subtree;
use crate::error::ParamsError;
use crate::node::{Children, Entry, Node, NodeId, entries_bbox, nodes_bbox};
use crate::params::Params;
use crate::query::Search;
use crate::split::split_items;
use crate::types::{Aabb2D, Scalar, center_distance_sq, cmp_partial, union_aabb};

/// An R*-tree over axis-aligned rectangles carrying payloads of type `P`.
///
/// Nodes live in an arena and refer to each other by [`NodeId`]; parents are
/// tracked as back-references so bounds can be propagated upward without
/// re-descending from the root.
///
/// Levels are counted from the leaves: leaves are level 0 and the root is at
/// level `height() - 1`.
pub struct RStarTree<T: Scalar, P> {
    pub(crate) params: Params,
    pub(crate) root: Option<NodeId>,
    pub(crate) arena: Vec<Node<T, P>>,
    pub(crate) height: usize,
    pub(crate) len: usize,
}

/// An item waiting to be placed at some level: an entry goes into a leaf,
/// a node goes into an internal node one level above it.
enum Item<T, P> {
    Entry(Entry<T, P>),
    Node(NodeId),
}

impl<T: Scalar, P> Default for RStarTree<T, P> {
    fn default() -> Self {
        Self::with_params(Params::default())
    }
}

impl<T: Scalar, P> RStarTree<T, P> {
    /// Create an empty tree with default [`Params`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tree with the given parameters.
    ///
    /// # Panics
    ///
    /// Panics if `params` fails [`Params::validate`].
    pub fn with_params(params: Params) -> Self {
        match Self::try_with_params(params) {
            Ok(tree) => tree,
            Err(e) => panic!("invalid R*-tree parameters: {e}"),
        }
    }

    /// Create an empty tree, rejecting invalid parameters.
    pub fn try_with_params(params: Params) -> Result<Self, ParamsError> {
        Ok(Self {
            params: params.validate()?,
            root: None,
            arena: Vec::new(),
            height: 0,
            len: 0,
        })
    }

    /// The parameters this tree was built with.
    pub fn params(&self) -> Params {
        self.params
    }

    /// Number of entries stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels: 0 when empty, 1 when the root is a leaf.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bounding rectangle of every stored entry, or `None` when empty.
    pub fn bound(&self) -> Option<Aabb2D<T>> {
        self.root.map(|r| self.arena[r.get()].bbox)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.root = None;
        self.arena.clear();
        self.height = 0;
        self.len = 0;
    }

    /// Lazily yield every entry whose rectangle intersects `rect` (edges inclusive).
    ///
    /// Subtrees whose bound misses `rect` are skipped without descent. Results come
    /// in tree order; callers should not rely on any particular ordering.
    pub fn search(&self, rect: Aabb2D<T>) -> Search<'_, T, P> {
        Search::new(self, Some(rect))
    }

    /// Lazily yield every entry whose rectangle contains the point.
    pub fn query_point(&self, x: T, y: T) -> Search<'_, T, P> {
        self.search(Aabb2D::new(x, y, x, y))
    }

    /// Lazily yield every entry.
    pub fn iter(&self) -> Search<'_, T, P> {
        Search::new(self, None)
    }

    /// Insert one entry.
    pub fn insert(&mut self, aabb: Aabb2D<T>, payload: P) {
        #[cfg(feature = "tracing")]
        tracing::trace!(?aabb, len = self.len, "insert");
        let entry = Entry::new(aabb, payload);
        if self.root.is_none() {
            let id = self.push_node(Node::leaf(vec![entry], None));
            self.root = Some(id);
            self.height = 1;
        } else {
            // One flag per level: has forced reinsertion already run there during this call?
            let mut reinserted: Vec<bool> = Vec::new();
            self.insert_item(Item::Entry(entry), 0, &mut reinserted);
        }
        self.len += 1;
    }

    pub(crate) fn push_node(&mut self, node: Node<T, P>) -> NodeId {
        let id = NodeId::new(self.arena.len());
        self.arena.push(node);
        id
    }

    /// Create an internal node over `children` and point their parent links at it.
    pub(crate) fn push_internal(&mut self, children: Vec<NodeId>) -> NodeId {
        debug_assert!(!children.is_empty(), "internal nodes are never created empty");
        let bbox = nodes_bbox(&self.arena, &children);
        let id = NodeId::new(self.arena.len());
        for child in &children {
            self.arena[child.get()].parent = Some(id);
        }
        self.arena.push(Node {
            bbox,
            parent: None,
            children: Children::Internal(children),
        });
        id
    }

    fn item_bbox(&self, item: &Item<T, P>) -> Aabb2D<T> {
        match item {
            Item::Entry(e) => e.aabb,
            Item::Node(id) => self.arena[id.get()].bbox,
        }
    }

    /// Place `item` into a node at `level`, then treat any overflow it causes.
    fn insert_item(&mut self, item: Item<T, P>, level: usize, reinserted: &mut Vec<bool>) {
        let Some(root) = self.root else {
            unreachable!("items are only placed into a non-empty tree");
        };
        let bbox = self.item_bbox(&item);
        let target = self.choose_node(root, &bbox, level);
        self.attach(target, item);
        self.extend_upward(target, &bbox);
        self.handle_overflow(target, level, reinserted);
    }

    /// Descend from `root` to the node at `level` best suited to receive `bbox`.
    fn choose_node(&self, root: NodeId, bbox: &Aabb2D<T>, level: usize) -> NodeId {
        let mut node = root;
        let mut node_level = self.height - 1;
        while node_level > level {
            let Children::Internal(children) = &self.arena[node.get()].children else {
                break;
            };
            node = choose_subtree(
                &self.arena,
                children,
                bbox,
                node_level == 1,
                self.params.overlap_candidates,
            );
            node_level -= 1;
        }
        debug_assert_eq!(node_level, level, "descent stopped above the target level");
        node
    }

    fn attach(&mut self, node: NodeId, item: Item<T, P>) {
        match item {
            Item::Entry(entry) => match &mut self.arena[node.get()].children {
                Children::Leaf(entries) => entries.push(entry),
                Children::Internal(_) => unreachable!("entries only go into leaves"),
            },
            Item::Node(child) => {
                match &mut self.arena[node.get()].children {
                    Children::Internal(nodes) => nodes.push(child),
                    Children::Leaf(_) => unreachable!("nodes only go into internal nodes"),
                }
                self.arena[child.get()].parent = Some(node);
            }
        }
    }

    /// Grow `node` and all of its ancestors to cover `bbox`.
    fn extend_upward(&mut self, node: NodeId, bbox: &Aabb2D<T>) {
        let mut cur = Some(node);
        while let Some(id) = cur {
            let n = &mut self.arena[id.get()];
            n.bbox = union_aabb(n.bbox, *bbox);
            cur = n.parent;
        }
    }

    /// Recompute `node`'s bound from its children.
    fn refresh_bbox(&mut self, node: NodeId) {
        let bbox = match &self.arena[node.get()].children {
            Children::Leaf(entries) => entries_bbox(entries),
            Children::Internal(ids) => nodes_bbox(&self.arena, ids),
        };
        self.arena[node.get()].bbox = bbox;
    }

    /// Recompute the bounds of `node` and all of its ancestors after it lost items.
    fn shrink_upward(&mut self, node: NodeId) {
        let mut cur = Some(node);
        while let Some(id) = cur {
            self.refresh_bbox(id);
            cur = self.arena[id.get()].parent;
        }
    }

    /// Split overflowing nodes upward until one fits, growing the root if needed.
    fn handle_overflow(&mut self, mut node: NodeId, mut level: usize, reinserted: &mut Vec<bool>) {
        while self.arena[node.get()].children.len() > self.params.max_children {
            let Some(sibling) = self.overflow_treatment(node, level, reinserted) else {
                return;
            };
            match self.arena[node.get()].parent {
                Some(parent) => {
                    // The parent's bound already covers both halves.
                    self.attach(parent, Item::Node(sibling));
                    node = parent;
                    level += 1;
                }
                None => {
                    self.grow_root(node, sibling);
                    return;
                }
            }
        }
    }

    /// Reinsert on the first overflow at a non-root level, split otherwise.
    ///
    /// Returns the new sibling when the node was split.
    fn overflow_treatment(
        &mut self,
        node: NodeId,
        level: usize,
        reinserted: &mut Vec<bool>,
    ) -> Option<NodeId> {
        debug_assert_eq!(
            self.arena[node.get()].children.len(),
            self.params.max_children + 1,
            "overflow treatment on a node that is not exactly one over capacity"
        );
        let first_at_level = !reinserted.get(level).copied().unwrap_or(false);
        if self.root != Some(node) && first_at_level {
            if reinserted.len() <= level {
                reinserted.resize(level + 1, false);
            }
            reinserted[level] = true;
            self.reinsert(node, level, reinserted);
            None
        } else {
            Some(self.split(node, level))
        }
    }

    /// Forced reinsertion: evict the items farthest from the node's center and
    /// place them again, closest first, at the same level.
    fn reinsert(&mut self, node: NodeId, level: usize, reinserted: &mut Vec<bool>) {
        let center = self.arena[node.get()].bbox;
        let count = self.params.reinsert_count;
        let taken = core::mem::replace(
            &mut self.arena[node.get()].children,
            Children::Internal(Vec::new()),
        );
        let (kept, evicted): (Children<T, P>, Vec<Item<T, P>>) = match taken {
            Children::Leaf(mut entries) => {
                entries.sort_by(|a, b| {
                    cmp_partial(
                        &center_distance_sq(&a.aabb, &center),
                        &center_distance_sq(&b.aabb, &center),
                    )
                });
                let evicted = entries.split_off(entries.len() - count);
                (
                    Children::Leaf(entries),
                    evicted.into_iter().map(Item::Entry).collect(),
                )
            }
            Children::Internal(mut ids) => {
                let arena = &self.arena;
                ids.sort_by(|a, b| {
                    cmp_partial(
                        &center_distance_sq(&arena[a.get()].bbox, &center),
                        &center_distance_sq(&arena[b.get()].bbox, &center),
                    )
                });
                let evicted = ids.split_off(ids.len() - count);
                (
                    Children::Internal(ids),
                    evicted.into_iter().map(Item::Node).collect(),
                )
            }
        };
        self.arena[node.get()].children = kept;
        self.shrink_upward(node);

        #[cfg(feature = "tracing")]
        tracing::debug!(level, count, "forced reinsertion");

        for item in evicted {
            self.insert_item(item, level, reinserted);
        }
    }

    /// Split an overflowing node and return its new sibling (not yet attached).
    fn split(&mut self, node: NodeId, level: usize) -> NodeId {
        let min = self.params.min_children;
        let sibling = NodeId::new(self.arena.len());
        let taken = core::mem::replace(
            &mut self.arena[node.get()].children,
            Children::Internal(Vec::new()),
        );
        let (kept, moved) = match taken {
            Children::Leaf(mut entries) => {
                let second = split_items(&mut entries, min, |e: &Entry<T, P>| e.aabb);
                (Children::Leaf(entries), Children::Leaf(second))
            }
            Children::Internal(mut ids) => {
                let arena = &self.arena;
                let second = split_items(&mut ids, min, |id: &NodeId| arena[id.get()].bbox);
                for id in &second {
                    self.arena[id.get()].parent = Some(sibling);
                }
                (Children::Internal(ids), Children::Internal(second))
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(level, kept = kept.len(), moved = moved.len(), "split node");
        #[cfg(not(feature = "tracing"))]
        let _ = level;

        self.arena[node.get()].children = kept;
        self.refresh_bbox(node);
        let parent = self.arena[node.get()].parent;
        let bbox = match &moved {
            Children::Leaf(entries) => entries_bbox(entries),
            Children::Internal(ids) => nodes_bbox(&self.arena, ids),
        };
        let pushed = self.push_node(Node {
            bbox,
            parent,
            children: moved,
        });
        debug_assert_eq!(pushed, sibling, "sibling id was reserved before the split");
        sibling
    }

    /// Put a new root above the old root and its split sibling.
    fn grow_root(&mut self, old_root: NodeId, sibling: NodeId) {
        let root = self.push_internal(vec![old_root, sibling]);
        self.root = Some(root);
        self.height += 1;
        #[cfg(feature = "tracing")]
        tracing::debug!(height = self.height, "grew root");
    }
}

impl<T: Scalar, P> Extend<(Aabb2D<T>, P)> for RStarTree<T, P> {
    fn extend<I: IntoIterator<Item = (Aabb2D<T>, P)>>(&mut self, iter: I) {
        for (aabb, payload) in iter {
            self.insert(aabb, payload);
        }
    }
}

impl<'a, T: Scalar, P> IntoIterator for &'a RStarTree<T, P> {
    type Item = &'a Entry<T, P>;
    type IntoIter = Search<'a, T, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Scalar, P> Debug for RStarTree<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RStarTree")
            .field("params", &self.params)
            .field("len", &self.len)
            .field("height", &self.height)
            .field("arena_nodes", &self.arena.len())
            .field("bound", &self.bound())
            .finish_non_exhaustive()
    }
}

/// R*-tree with i64 coordinates and i128 metrics.
pub type RStarTreeI64<P> = RStarTree<i64, P>;

/// R*-tree with f32 coordinates and f64 metrics.
pub type RStarTreeF32<P> = RStarTree<f32, P>;

/// R*-tree with f64 coordinates and f64 metrics.
pub type RStarTreeF64<P> = RStarTree<f64, P>;
