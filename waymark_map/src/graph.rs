// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Road graph: positioned nodes joined by directed edges.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use kurbo::{Line, Point, Rect};

use crate::error::MapError;

/// A directed edge between two map nodes, tagged with the road it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapEdge<I> {
    /// Departure node.
    pub from: I,
    /// Destination node.
    pub to: I,
    /// Road this edge is a segment of.
    pub road: I,
}

/// Nodes keyed by id with a world position, and edges keyed by id.
///
/// Positions use the map's ground plane: `x` east, `y` south (the world `z` axis).
/// Each node keeps the ids of its outgoing edges in insertion order.
#[derive(Clone, Debug)]
pub struct MapGraph<I> {
    nodes: BTreeMap<I, Point>,
    edges: BTreeMap<I, MapEdge<I>>,
    outgoing: BTreeMap<I, Vec<I>>,
}

impl<I: Ord> Default for MapGraph<I> {
    fn default() -> Self {
        Self {
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            outgoing: BTreeMap::new(),
        }
    }
}

impl<I: Ord + Clone> MapGraph<I> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Insert or move a node. Returns the previous position if the node existed.
    ///
    /// Moving a node keeps its edges; their bounds follow the new position.
    pub fn insert_node(&mut self, id: I, position: Point) -> Option<Point> {
        self.nodes.insert(id, position)
    }

    /// Insert or replace an edge.
    ///
    /// Both endpoints must already be nodes of the graph.
    pub fn insert_edge(&mut self, id: I, from: I, to: I, road: I) -> Result<(), MapError<I>> {
        for endpoint in [&from, &to] {
            if !self.nodes.contains_key(endpoint) {
                return Err(MapError::UnknownNode {
                    edge: id,
                    node: endpoint.clone(),
                });
            }
        }
        if let Some(old) = self.edges.remove(&id)
            && let Some(list) = self.outgoing.get_mut(&old.from)
        {
            list.retain(|e| *e != id);
        }
        self.outgoing
            .entry(from.clone())
            .or_default()
            .push(id.clone());
        self.edges.insert(id, MapEdge { from, to, road });
        Ok(())
    }

    /// Position of a node.
    pub fn node(&self, id: &I) -> Option<Point> {
        self.nodes.get(id).copied()
    }

    /// An edge by id.
    pub fn edge(&self, id: &I) -> Option<&MapEdge<I>> {
        self.edges.get(id)
    }

    /// Every edge, ordered by id.
    pub fn edges(&self) -> impl Iterator<Item = (&I, &MapEdge<I>)> + '_ {
        self.edges.iter()
    }

    /// Ids of the edges leaving `node`. Empty for unknown nodes.
    pub fn adjacent(&self, node: &I) -> impl Iterator<Item = &I> + use<'_, I> {
        self.outgoing.get(node).into_iter().flatten()
    }

    /// The straight segment drawn for an edge.
    pub fn edge_segment(&self, id: &I) -> Option<Line> {
        let edge = self.edges.get(id)?;
        Some(Line::new(self.node(&edge.from)?, self.node(&edge.to)?))
    }

    /// Bounding rectangle of an edge's endpoints, with ordered corners.
    pub fn edge_bounds(&self, id: &I) -> Option<Rect> {
        let segment = self.edge_segment(id)?;
        Some(Rect::from_points(segment.p0, segment.p1))
    }
}
