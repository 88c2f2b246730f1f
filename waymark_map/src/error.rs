// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while assembling a map graph.

use core::fmt;

/// Rejected graph mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapError<I> {
    /// An edge names an endpoint that was never inserted as a node.
    UnknownNode {
        /// The edge being inserted.
        edge: I,
        /// The missing endpoint.
        node: I,
    },
}

impl<I: fmt::Debug> fmt::Display for MapError<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode { edge, node } => {
                write!(f, "edge {edge:?} references unknown node {node:?}")
            }
        }
    }
}

impl<I: fmt::Debug> core::error::Error for MapError<I> {}
