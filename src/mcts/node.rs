//! Nodes and edges of the search tree.
//!
//! Nodes reference each other by `NodeId` into the tree arena. Every legal
//! action of the deciding player becomes an `Edge`; an edge with no child
//! is an action the search has not tried yet.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Action;

/// Index into the `MCTSTree` arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// No node: the parent of the root, the child of an untried edge.
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.is_none() {
            true => f.write_str("node:-"),
            false => write!(f, "node:{}", self.0),
        }
    }
}

/// One action out of a node, with the results backed up through it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub action: Action,
    pub child: NodeId,
    pub visits: u32,
    /// Sum of rollout values, seen by the player who chose `action`.
    pub total_value: f64,
}

impl Edge {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            child: NodeId::NONE,
            visits: 0,
            total_value: 0.0,
        }
    }

    /// Average value per visit; 0 before the first visit.
    #[must_use]
    pub fn mean_value(&self) -> f64 {
        match self.visits {
            0 => 0.0,
            n => self.total_value / f64::from(n),
        }
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        !self.child.is_none()
    }
}

/// A decision point for the deciding player.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSNode {
    pub parent: NodeId,
    /// Position of this node's edge in `parent.edges`.
    pub parent_edge_idx: u16,
    pub depth: u16,
    pub visits: u32,
    /// The game ended on the way here.
    pub is_terminal: bool,
    /// Result for the deciding player once `is_terminal` is set.
    pub terminal_value: Option<f64>,
    /// Market rows rarely offer more than eight actions at once.
    pub edges: SmallVec<[Edge; 8]>,
}

impl MCTSNode {
    pub fn new(parent: NodeId, parent_edge_idx: u16, depth: u16) -> Self {
        Self {
            parent,
            parent_edge_idx,
            depth,
            visits: 0,
            is_terminal: false,
            terminal_value: None,
            edges: SmallVec::new(),
        }
    }

    pub fn root() -> Self {
        Self::new(NodeId::NONE, 0, 0)
    }

    #[must_use]
    pub fn has_unexpanded(&self) -> bool {
        self.edges.iter().any(|e| !e.is_expanded())
    }

    /// Indices of the untried edges, in edge order.
    pub fn unexpanded_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| (!e.is_expanded()).then_some(i))
    }

    /// Most visited edge. The earliest edge wins a tie.
    #[must_use]
    pub fn best_edge_by_visits(&self) -> Option<&Edge> {
        self.edges.iter().reduce(|best, e| if e.visits > best.visits { e } else { best })
    }
}
