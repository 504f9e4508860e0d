//! Arena-based MCTS tree.
//!
//! Nodes live in a flat `Vec<MCTSNode>` and point at each other by
//! `NodeId`. Node 0 is always the root.

use serde::{Deserialize, Serialize};

use super::node::{MCTSNode, NodeId};
use crate::core::Action;

/// Arena-based MCTS tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSTree {
    nodes: Vec<MCTSNode>,
}

impl Default for MCTSTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MCTSTree {
    const ROOT: NodeId = NodeId(0);

    /// Create a new tree holding only a root node.
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(MCTSNode::root());
        Self { nodes }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MCTSNode {
        &self.nodes[id.raw() as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode {
        &mut self.nodes[id.raw() as usize]
    }

    /// Push a node and return its ID.
    pub fn alloc(&mut self, node: MCTSNode) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true: the root is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every node but a fresh root, keeping the allocation.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.nodes.push(MCTSNode::root());
    }

    #[must_use]
    pub fn root_node(&self) -> &MCTSNode {
        self.get(Self::ROOT)
    }

    pub fn root_node_mut(&mut self) -> &mut MCTSNode {
        self.get_mut(Self::ROOT)
    }

    /// Actions leading from the root to `node`, root first.
    #[must_use]
    pub fn path_to(&self, node: NodeId) -> Vec<Action> {
        let mut actions = Vec::new();
        let mut current = node;
        while current != Self::ROOT && !current.is_none() {
            let child = self.get(current);
            let parent = self.get(child.parent);
            actions.push(parent.edges[usize::from(child.parent_edge_idx)].action.clone());
            current = child.parent;
        }
        actions.reverse();
        actions
    }

    /// Most visited line of play from the root, stopping at untried edges.
    #[must_use]
    pub fn principal_variation(&self) -> Vec<Action> {
        let mut line = Vec::new();
        let mut node = self.root_node();
        while let Some(edge) = node.best_edge_by_visits() {
            if edge.visits == 0 {
                break;
            }
            line.push(edge.action.clone());
            if !edge.is_expanded() {
                break;
            }
            node = self.get(edge.child);
        }
        line
    }

    /// Shape of the tree in one pass over the arena.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        self.nodes.iter().fold(
            TreeStats {
                node_count: self.nodes.len(),
                ..TreeStats::default()
            },
            |mut stats, node| {
                stats.max_depth = stats.max_depth.max(node.depth);
                stats.terminal_count += usize::from(node.is_terminal);
                stats.total_edges += node.edges.len();
                stats.expanded_edges += node.edges.iter().filter(|e| e.is_expanded()).count();
                stats
            },
        )
    }
}

/// Shape of an `MCTSTree`, for diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeStats {
    pub node_count: usize,
    pub max_depth: u16,
    pub terminal_count: usize,

    /// Actions known across all nodes, tried or not.
    pub total_edges: usize,

    /// Actions that have a child node.
    pub expanded_edges: usize,
}

impl TreeStats {
    /// Average number of legal actions per node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            self.total_edges as f64 / self.node_count as f64
        }
    }
}
