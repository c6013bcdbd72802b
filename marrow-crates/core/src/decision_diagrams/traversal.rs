use std::fmt::Debug;
use std::ptr;

use super::EvLayerGraph;
use super::NodeId;

/// A read-only view of a node of an [`EvLayerGraph`].
///
/// A view either points at a node or is the end view ([`EvLayerGraph::traversal_end`]). Two views
/// are equal if they point at the same node of the same graph.
#[derive(Clone, Copy)]
pub struct EvNode<'graph> {
    graph: &'graph EvLayerGraph,
    node: Option<NodeId>,
}

/// An outgoing edge of an [`EvNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvEdge<'graph> {
    pub value: i32,
    pub weight: i32,
    pub destination: EvNode<'graph>,
}

impl<'graph> EvNode<'graph> {
    pub(crate) fn new(graph: &'graph EvLayerGraph, node: Option<NodeId>) -> Self {
        EvNode { graph, node }
    }

    /// Returns the `index`-th outgoing edge.
    ///
    /// # Panics
    /// If this is the end view or if the node has no `index`-th edge.
    pub fn edge(&self, index: usize) -> EvEdge<'graph> {
        let edge = self.graph.edges(self.expect_node())[index];
        EvEdge {
            value: edge.value,
            weight: edge.weight,
            destination: self.graph.node(edge.destination),
        }
    }

    pub fn edges(&self) -> impl Iterator<Item = EvEdge<'graph>> + '_ {
        (0..self.size()).map(|index| self.edge(index))
    }

    /// Returns the view of the node which follows this one in the last traversal, or the end view
    /// if this is the last node.
    pub fn next(self) -> EvNode<'graph> {
        let next = self
            .node
            .and_then(|node| self.graph.next_in_traversal(node));
        EvNode::new(self.graph, next)
    }

    /// The variable of the layer of the node, or [`None`] for the terminals and the end view.
    pub fn variable(&self) -> Option<u32> {
        self.node.and_then(|node| self.graph.variable(node))
    }

    /// The position of the node in the order of the last [`EvLayerGraph::traverse`].
    ///
    /// Returns [`None`] for the end view, the terminals, and every node which that traversal did
    /// not reach (including nodes inserted after it).
    pub fn id(&self) -> Option<usize> {
        self.node.and_then(|node| self.graph.discovery_id(node))
    }

    /// The number of outgoing edges; the end view has none.
    pub fn size(&self) -> usize {
        self.node
            .map_or(0, |node| self.graph.edges(node).len())
    }

    pub fn node_id(&self) -> Option<NodeId> {
        self.node
    }

    pub fn is_terminal(&self) -> bool {
        self.node.is_some_and(NodeId::is_terminal)
    }

    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    fn expect_node(&self) -> NodeId {
        match self.node {
            Some(node) => node,
            None => panic!("The end of a traversal does not refer to a node"),
        }
    }
}

impl PartialEq for EvNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.graph, other.graph) && self.node == other.node
    }
}

impl Eq for EvNode<'_> {}

impl Debug for EvNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvNode").field("node", &self.node).finish()
    }
}

/// Iterates over the nodes of the last [`EvLayerGraph::traverse`] in order of discovery.
#[derive(Debug, Clone)]
pub struct Traversal<'graph> {
    current: EvNode<'graph>,
}

impl<'graph> Traversal<'graph> {
    pub(crate) fn new(begin: EvNode<'graph>) -> Self {
        Traversal { current: begin }
    }
}

impl<'graph> Iterator for Traversal<'graph> {
    type Item = EvNode<'graph>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_end() {
            return None;
        }

        let node = self.current;
        self.current = node.next();
        Some(node)
    }
}
