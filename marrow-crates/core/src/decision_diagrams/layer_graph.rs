use std::collections::VecDeque;
use std::fmt::Display;

use log::trace;

use super::EvNode;
use super::Traversal;
use super::node_hash::hash_node;
use crate::containers::HashMap;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::create_statistics_struct;
use crate::marrow_assert_advanced;
use crate::marrow_assert_moderate;
use crate::marrow_assert_simple;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

/// The layer reported for the two terminals, which lie below every variable layer.
const TERMINAL_LAYER: u32 = u32::MAX;

/// The identifier of a node in an [`EvLayerGraph`].
///
/// Identifiers are handed out by [`EvLayerGraph::insert`] and are only meaningful for the graph
/// which created them. The terminals [`NodeId::FALSE`] and [`NodeId::TRUE`] exist in every graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    id: u32,
}

impl NodeId {
    /// The rejecting terminal.
    pub const FALSE: NodeId = NodeId { id: 0 };
    /// The accepting terminal.
    pub const TRUE: NodeId = NodeId { id: 1 };

    pub fn is_terminal(self) -> bool {
        self == NodeId::FALSE || self == NodeId::TRUE
    }

    pub(crate) fn as_u32(self) -> u32 {
        self.id
    }
}

impl StorageKey for NodeId {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        NodeId { id: index as u32 }
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            NodeId::FALSE => write!(f, "false"),
            NodeId::TRUE => write!(f, "true"),
            NodeId { id } => write!(f, "n{id}"),
        }
    }
}

/// An outgoing edge of a node: taking `value` for the variable of the node costs `weight` and
/// leads to `destination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeInfo {
    pub value: i32,
    pub weight: i32,
    pub destination: NodeId,
}

/// The fixed-size part of a node; its edges are the slice `edge_offset..edge_offset + edge_count`
/// of [`EvLayerGraph::edges`].
#[derive(Debug, Clone, Copy)]
struct NodeHeader {
    variable: u32,
    edge_offset: usize,
    edge_count: usize,
}

impl NodeHeader {
    fn edge_range(&self) -> std::ops::Range<usize> {
        self.edge_offset..self.edge_offset + self.edge_count
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct TraversalStatus {
    visited: bool,
    discovery_id: usize,
    next: Option<NodeId>,
}

create_statistics_struct!(
    /// Statistics about the construction of an [`EvLayerGraph`].
    LayerGraphStatistics {
        /// The number of calls to [`EvLayerGraph::insert`]
        num_inserts: usize,
        /// The number of inserts which returned an existing node
        num_cache_hits: usize,
});

/// A hash-consed layered graph with weighted edges.
///
/// Every node belongs to the layer of a single variable and has a list of outgoing edges, each
/// labelled with a value and a weight; paths end in one of the two terminals [`NodeId::FALSE`] and
/// [`NodeId::TRUE`]. Nodes are immutable once inserted, and [`EvLayerGraph::insert`] guarantees
/// that two nodes with the same layer and the same edges are never both stored: equal content
/// implies an equal [`NodeId`].
///
/// The graph is built once (e.g. by [`wdfa_to_layer_graph`]) and read afterwards, either by
/// [`NodeId`] or through the [`EvNode`] views, which iterate over the nodes reachable from a root
/// in the order computed by [`EvLayerGraph::traverse`].
///
/// # Example
/// ```
/// # use marrow_core::decision_diagrams::EdgeInfo;
/// # use marrow_core::decision_diagrams::EvLayerGraph;
/// # use marrow_core::decision_diagrams::NodeId;
/// let mut graph = EvLayerGraph::default();
/// let edges = [
///     EdgeInfo { value: 0, weight: 5, destination: NodeId::TRUE },
///     EdgeInfo { value: 1, weight: 3, destination: NodeId::TRUE },
/// ];
///
/// let first = graph.insert(2, &edges);
/// let second = graph.insert(2, &edges);
/// assert_eq!(first, second);
///
/// assert_eq!(graph.traverse(first), 1);
/// ```
///
/// [`wdfa_to_layer_graph`]: crate::decision_diagrams::wdfa_to_layer_graph
#[derive(Debug)]
pub struct EvLayerGraph {
    nodes: KeyedVec<NodeId, NodeHeader>,
    edges: Vec<EdgeInfo>,
    /// Maps the content hash of a node to the nodes with that hash
    cache: HashMap<u32, Vec<NodeId>>,
    status: KeyedVec<NodeId, TraversalStatus>,
    traversal_head: Option<NodeId>,
    statistics: LayerGraphStatistics,
}

impl Default for EvLayerGraph {
    fn default() -> Self {
        let mut nodes = KeyedVec::default();
        for terminal in [NodeId::FALSE, NodeId::TRUE] {
            let id = nodes.push(NodeHeader {
                variable: TERMINAL_LAYER,
                edge_offset: 0,
                edge_count: 0,
            });
            marrow_assert_simple!(id == terminal);
        }

        EvLayerGraph {
            nodes,
            edges: Vec::default(),
            cache: HashMap::default(),
            status: KeyedVec::default(),
            traversal_head: None,
            statistics: LayerGraphStatistics::default(),
        }
    }
}

impl EvLayerGraph {
    /// Returns the node of layer `variable` with the provided `edges`, creating it if no such node
    /// exists yet.
    ///
    /// The destinations of the edges should be nodes of this graph; the edges are stored in the
    /// provided order, so the same edges in a different order result in a different node.
    pub fn insert(&mut self, variable: u32, edges: &[EdgeInfo]) -> NodeId {
        marrow_assert_simple!(
            variable != TERMINAL_LAYER,
            "Layer {variable} is reserved for the terminals"
        );
        marrow_assert_moderate!(
            edges
                .iter()
                .all(|edge| edge.destination.index() < self.nodes.len()),
            "Every destination should be a node of this graph"
        );
        self.statistics.num_inserts += 1;

        let hash = hash_node(variable, edges);
        if let Some(existing) = self.cache.get(&hash).and_then(|bucket| {
            bucket
                .iter()
                .copied()
                .find(|&candidate| self.has_content(candidate, variable, edges))
        }) {
            self.statistics.num_cache_hits += 1;
            return existing;
        }

        let node = self.nodes.push(NodeHeader {
            variable,
            edge_offset: self.edges.len(),
            edge_count: edges.len(),
        });
        self.edges.extend_from_slice(edges);
        self.cache.entry(hash).or_default().push(node);

        trace!(
            "Created node {node} in layer {variable} with {} edges",
            edges.len()
        );
        node
    }

    fn has_content(&self, node: NodeId, variable: u32, edges: &[EdgeInfo]) -> bool {
        let header = &self.nodes[node];
        header.variable == variable
            && header.edge_count == edges.len()
            && self.edges[header.edge_range()] == *edges
    }

    /// Computes the nodes reachable from `root` and returns how many there are.
    ///
    /// The nodes are discovered breadth-first and receive dense ids (see [`EvNode::id`]) in order
    /// of discovery; [`EvLayerGraph::traversal`] afterwards iterates over them in that order. The
    /// terminals are never part of a traversal, so traversing from a terminal results in 0.
    ///
    /// Every call recomputes the traversal from scratch.
    pub fn traverse(&mut self, root: NodeId) -> usize {
        self.status = KeyedVec::default();
        self.status
            .resize(self.nodes.len(), TraversalStatus::default());
        self.traversal_head = None;

        if root.is_terminal() {
            return 0;
        }

        let mut num_discovered = 0;
        let mut queue = VecDeque::new();
        self.status[root] = TraversalStatus {
            visited: true,
            discovery_id: num_discovered,
            next: None,
        };
        num_discovered += 1;
        queue.push_back(root);

        let mut previous: Option<NodeId> = None;
        while let Some(node) = queue.pop_front() {
            match previous {
                Some(previous) => self.status[previous].next = Some(node),
                None => self.traversal_head = Some(node),
            }
            previous = Some(node);

            for edge in &self.edges[self.nodes[node].edge_range()] {
                let destination = edge.destination;
                if destination.is_terminal() || self.status[destination].visited {
                    continue;
                }

                self.status[destination] = TraversalStatus {
                    visited: true,
                    discovery_id: num_discovered,
                    next: None,
                };
                num_discovered += 1;
                queue.push_back(destination);
            }
        }

        marrow_assert_advanced!(
            self.traversal().count() == num_discovered,
            "The traversal links {} nodes but {num_discovered} were discovered",
            self.traversal().count()
        );
        num_discovered
    }

    /// The first node of the last traversal.
    pub fn traversal_begin(&self) -> EvNode<'_> {
        EvNode::new(self, self.traversal_head)
    }

    /// The view past the last node of every traversal.
    pub fn traversal_end(&self) -> EvNode<'_> {
        EvNode::new(self, None)
    }

    /// Iterates over the nodes of the last traversal in order of discovery.
    pub fn traversal(&self) -> Traversal<'_> {
        Traversal::new(self.traversal_begin())
    }

    pub fn node(&self, node: NodeId) -> EvNode<'_> {
        EvNode::new(self, Some(node))
    }

    /// Returns the variable of the layer of `node`, or [`None`] for the terminals.
    pub fn variable(&self, node: NodeId) -> Option<u32> {
        let variable = self.nodes[node].variable;
        (variable != TERMINAL_LAYER).then_some(variable)
    }

    pub fn edges(&self, node: NodeId) -> &[EdgeInfo] {
        &self.edges[self.nodes[node].edge_range()]
    }

    /// The number of nodes in the graph, including the two terminals.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn discovery_id(&self, node: NodeId) -> Option<usize> {
        self.status
            .get(node)
            .filter(|status| status.visited)
            .map(|status| status.discovery_id)
    }

    pub(crate) fn next_in_traversal(&self, node: NodeId) -> Option<NodeId> {
        self.status.get(node).and_then(|status| status.next)
    }

    pub fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger.clone());
        statistic_logger
            .attach_to_prefix("num_nodes")
            .log_statistic(self.num_nodes());
        statistic_logger
            .attach_to_prefix("num_edges")
            .log_statistic(self.num_edges());
    }
}
