//! Layered decision diagrams with weighted edges, used to represent constraints given as a
//! weighted automaton.
//!
//! An [`EvLayerGraph`] stores every node at most once (hash-consing): inserting a node with the
//! same layer and edges as an existing node returns the existing [`NodeId`]. Automata are compiled
//! into such a graph by [`wdfa_to_layer_graph`] (or [`WeightedAutomaton::compile`]), after which
//! the graph is read through the [`EvNode`] views.
mod automaton;
mod layer_graph;
mod node_hash;
mod traversal;

pub use automaton::*;
pub use layer_graph::EdgeInfo;
pub use layer_graph::EvLayerGraph;
pub use layer_graph::NodeId;
pub use traversal::*;
