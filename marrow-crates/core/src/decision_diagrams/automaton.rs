use log::debug;
use log::warn;
use thiserror::Error;

use super::EdgeInfo;
use super::EvLayerGraph;
use super::NodeId;
use crate::marrow_assert_eq_simple;
use crate::marrow_assert_simple;

/// The state from which no assignment is accepted; transitions into it are left out of the graph.
pub const DEAD_STATE: usize = 0;

/// The transition of a weighted automaton for a single state and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeightedTransition {
    pub weight: i32,
    /// The state which is reached; [`DEAD_STATE`] if the value is not allowed.
    pub destination: usize,
}

/// Compiles a weighted deterministic finite automaton over `num_variables` variables into
/// `graph`, returning the root of the resulting layered graph.
///
/// The states are numbered `1..=num_states`, with state [`DEAD_STATE`] rejecting everything, and
/// every variable takes a value in `0..domain_size`. The transition of state `q` for value `v` is
/// `transitions[(q - 1) * domain_size + v]`.
///
/// The graph is built from the last layer to the first; in every layer each state becomes the
/// node whose edges lead to the nodes of the next layer for the states it can reach. Edges which
/// cannot lead to an accepting state are left out, and a state without any remaining edge is
/// [`NodeId::FALSE`]. Since [`EvLayerGraph::insert`] shares equal nodes, states which behave the
/// same from some layer onwards share a single node in that layer.
///
/// Without variables the root is [`NodeId::TRUE`] if `initial_state` is accepting and
/// [`NodeId::FALSE`] otherwise.
///
/// See [`WeightedAutomaton`] for a validated description of the automaton.
pub fn wdfa_to_layer_graph(
    graph: &mut EvLayerGraph,
    num_variables: usize,
    domain_size: usize,
    transitions: &[WeightedTransition],
    num_states: usize,
    initial_state: usize,
    accepting_states: &[usize],
) -> NodeId {
    marrow_assert_eq_simple!(transitions.len(), num_states * domain_size);
    marrow_assert_simple!(initial_state <= num_states);

    let mut is_accepting = vec![false; num_states + 1];
    for &state in accepting_states {
        marrow_assert_simple!(state <= num_states);
        is_accepting[state] = true;
    }
    is_accepting[DEAD_STATE] = false;

    let mut next_layer = is_accepting
        .iter()
        .map(|&accepting| if accepting { NodeId::TRUE } else { NodeId::FALSE })
        .collect::<Vec<_>>();
    let mut current_layer = vec![NodeId::FALSE; num_states + 1];
    let mut edges = Vec::with_capacity(domain_size);

    for variable in (0..num_variables).rev() {
        for state in 1..=num_states {
            let state_transitions =
                &transitions[(state - 1) * domain_size..state * domain_size];

            edges.clear();
            edges.extend(
                state_transitions
                    .iter()
                    .enumerate()
                    .filter_map(|(value, transition)| {
                        let destination = next_layer[transition.destination];
                        (destination != NodeId::FALSE).then_some(EdgeInfo {
                            value: value as i32,
                            weight: transition.weight,
                            destination,
                        })
                    }),
            );

            current_layer[state] = if edges.is_empty() {
                NodeId::FALSE
            } else {
                graph.insert(variable as u32, &edges)
            };
        }

        std::mem::swap(&mut next_layer, &mut current_layer);
    }

    let root = next_layer[initial_state];
    debug!(
        "Compiled an automaton with {num_states} states over {num_variables} variables into root {root} ({} nodes in the graph)",
        graph.num_nodes()
    );
    root
}

/// The errors which can occur when describing a [`WeightedAutomaton`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("the automaton should have at least one value in its domain")]
    EmptyDomain,
    #[error("{actual} transitions cannot be split into states of {domain_size} values each")]
    TransitionTableSize { actual: usize, domain_size: usize },
    #[error("the initial state {state} is not one of the states 1..={num_states}")]
    InitialStateOutOfRange { state: usize, num_states: usize },
    #[error("the accepting state {state} is not one of the states 1..={num_states}")]
    AcceptingStateOutOfRange { state: usize, num_states: usize },
    #[error("the transition of state {state} for value {value} leads to unknown state {destination}")]
    DestinationOutOfRange {
        state: usize,
        value: usize,
        destination: usize,
    },
}

/// A weighted deterministic finite automaton whose description has been checked.
///
/// # Example
/// ```
/// # use marrow_core::decision_diagrams::EvLayerGraph;
/// # use marrow_core::decision_diagrams::WeightedAutomaton;
/// # use marrow_core::decision_diagrams::WeightedTransition;
/// // A single state which accepts every sequence over the values 0 and 1.
/// let transitions = vec![
///     WeightedTransition { weight: 0, destination: 1 },
///     WeightedTransition { weight: 1, destination: 1 },
/// ];
/// let automaton = WeightedAutomaton::new(2, transitions, 1, vec![1]).unwrap();
///
/// let mut graph = EvLayerGraph::default();
/// let root = automaton.compile(&mut graph, 3);
/// assert_eq!(graph.traverse(root), 3);
/// ```
#[derive(Debug, Clone)]
pub struct WeightedAutomaton {
    domain_size: usize,
    num_states: usize,
    transitions: Vec<WeightedTransition>,
    initial_state: usize,
    accepting_states: Vec<usize>,
}

impl WeightedAutomaton {
    /// Creates an automaton with the states `1..=transitions.len() / domain_size`; see
    /// [`wdfa_to_layer_graph`] for the layout of `transitions`.
    pub fn new(
        domain_size: usize,
        transitions: Vec<WeightedTransition>,
        initial_state: usize,
        accepting_states: Vec<usize>,
    ) -> Result<Self, AutomatonError> {
        if domain_size == 0 {
            return Err(AutomatonError::EmptyDomain);
        }

        let num_states = transitions.len() / domain_size;
        if transitions.len() != num_states * domain_size {
            return Err(AutomatonError::TransitionTableSize {
                actual: transitions.len(),
                domain_size,
            });
        }

        if !(1..=num_states).contains(&initial_state) {
            return Err(AutomatonError::InitialStateOutOfRange {
                state: initial_state,
                num_states,
            });
        }

        if let Some(&state) = accepting_states
            .iter()
            .find(|&&state| !(1..=num_states).contains(&state))
        {
            return Err(AutomatonError::AcceptingStateOutOfRange { state, num_states });
        }

        for (index, transition) in transitions.iter().enumerate() {
            if transition.destination > num_states {
                return Err(AutomatonError::DestinationOutOfRange {
                    state: index / domain_size + 1,
                    value: index % domain_size,
                    destination: transition.destination,
                });
            }
        }

        if accepting_states.is_empty() {
            warn!("An automaton without accepting states rejects every assignment");
        }

        Ok(WeightedAutomaton {
            domain_size,
            num_states,
            transitions,
            initial_state,
            accepting_states,
        })
    }

    pub fn domain_size(&self) -> usize {
        self.domain_size
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn initial_state(&self) -> usize {
        self.initial_state
    }

    /// Returns the transition of `state` for `value`.
    pub fn transition(&self, state: usize, value: usize) -> WeightedTransition {
        self.transitions[(state - 1) * self.domain_size + value]
    }

    pub fn is_accepting(&self, state: usize) -> bool {
        self.accepting_states.contains(&state)
    }

    /// Compiles the automaton over `num_variables` variables into `graph` and returns the root.
    pub fn compile(&self, graph: &mut EvLayerGraph, num_variables: usize) -> NodeId {
        wdfa_to_layer_graph(
            graph,
            num_variables,
            self.domain_size,
            &self.transitions,
            self.num_states,
            self.initial_state,
            &self.accepting_states,
        )
    }
}
