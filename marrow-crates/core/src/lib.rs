//! # Marrow
//! The decision layer of a constraint solver.
//!
//! The crate provides two building blocks for a backtracking search:
//! - [`branching`]: composable branchings which decide, at every node of the search tree, which
//!   decision to take next. Composites such as
//!   [`BranchGroup`](branching::branchers::BranchGroup) and
//!   [`RandomBranch`](branching::branchers::RandomBranch) combine leaf branchings provided by the
//!   user, and the [`Engine`](engine::Engine) asks the registered branchings for decisions.
//! - [`decision_diagrams`]: a hash-consed layered graph ([`EvLayerGraph`]) and a compiler from
//!   weighted automata into such graphs ([`wdfa_to_layer_graph`]).
//!
//! # Example
//! ```
//! # use marrow_core::BranchingOptions;
//! # use marrow_core::branching::ValueSelection;
//! # use marrow_core::branching::VariableSelection;
//! # use marrow_core::branching::post_branching;
//! # use marrow_core::engine::Engine;
//! let mut engine: Engine<u32> = Engine::new(BranchingOptions::default());
//! let _ = post_branching(
//!     &mut engine,
//!     vec![],
//!     VariableSelection::SmallestDomain,
//!     ValueSelection::Default,
//! );
//!
//! assert_eq!(engine.num_registered_branchings(), 1);
//! assert_eq!(engine.next_decision(), None);
//! ```
//!
//! [`EvLayerGraph`]: decision_diagrams::EvLayerGraph
//! [`wdfa_to_layer_graph`]: decision_diagrams::wdfa_to_layer_graph
pub(crate) mod basic_types;
pub(crate) mod marrow_asserts;

pub mod branching;
pub mod containers;
pub mod decision_diagrams;
pub mod engine;
pub mod options;
pub mod statistics;

pub use convert_case;
pub use rand;

pub use crate::basic_types::Random;
pub use crate::options::BranchingOptions;
