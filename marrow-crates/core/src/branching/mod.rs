//! Contains structures and traits which define the decision making procedure of the search.
//!
//! The central trait is [`Branching`]: at every node of the search tree it either produces the
//! next decision or reports that no decision remains. Leaves of a branching tree are provided by
//! the user of this crate (e.g. a variable which splits its domain); this module provides the
//! composites which combine them:
//! - [`BranchGroup`] selects one child according to a [`VariableSelection`] and keeps delegating
//!   to it until it is finished.
//! - [`RandomBranch`] visits its children in a random order which is consistent under
//!   backtracking.
//!
//! The [`post_branching`] factory builds the right composite for a [`VariableSelection`],
//! registers it with the [`Engine`], and passes the [`ValueSelection`] on to the variables.
//!
//! [`BranchGroup`]: branchers::BranchGroup
//! [`RandomBranch`]: branchers::RandomBranch
//! [`Engine`]: crate::engine::Engine

pub mod branchers;
mod factory;
mod interface;
mod selection;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod tie_breaking;

pub use factory::post_branching;
pub use interface::*;
pub use selection::*;
