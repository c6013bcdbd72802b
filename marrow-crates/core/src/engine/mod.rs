//! The boundary with the search: the registry of top-level branchings, the undo log which makes
//! branching state backtrack-aware, and the context handed to branchings.
mod branching_context;
mod search_engine;
mod trailed;

pub use branching_context::BranchingContext;
pub use search_engine::Engine;
pub use trailed::*;
