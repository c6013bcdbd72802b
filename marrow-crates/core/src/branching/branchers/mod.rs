//! Provides the composite [`Branching`]s, which delegate to exactly one of their children at a
//! time.

mod branch_group;
mod random_branch;

pub use branch_group::BranchGroup;
pub use random_branch::RandomBranch;

#[cfg(doc)]
use super::Branching;
