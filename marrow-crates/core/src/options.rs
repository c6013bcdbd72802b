//! Options which configure how branchings behave during search.

/// The options handed to every [`Branching`] through the [`BranchingContext`].
///
/// These are fixed when the [`Engine`] is created and are read-only afterwards.
///
/// [`Branching`]: crate::branching::Branching
/// [`BranchingContext`]: crate::engine::BranchingContext
/// [`Engine`]: crate::engine::Engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchingOptions {
    /// Whether ties between equally scored children are broken uniformly at random rather than by
    /// taking the lowest index.
    pub random_tie_breaking: bool,
    /// The seed of the random generator used by the engine.
    pub random_seed: u64,
}

impl Default for BranchingOptions {
    fn default() -> Self {
        Self {
            random_tie_breaking: false,
            random_seed: 42,
        }
    }
}
