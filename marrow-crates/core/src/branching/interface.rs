use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use crate::branching::PreferredValue;
use crate::branching::VariableSelection;
#[cfg(doc)]
use crate::branching::branchers::BranchGroup;
#[cfg(doc)]
use crate::branching::branchers::RandomBranch;
use crate::engine::BranchingContext;
#[cfg(doc)]
use crate::engine::Engine;
use crate::statistics::StatisticLogger;

/// A shared handle to a [`Branching`].
///
/// Composite branchings (e.g. [`BranchGroup`] and [`RandomBranch`]) hold such handles to their
/// children; the same child can be referenced by several composites and by the [`Engine`] itself.
pub type BranchingRef<Decision> = Rc<RefCell<dyn Branching<Decision>>>;

/// Wraps `branching` into a [`BranchingRef`] which can be shared between composites.
pub fn share<Decision, B>(branching: B) -> BranchingRef<Decision>
where
    B: Branching<Decision> + 'static,
{
    Rc::new(RefCell::new(branching))
}

/// A trait for defining how the search proceeds at each node of the search tree.
///
/// Leaves of a branching tree (e.g. a variable which splits its own domain) produce the actual
/// `Decision`s; composites delegate to exactly one of their children at a time. The `Decision` is
/// opaque to this crate and is passed through unexamined.
///
/// If a [`Branching`] is implemented incorrectly then the behaviour of the search is undefined.
pub trait Branching<Decision>: Debug {
    /// Returns whether no descendant of this branching can produce another decision.
    ///
    /// This method should be idempotent; it can be called any number of times between two
    /// decisions.
    fn is_finished(&mut self, context: &mut BranchingContext) -> bool;

    /// Returns how desirable it is to branch on this branching next according to `strategy`, where
    /// a higher score is more desirable.
    ///
    /// # Panics
    /// Implementations may panic for strategies which they do not define a score for; this
    /// reflects an unsupported model rather than a runtime fault.
    fn score(&self, strategy: VariableSelection) -> f64;

    /// Returns the next decision (or [`None`] if no descendant can produce one).
    fn next_decision(&mut self, context: &mut BranchingContext) -> Option<Decision>;

    /// Returns the branching as a [`DecisionVariable`] if it accepts a [`PreferredValue`] hint.
    fn as_variable(&mut self) -> Option<&mut dyn DecisionVariable> {
        None
    }

    /// Logs statistics of the branching using the provided [`StatisticLogger`].
    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}
}

/// A leaf branching over a single variable which can be told which value to prefer.
pub trait DecisionVariable {
    fn set_preferred_value(&mut self, preferred_value: PreferredValue);
}
