//! A leaf branching used to test the composites.
use crate::branching::Branching;
use crate::branching::BranchingRef;
use crate::branching::DecisionVariable;
use crate::branching::PreferredValue;
use crate::branching::VariableSelection;
use crate::branching::share;
use crate::engine::BranchingContext;
use crate::engine::TrailedInteger;
use crate::engine::TrailedValues;

/// A leaf which produces its own `id` as decision a fixed number of times.
///
/// The number of remaining decisions is trailed, so backtracking makes the leaf unfinished again.
#[derive(Debug)]
pub(crate) struct TestLeaf {
    pub(crate) id: usize,
    pub(crate) score: f64,
    pub(crate) remaining_decisions: TrailedInteger,
    pub(crate) preferred_value: Option<PreferredValue>,
}

impl TestLeaf {
    pub(crate) fn new(
        id: usize,
        num_decisions: i64,
        score: f64,
        trailed_values: &mut TrailedValues,
    ) -> Self {
        TestLeaf {
            id,
            score,
            remaining_decisions: trailed_values.grow(num_decisions),
            preferred_value: None,
        }
    }

    pub(crate) fn shared(
        id: usize,
        num_decisions: i64,
        score: f64,
        trailed_values: &mut TrailedValues,
    ) -> BranchingRef<usize> {
        share(TestLeaf::new(id, num_decisions, score, trailed_values))
    }
}

impl Branching<usize> for TestLeaf {
    fn is_finished(&mut self, context: &mut BranchingContext) -> bool {
        context.read_trailed_integer(self.remaining_decisions) == 0
    }

    fn score(&self, _strategy: VariableSelection) -> f64 {
        self.score
    }

    fn next_decision(&mut self, context: &mut BranchingContext) -> Option<usize> {
        let remaining = context.read_trailed_integer(self.remaining_decisions);
        if remaining == 0 {
            return None;
        }
        context.assign_trailed_integer(self.remaining_decisions, remaining - 1);
        Some(self.id)
    }

    fn as_variable(&mut self) -> Option<&mut dyn DecisionVariable> {
        Some(self)
    }
}

impl DecisionVariable for TestLeaf {
    fn set_preferred_value(&mut self, preferred_value: PreferredValue) {
        self.preferred_value = Some(preferred_value);
    }
}
