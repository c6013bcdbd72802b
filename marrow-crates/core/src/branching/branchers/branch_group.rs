use std::fmt::Debug;

use log::trace;
use log::warn;

use crate::branching::Branching;
use crate::branching::BranchingRef;
use crate::branching::VariableSelection;
use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::RandomTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::engine::BranchingContext;
use crate::engine::TrailedInteger;
use crate::engine::TrailedValues;
use crate::marrow_assert_simple;
use crate::options::BranchingOptions;
use crate::statistics::StatisticLogger;

/// The value of [`BranchGroup::active_child`] when no child is active.
const NO_ACTIVE_CHILD: i64 = -1;

/// A composite [`Branching`] which combines a sequence of children under a single
/// [`VariableSelection`].
///
/// Upon [`Branching::next_decision`], the group keeps delegating to its active child for as long
/// as that child is unfinished. Once it is finished (or if there is no active child), a new child
/// is selected:
/// - With [`VariableSelection::InputOrder`] the first unfinished child is selected.
/// - With any scored strategy, the unfinished child with the highest [`Branching::score`] is
///   selected; ties are broken in favour of the lowest index, or uniformly at random if
///   [`BranchingOptions::random_tie_breaking`] is set.
///
/// A terminal group never remembers the selected child, so every decision re-evaluates all of its
/// children. A non-terminal group stores the selected child in a [`TrailedInteger`], which means
/// that the choice is forgotten when the search backtracks past the decision under which it was
/// made.
///
/// Once all children are finished the group stays finished, even if backtracking would make one
/// of its children unfinished again.
pub struct BranchGroup<Decision> {
    children: Vec<BranchingRef<Decision>>,
    variable_selection: VariableSelection,
    terminal: bool,
    is_finished: bool,
    active_child: TrailedInteger,
    tie_breaker: Box<dyn TieBreaker<usize, f64>>,
}

impl<Decision> Debug for BranchGroup<Decision> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BranchGroup")
            .field("num_children", &self.children.len())
            .field("variable_selection", &self.variable_selection)
            .field("terminal", &self.terminal)
            .field("is_finished", &self.is_finished)
            .finish()
    }
}

impl<Decision> BranchGroup<Decision> {
    pub fn new(
        children: Vec<BranchingRef<Decision>>,
        variable_selection: VariableSelection,
        terminal: bool,
        trailed_values: &mut TrailedValues,
        options: &BranchingOptions,
    ) -> Self {
        marrow_assert_simple!(
            variable_selection != VariableSelection::Random,
            "A random order of children is provided by `RandomBranch`, not by `BranchGroup`"
        );
        if children.is_empty() {
            warn!("A BranchGroup was created without any children");
        }

        let tie_breaker: Box<dyn TieBreaker<usize, f64>> = if options.random_tie_breaking {
            Box::new(RandomTieBreaker::new(Direction::Maximum))
        } else {
            Box::new(InOrderTieBreaker::new(Direction::Maximum))
        };

        BranchGroup {
            children,
            variable_selection,
            terminal,
            is_finished: false,
            active_child: trailed_values.grow(NO_ACTIVE_CHILD),
            tie_breaker,
        }
    }

    /// Appends `child` as the last child of the group.
    pub fn add(&mut self, child: BranchingRef<Decision>) {
        marrow_assert_simple!(
            !self.is_finished,
            "Children cannot be added to a group which is finished"
        );
        self.children.push(child);
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    fn active_child(&self, context: &BranchingContext) -> Option<usize> {
        let active_child = context.read_trailed_integer(self.active_child);
        (active_child != NO_ACTIVE_CHILD).then_some(active_child as usize)
    }

    fn is_child_finished(&self, index: usize, context: &mut BranchingContext) -> bool {
        self.children[index].borrow_mut().is_finished(context)
    }

    fn select_in_order(&self, context: &mut BranchingContext) -> Option<usize> {
        (0..self.children.len()).find(|&index| !self.is_child_finished(index, context))
    }

    fn select_best_scored(&mut self, context: &mut BranchingContext) -> Option<usize> {
        for index in 0..self.children.len() {
            if self.is_child_finished(index, context) {
                continue;
            }
            let score = self.children[index]
                .borrow()
                .score(self.variable_selection);
            self.tie_breaker.consider(index, score);
        }

        self.tie_breaker.select(context.random())
    }
}

impl<Decision> Branching<Decision> for BranchGroup<Decision> {
    fn is_finished(&mut self, context: &mut BranchingContext) -> bool {
        if self.is_finished {
            return true;
        }

        let all_children_finished =
            (0..self.children.len()).all(|index| self.is_child_finished(index, context));
        if all_children_finished {
            self.is_finished = true;
        }
        all_children_finished
    }

    /// Returns the mean score of the children, which allows nested groups of different sizes to be
    /// compared with each other.
    fn score(&self, strategy: VariableSelection) -> f64 {
        if self.children.is_empty() {
            return 0.0;
        }

        let sum = self
            .children
            .iter()
            .map(|child| child.borrow().score(strategy))
            .sum::<f64>();
        sum / self.children.len() as f64
    }

    fn next_decision(&mut self, context: &mut BranchingContext) -> Option<Decision> {
        if let Some(active_child) = self.active_child(context) {
            if !self.is_child_finished(active_child, context) {
                return self.children[active_child]
                    .borrow_mut()
                    .next_decision(context);
            }
        }

        let selected = if self.variable_selection.is_scored() {
            self.select_best_scored(context)
        } else {
            self.select_in_order(context)
        };

        let Some(selected) = selected else {
            trace!("All children of the group are finished");
            return None;
        };
        trace!(
            "Selected child {selected} of {} using {}",
            self.children.len(),
            self.variable_selection
        );

        if !self.terminal {
            context.assign_trailed_integer(self.active_child, selected as i64);
        }
        self.children[selected].borrow_mut().next_decision(context)
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.children
            .iter()
            .enumerate()
            .for_each(|(index, child)| {
                child
                    .borrow()
                    .log_statistics(statistic_logger.attach_to_prefix(index))
            })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::BranchGroup;
    use crate::basic_types::tests::TestRandom;
    use crate::branching::Branching;
    use crate::branching::BranchingRef;
    use crate::branching::VariableSelection;
    use crate::branching::test_utils::TestLeaf;
    use crate::engine::BranchingContext;
    use crate::engine::TrailedValues;
    use crate::options::BranchingOptions;

    fn next(
        group: &mut BranchGroup<usize>,
        trailed_values: &mut TrailedValues,
        random: &mut TestRandom,
    ) -> Option<usize> {
        let mut context = BranchingContext::new(trailed_values, random);
        group.next_decision(&mut context)
    }

    fn finished(group: &mut BranchGroup<usize>, trailed_values: &mut TrailedValues) -> bool {
        let mut random = TestRandom::default();
        let mut context = BranchingContext::new(trailed_values, &mut random);
        group.is_finished(&mut context)
    }

    #[test]
    fn input_order_delegates_to_lowest_unfinished_child() {
        let options = BranchingOptions::default();
        let mut trailed_values = TrailedValues::default();
        let mut random = TestRandom::default();
        let children = vec![
            TestLeaf::shared(0, 0, 0.0, &mut trailed_values),
            TestLeaf::shared(1, 2, 0.0, &mut trailed_values),
            TestLeaf::shared(2, 1, 0.0, &mut trailed_values),
        ];
        let mut group = BranchGroup::new(
            children,
            VariableSelection::InputOrder,
            true,
            &mut trailed_values,
            &options,
        );

        let decisions = (0..4)
            .map(|_| next(&mut group, &mut trailed_values, &mut random))
            .collect::<Vec<_>>();

        assert_eq!(decisions, vec![Some(1), Some(1), Some(2), None]);
    }

    #[test]
    fn scored_selection_prefers_lowest_index_among_best() {
        let options = BranchingOptions::default();
        let mut trailed_values = TrailedValues::default();
        let mut random = TestRandom::default();
        let children = vec![
            TestLeaf::shared(0, 1, 1.0, &mut trailed_values),
            TestLeaf::shared(1, 1, 4.0, &mut trailed_values),
            TestLeaf::shared(2, 1, 4.0, &mut trailed_values),
            TestLeaf::shared(3, 1, 2.0, &mut trailed_values),
        ];
        let mut group = BranchGroup::new(
            children,
            VariableSelection::SmallestDomain,
            true,
            &mut trailed_values,
            &options,
        );

        let decisions = (0..5)
            .map(|_| next(&mut group, &mut trailed_values, &mut random))
            .collect::<Vec<_>>();

        assert_eq!(decisions, vec![Some(1), Some(2), Some(3), Some(0), None]);
    }

    #[test]
    fn random_tie_breaking_draws_among_tied_children() {
        let options = BranchingOptions {
            random_tie_breaking: true,
            ..Default::default()
        };
        let mut trailed_values = TrailedValues::default();
        let mut random = TestRandom { usizes: vec![2] };
        let children = vec![
            TestLeaf::shared(0, 1, 3.0, &mut trailed_values),
            TestLeaf::shared(1, 1, 1.0, &mut trailed_values),
            TestLeaf::shared(2, 1, 3.0, &mut trailed_values),
            TestLeaf::shared(3, 1, 3.0, &mut trailed_values),
        ];
        let mut group = BranchGroup::new(
            children,
            VariableSelection::Activity,
            true,
            &mut trailed_values,
            &options,
        );

        // The tie consists of children 0, 2 and 3; index 2 of the tie is child 3.
        assert_eq!(
            next(&mut group, &mut trailed_values, &mut random),
            Some(3)
        );
    }

    #[test]
    fn score_is_the_mean_of_the_children() {
        let options = BranchingOptions::default();
        let mut trailed_values = TrailedValues::default();
        let children = vec![
            TestLeaf::shared(0, 1, 1.0, &mut trailed_values),
            TestLeaf::shared(1, 1, 2.0, &mut trailed_values),
            TestLeaf::shared(2, 1, 6.0, &mut trailed_values),
        ];
        let group = BranchGroup::new(
            children,
            VariableSelection::LargestDomain,
            true,
            &mut trailed_values,
            &options,
        );

        assert_eq!(group.score(VariableSelection::LargestDomain), 3.0);
    }

    #[test]
    fn empty_group_is_finished_and_has_no_decision() {
        let options = BranchingOptions::default();
        let mut trailed_values = TrailedValues::default();
        let mut random = TestRandom::default();
        let mut group: BranchGroup<usize> = BranchGroup::new(
            vec![],
            VariableSelection::SmallestDomain,
            true,
            &mut trailed_values,
            &options,
        );

        assert!(finished(&mut group, &mut trailed_values));
        assert_eq!(
            next(&mut group, &mut trailed_values, &mut random),
            None
        );
        assert_eq!(group.score(VariableSelection::SmallestDomain), 0.0);
    }

    #[test]
    fn finished_is_monotonic_under_backtracking() {
        let options = BranchingOptions::default();
        let mut trailed_values = TrailedValues::default();
        let mut random = TestRandom::default();
        let children = vec![TestLeaf::shared(0, 1, 0.0, &mut trailed_values)];
        let mut group = BranchGroup::new(
            children,
            VariableSelection::InputOrder,
            true,
            &mut trailed_values,
            &options,
        );

        assert!(!finished(&mut group, &mut trailed_values));

        trailed_values.new_checkpoint();
        assert_eq!(
            next(&mut group, &mut trailed_values, &mut random),
            Some(0)
        );
        assert!(finished(&mut group, &mut trailed_values));

        // The leaf becomes unfinished again, but the group does not.
        trailed_values.synchronise(0);
        assert!(finished(&mut group, &mut trailed_values));
    }

    #[test]
    fn non_terminal_group_keeps_delegating_to_active_child() {
        let options = BranchingOptions::default();
        let mut trailed_values = TrailedValues::default();
        let mut random = TestRandom::default();
        let first = Rc::new(RefCell::new(TestLeaf::new(0, 2, 1.0, &mut trailed_values)));
        let second = Rc::new(RefCell::new(TestLeaf::new(1, 2, 5.0, &mut trailed_values)));
        let first_child: BranchingRef<usize> = Rc::<RefCell<TestLeaf>>::clone(&first);
        let second_child: BranchingRef<usize> = second;
        let children = vec![first_child, second_child];
        let mut group = BranchGroup::new(
            children,
            VariableSelection::SmallestDomain,
            false,
            &mut trailed_values,
            &options,
        );

        assert_eq!(
            next(&mut group, &mut trailed_values, &mut random),
            Some(1)
        );

        first.borrow_mut().score = 10.0;
        assert_eq!(
            next(&mut group, &mut trailed_values, &mut random),
            Some(1)
        );
        assert_eq!(
            next(&mut group, &mut trailed_values, &mut random),
            Some(0)
        );
    }

    #[test]
    fn terminal_group_reevaluates_every_decision() {
        let options = BranchingOptions::default();
        let mut trailed_values = TrailedValues::default();
        let mut random = TestRandom::default();
        let first = Rc::new(RefCell::new(TestLeaf::new(0, 2, 1.0, &mut trailed_values)));
        let second = Rc::new(RefCell::new(TestLeaf::new(1, 2, 5.0, &mut trailed_values)));
        let first_child: BranchingRef<usize> = Rc::<RefCell<TestLeaf>>::clone(&first);
        let second_child: BranchingRef<usize> = second;
        let children = vec![first_child, second_child];
        let mut group = BranchGroup::new(
            children,
            VariableSelection::SmallestDomain,
            true,
            &mut trailed_values,
            &options,
        );

        assert_eq!(
            next(&mut group, &mut trailed_values, &mut random),
            Some(1)
        );

        first.borrow_mut().score = 10.0;
        assert_eq!(
            next(&mut group, &mut trailed_values, &mut random),
            Some(0)
        );
    }

    #[test]
    fn active_child_is_forgotten_when_backtracking() {
        let options = BranchingOptions::default();
        let mut trailed_values = TrailedValues::default();
        let mut random = TestRandom::default();
        let first = Rc::new(RefCell::new(TestLeaf::new(0, 2, 1.0, &mut trailed_values)));
        let second = Rc::new(RefCell::new(TestLeaf::new(1, 2, 5.0, &mut trailed_values)));
        let first_child: BranchingRef<usize> = Rc::<RefCell<TestLeaf>>::clone(&first);
        let second_child: BranchingRef<usize> = second;
        let children = vec![first_child, second_child];
        let mut group = BranchGroup::new(
            children,
            VariableSelection::SmallestDomain,
            false,
            &mut trailed_values,
            &options,
        );

        trailed_values.new_checkpoint();
        assert_eq!(
            next(&mut group, &mut trailed_values, &mut random),
            Some(1)
        );
        trailed_values.synchronise(0);

        first.borrow_mut().score = 10.0;
        assert_eq!(
            next(&mut group, &mut trailed_values, &mut random),
            Some(0)
        );
    }
}
