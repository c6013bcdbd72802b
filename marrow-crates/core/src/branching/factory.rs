use std::rc::Rc;

use log::debug;

use crate::branching::BranchingRef;
use crate::branching::ValueSelection;
use crate::branching::VariableSelection;
use crate::branching::share;
use crate::engine::Engine;

/// Combines `children` into a single branching according to `variable_selection`, registers it
/// with the `engine`, and returns it.
///
/// [`VariableSelection::Random`] results in a [`RandomBranch`]; every other strategy results in a
/// terminal [`BranchGroup`], so that the children are re-evaluated for every decision.
///
/// Unless `value_selection` is [`ValueSelection::Default`], the corresponding
/// [`PreferredValue`] is passed on to every child.
///
/// # Panics
/// If `value_selection` has no [`PreferredValue`] counterpart (see
/// [`ValueSelection::preferred_value`]), or if it is not [`ValueSelection::Default`] and one of the
/// children is not a [`DecisionVariable`].
///
/// [`RandomBranch`]: crate::branching::branchers::RandomBranch
/// [`BranchGroup`]: crate::branching::branchers::BranchGroup
/// [`PreferredValue`]: crate::branching::PreferredValue
/// [`DecisionVariable`]: crate::branching::DecisionVariable
pub fn post_branching<Decision: 'static>(
    engine: &mut Engine<Decision>,
    children: Vec<BranchingRef<Decision>>,
    variable_selection: VariableSelection,
    value_selection: ValueSelection,
) -> BranchingRef<Decision> {
    let preferred_value = match value_selection.preferred_value() {
        Ok(preferred_value) => preferred_value,
        Err(error) => panic!("{error}"),
    };

    if let Some(preferred_value) = preferred_value {
        for (index, child) in children.iter().enumerate() {
            let mut child = child.borrow_mut();
            match child.as_variable() {
                Some(variable) => variable.set_preferred_value(preferred_value),
                None => panic!(
                    "Child {index} cannot use the value selection '{value_selection}' since it is not a variable"
                ),
            }
        }
    }

    debug!(
        "Posting a branching over {} children with variable selection '{variable_selection}' and value selection '{value_selection}'",
        children.len()
    );

    let branching = if variable_selection == VariableSelection::Random {
        share(engine.new_random_branch(children))
    } else {
        share(engine.new_branch_group(children, variable_selection, true))
    };
    engine.register(Rc::clone(&branching));
    branching
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::post_branching;
    use crate::basic_types::tests::TestRandom;
    use crate::branching::Branching;
    use crate::branching::BranchingRef;
    use crate::branching::PreferredValue;
    use crate::branching::ValueSelection;
    use crate::branching::VariableSelection;
    use crate::branching::share;
    use crate::branching::test_utils::TestLeaf;
    use crate::engine::BranchingContext;
    use crate::engine::Engine;
    use crate::options::BranchingOptions;

    #[derive(Debug)]
    struct Opaque;

    impl Branching<usize> for Opaque {
        fn is_finished(&mut self, _context: &mut BranchingContext) -> bool {
            true
        }

        fn score(&self, _strategy: VariableSelection) -> f64 {
            0.0
        }

        fn next_decision(&mut self, _context: &mut BranchingContext) -> Option<usize> {
            None
        }
    }

    fn leaves(engine: &mut Engine<usize>) -> Vec<Rc<RefCell<TestLeaf>>> {
        (0..3)
            .map(|id| {
                Rc::new(RefCell::new(TestLeaf::new(
                    id,
                    1,
                    id as f64,
                    engine.trailed_values_mut(),
                )))
            })
            .collect()
    }

    fn as_children(leaves: &[Rc<RefCell<TestLeaf>>]) -> Vec<BranchingRef<usize>> {
        leaves
            .iter()
            .map(|leaf| {
                let child: BranchingRef<usize> = Rc::<RefCell<TestLeaf>>::clone(leaf);
                child
            })
            .collect()
    }

    #[test]
    fn scored_selection_posts_terminal_group() {
        let mut engine = Engine::with_random(
            BranchingOptions::default(),
            Box::new(TestRandom::default()),
        );
        let leaves = leaves(&mut engine);

        let _ = post_branching(
            &mut engine,
            as_children(&leaves),
            VariableSelection::LargestDomain,
            ValueSelection::Default,
        );

        assert_eq!(engine.num_registered_branchings(), 1);
        // The highest score is selected first, and re-evaluated after every decision.
        let decisions = (0..4).map(|_| engine.next_decision()).collect::<Vec<_>>();
        assert_eq!(decisions, vec![Some(2), Some(1), Some(0), None]);
        assert!(leaves
            .iter()
            .all(|leaf| leaf.borrow().preferred_value.is_none()));
    }

    #[test]
    fn random_selection_posts_random_branch() {
        let mut engine = Engine::with_random(
            BranchingOptions::default(),
            Box::new(TestRandom { usizes: vec![1] }),
        );
        let leaves = leaves(&mut engine);

        let branching = post_branching(
            &mut engine,
            as_children(&leaves),
            VariableSelection::Random,
            ValueSelection::Default,
        );

        assert!(format!("{:?}", branching.borrow()).starts_with("RandomBranch"));
        assert_eq!(engine.next_decision(), Some(1));
    }

    #[test]
    fn value_selection_is_passed_to_every_child() {
        let mut engine = Engine::with_random(
            BranchingOptions::default(),
            Box::new(TestRandom::default()),
        );
        let leaves = leaves(&mut engine);

        let _ = post_branching(
            &mut engine,
            as_children(&leaves),
            VariableSelection::InputOrder,
            ValueSelection::SplitMax,
        );

        assert!(leaves
            .iter()
            .all(|leaf| leaf.borrow().preferred_value == Some(PreferredValue::SplitMax)));
    }

    #[test]
    #[should_panic(expected = "the value selection 'median' is not supported for branching")]
    fn unsupported_value_selection_panics() {
        let mut engine = Engine::with_random(
            BranchingOptions::default(),
            Box::new(TestRandom::default()),
        );
        let leaves = leaves(&mut engine);

        let _ = post_branching(
            &mut engine,
            as_children(&leaves),
            VariableSelection::InputOrder,
            ValueSelection::Median,
        );
    }

    #[test]
    #[should_panic(expected = "since it is not a variable")]
    fn value_selection_for_non_variable_panics() {
        let mut engine: Engine<usize> = Engine::with_random(
            BranchingOptions::default(),
            Box::new(TestRandom::default()),
        );

        let _ = post_branching(
            &mut engine,
            vec![share(Opaque)],
            VariableSelection::InputOrder,
            ValueSelection::Min,
        );
    }

    #[test]
    fn default_value_selection_accepts_non_variables() {
        let mut engine: Engine<usize> = Engine::with_random(
            BranchingOptions::default(),
            Box::new(TestRandom::default()),
        );

        let _ = post_branching(
            &mut engine,
            vec![share(Opaque)],
            VariableSelection::InputOrder,
            ValueSelection::Default,
        );

        assert_eq!(engine.next_decision(), None);
    }
}
