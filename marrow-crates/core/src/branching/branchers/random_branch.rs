use std::fmt::Debug;

use log::warn;

use crate::branching::Branching;
use crate::branching::BranchingRef;
use crate::branching::VariableSelection;
use crate::engine::BranchingContext;
use crate::engine::TrailedInteger;
use crate::engine::TrailedValues;
use crate::statistics::StatisticLogger;

/// A composite [`Branching`] which visits its children in a random order.
///
/// The order is drawn lazily, one step of a Fisher-Yates shuffle per selection: the child at the
/// current position is swapped with a uniformly drawn child from the remaining suffix, and the
/// first unfinished child found this way becomes the active one. The position is stored in a
/// [`TrailedInteger`], so it only moves forward along a single path of the search and is restored
/// when the search backtracks.
///
/// There is no meaningful score for a random order; calling [`Branching::score`] on this branching
/// panics.
pub struct RandomBranch<Decision> {
    children: Vec<BranchingRef<Decision>>,
    position: TrailedInteger,
}

impl<Decision> Debug for RandomBranch<Decision> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomBranch")
            .field("num_children", &self.children.len())
            .finish()
    }
}

impl<Decision> RandomBranch<Decision> {
    pub fn new(children: Vec<BranchingRef<Decision>>, trailed_values: &mut TrailedValues) -> Self {
        if children.is_empty() {
            warn!("A RandomBranch was created without any children");
        }

        RandomBranch {
            children,
            position: trailed_values.grow(0),
        }
    }

    pub fn add(&mut self, child: BranchingRef<Decision>) {
        self.children.push(child);
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    fn position(&self, context: &BranchingContext) -> usize {
        context.read_trailed_integer(self.position) as usize
    }

    fn is_child_finished(&self, index: usize, context: &mut BranchingContext) -> bool {
        self.children[index].borrow_mut().is_finished(context)
    }
}

impl<Decision> Branching<Decision> for RandomBranch<Decision> {
    fn is_finished(&mut self, context: &mut BranchingContext) -> bool {
        let num_children = self.children.len();
        let unfinished = (self.position(context)..num_children)
            .find(|&index| !self.is_child_finished(index, context));

        match unfinished {
            Some(index) => {
                context.assign_trailed_integer(self.position, index as i64);
                false
            }
            None => {
                context.assign_trailed_integer(self.position, num_children as i64);
                true
            }
        }
    }

    fn score(&self, strategy: VariableSelection) -> f64 {
        panic!("A random order of children does not define a score (requested {strategy})")
    }

    fn next_decision(&mut self, context: &mut BranchingContext) -> Option<Decision> {
        let num_children = self.children.len();

        for index in self.position(context)..num_children {
            let swap_with = context
                .random()
                .generate_usize_in_range(index..num_children);
            self.children.swap(index, swap_with);

            if !self.is_child_finished(index, context) {
                context.assign_trailed_integer(self.position, index as i64);
                return self.children[index].borrow_mut().next_decision(context);
            }
        }

        context.assign_trailed_integer(self.position, num_children as i64);
        None
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
