use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::basic_types::Random;
use crate::branching::Branching;
use crate::branching::BranchingRef;
use crate::branching::VariableSelection;
use crate::branching::branchers::BranchGroup;
use crate::branching::branchers::RandomBranch;
use crate::create_statistics_struct;
use crate::engine::BranchingContext;
use crate::engine::TrailedInteger;
use crate::engine::TrailedValues;
use crate::options::BranchingOptions;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

create_statistics_struct!(
    /// Statistics about the decisions requested from the [`Engine`].
    EngineStatistics {
        /// The number of decisions which were produced
        num_decisions: usize,
        /// The number of times no branching could produce a decision
        num_exhausted_calls: usize,
        /// The number of top-level branchings
        num_registered_branchings: usize,
});

/// The part of the search engine which the branchings interact with.
///
/// It holds the registered top-level branchings, which are tried in the order in which they were
/// registered, and the state that the branchings require: the [`TrailedValues`] which make their
/// state backtrack-aware, the [`Random`] generator, and the [`BranchingOptions`].
///
/// The search drives the engine by calling [`Engine::next_decision`] whenever it needs a decision,
/// [`Engine::new_checkpoint`] when it applies one, and [`Engine::synchronise`] when it backtracks.
#[derive(Debug)]
pub struct Engine<Decision> {
    trailed_values: TrailedValues,
    random_generator: Box<dyn Random>,
    options: BranchingOptions,
    branching: BranchGroup<Decision>,
    statistics: EngineStatistics,
}

impl<Decision> Engine<Decision> {
    /// Creates an engine whose random generator is seeded with
    /// [`BranchingOptions::random_seed`].
    pub fn new(options: BranchingOptions) -> Self {
        let random_generator = SmallRng::seed_from_u64(options.random_seed);
        Self::with_random(options, Box::new(random_generator))
    }

    /// Creates an engine with the provided source of randomness.
    pub fn with_random(options: BranchingOptions, random_generator: Box<dyn Random>) -> Self {
        let mut trailed_values = TrailedValues::default();
        let branching = BranchGroup::new(
            vec![],
            VariableSelection::InputOrder,
            false,
            &mut trailed_values,
            &options,
        );

        Engine {
            trailed_values,
            random_generator,
            options,
            branching,
            statistics: EngineStatistics::default(),
        }
    }

    pub fn options(&self) -> &BranchingOptions {
        &self.options
    }

    /// Adds `branching` as the last top-level branching.
    pub fn register(&mut self, branching: BranchingRef<Decision>) {
        debug!(
            "Registering top-level branching {} ({:?})",
            self.branching.num_children(),
            branching.borrow()
        );
        self.branching.add(branching);
        self.statistics.num_registered_branchings += 1;
    }

    pub fn num_registered_branchings(&self) -> usize {
        self.branching.num_children()
    }

    /// Creates a [`BranchGroup`] whose state is managed by this engine.
    pub fn new_branch_group(
        &mut self,
        children: Vec<BranchingRef<Decision>>,
        variable_selection: VariableSelection,
        terminal: bool,
    ) -> BranchGroup<Decision> {
        BranchGroup::new(
            children,
            variable_selection,
            terminal,
            &mut self.trailed_values,
            &self.options,
        )
    }

    /// Creates a [`RandomBranch`] whose state is managed by this engine.
    pub fn new_random_branch(
        &mut self,
        children: Vec<BranchingRef<Decision>>,
    ) -> RandomBranch<Decision> {
        RandomBranch::new(children, &mut self.trailed_values)
    }

    /// Creates a new [`TrailedInteger`] with the provided initial value.
    pub fn new_trailed_integer(&mut self, initial_value: i64) -> TrailedInteger {
        self.trailed_values.grow(initial_value)
    }

    pub fn read_trailed_integer(&self, trailed_integer: TrailedInteger) -> i64 {
        self.trailed_values.read(trailed_integer)
    }

    #[cfg(test)]
    pub(crate) fn trailed_values_mut(&mut self) -> &mut TrailedValues {
        &mut self.trailed_values
    }

    /// Returns the context which is handed to the branchings.
    pub fn context(&mut self) -> BranchingContext<'_> {
        BranchingContext::new(
            &mut self.trailed_values,
            self.random_generator.as_mut(),
        )
    }

    /// Returns whether none of the registered branchings can produce another decision.
    pub fn is_finished(&mut self) -> bool {
        let mut context = BranchingContext::new(
            &mut self.trailed_values,
            self.random_generator.as_mut(),
        );
        self.branching.is_finished(&mut context)
    }

    /// Returns the next decision of the first registered branching which can still produce one.
    pub fn next_decision(&mut self) -> Option<Decision> {
        let mut context = BranchingContext::new(
            &mut self.trailed_values,
            self.random_generator.as_mut(),
        );
        let decision = self.branching.next_decision(&mut context);

        if decision.is_some() {
            self.statistics.num_decisions += 1;
        } else {
            self.statistics.num_exhausted_calls += 1;
        }
        decision
    }

    /// Marks the point to which [`Engine::synchronise`] can later return; every trailed write made
    /// after this call is undone when synchronising to an earlier checkpoint.
    pub fn new_checkpoint(&mut self) {
        self.trailed_values.new_checkpoint()
    }

    pub fn get_checkpoint(&self) -> usize {
        self.trailed_values.get_checkpoint()
    }

    /// Backtracks to `checkpoint`, restoring every [`TrailedInteger`] to its value at that point.
    pub fn synchronise(&mut self, checkpoint: usize) {
        self.trailed_values.synchronise(checkpoint)
    }

    pub fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger.clone());
        self.branching
            .log_statistics(statistic_logger.attach_to_prefix("branching"));
    }
}

impl<Decision> Default for Engine<Decision> {
    fn default() -> Self {
        Self::new(BranchingOptions::default())
    }
}
