use crate::basic_types::Random;
#[cfg(doc)]
use crate::branching::Branching;
use crate::engine::TrailedInteger;
use crate::engine::TrailedValues;

/// The context provided to a [`Branching`]; it gives access to the backtrack-aware integers of the
/// search and a [`Random`] generator.
#[derive(Debug)]
pub struct BranchingContext<'a> {
    trailed_values: &'a mut TrailedValues,
    random_generator: &'a mut dyn Random,
}

impl<'a> BranchingContext<'a> {
    pub fn new(
        trailed_values: &'a mut TrailedValues,
        random_generator: &'a mut dyn Random,
    ) -> Self {
        BranchingContext {
            trailed_values,
            random_generator,
        }
    }

    /// Returns a random generator which can be used to generate random values (see [`Random`] for
    /// more information).
    pub fn random(&mut self) -> &mut dyn Random {
        self.random_generator
    }

    /// Returns the current value of the provided [`TrailedInteger`].
    pub fn read_trailed_integer(&self, trailed_integer: TrailedInteger) -> i64 {
        self.trailed_values.read(trailed_integer)
    }

    /// Assigns `value` to the provided [`TrailedInteger`]; the previous value is restored when the
    /// search backtracks past the current checkpoint.
    pub fn assign_trailed_integer(&mut self, trailed_integer: TrailedInteger, value: i64) {
        self.trailed_values.assign(trailed_integer, value)
    }
}
