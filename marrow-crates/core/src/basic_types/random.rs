use std::fmt::Debug;
use std::ops::Range;

use rand::Rng;
use rand::SeedableRng;

/// Abstraction for randomness, in order to swap out different source of randomness.
///
/// Randomised tie-breaking and the shuffling of [`RandomBranch`] draw from this trait rather than
/// from a global generator, which keeps a search reproducible for a fixed seed.
///
/// # Testing
/// The crate-internal `TestRandom` takes as input a list of `usize`s and returns them in that
/// order. This allows deterministic test-cases while the implementation makes use of an
/// implementation of the [`Random`] trait.
///
/// [`RandomBranch`]: crate::branching::branchers::RandomBranch
pub trait Random: Debug {
    /// Generates a random usize in the provided range with equal probability; this can be seen as
    /// sampling from a uniform distribution in the range `[range.start, range.end)`
    ///
    /// # Example
    /// ```rust
    /// # use rand::rngs::SmallRng;
    /// # use rand::SeedableRng;
    /// # use marrow_core::Random;
    /// let mut rng = SmallRng::seed_from_u64(42);
    /// let elements = vec!["This", "is", "a", "test"];
    /// let selected_index = rng.generate_usize_in_range(0..elements.len());
    /// assert!(selected_index < elements.len());
    /// ```
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize;
}

// Any "regular" random generator can be used where an implementation of Random is expected.
impl<T> Random for T
where
    T: SeedableRng + Rng + Debug,
{
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
        self.gen_range(range)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::fmt::Debug;
    use std::ops::Range;

    use super::Random;
    use crate::marrow_assert_simple;

    /// A test "random" generator which takes as input a list of [`usize`]s and returns them in
    /// order. If more values are attempted to be generated than are provided then this will result
    /// in panicking.
    #[derive(Debug, Default)]
    pub(crate) struct TestRandom {
        pub(crate) usizes: Vec<usize>,
    }

    impl Random for TestRandom {
        fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
            let selected = self.usizes.remove(0);
            marrow_assert_simple!(
                range.contains(&selected),
                "The selected element by `TestRandom` ({selected}) is not in the provided range ({range:?}) and thus should not be returned, please ensure that your test cases are correctly defined"
            );
            selected
        }
    }
}
