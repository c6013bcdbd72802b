//! Contains structures for tie-breaking; these structures decide between children of a composite
//! branching which share the best score.
//!
//! The responsibility of a [`TieBreaker`] is two-fold:
//! - It should keep track of which elements to consider based on their value (and based on the
//!   [`Direction`]); an element with a strictly better value replaces every element considered so
//!   far, while an element with an equal value joins the tie.
//! - It should break the tie between the remaining elements once [`TieBreaker::select`] is called,
//!   either by taking the first one that was considered ([`InOrderTieBreaker`]) or by picking one
//!   uniformly at random ([`RandomTieBreaker`]).
//!
//! ```rust
//! # use marrow_core::branching::tie_breaking::Direction;
//! # use marrow_core::branching::tie_breaking::InOrderTieBreaker;
//! # use marrow_core::branching::tie_breaking::TieBreaker;
//! # use marrow_core::rand::rngs::SmallRng;
//! # use marrow_core::rand::SeedableRng;
//! let mut breaker = InOrderTieBreaker::new(Direction::Maximum);
//! let mut rng = SmallRng::seed_from_u64(42);
//!
//! breaker.consider(0, 1.0);
//! breaker.consider(1, 5.0);
//! breaker.consider(2, 5.0);
//!
//! assert_eq!(breaker.select(&mut rng), Some(1));
//! ```
mod in_order_tie_breaker;
mod random_tie_breaker;

use std::fmt::Debug;

pub use in_order_tie_breaker::*;
pub use random_tie_breaker::*;

use crate::basic_types::Random;

/// The interface for a tie-breaker which considers additional elements with values; depending on
/// the [`Direction`] it should only consider elements with the "best" value for selection.
pub trait TieBreaker<Var, Value>: Debug {
    /// Consider the next additional element with corresponding value
    fn consider(&mut self, variable: Var, value: Value);

    /// Get the final element which was selected, or [`None`] if nothing was considered. After this
    /// method is called it resets the stored values such that it can be used again.
    fn select(&mut self, random: &mut dyn Random) -> Option<Var>;
}

/// Whether the value comparison should find the maximum [`Direction::Maximum`] element or the
/// [`Direction::Minimum`] element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Maximum,
    Minimum,
}

impl Direction {
    /// Whether `value` is strictly better than `incumbent` in this direction.
    pub(crate) fn improves<Value: PartialOrd>(self, value: &Value, incumbent: &Value) -> bool {
        match self {
            Direction::Maximum => value > incumbent,
            Direction::Minimum => value < incumbent,
        }
    }
}
