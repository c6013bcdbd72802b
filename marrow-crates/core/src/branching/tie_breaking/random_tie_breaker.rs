use super::Direction;
use super::TieBreaker;
use crate::basic_types::Random;

/// A tie breaker which selects an element with the "best" value (according to the
/// [`Direction`]); if there is a tie then it will select any of the elements which are part of
/// this tie with equal probability.
///
/// All tied elements are stored in a scratch buffer which is cleared, but not deallocated, upon
/// [`TieBreaker::select`]:
/// - An element with a strictly better value than the current best clears the buffer and becomes
///   the only candidate.
/// - An element with a value equal to the current best is appended to the buffer.
/// - Upon selection, an index into the buffer is drawn uniformly from the provided [`Random`].
#[derive(Debug)]
pub struct RandomTieBreaker<Var, Value> {
    /// The best value seen so far, could be [None] if nothing has been considered yet
    best_value: Option<Value>,
    /// The elements which share [`RandomTieBreaker::best_value`], in the order they were
    /// considered
    tied: Vec<Var>,
    direction: Direction,
}

impl<Var, Value> RandomTieBreaker<Var, Value> {
    pub fn new(direction: Direction) -> Self {
        Self {
            best_value: None,
            tied: Vec::new(),
            direction,
        }
    }
}

impl<Var: Copy + std::fmt::Debug, Value: PartialOrd + std::fmt::Debug> TieBreaker<Var, Value>
    for RandomTieBreaker<Var, Value>
{
    fn consider(&mut self, variable: Var, value: Value) {
        match &self.best_value {
            Some(best_value) if self.direction.improves(&value, best_value) => {
                self.tied.clear();
                self.tied.push(variable);
                self.best_value = Some(value);
            }
            Some(best_value) => {
                if value == *best_value {
                    self.tied.push(variable);
                }
            }
            None => {
                self.tied.push(variable);
                self.best_value = Some(value);
            }
        }
    }

    fn select(&mut self, random: &mut dyn Random) -> Option<Var> {
        self.best_value = None;
        let selected = match self.tied.len() {
            0 => None,
            1 => Some(self.tied[0]),
            num_tied => Some(self.tied[random.generate_usize_in_range(0..num_tied)]),
        };
        self.tied.clear();
        selected
    }
}
