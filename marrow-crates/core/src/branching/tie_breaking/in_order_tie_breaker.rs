use super::Direction;
use super::TieBreaker;
use crate::basic_types::Random;

/// A tie-breaker which simply selects the first element that it receives with the "best" value
/// according to the provided [`Direction`].
#[derive(Debug)]
pub struct InOrderTieBreaker<Var, Value> {
    /// The selected element, could be [None] if nothing has been considered yet
    selected_variable: Option<Var>,
    /// The selected value, could be [None] if nothing has been considered yet
    selected_value: Option<Value>,
    direction: Direction,
}

impl<Var, Value> InOrderTieBreaker<Var, Value> {
    pub fn new(direction: Direction) -> Self {
        Self {
            selected_variable: None,
            selected_value: None,
            direction,
        }
    }
}

impl<Var: Copy + std::fmt::Debug, Value: PartialOrd + std::fmt::Debug> TieBreaker<Var, Value>
    for InOrderTieBreaker<Var, Value>
{
    fn consider(&mut self, variable: Var, value: Value) {
        let is_better = self
            .selected_value
            .as_ref()
            .map_or(true, |selected_value| {
                self.direction.improves(&value, selected_value)
            });

        if is_better {
            self.selected_variable = Some(variable);
            self.selected_value = Some(value);
        }
    }

    fn select(&mut self, _random: &mut dyn Random) -> Option<Var> {
        self.selected_value = None;
        self.selected_variable.take()
    }
}

#[cfg(test)]
mod tests {
    use super::InOrderTieBreaker;
    use crate::basic_types::tests::TestRandom;
    use crate::branching::tie_breaking::Direction;
    use crate::branching::tie_breaking::TieBreaker;

    #[test]
    fn first_element_wins_a_tie() {
        let mut breaker = InOrderTieBreaker::new(Direction::Maximum);

        breaker.consider(0, 10.0);
        breaker.consider(1, 10.0);
        breaker.consider(2, 10.0);

        assert_eq!(breaker.select(&mut TestRandom::default()), Some(0));
    }

    #[test]
    fn lowest_value_is_selected_when_minimising() {
        let mut breaker = InOrderTieBreaker::new(Direction::Minimum);

        breaker.consider(0, 10);
        breaker.consider(1, 5);
        breaker.consider(2, 10);

        assert_eq!(breaker.select(&mut TestRandom::default()), Some(1));
    }

    #[test]
    fn selecting_resets_the_breaker() {
        let mut breaker = InOrderTieBreaker::new(Direction::Maximum);
        breaker.consider(4, 1);

        assert_eq!(breaker.select(&mut TestRandom::default()), Some(4));
        assert_eq!(breaker.select(&mut TestRandom::default()), None);
    }
}
