use std::fmt::Display;

use thiserror::Error;

/// The strategy used by a composite branching to decide which of its children is branched on next.
///
/// Except for [`VariableSelection::InputOrder`] and [`VariableSelection::Random`], the strategies
/// are scored: every child reports a [`Branching::score`] for the strategy, where a higher score is
/// more desirable, and the best scored child is selected.
///
/// [`Branching::score`]: crate::branching::Branching::score
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum VariableSelection {
    /// Select the first unfinished child in the order in which they were provided.
    #[default]
    InputOrder,
    SmallestDomain,
    LargestDomain,
    SmallestLowerBound,
    LargestLowerBound,
    SmallestUpperBound,
    LargestUpperBound,
    SmallestDegree,
    LargestDegree,
    Activity,
    MaxRegret,
    /// Visit the children in a random order which is consistent under backtracking.
    Random,
}

impl VariableSelection {
    /// Whether the strategy compares children by their score.
    pub fn is_scored(self) -> bool {
        !matches!(
            self,
            VariableSelection::InputOrder | VariableSelection::Random
        )
    }
}

impl Display for VariableSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableSelection::InputOrder => write!(f, "input-order"),
            VariableSelection::SmallestDomain => write!(f, "smallest-domain"),
            VariableSelection::LargestDomain => write!(f, "largest-domain"),
            VariableSelection::SmallestLowerBound => write!(f, "smallest-lower-bound"),
            VariableSelection::LargestLowerBound => write!(f, "largest-lower-bound"),
            VariableSelection::SmallestUpperBound => write!(f, "smallest-upper-bound"),
            VariableSelection::LargestUpperBound => write!(f, "largest-upper-bound"),
            VariableSelection::SmallestDegree => write!(f, "smallest-degree"),
            VariableSelection::LargestDegree => write!(f, "largest-degree"),
            VariableSelection::Activity => write!(f, "activity"),
            VariableSelection::MaxRegret => write!(f, "max-regret"),
            VariableSelection::Random => write!(f, "random"),
        }
    }
}

/// The value selection requested when posting a branching.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ValueSelection {
    /// Keep whichever value selection the variables already use.
    #[default]
    Default,
    Min,
    Max,
    SplitMin,
    SplitMax,
    Median,
    Random,
}

impl ValueSelection {
    /// Resolves the value selection to the hint which is handed to the variables.
    ///
    /// Returns `Ok(None)` for [`ValueSelection::Default`], since the variables are then left
    /// untouched.
    pub fn preferred_value(self) -> Result<Option<PreferredValue>, BranchingError> {
        match self {
            ValueSelection::Default => Ok(None),
            ValueSelection::Min => Ok(Some(PreferredValue::Min)),
            ValueSelection::Max => Ok(Some(PreferredValue::Max)),
            ValueSelection::SplitMin => Ok(Some(PreferredValue::SplitMin)),
            ValueSelection::SplitMax => Ok(Some(PreferredValue::SplitMax)),
            ValueSelection::Median | ValueSelection::Random => {
                Err(BranchingError::UnsupportedValueSelection(self))
            }
        }
    }
}

impl Display for ValueSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSelection::Default => write!(f, "default"),
            ValueSelection::Min => write!(f, "min"),
            ValueSelection::Max => write!(f, "max"),
            ValueSelection::SplitMin => write!(f, "split-min"),
            ValueSelection::SplitMax => write!(f, "split-max"),
            ValueSelection::Median => write!(f, "median"),
            ValueSelection::Random => write!(f, "random"),
        }
    }
}

/// The value a variable should prefer when it is branched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferredValue {
    /// Assign the variable to its lower-bound.
    Min,
    /// Assign the variable to its upper-bound.
    Max,
    /// Exclude the upper half of the domain.
    SplitMin,
    /// Exclude the lower half of the domain.
    SplitMax,
}

/// Errors related to configuring branchings.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchingError {
    #[error("the value selection '{0}' is not supported for branching")]
    UnsupportedValueSelection(ValueSelection),
}
