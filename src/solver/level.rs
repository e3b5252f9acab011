use std::fmt;
use std::fmt::{Display, Formatter};

use crate::map::GoalMap;
use crate::state::State;

/// A validated level the search can run on - wall border complete,
/// unreachable cells turned into walls, box and goal counts equal.
#[derive(Debug, Clone)]
pub(crate) struct SolverLevel {
    pub(crate) map: GoalMap,
    pub(crate) state: State,
}

impl SolverLevel {
    pub(crate) fn new(map: GoalMap, state: State) -> Self {
        Self { map, state }
    }
}

impl Display for SolverLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.map.format_with_state(&self.state))
    }
}
