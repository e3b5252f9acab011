use std::fmt::{self, Display, Formatter};

/// How path cost (g) and the heuristic estimate (h) combine into the
/// comparison key (f) the search orders its open set by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CostMethod {
    /// f = g + h, standard A*.
    Combined,
    /// f = g, uniform cost search. Ignores the heuristic entirely.
    PathOnly,
    /// f = h, greedy best-first. Fast but not optimal.
    HeuristicOnly,
}

impl CostMethod {
    pub(crate) fn f_cost(self, dist: i32, h: i32) -> i32 {
        match self {
            // saturating because sealed-off goals get a huge heuristic
            CostMethod::Combined => dist.saturating_add(h),
            CostMethod::PathOnly => dist,
            CostMethod::HeuristicOnly => h,
        }
    }
}

impl Display for CostMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            CostMethod::Combined => write!(f, "combined"),
            CostMethod::PathOnly => write!(f, "path-only"),
            CostMethod::HeuristicOnly => write!(f, "heuristic-only"),
        }
    }
}

/// Which estimator the search uses for h.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Estimator {
    /// Sum over goals of the wave distance to the nearest box.
    Distance,
    /// Like `Distance` but every direction change along the goal-to-box
    /// path adds `turn_penalty`, minimized over all boxes per goal.
    DistanceTurns { turn_penalty: i32 },
}

impl Display for Estimator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Estimator::Distance => write!(f, "distance"),
            Estimator::DistanceTurns { turn_penalty } => {
                write!(f, "distance-turns-{}", turn_penalty)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f_cost_per_method() {
        assert_eq!(CostMethod::Combined.f_cost(3, 4), 7);
        assert_eq!(CostMethod::PathOnly.f_cost(3, 4), 3);
        assert_eq!(CostMethod::HeuristicOnly.f_cost(3, 4), 4);
    }

    #[test]
    fn f_cost_saturates() {
        assert_eq!(
            CostMethod::Combined.f_cost(i32::max_value(), i32::max_value() / 4),
            i32::max_value()
        );
    }
}
