//! Goal-side distance estimators.
//!
//! Both estimators run a breadth-first wave outward from each goal over
//! non-wall cells. Boxes never block the wave - it estimates potential for
//! reaching, not current reachability - and neither estimator looks at the
//! player's position. The nearest-box relaxation can claim one box for two
//! goals, so the result is not a strict lower bound in every configuration.

use std::collections::VecDeque;

use crate::config::Estimator;
use crate::data::{MapCell, Pos, DIRECTIONS};
use crate::map::GoalMap;
use crate::state::State;
use crate::vec2d::Vec2d;

/// Cost assigned when a goal's wave can't reach any box. Large enough to
/// push such states to the back of the open set, small enough that summing
/// it per goal and adding g can't overflow (f_cost saturates anyway).
pub(crate) const UNREACHABLE: i32 = i32::max_value() / 4;

pub(crate) fn estimate(map: &GoalMap, state: &State, estimator: Estimator) -> i32 {
    match estimator {
        Estimator::Distance => distance_sum(map, state),
        Estimator::DistanceTurns { turn_penalty } => distance_turns_sum(map, state, turn_penalty),
    }
}

fn distance_sum(map: &GoalMap, state: &State) -> i32 {
    let mut box_grid = map.grid.create_scratchpad(false);
    for &b in &state.boxes {
        box_grid[b] = true;
    }

    let mut sum: i32 = 0;
    for &goal in &map.goals {
        sum = sum.saturating_add(nearest_box_dist(map, &box_grid, goal));
    }
    sum
}

/// Expands from the goal until the wave first touches a box-occupied cell.
fn nearest_box_dist(map: &GoalMap, box_grid: &Vec2d<bool>, goal: Pos) -> i32 {
    let mut dists = map.grid.create_scratchpad(-1);
    dists[goal] = 0;
    let mut frontier = VecDeque::new();
    frontier.push_back(goal);

    while let Some(pos) = frontier.pop_front() {
        if box_grid[pos] {
            return dists[pos];
        }
        for &dir in &DIRECTIONS {
            let new_pos = pos + dir;
            if map.grid[new_pos] != MapCell::Wall && dists[new_pos] == -1 {
                dists[new_pos] = dists[pos] + 1;
                frontier.push_back(new_pos);
            }
        }
    }

    UNREACHABLE
}

fn distance_turns_sum(map: &GoalMap, state: &State, turn_penalty: i32) -> i32 {
    let mut sum: i32 = 0;
    for &goal in &map.goals {
        let dists = wave(map, goal);

        // every box, not just the nearest - a closer box might cost more
        // once its turns are counted
        let mut min = UNREACHABLE;
        for &box_pos in &state.boxes {
            if dists[box_pos] == -1 {
                continue;
            }
            let path = trace_shortest_path(&dists, box_pos);
            let cost = dists[box_pos].saturating_add(count_turns(&path) * turn_penalty);
            if cost < min {
                min = cost;
            }
        }
        sum = sum.saturating_add(min);
    }
    sum
}

/// Full wave, no early exit - turn counting needs distances along the
/// whole goal-to-box path.
fn wave(map: &GoalMap, goal: Pos) -> Vec2d<i32> {
    let mut dists = map.grid.create_scratchpad(-1);
    dists[goal] = 0;
    let mut frontier = VecDeque::new();
    frontier.push_back(goal);

    while let Some(pos) = frontier.pop_front() {
        for &dir in &DIRECTIONS {
            let new_pos = pos + dir;
            if map.grid[new_pos] != MapCell::Wall && dists[new_pos] == -1 {
                dists[new_pos] = dists[pos] + 1;
                frontier.push_back(new_pos);
            }
        }
    }

    dists
}

/// Walks the wave backward from the box - any adjacent cell whose recorded
/// distance is exactly one less continues the path. Returns box-to-goal order.
fn trace_shortest_path(dists: &Vec2d<i32>, box_pos: Pos) -> Vec<Pos> {
    let mut path = Vec::with_capacity(dists[box_pos] as usize + 1);
    let mut cur = box_pos;
    path.push(cur);

    while dists[cur] > 0 {
        for &dir in &DIRECTIONS {
            let new_pos = cur + dir;
            if dists[new_pos] == dists[cur] - 1 {
                cur = new_pos;
                path.push(cur);
                break;
            }
        }
    }

    path
}

/// A turn is two consecutive path steps with different direction deltas.
fn count_turns(path: &[Pos]) -> i32 {
    let mut turns = 0;
    for w in path.windows(3) {
        if step_delta(w[0], w[1]) != step_delta(w[1], w[2]) {
            turns += 1;
        }
    }
    turns
}

fn step_delta(from: Pos, to: Pos) -> (i16, i16) {
    (
        i16::from(to.r) - i16::from(from.r),
        i16::from(to.c) - i16::from(from.c),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::level::Level;
    use crate::solver::process_level;
    use crate::solver::level::SolverLevel;

    fn solver_level(level: &str) -> SolverLevel {
        let level: Level = level.parse().unwrap();
        process_level(&level).unwrap()
    }

    #[test]
    fn straight_corridor() {
        let level = solver_level(
            r"
######
#@$ .#
######
",
        );
        assert_eq!(estimate(&level.map, &level.state, Estimator::Distance), 2);
        // no direction changes, the penalty never applies
        assert_eq!(
            estimate(
                &level.map,
                &level.state,
                Estimator::DistanceTurns { turn_penalty: 5 }
            ),
            2
        );
    }

    #[test]
    fn wave_respects_walls() {
        // manhattan distance would be 3, the wave has to go around
        let level = solver_level(
            r"
######
#@$  #
#### #
#.   #
######
",
        );
        assert_eq!(estimate(&level.map, &level.state, Estimator::Distance), 7);
        // the only shortest path makes two turns
        assert_eq!(
            estimate(
                &level.map,
                &level.state,
                Estimator::DistanceTurns { turn_penalty: 2 }
            ),
            11
        );
    }

    #[test]
    fn one_turn_around_corner() {
        let level = solver_level(
            r"
#####
#   #
#@$ #
#  .#
#####
",
        );
        assert_eq!(estimate(&level.map, &level.state, Estimator::Distance), 2);
        assert_eq!(
            estimate(
                &level.map,
                &level.state,
                Estimator::DistanceTurns { turn_penalty: 2 }
            ),
            4
        );
    }

    #[test]
    fn nearest_box_claimed_by_both_goals() {
        // the middle box is nearest to both goals, the far box is ignored
        let level = solver_level(
            r"
#######
#.$. $#
#@    #
#######
",
        );
        assert_eq!(estimate(&level.map, &level.state, Estimator::Distance), 2);
    }

    #[test]
    fn wave_passes_through_boxes() {
        let level = solver_level(
            r"
#######
#..$$@#
#######
",
        );
        // wave from the left goal reaches the far box through the near one
        let dists = wave(&level.map, Pos::new(1, 1));
        assert_eq!(dists[Pos::new(1, 3)], 2);
        assert_eq!(dists[Pos::new(1, 4)], 3);
    }

    #[test]
    fn sealed_goal_costs_unreachable() {
        // raw parsed level, process_level would reject the walled-off goal;
        // the estimator itself has to stay finite on it
        let level: Level = r"
######
#@$#.#
######
"
        .parse()
        .unwrap();
        assert_eq!(
            estimate(&level.map, &level.state, Estimator::Distance),
            UNREACHABLE
        );
    }
}
