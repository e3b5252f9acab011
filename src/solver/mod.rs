mod a_star;
mod heuristic;
mod level;

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

use fnv::FnvHashMap;
use log::debug;

use crate::config::{CostMethod, Estimator};
use crate::data::{MapCell, Pos, DIRECTIONS, MAX_BOXES};
use crate::level::Level;
use crate::map::GoalMap;
use crate::state::State;
use crate::Solve;

use self::a_star::{OpenEntry, SearchNode};
use self::heuristic::estimate;
use self::level::SolverLevel;

pub use self::a_star::Stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverErr {
    IncompleteBorder,
    UnreachableBoxes,
    UnreachableGoals,
    TooMany,
    BoxesGoals,
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            SolverErr::IncompleteBorder => write!(f, "Incomplete border"),
            SolverErr::UnreachableBoxes => write!(
                f,
                "Unreachable boxes - some boxes are not on goal but can't be reached"
            ),
            SolverErr::UnreachableGoals => write!(
                f,
                "Unreachable goals - some goals don't have a box but can't be reached"
            ),
            SolverErr::TooMany => write!(f, "More than 254 reachable boxes or goals"),
            SolverErr::BoxesGoals => write!(f, "Different number of reachable boxes and goals"),
        }
    }
}

impl Error for SolverErr {}

pub struct SolverOk {
    /// `None` means the open set emptied without reaching the goal
    /// configuration - the level has no solution from this state.
    /// The states are ordered goal to start; reverse for playback.
    pub path_states: Option<Vec<State>>,
    pub stats: Stats,
    method: CostMethod,
    estimator: Estimator,
}

impl SolverOk {
    fn new(
        path_states: Option<Vec<State>>,
        stats: Stats,
        method: CostMethod,
        estimator: Estimator,
    ) -> Self {
        Self {
            path_states,
            stats,
            method,
            estimator,
        }
    }
}

impl Debug for SolverOk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.path_states {
            None => writeln!(f, "{}/{}: no solution", self.method, self.estimator)?,
            Some(ref states) => writeln!(
                f,
                "{}/{}: {} moves",
                self.method,
                self.estimator,
                states.len() - 1
            )?,
        }
        write!(f, "{:?}", self.stats)
    }
}

impl Solve for Level {
    fn solve(
        &self,
        method: CostMethod,
        estimator: Estimator,
        print_status: bool,
    ) -> Result<SolverOk, SolverErr> {
        solve(self, method, estimator, print_status)
    }
}

fn solve(
    level: &Level,
    method: CostMethod,
    estimator: Estimator,
    print_status: bool,
) -> Result<SolverOk, SolverErr> {
    debug!("Processing level...");
    let solver_level = process_level(level)?;
    debug!("Processed level");
    Ok(search(&solver_level, method, estimator, print_status))
}

pub(crate) fn process_level(level: &Level) -> Result<SolverLevel, SolverErr> {
    // Guarantees we have here:
    // - the player exists and therefore the map is at least 1x1
    // - rows and cols are <= 255
    // Do some more low level checking so we can omit some checks later.

    // make sure the level is surrounded by wall
    let mut to_visit = vec![level.state.player_pos];
    let mut visited = level.map.grid.create_scratchpad(false);
    visited[level.state.player_pos] = true;

    while let Some(cur) = to_visit.pop() {
        let (r, c) = (i32::from(cur.r), i32::from(cur.c));
        let neighbors = [(r + 1, c), (r - 1, c), (r, c + 1), (r, c - 1)];
        for &(nr, nc) in &neighbors {
            // the only place that needs signed bounds checks - everything
            // past this can rely on being surrounded by walls
            if nr < 0
                || nc < 0
                || nr >= i32::from(level.map.grid.rows())
                || nc >= i32::from(level.map.grid.cols())
            {
                // we got out of bounds without hitting a wall
                return Err(SolverErr::IncompleteBorder);
            }

            let new_pos = Pos::new(nr as u8, nc as u8);
            if !visited[new_pos] && level.map.grid[new_pos] != MapCell::Wall {
                visited[new_pos] = true;
                to_visit.push(new_pos);
            }
        }
    }

    // make sure all relevant game elements are reachable
    let mut reachable_goals = Vec::new();
    let mut reachable_boxes = Vec::new();
    for &pos in &level.state.boxes {
        if visited[pos] {
            reachable_boxes.push(pos);
        } else if !level.map.goals.contains(&pos) {
            return Err(SolverErr::UnreachableBoxes);
        }
    }
    for &pos in &level.map.goals {
        if visited[pos] {
            reachable_goals.push(pos);
        } else if !level.state.boxes.contains(&pos) {
            return Err(SolverErr::UnreachableGoals);
        }
    }

    // make sure all non-reachable cells are walls
    // so expansion and the goal waves never leave the player's region
    let mut processed_grid = level.map.grid.clone();
    for r in 0..processed_grid.rows() {
        for c in 0..processed_grid.cols() {
            let pos = Pos::new(r, c);
            if !visited[pos] {
                processed_grid[pos] = MapCell::Wall;
            }
        }
    }

    if reachable_boxes.len() != reachable_goals.len() {
        return Err(SolverErr::BoxesGoals);
    }

    if reachable_boxes.len() > MAX_BOXES {
        return Err(SolverErr::TooMany);
    }

    let processed_map = GoalMap::new(processed_grid, reachable_goals);
    let clean_state = State::new(level.state.player_pos, reachable_boxes);
    Ok(SolverLevel::new(processed_map, clean_state))
}

fn search(
    level: &SolverLevel,
    method: CostMethod,
    estimator: Estimator,
    print_status: bool,
) -> SolverOk {
    debug!("Search called");

    let mut stats = Stats::new();

    // arena of every discovered node; the open heap and the state index
    // only hold indices into it, so predecessor links can't form
    // ownership cycles
    let mut arena: Vec<SearchNode> = Vec::new();
    let mut by_state: FnvHashMap<State, usize> = FnvHashMap::default();
    let mut to_visit: BinaryHeap<Reverse<OpenEntry>> = BinaryHeap::new();
    let mut order: u64 = 0;

    let h = estimate(&level.map, &level.state, estimator);
    let f = method.f_cost(0, h);
    arena.push(SearchNode::new(level.state.clone(), None, 0, h, f));
    by_state.insert(level.state.clone(), 0);
    stats.add_created(0);
    to_visit.push(Reverse(OpenEntry {
        f,
        dist: 0,
        order,
        node: 0,
    }));

    while let Some(Reverse(entry)) = to_visit.pop() {
        let cur = entry.node;
        if arena[cur].closed {
            stats.add_reached_duplicate(arena[cur].dist);
            continue;
        }
        if entry.f != arena[cur].f {
            // stale entry left behind by a relaxation
            continue;
        }
        arena[cur].closed = true;

        if stats.add_unique_visited(arena[cur].dist) && print_status {
            println!("Visited new depth: {}", arena[cur].dist);
            println!("{:?}", stats);
        }

        if solved(&level.map, &arena[cur].state) {
            debug!("Solved, backtracking path");
            return SolverOk::new(
                Some(backtrack_path(&arena, cur)),
                stats,
                method,
                estimator,
            );
        }

        let cur_dist = arena[cur].dist;
        let neighbor_states = expand(&level.map, &arena[cur].state);
        for neighbor_state in neighbor_states {
            let dist = cur_dist + 1;
            match by_state.get(&neighbor_state).copied() {
                None => {
                    let h = estimate(&level.map, &neighbor_state, estimator);
                    let f = method.f_cost(dist, h);
                    let node = arena.len();
                    arena.push(SearchNode::new(
                        neighbor_state.clone(),
                        Some(cur),
                        dist,
                        h,
                        f,
                    ));
                    by_state.insert(neighbor_state, node);
                    stats.add_created(dist);
                    order += 1;
                    to_visit.push(Reverse(OpenEntry {
                        f,
                        dist,
                        order,
                        node,
                    }));
                }
                Some(node) => {
                    stats.add_reached_duplicate(dist);
                    if arena[node].closed {
                        continue;
                    }
                    // still open - relax using the successor's own cached
                    // heuristic and keep g consistent with the new path
                    if dist < arena[node].dist {
                        let f = method.f_cost(dist, arena[node].h);
                        arena[node].dist = dist;
                        arena[node].f = f;
                        arena[node].prev = Some(cur);
                        order += 1;
                        to_visit.push(Reverse(OpenEntry {
                            f,
                            dist,
                            order,
                            node,
                        }));
                    }
                }
            }
        }
    }

    debug!("Open set exhausted, no solution");
    SolverOk::new(None, stats, method, estimator)
}

/// Every box on a goal. Box and goal counts are equal after process_level,
/// so this is the same as set equality between boxes and goals.
fn solved(map: &GoalMap, state: &State) -> bool {
    for &pos in &state.boxes {
        if map.grid[pos] != MapCell::Goal {
            return false;
        }
    }
    true
}

/// Goal to start order - the caller reverses if it wants playback order.
fn backtrack_path(arena: &[SearchNode], goal: usize) -> Vec<State> {
    let mut ret = Vec::new();
    let mut node = goal;
    loop {
        ret.push(arena[node].state.clone());
        match arena[node].prev {
            Some(prev) => node = prev,
            None => return ret,
        }
    }
}

/// The move simulator - all legal successors one player step away.
///
/// Per direction: stepping into a box pushes it if the cell behind it is
/// free; stepping into a free cell with a box directly behind the player
/// yields both the pull and the plain step, since pulling is optional;
/// otherwise it's just the step.
fn expand(map: &GoalMap, state: &State) -> Vec<State> {
    let mut new_states = Vec::new();

    let mut box_grid = map.grid.create_scratchpad(255u8);
    for (i, &b) in state.boxes.iter().enumerate() {
        box_grid[b] = i as u8;
    }

    for &dir in &DIRECTIONS {
        let new_player_pos = state.player_pos + dir;
        if map.grid[new_player_pos] == MapCell::Wall {
            continue;
        }

        let box_index = box_grid[new_player_pos];
        if box_index < 255 {
            // push
            let push_dest = new_player_pos + dir;
            if map.grid[push_dest] != MapCell::Wall && box_grid[push_dest] == 255 {
                let mut new_boxes = state.boxes.clone();
                new_boxes[box_index as usize] = push_dest;
                new_states.push(State::new(new_player_pos, new_boxes));
            }
        } else {
            let behind_player = state.player_pos - dir;
            let pulled_index = box_grid[behind_player];
            if pulled_index < 255 {
                // pull - the box follows into the player's old cell
                let mut new_boxes = state.boxes.clone();
                new_boxes[pulled_index as usize] = state.player_pos;
                new_states.push(State::new(new_player_pos, new_boxes));
            }
            // stepping without pulling is always legal too
            new_states.push(State::new(new_player_pos, state.boxes.clone()));
        }
    }

    new_states
}
