use std::fmt;
use std::fmt::{Debug, Display, Formatter};

use crate::data::{Contents, MapCell, Pos};
use crate::state::State;
use crate::vec2d::Vec2d;

pub struct MapFormatter<'a> {
    map: &'a GoalMap,
    state: &'a State,
}

impl<'a> MapFormatter<'a> {
    pub(crate) fn new(map: &'a GoalMap, state: &'a State) -> Self {
        Self { map, state }
    }
}

impl Display for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.map.write_with_state(self.state, f)
    }
}

impl Debug for MapFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// The static part of a level - walls, bounds and goals.
/// Never mutated while a search is running.
#[derive(Clone)]
pub struct GoalMap {
    pub(crate) grid: Vec2d<MapCell>,
    pub(crate) goals: Vec<Pos>,
}

impl GoalMap {
    pub(crate) fn new(grid: Vec2d<MapCell>, mut goals: Vec<Pos>) -> Self {
        goals.sort_unstable();
        GoalMap { grid, goals }
    }

    pub fn goals(&self) -> &[Pos] {
        &self.goals
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.grid[pos] == MapCell::Wall
    }

    pub fn is_in_bounds(&self, pos: Pos) -> bool {
        pos.r < self.grid.rows() && pos.c < self.grid.cols()
    }

    pub fn format_with_state<'a>(&'a self, state: &'a State) -> MapFormatter<'a> {
        MapFormatter::new(self, state)
    }

    fn write_with_state(&self, state: &State, f: &mut Formatter<'_>) -> fmt::Result {
        let mut state_grid = self.grid.create_scratchpad(Contents::Empty);
        for &b in &state.boxes {
            state_grid[b] = Contents::Box;
        }
        state_grid[state.player_pos] = Contents::Player;
        self.write(&state_grid, f)
    }

    fn write(&self, state_grid: &Vec2d<Contents>, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..self.grid.rows() {
            // don't print trailing empty cells to match the input level strings
            let mut last_non_empty = 0;
            for c in 0..self.grid.cols() {
                let pos = Pos::new(r, c);
                if self.grid[pos] != MapCell::Empty || state_grid[pos] != Contents::Empty {
                    last_non_empty = c;
                }
            }

            for c in 0..=last_non_empty {
                let pos = Pos::new(r, c);
                Self::write_cell(self.grid[pos], state_grid[pos], f)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_cell(cell: MapCell, contents: Contents, f: &mut Formatter<'_>) -> fmt::Result {
        match (cell, contents) {
            (MapCell::Wall, Contents::Empty) => write!(f, "#"),
            (MapCell::Wall, _) => unreachable!("entity on a wall"),
            (MapCell::Empty, Contents::Empty) => write!(f, " "),
            (MapCell::Empty, Contents::Box) => write!(f, "$"),
            (MapCell::Empty, Contents::Player) => write!(f, "@"),
            (MapCell::Goal, Contents::Empty) => write!(f, "."),
            (MapCell::Goal, Contents::Box) => write!(f, "*"),
            (MapCell::Goal, Contents::Player) => write!(f, "+"),
        }
    }
}

impl Display for GoalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state_grid = self.grid.create_scratchpad(Contents::Empty);
        self.write(&state_grid, f)
    }
}

impl Debug for GoalMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
