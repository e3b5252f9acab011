use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::data::{MapCell, Pos, MAX_SIZE};
use crate::level::Level;
use crate::map::GoalMap;
use crate::state::State;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    Pos(usize, usize),
    TooLarge,
    MultiplePlayers,
    NoPlayer,
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Pos(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            ParserErr::TooLarge => write!(f, "Map larger than {} rows/columns", MAX_SIZE),
            ParserErr::MultiplePlayers => write!(f, "More than one player"),
            ParserErr::NoPlayer => write!(f, "No player"),
        }
    }
}

impl Error for ParserErr {}

impl FromStr for Level {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses the XSB format.
pub(crate) fn parse(level: &str) -> Result<Level, ParserErr> {
    // trim so we can specify levels using raw strings more easily
    let level = level.trim_matches('\n').trim_end();

    let mut grid = Vec::new();
    let mut goals = Vec::new();
    let mut boxes = Vec::new();
    let mut player_pos = None;

    for (r, line) in level.lines().enumerate() {
        let mut grid_row = Vec::new();
        for (c, cur_char) in line.chars().enumerate() {
            if r >= MAX_SIZE || c >= MAX_SIZE {
                return Err(ParserErr::TooLarge);
            }
            let pos = Pos::new(r as u8, c as u8);

            let cell = match cur_char {
                '#' => MapCell::Wall,
                ' ' | '-' | '_' => MapCell::Empty,
                '.' => MapCell::Goal,
                '$' => {
                    boxes.push(pos);
                    MapCell::Empty
                }
                '*' => {
                    boxes.push(pos);
                    MapCell::Goal
                }
                '@' => {
                    if player_pos.is_some() {
                        return Err(ParserErr::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    MapCell::Empty
                }
                '+' => {
                    if player_pos.is_some() {
                        return Err(ParserErr::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    MapCell::Goal
                }
                _ => return Err(ParserErr::Pos(r, c)),
            };

            if cell == MapCell::Goal {
                goals.push(pos);
            }
            grid_row.push(cell);
        }
        grid.push(grid_row);
    }

    let player_pos = player_pos.ok_or(ParserErr::NoPlayer)?;
    let grid = Vec2d::new(&grid);

    Ok(Level::new(
        GoalMap::new(grid, goals),
        State::new(player_pos, boxes),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_all_cell_kinds() {
        // player on goal and free player at once
        let err = r"
#######
#@$.* #
#   + #
#######
"
        .parse::<Level>()
        .unwrap_err();
        assert_eq!(err, ParserErr::MultiplePlayers);

        let level: Level = r"
######
#@$.*#
######
"
        .parse()
        .unwrap();
        assert_eq!(level.state.player_pos(), Pos::new(1, 1));
        assert_eq!(level.state.boxes(), &[Pos::new(1, 2), Pos::new(1, 4)]);
        assert_eq!(level.map.goals(), &[Pos::new(1, 3), Pos::new(1, 4)]);
    }

    #[test]
    fn no_player() {
        let err = "
####
#$.#
####
"
        .parse::<Level>()
        .unwrap_err();
        assert_eq!(err, ParserErr::NoPlayer);
    }

    #[test]
    fn invalid_cell() {
        let err = "
####
#@?#
####
"
        .parse::<Level>()
        .unwrap_err();
        assert_eq!(err, ParserErr::Pos(1, 2));
    }

    #[test]
    fn round_trip() {
        let xsb = "
#####
#@$.#
#####
"
        .trim_start_matches('\n');
        let level: Level = xsb.parse().unwrap();
        assert_eq!(level.to_string(), xsb);
    }
}
