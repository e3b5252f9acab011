use std::ops::{Add, Sub};

pub(crate) const MAX_SIZE: usize = 255;

// only 254 because 255 is used to represent empty in expand
pub(crate) const MAX_BOXES: usize = 254;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MapCell {
    Empty,
    Wall,
    Goal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Contents {
    Empty,
    Box,
    Player,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: u8,
    pub c: u8,
}

impl Pos {
    pub fn new(r: u8, c: u8) -> Pos {
        Pos { r, c }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Dir {
    Up,
    Right,
    Down,
    Left,
}

pub(crate) const DIRECTIONS: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

impl Dir {
    fn deltas(self) -> (i16, i16) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Right => (0, 1),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
        }
    }
}

// Positions are unsigned so this is only safe inside the wall border
// which process_level guarantees.

impl Add<Dir> for Pos {
    type Output = Pos;

    fn add(self, dir: Dir) -> Pos {
        let (dr, dc) = dir.deltas();
        Pos {
            r: (i16::from(self.r) + dr) as u8,
            c: (i16::from(self.c) + dc) as u8,
        }
    }
}

impl Sub<Dir> for Pos {
    type Output = Pos;

    fn sub(self, dir: Dir) -> Pos {
        let (dr, dc) = dir.deltas();
        Pos {
            r: (i16::from(self.r) - dr) as u8,
            c: (i16::from(self.c) - dc) as u8,
        }
    }
}
