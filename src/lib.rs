// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]

pub mod config;
pub mod level;
pub mod map;
pub mod solver;

mod data;
mod fs;
mod parser;
mod state;
mod vec2d;

use std::error::Error;
use std::path::Path;

use crate::config::{CostMethod, Estimator};
use crate::level::Level;
use crate::solver::{SolverErr, SolverOk};

pub use crate::data::Pos;
pub use crate::parser::ParserErr;
pub use crate::state::State;

pub trait LoadLevel {
    fn load_level(&self) -> Result<Level, Box<dyn Error>>;
}

impl<T: AsRef<Path>> LoadLevel for T {
    fn load_level(&self) -> Result<Level, Box<dyn Error>> {
        let level = fs::read_file(self)?;
        Ok(level.parse()?)
    }
}

pub trait Solve {
    fn solve(
        &self,
        method: CostMethod,
        estimator: Estimator,
        print_status: bool,
    ) -> Result<SolverOk, SolverErr>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_files() {
        // expected number of path states including the initial one
        let levels = [
            ("levels/custom/01-corridor-push.txt", Some(3)),
            ("levels/custom/02-corridor-pull.txt", Some(4)),
            ("levels/custom/03-around-corner.txt", Some(5)),
            ("levels/custom/04-no-solution.txt", None),
            ("levels/custom/05-two-boxes.txt", Some(6)),
        ];

        for &(level_path, expected) in &levels {
            let level = level_path.load_level().unwrap();
            for &method in &[CostMethod::Combined, CostMethod::PathOnly] {
                let solution = level.solve(method, Estimator::Distance, false).unwrap();
                assert_eq!(
                    solution.path_states.map(|path| path.len()),
                    expected,
                    "{} using {}",
                    level_path,
                    method
                );
            }
        }
    }

    #[test]
    fn test_turn_penalty_on_level_files() {
        let level = "levels/custom/03-around-corner.txt".load_level().unwrap();
        let solution = level
            .solve(
                CostMethod::Combined,
                Estimator::DistanceTurns { turn_penalty: 2 },
                false,
            )
            .unwrap();
        assert_eq!(solution.path_states.unwrap().len(), 5);
    }

    #[test]
    fn test_greedy_solves_without_optimality_guarantee() {
        let level = "levels/custom/05-two-boxes.txt".load_level().unwrap();
        let solution = level
            .solve(CostMethod::HeuristicOnly, Estimator::Distance, false)
            .unwrap();
        let path = solution.path_states.unwrap();
        assert!(path.len() >= 6);
    }
}
