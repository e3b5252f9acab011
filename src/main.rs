use std::process;

use clap::{App, Arg, ArgGroup};

use pukoban_solver::config::{CostMethod, Estimator};
use pukoban_solver::{LoadLevel, Solve};

fn main() {
    env_logger::init();

    let matches = App::new("pukoban-solver")
        .arg(
            Arg::with_name("path-only")
                .long("--path-only")
                .help("uniform cost search - orders states by path cost only"),
        )
        .arg(
            Arg::with_name("heuristic-only")
                .long("--heuristic-only")
                .help("greedy best-first search - fast but not optimal"),
        )
        .group(
            ArgGroup::with_name("method")
                .arg("path-only")
                .arg("heuristic-only"),
        )
        .arg(
            Arg::with_name("turn-penalty")
                .long("--turn-penalty")
                .takes_value(true)
                .help("estimate with goal-to-box distance plus this cost per direction change"),
        )
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    let method = if matches.is_present("path-only") {
        CostMethod::PathOnly
    } else if matches.is_present("heuristic-only") {
        CostMethod::HeuristicOnly
    } else {
        CostMethod::Combined
    };

    let estimator = match matches.value_of("turn-penalty") {
        None => Estimator::Distance,
        Some(penalty) => {
            let turn_penalty = penalty.parse().unwrap_or_else(|err| {
                eprintln!("Invalid turn penalty {}: {}", penalty, err);
                process::exit(1);
            });
            Estimator::DistanceTurns { turn_penalty }
        }
    };

    let path = matches.value_of("file").unwrap();
    println!("Solving {}...", path);

    let level = path.load_level().unwrap_or_else(|err| {
        eprintln!("Can't load level {}: {}", path, err);
        process::exit(1);
    });

    let solution = level.solve(method, estimator, true).unwrap_or_else(|err| {
        eprintln!("Invalid level: {}", err);
        process::exit(1);
    });

    println!("{}", solution.stats);
    match solution.path_states {
        Some(ref path_states) => {
            println!("Found solution:");
            // the solver returns the path goal first
            for state in path_states.iter().rev() {
                println!("{}", level.map.format_with_state(state));
            }
            println!("Moves: {}", path_states.len() - 1);
        }
        None => println!("No solution"),
    }
}
