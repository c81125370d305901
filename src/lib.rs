// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused)]
// Clippy
#![warn(clippy::all)]

pub mod config;
pub mod data;
pub mod level;
pub mod map;
pub mod map_formatter;
pub mod moves;
pub mod solution_formatter;
pub mod solver;

mod fs;
mod glyph;
mod parser;
mod state;
mod vec2d;

use std::error::Error;

use crate::config::SearchConfig;
use crate::level::Level;
use crate::solver::{SolverErr, SolverOk};

pub use crate::parser::ParserErr;

pub trait LoadLevel {
    fn load_level(&self) -> Result<Level, Box<dyn Error>>;
}

pub trait Solve {
    fn solve(&self, config: &SearchConfig, print_status: bool) -> Result<SolverOk, SolverErr>;
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use separator::Separatable;

    use crate::config::Format;
    use crate::solver::Strategy;

    use super::*;

    enum Expected {
        /// moves, pushes
        Exactly(usize, usize),
        /// any solution, checked by looking at the final board
        Solvable,
        /// solved after switching strategies - pushes, (expanded, strategy) for every switch
        Switched(usize, &'static [(u32, Strategy)]),
        Unsolvable,
    }

    #[test]
    fn test_levels() {
        use self::Expected::*;

        let levels = [
            ("custom", "00-solved.txt", Exactly(0, 0)),
            ("custom", "01-simplest-custom.txt", Exactly(1, 1)),
            ("custom", "01-simplest-xsb.txt", Exactly(1, 1)),
            ("custom", "02-corridor.txt", Exactly(3, 2)),
            ("custom", "03-long-corridor.txt", Exactly(8, 8)),
            ("custom", "04-two-boxes.txt", Solvable),
            ("custom", "no-solution-corner.txt", Unsolvable),
            (
                "original",
                "1.txt",
                Switched(99, &[(7_000, Strategy::Weighted), (12_001, Strategy::Greedy)]),
            ),
        ];

        for (level_pack, level_name, expected) in levels.iter() {
            test_level(level_pack, level_name, expected);
        }
    }

    fn test_level(level_pack: &str, level_name: &str, expected: &Expected) {
        let level_path = format!("levels/{}/{}", level_pack, level_name);
        println!("Solving {}", level_path);
        let started = Instant::now();

        let level = level_path.load_level().unwrap();
        assert_eq!(
            level.initial_box_positions().len(),
            level.goal_positions().len()
        );
        let solution = level.solve(&SearchConfig::default(), false).unwrap();

        // innacurate, only useful to quickly see which levels are difficult
        println!(
            "Solved {} in approximately {} ms",
            level_path,
            (started.elapsed().as_millis() as u64).separated_string(),
        );
        println!("{}", solution.stats);

        match (expected, &solution.moves) {
            (Expected::Exactly(move_cnt, push_cnt), Some(moves)) => {
                assert_eq!(moves.move_cnt(), *move_cnt);
                assert_eq!(moves.push_cnt(), *push_cnt);
            }
            (Expected::Solvable, Some(moves)) => assert_solved(&level, moves),
            (Expected::Switched(push_cnt, switches), Some(moves)) => {
                assert_solved(&level, moves);
                assert_eq!(moves.push_cnt(), *push_cnt);
                assert_eq!(solution.stats.switches(), *switches);
            }
            (Expected::Unsolvable, None) => {}
            (_, moves) => panic!("Unexpected result for {}: {:?}", level_path, moves),
        }
    }

    fn assert_solved(level: &Level, moves: &crate::moves::Moves) {
        let boards = level
            .format_solution(Format::Xsb, moves, false)
            .to_string();
        let last = boards.trim_end().rsplit("\n\n").next().unwrap();
        assert!(!last.contains('$'), "Not solved:\n{}", last);
    }
}
