// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused)]
#![warn(clippy::all)]

use std::env;
use std::process;

use clap::{value_t, App, Arg, ArgGroup, ArgMatches};

use sokoban_solver::config::{Format, SearchConfig};
use sokoban_solver::{LoadLevel, Solve};

fn main() {
    env_logger::init();

    let matches = App::new("sokoban-solver")
        .author("martin-t")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Finds a sequence of pushes that places every box on a goal")
        .arg(
            Arg::with_name("custom")
                .short("c")
                .long("custom")
                .help("print boards in custom format"),
        )
        .arg(
            Arg::with_name("xsb")
                .short("x")
                .long("xsb")
                .help("print boards in XSB format (default)"),
        )
        .group(ArgGroup::with_name("format").arg("custom").arg("xsb"))
        .arg(
            Arg::with_name("weighted-from")
                .long("weighted-from")
                .takes_value(true)
                .value_name("N")
                .help("switch to weighted search after N expanded states"),
        )
        .arg(
            Arg::with_name("greedy-after")
                .long("greedy-after")
                .takes_value(true)
                .value_name("N")
                .help("switch to greedy search after more than N expanded states"),
        )
        .arg(
            Arg::with_name("steps")
                .short("s")
                .long("steps")
                .help("print the board after every move, not just pushes"),
        )
        .arg(
            Arg::with_name("keys")
                .short("k")
                .long("keys")
                .help("also print the solution as w/a/s/d keys"),
        )
        .arg(
            Arg::with_name("status")
                .long("status")
                .help("print stats whenever a new depth is reached"),
        )
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    let format = if matches.is_present("custom") {
        Format::Custom
    } else {
        Format::Xsb
    };
    let config = search_config(&matches);
    let path = matches.value_of("file").unwrap();

    let level = path.load_level().unwrap_or_else(|err| {
        match env::current_dir() {
            Ok(dir) => eprintln!("Can't load level {} in {}: {}", path, dir.display(), err),
            Err(_) => eprintln!("Can't load level {}: {}", path, err),
        }
        process::exit(1);
    });

    println!("Solving {}...", path);
    let solver_ok = level
        .solve(&config, matches.is_present("status"))
        .unwrap_or_else(|err| {
            eprintln!("Can't solve level: {}", err);
            process::exit(1);
        });
    println!("{}", solver_ok.stats);

    match solver_ok.moves {
        Some(moves) => {
            println!("Found solution:");
            print!(
                "{}",
                level.format_solution(format, &moves, matches.is_present("steps"))
            );
            println!("{}", moves);
            println!("Moves: {}", moves.move_cnt());
            println!("Pushes: {}", moves.push_cnt());
            if matches.is_present("keys") {
                println!("Keys: {}", moves.keys());
            }
        }
        None => println!("No solution"),
    }
}

fn search_config(matches: &ArgMatches<'_>) -> SearchConfig {
    let mut config = SearchConfig::default();
    if matches.is_present("weighted-from") {
        config.weighted_from = value_t!(matches, "weighted-from", u32).unwrap_or_else(|e| e.exit());
    }
    if matches.is_present("greedy-after") {
        config.greedy_after = value_t!(matches, "greedy-after", u32).unwrap_or_else(|e| e.exit());
    }
    config
}
