// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::io;
use std::process;
use std::time::Instant;

use clap::{App, Arg, ArgMatches, SubCommand};
use rookery::session::Session;
use rookery::{perft, GameOptions, GameState};

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name("play")
                .about("Play a game by typing commands on standard input")
                .arg(
                    Arg::with_name("fen")
                        .help("FEN string for the starting position")
                        .value_name("FEN")
                        .long("--fen")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("allow-self-check")
                        .help("Accept moves that leave the mover's own king in check")
                        .long("--allow-self-check"),
                ),
        )
        .subcommand(
            SubCommand::with_name("perft")
                .about("Count the nodes of the legal move tree")
                .arg(
                    Arg::with_name("FEN")
                        .help("FEN string for a board position")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search")
                        .value_name("DEPTH")
                        .short("-d")
                        .long("--depth")
                        .takes_value(true)
                        .default_value("3"),
                ),
        )
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("perft") {
        run_perft(matches);
    }

    // `play` is also what runs when no subcommand is given.
    let no_args = ArgMatches::default();
    let play = matches.subcommand_matches("play").unwrap_or(&no_args);
    run_play(play);
}

fn parse_fen_or_exit(fen: &str) -> GameState {
    match GameState::from_fen(fen) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("invalid fen: {}", err);
            process::exit(1);
        }
    }
}

fn run_play(matches: &ArgMatches) -> ! {
    let options = GameOptions {
        allow_self_check: matches.is_present("allow-self-check"),
    };

    let mut session = match matches.value_of("fen") {
        Some(fen) => Session::from_state(parse_fen_or_exit(fen), options),
        None => Session::new(options),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = session.run(stdin.lock(), stdout.lock()) {
        eprintln!("i/o error: {}", err);
        process::exit(1);
    }

    process::exit(0);
}

fn run_perft(matches: &ArgMatches) -> ! {
    let fen = matches.value_of("FEN").unwrap_or_default();
    let depth = value_t_or_exit!(matches, "depth", u32);
    let state = parse_fen_or_exit(fen);

    println!("fen:   {}", fen);
    println!("depth: {}", depth);
    println!();
    println!("{}", state.board);
    println!();
    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft(&state, i);
        let duration = start.elapsed();
        println!("perft({}) = {} ({} ms)", i, results, duration.as_millis());
    }

    process::exit(0);
}
