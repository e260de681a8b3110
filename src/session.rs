// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A line-oriented front end for a single game. Each input line is one
//! command; the reply goes to the writer. This is the smallest possible
//! "user interface" on top of `Game`, and what the `rookery play` command
//! runs.
use std::io::{self, BufRead, Write};

use crate::game::{Game, GameOptions, GameState};
use crate::types::{Square, COLORS};

pub struct Session {
    game: Game,
    initial: Option<GameState>,
}

impl Session {
    pub fn new(options: GameOptions) -> Session {
        Session {
            game: Game::with_options(options),
            initial: None,
        }
    }

    /// Starts from a custom position. `restart` returns to this position
    /// rather than to the standard one.
    pub fn from_state(state: GameState, options: GameOptions) -> Session {
        Session {
            game: Game::from_state(state.clone(), options),
            initial: Some(state),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn run<R, W>(&mut self, reader: R, mut writer: W) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        for maybe_line in reader.lines() {
            let line = maybe_line?;
            trace!("command: {}", line);
            let components: Vec<&str> = line.split_whitespace().collect();
            let (command, args) = match components.split_first() {
                Some((command, args)) => (*command, args),
                None => continue,
            };

            match (command, args) {
                ("quit", []) => break,
                ("move", args) => self.handle_move(&mut writer, args)?,
                ("moves", [square]) => self.handle_moves(&mut writer, square)?,
                ("board", []) => write!(writer, "{}", self.game.board())?,
                ("status", []) => self.handle_status(&mut writer)?,
                ("captured", []) => self.handle_captured(&mut writer)?,
                ("restart", []) => self.handle_restart(&mut writer)?,
                _ => writeln!(writer, "unrecognized command")?,
            }

            writer.flush()?;
        }

        Ok(())
    }

    fn handle_move<W: Write>(&mut self, w: &mut W, args: &[&str]) -> io::Result<()> {
        let squares = match args {
            [from, to] => parse_pair(from, to),
            [both] if both.len() == 4 && both.is_char_boundary(2) => {
                parse_pair(&both[..2], &both[2..])
            }
            _ => None,
        };

        let (from, to) = match squares {
            Some(squares) => squares,
            None => return writeln!(w, "invalid move syntax"),
        };

        match self.game.request_move(from, to) {
            Ok(outcome) => {
                write!(w, "ok {}{}", outcome.from, outcome.to)?;
                if let Some(captured) = outcome.captured {
                    write!(w, " captures {}", captured)?;
                }
                writeln!(w)?;
                if let Some(message) = outcome.message() {
                    writeln!(w, "{}", message)?;
                }
            }
            Err(err) => {
                warn!("rejected {}{}: {}", from, to, err);
                writeln!(w, "illegal move: {}", err)?;
            }
        }

        Ok(())
    }

    fn handle_moves<W: Write>(&mut self, w: &mut W, square: &str) -> io::Result<()> {
        let from = match square.parse::<Square>() {
            Ok(sq) => sq,
            Err(_) => return writeln!(w, "invalid square"),
        };

        let destinations: Vec<_> = self
            .game
            .legal_destinations(from)
            .iter()
            .map(|sq| sq.to_string())
            .collect();
        writeln!(w, "{}", destinations.join(" "))
    }

    fn handle_status<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        let classification = self.game.classification();
        writeln!(w, "{} to move, {}", self.game.turn(), classification)?;
        if let Some(message) = classification.message(self.game.turn()) {
            writeln!(w, "{}", message)?;
        }

        Ok(())
    }

    fn handle_captured<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        for &color in COLORS.iter() {
            let pieces: String = self
                .game
                .captured(color)
                .iter()
                .map(|p| p.to_string())
                .collect();
            writeln!(w, "{}: {}", color, pieces)?;
        }

        Ok(())
    }

    fn handle_restart<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        match self.initial {
            Some(ref state) => {
                info!("restarting from custom position");
                self.game = Game::from_state(state.clone(), self.game.options());
            }
            None => self.game.restart(),
        }

        writeln!(w, "ok")
    }
}

fn parse_pair(from: &str, to: &str) -> Option<(Square, Square)> {
    Some((from.parse().ok()?, to.parse().ok()?))
}
