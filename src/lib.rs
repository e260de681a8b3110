// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A two-player chess rules engine. Given a position it decides which moves
//! are legal, plays them, and classifies the result as normal, check,
//! checkmate or stalemate. En passant and promotion are not part of these
//! rules.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod attacks;
mod board;
pub mod evaluator;
mod game;
pub mod movegen;
mod perft;
pub mod rules;
pub mod session;
mod types;

pub use board::Board;
pub use evaluator::Classification;
pub use game::{apply_move, FenParseError, Game, GameOptions, GameState, MoveError, MoveOutcome};
pub use movegen::Destinations;
pub use perft::perft;
pub use types::{CastleSide, CastlingRights, Color, File, Piece, PieceKind, Rank, Square};
