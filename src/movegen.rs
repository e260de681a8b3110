// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use arrayvec::ArrayVec;

use crate::board::Board;
use crate::rules;
use crate::types::{CastlingRights, Piece, Square};

/// Destinations reachable by a single piece. A queen in the middle of an
/// empty board reaches 27 squares, the most any piece can.
pub type Destinations = ArrayVec<[Square; 32]>;

/// Enumerates every square `piece` on `from` may legally move to, in
/// row-major order starting from row 0.
pub fn possible_moves(
    board: &Board,
    castling: CastlingRights,
    piece: Piece,
    from: Square,
) -> Destinations {
    let mut moves = Destinations::new();
    for row in 0..8 {
        for column in 0..8 {
            let to = match Square::from_coords(row, column) {
                Some(sq) => sq,
                None => continue,
            };

            if rules::is_legal(board, castling, piece, from, to) {
                moves.push(to);
            }
        }
    }

    moves
}
