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
use crate::types::{Color, Piece, PieceKind, Square};

/// Squares of the pieces attacking a given square. Only the nearest piece on
/// each of the eight rays can attack, plus at most eight knights, so sixteen
/// always suffices.
pub type Attackers = ArrayVec<[Square; 16]>;

/// Returns whether any piece of color `by` attacks `target`.
pub fn is_attacked(board: &Board, by: Color, target: Square) -> bool {
    board
        .pieces(by)
        .any(|(sq, piece)| rules::attacks(board, piece, sq, target))
}

/// Returns the squares of every piece of color `by` attacking `target`.
pub fn attackers(board: &Board, by: Color, target: Square) -> Attackers {
    let mut found = Attackers::new();
    for (sq, piece) in board.pieces(by) {
        if rules::attacks(board, piece, sq, target) {
            found.push(sq);
        }
    }

    found
}

/// Locates the king of the given color.
pub fn find_king(board: &Board, color: Color) -> Option<Square> {
    let king = Piece::new(PieceKind::King, color);
    board
        .pieces(color)
        .find(|&(_, piece)| piece == king)
        .map(|(sq, _)| sq)
}

/// Returns whether the king of `color` is attacked. A board without such a
/// king is never in check.
pub fn is_check(board: &Board, color: Color) -> bool {
    match find_king(board, color) {
        Some(king) => is_attacked(board, color.toggle(), king),
        None => false,
    }
}
