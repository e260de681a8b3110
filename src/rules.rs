// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move legality. The predicates here answer "may this piece go there" from
//! geometry, path clearance and occupancy alone. Whether the move exposes the
//! mover's own king is decided elsewhere, by simulating the move (see
//! `evaluator`).
use crate::attacks;
use crate::board::Board;
use crate::types::{CastleSide, CastlingRights, Color, Piece, PieceKind, Square};

/// The column the king occupies before castling.
const KING_HOME_COLUMN: i32 = 4;

/// Returns whether `piece`, standing on `from`, may move to `to`.
///
/// Structurally invalid requests (an origin that does not hold `piece`, or
/// `from == to`) are simply not legal. Moving onto a piece of one's own color
/// is rejected before any piece-specific rule is consulted.
pub fn is_legal(
    board: &Board,
    castling: CastlingRights,
    piece: Piece,
    from: Square,
    to: Square,
) -> bool {
    if from == to || board.piece_at(from) != Some(piece) {
        return false;
    }

    if let Some(occupant) = board.piece_at(to) {
        if occupant.color == piece.color {
            return false;
        }
    }

    let (drow, dcol) = delta(from, to);
    match piece.kind {
        PieceKind::Pawn => pawn_move_is_legal(board, piece.color, from, to),
        PieceKind::Knight => is_knight_step(drow, dcol),
        PieceKind::Bishop => is_diagonal(drow, dcol) && path_is_clear(board, from, to),
        PieceKind::Rook => is_straight(drow, dcol) && path_is_clear(board, from, to),
        PieceKind::Queen => {
            (is_diagonal(drow, dcol) || is_straight(drow, dcol)) && path_is_clear(board, from, to)
        }
        PieceKind::King => {
            is_king_step(drow, dcol) || can_castle(board, castling, piece.color, from, to)
        }
    }
}

/// Returns whether `piece` on `from` attacks `to`.
///
/// This is the capture half of `is_legal`: pawns attack their two forward
/// diagonals whether or not anything stands there, kings attack only their
/// neighbours (castling never captures), and the occupant of `to` is not
/// consulted. For a square holding an enemy piece the answer is identical to
/// `is_legal` with castling excluded.
pub fn attacks(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }

    let (drow, dcol) = delta(from, to);
    match piece.kind {
        PieceKind::Pawn => drow == piece.color.pawn_direction() && dcol.abs() == 1,
        PieceKind::Knight => is_knight_step(drow, dcol),
        PieceKind::Bishop => is_diagonal(drow, dcol) && path_is_clear(board, from, to),
        PieceKind::Rook => is_straight(drow, dcol) && path_is_clear(board, from, to),
        PieceKind::Queen => {
            (is_diagonal(drow, dcol) || is_straight(drow, dcol)) && path_is_clear(board, from, to)
        }
        PieceKind::King => is_king_step(drow, dcol),
    }
}

/// Returns whether the king of `color` on `from` may castle by moving to `to`.
///
/// Castling requires an unmoved king on its home square moving two files
/// along its back rank, an unmoved rook of the same color in the matching
/// corner, and nothing standing between them. In addition the king may not
/// castle out of check, through an attacked square, or into check.
pub fn can_castle(
    board: &Board,
    castling: CastlingRights,
    color: Color,
    from: Square,
    to: Square,
) -> bool {
    let side = match castle_side(color, from, to) {
        Some(side) => side,
        None => return false,
    };

    if board.piece_at(from) != Some(Piece::new(PieceKind::King, color)) {
        return false;
    }

    if castling.king_moved(color) || castling.rook_moved(color, side) {
        return false;
    }

    let rook_square = match Square::from_coords(from.row(), side.rook_column()) {
        Some(sq) => sq,
        None => return false,
    };

    if board.piece_at(rook_square) != Some(Piece::new(PieceKind::Rook, color)) {
        return false;
    }

    if !path_is_clear(board, from, rook_square) {
        return false;
    }

    // The king passes over exactly one square on its way to `to`.
    let transit = match from.offset(0, (to.column() - from.column()).signum()) {
        Some(sq) => sq,
        None => return false,
    };

    let enemy = color.toggle();
    !attacks::is_attacked(board, enemy, from)
        && !attacks::is_attacked(board, enemy, transit)
        && !attacks::is_attacked(board, enemy, to)
}

/// If moving a king of `color` from `from` to `to` has the shape of a castle,
/// returns the side it castles towards.
pub fn castle_side(color: Color, from: Square, to: Square) -> Option<CastleSide> {
    let back_row = color.back_row();
    if from.row() != back_row || to.row() != back_row || from.column() != KING_HOME_COLUMN {
        return None;
    }

    CastleSide::for_king_destination(to.column())
}

fn pawn_move_is_legal(board: &Board, color: Color, from: Square, to: Square) -> bool {
    let forward = color.pawn_direction();
    let (drow, dcol) = delta(from, to);
    match (drow, dcol.abs()) {
        (d, 0) if d == forward => board.is_empty(to),
        (d, 0) if d == 2 * forward && from.row() == color.pawn_home_row() => {
            let skipped = from.offset(forward, 0);
            skipped.map_or(false, |sq| board.is_empty(sq)) && board.is_empty(to)
        }
        // Diagonal steps are captures only; own-color targets were already
        // rejected, so any occupant here is an enemy.
        (d, 1) if d == forward => !board.is_empty(to),
        _ => false,
    }
}

fn delta(from: Square, to: Square) -> (i32, i32) {
    (to.row() - from.row(), to.column() - from.column())
}

fn is_knight_step(drow: i32, dcol: i32) -> bool {
    let (r, c) = (drow.abs(), dcol.abs());
    (r == 1 && c == 2) || (r == 2 && c == 1)
}

fn is_king_step(drow: i32, dcol: i32) -> bool {
    drow.abs() <= 1 && dcol.abs() <= 1 && (drow, dcol) != (0, 0)
}

fn is_diagonal(drow: i32, dcol: i32) -> bool {
    drow != 0 && drow.abs() == dcol.abs()
}

fn is_straight(drow: i32, dcol: i32) -> bool {
    (drow == 0) != (dcol == 0)
}

/// Returns whether every square strictly between `from` and `to` is empty.
/// The two squares must share a rank, file or diagonal.
fn path_is_clear(board: &Board, from: Square, to: Square) -> bool {
    let (drow, dcol) = delta(from, to);
    let (step_row, step_col) = (drow.signum(), dcol.signum());
    let mut current = from.offset(step_row, step_col);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }

        if !board.is_empty(sq) {
            return false;
        }

        current = sq.offset(step_row, step_col);
    }

    false
}
