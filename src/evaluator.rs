// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Classification of a position for the side to move. Checkmate and stalemate
//! share one search: does the side to move have any move that leaves its king
//! unattacked? Combined with whether the king is attacked right now, that
//! answer decides between the four outcomes.
use std::fmt;

use crate::attacks;
use crate::board::Board;
use crate::movegen::{self, Destinations};
use crate::types::{CastlingRights, Color, Piece, Square};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    Normal,
    Check,
    Checkmate,
    Stalemate,
}

impl Classification {
    pub fn is_game_over(self) -> bool {
        match self {
            Classification::Checkmate | Classification::Stalemate => true,
            Classification::Normal | Classification::Check => false,
        }
    }

    /// The status line shown to players when `to_move` is the side this
    /// classification describes. Normal positions have nothing to announce.
    pub fn message(self, to_move: Color) -> Option<String> {
        match self {
            Classification::Normal => None,
            Classification::Check => Some(format!("Check! {} is in check.", to_move)),
            Classification::Checkmate => Some(format!("Checkmate! {} loses.", to_move)),
            Classification::Stalemate => Some("Stalemate! The game is a draw.".to_owned()),
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Classification::Normal => "normal",
            Classification::Check => "check",
            Classification::Checkmate => "checkmate",
            Classification::Stalemate => "stalemate",
        };
        f.write_str(name)
    }
}

/// Tentatively moves whatever stands on `from` to `to`, runs `inspect` on the
/// resulting board, and puts both squares back exactly as they were,
/// including any piece that was captured.
pub fn simulate<F, R>(board: &mut Board, from: Square, to: Square, inspect: F) -> R
where
    F: FnOnce(&Board) -> R,
{
    let moving = board.clear(from);
    let captured = board.piece_at(to);
    if let Some(piece) = moving {
        board.place(to, piece);
    }

    let result = inspect(board);

    match captured {
        Some(piece) => board.place(to, piece),
        None => {
            board.clear(to);
        }
    }

    if let Some(piece) = moving {
        board.place(from, piece);
    }

    result
}

/// Returns whether moving from `from` to `to` leaves the king of `color`
/// unattacked. The board is left untouched.
pub fn keeps_king_safe(board: &mut Board, color: Color, from: Square, to: Square) -> bool {
    simulate(board, from, to, |after| !attacks::is_check(after, color))
}

/// Returns whether `color` has at least one legal move after which its king
/// is not attacked.
pub fn has_escape(board: &Board, castling: CastlingRights, color: Color) -> bool {
    let mut scratch = *board;
    for (from, piece) in board.pieces(color) {
        for to in movegen::possible_moves(board, castling, piece, from) {
            if keeps_king_safe(&mut scratch, color, from, to) {
                trace!("{} escapes with {}{}", color, from, to);
                return true;
            }
        }
    }

    false
}

/// Classifies the position for `to_move`.
pub fn classify(board: &Board, castling: CastlingRights, to_move: Color) -> Classification {
    let in_check = attacks::is_check(board, to_move);
    if in_check && log_enabled!(log::Level::Debug) {
        if let Some(king) = attacks::find_king(board, to_move) {
            let checkers = attacks::attackers(board, to_move.toggle(), king);
            debug!("{} king on {} attacked from {:?}", to_move, king, &checkers[..]);
        }
    }

    let escape = has_escape(board, castling, to_move);
    let classification = match (in_check, escape) {
        (true, false) => Classification::Checkmate,
        (false, false) => Classification::Stalemate,
        (true, true) => Classification::Check,
        (false, true) => Classification::Normal,
    };

    debug!("classified position for {}: {}", to_move, classification);
    classification
}

/// The destinations of `piece` on `from` that do not leave its own king
/// attacked. This is what a front end highlights as playable.
pub fn safe_moves(
    board: &Board,
    castling: CastlingRights,
    piece: Piece,
    from: Square,
) -> Destinations {
    let mut scratch = *board;
    let mut moves = movegen::possible_moves(board, castling, piece, from);
    moves.retain(|to| keeps_king_safe(&mut scratch, piece.color, from, *to));
    moves
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::game::GameState;
    use crate::types::{CastlingRights, Color, Piece, PieceKind, Square, TableIndex};

    use super::{classify, has_escape, safe_moves, simulate, Classification};

    fn classify_fen(fen: &str) -> Classification {
        let state = GameState::from_fen(fen).unwrap();
        classify(&state.board, state.castling, state.turn)
    }

    #[test]
    fn simulate_restores_quiet_move() {
        let mut board = Board::starting();
        let before = board;
        let seen = simulate(&mut board, Square::G1, Square::F3, |b| b.piece_at(Square::F3));
        assert_eq!(Some(Piece::new(PieceKind::Knight, Color::White)), seen);
        assert_eq!(before, board);
    }

    #[test]
    fn simulate_restores_capture() {
        let mut board = Board::empty();
        board.place(Square::D1, Piece::new(PieceKind::Queen, Color::White));
        board.place(Square::D7, Piece::new(PieceKind::Bishop, Color::Black));
        let before = board;
        let emptied = simulate(&mut board, Square::D1, Square::D7, |b| b.is_empty(Square::D1));
        assert!(emptied);
        assert_eq!(before, board);
    }

    #[test]
    fn simulate_restores_every_starting_move() {
        let mut board = Board::starting();
        let before = board;
        for (from, _) in before.occupied() {
            for to_idx in 0..64 {
                let to = Square::from_index(to_idx);
                simulate(&mut board, from, to, |_| ());
                assert_eq!(before, board, "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn starting_position_is_normal() {
        let board = Board::starting();
        assert_eq!(
            Classification::Normal,
            classify(&board, CastlingRights::NONE, Color::White)
        );
    }

    #[test]
    fn fools_mate() {
        let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
        assert_eq!(Classification::Checkmate, classify_fen(fen));
    }

    #[test]
    fn back_rank_mate() {
        let fen = "3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1";
        assert_eq!(Classification::Checkmate, classify_fen(fen));
    }

    #[test]
    fn check_with_escape() {
        let fen = "4k3/8/8/8/8/8/8/4RK2 b - - 0 1";
        assert_eq!(Classification::Check, classify_fen(fen));
    }

    #[test]
    fn queen_answers_check_only_by_capture() {
        // the rook on e2 gives check from next to the king
        let fen = "4k3/8/8/8/8/8/4r3/3QK3 w - - 0 1";
        let state = GameState::from_fen(fen).unwrap();
        assert!(has_escape(&state.board, state.castling, Color::White));
        let queen = Piece::new(PieceKind::Queen, Color::White);
        let moves = safe_moves(&state.board, state.castling, queen, Square::D1);
        assert_eq!(&[Square::E2][..], &moves[..]);
    }

    #[test]
    fn stalemate_is_not_checkmate() {
        let fen = "7k/5K2/6Q1/8/8/8/8/8 b - - 0 1";
        assert_eq!(Classification::Stalemate, classify_fen(fen));
    }

    #[test]
    fn blocked_pawn_and_cornered_king_is_stalemate() {
        let fen = "k7/P7/1K6/8/8/8/8/8 b - - 0 1";
        assert_eq!(Classification::Stalemate, classify_fen(fen));
    }

    #[test]
    fn pinned_piece_cannot_move() {
        let fen = "4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1";
        let state = GameState::from_fen(fen).unwrap();
        let bishop = Piece::new(PieceKind::Bishop, Color::White);
        assert!(safe_moves(&state.board, state.castling, bishop, Square::E2).is_empty());
    }

    #[test]
    fn messages() {
        assert_eq!(None, Classification::Normal.message(Color::White));
        assert_eq!(
            Some("Check! Black is in check.".to_owned()),
            Classification::Check.message(Color::Black)
        );
        assert_eq!(
            Some("Checkmate! White loses.".to_owned()),
            Classification::Checkmate.message(Color::White)
        );
        assert_eq!(
            Some("Stalemate! The game is a draw.".to_owned()),
            Classification::Stalemate.message(Color::Black)
        );
    }
}
