// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::game::{self, GameState};

/// Counts the leaves of the legal move tree of the given depth.
pub fn perft(state: &GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = state.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .par_iter()
        .map(|&(from, to)| {
            let mut next = state.clone();
            match next.board.piece_at(from) {
                Some(piece) => {
                    game::make_move(&mut next, piece, from, to);
                    perft(&next, depth - 1)
                }
                None => 0,
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::perft;
    use crate::game::GameState;

    fn perft_test(fen: &'static str, depth: u32, count: u64) {
        let state = GameState::from_fen(fen).unwrap();
        assert_eq!(count, perft(&state, depth));
    }

    macro_rules! perft_tests {
        () => {};
        ($name:ident ($depth:expr): $fen:expr => $count:expr; $($tail:tt)*) => {
            #[test]
            fn $name() {
                perft_test($fen, $depth, $count)
            }

            perft_tests!($($tail)*);
        };

        (skip $name:ident ($depth:expr): $fen:expr => $count:expr; $($tail:tt)*) => {
            #[test]
            #[ignore]
            fn $name() {
                perft_test($fen, $depth, $count)
            }

            perft_tests!($($tail)*);
        };
    }

    // En passant, promotion and castling cannot occur in the first four plies
    // from the starting position, so these match the standard counts.
    perft_tests! {
        start_1 (1): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1" => 20;
        start_2 (2): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1" => 400;
        start_3 (3): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1" => 8902;
        skip start_4 (4): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1" => 197281;

        kingside_rook_1 (1): "4k3/8/8/8/8/8/8/4K2R w K - 0 1" => 15;
        kingside_rook_2 (2): "4k3/8/8/8/8/8/8/4K2R w K - 0 1" => 66;
        kingside_rook_3 (3): "4k3/8/8/8/8/8/8/4K2R w K - 0 1" => 1197;

        four_rooks_1 (1): "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1" => 26;
        four_rooks_2 (2): "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1" => 568;
        skip four_rooks_3 (3): "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1" => 13744;

        mated (1): "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3" => 0;
    }
}
