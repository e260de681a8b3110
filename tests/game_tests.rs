// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
extern crate rookery;
use rookery::{
    CastleSide, CastlingRights, Classification, Color, Game, GameOptions, GameState, MoveError,
    Piece, PieceKind, Square,
};

fn play(game: &mut Game, moves: &[(Square, Square)]) {
    for &(from, to) in moves {
        game.request_move(from, to)
            .unwrap_or_else(|e| panic!("{}{} refused: {}", from, to, e));
    }
}

#[test]
fn turns_alternate() {
    let mut game = Game::new();
    assert_eq!(Color::White, game.turn());
    play(
        &mut game,
        &[
            (Square::E2, Square::E4),
            (Square::E7, Square::E5),
            (Square::G1, Square::F3),
            (Square::B8, Square::C6),
        ],
    );

    // four moves played, white is back on move.
    assert_eq!(Color::White, game.turn());
    game.request_move(Square::F1, Square::C4).unwrap();
    assert_eq!(Color::Black, game.turn());
}

#[test]
fn captures_are_kept_in_order() {
    let mut game = Game::new();
    play(
        &mut game,
        &[
            (Square::E2, Square::E4),
            (Square::D7, Square::D5),
            (Square::E4, Square::D5),
            (Square::D8, Square::D5),
            (Square::B1, Square::C3),
            (Square::D5, Square::A2),
            (Square::A1, Square::A2),
        ],
    );

    assert_eq!(
        &[
            Piece::new(PieceKind::Pawn, Color::Black),
            Piece::new(PieceKind::Queen, Color::Black)
        ][..],
        game.captured(Color::White)
    );

    // the black queen took a pawn on d5 and another on a2
    assert_eq!(2, game.captured(Color::Black).len());
    assert_eq!(
        &[
            Piece::new(PieceKind::Pawn, Color::White),
            Piece::new(PieceKind::Pawn, Color::White)
        ][..],
        game.captured(Color::Black)
    );
}

#[test]
fn refused_move_changes_nothing() {
    let mut game = Game::new();
    play(&mut game, &[(Square::E2, Square::E4)]);
    let before = game.state().clone();

    assert_eq!(Err(MoveError::NotYourTurn), game.request_move(Square::D2, Square::D4));
    assert_eq!(Err(MoveError::IllegalMove), game.request_move(Square::D8, Square::D5));
    assert_eq!(Err(MoveError::NoPieceAtOrigin), game.request_move(Square::D5, Square::D4));
    assert_eq!(&before, game.state());
}

#[test]
fn castling_moves_king_and_rook_together() {
    let state = GameState::from_fen("r3k3/8/8/8/8/8/8/R3K2R w KQq - 0 1").unwrap();
    let mut game = Game::from_state(state, GameOptions::default());
    game.request_move(Square::E1, Square::G1).unwrap();

    let white_rook = Piece::new(PieceKind::Rook, Color::White);
    assert_eq!(Some(white_rook), game.board().piece_at(Square::F1));
    assert!(game.board().is_empty(Square::H1));
    assert!(game.board().is_empty(Square::E1));

    // the other rook stays put
    assert_eq!(Some(white_rook), game.board().piece_at(Square::A1));

    game.request_move(Square::E8, Square::C8).unwrap();
    assert_eq!(
        Some(Piece::new(PieceKind::Rook, Color::Black)),
        game.board().piece_at(Square::D8)
    );
    assert_eq!(
        Some(Piece::new(PieceKind::King, Color::Black)),
        game.board().piece_at(Square::C8)
    );
    assert!(game.board().is_empty(Square::A8));
    let castling = game.state().castling;
    assert!(castling.contains(CastlingRights::WHITE_KING | CastlingRights::BLACK_KING));
    assert!(castling.rook_moved(Color::White, CastleSide::Kingside));
    assert!(castling.rook_moved(Color::Black, CastleSide::Queenside));
}

#[test]
fn no_castling_through_an_attacked_square() {
    let state = GameState::from_fen("4k3/8/8/5r2/8/8/8/4K2R w K - 0 1").unwrap();
    let mut game = Game::from_state(state, GameOptions::default());

    // the rook on f5 watches f1
    assert_eq!(Err(MoveError::IllegalMove), game.request_move(Square::E1, Square::G1));
    assert!(!game.legal_destinations(Square::E1).contains(&Square::G1));
}

#[test]
fn fools_mate() {
    let mut game = Game::new();
    play(
        &mut game,
        &[
            (Square::F2, Square::F3),
            (Square::E7, Square::E5),
            (Square::G2, Square::G4),
        ],
    );

    let outcome = game.request_move(Square::D8, Square::H4).unwrap();
    assert_eq!(Classification::Checkmate, outcome.classification);
    assert_eq!(Some("Checkmate! White loses.".to_owned()), outcome.message());
    assert!(game.state().legal_moves().is_empty());
    assert_eq!(Err(MoveError::GameOver), game.request_move(Square::A2, Square::A3));
}

#[test]
fn queen_stalemates_lone_king() {
    let state = GameState::from_fen("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1").unwrap();
    let mut game = Game::from_state(state, GameOptions::default());

    let outcome = game.request_move(Square::F1, Square::F7).unwrap();
    assert_eq!(Classification::Stalemate, outcome.classification);
    assert_eq!(Some("Stalemate! The game is a draw.".to_owned()), outcome.message());
    assert_eq!(Err(MoveError::GameOver), game.request_move(Square::H8, Square::G8));
}

#[test]
fn pawn_double_step_needs_both_squares_empty() {
    let state = GameState::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
    let mut game = Game::from_state(state, GameOptions::default());
    assert_eq!(Err(MoveError::IllegalMove), game.request_move(Square::E2, Square::E4));
    assert_eq!(Err(MoveError::IllegalMove), game.request_move(Square::E2, Square::E3));

    let mut game = Game::new();
    play(&mut game, &[(Square::E2, Square::E3), (Square::E7, Square::E6)]);

    // off the home row only single steps remain
    assert_eq!(Err(MoveError::IllegalMove), game.request_move(Square::E3, Square::E5));
}

#[test]
fn knights_jump_over_pieces() {
    let game = Game::new();
    let mut destinations = game.legal_destinations(Square::B1).to_vec();
    destinations.sort_by_key(|sq| sq.to_string());
    assert_eq!(vec![Square::A3, Square::C3], destinations);
}

#[test]
fn twenty_moves_from_the_start() {
    assert_eq!(20, GameState::new().legal_moves().len());
}
