// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::error::Error;
use std::fmt;

use crate::board::Board;
use crate::evaluator::{self, Classification};
use crate::movegen::{self, Destinations};
use crate::rules;
use crate::types::{CastleSide, CastlingRights, Color, Piece, PieceKind, Rank, Square};
use crate::types::{COLORS, FILES, RANKS};

/// Possible errors that can arise when parsing a FEN string into a `GameState`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    FileDoesNotSumToEight,
    UnknownPiece,
    InvalidSideToMove,
    InvalidCastle,
}

impl fmt::Display for FenParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenParseError::UnexpectedChar(c) => write!(f, "unexpected character '{}'", c),
            FenParseError::UnexpectedEnd => f.write_str("unexpected end of input"),
            FenParseError::InvalidDigit => f.write_str("invalid empty-square count"),
            FenParseError::FileDoesNotSumToEight => f.write_str("rank does not have 8 files"),
            FenParseError::UnknownPiece => f.write_str("unknown piece letter"),
            FenParseError::InvalidSideToMove => f.write_str("invalid side to move"),
            FenParseError::InvalidCastle => f.write_str("invalid castling field"),
        }
    }
}

impl Error for FenParseError {}

/// Reasons a requested move is refused. A refused move never changes the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    NoPieceAtOrigin,
    NotYourTurn,
    IllegalMove,
    LeavesKingInCheck,
    GameOver,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            MoveError::NoPieceAtOrigin => "there is no piece on that square",
            MoveError::NotYourTurn => "that piece does not belong to the side to move",
            MoveError::IllegalMove => "that piece cannot move there",
            MoveError::LeavesKingInCheck => "that move would leave the king in check",
            MoveError::GameOver => "the game is over",
        };
        f.write_str(msg)
    }
}

impl Error for MoveError {}

/// Everything that describes a game in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub castling: CastlingRights,
    pub turn: Color,
    /// Black pieces taken by White, in the order they were taken.
    pub captured_by_white: Vec<Piece>,
    /// White pieces taken by Black, in the order they were taken.
    pub captured_by_black: Vec<Piece>,
}

impl GameState {
    /// The standard starting position with White to move.
    pub fn new() -> GameState {
        GameState {
            board: Board::starting(),
            castling: CastlingRights::NONE,
            turn: Color::White,
            captured_by_white: Vec::new(),
            captured_by_black: Vec::new(),
        }
    }

    /// The pieces captured by `color` so far.
    pub fn captured(&self, color: Color) -> &[Piece] {
        match color {
            Color::White => &self.captured_by_white,
            Color::Black => &self.captured_by_black,
        }
    }

    /// Classification of the current position for the side to move. Always
    /// computed afresh from the board.
    pub fn classification(&self) -> Classification {
        evaluator::classify(&self.board, self.castling, self.turn)
    }

    /// Every (from, to) pair the side to move may play without leaving its
    /// own king attacked.
    pub fn legal_moves(&self) -> Vec<(Square, Square)> {
        let mut moves = Vec::new();
        for (from, piece) in self.board.pieces(self.turn) {
            for to in evaluator::safe_moves(&self.board, self.castling, piece, from) {
                moves.push((from, to));
            }
        }

        moves
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

//
// Move execution
//

/// Plays `piece` from `from` to `to`, updating captures, castling markers and
/// the side to move, and returns the classification of the new position for
/// the side now to move.
///
/// The move is assumed to have passed `rules::is_legal`; nothing is
/// re-checked here.
pub fn apply_move(state: &mut GameState, piece: Piece, from: Square, to: Square) -> Classification {
    make_move(state, piece, from, to);
    let classification = state.classification();
    if classification.is_game_over() {
        info!("game over: {} for {}", classification, state.turn);
    }

    classification
}

/// The bookkeeping half of `apply_move`, without classifying the result.
pub(crate) fn make_move(state: &mut GameState, piece: Piece, from: Square, to: Square) {
    let color = piece.color;
    if let Some(captured) = state.board.clear(to) {
        debug!("{} captures {} on {}", color, captured.kind, to);
        match color {
            Color::White => state.captured_by_white.push(captured),
            Color::Black => state.captured_by_black.push(captured),
        }
    }

    state.board.clear(from);
    state.board.place(to, piece);
    debug!("{} {} {} -> {}", color, piece.kind, from, to);

    match piece.kind {
        PieceKind::King => {
            state.castling.mark_king_moved(color);
            if let Some(side) = castled_side(piece, from, to) {
                let row = from.row();
                let rook_from = Square::from_coords(row, side.rook_column());
                let rook_to = Square::from_coords(row, side.rook_destination_column());
                if let (Some(rook_from), Some(rook_to)) = (rook_from, rook_to) {
                    if let Some(rook) = state.board.clear(rook_from) {
                        state.board.place(rook_to, rook);
                        debug!("{} castles, rook {} -> {}", color, rook_from, rook_to);
                    }
                }

                state.castling.mark_rook_moved(color, side);
            }
        }
        PieceKind::Rook => {
            if from.row() == color.back_row() {
                if let Some(side) = CastleSide::for_rook_column(from.column()) {
                    state.castling.mark_rook_moved(color, side);
                }
            }
        }
        _ => {}
    }

    state.turn = state.turn.toggle();
}

/// If this king move is a castle, the side it castled towards.
fn castled_side(piece: Piece, from: Square, to: Square) -> Option<CastleSide> {
    if piece.kind != PieceKind::King || (to.column() - from.column()).abs() != 2 {
        return None;
    }

    rules::castle_side(piece.color, from, to)
}

//
// The game as seen by a front end
//

/// Rule switches for a `Game`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GameOptions {
    /// Accept moves that leave the mover's own king attacked. Off by default;
    /// when on, only `rules::is_legal` gates a move.
    pub allow_self_check: bool,
}

/// What happened when a move was accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    pub castled: Option<CastleSide>,
    /// The side to move after this move.
    pub to_move: Color,
    pub classification: Classification,
}

impl MoveOutcome {
    /// The status line to announce after this move, if any.
    pub fn message(&self) -> Option<String> {
        self.classification.message(self.to_move)
    }
}

/// A single game, owned by one front end. Moves are submitted one at a time;
/// a `Game` is not meant to be shared between threads without external
/// serialization, and separate games share nothing.
#[derive(Clone, Debug)]
pub struct Game {
    state: GameState,
    options: GameOptions,
}

impl Game {
    pub fn new() -> Game {
        Game::with_options(GameOptions::default())
    }

    pub fn with_options(options: GameOptions) -> Game {
        Game::from_state(GameState::new(), options)
    }

    pub fn from_state(state: GameState, options: GameOptions) -> Game {
        Game { state, options }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn turn(&self) -> Color {
        self.state.turn
    }

    pub fn options(&self) -> GameOptions {
        self.options
    }

    pub fn captured(&self, color: Color) -> &[Piece] {
        self.state.captured(color)
    }

    pub fn classification(&self) -> Classification {
        self.state.classification()
    }

    /// The squares the piece on `from` may move to right now. Empty when the
    /// square is empty or holds a piece of the side not to move.
    pub fn legal_destinations(&self, from: Square) -> Destinations {
        let piece = match self.state.board.piece_at(from) {
            Some(piece) if piece.color == self.state.turn => piece,
            _ => return Destinations::new(),
        };

        let board = &self.state.board;
        if self.options.allow_self_check {
            movegen::possible_moves(board, self.state.castling, piece, from)
        } else {
            evaluator::safe_moves(board, self.state.castling, piece, from)
        }
    }

    /// Attempts to play the piece on `from` to `to` for the side to move.
    pub fn request_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        if self.classification().is_game_over() {
            return Err(MoveError::GameOver);
        }

        let piece = self
            .state
            .board
            .piece_at(from)
            .ok_or(MoveError::NoPieceAtOrigin)?;
        if piece.color != self.state.turn {
            return Err(MoveError::NotYourTurn);
        }

        if !rules::is_legal(&self.state.board, self.state.castling, piece, from, to) {
            return Err(MoveError::IllegalMove);
        }

        if !self.options.allow_self_check {
            let mut scratch = self.state.board;
            if !evaluator::keeps_king_safe(&mut scratch, piece.color, from, to) {
                return Err(MoveError::LeavesKingInCheck);
            }
        }

        let captured = self.state.board.piece_at(to);
        let castled = castled_side(piece, from, to);
        let classification = apply_move(&mut self.state, piece, from, to);
        Ok(MoveOutcome {
            piece,
            from,
            to,
            captured,
            castled,
            to_move: self.state.turn,
            classification,
        })
    }

    /// Throws the current game away and sets up a fresh one.
    pub fn restart(&mut self) {
        info!("restarting game");
        self.state = GameState::new();
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

//
// FEN parsing and generation.
//
// Only the first three fields matter here: piece placement, side to move and
// castling availability. FEN is only ever read, to set up positions. Availability is translated into the "has moved"
// markers the rules work with. Any further fields are accepted and ignored.
//

impl GameState {
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<GameState, FenParseError> {
        use std::iter::Peekable;
        use std::str::Chars;

        type Stream<'a> = Peekable<Chars<'a>>;

        fn eat(iter: &mut Stream, expected: char) -> Result<(), FenParseError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(FenParseError::UnexpectedChar(c)),
                None => Err(FenParseError::UnexpectedEnd),
            }
        }

        fn peek(iter: &mut Stream) -> Result<char, FenParseError> {
            iter.peek().cloned().ok_or(FenParseError::UnexpectedEnd)
        }

        fn eat_side_to_move(iter: &mut Stream) -> Result<Color, FenParseError> {
            let side = match peek(iter)? {
                'w' => Color::White,
                'b' => Color::Black,
                _ => return Err(FenParseError::InvalidSideToMove),
            };

            iter.next();
            Ok(side)
        }

        fn eat_castling(iter: &mut Stream) -> Result<CastlingRights, FenParseError> {
            let mut available = CastlingRights::NONE;
            if peek(iter)? == '-' {
                iter.next();
            } else {
                while let Some(&c) = iter.peek() {
                    let marker = match c {
                        'K' => CastlingRights::WHITE_KINGSIDE_ROOK,
                        'Q' => CastlingRights::WHITE_QUEENSIDE_ROOK,
                        'k' => CastlingRights::BLACK_KINGSIDE_ROOK,
                        'q' => CastlingRights::BLACK_QUEENSIDE_ROOK,
                        ' ' => break,
                        _ => return Err(FenParseError::InvalidCastle),
                    };

                    available |= marker;
                    iter.next();
                }
            }

            // Every rook without availability has "moved"; a king with
            // neither rook available has too.
            let rooks = CastlingRights::WHITE_KINGSIDE_ROOK
                | CastlingRights::WHITE_QUEENSIDE_ROOK
                | CastlingRights::BLACK_KINGSIDE_ROOK
                | CastlingRights::BLACK_QUEENSIDE_ROOK;
            let mut moved = rooks - available;
            for &color in COLORS.iter() {
                if moved.rook_moved(color, CastleSide::Kingside)
                    && moved.rook_moved(color, CastleSide::Queenside)
                {
                    moved.mark_king_moved(color);
                }
            }

            Ok(moved)
        }

        let str_ref = fen.as_ref();
        let iter = &mut str_ref.chars().peekable();
        let mut board = Board::empty();
        for &rank in RANKS.iter().rev() {
            let mut file = 0;
            while file < 8 {
                let c = peek(iter)?;
                // digits 1 through 8 indicate empty squares.
                if let Some(value) = c.to_digit(10) {
                    if value < 1 || value > 8 {
                        return Err(FenParseError::InvalidDigit);
                    }

                    file += value as usize;
                    if file > 8 {
                        return Err(FenParseError::FileDoesNotSumToEight);
                    }

                    iter.next();
                    continue;
                }

                if c == '/' || c == ' ' {
                    return Err(FenParseError::FileDoesNotSumToEight);
                }

                let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece)?;
                board.place(Square::of(rank, FILES[file]), piece);
                iter.next();
                file += 1;
            }

            if rank != Rank::One {
                eat(iter, '/')?;
            }
        }

        eat(iter, ' ')?;
        let turn = eat_side_to_move(iter)?;
        eat(iter, ' ')?;
        let castling = eat_castling(iter)?;
        Ok(GameState {
            board,
            castling,
            turn,
            captured_by_white: Vec::new(),
            captured_by_black: Vec::new(),
        })
    }

    /// Writes the position back out for round-trip checks in tests. Games are
    /// never saved, so this stays out of the public API.
    #[cfg(test)]
    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for &rank in RANKS.iter().rev() {
            let mut empty_squares = 0;
            for &file in &FILES {
                let square = Square::of(rank, file);
                if let Some(piece) = self.board.piece_at(square) {
                    if empty_squares != 0 {
                        buf.push_str(&empty_squares.to_string());
                    }
                    buf.push_str(&piece.to_string());
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                buf.push_str(&empty_squares.to_string());
            }

            if rank != Rank::One {
                buf.push('/');
            }
        }

        buf.push(' ');
        match self.turn {
            Color::White => buf.push('w'),
            Color::Black => buf.push('b'),
        }

        buf.push(' ');
        let before = buf.len();
        for &(color, side, letter) in &[
            (Color::White, CastleSide::Kingside, 'K'),
            (Color::White, CastleSide::Queenside, 'Q'),
            (Color::Black, CastleSide::Kingside, 'k'),
            (Color::Black, CastleSide::Queenside, 'q'),
        ] {
            if !self.castling.king_moved(color) && !self.castling.rook_moved(color, side) {
                buf.push(letter);
            }
        }

        if buf.len() == before {
            buf.push('-');
        }

        buf.push_str(" - 0 1");
        buf
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "{} to move", self.turn)?;
        for &color in COLORS.iter() {
            let mut taken = String::new();
            for piece in self.captured(color) {
                taken.push_str(&piece.to_string());
            }
            writeln!(f, "captured by {}: {}", color, taken)?;
        }

        Ok(())
    }
}
