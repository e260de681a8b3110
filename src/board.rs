// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::types::TableIndex;
use crate::types::{Color, Piece, PieceKind, Square};

lazy_static! {
    static ref STARTING_BOARD: Board = {
        let mut board = Board::empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for (column, &kind) in back_rank.iter().enumerate() {
            let column = column as i32;
            for &color in &[Color::White, Color::Black] {
                let back = Square::from_coords(color.back_row(), column);
                let pawns = Square::from_coords(color.pawn_home_row(), column);
                if let (Some(back), Some(pawns)) = (back, pawns) {
                    board.place(back, Piece::new(kind, color));
                    board.place(pawns, Piece::new(PieceKind::Pawn, color));
                }
            }
        }

        board
    };
}

/// The 8x8 grid. A board is plain data: it knows which piece sits on which
/// square and nothing about how pieces move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    pub const fn empty() -> Board {
        Board {
            squares: [None; 64],
        }
    }

    /// The standard initial position.
    pub fn starting() -> Board {
        *STARTING_BOARD
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.as_index()]
    }

    /// Puts a piece on a square, replacing whatever was there.
    pub fn place(&mut self, square: Square, piece: Piece) {
        self.squares[square.as_index()] = Some(piece);
    }

    /// Empties a square, handing back the piece that was on it.
    pub fn clear(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.as_index()].take()
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Iterates over every occupied square in row-major order, starting
    /// from row 0 (Black's back rank).
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..8).flat_map(move |row| {
            (0..8).filter_map(move |column| {
                let square = Square::from_coords(row, column)?;
                self.piece_at(square).map(|piece| (square, piece))
            })
        })
    }

    /// Iterates over the squares holding pieces of the given color.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color == color)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..8 {
            for column in 0..8 {
                match Square::from_coords(row, column).and_then(|sq| self.piece_at(sq)) {
                    Some(piece) => write!(f, " {} ", piece)?,
                    None => write!(f, " . ")?,
                }
            }

            writeln!(f, "| {}", 8 - row)?;
        }

        for _ in 0..8 {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for file in "abcdefgh".chars() {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}
