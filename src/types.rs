// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::{FromPrimitive, ToPrimitive};
use std::convert::TryFrom;
use std::fmt::{self, Display, Write};
use std::str::FromStr;

// TableIndex is a trait for all types that can serve as an index into a table.
// The board is a flat table of 64 squares, so squares, ranks, files and colors
// all get converted to plain indices at some point.
pub trait TableIndex {
    fn as_index(self) -> usize;
    fn from_index(idx: usize) -> Self;
}

impl<T> TableIndex for T
where
    T: FromPrimitive + ToPrimitive,
{
    fn as_index(self) -> usize {
        self.to_u32().unwrap() as usize
    }

    fn from_index(idx: usize) -> T {
        <T as FromPrimitive>::from_u64(idx as u64).unwrap()
    }
}

#[rustfmt::skip]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    pub fn of(rank: Rank, file: File) -> Square {
        Square::from_index(rank.as_index() * 8 + file.as_index())
    }

    pub fn rank(self) -> Rank {
        Rank::from_index(self.as_index() >> 3)
    }

    pub fn file(self) -> File {
        File::from_index(self.as_index() & 7)
    }

    /// The board row of this square. Row 0 is Black's back rank (rank 8) and
    /// row 7 is White's back rank (rank 1).
    pub fn row(self) -> i32 {
        7 - (self.as_index() >> 3) as i32
    }

    /// The board column of this square, 0 being the a-file.
    pub fn column(self) -> i32 {
        (self.as_index() & 7) as i32
    }

    /// Builds a square from row/column coordinates, returning `None` for
    /// anything off the board.
    pub fn from_coords(row: i32, column: i32) -> Option<Square> {
        if row < 0 || row > 7 || column < 0 || column > 7 {
            return None;
        }

        Some(Square::from_index(((7 - row) * 8 + column) as usize))
    }

    /// Steps `drow` rows and `dcol` columns away from this square. Steps that
    /// would leave the board produce `None` rather than wrapping around.
    pub fn offset(self, drow: i32, dcol: i32) -> Option<Square> {
        Square::from_coords(self.row() + drow, self.column() + dcol)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl FromStr for Square {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let file = chars.next().ok_or(()).and_then(File::try_from)?;
        let rank = chars.next().ok_or(()).and_then(Rank::try_from)?;
        if chars.next().is_some() {
            return Err(());
        }

        Ok(Square::of(rank, file))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            Rank::One => '1',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
        };
        f.write_char(chr)
    }
}

impl TryFrom<char> for Rank {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let res = match value {
            '1' => Rank::One,
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            _ => return Err(()),
        };
        Ok(res)
    }
}

pub static RANKS: [Rank; 8] = [
    Rank::One,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            File::A => 'a',
            File::B => 'b',
            File::C => 'c',
            File::D => 'd',
            File::E => 'e',
            File::F => 'f',
            File::G => 'g',
            File::H => 'h',
        };
        f.write_char(chr)
    }
}

impl TryFrom<char> for File {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let res = match value {
            'a' => File::A,
            'b' => File::B,
            'c' => File::C,
            'd' => File::D,
            'e' => File::E,
            'f' => File::F,
            'g' => File::G,
            'h' => File::H,
            _ => return Err(()),
        };
        Ok(res)
    }
}

pub static FILES: [File; 8] = [
    File::A,
    File::B,
    File::C,
    File::D,
    File::E,
    File::F,
    File::G,
    File::H,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a single pawn step for this color. White pawns walk
    /// towards row 0, black pawns towards row 7.
    pub fn pawn_direction(self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row on which this color's pawns start, and from which they may
    /// advance two squares.
    pub fn pawn_home_row(self) -> i32 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row holding this color's king and rooks at the start of the game.
    pub fn back_row(self) -> i32 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

pub static COLORS: [Color; 2] = [Color::White, Color::Black];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Lower-case FEN letter for this kind.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        };
        f.write_str(name)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CastleSide {
    Queenside,
    Kingside,
}

impl CastleSide {
    /// Infers the castling side from the king's destination column on a
    /// two-file king move.
    pub fn for_king_destination(column: i32) -> Option<CastleSide> {
        match column {
            2 => Some(CastleSide::Queenside),
            6 => Some(CastleSide::Kingside),
            _ => None,
        }
    }

    /// Infers which castling rook sits on the given column, if any.
    pub fn for_rook_column(column: i32) -> Option<CastleSide> {
        match column {
            0 => Some(CastleSide::Queenside),
            7 => Some(CastleSide::Kingside),
            _ => None,
        }
    }

    pub fn rook_column(self) -> i32 {
        match self {
            CastleSide::Queenside => 0,
            CastleSide::Kingside => 7,
        }
    }

    pub fn king_destination_column(self) -> i32 {
        match self {
            CastleSide::Queenside => 2,
            CastleSide::Kingside => 6,
        }
    }

    pub fn rook_destination_column(self) -> i32 {
        match self {
            CastleSide::Queenside => 3,
            CastleSide::Kingside => 5,
        }
    }
}

bitflags! {
    /// Sticky record of which castling pieces have left their original
    /// squares. Markers are only ever added, never removed.
    pub struct CastlingRights: u8 {
        const NONE = 0;
        const WHITE_KING = 0b0000_0001;
        const WHITE_QUEENSIDE_ROOK = 0b0000_0010;
        const WHITE_KINGSIDE_ROOK = 0b0000_0100;
        const WHITE = Self::WHITE_KING.bits
            | Self::WHITE_QUEENSIDE_ROOK.bits
            | Self::WHITE_KINGSIDE_ROOK.bits;
        const BLACK_KING = 0b0000_1000;
        const BLACK_QUEENSIDE_ROOK = 0b0001_0000;
        const BLACK_KINGSIDE_ROOK = 0b0010_0000;
        const BLACK = Self::BLACK_KING.bits
            | Self::BLACK_QUEENSIDE_ROOK.bits
            | Self::BLACK_KINGSIDE_ROOK.bits;
    }
}

impl CastlingRights {
    pub fn king_moved(self, color: Color) -> bool {
        self.contains(king_marker(color))
    }

    pub fn rook_moved(self, color: Color, side: CastleSide) -> bool {
        self.contains(rook_marker(color, side))
    }

    pub fn mark_king_moved(&mut self, color: Color) {
        self.insert(king_marker(color));
    }

    pub fn mark_rook_moved(&mut self, color: Color, side: CastleSide) {
        self.insert(rook_marker(color, side));
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        CastlingRights::NONE
    }
}

fn king_marker(color: Color) -> CastlingRights {
    match color {
        Color::White => CastlingRights::WHITE_KING,
        Color::Black => CastlingRights::BLACK_KING,
    }
}

fn rook_marker(color: Color, side: CastleSide) -> CastlingRights {
    match (color, side) {
        (Color::White, CastleSide::Queenside) => CastlingRights::WHITE_QUEENSIDE_ROOK,
        (Color::White, CastleSide::Kingside) => CastlingRights::WHITE_KINGSIDE_ROOK,
        (Color::Black, CastleSide::Queenside) => CastlingRights::BLACK_QUEENSIDE_ROOK,
        (Color::Black, CastleSide::Kingside) => CastlingRights::BLACK_KINGSIDE_ROOK,
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }
}

impl TryFrom<char> for Piece {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return Err(()),
        };

        Ok(Piece::new(kind, color))
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = self.kind.letter();
        match self.color {
            Color::White => f.write_char(chr.to_ascii_uppercase()),
            Color::Black => f.write_char(chr),
        }
    }
}
