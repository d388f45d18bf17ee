use crate::chess::{Color, File, Piece, Rank, Role, Square};
use crate::util::Integer;
use arrayvec::ArrayString;
use derive_more::{Debug, Display, Error};
use std::fmt::{self, Write};
use std::{ops::Index, str::FromStr};

/// The chess board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[debug("Board({self})")]
pub struct Board {
    pieces: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        use {Color::*, Role::*};

        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut board = Board { pieces: [None; 64] };

        for (f, r) in File::iter().zip(back) {
            board.place(Piece::new(r, White), Square::new(f, Rank::First));
            board.place(Piece::new(Pawn, White), Square::new(f, Rank::Second));
            board.place(Piece::new(Pawn, Black), Square::new(f, Rank::Seventh));
            board.place(Piece::new(r, Black), Square::new(f, Rank::Eighth));
        }

        board
    }
}

impl Board {
    /// The [`Piece`] on the given [`Square`], if any.
    #[inline(always)]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.pieces[sq.get() as usize]
    }

    /// The [`Color`] of the piece on the given [`Square`], if any.
    #[inline(always)]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.piece_on(sq).map(|p| p.color())
    }

    /// The [`Role`] of the piece on the given [`Square`], if any.
    #[inline(always)]
    pub fn role_on(&self, sq: Square) -> Option<Role> {
        self.piece_on(sq).map(|p| p.role())
    }

    /// The [`Square`] occupied by the king of a [`Color`].
    #[inline(always)]
    pub fn king(&self, side: Color) -> Option<Square> {
        let king = Piece::new(Role::King, side);
        Square::iter().find(|&sq| self[sq] == Some(king))
    }

    /// An iterator over all pieces on the board.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        Square::iter().filter_map(|sq| Some((self.piece_on(sq)?, sq)))
    }

    /// Puts a piece on a square, replacing whatever was there.
    #[inline(always)]
    pub fn place(&mut self, p: Piece, sq: Square) {
        self.pieces[sq.get() as usize] = Some(p);
    }

    /// Removes and returns the piece on a square, if any.
    #[inline(always)]
    pub fn clear(&mut self, sq: Square) -> Option<Piece> {
        self.pieces[sq.get() as usize].take()
    }
}

/// Retrieves the [`Piece`] on a given [`Square`], if any.
impl Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.pieces[sq.get() as usize]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut skip = 0;
        for r in Rank::iter().rev() {
            for file in File::iter() {
                let mut buffer = ArrayString::<2>::new();

                match self[Square::new(file, r)] {
                    None => skip += 1,
                    Some(p) => write!(buffer, "{p}")?,
                }

                if file == File::H && r != Rank::First {
                    buffer.push('/');
                }

                if !buffer.is_empty() && skip > 0 {
                    write!(f, "{skip}")?;
                    skip = 0;
                }

                f.write_str(&buffer)?;
            }
        }

        if skip > 0 {
            write!(f, "{skip}")?;
        }

        Ok(())
    }
}

/// The reason why parsing the piece placement failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display("failed to parse board")]
pub struct ParseBoardError;

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ranks: Vec<_> = s.split('/').rev().collect();
        let ranks @ [_, _, _, _, _, _, _, _] = &ranks[..] else {
            return Err(ParseBoardError);
        };

        let mut board = Board { pieces: [None; 64] };
        for (r, segment) in ranks.iter().enumerate() {
            let mut f: i8 = 0;
            for c in segment.chars() {
                let mut buffer = [0; 4];

                if f >= 8 {
                    return Err(ParseBoardError);
                } else if let Some(skip) = c.to_digit(10) {
                    f += skip as i8;
                } else if let Ok(p) = Piece::from_str(c.encode_utf8(&mut buffer)) {
                    board.place(p, Square::new(File::new(f), Rank::new(r as i8)));
                    f += 1;
                } else {
                    return Err(ParseBoardError);
                }
            }

            if f != 8 {
                return Err(ParseBoardError);
            }
        }

        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use derive_more::Debug;
    use test_strategy::proptest;

    #[test]
    fn the_default_board_is_the_starting_position() {
        assert_eq!(
            Board::default().to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
    }

    #[proptest]
    fn iter_returns_pieces_and_squares(b: Board) {
        for (p, sq) in b.iter() {
            assert_eq!(b[sq], Some(p));
        }
    }

    #[proptest]
    fn king_returns_square_occupied_by_a_king(b: Board, c: Color) {
        if let Some(sq) = b.king(c) {
            assert_eq!(b[sq], Some(Piece::new(Role::King, c)));
        }
    }

    #[proptest]
    fn piece_on_returns_piece_on_the_given_square(b: Board, sq: Square) {
        assert_eq!(
            b.piece_on(sq),
            Option::zip(b.role_on(sq), b.color_on(sq)).map(|(r, c)| Piece::new(r, c))
        );
    }

    #[proptest]
    fn place_puts_piece_on_square(mut b: Board, p: Piece, sq: Square) {
        b.place(p, sq);
        assert_eq!(b[sq], Some(p));
    }

    #[proptest]
    fn clear_removes_and_returns_piece_on_square(mut b: Board, sq: Square) {
        let p = b[sq];
        assert_eq!(b.clear(sq), p);
        assert_eq!(b[sq], None);
        assert_eq!(b.clear(sq), None);
    }

    #[proptest]
    fn board_can_be_indexed_by_square(b: Board, sq: Square) {
        assert_eq!(b[sq], b.piece_on(sq));
    }

    #[proptest]
    fn parsing_printed_board_is_an_identity(b: Board) {
        assert_eq!(b.to_string().parse(), Ok(b));
    }

    #[proptest]
    fn parsing_board_fails_if_corrupted(
        b: Board,
        #[strategy(..=#b.to_string().len())] n: usize,
        #[strategy("[^[:ascii:]]+")] r: String,
    ) {
        let s = b.to_string();
        assert_eq!([&s[..n], &r, &s[n..]].concat().parse().ok(), None::<Board>);
    }

    #[proptest]
    fn parsing_board_fails_if_not_eight_ranks(
        #[strategy(0usize..8)] n: usize,
        b: Board,
    ) {
        let s: Vec<_> = b.to_string().split('/').take(n).map(String::from).collect();
        assert_eq!(s.join("/").parse().ok(), None::<Board>);
    }
}
