use crate::chess::{ParseSquareError, Square};
use derive_more::{Debug, Display, Error};
use std::str::FromStr;

/// A move of a piece in [pure coordinate notation].
///
/// [pure coordinate notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[debug("Move({self})")]
#[display("{_0}{_1}")]
pub struct Move(pub Square, pub Square);

impl Move {
    /// The source [`Square`].
    #[inline(always)]
    pub fn whence(&self) -> Square {
        self.0
    }

    /// The destination [`Square`].
    #[inline(always)]
    pub fn whither(&self) -> Square {
        self.1
    }
}

/// The reason why the string is not a valid move.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display("failed to parse move")]
pub struct ParseMoveError;

impl From<ParseSquareError> for ParseMoveError {
    fn from(_: ParseSquareError) -> Self {
        ParseMoveError
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let whence = s.get(..2).ok_or(ParseMoveError)?;
        let whither = s.get(2..).ok_or(ParseMoveError)?;
        Ok(Move(whence.parse()?, whither.parse()?))
    }
}
