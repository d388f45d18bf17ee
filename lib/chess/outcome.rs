use crate::chess::Color;
use derive_more::Display;

/// One of the possible outcomes of a game of atomic chess.
#[derive(Debug, Display, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Outcome {
    /// Both kings still stand.
    #[default]
    #[display("in progress")]
    InProgress,

    /// The opposing king was destroyed.
    #[display("{_0} player won")]
    Won(Color),
}

impl Outcome {
    /// Whether the game has ended and one of the sides has won.
    pub fn is_decisive(&self) -> bool {
        matches!(self, Outcome::Won(_))
    }

    /// The winning side, if the game has ended.
    pub fn winner(&self) -> Option<Color> {
        match *self {
            Outcome::Won(c) => Some(c),
            Outcome::InProgress => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn the_default_outcome_is_in_progress() {
        assert_eq!(Outcome::default(), Outcome::InProgress);
    }

    #[proptest]
    fn outcome_is_decisive_iff_one_side_won(o: Outcome) {
        assert_eq!(o.is_decisive(), o.winner().is_some());
    }

    #[proptest]
    fn the_side_whose_king_survives_wins(c: Color) {
        assert_eq!(Outcome::Won(c).winner(), Some(c));
    }
}
