use crate::chess::{Board, Color, File, Move, Outcome, ParseBoardError, Piece, Rank, Role, Square};
use crate::util::Integer;
use derive_more::{Debug, Display, Error, From};
use proptest::prelude::*;
use proptest::sample::{Selector, SelectorStrategy};
use proptest::strategy::Map;
use std::ops::{Index, Range};
use std::{fmt, str::FromStr};

/// The reason why a [`Move`] was rejected in a given [`Position`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum MoveError {
    #[display("the game is already over")]
    GameAlreadyOver,

    #[display("there is no piece on `{_0}`")]
    NoPieceAtSource(#[error(not(source))] Square),

    #[display("the piece on `{_0}` belongs to the opponent")]
    NotYourPiece(#[error(not(source))] Square),

    #[display("the piece on `{_0}` cannot be captured by its own side")]
    CannotCaptureOwnPiece(#[error(not(source))] Square),

    #[display("the king cannot capture")]
    KingCannotCapture,

    #[display("the explosion would destroy both kings")]
    WouldDestroyBothKings,

    #[display("`{_0}` does not match the piece's movement pattern")]
    IllegalPieceMovement(#[error(not(source))] Move),
}

/// The current state of a game of atomic chess.
///
/// Holds the board, the side to move, and the outcome, and guarantees the
/// three only ever change together through a successfully played [`Move`].
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[debug("Position({self})")]
pub struct Position {
    board: Board,
    turn: Color,
    outcome: Outcome,
}

impl Default for Position {
    fn default() -> Self {
        Position {
            board: Board::default(),
            turn: Color::White,
            outcome: Outcome::InProgress,
        }
    }
}

impl Position {
    /// The side to move.
    #[inline(always)]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The outcome of the game so far.
    #[inline(always)]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The [`Piece`] on the given [`Square`], if any.
    #[inline(always)]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.board.piece_on(sq)
    }

    /// The [`Square`] occupied by the king of a [`Color`].
    #[inline(always)]
    pub fn king(&self, side: Color) -> Option<Square> {
        self.board.king(side)
    }

    /// An iterator over the legal moves for the side to move.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        Square::iter().flat_map(move |whence| {
            Square::iter().filter_map(move |whither| {
                let m = Move(whence, whither);
                self.validate(m).ok().map(|_| m)
            })
        })
    }

    /// Whether a [`Move`] is legal in this position.
    ///
    /// Returns the piece to be moved, or the reason why the move was rejected.
    /// The checks short-circuit in a fixed order, so the reported reason is
    /// deterministic.
    pub fn validate(&self, m: Move) -> Result<Piece, MoveError> {
        if self.outcome.is_decisive() {
            return Err(MoveError::GameAlreadyOver);
        }

        let Some(piece) = self[m.whence()] else {
            return Err(MoveError::NoPieceAtSource(m.whence()));
        };

        if piece.color() != self.turn {
            return Err(MoveError::NotYourPiece(m.whence()));
        }

        if let Some(target) = self[m.whither()] {
            if target.color() == self.turn {
                return Err(MoveError::CannotCaptureOwnPiece(m.whither()));
            }

            if piece.role() == Role::King {
                return Err(MoveError::KingCannotCapture);
            }

            if self.blast_destroys_both_kings(m.whither()) {
                return Err(MoveError::WouldDestroyBothKings);
            }
        }

        if !self.is_movement_legal(piece, m) {
            return Err(MoveError::IllegalPieceMovement(m));
        }

        Ok(piece)
    }

    /// Plays a [`Move`] if legal.
    ///
    /// The position is left untouched when the move is rejected.
    pub fn play(&mut self, m: Move) -> Result<(), MoveError> {
        let piece = self.validate(m)?;

        self.board.clear(m.whence());
        match self.board.clear(m.whither()) {
            None => self.board.place(piece, m.whither()),
            Some(_) => {
                // The capturer goes down with the explosion, pawns are immune.
                for sq in m.whither().adjacent() {
                    if self.board[sq].is_some_and(|p| p.role() != Role::Pawn) {
                        self.board.clear(sq);
                    }
                }
            }
        }

        // Losing one's own king loses the game even if the opposing king
        // went down in the same blast.
        self.outcome = if self.board.king(self.turn).is_none() {
            Outcome::Won(!self.turn)
        } else if self.board.king(!self.turn).is_none() {
            Outcome::Won(self.turn)
        } else {
            Outcome::InProgress
        };

        self.turn = !self.turn;

        Ok(())
    }

    /// Whether a capture on `sq` would blow up both kings.
    ///
    /// The blast zone is the 3x3 neighborhood centered on the destination,
    /// clipped to the board edge.
    fn blast_destroys_both_kings(&self, sq: Square) -> bool {
        Color::iter().all(|side| {
            let king = Piece::new(Role::King, side);
            self[sq] == Some(king) || sq.adjacent().any(|adj| self[adj] == Some(king))
        })
    }

    /// Whether the movement pattern matches the piece's [`Role`] and no piece
    /// blocks the way.
    fn is_movement_legal(&self, piece: Piece, m: Move) -> bool {
        let df = m.whither().file() - m.whence().file();
        let dr = m.whither().rank() - m.whence().rank();

        match piece.role() {
            Role::Rook => (df == 0) != (dr == 0) && self.is_path_clear(m),
            Role::Bishop => df.abs() == dr.abs() && df != 0 && self.is_path_clear(m),
            Role::Queen => {
                ((df == 0) != (dr == 0) || (df.abs() == dr.abs() && df != 0))
                    && self.is_path_clear(m)
            }
            Role::Knight => matches!((df.abs(), dr.abs()), (1, 2) | (2, 1)),
            Role::King => df.abs() <= 1 && dr.abs() <= 1 && (df, dr) != (0, 0),
            Role::Pawn => {
                let forward = piece.color().forward();
                if df.abs() == 1 {
                    // Diagonal steps are captures only.
                    dr == forward && self[m.whither()].is_some()
                } else if df == 0 && self[m.whither()].is_none() {
                    dr == forward
                        || (dr == 2 * forward
                            && m.whence().rank() == piece.color().pawn_rank()
                            && self[Square::new(
                                m.whence().file(),
                                Rank::new(m.whence().rank().get() + forward),
                            )]
                            .is_none())
                } else {
                    false
                }
            }
        }
    }

    /// Whether every square strictly between the endpoints of a straight or
    /// diagonal move is empty.
    ///
    /// Walks unit steps toward the destination, so the endpoints must be on a
    /// common line.
    fn is_path_clear(&self, m: Move) -> bool {
        let df = (m.whither().file() - m.whence().file()).signum();
        let dr = (m.whither().rank() - m.whence().rank()).signum();

        let mut f = m.whence().file().get() + df;
        let mut r = m.whence().rank().get() + dr;
        while (f, r) != (m.whither().file().get(), m.whither().rank().get()) {
            if self[Square::new(File::new(f), Rank::new(r))].is_some() {
                return false;
            }

            f += df;
            r += dr;
        }

        true
    }
}

/// Retrieves the [`Piece`] on a given [`Square`], if any.
impl Index<Square> for Position {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.board[sq]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.board, f)?;

        match self.turn {
            Color::White => f.write_str(" w"),
            Color::Black => f.write_str(" b"),
        }
    }
}

/// The reason why parsing [`Position`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParsePositionError {
    #[display("failed to parse position")]
    #[from]
    InvalidBoard(ParseBoardError),
    #[display("failed to parse side to move")]
    InvalidSideToMove,
    #[display("at least one king must be on the board")]
    MissingKings,
    #[display("unspecified syntax error")]
    InvalidSyntax,
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<_> = s.split(' ').collect();
        let [board, turn] = &fields[..] else {
            return Err(ParsePositionError::InvalidSyntax);
        };

        let board: Board = board.parse()?;

        let turn = match *turn {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(ParsePositionError::InvalidSideToMove),
        };

        let outcome = match (board.king(Color::White), board.king(Color::Black)) {
            (None, None) => return Err(ParsePositionError::MissingKings),
            (None, Some(_)) => Outcome::Won(Color::Black),
            (Some(_), None) => Outcome::Won(Color::White),
            (Some(_), Some(_)) => Outcome::InProgress,
        };

        Ok(Position {
            board,
            turn,
            outcome,
        })
    }
}

impl Arbitrary for Position {
    type Parameters = ();
    type Strategy = Map<(Range<usize>, SelectorStrategy), fn((usize, Selector)) -> Position>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (0..48usize, any::<Selector>()).prop_map(|(moves, selector)| {
            let mut pos = Position::default();

            for _ in 0..moves {
                let m = selector.try_select(pos.moves());
                match m {
                    Some(m) if pos.play(m).is_ok() => {}
                    _ => break,
                }
            }

            pos
        })
    }
}
