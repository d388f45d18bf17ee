use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::Position;
use tracing::instrument;

/// Prints the legal moves in a position.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Moves {
    /// The position to enumerate, as a FEN piece placement and side to move.
    #[clap(default_value_t)]
    pos: Position,
}

impl Moves {
    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        for m in self.pos.moves() {
            println!("{m}");
        }

        Ok(())
    }
}
