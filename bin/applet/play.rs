use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{File, Move, Position, Rank, Square};
use lib::util::Integer;
use std::io::{stdin, BufRead};
use tracing::{info, instrument, warn};

/// Hosts a game of atomic chess between two players on the terminal.
///
/// Moves are read from the standard input, one per line, in pure coordinate
/// notation, e.g. `e2e4`.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The position to start from.
    #[clap(default_value_t)]
    pos: Position,
}

impl Play {
    fn print(&self) {
        for r in Rank::iter().rev() {
            print!("{r} ");
            for f in File::iter() {
                match self.pos.piece_on(Square::new(f, r)) {
                    None => print!(" ."),
                    Some(p) => print!(" {p}"),
                }
            }
            println!();
        }

        println!("   a b c d e f g h");
    }

    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(mut self) -> Result<(), Anyhow> {
        let mut lines = stdin().lock().lines();

        while !self.pos.outcome().is_decisive() {
            self.print();
            println!("{} to move", self.pos.turn());

            let Some(line) = lines.next() else {
                info!("no more input, adjourning the game");
                return Ok(());
            };

            match line?.trim().parse::<Move>() {
                Err(e) => warn!("{e}"),
                Ok(m) => {
                    if let Err(e) = self.pos.play(m) {
                        warn!("{e}");
                    }
                }
            }
        }

        self.print();
        println!("{}", self.pos.outcome());

        Ok(())
    }
}
