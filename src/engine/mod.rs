//! Text frontend: reads commands from the input stream, feeds them to the
//! [`Game`] and prints the resulting state.
//!
//! [`Engine::run`] is the "main loop" of the binary. Every state-changing
//! command is answered with a single line describing the snapshot, e.g.
//! `selected e2: e3 e4` or `turn b capture`.
//!
//! NOTE: Malformed or unknown commands are reported as `info string ...` and
//! skipped. They never stop the loop.

use std::io::{BufRead, Write};

use itertools::Itertools;
use log::debug;

use crate::chess::game::{Game, MoveFlags, Snapshot};
use crate::engine::protocol::Command;

mod protocol;

/// The Engine connects the game with the I/O and handles commands sent by the
/// frontend.
pub struct Engine<'a, R: BufRead, W: Write> {
    game: Game,
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Engine<'a, R, W> {
    /// Creates a new instance of the engine driving the given game with
    /// provided I/O.
    #[must_use]
    pub fn new(game: Game, input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            game,
            input,
            output,
        }
    }

    /// Continuously reads the input stream and executes commands until "quit"
    /// is sent or the input is closed.
    ///
    /// # Errors
    ///
    /// Fails only if reading the input or writing the output fails.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            debug!("received command: {}", line.trim());
            match Command::parse(&line) {
                Command::Select(square) => {
                    let snapshot = self.game.select(square);
                    self.write_snapshot(&snapshot)?;
                },
                Command::Move(square) => {
                    let snapshot = self.game.choose_destination(square);
                    self.write_snapshot(&snapshot)?;
                },
                Command::Click(square) => {
                    let snapshot = self.game.click(square);
                    self.write_snapshot(&snapshot)?;
                },
                Command::Promote(kind) => match self.game.choose_promotion(kind) {
                    Ok(snapshot) => self.write_snapshot(&snapshot)?,
                    Err(e) => writeln!(self.output, "info string {e}")?,
                },
                Command::Board => self.handle_board()?,
                Command::Moves => self.handle_moves()?,
                Command::NewGame => {
                    self.game.new_game();
                    let snapshot = self.game.snapshot();
                    self.write_snapshot(&snapshot)?;
                },
                Command::Quit => break,
                Command::Malformed { input, reason } => {
                    writeln!(self.output, "info string Malformed command `{input}`: {reason}")?;
                },
                Command::Unknown(command) => {
                    writeln!(self.output, "info string Unsupported command: {command}")?;
                },
            }
            self.output.flush()?;
        }
        Ok(())
    }

    /// Prints the snapshot on one line. Move flags are only present if the
    /// command completed a move.
    fn write_snapshot(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        write!(self.output, "{snapshot}")?;
        if let Some(flags) = snapshot.completed_move {
            if flags.contains(MoveFlags::CAPTURE) {
                write!(self.output, " capture")?;
            }
            if flags.contains(MoveFlags::PROMOTION) {
                write!(self.output, " promotion")?;
            }
        }
        if snapshot.winner().is_none() && self.game.checked_king().is_some() {
            write!(self.output, " check")?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    /// Prints the board grid, row 0 (Black's back rank) first.
    fn handle_board(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "{:?}", self.game.board_snapshot())?;
        Ok(())
    }

    /// Prints legal destinations of every piece of the side to move, one piece
    /// per line.
    fn handle_moves(&mut self) -> anyhow::Result<()> {
        let moves = self.game.legal_moves();
        if moves.is_empty() {
            writeln!(self.output, "info string No legal moves")?;
        }
        for (from, destinations) in &moves {
            writeln!(self.output, "{from}: {}", destinations.iter().join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::board::Board;
    use crate::chess::core::Player;

    fn run(game: Game, input: &str) -> String {
        let mut input = input.as_bytes();
        let mut output = Vec::new();
        Engine::new(game, &mut input, &mut output)
            .run()
            .expect("I/O on memory buffers does not fail");
        String::from_utf8(output).expect("output is UTF-8")
    }

    #[test]
    fn select_and_move() {
        assert_eq!(
            run(Game::new(), "select e2\nmove e4\n"),
            "selected e2: e3 e4\nturn b\n"
        );
    }

    #[test]
    fn click() {
        assert_eq!(
            run(Game::new(), "click g1\nclick f3\nclick b8\n"),
            "selected g1: f3 h3\nturn b\nselected b8: a6 c6\n"
        );
    }

    #[test]
    fn quit_stops_the_loop() {
        assert_eq!(run(Game::new(), "quit\nselect e2\n"), "");
        assert_eq!(run(Game::new(), "\n\n"), "");
    }

    #[test]
    fn board() {
        assert_eq!(
            run(Game::new(), "board\n"),
            format!("{:?}\n", Board::starting())
        );
    }

    #[test]
    fn moves() {
        let game = Game::from_board(
            Board::try_from("k7/8/8/8/8/8/8/K7").unwrap(),
            Player::White,
        )
        .unwrap();
        assert_eq!(run(game, "moves\n"), "a1: a2 b2 b1\n");
    }

    #[test]
    fn capture() {
        // The rook covers the second rank and the e-file, but nothing defends
        // it.
        let game = Game::from_board(
            Board::try_from("3k4/8/8/8/8/8/4r3/5K2").unwrap(),
            Player::White,
        )
        .unwrap();
        assert_eq!(
            run(game, "select f1\nmove e2\nselect d8\nmove d7\n"),
            "selected f1: e2 g1\nturn b capture\nselected d8: e8 c8 c7 d7 e7\nturn w\n"
        );
    }

    #[test]
    fn promotion() {
        let game = Game::from_board(
            Board::try_from("k2r4/4P3/8/8/8/8/8/7K").unwrap(),
            Player::White,
        )
        .unwrap();
        assert_eq!(
            run(game, "click e7\nclick d8\npromote k\npromote r\n"),
            "selected e7: e8 d8\n\
             promote d8\n\
             info string pawn can only be promoted to a queen, rook, bishop or knight, got King\n\
             turn b capture promotion check\n"
        );
    }

    #[test]
    fn malformed_and_unknown_commands() {
        assert_eq!(
            run(Game::new(), "select z9\ncastle\n"),
            "info string Malformed command `select z9`: file should be within 'a'..='h', got 'z'\n\
             info string Unsupported command: castle\n"
        );
    }

    #[test]
    fn new_game() {
        assert_eq!(
            run(Game::new(), "select e2\nmove e4\nnewgame\nselect e7\n"),
            "selected e2: e3 e4\nturn b\nturn w\nturn w\n"
        );
    }
}
