use std::io;

use anyhow::Context;
use clap::Parser;
use kingsguard::chess::board::Board;
use kingsguard::chess::core::Player;
use kingsguard::chess::game::Game;
use kingsguard::Engine;

/// Plays a game of chess between two humans over a line-based text protocol.
///
/// Logging is configured through the `RUST_LOG` environment variable and goes
/// to stderr.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    /// Piece placement part of FEN to start from instead of the initial
    /// position. The first rank is Black's back rank.
    #[arg(long)]
    position: Option<String>,
    /// Side to move: "w" or "b".
    #[arg(long, default_value = "w")]
    side: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let config = Config::parse();

    let board = match &config.position {
        Some(placement) => Board::try_from(placement.as_str())
            .with_context(|| format!("parsing --position {placement}"))?,
        None => Board::starting(),
    };
    let side = Player::try_from(config.side.as_str()).context("parsing --side")?;
    let game = Game::from_board(board, side)?;

    kingsguard::print_engine_info();
    kingsguard::log_binary_info();

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let mut engine = Engine::new(game, &mut input, &mut output);
    engine.run()
}
