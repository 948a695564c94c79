//! Implementation of the chess rules: board, move generation, check detection
//! and the flow of the game.

pub mod attacks;
pub mod board;
pub mod core;
pub mod game;
pub mod legality;
pub mod movegen;
