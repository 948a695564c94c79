//! Check detection on top of the pseudo-legal move generator.
//!
//! A square is attacked when any piece of the opposing side could move to it
//! according to [`generate_pseudo_legal`]. This is a full board scan per call,
//! which is fine for interactive play and not meant for search.
//!
//! NOTE: Pawn captures double as pawn attacks. A pawn can only "move"
//! diagonally onto a square occupied by an opponent's piece, so an empty square
//! diagonally in front of a pawn is **not** considered attacked. In practice
//! this only matters for queries about empty squares: the legality filter
//! always asks about the square the king actually occupies.

use crate::chess::board::Board;
use crate::chess::core::{Player, Square};
use crate::chess::movegen::generate_pseudo_legal;

/// Checks whether any piece of `defender`'s opponent can reach `square`.
#[must_use]
pub fn is_attacked(board: &Board, square: Square, defender: Player) -> bool {
    board
        .pieces(defender.opponent())
        .any(|(from, _)| generate_pseudo_legal(board, from).contains(&square))
}

/// Checks whether the king of `player` standing on `king_square` is attacked.
#[must_use]
pub fn in_check(board: &Board, king_square: Square, player: Player) -> bool {
    is_attacked(board, king_square, player)
}
