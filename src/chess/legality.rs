//! Legal move filtering: a pseudo-legal move is legal if it does not leave the
//! mover's king attacked.
//!
//! This is the only legality predicate in the engine. The same filter serves
//! regular move offering and check evasions: when the side to move is in
//! check, [`legal_move_map`] simply applies it to every piece at once.

use std::collections::BTreeMap;

use crate::chess::attacks::is_attacked;
use crate::chess::board::Board;
use crate::chess::core::{PieceKind, Player, Square};
use crate::chess::movegen::{generate_pseudo_legal, MoveList};

/// Legal destinations of each piece that has at least one.
pub type LegalMoveMap = BTreeMap<Square, MoveList>;

/// Simulates the move on a copy of the board and checks whether the mover's
/// king survives it.
fn keeps_king_safe(board: &Board, from: Square, to: Square, mover: Player, king: Square) -> bool {
    let mut next = *board;
    let captured = next.make_move(from, to);
    debug_assert!(
        captured.map_or(true, |captured| captured.owner != mover),
        "pseudo-legal moves never capture friendly pieces"
    );
    let king = match board.get(from) {
        Some(piece) if piece.kind == PieceKind::King => to,
        _ => king,
    };
    !is_attacked(&next, king, mover)
}

/// Produces legal destinations of the piece on `from`.
///
/// `king` is the current square of the mover's king. A square that does not
/// hold a piece of `mover` has no legal destinations. The result is always a
/// subset of [`generate_pseudo_legal`].
#[must_use]
pub fn legal_destinations(board: &Board, from: Square, mover: Player, king: Square) -> MoveList {
    match board.get(from) {
        Some(piece) if piece.owner == mover => generate_pseudo_legal(board, from)
            .into_iter()
            .filter(|&to| keeps_king_safe(board, from, to, mover, king))
            .collect(),
        _ => MoveList::new(),
    }
}

/// Produces legal destinations for all pieces of `mover`. Pieces without legal
/// moves are omitted, so an empty map means there is no legal move at all.
#[must_use]
pub fn legal_move_map(board: &Board, mover: Player, king: Square) -> LegalMoveMap {
    board
        .pieces(mover)
        .filter_map(|(from, _)| {
            let destinations = legal_destinations(board, from, mover, king);
            (!destinations.is_empty()).then_some((from, destinations))
        })
        .collect()
}

fn has_legal_move(board: &Board, player: Player, king: Square) -> bool {
    board.pieces(player).any(|(from, _)| {
        generate_pseudo_legal(board, from)
            .into_iter()
            .any(|to| keeps_king_safe(board, from, to, player, king))
    })
}

/// Checks whether `player`, whose king stands on `king`, is checkmated: the
/// king is attacked and there is no legal move.
///
/// NOTE: Having no legal moves without being in check (stalemate) is **not**
/// distinguished from a regular position: the result is `false` and the game
/// goes on.
#[must_use]
pub fn is_checkmate(board: &Board, king: Square, player: Player) -> bool {
    is_attacked(board, king, player) && !has_legal_move(board, player, king)
}
