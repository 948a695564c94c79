//! Pseudo-legal move generation: destinations that obey the movement pattern
//! of a piece and the board boundaries but ignore the safety of the mover's
//! king. [`crate::chess::legality`] filters them further.
//!
//! The generator is a pure function of the board. It does not know whose turn
//! it is and trusts the owner stored in the cell.

use arrayvec::ArrayVec;
use strum::IntoEnumIterator;

use crate::chess::board::Board;
use crate::chess::core::{Direction, Piece, PieceKind, Player, Square};

/// A queen in the center of an empty board has the most destinations: 27.
pub const MAX_DESTINATIONS: usize = 27;

/// Destination squares of a single piece. The generator never produces more
/// than [`MAX_DESTINATIONS`], so the list lives on the stack.
pub type MoveList = ArrayVec<Square, MAX_DESTINATIONS>;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
];

/// Produces the pseudo-legal destinations of the piece standing on `from`. An
/// empty square has none.
///
/// The order of the destinations is deterministic but not otherwise specified.
#[must_use]
pub fn generate_pseudo_legal(board: &Board, from: Square) -> MoveList {
    let mut moves = MoveList::new();
    let Some(piece) = board.get(from) else {
        return moves;
    };
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(&mut moves, board, from, piece.owner),
        PieceKind::Knight => generate_stepping_moves(
            &mut moves,
            board,
            from,
            piece,
            KNIGHT_OFFSETS.iter().copied(),
        ),
        PieceKind::Bishop => {
            generate_sliding_moves(&mut moves, board, from, piece, Direction::DIAGONAL.into_iter());
        },
        PieceKind::Rook => {
            generate_sliding_moves(&mut moves, board, from, piece, Direction::ORTHOGONAL.into_iter());
        },
        PieceKind::Queen => {
            generate_sliding_moves(&mut moves, board, from, piece, Direction::iter());
        },
        PieceKind::King => generate_stepping_moves(
            &mut moves,
            board,
            from,
            piece,
            Direction::iter().map(Direction::offset),
        ),
    }
    moves
}

/// A target square can be taken if it is empty or holds an opponent's piece.
fn can_land_on(board: &Board, square: Square, piece: Piece) -> bool {
    board
        .get(square)
        .map_or(true, |target| target.owner != piece.owner)
}

fn generate_pawn_moves(moves: &mut MoveList, board: &Board, from: Square, owner: Player) {
    let push = owner.push_direction();
    if let Some(single_push) = from.shift(push, 0) {
        if board.get(single_push).is_none() {
            moves.push(single_push);
            // Double push is only possible from the starting row and requires
            // both squares in front of the pawn to be empty.
            if from.row() == owner.pawns_starting_row() {
                if let Some(double_push) = single_push.shift(push, 0) {
                    if board.get(double_push).is_none() {
                        moves.push(double_push);
                    }
                }
            }
        }
    }
    // Pawns only move diagonally when capturing. There is no en passant.
    for col_delta in [-1, 1] {
        if let Some(target) = from.shift(push, col_delta) {
            if matches!(board.get(target), Some(victim) if victim.owner != owner) {
                moves.push(target);
            }
        }
    }
}

/// Knight and king moves: a fixed set of offsets, captures by displacement.
fn generate_stepping_moves(
    moves: &mut MoveList,
    board: &Board,
    from: Square,
    piece: Piece,
    offsets: impl Iterator<Item = (i8, i8)>,
) {
    for (row_delta, col_delta) in offsets {
        if let Some(target) = from.shift(row_delta, col_delta) {
            if can_land_on(board, target, piece) {
                moves.push(target);
            }
        }
    }
}

/// Bishop, rook and queen moves: each ray continues through empty squares and
/// stops at the board edge or at the first occupied square, which is included
/// only if it holds an opponent's piece.
fn generate_sliding_moves(
    moves: &mut MoveList,
    board: &Board,
    from: Square,
    piece: Piece,
    directions: impl Iterator<Item = Direction>,
) {
    for direction in directions {
        let mut current = from;
        while let Some(next) = current.shift_towards(direction) {
            match board.get(next) {
                None => moves.push(next),
                Some(blocker) => {
                    if blocker.owner != piece.owner {
                        moves.push(next);
                    }
                    break;
                },
            }
            current = next;
        }
    }
}
