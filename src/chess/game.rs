//! Turn and game flow: whose turn it is, where the kings are, what is
//! selected, pending promotions and the end of the game.
//!
//! [`Game`] is driven by discrete input events coming from the frontend
//! ([`Game::select`], [`Game::choose_destination`], [`Game::choose_promotion`])
//! and never blocks: a pending promotion is an explicit [`Phase`] that waits for
//! the next event.

use std::fmt;

use anyhow::bail;
use itertools::Itertools;
use log::{debug, info, warn};
use strum::IntoEnumIterator;

use crate::chess::attacks::in_check;
use crate::chess::board::Board;
use crate::chess::core::{Piece, PieceKind, Player, Promotion, Square};
use crate::chess::legality::{is_checkmate, legal_destinations, legal_move_map, LegalMoveMap};
use crate::chess::movegen::MoveList;

bitflags::bitflags! {
    /// Side effects of a completed move the frontend might want to react to
    /// (e.g. by playing a different sound).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MoveFlags: u8 {
        /// The move took an opponent's piece.
        const CAPTURE = 0b01;
        /// A pawn reached the farthest row and was replaced by another piece.
        const PROMOTION = 0b10;
    }
}

/// Current stage of the turn.
#[allow(variant_size_differences)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the side to move to pick a piece.
    NoSelection,
    /// A piece is picked and these are the squares it can legally move to.
    PieceSelected {
        #[allow(missing_docs)]
        square: Square,
        #[allow(missing_docs)]
        destinations: MoveList,
    },
    /// A pawn of `player` reached the farthest row on `square` and the turn
    /// can not be completed until the frontend picks what it becomes.
    AwaitingPromotion {
        #[allow(missing_docs)]
        square: Square,
        #[allow(missing_docs)]
        player: Player,
    },
    /// The opponent of `winner` is checkmated. No more moves are accepted.
    GameOver {
        #[allow(missing_docs)]
        winner: Player,
    },
}

/// Locations of both kings. They are kept in sync with the board after every
/// move so that check detection does not need to search for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct KingSquares {
    white: Square,
    black: Square,
}

impl KingSquares {
    const fn get(self, player: Player) -> Square {
        match player {
            Player::White => self.white,
            Player::Black => self.black,
        }
    }

    fn set(&mut self, player: Player, square: Square) {
        match player {
            Player::White => self.white = square,
            Player::Black => self.black = square,
        }
    }
}

/// Read-only view of the game state handed to the frontend after each event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    #[allow(missing_docs)]
    pub phase: Phase,
    #[allow(missing_docs)]
    pub side_to_move: Player,
    /// Flags of the move completed by the event that produced this snapshot,
    /// [`None`] if that event did not complete a move.
    pub completed_move: Option<MoveFlags>,
    /// Number of completed moves (plies) so far.
    pub plies: u32,
}

impl Snapshot {
    /// Legal destinations of the selected piece, empty when nothing is
    /// selected.
    #[must_use]
    pub fn destinations(&self) -> &[Square] {
        match &self.phase {
            Phase::PieceSelected { destinations, .. } => destinations.as_slice(),
            _ => &[],
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            Phase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }
}

impl fmt::Display for Snapshot {
    /// One-line human-readable summary, e.g. "selected e2: e3 e4".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.phase {
            Phase::NoSelection => write!(f, "turn {}", self.side_to_move),
            Phase::PieceSelected {
                square,
                destinations,
            } => write!(f, "selected {square}: {}", destinations.iter().join(" ")),
            Phase::AwaitingPromotion { square, .. } => write!(f, "promote {square}"),
            Phase::GameOver { winner } => write!(f, "checkmate: {} wins", winner.name()),
        }
    }
}

/// The game owns the board and all of the turn state. It is the only place
/// where the board is mutated.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    side_to_move: Player,
    kings: KingSquares,
    phase: Phase,
    /// Flags of the move completed by the latest event.
    completed_move: Option<MoveFlags>,
    /// Flags of the move waiting for a promotion choice.
    pending: MoveFlags,
    plies: u32,
}

impl Game {
    /// Starts a new game from the initial position with White to move.
    #[must_use]
    pub fn new() -> Self {
        let board = Board::starting();
        Self {
            board,
            side_to_move: Player::White,
            kings: KingSquares {
                white: Square::new(7, 3),
                black: Square::new(0, 3),
            },
            phase: Phase::NoSelection,
            completed_move: None,
            pending: MoveFlags::empty(),
            plies: 0,
        }
    }

    /// Starts a game from an arbitrary position.
    ///
    /// # Errors
    ///
    /// The board has to contain exactly one king of each player and the king of
    /// the side that just moved can not be in check.
    pub fn from_board(board: Board, side_to_move: Player) -> anyhow::Result<Self> {
        let mut kings = KingSquares {
            white: Square::new(0, 0),
            black: Square::new(0, 0),
        };
        for player in Player::iter() {
            let king = Piece::new(player, PieceKind::King);
            let count = board.count(king);
            let Some(square) = board.find_king(player).filter(|_| count == 1) else {
                bail!(
                    "expected 1 {} king, got {count}",
                    player.name().to_lowercase()
                );
            };
            kings.set(player, square);
        }
        let opponent = side_to_move.opponent();
        if in_check(&board, kings.get(opponent), opponent) {
            bail!(
                "{} king on {} is in check with {} to move",
                opponent.name().to_lowercase(),
                kings.get(opponent),
                side_to_move.name().to_lowercase()
            );
        }
        let phase = if is_checkmate(&board, kings.get(side_to_move), side_to_move) {
            Phase::GameOver {
                winner: side_to_move.opponent(),
            }
        } else {
            Phase::NoSelection
        };
        Ok(Self {
            board,
            side_to_move,
            kings,
            phase,
            completed_move: None,
            pending: MoveFlags::empty(),
            plies: 0,
        })
    }

    /// Throws away the current game and starts over from the initial position.
    pub fn new_game(&mut self) {
        info!("starting a new game");
        *self = Self::new();
    }

    /// Picks the piece on `square`.
    ///
    /// The selection only succeeds if the square holds a piece of the side to
    /// move that has at least one legal destination; otherwise nothing is
    /// selected. Selecting another piece while one is already selected
    /// replaces the selection. Ignored while a promotion is pending or after
    /// the game is over.
    pub fn select(&mut self, square: Square) -> Snapshot {
        self.completed_move = None;
        if matches!(
            self.phase,
            Phase::AwaitingPromotion { .. } | Phase::GameOver { .. }
        ) {
            warn!("ignoring selection of {square} in {:?}", self.phase);
            return self.snapshot();
        }
        self.phase = match self.selection(square) {
            Some(destinations) => Phase::PieceSelected {
                square,
                destinations,
            },
            None => Phase::NoSelection,
        };
        self.snapshot()
    }

    /// Moves the selected piece to `square` if it is one of its legal
    /// destinations. Any other square drops the selection.
    pub fn choose_destination(&mut self, square: Square) -> Snapshot {
        self.completed_move = None;
        let Phase::PieceSelected {
            square: from,
            destinations,
        } = &self.phase
        else {
            warn!("ignoring destination {square}: no piece is selected");
            return self.snapshot();
        };
        if destinations.contains(&square) {
            let from = *from;
            self.make_move(from, square);
        } else {
            debug!("{square} is not a legal destination of {from}, deselecting");
            self.phase = Phase::NoSelection;
        }
        self.snapshot()
    }

    /// Replaces the pawn waiting for promotion with a piece of `kind` and
    /// completes the turn.
    ///
    /// # Errors
    ///
    /// Pawns can only become a queen, rook, bishop or knight. Any other kind
    /// is rejected and the game keeps waiting for a valid choice.
    pub fn choose_promotion(&mut self, kind: PieceKind) -> anyhow::Result<Snapshot> {
        self.completed_move = None;
        let Phase::AwaitingPromotion { square, player } = self.phase else {
            warn!("ignoring promotion to {kind:?}: no promotion is pending");
            return Ok(self.snapshot());
        };
        let promotion = Promotion::try_from(kind)?;
        self.board
            .set(square, Some(Piece::new(player, PieceKind::from(promotion))));
        info!("{} pawn on {square} promoted to {promotion:?}", player.name());
        self.complete_turn(self.pending | MoveFlags::PROMOTION);
        Ok(self.snapshot())
    }

    /// Handles a click on `square` the way a board UI would: moves the
    /// selected piece (or drops the selection) if a piece is selected and
    /// selects otherwise.
    pub fn click(&mut self, square: Square) -> Snapshot {
        if matches!(self.phase, Phase::PieceSelected { .. }) {
            self.choose_destination(square)
        } else {
            self.select(square)
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase.clone(),
            side_to_move: self.side_to_move,
            completed_move: self.completed_move,
            plies: self.plies,
        }
    }

    /// Returns a copy of the board for rendering.
    #[must_use]
    pub const fn board_snapshot(&self) -> Board {
        self.board
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// Current square of the king of `player`.
    #[must_use]
    pub const fn king_square(&self, player: Player) -> Square {
        self.kings.get(player)
    }

    /// Returns the square of the side to move's king if it is in check.
    #[must_use]
    pub fn checked_king(&self) -> Option<Square> {
        let king = self.kings.get(self.side_to_move);
        in_check(&self.board, king, self.side_to_move).then_some(king)
    }

    /// All legal moves of the side to move.
    #[must_use]
    pub fn legal_moves(&self) -> LegalMoveMap {
        legal_move_map(
            &self.board,
            self.side_to_move,
            self.kings.get(self.side_to_move),
        )
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    /// Computes legal destinations of the piece on `square` if it belongs to
    /// the side to move and has any.
    fn selection(&self, square: Square) -> Option<MoveList> {
        let us = self.side_to_move;
        if !matches!(self.board.get(square), Some(piece) if piece.owner == us) {
            debug!("ignoring selection of {square}: no piece of {} there", us.name());
            return None;
        }
        let king = self.kings.get(us);
        let destinations = if in_check(&self.board, king, us) {
            legal_move_map(&self.board, us, king)
                .remove(&square)
                .unwrap_or_default()
        } else {
            legal_destinations(&self.board, square, us, king)
        };
        if destinations.is_empty() {
            debug!("ignoring selection of {square}: no legal moves");
            return None;
        }
        debug!("selected {square}: {}", destinations.iter().join(" "));
        Some(destinations)
    }

    fn make_move(&mut self, from: Square, to: Square) {
        let us = self.side_to_move;
        let captured = self.board.make_move(from, to);
        let flags = if captured.is_some() {
            MoveFlags::CAPTURE
        } else {
            MoveFlags::empty()
        };
        match self.board.get(to) {
            Some(piece) if piece.kind == PieceKind::King => self.kings.set(us, to),
            Some(piece) if piece.kind == PieceKind::Pawn && to.row() == us.promotion_row() => {
                info!("{} pawn reached {to}, waiting for promotion", us.name());
                self.pending = flags;
                self.phase = Phase::AwaitingPromotion {
                    square: to,
                    player: us,
                };
                return;
            },
            _ => (),
        }
        info!("{} moved {from} to {to}", us.name());
        self.complete_turn(flags);
    }

    fn complete_turn(&mut self, flags: MoveFlags) {
        for player in Player::iter() {
            debug_assert_eq!(self.board.find_king(player), Some(self.kings.get(player)));
        }
        self.completed_move = Some(flags);
        self.pending = MoveFlags::empty();
        self.plies += 1;
        let previous = self.side_to_move;
        self.side_to_move = previous.opponent();
        let king = self.kings.get(self.side_to_move);
        self.phase = if is_checkmate(&self.board, king, self.side_to_move) {
            info!("checkmate: {} wins", previous.name());
            Phase::GameOver { winner: previous }
        } else {
            Phase::NoSelection
        };
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
