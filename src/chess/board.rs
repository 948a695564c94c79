//! Square-centric ("mailbox") [`Board`] representation: an 8x8 grid where each
//! cell is either empty or holds a [`Piece`].
//!
//! The board does not know anything about the rules: it only stores pieces.
//! Validity of the moves is the job of [`crate::chess::movegen`] and
//! [`crate::chess::legality`].

use std::fmt::{self, Write};

use anyhow::bail;

use crate::chess::core::{Piece, PieceKind, Player, Square, BOARD_WIDTH};

/// Contents of a single square. Empty squares are explicit [`None`] values.
pub type Cell = Option<Piece>;

/// Initial piece placement: kings start on the d-file and queens on the e-file
/// for both players.
const STARTING_PLACEMENT: &str = "rnbkqbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBKQBNR";

/// Piece placement on the board. Row 0 is Black's back rank.
///
/// The board is a plain value: copying it produces an independent snapshot,
/// which is what the legality checks rely on when simulating moves.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; BOARD_WIDTH as usize]; BOARD_WIDTH as usize],
}

impl Board {
    /// Creates a board without any pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: [[None; BOARD_WIDTH as usize]; BOARD_WIDTH as usize],
        }
    }

    /// Creates the starting position.
    ///
    /// ```
    /// use kingsguard::chess::board::Board;
    ///
    /// assert_eq!(
    ///     Board::starting().to_string(),
    ///     "rnbkqbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBKQBNR"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        match Self::try_from(STARTING_PLACEMENT) {
            Ok(board) => board,
            Err(e) => unreachable!("starting placement is valid: {e}"),
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn get(&self, square: Square) -> Cell {
        self.cells[square.row() as usize][square.col() as usize]
    }

    /// Overwrites the cell: putting a piece on an occupied square replaces
    /// the old one.
    pub fn set(&mut self, square: Square, cell: Cell) {
        self.cells[square.row() as usize][square.col() as usize] = cell;
    }

    #[allow(missing_docs)]
    pub fn clear(&mut self, square: Square) {
        self.set(square, None);
    }

    /// Moves whatever is on `from` to `to` and returns the captured piece, if
    /// any. There are no legality checks: this is the primitive both the game
    /// and the move simulation are built upon.
    pub fn make_move(&mut self, from: Square, to: Square) -> Cell {
        let moved = self.get(from);
        debug_assert!(moved.is_some(), "moving a piece from empty square {from}");
        let captured = self.get(to);
        self.set(to, moved);
        self.clear(from);
        captured
    }

    /// Iterates over the pieces owned by `player` together with their squares.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(move |square| match self.get(square) {
            Some(piece) if piece.owner == player => Some((square, piece)),
            _ => None,
        })
    }

    /// Returns the square of the first king of `player` found on the board.
    #[must_use]
    pub fn find_king(&self, player: Player) -> Option<Square> {
        self.pieces(player)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }

    /// Counts the number of pieces of the given kind and owner.
    #[must_use]
    pub fn count(&self, piece: Piece) -> usize {
        self.pieces(piece.owner)
            .filter(|(_, candidate)| *candidate == piece)
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl TryFrom<&str> for Board {
    type Error = anyhow::Error;

    /// Parses the piece placement part of [Forsyth-Edwards Notation]. The
    /// first rank in the input is row 0 (Black's back rank).
    ///
    /// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    fn try_from(placement: &str) -> anyhow::Result<Self> {
        let mut result = Self::empty();
        let mut rows = 0u8;
        for rank_fen in placement.split('/') {
            if rows == BOARD_WIDTH {
                bail!("incorrect placement: expected {BOARD_WIDTH} ranks, got {placement}");
            }
            let mut col = 0u8;
            for symbol in rank_fen.chars() {
                if col >= BOARD_WIDTH {
                    bail!("incorrect placement: rank {rank_fen} exceeds {BOARD_WIDTH} squares");
                }
                match symbol {
                    '0' => bail!("increment can not be 0"),
                    '1'..='8' => col += symbol as u8 - b'0',
                    _ => {
                        result.set(Square::new(rows, col), Some(Piece::try_from(symbol)?));
                        col += 1;
                    },
                }
            }
            if col != BOARD_WIDTH {
                bail!(
                    "incorrect placement: rank size should be exactly {BOARD_WIDTH}, got {rank_fen} of length {col}"
                );
            }
            rows += 1;
        }
        if rows != BOARD_WIDTH {
            bail!("incorrect placement: there should be {BOARD_WIDTH} ranks, got {placement}");
        }
        Ok(result)
    }
}

impl fmt::Display for Board {
    /// Prints the piece placement in FEN format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_WIDTH {
            let mut empty_squares = 0u8;
            for col in 0..BOARD_WIDTH {
                if let Some(piece) = self.get(Square::new(row, col)) {
                    if empty_squares != 0 {
                        write!(f, "{empty_squares}")?;
                        empty_squares = 0;
                    }
                    write!(f, "{piece}")?;
                } else {
                    empty_squares += 1;
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if row != BOARD_WIDTH - 1 {
                const RANK_SEPARATOR: char = '/';
                f.write_char(RANK_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, FEN algebraic
    /// symbol for piece), row 0 first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_WIDTH {
            for col in 0..BOARD_WIDTH {
                match self.get(Square::new(row, col)) {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
                if col != BOARD_WIDTH - 1 {
                    f.write_str(SQUARE_SEPARATOR)?;
                }
            }
            if row != BOARD_WIDTH - 1 {
                f.write_str(LINE_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn starting_board() {
        let board = Board::starting();
        assert_eq!(
            format!("{board:?}"),
            "r n b k q b n r\n\
             p p p p p p p p\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             P P P P P P P P\n\
             R N B K Q B N R"
        );
        assert_eq!(board.find_king(Player::White), Some(Square::new(7, 3)));
        assert_eq!(board.find_king(Player::Black), Some(Square::new(0, 3)));
        assert_eq!(board.pieces(Player::White).count(), 16);
        assert_eq!(board.pieces(Player::Black).count(), 16);
        assert_eq!(board.count(Piece::new(Player::White, PieceKind::Pawn)), 8);
        assert_eq!(board.count(Piece::new(Player::Black, PieceKind::King)), 1);
        for row in 2..6 {
            for col in 0..BOARD_WIDTH {
                assert_eq!(board.get(Square::new(row, col)), None);
            }
        }
    }

    #[test]
    fn empty_board() {
        assert_eq!(
            format!("{:?}", Board::empty()),
            ". . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . ."
        );
        assert_eq!(Board::empty().to_string(), "8/8/8/8/8/8/8/8");
        assert_eq!(Board::empty().find_king(Player::White), None);
    }

    #[test]
    fn placement_round_trip() {
        for placement in [
            "rnbkqbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBKQBNR",
            "4r3/8/8/8/8/1b5b/r7/4K3",
            "k7/4P3/8/8/8/8/8/7K",
            "8/8/8/3p4/4K3/8/8/k7",
        ] {
            assert_eq!(Board::try_from(placement).unwrap().to_string(), placement);
        }
    }

    #[test]
    fn incorrect_placements() {
        // Not enough ranks.
        assert!(Board::try_from("8/8/8/8/8/8/8").is_err());
        // Too many ranks.
        assert!(Board::try_from("8/8/8/8/8/8/8/8/8").is_err());
        // Short rank.
        assert!(Board::try_from("7/8/8/8/8/8/8/8").is_err());
        // Long rank.
        assert!(Board::try_from("8p/8/8/8/8/8/8/8").is_err());
        assert!(Board::try_from("44p/8/8/8/8/8/8/8").is_err());
        // Zero increment.
        assert!(Board::try_from("08/8/8/8/8/8/8/8").is_err());
        // Unknown piece.
        assert!(Board::try_from("7x/8/8/8/8/8/8/8").is_err());
        assert!(Board::try_from("").is_err());
    }

    #[test]
    fn get_and_set() {
        let mut board = Board::empty();
        let square = Square::new(3, 5);
        let knight = Piece::new(Player::Black, PieceKind::Knight);
        board.set(square, Some(knight));
        assert_eq!(board.get(square), Some(knight));
        assert_eq!(board.pieces(Player::Black).collect::<Vec<_>>(), vec![(square, knight)]);
        board.clear(square);
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn make_move_and_take_back() {
        let before = Board::try_from("4k3/8/8/3p4/4Q3/8/8/4K3").unwrap();
        let from = Square::try_from("e4").unwrap();
        let to = Square::try_from("d5").unwrap();

        let mut board = before;
        let captured = board.make_move(from, to);
        assert_eq!(captured, Some(Piece::new(Player::Black, PieceKind::Pawn)));
        assert_eq!(board.get(from), None);
        assert_eq!(board.get(to), Some(Piece::new(Player::White, PieceKind::Queen)));
        // The copy is not affected.
        assert_ne!(board, before);

        // Syntactic inverse: move the piece back and restore the captured one.
        assert_eq!(board.make_move(to, from), None);
        board.set(to, captured);
        assert_eq!(board, before);
    }
}
