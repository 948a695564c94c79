//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};
use std::ops::Not;

use anyhow::bail;
use itertools::Itertools;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// A square of the board addressed by its row and column.
///
/// Row 0 is Black's back rank and row 7 is White's back rank, column 0 is the
/// a-file. This matches the way the board is laid out on the screen: rows go
/// from top to bottom, columns from left to right.
///
/// ```
/// use kingsguard::chess::core::Square;
///
/// let square = Square::new(6, 4);
/// assert_eq!(square.to_string(), "e2");
/// assert_eq!(Square::try_from("e2").unwrap(), square);
/// ```
///
/// Squares can not be constructed outside of the board: [`Square::new`]
/// panics and the fallible conversions return an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Creates a square from its row and column.
    ///
    /// # Panics
    ///
    /// Off-board coordinates are a programmer error: the frontend is expected
    /// to map its input onto the 8x8 grid before reaching the engine. Use
    /// [`Square::try_from`] for unchecked input.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(
            row < BOARD_WIDTH && col < BOARD_WIDTH,
            "square should be within the 8x8 board"
        );
        Self { row, col }
    }

    /// Row of the square: 0 is Black's back rank, 7 is White's.
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Column of the square: 0 is the a-file.
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Iterates over all squares row by row, starting at `(0, 0)`.
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE).map(|index| Self::new(index / BOARD_WIDTH, index % BOARD_WIDTH))
    }

    /// Returns the square `row_delta` rows and `col_delta` columns away or
    /// [`None`] if it falls off the board.
    #[must_use]
    pub fn shift(self, row_delta: i8, col_delta: i8) -> Option<Self> {
        let row = u8::try_from(i16::from(self.row) + i16::from(row_delta)).ok()?;
        let col = u8::try_from(i16::from(self.col) + i16::from(col_delta)).ok()?;
        (row < BOARD_WIDTH && col < BOARD_WIDTH).then_some(Self { row, col })
    }

    /// Moves one step in the given direction.
    #[must_use]
    pub fn shift_towards(self, direction: Direction) -> Option<Self> {
        let (row_delta, col_delta) = direction.offset();
        self.shift(row_delta, col_delta)
    }
}

impl TryFrom<(i8, i8)> for Square {
    type Error = anyhow::Error;

    /// Creates a square from possibly off-board coordinates.
    ///
    /// # Errors
    ///
    /// If either of the coordinates is outside 0..[`BOARD_WIDTH`] range.
    fn try_from(coordinates: (i8, i8)) -> anyhow::Result<Self> {
        let (row, col) = coordinates;
        match (u8::try_from(row), u8::try_from(col)) {
            (Ok(row), Ok(col)) if row < BOARD_WIDTH && col < BOARD_WIDTH => Ok(Self { row, col }),
            _ => bail!("square should be within 0..BOARD_WIDTH, got ({row}, {col})"),
        }
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    /// Parses the algebraic name of the square (e.g. "e2").
    fn try_from(square: &str) -> anyhow::Result<Self> {
        let Some((file, rank)) = square.chars().collect_tuple() else {
            bail!(
                "square should be two-char, got {square} with {} chars",
                square.chars().count()
            );
        };
        let col = match file {
            'a'..='h' => file as u8 - b'a',
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        };
        let row = match rank {
            '1'..='8' => b'8' - rank as u8,
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        };
        Ok(Self { row, col })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.col) as char,
            BOARD_WIDTH - self.row
        )
    }
}

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Row delta of a single pawn push: White pawns move towards row 0, Black
    /// pawns towards row 7.
    pub(super) const fn push_direction(self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// Row the pawns start on and may advance two squares from.
    pub(super) const fn pawns_starting_row(self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    /// The farthest row from the player's pawns' start, where they promote.
    #[must_use]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Self::White => 0,
            Self::Black => BOARD_WIDTH - 1,
        }
    }

    /// Capitalized name of the player, used in human-readable messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
        }
    }
}

impl Not for Player {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl TryFrom<&str> for Player {
    type Error = anyhow::Error;

    fn try_from(player: &str) -> anyhow::Result<Self> {
        match player {
            "w" => Ok(Self::White),
            "b" => Ok(Self::Black),
            _ => bail!("player should be 'w' or 'b', got '{player}'"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::White => 'w',
            Self::Black => 'b',
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl From<Promotion> for PieceKind {
    fn from(promotion: Promotion) -> Self {
        match promotion {
            Promotion::Queen => Self::Queen,
            Promotion::Rook => Self::Rook,
            Promotion::Bishop => Self::Bishop,
            Promotion::Knight => Self::Knight,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        })
    }
}

/// Represents a specific piece owned by a player. Pieces have no identity
/// beyond the cell they occupy: moving a piece relocates this value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub kind: PieceKind,
}

impl Piece {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(owner: Player, kind: PieceKind) -> Self {
        Self { owner, kind }
    }
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    /// Parses FEN piece symbol: uppercase for White, lowercase for Black.
    fn try_from(symbol: char) -> anyhow::Result<Self> {
        let kind = match symbol.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => bail!("piece symbol should be within \"KQRBNPkqrbnp\", got '{symbol}'"),
        };
        let owner = if symbol.is_ascii_uppercase() {
            Player::White
        } else {
            Player::Black
        };
        Ok(Self { owner, kind })
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.kind {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        };
        f.write_char(match self.owner {
            // White player: uppercase symbols.
            Player::White => symbol.to_ascii_uppercase(),
            // Black player: lowercase symbols.
            Player::Black => symbol,
        })
    }
}

/// A pawn can be promoted to a queen, rook, bishop or a knight: this is a
/// subset of [`PieceKind`].
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumIter)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl TryFrom<PieceKind> for Promotion {
    type Error = anyhow::Error;

    fn try_from(kind: PieceKind) -> anyhow::Result<Self> {
        match kind {
            PieceKind::Queen => Ok(Self::Queen),
            PieceKind::Rook => Ok(Self::Rook),
            PieceKind::Bishop => Ok(Self::Bishop),
            PieceKind::Knight => Ok(Self::Knight),
            PieceKind::King | PieceKind::Pawn => {
                bail!("pawn can only be promoted to a queen, rook, bishop or knight, got {kind:?}")
            },
        }
    }
}

impl TryFrom<char> for Promotion {
    type Error = anyhow::Error;

    fn try_from(symbol: char) -> anyhow::Result<Self> {
        match symbol.to_ascii_lowercase() {
            'q' => Ok(Self::Queen),
            'r' => Ok(Self::Rook),
            'b' => Ok(Self::Bishop),
            'n' => Ok(Self::Knight),
            _ => bail!("promotion should be one of 'q', 'r', 'b', 'n', got '{symbol}'"),
        }
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", PieceKind::from(*self))
    }
}

/// Directions on the board from a perspective of White player: "up" is
/// towards row 0 (Black's back rank).
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::EnumIter)]
pub enum Direction {
    /// Also known as north-west.
    UpLeft,
    /// Also known as north.
    Up,
    /// Also known as north-east.
    UpRight,
    /// Also known as east.
    Right,
    /// Also known as west.
    Left,
    /// Also known as south-west.
    DownLeft,
    /// Also known as south.
    Down,
    /// Also known as south-east.
    DownRight,
}

impl Direction {
    /// Rook rays.
    pub const ORTHOGONAL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];
    /// Bishop rays.
    pub const DIAGONAL: [Self; 4] = [Self::UpLeft, Self::UpRight, Self::DownLeft, Self::DownRight];

    /// `(row, column)` delta of a single step.
    #[must_use]
    pub const fn offset(self) -> (i8, i8) {
        match self {
            Self::UpLeft => (-1, -1),
            Self::Up => (-1, 0),
            Self::UpRight => (-1, 1),
            Self::Right => (0, 1),
            Self::Left => (0, -1),
            Self::DownLeft => (1, -1),
            Self::Down => (1, 0),
            Self::DownRight => (1, 1),
        }
    }
}
