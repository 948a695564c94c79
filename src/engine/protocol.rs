//! Line-based protocol of the text frontend: one command per line, tokens
//! separated by whitespace.

use crate::chess::core::{Piece, PieceKind, Square};

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    Select(Square),
    Move(Square),
    Click(Square),
    Promote(PieceKind),
    Board,
    Moves,
    NewGame,
    Quit,
    /// A known command with missing or malformed arguments.
    Malformed {
        input: String,
        reason: String,
    },
    Unknown(String),
}

fn parse_square(parts: &[&str], input: &str) -> Result<Square, Command> {
    let malformed = |reason: String| Command::Malformed {
        input: input.to_string(),
        reason,
    };
    match parts {
        [_, square] => Square::try_from(*square).map_err(|e| malformed(e.to_string())),
        _ => Err(malformed(format!("expected `{} <square>`", parts[0]))),
    }
}

/// Accepts any piece letter: [`crate::chess::game::Game::choose_promotion`]
/// decides which of them a pawn can become.
fn parse_promotion(parts: &[&str], input: &str) -> Command {
    let kind = match parts {
        [_, symbol] if symbol.chars().count() == 1 => symbol
            .chars()
            .next()
            .and_then(|symbol| Piece::try_from(symbol).ok())
            .map(|piece| piece.kind),
        _ => None,
    };
    match kind {
        Some(kind) => Command::Promote(kind),
        None => Command::Malformed {
            input: input.to_string(),
            reason: "expected `promote <q|r|b|n>`".to_string(),
        },
    }
}

impl Command {
    pub(super) fn parse(input: &str) -> Self {
        let input = input.trim();
        let parts: Vec<&str> = input.split_whitespace().collect();

        if parts.is_empty() {
            return Self::Unknown(input.to_string());
        }

        let square_command = |make: fn(Square) -> Self| match parse_square(&parts, input) {
            Ok(square) => make(square),
            Err(command) => command,
        };

        match parts[0] {
            "select" => square_command(Self::Select),
            "move" => square_command(Self::Move),
            "click" => square_command(Self::Click),
            "promote" => parse_promotion(&parts, input),
            "board" => Self::Board,
            "moves" => Self::Moves,
            "newgame" => Self::NewGame,
            "quit" => Self::Quit,
            _ => Self::Unknown(input.to_string()),
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_square_commands() {
        let e2 = Square::new(6, 4);
        assert_eq!(Command::parse("select e2"), Command::Select(e2));
        assert_eq!(Command::parse("move e2\n"), Command::Move(e2));
        assert_eq!(Command::parse("  click   e2 "), Command::Click(e2));
        assert_eq!(Command::parse("select a8"), Command::Select(Square::new(0, 0)));
    }

    #[test]
    fn parse_malformed_squares() {
        assert!(matches!(Command::parse("select"), Command::Malformed { .. }));
        assert!(matches!(Command::parse("select i9"), Command::Malformed { .. }));
        assert!(matches!(Command::parse("move e2 e4"), Command::Malformed { .. }));
        assert!(matches!(
            Command::parse("click e9"),
            Command::Malformed { input, .. } if input == "click e9"
        ));
    }

    #[test]
    fn parse_promote() {
        assert_eq!(Command::parse("promote q"), Command::Promote(PieceKind::Queen));
        assert_eq!(Command::parse("promote N"), Command::Promote(PieceKind::Knight));
        // Rejected later by the game.
        assert_eq!(Command::parse("promote k"), Command::Promote(PieceKind::King));
        assert!(matches!(Command::parse("promote"), Command::Malformed { .. }));
        assert!(matches!(Command::parse("promote queen"), Command::Malformed { .. }));
        assert!(matches!(Command::parse("promote x"), Command::Malformed { .. }));
    }

    #[test]
    fn parse_simple_commands() {
        assert_eq!(Command::parse("board"), Command::Board);
        assert_eq!(Command::parse("moves"), Command::Moves);
        assert_eq!(Command::parse("newgame"), Command::NewGame);
        assert_eq!(Command::parse("quit"), Command::Quit);
    }

    #[test]
    fn unknown() {
        assert_eq!(
            Command::parse("unknown command"),
            Command::Unknown("unknown command".to_string())
        );
        assert_eq!(Command::parse(""), Command::Unknown(String::new()));
    }
}
