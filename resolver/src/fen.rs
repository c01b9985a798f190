use cozy_chess::Board;

/// Accepted in place of a FEN for the standard starting position.
pub const STARTPOS: &str = "startpos";

/// Parse a FEN string into a Board
///
/// Surrounding whitespace is ignored and `startpos` names the standard
/// starting position.
pub fn parse_fen(fen: &str) -> Result<Board, FenError> {
    let fen = fen.trim();
    if fen.is_empty() {
        return Err(FenError::Empty);
    }
    if fen.eq_ignore_ascii_case(STARTPOS) {
        return Ok(Board::default());
    }

    fen.parse().map_err(|_| FenError::InvalidFormat(fen.to_string()))
}

/// Format a Board as a FEN string
pub fn format_fen(board: &Board) -> String {
    board.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("Empty FEN")]
    Empty,
    #[error("Invalid FEN format: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn start_position_round_trips() {
        let board = parse_fen(START).unwrap();
        assert_eq!(format_fen(&board), START);
    }

    #[test]
    fn startpos_alias() {
        let board = parse_fen(" startpos ").unwrap();
        assert_eq!(format_fen(&board), START);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(parse_fen("   "), Err(FenError::Empty)));
        assert!(matches!(
            parse_fen("not a fen"),
            Err(FenError::InvalidFormat(_))
        ));
    }
}
