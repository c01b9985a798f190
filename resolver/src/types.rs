//! Canonical piece and color types for the resolver.
//! cozy-chess types stay an implementation detail of the oracles.

use serde::{Deserialize, Serialize};

/// Kind of a chess piece, independent of its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Color of a piece, or of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceColor {
    White,
    Black,
}

impl PieceKind {
    pub fn to_char_upper(self) -> char {
        self.to_char_lower().to_ascii_uppercase()
    }

    /// Normalized lowercase letter code: p, n, b, r, q, k.
    pub fn to_char_lower(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(Self::Pawn),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'r' => Some(Self::Rook),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }

    /// Letter that opens a piece move in algebraic notation (R, Q, K, N, B).
    ///
    /// Pawns have no letter: a missing letter means pawn.
    pub fn from_piece_letter(c: char) -> Option<Self> {
        Self::from_char(c).filter(|kind| *kind != Self::Pawn)
    }

    /// Pieces a pawn may promote to (q, r, b, n).
    pub fn from_promotion_char(c: char) -> Option<Self> {
        Self::from_char(c).filter(|kind| kind.is_promotion_target())
    }

    pub fn is_promotion_target(self) -> bool {
        matches!(self, Self::Knight | Self::Bishop | Self::Rook | Self::Queen)
    }
}

impl PieceColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

impl std::str::FromStr for PieceColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Self::White),
            "black" | "b" => Ok(Self::Black),
            other => Err(format!("unknown color: {}", other)),
        }
    }
}

impl From<cozy_chess::Piece> for PieceKind {
    fn from(p: cozy_chess::Piece) -> Self {
        match p {
            cozy_chess::Piece::Pawn => Self::Pawn,
            cozy_chess::Piece::Knight => Self::Knight,
            cozy_chess::Piece::Bishop => Self::Bishop,
            cozy_chess::Piece::Rook => Self::Rook,
            cozy_chess::Piece::Queen => Self::Queen,
            cozy_chess::Piece::King => Self::King,
        }
    }
}

impl From<PieceKind> for cozy_chess::Piece {
    fn from(p: PieceKind) -> Self {
        match p {
            PieceKind::Pawn => Self::Pawn,
            PieceKind::Knight => Self::Knight,
            PieceKind::Bishop => Self::Bishop,
            PieceKind::Rook => Self::Rook,
            PieceKind::Queen => Self::Queen,
            PieceKind::King => Self::King,
        }
    }
}

impl From<cozy_chess::Color> for PieceColor {
    fn from(c: cozy_chess::Color) -> Self {
        match c {
            cozy_chess::Color::White => Self::White,
            cozy_chess::Color::Black => Self::Black,
        }
    }
}

impl From<PieceColor> for cozy_chess::Color {
    fn from(c: PieceColor) -> Self {
        match c {
            PieceColor::White => Self::White,
            PieceColor::Black => Self::Black,
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char_upper())
    }
}

impl std::fmt::Display for PieceColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_letters_are_case_insensitive() {
        assert_eq!(PieceKind::from_piece_letter('N'), Some(PieceKind::Knight));
        assert_eq!(PieceKind::from_piece_letter('n'), Some(PieceKind::Knight));
        assert_eq!(PieceKind::from_piece_letter('b'), Some(PieceKind::Bishop));
        assert_eq!(PieceKind::from_piece_letter('K'), Some(PieceKind::King));
    }

    #[test]
    fn pawn_has_no_piece_letter() {
        assert_eq!(PieceKind::from_piece_letter('P'), None);
        assert_eq!(PieceKind::from_piece_letter('x'), None);
    }

    #[test]
    fn promotion_targets_exclude_king_and_pawn() {
        assert_eq!(PieceKind::from_promotion_char('Q'), Some(PieceKind::Queen));
        assert_eq!(PieceKind::from_promotion_char('n'), Some(PieceKind::Knight));
        assert_eq!(PieceKind::from_promotion_char('k'), None);
        assert_eq!(PieceKind::from_promotion_char('p'), None);
    }

    #[test]
    fn color_parses_short_and_long_names() {
        assert_eq!("White".parse::<PieceColor>(), Ok(PieceColor::White));
        assert_eq!("b".parse::<PieceColor>(), Ok(PieceColor::Black));
        assert!("red".parse::<PieceColor>().is_err());
    }
}
