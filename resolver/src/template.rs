//! Structural readings of move text, before and after consulting the board.

use cozy_chess::Square;
use smallvec::SmallVec;

use crate::types::PieceKind;
use crate::vocab::{format_square, SquarePattern};

/// Which piece kinds a template may refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PiecePattern {
    /// Coordinate input never names a piece.
    Any,
    Kind(PieceKind),
}

impl PiecePattern {
    pub fn matches(self, kind: PieceKind) -> bool {
        match self {
            Self::Any => true,
            Self::Kind(expected) => expected == kind,
        }
    }
}

impl From<PieceKind> for PiecePattern {
    fn from(kind: PieceKind) -> Self {
        Self::Kind(kind)
    }
}

impl std::fmt::Display for PiecePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => write!(f, "."),
            Self::Kind(kind) => write!(f, "{}", kind.to_char_lower()),
        }
    }
}

/// Board-agnostic reading of a move string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveTemplate {
    pub piece: PiecePattern,
    pub from: SquarePattern,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveTemplate {
    pub fn new(piece: impl Into<PiecePattern>, from: SquarePattern, to: Square) -> Self {
        Self {
            piece: piece.into(),
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(mut self, promotion: Option<PieceKind>) -> Self {
        self.promotion = promotion;
        self
    }
}

impl std::fmt::Display for MoveTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.piece, self.from, format_square(self.to))?;
        if let Some(promo) = self.promotion {
            write!(f, "={}", promo.to_char_upper())?;
        }
        Ok(())
    }
}

/// Templates produced from one input; most inputs give one or two.
pub type Templates = SmallVec<[MoveTemplate; 4]>;

/// A template narrowed to one concrete, oracle-approved move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedMove {
    /// Kind of the piece standing on `from`.
    pub piece: PieceKind,
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl ResolvedMove {
    /// Identity used for de-duplication: the piece kind follows from `from`.
    pub fn key(&self) -> (Square, Square, Option<PieceKind>) {
        (self.from, self.to, self.promotion)
    }
}

impl std::fmt::Display for ResolvedMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}-{}",
            self.piece,
            format_square(self.from),
            format_square(self.to)
        )?;
        if let Some(promo) = self.promotion {
            write!(f, "={}", promo.to_char_upper())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cozy_chess::File;

    #[test]
    fn any_pattern_matches_all_kinds() {
        assert!(PiecePattern::Any.matches(PieceKind::Queen));
        assert!(PiecePattern::Any.matches(PieceKind::Pawn));
        assert!(PiecePattern::Kind(PieceKind::Rook).matches(PieceKind::Rook));
        assert!(!PiecePattern::Kind(PieceKind::Rook).matches(PieceKind::Queen));
    }

    #[test]
    fn template_display_shows_open_components() {
        let template = MoveTemplate::new(
            PieceKind::Pawn,
            SquarePattern::new(Some(File::E), None),
            Square::D8,
        )
        .with_promotion(Some(PieceKind::Queen));
        assert_eq!(template.to_string(), "pe.d8=Q");
    }

    #[test]
    fn resolved_move_display() {
        let mv = ResolvedMove {
            piece: PieceKind::Knight,
            from: Square::G1,
            to: Square::F3,
            promotion: None,
        };
        assert_eq!(mv.to_string(), "Ng1-f3");
    }
}
