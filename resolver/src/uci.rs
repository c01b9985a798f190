//! UCI (coordinate) notation: "e2e4", "e7e8q".

use crate::template::{MoveTemplate, PiecePattern, ResolvedMove, Templates};
use crate::types::PieceKind;
use crate::vocab::{format_square, parse_square, SquarePattern};

/// Parse coordinate notation into at most one template.
///
/// Whitespace and dashes are dropped first, so "e2-e4" and "e2 e4" are read
/// like "e2e4". The first two squares are taken as source and destination and
/// a fifth character, if any, as the promotion letter. Anything after the fifth
/// character is ignored.
pub fn parse_uci(input: &str) -> Templates {
    let filtered: Vec<char> = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    let square_at = |start: usize| -> Option<cozy_chess::Square> {
        let text: String = filtered.get(start..start + 2)?.iter().collect();
        parse_square(&text)
    };

    let mut templates = Templates::new();
    let (Some(from), Some(to)) = (square_at(0), square_at(2)) else {
        return templates;
    };

    // A fifth character that is not q/r/b/n carries no promotion; the
    // resolver then drops back-rank pawn moves for lacking one.
    let promotion = filtered
        .get(4)
        .copied()
        .and_then(PieceKind::from_promotion_char);

    templates.push(
        MoveTemplate::new(PiecePattern::Any, SquarePattern::exact(from), to)
            .with_promotion(promotion),
    );
    templates
}

/// Format a resolved move in UCI notation (e.g., "e2e4", "e7e8q")
pub fn format_uci_move(mv: &ResolvedMove) -> String {
    let mut s = format!("{}{}", format_square(mv.from), format_square(mv.to));
    if let Some(promo) = mv.promotion {
        s.push(promo.to_char_lower());
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use cozy_chess::Square;

    #[test]
    fn parses_plain_coordinates() {
        let templates = parse_uci("e2e4");
        assert_eq!(templates.len(), 1);
        let t = templates[0];
        assert_eq!(t.piece, PiecePattern::Any);
        assert_eq!(t.from, SquarePattern::exact(Square::E2));
        assert_eq!(t.to, Square::E4);
        assert_eq!(t.promotion, None);
    }

    #[test]
    fn strips_dashes_and_spaces() {
        assert_eq!(parse_uci("e2-e4")[0].to, Square::E4);
        assert_eq!(parse_uci(" g1 f3 ")[0].from, SquarePattern::exact(Square::G1));
    }

    #[test]
    fn reads_promotion_letter() {
        let templates = parse_uci("e7e8q");
        assert_eq!(templates[0].promotion, Some(PieceKind::Queen));
        assert_eq!(parse_uci("a2a1N")[0].promotion, Some(PieceKind::Knight));
    }

    #[test]
    fn ignores_noise_after_fifth_character() {
        let templates = parse_uci("e7e8q+!!");
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].promotion, Some(PieceKind::Queen));
    }

    #[test]
    fn non_promotion_fifth_character_is_dropped() {
        let templates = parse_uci("e2e4+");
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].promotion, None);
    }

    #[test]
    fn rejects_algebraic_input() {
        assert!(parse_uci("Nf3").is_empty());
        assert!(parse_uci("e4").is_empty());
        assert!(parse_uci("O-O").is_empty());
        assert!(parse_uci("E2E4").is_empty());
        assert!(parse_uci("").is_empty());
    }

    #[test]
    fn test_format_uci_move() {
        let mv = ResolvedMove {
            piece: PieceKind::Pawn,
            from: Square::E2,
            to: Square::E4,
            promotion: None,
        };
        assert_eq!(format_uci_move(&mv), "e2e4");
    }

    #[test]
    fn test_format_uci_move_with_promotion() {
        let mv = ResolvedMove {
            piece: PieceKind::Pawn,
            from: Square::E7,
            to: Square::E8,
            promotion: Some(PieceKind::Queen),
        };
        assert_eq!(format_uci_move(&mv), "e7e8q");
    }
}
