//! Narrowing templates to legal moves against a board oracle.

use std::collections::HashSet;

use crate::candidates::parse_move_input;
use crate::oracle::{BoardOracle, PlacedPiece};
use crate::template::{MoveTemplate, ResolvedMove};
use crate::tiebreak::break_ties;
use crate::types::PieceKind;
use crate::vocab::is_back_rank;

/// Resolve `input` against the current position.
///
/// Parses, filters by legality, drops repeated moves and applies the
/// tie-break table. The result may hold zero, one or several moves.
pub fn resolve<B: BoardOracle + ?Sized>(board: &B, input: &str) -> Vec<ResolvedMove> {
    let templates = parse_move_input(input);
    let moves = resolve_templates(board, &templates);
    tracing::debug!(
        input,
        templates = templates.len(),
        candidates = moves.len(),
        "resolved move input"
    );
    moves
}

/// [`legal_moves`] followed by de-duplication and the tie-break table.
pub fn resolve_templates<B: BoardOracle + ?Sized>(
    board: &B,
    templates: &[MoveTemplate],
) -> Vec<ResolvedMove> {
    break_ties(dedupe(legal_moves(board, templates)))
}

/// Every legal move matching one of `templates`, in template order and then
/// in the order the board lists its pieces.
///
/// Nothing is returned when it is not the player's move. The piece setup is
/// fetched again for each template.
pub fn legal_moves<B: BoardOracle + ?Sized>(
    board: &B,
    templates: &[MoveTemplate],
) -> Vec<ResolvedMove> {
    if templates.is_empty() || !board.is_players_move() {
        return Vec::new();
    }

    let mut moves = Vec::new();
    for template in templates {
        let setup = board.pieces_setup();
        moves.extend(
            setup
                .iter()
                .filter(|piece| matches_template(board, template, piece))
                .map(|piece| resolved(template, piece)),
        );
    }
    moves
}

fn matches_template<B: BoardOracle + ?Sized>(
    board: &B,
    template: &MoveTemplate,
    piece: &PlacedPiece,
) -> bool {
    // Promotions must name their piece.
    if piece.kind == PieceKind::Pawn && is_back_rank(template.to) && template.promotion.is_none()
    {
        return false;
    }

    template.piece.matches(piece.kind)
        && template.from.matches(piece.square)
        && piece.square != template.to
        && board.is_legal_move(piece.square, template.to)
}

fn resolved(template: &MoveTemplate, piece: &PlacedPiece) -> ResolvedMove {
    let promotes = piece.kind == PieceKind::Pawn && is_back_rank(template.to);
    ResolvedMove {
        piece: piece.kind,
        from: piece.square,
        to: template.to,
        promotion: template.promotion.filter(|_| promotes),
    }
}

/// Drop repeated `(from, to, promotion)` entries, keeping the first.
pub fn dedupe(moves: Vec<ResolvedMove>) -> Vec<ResolvedMove> {
    let mut seen = HashSet::new();
    moves.into_iter().filter(|mv| seen.insert(mv.key())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockBoard, MockCall};
    use crate::types::PieceColor::{Black, White};
    use crate::vocab::SquarePattern;
    use cozy_chess::{File, Square};

    fn two_rooks() -> MockBoard {
        MockBoard::new()
            .with_piece(Square::A1, White, PieceKind::Rook)
            .with_piece(Square::H1, White, PieceKind::Rook)
            .with_piece(Square::E8, Black, PieceKind::King)
            .with_legal_moves(&[(Square::A1, Square::D1), (Square::H1, Square::D1)])
    }

    #[test]
    fn knight_move_resolves_to_its_source() {
        let board = MockBoard::new()
            .with_piece(Square::B1, White, PieceKind::Knight)
            .with_piece(Square::G1, White, PieceKind::Knight)
            .with_legal_moves(&[(Square::G1, Square::F3)]);

        let moves = resolve(&board, "Nf3");
        assert_eq!(
            moves,
            vec![ResolvedMove {
                piece: PieceKind::Knight,
                from: Square::G1,
                to: Square::F3,
                promotion: None,
            }]
        );
    }

    #[test]
    fn two_rooks_reaching_same_square() {
        let moves = resolve(&two_rooks(), "Rd1");
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[0].from, Square::A1);
        assert_eq!(moves[1].from, Square::H1);
    }

    #[test]
    fn file_disambiguation_picks_one_rook() {
        let moves = resolve(&two_rooks(), "Rhd1");
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].from, Square::H1);
    }

    #[test]
    fn uci_wildcard_reports_actual_piece() {
        let moves = resolve(&two_rooks(), "a1d1");
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].piece, PieceKind::Rook);
    }

    #[test]
    fn nothing_when_not_players_move() {
        let board = two_rooks().with_players_move(false);
        assert!(resolve(&board, "Rd1").is_empty());
        assert!(!board
            .get_calls()
            .iter()
            .any(|call| matches!(call, MockCall::IsLegalMove { .. })));
    }

    #[test]
    fn empty_templates_skip_the_board() {
        let board = two_rooks();
        assert!(legal_moves(&board, &[]).is_empty());
        assert!(board.get_calls().is_empty());
    }

    #[test]
    fn setup_is_fetched_per_template() {
        let board = MockBoard::new()
            .with_piece(Square::E1, White, PieceKind::King)
            .with_legal_moves(&[(Square::E1, Square::G1)]);
        let _ = resolve(&board, "O-O");
        let fetches = board
            .get_calls()
            .into_iter()
            .filter(|call| *call == MockCall::PiecesSetup)
            .count();
        assert_eq!(fetches, 2);
    }

    #[test]
    fn untagged_promotion_is_not_a_candidate() {
        let board = MockBoard::new()
            .with_piece(Square::E7, White, PieceKind::Pawn)
            .with_legal_moves(&[(Square::E7, Square::E8)]);

        assert!(resolve(&board, "e8").is_empty());
        assert!(resolve(&board, "e7e8").is_empty());

        let moves = resolve(&board, "e8=Q");
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].promotion, Some(PieceKind::Queen));

        let moves = resolve(&board, "e7e8n");
        assert_eq!(moves[0].promotion, Some(PieceKind::Knight));
    }

    #[test]
    fn promotion_letter_on_ordinary_move_is_dropped() {
        let board = MockBoard::new()
            .with_piece(Square::E2, White, PieceKind::Pawn)
            .with_legal_moves(&[(Square::E2, Square::E4)]);
        let moves = resolve(&board, "e2e4q");
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].promotion, None);
    }

    #[test]
    fn legality_filter_never_adds_moves() {
        let board = MockBoard::new()
            .with_piece(Square::B1, White, PieceKind::Knight)
            .with_legality(|_, _| true);
        let template = MoveTemplate::new(
            PieceKind::Knight,
            SquarePattern::new(Some(File::G), None),
            Square::F3,
        );
        assert!(legal_moves(&board, &[template]).is_empty());
    }

    #[test]
    fn repeated_moves_collapse() {
        // UCI and the bishop reading both land on b2-c3.
        let board = MockBoard::new()
            .with_piece(Square::B2, White, PieceKind::Bishop)
            .with_legal_moves(&[(Square::B2, Square::C3)]);
        let templates = parse_move_input("b2c3+");
        assert_eq!(legal_moves(&board, &templates).len(), 2);
        assert_eq!(resolve(&board, "b2c3+").len(), 1);
    }

    #[test]
    fn pawn_wins_over_bishop() {
        let board = MockBoard::new()
            .with_piece(Square::B3, White, PieceKind::Pawn)
            .with_piece(Square::E2, White, PieceKind::Bishop)
            .with_piece(Square::C4, Black, PieceKind::Knight)
            .with_legal_moves(&[(Square::B3, Square::C4), (Square::E2, Square::C4)]);
        let moves = resolve(&board, "bc4");
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].piece, PieceKind::Pawn);
        assert_eq!(moves[0].from, Square::B3);
    }

    #[test]
    fn resolution_is_repeatable() {
        let board = two_rooks();
        assert_eq!(resolve(&board, "Rd1"), resolve(&board, "Rd1"));
    }
}
