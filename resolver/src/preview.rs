//! Hints for what an input would do, without doing it.

use cozy_chess::Square;

use crate::legal::resolve;
use crate::oracle::BoardOracle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Nothing legal matches the input.
    Nothing,
    /// The input names exactly one move.
    Arrow { from: Square, to: Square },
    /// Source squares of every candidate, in resolution order.
    Squares(Vec<Square>),
}

/// Preview `input` against the current position. Read-only.
pub fn preview<B: BoardOracle + ?Sized>(board: &B, input: &str) -> Preview {
    let moves = resolve(board, input);
    match moves.as_slice() {
        [] => Preview::Nothing,
        [mv] => Preview::Arrow {
            from: mv.from,
            to: mv.to,
        },
        _ => {
            let mut squares: Vec<Square> = Vec::with_capacity(moves.len());
            for mv in &moves {
                if !squares.contains(&mv.from) {
                    squares.push(mv.from);
                }
            }
            Preview::Squares(squares)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockBoard, MockCall};
    use crate::types::PieceColor::White;
    use crate::types::PieceKind;

    #[test]
    fn single_move_is_an_arrow() {
        let board = MockBoard::new()
            .with_piece(Square::G1, White, PieceKind::Knight)
            .with_legal_moves(&[(Square::G1, Square::F3)]);
        assert_eq!(
            preview(&board, "Nf3"),
            Preview::Arrow {
                from: Square::G1,
                to: Square::F3
            }
        );
    }

    #[test]
    fn ambiguity_marks_sources() {
        let board = MockBoard::new()
            .with_piece(Square::A1, White, PieceKind::Rook)
            .with_piece(Square::H1, White, PieceKind::Rook)
            .with_legal_moves(&[(Square::A1, Square::D1), (Square::H1, Square::D1)]);
        assert_eq!(
            preview(&board, "Rd1"),
            Preview::Squares(vec![Square::A1, Square::H1])
        );
    }

    #[test]
    fn disambiguated_inputs_give_arrows() {
        let board = MockBoard::new()
            .with_piece(Square::E7, White, PieceKind::Pawn)
            .with_piece(Square::D8, White, PieceKind::Rook)
            .with_legal_moves(&[(Square::E7, Square::E8), (Square::D8, Square::E8)]);
        // "e7e8q" reads as a pawn promotion only; "Re8" picks the rook.
        assert!(matches!(preview(&board, "e7e8q"), Preview::Arrow { .. }));
        assert!(matches!(
            preview(&board, "Re8"),
            Preview::Arrow {
                from: Square::D8,
                ..
            }
        ));
    }

    #[test]
    fn nothing_for_garbage_and_board_untouched() {
        let board = MockBoard::new().with_piece(Square::G1, White, PieceKind::Knight);
        assert_eq!(preview(&board, "???"), Preview::Nothing);
        assert!(!board
            .get_calls()
            .iter()
            .any(|call| matches!(call, MockCall::MakeMove { .. })));
    }
}
