//! BoardOracle trait abstraction for board implementations

use cozy_chess::Square;

use crate::types::{PieceColor, PieceKind};

/// A piece standing on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedPiece {
    pub square: Square,
    pub color: PieceColor,
    pub kind: PieceKind,
}

/// Snapshot of every piece on the board, in the oracle's order.
pub type PiecesSetup = Vec<PlacedPiece>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("Illegal move: {0}")]
    IllegalMove(String),
    #[error("Promotion piece required for {0}")]
    MissingPromotion(String),
    #[error("Game is over")]
    GameOver,
    #[error("Move submission failed: {0}")]
    Submit(String),
}

/// Authority on board state and chess rules.
///
/// Implemented by [`crate::GameBoard`] and, for tests, `MockBoard`.
/// The resolver only reads through this trait and mutates through
/// [`BoardOracle::make_move`].
pub trait BoardOracle {
    /// Whether the controlled side may move now
    fn is_players_move(&self) -> bool;

    /// Current piece layout. Callers must not keep it across moves.
    fn pieces_setup(&self) -> PiecesSetup;

    /// Whether the piece on `from` may legally move to `to`
    fn is_legal_move(&self, from: Square, to: Square) -> bool;

    /// Play a move. Callers check [`BoardOracle::is_legal_move`] first.
    fn make_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<(), OracleError>;

    /// Confirm a move that the board holds as pending (correspondence games
    /// ask for an explicit submit). Most boards have nothing to do.
    fn submit_move(&mut self) -> Result<(), OracleError> {
        Ok(())
    }
}
