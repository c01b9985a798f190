//! Error types for move resolution and execution

use thiserror::Error;

use crate::oracle::OracleError;
use crate::template::ResolvedMove;

pub type MoveResult<T> = Result<T, MoveError>;

/// Why a command did not turn into a move.
///
/// Every variant is recoverable: the caller reports it and waits for the
/// next input.
#[derive(Error, Debug)]
pub enum MoveError {
    /// No grammar matched; the board was not consulted.
    #[error("Incorrect move: {0}")]
    Unparsed(String),

    #[error("Not the player's turn")]
    NotPlayersTurn,

    /// The input parsed, but no reading of it is legal here.
    #[error("Incorrect move: {0}")]
    NoLegalMatch(String),

    #[error("Ambiguous move: {input} ({} candidates)", candidates.len())]
    Ambiguous {
        input: String,
        candidates: Vec<ResolvedMove>,
    },

    /// The move stopped being legal between resolution and execution.
    #[error("Illegal move: {0}")]
    IllegalMove(ResolvedMove),

    /// The board refused a move that passed the legality re-check.
    #[error("Illegal move: {mv}: {source}")]
    Rejected {
        mv: ResolvedMove,
        #[source]
        source: OracleError,
    },
}

impl MoveError {
    /// Input was rejected before or during resolution, as opposed to a move
    /// that failed while being played.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Unparsed(_) | Self::NoLegalMatch(_))
    }

    pub fn is_execution_race(&self) -> bool {
        matches!(self, Self::IllegalMove(_) | Self::Rejected { .. })
    }
}
