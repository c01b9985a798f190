//! Messages describing what happened to an input, for logs and relays.
//!
//! The shapes follow the relay protocol: `{"type": "MOVE_STATUS", "data": ...}`.

use serde::{Deserialize, Serialize};

use crate::dispatch::Dispatched;
use crate::error::{MoveError, MoveResult};
use crate::template::ResolvedMove;
use crate::types::PieceKind;
use crate::vocab::format_square;

/// Envelope for everything sent over a relay channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelayMessage {
    /// Announces who is on this end of the channel.
    Role(String),
    MoveStatus(MoveStatus),
    /// A move the other side just played.
    OpponentMove(MoveDetails),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Executed,
    Command,
    Ambiguous,
    Invalid,
    NotPlayersTurn,
    IllegalMove,
}

/// Move in wire form, squares as names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMove {
    pub piece: PieceKind,
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

impl From<&ResolvedMove> for WireMove {
    fn from(mv: &ResolvedMove) -> Self {
        Self {
            piece: mv.piece,
            from: format_square(mv.from),
            to: format_square(mv.to),
            promotion: mv.promotion,
        }
    }
}

/// Outcome of one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveStatus {
    pub input: String,
    pub status: StatusKind,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub played: Option<WireMove>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<WireMove>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MoveStatus {
    pub fn from_result(input: &str, result: &MoveResult<Dispatched>) -> Self {
        let mut status = Self {
            input: input.to_string(),
            status: StatusKind::Executed,
            success: result.is_ok(),
            played: None,
            command: None,
            candidates: Vec::new(),
            message: result.as_ref().err().map(|e| e.to_string()),
        };

        match result {
            Ok(Dispatched::Move(mv)) => status.played = Some(mv.into()),
            Ok(Dispatched::Command(name)) => {
                status.status = StatusKind::Command;
                status.command = Some(name.clone());
            }
            Err(MoveError::Ambiguous { candidates, .. }) => {
                status.status = StatusKind::Ambiguous;
                status.candidates = candidates.iter().map(WireMove::from).collect();
            }
            Err(MoveError::NotPlayersTurn) => status.status = StatusKind::NotPlayersTurn,
            Err(MoveError::Unparsed(_) | MoveError::NoLegalMatch(_)) => {
                status.status = StatusKind::Invalid
            }
            Err(MoveError::IllegalMove(mv) | MoveError::Rejected { mv, .. }) => {
                status.status = StatusKind::IllegalMove;
                status.candidates = vec![mv.into()];
            }
        }
        status
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveType {
    Normal,
    Capture,
    EnPassant,
    Castling,
    Promotion,
}

/// A move as it was played, with its effect on the opponent's king.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDetails {
    pub piece: PieceKind,
    pub move_type: MoveType,
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
    pub check: bool,
    pub checkmate: bool,
}
