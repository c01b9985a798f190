//! Explicit exceptions for notation that is ambiguous by nature.
//!
//! This is a lookup table, not a heuristic: a rule fires only when the set of
//! moving piece kinds equals its key exactly. Everything else is left for the
//! caller to report as ambiguous.

use std::collections::BTreeSet;

use crate::template::ResolvedMove;
use crate::types::PieceKind;

struct TieBreak {
    kinds: &'static [PieceKind],
    keep: PieceKind,
}

/// "bc4" reads as a b-pawn capture and as a bishop move; the pawn wins.
const RULES: &[TieBreak] = &[TieBreak {
    kinds: &[PieceKind::Pawn, PieceKind::Bishop],
    keep: PieceKind::Pawn,
}];

/// Collapse known-ambiguous candidate sets to the first move of the kept
/// kind. Other sets pass through.
pub fn break_ties(moves: Vec<ResolvedMove>) -> Vec<ResolvedMove> {
    let present: BTreeSet<PieceKind> = moves.iter().map(|mv| mv.piece).collect();

    let Some(rule) = RULES
        .iter()
        .find(|rule| rule.kinds.iter().copied().collect::<BTreeSet<_>>() == present)
    else {
        return moves;
    };

    tracing::debug!(keep = %rule.keep, "breaking tie between {:?}", present);
    moves.into_iter().find(|mv| mv.piece == rule.keep).into_iter().collect()
}
