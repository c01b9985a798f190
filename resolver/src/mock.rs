//! Mock BoardOracle implementation for testing

use crate::oracle::{BoardOracle, OracleError, PiecesSetup, PlacedPiece};
use crate::types::{PieceColor, PieceKind};
use cozy_chess::Square;
use std::sync::{Arc, Mutex};

type Legality = Box<dyn Fn(Square, Square) -> bool + Send + Sync>;

/// Mock board - only compiled in test mode or with the `mock` feature
///
/// Holds a fixed piece layout and answers legality through a scriptable
/// predicate, so resolver behaviour can be checked without real chess rules.
pub struct MockBoard {
    setup: PiecesSetup,
    players_move: bool,
    legality: Legality,
    /// Legality checks answered before the position "changes" under us.
    checks_before_change: Option<usize>,
    checks_done: Mutex<usize>,
    make_move_error: Option<OracleError>,
    submit_error: Option<OracleError>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    IsPlayersMove,
    PiecesSetup,
    IsLegalMove {
        from: Square,
        to: Square,
    },
    MakeMove {
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    },
    SubmitMove,
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBoard {
    /// Empty board, player to move, nothing legal.
    pub fn new() -> Self {
        Self {
            setup: Vec::new(),
            players_move: true,
            legality: Box::new(|_, _| false),
            checks_before_change: None,
            checks_done: Mutex::new(0),
            make_move_error: None,
            submit_error: None,
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Put a piece on the board
    pub fn with_piece(mut self, square: Square, color: PieceColor, kind: PieceKind) -> Self {
        self.setup.push(PlacedPiece {
            square,
            color,
            kind,
        });
        self
    }

    pub fn with_players_move(mut self, players_move: bool) -> Self {
        self.players_move = players_move;
        self
    }

    /// Answer legality with an arbitrary predicate
    pub fn with_legality<F>(mut self, f: F) -> Self
    where
        F: Fn(Square, Square) -> bool + Send + Sync + 'static,
    {
        self.legality = Box::new(f);
        self
    }

    /// Only the listed (from, to) pairs are legal
    pub fn with_legal_moves(self, moves: &[(Square, Square)]) -> Self {
        let moves = moves.to_vec();
        self.with_legality(move |from, to| moves.contains(&(from, to)))
    }

    /// After `checks` legality answers, every further check fails, as if
    /// the opponent had moved between resolution and execution.
    pub fn with_position_change_after(mut self, checks: usize) -> Self {
        self.checks_before_change = Some(checks);
        self
    }

    /// Make `make_move` fail with the given error
    pub fn with_make_move_error(mut self, error: OracleError) -> Self {
        self.make_move_error = Some(error);
        self
    }

    /// Make `submit_move` fail with the given error
    pub fn with_submit_error(mut self, error: OracleError) -> Self {
        self.submit_error = Some(error);
        self
    }

    /// Get recorded calls for verification
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Moves the board was asked to play
    pub fn made_moves(&self) -> Vec<(Square, Square, Option<PieceKind>)> {
        self.get_calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::MakeMove {
                    from,
                    to,
                    promotion,
                } => Some((from, to, promotion)),
                _ => None,
            })
            .collect()
    }

    /// Clear call history
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }

    fn record(&self, call: MockCall) {
        self.call_log.lock().unwrap().push(call);
    }
}

impl BoardOracle for MockBoard {
    fn is_players_move(&self) -> bool {
        self.record(MockCall::IsPlayersMove);
        self.players_move
    }

    fn pieces_setup(&self) -> PiecesSetup {
        self.record(MockCall::PiecesSetup);
        self.setup.clone()
    }

    fn is_legal_move(&self, from: Square, to: Square) -> bool {
        self.record(MockCall::IsLegalMove { from, to });

        let mut checks = self.checks_done.lock().unwrap();
        *checks += 1;
        if let Some(limit) = self.checks_before_change {
            if *checks > limit {
                return false;
            }
        }
        (self.legality)(from, to)
    }

    fn make_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<(), OracleError> {
        self.record(MockCall::MakeMove {
            from,
            to,
            promotion,
        });

        if let Some(ref error) = self.make_move_error {
            return Err(error.clone());
        }

        self.setup.retain(|p| p.square != to);
        if let Some(piece) = self.setup.iter_mut().find(|p| p.square == from) {
            piece.square = to;
            if let Some(promo) = promotion {
                piece.kind = promo;
            }
        }
        Ok(())
    }

    fn submit_move(&mut self) -> Result<(), OracleError> {
        self.record(MockCall::SubmitMove);
        match self.submit_error {
            Some(ref error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
