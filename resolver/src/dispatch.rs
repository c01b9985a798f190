//! Top-level handling of one line of user input.

use std::collections::BTreeMap;

use crate::candidates::parse_move_input;
use crate::error::{MoveError, MoveResult};
use crate::legal::resolve_templates;
use crate::oracle::BoardOracle;
use crate::template::ResolvedMove;

/// Side effect bound to a command name, e.g. resign or offer a draw.
pub type CommandAction = Box<dyn Fn() + Send + Sync>;

/// Named zero-argument actions reachable through a prefix ("/resign").
pub struct CommandTable {
    prefix: char,
    actions: BTreeMap<String, CommandAction>,
}

impl CommandTable {
    pub const DEFAULT_PREFIX: char = '/';

    pub fn new() -> Self {
        Self::with_prefix(Self::DEFAULT_PREFIX)
    }

    pub fn with_prefix(prefix: char) -> Self {
        Self {
            prefix,
            actions: BTreeMap::new(),
        }
    }

    /// Register `action` under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, action: F) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.actions.insert(name.into(), Box::new(action));
        self
    }

    pub fn with<F>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.register(name, action);
        self
    }

    pub fn prefix(&self) -> char {
        self.prefix
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    /// Run the command `input` names, if it names one. Returns the name.
    pub fn run(&self, input: &str) -> Option<&str> {
        let name = input.trim().strip_prefix(self.prefix)?;
        let (name, action) = self.actions.get_key_value(name)?;
        action();
        Some(name.as_str())
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandTable")
            .field("prefix", &self.prefix)
            .field("commands", &self.actions.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// What a successfully handled input did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    Move(ResolvedMove),
    Command(String),
}

/// Handle one line of input: run a command, or resolve and play a move.
///
/// Flow:
/// 1. A prefixed, registered command name runs its action.
/// 2. When it is not the player's move nothing else happens.
/// 3. The input is parsed and resolved against the board.
/// 4. Exactly one candidate is played; zero or several are reported.
pub fn resolve_and_execute<B: BoardOracle + ?Sized>(
    board: &mut B,
    commands: &CommandTable,
    input: &str,
) -> MoveResult<Dispatched> {
    if let Some(name) = commands.run(input) {
        tracing::info!(command = name, "command executed");
        return Ok(Dispatched::Command(name.to_string()));
    }

    if !board.is_players_move() {
        return Err(MoveError::NotPlayersTurn);
    }

    let templates = parse_move_input(input);
    if templates.is_empty() {
        return Err(MoveError::Unparsed(input.to_string()));
    }

    let mut moves = resolve_templates(&*board, &templates);
    match moves.len() {
        0 => Err(MoveError::NoLegalMatch(input.to_string())),
        1 => {
            let mv = moves.remove(0);
            execute_move(board, mv)?;
            Ok(Dispatched::Move(mv))
        }
        _ => Err(MoveError::Ambiguous {
            input: input.to_string(),
            candidates: moves,
        }),
    }
}

/// [`resolve_and_execute`] reduced to "was the input consumed".
///
/// Failures are logged, never raised.
pub fn go<B: BoardOracle + ?Sized>(board: &mut B, commands: &CommandTable, input: &str) -> bool {
    match resolve_and_execute(board, commands, input) {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(input, "{}", e);
            false
        }
    }
}

/// Play `mv`, re-checking legality first since the position may have moved
/// on since it was resolved.
pub fn execute_move<B: BoardOracle + ?Sized>(board: &mut B, mv: ResolvedMove) -> MoveResult<()> {
    if !board.is_legal_move(mv.from, mv.to) {
        tracing::warn!(%mv, "move no longer legal");
        return Err(MoveError::IllegalMove(mv));
    }

    board
        .make_move(mv.from, mv.to, mv.promotion)
        .map_err(|source| MoveError::Rejected { mv, source })?;

    if let Err(e) = board.submit_move() {
        tracing::warn!(%mv, "move submission failed: {}", e);
    }

    tracing::info!(%mv, "move played");
    Ok(())
}
