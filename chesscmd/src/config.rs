//! Configuration for the chesscmd session.
//!
//! Every value has a compile-time default and can be overridden at runtime via
//! a dedicated environment variable. Command-line flags take precedence over
//! both (see `main.rs`).

use std::path::PathBuf;

use move_resolver::fen::STARTPOS;
use move_resolver::{CommandTable, ControlledSide};

/// Default starting position.
const DEFAULT_START_FEN: &str = STARTPOS;

/// Default set of colors the session may move.
const DEFAULT_SIDE: ControlledSide = ControlledSide::Both;

/// Default command prefix, as in "/resign".
const DEFAULT_COMMAND_PREFIX: char = CommandTable::DEFAULT_PREFIX;

/// Get the FEN the session starts from.
///
/// Priority:
/// 1. `CHESSCMD_START_FEN` env variable if set
/// 2. the standard starting position as fallback
pub fn get_start_fen() -> String {
    if let Ok(fen) = std::env::var("CHESSCMD_START_FEN") {
        return fen;
    }

    DEFAULT_START_FEN.to_string()
}

/// Get the side the session controls.
///
/// Priority:
/// 1. `CHESSCMD_SIDE` env variable if set (falls back to default if the value
///    is not one of white, black, both)
/// 2. both colors as fallback
pub fn get_side() -> ControlledSide {
    if let Ok(side) = std::env::var("CHESSCMD_SIDE") {
        return side.parse().unwrap_or(DEFAULT_SIDE);
    }

    DEFAULT_SIDE
}

/// Get the command prefix.
///
/// Priority:
/// 1. first character of `CHESSCMD_COMMAND_PREFIX` if set and non-empty
/// 2. `/` as fallback
pub fn get_command_prefix() -> char {
    std::env::var("CHESSCMD_COMMAND_PREFIX")
        .ok()
        .and_then(|prefix| prefix.trim().chars().next())
        .unwrap_or(DEFAULT_COMMAND_PREFIX)
}

/// Get the directory for rolling log files.
///
/// `None` when `CHESSCMD_LOG_DIR` is unset or empty; logs then go to stderr.
pub fn get_log_dir() -> Option<PathBuf> {
    std::env::var("CHESSCMD_LOG_DIR")
        .ok()
        .filter(|dir| !dir.trim().is_empty())
        .map(PathBuf::from)
}
