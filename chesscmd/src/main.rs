//! chesscmd - play chess by typing moves the way people write them.
//!
//! With no subcommand, starts an interactive session on stdin: every line is
//! either a prefixed command (`/resign`, `/draw`, ...) or a move in UCI
//! (`g1f3`) or algebraic (`Nf3`, `exd6 e.p.`, `O-O`) notation. The `resolve`
//! subcommand shows what an input would do without playing it.
//!
//! Settings come from [`config`] (environment) and are overridden by flags.

use clap::{Parser, Subcommand};
use move_resolver::{
    format_uci_move, preview, resolve, ControlledSide, GameBoard, GameError, Preview, WireMove,
};

mod config;
mod logging;
mod session;

#[derive(Parser)]
#[command(name = "chesscmd", about = "Play chess from typed move text")]
struct Cli {
    /// Starting position as FEN, or `startpos`
    #[arg(long, global = true)]
    fen: Option<String>,

    /// Colors this session may move: white, black or both
    #[arg(long, global = true)]
    side: Option<String>,

    /// Character that marks a command, e.g. `/` in `/resign`
    #[arg(long)]
    prefix: Option<char>,

    /// Print relay messages as JSON lines instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the legal moves an input resolves to, without playing it.
    Resolve {
        /// Move text, e.g. "Nf3" or "e7e8q"
        input: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode message: {0}")]
    Json(#[from] serde_json::Error),
}

struct Settings {
    fen: String,
    side: ControlledSide,
    prefix: char,
    json: bool,
}

impl Settings {
    fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let side = match &cli.side {
            Some(side) => side.parse::<ControlledSide>().map_err(CliError::Config)?,
            None => config::get_side(),
        };
        Ok(Self {
            fen: cli.fen.clone().unwrap_or_else(config::get_start_fen),
            side,
            prefix: cli.prefix.unwrap_or_else(config::get_command_prefix),
            json: cli.json,
        })
    }

    fn board(&self) -> Result<GameBoard, CliError> {
        Ok(GameBoard::from_fen(&self.fen, self.side)?)
    }
}

fn run_resolve(settings: &Settings, input: &str) -> Result<(), CliError> {
    let board = settings.board()?;
    let moves = resolve(&board, input);

    if settings.json {
        let wire: Vec<WireMove> = moves.iter().map(WireMove::from).collect();
        println!("{}", serde_json::to_string(&wire)?);
        return Ok(());
    }

    for mv in &moves {
        println!("{}  {}", format_uci_move(mv), mv);
    }
    match preview(&board, input) {
        Preview::Nothing => println!("no legal move matches {:?}", input),
        Preview::Arrow { .. } => {}
        Preview::Squares(squares) => println!("ambiguous: {} source squares", squares.len()),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let log_dir = config::get_log_dir();
    let _guard = logging::init(log_dir.as_deref())?;

    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli)?;
    tracing::debug!(fen = %settings.fen, side = %settings.side, "settings loaded");

    match cli.command {
        Some(Commands::Resolve { input }) => run_resolve(&settings, &input)?,
        None => {
            let board = settings.board()?;
            tracing::info!("Starting session");
            let mut session = session::Session::new(board, settings.prefix, settings.json);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session.run(stdin).await?;
            tracing::info!(fen = %session.board().to_fen(), "final position");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_environment() {
        let cli = Cli::parse_from([
            "chesscmd",
            "--side",
            "black",
            "--prefix",
            "!",
            "--fen",
            "startpos",
        ]);
        let settings = Settings::from_cli(&cli).unwrap();
        assert_eq!(settings.side, ControlledSide::Black);
        assert_eq!(settings.prefix, '!');
        assert!(settings.board().is_ok());
    }

    #[test]
    fn bad_side_is_a_config_error() {
        let cli = Cli::parse_from(["chesscmd", "--side", "purple"]);
        assert!(matches!(Settings::from_cli(&cli), Err(CliError::Config(_))));
    }

    #[test]
    fn bad_fen_is_reported() {
        let cli = Cli::parse_from(["chesscmd", "--fen", "not a position"]);
        let settings = Settings::from_cli(&cli).unwrap();
        assert!(matches!(settings.board(), Err(CliError::Game(_))));
    }

    #[test]
    fn resolve_subcommand_parses() {
        let cli = Cli::parse_from(["chesscmd", "resolve", "Nf3", "--json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::Resolve { ref input }) if input == "Nf3"));
        let settings = Settings::from_cli(&cli).unwrap();
        assert!(run_resolve(&settings, "Nf3").is_ok());
    }
}
