pub mod candidates;
pub mod dispatch;
pub mod error;
pub mod fen;
pub mod game;
pub mod legal;
pub mod oracle;
pub mod preview;
pub mod san;
pub mod signal;
pub mod template;
pub mod tiebreak;
pub mod types;
pub mod uci;
pub mod vocab;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use candidates::parse_move_input;
pub use dispatch::{execute_move, go, resolve_and_execute, CommandTable, Dispatched};
pub use error::{MoveError, MoveResult};
pub use game::{
    ControlledSide, GameBoard, GameError, GameResult, MoveRecord, StartPosition, Termination,
};
pub use legal::{legal_moves, resolve};
pub use oracle::{BoardOracle, OracleError, PiecesSetup, PlacedPiece};
pub use preview::{preview, Preview};
pub use signal::{MoveDetails, MoveStatus, MoveType, RelayMessage, StatusKind, WireMove};
pub use template::{MoveTemplate, PiecePattern, ResolvedMove, Templates};
pub use types::{PieceColor, PieceKind};
pub use uci::format_uci_move;
pub use vocab::SquarePattern;
