use cozy_chess::{Board, File, GameStatus, Move, Piece, Square};

use crate::oracle::{BoardOracle, OracleError, PiecesSetup, PlacedPiece};
use crate::signal::{MoveDetails, MoveType};
use crate::types::{PieceColor, PieceKind};
use crate::vocab::{file_char, format_square, rank_char};

/// Which colors this board lets the player move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlledSide {
    White,
    Black,
    /// Both colors, e.g. analysis or a local two-player session.
    #[default]
    Both,
}

impl ControlledSide {
    pub fn controls(self, color: PieceColor) -> bool {
        match self {
            Self::White => color == PieceColor::White,
            Self::Black => color == PieceColor::Black,
            Self::Both => true,
        }
    }
}

impl std::str::FromStr for ControlledSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "both" => Ok(Self::Both),
            other => other
                .parse::<PieceColor>()
                .map(|color| match color {
                    PieceColor::White => Self::White,
                    PieceColor::Black => Self::Black,
                })
                .map_err(|_| format!("unknown side: {}", other)),
        }
    }
}

impl std::fmt::Display for ControlledSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::White => "white",
            Self::Black => "black",
            Self::Both => "both",
        })
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Checkmate,
    Resignation,
    Stalemate,
    FiftyMoveRule,
    Agreement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    Won {
        winner: PieceColor,
        by: Termination,
    },
    Drawn {
        by: Termination,
    },
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ongoing => f.write_str("ongoing"),
            Self::Won { winner, by } => write!(f, "{} wins by {:?}", winner, by),
            Self::Drawn { by } => write!(f, "draw by {:?}", by),
        }
    }
}

/// A move as it was played.
#[derive(Debug, Clone)]
pub struct MoveRecord {
    /// The move in cozy-chess encoding (castling is king-takes-rook).
    pub mv: Move,
    pub color: PieceColor,
    pub details: MoveDetails,
    /// Standard Algebraic Notation
    pub san: String,
    /// FEN after this move
    pub fen: String,
}

/// Starting position of the game
#[derive(Debug, Clone)]
pub enum StartPosition {
    Standard,
    Fen(String),
}

/// [`BoardOracle`] backed by a cozy-chess position.
///
/// Moves are addressed with standard squares: castling is e1g1 / e1c1, and
/// the king-takes-own-rook encoding cozy-chess uses internally is refused.
#[derive(Debug, Clone)]
pub struct GameBoard {
    position: Board,
    start_position: StartPosition,
    history: Vec<MoveRecord>,
    side: ControlledSide,
    /// Set when the game ended off the board (resignation, agreed draw).
    concluded: Option<GameResult>,
    draw_offer: Option<PieceColor>,
}

impl GameBoard {
    /// Standard starting position
    pub fn new(side: ControlledSide) -> Self {
        Self::with_position(Board::default(), StartPosition::Standard, side)
    }

    pub fn from_fen(fen: &str, side: ControlledSide) -> Result<Self, GameError> {
        let position = crate::fen::parse_fen(fen)?;
        Ok(Self::with_position(
            position,
            StartPosition::Fen(fen.trim().to_string()),
            side,
        ))
    }

    fn with_position(position: Board, start_position: StartPosition, side: ControlledSide) -> Self {
        Self {
            position,
            start_position,
            history: Vec::new(),
            side,
            concluded: None,
            draw_offer: None,
        }
    }

    pub fn position(&self) -> &Board {
        &self.position
    }

    pub fn side(&self) -> ControlledSide {
        self.side
    }

    pub fn set_side(&mut self, side: ControlledSide) {
        self.side = side;
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.position.side_to_move().into()
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    pub fn to_fen(&self) -> String {
        crate::fen::format_fen(&self.position)
    }

    /// All legal moves in cozy-chess encoding
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        self.position.generate_moves(|mvs| {
            moves.extend(mvs);
            false
        });
        moves
    }

    pub fn result(&self) -> GameResult {
        if let Some(result) = self.concluded {
            return result;
        }
        match self.position.status() {
            GameStatus::Ongoing => GameResult::Ongoing,
            GameStatus::Won => GameResult::Won {
                winner: self.side_to_move().opponent(),
                by: Termination::Checkmate,
            },
            GameStatus::Drawn if self.position.halfmove_clock() >= 100 => GameResult::Drawn {
                by: Termination::FiftyMoveRule,
            },
            GameStatus::Drawn => GameResult::Drawn {
                by: Termination::Stalemate,
            },
        }
    }

    pub fn is_over(&self) -> bool {
        self.result() != GameResult::Ongoing
    }

    pub fn resign(&mut self, color: PieceColor) -> Result<GameResult, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let result = GameResult::Won {
            winner: color.opponent(),
            by: Termination::Resignation,
        };
        tracing::info!(%color, "resigned");
        self.concluded = Some(result);
        Ok(result)
    }

    /// Offer a draw on behalf of `color`. Returns true when this accepts the
    /// opponent's standing offer, which ends the game.
    pub fn offer_draw(&mut self, color: PieceColor) -> Result<bool, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if self.draw_offer == Some(color.opponent()) {
            tracing::info!(%color, "draw agreed");
            self.draw_offer = None;
            self.concluded = Some(GameResult::Drawn {
                by: Termination::Agreement,
            });
            return Ok(true);
        }
        tracing::info!(%color, "draw offered");
        self.draw_offer = Some(color);
        Ok(false)
    }

    pub fn draw_offer(&self) -> Option<PieceColor> {
        self.draw_offer
    }

    /// Take back the last move. Not available once the game was decided off
    /// the board.
    pub fn undo(&mut self) -> Result<MoveRecord, GameError> {
        if self.concluded.is_some() {
            return Err(GameError::GameOver);
        }
        let record = self.history.pop().ok_or(GameError::NothingToUndo)?;
        self.rebuild_position()?;
        self.draw_offer = None;
        Ok(record)
    }

    /// Rebuild position from start + history
    fn rebuild_position(&mut self) -> Result<(), GameError> {
        let mut board = match &self.start_position {
            StartPosition::Standard => Board::default(),
            StartPosition::Fen(fen) => crate::fen::parse_fen(fen)?,
        };

        for record in &self.history {
            board
                .try_play(record.mv)
                .map_err(|_| GameError::CorruptHistory(record.san.clone()))?;
        }

        self.position = board;
        Ok(())
    }

    /// Legal moves from `from` to `to`, one per promotion piece when the
    /// move promotes.
    fn moves_between(&self, from: Square, to: Square) -> Vec<Move> {
        let legal = self.legal_moves();
        let requested = Move {
            from,
            to,
            promotion: None,
        };
        let target = to_board_move(&self.position, requested, &legal);
        if target == requested && is_own_rook_capture(&self.position, requested) {
            return Vec::new();
        }
        legal
            .into_iter()
            .filter(|mv| mv.from == target.from && mv.to == target.to)
            .collect()
    }

    fn play(&mut self, mv: Move) -> Result<MoveRecord, OracleError> {
        let before = self.position.clone();
        let piece = before
            .piece_on(mv.from)
            .ok_or_else(|| OracleError::IllegalMove(format_square(mv.from)))?;
        let color: PieceColor = before.side_to_move().into();
        let legal = self.legal_moves();

        self.position.play_unchecked(mv);

        let check = !self.position.checkers().is_empty();
        let checkmate = matches!(self.position.status(), GameStatus::Won);
        let mut san = generate_san(&before, mv, piece, &legal);
        if checkmate {
            san.push('#');
        } else if check {
            san.push('+');
        }

        let record = MoveRecord {
            mv,
            color,
            details: move_details(&before, mv, piece, check, checkmate),
            san,
            fen: self.to_fen(),
        };
        self.history.push(record.clone());
        self.draw_offer = None;
        Ok(record)
    }
}

impl Default for GameBoard {
    fn default() -> Self {
        Self::new(ControlledSide::default())
    }
}

impl BoardOracle for GameBoard {
    fn is_players_move(&self) -> bool {
        !self.is_over() && self.side.controls(self.side_to_move())
    }

    fn pieces_setup(&self) -> PiecesSetup {
        Square::ALL
            .iter()
            .filter_map(|&square| {
                let kind = self.position.piece_on(square)?;
                let color = self.position.color_on(square)?;
                Some(PlacedPiece {
                    square,
                    color: color.into(),
                    kind: kind.into(),
                })
            })
            .collect()
    }

    fn is_legal_move(&self, from: Square, to: Square) -> bool {
        !self.is_over() && !self.moves_between(from, to).is_empty()
    }

    fn make_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<(), OracleError> {
        if self.is_over() {
            return Err(OracleError::GameOver);
        }
        let name = format!("{}{}", format_square(from), format_square(to));
        if !self.is_players_move() {
            return Err(OracleError::IllegalMove(name));
        }

        let candidates = self.moves_between(from, to);
        let promotes = candidates.iter().any(|mv| mv.promotion.is_some());
        let mv = match (promotes, promotion) {
            (true, None) => return Err(OracleError::MissingPromotion(name)),
            (true, Some(kind)) => {
                let piece = Piece::from(kind);
                candidates.into_iter().find(|mv| mv.promotion == Some(piece))
            }
            (false, _) => candidates.into_iter().next(),
        }
        .ok_or(OracleError::IllegalMove(name))?;

        let record = self.play(mv)?;
        tracing::debug!(san = %record.san, fen = %record.fen, "position updated");
        Ok(())
    }
}

/// Map standard castling squares (e1g1) to the king-takes-rook move
/// cozy-chess expects (e1h1), when such a move is legal. Anything else is
/// returned unchanged.
pub fn to_board_move(board: &Board, mv: Move, legal_moves: &[Move]) -> Move {
    let is_back_rank = matches!(
        mv.from.rank(),
        cozy_chess::Rank::First | cozy_chess::Rank::Eighth
    );
    let is_king = board.piece_on(mv.from) == Some(Piece::King);

    if !(is_king && is_back_rank && mv.from.file() == File::E && mv.promotion.is_none())
        || mv.to.rank() != mv.from.rank()
    {
        return mv;
    }

    let rook_file = match mv.to.file() {
        File::G => File::H,
        File::C => File::A,
        _ => return mv,
    };
    let converted = Move {
        from: mv.from,
        to: Square::new(rook_file, mv.from.rank()),
        promotion: None,
    };

    if legal_moves.contains(&converted) {
        converted
    } else {
        mv
    }
}

fn is_own_rook_capture(board: &Board, mv: Move) -> bool {
    board.piece_on(mv.from) == Some(Piece::King)
        && board.color_on(mv.to).is_some()
        && board.color_on(mv.to) == board.color_on(mv.from)
}

fn is_castling(board: &Board, mv: Move) -> bool {
    is_own_rook_capture(board, mv)
}

fn is_en_passant(board: &Board, mv: Move, piece: Piece) -> bool {
    piece == Piece::Pawn && mv.from.file() != mv.to.file() && board.piece_on(mv.to).is_none()
}

/// Destination of the king as written in standard notation.
fn king_destination(mv: Move) -> Square {
    let file = if (mv.to.file() as usize) > (mv.from.file() as usize) {
        File::G
    } else {
        File::C
    };
    Square::new(file, mv.from.rank())
}

fn move_details(
    board: &Board,
    mv: Move,
    piece: Piece,
    check: bool,
    checkmate: bool,
) -> MoveDetails {
    let castling = is_castling(board, mv);
    let en_passant = is_en_passant(board, mv, piece);
    let move_type = if castling {
        MoveType::Castling
    } else if en_passant {
        MoveType::EnPassant
    } else if mv.promotion.is_some() {
        MoveType::Promotion
    } else if board.piece_on(mv.to).is_some() {
        MoveType::Capture
    } else {
        MoveType::Normal
    };
    let to = if castling { king_destination(mv) } else { mv.to };

    MoveDetails {
        piece: piece.into(),
        move_type,
        from: format_square(mv.from),
        to: format_square(to),
        promotion: mv.promotion.map(PieceKind::from),
        check,
        checkmate,
    }
}

/// SAN for `mv` played from `board`, without the check suffix
fn generate_san(board: &Board, mv: Move, piece: Piece, legal: &[Move]) -> String {
    if is_castling(board, mv) {
        return if king_destination(mv).file() == File::G {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        };
    }

    let capture = board.piece_on(mv.to).is_some() || is_en_passant(board, mv, piece);
    let mut san = String::new();

    match piece {
        Piece::Pawn => {
            if capture {
                san.push(file_char(mv.from.file()));
            }
        }
        _ => {
            san.push(PieceKind::from(piece).to_char_upper());
            san.push_str(&disambiguation(board, mv, piece, legal));
        }
    }

    if capture {
        san.push('x');
    }
    san.push_str(&format_square(mv.to));

    if let Some(promo) = mv.promotion {
        san.push('=');
        san.push(PieceKind::from(promo).to_char_upper());
    }

    san
}

fn disambiguation(board: &Board, mv: Move, piece: Piece, legal: &[Move]) -> String {
    let rivals: Vec<Square> = legal
        .iter()
        .filter(|other| {
            other.to == mv.to && other.from != mv.from && board.piece_on(other.from) == Some(piece)
        })
        .map(|other| other.from)
        .collect();

    if rivals.is_empty() || piece == Piece::King {
        return String::new();
    }
    if rivals.iter().all(|sq| sq.file() != mv.from.file()) {
        return file_char(mv.from.file()).to_string();
    }
    if rivals.iter().all(|sq| sq.rank() != mv.from.rank()) {
        return rank_char(mv.from.rank()).to_string();
    }
    format_square(mv.from)
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("Game is over")]
    GameOver,
    #[error("FEN parse error: {0}")]
    FenError(#[from] crate::fen::FenError),
    #[error("History no longer replays at {0}")]
    CorruptHistory(String),
}
