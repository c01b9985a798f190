//! Line-oriented play session over a [`GameBoard`].
//!
//! Each input line goes through the dispatcher. Command actions only queue a
//! [`Control`] on a channel; the session applies queued controls after the
//! dispatcher returns, so the board is never borrowed twice.

use move_resolver::{
    resolve_and_execute, CommandTable, ControlledSide, Dispatched, GameBoard, MoveError,
    MoveRecord, MoveResult, MoveStatus, PieceColor, RelayMessage,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::CliError;

/// Side effects requested through the command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Resign,
    Draw,
    Undo,
    Fen,
    /// Hand control to the other color.
    Switch,
    Help,
    Quit,
}

impl Control {
    const ALL: [(&'static str, Control); 7] = [
        ("resign", Control::Resign),
        ("draw", Control::Draw),
        ("undo", Control::Undo),
        ("fen", Control::Fen),
        ("switch", Control::Switch),
        ("help", Control::Help),
        ("quit", Control::Quit),
    ];
}

pub struct Session {
    board: GameBoard,
    commands: CommandTable,
    control_rx: mpsc::UnboundedReceiver<Control>,
    /// Side configured at start; moves by the other color are reported as
    /// opponent moves.
    home: ControlledSide,
    json: bool,
    finished: bool,
    announced_result: bool,
}

impl Session {
    pub fn new(board: GameBoard, prefix: char, json: bool) -> Self {
        let (control_tx, control_rx) = mpsc::unbounded_channel();

        let mut commands = CommandTable::with_prefix(prefix);
        for (name, control) in Control::ALL {
            let tx = control_tx.clone();
            commands.register(name, move || {
                // The receiver lives as long as the session.
                let _ = tx.send(control);
            });
        }

        Self {
            home: board.side(),
            board,
            commands,
            control_rx,
            json,
            finished: false,
            announced_result: false,
        }
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Lines to print before the first input.
    pub fn greeting(&self) -> Result<Vec<String>, CliError> {
        if self.json {
            let role = RelayMessage::Role(self.home.to_string());
            return Ok(vec![serde_json::to_string(&role)?]);
        }
        Ok(vec![
            format!("playing {} from {}", self.home, self.board.to_fen()),
            self.help_line(),
        ])
    }

    /// Handle one input line and return what to print.
    pub fn handle_line(&mut self, line: &str) -> Result<Vec<String>, CliError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Vec::new());
        }

        let played_before = self.board.history().len();
        let result = resolve_and_execute(&mut self.board, &self.commands, line);
        match &result {
            Ok(Dispatched::Move(mv)) => tracing::debug!(input = line, %mv, "input played"),
            Ok(Dispatched::Command(_)) => {}
            Err(e) => tracing::warn!(input = line, "{}", e),
        }

        let mut out = vec![self.render_status(line, &result)?];
        if self.board.history().len() > played_before {
            if let Some(record) = self.board.last_move() {
                out.extend(self.render_played(record)?);
            }
        }

        while let Ok(control) = self.control_rx.try_recv() {
            out.extend(self.apply(control));
        }

        if self.board.is_over() && !self.announced_result {
            self.announced_result = true;
            let result = self.board.result();
            tracing::info!(%result, "game over");
            if !self.json {
                out.push(format!("game over: {}", result));
            }
        }

        Ok(out)
    }

    /// Read lines from `input` until end of input or a quit command.
    pub async fn run<R>(&mut self, input: R) -> Result<(), CliError>
    where
        R: AsyncBufRead + Unpin,
    {
        for line in self.greeting()? {
            println!("{}", line);
        }

        let mut lines = input.lines();
        while !self.finished {
            let Some(line) = lines.next_line().await? else {
                break;
            };
            for out in self.handle_line(&line)? {
                println!("{}", out);
            }
        }

        tracing::info!(moves = self.board.history().len(), "session ended");
        Ok(())
    }

    fn render_status(
        &self,
        input: &str,
        result: &MoveResult<Dispatched>,
    ) -> Result<String, CliError> {
        if self.json {
            let status = MoveStatus::from_result(input, result);
            return Ok(serde_json::to_string(&RelayMessage::MoveStatus(status))?);
        }

        Ok(match result {
            Ok(Dispatched::Move(_)) => match self.board.last_move() {
                Some(record) => format!("played {}", record.san),
                None => "played".to_string(),
            },
            Ok(Dispatched::Command(name)) => format!("{}{}", self.commands.prefix(), name),
            Err(MoveError::Ambiguous { candidates, .. }) => {
                let listed: Vec<String> = candidates.iter().map(|mv| mv.to_string()).collect();
                format!("Ambiguous move: {}", listed.join(", "))
            }
            Err(e) => e.to_string(),
        })
    }

    fn render_played(&self, record: &MoveRecord) -> Result<Vec<String>, CliError> {
        if !self.json || self.home.controls(record.color) {
            return Ok(Vec::new());
        }
        let message = RelayMessage::OpponentMove(record.details.clone());
        Ok(vec![serde_json::to_string(&message)?])
    }

    /// Color that commands like resign act for.
    fn acting_color(&self) -> PieceColor {
        match self.board.side() {
            ControlledSide::White => PieceColor::White,
            ControlledSide::Black => PieceColor::Black,
            ControlledSide::Both => self.board.side_to_move(),
        }
    }

    fn apply(&mut self, control: Control) -> Vec<String> {
        let color = self.acting_color();
        let text = match control {
            Control::Resign => match self.board.resign(color) {
                Ok(result) => format!("{} resigns: {}", color, result),
                Err(e) => format!("cannot resign: {}", e),
            },
            Control::Draw => match self.board.offer_draw(color) {
                Ok(true) => "draw agreed".to_string(),
                Ok(false) => format!("{} offers a draw", color),
                Err(e) => format!("cannot offer a draw: {}", e),
            },
            Control::Undo => match self.board.undo() {
                Ok(record) => format!("took back {}", record.san),
                Err(e) => format!("cannot undo: {}", e),
            },
            Control::Fen => self.board.to_fen(),
            Control::Switch => {
                let side = match self.board.side() {
                    ControlledSide::White => ControlledSide::Black,
                    ControlledSide::Black => ControlledSide::White,
                    ControlledSide::Both => ControlledSide::Both,
                };
                self.board.set_side(side);
                format!("now playing {}", side)
            }
            Control::Help => self.help_line(),
            Control::Quit => {
                self.finished = true;
                "bye".to_string()
            }
        };

        tracing::info!(?control, "{}", text);
        if self.json {
            Vec::new()
        } else {
            vec![text]
        }
    }

    fn help_line(&self) -> String {
        let prefix = self.commands.prefix();
        let names: Vec<String> = self
            .commands
            .names()
            .map(|name| format!("{}{}", prefix, name))
            .collect();
        format!("enter moves as e2e4 or Nf3; commands: {}", names.join(" "))
    }
}
