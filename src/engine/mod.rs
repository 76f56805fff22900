//! Engine trait and the subprocess-backed implementation.

mod command_line;
mod process;

pub use command_line::EngineCommand;
pub use process::EngineProcess;

use crate::gtp::GtpCommand;
use crate::{Color, GtpError};
use tracing::info;

/// A GTP-speaking engine.
///
/// Implementors provide the lifecycle and the raw [`send`](Engine::send)
/// exchange; the typed commands are built on top of it.
#[async_trait::async_trait]
pub trait Engine: Send {
    /// Human-readable label used in logs and errors.
    fn label(&self) -> &str;

    /// Starts the engine. Called exactly once, before any command.
    async fn start(&mut self) -> Result<(), GtpError>;

    /// Sends one command and returns the response payload.
    async fn send(&mut self, command: GtpCommand) -> Result<String, GtpError>;

    /// Sends `quit`, closes the input stream and waits for the engine to exit.
    async fn close(&mut self) -> Result<(), GtpError>;

    /// Engine name.
    async fn name(&mut self) -> Result<String, GtpError> {
        self.send(GtpCommand::Name).await
    }

    /// Engine version.
    async fn version(&mut self) -> Result<String, GtpError> {
        self.send(GtpCommand::Version).await
    }

    /// Sets the board size.
    async fn boardsize(&mut self, size: u32) -> Result<(), GtpError> {
        self.send(GtpCommand::Boardsize(size)).await.map(drop)
    }

    /// Sets komi.
    async fn komi(&mut self, komi: &str) -> Result<(), GtpError> {
        self.send(GtpCommand::Komi(komi.to_string())).await.map(drop)
    }

    /// Clears the board.
    async fn clear_board(&mut self) -> Result<(), GtpError> {
        info!(engine = %self.label(), "Clearing board");
        self.send(GtpCommand::ClearBoard).await.map(drop)
    }

    /// Textual rendering of the engine's board.
    async fn show_board(&mut self) -> Result<String, GtpError> {
        self.send(GtpCommand::ShowBoard).await
    }

    /// Asks the engine for a move as `color`. Returns the move token.
    async fn genmove(&mut self, color: Color) -> Result<String, GtpError> {
        self.send(GtpCommand::GenMove(color)).await
    }

    /// Tells the engine that `color` played `mv`.
    async fn play(&mut self, color: Color, mv: &str) -> Result<(), GtpError> {
        self.send(GtpCommand::Play(color, mv.to_string())).await.map(drop)
    }

    /// Final score as reported by the engine.
    async fn final_score(&mut self) -> Result<String, GtpError> {
        self.send(GtpCommand::FinalScore).await
    }
}
