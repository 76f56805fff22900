//! Game orchestration between two engines.

use crate::{Color, Engine, GameSettings, GtpError};
use derive_getters::Getters;
use tracing::{debug, error, info, instrument};

/// Move token an engine returns when it declines to play.
pub const PASS: &str = "PASS";

/// Returns true for the pass token, in any case.
pub fn is_pass(mv: &str) -> bool {
    mv.trim().eq_ignore_ascii_case(PASS)
}

/// What a half-turn did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// A stone was played; the opponent must be told.
    Moved,
    /// A pass with no pass directly before it. Play continues.
    Passed,
    /// Second pass in a row. The game is over.
    Terminated,
}

/// Which color moves next and whether the previous half-turn was a pass.
///
/// The pass flag is shared by both colors: two passes in direct succession
/// end the game no matter who made them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    to_move: Color,
    previous_was_pass: bool,
    finished: bool,
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnState {
    /// Black to move, no pass pending.
    pub fn new() -> Self {
        Self {
            to_move: Color::Black,
            previous_was_pass: false,
            finished: false,
        }
    }

    /// Color whose turn it is.
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// Whether the last recorded half-turn was a pass.
    pub fn previous_was_pass(&self) -> bool {
        self.previous_was_pass
    }

    /// Whether two consecutive passes have ended the game.
    pub fn is_terminated(&self) -> bool {
        self.finished
    }

    /// Records the move made by the color to move and hands the turn over.
    pub fn record(&mut self, mv: &str) -> TurnOutcome {
        let outcome = if is_pass(mv) {
            if self.previous_was_pass {
                self.finished = true;
                TurnOutcome::Terminated
            } else {
                self.previous_was_pass = true;
                TurnOutcome::Passed
            }
        } else {
            self.previous_was_pass = false;
            TurnOutcome::Moved
        };
        if !self.finished {
            self.to_move = self.to_move.opponent();
        }
        outcome
    }
}

/// One half-turn as played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    /// Color that moved.
    pub color: Color,
    /// Move token exactly as the engine returned it.
    pub token: String,
}

/// Summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GameReport {
    /// Every half-turn in order, passes included.
    moves: Vec<PlayedMove>,
    /// Score string reported by the Black engine.
    black_score: String,
    /// Score string reported by the White engine.
    white_score: String,
}

impl GameReport {
    /// Number of half-turns played, passes included.
    pub fn half_turns(&self) -> usize {
        self.moves.len()
    }
}

/// Drives two engines through one game.
pub struct Orchestrator {
    black: Box<dyn Engine>,
    white: Box<dyn Engine>,
    settings: GameSettings,
}

impl Orchestrator {
    /// Creates an orchestrator; `black` moves first.
    pub fn new(black: Box<dyn Engine>, white: Box<dyn Engine>, settings: GameSettings) -> Self {
        Self {
            black,
            white,
            settings,
        }
    }

    /// Engine playing `color`.
    pub fn engine(&self, color: Color) -> &dyn Engine {
        match color {
            Color::Black => self.black.as_ref(),
            Color::White => self.white.as_ref(),
        }
    }

    /// Initializes, plays and closes. Consumes the orchestrator.
    #[instrument(skip(self))]
    pub async fn run(mut self) -> Result<GameReport, GtpError> {
        self.initialize().await?;
        let moves = self.play().await?;
        let (black_score, white_score) = self.final_scores().await?;
        self.close().await?;
        Ok(GameReport {
            moves,
            black_score,
            white_score,
        })
    }

    /// Starts both engines, confirms they answer, and sets up the board.
    #[instrument(skip(self), fields(board_size = *self.settings.board_size(), komi = %self.settings.komi()))]
    pub async fn initialize(&mut self) -> Result<(), GtpError> {
        self.black.start().await?;
        self.white.start().await?;
        sanity_check(self.black.as_mut()).await?;
        sanity_check(self.white.as_mut()).await?;
        setup_board(self.black.as_mut(), &self.settings).await?;
        setup_board(self.white.as_mut(), &self.settings).await?;
        info!("Both engines initialized");
        Ok(())
    }

    /// Alternates moves until two passes in a row. Returns the move list.
    #[instrument(skip(self))]
    pub async fn play(&mut self) -> Result<Vec<PlayedMove>, GtpError> {
        let mut state = TurnState::new();
        let mut moves = Vec::new();

        while !state.is_terminated() {
            let color = state.to_move();
            let (mover, opponent) = match color {
                Color::Black => (&mut self.black, &mut self.white),
                Color::White => (&mut self.white, &mut self.black),
            };

            let token = mover.genmove(color).await?;
            info!(engine = %mover.label(), %color, mv = %token, "Engine moved");
            moves.push(PlayedMove {
                color,
                token: token.clone(),
            });

            match state.record(&token) {
                TurnOutcome::Terminated => {
                    info!(%color, "Second consecutive pass, game over");
                }
                TurnOutcome::Passed => {
                    debug!(%color, "Pass, not forwarded to opponent");
                }
                TurnOutcome::Moved => {
                    let board = mover.show_board().await?;
                    info!(engine = %mover.label(), "{}", board);
                    opponent.play(color, &token).await?;
                }
            }
        }

        info!(half_turns = moves.len(), "Game finished");
        Ok(moves)
    }

    /// Requests the final score from Black then White.
    #[instrument(skip(self))]
    pub async fn final_scores(&mut self) -> Result<(String, String), GtpError> {
        let black = self.black.final_score().await?;
        info!(engine = %self.black.label(), score = %black, "Score");
        let white = self.white.final_score().await?;
        info!(engine = %self.white.label(), score = %white, "Score");
        Ok((black, white))
    }

    /// Closes Black then White. Both are closed even if the first fails;
    /// the first failure is returned.
    #[instrument(skip(self))]
    pub async fn close(&mut self) -> Result<(), GtpError> {
        let black = self.black.close().await;
        let white = self.white.close().await;
        if let Err(e) = &black {
            error!(error = %e, "Closing black engine failed");
        }
        if let Err(e) = &white {
            error!(error = %e, "Closing white engine failed");
        }
        black.and(white)
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("black", &self.black.label())
            .field("white", &self.white.label())
            .field("settings", &self.settings)
            .finish()
    }
}

/// Name and version must both answer before the engine is trusted.
async fn sanity_check<E: Engine + ?Sized>(engine: &mut E) -> Result<(), GtpError> {
    let name = engine.name().await?;
    info!(engine = %engine.label(), "Name: {}", name);
    let version = engine.version().await?;
    info!(engine = %engine.label(), "Version: {}", version);
    Ok(())
}

async fn setup_board<E: Engine + ?Sized>(engine: &mut E, settings: &GameSettings) -> Result<(), GtpError> {
    engine.boardsize(*settings.board_size()).await?;
    engine.komi(settings.komi()).await?;
    engine.clear_board().await
}
