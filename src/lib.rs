//! Strictly Go - a referee for GTP engines
//!
//! Spawns two engines that speak the Go Text Protocol, plays them against
//! each other until two consecutive passes, and collects both engines'
//! final scores. Go rules, legality and scoring are left to the engines.
//!
//! # Architecture
//!
//! - **GTP**: response framing, command encoding and the request/response exchange
//! - **Engine**: the [`Engine`] trait and the subprocess-backed [`EngineProcess`]
//! - **Orchestrator**: initialization, the turn loop and shutdown
//! - **Config**: board size, komi and engine command lines
//!
//! # Example
//!
//! ```no_run
//! use strictly_go::{Color, EngineProcess, MatchConfig, Orchestrator};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = MatchConfig::default();
//! let black = EngineProcess::new("black", config.engine_command(Color::Black)?);
//! let white = EngineProcess::new("white", config.engine_command(Color::White)?);
//!
//! let report = Orchestrator::new(Box::new(black), Box::new(white), config.settings().clone())
//!     .run()
//!     .await?;
//! println!("{} / {}", report.black_score(), report.white_score());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod color;
mod config;
mod engine;
mod error;
mod orchestrator;

pub mod gtp;

// Crate-level exports - Domain types
pub use color::Color;

// Crate-level exports - Configuration
pub use config::{GameSettings, MAX_BOARD_SIZE, MatchConfig};

// Crate-level exports - Engines
pub use engine::{Engine, EngineCommand, EngineProcess};

// Crate-level exports - Errors
pub use error::{ConfigError, GtpError, GtpErrorKind};

// Crate-level exports - Orchestration
pub use orchestrator::{
    GameReport, Orchestrator, PASS, PlayedMove, TurnOutcome, TurnState, is_pass,
};
