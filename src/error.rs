//! Error types for engine control and configuration.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong while talking to an engine.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GtpErrorKind {
    /// The engine subprocess could not be started.
    #[display("spawn failed: {}", _0)]
    Spawn(String),

    /// A pipe write failed, or the output ended before a full response.
    #[display("protocol I/O failed: {}", _0)]
    ProtocolIo(String),

    /// The response did not start with the success marker `=`.
    #[display("expected '=...', got {:?}", response)]
    ProtocolFormat {
        /// Raw response text as received.
        response: String,
    },

    /// The engine did not exit successfully after `quit`.
    #[display("engine did not quit successfully ({})", status)]
    ExitStatus {
        /// Exit status as reported by the operating system.
        status: String,
    },
}

/// Engine error with the engine label, the command in flight and location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{}: {}: {} at {}:{}", engine, command, kind, file, line)]
pub struct GtpError {
    /// Failure category.
    pub kind: GtpErrorKind,
    /// Label of the engine that failed.
    pub engine: String,
    /// Command text, or lifecycle step such as `start` or `close`.
    pub command: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GtpError {
    /// Creates a new engine error with caller location tracking.
    #[track_caller]
    #[instrument(skip(engine, command))]
    pub fn new(kind: GtpErrorKind, engine: impl AsRef<str>, command: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            engine: engine.as_ref().to_string(),
            command: command.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for a [`GtpErrorKind::ProtocolIo`] error.
    #[track_caller]
    pub fn io(engine: impl AsRef<str>, command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(GtpErrorKind::ProtocolIo(message.into()), engine, command)
    }

    /// Returns the failure category.
    pub fn kind(&self) -> &GtpErrorKind {
        &self.kind
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
