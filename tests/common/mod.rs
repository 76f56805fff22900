//! Scripted engines for orchestrator tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use strictly_go::gtp::GtpCommand;
use strictly_go::{Engine, GtpError, GtpErrorKind};

/// Commands seen by all engines sharing it, in the order they were sent.
pub type CommandLog = Arc<Mutex<Vec<String>>>;

/// Engine that answers `genmove` from a script and records every command.
#[derive(Debug)]
pub struct ScriptedEngine {
    label: String,
    moves: VecDeque<String>,
    log: CommandLog,
    fail_on: Option<String>,
    fail_close: bool,
    closed: bool,
}

impl ScriptedEngine {
    /// Creates an engine that will generate `moves` in order.
    pub fn new(label: &str, moves: &[&str], log: CommandLog) -> Self {
        Self {
            label: label.to_string(),
            moves: moves.iter().map(|m| m.to_string()).collect(),
            log,
            fail_on: None,
            fail_close: false,
            closed: false,
        }
    }

    /// Answers `? error` to the first command whose text starts with `prefix`.
    pub fn failing_on(mut self, prefix: &str) -> Self {
        self.fail_on = Some(prefix.to_string());
        self
    }

    /// Reports an unsuccessful exit from `close`.
    pub fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }
}

/// Creates an empty shared log.
pub fn command_log() -> CommandLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Snapshot of the log.
pub fn entries(log: &CommandLog) -> Vec<String> {
    log.lock().expect("log poisoned").clone()
}

/// Log entries sent to `label`, without the label prefix.
pub fn commands_for(log: &CommandLog, label: &str) -> Vec<String> {
    let prefix = format!("{}: ", label);
    entries(log)
        .into_iter()
        .filter_map(|entry| entry.strip_prefix(&prefix).map(str::to_string))
        .collect()
}

#[async_trait::async_trait]
impl Engine for ScriptedEngine {
    fn label(&self) -> &str {
        &self.label
    }

    async fn start(&mut self) -> Result<(), GtpError> {
        self.log
            .lock()
            .expect("log poisoned")
            .push(format!("{}: <start>", self.label));
        Ok(())
    }

    async fn send(&mut self, command: GtpCommand) -> Result<String, GtpError> {
        let text = command.to_string();
        if self.closed {
            return Err(GtpError::io(&self.label, text, "engine is closed"));
        }
        self.log
            .lock()
            .expect("log poisoned")
            .push(format!("{}: {}", self.label, text));

        if let Some(prefix) = &self.fail_on {
            if text.starts_with(prefix.as_str()) {
                return Err(GtpError::new(
                    GtpErrorKind::ProtocolFormat {
                        response: "? scripted failure\n\n".to_string(),
                    },
                    &self.label,
                    text,
                ));
            }
        }

        let payload = match command {
            GtpCommand::Name => format!("{} engine", self.label),
            GtpCommand::Version => "1.0".to_string(),
            GtpCommand::ShowBoard => format!("{} board", self.label),
            GtpCommand::FinalScore => format!("{} score", self.label),
            GtpCommand::GenMove(_) => self
                .moves
                .pop_front()
                .ok_or_else(|| GtpError::io(&self.label, &text, "script exhausted"))?,
            _ => String::new(),
        };
        Ok(payload)
    }

    async fn close(&mut self) -> Result<(), GtpError> {
        self.send(GtpCommand::Quit).await?;
        self.closed = true;
        if self.fail_close {
            return Err(GtpError::new(
                GtpErrorKind::ExitStatus {
                    status: "exit status: 1".to_string(),
                },
                &self.label,
                "close",
            ));
        }
        Ok(())
    }
}
