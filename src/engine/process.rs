//! Engine subprocess management.

use super::{Engine, EngineCommand};
use crate::gtp::{GtpCommand, GtpConnection};
use crate::{GtpError, GtpErrorKind};
use std::process::Stdio;
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, error, info, instrument};

/// One engine subprocess speaking GTP over its stdin/stdout.
///
/// Lifecycle: [`new`](EngineProcess::new) → [`start`](Engine::start) →
/// any number of commands → [`close`](Engine::close). The child is killed
/// if the value is dropped without being closed.
#[derive(Debug)]
pub struct EngineProcess {
    label: String,
    command: EngineCommand,
    child: Option<Child>,
    connection: Option<GtpConnection<ChildStdout, ChildStdin>>,
    closed: bool,
}

impl EngineProcess {
    /// Creates an engine that will be launched with `command`.
    pub fn new(label: impl Into<String>, command: EngineCommand) -> Self {
        Self {
            label: label.into(),
            command,
            child: None,
            connection: None,
            closed: false,
        }
    }

    /// Command line the engine is launched with.
    pub fn command(&self) -> &EngineCommand {
        &self.command
    }

    fn spawn_error(&self, message: impl Into<String>) -> GtpError {
        GtpError::new(GtpErrorKind::Spawn(message.into()), &self.label, "start")
    }
}

#[async_trait::async_trait]
impl Engine for EngineProcess {
    fn label(&self) -> &str {
        &self.label
    }

    #[instrument(skip(self), fields(engine = %self.label))]
    async fn start(&mut self) -> Result<(), GtpError> {
        if self.child.is_some() || self.closed {
            return Err(self.spawn_error("engine was already started"));
        }

        info!(
            program = %self.command.program(),
            args = ?self.command.args(),
            label = %self.label,
            "Starting engine process"
        );

        let mut child = Command::new(self.command.program())
            .args(self.command.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                error!(engine = %self.label, error = %e, "Failed to spawn engine");
                self.spawn_error(format!("{}: {}", self.command.program(), e))
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| self.spawn_error("failed to capture stdin"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| self.spawn_error("failed to capture stdout"))?;

        self.connection = Some(GtpConnection::new(self.label.clone(), stdout, stdin));
        self.child = Some(child);
        debug!(engine = %self.label, "Engine process started");
        Ok(())
    }

    async fn send(&mut self, command: GtpCommand) -> Result<String, GtpError> {
        if self.closed {
            return Err(GtpError::io(&self.label, command.to_string(), "engine is closed"));
        }
        let connection = self
            .connection
            .as_mut()
            .ok_or_else(|| GtpError::io(&self.label, command.to_string(), "engine not started"))?;
        connection.send(&command).await
    }

    #[instrument(skip(self), fields(engine = %self.label))]
    async fn close(&mut self) -> Result<(), GtpError> {
        if self.closed {
            return Err(GtpError::io(&self.label, "close", "engine is closed"));
        }
        // No command is accepted once close begins, even if quit fails.
        self.closed = true;

        let mut connection = self
            .connection
            .take()
            .ok_or_else(|| GtpError::io(&self.label, "close", "engine not started"))?;
        connection.send(&GtpCommand::Quit).await?;
        connection.close_input().await?;
        // Dropping the reader closes our end of the engine's stdout.
        drop(connection);

        let mut child = self
            .child
            .take()
            .ok_or_else(|| GtpError::io(&self.label, "close", "engine not started"))?;
        let status = child
            .wait()
            .await
            .map_err(|e| GtpError::io(&self.label, "close", format!("wait failed: {}", e)))?;

        if !status.success() {
            error!(engine = %self.label, %status, "Engine exited unsuccessfully");
            return Err(GtpError::new(
                GtpErrorKind::ExitStatus {
                    status: status.to_string(),
                },
                &self.label,
                "close",
            ));
        }

        info!(engine = %self.label, "Engine exited cleanly");
        Ok(())
    }
}
