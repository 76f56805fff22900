//! Request/response exchange with one GTP engine.

use super::framer::ResponseReader;
use super::GtpCommand;
use crate::{GtpError, GtpErrorKind};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, instrument, trace, warn};

/// Strips the success marker and terminator from a raw response unit.
///
/// Accepts `"= payload\n\n"`, `"=payload\n\n"` and a final unterminated unit.
/// Anything that does not start with `=` is a [`GtpErrorKind::ProtocolFormat`].
pub fn parse_response(raw: &str) -> Result<&str, GtpErrorKind> {
    let Some(rest) = raw.strip_prefix('=') else {
        return Err(GtpErrorKind::ProtocolFormat {
            response: raw.to_string(),
        });
    };
    let rest = rest.strip_prefix(' ').unwrap_or(rest);
    let payload = rest
        .strip_suffix("\n\n")
        .or_else(|| rest.strip_suffix('\n'))
        .unwrap_or(rest);
    Ok(payload)
}

/// One engine's input and output streams.
///
/// Each [`send`](GtpConnection::send) writes one command and reads exactly
/// one response unit, so the n-th response always answers the n-th command.
#[derive(Debug)]
pub struct GtpConnection<R, W> {
    label: String,
    writer: Option<W>,
    reader: ResponseReader<R>,
}

impl<R, W> GtpConnection<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Creates a connection over an engine's output (`reader`) and input (`writer`).
    pub fn new(label: impl Into<String>, reader: R, writer: W) -> Self {
        Self {
            label: label.into(),
            writer: Some(writer),
            reader: ResponseReader::new(reader),
        }
    }

    /// Label used in log lines and errors.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Sends a command and returns the stripped response payload.
    #[instrument(skip(self), fields(engine = %self.label))]
    pub async fn send(&mut self, command: &GtpCommand) -> Result<String, GtpError> {
        let text = command.to_string();
        debug!(engine = %self.label, "-> {}", text);

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| GtpError::io(&self.label, &text, "input stream is closed"))?;
        let line = format!("{}\n", text);
        writer
            .write_all(line.as_bytes())
            .await
            .map_err(|e| GtpError::io(&self.label, &text, format!("write failed: {}", e)))?;
        writer
            .flush()
            .await
            .map_err(|e| GtpError::io(&self.label, &text, format!("flush failed: {}", e)))?;

        let unit = self
            .reader
            .next_unit()
            .await
            .map_err(|e| GtpError::io(&self.label, &text, format!("read failed: {}", e)))?
            .ok_or_else(|| {
                GtpError::io(&self.label, &text, "output ended before a response arrived")
            })?;
        let raw = String::from_utf8(unit).map_err(|e| {
            let response = String::from_utf8_lossy(e.as_bytes()).into_owned();
            warn!(engine = %self.label, command = %text, response = %response, "Response is not valid UTF-8");
            GtpError::new(GtpErrorKind::ProtocolFormat { response }, &self.label, &text)
        })?;

        match parse_response(&raw) {
            Ok(payload) => {
                trace!(engine = %self.label, payload = %payload, "<- response");
                Ok(payload.to_string())
            }
            Err(kind) => {
                warn!(engine = %self.label, command = %text, response = %raw, "Engine rejected command");
                Err(GtpError::new(kind, &self.label, text))
            }
        }
    }

    /// Shuts down and drops the input stream, signalling end of input to the engine.
    ///
    /// Any later [`send`](GtpConnection::send) fails with a protocol I/O error.
    #[instrument(skip(self), fields(engine = %self.label))]
    pub async fn close_input(&mut self) -> Result<(), GtpError> {
        if let Some(mut writer) = self.writer.take() {
            writer
                .shutdown()
                .await
                .map_err(|e| GtpError::io(&self.label, "close", format!("closing input failed: {}", e)))?;
            debug!(engine = %self.label, "Input stream closed");
        }
        Ok(())
    }
}
