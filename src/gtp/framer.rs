//! Splits an engine's output into GTP response units.
//!
//! A GTP reply is terminated by an empty line, so a unit ends at the first
//! `"\n\n"` rather than at the first newline. Whatever is left when the
//! stream ends is returned as a final, unterminated unit.

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{instrument, trace};

/// Blank-line sequence that ends every GTP response.
pub const TERMINATOR: &[u8] = b"\n\n";

const READ_CHUNK: usize = 4096;

/// Result of scanning a buffer for the next response unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame<'a> {
    /// A complete unit. `consumed` bytes must be dropped from the buffer.
    Unit {
        /// The unit, terminator included when there was one.
        unit: &'a [u8],
        /// Number of bytes the unit occupied in the buffer.
        consumed: usize,
    },
    /// No terminator yet and more bytes may arrive.
    NeedMore,
    /// End of stream with nothing buffered.
    End,
}

/// Scans `buf` for one response unit.
///
/// Pure function over the bytes seen so far; callers re-scan after every
/// read, so a terminator split across two reads is still found.
pub fn scan_response(buf: &[u8], at_eof: bool) -> Frame<'_> {
    scan_response_from(buf, 0, at_eof)
}

/// Like [`scan_response`], but only looks for the terminator at or after
/// byte `from`.
///
/// `buf[..from]` must already be known to hold no terminator. A caller that
/// got [`Frame::NeedMore`] for a buffer of length `n` can pass
/// `n - (TERMINATOR.len() - 1)` after appending, which still catches a
/// terminator straddling the old end.
pub fn scan_response_from(buf: &[u8], from: usize, at_eof: bool) -> Frame<'_> {
    if at_eof && buf.is_empty() {
        return Frame::End;
    }
    let start = from.min(buf.len());
    if let Some(i) = buf[start..]
        .windows(TERMINATOR.len())
        .position(|w| w == TERMINATOR)
    {
        let consumed = start + i + TERMINATOR.len();
        return Frame::Unit {
            unit: &buf[..consumed],
            consumed,
        };
    }
    if at_eof {
        return Frame::Unit {
            unit: buf,
            consumed: buf.len(),
        };
    }
    Frame::NeedMore
}

/// Pull-based reader yielding one response unit at a time.
#[derive(Debug)]
pub struct ResponseReader<R> {
    inner: R,
    buf: Vec<u8>,
    // Prefix of `buf` already searched without finding a terminator.
    scanned: usize,
    at_eof: bool,
}

impl<R: AsyncRead + Unpin> ResponseReader<R> {
    /// Wraps a byte stream.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            scanned: 0,
            at_eof: false,
        }
    }

    /// Reads until a full unit is buffered.
    ///
    /// Returns `Ok(None)` once the stream has ended and everything buffered
    /// has been handed out.
    #[instrument(skip(self), fields(buffered = self.buf.len()))]
    pub async fn next_unit(&mut self) -> std::io::Result<Option<Vec<u8>>> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            let from = self.scanned.saturating_sub(TERMINATOR.len() - 1);
            match scan_response_from(&self.buf, from, self.at_eof) {
                Frame::Unit { consumed, .. } => {
                    let unit: Vec<u8> = self.buf.drain(..consumed).collect();
                    self.scanned = 0;
                    trace!(len = unit.len(), "Framed response unit");
                    return Ok(Some(unit));
                }
                Frame::End => return Ok(None),
                Frame::NeedMore => {
                    self.scanned = self.buf.len();
                    let n = self.inner.read(&mut chunk).await?;
                    if n == 0 {
                        trace!("Output stream ended");
                        self.at_eof = true;
                    } else {
                        self.buf.extend_from_slice(&chunk[..n]);
                    }
                }
            }
        }
    }

    /// Bytes read but not yet returned as a unit.
    pub fn buffered(&self) -> &[u8] {
        &self.buf
    }
}
