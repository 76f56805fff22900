//! Go Text Protocol plumbing: response framing, command encoding and the
//! request/response exchange.

mod command;
mod connection;
mod framer;

pub use command::GtpCommand;
pub use connection::{GtpConnection, parse_response};
pub use framer::{Frame, ResponseReader, TERMINATOR, scan_response, scan_response_from};
