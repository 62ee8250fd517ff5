//! Error types for the stub server

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StubError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A dialogue line did not match what the current state expects.
    /// Carries the offending line.
    #[error("protocol violation: {0:?}")]
    ProtocolViolation(String),

    /// The peer closed the connection mid-dialogue.
    #[error("peer disconnected mid-dialogue")]
    UnexpectedDisconnect,

    /// Caller-usage fault, e.g. reading the port before `start()`.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}
