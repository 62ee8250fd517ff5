//! # MailDump
//!
//! MailDump is a stub SMTP server for testing mail-sending clients.
//!
//! It accepts a single connection, drives a fixed subset of the SMTP
//! dialogue, and dumps the submitted message body verbatim to a uniquely
//! named file, so test harnesses can compare the capture against reference
//! output.
//!
//! ## Quick Start
//!
//! ```no_run
//! use maildump::SmtpStub;
//!
//! let mut server = SmtpStub::new(
//!     "127.0.0.1".parse().unwrap(),
//!     "/tmp/captured-mail",
//!     None, // OS-assigned port
//! );
//! server.start().unwrap();
//!
//! // Point the mail client under test at 127.0.0.1:{port}
//! let port = server.port().unwrap();
//! println!("stub listening on port {port}");
//!
//! // ... send a message, then inspect /tmp/captured-mail ...
//! server.stop();
//! ```
//!
//! ## Supported dialogue
//!
//! `EHLO`, `MAIL FROM`, `RCPT TO` (repeatable), `DATA`, `QUIT`, in exactly
//! that order. Anything else receives `503 bad sequence of commands` and
//! closes the connection.
//!
//! ## Notes
//!
//! - One connection per server instance. The acceptor services exactly one
//!   client and never accepts another; create a new server per test.
//! - No TLS, no authentication, no message parsing or validation.
//! - Each captured message lands in the storage directory as
//!   `<timestamp>_<uuid>.txt`, body lines joined by the platform line
//!   terminator.

mod smtp;

pub use smtp::{
    LINE_TERMINATOR, LineChannel, MessageStore, Outcome, Reply, Session, SessionState, SmtpStub,
    StubError,
};
