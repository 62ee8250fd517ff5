//! Stub SMTP server implementation

pub mod channel;
pub mod commands;
pub mod error;
pub mod reply;
pub mod server;
pub mod session;
pub mod store;

pub use channel::LineChannel;
pub use error::StubError;
pub use reply::Reply;
pub use server::SmtpStub;
pub use session::{Outcome, Session, SessionState};
pub use store::{LINE_TERMINATOR, MessageStore};
