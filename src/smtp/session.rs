//! SMTP session state machine
//!
//! The machine is socket-free: it consumes one de-framed dialogue line at a
//! time and answers with an [`Outcome`] telling the caller what to send and
//! whether the session continues. States advance in strict forward order
//! with no backtracking; any mismatched line ends the session.

use crate::smtp::commands;
use crate::smtp::reply::Reply;

use std::net::IpAddr;

/// Represents the current state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing exchanged yet; the server speaks first
    Greeting,
    /// Greeting sent - waiting for EHLO
    AwaitEhlo,
    /// EHLO received - waiting for MAIL FROM
    AwaitMailFrom,
    /// MAIL FROM received - waiting for RCPT TO lines or DATA
    AwaitRcptLoop,
    /// DATA acknowledged - capturing body lines until the terminator
    ReceivingBody,
    /// Body persisted - waiting for QUIT
    AwaitQuit,
    /// Session over, normally or abnormally
    Closed,
}

/// What the caller should do with one consumed line
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Send the reply and keep reading
    Reply(Reply),
    /// Body line buffered; nothing to send
    Buffered,
    /// Capture finished: persist the body, then send the reply
    Completed(Reply),
    /// Send the reply, then close the connection normally
    Closing(Reply),
    /// Line did not match the expected pattern: send 503 and close
    Violation(Reply),
}

/// State and captured data for a single connection
#[derive(Debug)]
pub struct Session {
    /// Current protocol state
    pub state: SessionState,
    /// Address of the connected peer, echoed in the hello reply
    peer: IpAddr,
    /// Client identifier from the EHLO line
    pub client_id: Option<String>,
    /// Sender address from the MAIL FROM line
    pub sender: Option<String>,
    /// Recipient addresses in arrival order
    pub recipients: Vec<String>,
    /// Body lines captured so far
    body: Vec<String>,
}

impl Session {
    /// Create a session for a connection from the given peer
    pub fn new(peer: IpAddr) -> Self {
        Self {
            state: SessionState::Greeting,
            peer,
            client_id: None,
            sender: None,
            recipients: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Produce the greeting the server sends before reading anything
    pub fn greet(&mut self) -> Reply {
        self.state = SessionState::AwaitEhlo;
        Reply::greeting()
    }

    /// Consume one dialogue line and decide the reply
    pub fn handle_line(&mut self, line: &str) -> Outcome {
        match self.state {
            SessionState::AwaitEhlo => match commands::ehlo(line) {
                Some(id) => {
                    tracing::info!("receive EHLO from {id}");
                    let reply = Reply::hello(id, &self.peer);
                    self.client_id = Some(id.to_string());
                    self.state = SessionState::AwaitMailFrom;
                    Outcome::Reply(reply)
                }
                None => self.reject("EHLO", line),
            },
            SessionState::AwaitMailFrom => match commands::mail_from(line) {
                Some(sender) => {
                    tracing::info!("receive MAIL FROM:<{sender}>");
                    let reply = Reply::sender_accepted(sender);
                    self.sender = Some(sender.to_string());
                    self.state = SessionState::AwaitRcptLoop;
                    Outcome::Reply(reply)
                }
                None => self.reject("MAIL FROM", line),
            },
            // Whitespace is trimmed only while looping on RCPT/DATA
            SessionState::AwaitRcptLoop => match line.trim() {
                "DATA" => {
                    tracing::info!("receive DATA");
                    self.state = SessionState::ReceivingBody;
                    Outcome::Reply(Reply::data_go_ahead())
                }
                trimmed => match commands::rcpt_to(trimmed) {
                    Some(recipient) => {
                        tracing::info!("receive RCPT TO:<{recipient}>");
                        let reply = Reply::recipient_ok(recipient);
                        self.recipients.push(recipient.to_string());
                        Outcome::Reply(reply)
                    }
                    None => self.reject("RCPT TO", line),
                },
            },
            SessionState::ReceivingBody => {
                // Terminator comparison is exact; no whitespace trimming,
                // so " . " and ".." are ordinary content.
                if line == "." {
                    self.state = SessionState::AwaitQuit;
                    Outcome::Completed(Reply::message_accepted())
                } else {
                    self.body.push(line.to_string());
                    Outcome::Buffered
                }
            }
            SessionState::AwaitQuit => {
                if line == "QUIT" {
                    self.state = SessionState::Closed;
                    Outcome::Closing(Reply::closing())
                } else {
                    self.reject("QUIT", line)
                }
            }
            SessionState::Greeting | SessionState::Closed => self.reject("(none)", line),
        }
    }

    /// Take ownership of the captured body lines
    pub fn take_body(&mut self) -> Vec<String> {
        std::mem::take(&mut self.body)
    }

    fn reject(&mut self, expected: &str, line: &str) -> Outcome {
        tracing::debug!("expected '{expected}', got {line:?}");
        self.state = SessionState::Closed;
        Outcome::Violation(Reply::bad_sequence())
    }
}
