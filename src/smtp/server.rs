//! Server lifecycle and the session drive loop
//!
//! A started server accepts exactly one inbound connection for its whole
//! lifetime and hands it to a worker thread. This is a deliberate
//! simplification for a test stub, not a general-purpose server.

use crate::smtp::channel::LineChannel;
use crate::smtp::error::StubError;
use crate::smtp::session::{Outcome, Session};
use crate::smtp::store::MessageStore;

use std::io::{BufRead, Write};
use std::net::{IpAddr, TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// Stub SMTP server that captures one submitted message to a file
///
/// Constructed with its configuration, started once, optionally stopped.
/// The assigned port is only observable after [`start`](Self::start).
#[derive(Debug)]
pub struct SmtpStub {
    addr: IpAddr,
    requested_port: u16,
    store: MessageStore,
    listener: Option<TcpListener>,
    assigned_port: Option<u16>,
    stopped: Arc<AtomicBool>,
}

impl SmtpStub {
    /// Create a server bound to nothing yet
    ///
    /// `port` of `None` (or 0) asks the OS for an ephemeral port, resolved
    /// during [`start`](Self::start).
    pub fn new(addr: IpAddr, storage_dir: impl Into<PathBuf>, port: Option<u16>) -> Self {
        Self {
            addr,
            requested_port: port.unwrap_or(0),
            store: MessageStore::new(storage_dir),
            listener: None,
            assigned_port: None,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Bind the listening socket and spawn the acceptor
    ///
    /// The acceptor blocks for a single inbound connection and dispatches it
    /// to a worker running the session state machine; a second connection is
    /// never accepted. Fails only if the bind itself fails.
    pub fn start(&mut self) -> Result<(), StubError> {
        let listener = TcpListener::bind((self.addr, self.requested_port))?;
        self.assigned_port = Some(listener.local_addr()?.port());

        let acceptor = listener.try_clone()?;
        let store = self.store.clone();
        let stopped = Arc::clone(&self.stopped);
        thread::Builder::new()
            .name("client receiver".to_string())
            .spawn(move || match acceptor.accept() {
                Ok((stream, _)) => {
                    // A stop between bind and accept must not let a late
                    // client start a session; drop it unserviced.
                    if stopped.load(Ordering::SeqCst) {
                        tracing::info!("connection after stop, turning client away");
                        return;
                    }
                    thread::spawn(move || {
                        if let Err(e) = handle_client(stream, &store) {
                            tracing::error!("{e}");
                        }
                    });
                }
                Err(e) => tracing::error!("error accepting connection: {e}"),
            })?;

        self.listener = Some(listener);
        Ok(())
    }

    /// The port assigned at start
    ///
    /// Fails with [`StubError::InvalidState`] when called before
    /// [`start`](Self::start), even if a fixed port was requested.
    pub fn port(&self) -> Result<u16, StubError> {
        self.assigned_port
            .ok_or(StubError::InvalidState("server not started"))
    }

    /// Close the listening socket if the server was started
    ///
    /// Idempotent. Does not interrupt an in-progress session; it only
    /// prevents further accepts. A client that connects after this call is
    /// disconnected without ever being greeted.
    pub fn stop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.listener.take();
    }
}

impl Drop for SmtpStub {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Serve one accepted connection to completion
fn handle_client(stream: TcpStream, store: &MessageStore) -> Result<(), StubError> {
    let peer = stream.peer_addr()?;
    tracing::info!("client {} connected", peer.ip());

    let mut channel = LineChannel::from_stream(stream)?;
    let mut session = Session::new(peer.ip());
    run(&mut channel, &mut session, store)
}

/// Drive the state machine over a line channel
///
/// Maps session outcomes onto the channel and the message store. Returns
/// `Err` when the dialogue ends abnormally; the 503 reply has already been
/// sent by then.
fn run<R: BufRead, W: Write>(
    channel: &mut LineChannel<R, W>,
    session: &mut Session,
    store: &MessageStore,
) -> Result<(), StubError> {
    channel.send(&session.greet())?;

    loop {
        let Some(line) = channel.recv_line()? else {
            return Err(StubError::UnexpectedDisconnect);
        };

        match session.handle_line(&line) {
            Outcome::Reply(reply) => channel.send(&reply)?,
            Outcome::Buffered => {}
            Outcome::Completed(reply) => {
                // Persist before acknowledging: the 250 must only ever be
                // observed once the file exists.
                let body = session.take_body();
                let path = store.persist(&body)?;
                tracing::info!("message dumped to {}", path.display());
                channel.send(&reply)?;
            }
            Outcome::Closing(reply) => {
                channel.send(&reply)?;
                return Ok(());
            }
            Outcome::Violation(reply) => {
                channel.send(&reply)?;
                return Err(StubError::ProtocolViolation(line));
            }
        }
    }
}
