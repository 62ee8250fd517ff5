//! Line-based transport over an accepted connection
//!
//! Frames the byte stream into CRLF-terminated lines for reading and writes
//! each reply with an immediate flush, so a client that reads replies one at
//! a time always observes them promptly.

use crate::smtp::reply::Reply;

use std::io::{self, BufRead, BufReader, Write};
use std::net::TcpStream;

/// Bidirectional text-line channel
#[derive(Debug)]
pub struct LineChannel<R, W> {
    reader: R,
    writer: W,
}

impl LineChannel<BufReader<TcpStream>, TcpStream> {
    /// Wrap a connected stream
    pub fn from_stream(stream: TcpStream) -> io::Result<Self> {
        let writer = stream.try_clone()?;
        Ok(Self::new(BufReader::new(stream), writer))
    }
}

impl<R: BufRead, W: Write> LineChannel<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Read one line, without its terminator
    ///
    /// Returns `Ok(None)` when the peer has closed the connection, which the
    /// session treats as a disconnect rather than a dialogue line. Invalid
    /// UTF-8 is replaced rather than rejected.
    pub fn recv_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        let n = self.reader.read_until(b'\n', &mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Send a single reply, flushed immediately, never batched
    pub fn send(&mut self, reply: &Reply) -> io::Result<()> {
        self.writer.write_all(reply.format().as_bytes())?;
        self.writer.flush()
    }

    /// Consume the channel, yielding the write half
    pub(crate) fn into_writer(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn channel_over(input: &[u8]) -> LineChannel<Cursor<Vec<u8>>, Vec<u8>> {
        LineChannel::new(Cursor::new(input.to_vec()), Vec::new())
    }

    #[test]
    fn test_reads_crlf_lines() {
        let mut ch = channel_over(b"EHLO client1\r\nMAIL FROM:<a@b>\r\n");
        assert_eq!(ch.recv_line().unwrap(), Some("EHLO client1".to_string()));
        assert_eq!(ch.recv_line().unwrap(), Some("MAIL FROM:<a@b>".to_string()));
        assert_eq!(ch.recv_line().unwrap(), None);
    }

    #[test]
    fn test_reads_bare_lf_lines() {
        let mut ch = channel_over(b"QUIT\n");
        assert_eq!(ch.recv_line().unwrap(), Some("QUIT".to_string()));
    }

    #[test]
    fn test_preserves_inner_whitespace() {
        let mut ch = channel_over(b" . \r\n");
        assert_eq!(ch.recv_line().unwrap(), Some(" . ".to_string()));
    }

    #[test]
    fn test_eof_yields_none() {
        let mut ch = channel_over(b"");
        assert_eq!(ch.recv_line().unwrap(), None);
    }

    #[test]
    fn test_send_writes_crlf_terminated_reply() {
        let mut ch = channel_over(b"");
        ch.send(&Reply::bad_sequence()).unwrap();
        assert_eq!(ch.writer, b"503 bad sequence of commands\r\n");
    }
}
