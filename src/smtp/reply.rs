//! SMTP reply handling

/// Banner announced in the greeting and the closing reply.
pub const BANNER: &str = "mail.dumper";

/// Represents a single SMTP reply line sent to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// The SMTP reply code (e.g. 250, 354, 503)
    pub code: u16,
    /// The human-readable text after the code
    pub text: String,
}

impl Reply {
    /// Create a new reply
    pub fn new(code: u16, text: impl Into<String>) -> Self {
        Self {
            code,
            text: text.into(),
        }
    }

    /// Create the greeting reply (220), sent before any client line
    pub fn greeting() -> Self {
        Self::new(220, format!("{BANNER} this is simple stub SMTP server"))
    }

    /// Create the EHLO acknowledgement (250) with the peer address
    pub fn hello(client_id: &str, peer: &std::net::IpAddr) -> Self {
        Self::new(250, format!("{BANNER} hello {client_id} [{peer}]"))
    }

    /// Create the MAIL FROM acknowledgement (250)
    pub fn sender_accepted(sender: &str) -> Self {
        Self::new(250, format!("{sender} sender accepted"))
    }

    /// Create the RCPT TO acknowledgement (250)
    pub fn recipient_ok(recipient: &str) -> Self {
        Self::new(250, format!("{recipient} ok"))
    }

    /// Create the DATA intermediate reply (354)
    pub fn data_go_ahead() -> Self {
        Self::new(354, "enter mail, end with '.' on a line by itself")
    }

    /// Create the end-of-capture acknowledgement (250)
    pub fn message_accepted() -> Self {
        Self::new(250, "message accepted for delivery")
    }

    /// Create the QUIT reply (221)
    pub fn closing() -> Self {
        Self::new(221, format!("{BANNER} closing connection"))
    }

    /// Create the out-of-sequence rejection (503)
    pub fn bad_sequence() -> Self {
        Self::new(503, "bad sequence of commands")
    }

    /// Format the reply for sending over the wire
    pub fn format(&self) -> String {
        format!("{} {}\r\n", self.code, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting() {
        let reply = Reply::greeting();
        assert_eq!(reply.code, 220);
        assert_eq!(
            reply.format(),
            "220 mail.dumper this is simple stub SMTP server\r\n"
        );
    }

    #[test]
    fn test_hello_includes_peer_address() {
        let peer = "127.0.0.1".parse().unwrap();
        let reply = Reply::hello("client1", &peer);
        assert_eq!(reply.format(), "250 mail.dumper hello client1 [127.0.0.1]\r\n");
    }

    #[test]
    fn test_transaction_replies() {
        assert_eq!(
            Reply::sender_accepted("admin@example.com").format(),
            "250 admin@example.com sender accepted\r\n"
        );
        assert_eq!(
            Reply::recipient_ok("me@example.com").format(),
            "250 me@example.com ok\r\n"
        );
        assert_eq!(
            Reply::data_go_ahead().format(),
            "354 enter mail, end with '.' on a line by itself\r\n"
        );
        assert_eq!(
            Reply::message_accepted().format(),
            "250 message accepted for delivery\r\n"
        );
        assert_eq!(
            Reply::closing().format(),
            "221 mail.dumper closing connection\r\n"
        );
    }

    #[test]
    fn test_bad_sequence_is_lowercase() {
        assert_eq!(
            Reply::bad_sequence().format(),
            "503 bad sequence of commands\r\n"
        );
    }
}
