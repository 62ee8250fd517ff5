//! Recognition of SMTP command lines
//!
//! Each parse function returns the captured value when the line matches the
//! expected shape and `None` otherwise, so the session state machine never
//! sees anything but a tagged result. Command keywords are case-sensitive.

/// Parse an `EHLO <id>` line, capturing the client identifier.
pub fn ehlo(line: &str) -> Option<&str> {
    non_empty(line.strip_prefix("EHLO ")?)
}

/// Parse a `MAIL FROM:<addr>` line, capturing the sender address.
pub fn mail_from(line: &str) -> Option<&str> {
    bracketed(line.strip_prefix("MAIL FROM:")?)
}

/// Parse a `RCPT TO:<addr>` line, capturing the recipient address.
pub fn rcpt_to(line: &str) -> Option<&str> {
    bracketed(line.strip_prefix("RCPT TO:")?)
}

/// Capture the text between angle brackets, e.g. `<a@b>` yields `a@b`.
fn bracketed(arg: &str) -> Option<&str> {
    non_empty(arg.strip_prefix('<')?.strip_suffix('>')?)
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}
