//! End-to-end test with a real SMTP client

use lettre::message::{Mailbox, Message};
use lettre::{SmtpTransport, Transport};
use maildump::SmtpStub;
use std::error::Error;
use std::fs;

#[test]
fn basic_lettre_send() -> Result<(), Box<dyn Error>> {
    let dir = std::env::temp_dir().join(format!("maildump-lettre-{}", uuid::Uuid::new_v4()));
    let mut server = SmtpStub::new("127.0.0.1".parse()?, &dir, None);
    server.start()?;

    let message = Message::builder()
        .from("admin@example.com".parse::<Mailbox>()?)
        .to("me@example.com".parse::<Mailbox>()?)
        .subject("Hello")
        .body("Test".to_owned())?;

    let mailer = SmtpTransport::builder_dangerous("127.0.0.1")
        .port(server.port()?)
        .build();

    mailer.send(&message)?;

    let files: Vec<_> = fs::read_dir(&dir)?.map(|e| e.unwrap().path()).collect();
    assert_eq!(files.len(), 1);

    let content = fs::read_to_string(&files[0])?;
    assert!(content.contains("Subject: Hello"));
    assert!(content.contains("Test"));

    fs::remove_dir_all(&dir)?;
    Ok(())
}
