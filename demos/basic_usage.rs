//! Basic usage walkthrough for the MailDump stub SMTP server
//!
//! Starts a stub on an ephemeral port, plays a complete dialogue against it
//! with a plain TCP client, and prints the captured message file.

use maildump::SmtpStub;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;

fn main() {
    println!("MailDump Basic Usage Example");
    println!("============================");

    let storage_dir = std::env::temp_dir().join("maildump-example");
    let _ = fs::remove_dir_all(&storage_dir);

    let mut server = SmtpStub::new("127.0.0.1".parse().unwrap(), &storage_dir, None);
    if let Err(e) = server.start() {
        eprintln!("Server error: {e}");
        return;
    }
    let port = server.port().unwrap();
    println!("Stub listening on 127.0.0.1:{port}");

    println!("\nSending test message...");
    if let Err(e) = send_test_message(port) {
        eprintln!("Failed to send message: {e}");
        return;
    }

    println!("\nCaptured files in {}:", storage_dir.display());
    for entry in fs::read_dir(&storage_dir).unwrap() {
        let path = entry.unwrap().path();
        println!("  {}", path.file_name().unwrap().to_string_lossy());
        for line in fs::read_to_string(&path).unwrap().lines() {
            println!("    {line}");
        }
    }

    server.stop();
}

fn send_test_message(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let mut stream = TcpStream::connect(("127.0.0.1", port))?;
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut response = String::new();
    reader.read_line(&mut response)?;
    print!("S: {response}");

    for line in [
        "EHLO client1",
        "MAIL FROM:<admin@example.com>",
        "RCPT TO:<me@example.com>",
        "DATA",
    ] {
        println!("C: {line}");
        write!(stream, "{line}\r\n")?;
        response.clear();
        reader.read_line(&mut response)?;
        print!("S: {response}");
    }

    for line in ["Subject: stub demo", "", "Hello from the example.", "."] {
        println!("C: {line}");
        write!(stream, "{line}\r\n")?;
    }
    response.clear();
    reader.read_line(&mut response)?;
    print!("S: {response}");

    println!("C: QUIT");
    write!(stream, "QUIT\r\n")?;
    response.clear();
    reader.read_line(&mut response)?;
    print!("S: {response}");

    Ok(())
}
