use maildump::SmtpStub;
use std::env;
use std::net::IpAddr;
use std::thread;

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();

    let storage_dir = if args.len() > 1 {
        args[1].as_str()
    } else {
        "./captured-mail"
    };

    let addr: IpAddr = if args.len() > 2 {
        match args[2].parse() {
            Ok(addr) => addr,
            Err(e) => {
                eprintln!("Invalid bind address '{}': {e}", args[2]);
                std::process::exit(1);
            }
        }
    } else {
        "127.0.0.1".parse().unwrap()
    };

    let port: Option<u16> = if args.len() > 3 {
        match args[3].parse() {
            Ok(port) => Some(port),
            Err(e) => {
                eprintln!("Invalid port '{}': {e}", args[3]);
                std::process::exit(1);
            }
        }
    } else {
        None
    };

    let mut server = SmtpStub::new(addr, storage_dir, port);
    if let Err(e) = server.start() {
        eprintln!("Failed to start server: {e}");
        std::process::exit(1);
    }

    println!("MailDump stub SMTP server");
    println!("Address: {addr}:{}", server.port().expect("server started"));
    println!("Storage: {storage_dir}");
    println!("Waiting for one client; Ctrl-C to exit");

    loop {
        thread::park();
    }
}
