//! One-shot sender: writes its argument to a serial port and exits.
//!
//! Usage:
//!   serial-send 'H(90)'
//!   serial-send --port /dev/ttyACM0 --baud 115200 GET

use std::process::ExitCode;

use arduino_control_lib::services::SessionManager;
use clap::error::ErrorKind;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "serial-send", about = "Send one command to a serial device")]
struct Args {
    /// Text to send, written exactly as given
    data: String,

    /// Serial device to open
    #[arg(long, default_value = "/dev/ttyUSB0")]
    port: String,

    /// Baud rate
    #[arg(long, default_value_t = 9600)]
    baud: u32,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    let manager = SessionManager::default();
    let sent = manager
        .connect(&args.port, args.baud)
        .and_then(|_| manager.send(&args.data));
    manager.disconnect();

    // Transport errors are reported, not treated as a failed invocation
    match sent {
        Ok(()) => println!("Sent: {}", args.data),
        Err(e) => println!("Error: {}", e),
    }
    ExitCode::SUCCESS
}
