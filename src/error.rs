use std::io;

use thiserror::Error;

/// Errors raised by the serial session layer.
#[derive(Debug, Error)]
pub enum SerialError {
    /// The device could not be opened (missing, busy, permission denied)
    #[error("Failed to open {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: io::Error,
    },
    /// Writing to an open connection failed
    #[error("Failed to write to serial port: {0}")]
    Write(#[source] io::Error),
    /// A second handle for the reader thread could not be created
    #[error("Failed to clone serial port handle: {0}")]
    CloneHandle(#[source] io::Error),
    /// The operating system could not list serial devices
    #[error("Failed to enumerate serial ports: {0}")]
    Enumerate(String),
}

pub type Result<T> = std::result::Result<T, SerialError>;
