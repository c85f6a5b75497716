/// Models module
/// Shared data types between the serial services and the frontend
/// All types crossing the IPC boundary are serializable

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Baud rate used by the interactive console
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Event carrying one rendered log line received from the device
pub const CONSOLE_LINE_EVENT: &str = "console-line";

/// Event carrying a repopulated `PortSelection`
pub const PORTS_CHANGED_EVENT: &str = "ports-changed";

/// Parameters the transport actually negotiated for an open connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub port: String,
    pub baud_rate: u32,
    pub parity: String,
    pub stop_bits: String,
    pub data_bits: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Sent,
    Received,
}

/// One entry of the console log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogLine {
    pub kind: LogKind,
    pub text: String,
}

impl LogLine {
    pub fn sent(text: impl Into<String>) -> Self {
        Self {
            kind: LogKind::Sent,
            text: text.into(),
        }
    }

    pub fn received(text: impl Into<String>) -> Self {
        Self {
            kind: LogKind::Received,
            text: text.into(),
        }
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LogKind::Sent => write!(f, "Sent: {}", self.text),
            LogKind::Received => write!(f, "Received: {}", self.text),
        }
    }
}

/// Snapshot of the command entry, recall cursor and log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleState {
    pub entry: String,
    pub cursor: usize,
    pub history_len: usize,
    pub log: Vec<String>,
}

/// Contents of the port selector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSelection {
    pub ports: Vec<String>,
    pub selected: Option<String>,
}

/// Timing and line settings shared by the session manager and the poller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialDefaults {
    pub baud_rate: u32,
    /// Upper bound of a single blocking `read_line`
    pub read_timeout: Duration,
    /// Delay between app setup and the first poll
    pub startup_delay: Duration,
    /// How long the poller sleeps between checks while disconnected
    pub idle_wait: Duration,
    /// Delay before a port refresh actually enumerates devices
    pub refresh_delay: Duration,
}

impl Default for SerialDefaults {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout: Duration::from_secs(1),
            startup_delay: Duration::from_millis(500),
            idle_wait: Duration::from_millis(100),
            refresh_delay: Duration::from_millis(100),
        }
    }
}
