/// Transport Service
/// Opens serial links and lists the devices the OS knows about

use std::io::{self, Read, Write};
use std::time::Duration;

use serialport::SerialPort;

use crate::error::{Result, SerialError};
use crate::models::ConnectionInfo;

/// Source of serial links
pub trait Transport: Send + Sync {
    /// Names of the currently attached serial devices, in OS order
    fn available_ports(&self) -> Result<Vec<String>>;

    /// Open `port`; reads on the returned link block for at most `timeout`
    fn open(&self, port: &str, baud_rate: u32, timeout: Duration) -> Result<Box<dyn Link>>;
}

/// An open serial connection
pub trait Link: Read + Write + Send {
    /// Second handle onto the same device, used by the reader thread
    fn try_clone_link(&self) -> Result<Box<dyn Link>>;

    fn connection_info(&self) -> ConnectionInfo;

    fn is_open(&self) -> bool {
        true
    }
}

/// `Transport` backed by the operating system's serial devices
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTransport;

impl Transport for SystemTransport {
    fn available_ports(&self) -> Result<Vec<String>> {
        let ports =
            serialport::available_ports().map_err(|e| SerialError::Enumerate(e.to_string()))?;
        Ok(ports.into_iter().map(|info| info.port_name).collect())
    }

    fn open(&self, port: &str, baud_rate: u32, timeout: Duration) -> Result<Box<dyn Link>> {
        let handle = serialport::new(port, baud_rate)
            .timeout(timeout)
            .open()
            .map_err(|e| SerialError::Open {
                port: port.to_string(),
                source: e.into(),
            })?;

        Ok(Box::new(SystemLink {
            name: port.to_string(),
            port: handle,
        }))
    }
}

struct SystemLink {
    name: String,
    port: Box<dyn SerialPort>,
}

impl Read for SystemLink {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.port.read(buf)
    }
}

impl Write for SystemLink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.port.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.port.flush()
    }
}

impl Link for SystemLink {
    fn try_clone_link(&self) -> Result<Box<dyn Link>> {
        let port = self
            .port
            .try_clone()
            .map_err(|e| SerialError::CloneHandle(e.into()))?;
        Ok(Box::new(SystemLink {
            name: self.name.clone(),
            port,
        }))
    }

    fn connection_info(&self) -> ConnectionInfo {
        // Settings the driver refuses to report are shown as "unknown"
        let describe = |setting: serialport::Result<String>| {
            setting.unwrap_or_else(|_| "unknown".to_string())
        };

        ConnectionInfo {
            port: self.name.clone(),
            baud_rate: self.port.baud_rate().unwrap_or_default(),
            parity: describe(self.port.parity().map(|p| format!("{:?}", p))),
            stop_bits: describe(self.port.stop_bits().map(|s| format!("{:?}", s))),
            data_bits: describe(self.port.data_bits().map(|d| format!("{:?}", d))),
        }
    }
}
