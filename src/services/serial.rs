/// Serial Service
/// Owns the single serial connection and performs raw line I/O

use parking_lot::{Condvar, Mutex};
use std::io::{self, BufRead, BufReader, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{Result, SerialError};
use crate::models::{ConnectionInfo, SerialDefaults};
use crate::services::transport::{Link, SystemTransport, Transport};

/// One open connection
pub struct Session {
    info: ConnectionInfo,
    read_timeout: Duration,
    // Both handles are taken out on close; the reader thread may still hold
    // an `Arc` to a closed session.
    writer: Mutex<Option<Box<dyn Link>>>,
    reader: Mutex<Option<BufReader<Box<dyn Link>>>>,
}

impl Session {
    pub fn info(&self) -> &ConnectionInfo {
        &self.info
    }

    fn is_open(&self) -> bool {
        self.writer.lock().as_ref().is_some_and(|link| link.is_open())
    }

    fn write(&self, data: &[u8]) -> io::Result<()> {
        let mut writer = self.writer.lock();
        let link = writer
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "serial port closed"))?;
        link.write_all(data)?;
        link.flush()
    }

    /// Release both handles so the device can be opened again.
    ///
    /// Blocks until a read in progress on another thread returns, which is
    /// bounded by the read timeout.
    fn close(&self) {
        let writer = self.writer.lock().take();
        let reader = self.reader.lock().take();
        if writer.is_some() || reader.is_some() {
            drop((writer, reader));
            log::debug!("Closed {}", self.info.port);
        }
    }

    fn read_line(&self) -> Option<String> {
        let mut guard = self.reader.lock();
        let reader = guard.as_mut()?;

        // The timeout covers the whole line, not each underlying read
        let deadline = Instant::now() + self.read_timeout;
        let mut raw = Vec::new();

        loop {
            let available = match reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                // A timeout mid-line still yields what arrived before it
                Err(e) if e.kind() == io::ErrorKind::TimedOut => break,
                Err(e) => {
                    log::debug!("Read from {} failed: {}", self.info.port, e);
                    return None;
                }
            };
            if available.is_empty() {
                break;
            }

            let (used, done) = match available.iter().position(|&b| b == b'\n') {
                Some(newline) => (newline + 1, true),
                None => (available.len(), false),
            };
            raw.extend_from_slice(&available[..used]);
            reader.consume(used);

            if done || Instant::now() >= deadline {
                break;
            }
        }

        decode_line(&raw)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

/// Decode raw line bytes as lossy UTF-8 with surrounding whitespace removed.
///
/// Returns `None` when nothing but whitespace was read.
pub fn decode_line(raw: &[u8]) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    log::debug!("Raw data: {:?}", raw);

    let line = String::from_utf8_lossy(raw).trim().to_string();
    log::debug!("Decoded data: {}", line);

    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}

/// Serial Manager - holds at most one connection at a time
pub struct SessionManager {
    transport: Box<dyn Transport>,
    read_timeout: Duration,
    session: Mutex<Option<Arc<Session>>>,
    opened: Condvar,
}

impl SessionManager {
    pub fn new(transport: impl Transport + 'static, read_timeout: Duration) -> Self {
        Self {
            transport: Box::new(transport),
            read_timeout,
            session: Mutex::new(None),
            opened: Condvar::new(),
        }
    }

    /// List attached serial devices, or nothing if the OS cannot tell us
    pub fn list_ports(&self) -> Vec<String> {
        match self.transport.available_ports() {
            Ok(ports) => ports,
            Err(e) => {
                log::warn!("Error listing serial ports: {}", e);
                Vec::new()
            }
        }
    }

    /// Open `port`, closing any connection that is already open
    pub fn connect(&self, port: &str, baud_rate: u32) -> Result<ConnectionInfo> {
        let mut session = self.session.lock();

        // Close existing session if any; the device may only be opened once
        if let Some(old) = session.take() {
            log::info!("Closing {} before connecting to {}", old.info.port, port);
            old.close();
        }

        let link = self.transport.open(port, baud_rate, self.read_timeout)?;
        let reader = link.try_clone_link()?;
        let info = link.connection_info();

        log::info!(
            "Connected to {} with baudrate {}, parity {}, stopbits {}, bytesize {}",
            info.port,
            info.baud_rate,
            info.parity,
            info.stop_bits,
            info.data_bits
        );

        *session = Some(Arc::new(Session {
            info: info.clone(),
            read_timeout: self.read_timeout,
            writer: Mutex::new(Some(link)),
            reader: Mutex::new(Some(BufReader::new(reader))),
        }));
        self.opened.notify_all();

        Ok(info)
    }

    /// Close the connection if there is one.
    ///
    /// Returns once the port is released, waiting out a read in progress.
    pub fn disconnect(&self) {
        let mut session = self.session.lock();
        if let Some(old) = session.take() {
            old.close();
            log::info!("Disconnected from serial port");
        }
    }

    pub fn is_open(&self) -> bool {
        self.current().is_some_and(|s| s.is_open())
    }

    /// Parameters of the open connection
    pub fn connection_info(&self) -> Option<ConnectionInfo> {
        self.current().map(|s| s.info.clone())
    }

    /// Write `command` verbatim; does nothing while disconnected
    pub fn send(&self, command: &str) -> Result<()> {
        let Some(session) = self.current().filter(|s| s.is_open()) else {
            return Ok(());
        };

        session.write(command.as_bytes()).map_err(SerialError::Write)?;
        log::info!("Sent data: {}", command);
        Ok(())
    }

    /// Block up to the read timeout for one line.
    ///
    /// Timeouts, empty reads and transport errors all come back as `None`.
    pub fn read_line(&self) -> Option<String> {
        // The manager lock is released before the blocking read so that
        // send never waits on the reader.
        let session = self.current().filter(|s| s.is_open())?;
        session.read_line()
    }

    /// Wait up to `timeout` for a connection to be opened.
    ///
    /// Returns immediately when one is already open.
    pub fn wait_until_open(&self, timeout: Duration) -> bool {
        let mut session = self.session.lock();
        if session.as_ref().is_some_and(|s| s.is_open()) {
            return true;
        }
        self.opened.wait_for(&mut session, timeout);
        session.as_ref().is_some_and(|s| s.is_open())
    }

    fn current(&self) -> Option<Arc<Session>> {
        self.session.lock().clone()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(SystemTransport, SerialDefaults::default().read_timeout)
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.disconnect();
    }
}
