#![allow(dead_code)]

use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use arduino_control_lib::error::{Result, SerialError};
use arduino_control_lib::models::ConnectionInfo;
use arduino_control_lib::services::{Link, Transport};

pub const READ_TIMEOUT: Duration = Duration::from_millis(20);

/// What the next `read` on a mock device returns
pub enum Incoming {
    Bytes(Vec<u8>),
    Error(io::ErrorKind),
}

/// A fake serial device shared by every handle opened on it
#[derive(Default)]
pub struct MockDevice {
    incoming: Mutex<VecDeque<Incoming>>,
    written: Mutex<Vec<u8>>,
    handles: AtomicUsize,
    opens: AtomicUsize,
    closes: AtomicUsize,
    dead: AtomicBool,
    exclusive: AtomicBool,
    trickle: Mutex<Option<Duration>>,
}

impl MockDevice {
    pub fn push_bytes(&self, bytes: &[u8]) {
        self.incoming.lock().push_back(Incoming::Bytes(bytes.to_vec()));
    }

    pub fn push_error(&self, kind: io::ErrorKind) {
        self.incoming.lock().push_back(Incoming::Error(kind));
    }

    pub fn written(&self) -> Vec<u8> {
        self.written.lock().clone()
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    /// Number of times every handle onto the device was released
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn is_held(&self) -> bool {
        self.handles.load(Ordering::SeqCst) > 0
    }

    /// Make the links report themselves closed, like an unplugged adapter
    pub fn kill(&self) {
        self.dead.store(true, Ordering::SeqCst);
    }

    /// Refuse a new open while any handle is still held, like a locked tty
    pub fn lock_exclusively(&self) {
        self.exclusive.store(true, Ordering::SeqCst);
    }

    /// Delay every chunk of incoming bytes by `delay`
    pub fn trickle(&self, delay: Duration) {
        *self.trickle.lock() = Some(delay);
    }
}

pub struct MockLink {
    name: String,
    device: Arc<MockDevice>,
}

impl MockLink {
    fn attach(name: &str, device: Arc<MockDevice>) -> Self {
        device.handles.fetch_add(1, Ordering::SeqCst);
        Self {
            name: name.to_string(),
            device,
        }
    }
}

impl Drop for MockLink {
    fn drop(&mut self) {
        if self.device.handles.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.device.closes.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl Read for MockLink {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let next = self.device.incoming.lock().pop_front();
        match next {
            Some(Incoming::Bytes(mut bytes)) => {
                let trickle = *self.device.trickle.lock();
                if let Some(delay) = trickle {
                    thread::sleep(delay);
                }
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                if n < bytes.len() {
                    let rest = bytes.split_off(n);
                    self.device.incoming.lock().push_front(Incoming::Bytes(rest));
                }
                Ok(n)
            }
            Some(Incoming::Error(kind)) => Err(io::Error::new(kind, "mock read error")),
            None => {
                thread::sleep(READ_TIMEOUT);
                Err(io::Error::new(io::ErrorKind::TimedOut, "Operation timed out"))
            }
        }
    }
}

impl Write for MockLink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.device.written.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Link for MockLink {
    fn try_clone_link(&self) -> Result<Box<dyn Link>> {
        Ok(Box::new(MockLink::attach(&self.name, self.device.clone())))
    }

    fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            port: self.name.clone(),
            baud_rate: 115_200,
            parity: "None".to_string(),
            stop_bits: "One".to_string(),
            data_bits: "Eight".to_string(),
        }
    }

    fn is_open(&self) -> bool {
        !self.device.dead.load(Ordering::SeqCst)
    }
}

/// Transport over a fixed set of mock devices
#[derive(Default)]
pub struct MockTransport {
    devices: HashMap<String, Arc<MockDevice>>,
    listing: Option<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device that can be opened under `name`
    pub fn with_device(mut self, name: &str) -> (Self, Arc<MockDevice>) {
        let device = Arc::new(MockDevice::default());
        self.devices.insert(name.to_string(), device.clone());
        (self, device)
    }

    /// Ports reported by enumeration; without this enumeration fails
    pub fn with_listing(mut self, ports: &[&str]) -> Self {
        self.listing = Some(ports.iter().map(|p| p.to_string()).collect());
        self
    }
}

impl Transport for MockTransport {
    fn available_ports(&self) -> Result<Vec<String>> {
        self.listing
            .clone()
            .ok_or_else(|| SerialError::Enumerate("no udev".to_string()))
    }

    fn open(&self, port: &str, _baud_rate: u32, _timeout: Duration) -> Result<Box<dyn Link>> {
        let device = self.devices.get(port).ok_or_else(|| SerialError::Open {
            port: port.to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        })?;
        if device.exclusive.load(Ordering::SeqCst) && device.is_held() {
            return Err(SerialError::Open {
                port: port.to_string(),
                source: io::Error::new(
                    io::ErrorKind::Other,
                    "Unable to acquire exclusive lock on serial port",
                ),
            });
        }
        device.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockLink::attach(port, device.clone())))
    }
}
