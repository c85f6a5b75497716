/// Services module
/// Serial session handling and the state behind the console widgets
/// Separated from commands module so it can be used without a window

pub mod console;
pub mod poller;
pub mod ports;
pub mod serial;
pub mod transport;

pub use console::Console;
pub use ports::PortSelector;
pub use serial::SessionManager;
pub use transport::{Link, SystemTransport, Transport};
