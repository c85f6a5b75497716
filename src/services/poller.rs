/// Poller Service
/// Background thread that pulls incoming lines off the open connection

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::models::SerialDefaults;
use crate::services::serial::SessionManager;

/// One poll cycle.
///
/// While disconnected this waits up to `idle_wait` for a connection instead
/// of spinning. A read that fails straight away (a device that has gone) is
/// padded out to `idle_wait` as well. Returns whether a line was delivered.
pub fn poll_once(
    manager: &SessionManager,
    idle_wait: Duration,
    on_line: &impl Fn(String),
) -> bool {
    if !manager.is_open() {
        manager.wait_until_open(idle_wait);
        return false;
    }

    let started = Instant::now();
    match manager.read_line() {
        Some(line) => {
            on_line(line);
            true
        }
        None => {
            let elapsed = started.elapsed();
            if elapsed < idle_wait {
                thread::sleep(idle_wait - elapsed);
            }
            false
        }
    }
}

/// Start the poller; it runs until the process exits.
///
/// `on_line` is called on the poller thread and must hand the line over to
/// whoever owns the view.
pub fn spawn(
    manager: Arc<SessionManager>,
    defaults: SerialDefaults,
    on_line: impl Fn(String) + Send + 'static,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        thread::sleep(defaults.startup_delay);
        log::info!("Serial poller started");

        loop {
            poll_once(&manager, defaults.idle_wait, &on_line);
        }
    })
}
