/// Port Commands
/// Fill the port selector from the serial devices currently attached

use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use tauri::{AppHandle, Emitter, Manager, State};

use crate::models::{PortSelection, SerialDefaults, PORTS_CHANGED_EVENT};
use crate::services::{PortSelector, SessionManager};

#[tauri::command]
pub fn ports_list(ports: State<'_, Mutex<PortSelector>>) -> PortSelection {
    ports.lock().selection()
}

/// Clear the selection now and enumerate devices shortly after.
///
/// The fresh list arrives as a `ports-changed` event.
#[tauri::command]
pub fn ports_refresh(app: AppHandle, ports: State<'_, Mutex<PortSelector>>) -> PortSelection {
    let stale = ports.lock().begin_refresh();
    schedule_refresh(app);
    stale
}

/// Enumerate on a background thread after the refresh delay
pub fn schedule_refresh(app: AppHandle) {
    let delay = app.state::<SerialDefaults>().refresh_delay;

    thread::spawn(move || {
        thread::sleep(delay);

        let found = app.state::<Arc<SessionManager>>().list_ports();
        log::debug!("Found serial ports: {:?}", found);

        let selection = app.state::<Mutex<PortSelector>>().lock().populate(found);
        let _ = app.emit(PORTS_CHANGED_EVENT, selection);
    });
}
