/// Console Commands
/// Command entry, history recall and the output log

use parking_lot::Mutex;
use std::sync::Arc;
use tauri::{AppHandle, Emitter, Manager, State};

use crate::models::{ConsoleState, CONSOLE_LINE_EVENT};
use crate::services::{Console, SessionManager};

/// Send `entry` to the device (Enter key or Send button)
#[tauri::command]
pub fn console_submit(
    session: State<'_, Arc<SessionManager>>,
    console: State<'_, Mutex<Console>>,
    entry: String,
) -> Result<ConsoleState, String> {
    let mut console = console.lock();
    console.set_entry(entry);
    console
        .submit(|command| session.send(command))
        .map_err(|e| {
            log::error!("{}", e);
            e.to_string()
        })?;
    Ok(console.state())
}

/// Recall the previous command (Up key)
#[tauri::command]
pub fn console_back(console: State<'_, Mutex<Console>>, entry: String) -> ConsoleState {
    let mut console = console.lock();
    console.set_entry(entry);
    console.history_back();
    console.state()
}

/// Recall the next command (Down key)
#[tauri::command]
pub fn console_forward(console: State<'_, Mutex<Console>>, entry: String) -> ConsoleState {
    let mut console = console.lock();
    console.set_entry(entry);
    console.history_forward();
    console.state()
}

#[tauri::command]
pub fn console_state(console: State<'_, Mutex<Console>>) -> ConsoleState {
    console.lock().state()
}

/// Record a line from the poller and push it to the window
pub fn append_received(app: &AppHandle, line: String) {
    let rendered = app
        .state::<Mutex<Console>>()
        .lock()
        .push_received(line)
        .to_string();
    let _ = app.emit(CONSOLE_LINE_EVENT, rendered);
}
