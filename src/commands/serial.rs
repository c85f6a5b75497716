/// Serial Commands
/// Connect and disconnect the serial session

use parking_lot::Mutex;
use std::sync::Arc;
use tauri::{AppHandle, State};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

use crate::models::{ConnectionInfo, SerialDefaults};
use crate::services::{PortSelector, SessionManager};

/// Connect to `port`, replacing any open connection.
///
/// A failure is also shown to the user as an error dialog.
#[tauri::command]
pub fn serial_connect(
    app: AppHandle,
    session: State<'_, Arc<SessionManager>>,
    ports: State<'_, Mutex<PortSelector>>,
    defaults: State<'_, SerialDefaults>,
    port: String,
) -> Result<ConnectionInfo, String> {
    ports.lock().select(&port);

    session.connect(&port, defaults.baud_rate).map_err(|e| {
        log::error!("{}", e);
        app.dialog()
            .message(e.to_string())
            .title("Connection failed")
            .kind(MessageDialogKind::Error)
            .show(|_| {});
        e.to_string()
    })
}

#[tauri::command]
pub fn serial_disconnect(session: State<'_, Arc<SessionManager>>) {
    session.disconnect()
}

#[tauri::command]
pub fn serial_is_open(session: State<'_, Arc<SessionManager>>) -> bool {
    session.is_open()
}
