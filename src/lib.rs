/// Arduino Control
/// Desktop console for a serial-attached microcontroller, Tauri backend + HTML frontend
///
/// Module structure:
/// - commands: Tauri IPC handlers (frontend → backend)
/// - services: serial session, port enumeration, console state, background poller
/// - models: Shared data types
/// - error: Errors raised by the serial layer

#[cfg(feature = "gui")]
mod commands;
pub mod error;
pub mod models;
pub mod services;

#[cfg(feature = "gui")]
pub use gui::run;

#[cfg(feature = "gui")]
mod gui {
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tauri::RunEvent;

    use crate::commands;
    use crate::models::SerialDefaults;
    use crate::services::{poller, Console, PortSelector, SessionManager, SystemTransport};

    #[cfg_attr(mobile, tauri::mobile_entry_point)]
    pub fn run() {
        let defaults = SerialDefaults::default();
        let session = Arc::new(SessionManager::new(SystemTransport, defaults.read_timeout));
        let session_for_poller = session.clone();
        let session_for_shutdown = session.clone();

        tauri::Builder::default()
            .plugin(tauri_plugin_dialog::init())
            .manage(session)
            .manage(Mutex::new(Console::new()))
            .manage(Mutex::new(PortSelector::new()))
            .manage(defaults)
            .setup(move |app| {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(if cfg!(debug_assertions) {
                            log::LevelFilter::Info
                        } else {
                            log::LevelFilter::Warn
                        })
                        .build(),
                )?;

                commands::ports::schedule_refresh(app.handle().clone());

                let handle = app.handle().clone();
                poller::spawn(session_for_poller, defaults, move |line| {
                    commands::console::append_received(&handle, line)
                });
                Ok(())
            })
            .invoke_handler(tauri::generate_handler![
                commands::ports::ports_list,
                commands::ports::ports_refresh,
                commands::serial::serial_connect,
                commands::serial::serial_disconnect,
                commands::serial::serial_is_open,
                commands::console::console_submit,
                commands::console::console_back,
                commands::console::console_forward,
                commands::console::console_state,
            ])
            .build(tauri::generate_context!())
            .expect("error while building tauri application")
            .run(move |_app_handle, event| {
                if let RunEvent::Exit = event {
                    log::info!("App shutting down - closing serial port");
                    session_for_shutdown.disconnect();
                }
            });
    }
}
