/// Commands module
/// All Tauri commands (IPC handlers) are defined here
/// Commands act as the boundary between the frontend and the serial services

pub mod console;
pub mod ports;
pub mod serial;
