// webview-shell request managers
// Managers hold the pending callback for each asynchronous engine request and pair it with the OS result.

pub mod file_chooser_manager;
pub mod geolocation_manager;
pub mod history_tracker;
pub mod media_permission_manager;
pub mod pending_slot;
