//! File Chooser Manager.
//!
//! Bridges the engine's file-chooser request to the OS picker and hands the
//! selection back to the engine callback.

use tracing::{debug, error, info, warn};

use super::pending_slot::PendingSlot;
use crate::host::{FileChooserCallback, OsServices};
use crate::types::errors::BridgeError;
use crate::types::file_chooser::{FileChooserParams, FilePickerResult};
use crate::types::request::{RequestId, RequestKind};

/// Trait defining file-chooser bridging operations.
pub trait FileChooserManagerTrait {
    fn begin(
        &mut self,
        callback: Box<dyn FileChooserCallback>,
        params: &FileChooserParams,
        os: &mut dyn OsServices,
    ) -> bool;
    fn complete(&mut self, id: RequestId, result: FilePickerResult) -> Result<(), BridgeError>;
    fn cancel_pending(&mut self) -> bool;
    fn is_pending(&self) -> bool;
}

pub struct FileChooserManager {
    slot: PendingSlot<Box<dyn FileChooserCallback>>,
}

impl FileChooserManager {
    pub fn new() -> Self {
        Self {
            slot: PendingSlot::new(RequestKind::FileChooser),
        }
    }
}

impl Default for FileChooserManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FileChooserManagerTrait for FileChooserManager {
    /// Registers `callback` and starts the OS picker.
    ///
    /// Returns `false` only when the picker could not be started; the
    /// callback has then already received `None`.
    fn begin(
        &mut self,
        callback: Box<dyn FileChooserCallback>,
        params: &FileChooserParams,
        os: &mut dyn OsServices,
    ) -> bool {
        let id = match self.slot.register(callback) {
            Ok(id) => id,
            Err(rejected) => {
                warn!(error = %rejected.error, "rejecting file chooser request");
                rejected.value.on_receive_value(None);
                return true;
            }
        };

        match os.launch_file_picker(id, params) {
            Ok(()) => {
                info!(%id, filter = %params.mime_filter(), multiple = params.allow_multiple, "file picker launched");
                true
            }
            Err(e) => {
                error!(%id, error = %e, "failed to launch file picker");
                if let Some(callback) = self.slot.take_any() {
                    callback.on_receive_value(None);
                }
                false
            }
        }
    }

    /// Delivers the picker outcome to the pending callback.
    ///
    /// Any malformed selection is delivered as `None`. The slot is cleared
    /// whenever `id` matches the pending request.
    fn complete(&mut self, id: RequestId, result: FilePickerResult) -> Result<(), BridgeError> {
        let callback = self.slot.take(id)?;
        match result.into_uris() {
            Ok(uris) => {
                debug!(%id, count = uris.as_ref().map_or(0, Vec::len), "delivering file selection");
                callback.on_receive_value(uris);
                Ok(())
            }
            Err(e) => {
                error!(%id, error = %e, "error handling file chooser result");
                callback.on_receive_value(None);
                Err(e)
            }
        }
    }

    /// Resolves a pending request as cancelled. Returns whether one was pending.
    fn cancel_pending(&mut self) -> bool {
        match self.slot.take_any() {
            Some(callback) => {
                callback.on_receive_value(None);
                true
            }
            None => false,
        }
    }

    fn is_pending(&self) -> bool {
        self.slot.is_pending()
    }
}
