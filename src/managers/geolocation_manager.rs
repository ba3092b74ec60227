//! Geolocation Manager.
//!
//! Answers in-page geolocation prompts from the OS location permission.
//! Grants are never retained by the engine; the OS remains the source of truth.

use tracing::{debug, error, info, warn};

use super::pending_slot::PendingSlot;
use crate::host::{GeolocationCallback, OsServices};
use crate::types::errors::BridgeError;
use crate::types::permission::{OsPermission, PermissionResults};
use crate::types::request::{RequestId, RequestKind};

/// Either permission is enough for the engine to hand out a position.
pub const LOCATION_PERMISSIONS: [OsPermission; 2] =
    [OsPermission::FineLocation, OsPermission::CoarseLocation];

pub trait GeolocationManagerTrait {
    fn show_prompt(&mut self, origin: &str, callback: Box<dyn GeolocationCallback>, os: &mut dyn OsServices);
    fn complete(&mut self, id: RequestId, results: &PermissionResults) -> Result<bool, BridgeError>;
    fn cancel_pending(&mut self) -> bool;
    fn is_pending(&self) -> bool;
    fn pending_origin(&self) -> Option<&str>;
}

struct PendingPrompt {
    origin: String,
    callback: Box<dyn GeolocationCallback>,
}

impl PendingPrompt {
    fn resolve(self, allow: bool) {
        self.callback.invoke(&self.origin, allow, false);
    }
}

pub struct GeolocationManager {
    slot: PendingSlot<PendingPrompt>,
}

impl GeolocationManager {
    pub fn new() -> Self {
        Self {
            slot: PendingSlot::new(RequestKind::Geolocation),
        }
    }

    fn location_granted(os: &dyn OsServices) -> bool {
        LOCATION_PERMISSIONS.iter().any(|p| os.check_permission(*p))
    }
}

impl Default for GeolocationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl GeolocationManagerTrait for GeolocationManager {
    fn show_prompt(&mut self, origin: &str, callback: Box<dyn GeolocationCallback>, os: &mut dyn OsServices) {
        if Self::location_granted(os) {
            debug!(origin, "location already granted");
            callback.invoke(origin, true, false);
            return;
        }

        let prompt = PendingPrompt {
            origin: origin.to_string(),
            callback,
        };
        let id = match self.slot.register(prompt) {
            Ok(id) => id,
            Err(rejected) => {
                warn!(origin, error = %rejected.error, "denying overlapping geolocation prompt");
                rejected.value.resolve(false);
                return;
            }
        };

        if let Err(e) = os.request_permissions(id, RequestKind::Geolocation, &LOCATION_PERMISSIONS) {
            error!(origin, error = %e, "failed to request location permission");
            if let Some(prompt) = self.slot.take_any() {
                prompt.resolve(false);
            }
            return;
        }
        info!(%id, origin, "location permission requested");
    }

    /// Resolves the pending prompt. Returns whether location was granted.
    fn complete(&mut self, id: RequestId, results: &PermissionResults) -> Result<bool, BridgeError> {
        let prompt = self.slot.take(id)?;
        let granted = LOCATION_PERMISSIONS
            .iter()
            .any(|p| results.get(p).copied().unwrap_or(false));
        info!(%id, origin = %prompt.origin, granted, "geolocation prompt resolved");
        prompt.resolve(granted);
        Ok(granted)
    }

    fn cancel_pending(&mut self) -> bool {
        match self.slot.take_any() {
            Some(prompt) => {
                prompt.resolve(false);
                true
            }
            None => false,
        }
    }

    fn is_pending(&self) -> bool {
        self.slot.is_pending()
    }

    fn pending_origin(&self) -> Option<&str> {
        self.slot.peek().map(|p| p.origin.as_str())
    }
}
