//! Media Permission Manager.
//!
//! Maps in-page capture requests (camera, microphone) to OS permissions and
//! grants or denies the request once the OS answers.

use tracing::{debug, error, info, warn};

use super::pending_slot::PendingSlot;
use crate::host::{OsServices, PermissionRequest};
use crate::types::errors::BridgeError;
use crate::types::permission::{MediaResource, OsPermission, PermissionResults};
use crate::types::request::{RequestId, RequestKind};

pub trait MediaPermissionManagerTrait {
    fn on_request(&mut self, request: Box<dyn PermissionRequest>, os: &mut dyn OsServices);
    fn complete(&mut self, id: RequestId, results: &PermissionResults) -> Result<bool, BridgeError>;
    /// The engine withdrew the request; it must not be resolved any more.
    fn withdraw(&mut self) -> bool;
    fn cancel_pending(&mut self) -> bool;
    fn is_pending(&self) -> bool;
}

/// OS permissions needed for `resources`, without duplicates, in request order.
pub fn required_permissions(resources: &[MediaResource]) -> Vec<OsPermission> {
    let mut perms = Vec::new();
    for p in resources.iter().filter_map(MediaResource::required_permission) {
        if !perms.contains(&p) {
            perms.push(p);
        }
    }
    perms
}

struct PendingMedia {
    request: Box<dyn PermissionRequest>,
    requested: Vec<OsPermission>,
}

fn grant_all(request: Box<dyn PermissionRequest>) {
    let resources = request.resources().to_vec();
    request.grant(&resources);
}

pub struct MediaPermissionManager {
    slot: PendingSlot<PendingMedia>,
}

impl MediaPermissionManager {
    pub fn new() -> Self {
        Self {
            slot: PendingSlot::new(RequestKind::Media),
        }
    }
}

impl Default for MediaPermissionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaPermissionManagerTrait for MediaPermissionManager {
    fn on_request(&mut self, request: Box<dyn PermissionRequest>, os: &mut dyn OsServices) {
        let missing: Vec<OsPermission> = required_permissions(request.resources())
            .into_iter()
            .filter(|p| !os.check_permission(*p))
            .collect();

        if missing.is_empty() {
            debug!(origin = request.origin(), "media permissions already satisfied");
            grant_all(request);
            return;
        }

        let pending = PendingMedia {
            request,
            requested: missing.clone(),
        };
        let id = match self.slot.register(pending) {
            Ok(id) => id,
            Err(rejected) => {
                warn!(
                    origin = rejected.value.request.origin(),
                    error = %rejected.error,
                    "denying overlapping media request"
                );
                rejected.value.request.deny();
                return;
            }
        };

        if let Err(e) = os.request_permissions(id, RequestKind::Media, &missing) {
            error!(error = %e, "failed to request media permissions");
            if let Some(pending) = self.slot.take_any() {
                pending.request.deny();
            }
            return;
        }
        info!(%id, permissions = ?missing, "media permissions requested");
    }

    /// Grants only if every requested permission came back granted.
    /// A dismissed dialog (empty results) denies.
    fn complete(&mut self, id: RequestId, results: &PermissionResults) -> Result<bool, BridgeError> {
        let pending = self.slot.take(id)?;
        let all_granted = pending
            .requested
            .iter()
            .all(|p| results.get(p).copied().unwrap_or(false));

        info!(%id, origin = pending.request.origin(), granted = all_granted, "media request resolved");
        if all_granted {
            grant_all(pending.request);
        } else {
            pending.request.deny();
        }
        Ok(all_granted)
    }

    fn withdraw(&mut self) -> bool {
        let withdrawn = self.slot.take_any().is_some();
        if withdrawn {
            debug!("pending media request withdrawn by the engine");
        }
        withdrawn
    }

    fn cancel_pending(&mut self) -> bool {
        match self.slot.take_any() {
            Some(pending) => {
                pending.request.deny();
                true
            }
            None => false,
        }
    }

    fn is_pending(&self) -> bool {
        self.slot.is_pending()
    }
}
