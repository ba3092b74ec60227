//! Single-occupancy register for one in-flight request kind.
//!
//! Contract: one writer (`register`) and one resolver (`take`). A second
//! registration while occupied is rejected and the value handed back, so the
//! caller can resolve it negatively instead of losing it.

use crate::types::errors::BridgeError;
use crate::types::request::{RequestId, RequestKind};

/// A registration that was turned away because the slot is occupied.
#[derive(Debug)]
pub struct Rejected<T> {
    pub error: BridgeError,
    pub value: T,
}

pub struct PendingSlot<T> {
    kind: RequestKind,
    entry: Option<(RequestId, T)>,
}

impl<T> PendingSlot<T> {
    pub fn new(kind: RequestKind) -> Self {
        Self { kind, entry: None }
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn is_pending(&self) -> bool {
        self.entry.is_some()
    }

    pub fn pending_id(&self) -> Option<RequestId> {
        self.entry.as_ref().map(|(id, _)| *id)
    }

    pub fn peek(&self) -> Option<&T> {
        self.entry.as_ref().map(|(_, v)| v)
    }

    pub fn register(&mut self, value: T) -> Result<RequestId, Rejected<T>> {
        if self.entry.is_some() {
            return Err(Rejected {
                error: BridgeError::SlotOccupied(self.kind),
                value,
            });
        }
        let id = RequestId::new();
        self.entry = Some((id, value));
        Ok(id)
    }

    /// Removes the pending value if `id` matches it.
    ///
    /// A mismatched id leaves the slot untouched.
    pub fn take(&mut self, id: RequestId) -> Result<T, BridgeError> {
        match self.entry.take() {
            None => Err(BridgeError::NoPendingRequest(self.kind)),
            Some((pending, value)) if pending == id => Ok(value),
            Some(other) => {
                self.entry = Some(other);
                Err(BridgeError::StaleResult(self.kind, id))
            }
        }
    }

    /// Removes whatever is pending, regardless of id.
    pub fn take_any(&mut self) -> Option<T> {
        self.entry.take().map(|(_, v)| v)
    }
}
