//! Property-based tests for the single-occupancy pending slot.
//!
//! A random sequence of registrations, matching takes, stale takes and
//! cancellations is replayed against a simple model.

use proptest::prelude::*;

use webview_shell::managers::pending_slot::PendingSlot;
use webview_shell::types::errors::BridgeError;
use webview_shell::types::request::{RequestId, RequestKind};

#[derive(Debug, Clone)]
enum Op {
    Register(u32),
    TakeCurrent,
    TakeStale,
    TakeAny,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u32>().prop_map(Op::Register),
        Just(Op::TakeCurrent),
        Just(Op::TakeStale),
        Just(Op::TakeAny),
    ]
}

fn arb_kind() -> impl Strategy<Value = RequestKind> {
    prop_oneof![
        Just(RequestKind::FileChooser),
        Just(RequestKind::Geolocation),
        Just(RequestKind::Media),
    ]
}

proptest! {
    #[test]
    fn slot_matches_model(kind in arb_kind(), ops in proptest::collection::vec(arb_op(), 1..60)) {
        let mut slot = PendingSlot::new(kind);
        let mut model: Option<(RequestId, u32)> = None;
        let mut issued: Vec<RequestId> = Vec::new();

        for op in ops {
            match op {
                Op::Register(value) => match slot.register(value) {
                    Ok(id) => {
                        prop_assert!(model.is_none());
                        prop_assert!(!issued.contains(&id));
                        issued.push(id);
                        model = Some((id, value));
                    }
                    Err(rejected) => {
                        prop_assert!(model.is_some());
                        prop_assert_eq!(rejected.value, value);
                        prop_assert_eq!(rejected.error, BridgeError::SlotOccupied(kind));
                    }
                },
                Op::TakeCurrent => {
                    let id = model.map(|(id, _)| id).or_else(|| issued.last().copied());
                    let Some(id) = id else { continue };
                    match slot.take(id) {
                        Ok(value) => {
                            prop_assert_eq!(model.take(), Some((id, value)));
                        }
                        Err(e) => {
                            prop_assert!(model.is_none());
                            prop_assert_eq!(e, BridgeError::NoPendingRequest(kind));
                        }
                    }
                }
                Op::TakeStale => {
                    let stale = RequestId::new();
                    let result = slot.take(stale);
                    match model {
                        Some(_) => prop_assert_eq!(result, Err(BridgeError::StaleResult(kind, stale))),
                        None => prop_assert_eq!(result, Err(BridgeError::NoPendingRequest(kind))),
                    }
                }
                Op::TakeAny => {
                    prop_assert_eq!(slot.take_any(), model.take().map(|(_, v)| v));
                }
            }

            prop_assert_eq!(slot.is_pending(), model.is_some());
            prop_assert_eq!(slot.pending_id(), model.map(|(id, _)| id));
            prop_assert_eq!(slot.kind(), kind);
        }
    }
}
