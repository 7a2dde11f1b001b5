//! Pure transfer state machine.
//!
//! `transition` is the only place transfer state changes shape; the store
//! applies it under its lock. The caller matches events to transfers by id
//! before getting here.

use super::types::{Transfer, TransferEvent};

/// Fold one event into a transfer, returning the next state.
///
/// Progress takes the received value verbatim: the transport reports
/// cumulative counts, so there is nothing to accumulate here. Status moves
/// out of `Uploading` at most once; any event against a terminal transfer is
/// a no-op, so stale callbacks arriving after completion cannot corrupt
/// state.
pub fn transition(transfer: &Transfer, event: &TransferEvent) -> Transfer {
    let mut next = transfer.clone();

    if transfer.status.is_terminal() {
        return next;
    }

    match event {
        // Registration is the store's concern; re-delivery changes nothing.
        TransferEvent::Started { .. } => {}
        TransferEvent::ProgressUpdated { percent, .. } => {
            next.percent = *percent;
        }
        TransferEvent::StatusUpdated { status, .. } => {
            next.status = *status;
        }
    }

    next
}
