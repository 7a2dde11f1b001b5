//! Transfer orchestration
//!
//! This module is organized into submodules:
//! - `types`: transfer records, status vocabulary, event payloads
//! - `state`: the pure state machine folding events into transfers
//! - `store`: the single-writer transfer collection and its event feed
//! - `worker`: one upload driven end to end
//! - `manager`: batch fan-out, cancellation registry, store ownership

mod manager;
mod state;
mod store;
mod types;
mod worker;

pub use manager::TransferManager;
pub use state::transition;
pub use store::TransferStore;
pub use types::{Transfer, TransferEvent, TransferStatus, UploadPayload};
