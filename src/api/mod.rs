//! Control-plane client and wire types
//!
//! - `types`: bucket/file records and the opaque upload credential
//! - `client`: the shared HTTP client for every control-plane endpoint

mod client;
mod types;

pub use client::ApiClient;
pub use types::{Bucket, DownloadUrl, FileRecord, NodeKind, UploadCredential};
