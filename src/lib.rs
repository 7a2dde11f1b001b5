//! Sharebox client core.
//!
//! Transfer orchestration over a hierarchical content store: presigned upload
//! credentials from the control plane, direct-to-storage writes with live
//! per-transfer progress, the content tree over a bucket's file/folder
//! records, and the symmetric download path. The UI shell owns rendering,
//! auth, and notifications; this crate owns transfer state.

pub mod api;
pub mod config;
pub mod download;
pub mod error;
pub mod transfer;
pub mod tree;

// Re-export the surface the UI layer works against
pub use api::{ApiClient, Bucket, FileRecord, NodeKind, UploadCredential};
pub use config::ApiConfig;
pub use download::DownloadClient;
pub use error::{ApiError, CredentialError, DownloadError, TransportError};
pub use transfer::{
    Transfer, TransferEvent, TransferManager, TransferStatus, TransferStore, UploadPayload,
};
pub use tree::ContentTree;
