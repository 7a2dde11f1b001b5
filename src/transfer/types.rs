//! Transfer records, status vocabulary, and event payloads

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransferStatus {
    #[serde(rename = "uploading")]
    Uploading,
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "failed")]
    Failed,
}

impl TransferStatus {
    /// Terminal states admit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferStatus::Success | TransferStatus::Failed)
    }
}

impl std::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferStatus::Uploading => write!(f, "uploading"),
            TransferStatus::Success => write!(f, "success"),
            TransferStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One client-tracked transfer. Mutated only by the store folding events;
/// readers treat snapshots as read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    pub id: String,
    pub file_name: String,
    /// Target path inside the bucket, recorded for display.
    pub path: String,
    /// Cumulative progress in 0..=100.
    pub percent: u32,
    pub status: TransferStatus,
}

/// Typed events folded into the store.
#[derive(Debug, Clone, Serialize)]
pub enum TransferEvent {
    Started {
        id: String,
        file_name: String,
        path: String,
    },
    ProgressUpdated {
        id: String,
        percent: u32,
    },
    StatusUpdated {
        id: String,
        status: TransferStatus,
    },
}

impl TransferEvent {
    pub fn transfer_id(&self) -> &str {
        match self {
            TransferEvent::Started { id, .. }
            | TransferEvent::ProgressUpdated { id, .. }
            | TransferEvent::StatusUpdated { id, .. } => id,
        }
    }
}

/// One payload handed to `start_upload`: a named local file.
#[derive(Debug, Clone)]
pub struct UploadPayload {
    pub file_name: String,
    pub source: PathBuf,
    pub content_type: Option<String>,
}

impl UploadPayload {
    pub fn new(file_name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
            content_type: None,
        }
    }

    /// Derive the payload name from the final component of `source`.
    pub fn from_path(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        let file_name = source
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed")
            .to_string();
        Self {
            file_name,
            source,
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}
