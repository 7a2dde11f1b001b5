//! Control-plane wire types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Structural kind of a content record.
///
/// Kind is derived from record shape through [`FileRecord::kind`], never
/// stored alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Folder,
}

/// One file or folder record inside a bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub size: u64,
    /// Present for files, absent for folders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// Parent location this record lives under ("/" = bucket root).
    pub path: String,
    /// Child records, populated only for folders the backend chose to expand.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileRecord>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trashed_at: Option<DateTime<Utc>>,
}

impl FileRecord {
    /// The one shared folder-vs-file predicate: a record carrying an
    /// extension is a file, anything else is a folder.
    pub fn kind(&self) -> NodeKind {
        if self.extension.is_some() {
            NodeKind::File
        } else {
            NodeKind::Folder
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind() == NodeKind::Folder
    }
}

/// A named collection of files/folders owned by a user, the unit of sharing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bucket {
    pub id: String,
    pub name: String,
    pub owner: String,
    #[serde(default)]
    pub files: Vec<FileRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One-shot presigned upload credential issued by `POST /files`.
///
/// The `body` bag (bucket, key, policy, x-amz-*) is opaque pass-through: it is
/// copied verbatim onto the storage request and never interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadCredential {
    pub id: String,
    pub path: String,
    pub url: String,
    #[serde(default)]
    pub body: HashMap<String, String>,
}

/// Short-lived download URL issued by the control plane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadUrl {
    pub url: String,
}
