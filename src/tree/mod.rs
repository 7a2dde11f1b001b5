//! Content tree over a bucket's flat record list
//!
//! One O(n) grouping pass indexes records by the parent path they live under;
//! lookups after that are slice borrows. The tree is pure and holds no shared
//! state, so it is safe to rebuild on every render/poll.

use crate::api::FileRecord;
use std::collections::HashMap;

/// Parent-path index over a set of [`FileRecord`]s.
#[derive(Debug, Default)]
pub struct ContentTree {
    children: HashMap<String, Vec<FileRecord>>,
}

impl ContentTree {
    /// Index `records` by parent path. Nested `files` lists are descended so
    /// a bucket's expanded payload can be handed over as-is. Input order is
    /// preserved within each location.
    pub fn new(records: &[FileRecord]) -> Self {
        let mut children: HashMap<String, Vec<FileRecord>> = HashMap::new();
        let mut stack: Vec<&FileRecord> = records.iter().rev().collect();

        while let Some(record) = stack.pop() {
            children
                .entry(record.path.clone())
                .or_default()
                .push(record.clone());

            for child in record.files.iter().rev() {
                stack.push(child);
            }
        }

        Self { children }
    }

    /// Direct children visible at `path` ("/" = root), in input order.
    /// Unknown paths yield an empty slice, never an error.
    pub fn children_of(&self, path: &str) -> &[FileRecord] {
        self.children.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Folder children at `path`.
    pub fn folders_of(&self, path: &str) -> Vec<&FileRecord> {
        self.children_of(path)
            .iter()
            .filter(|record| record.is_folder())
            .collect()
    }

    /// File children at `path`.
    pub fn files_of(&self, path: &str) -> Vec<&FileRecord> {
        self.children_of(path)
            .iter()
            .filter(|record| !record.is_folder())
            .collect()
    }
}
