//! Transfer manager owning the store and the upload worker fan-out

use super::store::TransferStore;
use super::types::{TransferEvent, UploadPayload};
use super::worker;
use crate::api::ApiClient;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// The sole mutator of transfer state. Construct one per session and pass it
/// by reference to whatever needs it; readers go through [`Self::store`].
pub struct TransferManager {
    api: ApiClient,
    store: Arc<TransferStore>,
    cancel_flags: Arc<Mutex<HashMap<String, Arc<AtomicBool>>>>,
}

impl TransferManager {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            store: Arc::new(TransferStore::new()),
            cancel_flags: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Read-model handle; safe to hand to any number of readers.
    pub fn store(&self) -> Arc<TransferStore> {
        self.store.clone()
    }

    /// Start one independent upload per payload.
    ///
    /// Every transfer is registered synchronously (percent 0, status
    /// uploading), so the read model reflects the whole batch before this
    /// returns; the credential request and storage write then run as one
    /// spawned task per payload. Returns the new transfer ids in payload
    /// order. Must be called from within a tokio runtime.
    pub fn start_upload(
        &self,
        payloads: Vec<UploadPayload>,
        target_path: &str,
        bucket_id: Option<&str>,
    ) -> Vec<String> {
        let mut ids = Vec::with_capacity(payloads.len());

        for payload in payloads {
            let id = Uuid::new_v4().to_string();
            ids.push(id.clone());

            self.store.apply(TransferEvent::Started {
                id: id.clone(),
                file_name: payload.file_name.clone(),
                path: target_path.to_string(),
            });

            let cancelled = Arc::new(AtomicBool::new(false));
            self.lock_flags().insert(id.clone(), cancelled.clone());

            let client = self.api.http().clone();
            let api = self.api.clone();
            let store = self.store.clone();
            let flags = self.cancel_flags.clone();
            let bucket = bucket_id.map(str::to_string);
            let task_id = id;

            tokio::spawn(async move {
                worker::run_upload(
                    client,
                    api,
                    store,
                    task_id.clone(),
                    payload,
                    bucket,
                    cancelled,
                )
                .await;

                flags
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove(&task_id);
            });
        }

        ids
    }

    /// Request cancellation of an in-flight transfer. The worker aborts its
    /// payload stream and the transfer terminates as `failed`. No-op for
    /// unknown or already-terminal transfers.
    pub fn cancel(&self, transfer_id: &str) {
        if let Some(flag) = self.lock_flags().get(transfer_id) {
            flag.store(true, Ordering::SeqCst);
        }
    }

    fn lock_flags(&self) -> MutexGuard<'_, HashMap<String, Arc<AtomicBool>>> {
        self.cancel_flags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
