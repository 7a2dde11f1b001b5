//! Upload worker driving one transfer end to end
//!
//! Credential request, then a single presigned-POST of the full payload.
//! Progress derives from cumulative bytes read off the payload stream. One
//! failed attempt is final; there is no timeout and no retry.

use super::store::TransferStore;
use super::types::{TransferEvent, TransferStatus, UploadPayload};
use crate::api::{ApiClient, UploadCredential};
use crate::error::TransportError;
use futures_util::StreamExt;
use log::warn;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

/// Payload read chunk size (64 KB); each chunk yields one progress callback
const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Run one transfer against the store. Never propagates: every exit path
/// lands `transfer_id` in a terminal status, so a failing transfer cannot
/// affect its siblings.
pub(crate) async fn run_upload(
    client: Client,
    api: ApiClient,
    store: Arc<TransferStore>,
    transfer_id: String,
    payload: UploadPayload,
    bucket_id: Option<String>,
    cancelled: Arc<AtomicBool>,
) {
    if cancelled.load(Ordering::SeqCst) {
        store.apply(TransferEvent::StatusUpdated {
            id: transfer_id,
            status: TransferStatus::Failed,
        });
        return;
    }

    let credential = match api
        .request_upload_slot(&payload.file_name, bucket_id.as_deref())
        .await
    {
        Ok(credential) => credential,
        Err(e) => {
            warn!("transfer {}: credential request failed: {}", transfer_id, e);
            store.apply(TransferEvent::StatusUpdated {
                id: transfer_id,
                status: TransferStatus::Failed,
            });
            return;
        }
    };

    let on_progress = {
        let store = store.clone();
        let id = transfer_id.clone();
        move |percent: u32| {
            store.apply(TransferEvent::ProgressUpdated {
                id: id.clone(),
                percent,
            });
        }
    };

    let status = match send_payload(&client, &credential, &payload, &cancelled, on_progress).await {
        Ok(()) => {
            // Final progress tick: zero-byte payloads yield no stream chunks,
            // so the counter alone never reaches 100.
            store.apply(TransferEvent::ProgressUpdated {
                id: transfer_id.clone(),
                percent: 100,
            });
            TransferStatus::Success
        }
        Err(e) => {
            warn!("transfer {}: storage write failed: {}", transfer_id, e);
            TransferStatus::Failed
        }
    };

    store.apply(TransferEvent::StatusUpdated {
        id: transfer_id,
        status,
    });
}

/// Presigned-POST transport: every `credential.body` field attached verbatim,
/// the file part last, streamed from disk.
pub(crate) async fn send_payload(
    client: &Client,
    credential: &UploadCredential,
    payload: &UploadPayload,
    cancelled: &Arc<AtomicBool>,
    on_progress: impl Fn(u32) + Send + Sync + 'static,
) -> Result<(), TransportError> {
    let file = File::open(&payload.source).await?;
    let total_bytes = file.metadata().await?.len();

    let sent_bytes = Arc::new(AtomicU64::new(0));
    let counter = sent_bytes.clone();
    let cancel_flag = cancelled.clone();

    let stream = ReaderStream::with_capacity(file, READ_CHUNK_SIZE).map(move |chunk| {
        if cancel_flag.load(Ordering::SeqCst) {
            return Err(io::Error::new(
                io::ErrorKind::Interrupted,
                "upload cancelled",
            ));
        }

        let chunk = chunk?;
        let sent = counter.fetch_add(chunk.len() as u64, Ordering::SeqCst) + chunk.len() as u64;
        // A chunk implies total_bytes > 0; min() caps rounding at the top end.
        let percent = std::cmp::min(((sent as f64 / total_bytes as f64) * 100.0) as u32, 100);
        on_progress(percent);

        Ok(chunk)
    });

    let mut form = Form::new();
    for (field, value) in &credential.body {
        form = form.text(field.clone(), value.clone());
    }

    // Storage endpoints require the file part after the policy fields.
    let mut part = Part::stream_with_length(Body::wrap_stream(stream), total_bytes)
        .file_name(payload.file_name.clone());
    if let Some(content_type) = &payload.content_type {
        part = part.mime_str(content_type)?;
    }
    form = form.part("file", part);

    let response = client.post(&credential.url).multipart(form).send().await?;

    if !response.status().is_success() {
        return Err(TransportError::Status(response.status()));
    }

    Ok(())
}
