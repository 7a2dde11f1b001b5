//! Download client for the read path
//!
//! Two hops: ask the control plane for a short-lived URL, then stream the
//! bytes straight from storage to disk. No progress tracking and no retry;
//! a failure surfaces once to the caller's notification layer.

use crate::api::ApiClient;
use crate::error::{DownloadError, TransportError};
use futures_util::StreamExt;
use log::info;
use reqwest::Client;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Write buffer for downloads (2 MB)
const WRITE_BUFFER_SIZE: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct DownloadClient {
    api: ApiClient,
    client: Client,
}

impl DownloadClient {
    pub fn new(api: ApiClient) -> Self {
        let client = api.http().clone();
        Self { api, client }
    }

    /// Issue a short-lived download URL for a stored file.
    pub async fn request_download_url(
        &self,
        bucket_id: &str,
        file_id: &str,
    ) -> Result<String, DownloadError> {
        self.api.request_download_url(bucket_id, file_id).await
    }

    /// Fetch a stored file into `destination`. Returns the bytes written.
    pub async fn download_to(
        &self,
        bucket_id: &str,
        file_id: &str,
        destination: &Path,
    ) -> Result<u64, DownloadError> {
        let url = self.request_download_url(bucket_id, file_id).await?;
        let written = self.fetch_to_file(&url, destination).await?;
        info!("downloaded {} bytes to {}", written, destination.display());
        Ok(written)
    }

    /// Direct storage read: stream the response body to disk with buffered
    /// writes.
    pub async fn fetch_to_file(
        &self,
        url: &str,
        destination: &Path,
    ) -> Result<u64, TransportError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(TransportError::Status(response.status()));
        }

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = File::create(destination).await?;

        let mut stream = response.bytes_stream();
        let mut write_buffer = Vec::with_capacity(WRITE_BUFFER_SIZE);
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(TransportError::Network)?;
            written += chunk.len() as u64;
            write_buffer.extend_from_slice(&chunk);

            if write_buffer.len() >= WRITE_BUFFER_SIZE {
                file.write_all(&write_buffer).await?;
                write_buffer.clear();
            }
        }

        if !write_buffer.is_empty() {
            file.write_all(&write_buffer).await?;
        }
        file.flush().await?;

        Ok(written)
    }
}
