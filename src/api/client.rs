//! Shared HTTP client for the control plane

use super::types::{Bucket, DownloadUrl, UploadCredential};
use crate::config::ApiConfig;
use crate::error::{ApiError, CredentialError, DownloadError};
use reqwest::{Client, RequestBuilder};
use serde_json::json;

/// Control-plane client. Cheap to clone; all clones share one connection
/// pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiConfig,
    client: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// The underlying HTTP client, shared with transfer/download workers.
    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Request a one-shot upload credential for a logical file record.
    ///
    /// Failure aborts the associated transfer; there is no retry.
    pub async fn request_upload_slot(
        &self,
        file_name: &str,
        bucket_id: Option<&str>,
    ) -> Result<UploadCredential, CredentialError> {
        let mut payload = json!({ "name": file_name });
        if let Some(bucket_id) = bucket_id {
            payload["bucket_id"] = json!(bucket_id);
        }

        let response = self
            .authorize(self.client.post(self.url("/files")))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CredentialError::Status(response.status()));
        }

        Ok(response.json().await?)
    }

    /// Fetch a bucket with its nested file/folder records.
    pub async fn bucket(&self, bucket_id: &str) -> Result<Bucket, ApiError> {
        let url = self.url(&format!("/buckets/{}", urlencoding::encode(bucket_id)));
        let response = self.authorize(self.client.get(url)).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        Ok(response.json().await?)
    }

    /// Issue a short-lived download URL for a stored file.
    pub async fn request_download_url(
        &self,
        bucket_id: &str,
        file_id: &str,
    ) -> Result<String, DownloadError> {
        let url = self.url(&format!(
            "/buckets/{}/files/{}/download",
            urlencoding::encode(bucket_id),
            urlencoding::encode(file_id)
        ));

        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(DownloadError::Network)?;

        if !response.status().is_success() {
            return Err(DownloadError::Status(response.status()));
        }

        let issued: DownloadUrl = response.json().await.map_err(DownloadError::Network)?;
        Ok(issued.url)
    }

    /// Delete a file record.
    pub async fn delete_file(&self, bucket_id: &str, file_id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!(
            "/buckets/{}/files/{}",
            urlencoding::encode(bucket_id),
            urlencoding::encode(file_id)
        ));

        let response = self.authorize(self.client.delete(url)).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        Ok(())
    }
}
