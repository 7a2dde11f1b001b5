//! Error taxonomy for control-plane and storage operations.
//!
//! Every class is terminal for the single affected transfer/operation and is
//! never retried. Upload workers collapse both credential and transport
//! failure into the `failed` transfer status; the distinction survives in the
//! typed errors below and in the logs.

use reqwest::StatusCode;
use thiserror::Error;

/// Control-plane credential issuance failed.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credential request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("credential request rejected with status {0}")]
    Status(StatusCode),
}

/// Direct storage write/read failed or was aborted.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("storage request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("storage rejected the request with status {0}")]
    Status(StatusCode),
    #[error("payload i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Download-URL issuance failed, or the subsequent direct fetch did.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("download url request failed: {0}")]
    Network(reqwest::Error),
    #[error("download url request rejected with status {0}")]
    Status(StatusCode),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Any other control-plane call failed (bucket fetch, file deletion).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("api request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("api request rejected with status {0}")]
    Status(StatusCode),
}
