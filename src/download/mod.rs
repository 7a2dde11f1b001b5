//! Download path: short-lived URL issuance plus a direct streaming fetch.

mod client;

pub use client::DownloadClient;
