//! Control-plane endpoint configuration

use serde::{Deserialize, Serialize};

/// Where the control plane lives and how to authenticate against it.
///
/// Session management is the embedder's concern; the token is carried here
/// only so it can be attached verbatim to outgoing requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            auth_token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}
