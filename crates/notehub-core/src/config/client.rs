//! Document server connection configuration.

use serde::{Deserialize, Serialize};

/// Settings for the HTTP client that talks to the document server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Scheme, host and port of the document server.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path prefix of the REST API.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("notehub/", env!("CARGO_PKG_VERSION")).to_string()
}
