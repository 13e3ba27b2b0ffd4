//! Client configuration.

/// Configuration for [`ApiClient`](crate::ApiClient).
///
/// The API root is the only external configuration point of the client; the
/// rest are transport knobs with sensible defaults.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root URL of the Foodpoint API, e.g. `http://localhost:5000/api/`.
    ///
    /// Every relative href in a document is resolved against this.
    pub api_root: String,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// User-Agent sent on every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration pointing at the given API root, defaults elsewhere.
    pub fn new(api_root: impl Into<String>) -> Self {
        ClientConfig {
            api_root: api_root.into(),
            ..Default::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_root: "http://localhost:5000/api/".to_string(),
            request_timeout_ms: 30_000,
            user_agent: concat!("foodpoint-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
