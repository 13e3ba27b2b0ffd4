//! HTTP client for the Foodpoint hypermedia API.
//!
//! This module is the network edge of the crate:
//!
//! - **Fetch** a hypermedia document by URL (one request per call)
//! - **Submit** JSON payloads through server-declared controls
//! - **Delete** resources through their delete controls
//! - Collapse every non-2xx outcome into the shared error taxonomy
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── config - API root and transport knobs
//! └── fetch  - ApiClient and HTTP operations
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ApiClient`] | Async HTTP client, fetch/submit/delete |
//! | [`ClientConfig`] | API root, timeout, user agent |
//!
//! # Examples
//!
//! ```
//! use foodpoint_client::client::{ApiClient, ClientConfig};
//!
//! // Default configuration (local development server)
//! let client = ApiClient::new(ClientConfig::default()).unwrap();
//!
//! // Custom API root
//! let config = ClientConfig::new("https://food.example/api/");
//! let client = ApiClient::new(config).unwrap();
//! ```

mod config;
mod fetch;

pub use config::ClientConfig;
pub use fetch::ApiClient;
