//! The HTTP transport of the client: fetch documents, submit controls.
//!
//! [`ApiClient`] is the Resource Fetcher and the Submitter's transport in one
//! place. Each call is exactly one request; nothing is retried, coalesced, or
//! cancelled, and errors are collapsed into the single
//! [`ClientError::Api`](crate::ClientError::Api) taxonomy.
//!
//! # Examples
//!
//! ## Fetching the start page
//!
//! ```ignore
//! use foodpoint_client::{ApiClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::default())?;
//!     let start = client.start_page().await?;
//!     println!("controls: {:?}", start.controls().keys().collect::<Vec<_>>());
//!     Ok(())
//! }
//! ```
//!
//! ## Following a control
//!
//! ```ignore
//! let users = client.get(&start.require_control("fpoint:all-users")?.href).await?;
//! for user in users.items() {
//!     println!("{}", user.string_field("name").unwrap_or_default());
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use http::{header, Method, StatusCode};
use serde_json::Value;
use url::Url;

use crate::client::ClientConfig;
use crate::error::{ClientError, Result};
use crate::protocol::{self, media};
use crate::types::{Control, Document, SubmitOutcome};

/// Asynchronous HTTP client for a Foodpoint API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
    root: Url,
}

impl ApiClient {
    /// Create a client for the configured API root.
    ///
    /// Fails if the root is not a valid absolute URL or the transport cannot
    /// be constructed.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let root = Url::parse(&config.api_root)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ClientError::Http(e.to_string()))?;

        Ok(ApiClient {
            client,
            config: Arc::new(config),
            root,
        })
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The parsed API root.
    pub fn api_root(&self) -> &Url {
        &self.root
    }

    /// Fetch the API entry point document.
    pub async fn start_page(&self) -> Result<Document> {
        self.get("").await
    }

    /// Fetch one hypermedia document.
    ///
    /// `href` may be server-relative (as controls are on the wire) or
    /// absolute; an empty href targets the API root.
    pub async fn get(&self, href: &str) -> Result<Document> {
        let url = self.resolve(href)?;
        tracing::debug!(%url, "fetching resource");

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, media::ACCEPT)
            .send()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(self.api_error(status, &body));
        }

        let value: Value = serde_json::from_slice(&body)?;
        Document::from_json(value)
    }

    /// Submit a payload through a control.
    ///
    /// Sends the payload as JSON with the control's method. A success
    /// response carrying a `Location` header is a creation; the location is
    /// returned absolute, ready to fetch. Any other success is an update.
    pub async fn submit(&self, control: &Control, payload: &Value) -> Result<SubmitOutcome> {
        self.send(&control.href, &control.method, Some(payload)).await
    }

    /// Delete through a control: a degenerate submit with no payload.
    pub async fn delete(&self, control: &Control) -> Result<()> {
        self.send(&control.href, &control.method, None).await?;
        Ok(())
    }

    /// Send a request with an explicit href and method.
    ///
    /// The form layer stores action and method as plain strings, mirroring
    /// what the control declared; this is the entry point it uses.
    pub async fn send(
        &self,
        href: &str,
        method: &str,
        payload: Option<&Value>,
    ) -> Result<SubmitOutcome> {
        let url = self.resolve(href)?;
        let method = parse_method(method);
        tracing::debug!(%url, %method, "submitting");

        let mut builder = self
            .client
            .request(method, url)
            .header(header::ACCEPT, media::ACCEPT);
        if let Some(payload) = payload {
            builder = builder
                .header(header::CONTENT_TYPE, media::JSON)
                .json(payload);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .bytes()
                .await
                .map_err(|e| ClientError::Http(e.to_string()))?;
            tracing::warn!(%status, "submit rejected");
            return Err(self.api_error(status, &body));
        }

        match response.headers().get(header::LOCATION) {
            Some(location) => {
                let href = location.to_str().map_err(|_| {
                    ClientError::MalformedDocument("Location header is not text".to_string())
                })?;
                let absolute = self.resolve(href)?;
                Ok(SubmitOutcome::Created {
                    location: absolute.to_string(),
                })
            }
            None => Ok(SubmitOutcome::Updated),
        }
    }

    fn resolve(&self, href: &str) -> Result<Url> {
        protocol::resolve_href(&self.root, href)
    }

    fn api_error(&self, status: StatusCode, body: &[u8]) -> ClientError {
        ClientError::Api {
            status: status.as_u16(),
            message: protocol::error_message(body, status),
        }
    }
}

fn parse_method(method: &str) -> Method {
    match method.to_uppercase().as_str() {
        "POST" => Method::POST,
        "PUT" => Method::PUT,
        "DELETE" => Method::DELETE,
        "PATCH" => Method::PATCH,
        _ => Method::GET,
    }
}
