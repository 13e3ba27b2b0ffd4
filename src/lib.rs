#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Foodpoint Hypermedia Client
//!
//! A client for the Foodpoint recipe API, a hypermedia-driven REST service
//! speaking [Mason] (`application/vnd.mason+json`). The server embeds the
//! permitted next actions into every document as `@controls`; the client
//! never hardcodes routes beyond the API root. It fetches documents,
//! renders them into a structured view model, builds input forms from
//! server-declared schemas, and submits edits back through the controls
//! they came from.
//!
//! [Mason]: https://github.com/JornWildt/Mason
//!
//! ## Overview
//!
//! The client is four responsibilities composed in a loop:
//!
//! 1. **Resource Fetcher** - retrieve a hypermedia document by URL
//! 2. **Renderer Dispatch** - pick the render routine for the page kind and
//!    replace the view regions it owns
//! 3. **Form Builder** - turn a control schema into an input form with
//!    required-field marks
//! 4. **Submitter** - serialize form input to JSON, send it with the
//!    control's method, then follow the `Location` of a creation or reload
//!    after an update
//!
//! Control flows in a cycle: fetch → render → user submits → submit →
//! fetch → render. The only cross-request state is the reload target
//! carried by the session's view context.
//!
//! ## Client Usage
//!
//! ```ignore
//! use foodpoint_client::{ApiClient, ClientConfig, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::new("http://localhost:5000/api/"))?;
//!     let mut session = Session::new(client);
//!
//!     // Start page, then a user's collections.
//!     session.home().await;
//!     session.lookup_user("alice").await;
//!
//!     // Create a collection through the page form.
//!     session.set_field("name", "Soups");
//!     session.set_field("description", "Warm things");
//!     session.submit_form().await;
//!
//!     for row in &session.view().page.listing.as_ref().unwrap().rows {
//!         println!("{}", row.cells[0]);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Typed Access
//!
//! ```ignore
//! use foodpoint_client::{ApiClient, ClientConfig};
//!
//! let client = ApiClient::new(ClientConfig::default())?;
//! let start = client.start_page().await?;
//! let users = client.get(&start.require_control("fpoint:all-users")?.href).await?;
//! for user in users.items() {
//!     println!("{}", user.string_field("userName").unwrap_or_default());
//! }
//! ```
//!
//! ## Error Model
//!
//! Every non-2xx response collapses into one taxonomy:
//! [`ClientError::Api`] with the status and the server's `@error/@message`
//! text. Nothing is retried and no failure is fatal; a session puts the
//! message into its notification strip and stays interactive.
//!
//! ## Module Structure
//!
//! - **[types]** - Hypermedia documents, controls, schemas, submit outcomes
//! - **[error]** - Error types and result handling
//! - **[client]** - Async HTTP client (fetch, submit, delete)
//! - **[view]** - Page/listing/form view model, the DOM stand-in
//! - **[render]** - Renderer dispatch table and per-kind routines
//! - **[session]** - The fetch/render/submit cycle driver
//! - **[protocol]** - Mason wire constants and shared parsing helpers

pub mod client;
pub mod error;
pub mod protocol;
pub mod render;
pub mod session;
pub mod types;
pub mod view;

pub use client::{ApiClient, ClientConfig};
pub use error::{ClientError, Result};
pub use render::{FollowUp, ResourceKind, UpdateStrategy};
pub use session::{Session, ViewContext};
pub use types::{Control, Document, Schema, SchemaProperty, SubmitOutcome};
pub use view::{Field, Form, Link, Listing, Notification, Page, Row, View};
