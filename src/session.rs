//! The render/submit cycle: one session owns the view and drives it.
//!
//! A [`Session`] ties the pieces together: it fetches documents through
//! [`ApiClient`], renders them into its [`View`] via the dispatch table, and
//! submits forms back through the controls they came from. Every view
//! mutation happens inside a session method, so the whole cycle is a single
//! logical actor; there is no shared state to guard.
//!
//! The only cross-request state is the [`ViewContext`]: the URL (and page
//! kind) a successful update should reload. It is written when a
//! listing-backed page renders and read only by the update-reload branch.
//!
//! Failures never tear the session down. Any failed request puts the
//! server's message into the shared notification strip and leaves the rest
//! of the view exactly as it was.
//!
//! # Examples
//!
//! ```ignore
//! use foodpoint_client::{ApiClient, ClientConfig, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::default())?;
//!     let mut session = Session::new(client);
//!
//!     session.home().await;
//!     session.lookup_user("alice").await;
//!     println!("{}", session.view().page.title);
//!     Ok(())
//! }
//! ```

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::protocol::rel;
use crate::render::{self, pages, ResourceKind, UpdateStrategy};
use crate::types::{Document, SubmitOutcome};
use crate::view::{Form, Link, View};

/// Per-view reload target, written by listing renders and read by the
/// update-reload branch.
#[derive(Debug, Clone, Default)]
pub struct ViewContext {
    /// URL the next reload should fetch.
    pub reload_url: Option<String>,
    /// Page kind to render the reload as.
    pub reload_kind: Option<ResourceKind>,
}

/// Drives the fetch → render → submit cycle against one API.
pub struct Session {
    client: ApiClient,
    view: View,
    ctx: ViewContext,
    current: Option<(Document, ResourceKind)>,
}

impl Session {
    /// A fresh session with an empty view.
    pub fn new(client: ApiClient) -> Self {
        Session {
            client,
            view: View::default(),
            ctx: ViewContext::default(),
            current: None,
        }
    }

    /// The current view state.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// The tracked reload context.
    pub fn context(&self) -> &ViewContext {
        &self.ctx
    }

    /// The last successfully rendered document, if any.
    pub fn document(&self) -> Option<&Document> {
        self.current.as_ref().map(|(doc, _)| doc)
    }

    /// Mutable access to the page's form, for filling in values.
    pub fn form_mut(&mut self) -> Option<&mut Form> {
        self.view.page.form.as_mut()
    }

    /// Set one input of the page's form. Returns whether it exists.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.view.page.form.as_mut() {
            Some(form) => form.set_value(name, value),
            None => false,
        }
    }

    /// Open the API entry point.
    pub async fn home(&mut self) {
        self.open("", ResourceKind::Start).await;
    }

    /// Fetch a document and render it as the given page kind.
    ///
    /// Render routines may chain one follow-up fetch (user page into its
    /// collection listing); the loop runs until a routine returns nothing
    /// more to fetch. Failures land in the notification strip.
    pub async fn open(&mut self, href: &str, kind: ResourceKind) {
        match self.client.get(href).await {
            Ok(doc) => self.render_chain(doc, kind, href.to_string()).await,
            Err(e) => self.notify_error(e),
        }
    }

    /// Follow a navigation link.
    pub async fn open_link(&mut self, link: Link) {
        self.open(&link.href, link.target).await;
    }

    /// Follow a named relation on the current document.
    pub async fn follow(&mut self, relation: &str) {
        let Some(target) = render::kind_for_relation(relation) else {
            self.notify_error(ClientError::MissingRelation(relation.to_string()));
            return;
        };
        let href = match &self.current {
            Some((doc, _)) => match doc.control(relation) {
                Some(control) => control.href.clone(),
                None => {
                    self.notify_error(ClientError::MissingRelation(relation.to_string()));
                    return;
                }
            },
            None => {
                self.view.show_error("Nothing is loaded yet.");
                return;
            }
        };
        self.open(&href, target).await;
    }

    /// The start-page lookup: build the user URL from the entered username
    /// and open the user page.
    pub async fn lookup_user(&mut self, username: &str) {
        let action = match &self.view.page.form {
            Some(form) => form.action.clone(),
            None => {
                self.view.show_error("There is no lookup form on this page.");
                return;
            }
        };
        let href = format!("{}{}/", action, username);
        self.open(&href, ResourceKind::User).await;
    }

    /// Replace the form region with the current document's pre-filled edit
    /// form.
    ///
    /// Lets detail and collection pages switch from their default form (add
    /// recipe, lookup) to editing the resource itself.
    pub fn begin_edit(&mut self) {
        let Some((doc, kind)) = &self.current else {
            self.view.show_error("Nothing is loaded yet.");
            return;
        };
        let control = match doc.control(rel::EDIT) {
            Some(control) => control,
            None => {
                let err = ClientError::MissingRelation(rel::EDIT.to_string());
                self.view.show_error(err.user_message());
                return;
            }
        };
        match Form::from_control(control) {
            Ok(mut form) => {
                form.prefill(doc, render::editable_fields(*kind));
                self.view.page.form = Some(form);
            }
            // Malformed control: report it and skip rendering the form.
            Err(e) => self.view.show_error(e.user_message()),
        }
    }

    /// Submit the page's form through its control.
    ///
    /// A creation response appends exactly one row for the new resource to
    /// the current listing; an update either re-fetches the tracked reload
    /// URL or patches the visible fields from the submitted values,
    /// depending on the page kind.
    pub async fn submit_form(&mut self) {
        let Some(form) = self.view.page.form.clone() else {
            self.view.show_error("There is no form to submit.");
            return;
        };
        let payload = match form.payload() {
            Ok(payload) => payload,
            Err(e) => {
                self.notify_error(e);
                return;
            }
        };

        match self
            .client
            .send(&form.action, &form.method, Some(&payload))
            .await
        {
            Ok(SubmitOutcome::Created { location }) => self.append_created(&location).await,
            Ok(SubmitOutcome::Updated) => self.apply_update(payload).await,
            Err(e) => self.notify_error(e),
        }
    }

    /// Delete the listing row with the given key through its own control.
    ///
    /// Success removes that one row; failure shows the error and leaves the
    /// listing untouched.
    pub async fn delete_row(&mut self, key: &str) {
        let control = self
            .view
            .page
            .listing
            .as_ref()
            .and_then(|l| l.row(key))
            .and_then(|r| r.delete.clone());
        let Some(control) = control else {
            self.notify_error(ClientError::MissingRelation(rel::DELETE.to_string()));
            return;
        };

        match self.client.delete(&control).await {
            Ok(()) => {
                if let Some(listing) = self.view.page.listing.as_mut() {
                    listing.remove_row(key);
                }
                self.view.show_message("Deleted.");
            }
            Err(e) => self.notify_error(e),
        }
    }

    /// Delete the currently opened resource through its delete control,
    /// then return to its parent listing when the document links one.
    pub async fn delete_current(&mut self) {
        let (control, back) = match &self.current {
            Some((doc, _)) => {
                let Some(control) = doc.control(rel::DELETE).cloned() else {
                    self.notify_error(ClientError::MissingRelation(rel::DELETE.to_string()));
                    return;
                };
                let back = [rel::COLLECTIONS_BY, rel::ALL_CATEGORIES, rel::ALL_ETHNICITIES, rel::ALL_USERS]
                    .iter()
                    .find_map(|relation| {
                        let target = render::kind_for_relation(relation)?;
                        doc.control(relation).map(|c| (c.href.clone(), target))
                    });
                (control, back)
            }
            None => {
                self.view.show_error("Nothing is loaded yet.");
                return;
            }
        };

        match self.client.delete(&control).await {
            Ok(()) => {
                self.view.show_message("Deleted.");
                if let Some((href, kind)) = back {
                    self.open(&href, kind).await;
                }
            }
            Err(e) => self.notify_error(e),
        }
    }

    /// Render a document, chasing follow-up fetches until the page settles.
    async fn render_chain(&mut self, mut doc: Document, mut kind: ResourceKind, mut href: String) {
        loop {
            let next = match pages::render(kind, &doc, &mut self.view.page) {
                Ok(next) => next,
                Err(e) => {
                    self.notify_error(e);
                    return;
                }
            };
            if kind.has_listing() {
                self.ctx.reload_url = Some(href.clone());
                self.ctx.reload_kind = Some(kind);
            }
            self.current = Some((doc, kind));

            let Some(follow) = next else { return };
            match self.client.get(&follow.href).await {
                Ok(next_doc) => {
                    doc = next_doc;
                    kind = follow.kind;
                    href = follow.href;
                }
                Err(e) => {
                    self.notify_error(e);
                    return;
                }
            }
        }
    }

    /// Creation path: fetch the new resource and append its row.
    ///
    /// Never re-renders the parent listing; the one new row is built with
    /// the same routine the listing itself uses.
    async fn append_created(&mut self, location: &str) {
        let row_kind = self.ctx.reload_kind.and_then(render::item_kind);
        let Some(row_kind) = row_kind else {
            self.view.show_message("Created.");
            return;
        };

        match self.client.get(location).await {
            Ok(item) => {
                let row = pages::listing_row(row_kind, &item);
                let label = row.cells.first().cloned().unwrap_or_default();
                if let Some(listing) = self.view.page.listing.as_mut() {
                    listing.push_row(row);
                }
                if label.is_empty() {
                    self.view.show_message("Created.");
                } else {
                    self.view.show_message(format!("Created {}.", label));
                }
            }
            Err(e) => self.notify_error(e),
        }
    }

    /// Update path: re-fetch the reload URL or patch visible fields, never
    /// both.
    async fn apply_update(&mut self, payload: Value) {
        let kind = match &self.current {
            Some((_, kind)) => *kind,
            None => {
                self.view.show_message("Saved.");
                return;
            }
        };

        match render::update_strategy(kind) {
            UpdateStrategy::PatchFields => {
                let render_err = match self.current.as_mut() {
                    Some((doc, kind)) => {
                        if let Value::Object(map) = payload {
                            for (name, value) in map {
                                doc.set_attribute(name, value);
                            }
                        }
                        pages::render(*kind, doc, &mut self.view.page).err()
                    }
                    None => None,
                };
                match render_err {
                    Some(e) => self.notify_error(e),
                    None => self.view.show_message("Saved."),
                }
            }
            UpdateStrategy::Refetch => {
                let (Some(url), Some(reload_kind)) =
                    (self.ctx.reload_url.clone(), self.ctx.reload_kind)
                else {
                    self.view.show_message("Saved.");
                    return;
                };
                // A reload failure replaces this with the error message.
                self.view.show_message("Saved.");
                self.open(&url, reload_kind).await;
            }
        }
    }

    fn notify_error(&mut self, error: ClientError) {
        tracing::warn!(%error, "operation failed");
        self.view.show_error(error.user_message());
    }
}
