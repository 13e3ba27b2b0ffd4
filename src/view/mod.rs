//! The view model: a structured, inspectable stand-in for the page DOM.
//!
//! The original interface is a single web page with fixed content regions
//! (navigation, title, content text, a result table, a form area, and one
//! shared notification strip). Here those regions are plain data so render
//! routines can replace them wholesale and tests can assert on them.
//!
//! Render routines fully replace the regions they own; rendering the same
//! document twice leaves the view identical.
//!
//! # Key Types
//!
//! | Type | Region |
//! |------|--------|
//! | [`Page`] | navigation, title, content, listing, form |
//! | [`Listing`] / [`Row`] | the result table |
//! | [`Link`] | a navigation entry with its dispatch target |
//! | [`Notification`] | the shared message strip |
//! | [`View`] | page + notification together |

mod form;

pub use form::{Field, Form};

use crate::render::ResourceKind;
use crate::types::Control;

/// A hyperlink paired with the renderer that should process its result.
///
/// The target kind makes the continuation explicit data instead of a
/// captured callback: following the link means fetching `href` and rendering
/// the response as `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Text shown for the link.
    pub label: String,
    /// Target href; empty means the API root.
    pub href: String,
    /// Which renderer handles the fetched document.
    pub target: ResourceKind,
}

impl Link {
    /// Build a link.
    pub fn new(label: impl Into<String>, href: impl Into<String>, target: ResourceKind) -> Self {
        Link {
            label: label.into(),
            href: href.into(),
            target,
        }
    }
}

/// One row of the result table.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Stable row key: the item's `self` href.
    pub key: String,
    /// Display cells, one per listing column (minus the actions column).
    pub cells: Vec<String>,
    /// "show" link to the item's detail page.
    pub link: Option<Link>,
    /// Delete control when the embedded item carries one.
    pub delete: Option<Control>,
}

/// The result table region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    /// Column headers, including the trailing actions column.
    pub columns: Vec<String>,
    /// Current rows.
    pub rows: Vec<Row>,
    /// User-facing message shown instead of the table body.
    ///
    /// Set exactly when the listing has zero rows.
    pub empty_message: Option<String>,
}

impl Listing {
    /// A listing with the given column headers and no rows yet.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Listing {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            empty_message: None,
        }
    }

    /// Whether the table body is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row, clearing any empty-listing message.
    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
        self.empty_message = None;
    }

    /// Row lookup by key.
    pub fn row(&self, key: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// Remove the row with the given key.
    ///
    /// Returns whether a row was removed; at most one row ever matches.
    pub fn remove_row(&mut self, key: &str) -> bool {
        match self.rows.iter().position(|r| r.key == key) {
            Some(index) => {
                self.rows.remove(index);
                true
            }
            None => false,
        }
    }
}

/// The content regions of the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Navigation links above the content.
    pub navigation: Vec<Link>,
    /// Page title.
    pub title: String,
    /// Content paragraphs.
    pub content: Vec<String>,
    /// Result table, when the page shows a listing.
    pub listing: Option<Listing>,
    /// Form area, when the page offers input.
    pub form: Option<Form>,
}

impl Page {
    /// An empty page.
    pub fn new() -> Self {
        Page::default()
    }
}

/// The shared notification strip; each write replaces the prior message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Notification {
    /// Nothing to show.
    #[default]
    None,
    /// Informational message after a successful action.
    Message(String),
    /// Error message from a failed request.
    Error(String),
}

impl Notification {
    /// Whether the strip currently shows an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Notification::Error(_))
    }

    /// The displayed text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Notification::None => None,
            Notification::Message(text) | Notification::Error(text) => Some(text),
        }
    }
}

/// The whole visible state: one page plus the notification strip.
#[derive(Debug, Clone, Default)]
pub struct View {
    /// The rendered page.
    pub page: Page,
    /// The shared notification region.
    pub notification: Notification,
}

impl View {
    /// Replace the notification with an informational message.
    pub fn show_message(&mut self, text: impl Into<String>) {
        self.notification = Notification::Message(text.into());
    }

    /// Replace the notification with an error message.
    pub fn show_error(&mut self, text: impl Into<String>) {
        self.notification = Notification::Error(text.into());
    }
}
