//! Mason wire vocabulary and shared parsing helpers.
//!
//! The Foodpoint API speaks [Mason], a JSON hypermedia flavor: resource
//! attributes live next to an `@controls` object mapping relation names to
//! affordances, and error responses carry an `@error` object. This module
//! holds the wire constants plus the helpers shared between the fetch and
//! submit paths.
//!
//! # Wire Shapes
//!
//! | Piece | Shape |
//! |-------|-------|
//! | Controls | `"@controls": { "<relation>": { "href", "method", "schema"? } }` |
//! | Listing | `"items": [ <embedded documents> ]` |
//! | Error | `"@error": { "@message": "...", "@messages": [...] }` |
//! | Created | HTTP 201 + `Location` header |
//!
//! [Mason]: https://github.com/JornWildt/Mason

use http::StatusCode;
use url::Url;

use crate::error::Result;

/// Media types exchanged with the API.
pub mod media {
    /// Mason hypermedia responses.
    pub const MASON: &str = "application/vnd.mason+json";
    /// Plain JSON, used for all request bodies.
    pub const JSON: &str = "application/json";
    /// Accept value offering both; the client does not distinguish them at
    /// parse time.
    pub const ACCEPT: &str = "application/vnd.mason+json, application/json";
}

/// Reserved top-level keys in a Mason document.
pub mod keys {
    /// Relation name to control mapping.
    pub const CONTROLS: &str = "@controls";
    /// Curie namespace declarations; parsed over, never interpreted.
    pub const NAMESPACES: &str = "@namespaces";
    /// Error object on non-success responses.
    pub const ERROR: &str = "@error";
    /// Human-readable message inside `@error`.
    pub const MESSAGE: &str = "@message";
    /// Embedded sub-documents of a listing.
    pub const ITEMS: &str = "items";
}

/// Relation names served by the Foodpoint API.
pub mod rel {
    /// The document's own URL.
    pub const SELF: &str = "self";
    /// Edit the enclosing resource; carries the resource schema.
    pub const EDIT: &str = "edit";
    /// Profile link, ignored by this client.
    pub const PROFILE: &str = "profile";
    /// Parent listing of a recipe.
    pub const COLLECTION: &str = "collection";
    /// Delete the enclosing resource.
    pub const DELETE: &str = "fpoint:delete";
    /// All registered users.
    pub const ALL_USERS: &str = "fpoint:all-users";
    /// Create a new user.
    pub const ADD_USER: &str = "fpoint:add-user";
    /// Collections owned by a user.
    pub const COLLECTIONS_BY: &str = "fpoint:collections-by";
    /// Create a collection for a user.
    pub const ADD_COLLECTION: &str = "fpoint:add-collection";
    /// Add a recipe to a collection.
    pub const ADD_RECIPE: &str = "fpoint:add-recipe";
    /// All recipe categories.
    pub const ALL_CATEGORIES: &str = "fpoint:all-categories";
    /// Create a category.
    pub const ADD_CATEGORY: &str = "fpoint:add-category";
    /// All ethnicities.
    pub const ALL_ETHNICITIES: &str = "fpoint:all-ethnicities";
    /// Create an ethnicity.
    pub const ADD_ETHNICITY: &str = "fpoint:add-ethnicity";
    /// Category of a recipe.
    pub const CATEGORY: &str = "fpoint:category";
    /// Ethnicity of a recipe.
    pub const ETHNICITY: &str = "fpoint:ethnicity";
}

/// Extract the user-facing message from an error response body.
///
/// Reads `@error/@message`; when the body does not conform (the server is
/// not obligated to send JSON for every failure) the HTTP reason phrase is
/// used so the notification region never ends up blank.
///
/// # Examples
///
/// ```
/// use foodpoint_client::protocol::error_message;
/// use http::StatusCode;
///
/// let body = br#"{"@error": {"@message": "User not found"}}"#;
/// assert_eq!(error_message(body, StatusCode::NOT_FOUND), "User not found");
///
/// assert_eq!(error_message(b"oops", StatusCode::NOT_FOUND), "Not Found");
/// ```
pub fn error_message(body: &[u8], status: StatusCode) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .as_ref()
        .and_then(|v| v.get(keys::ERROR))
        .and_then(|e| e.get(keys::MESSAGE))
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        })
}

/// Resolve a control href against the API root.
///
/// Hrefs in Foodpoint documents are server-relative (`/api/users/`); absolute
/// hrefs pass through unchanged. An empty href resolves to the root itself.
///
/// # Examples
///
/// ```
/// use foodpoint_client::protocol::resolve_href;
/// use url::Url;
///
/// let root = Url::parse("http://localhost:5000/api/").unwrap();
/// let url = resolve_href(&root, "/api/users/").unwrap();
/// assert_eq!(url.as_str(), "http://localhost:5000/api/users/");
/// ```
pub fn resolve_href(root: &Url, href: &str) -> Result<Url> {
    Ok(root.join(href)?)
}
