//! Core hypermedia types: documents, controls, schemas, and submit outcomes.
//!
//! A [`Document`] is one fetched resource representation: its attributes, the
//! controls the server attached to it, and (for listings) its embedded items.
//! Documents are ephemeral; they are parsed, rendered, and dropped. Nothing
//! is cached.
//!
//! # Invariants
//!
//! - Every detail document carries a `self` control.
//! - Every editable document carries an `edit` control whose schema covers
//!   the document's editable fields; form pre-fill relies on input names
//!   matching attribute names.
//!
//! # Examples
//!
//! ```
//! use foodpoint_client::Document;
//! use serde_json::json;
//!
//! let doc = Document::from_json(json!({
//!     "name": "Alice",
//!     "userName": "alice",
//!     "@controls": {
//!         "self": {"href": "/api/users/alice/"},
//!         "edit": {"href": "/api/users/alice/", "method": "PUT"}
//!     }
//! })).unwrap();
//!
//! assert_eq!(doc.string_field("name").as_deref(), Some("Alice"));
//! assert_eq!(doc.self_href(), Some("/api/users/alice/"));
//! assert!(doc.control("edit").is_some());
//! ```

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ClientError, Result};
use crate::protocol::keys;

/// A parsed hypermedia document.
///
/// Attribute order and control order follow the server's serialization order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    attributes: Map<String, Value>,
    controls: IndexMap<String, Control>,
    items: Vec<Document>,
}

impl Document {
    /// Parse a document from raw JSON.
    ///
    /// Mason's reserved keys (`@controls`, `@namespaces`, `items`) are routed
    /// to their typed homes; everything else becomes an attribute. Fails if
    /// the value is not an object or a control does not deserialize.
    pub fn from_json(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(ClientError::MalformedDocument(
                "expected a JSON object".to_string(),
            ));
        };

        let mut doc = Document::default();
        for (key, value) in map {
            match key.as_str() {
                keys::CONTROLS => {
                    let Value::Object(entries) = value else {
                        return Err(ClientError::MalformedDocument(
                            "@controls is not an object".to_string(),
                        ));
                    };
                    for (relation, raw) in entries {
                        let control: Control = serde_json::from_value(raw).map_err(|e| {
                            ClientError::MalformedDocument(format!(
                                "control '{}': {}",
                                relation, e
                            ))
                        })?;
                        doc.controls.insert(relation, control);
                    }
                }
                keys::ITEMS => {
                    let Value::Array(items) = value else {
                        return Err(ClientError::MalformedDocument(
                            "items is not an array".to_string(),
                        ));
                    };
                    for item in items {
                        doc.items.push(Document::from_json(item)?);
                    }
                }
                // Namespace declarations carry curie prefixes only.
                keys::NAMESPACES => {}
                _ => {
                    doc.attributes.insert(key, value);
                }
            }
        }
        Ok(doc)
    }

    /// Raw attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Attribute rendered as display text.
    ///
    /// Strings pass through; numbers (recipe ratings) are formatted. `null`
    /// and missing attributes both yield `None`.
    pub fn string_field(&self, name: &str) -> Option<String> {
        match self.attributes.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Overwrite an attribute in place.
    ///
    /// Used when an update succeeds and the view is patched from the
    /// submitted values instead of re-fetched.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: Value) {
        self.attributes.insert(name.into(), value);
    }

    /// All attributes in serialization order.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Control attached under the given relation name.
    pub fn control(&self, relation: &str) -> Option<&Control> {
        self.controls.get(relation)
    }

    /// Like [`Document::control`] but failing with
    /// [`ClientError::MissingRelation`].
    pub fn require_control(&self, relation: &str) -> Result<&Control> {
        self.controls
            .get(relation)
            .ok_or_else(|| ClientError::MissingRelation(relation.to_string()))
    }

    /// Whether the document exposes the given relation.
    pub fn has_control(&self, relation: &str) -> bool {
        self.controls.contains_key(relation)
    }

    /// All controls in serialization order.
    pub fn controls(&self) -> &IndexMap<String, Control> {
        &self.controls
    }

    /// The document's own href, from its `self` control.
    pub fn self_href(&self) -> Option<&str> {
        self.controls
            .get(crate::protocol::rel::SELF)
            .map(|c| c.href.as_str())
    }

    /// Embedded sub-documents of a listing, empty for detail documents.
    pub fn items(&self) -> &[Document] {
        &self.items
    }
}

/// A server-declared affordance: where to go and how to get there.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Control {
    /// Target URL, usually server-relative.
    pub href: String,
    /// HTTP method; Mason omits it for plain GET links.
    #[serde(default = "default_method")]
    pub method: String,
    /// Human-readable title.
    #[serde(default)]
    pub title: Option<String>,
    /// Request encoding hint (`"json"` on all Foodpoint write controls).
    #[serde(default)]
    pub encoding: Option<String>,
    /// Input schema; present only on controls meant to drive a form.
    #[serde(default)]
    pub schema: Option<Schema>,
}

fn default_method() -> String {
    "GET".to_string()
}

impl Control {
    /// Shorthand for a GET link control, mainly for tests.
    pub fn link(href: impl Into<String>) -> Self {
        Control {
            href: href.into(),
            method: default_method(),
            title: None,
            encoding: None,
            schema: None,
        }
    }
}

/// JSON-schema-like input description on a create/edit control.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Schema {
    /// Field name to property description, in server insertion order.
    #[serde(default)]
    pub properties: IndexMap<String, SchemaProperty>,
    /// Names of the mandatory fields.
    #[serde(default)]
    pub required: Vec<String>,
}

impl Schema {
    /// Whether the named field is mandatory.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// One property inside a control schema.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SchemaProperty {
    /// Human-readable description, shown in form labels.
    #[serde(default)]
    pub description: Option<String>,
    /// Declared JSON type (`"string"` or `"number"` in Foodpoint schemas).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl SchemaProperty {
    /// Whether the field carries a JSON number (the recipe rating case).
    pub fn is_number(&self) -> bool {
        self.kind.as_deref() == Some("number")
    }
}

/// Result of submitting a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server created a resource and pointed at it.
    Created {
        /// Absolute URL of the new resource, resolved from the `Location`
        /// header.
        location: String,
    },
    /// The server accepted an update; no new resource exists.
    Updated,
}

impl SubmitOutcome {
    /// The location indicator, present only for creations.
    pub fn location(&self) -> Option<&str> {
        match self {
            SubmitOutcome::Created { location } => Some(location),
            SubmitOutcome::Updated => None,
        }
    }
}
