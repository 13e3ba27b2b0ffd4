//! Form Builder: turn a control schema into an input form.
//!
//! A [`Form`] is built from a create/edit control: one field per schema
//! property, in the server's insertion order, with required marks from the
//! schema's `required` list. Fields conventionally named `description` or
//! `ingredients` become multi-line inputs; everything else is a single line.
//!
//! Serialization back to a JSON payload follows the submit rules of the
//! original client: a field that is empty and optional is omitted entirely
//! (the recipe `rating` case), and number-typed fields are sent as JSON
//! numbers.
//!
//! # Examples
//!
//! ```
//! use foodpoint_client::{Control, Form};
//! use serde_json::json;
//!
//! let control: Control = serde_json::from_value(json!({
//!     "href": "/api/users/",
//!     "method": "POST",
//!     "schema": {
//!         "properties": {
//!             "name": {"description": "Name of user"},
//!             "userName": {"description": "User unique identifer string"}
//!         },
//!         "required": ["name", "userName"]
//!     }
//! })).unwrap();
//!
//! let mut form = Form::from_control(&control).unwrap();
//! form.set_value("name", "Alice");
//! form.set_value("userName", "alice");
//! let payload = form.payload().unwrap();
//! assert_eq!(payload, json!({"name": "Alice", "userName": "alice"}));
//! ```

use serde_json::{Map, Value};

use crate::error::{ClientError, Result};
use crate::types::{Control, Document};

/// Field names rendered as multi-line inputs, by convention.
const MULTILINE_FIELDS: [&str; 2] = ["description", "ingredients"];

/// One input field of a form.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Input name; equals the resource attribute name.
    pub name: String,
    /// Display label, `name (description)` when the schema describes it.
    pub label: String,
    /// Whether the schema lists this field as mandatory.
    pub required: bool,
    /// Multi-line text area instead of a single-line input.
    pub multiline: bool,
    /// Field carries a JSON number rather than a string.
    pub numeric: bool,
    /// Current input value.
    pub value: String,
}

impl Field {
    /// A plain optional single-line text field.
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Field {
            name: name.into(),
            label: label.into(),
            required: false,
            multiline: false,
            numeric: false,
            value: String::new(),
        }
    }

    /// Mark the field mandatory.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// An input form bound to a control's action and method.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    /// Target href from the control.
    pub action: String,
    /// HTTP method from the control.
    pub method: String,
    fields: Vec<Field>,
}

impl Form {
    /// An empty form with an explicit action and method.
    ///
    /// Used for the hand-built start page lookup form; schema-driven forms
    /// come from [`Form::from_control`].
    pub fn new(action: impl Into<String>, method: impl Into<String>) -> Self {
        Form {
            action: action.into(),
            method: method.into(),
            fields: Vec::new(),
        }
    }

    /// Build a form from a create/edit control.
    ///
    /// Produces exactly one field per schema property, in schema order.
    /// Fails with [`ClientError::MalformedControl`] when the control carries
    /// no schema; the caller skips rendering the form in that case.
    pub fn from_control(control: &Control) -> Result<Form> {
        let schema = control.schema.as_ref().ok_or_else(|| {
            ClientError::MalformedControl(format!(
                "control targeting {} carries no schema",
                control.href
            ))
        })?;

        let mut fields = Vec::with_capacity(schema.properties.len());
        for (name, property) in &schema.properties {
            let label = match &property.description {
                Some(description) => format!("{} ({})", name, description),
                None => name.clone(),
            };
            fields.push(Field {
                name: name.clone(),
                label,
                required: schema.is_required(name),
                multiline: MULTILINE_FIELDS.contains(&name.as_str()),
                numeric: property.is_number(),
                value: String::new(),
            });
        }

        Ok(Form {
            action: control.href.clone(),
            method: control.method.clone(),
            fields,
        })
    }

    /// Append a field.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// All fields in render order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Field lookup by input name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Set a field's value. Returns whether the field exists.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Pre-populate inputs from a document's attributes.
    ///
    /// `names` is the declared field list of the resource type; input names
    /// equal attribute names, so the mapping is direct. Attributes missing
    /// from the document leave the input blank.
    pub fn prefill(&mut self, document: &Document, names: &[&str]) {
        for name in names {
            if let Some(value) = document.string_field(name) {
                self.set_value(name, value);
            }
        }
    }

    /// Serialize current input values into the submit payload.
    ///
    /// Empty optional fields are omitted entirely. Number-typed fields are
    /// parsed; a non-numeric value there is a user input error surfaced via
    /// the shared notification.
    pub fn payload(&self) -> Result<Value> {
        let mut payload = Map::new();
        for field in &self.fields {
            let value = field.value.trim();
            if value.is_empty() && !field.required {
                continue;
            }
            if field.numeric {
                let number: f64 = value.parse().map_err(|_| {
                    ClientError::MalformedControl(format!(
                        "field '{}' expects a number, got '{}'",
                        field.name, value
                    ))
                })?;
                payload.insert(field.name.clone(), Value::from(number));
            } else {
                payload.insert(field.name.clone(), Value::String(value.to_string()));
            }
        }
        Ok(Value::Object(payload))
    }
}
