//! Declarative payload schemas
//!
//! A [`Schema`] is a compile-time description of the shape an inbound JSON
//! payload must have: one [`Field`] per accepted key, each with a
//! [`Constraint`]. Validation walks the whole payload and aggregates every
//! violation instead of stopping at the first one, so the caller gets the
//! complete list in a single 400 response.
//!
//! Two modes exist:
//! - **full** ([`Schema::validate`]): every required field must be present,
//!   used for creates and full replaces.
//! - **partial** ([`Schema::validate_partial`]): every field is optional, but
//!   any field that IS present must satisfy its constraint, used for merge
//!   updates.
//!
//! On success the sanitized field map is returned: only schema-declared keys
//! survive, with nested objects stripped the same way. Nested object shapes
//! are always checked in full mode; partial application is shallow.

use super::validators;
use crate::core::error::Violation;
use serde_json::{Map, Value};

/// Constraint on a single field value.
#[derive(Debug, Clone)]
pub enum Constraint {
    String {
        nonempty: bool,
        min_len: Option<usize>,
        max_len: Option<usize>,
    },
    Number {
        integer: bool,
        min: Option<f64>,
        max: Option<f64>,
        exclusive_min: bool,
    },
    /// Membership in a fixed set of string values.
    OneOf(&'static [&'static str]),
    /// 24-character hexadecimal entity id.
    ObjectId,
    /// Absolute URL string.
    Url,
    /// Nested object with its own schema.
    Object(Schema),
    Array {
        items: Box<Constraint>,
        nonempty: bool,
    },
    /// Accepts any value unchanged (opaque payloads, e.g. review objects).
    Any,
}

impl Constraint {
    pub fn string() -> Self {
        Constraint::String {
            nonempty: false,
            min_len: None,
            max_len: None,
        }
    }

    pub fn nonempty_string() -> Self {
        Constraint::String {
            nonempty: true,
            min_len: None,
            max_len: None,
        }
    }

    pub fn string_len(min: usize, max: usize) -> Self {
        Constraint::String {
            nonempty: false,
            min_len: Some(min),
            max_len: Some(max),
        }
    }

    pub fn min_len_string(min: usize) -> Self {
        Constraint::String {
            nonempty: false,
            min_len: Some(min),
            max_len: None,
        }
    }

    pub fn positive_number() -> Self {
        Constraint::Number {
            integer: false,
            min: Some(0.0),
            max: None,
            exclusive_min: true,
        }
    }

    pub fn nonnegative_number() -> Self {
        Constraint::Number {
            integer: false,
            min: Some(0.0),
            max: None,
            exclusive_min: false,
        }
    }

    pub fn positive_integer() -> Self {
        Constraint::Number {
            integer: true,
            min: Some(0.0),
            max: None,
            exclusive_min: true,
        }
    }

    pub fn nonnegative_integer() -> Self {
        Constraint::Number {
            integer: true,
            min: Some(0.0),
            max: None,
            exclusive_min: false,
        }
    }

    pub fn number_range(min: f64, max: f64) -> Self {
        Constraint::Number {
            integer: false,
            min: Some(min),
            max: Some(max),
            exclusive_min: false,
        }
    }

    pub fn one_of(allowed: &'static [&'static str]) -> Self {
        Constraint::OneOf(allowed)
    }

    pub fn object_id() -> Self {
        Constraint::ObjectId
    }

    pub fn url() -> Self {
        Constraint::Url
    }

    pub fn object(schema: Schema) -> Self {
        Constraint::Object(schema)
    }

    pub fn array(items: Constraint) -> Self {
        Constraint::Array {
            items: Box::new(items),
            nonempty: false,
        }
    }

    pub fn nonempty_array(items: Constraint) -> Self {
        Constraint::Array {
            items: Box::new(items),
            nonempty: true,
        }
    }

    pub fn any() -> Self {
        Constraint::Any
    }
}

/// A named field in a schema.
#[derive(Debug, Clone)]
pub struct Field {
    name: &'static str,
    required: bool,
    constraint: Constraint,
}

impl Field {
    pub fn required(name: &'static str, constraint: Constraint) -> Self {
        Self {
            name,
            required: true,
            constraint,
        }
    }

    pub fn optional(name: &'static str, constraint: Constraint) -> Self {
        Self {
            name,
            required: false,
            constraint,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Full,
    Partial,
}

/// Declarative shape of one payload kind.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Validate a payload in full mode: all required fields must be present.
    pub fn validate(&self, payload: &Value) -> Result<Map<String, Value>, Vec<Violation>> {
        self.apply(payload, Mode::Full)
    }

    /// Validate a payload in partial mode: only supplied fields are checked.
    pub fn validate_partial(&self, payload: &Value) -> Result<Map<String, Value>, Vec<Violation>> {
        self.apply(payload, Mode::Partial)
    }

    fn apply(&self, payload: &Value, mode: Mode) -> Result<Map<String, Value>, Vec<Violation>> {
        let mut violations = Vec::new();
        let sanitized = self.walk(payload, "", mode, &mut violations);
        if violations.is_empty() {
            Ok(sanitized)
        } else {
            Err(violations)
        }
    }

    fn walk(
        &self,
        payload: &Value,
        prefix: &str,
        mode: Mode,
        out: &mut Vec<Violation>,
    ) -> Map<String, Value> {
        let mut sanitized = Map::new();
        let Some(obj) = payload.as_object() else {
            let path = if prefix.is_empty() { "payload" } else { prefix };
            out.push(Violation::new(path, "must be an object"));
            return sanitized;
        };

        for field in &self.fields {
            let path = join_path(prefix, field.name);
            match obj.get(field.name) {
                None => {
                    if mode == Mode::Full && field.required {
                        out.push(Violation::new(path, "is required"));
                    }
                }
                Some(value) => {
                    if let Some(clean) = check_constraint(&path, value, &field.constraint, out) {
                        sanitized.insert(field.name.to_string(), clean);
                    }
                }
            }
        }

        sanitized
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

/// Check one value against one constraint, pushing violations under `path`.
///
/// Returns the sanitized value when the check passes, `None` otherwise.
fn check_constraint(
    path: &str,
    value: &Value,
    constraint: &Constraint,
    out: &mut Vec<Violation>,
) -> Option<Value> {
    let simple = |msg: Option<String>, out: &mut Vec<Violation>| match msg {
        None => Some(value.clone()),
        Some(message) => {
            out.push(Violation::new(path, message));
            None
        }
    };

    match constraint {
        Constraint::String {
            nonempty,
            min_len,
            max_len,
        } => simple(
            validators::check_string(value, *nonempty, *min_len, *max_len),
            out,
        ),
        Constraint::Number {
            integer,
            min,
            max,
            exclusive_min,
        } => simple(
            validators::check_number(value, *integer, *min, *max, *exclusive_min),
            out,
        ),
        Constraint::OneOf(allowed) => simple(validators::check_one_of(value, allowed), out),
        Constraint::ObjectId => simple(validators::check_object_id(value), out),
        Constraint::Url => simple(validators::check_url(value), out),
        Constraint::Object(schema) => {
            let before = out.len();
            let map = schema.walk(value, path, Mode::Full, out);
            (out.len() == before).then_some(Value::Object(map))
        }
        Constraint::Array { items, nonempty } => {
            let Some(arr) = value.as_array() else {
                out.push(Violation::new(path, "must be an array"));
                return None;
            };
            if *nonempty && arr.is_empty() {
                out.push(Violation::new(path, "must not be empty"));
                return None;
            }
            let before = out.len();
            let clean: Vec<Value> = arr
                .iter()
                .enumerate()
                .filter_map(|(i, item)| {
                    check_constraint(&format!("{}[{}]", path, i), item, items, out)
                })
                .collect();
            (out.len() == before).then_some(Value::Array(clean))
        }
        Constraint::Any => Some(value.clone()),
    }
}
