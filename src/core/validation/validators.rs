//! Leaf value checks used by the schema walker
//!
//! Each check inspects a single JSON value and reports at most one message.
//! Type mismatches are reported here too (a `null` fails every typed check),
//! so the walker only has to handle presence/absence.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// 24-character hexadecimal entity id (BSON ObjectId hex form).
static OBJECT_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{24}$").expect("object id pattern is valid")
});

/// Check whether a string is a well-formed 24-hex entity id.
pub fn is_object_id(s: &str) -> bool {
    OBJECT_ID_RE.is_match(s)
}

/// Check a string value: presence of the right type, then optional
/// non-emptiness and length bounds.
pub fn check_string(
    value: &Value,
    nonempty: bool,
    min_len: Option<usize>,
    max_len: Option<usize>,
) -> Option<String> {
    let Some(s) = value.as_str() else {
        return Some("must be a string".to_string());
    };
    if nonempty && s.is_empty() {
        return Some("must not be empty".to_string());
    }
    let len = s.chars().count();
    if let Some(min) = min_len
        && len < min
    {
        return Some(format!("must be at least {} characters", min));
    }
    if let Some(max) = max_len
        && len > max
    {
        return Some(format!("must be at most {} characters", max));
    }
    None
}

/// Check a numeric value: type, integrality, and bounds. `exclusive_min`
/// turns the lower bound into a strict one (`> min` instead of `>= min`).
pub fn check_number(
    value: &Value,
    integer: bool,
    min: Option<f64>,
    max: Option<f64>,
    exclusive_min: bool,
) -> Option<String> {
    let Some(n) = value.as_f64() else {
        return Some("must be a number".to_string());
    };
    if integer && n.fract() != 0.0 {
        return Some("must be an integer".to_string());
    }
    if let Some(min) = min {
        if exclusive_min && n <= min {
            return Some(format!("must be greater than {}", min));
        }
        if !exclusive_min && n < min {
            return Some(format!("must be at least {}", min));
        }
    }
    if let Some(max) = max
        && n > max
    {
        return Some(format!("must be at most {}", max));
    }
    None
}

/// Check membership in a fixed set of allowed string values.
pub fn check_one_of(value: &Value, allowed: &[&str]) -> Option<String> {
    let Some(s) = value.as_str() else {
        return Some("must be a string".to_string());
    };
    if allowed.contains(&s) {
        None
    } else {
        Some(format!("must be one of: {}", allowed.join(", ")))
    }
}

/// Check that a string is a well-formed 24-hex entity id.
pub fn check_object_id(value: &Value) -> Option<String> {
    let Some(s) = value.as_str() else {
        return Some("must be a string".to_string());
    };
    if is_object_id(s) {
        None
    } else {
        Some("must be a 24-character hexadecimal id".to_string())
    }
}

/// Check that a string parses as an absolute URL.
pub fn check_url(value: &Value) -> Option<String> {
    let Some(s) = value.as_str() else {
        return Some("must be a string".to_string());
    };
    if url::Url::parse(s).is_ok() {
        None
    } else {
        Some("must be a valid URL".to_string())
    }
}
