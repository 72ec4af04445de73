// Shared checks for schemaless request bodies merged into storage

use crate::utils::error::ValidationError;
use serde_json::{Map, Value};

/// Rejects keys that would alter the update itself rather than the stored
/// fields: the identifier, operator keys and dotted paths.
pub fn check_keys(body: &Map<String, Value>) -> Result<(), ValidationError> {
    if body.contains_key("_id") {
        return Err(ValidationError::new("_id", "is assigned by the server"));
    }
    check_nested("", body)
}

fn check_nested(prefix: &str, object: &Map<String, Value>) -> Result<(), ValidationError> {
    for (key, value) in object {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        if key.is_empty() || key.starts_with('$') || key.contains('.') {
            return Err(ValidationError::new(path, "field names may not be empty, start with '$' or contain '.'"));
        }

        match value {
            Value::Object(inner) => check_nested(&path, inner)?,
            Value::Array(items) => {
                for item in items {
                    if let Value::Object(inner) = item {
                        check_nested(&path, inner)?;
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}

pub fn require_non_empty(body: &Map<String, Value>) -> Result<(), ValidationError> {
    if body.is_empty() {
        return Err(ValidationError::new("body", "must contain at least one field"));
    }
    Ok(())
}

/// Loose shape check: one `@`, a non-empty local part, a dotted domain, no whitespace.
pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Reads `field` as an email address. Absent is an error only when `required`.
pub fn email_field(
    object: &Map<String, Value>,
    field: &str,
    path: &str,
    required: bool,
) -> Result<Option<String>, ValidationError> {
    match object.get(field) {
        Some(Value::String(email)) if is_email(email) => Ok(Some(email.clone())),
        Some(_) => Err(ValidationError::new(path, "must be a valid email address")),
        None if required => Err(ValidationError::new(path, "is required")),
        None => Ok(None),
    }
}

/// Checks an optional string field against a closed set of values.
pub fn enum_field<T>(
    object: &Map<String, Value>,
    field: &str,
    parse: impl Fn(&str) -> Option<T>,
    allowed: &[&str],
) -> Result<Option<T>, ValidationError> {
    match object.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .and_then(parse)
            .map(Some)
            .ok_or_else(|| ValidationError::new(field, format!("must be one of: {}", allowed.join(", ")))),
    }
}
