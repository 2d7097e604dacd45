//! Payload validation for post create and replace requests.
//!
//! Payloads arrive untyped. [`validate_post`] checks them against the post
//! shape and either returns a [`PostDraft`] or every violation it found.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::domain::PostDraft;
use crate::error::ValidationErrors;

const ALLOWED_FIELDS: [&str; 4] = ["title", "body", "tags", "publishedDate"];

/// Validate a raw JSON payload.
///
/// `title` and `body` must be non-empty strings, `tags` an array of
/// non-empty strings (possibly empty) and `publishedDate`, when present,
/// an RFC 3339 timestamp. Any other key is rejected.
pub fn validate_post(payload: &Value) -> Result<PostDraft, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let Some(fields) = payload.as_object() else {
        errors.push("payload", "must be an object");
        return Err(errors);
    };

    for key in fields.keys() {
        if !ALLOWED_FIELDS.contains(&key.as_str()) {
            errors.push(key.as_str(), "is not allowed");
        }
    }

    let title = required_string(fields, "title", &mut errors);
    let body = required_string(fields, "body", &mut errors);
    let tags = required_tags(fields, &mut errors);
    let published_date = optional_date(fields, "publishedDate", &mut errors);

    match (title, body, tags) {
        (Some(title), Some(body), Some(tags)) if errors.is_empty() => Ok(PostDraft {
            title,
            body,
            tags,
            published_date,
        }),
        _ => Err(errors),
    }
}

fn required_string(
    fields: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match fields.get(field) {
        None | Some(Value::Null) => {
            errors.push(field, "is required");
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            errors.push(field, "is not allowed to be empty");
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(field, "must be a string");
            None
        }
    }
}

fn required_tags(fields: &Map<String, Value>, errors: &mut ValidationErrors) -> Option<Vec<String>> {
    let items = match fields.get("tags") {
        None | Some(Value::Null) => {
            errors.push("tags", "is required");
            return None;
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            errors.push("tags", "must be an array");
            return None;
        }
    };

    let mut tags = Vec::with_capacity(items.len());
    let mut valid = true;
    for (i, item) in items.iter().enumerate() {
        match item {
            Value::String(s) if s.is_empty() => {
                errors.push(format!("tags[{i}]"), "is not allowed to be empty");
                valid = false;
            }
            Value::String(s) => tags.push(s.clone()),
            _ => {
                errors.push(format!("tags[{i}]"), "must be a string");
                valid = false;
            }
        }
    }

    valid.then_some(tags)
}

fn optional_date(
    fields: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<DateTime<Utc>> {
    match fields.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => match DateTime::parse_from_rfc3339(s) {
            Ok(date) => Some(date.with_timezone(&Utc)),
            Err(_) => {
                errors.push(field, "must be a valid date");
                None
            }
        },
        Some(_) => {
            errors.push(field, "must be a valid date");
            None
        }
    }
}
