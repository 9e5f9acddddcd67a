//! JSON fixture files the dashboard is seeded from.
//!
//! Entity files hold either an array of entities, a single entity, or a
//! `{ "data": ... }` envelope around either. Blog files hold an array of
//! posts, a `{ "blogs": [...], "categories": [...] }` object, or the API
//! envelope `{ "status": "success", "data": { ... } }`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use site_core::entities::{BlogPost, ContentEntity};

use crate::error::StoreError;

/// Posts and categories read from a blog fixture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogFixture {
    #[serde(default)]
    pub blogs: Vec<BlogPost>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Read content entities from `path`.
///
/// # Errors
///
/// Returns `StoreError::Io` if the file cannot be read, `StoreError::Json` if
/// it is not JSON, and `StoreError::Fixture` if its shape is not recognised.
pub fn load_entities(path: &Path) -> Result<Vec<ContentEntity>, StoreError> {
    let raw = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;
    let entities = parse_entities(unwrap_envelope(value, "data"))?;
    tracing::debug!(path = %path.display(), count = entities.len(), "entities loaded");
    Ok(entities)
}

fn parse_entities(value: Value) -> Result<Vec<ContentEntity>, StoreError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| ContentEntity::from_value(item).map_err(StoreError::from))
            .collect(),
        Value::Object(_) => Ok(vec![ContentEntity::from_value(value)?]),
        other => Err(StoreError::Fixture(format!(
            "expected an entity or a list of entities, found {}",
            kind(&other)
        ))),
    }
}

/// Write `entities` to `path` as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns `StoreError::Io` if the file cannot be written.
pub fn save_entities(path: &Path, entities: &[ContentEntity]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(entities)?;
    fs::write(path, json)?;
    tracing::debug!(path = %path.display(), count = entities.len(), "entities saved");
    Ok(())
}

/// Read blog posts and categories from `path`.
///
/// # Errors
///
/// Returns `StoreError::Fixture` for an envelope whose status is not
/// `success` or for an unrecognised shape, and `StoreError::Io` /
/// `StoreError::Json` for unreadable files.
pub fn load_blogs(path: &Path) -> Result<BlogFixture, StoreError> {
    let raw = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;

    let value = match value {
        Value::Object(mut map) if map.contains_key("status") => {
            let status = map.get("status").and_then(Value::as_str).unwrap_or_default();
            if status != "success" {
                return Err(StoreError::Fixture(format!(
                    "blog response status is '{status}'"
                )));
            }
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };

    let fixture = match value {
        Value::Array(_) => BlogFixture {
            blogs: serde_json::from_value(value)?,
            categories: Vec::new(),
        },
        Value::Object(_) => serde_json::from_value(value)?,
        other => {
            return Err(StoreError::Fixture(format!(
                "expected blog posts, found {}",
                kind(&other)
            )));
        }
    };
    tracing::debug!(
        path = %path.display(),
        blogs = fixture.blogs.len(),
        categories = fixture.categories.len(),
        "blogs loaded"
    );
    Ok(fixture)
}

fn unwrap_envelope(value: Value, key: &str) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key(key) => {
            map.remove(key).unwrap_or(Value::Null)
        }
        other => other,
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
