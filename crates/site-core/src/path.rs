//! Dotted field paths into entity documents.
//!
//! `hero.title` addresses `{"hero": {"title": ..}}`, numeric segments index
//! arrays (`services.0.price`). Writes create missing intermediate objects
//! and replace `null` intermediates, but never write through a scalar or past
//! the end of an array.

use std::fmt;

use serde_json::{Map, Value};

use crate::errors::CoreError;

/// A parsed field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dotted path.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPath` for empty paths or empty segments
    /// (`"a..b"`, `".a"`).
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.is_empty() {
            return Err(invalid(raw, "path is empty"));
        }
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(invalid(raw, "path contains an empty segment"));
        }
        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// A single top-level key, taken verbatim (dots are part of the key).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPath` if `key` is empty.
    pub fn key(key: &str) -> Result<Self, CoreError> {
        if key.is_empty() {
            return Err(invalid(key, "field name is empty"));
        }
        Ok(Self {
            raw: key.to_string(),
            segments: vec![key.to_string()],
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// First segment of the path.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.segments[0]
    }

    /// Read the value at this path.
    #[must_use]
    pub fn get<'a>(&self, doc: &'a Map<String, Value>) -> Option<&'a Value> {
        let (first, rest) = self.segments.split_first()?;
        let mut node = doc.get(first)?;
        for segment in rest {
            node = child(node, segment)?;
        }
        Some(node)
    }

    /// Write `value` at this path, creating intermediate objects as needed.
    ///
    /// The document is left untouched when the write is rejected.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::PathConflict` if an intermediate value is a scalar
    /// or an array indexed out of bounds.
    pub fn set(&self, doc: &mut Map<String, Value>, value: Value) -> Result<(), CoreError> {
        self.check_writable(doc)?;

        let (last, parents) = self
            .segments
            .split_last()
            .ok_or_else(|| invalid(&self.raw, "path is empty"))?;
        let Some((first, middle)) = parents.split_first() else {
            doc.insert(last.clone(), value);
            return Ok(());
        };

        let mut node = doc.entry(first.clone()).or_insert(Value::Null);
        for segment in middle {
            node = descend_mut(node, segment, &self.raw)?;
        }
        assign(node, last, value, &self.raw)
    }

    /// Walk the path read-only and report the first segment a write would
    /// fail on.
    fn check_writable(&self, doc: &Map<String, Value>) -> Result<(), CoreError> {
        let Some((first, rest)) = self.segments.split_first() else {
            return Err(invalid(&self.raw, "path is empty"));
        };
        let Some(mut node) = doc.get(first) else {
            return Ok(());
        };
        for segment in rest {
            match node {
                Value::Null => return Ok(()),
                Value::Object(map) => match map.get(segment) {
                    Some(next) => node = next,
                    None => return Ok(()),
                },
                Value::Array(items) => match parse_index(segment, items.len()) {
                    Some(i) => node = &items[i],
                    None => return Err(conflict(&self.raw, segment)),
                },
                _ => return Err(conflict(&self.raw, segment)),
            }
        }
        Ok(())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn child<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => parse_index(segment, items.len()).map(|i| &items[i]),
        _ => None,
    }
}

fn descend_mut<'a>(node: &'a mut Value, segment: &str, path: &str) -> Result<&'a mut Value, CoreError> {
    if node.is_null() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => Ok(map.entry(segment.to_string()).or_insert(Value::Null)),
        Value::Array(items) => {
            let len = items.len();
            parse_index(segment, len)
                .map(move |i| &mut items[i])
                .ok_or_else(|| conflict(path, segment))
        }
        _ => Err(conflict(path, segment)),
    }
}

fn assign(node: &mut Value, segment: &str, value: Value, path: &str) -> Result<(), CoreError> {
    if node.is_null() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => {
            map.insert(segment.to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            let i = parse_index(segment, items.len()).ok_or_else(|| conflict(path, segment))?;
            items[i] = value;
            Ok(())
        }
        _ => Err(conflict(path, segment)),
    }
}

fn parse_index(segment: &str, len: usize) -> Option<usize> {
    segment.parse::<usize>().ok().filter(|i| *i < len)
}

fn invalid(path: &str, reason: &str) -> CoreError {
    CoreError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

fn conflict(path: &str, segment: &str) -> CoreError {
    CoreError::PathConflict {
        path: path.to_string(),
        segment: segment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    #[test]
    fn parse_rejects_empty_segments() {
        assert!(FieldPath::parse("").is_err());
        assert!(FieldPath::parse("a..b").is_err());
        assert!(FieldPath::parse(".a").is_err());
        assert_eq!(FieldPath::parse("hero.title").unwrap().segments().len(), 2);
    }

    #[test]
    fn key_keeps_dots_verbatim() {
        let path = FieldPath::key("seo.meta").unwrap();
        assert_eq!(path.segments(), ["seo.meta".to_string()]);
        let mut d = doc(json!({}));
        path.set(&mut d, json!("x")).unwrap();
        assert_eq!(d.get("seo.meta"), Some(&json!("x")));
    }

    #[test]
    fn get_walks_objects_and_arrays() {
        let d = doc(json!({"hero": {"title": "A"}, "services": [{"price": 10}]}));
        let title = FieldPath::parse("hero.title").unwrap();
        let price = FieldPath::parse("services.0.price").unwrap();
        let missing = FieldPath::parse("services.3.price").unwrap();
        assert_eq!(title.get(&d), Some(&json!("A")));
        assert_eq!(price.get(&d), Some(&json!(10)));
        assert_eq!(missing.get(&d), None);
    }

    #[test]
    fn set_creates_intermediate_objects() {
        let mut d = doc(json!({}));
        FieldPath::parse("contact.address.city")
            .unwrap()
            .set(&mut d, json!("Pune"))
            .unwrap();
        assert_eq!(Value::Object(d), json!({"contact": {"address": {"city": "Pune"}}}));
    }

    #[test]
    fn set_replaces_null_intermediate() {
        let mut d = doc(json!({"hero": null}));
        FieldPath::parse("hero.title").unwrap().set(&mut d, json!("B")).unwrap();
        assert_eq!(Value::Object(d), json!({"hero": {"title": "B"}}));
    }

    #[test]
    fn set_indexes_arrays_in_bounds() {
        let mut d = doc(json!({"services": [{"price": 10}, {"price": 20}]}));
        FieldPath::parse("services.1.price")
            .unwrap()
            .set(&mut d, json!(25))
            .unwrap();
        assert_eq!(d["services"][1]["price"], json!(25));
    }

    #[test]
    fn set_through_scalar_is_rejected_without_mutation() {
        let mut d = doc(json!({"hero": "plain"}));
        let before = d.clone();
        let err = FieldPath::parse("hero.title.text")
            .unwrap()
            .set(&mut d, json!("B"))
            .unwrap_err();
        assert!(matches!(err, CoreError::PathConflict { ref segment, .. } if segment == "title"));
        assert_eq!(d, before);
    }

    #[test]
    fn set_out_of_bounds_is_rejected() {
        let mut d = doc(json!({"services": []}));
        let err = FieldPath::parse("services.0.price")
            .unwrap()
            .set(&mut d, json!(1))
            .unwrap_err();
        assert!(matches!(err, CoreError::PathConflict { .. }));
        assert_eq!(d["services"], json!([]));
    }
}
