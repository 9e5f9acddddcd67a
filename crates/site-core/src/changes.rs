//! Change tracking between a draft and the snapshot it was copied from.
//!
//! `ChangeSet` is keyed by the path string exactly as the editor supplied
//! it. Entries are recorded as fields are written and are not pruned when a
//! field is edited back to its original value; [`diff`] computes the net
//! difference on demand.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Old and new value of one field. `old` is `None` when the field did not
/// exist in the original snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old: Option<Value>,
    pub new: Value,
}

/// Field path → change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ChangeSet(BTreeMap<String, FieldChange>);

impl ChangeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the change for `path`.
    pub fn record(&mut self, path: &str, old: Option<Value>, new: Value) {
        self.0.insert(path.to_string(), FieldChange { old, new });
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&FieldChange> {
        self.0.get(path)
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldChange)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Leaf-level difference between two documents.
///
/// Objects recurse and produce dotted paths; arrays and scalars compare
/// whole. A key removed from `edited` is reported with `new: null`.
#[must_use]
pub fn diff(original: &Map<String, Value>, edited: &Map<String, Value>) -> ChangeSet {
    let mut changes = ChangeSet::new();
    diff_into(&mut changes, "", original, edited);
    changes
}

fn diff_into(changes: &mut ChangeSet, prefix: &str, original: &Map<String, Value>, edited: &Map<String, Value>) {
    for (key, new) in edited {
        let path = join(prefix, key);
        match (original.get(key), new) {
            (Some(Value::Object(a)), Value::Object(b)) => diff_into(changes, &path, a, b),
            (Some(old), new) if old == new => {}
            (old, new) => changes.record(&path, old.cloned(), new.clone()),
        }
    }
    for (key, old) in original {
        if !edited.contains_key(key) {
            changes.record(&join(prefix, key), Some(old.clone()), Value::Null);
        }
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn record_overwrites_same_path() {
        let mut changes = ChangeSet::new();
        changes.record("title", Some(json!("A")), json!("B"));
        changes.record("title", Some(json!("A")), json!("C"));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.get("title").unwrap().new, json!("C"));
    }

    #[test]
    fn serializes_as_old_new_map() {
        let mut changes = ChangeSet::new();
        changes.record("hero.title", Some(json!("A")), json!("B"));
        changes.record("tagline", None, json!("New"));
        assert_eq!(
            serde_json::to_value(&changes).unwrap(),
            json!({"hero.title": {"old": "A", "new": "B"}, "tagline": {"new": "New"}})
        );
    }

    #[test]
    fn diff_reports_leaves() {
        let original = obj(json!({"hero": {"title": "A", "cta": "Go"}, "tags": [1, 2], "name": "x"}));
        let edited = obj(json!({"hero": {"title": "B", "cta": "Go"}, "tags": [1, 2, 3], "name": "x", "slug": "s"}));
        let changes = diff(&original, &edited);
        let paths: Vec<&str> = changes.paths().collect();
        assert_eq!(paths, vec!["hero.title", "slug", "tags"]);
        assert_eq!(changes.get("slug").unwrap().old, None);
    }

    #[test]
    fn diff_of_reverted_edit_is_empty() {
        let doc = obj(json!({"hero": {"title": "A"}}));
        assert!(diff(&doc, &doc.clone()).is_empty());
    }

    #[test]
    fn diff_reports_removed_keys() {
        let changes = diff(&obj(json!({"a": 1, "b": 2})), &obj(json!({"a": 1})));
        assert_eq!(changes.get("b").unwrap(), &FieldChange { old: Some(json!(2)), new: Value::Null });
    }
}
