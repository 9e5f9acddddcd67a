use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::enums::BusinessType;
use crate::errors::CoreError;
use crate::ids::EntityId;
use crate::path::FieldPath;
use crate::sections::SectionVisibilityMap;

pub const ID_KEY: &str = "id";
pub const TYPE_KEY: &str = "type";
pub const SECTION_VISIBILITY_KEY: &str = "sectionVisibility";
pub const SECTION_ORDER_KEY: &str = "sectionOrder";
pub const CUSTOM_SECTIONS_KEY: &str = "customSections";
pub const CUSTOM_SECTION_VISIBILITY_KEY: &str = "customSectionVisibility";

/// A published or draft content record: a business profile, a hotel, a blog
/// post. Everything except the id lives in a free-form JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ContentEntity {
    pub id: EntityId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ContentEntity {
    #[must_use]
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style field insert, mostly for fixtures and tests.
    #[must_use]
    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Build from a JSON object carrying an `id`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Serialization` if the value is not an object with an id.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        Ok(serde_json::from_value(value)?)
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = self.fields.clone();
        map.insert(ID_KEY.to_string(), id_value(&self.id));
        Value::Object(map)
    }

    /// Convert a typed record (e.g. `BlogPost`) into an entity.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Serialization` if the record does not serialize to
    /// an object with an `id`.
    pub fn from_record<T: Serialize>(record: &T) -> Result<Self, CoreError> {
        Self::from_value(serde_json::to_value(record)?)
    }

    /// Convert back into a typed record.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Serialization` if the document no longer matches `T`.
    pub fn to_record<T: DeserializeOwned>(&self) -> Result<T, CoreError> {
        Ok(serde_json::from_value(self.to_value())?)
    }

    #[must_use]
    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        path.get(&self.fields)
    }

    /// Write a field. `id` is not addressable: callers must reject it first.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::PathConflict` if the path runs through a scalar.
    pub fn set(&mut self, path: &FieldPath, value: Value) -> Result<(), CoreError> {
        path.set(&mut self.fields, value)
    }

    /// Raw `type` tag, if present.
    #[must_use]
    pub fn type_tag(&self) -> Option<&str> {
        self.fields.get(TYPE_KEY).and_then(Value::as_str)
    }

    #[must_use]
    pub fn business_type(&self) -> Option<BusinessType> {
        self.type_tag().map(BusinessType::from_tag)
    }

    /// The entity's own visibility overrides. Non-boolean entries are ignored.
    #[must_use]
    pub fn section_visibility(&self) -> Option<SectionVisibilityMap> {
        let map = self.fields.get(SECTION_VISIBILITY_KEY)?.as_object()?;
        Some(
            map.iter()
                .filter_map(|(k, v)| v.as_bool().map(|b| (k.clone(), b)))
                .collect(),
        )
    }

    pub fn set_section_visibility(&mut self, visibility: &SectionVisibilityMap) {
        self.fields
            .insert(SECTION_VISIBILITY_KEY.to_string(), visibility.to_value());
    }

    #[must_use]
    pub fn section_order(&self) -> Option<Vec<String>> {
        let items = self.fields.get(SECTION_ORDER_KEY)?.as_array()?;
        Some(
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        )
    }

    /// Ids of `customSections[]` entries, stringified.
    #[must_use]
    pub fn custom_section_ids(&self) -> Vec<String> {
        self.fields
            .get(CUSTOM_SECTIONS_KEY)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| match item.get(ID_KEY)? {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether `customSectionVisibility[id]` is explicitly `false`.
    #[must_use]
    pub fn custom_section_hidden(&self, id: &str) -> bool {
        self.fields
            .get(CUSTOM_SECTION_VISIBILITY_KEY)
            .and_then(|v| v.get(id))
            .and_then(Value::as_bool)
            == Some(false)
    }
}

fn id_value(id: &EntityId) -> Value {
    match id {
        EntityId::Number(n) => Value::from(*n),
        EntityId::Text(s) => Value::from(s.as_str()),
    }
}
