//! Section visibility maps and the derived page views built from them.
//!
//! A page is rendered from an ordered list of section names. The order comes
//! from the entity (`sectionOrder`) or its template, custom sections are
//! appended as `custom-<id>`, and the list is filtered by visibility and by
//! the template's locked sections.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::ContentEntity;
use crate::templates::BusinessTypeConfig;

/// Prefix marking custom sections in an order list.
pub const CUSTOM_SECTION_PREFIX: &str = "custom-";

/// Per-section show/hide flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SectionVisibilityMap(BTreeMap<String, bool>);

impl SectionVisibilityMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, section: &str) -> Option<bool> {
        self.0.get(section).copied()
    }

    /// Missing sections count as hidden.
    #[must_use]
    pub fn is_visible(&self, section: &str) -> bool {
        self.get(section).unwrap_or(false)
    }

    pub fn set(&mut self, section: &str, visible: bool) {
        self.0.insert(section.to_string(), visible);
    }

    /// Flip one flag and return its new value.
    pub fn toggle(&mut self, section: &str) -> bool {
        let next = !self.is_visible(section);
        self.set(section, next);
        next
    }

    /// Overlay `other` on top of `self`; entries in `other` win.
    pub fn merge(&mut self, other: &Self) {
        for (section, visible) in &other.0 {
            self.0.insert(section.clone(), *visible);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), Value::Bool(*v)))
                .collect(),
        )
    }
}

impl FromIterator<(String, bool)> for SectionVisibilityMap {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, bool)> for SectionVisibilityMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}

/// What a renderer needs: the entity and the sections to draw, in order.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct PageView {
    pub entity: ContentEntity,
    pub sections: Vec<String>,
}

/// Template defaults overlaid with the entity's own flags. Locked sections
/// are always hidden.
#[must_use]
pub fn resolve_visibility(
    config: Option<&BusinessTypeConfig>,
    entity: &ContentEntity,
) -> SectionVisibilityMap {
    let mut visibility = config
        .map(|c| c.default_visibility.clone())
        .unwrap_or_default();
    if let Some(own) = entity.section_visibility() {
        visibility.merge(&own);
    }
    if let Some(config) = config {
        for section in &config.hidden_sections {
            visibility.set(section, false);
        }
    }
    visibility
}

/// Section names to render for `entity`, in order.
///
/// Without an explicit order or template the entity's own visibility keys
/// are used.
#[must_use]
pub fn ordered_sections(config: Option<&BusinessTypeConfig>, entity: &ContentEntity) -> Vec<String> {
    let visibility = resolve_visibility(config, entity);
    let mut order = entity
        .section_order()
        .or_else(|| config.map(|c| c.default_order.clone()))
        .unwrap_or_else(|| visibility.iter().map(|(k, _)| k.to_string()).collect());

    for id in entity.custom_section_ids() {
        let key = format!("{CUSTOM_SECTION_PREFIX}{id}");
        if !order.contains(&key) {
            order.push(key);
        }
    }

    let custom_ids = entity.custom_section_ids();
    order
        .into_iter()
        .filter(|section| match section.strip_prefix(CUSTOM_SECTION_PREFIX) {
            Some(id) => custom_ids.iter().any(|c| c == id) && !entity.custom_section_hidden(id),
            None => {
                visibility.is_visible(section) && config.is_none_or(|c| !c.is_hidden(section))
            }
        })
        .collect()
}

/// Build the page view for `entity`.
#[must_use]
pub fn page_view(config: Option<&BusinessTypeConfig>, entity: &ContentEntity) -> PageView {
    PageView {
        sections: ordered_sections(config, entity),
        entity: entity.clone(),
    }
}
