//! Per-business-type template rules.
//!
//! Each business type maps to a [`BusinessTypeConfig`]: which sections are
//! shown by default, in what order, and which sections the type can never
//! show. Built-in templates can be adjusted with [`TemplateOverride`]s loaded
//! from configuration.

use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::BusinessType;
use crate::sections::SectionVisibilityMap;

/// Sections of the business/freelancer profile page, in render order.
pub const PROFILE_SECTIONS: [&str; 13] = [
    "hero",
    "about-us",
    "services-offered",
    "portfolio",
    "skills",
    "experience",
    "team",
    "gallery",
    "packages-pricing",
    "testimonials",
    "faq",
    "contact",
    "footer",
];

/// Sections only a freelancer portfolio renders.
pub const FREELANCER_SECTIONS: [&str; 3] = ["portfolio", "skills", "experience"];

/// Sections only a business with staff and premises renders.
pub const BUSINESS_ONLY_SECTIONS: [&str; 2] = ["team", "gallery"];

pub const HOTEL_SECTIONS: [&str; 7] = [
    "hero",
    "about",
    "features",
    "gallery",
    "amenities",
    "testimonials",
    "contact",
];

pub const WEDDING_SECTIONS: [&str; 7] = [
    "hero",
    "about-us",
    "services-offered",
    "recent-work",
    "gallery",
    "packages-pricing",
    "testimonials",
];

/// Resolved template for one business type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BusinessTypeConfig {
    pub business_type: BusinessType,
    pub default_visibility: SectionVisibilityMap,
    pub default_order: Vec<String>,
    pub hidden_sections: BTreeSet<String>,
}

impl BusinessTypeConfig {
    /// Whether `section` is permanently hidden for this type.
    #[must_use]
    pub fn is_hidden(&self, section: &str) -> bool {
        self.hidden_sections.contains(section)
    }

    /// Built-in template for `business_type`.
    #[must_use]
    pub fn builtin(business_type: BusinessType) -> Self {
        match business_type {
            BusinessType::Freelancer => profile(business_type, &BUSINESS_ONLY_SECTIONS),
            BusinessType::Hotel => all_visible(business_type, &HOTEL_SECTIONS),
            BusinessType::Wedding => all_visible(business_type, &WEDDING_SECTIONS),
            _ => profile(business_type, &FREELANCER_SECTIONS),
        }
    }

    /// Apply a configuration override in place.
    pub fn apply(&mut self, patch: &TemplateOverride) {
        if let Some(hidden) = &patch.hidden_sections {
            self.hidden_sections = hidden.iter().cloned().collect();
        }
        if let Some(order) = &patch.default_order {
            self.default_order.clone_from(order);
        }
        for (section, visible) in &patch.visibility {
            self.default_visibility.set(section, *visible);
        }
    }
}

/// Profile page with `locked` sections hidden and everything else shown.
fn profile(business_type: BusinessType, locked: &[&str]) -> BusinessTypeConfig {
    BusinessTypeConfig {
        business_type,
        default_visibility: PROFILE_SECTIONS
            .iter()
            .map(|s| (*s, !locked.contains(s)))
            .collect(),
        default_order: PROFILE_SECTIONS.iter().map(|s| (*s).to_string()).collect(),
        hidden_sections: locked.iter().map(|s| (*s).to_string()).collect(),
    }
}

fn all_visible(business_type: BusinessType, sections: &[&str]) -> BusinessTypeConfig {
    BusinessTypeConfig {
        business_type,
        default_visibility: sections.iter().map(|s| (*s, true)).collect(),
        default_order: sections.iter().map(|s| (*s).to_string()).collect(),
        hidden_sections: BTreeSet::new(),
    }
}

/// Adjustments to a built-in template, keyed by business-type tag in config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TemplateOverride {
    /// Replaces the locked section list when set.
    #[serde(default)]
    pub hidden_sections: Option<Vec<String>>,

    /// Replaces the default order when set.
    #[serde(default)]
    pub default_order: Option<Vec<String>>,

    /// Merged into the default visibility.
    #[serde(default)]
    pub visibility: BTreeMap<String, bool>,
}

/// Lookup from business type to its template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRegistry {
    configs: BTreeMap<BusinessType, BusinessTypeConfig>,
}

impl TemplateRegistry {
    /// Registry holding the built-in template of every business type.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            configs: BusinessType::ALL
                .into_iter()
                .map(|t| (t, BusinessTypeConfig::builtin(t)))
                .collect(),
        }
    }

    /// Owned copy of the template for `business_type`.
    #[must_use]
    pub fn resolve(&self, business_type: BusinessType) -> BusinessTypeConfig {
        self.configs
            .get(&business_type)
            .cloned()
            .unwrap_or_else(|| BusinessTypeConfig::builtin(business_type))
    }

    pub fn apply_override(&mut self, business_type: BusinessType, patch: &TemplateOverride) {
        self.configs
            .entry(business_type)
            .or_insert_with(|| BusinessTypeConfig::builtin(business_type))
            .apply(patch);
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
