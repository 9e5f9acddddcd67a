//! Store settings derived from `SiteConfig`.

use site_config::SiteConfig;
use site_core::enums::BusinessType;
use site_core::templates::TemplateRegistry;

use crate::error::StoreError;

/// Behaviour switches for [`crate::DraftStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Record `sectionVisibility.<name>` next to the aggregate entry.
    pub track_section_changes: bool,
    /// Type assumed for entities without a `type` tag.
    pub default_business_type: BusinessType,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            track_section_changes: false,
            default_business_type: BusinessType::Business,
        }
    }
}

impl StoreOptions {
    /// # Errors
    ///
    /// Returns `StoreError::Config` if the default business type is unknown.
    pub fn from_config(config: &SiteConfig) -> Result<Self, StoreError> {
        Ok(Self {
            track_section_changes: config.store.track_section_changes,
            default_business_type: config.default_business_type()?,
        })
    }
}

/// Built-in templates with the configured overrides applied.
///
/// # Errors
///
/// Returns `StoreError::Config` if an override names an unknown business type.
pub fn registry_from_config(config: &SiteConfig) -> Result<TemplateRegistry, StoreError> {
    let mut registry = TemplateRegistry::builtin();
    for (business_type, patch) in config.template_overrides()? {
        registry.apply_override(business_type, patch);
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_core::templates::TemplateOverride;

    #[test]
    fn options_follow_config() {
        let mut config = SiteConfig::default();
        config.store.track_section_changes = true;
        config.store.default_business_type = "wedding".into();
        let options = StoreOptions::from_config(&config).unwrap();
        assert!(options.track_section_changes);
        assert_eq!(options.default_business_type, BusinessType::Wedding);
    }

    #[test]
    fn bad_default_type_is_a_config_error() {
        let mut config = SiteConfig::default();
        config.store.default_business_type = "spaceport".into();
        assert!(matches!(
            StoreOptions::from_config(&config),
            Err(StoreError::Config(_))
        ));
    }

    #[test]
    fn registry_applies_overrides() {
        let mut config = SiteConfig::default();
        config.templates.insert(
            "gym".into(),
            TemplateOverride {
                hidden_sections: Some(vec!["faq".into()]),
                ..TemplateOverride::default()
            },
        );
        let registry = registry_from_config(&config).unwrap();
        assert!(registry.resolve(BusinessType::Gym).is_hidden("faq"));
        assert!(!registry.resolve(BusinessType::Gym).is_hidden("portfolio"));
    }
}
