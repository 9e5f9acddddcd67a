//! Draft store configuration.

use serde::{Deserialize, Serialize};

fn default_business_type() -> String {
    "business".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Also record `sectionVisibility.<name>` entries when a section is
    /// toggled, next to the aggregate `sectionVisibility` entry.
    #[serde(default)]
    pub track_section_changes: bool,

    /// Business type assumed when neither the slug nor the entity names one.
    #[serde(default = "default_business_type")]
    pub default_business_type: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            track_section_changes: false,
            default_business_type: default_business_type(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = StoreConfig::default();
        assert!(!config.track_section_changes);
        assert_eq!(config.default_business_type, "business");
    }
}
