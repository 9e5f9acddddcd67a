//! # site-config
//!
//! Layered configuration loading for the site builder using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SITE_*` prefix, `__` as separator)
//! 2. Project-level `.site/config.toml`
//! 3. User-level `~/.config/site-builder/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SITE_STORE__TRACK_SECTION_CHANGES` -> `store.track_section_changes`,
//! `SITE_BLOG__WORDS_PER_MINUTE` -> `blog.words_per_minute`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use site_config::SiteConfig;
//!
//! let config = SiteConfig::load_with_dotenv().expect("config");
//! for (business_type, patch) in config.template_overrides().expect("valid templates") {
//!     println!("{business_type}: {patch:?}");
//! }
//! ```

mod blog;
mod error;
mod store;

pub use blog::BlogConfig;
pub use error::ConfigError;
pub use store::StoreConfig;

use std::collections::BTreeMap;
use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use site_core::enums::BusinessType;
use site_core::templates::TemplateOverride;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub blog: BlogConfig,
    /// Template adjustments keyed by business-type tag (`freelancer`, `hotel`, ...).
    #[serde(default)]
    pub templates: BTreeMap<String, TemplateOverride>,
}

impl SiteConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be read or extracted.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be read or extracted.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".site/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("SITE_").split("__"))
    }

    /// Template overrides with their tags resolved to business types.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a tag that names no business type.
    pub fn template_overrides(&self) -> Result<Vec<(BusinessType, &TemplateOverride)>, ConfigError> {
        self.templates
            .iter()
            .map(|(tag, patch)| {
                BusinessType::parse_exact(tag)
                    .map(|ty| (ty, patch))
                    .ok_or_else(|| ConfigError::InvalidValue {
                        field: format!("templates.{tag}"),
                        reason: format!("unknown business type '{tag}'"),
                    })
            })
            .collect()
    }

    /// The configured fallback business type.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `store.default_business_type`
    /// names no business type.
    pub fn default_business_type(&self) -> Result<BusinessType, ConfigError> {
        let tag = &self.store.default_business_type;
        BusinessType::parse_exact(tag).ok_or_else(|| ConfigError::InvalidValue {
            field: "store.default_business_type".into(),
            reason: format!("unknown business type '{tag}'"),
        })
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("site-builder").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
