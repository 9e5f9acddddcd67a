//! Error types for site-store.

use site_config::ConfigError;
use site_core::errors::CoreError;
use thiserror::Error;

/// Errors from store setup, fixtures and catalog mutations.
///
/// Draft operations themselves report through `Outcome` and never return
/// these.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a fixture file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A fixture file is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A fixture parsed but has the wrong shape.
    #[error("Invalid fixture: {0}")]
    Fixture(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
