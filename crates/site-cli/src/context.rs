//! Loaded content shared by the data commands.

use std::path::{Path, PathBuf};

use anyhow::Context;
use site_config::SiteConfig;
use site_core::ids::EntityId;
use site_store::{DraftStore, fixtures};

pub struct AppContext {
    pub store: DraftStore,
    pub data_path: PathBuf,
}

impl AppContext {
    /// Load config and the entity fixture at `data_path` into a fresh store.
    pub fn load(config: &SiteConfig, data_path: &Path) -> anyhow::Result<Self> {
        let entities = fixtures::load_entities(data_path)
            .with_context(|| format!("failed to load entities from {}", data_path.display()))?;
        let store = DraftStore::from_config(config)
            .context("invalid store configuration")?
            .with_entities(entities);
        tracing::debug!(path = %data_path.display(), count = store.entities().len(), "store loaded");
        Ok(Self {
            store,
            data_path: data_path.to_path_buf(),
        })
    }

    /// Write the published collection back to the data file.
    pub fn persist(&self) -> anyhow::Result<()> {
        fixtures::save_entities(&self.data_path, self.store.entities())
            .with_context(|| format!("failed to write {}", self.data_path.display()))
    }

    /// Resolve a CLI id argument against the store.
    pub fn require_entity_id(&self, raw: &str) -> anyhow::Result<EntityId> {
        let id = EntityId::parse(raw);
        if self.store.entity(&id).is_none() {
            anyhow::bail!("no entity with id '{raw}' in {}", self.data_path.display());
        }
        Ok(id)
    }
}
