//! The draft content store.
//!
//! `DraftStore` owns the published collection and at most one draft. A draft
//! is opened with [`DraftStore::start_editing`], mutated field by field and
//! then either published with [`DraftStore::commit`] or reverted with
//! [`DraftStore::discard`].
//!
//! Invalid operations are no-ops. Every operation returns an [`Outcome`] so
//! callers can tell "nothing to do" from "misuse" without the store raising
//! errors.
//!
//! Readers pick a side: public pages read [`DraftStore::published_page`],
//! the editor's own preview pane reads [`DraftStore::preview_page`].

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use site_config::SiteConfig;
use site_core::changes::{ChangeSet, diff};
use site_core::entities::{ContentEntity, ID_KEY, SECTION_VISIBILITY_KEY};
use site_core::enums::{BusinessType, DraftPhase};
use site_core::ids::EntityId;
use site_core::outcome::{Outcome, Rejection};
use site_core::path::FieldPath;
use site_core::sections::{
    PageView, SectionVisibilityMap, ordered_sections, page_view, resolve_visibility,
};
use site_core::templates::{BusinessTypeConfig, TemplateRegistry};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::options::{StoreOptions, registry_from_config};

#[derive(Debug, Clone)]
pub struct DraftStore {
    entities: Vec<ContentEntity>,
    registry: TemplateRegistry,
    options: StoreOptions,

    active_id: Option<EntityId>,
    editing: Option<ContentEntity>,
    original: Option<ContentEntity>,
    changes: ChangeSet,
    has_changes: bool,

    active_type: Option<BusinessType>,
    type_config: Option<BusinessTypeConfig>,
    section_visibility: SectionVisibilityMap,

    last_saved_at: Option<DateTime<Utc>>,
    last_published_at: Option<DateTime<Utc>>,
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new(TemplateRegistry::builtin(), StoreOptions::default())
    }
}

impl DraftStore {
    /// Empty store. The live visibility map starts from the generic business
    /// profile defaults.
    #[must_use]
    pub fn new(registry: TemplateRegistry, options: StoreOptions) -> Self {
        let section_visibility = BusinessTypeConfig::builtin(BusinessType::Business).default_visibility;
        Self {
            entities: Vec::new(),
            registry,
            options,
            active_id: None,
            editing: None,
            original: None,
            changes: ChangeSet::new(),
            has_changes: false,
            active_type: None,
            type_config: None,
            section_visibility,
            last_saved_at: None,
            last_published_at: None,
        }
    }

    /// Store configured from `SiteConfig` (template overrides, options).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Config` if the configuration names unknown
    /// business types.
    pub fn from_config(config: &SiteConfig) -> Result<Self, StoreError> {
        Ok(Self::new(
            registry_from_config(config)?,
            StoreOptions::from_config(config)?,
        ))
    }

    #[must_use]
    pub fn with_entities(mut self, entities: Vec<ContentEntity>) -> Self {
        self.entities = entities;
        self
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Replace the collection with a single entity and adopt its template.
    ///
    /// The live visibility map is reset to the type defaults overlaid with
    /// the entity's own flags.
    pub fn initialize_data(&mut self, entity: ContentEntity) {
        let business_type = entity
            .business_type()
            .unwrap_or(self.options.default_business_type);
        self.activate_type(business_type);
        self.section_visibility = resolve_visibility(self.type_config.as_ref(), &entity);
        debug!(id = %entity.id, %business_type, "initialize_data: collection replaced");
        self.entities = vec![entity];
    }

    /// Add an entity unless one with the same id is already held. Adopts its
    /// type only when no type is active yet.
    pub fn initialize_entity(&mut self, entity: ContentEntity) {
        if self.active_type.is_none() {
            if let Some(business_type) = entity.business_type() {
                self.activate_type(business_type);
            }
        }
        if self.entity(&entity.id).is_none() {
            debug!(id = %entity.id, "initialize_entity: entity added");
            self.entities.push(entity);
        }
    }

    /// Switch the active business type and reapply its default visibility.
    pub fn set_business_type(&mut self, business_type: BusinessType) {
        self.activate_type(business_type);
        if let Some(config) = &self.type_config {
            self.section_visibility.merge(&config.default_visibility);
        }
        debug!(%business_type, "set_business_type: defaults applied");
    }

    fn activate_type(&mut self, business_type: BusinessType) {
        self.active_type = Some(business_type);
        self.type_config = Some(self.registry.resolve(business_type));
    }

    // -----------------------------------------------------------------------
    // Draft lifecycle
    // -----------------------------------------------------------------------

    /// Open a draft of the entity with `id`.
    ///
    /// The entity's `type` tag selects the template; untagged entities get the
    /// configured default type. An unknown id leaves the store with no draft;
    /// that is a valid state, reported as `Rejected(EntityNotFound)`.
    pub fn start_editing(&mut self, id: &EntityId) -> Outcome {
        self.active_id = Some(id.clone());
        self.changes.clear();
        self.has_changes = false;

        let Some(entity) = self.entity(id).cloned() else {
            warn!(%id, "start_editing: entity not found");
            self.editing = None;
            self.original = None;
            return Outcome::Rejected(Rejection::EntityNotFound { id: id.clone() });
        };

        let business_type = entity
            .business_type()
            .unwrap_or(self.options.default_business_type);
        self.activate_type(business_type);
        self.section_visibility = resolve_visibility(self.type_config.as_ref(), &entity);
        self.original = Some(entity.clone());
        self.editing = Some(entity);
        debug!(%id, business_type = ?self.active_type, "start_editing: draft opened");
        Outcome::Applied
    }

    /// Set a top-level field. The name is used verbatim, dots included.
    pub fn update_field(&mut self, field: &str, value: Value) -> Outcome {
        if self.editing.is_none() {
            return reject_no_draft("update_field");
        }
        match FieldPath::key(field) {
            Ok(path) => self.write(&path, value),
            Err(_) => Outcome::Rejected(Rejection::InvalidPath {
                path: field.to_string(),
            }),
        }
    }

    /// Set a field addressed by a dotted path (`hero.title`, `services.0.price`).
    pub fn update_nested_field(&mut self, path: &str, value: Value) -> Outcome {
        if self.editing.is_none() {
            return reject_no_draft("update_nested_field");
        }
        match FieldPath::parse(path) {
            Ok(path) => self.write(&path, value),
            Err(_) => Outcome::Rejected(Rejection::InvalidPath {
                path: path.to_string(),
            }),
        }
    }

    /// Append `item` to the list at `path`, creating the list if missing.
    pub fn push_item(&mut self, path: &str, item: Value) -> Outcome {
        self.edit_list(path, |items| {
            items.push(item);
            Ok(())
        })
    }

    /// Remove the list element at `index`.
    pub fn remove_item(&mut self, path: &str, index: usize) -> Outcome {
        self.edit_list(path, |items| {
            if index < items.len() {
                items.remove(index);
                Ok(())
            } else {
                Err(index.to_string())
            }
        })
    }

    /// Shallow-merge `patch` into the list element whose `id` equals `item_id`.
    pub fn update_item(&mut self, path: &str, item_id: &Value, patch: Map<String, Value>) -> Outcome {
        self.edit_list(path, |items| {
            let item = items
                .iter_mut()
                .find(|item| item.get(ID_KEY) == Some(item_id))
                .and_then(Value::as_object_mut)
                .ok_or_else(|| item_id.to_string())?;
            item.extend(patch);
            Ok(())
        })
    }

    /// Flip a section's visibility in the live map and in the draft.
    ///
    /// Sections locked by the active business type are refused with a
    /// warning. Only the toggled key of the draft's `sectionVisibility` is
    /// written; other entries, non-boolean ones included, are kept. The change
    /// is recorded under a single `sectionVisibility` entry holding the whole
    /// map.
    pub fn toggle_section_visibility(&mut self, section: &str) -> Outcome {
        if let Some(config) = &self.type_config {
            if config.is_hidden(section) {
                warn!(
                    section,
                    business_type = %config.business_type,
                    "section is not available for this business type"
                );
                return Outcome::Rejected(Rejection::LockedSection {
                    section: section.to_string(),
                    business_type: config.business_type,
                });
            }
        }
        let Some(editing) = self.editing.as_mut() else {
            return reject_no_draft("toggle_section_visibility");
        };

        let visible = self.section_visibility.toggle(section);
        match editing
            .fields
            .get_mut(SECTION_VISIBILITY_KEY)
            .and_then(Value::as_object_mut)
        {
            Some(own) => {
                own.insert(section.to_string(), Value::Bool(visible));
            }
            None => editing.set_section_visibility(&self.section_visibility),
        }
        let new_map = editing
            .fields
            .get(SECTION_VISIBILITY_KEY)
            .cloned()
            .unwrap_or_else(|| self.section_visibility.to_value());

        let original_map = self
            .original
            .as_ref()
            .and_then(|o| o.fields.get(SECTION_VISIBILITY_KEY))
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));
        self.changes
            .record(SECTION_VISIBILITY_KEY, Some(original_map), new_map);

        if self.options.track_section_changes {
            let old = self
                .original
                .as_ref()
                .and_then(ContentEntity::section_visibility)
                .and_then(|m| m.get(section))
                .map(Value::Bool);
            self.changes.record(
                &format!("{SECTION_VISIBILITY_KEY}.{section}"),
                old,
                Value::Bool(visible),
            );
        }

        self.has_changes = true;
        debug!(section, visible, "toggle_section_visibility: applied");
        Outcome::Applied
    }

    /// Refresh the editor's preview ("save to draft").
    ///
    /// Stamps `last_saved_at` and nothing else: the published collection, the
    /// change set and the dirty flag are untouched.
    pub fn save_draft(&mut self) -> Outcome {
        if self.editing.is_none() {
            return reject_no_draft("save_draft");
        }
        self.last_saved_at = Some(Utc::now());
        debug!(id = ?self.active_id, "save_draft: preview refreshed");
        Outcome::Applied
    }

    /// Publish the draft ("save & publish").
    ///
    /// Replaces the published entity with the draft's id, or appends it if
    /// the id is new. The draft stays open and becomes clean.
    pub fn commit(&mut self) -> Outcome {
        let Some(editing) = self.editing.as_ref() else {
            return reject_no_draft("commit");
        };
        if !self.has_changes {
            debug!(id = %editing.id, "commit: nothing to publish");
            return Outcome::Rejected(Rejection::NoChanges);
        }

        let published = editing.clone();
        match self.entities.iter_mut().find(|e| e.id == published.id) {
            Some(slot) => *slot = published.clone(),
            None => self.entities.push(published.clone()),
        }
        debug!(id = %published.id, changes = self.changes.len(), "commit: draft published");

        self.original = Some(published);
        self.changes.clear();
        self.has_changes = false;
        self.last_published_at = Some(Utc::now());
        Outcome::Applied
    }

    /// Throw away draft edits and restore the last published snapshot.
    pub fn discard(&mut self) -> Outcome {
        let Some(original) = self.original.clone() else {
            return reject_no_draft("discard");
        };
        self.section_visibility = resolve_visibility(self.type_config.as_ref(), &original);
        self.editing = Some(original);
        self.changes.clear();
        self.has_changes = false;
        debug!(id = ?self.active_id, "discard: draft reverted");
        Outcome::Applied
    }

    /// Close the draft entirely.
    pub fn clear_editing(&mut self) {
        self.editing = None;
        self.original = None;
        self.changes.clear();
        self.has_changes = false;
        self.active_id = None;
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Whether the active business type allows `section`. True when no type
    /// is active.
    #[must_use]
    pub fn is_section_available(&self, section: &str) -> bool {
        self.type_config
            .as_ref()
            .is_none_or(|config| !config.is_hidden(section))
    }

    #[must_use]
    pub fn phase(&self) -> DraftPhase {
        match (&self.editing, self.has_changes) {
            (None, _) => DraftPhase::NoDraft,
            (Some(_), false) => DraftPhase::Clean,
            (Some(_), true) => DraftPhase::Dirty,
        }
    }

    /// Net difference between draft and snapshot, recomputed on demand.
    ///
    /// Unlike [`Self::changes`], fields edited back to their original value
    /// do not appear.
    #[must_use]
    pub fn net_changes(&self) -> ChangeSet {
        match (&self.original, &self.editing) {
            (Some(original), Some(editing)) => diff(&original.fields, &editing.fields),
            _ => ChangeSet::new(),
        }
    }

    /// Page as the public sees it. Never reads the draft.
    #[must_use]
    pub fn published_page(&self, id: &EntityId) -> Option<PageView> {
        let entity = self.entity(id)?;
        Some(page_view(Some(&self.config_for(entity)), entity))
    }

    /// Page as the editor's preview pane sees it: the draft.
    #[must_use]
    pub fn preview_page(&self) -> Option<PageView> {
        let editing = self.editing.as_ref()?;
        Some(page_view(self.type_config.as_ref(), editing))
    }

    /// Effective visibility of `entity` under its template.
    #[must_use]
    pub fn resolved_visibility(&self, entity: &ContentEntity) -> SectionVisibilityMap {
        resolve_visibility(Some(&self.config_for(entity)), entity)
    }

    /// Sections `entity` renders under its template, in order.
    #[must_use]
    pub fn ordered_sections(&self, entity: &ContentEntity) -> Vec<String> {
        ordered_sections(Some(&self.config_for(entity)), entity)
    }

    /// Template for a published entity. Depends only on the entity and the
    /// store configuration, never on the open draft.
    fn config_for(&self, entity: &ContentEntity) -> BusinessTypeConfig {
        let business_type = entity
            .business_type()
            .unwrap_or(self.options.default_business_type);
        self.registry.resolve(business_type)
    }

    #[must_use]
    pub fn entities(&self) -> &[ContentEntity] {
        &self.entities
    }

    #[must_use]
    pub fn entity(&self, id: &EntityId) -> Option<&ContentEntity> {
        self.entities.iter().find(|e| &e.id == id)
    }

    #[must_use]
    pub const fn editing(&self) -> Option<&ContentEntity> {
        self.editing.as_ref()
    }

    #[must_use]
    pub const fn original(&self) -> Option<&ContentEntity> {
        self.original.as_ref()
    }

    #[must_use]
    pub const fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.has_changes
    }

    #[must_use]
    pub const fn active_id(&self) -> Option<&EntityId> {
        self.active_id.as_ref()
    }

    /// Type assumed for entities without a `type` tag.
    #[must_use]
    pub const fn default_business_type(&self) -> BusinessType {
        self.options.default_business_type
    }

    #[must_use]
    pub const fn active_type(&self) -> Option<BusinessType> {
        self.active_type
    }

    #[must_use]
    pub const fn type_config(&self) -> Option<&BusinessTypeConfig> {
        self.type_config.as_ref()
    }

    #[must_use]
    pub const fn section_visibility(&self) -> &SectionVisibilityMap {
        &self.section_visibility
    }

    #[must_use]
    pub const fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    #[must_use]
    pub const fn last_published_at(&self) -> Option<DateTime<Utc>> {
        self.last_published_at
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Write one path into the draft and record it. Caller has checked that a
    /// draft exists.
    fn write(&mut self, path: &FieldPath, value: Value) -> Outcome {
        let Some(editing) = self.editing.as_mut() else {
            return reject_no_draft("write");
        };
        if path.root() == ID_KEY {
            debug!(path = %path, "write: id is immutable");
            return Outcome::Rejected(Rejection::ImmutableField {
                field: path.to_string(),
            });
        }
        if let Err(error) = editing.set(path, value.clone()) {
            debug!(path = %path, %error, "write: rejected");
            return Outcome::Rejected(Rejection::PathConflict {
                path: path.to_string(),
            });
        }
        if path.root() == SECTION_VISIBILITY_KEY {
            self.section_visibility = resolve_visibility(self.type_config.as_ref(), editing);
        }

        let old = self.original.as_ref().and_then(|o| o.get(path)).cloned();
        self.changes.record(path.as_str(), old, value);
        self.has_changes = true;
        debug!(path = %path, "write: applied");
        Outcome::Applied
    }

    /// Rewrite the list at `path` through `edit` and store it as one field
    /// change. `edit` returns the missing item's key on failure.
    fn edit_list<F>(&mut self, path: &str, edit: F) -> Outcome
    where
        F: FnOnce(&mut Vec<Value>) -> Result<(), String>,
    {
        let Some(editing) = self.editing.as_ref() else {
            return reject_no_draft("edit_list");
        };
        let Ok(field_path) = FieldPath::parse(path) else {
            return Outcome::Rejected(Rejection::InvalidPath {
                path: path.to_string(),
            });
        };
        let mut items = match editing.get(&field_path) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(_) => {
                return Outcome::Rejected(Rejection::PathConflict {
                    path: path.to_string(),
                });
            }
        };
        if let Err(item) = edit(&mut items) {
            return Outcome::Rejected(Rejection::ItemNotFound {
                path: path.to_string(),
                item,
            });
        }
        self.write(&field_path, Value::Array(items))
    }
}

fn reject_no_draft(operation: &str) -> Outcome {
    debug!(operation, "no active draft; ignored");
    Outcome::Rejected(Rejection::NoActiveDraft)
}
