//! End-to-end draft lifecycle scenarios against `DraftStore`.

use pretty_assertions::assert_eq;
use serde_json::json;
use site_config::SiteConfig;
use site_core::entities::{ContentEntity, SECTION_VISIBILITY_KEY, TYPE_KEY};
use site_core::enums::{BusinessType, DraftPhase};
use site_core::ids::EntityId;
use site_core::outcome::{Outcome, Rejection};
use site_core::templates::TemplateOverride;
use site_store::DraftStore;

fn hero_entity() -> ContentEntity {
    ContentEntity::from_value(json!({
        "id": 1,
        "hero": {"title": "A"},
        "sectionVisibility": {"hero": true}
    }))
    .unwrap()
}

fn freelancer_entity() -> ContentEntity {
    ContentEntity::new("p1")
        .with_field(TYPE_KEY, json!("freelancer"))
        .with_field("name", json!("Ida"))
}

#[test]
fn edit_discard_edit_commit() {
    let mut store = DraftStore::default().with_entities(vec![hero_entity()]);
    let id = EntityId::from(1);

    assert!(store.start_editing(&id).is_applied());
    assert!(store.update_nested_field("hero.title", json!("B")).is_applied());

    let change = store.changes().get("hero.title").unwrap();
    assert_eq!(change.old, Some(json!("A")));
    assert_eq!(change.new, json!("B"));
    assert_eq!(store.phase(), DraftPhase::Dirty);
    assert_eq!(store.entity(&id).unwrap().fields["hero"]["title"], json!("A"));

    assert!(store.discard().is_applied());
    assert_eq!(store.editing(), Some(&hero_entity()));
    assert!(store.changes().is_empty());
    assert_eq!(store.phase(), DraftPhase::Clean);

    assert!(store.update_nested_field("hero.title", json!("B")).is_applied());
    assert!(store.commit().is_applied());

    assert_eq!(store.entity(&id).unwrap().fields["hero"]["title"], json!("B"));
    assert_eq!(store.original(), store.editing());
    assert!(!store.has_changes());
    assert!(store.changes().is_empty());
    assert!(store.last_published_at().is_some());
}

#[test]
fn start_then_discard_restores_entity() {
    let mut store = DraftStore::default().with_entities(vec![hero_entity()]);
    assert!(store.start_editing(&EntityId::from(1)).is_applied());
    assert!(store.discard().is_applied());

    assert_eq!(store.editing(), Some(&hero_entity()));
    assert!(!store.has_changes());
    assert!(store.changes().is_empty());
}

#[test]
fn commit_twice_is_idempotent() {
    let mut store = DraftStore::default().with_entities(vec![hero_entity()]);
    let _ = store.start_editing(&EntityId::from(1));
    let _ = store.update_field("tagline", json!("Fresh cuts"));
    assert!(store.commit().is_applied());
    let after_first = store.entities().to_vec();

    assert_eq!(store.commit(), Outcome::Rejected(Rejection::NoChanges));
    assert_eq!(store.entities(), after_first.as_slice());
}

#[test]
fn commit_appends_unknown_id() {
    let mut store = DraftStore::default().with_entities(vec![hero_entity()]);
    let _ = store.start_editing(&EntityId::from(1));
    let _ = store.update_field("name", json!("Glow"));

    // Collection reloaded underneath the open draft.
    store.initialize_data(freelancer_entity());
    assert!(store.commit().is_applied());

    let ids: Vec<String> = store.entities().iter().map(|e| e.id.to_string()).collect();
    assert_eq!(ids, vec!["p1", "1"]);
    assert_eq!(store.entity(&EntityId::from(1)).unwrap().fields["name"], json!("Glow"));
}

#[test]
fn locked_section_toggle_is_refused() {
    let mut store = DraftStore::default().with_entities(vec![freelancer_entity()]);
    let _ = store.start_editing(&EntityId::from("p1"));
    let before = store.section_visibility().clone();

    let outcome = store.toggle_section_visibility("team");
    assert_eq!(
        outcome,
        Outcome::Rejected(Rejection::LockedSection {
            section: "team".into(),
            business_type: BusinessType::Freelancer,
        })
    );
    assert!(!store.has_changes());
    assert_eq!(store.section_visibility(), &before);
    assert_eq!(store.editing(), Some(&freelancer_entity()));
}

#[test]
fn toggle_records_whole_map() {
    let mut store = DraftStore::default().with_entities(vec![freelancer_entity()]);
    let _ = store.start_editing(&EntityId::from("p1"));

    assert!(store.toggle_section_visibility("skills").is_applied());
    assert!(!store.section_visibility().is_visible("skills"));

    let change = store.changes().get(SECTION_VISIBILITY_KEY).unwrap();
    assert_eq!(change.old, Some(json!({})));
    assert_eq!(change.new["skills"], json!(false));
    assert_eq!(change.new["portfolio"], json!(true));
    assert_eq!(store.changes().len(), 1);

    let draft_map = store.editing().unwrap().section_visibility().unwrap();
    assert_eq!(draft_map.get("skills"), Some(false));

    // Toggling back still leaves one aggregate entry.
    assert!(store.toggle_section_visibility("skills").is_applied());
    assert_eq!(store.changes().len(), 1);
    assert!(store.section_visibility().is_visible("skills"));
}

#[test]
fn operations_without_draft_are_noops() {
    let mut store = DraftStore::default().with_entities(vec![hero_entity()]);
    let snapshot = store.entities().to_vec();

    for outcome in [
        store.update_field("name", json!("x")),
        store.update_nested_field("hero.title", json!("x")),
        store.push_item("gallery", json!("a.jpg")),
        store.toggle_section_visibility("hero"),
        store.save_draft(),
        store.commit(),
        store.discard(),
    ] {
        assert_eq!(outcome, Outcome::Rejected(Rejection::NoActiveDraft));
    }
    assert_eq!(store.entities(), snapshot.as_slice());
    assert!(store.changes().is_empty());
    assert!(store.last_saved_at().is_none());
}

#[test]
fn published_page_ignores_draft() {
    let mut store = DraftStore::default().with_entities(vec![hero_entity()]);
    let id = EntityId::from(1);
    let _ = store.start_editing(&id);
    let _ = store.update_nested_field("hero.title", json!("Draft"));
    let _ = store.save_draft();

    let public = store.published_page(&id).unwrap();
    let preview = store.preview_page().unwrap();
    assert_eq!(public.entity.fields["hero"]["title"], json!("A"));
    assert_eq!(preview.entity.fields["hero"]["title"], json!("Draft"));
    assert!(public.sections.contains(&"hero".to_string()));
}

#[test]
fn net_changes_drop_reverted_edits() {
    let mut store = DraftStore::default().with_entities(vec![hero_entity()]);
    let _ = store.start_editing(&EntityId::from(1));
    let _ = store.update_nested_field("hero.title", json!("B"));
    let _ = store.update_nested_field("hero.title", json!("A"));
    let _ = store.update_field("phone", json!("555"));

    assert!(store.changes().contains("hero.title"));
    let net = store.net_changes();
    assert!(!net.contains("hero.title"));
    assert_eq!(net.get("phone").unwrap().new, json!("555"));
}

#[test]
fn restarting_edit_drops_pending_changes() {
    let mut store = DraftStore::default().with_entities(vec![hero_entity(), freelancer_entity()]);
    let _ = store.start_editing(&EntityId::from(1));
    let _ = store.update_field("name", json!("x"));

    assert!(store.start_editing(&EntityId::from("p1")).is_applied());
    assert!(store.changes().is_empty());
    assert_eq!(store.active_type(), Some(BusinessType::Freelancer));
    assert_eq!(store.entity(&EntityId::from(1)), Some(&hero_entity()));
}

#[test]
fn config_overrides_reach_the_store() {
    let mut config = SiteConfig::default();
    config.templates.insert(
        "freelancer".into(),
        TemplateOverride {
            hidden_sections: Some(vec!["faq".into()]),
            ..TemplateOverride::default()
        },
    );
    config.store.track_section_changes = true;

    let mut store = DraftStore::from_config(&config)
        .unwrap()
        .with_entities(vec![freelancer_entity()]);
    let _ = store.start_editing(&EntityId::from("p1"));

    assert!(!store.is_section_available("faq"));
    assert!(store.is_section_available("team"));
    assert!(store.toggle_section_visibility("team").is_applied());
    assert!(store.changes().contains("sectionVisibility.team"));
}

#[test]
fn published_page_independent_of_editor_session() {
    let plain = ContentEntity::new(1).with_field(SECTION_VISIBILITY_KEY, json!({"hero": true, "team": true}));
    let mut store = DraftStore::default().with_entities(vec![plain, freelancer_entity()]);
    let id = EntityId::from(1);
    let before = store.published_page(&id).unwrap();
    assert!(before.sections.contains(&"team".to_string()));

    let _ = store.start_editing(&EntityId::from("p1"));
    assert_eq!(store.published_page(&id).unwrap(), before);
    store.clear_editing();
    assert_eq!(store.published_page(&id).unwrap(), before);
    assert_eq!(
        store.resolved_visibility(store.entity(&id).unwrap()).get("team"),
        Some(true)
    );
}

#[test]
fn untyped_entity_after_freelancer_uses_default_template() {
    let plain = ContentEntity::new(2).with_field("name", json!("Glow Salon"));
    let mut store = DraftStore::default().with_entities(vec![freelancer_entity(), plain]);

    let _ = store.start_editing(&EntityId::from("p1"));
    assert!(!store.is_section_available("team"));

    assert!(store.start_editing(&EntityId::from(2)).is_applied());
    assert_eq!(store.active_type(), Some(BusinessType::Business));
    assert!(store.toggle_section_visibility("team").is_applied());
    assert!(!store.section_visibility().is_visible("team"));
}
