use serde::Serialize;
use serde_json::Value;
use site_core::enums::BusinessType;
use site_core::outcome::Outcome;
use site_store::DraftStore;
use site_store::detect::detect_business_type;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EditArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StepReport {
    step: String,
    outcome: Outcome,
}

/// Handle `sitectl edit <id>`.
///
/// Edits are applied to a draft in order. Rejected steps are reported and do
/// not stop the run; only `--publish` writes anything back to disk.
pub fn handle(args: &EditArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let id = ctx.require_entity_id(&args.id)?;
    let opened = ctx.store.start_editing(&id);
    if let Some(reason) = opened.rejection() {
        anyhow::bail!("cannot edit '{}': {reason}", args.id);
    }

    if let Some(route) = &args.route {
        let business_type = route_business_type(&ctx.store, route);
        ctx.store.set_business_type(business_type);
    }

    let mut steps = Vec::new();
    for assignment in &args.sets {
        let (path, value) = parse_assignment(assignment)?;
        let outcome = ctx.store.update_nested_field(path, value);
        steps.push(StepReport {
            step: format!("set {path}"),
            outcome,
        });
    }
    for section in &args.toggles {
        let outcome = ctx.store.toggle_section_visibility(section);
        steps.push(StepReport {
            step: format!("toggle {section}"),
            outcome,
        });
    }

    let recorded_changes = ctx.store.changes().clone();
    let net_changes = ctx.store.net_changes();
    let preview = ctx.store.preview_page().map(|page| page.sections);

    let published = if args.publish {
        let outcome = ctx.store.commit();
        if outcome.is_applied() {
            ctx.persist()?;
        }
        steps.push(StepReport {
            step: "publish".into(),
            outcome: outcome.clone(),
        });
        outcome.is_applied()
    } else {
        false
    };

    for step in steps.iter().filter(|s| !s.outcome.is_applied()) {
        tracing::warn!(step = %step.step, outcome = %step.outcome, "edit step skipped");
    }

    output(
        &serde_json::json!({
            "id": id,
            "type": ctx.store.active_type(),
            "steps": steps,
            "recorded_changes": recorded_changes,
            "net_changes": net_changes,
            "preview_sections": preview,
            "published": published,
        }),
        flags.format,
    )
}

/// Template for the open draft reached through `route`, falling back to the
/// configured default type.
fn route_business_type(store: &DraftStore, route: &str) -> BusinessType {
    detect_business_type(route, store.editing(), store.default_business_type())
}

/// Split `path=value`. The value is parsed as JSON, falling back to a plain
/// string so `--set name=Glow` works without quoting.
fn parse_assignment(raw: &str) -> anyhow::Result<(&str, Value)> {
    let Some((path, value)) = raw.split_once('=') else {
        anyhow::bail!("expected PATH=VALUE, got '{raw}'");
    };
    let path = path.trim();
    if path.is_empty() {
        anyhow::bail!("missing field path in '{raw}'");
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((path, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use site_core::entities::ContentEntity;
    use site_core::ids::EntityId;

    #[test]
    fn assignment_values_parse_as_json_or_string() {
        assert_eq!(parse_assignment("rating=4").unwrap(), ("rating", json!(4)));
        assert_eq!(
            parse_assignment("hero.title=\"Hi\"").unwrap(),
            ("hero.title", json!("Hi"))
        );
        assert_eq!(parse_assignment("name=Glow").unwrap(), ("name", json!("Glow")));
        assert_eq!(
            parse_assignment("note=a=b").unwrap(),
            ("note", json!("a=b"))
        );
    }

    #[test]
    fn route_falls_back_to_configured_default() {
        let mut config = site_config::SiteConfig::default();
        config.store.default_business_type = "wedding".into();
        let mut store = DraftStore::from_config(&config)
            .unwrap()
            .with_entities(vec![ContentEntity::new(4).with_field("name", json!("Bloom"))]);
        let _ = store.start_editing(&EntityId::from(4));

        assert_eq!(route_business_type(&store, "grand-plaza"), BusinessType::Wedding);
        assert_eq!(route_business_type(&store, "personal"), BusinessType::Freelancer);
    }

    #[test]
    fn malformed_assignment_is_an_error() {
        assert!(parse_assignment("no-equals").is_err());
        assert!(parse_assignment("=5").is_err());
    }
}
