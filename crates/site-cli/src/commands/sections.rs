use serde_json::json;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sitectl sections <id>`: the published page as visitors see it.
pub fn handle(raw_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let id = ctx.require_entity_id(raw_id)?;
    let Some(entity) = ctx.store.entity(&id) else {
        anyhow::bail!("no entity with id '{raw_id}'");
    };
    let Some(page) = ctx.store.published_page(&id) else {
        anyhow::bail!("no published page for '{raw_id}'");
    };
    output(
        &json!({
            "id": id,
            "type": entity.business_type(),
            "sections": page.sections,
            "visibility": ctx.store.resolved_visibility(entity),
        }),
        flags.format,
    )
}
