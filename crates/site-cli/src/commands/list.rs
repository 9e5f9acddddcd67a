use serde_json::{Value, json};
use site_core::entities::ContentEntity;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sitectl list`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows: Vec<Value> = ctx.store.entities().iter().map(summary).collect();
    output(&rows, flags.format)
}

fn summary(entity: &ContentEntity) -> Value {
    let name = ["name", "businessName", "title"]
        .iter()
        .find_map(|key| entity.fields.get(*key).and_then(Value::as_str));
    json!({
        "id": entity.id,
        "type": entity.type_tag(),
        "name": name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn summary_prefers_name_then_title() {
        let salon = ContentEntity::new(1)
            .with_field("type", json!("salon"))
            .with_field("title", json!("Glow"))
            .with_field("businessName", json!("Glow Studio"));
        assert_eq!(
            summary(&salon),
            json!({"id": 1, "type": "salon", "name": "Glow Studio"})
        );
        assert_eq!(
            summary(&ContentEntity::new("x")),
            json!({"id": "x", "type": null, "name": null})
        );
    }
}
