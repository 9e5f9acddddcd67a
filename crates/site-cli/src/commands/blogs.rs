use anyhow::Context;
use serde_json::json;
use site_config::SiteConfig;
use site_store::BlogCatalog;
use site_store::fixtures::load_blogs;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::BlogsArgs;
use crate::output::output;

/// Handle `sitectl blogs`.
pub fn handle(args: &BlogsArgs, config: &SiteConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let fixture = load_blogs(&args.file)
        .with_context(|| format!("failed to load blogs from {}", args.file.display()))?;

    let mut catalog = BlogCatalog::new(config.blog.clone());
    catalog.set_posts(fixture.blogs);
    catalog.set_categories(fixture.categories);
    if let Some(search) = &args.search {
        catalog.set_search_query(search.as_str());
    }
    if let Some(category) = &args.category {
        catalog.set_category(category.as_str());
    }
    catalog.set_sort(args.sort);

    output(
        &json!({
            "filters": catalog.filters(),
            "categories": catalog.categories(),
            "posts": catalog.filtered(),
        }),
        flags.format,
    )
}
