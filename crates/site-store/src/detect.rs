//! Business-type detection for template slugs.

use site_core::entities::ContentEntity;
use site_core::enums::BusinessType;

/// Pick the business type for a site reached through `slug`.
///
/// `freelancer`/`personal` slugs always render the freelancer template and
/// `salon`/`business` the business profile. Any other slug defers to the
/// entity's own `type` tag, then to `fallback`.
#[must_use]
pub fn detect_business_type(
    slug: &str,
    entity: Option<&ContentEntity>,
    fallback: BusinessType,
) -> BusinessType {
    match slug {
        "freelancer" | "personal" => BusinessType::Freelancer,
        "salon" | "business" => BusinessType::Business,
        _ => entity
            .and_then(ContentEntity::business_type)
            .unwrap_or(fallback),
    }
}
