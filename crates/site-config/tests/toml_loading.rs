//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use site_config::SiteConfig;
use site_core::enums::BusinessType;

fn layered(file: &str) -> Figment {
    Figment::from(Serialized::defaults(SiteConfig::default()))
        .merge(Toml::file(file))
        .merge(Env::prefixed("SITE_").split("__"))
}

#[test]
fn loads_store_and_blog_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[store]
track_section_changes = true
default_business_type = "freelancer"

[blog]
words_per_minute = 250
highlight_limit = 3
"#,
        )?;

        let config: SiteConfig = layered("config.toml").extract()?;

        assert!(config.store.track_section_changes);
        assert_eq!(config.default_business_type().unwrap(), BusinessType::Freelancer);
        assert_eq!(config.blog.words_per_minute, 250);
        assert_eq!(config.blog.highlight_limit, 3);
        assert_eq!(config.blog.default_author_bio, "Content Creator");
        Ok(())
    });
}

#[test]
fn loads_template_overrides_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[templates.hotel]
hidden_sections = ["amenities"]

[templates.freelancer]
default_order = ["hero", "portfolio", "contact"]

[templates.freelancer.visibility]
faq = false
"#,
        )?;

        let config: SiteConfig = layered("config.toml").extract()?;
        let overrides = config.template_overrides().unwrap();
        assert_eq!(overrides.len(), 2);

        let hotel = &config.templates["hotel"];
        assert_eq!(hotel.hidden_sections.as_deref(), Some(&["amenities".to_string()][..]));

        let freelancer = &config.templates["freelancer"];
        assert_eq!(freelancer.default_order.as_ref().map(Vec::len), Some(3));
        assert_eq!(freelancer.visibility.get("faq"), Some(&false));
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[blog]
words_per_minute = 250
"#,
        )?;
        jail.set_env("SITE_BLOG__WORDS_PER_MINUTE", "180");
        jail.set_env("SITE_STORE__TRACK_SECTION_CHANGES", "true");

        let config: SiteConfig = layered("config.toml").extract()?;
        assert_eq!(config.blog.words_per_minute, 180);
        assert!(config.store.track_section_changes);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".site")?;
        jail.create_file(
            ".site/config.toml",
            r#"
[store]
default_business_type = "hotel"
"#,
        )?;

        let config = SiteConfig::load().expect("config loads");
        assert_eq!(config.default_business_type().unwrap(), BusinessType::Hotel);
        Ok(())
    });
}

#[test]
fn missing_files_fall_back_to_defaults() {
    Jail::expect_with(|_jail| {
        let config: SiteConfig = layered("does-not-exist.toml").extract()?;
        assert!(!config.store.track_section_changes);
        assert_eq!(config.blog.words_per_minute, 200);
        Ok(())
    });
}
