//! Blog catalog configuration.

use serde::{Deserialize, Serialize};

const fn default_words_per_minute() -> u32 {
    200
}

const fn default_highlight_limit() -> usize {
    5
}

fn default_author_avatar() -> String {
    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face"
        .to_string()
}

fn default_author_bio() -> String {
    "Content Creator".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlogConfig {
    /// Reading speed used for the "N min read" label.
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,

    /// Avatar used when a new post has none.
    #[serde(default = "default_author_avatar")]
    pub default_author_avatar: String,

    /// Bio used when a new post has none.
    #[serde(default = "default_author_bio")]
    pub default_author_bio: String,

    /// How many posts the recent/popular listings return.
    #[serde(default = "default_highlight_limit")]
    pub highlight_limit: usize,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            words_per_minute: default_words_per_minute(),
            default_author_avatar: default_author_avatar(),
            default_author_bio: default_author_bio(),
            highlight_limit: default_highlight_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = BlogConfig::default();
        assert_eq!(config.words_per_minute, 200);
        assert_eq!(config.highlight_limit, 5);
        assert_eq!(config.default_author_bio, "Content Creator");
        assert!(config.default_author_avatar.starts_with("https://"));
    }
}
