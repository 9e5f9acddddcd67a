use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BlogAuthor {
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
}

/// One heading/description block of a post body as authored in the editor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ContentSection {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub description: String,
}

/// A published blog post.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub content_sections: Vec<ContentSection>,
    pub author: BlogAuthor,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: String,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub read_time: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub featured: bool,
}

impl BlogPost {
    /// Case-insensitive match against title, excerpt, content, author name
    /// and tags. `needle` must already be lowercase.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.excerpt.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self.author.name.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

/// Form input for creating a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPost {
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content_sections: Vec<ContentSection>,
    pub author_name: String,
    #[serde(default)]
    pub author_avatar: Option<String>,
    #[serde(default)]
    pub author_bio: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: String,
}

/// Render authored sections into the markdown-ish body stored on the post.
///
/// Blank sections are skipped; a heading becomes `## heading` and each part
/// is followed by a blank line.
#[must_use]
pub fn compile_content(sections: &[ContentSection]) -> String {
    let mut content = String::new();
    for section in sections {
        let heading = section.heading.trim();
        let description = section.description.trim();
        if !heading.is_empty() {
            content.push_str("## ");
            content.push_str(heading);
            content.push_str("\n\n");
        }
        if !description.is_empty() {
            content.push_str(description);
            content.push_str("\n\n");
        }
    }
    content
}

/// Space-separated word count, as the editor's counter reports it.
#[must_use]
pub fn word_count(content: &str) -> usize {
    content.split(' ').filter(|w| !w.is_empty()).count()
}

/// `"N min read"` rounded up.
#[must_use]
pub fn read_time(words: usize, words_per_minute: u32) -> String {
    let wpm = words_per_minute.max(1) as usize;
    format!("{} min read", words.div_ceil(wpm))
}
