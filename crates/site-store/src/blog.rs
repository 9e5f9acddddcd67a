//! Blog catalog: posts, categories and the filtered listing the blog page shows.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use site_config::BlogConfig;
use site_core::entities::{BlogAuthor, BlogPost, NewBlogPost, compile_content, read_time, word_count};
use site_core::enums::BlogSort;
use site_core::errors::CoreError;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogFilters {
    pub search_query: String,
    /// Empty means every category.
    pub category: String,
    pub sort_by: BlogSort,
}

impl BlogFilters {
    fn accepts(&self, post: &BlogPost, needle: &str) -> bool {
        let category_ok = self.category.is_empty() || post.category == self.category;
        category_ok && (needle.is_empty() || post.matches_lowercase(needle))
    }
}

#[derive(Debug, Clone, Default)]
pub struct BlogCatalog {
    posts: Vec<BlogPost>,
    categories: Vec<String>,
    filters: BlogFilters,
    filtered: Vec<i64>,
    selected: Option<i64>,
    config: BlogConfig,
}

impl BlogCatalog {
    #[must_use]
    pub fn new(config: BlogConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn set_posts(&mut self, posts: Vec<BlogPost>) {
        debug!(count = posts.len(), "blog catalog loaded");
        self.posts = posts;
        self.apply_filters();
    }

    pub fn set_categories(&mut self, categories: Vec<String>) {
        self.categories = categories;
    }

    #[must_use]
    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub const fn filters(&self) -> &BlogFilters {
        &self.filters
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&BlogPost> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Select a post for the detail view. Unknown ids clear the selection.
    pub fn select(&mut self, id: i64) -> Option<&BlogPost> {
        self.selected = self.get(id).map(|p| p.id);
        self.selected()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&BlogPost> {
        self.selected.and_then(|id| self.get(id))
    }

    // -----------------------------------------------------------------------
    // Filters
    // -----------------------------------------------------------------------

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filters.search_query = query.into();
        self.apply_filters();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.filters.category = category.into();
        self.apply_filters();
    }

    pub fn set_sort(&mut self, sort_by: BlogSort) {
        self.filters.sort_by = sort_by;
        self.apply_filters();
    }

    pub fn clear_filters(&mut self) {
        self.filters = BlogFilters::default();
        self.apply_filters();
    }

    /// Posts passing the current filters, in the current sort order.
    #[must_use]
    pub fn filtered(&self) -> Vec<&BlogPost> {
        self.filtered.iter().filter_map(|id| self.get(*id)).collect()
    }

    fn apply_filters(&mut self) {
        let needle = self.filters.search_query.trim().to_lowercase();
        let mut matching: Vec<&BlogPost> = self
            .posts
            .iter()
            .filter(|p| self.filters.accepts(p, &needle))
            .collect();
        sort_posts(&mut matching, self.filters.sort_by);
        self.filtered = matching.into_iter().map(|p| p.id).collect();
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Publish a new post at the front of the catalog.
    ///
    /// The id is one past the highest existing id. Content is compiled from
    /// the authored sections and the read time derived from its word count.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the title or author name is blank,
    /// or when no id is left above the highest existing one.
    pub fn create_post(&mut self, input: NewBlogPost) -> Result<BlogPost, CoreError> {
        if input.title.trim().is_empty() {
            return Err(CoreError::Validation("blog post title is required".into()));
        }
        if input.author_name.trim().is_empty() {
            return Err(CoreError::Validation("blog post author is required".into()));
        }

        let id = self
            .posts
            .iter()
            .map(|p| p.id)
            .max()
            .unwrap_or(0)
            .max(0)
            .checked_add(1)
            .ok_or_else(|| CoreError::Validation("blog post ids are exhausted".into()))?;
        let content = compile_content(&input.content_sections);
        let post = BlogPost {
            id,
            title: input.title,
            excerpt: input.excerpt,
            read_time: read_time(word_count(&content), self.config.words_per_minute),
            content,
            content_sections: input.content_sections,
            author: BlogAuthor {
                name: input.author_name,
                avatar: input
                    .author_avatar
                    .unwrap_or_else(|| self.config.default_author_avatar.clone()),
                bio: input
                    .author_bio
                    .unwrap_or_else(|| self.config.default_author_bio.clone()),
            },
            category: input.category,
            tags: input.tags,
            image: input.image,
            published_at: Utc::now(),
            views: 0,
            likes: 0,
            featured: false,
        };

        if !post.category.is_empty() && !self.categories.contains(&post.category) {
            self.categories.push(post.category.clone());
        }
        debug!(id, title = %post.title, "blog post created");
        self.posts.insert(0, post.clone());
        self.apply_filters();
        Ok(post)
    }

    /// Add a like. Returns the new count, or `None` for an unknown id.
    pub fn like(&mut self, id: i64) -> Option<u64> {
        let post = self.posts.iter_mut().find(|p| p.id == id)?;
        post.likes += 1;
        let likes = post.likes;
        if self.filters.sort_by == BlogSort::Liked {
            self.apply_filters();
        }
        Some(likes)
    }

    /// Count a view. Returns the new count, or `None` for an unknown id.
    pub fn increment_views(&mut self, id: i64) -> Option<u64> {
        let post = self.posts.iter_mut().find(|p| p.id == id)?;
        post.views += 1;
        let views = post.views;
        if self.filters.sort_by == BlogSort::Popular {
            self.apply_filters();
        }
        Some(views)
    }

    // -----------------------------------------------------------------------
    // Listings
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn featured(&self) -> Vec<&BlogPost> {
        self.posts.iter().filter(|p| p.featured).collect()
    }

    /// Newest posts, capped at the configured highlight limit.
    #[must_use]
    pub fn recent(&self) -> Vec<&BlogPost> {
        self.highlight(BlogSort::Newest)
    }

    /// Most viewed posts, capped at the configured highlight limit.
    #[must_use]
    pub fn popular(&self) -> Vec<&BlogPost> {
        self.highlight(BlogSort::Popular)
    }

    fn highlight(&self, sort_by: BlogSort) -> Vec<&BlogPost> {
        let mut posts: Vec<&BlogPost> = self.posts.iter().collect();
        sort_posts(&mut posts, sort_by);
        posts.truncate(self.config.highlight_limit);
        posts
    }

    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<&BlogPost> {
        self.posts.iter().filter(|p| p.category == category).collect()
    }

    #[must_use]
    pub fn by_author(&self, author: &str) -> Vec<&BlogPost> {
        self.posts.iter().filter(|p| p.author.name == author).collect()
    }
}

/// Stable sort, so ties keep catalog order.
fn sort_posts(posts: &mut [&BlogPost], sort_by: BlogSort) {
    match sort_by {
        BlogSort::Newest => posts.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
        BlogSort::Oldest => posts.sort_by(|a, b| a.published_at.cmp(&b.published_at)),
        BlogSort::Popular => posts.sort_by(|a, b| b.views.cmp(&a.views)),
        BlogSort::Liked => posts.sort_by(|a, b| b.likes.cmp(&a.likes)),
    }
}
