//! Entity structs for site content.
//!
//! `ContentEntity` is the untyped document every draft operates on. Typed
//! records such as `BlogPost` convert to and from it through serde so they
//! can be edited with the same draft machinery.

mod blog;
mod content;

pub use blog::{BlogAuthor, BlogPost, ContentSection, NewBlogPost, compile_content, read_time, word_count};
pub use content::{
    CUSTOM_SECTION_VISIBILITY_KEY, CUSTOM_SECTIONS_KEY, ContentEntity, ID_KEY, SECTION_ORDER_KEY,
    SECTION_VISIBILITY_KEY, TYPE_KEY,
};
