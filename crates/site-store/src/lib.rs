//! # site-store
//!
//! In-memory content state for the site builder.
//!
//! - [`DraftStore`] holds the published collection plus at most one draft,
//!   tracks field changes and commits or discards them.
//! - [`BlogCatalog`] holds blog posts with search, category and sort filters.
//! - [`fixtures`] reads and writes the JSON files the admin dashboard is
//!   seeded from.
//!
//! Nothing here performs network I/O. Every operation is a synchronous
//! mutation of owned state; callers hold the store by value or `&mut`.

pub mod blog;
pub mod detect;
pub mod draft;
pub mod error;
pub mod fixtures;
pub mod options;

pub use blog::{BlogCatalog, BlogFilters};
pub use draft::DraftStore;
pub use error::StoreError;
pub use options::StoreOptions;
