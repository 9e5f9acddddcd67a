//! # site-core
//!
//! Core types for the site builder's draft/publish content model.
//!
//! This crate provides the foundational types shared across all site crates:
//! - Content entities (business profiles, blog posts) over a JSON document
//! - Dotted field paths for reading and writing nested fields
//! - Change tracking (`ChangeSet`) and operation outcomes
//! - Business types, section visibility maps and per-type templates
//! - Cross-cutting error types

pub mod changes;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod outcome;
pub mod path;
pub mod sections;
pub mod templates;
