use std::path::PathBuf;

use clap::{Args, Subcommand};
use site_core::enums::BlogSort;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// List published entities.
    List(DataArgs),
    /// Show the sections a published page renders.
    Sections(SectionsArgs),
    /// Open a draft, apply edits and optionally publish.
    Edit(EditArgs),
    /// List blog posts with filters.
    Blogs(BlogsArgs),
}

#[derive(Clone, Debug, Args)]
pub struct DataArgs {
    /// Entity fixture file.
    #[arg(long, default_value = "site-data.json")]
    pub data: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct SectionsArgs {
    /// Entity id.
    pub id: String,
    #[command(flatten)]
    pub data: DataArgs,
}

#[derive(Clone, Debug, Args)]
pub struct EditArgs {
    /// Entity id.
    pub id: String,
    /// Field assignment `path=<json>`; non-JSON values are taken as strings.
    #[arg(long = "set", value_name = "PATH=VALUE")]
    pub sets: Vec<String>,
    /// Section whose visibility to flip.
    #[arg(long = "toggle", value_name = "SECTION")]
    pub toggles: Vec<String>,
    /// Template route the page is opened through (`freelancer`, `salon`, ...).
    #[arg(long)]
    pub route: Option<String>,
    /// Publish the draft and write the collection back to the data file.
    #[arg(long)]
    pub publish: bool,
    #[command(flatten)]
    pub data: DataArgs,
}

#[derive(Clone, Debug, Args)]
pub struct BlogsArgs {
    /// Blog fixture file.
    #[arg(long, default_value = "blogs.json")]
    pub file: PathBuf,
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    /// newest, oldest, popular or liked.
    #[arg(long, default_value = "newest")]
    pub sort: BlogSort,
}
