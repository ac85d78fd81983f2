//! Hangar API client library.
//!
//! A Rust library for the PaperMC Hangar plugin repository REST API, using a
//! trait-based architecture where fetching one entity ([`Get`]) and listing
//! entities ([`List`]) are traits that entity types implement. Endpoints that
//! don't map onto an entity are free functions.
//!
//! # Quick Start
//!
//! ```no_run
//! use hangarapi::{HangarClient, ListOptions, Platform, Project, Get, List};
//!
//! #[tokio::main]
//! async fn main() -> hangarapi::Result<()> {
//!     let client = HangarClient::new(Default::default())?;
//!
//!     // Get a project by slug
//!     let project = Project::get(&client, "fancyglow".to_string()).await?;
//!     println!("Project: {} by {}", project.name, project.owner());
//!
//!     // One page of projects
//!     let page = Project::list_page(&client, &Default::default(), ListOptions::default()).await?;
//!     println!("{} projects in total", page.pagination.count);
//!
//!     // Resolve a download URL
//!     let url = hangarapi::get_download_url(
//!         &client,
//!         project.owner(),
//!         project.slug(),
//!         "2.0.1",
//!         Some(Platform::Paper),
//!     )
//!     .await?;
//!     println!("{url}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! [`ClientConfig`] defaults to `https://hangar.papermc.io/api/v1`, no token
//! and a 30 second timeout. The `hangar` binary layers a YAML file,
//! `HANGAR_*` environment variables and flags on top (see [`config`]).

mod client;
mod error;
mod models;
mod pagination;
mod traits;

pub mod cli;
pub mod config;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{ClientConfig, HangarClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{HangarError, Result};
pub use pagination::{ListOptions, Page, Pagination, DEFAULT_LIMIT};

// Re-export traits
pub use traits::{Get, List, LIST_ALL_PAGE_SIZE};

// Re-export output
pub use output::{OutputFormat, PrettyPrint};

// Re-export models
pub use models::{
    // Project types
    Donation,
    EngagementStats,
    License,
    Link,
    LinkSection,
    Namespace,
    Project,
    ProjectListQuery,
    ProjectSettings,
    // Version types
    Channel,
    DownloadInfo,
    FileInfo,
    LatestVersionQuery,
    Platform,
    PluginDependency,
    Version,
    VersionDownloads,
    VersionListQuery,
    DOWNLOAD_LOOKUP_LIMIT,
    RELEASE_CHANNEL,
    // User types
    role_labels,
    Author,
    ProjectMember,
    Role,
    StaffMember,
    User,
    UserListQuery,
    // Page and stats types
    DailyStats,
    ProjectPage,
    ProjectStats,
    StatsRange,
    VersionStats,
    HOME_PAGE,
};

// Re-export convenience functions
pub use models::{get_project_members, get_project_stargazers, get_project_watchers};
pub use models::{
    find_version, find_version_by_hash, get_download_url, get_latest_release_version,
    get_latest_version, get_latest_version_name, get_project_version,
};
pub use models::{get_user_pinned, get_user_starred, get_user_watching, list_staff};
pub use models::{get_project_main_page, get_project_page};
pub use models::{get_project_stats, get_version_stats, totals};
