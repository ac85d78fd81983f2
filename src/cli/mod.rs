//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the `hangar` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;
use crate::models::Platform;
use crate::output::OutputFormat;
use crate::pagination::{ListOptions, DEFAULT_LIMIT};

/// PaperMC Hangar command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "hangar",
    about = "CLI tool for interacting with PaperMC Hangar API",
    version
)]
pub struct Cli {
    /// Config file (default is $HOME/.config/hangar/config.yaml).
    #[arg(long, global = true, env = "HANGAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Hangar API base URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Hangar API token.
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// HTTP client timeout (e.g. "30s", "1m").
    #[arg(long, global = true)]
    pub timeout: Option<String>,

    /// Output format.
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Flag values that take precedence over env and file settings.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            api_token: self.token.clone(),
            timeout: self.timeout.clone(),
            output: self.output,
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Commands for working with projects.
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Commands for working with versions.
    #[command(subcommand)]
    Version(VersionCommand),

    /// Commands for working with users.
    #[command(subcommand)]
    User(UserCommand),

    /// Commands for working with authors.
    #[command(subcommand)]
    Authors(AuthorsCommand),

    /// Commands for working with Hangar staff.
    #[command(subcommand)]
    Staff(StaffCommand),
}

/// Limit and offset flags shared by listing commands.
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageArgs {
    /// Maximum number of results.
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,

    /// Offset for pagination.
    #[arg(long, default_value_t = 0)]
    pub offset: u64,
}

impl From<PageArgs> for ListOptions {
    fn from(args: PageArgs) -> Self {
        ListOptions::new(args.limit, args.offset)
    }
}

/// Date range flags for statistics commands.
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// Start date (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// Get information about a specific project.
    Get {
        /// Project slug.
        slug: String,
    },

    /// List projects.
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Filter by category.
        #[arg(long)]
        category: Option<String>,
    },

    /// Get project team members.
    Members {
        slug: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Get users who starred the project.
    Stargazers {
        slug: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Get users watching the project.
    Watchers {
        slug: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Get project statistics.
    Stats {
        slug: String,
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Get project page content.
    Page {
        slug: String,
        /// Page path (defaults to the main page).
        path: Option<String>,
    },

    /// Get project README (main page).
    Readme { slug: String },
}

#[derive(Subcommand, Debug)]
pub enum VersionCommand {
    /// Get download URL for a specific version.
    DownloadUrl {
        slug: String,
        version: String,

        /// Platform to download for (PAPER, WATERFALL, VELOCITY).
        #[arg(long, default_value_t = Platform::Paper)]
        platform: Platform,
    },

    /// Get version by ID.
    GetById { id: i64 },

    /// Find version by file hash.
    FindByHash { hash: String },

    /// Get latest version of a project.
    Latest {
        slug: String,

        /// Release channel (Release, Snapshot, etc.).
        #[arg(long)]
        channel: Option<String>,

        /// Platform filter (PAPER, WATERFALL, VELOCITY).
        #[arg(long)]
        platform: Option<Platform>,

        /// Minecraft version filter (e.g., 1.20.1).
        #[arg(long)]
        minecraft_version: Option<String>,
    },

    /// Get version statistics.
    Stats {
        slug: String,
        version: String,
        #[command(flatten)]
        range: RangeArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Get information about a specific user.
    Get { username: String },

    /// List or search users.
    List {
        /// Search query.
        query: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Get projects starred by a user.
    Starred {
        username: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Get projects watched by a user.
    Watching {
        username: String,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Get projects pinned by a user.
    Pinned { username: String },
}

#[derive(Subcommand, Debug)]
pub enum AuthorsCommand {
    /// List authors.
    List {
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum StaffCommand {
    /// List Hangar staff members.
    List,
}
