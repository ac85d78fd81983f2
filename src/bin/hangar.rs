//! Hangar API CLI binary.
//!
//! A command-line interface for the PaperMC Hangar plugin repository.

use std::collections::BTreeMap;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use hangarapi::cli::{
    AuthorsCommand, Cli, Command, ProjectCommand, StaffCommand, UserCommand, VersionCommand,
};
use hangarapi::config::Settings;
use hangarapi::output::{
    render_json, render_page, render_stats, render_table, MemberRow, ProjectRow, UserRow,
};
use hangarapi::{
    find_version_by_hash, get_download_url, get_latest_version, get_project_main_page,
    get_project_members, get_project_page, get_project_stargazers, get_project_stats,
    get_project_watchers, get_user_pinned, get_user_starred, get_user_watching, get_version_stats,
    list_staff, Author, DailyStats, Get, HangarClient, LatestVersionQuery, List, OutputFormat,
    Page, PrettyPrint, Project, ProjectListQuery, StatsRange, User, UserListQuery, Version,
};
use serde::Serialize;
use tabled::Tabled;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match Settings::load(cli.config.as_deref(), &cli.overrides()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match settings.client_config().and_then(HangarClient::new) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let printer = Printer {
        format: settings.output,
    };

    // Dropping the command future on shutdown aborts the in-flight request.
    tokio::select! {
        result = run(&client, cli.command, &printer) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e:#}");
                ExitCode::FAILURE
            }
        },
        () = shutdown_signal() => {
            eprintln!("Error: interrupted");
            ExitCode::FAILURE
        }
    }
}

/// Resolves on Ctrl-C, or on SIGTERM where the platform has it.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for SIGTERM");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Logs go to stderr. `-v` forces debug; otherwise `HANGAR_LOG`, then
/// `RUST_LOG`, then `warn`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("HANGAR_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(client: &HangarClient, command: Command, out: &Printer) -> anyhow::Result<()> {
    match command {
        Command::Project(cmd) => handle_project(client, cmd, out).await,
        Command::Version(cmd) => handle_version(client, cmd, out).await,
        Command::User(cmd) => handle_user(client, cmd, out).await,
        Command::Authors(AuthorsCommand::List { page }) => {
            let authors = Author::list_page(client, &(), page.into())
                .await
                .context("failed to list authors")?;
            out.page(&authors, "authors", |u| UserRow::from(u))
        }
        Command::Staff(StaffCommand::List) => {
            let staff = list_staff(client).await.context("failed to list staff")?;
            match out.format {
                OutputFormat::Json => out.json(&staff),
                OutputFormat::Table => {
                    let rows: Vec<UserRow> = staff.iter().map(UserRow::from).collect();
                    println!("{}", render_table(rows));
                    println!("\nTotal: {} staff members", staff.len());
                    Ok(())
                }
            }
        }
    }
}

async fn handle_project(
    client: &HangarClient,
    cmd: ProjectCommand,
    out: &Printer,
) -> anyhow::Result<()> {
    match cmd {
        ProjectCommand::Get { slug } => {
            let project = Project::get(client, slug)
                .await
                .context("failed to get project")?;
            out.single(&project)
        }
        ProjectCommand::List { page, category } => {
            let query = ProjectListQuery { category };
            let projects = Project::list_page(client, &query, page.into())
                .await
                .context("failed to list projects")?;
            out.page(&projects, "projects", |p| ProjectRow::from(p))
        }
        ProjectCommand::Members { slug, page } => {
            let members = get_project_members(client, &slug, page.into())
                .await
                .context("failed to get project members")?;
            out.page(&members, "members", |m| MemberRow::from(m))
        }
        ProjectCommand::Stargazers { slug, page } => {
            let users = get_project_stargazers(client, &slug, page.into())
                .await
                .context("failed to get project stargazers")?;
            out.page(&users, "stargazers", |u| UserRow::from(u))
        }
        ProjectCommand::Watchers { slug, page } => {
            let users = get_project_watchers(client, &slug, page.into())
                .await
                .context("failed to get project watchers")?;
            out.page(&users, "watchers", |u| UserRow::from(u))
        }
        ProjectCommand::Stats { slug, range } => {
            let stats = get_project_stats(client, &slug, &StatsRange::new(range.from, range.to))
                .await
                .context("failed to get project stats")?;
            out.stats(&stats)
        }
        ProjectCommand::Page { slug, path } => {
            let page = get_project_page(client, &slug, path.as_deref().unwrap_or_default())
                .await
                .context("failed to get project page")?;
            out.single(&page)
        }
        ProjectCommand::Readme { slug } => {
            let page = get_project_main_page(client, &slug)
                .await
                .context("failed to get project README")?;
            out.single(&page)
        }
    }
}

async fn handle_version(
    client: &HangarClient,
    cmd: VersionCommand,
    out: &Printer,
) -> anyhow::Result<()> {
    match cmd {
        VersionCommand::DownloadUrl {
            slug,
            version,
            platform,
        } => {
            // The versions endpoint is owner-scoped
            let project = Project::get(client, slug.clone())
                .await
                .context("failed to get project")?;
            let url = get_download_url(client, project.owner(), &slug, &version, Some(platform))
                .await
                .context("failed to get download URL")?;

            match out.format {
                OutputFormat::Json => out.json(&serde_json::json!({
                    "owner": project.owner(),
                    "slug": slug,
                    "version": version,
                    "platform": platform.as_str(),
                    "downloadUrl": url,
                })),
                OutputFormat::Table => {
                    println!("{url}");
                    Ok(())
                }
            }
        }
        VersionCommand::GetById { id } => {
            let version = Version::get(client, id)
                .await
                .context("failed to get version")?;
            out.single(&version)
        }
        VersionCommand::FindByHash { hash } => {
            let version = find_version_by_hash(client, &hash)
                .await
                .context("failed to find version by hash")?;
            out.single(&version)
        }
        VersionCommand::Latest {
            slug,
            channel,
            platform,
            minecraft_version,
        } => {
            let query = LatestVersionQuery {
                channel,
                platform,
                platform_version: minecraft_version,
            };
            let version = get_latest_version(client, &slug, &query)
                .await
                .context("failed to get latest version")?;
            out.single(&version)
        }
        VersionCommand::Stats {
            slug,
            version,
            range,
        } => {
            let stats = get_version_stats(
                client,
                &slug,
                &version,
                &StatsRange::new(range.from, range.to),
            )
            .await
            .context("failed to get version stats")?;
            out.stats(&stats)
        }
    }
}

async fn handle_user(client: &HangarClient, cmd: UserCommand, out: &Printer) -> anyhow::Result<()> {
    match cmd {
        UserCommand::Get { username } => {
            let user = User::get(client, username)
                .await
                .context("failed to get user")?;
            out.single(&user)
        }
        UserCommand::List { query, page } => {
            let users = User::list_page(client, &UserListQuery { query }, page.into())
                .await
                .context("failed to list users")?;
            out.page(&users, "users", |u| UserRow::from(u))
        }
        UserCommand::Starred { username, page } => {
            let projects = get_user_starred(client, &username, page.into())
                .await
                .context("failed to get starred projects")?;
            out.page(&projects, "starred projects", |p| ProjectRow::from(p))
        }
        UserCommand::Watching { username, page } => {
            let projects = get_user_watching(client, &username, page.into())
                .await
                .context("failed to get watched projects")?;
            out.page(&projects, "watched projects", |p| ProjectRow::from(p))
        }
        UserCommand::Pinned { username } => {
            let projects = get_user_pinned(client, &username)
                .await
                .context("failed to get pinned projects")?;
            out.page(&projects, "pinned projects", |p| ProjectRow::from(p))
        }
    }
}

/// Writes command results to stdout in the selected format.
struct Printer {
    format: OutputFormat,
}

impl Printer {
    fn json<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", render_json(value).context("failed to encode JSON")?);
        Ok(())
    }

    fn single<T: Serialize + PrettyPrint>(&self, item: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => self.json(item),
            OutputFormat::Table => {
                println!("{}", item.pretty_print());
                Ok(())
            }
        }
    }

    /// JSON mode emits the whole envelope, pagination included.
    fn page<T, R, F>(&self, page: &Page<T>, noun: &str, to_row: F) -> anyhow::Result<()>
    where
        T: Serialize,
        R: Tabled,
        F: Fn(&T) -> R,
    {
        match self.format {
            OutputFormat::Json => self.json(page),
            OutputFormat::Table => {
                println!("{}", render_page(page, noun, to_row));
                Ok(())
            }
        }
    }

    fn stats(&self, stats: &BTreeMap<String, DailyStats>) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => self.json(stats),
            OutputFormat::Table => {
                println!("{}", render_stats(stats));
                Ok(())
            }
        }
    }
}
