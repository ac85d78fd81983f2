//! Command-line parsing tests for the `hangar` binary.

use clap::Parser;
use hangarapi::cli::{
    AuthorsCommand, Cli, Command, PageArgs, ProjectCommand, StaffCommand, UserCommand,
    VersionCommand,
};
use hangarapi::{ListOptions, OutputFormat, Platform, DEFAULT_LIMIT};

#[test]
fn test_project_get() {
    let cli = Cli::parse_from(["hangar", "project", "get", "fancyglow"]);

    match cli.command {
        Command::Project(ProjectCommand::Get { slug }) => assert_eq!(slug, "fancyglow"),
        other => panic!("unexpected command: {other:?}"),
    }
    assert!(cli.output.is_none());
    assert!(!cli.verbose);
}

#[test]
fn test_project_list_defaults() {
    let cli = Cli::parse_from(["hangar", "project", "list"]);

    match cli.command {
        Command::Project(ProjectCommand::List { page, category }) => {
            assert_eq!(
                page,
                PageArgs {
                    limit: DEFAULT_LIMIT,
                    offset: 0
                }
            );
            assert!(category.is_none());
            assert_eq!(ListOptions::from(page), ListOptions::new(25, 0));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_project_list_with_flags() {
    let cli = Cli::parse_from([
        "hangar",
        "project",
        "list",
        "--limit",
        "10",
        "--offset",
        "30",
        "--category",
        "gameplay",
    ]);

    match cli.command {
        Command::Project(ProjectCommand::List { page, category }) => {
            assert_eq!(page.limit, 10);
            assert_eq!(page.offset, 30);
            assert_eq!(category.as_deref(), Some("gameplay"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::parse_from([
        "hangar",
        "project",
        "stats",
        "fancyglow",
        "--from",
        "2024-01-01",
        "-o",
        "json",
        "--token",
        "secret",
        "--timeout",
        "1m",
        "-v",
    ]);

    assert_eq!(cli.output, Some(OutputFormat::Json));
    assert!(cli.verbose);

    let overrides = cli.overrides();
    assert_eq!(overrides.api_token.as_deref(), Some("secret"));
    assert_eq!(overrides.timeout.as_deref(), Some("1m"));
    assert_eq!(overrides.output, Some(OutputFormat::Json));
    assert!(overrides.base_url.is_none());

    match cli.command {
        Command::Project(ProjectCommand::Stats { slug, range }) => {
            assert_eq!(slug, "fancyglow");
            assert_eq!(range.from.as_deref(), Some("2024-01-01"));
            assert!(range.to.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_project_page_path_is_optional() {
    let cli = Cli::parse_from(["hangar", "project", "page", "fancyglow"]);
    assert!(matches!(
        cli.command,
        Command::Project(ProjectCommand::Page { path: None, .. })
    ));

    let cli = Cli::parse_from(["hangar", "project", "page", "fancyglow", "wiki/setup"]);
    match cli.command {
        Command::Project(ProjectCommand::Page { slug, path }) => {
            assert_eq!(slug, "fancyglow");
            assert_eq!(path.as_deref(), Some("wiki/setup"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_download_url_platform_default_and_parse() {
    let cli = Cli::parse_from(["hangar", "version", "download-url", "TestPlugin", "2.0.1"]);
    match cli.command {
        Command::Version(VersionCommand::DownloadUrl {
            slug,
            version,
            platform,
        }) => {
            assert_eq!(slug, "TestPlugin");
            assert_eq!(version, "2.0.1");
            assert_eq!(platform, Platform::Paper);
        }
        other => panic!("unexpected command: {other:?}"),
    }

    let cli = Cli::parse_from([
        "hangar",
        "version",
        "download-url",
        "TestPlugin",
        "2.0.1",
        "--platform",
        "velocity",
    ]);
    assert!(matches!(
        cli.command,
        Command::Version(VersionCommand::DownloadUrl {
            platform: Platform::Velocity,
            ..
        })
    ));
}

#[test]
fn test_unknown_platform_rejected() {
    let result = Cli::try_parse_from([
        "hangar",
        "version",
        "latest",
        "TestPlugin",
        "--platform",
        "forge",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_version_latest_filters() {
    let cli = Cli::parse_from([
        "hangar",
        "version",
        "latest",
        "TestPlugin",
        "--channel",
        "Beta",
        "--platform",
        "PAPER",
        "--minecraft-version",
        "1.20.4",
    ]);

    match cli.command {
        Command::Version(VersionCommand::Latest {
            slug,
            channel,
            platform,
            minecraft_version,
        }) => {
            assert_eq!(slug, "TestPlugin");
            assert_eq!(channel.as_deref(), Some("Beta"));
            assert_eq!(platform, Some(Platform::Paper));
            assert_eq!(minecraft_version.as_deref(), Some("1.20.4"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_version_get_by_id_requires_number() {
    let cli = Cli::parse_from(["hangar", "version", "get-by-id", "101"]);
    assert!(matches!(
        cli.command,
        Command::Version(VersionCommand::GetById { id: 101 })
    ));

    assert!(Cli::try_parse_from(["hangar", "version", "get-by-id", "abc"]).is_err());
}

#[test]
fn test_user_commands() {
    let cli = Cli::parse_from(["hangar", "user", "list", "kenny", "--limit", "5"]);
    match cli.command {
        Command::User(UserCommand::List { query, page }) => {
            assert_eq!(query.as_deref(), Some("kenny"));
            assert_eq!(page.limit, 5);
        }
        other => panic!("unexpected command: {other:?}"),
    }

    let cli = Cli::parse_from(["hangar", "user", "pinned", "Oliver"]);
    assert!(matches!(
        cli.command,
        Command::User(UserCommand::Pinned { ref username }) if username == "Oliver"
    ));
}

#[test]
fn test_authors_and_staff() {
    let cli = Cli::parse_from(["hangar", "authors", "list", "--offset", "25"]);
    assert!(matches!(
        cli.command,
        Command::Authors(AuthorsCommand::List {
            page: PageArgs { offset: 25, .. }
        })
    ));

    let cli = Cli::parse_from(["hangar", "staff", "list"]);
    assert!(matches!(cli.command, Command::Staff(StaffCommand::List)));
}

#[test]
fn test_missing_subcommand_is_error() {
    assert!(Cli::try_parse_from(["hangar"]).is_err());
    assert!(Cli::try_parse_from(["hangar", "project"]).is_err());
    assert!(Cli::try_parse_from(["hangar", "project", "get"]).is_err());
}

#[test]
fn test_invalid_output_format() {
    assert!(Cli::try_parse_from(["hangar", "-o", "yaml", "staff", "list"]).is_err());
}

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
