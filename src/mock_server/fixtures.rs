//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{
    Author, Channel, DailyStats, DownloadInfo, EngagementStats, FileInfo, Namespace, Platform,
    Project, ProjectMember, Role, StaffMember, User, Version, VersionDownloads,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

fn timestamp(value: &str) -> Option<DateTime<Utc>> {
    value.parse().ok()
}

impl Fixtures {
    // =========================================================================
    // Project Fixtures
    // =========================================================================

    /// Create a public project. The slug equals the name.
    pub fn project(owner: &str, name: &str, category: &str) -> Project {
        Project {
            id: i64::from(name.bytes().map(u32::from).sum::<u32>()),
            name: name.to_string(),
            namespace: Namespace {
                owner: owner.to_string(),
                slug: name.to_string(),
            },
            category: category.to_string(),
            description: format!("{name} for Paper servers"),
            created_at: timestamp("2023-06-01T12:00:00Z"),
            last_updated: timestamp("2024-02-01T12:00:00Z"),
            visibility: "public".to_string(),
            ..Default::default()
        }
    }

    /// Create a project with engagement counters.
    pub fn popular_project(
        owner: &str,
        name: &str,
        category: &str,
        downloads: u64,
        stars: u64,
    ) -> Project {
        let mut project = Self::project(owner, name, category);
        project.stats = EngagementStats {
            views: downloads * 10,
            downloads,
            stars,
            ..Default::default()
        };
        project
    }

    // =========================================================================
    // Version Fixtures
    // =========================================================================

    fn version(id: i64, name: &str, channel: &str, created_at: &str) -> Version {
        Version {
            id,
            name: name.to_string(),
            created_at: timestamp(created_at),
            author: "Oliver".to_string(),
            visibility: "public".to_string(),
            review_state: "reviewed".to_string(),
            channel: Channel {
                name: channel.to_string(),
                color: "#14B8A6".to_string(),
                ..Default::default()
            },
            stats: VersionDownloads {
                total_downloads: 100,
                ..Default::default()
            },
            platform_dependencies: BTreeMap::from([(
                Platform::Paper.to_string(),
                vec!["1.20.1".to_string(), "1.20.4".to_string()],
            )]),
            pinned_status: "NONE".to_string(),
            ..Default::default()
        }
    }

    /// Create a version whose PAPER file is hosted on Hangar.
    ///
    /// The file hash is the version ID as 64 hex digits.
    pub fn hosted_version(id: i64, name: &str, channel: &str, created_at: &str) -> Version {
        let mut version = Self::version(id, name, channel, created_at);
        version.downloads.insert(
            Platform::Paper.to_string(),
            DownloadInfo {
                file_info: Some(FileInfo {
                    name: format!("plugin-{name}.jar"),
                    size_bytes: 1024,
                    sha256_hash: Self::file_hash(id),
                }),
                external_url: None,
                download_url: Some(format!(
                    "https://hangarcdn.papermc.io/plugins/versions/{name}/PAPER/plugin-{name}.jar"
                )),
            },
        );
        version
    }

    /// Create a version whose PAPER file is only available off-site.
    pub fn external_version(id: i64, name: &str, url: &str, created_at: &str) -> Version {
        let mut version = Self::version(id, name, "Release", created_at);
        version.downloads.insert(
            Platform::Paper.to_string(),
            DownloadInfo {
                file_info: None,
                external_url: Some(url.to_string()),
                download_url: None,
            },
        );
        version
    }

    /// SHA-256 used for a hosted version's file.
    pub fn file_hash(id: i64) -> String {
        format!("{id:064x}")
    }

    // =========================================================================
    // User Fixtures
    // =========================================================================

    fn role(name: &str, title: &str) -> Role {
        Role::Named {
            name: name.to_string(),
            title: Some(title.to_string()),
            color: None,
        }
    }

    /// Create a user.
    pub fn user(name: &str) -> User {
        User {
            name: name.to_string(),
            join_date: timestamp("2022-05-26T12:00:00Z"),
            project_count: 1,
            ..Default::default()
        }
    }

    /// Create a project team member.
    pub fn member(user: &str, role: &str, accepted: bool) -> ProjectMember {
        ProjectMember {
            user: user.to_string(),
            roles: vec![Self::role(&format!("Project_{role}"), role)],
            accepted,
        }
    }

    /// Create a staff member.
    pub fn staff(name: &str) -> StaffMember {
        StaffMember {
            name: name.to_string(),
            roles: vec![Self::role("Hangar_Admin", "Hangar Admin")],
            join_date: timestamp("2022-01-01T00:00:00Z"),
            ..Default::default()
        }
    }

    /// Create an author.
    pub fn author(name: &str, project_count: u64) -> Author {
        Author {
            name: name.to_string(),
            join_date: timestamp("2022-05-26T12:00:00Z"),
            project_count,
            ..Default::default()
        }
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// Create a default set of test data for common scenarios.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario with related entities.
pub struct DefaultScenario {
    pub projects: Vec<Project>,
    /// (project slug, version)
    pub versions: Vec<(String, Version)>,
    pub users: Vec<User>,
    /// (project slug, member)
    pub members: Vec<(String, ProjectMember)>,
    /// (project slug, username)
    pub stars: Vec<(String, String)>,
    /// (project slug, username)
    pub watchers: Vec<(String, String)>,
    /// (username, project slug)
    pub pins: Vec<(String, String)>,
    pub staff: Vec<StaffMember>,
    pub authors: Vec<Author>,
    /// (project slug, page path, Markdown)
    pub pages: Vec<(String, String, String)>,
    /// (project slug, date, stats)
    pub project_stats: Vec<(String, String, DailyStats)>,
    /// (project slug, version, date, stats)
    pub version_stats: Vec<(String, String, String, DailyStats)>,
}

impl DefaultScenario {
    fn new() -> Self {
        let fancyglow = "FancyGlow";
        let testplugin = "TestPlugin";
        let pair = |a: &str, b: &str| (a.to_string(), b.to_string());

        let projects = vec![
            Fixtures::popular_project("Oliver", fancyglow, "gameplay", 311, 4),
            Fixtures::popular_project("jmp", testplugin, "admin_tools", 42, 1),
        ];

        let versions = vec![
            (
                fancyglow.to_string(),
                Fixtures::hosted_version(101, "1.0.0", "Release", "2024-01-10T00:00:00Z"),
            ),
            (
                fancyglow.to_string(),
                Fixtures::hosted_version(102, "1.1.0-beta", "Beta", "2024-02-10T00:00:00Z"),
            ),
            (
                testplugin.to_string(),
                Fixtures::external_version(
                    201,
                    "2.0.1",
                    "https://cdn.test.com/testplugin-2.0.1.jar",
                    "2024-03-01T00:00:00Z",
                ),
            ),
        ];

        let users = vec![
            Fixtures::user("Oliver"),
            Fixtures::user("jmp"),
            Fixtures::user("kennytv"),
        ];

        let members = vec![
            (fancyglow.to_string(), Fixtures::member("Oliver", "Owner", true)),
            (fancyglow.to_string(), Fixtures::member("jmp", "Developer", false)),
        ];

        Self {
            projects,
            versions,
            users,
            members,
            stars: vec![pair(fancyglow, "jmp"), pair(fancyglow, "kennytv")],
            watchers: vec![pair(fancyglow, "jmp"), pair(testplugin, "Oliver")],
            pins: vec![pair("Oliver", fancyglow)],
            staff: vec![Fixtures::staff("kennytv")],
            authors: vec![Fixtures::author("Oliver", 1), Fixtures::author("jmp", 1)],
            pages: vec![(
                fancyglow.to_string(),
                "home".to_string(),
                "# FancyGlow\n\nGlowing team colors for Paper.".to_string(),
            )],
            project_stats: vec![
                (
                    fancyglow.to_string(),
                    "2024-01-01".to_string(),
                    DailyStats { downloads: 3, views: 10 },
                ),
                (
                    fancyglow.to_string(),
                    "2024-01-02".to_string(),
                    DailyStats { downloads: 5, views: 12 },
                ),
            ],
            version_stats: vec![(
                fancyglow.to_string(),
                "1.0.0".to_string(),
                "2024-01-01".to_string(),
                DailyStats { downloads: 2, views: 0 },
            )],
        }
    }
}
