//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Hangar API server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    Author, DailyStats, Platform, Project, ProjectMember, StaffMember, User, Version,
};

/// State shared between handlers.
pub type SharedState = Arc<RwLock<MockState>>;

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access. Slugs and
/// usernames are matched case-insensitively, like Hangar does.
#[derive(Debug, Default)]
pub struct MockState {
    /// Projects indexed by lowercase slug.
    pub projects: BTreeMap<String, Project>,

    /// Versions indexed by lowercase project slug, in insertion order.
    pub versions: HashMap<String, Vec<Version>>,

    /// Users indexed by lowercase username.
    pub users: BTreeMap<String, User>,

    /// Team members indexed by lowercase project slug.
    pub members: HashMap<String, Vec<ProjectMember>>,

    /// Usernames that starred a project, by lowercase slug.
    pub stars: HashMap<String, Vec<String>>,

    /// Usernames watching a project, by lowercase slug.
    pub watchers: HashMap<String, Vec<String>>,

    /// Slugs pinned by a user, by lowercase username.
    pub pinned: HashMap<String, Vec<String>>,

    /// Staff listing.
    pub staff: Vec<StaffMember>,

    /// Author listing.
    pub authors: Vec<Author>,

    /// Markdown pages keyed by (lowercase slug, page path).
    pub pages: HashMap<(String, String), String>,

    /// Daily project statistics by lowercase slug.
    pub project_stats: HashMap<String, BTreeMap<String, DailyStats>>,

    /// Daily version statistics keyed by (lowercase slug, version name).
    pub version_stats: HashMap<(String, String), BTreeMap<String, DailyStats>>,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,
}

fn key(value: &str) -> String {
    value.to_lowercase()
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    /// Add a project to the state.
    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.insert(key(project.slug()), project);
        self
    }

    /// Add a version to a project.
    pub fn with_version(mut self, slug: &str, version: Version) -> Self {
        self.versions.entry(key(slug)).or_default().push(version);
        self
    }

    /// Add a user to the state.
    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(key(&user.name), user);
        self
    }

    /// Add a team member to a project.
    pub fn with_member(mut self, slug: &str, member: ProjectMember) -> Self {
        self.members.entry(key(slug)).or_default().push(member);
        self
    }

    /// Record that `username` starred `slug`.
    pub fn with_star(mut self, slug: &str, username: &str) -> Self {
        self.stars
            .entry(key(slug))
            .or_default()
            .push(username.to_string());
        self
    }

    /// Record that `username` watches `slug`.
    pub fn with_watcher(mut self, slug: &str, username: &str) -> Self {
        self.watchers
            .entry(key(slug))
            .or_default()
            .push(username.to_string());
        self
    }

    /// Pin `slug` on the profile of `username`.
    pub fn with_pin(mut self, username: &str, slug: &str) -> Self {
        self.pinned
            .entry(key(username))
            .or_default()
            .push(slug.to_string());
        self
    }

    /// Add a staff member.
    pub fn with_staff(mut self, member: StaffMember) -> Self {
        self.staff.push(member);
        self
    }

    /// Add an author.
    pub fn with_author(mut self, author: Author) -> Self {
        self.authors.push(author);
        self
    }

    /// Add a Markdown page to a project.
    pub fn with_page(mut self, slug: &str, path: &str, contents: &str) -> Self {
        self.pages
            .insert((key(slug), path.to_string()), contents.to_string());
        self
    }

    /// Add one day of project statistics.
    pub fn with_project_stats(mut self, slug: &str, date: &str, day: DailyStats) -> Self {
        self.project_stats
            .entry(key(slug))
            .or_default()
            .insert(date.to_string(), day);
        self
    }

    /// Add one day of version statistics.
    pub fn with_version_stats(
        mut self,
        slug: &str,
        version: &str,
        date: &str,
        day: DailyStats,
    ) -> Self {
        self.version_stats
            .entry((key(slug), version.to_string()))
            .or_default()
            .insert(date.to_string(), day);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Get a project by slug.
    pub fn get_project(&self, slug: &str) -> Option<&Project> {
        self.projects.get(&key(slug))
    }

    /// Get a project by owner and slug. Both must match.
    pub fn get_owned_project(&self, owner: &str, slug: &str) -> Option<&Project> {
        self.get_project(slug)
            .filter(|p| p.owner().eq_ignore_ascii_case(owner))
    }

    /// List projects, optionally filtered by category.
    pub fn list_projects(&self, category: Option<&str>) -> Vec<&Project> {
        self.projects
            .values()
            .filter(|p| {
                category
                    .filter(|c| !c.is_empty())
                    .map(|c| p.category.eq_ignore_ascii_case(c))
                    .unwrap_or(true)
            })
            .collect()
    }

    /// Versions of a project, newest first.
    pub fn list_versions(&self, slug: &str) -> Vec<&Version> {
        let mut versions: Vec<&Version> = self
            .versions
            .get(&key(slug))
            .map(|v| v.iter().collect())
            .unwrap_or_default();
        versions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        versions
    }

    /// Get a version of a project by name.
    pub fn get_project_version(&self, slug: &str, name: &str) -> Option<&Version> {
        self.versions
            .get(&key(slug))
            .and_then(|v| v.iter().find(|v| v.name == name))
    }

    /// Get a version by its numeric ID.
    pub fn get_version(&self, id: i64) -> Option<&Version> {
        self.versions.values().flatten().find(|v| v.id == id)
    }

    /// Find a version whose file for any platform has the given SHA-256 hash.
    pub fn find_version_by_hash(&self, hash: &str) -> Option<&Version> {
        self.versions.values().flatten().find(|v| {
            v.downloads.values().any(|d| {
                d.file_info
                    .as_ref()
                    .is_some_and(|f| f.sha256_hash.eq_ignore_ascii_case(hash))
            })
        })
    }

    /// Newest version matching the optional filters.
    pub fn latest_version(
        &self,
        slug: &str,
        channel: Option<&str>,
        platform: Option<Platform>,
        platform_version: Option<&str>,
    ) -> Option<&Version> {
        self.list_versions(slug).into_iter().find(|v| {
            let channel_ok = channel
                .filter(|c| !c.is_empty())
                .map(|c| v.channel.name.eq_ignore_ascii_case(c))
                .unwrap_or(true);
            let platform_ok = platform
                .map(|p| v.downloads.contains_key(p.as_str()))
                .unwrap_or(true);
            let game_ok = platform_version
                .filter(|mc| !mc.is_empty())
                .map(|mc| {
                    v.platform_dependencies
                        .values()
                        .any(|supported| supported.iter().any(|s| s == mc))
                })
                .unwrap_or(true);
            channel_ok && platform_ok && game_ok
        })
    }

    /// Get a user by name.
    pub fn get_user(&self, name: &str) -> Option<&User> {
        self.users.get(&key(name))
    }

    /// List users whose name contains `query` (case-insensitive).
    pub fn list_users(&self, query: Option<&str>) -> Vec<&User> {
        let query = query.map(key);
        self.users
            .values()
            .filter(|u| {
                query
                    .as_deref()
                    .map(|q| u.name.to_lowercase().contains(q))
                    .unwrap_or(true)
            })
            .collect()
    }

    /// Users who starred a project.
    pub fn stargazers(&self, slug: &str) -> Vec<&User> {
        self.users_named(self.stars.get(&key(slug)))
    }

    /// Users watching a project.
    pub fn project_watchers(&self, slug: &str) -> Vec<&User> {
        self.users_named(self.watchers.get(&key(slug)))
    }

    /// Projects starred by a user.
    pub fn starred_by(&self, username: &str) -> Vec<&Project> {
        self.projects_with(&self.stars, username)
    }

    /// Projects watched by a user.
    pub fn watched_by(&self, username: &str) -> Vec<&Project> {
        self.projects_with(&self.watchers, username)
    }

    /// Projects pinned by a user, in pin order.
    pub fn pinned_by(&self, username: &str) -> Vec<&Project> {
        self.pinned
            .get(&key(username))
            .map(|slugs| slugs.iter().filter_map(|s| self.get_project(s)).collect())
            .unwrap_or_default()
    }

    /// Get a project page.
    pub fn get_page(&self, slug: &str, path: &str) -> Option<&String> {
        self.pages.get(&(key(slug), path.to_string()))
    }

    fn users_named(&self, names: Option<&Vec<String>>) -> Vec<&User> {
        names
            .map(|names| names.iter().filter_map(|n| self.get_user(n)).collect())
            .unwrap_or_default()
    }

    fn projects_with(&self, index: &HashMap<String, Vec<String>>, username: &str) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|(slug, _)| {
                index
                    .get(*slug)
                    .is_some_and(|users| users.iter().any(|u| u.eq_ignore_ascii_case(username)))
            })
            .map(|(_, project)| project)
            .collect()
    }
}
