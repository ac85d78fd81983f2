//! Project model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{segment, HangarClient};
use crate::error::Result;
use crate::models::user::{ProjectMember, User};
use crate::pagination::{is_blank, ListOptions, Page};
use crate::traits::{Get, List};

/// A Hangar project (a plugin listing).
///
/// Projects are addressed by their slug; the namespace carries the owner
/// needed by owner-scoped endpoints such as version listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// The unique numeric project ID.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Owner and slug.
    pub namespace: Namespace,

    /// Project category (e.g., "gameplay", "admin_tools").
    #[serde(default)]
    pub category: String,

    /// Short description.
    #[serde(default)]
    pub description: String,

    /// When the project was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the project was last modified.
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,

    /// Engagement counters.
    #[serde(default)]
    pub stats: EngagementStats,

    /// Visibility ("public", "new", "needsChanges", ...).
    #[serde(default)]
    pub visibility: String,

    /// Project avatar image.
    #[serde(default)]
    pub avatar_url: Option<String>,

    /// Links, license and tags.
    #[serde(default)]
    pub settings: ProjectSettings,
}

/// Owner and unique slug of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    /// Username of the project owner.
    pub owner: String,
    /// URL-friendly project identifier.
    pub slug: String,
}

/// View, download, star and watcher counts for a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementStats {
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub recent_views: u64,
    #[serde(default)]
    pub recent_downloads: u64,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub watchers: u64,
}

/// Project configuration and metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// External links. Hangar groups them into sections.
    #[serde(default)]
    pub links: Vec<LinkSection>,
    /// Tags for categorization.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Licensing information.
    #[serde(default)]
    pub license: License,
    /// Search keywords.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Donation configuration.
    #[serde(default)]
    pub donation: Donation,
}

/// A titled group of project links.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkSection {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "type", default)]
    pub section_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// An external link associated with the project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Project license.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct License {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "type", default)]
    pub license_type: String,
}

/// Donation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Donation {
    #[serde(default)]
    pub enable: bool,
    #[serde(default)]
    pub subject: Option<String>,
}

impl Project {
    /// The project slug.
    pub fn slug(&self) -> &str {
        &self.namespace.slug
    }

    /// Username of the project owner.
    pub fn owner(&self) -> &str {
        &self.namespace.owner
    }

    /// License label, falling back to the license type.
    pub fn license_label(&self) -> &str {
        self.settings
            .license
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.settings.license.license_type)
    }

    /// List versions of this project.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let project = Project::get(&client, "fancyglow".to_string()).await?;
    /// let versions = project.versions(&client, ListOptions::default()).await?;
    /// for version in &versions {
    ///     println!("{} ({})", version.name, version.channel.name);
    /// }
    /// ```
    pub async fn versions(
        &self,
        client: &HangarClient,
        opts: ListOptions,
    ) -> Result<Page<crate::models::version::Version>> {
        let query = crate::models::version::VersionListQuery::new(self.owner(), self.slug());
        crate::models::version::Version::list_page(client, &query, opts).await
    }
}

/// Query parameters for listing projects.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectListQuery {
    /// Filter by category. Omitted when empty.
    #[serde(skip_serializing_if = "is_blank")]
    pub category: Option<String>,
}

#[async_trait]
impl Get for Project {
    type Id = String; // Project slug

    #[tracing::instrument(skip(client))]
    async fn get(client: &HangarClient, slug: String) -> Result<Self> {
        const OP: &str = "get project";
        let path = format!("projects/{}", segment(OP, "slug", &slug)?);
        client.get_json(OP, &path).await
    }
}

#[async_trait]
impl List for Project {
    type Query = ProjectListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &HangarClient,
        query: &Self::Query,
        opts: ListOptions,
    ) -> Result<Page<Self>> {
        #[derive(Serialize)]
        struct RequestParams<'a> {
            #[serde(flatten)]
            page: crate::pagination::PageParams,
            #[serde(flatten)]
            query: &'a ProjectListQuery,
        }

        let params = RequestParams {
            page: opts.params(),
            query,
        };

        client
            .get_json_with_query("list projects", "projects", &params)
            .await
    }
}

/// Get the team members of a project.
#[tracing::instrument(skip(client))]
pub async fn get_project_members(
    client: &HangarClient,
    slug: &str,
    opts: ListOptions,
) -> Result<Page<ProjectMember>> {
    project_listing(client, "get project members", slug, "members", opts).await
}

/// Get the users who starred a project.
#[tracing::instrument(skip(client))]
pub async fn get_project_stargazers(
    client: &HangarClient,
    slug: &str,
    opts: ListOptions,
) -> Result<Page<User>> {
    project_listing(client, "get project stargazers", slug, "stargazers", opts).await
}

/// Get the users watching a project.
#[tracing::instrument(skip(client))]
pub async fn get_project_watchers(
    client: &HangarClient,
    slug: &str,
    opts: ListOptions,
) -> Result<Page<User>> {
    project_listing(client, "get project watchers", slug, "watchers", opts).await
}

async fn project_listing<T: serde::de::DeserializeOwned>(
    client: &HangarClient,
    operation: &'static str,
    slug: &str,
    listing: &str,
    opts: ListOptions,
) -> Result<Page<T>> {
    let path = format!("projects/{}/{listing}", segment(operation, "slug", slug)?);
    client
        .get_json_with_query(operation, &path, &opts.params())
        .await
}
