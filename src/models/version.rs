//! Version model, download resolution and latest-version lookups.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{require, segment, HangarClient};
use crate::error::{HangarError, Result};
use crate::pagination::{is_blank, ListOptions, Page, PageParams};
use crate::traits::{Get, List};

/// Number of versions scanned when resolving a download URL.
///
/// Only the first page is searched; older versions beyond it are reported
/// as not found.
pub const DOWNLOAD_LOOKUP_LIMIT: u32 = 100;

/// Channel used by [`get_latest_release_version`].
pub const RELEASE_CHANNEL: &str = "Release";

/// A release of a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    /// The unique version ID.
    pub id: i64,

    /// The parent project ID.
    #[serde(default)]
    pub project_id: Option<i64>,

    /// Version name (e.g., "1.0.0", "2.1-SNAPSHOT").
    pub name: String,

    /// Changelog.
    #[serde(default)]
    pub description: String,

    /// When the version was published.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Username of the uploader.
    #[serde(default)]
    pub author: String,

    /// Visibility ("public", "unlisted", ...).
    #[serde(default)]
    pub visibility: String,

    /// Review status ("reviewed", "under_review", ...).
    #[serde(default)]
    pub review_state: String,

    /// Download counters.
    #[serde(default)]
    pub stats: VersionDownloads,

    /// Download location per platform name.
    #[serde(default)]
    pub downloads: BTreeMap<String, DownloadInfo>,

    /// Plugin dependencies per platform name.
    #[serde(default)]
    pub plugin_dependencies: BTreeMap<String, Vec<PluginDependency>>,

    /// Supported game versions per platform name.
    #[serde(default)]
    pub platform_dependencies: BTreeMap<String, Vec<String>>,

    /// Release channel.
    #[serde(default)]
    pub channel: Channel,

    /// Pin state ("NONE", "VERSION", "CHANNEL").
    #[serde(default)]
    pub pinned_status: String,
}

/// Download counters for a version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDownloads {
    #[serde(default)]
    pub total_downloads: u64,
    #[serde(default)]
    pub platform_downloads: BTreeMap<String, u64>,
}

/// Where a version's file for one platform can be fetched.
///
/// The server fills exactly one of `download_url` (hosted on Hangar) and
/// `external_url`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadInfo {
    /// File metadata, absent for external downloads.
    #[serde(default)]
    pub file_info: Option<FileInfo>,
    /// Off-site download location.
    #[serde(default)]
    pub external_url: Option<String>,
    /// Hangar-hosted download location.
    #[serde(default)]
    pub download_url: Option<String>,
}

impl DownloadInfo {
    /// The hosted URL if present, otherwise the external URL.
    pub fn url(&self) -> Option<&str> {
        let hosted = self.download_url.as_deref().filter(|u| !u.is_empty());
        hosted.or_else(|| self.external_url.as_deref().filter(|u| !u.is_empty()))
    }

    /// Whether the file is served by Hangar itself.
    pub fn is_hosted(&self) -> bool {
        self.download_url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

/// Metadata about a hosted file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub name: String,
    #[serde(default)]
    pub size_bytes: u64,
    #[serde(default)]
    pub sha256_hash: String,
}

/// A plugin this version depends on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginDependency {
    pub name: String,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub platform: String,
}

/// A release channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// Channel name (e.g., "Release", "Beta", "Alpha").
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Hex color.
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Server platform a version is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
    #[default]
    Paper,
    Waterfall,
    Velocity,
}

impl Platform {
    /// All platforms known to the API.
    pub const ALL: [Platform; 3] = [Platform::Paper, Platform::Waterfall, Platform::Velocity];

    /// Wire name ("PAPER", "WATERFALL", "VELOCITY").
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Paper => "PAPER",
            Platform::Waterfall => "WATERFALL",
            Platform::Velocity => "VELOCITY",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown platform '{s}', expected PAPER, WATERFALL or VELOCITY"))
    }
}

impl Version {
    /// Download info for a platform.
    pub fn download(&self, platform: Platform) -> Option<&DownloadInfo> {
        self.downloads.get(platform.as_str())
    }

    /// Resolve the download URL for a platform.
    ///
    /// Prefers the hosted URL and falls back to the external one.
    ///
    /// # Errors
    ///
    /// Returns [`HangarError::NoDownloadUrl`] when the version has neither
    /// URL for the platform.
    pub fn download_url(&self, platform: Platform) -> Result<&str> {
        self.download(platform)
            .and_then(DownloadInfo::url)
            .ok_or_else(|| HangarError::NoDownloadUrl {
                version: self.name.clone(),
                platform: platform.to_string(),
            })
    }

    /// Platforms this version has downloads for, in name order.
    pub fn platforms(&self) -> Vec<&str> {
        self.downloads.keys().map(String::as_str).collect()
    }
}

/// Owner and slug of the project whose versions are listed.
#[derive(Debug, Clone, Default)]
pub struct VersionListQuery {
    pub owner: String,
    pub slug: String,
}

impl VersionListQuery {
    pub fn new(owner: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            slug: slug.into(),
        }
    }
}

/// Optional filters for the latest-version lookup. Empty values are omitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LatestVersionQuery {
    #[serde(skip_serializing_if = "is_blank")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    /// Minecraft version (e.g., "1.20.1").
    #[serde(rename = "platformVersion", skip_serializing_if = "is_blank")]
    pub platform_version: Option<String>,
}

/// Fetch a version by its numeric ID.
#[async_trait]
impl Get for Version {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &HangarClient, id: i64) -> Result<Self> {
        const OP: &str = "get version";
        if id <= 0 {
            return Err(HangarError::invalid(OP, "version id must be positive"));
        }
        client.get_json(OP, &format!("versions/{id}")).await
    }
}

#[async_trait]
impl List for Version {
    type Query = VersionListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &HangarClient,
        query: &Self::Query,
        opts: ListOptions,
    ) -> Result<Page<Self>> {
        const OP: &str = "list versions";
        let path = format!(
            "projects/{}/{}/versions",
            segment(OP, "owner", &query.owner)?,
            segment(OP, "slug", &query.slug)?,
        );
        let params: PageParams = opts.params();
        client.get_json_with_query(OP, &path, &params).await
    }
}

/// Find a version by the hash of its file.
#[tracing::instrument(skip(client))]
pub async fn find_version_by_hash(client: &HangarClient, hash: &str) -> Result<Version> {
    const OP: &str = "find version by hash";
    let path = format!("versions/find/{}", segment(OP, "hash", hash)?);
    client.get_json(OP, &path).await
}

/// Fetch one version of a project by name.
#[tracing::instrument(skip(client))]
pub async fn get_project_version(
    client: &HangarClient,
    slug: &str,
    name: &str,
) -> Result<Version> {
    const OP: &str = "get project version";
    let path = format!(
        "projects/{}/versions/{}",
        segment(OP, "slug", slug)?,
        segment(OP, "version", name)?,
    );
    client.get_json(OP, &path).await
}

/// First step of the download lookup: find a version by exact name among
/// the first [`DOWNLOAD_LOOKUP_LIMIT`] versions of a project.
///
/// # Errors
///
/// Returns [`HangarError::VersionNotFound`] when no listed version has that
/// name.
#[tracing::instrument(skip(client))]
pub async fn find_version(
    client: &HangarClient,
    owner: &str,
    slug: &str,
    version: &str,
) -> Result<Version> {
    require("find version", "version", version)?;

    let query = VersionListQuery::new(owner, slug);
    let page = Version::list_page(client, &query, ListOptions::new(DOWNLOAD_LOOKUP_LIMIT, 0)).await?;

    page.into_iter()
        .find(|v| v.name == version)
        .ok_or_else(|| HangarError::VersionNotFound {
            version: version.to_string(),
        })
}

/// Resolve the download URL of a named version for a platform.
///
/// Two steps: [`find_version`] locates the version in the project's first
/// page of versions, then [`Version::download_url`] picks the hosted URL or
/// the external one. `platform` defaults to [`Platform::Paper`].
#[tracing::instrument(skip(client))]
pub async fn get_download_url(
    client: &HangarClient,
    owner: &str,
    slug: &str,
    version: &str,
    platform: Option<Platform>,
) -> Result<String> {
    const OP: &str = "get download URL";
    require(OP, "owner", owner)?;
    require(OP, "slug", slug)?;
    require(OP, "version", version)?;

    let platform = platform.unwrap_or_default();
    let found = find_version(client, owner, slug, version).await?;
    found.download_url(platform).map(str::to_string)
}

/// First step of the latest-version lookup: the name of the newest version
/// matching the filters.
///
/// The endpoint answers with the bare version name as text. A JSON string
/// or a JSON version object are accepted as well.
#[tracing::instrument(skip(client))]
pub async fn get_latest_version_name(
    client: &HangarClient,
    slug: &str,
    query: &LatestVersionQuery,
) -> Result<String> {
    const OP: &str = "get latest version";
    let path = format!("projects/{}/latest", segment(OP, "slug", slug)?);
    let response = client.get_with_query(OP, &path, query).await?;
    let body = HangarClient::read_body(OP, response).await?;
    parse_version_name(OP, &body.text, body.is_json)
}

fn parse_version_name(operation: &'static str, text: &str, is_json: bool) -> Result<String> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NameBody {
        Name(String),
        Version { name: String },
    }

    let name = if is_json {
        match serde_json::from_str::<NameBody>(text)
            .map_err(|source| HangarError::Decode { operation, source })?
        {
            NameBody::Name(name) | NameBody::Version { name } => name,
        }
    } else {
        text.trim().to_string()
    };

    if name.trim().is_empty() {
        let source = <serde_json::Error as serde::de::Error>::custom("empty version name");
        return Err(HangarError::Decode { operation, source });
    }
    Ok(name)
}

/// Fetch the newest version matching the filters.
///
/// Two steps: [`get_latest_version_name`] resolves the name, then
/// [`get_project_version`] fetches the full version.
#[tracing::instrument(skip(client))]
pub async fn get_latest_version(
    client: &HangarClient,
    slug: &str,
    query: &LatestVersionQuery,
) -> Result<Version> {
    let name = get_latest_version_name(client, slug, query).await?;
    get_project_version(client, slug, &name).await
}

/// Fetch the newest version on the `Release` channel.
pub async fn get_latest_release_version(client: &HangarClient, slug: &str) -> Result<Version> {
    let query = LatestVersionQuery {
        channel: Some(RELEASE_CHANNEL.to_string()),
        ..Default::default()
    };
    get_latest_version(client, slug, &query).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version_with_downloads(downloads: serde_json::Value) -> Version {
        serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "2.0.1",
            "downloads": downloads
        }))
        .unwrap()
    }

    #[test]
    fn test_download_url_prefers_hosted() {
        let version = version_with_downloads(serde_json::json!({
            "PAPER": {
                "fileInfo": { "name": "a.jar", "sizeBytes": 10, "sha256Hash": "ab" },
                "externalUrl": "https://cdn.test.com/a.jar",
                "downloadUrl": "https://hangarcdn.papermc.io/a.jar"
            }
        }));
        assert_eq!(
            version.download_url(Platform::Paper).unwrap(),
            "https://hangarcdn.papermc.io/a.jar"
        );
    }

    #[test]
    fn test_download_url_falls_back_to_external() {
        let version = version_with_downloads(serde_json::json!({
            "PAPER": {
                "fileInfo": null,
                "externalUrl": "https://cdn.test.com/testplugin-2.0.1.jar",
                "downloadUrl": null
            }
        }));
        let info = version.download(Platform::Paper).unwrap();
        assert!(!info.is_hosted());
        assert_eq!(
            version.download_url(Platform::Paper).unwrap(),
            "https://cdn.test.com/testplugin-2.0.1.jar"
        );
    }

    #[test]
    fn test_download_url_missing_platform() {
        let version = version_with_downloads(serde_json::json!({
            "PAPER": { "downloadUrl": "https://hangarcdn.papermc.io/a.jar" },
            "VELOCITY": { "externalUrl": "", "downloadUrl": "" }
        }));

        let err = version.download_url(Platform::Waterfall).unwrap_err();
        assert!(matches!(err, HangarError::NoDownloadUrl { .. }));
        assert!(err.to_string().contains("WATERFALL"));

        // Empty strings count as absent
        assert!(version.download_url(Platform::Velocity).is_err());
        assert_eq!(version.platforms(), vec!["PAPER", "VELOCITY"]);
    }

    #[test]
    fn test_platform_parse_and_display() {
        assert_eq!("paper".parse::<Platform>().unwrap(), Platform::Paper);
        assert_eq!("VELOCITY".parse::<Platform>().unwrap(), Platform::Velocity);
        assert!("forge".parse::<Platform>().is_err());
        assert_eq!(Platform::Waterfall.to_string(), "WATERFALL");
        assert_eq!(Platform::default(), Platform::Paper);
    }

    #[test]
    fn test_latest_query_omits_empty_filters() {
        let query = LatestVersionQuery {
            channel: Some(String::new()),
            platform: None,
            platform_version: None,
        };
        assert_eq!(serde_qs::to_string(&query).unwrap(), "");

        let query = LatestVersionQuery {
            channel: Some("Release".into()),
            platform: Some(Platform::Paper),
            platform_version: Some("1.20.1".into()),
        };
        assert_eq!(
            serde_qs::to_string(&query).unwrap(),
            "channel=Release&platform=PAPER&platformVersion=1.20.1"
        );
    }

    #[test]
    fn test_parse_version_name_shapes() {
        assert_eq!(parse_version_name("op", "1.4.2\n", false).unwrap(), "1.4.2");
        assert_eq!(parse_version_name("op", "\"1.4.2\"", true).unwrap(), "1.4.2");
        assert_eq!(
            parse_version_name("op", r#"{"id": 3, "name": "1.4.2"}"#, true).unwrap(),
            "1.4.2"
        );
        assert!(matches!(
            parse_version_name("op", "  ", false),
            Err(HangarError::Decode { .. })
        ));
        assert!(matches!(
            parse_version_name("op", "[1]", true),
            Err(HangarError::Decode { .. })
        ));
    }
}
