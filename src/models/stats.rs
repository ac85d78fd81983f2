//! Daily project and version statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::client::{segment, HangarClient};
use crate::error::Result;
use crate::pagination::is_blank;

/// Downloads and views for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStats {
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub views: u64,
}

/// Daily project metrics keyed by ISO date (`YYYY-MM-DD`).
///
/// Days without data may be missing; keys are not guaranteed contiguous.
pub type ProjectStats = BTreeMap<String, DailyStats>;

/// Daily version metrics keyed by ISO date.
pub type VersionStats = BTreeMap<String, DailyStats>;

/// Optional date range. Unset bounds are left to the server's default range.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatsRange {
    /// Inclusive start date, passed through verbatim.
    #[serde(rename = "fromDate", skip_serializing_if = "is_blank")]
    pub from: Option<String>,
    /// Inclusive end date, passed through verbatim.
    #[serde(rename = "toDate", skip_serializing_if = "is_blank")]
    pub to: Option<String>,
}

impl StatsRange {
    pub fn new(from: Option<String>, to: Option<String>) -> Self {
        Self { from, to }
    }
}

/// Sum downloads and views over all days.
pub fn totals(stats: &BTreeMap<String, DailyStats>) -> DailyStats {
    stats.values().fold(DailyStats::default(), |acc, day| DailyStats {
        downloads: acc.downloads + day.downloads,
        views: acc.views + day.views,
    })
}

/// Get daily statistics of a project.
#[tracing::instrument(skip(client))]
pub async fn get_project_stats(
    client: &HangarClient,
    slug: &str,
    range: &StatsRange,
) -> Result<ProjectStats> {
    const OP: &str = "get project stats";
    let path = format!("projects/{}/stats", segment(OP, "slug", slug)?);
    client.get_json_with_query(OP, &path, range).await
}

/// Get daily statistics of one version of a project.
#[tracing::instrument(skip(client))]
pub async fn get_version_stats(
    client: &HangarClient,
    slug: &str,
    version: &str,
    range: &StatsRange,
) -> Result<VersionStats> {
    const OP: &str = "get version stats";
    let path = format!(
        "projects/{}/versions/{}/stats",
        segment(OP, "slug", slug)?,
        segment(OP, "version", version)?,
    );
    client.get_json_with_query(OP, &path, range).await
}
