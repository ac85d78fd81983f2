//! Project endpoint handlers.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::{not_found, paginate};
use crate::mock_server::state::SharedState;
use crate::{DailyStats, Platform};

/// Limit and offset accepted by list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<u32>,
    pub offset: Option<u64>,
}

/// Query parameters for listing projects.
#[derive(Debug, Default, Deserialize)]
pub struct ListProjectsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u64>,
    pub category: Option<String>,
}

/// Date range for statistics endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

impl StatsQuery {
    /// Keep days within the inclusive range. ISO dates order lexically.
    pub(crate) fn filter(&self, stats: &BTreeMap<String, DailyStats>) -> BTreeMap<String, DailyStats> {
        stats
            .iter()
            .filter(|(date, _)| self.from_date.as_deref().map_or(true, |from| date.as_str() >= from))
            .filter(|(date, _)| self.to_date.as_deref().map_or(true, |to| date.as_str() <= to))
            .map(|(date, day)| (date.clone(), *day))
            .collect()
    }
}

/// Filters for the latest-version endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestQuery {
    pub channel: Option<String>,
    pub platform: Option<Platform>,
    pub platform_version: Option<String>,
}

/// GET /projects/{slug}
pub async fn get_project(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> Response {
    let state = state.read().await;

    match state.get_project(&slug) {
        Some(project) => (StatusCode::OK, Json(project.clone())).into_response(),
        None => not_found(format!("Project {slug} not found")),
    }
}

/// GET /projects
pub async fn list_projects(
    State(state): State<SharedState>,
    Query(query): Query<ListProjectsQuery>,
) -> Response {
    let state = state.read().await;
    let projects = state.list_projects(query.category.as_deref());
    Json(paginate(projects, query.limit, query.offset)).into_response()
}

/// GET /projects/{slug}/members
pub async fn list_members(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    let state = state.read().await;
    if state.get_project(&slug).is_none() {
        return not_found(format!("Project {slug} not found"));
    }

    let members: Vec<_> = state
        .members
        .get(&slug.to_lowercase())
        .map(|m| m.iter().collect())
        .unwrap_or_default();
    Json(paginate(members, query.limit, query.offset)).into_response()
}

/// GET /projects/{slug}/stargazers
pub async fn list_stargazers(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    let state = state.read().await;
    if state.get_project(&slug).is_none() {
        return not_found(format!("Project {slug} not found"));
    }
    Json(paginate(state.stargazers(&slug), query.limit, query.offset)).into_response()
}

/// GET /projects/{slug}/watchers
pub async fn list_watchers(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    let state = state.read().await;
    if state.get_project(&slug).is_none() {
        return not_found(format!("Project {slug} not found"));
    }
    Json(paginate(state.project_watchers(&slug), query.limit, query.offset)).into_response()
}

/// GET /projects/{slug}/stats
pub async fn project_stats(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    Query(query): Query<StatsQuery>,
) -> Response {
    let state = state.read().await;
    if state.get_project(&slug).is_none() {
        return not_found(format!("Project {slug} not found"));
    }

    let stats = state
        .project_stats
        .get(&slug.to_lowercase())
        .map(|s| query.filter(s))
        .unwrap_or_default();
    Json(stats).into_response()
}

/// GET /projects/{slug}/pages/{path}
///
/// Served as raw Markdown, like Hangar does.
pub async fn get_page(
    State(state): State<SharedState>,
    Path((slug, page)): Path<(String, String)>,
) -> Response {
    let state = state.read().await;

    match state.get_page(&slug, &page) {
        Some(contents) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            contents.clone(),
        )
            .into_response(),
        None => not_found(format!("Page {page} not found")),
    }
}

/// GET /projects/{slug}/latest
///
/// Answers with the bare version name as text.
pub async fn latest_version(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    Query(query): Query<LatestQuery>,
) -> Response {
    let state = state.read().await;
    if state.get_project(&slug).is_none() {
        return not_found(format!("Project {slug} not found"));
    }

    match state.latest_version(
        &slug,
        query.channel.as_deref(),
        query.platform,
        query.platform_version.as_deref(),
    ) {
        Some(version) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            version.name.clone(),
        )
            .into_response(),
        None => not_found(format!("No matching version of {slug}")),
    }
}
