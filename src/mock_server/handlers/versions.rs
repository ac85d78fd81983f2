//! Version endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};

use super::projects::{PageQuery, StatsQuery};
use super::{not_found, paginate};
use crate::mock_server::state::SharedState;

/// GET /projects/{owner}/{slug}/versions
pub async fn list_versions(
    State(state): State<SharedState>,
    Path((owner, slug)): Path<(String, String)>,
    Query(query): Query<PageQuery>,
) -> Response {
    let state = state.read().await;
    if state.get_owned_project(&owner, &slug).is_none() {
        return not_found(format!("Project {owner}/{slug} not found"));
    }
    Json(paginate(state.list_versions(&slug), query.limit, query.offset)).into_response()
}

/// GET /projects/{slug}/versions/{name}
pub async fn get_project_version(
    State(state): State<SharedState>,
    Path((slug, name)): Path<(String, String)>,
) -> Response {
    let state = state.read().await;

    match state.get_project_version(&slug, &name) {
        Some(version) => Json(version.clone()).into_response(),
        None => not_found(format!("Version {name} of {slug} not found")),
    }
}

/// GET /projects/{slug}/versions/{name}/stats
pub async fn version_stats(
    State(state): State<SharedState>,
    Path((slug, name)): Path<(String, String)>,
    Query(query): Query<StatsQuery>,
) -> Response {
    let state = state.read().await;
    if state.get_project_version(&slug, &name).is_none() {
        return not_found(format!("Version {name} of {slug} not found"));
    }

    let stats = state
        .version_stats
        .get(&(slug.to_lowercase(), name))
        .map(|s| query.filter(s))
        .unwrap_or_default();
    Json(stats).into_response()
}

/// GET /versions/{id}
pub async fn get_version(State(state): State<SharedState>, Path(id): Path<i64>) -> Response {
    let state = state.read().await;

    match state.get_version(id) {
        Some(version) => Json(version.clone()).into_response(),
        None => not_found(format!("Version {id} not found")),
    }
}

/// GET /versions/find/{hash}
pub async fn find_version_by_hash(
    State(state): State<SharedState>,
    Path(hash): Path<String>,
) -> Response {
    let state = state.read().await;

    match state.find_version_by_hash(&hash) {
        Some(version) => Json(version.clone()).into_response(),
        None => not_found(format!("No version with hash {hash}")),
    }
}
