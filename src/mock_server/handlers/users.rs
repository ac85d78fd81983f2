//! User, author and staff endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::projects::PageQuery;
use super::{not_found, paginate};
use crate::mock_server::state::SharedState;
use crate::Project;

/// Query parameters for listing users.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub limit: Option<u32>,
    pub offset: Option<u64>,
    pub query: Option<String>,
}

/// GET /users/{name}
pub async fn get_user(State(state): State<SharedState>, Path(name): Path<String>) -> Response {
    let state = state.read().await;

    match state.get_user(&name) {
        Some(user) => Json(user.clone()).into_response(),
        None => not_found(format!("User {name} not found")),
    }
}

/// GET /users
pub async fn list_users(
    State(state): State<SharedState>,
    Query(query): Query<ListUsersQuery>,
) -> Response {
    let state = state.read().await;
    let users = state.list_users(query.query.as_deref());
    Json(paginate(users, query.limit, query.offset)).into_response()
}

/// GET /users/{name}/starred
pub async fn user_starred(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    let state = state.read().await;
    if state.get_user(&name).is_none() {
        return not_found(format!("User {name} not found"));
    }
    Json(paginate(state.starred_by(&name), query.limit, query.offset)).into_response()
}

/// GET /users/{name}/watching
pub async fn user_watching(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    let state = state.read().await;
    if state.get_user(&name).is_none() {
        return not_found(format!("User {name} not found"));
    }
    Json(paginate(state.watched_by(&name), query.limit, query.offset)).into_response()
}

/// GET /users/{name}/pinned
///
/// Hangar answers with a bare array here.
pub async fn user_pinned(State(state): State<SharedState>, Path(name): Path<String>) -> Response {
    let state = state.read().await;
    if state.get_user(&name).is_none() {
        return not_found(format!("User {name} not found"));
    }

    let pinned: Vec<Project> = state.pinned_by(&name).into_iter().cloned().collect();
    Json(pinned).into_response()
}

/// GET /authors
pub async fn list_authors(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Response {
    let state = state.read().await;
    Json(paginate(state.authors.iter().collect(), query.limit, query.offset)).into_response()
}

/// GET /staff
///
/// Bare array, not a paginated envelope.
pub async fn list_staff(State(state): State<SharedState>) -> Response {
    let state = state.read().await;
    Json(state.staff.clone()).into_response()
}
