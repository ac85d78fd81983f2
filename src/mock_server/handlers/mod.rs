//! HTTP request handlers for the mock server.

pub mod projects;
pub mod users;
pub mod versions;

pub use projects::*;
pub use users::*;
pub use versions::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::pagination::DEFAULT_LIMIT;
use crate::{Page, Pagination};

/// Slice one page out of `items`, echoing the effective limit and offset.
///
/// A missing or zero limit uses the API default.
pub(crate) fn paginate<T: Clone>(items: Vec<&T>, limit: Option<u32>, offset: Option<u64>) -> Page<T> {
    let limit = limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT);
    let offset = offset.unwrap_or(0);
    let count = items.len() as u64;

    let result = items
        .into_iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(limit as usize)
        .cloned()
        .collect();

    Page {
        pagination: Pagination {
            count,
            limit,
            offset,
        },
        result,
    }
}

/// 404 with a Hangar-style error body.
pub(crate) fn not_found(message: impl Into<String>) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "message": message.into(),
            "messageArgs": [],
            "isHangarApiException": true
        })),
    )
        .into_response()
}
