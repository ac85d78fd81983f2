//! Project pages (Markdown documents).

use serde::{Deserialize, Serialize};

use crate::client::{segment, HangarClient};
use crate::error::{HangarError, Result};

/// Path of a project's main page.
pub const HOME_PAGE: &str = "home";

/// A Markdown page of a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectPage {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    /// Markdown source.
    #[serde(default)]
    pub contents: String,
}

impl ProjectPage {
    /// Wrap raw Markdown served without page metadata.
    fn from_markdown(path: &str, contents: String) -> Self {
        Self {
            id: 0,
            name: path.to_string(),
            slug: path.to_string(),
            contents,
        }
    }
}

/// Get a page of a project. An empty `path` means the main page.
///
/// JSON responses decode as [`ProjectPage`]; any other body is taken as the
/// page's raw Markdown.
#[tracing::instrument(skip(client))]
pub async fn get_project_page(client: &HangarClient, slug: &str, path: &str) -> Result<ProjectPage> {
    const OP: &str = "get project page";
    let path = if path.is_empty() { HOME_PAGE } else { path };
    let url_path = format!(
        "projects/{}/pages/{}",
        segment(OP, "slug", slug)?,
        segment(OP, "page path", path)?,
    );

    let response = client.get(OP, &url_path).await?;
    let body = HangarClient::read_body(OP, response).await?;

    if body.is_json {
        serde_json::from_str(&body.text)
            .map_err(|source| HangarError::Decode { operation: OP, source })
    } else {
        Ok(ProjectPage::from_markdown(path, body.text))
    }
}

/// Get the main page (README) of a project.
pub async fn get_project_main_page(client: &HangarClient, slug: &str) -> Result<ProjectPage> {
    get_project_page(client, slug, HOME_PAGE).await
}
