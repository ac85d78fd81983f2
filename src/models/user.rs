//! User, author, staff and project member models.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{segment, HangarClient};
use crate::error::Result;
use crate::models::project::Project;
use crate::pagination::{is_blank, ListOptions, Page, PageParams};
use crate::traits::{Get, List};

/// A Hangar account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Username.
    pub name: String,

    /// Profile tagline.
    #[serde(default)]
    pub tagline: Option<String>,

    /// When the account was created.
    #[serde(default, alias = "createdAt")]
    pub join_date: Option<DateTime<Utc>>,

    /// Global roles.
    #[serde(default)]
    pub roles: Vec<Role>,

    /// Number of projects owned.
    #[serde(default)]
    pub project_count: u64,

    /// Whether the account is locked.
    #[serde(default)]
    pub locked: bool,

    /// Avatar image.
    #[serde(default)]
    pub avatar_url: Option<String>,

    /// Whether the account is an organization.
    #[serde(default)]
    pub is_organization: bool,

    /// Social links keyed by network name.
    #[serde(default)]
    pub socials: BTreeMap<String, String>,
}

/// A role held by a user.
///
/// Some endpoints return full role objects, others only the numeric role ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Role {
    Named {
        #[serde(default)]
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    Id(i64),
}

impl Role {
    /// Display label: the role title or name, or `#<id>`.
    pub fn label(&self) -> String {
        match self {
            Role::Named { title: Some(title), .. } if !title.is_empty() => title.clone(),
            Role::Named { name, .. } => name.clone(),
            Role::Id(id) => format!("#{id}"),
        }
    }
}

/// Join role labels with commas.
pub fn role_labels(roles: &[Role]) -> String {
    roles.iter().map(Role::label).collect::<Vec<_>>().join(", ")
}

/// A user listed as an author (someone with published projects).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default, alias = "createdAt")]
    pub join_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub project_count: u64,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A Hangar staff member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub name: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default, alias = "createdAt")]
    pub join_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub project_count: u64,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A member of a project team.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectMember {
    /// Username of the member.
    pub user: String,
    /// Roles within the project.
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Whether the member accepted the invitation.
    #[serde(default)]
    pub accepted: bool,
}

/// Query parameters for listing users.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserListQuery {
    /// Search string. Omitted when empty.
    #[serde(skip_serializing_if = "is_blank")]
    pub query: Option<String>,
}

/// Either a bare array or a paginated envelope.
///
/// Arrays are tried first: serde would otherwise accept a one-element array
/// as a positional `Page`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Items(Vec<T>),
    Page(Page<T>),
}

impl<T> From<Listing<T>> for Page<T> {
    fn from(listing: Listing<T>) -> Self {
        match listing {
            Listing::Page(page) => page,
            Listing::Items(items) => Page::from_items(items),
        }
    }
}

#[async_trait]
impl Get for User {
    type Id = String; // Username

    #[tracing::instrument(skip(client))]
    async fn get(client: &HangarClient, username: String) -> Result<Self> {
        const OP: &str = "get user";
        let path = format!("users/{}", segment(OP, "username", &username)?);
        client.get_json(OP, &path).await
    }
}

#[async_trait]
impl List for User {
    type Query = UserListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &HangarClient,
        query: &Self::Query,
        opts: ListOptions,
    ) -> Result<Page<Self>> {
        #[derive(Serialize)]
        struct RequestParams<'a> {
            #[serde(flatten)]
            page: PageParams,
            #[serde(flatten)]
            query: &'a UserListQuery,
        }

        let params = RequestParams {
            page: opts.params(),
            query,
        };

        client.get_json_with_query("list users", "users", &params).await
    }
}

#[async_trait]
impl List for Author {
    type Query = ();

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &HangarClient,
        _query: &Self::Query,
        opts: ListOptions,
    ) -> Result<Page<Self>> {
        client
            .get_json_with_query("list authors", "authors", &opts.params())
            .await
    }
}

/// List Hangar staff members.
///
/// The staff endpoint returns a bare array rather than a paginated envelope.
#[tracing::instrument(skip(client))]
pub async fn list_staff(client: &HangarClient) -> Result<Vec<StaffMember>> {
    client.get_json("list staff", "staff").await
}

/// Get the projects a user has starred.
#[tracing::instrument(skip(client))]
pub async fn get_user_starred(
    client: &HangarClient,
    username: &str,
    opts: ListOptions,
) -> Result<Page<Project>> {
    const OP: &str = "get starred projects";
    let path = format!("users/{}/starred", segment(OP, "username", username)?);
    client.get_json_with_query(OP, &path, &opts.params()).await
}

/// Get the projects a user is watching.
#[tracing::instrument(skip(client))]
pub async fn get_user_watching(
    client: &HangarClient,
    username: &str,
    opts: ListOptions,
) -> Result<Page<Project>> {
    const OP: &str = "get watching projects";
    let path = format!("users/{}/watching", segment(OP, "username", username)?);
    client.get_json_with_query(OP, &path, &opts.params()).await
}

/// Get the projects a user has pinned to their profile.
///
/// Accepts both a paginated envelope and a bare array; the latter is
/// returned as a single page covering every item.
#[tracing::instrument(skip(client))]
pub async fn get_user_pinned(client: &HangarClient, username: &str) -> Result<Page<Project>> {
    const OP: &str = "get pinned projects";
    let path = format!("users/{}/pinned", segment(OP, "username", username)?);
    let listing: Listing<Project> = client.get_json(OP, &path).await?;
    Ok(listing.into())
}
