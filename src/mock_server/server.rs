//! Mock Hangar API server.
//!
//! Provides an axum-based HTTP server that simulates the Hangar API.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::{MockState, SharedState};

/// A mock Hangar API server for testing.
///
/// The server runs in the background and can be used to test the Hangar
/// client against a realistic API implementation. Routes live at the root,
/// so [`MockServer::url`] is used directly as the client's base URL.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: SharedState,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "mock server stopped");
            }
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL as `ClientConfig::base_url` when testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for project in scenario.projects {
            state = state.with_project(project);
        }
        for (slug, version) in scenario.versions {
            state = state.with_version(&slug, version);
        }
        for user in scenario.users {
            state = state.with_user(user);
        }
        for (slug, member) in scenario.members {
            state = state.with_member(&slug, member);
        }
        for (slug, user) in scenario.stars {
            state = state.with_star(&slug, &user);
        }
        for (slug, user) in scenario.watchers {
            state = state.with_watcher(&slug, &user);
        }
        for (user, slug) in scenario.pins {
            state = state.with_pin(&user, &slug);
        }
        for member in scenario.staff {
            state = state.with_staff(member);
        }
        for author in scenario.authors {
            state = state.with_author(author);
        }
        for (slug, path, contents) in scenario.pages {
            state = state.with_page(&slug, &path, &contents);
        }
        for (slug, date, day) in scenario.project_stats {
            state = state.with_project_stats(&slug, &date, day);
        }
        for (slug, version, date, day) in scenario.version_stats {
            state = state.with_version_stats(&slug, &version, &date, day);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: SharedState) -> Router {
        Router::new()
            // Project routes
            .route("/projects", get(handlers::list_projects))
            .route("/projects/:project", get(handlers::get_project))
            .route("/projects/:project/members", get(handlers::list_members))
            .route("/projects/:project/stargazers", get(handlers::list_stargazers))
            .route("/projects/:project/watchers", get(handlers::list_watchers))
            .route("/projects/:project/stats", get(handlers::project_stats))
            .route("/projects/:project/latest", get(handlers::latest_version))
            .route("/projects/:project/pages/:page", get(handlers::get_page))
            // Version routes
            .route(
                "/projects/:project/versions/:version",
                get(handlers::get_project_version),
            )
            .route(
                "/projects/:project/versions/:version/stats",
                get(handlers::version_stats),
            )
            .route("/projects/:project/:slug/versions", get(handlers::list_versions))
            .route("/versions/:id", get(handlers::get_version))
            .route("/versions/find/:hash", get(handlers::find_version_by_hash))
            // User routes
            .route("/users", get(handlers::list_users))
            .route("/users/:user", get(handlers::get_user))
            .route("/users/:user/starred", get(handlers::user_starred))
            .route("/users/:user/watching", get(handlers::user_watching))
            .route("/users/:user/pinned", get(handlers::user_pinned))
            .route("/authors", get(handlers::list_authors))
            .route("/staff", get(handlers::list_staff))
            .layer(middleware::from_fn_with_state(state.clone(), require_token))
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Reject requests without the configured bearer token.
async fn require_token(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    let required = state.read().await.required_token.clone();

    if let Some(token) = required {
        let expected = format!("Bearer {token}");
        let presented = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        if presented != Some(expected.as_str()) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "message": "Missing or invalid API token" })),
            )
                .into_response();
        }
    }

    next.run(request).await
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientConfig, Get, HangarClient, List, Project};

    fn client_for(server: &MockServer) -> HangarClient {
        HangarClient::new(ClientConfig {
            base_url: server.url().to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        // Server should be accessible
        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_get_project_with_hangar_client() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let project = Project::get(&client, "fancyglow".to_string())
            .await
            .expect("Failed to get project");

        assert_eq!(project.name, "FancyGlow");
        assert_eq!(project.owner(), "Oliver");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_list_projects_with_hangar_client() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let page = Project::list_page(&client, &Default::default(), Default::default())
            .await
            .expect("Failed to list projects");

        assert_eq!(page.pagination.count, 2);
        assert_eq!(page.pagination.limit, 25);
        assert_eq!(page.result[0].name, "FancyGlow");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await;
        let client = client_for(&server);

        let err = Project::get(&client, "nonexistent".to_string())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("404"));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_required_token() {
        let state = MockState::new()
            .with_project(Fixtures::project("Oliver", "FancyGlow", "gameplay"))
            .with_required_token("secret");
        let server = MockServer::with_state(state).await;

        let anonymous = client_for(&server);
        let err = Project::get(&anonymous, "FancyGlow".to_string())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));

        let authed = HangarClient::new(ClientConfig {
            base_url: server.url().to_string(),
            token: Some("secret".to_string()),
            ..Default::default()
        })
        .unwrap();
        let project = Project::get(&authed, "FancyGlow".to_string()).await.unwrap();
        assert_eq!(project.slug(), "FancyGlow");

        server.shutdown().await;
    }
}
