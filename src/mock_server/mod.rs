//! Mock Hangar API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Hangar API
//! for integration and end-to-end testing. Unlike wiremock which mocks at the
//! HTTP level per-test, this server maintains state across requests, enabling
//! realistic workflow testing such as "list, then get, then resolve a download".
//!
//! # Example
//!
//! ```ignore
//! use hangarapi::mock_server::MockServer;
//! use hangarapi::{ClientConfig, HangarClient, Project, Get};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = HangarClient::new(ClientConfig {
//!         base_url: server.url().to_string(),
//!         ..Default::default()
//!     })
//!     .unwrap();
//!
//!     // Server comes with default fixtures
//!     let project = Project::get(&client, "FancyGlow".to_string()).await.unwrap();
//!     assert_eq!(project.owner(), "Oliver");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{MockState, SharedState};
