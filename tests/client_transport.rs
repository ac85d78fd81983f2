//! Request/response contract tests: authentication, timeouts, error mapping.

use std::time::Duration;

use hangarapi::{ClientConfig, Get, HangarClient, HangarError, Project};
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn project_body() -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "name": "FancyGlow",
        "namespace": { "owner": "Oliver", "slug": "FancyGlow" }
    })
}

#[tokio::test]
async fn test_bearer_token_sent_when_configured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/FancyGlow"))
        .and(header("authorization", "Bearer secret"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HangarClient::new(ClientConfig {
        base_url: mock_server.uri(),
        token: Some("secret".to_string()),
        ..Default::default()
    })
    .unwrap();

    assert!(client.is_authenticated());
    Project::get(&client, "FancyGlow".to_string()).await.unwrap();
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects/FancyGlow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HangarClient::new(ClientConfig {
        base_url: mock_server.uri(),
        ..Default::default()
    })
    .unwrap();

    assert!(!client.is_authenticated());
    Project::get(&client, "FancyGlow".to_string()).await.unwrap();
}

#[tokio::test]
async fn test_user_agent_names_the_library() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/FancyGlow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_body()))
        .mount(&mock_server)
        .await;

    let client = HangarClient::new(ClientConfig {
        base_url: mock_server.uri(),
        ..Default::default()
    })
    .unwrap();
    Project::get(&client, "FancyGlow".to_string()).await.unwrap();

    let requests: Vec<Request> = mock_server.received_requests().await.unwrap();
    let agent = requests[0].headers.get("user-agent").unwrap().to_str().unwrap();
    assert!(agent.starts_with("hangarapi/"));
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/FancyGlow"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HangarClient::new(ClientConfig {
        base_url: mock_server.uri(),
        ..Default::default()
    })
    .unwrap();
    let err = Project::get(&client, "FancyGlow".to_string())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(!err.is_not_found());
    assert!(err.to_string().contains("internal error"));
    assert_eq!(err.api_message(), None);
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/FancyGlow"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string("{not json"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HangarClient::new(ClientConfig {
        base_url: mock_server.uri(),
        ..Default::default()
    })
    .unwrap();
    let err = Project::get(&client, "FancyGlow".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, HangarError::Decode { operation: "get project", .. }));
}

#[tokio::test]
async fn test_transport_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/FancyGlow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(project_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = HangarClient::new(ClientConfig {
        base_url: mock_server.uri(),
        timeout: Duration::from_millis(200),
        ..Default::default()
    })
    .unwrap();
    let err = Project::get(&client, "FancyGlow".to_string())
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(err.operation(), Some("get project"));
}

#[tokio::test]
async fn test_caller_deadline_cancels_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/FancyGlow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(project_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = HangarClient::new(ClientConfig {
        base_url: mock_server.uri(),
        ..Default::default()
    })
    .unwrap();

    let result = tokio::time::timeout(
        Duration::from_millis(100),
        Project::get(&client, "FancyGlow".to_string()),
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_injected_transport_is_used() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/FancyGlow"))
        .and(header("x-injected", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert("x-injected", reqwest::header::HeaderValue::from_static("yes"));
    let http = reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .unwrap();

    let client = HangarClient::new(ClientConfig {
        base_url: mock_server.uri(),
        http: Some(http),
        ..Default::default()
    })
    .unwrap();

    let project = Project::get(&client, "FancyGlow".to_string()).await.unwrap();
    assert_eq!(project.owner(), "Oliver");
}

#[tokio::test]
async fn test_concurrent_calls_share_client() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/FancyGlow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_body()))
        .expect(8)
        .mount(&mock_server)
        .await;

    let client = HangarClient::new(ClientConfig {
        base_url: mock_server.uri(),
        ..Default::default()
    })
    .unwrap();

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { Project::get(&client, "FancyGlow".to_string()).await })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap().name, "FancyGlow");
    }
}
