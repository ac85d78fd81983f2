//! Project endpoint tests.
//!
//! Uses wiremock to mock the Hangar API and exercise the request contract.

use hangarapi::{
    get_project_main_page, get_project_members, get_project_page, get_project_stargazers,
    get_project_stats, get_project_watchers, ClientConfig, Get, HangarClient, HangarError, List,
    ListOptions, Project, ProjectListQuery, StatsRange,
};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fixture(name: &str) -> serde_json::Value {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn client_for(server: &MockServer) -> HangarClient {
    HangarClient::new(ClientConfig {
        base_url: server.uri(),
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_get_project_decodes_fixture() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/fancyglow"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("project_response.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let project = Project::get(&client, "fancyglow".to_string()).await.unwrap();

    assert_eq!(project.id, 1950);
    assert_eq!(project.name, "FancyGlow");
    assert_eq!(project.slug(), "fancyglow");
    assert_eq!(project.owner(), "Oliver");
    assert_eq!(project.category, "gameplay");
    assert_eq!(project.stats.views, 3618);
    assert_eq!(project.license_label(), "MIT");
    assert_eq!(project.settings.links[0].links.len(), 2);
    assert!(project.created_at.is_some());
}

#[tokio::test]
async fn test_get_project_under_base_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/projects/fancyglow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("project_response.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HangarClient::new(ClientConfig {
        base_url: format!("{}/api/v1", mock_server.uri()),
        ..Default::default()
    })
    .unwrap();

    let project = Project::get(&client, "fancyglow".to_string()).await.unwrap();
    assert_eq!(project.id, 1950);
}

#[tokio::test]
async fn test_get_project_escapes_reserved_characters_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/my%20plugin%2Bextra%2Fpart%3Fq%23f"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("project_response.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let project = Project::get(&client, "my plugin+extra/part?q#f".to_string())
        .await
        .unwrap();

    assert_eq!(project.name, "FancyGlow");
}

#[tokio::test]
async fn test_get_project_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "error": "project not found" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = Project::get(&client, "missing".to_string()).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.operation(), Some("get project"));
    assert_eq!(err.api_message().as_deref(), Some("project not found"));
    assert!(err.to_string().contains("404"));
    assert!(err.to_string().contains("project not found"));
}

#[tokio::test]
async fn test_empty_slug_rejected_before_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let err = Project::get(&client, String::new()).await.unwrap_err();
    assert!(matches!(err, HangarError::InvalidArgument { .. }));

    let err = get_project_members(&client, "..", ListOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, HangarError::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_list_projects_preserves_pagination() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("limit", "25"))
        .and(query_param("offset", "0"))
        .and(query_param_is_missing("category"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(fixture("projects_list_response.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    // A zero limit falls back to the API default
    let page = Project::list_page(&client, &Default::default(), ListOptions::new(0, 0))
        .await
        .unwrap();

    assert_eq!(page.pagination.count, 2426);
    assert_eq!(page.pagination.limit, 25);
    assert_eq!(page.pagination.offset, 0);
    assert_eq!(page.result.len(), 1);
    assert_eq!(page.result[0].name, "FancyGlow");
    assert!(page.has_more());
}

#[tokio::test]
async fn test_list_projects_with_category() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "30"))
        .and(query_param("category", "admin_tools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "pagination": { "count": 31, "limit": 10, "offset": 30 },
            "result": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let query = ProjectListQuery {
        category: Some("admin_tools".to_string()),
    };
    let page = Project::list_page(&client, &query, ListOptions::new(10, 30))
        .await
        .unwrap();

    assert!(page.is_empty());
    assert_eq!(page.pagination.count, 31);
    assert!(!page.has_more());
}

#[tokio::test]
async fn test_list_all_walks_offsets() {
    let mock_server = MockServer::start().await;

    let project = |id: i64, slug: &str| {
        serde_json::json!({
            "id": id,
            "name": slug,
            "namespace": { "owner": "Oliver", "slug": slug }
        })
    };

    let first: Vec<_> = (0..25).map(|i| project(i, &format!("p{i}"))).collect();
    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "pagination": { "count": 27, "limit": 25, "offset": 0 },
            "result": first
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("offset", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "pagination": { "count": 27, "limit": 25, "offset": 25 },
            "result": [project(25, "p25"), project(26, "p26")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let all = Project::list_all(&client, &Default::default()).await.unwrap();

    assert_eq!(all.len(), 27);
    assert_eq!(all[26].slug(), "p26");
}

#[tokio::test]
async fn test_project_members_and_audiences() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/fancyglow/members"))
        .and(query_param("limit", "25"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "pagination": { "count": 1, "limit": 25, "offset": 0 },
            "result": [{
                "user": "Oliver",
                "roles": [{ "name": "Project_Owner", "title": "Owner", "color": "#5EA9F1" }],
                "accepted": true
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let users = serde_json::json!({
        "pagination": { "count": 1, "limit": 5, "offset": 0 },
        "result": [{ "name": "jmp", "projectCount": 2, "roles": [] }]
    });

    for listing in ["stargazers", "watchers"] {
        Mock::given(method("GET"))
            .and(path(format!("/projects/fancyglow/{listing}")))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&users))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = client_for(&mock_server);

    let members = get_project_members(&client, "fancyglow", ListOptions::default())
        .await
        .unwrap();
    assert_eq!(members.result[0].user, "Oliver");
    assert!(members.result[0].accepted);
    assert_eq!(members.result[0].roles[0].label(), "Owner");

    let stargazers = get_project_stargazers(&client, "fancyglow", ListOptions::new(5, 0))
        .await
        .unwrap();
    assert_eq!(stargazers.result[0].name, "jmp");

    let watchers = get_project_watchers(&client, "fancyglow", ListOptions::new(5, 0))
        .await
        .unwrap();
    assert_eq!(watchers.pagination.count, 1);
}

#[tokio::test]
async fn test_project_stats_with_range() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/fancyglow/stats"))
        .and(query_param("fromDate", "2024-01-01"))
        .and(query_param("toDate", "2024-01-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "2024-01-03": { "downloads": 7, "views": 20 },
            "2024-01-01": { "downloads": 3, "views": 10 }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let range = StatsRange::new(Some("2024-01-01".into()), Some("2024-01-31".into()));
    let stats = get_project_stats(&client, "fancyglow", &range).await.unwrap();

    let dates: Vec<&str> = stats.keys().map(String::as_str).collect();
    assert_eq!(dates, vec!["2024-01-01", "2024-01-03"]);
    assert_eq!(hangarapi::totals(&stats).downloads, 10);
}

#[tokio::test]
async fn test_project_stats_without_range_sends_no_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/fancyglow/stats"))
        .and(query_param_is_missing("fromDate"))
        .and(query_param_is_missing("toDate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let stats = get_project_stats(&client, "fancyglow", &StatsRange::default())
        .await
        .unwrap();

    assert!(stats.is_empty());
}

#[tokio::test]
async fn test_project_page_raw_markdown() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/fancyglow/pages/home"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/plain")
                .set_body_string("# FancyGlow\n\nMakes players glow."),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let page = get_project_page(&client, "fancyglow", "").await.unwrap();
    assert_eq!(page.slug, "home");
    assert!(page.contents.starts_with("# FancyGlow"));

    let readme = get_project_main_page(&client, "fancyglow").await.unwrap();
    assert_eq!(readme.contents, page.contents);
}

#[tokio::test]
async fn test_project_page_json_and_nested_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/fancyglow/pages/wiki%2Fsetup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 12,
            "name": "Setup",
            "slug": "wiki/setup",
            "contents": "Drop the jar into plugins/."
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = get_project_page(&client, "fancyglow", "wiki/setup").await.unwrap();

    assert_eq!(page.id, 12);
    assert_eq!(page.name, "Setup");
    assert_eq!(page.contents, "Drop the jar into plugins/.");
}
