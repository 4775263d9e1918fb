#![allow(clippy::unwrap_used)]
// Integration tests for the project endpoints using wiremock.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use productsup_api::{Credentials, Error, PlatformClient, Project};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, PlatformClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let credentials = Credentials::new("1234", "simsalabim".to_string().into());
    let client =
        PlatformClient::with_client(reqwest::Client::new(), base_url, &credentials).unwrap();
    (server, client)
}

// ── Listing & fetching ──────────────────────────────────────────────

#[tokio::test]
async fn list_projects_renames_id_and_preserves_order() {
    let (server, client) = setup().await;

    let body = json!({
        "success": true,
        "Projects": [
            { "id": 7, "name": "Retail", "created_at": "2023-04-01 09:30:00", "links": [] },
            { "id": 3, "name": "Wholesale", "created_at": "2023-04-02", "links": [] },
        ]
    });

    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let projects = client.list_projects().await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].project_id, 7);
    assert_eq!(projects[0].name, "Retail");
    assert_eq!(
        projects[0].created_at,
        NaiveDate::from_ymd_opt(2023, 4, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    );
    // Date-only timestamps land at midnight.
    assert_eq!(projects[1].project_id, 3);
    assert_eq!(
        projects[1].created_at,
        NaiveDate::from_ymd_opt(2023, 4, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    );
}

#[tokio::test]
async fn get_project_returns_the_single_record() {
    let (server, client) = setup().await;

    let body = json!({
        "success": true,
        "Projects": [
            { "id": 7, "name": "Retail", "created_at": "2023-04-01 09:30:00", "links": [] },
        ]
    });

    Mock::given(method("GET"))
        .and(path("/projects/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let project = client.get_project(7).await.unwrap();

    assert_eq!(project.project_id, 7);
    assert_eq!(project.name, "Retail");
}

#[tokio::test]
async fn get_project_with_empty_payload_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/projects/42"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "Projects": [] })),
        )
        .mount(&server)
        .await;

    let result = client.get_project(42).await;

    assert!(
        matches!(result, Err(Error::ProjectNotFound { project_id: 42 })),
        "expected ProjectNotFound, got: {result:?}"
    );
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn create_project_posts_the_name_and_returns_the_record() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/projects"))
        .and(body_json(json!({ "name": "Shoes" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "Projects": [
                { "id": 12, "name": "Shoes", "created_at": "2023-06-01 08:00:00", "links": [] },
            ]
        })))
        .mount(&server)
        .await;

    let project = client.create_project("Shoes").await.unwrap();

    assert_eq!(project.project_id, 12);
    assert_eq!(project.name, "Shoes");
}

#[tokio::test]
async fn update_project_puts_the_new_name() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/projects/12"))
        .and(body_json(json!({ "name": "Boots" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "Projects": [
                { "id": 12, "name": "Boots", "created_at": "2023-06-01 08:00:00", "links": [] },
            ]
        })))
        .mount(&server)
        .await;

    let project = client.update_project(12, "Boots").await.unwrap();

    assert_eq!(project.project_id, 12);
    assert_eq!(project.name, "Boots");
}

#[tokio::test]
async fn delete_project_succeeds_on_success_true() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/projects/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    client.delete_project(12).await.unwrap();
}

#[tokio::test]
async fn delete_project_fails_on_success_false() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/projects/12"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "error": "project has sites" })),
        )
        .mount(&server)
        .await;

    let result = client.delete_project(12).await;

    match result {
        Err(Error::Platform { ref message }) => assert_eq!(message, "project has sites"),
        other => panic!("expected Platform error, got: {other:?}"),
    }
}

// ── Serde round-trip ────────────────────────────────────────────────

#[test]
fn project_identity_round_trips_through_the_id_rename() {
    let project: Project = serde_json::from_value(json!({
        "id": 7,
        "name": "Retail",
        "created_at": "2023-04-01 09:30:00",
        "links": []
    }))
    .unwrap();

    assert_eq!(project.project_id, 7);

    let value = serde_json::to_value(&project).unwrap();
    assert_eq!(value["id"], json!(7));
    assert!(value.get("project_id").is_none());
}
