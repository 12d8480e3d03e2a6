use avdash_client::{sweep_completed, ClientSettings, HttpController};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn controller_for(server: &MockServer) -> HttpController {
    HttpController::new(ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    })
    .expect("controller")
}

const PIPELINE_BODY: &str = r#"{
    "files": {
        "/nas/done.mkv": { "status": "verified" },
        "/nas/busy.mkv": { "status": "encoding" },
        "/nas/waiting.mkv": { "status": "pending" }
    }
}"#;

#[tokio::test]
async fn sweep_removes_completed_entries_and_writes_back_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/control/priority"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{ "paths": ["/nas/done.mkv", "/nas/waiting.mkv", "/nas/unknown.mkv"] }"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/pipeline"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PIPELINE_BODY, "application/json"))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/control/priority"))
        .and(body_json(serde_json::json!({
            "paths": ["/nas/waiting.mkv", "/nas/unknown.mkv"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{ "ok": true, "count": 2 }"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let removed = sweep_completed(&controller_for(&server)).await.unwrap();
    assert_eq!(removed, 1);
}

#[tokio::test]
async fn sweep_of_filtered_list_issues_no_write() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/control/priority"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{ "paths": ["/nas/waiting.mkv", "/nas/unknown.mkv"] }"#,
            "application/json",
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/pipeline"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PIPELINE_BODY, "application/json"))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/control/priority"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let removed = sweep_completed(&controller_for(&server)).await.unwrap();
    assert_eq!(removed, 0);
}

#[tokio::test]
async fn sweep_propagates_read_failures_without_writing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/control/priority"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/control/priority"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    assert!(sweep_completed(&controller_for(&server)).await.is_err());
}
