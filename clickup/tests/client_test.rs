//! HTTP-level tests for the ClickUp client against a mock server.

use clickup::{ClickUpClient, ClickUpError, ClientSettings, TEAM_ENV, TOKEN_ENV};
use clickup::Method;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "pk_test_token";
const TEAM: &str = "9001";

fn client_for(server: &MockServer) -> ClickUpClient {
    ClickUpClient::new(
        ClientSettings::new(server.uri())
            .with_token(TOKEN)
            .with_team_id(TEAM),
    )
}

#[tokio::test]
async fn missing_token_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ClickUpClient::new(ClientSettings::new(server.uri()).with_team_id(TEAM));

    let err = client.current_time_entry().await.unwrap_err();
    assert!(matches!(err, ClickUpError::Config(ref name) if name == TOKEN_ENV));

    let err = client.stop_timer().await.unwrap_err();
    assert!(matches!(err, ClickUpError::Config(_)));
}

#[tokio::test]
async fn missing_team_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ClickUpClient::new(ClientSettings::new(server.uri()).with_token(TOKEN));

    let err = client.time_entries(0, 1).await.unwrap_err();
    assert!(matches!(err, ClickUpError::Config(ref name) if name == TEAM_ENV));
}

#[tokio::test]
async fn sends_raw_token_and_accept_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/team/9001/time_entries/current"))
        .and(header("Authorization", TOKEN))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": "123",
                "task": { "id": "abc", "name": "Review" },
                "start": "1700000000000",
                "duration": -5000
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let entry = client_for(&server)
        .current_time_entry()
        .await
        .unwrap()
        .expect("running entry");

    assert_eq!(entry.id.as_deref(), Some("123"));
    assert_eq!(entry.task_id(), Some("abc"));
    assert_eq!(entry.duration.as_millis(), -5000);
}

#[tokio::test]
async fn current_without_id_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/team/9001/time_entries/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .mount(&server)
        .await;

    let entry = client_for(&server).current_time_entry().await.unwrap();
    assert!(entry.is_none());
}

#[tokio::test]
async fn current_with_empty_id_is_running() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/team/9001/time_entries/current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "id": "" } })))
        .mount(&server)
        .await;

    let entry = client_for(&server).current_time_entry().await.unwrap();
    assert_eq!(entry.unwrap().id.as_deref(), Some(""));
}

#[tokio::test]
async fn team_id_is_encoded_as_one_segment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/team/90%2F01/time_entries/stop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "id": "1" } })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ClickUpClient::new(
        ClientSettings::new(server.uri())
            .with_token(TOKEN)
            .with_team_id("90/01"),
    );
    client.stop_timer().await.unwrap();
}

#[tokio::test]
async fn time_entries_passes_millisecond_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/team/9001/time_entries"))
        .and(query_param("start_date", "1000"))
        .and(query_param("end_date", "2000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": "1", "start": 1500, "end": "1600", "duration": "100" },
                "not an entry",
                { "id": "2", "start": "1200", "end": 1300, "duration": 100 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let entries = client_for(&server).time_entries(1000, 2000).await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].start.as_millis(), 1500);
    assert_eq!(entries[1].end.as_millis(), 1300);
}

#[tokio::test]
async fn start_sends_tid_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/team/9001/time_entries/start"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({ "tid": "abc" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": "55", "task": { "id": "abc", "name": "Review" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let started = client_for(&server).start_timer("abc").await.unwrap();
    assert_eq!(started.and_then(|e| e.task_name().map(str::to_string)), Some("Review".into()));
}

#[tokio::test]
async fn empty_success_body_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/team/9001/time_entries/stop"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/team/9001/time_entries/77"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.stop_timer().await.unwrap().is_none());
    client.delete_time_entry("77").await.unwrap();
}

#[tokio::test]
async fn malformed_success_body_degrades_to_null() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/team/9001/time_entries/current"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let raw = client
        .call(Method::GET, "/team/9001/time_entries/current", None)
        .await
        .unwrap();
    assert_eq!(raw, Value::Null);
    assert!(client.current_time_entry().await.unwrap().is_none());
}

#[tokio::test]
async fn non_success_with_json_body_is_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/team/9001/time_entries/stop"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "err": "Token invalid", "ECODE": "OAUTH_025" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).stop_timer().await.unwrap_err();
    match err {
        ClickUpError::Remote {
            status,
            method,
            path,
            message,
        } => {
            assert_eq!(status, 401);
            assert_eq!(method, "POST");
            assert_eq!(path, "/team/9001/time_entries/stop");
            let parsed: Value = serde_json::from_str(&message).unwrap();
            assert_eq!(parsed["err"], "Token invalid");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_success_with_text_body_keeps_raw_text() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/team/9001/time_entries/5"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server).delete_time_entry("5").await.unwrap_err();
    assert!(matches!(
        err,
        ClickUpError::Remote { status: 502, ref message, .. } if message == "Bad Gateway"
    ));
}
