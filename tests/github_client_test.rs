//! Integration tests for the GitHub client against a mock HTTP server.

use gh2tracker::domain::models::{Alert, AlertKind};
use gh2tracker::domain::ports::{AlertSource, SyncError};
use gh2tracker::infrastructure::github::GitHubClient;
use mockito::Server;
use serde_json::json;

fn code_alert_body(number: u64, state: &str) -> serde_json::Value {
    json!({
        "number": number,
        "state": state,
        "html_url": format!("https://github.com/o/r/security/code-scanning/{number}"),
        "rule": {
            "id": "js/sql-injection",
            "name": "SQL injection",
            "description": "Building a query from user input"
        },
        "most_recent_instance": {
            "message": { "text": "This query depends on a user-provided value." }
        }
    })
}

#[tokio::test]
async fn lists_code_scanning_alerts() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/repos/o/r/code-scanning/alerts")
        .match_query(mockito::Matcher::UrlEncoded("per_page".into(), "100".into()))
        .match_header("authorization", "Bearer test-token")
        .match_header("accept", "application/vnd.github+json")
        .with_status(200)
        .with_body(json!([code_alert_body(1, "open"), code_alert_body(2, "fixed")]).to_string())
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url(), "test-token").unwrap();
    let alerts = client.code_scanning_alerts("o/r").await.unwrap();

    mock.assert_async().await;
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].number, 1);
    assert!(alerts[0].open);
    assert_eq!(alerts[0].kind, AlertKind::CodeScanning);
    assert_eq!(alerts[0].short_desc, "Building a query from user input");
    assert_eq!(
        alerts[0].long_desc,
        "This query depends on a user-provided value."
    );
    assert!(!alerts[1].open);
}

#[tokio::test]
async fn missing_scanning_feature_yields_no_alerts() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/repos/o/r/secret-scanning/alerts")
        .match_query(mockito::Matcher::Any)
        .with_status(404)
        .with_body(r#"{"message": "Secret scanning is disabled"}"#)
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url(), "test-token").unwrap();
    let alerts = client.secret_scanning_alerts("o/r").await.unwrap();
    assert!(alerts.is_empty());
}

#[tokio::test]
async fn fetches_single_alert() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/repos/o/r/code-scanning/alerts/7")
        .with_status(200)
        .with_body(code_alert_body(7, "open").to_string())
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url(), "test-token").unwrap();
    let alert = client.get_alert("o/r", 7).await.unwrap();
    assert_eq!(alert.number, 7);
    assert_eq!(alert.repo_id, "o/r");
}

fn fixed_alert() -> Alert {
    Alert {
        repo_id: "o/r".to_string(),
        number: 3,
        kind: AlertKind::CodeScanning,
        open: false,
        short_desc: String::new(),
        long_desc: String::new(),
        hyperlink: String::new(),
    }
}

#[tokio::test]
async fn dismisses_an_open_alert() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PATCH", "/repos/o/r/code-scanning/alerts/3")
        .match_body(mockito::Matcher::PartialJson(json!({"state": "dismissed"})))
        .with_status(200)
        .with_body(code_alert_body(3, "dismissed").to_string())
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url(), "test-token").unwrap();
    client.set_alert_state(&fixed_alert(), false).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn reopening_a_fixed_alert_is_an_illegal_transition() {
    let mut server = Server::new_async().await;
    server
        .mock("PATCH", "/repos/o/r/code-scanning/alerts/3")
        .with_status(422)
        .with_body(r#"{"message": "Alert cannot be reopened"}"#)
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url(), "test-token").unwrap();
    let err = client.set_alert_state(&fixed_alert(), true).await.unwrap_err();
    assert!(matches!(err, SyncError::IllegalStateTransition { .. }));
}

#[tokio::test]
async fn server_errors_are_remote_unavailable() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/repos/o/r/code-scanning/alerts")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url(), "test-token").unwrap();
    let err = client.code_scanning_alerts("o/r").await.unwrap_err();
    assert!(matches!(err, SyncError::RemoteUnavailable(_)));
}
