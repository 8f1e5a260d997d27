mod common;

use std::sync::Arc;

use logwatch_lib::auth::AuthService;
use logwatch_lib::client::ApiClient;
use logwatch_lib::credentials::Credentials;
use logwatch_lib::error::{ApiError, LoginError};
use logwatch_lib::store::MemoryStore;
use logwatch_lib::types::alert::AlertFilter;
use logwatch_lib::types::analysis::AnalysisFilter;
use logwatch_lib::types::page::PageRequest;
use logwatch_lib::types::severity::Severity;
use reqwest::StatusCode;
use serde_json::json;

async fn client() -> (ApiClient, Arc<common::MockBackend>) {
    let (base, mock) = common::spawn().await;
    (ApiClient::new(&base, Credentials::new()).unwrap(), mock)
}

#[tokio::test]
async fn login_returns_all_fields() {
    let (client, mock) = client().await;
    mock.json(
        "POST",
        "/auth/login",
        200,
        json!({"username": "u", "role": "ADMIN", "token": "T", "type": "Bearer"}),
    );

    let resp = client.login("u", "p").await.unwrap();
    assert_eq!(resp.username, "u");
    assert_eq!(resp.role, "ADMIN");
    assert_eq!(resp.token, "T");
    assert_eq!(resp.token_type, "Bearer");

    let seen = mock.last();
    let body: serde_json::Value = serde_json::from_str(&seen.body).unwrap();
    assert_eq!(body, json!({"username": "u", "password": "p"}));
}

#[tokio::test]
async fn login_never_sends_authorization() {
    let (client, mock) = client().await;
    mock.json(
        "POST",
        "/auth/login",
        200,
        json!({"username": "u", "role": "USER", "token": "NEW", "type": "Bearer"}),
    );
    client.credentials().set("OLD");

    client.login("u", "p").await.unwrap();
    assert_eq!(mock.last().authorization, None);
}

#[tokio::test]
async fn login_rejected_is_unauthorized() {
    let (client, mock) = client().await;
    mock.text("POST", "/auth/login", 401, "Bad credentials");

    let err = client.login("u", "wrong").await.unwrap_err();
    assert!(err.is_unauthorized(), "got {err:?}");
}

#[tokio::test]
async fn non_success_statuses_are_errors() {
    let (client, mock) = client().await;
    mock.text("GET", "/api/logs", 500, "boom");
    mock.text("GET", "/health", 503, "down");
    mock.text("GET", "/api/alerts", 500, "boom");

    match client.get_logs().await.unwrap_err() {
        ApiError::Status { status, body } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(matches!(
        client.get_health().await.unwrap_err(),
        ApiError::Status { status, .. } if status == StatusCode::SERVICE_UNAVAILABLE
    ));
    assert!(matches!(
        client.get_alerts().await.unwrap_err(),
        ApiError::Status { .. }
    ));
    // Unrouted paths answer 404.
    assert!(client.get_log_by_id("missing").await.unwrap_err().is_not_found());
    assert!(client.get_daily_report("2025-01-10").await.unwrap_err().is_not_found());
    assert!(client.get_analysis_by_id("missing").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn forbidden_is_unauthorized() {
    let (client, mock) = client().await;
    mock.text("GET", "/api/logs", 403, "");
    assert!(client.get_logs().await.unwrap_err().is_unauthorized());
}

#[tokio::test]
async fn transport_failure_is_reported() {
    let base = common::dead_base().await;
    let client = ApiClient::new(&base, Credentials::new()).unwrap();
    assert!(matches!(
        client.get_health().await.unwrap_err(),
        ApiError::Transport(_)
    ));
}

#[tokio::test]
async fn malformed_json_is_decode_error() {
    let (client, mock) = client().await;
    mock.text("GET", "/api/logs", 200, "<html>not json</html>");
    assert!(matches!(
        client.get_logs().await.unwrap_err(),
        ApiError::Decode { .. }
    ));
}

#[tokio::test]
async fn bearer_header_follows_token() {
    let (base, mock) = common::spawn().await;
    mock.text("GET", "/health", 200, "OK");

    let client = ApiClient::new(&base, Credentials::new()).unwrap();
    let auth = AuthService::new(Arc::new(MemoryStore::new()), client.credentials().clone());

    client.get_health().await.unwrap();
    assert_eq!(mock.last().authorization, None);

    auth.set_token("T").unwrap();
    client.get_health().await.unwrap();
    assert_eq!(mock.last().authorization.as_deref(), Some("Bearer T"));

    auth.set_token("").unwrap();
    client.get_health().await.unwrap();
    assert_eq!(mock.last().authorization, None);
}

#[tokio::test]
async fn auth_login_persists_and_applies_token() {
    let (base, mock) = common::spawn().await;
    mock.json(
        "POST",
        "/auth/login",
        200,
        json!({"username": "ops", "role": "ADMIN", "token": "jwt-1", "type": "Bearer"}),
    );
    mock.json("GET", "/api/logs", 200, json!([]));

    let client = ApiClient::new(&base, Credentials::new()).unwrap();
    let auth = AuthService::new(Arc::new(MemoryStore::new()), client.credentials().clone());

    auth.login(&client, "ops", "secret").await.unwrap();
    assert_eq!(auth.get_token().unwrap().as_deref(), Some("jwt-1"));

    client.get_logs().await.unwrap();
    assert_eq!(mock.last().authorization.as_deref(), Some("Bearer jwt-1"));
}

#[tokio::test]
async fn failed_login_keeps_existing_session() {
    let (base, mock) = common::spawn().await;
    mock.text("POST", "/auth/login", 401, "");

    let client = ApiClient::new(&base, Credentials::new()).unwrap();
    let auth = AuthService::new(Arc::new(MemoryStore::new()), client.credentials().clone());
    auth.set_token("existing").unwrap();

    assert!(auth.login(&client, "u", "bad").await.is_err());
    assert_eq!(auth.get_token().unwrap().as_deref(), Some("existing"));
}

#[tokio::test]
async fn login_without_token_keeps_existing_session() {
    let (base, mock) = common::spawn().await;
    mock.json(
        "POST",
        "/auth/login",
        200,
        json!({"username": "u", "role": null, "token": "", "type": "Bearer"}),
    );

    let client = ApiClient::new(&base, Credentials::new()).unwrap();
    let auth = AuthService::new(Arc::new(MemoryStore::new()), client.credentials().clone());
    auth.set_token("existing").unwrap();

    assert!(matches!(
        auth.login(&client, "u", "p").await,
        Err(LoginError::MissingToken)
    ));
    assert_eq!(auth.get_token().unwrap().as_deref(), Some("existing"));
    assert_eq!(client.credentials().authorization().as_deref(), Some("Bearer existing"));
}

#[tokio::test]
async fn login_tolerates_partial_response() {
    let (client, mock) = client().await;
    mock.json("POST", "/auth/login", 200, json!({"token": "T", "role": null}));

    let resp = client.login("u", "p").await.unwrap();
    assert_eq!(resp.token, "T");
    assert_eq!(resp.role, "");
    assert_eq!(resp.username, "");
}

#[tokio::test]
async fn health_returns_raw_text() {
    let (client, mock) = client().await;
    mock.text("GET", "/health", 200, "OK");
    assert_eq!(client.get_health().await.unwrap(), "OK");
}

#[tokio::test]
async fn logs_list_and_single() {
    let (client, mock) = client().await;
    mock.json(
        "GET",
        "/api/logs",
        200,
        json!([{"id": "l1", "level": "WARN"}, {"id": "l2", "hasAnomaly": true}]),
    );
    mock.json("GET", "/api/logs/l1", 200, json!({"id": "l1", "rawText": "slow query"}));

    let logs = client.get_logs().await.unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[1].has_anomaly, Some(true));

    let one = client.get_log_by_id("l1").await.unwrap();
    assert_eq!(one.raw_text.as_deref(), Some("slow query"));
}

#[tokio::test]
async fn analysis_query_contains_only_set_filters() {
    let (client, mock) = client().await;
    mock.json("GET", "/api/analysis", 200, json!([{"id": "an1", "severity": "HIGH"}]));

    let filter = AnalysisFilter {
        severity: Some(Severity::High),
        ..Default::default()
    };
    let entries = client.get_analysis(&filter).await.unwrap();
    assert_eq!(entries[0].severity, Some(Severity::High));
    assert_eq!(mock.last().query.as_deref(), Some("severity=HIGH"));
}

#[tokio::test]
async fn analysis_without_filters_has_no_query() {
    let (client, mock) = client().await;
    mock.json("GET", "/api/analysis", 200, json!([]));

    let entries = client.get_analysis(&AnalysisFilter::default()).await.unwrap();
    assert!(entries.is_empty());
    let seen = mock.last();
    assert_eq!(seen.path, "/api/analysis");
    assert_eq!(seen.query, None);
}

#[tokio::test]
async fn analysis_filter_values_are_encoded() {
    let (client, mock) = client().await;
    mock.json("GET", "/api/analysis", 200, json!([]));

    let filter = AnalysisFilter {
        category: Some("disk & io".to_string()),
        ..Default::default()
    };
    client.get_analysis(&filter).await.unwrap();
    let query = mock.last().query.unwrap();
    assert!(query.starts_with("category=disk"));
    assert!(!query.contains(" & "));
}

#[tokio::test]
async fn analysis_by_id_encodes_path() {
    let (client, mock) = client().await;
    mock.json("GET", "/api/analysis/a%20b", 200, json!({"id": "a b", "anomalyScore": 0.9}));

    let entry = client.get_analysis_by_id("a b").await.unwrap();
    assert_eq!(entry.anomaly_score, Some(0.9));
    assert_eq!(mock.last().path, "/api/analysis/a%20b");
}

#[tokio::test]
async fn daily_report_keeps_extra_fields() {
    let (client, mock) = client().await;
    mock.json(
        "GET",
        "/api/report/daily",
        200,
        json!({
            "period": {"from": "2025-01-10T00:00:00Z", "to": "2025-01-11T00:00:00Z"},
            "summary": {"totalLogs": 1, "totalAlerts": 0, "totalAnalysis": 0, "logsPerSource": {"s": 1}},
            "logs": [{"id": "l1"}],
            "alerts": [],
            "analysis": [],
            "topIssues": [],
            "schemaVersion": 2
        }),
    );

    let report = client.get_daily_report("2025-01-10").await.unwrap();
    assert_eq!(mock.last().query.as_deref(), Some("date=2025-01-10&format=json"));
    assert_eq!(report.logs.len(), 1);
    assert_eq!(report.summary.unwrap().logs_per_source["s"], 1);
    assert_eq!(report.extra["schemaVersion"], 2);
}

#[tokio::test]
async fn daily_report_csv_is_text() {
    let (client, mock) = client().await;
    mock.text("GET", "/api/report/daily", 200, "section,key,value\nsummary,totalLogs,1\n");

    let csv = client.get_daily_report_csv("2025-01-10").await.unwrap();
    assert!(csv.starts_with("section,"));
    assert_eq!(mock.last().query.as_deref(), Some("date=2025-01-10&format=csv"));
}

#[tokio::test]
async fn alerts_page_sends_pageable() {
    let (client, mock) = client().await;
    mock.json(
        "GET",
        "/api/alerts/page",
        200,
        json!({
            "totalPages": 1, "totalElements": 1, "size": 5, "number": 0,
            "numberOfElements": 1, "first": true, "last": true,
            "content": [{"id": "a1", "severity": "CRITICAL", "ruleNames": ["r1"]}]
        }),
    );

    let filter = AlertFilter {
        severity: Some(Severity::Critical),
        ..Default::default()
    };
    let page = client
        .get_alerts_page(&filter, &PageRequest::new(0, 5).sorted_by("createdAt,desc"))
        .await
        .unwrap();
    assert_eq!(page.content[0].rule_names, vec!["r1"]);
    assert!(!page.has_next());
    assert_eq!(
        mock.last().query.as_deref(),
        Some("severity=CRITICAL&page=0&size=5&sort=createdAt%2Cdesc")
    );
}

#[tokio::test]
async fn alert_by_id() {
    let (client, mock) = client().await;
    mock.json("GET", "/api/alerts/a1", 200, json!({"id": "a1", "active": false}));
    let alert = client.get_alert_by_id("a1").await.unwrap();
    assert_eq!(alert.active, Some(false));
}

#[tokio::test]
async fn base_url_prefix_is_kept() {
    let (base, mock) = common::spawn().await;
    mock.text("GET", "/logwatch/health", 200, "OK");
    let client = ApiClient::new(&format!("{}logwatch", base), Credentials::new()).unwrap();
    assert_eq!(client.get_health().await.unwrap(), "OK");
}
