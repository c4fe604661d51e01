use std::time::Duration;

use edtrellis_core::{parse_query_string, QueryParams, UserRole};
use edtrellis_engine::{ApiSettings, FailureKind, JobsQueryApi, ReqwestApi, SessionApi};
use pretty_assertions::assert_eq;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestApi {
    ReqwestApi::new(ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    })
    .expect("api client")
}

const TWO_JOBS: &str = r#"{
    "success": true,
    "jobs": [
        {"_id": "j1", "title": "Frontend Developer", "company": "Trellis", "location": "Remote", "category": "Technology", "type": "Remote"},
        {"_id": "j2", "title": "Backend Developer", "company": "Trellis", "location": "Remote", "category": "Technology", "type": "Full-time"}
    ]
}"#;

#[tokio::test]
async fn sends_only_applied_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs"))
        .and(query_param("search", "developer"))
        .and(query_param("location", "Remote"))
        .and(query_param_is_missing("category"))
        .and(query_param_is_missing("type"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(TWO_JOBS, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let params = parse_query_string("search=developer&location=Remote");
    let jobs = api.query_jobs(&params).await.expect("jobs");

    let titles: Vec<_> = jobs.iter().map(|job| job.title.as_str()).collect();
    assert_eq!(titles, vec!["Frontend Developer", "Backend Developer"]);
    assert_eq!(jobs[0].id, "j1");
    assert_eq!(jobs[1].job_type, "Full-time");
}

#[tokio::test]
async fn accepts_data_alias_for_job_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"success": true, "data": [{"id": 7, "title": "Tutor"}]}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let jobs = api_for(&server)
        .query_jobs(&QueryParams::new())
        .await
        .expect("jobs");
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, "7");
}

#[tokio::test]
async fn success_false_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"success": false, "message": "Server error"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .query_jobs(&QueryParams::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Rejected);
    assert_eq!(err.message, "Server error");
}

#[tokio::test]
async fn unexpected_shape_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .query_jobs(&QueryParams::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Malformed);
}

#[tokio::test]
async fn http_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .query_jobs(&QueryParams::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let api = ReqwestApi::new(ApiSettings {
        // Port 9 (discard) on localhost is closed in test environments.
        base_url: "http://127.0.0.1:9".to_string(),
        connect_timeout: Duration::from_millis(500),
        ..ApiSettings::default()
    })
    .unwrap();

    let err = api.query_jobs(&QueryParams::new()).await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::Network | FailureKind::Timeout));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw(TWO_JOBS, "application/json"),
        )
        .mount(&server)
        .await;

    let api = ReqwestApi::new(ApiSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::default()
    })
    .unwrap();

    let err = api.query_jobs(&QueryParams::new()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(TWO_JOBS, "application/json"))
        .mount(&server)
        .await;

    let api = ReqwestApi::new(ApiSettings {
        base_url: server.uri(),
        max_bytes: 16,
        ..ApiSettings::default()
    })
    .unwrap();

    let err = api.query_jobs(&QueryParams::new()).await.unwrap_err();
    assert!(matches!(
        err.kind,
        FailureKind::TooLarge { max_bytes: 16, .. }
    ));
}

#[tokio::test]
async fn session_user_is_read_with_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("cookie", "token=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"success": true, "user": {"_id": "u1", "name": "Ada", "email": "ada@school.edu", "role": "candidate"}}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let api = ReqwestApi::new(ApiSettings {
        base_url: server.uri(),
        session_cookie: Some("token=abc123".to_string()),
        ..ApiSettings::default()
    })
    .unwrap();

    let user = api.current_user().await.expect("session").expect("user");
    assert_eq!(user.id, "u1");
    assert_eq!(user.role, UserRole::Candidate);
}

#[tokio::test]
async fn unauthorized_session_is_anonymous() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let user = api_for(&server).current_user().await.expect("session");
    assert_eq!(user, None);
}
