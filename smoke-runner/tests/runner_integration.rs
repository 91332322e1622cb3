use serde_json::json;
use smoke_config::{AuthConfig, EnvironmentsConfig};
use smoke_http::HttpManager;
use smoke_runner::{builtin_suites, find_suite, CheckOutcome, RunError, RunPlan, RunnerSettings, SmokeRunner, Suite};
use std::io::Write;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One mock server standing in for both the auth and the probed service
fn environments(server: &MockServer, service: &str) -> EnvironmentsConfig {
    let mut environments = EnvironmentsConfig::default();
    environments.set_service_url("mock", "auth", server.uri());
    environments.set_service_url("mock", service, server.uri());
    environments
}

fn runner() -> SmokeRunner<HttpManager> {
    let settings = RunnerSettings {
        sleep_between: Duration::ZERO,
        ..RunnerSettings::default()
    };
    SmokeRunner::new(HttpManager::new().unwrap(), settings)
}

async fn mount_token(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/v1/token"))
        .and(body_string_contains("grant_type=password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "token_type": "Bearer",
            "expires_in": 7200
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_builtin_equipment_suite_passes_against_healthy_service() {
    let server = MockServer::start().await;
    mount_token(&server, "integration-token").await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/api/v1/"))
        .and(header("authorization", "Bearer integration-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(9)
        .mount(&server)
        .await;

    let suites = builtin_suites().unwrap();
    let equipment = find_suite(&suites, "equipment").unwrap().clone();
    let plan = RunPlan::new("mock", vec![equipment]);

    let report = runner()
        .run(&environments(&server, "equipment"), &AuthConfig::default(), &plan)
        .await
        .unwrap();

    assert!(report.is_success(), "failures: {:?}", report.failures().collect::<Vec<_>>());
    assert_eq!(report.total(), 9);
    let first = &report.suites[0].results[0];
    assert!(first.url.ends_with("/api/v1/dashboard/types/equipments?scope=OFR"));
}

#[tokio::test]
async fn test_status_mismatch_is_recorded() {
    let server = MockServer::start().await;
    mount_token(&server, "t").await;
    Mock::given(method("GET"))
        .and(path("/api/v1/Obsolescence/meta/risks"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let suites = builtin_suites().unwrap();
    let application = find_suite(&suites, "application").unwrap().clone();
    let plan = RunPlan::new("mock", vec![application]);

    let report = runner()
        .run(&environments(&server, "application"), &AuthConfig::default(), &plan)
        .await
        .unwrap();

    assert_eq!(report.failed(), 1);
    let (suite, failure) = report.failures().next().unwrap();
    assert_eq!(suite, "application");
    assert_eq!(failure.probe, "/api/v1/Obsolescence/meta/risks");
    assert!(matches!(failure.outcome, CheckOutcome::Failed { status: 503, .. }));
    assert_eq!(report.passed(), report.total() - 1);
}

#[tokio::test]
async fn test_rejected_login_stops_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "invalid_grant"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let suites = builtin_suites().unwrap();
    let plan = RunPlan::new("mock", vec![find_suite(&suites, "equipment").unwrap().clone()]);

    let err = runner()
        .run(&environments(&server, "equipment"), &AuthConfig::default(), &plan)
        .await
        .unwrap_err();

    assert!(matches!(err, RunError::TokenRejected { status: 401, .. }));
}

#[tokio::test]
async fn test_suite_file_round_trip_through_runner() {
    let server = MockServer::start().await;
    mount_token(&server, "t").await;
    Mock::given(method("GET"))
        .and(path("/api/v1/metrics/types"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br#"
name: metric
service: metric
probes:
  - name: metric types
    path: /api/v1/metrics/types
    query:
      scopes: OFR
"#,
    )
    .unwrap();

    let suite = Suite::from_file(file.path()).unwrap();
    let plan = RunPlan::new("mock", vec![suite]);
    let report = runner()
        .run(&environments(&server, "metric"), &AuthConfig::default(), &plan)
        .await
        .unwrap();

    assert!(report.is_success());
}
