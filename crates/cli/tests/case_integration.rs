use qase_cli_api::error::Error;
use qase_cli_api::models::{TestCaseRequest, TestCaseStep};
use qase_cli_api::QaseClient;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_request() -> TestCaseRequest {
    TestCaseRequest {
        title: "Login works".to_string(),
        description: "Checks the happy path".to_string(),
        suite_id: None,
        severity: 3,
        priority: 1,
        status: 0,
        steps: vec![
            TestCaseStep {
                action: "Open the login page".to_string(),
                expected_result: "Form is shown".to_string(),
            },
            TestCaseStep {
                action: "Submit valid credentials".to_string(),
                expected_result: "Dashboard appears".to_string(),
            },
        ],
    }
}

#[tokio::test]
async fn test_create_case_returns_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/case/QTD"))
        .and(header("Token", "fake-token"))
        .and(body_json(serde_json::json!({
            "title": "Login works",
            "description": "Checks the happy path",
            "suite_id": null,
            "severity": 3,
            "priority": 1,
            "status": 0,
            "steps": [
                {"action": "Open the login page", "expected_result": "Form is shown"},
                {"action": "Submit valid credentials", "expected_result": "Dashboard appears"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": true,
            "result": {"id": 42}
        })))
        .mount(&mock_server)
        .await;

    let client = QaseClient::new(mock_server.uri(), "fake-token").unwrap();
    let created = client.create_case("QTD", &sample_request()).await.unwrap();

    assert_eq!(created.id, 42);
}

#[tokio::test]
async fn test_create_case_without_steps() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/case/QTD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": true,
            "result": {"id": 7}
        })))
        .mount(&mock_server)
        .await;

    let request = TestCaseRequest {
        title: "T".to_string(),
        ..Default::default()
    };

    let client = QaseClient::new(mock_server.uri(), "fake-token").unwrap();
    let created = client.create_case("QTD", &request).await.unwrap();

    assert_eq!(created.id, 7);
}

#[tokio::test]
async fn test_create_case_out_of_range_values_pass_through() {
    let mock_server = MockServer::start().await;

    // The client performs no range validation; the server is the judge.
    Mock::given(method("POST"))
        .and(path("/case/QTD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": false,
            "error": "Severity is out of range"
        })))
        .mount(&mock_server)
        .await;

    let request = TestCaseRequest {
        title: "T".to_string(),
        severity: 99,
        ..Default::default()
    };

    let client = QaseClient::new(mock_server.uri(), "fake-token").unwrap();
    let err = client.create_case("QTD", &request).await.unwrap_err();

    match err {
        Error::Api { message, .. } => assert_eq!(message, "Severity is out of range"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_case_api_error_carries_raw_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/case/QTD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": false,
            "error": "Suite not found",
            "errorFields": [{"field": "suite_id", "error": "unknown suite"}]
        })))
        .mount(&mock_server)
        .await;

    let client = QaseClient::new(mock_server.uri(), "fake-token").unwrap();
    let err = client
        .create_case("QTD", &sample_request())
        .await
        .unwrap_err();

    match &err {
        Error::Api { message, body } => {
            assert_eq!(message, "Suite not found");
            assert!(body.contains("errorFields"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(err.body().unwrap().contains("unknown suite"));
}

#[tokio::test]
async fn test_create_case_empty_project_code_is_configuration_error() {
    let client = QaseClient::new("http://127.0.0.1:1", "fake-token").unwrap();
    let err = client
        .create_case("  ", &sample_request())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
}

#[tokio::test]
async fn test_create_case_http_error_is_transport() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/case/QTD"))
        .respond_with(ResponseTemplate::new(422).set_body_string("unprocessable"))
        .mount(&mock_server)
        .await;

    let client = QaseClient::new(mock_server.uri(), "fake-token").unwrap();
    let err = client
        .create_case("QTD", &sample_request())
        .await
        .unwrap_err();

    match err {
        Error::Transport(inner) => {
            assert_eq!(inner.status().map(|s| s.as_u16()), Some(422));
        }
        other => panic!("expected Transport error, got {other:?}"),
    }
}
