use serde::{Deserialize, Serialize};

/// Wire-level wrapper every Qase endpoint returns. `status` signals logical
/// success independently of the HTTP status code.
#[derive(Deserialize, Debug)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub status: bool,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A test-management project as returned by `GET /project`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub title: String,
    pub code: String,
}

#[derive(Deserialize, Debug)]
pub struct ProjectList {
    #[serde(default)]
    pub entities: Vec<Project>,
}

/// One step of a test case.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TestCaseStep {
    pub action: String,
    pub expected_result: String,
}

/// Payload for `POST /case/{project_code}`.
///
/// Severity (1-5), priority (1-3) and status (0-1) are documented ranges of
/// the Qase API. Values are sent as given; the server is authoritative and
/// rejects out-of-range ones through the response envelope.
#[derive(Serialize, Debug, Clone, Default)]
pub struct TestCaseRequest {
    pub title: String,
    pub description: String,
    pub suite_id: Option<u64>,
    pub severity: i64,
    pub priority: i64,
    pub status: i64,
    pub steps: Vec<TestCaseStep>,
}

/// Identifier of a freshly created test case.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestCaseResult {
    pub id: u64,
}
