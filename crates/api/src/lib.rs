pub mod error;
pub mod models;

use error::{Error, Result};
use models::{Envelope, Project, ProjectList, TestCaseRequest, TestCaseResult};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default public endpoint of the Qase REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.qase.io/v1";

/// Header carrying the API token on every request.
const TOKEN_HEADER: &str = "Token";

/// Thin typed client for the Qase API.
///
/// Holds only immutable configuration (transport, base URL, token), so a
/// clone can be handed to another task without synchronization. Each
/// operation is a single request/response round trip.
#[derive(Clone, Debug)]
pub struct QaseClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl QaseClient {
    /// Builds a client for `base_url` authenticating with `token`.
    ///
    /// Fails with [`Error::Configuration`] when the token is empty and with
    /// [`Error::InvalidUrl`] when the base URL does not parse.
    pub fn new(base_url: impl AsRef<str>, token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::configuration(
                "API token is empty. Supply a non-empty Qase API token.",
            ));
        }

        let url = Url::parse(base_url.as_ref()).map_err(Error::InvalidUrl)?;

        let client = Client::builder()
            .user_agent(format!("qase-cli/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(Error::Transport)?;

        Ok(Self {
            client,
            base_url: url,
            token,
        })
    }

    /// Lists all projects visible to the token, in server order.
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let list: ProjectList = self
            .request(Method::GET, "project", Option::<&()>::None)
            .await?;
        Ok(list.entities)
    }

    /// Creates a test case in the project identified by `project_code`.
    ///
    /// The request payload is sent as given; range checks on severity,
    /// priority and status are left to the server.
    pub async fn create_case(
        &self,
        project_code: &str,
        request: &TestCaseRequest,
    ) -> Result<TestCaseResult> {
        if project_code.trim().is_empty() {
            return Err(Error::configuration(
                "Project code is empty. It forms the request path.",
            ));
        }

        self.request(Method::POST, &format!("case/{project_code}"), Some(request))
            .await
    }

    async fn request<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let joined = self
            .base_url
            .join(&format!(
                "{}/{}",
                self.base_url.path().trim_end_matches('/'),
                path
            ))
            .map_err(Error::InvalidUrl)?;

        debug!(method = %method, url = %joined, "Sending request");

        let mut req = self.client.request(method, joined);
        req = self.apply_auth(req);

        if let Some(body) = body {
            req = req.json(body);
        } else {
            req = req.header(reqwest::header::CONTENT_TYPE, "application/json");
        }

        let response = req.send().await.map_err(Error::Transport)?;

        // Non-2xx is a transport-level failure; the envelope is only
        // consulted on successful statuses.
        let response = response.error_for_status().map_err(Error::Transport)?;

        let raw = response.text().await.map_err(Error::Transport)?;

        let envelope: Envelope<T> = serde_json::from_str(&raw).map_err(|err| Error::Decode {
            message: err.to_string(),
            body: raw.clone(),
        })?;

        if !envelope.status {
            let message = envelope
                .error
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(Error::Api { message, body: raw });
        }

        envelope.result.ok_or_else(|| Error::Decode {
            message: "envelope reported success but carried no result".to_string(),
            body: raw,
        })
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(TOKEN_HEADER, self.token.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty_token() {
        let err = QaseClient::new(DEFAULT_BASE_URL, "").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn new_rejects_whitespace_token() {
        let err = QaseClient::new(DEFAULT_BASE_URL, "   ").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn new_rejects_malformed_base_url() {
        let err = QaseClient::new("not a url", "token").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn create_case_rejects_empty_project_code() {
        let client = QaseClient::new(DEFAULT_BASE_URL, "token").unwrap();
        let err = client
            .create_case("", &TestCaseRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }
}
