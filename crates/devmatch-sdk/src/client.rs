//! HTTP client for the DevMatch REST API.
//!
//! Every call goes through [`DevMatchClient::send`], which turns error
//! statuses into [`Error`] values. Payloads are then decoded by
//! [`decode_data`]: the `{ msg, data }` envelope is unwrapped, bare JSON is
//! accepted as-is, and an empty success body is a backend stub.

use std::time::Duration;

use devmatch_core::{
    AnalysisResult, ApiResponse, Application, ApplicationId, ApplicationStatus,
    ApplicationStatusUpdateRequest, LoginRequest, Project, ProjectApplyRequest,
    ProjectContentUpdateRequest, ProjectCreateRequest, ProjectId, ProjectStatus,
    ProjectStatusUpdateRequest, User, UserId,
};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Error;

/// Request timeout used by [`DevMatchClient::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// DECODING
// =============================================================================

/// Decode a 2xx body into `T`.
///
/// An object carrying `data` or `msg` is treated as the envelope and its
/// `data` is decoded. Anything else is decoded directly. An empty body, or an
/// envelope whose `data` is missing or null, means the endpoint is a stub.
pub(crate) fn decode_data<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T, Error> {
    if body.trim().is_empty() {
        return Err(Error::not_implemented(endpoint));
    }
    let value: Value = serde_json::from_str(body)?;
    let is_envelope = matches!(
        &value,
        Value::Object(map) if map.contains_key("data") || map.contains_key("msg")
    );
    let payload = if is_envelope {
        let envelope: ApiResponse<Value> = serde_json::from_value(value)?;
        match envelope.into_data() {
            Some(Value::Null) | None => return Err(Error::not_implemented(endpoint)),
            Some(data) => data,
        }
    } else {
        value
    };
    Ok(serde_json::from_value(payload)?)
}

/// How an empty success body is read by [`DevMatchClient::execute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EmptyReply {
    /// 204 means done; an empty 200 means the endpoint is a stub.
    NoContentIsDone,
    /// The backend answers this endpoint with 204 without doing anything.
    AlwaysStub,
}

/// Best human-readable message for an error body.
fn error_message(status: StatusCode, body: &str) -> String {
    let from_envelope = serde_json::from_str::<ApiResponse<Value>>(body)
        .ok()
        .map(|e| e.msg)
        .filter(|m| !m.trim().is_empty());
    match from_envelope {
        Some(msg) => msg,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// HTTP client for the DevMatch backend.
///
/// Cookies set by `/auth/login` are kept for the lifetime of the client.
#[derive(Debug, Clone)]
pub struct DevMatchClient {
    base_url: String,
    client: reqwest::Client,
}

impl DevMatchClient {
    /// Create a client with the default 30-second timeout.
    ///
    /// ```rust,ignore
    /// let client = DevMatchClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(timeout)
                .cookie_store(true)
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and read the body.
    ///
    /// 501 becomes [`Error::NotImplemented`]. Any other non-2xx status
    /// becomes [`Error::Server`], except 401 which is returned to the caller
    /// untouched so `/auth/me` can map it to "signed out".
    async fn send(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<(StatusCode, String), Error> {
        debug!(endpoint, "sending request");
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            return Ok((status, body));
        }
        if status == StatusCode::NOT_IMPLEMENTED {
            warn!(endpoint, "endpoint not implemented by server");
            return Err(Error::not_implemented(endpoint));
        }
        warn!(endpoint, status = status.as_u16(), payload = %body, "request failed");
        Err(Error::Server {
            status: status.as_u16(),
            message: error_message(status, &body),
        })
    }

    /// Send, treat 401 as an error, and decode the payload.
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, Error> {
        let (status, body) = self.send(endpoint, request).await?;
        reject_unauthorized(endpoint, status, &body)?;
        decode_data(endpoint, &body)
    }

    /// Send an operation with no payload of interest.
    ///
    /// An empty 2xx is judged by `empty`; a 2xx with a body is success.
    async fn execute(
        &self,
        endpoint: &str,
        request: RequestBuilder,
        empty: EmptyReply,
    ) -> Result<(), Error> {
        let (status, body) = self.send(endpoint, request).await?;
        reject_unauthorized(endpoint, status, &body)?;
        if status == StatusCode::NO_CONTENT && empty == EmptyReply::NoContentIsDone {
            return Ok(());
        }
        if body.trim().is_empty() {
            return Err(Error::not_implemented(endpoint));
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Projects
    // -------------------------------------------------------------------------

    pub async fn list_projects(&self) -> Result<Vec<Project>, Error> {
        let req = self.client.get(self.url("/projects"));
        self.fetch("GET /projects", req).await
    }

    pub async fn get_project(&self, id: ProjectId) -> Result<Project, Error> {
        let req = self.client.get(self.url(&format!("/projects/{}", id)));
        self.fetch("GET /projects/{id}", req).await
    }

    pub async fn create_project(&self, request: &ProjectCreateRequest) -> Result<Project, Error> {
        let req = self.client.post(self.url("/projects")).json(request);
        self.fetch("POST /projects", req).await
    }

    pub async fn update_project_status(
        &self,
        id: ProjectId,
        status: ProjectStatus,
    ) -> Result<Project, Error> {
        let req = self
            .client
            .patch(self.url(&format!("/projects/{}/status", id)))
            .json(&ProjectStatusUpdateRequest { status });
        self.fetch("PATCH /projects/{id}/status", req).await
    }

    /// Replace the free-form content of a project.
    ///
    /// The caller is expected to have run `validate_content` first.
    pub async fn update_project_content(&self, id: ProjectId, content: &str) -> Result<(), Error> {
        let req = self
            .client
            .patch(self.url(&format!("/projects/{}/content", id)))
            .json(&ProjectContentUpdateRequest {
                content: content.to_string(),
            });
        self.execute("PATCH /projects/{id}/content", req, EmptyReply::AlwaysStub)
            .await
    }

    pub async fn delete_project(&self, id: ProjectId) -> Result<(), Error> {
        let req = self.client.delete(self.url(&format!("/projects/{}", id)));
        self.execute("DELETE /projects/{id}", req, EmptyReply::AlwaysStub)
            .await
    }

    pub async fn project_applications(&self, id: ProjectId) -> Result<Vec<Application>, Error> {
        let req = self
            .client
            .get(self.url(&format!("/projects/{}/applications", id)));
        self.fetch("GET /projects/{id}/applications", req).await
    }

    pub async fn apply_to_project(
        &self,
        id: ProjectId,
        request: &ProjectApplyRequest,
    ) -> Result<Application, Error> {
        let req = self
            .client
            .post(self.url(&format!("/projects/{}/applications", id)))
            .json(request);
        self.fetch("POST /projects/{id}/applications", req).await
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    /// Projects created by a user. This endpoint answers with a bare list.
    pub async fn user_projects(&self, id: UserId) -> Result<Vec<Project>, Error> {
        let req = self.client.get(self.url(&format!("/users/{}/projects", id)));
        self.fetch("GET /users/{id}/projects", req).await
    }

    pub async fn user_applications(&self, id: UserId) -> Result<Vec<Application>, Error> {
        let req = self
            .client
            .get(self.url(&format!("/users/{}/applications", id)));
        self.fetch("GET /users/{id}/applications", req).await
    }

    // -------------------------------------------------------------------------
    // Applications
    // -------------------------------------------------------------------------

    pub async fn get_application(&self, id: ApplicationId) -> Result<Application, Error> {
        let req = self.client.get(self.url(&format!("/applications/{}", id)));
        self.fetch("GET /applications/{id}", req).await
    }

    pub async fn update_application_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), Error> {
        let req = self
            .client
            .patch(self.url(&format!("/applications/{}/status", id)))
            .json(&ApplicationStatusUpdateRequest { status });
        self.execute("PATCH /applications/{id}/status", req, EmptyReply::NoContentIsDone)
            .await
    }

    pub async fn delete_application(&self, id: ApplicationId) -> Result<(), Error> {
        let req = self.client.delete(self.url(&format!("/applications/{}", id)));
        self.execute("DELETE /applications/{id}", req, EmptyReply::NoContentIsDone)
            .await
    }

    // -------------------------------------------------------------------------
    // Analysis
    // -------------------------------------------------------------------------

    pub async fn get_analysis(&self, id: ApplicationId) -> Result<AnalysisResult, Error> {
        let req = self
            .client
            .get(self.url(&format!("/analysis/application/{}", id)));
        self.fetch("GET /analysis/application/{id}", req).await
    }

    pub async fn create_analysis(&self, id: ApplicationId) -> Result<AnalysisResult, Error> {
        let req = self
            .client
            .post(self.url(&format!("/analysis/application/{}", id)));
        self.fetch("POST /analysis/application/{id}", req).await
    }

    /// Ask the backend to split roles across the approved team.
    ///
    /// The answer is free-form text.
    pub async fn assign_roles(&self, project: ProjectId) -> Result<String, Error> {
        let endpoint = "POST /analysis/project/{id}/role-assignment";
        let req = self
            .client
            .post(self.url(&format!("/analysis/project/{}/role-assignment", project)));
        let (status, body) = self.send(endpoint, req).await?;
        reject_unauthorized(endpoint, status, &body)?;
        // Plain text bodies are not JSON; keep them verbatim.
        match decode_data::<String>(endpoint, &body) {
            Err(Error::Json(_)) => Ok(body),
            other => other,
        }
    }

    // -------------------------------------------------------------------------
    // Auth
    // -------------------------------------------------------------------------

    /// Sign in. Returns the user when the server includes one in its answer.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<Option<User>, Error> {
        let endpoint = "POST /auth/login";
        let req = self.client.post(self.url("/auth/login")).json(credentials);
        let (status, body) = self.send(endpoint, req).await?;
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthenticated);
        }
        match decode_data::<User>(endpoint, &body) {
            Ok(user) => Ok(Some(user)),
            Err(Error::Json(_) | Error::NotImplemented { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn logout(&self) -> Result<(), Error> {
        let req = self.client.post(self.url("/auth/logout"));
        self.execute("POST /auth/logout", req, EmptyReply::NoContentIsDone)
            .await
    }

    /// The signed-in user, or `None` when the server answers 401.
    pub async fn current_user(&self) -> Result<Option<User>, Error> {
        let endpoint = "GET /auth/me";
        let req = self.client.get(self.url("/auth/me"));
        let (status, body) = self.send(endpoint, req).await?;
        if status == StatusCode::UNAUTHORIZED {
            debug!("no active session");
            return Ok(None);
        }
        decode_data(endpoint, &body).map(Some)
    }
}

fn reject_unauthorized(endpoint: &str, status: StatusCode, body: &str) -> Result<(), Error> {
    if status == StatusCode::UNAUTHORIZED {
        warn!(endpoint, payload = %body, "request rejected: not signed in");
        return Err(Error::Unauthenticated);
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_data_is_unwrapped() {
        let ids: Result<Vec<u64>, Error> = decode_data("GET /x", r#"{"msg":"ok","data":[1,2,3]}"#);
        assert!(matches!(ids.as_deref(), Ok([1, 2, 3])));
    }

    #[test]
    fn bare_list_is_accepted() {
        let ids: Result<Vec<u64>, Error> = decode_data("GET /x", "[4,5]");
        assert!(matches!(ids.as_deref(), Ok([4, 5])));
    }

    #[test]
    fn empty_body_is_a_stub() {
        let out: Result<Vec<u64>, Error> = decode_data("DELETE /projects/{id}", "  ");
        assert!(matches!(
            out,
            Err(Error::NotImplemented { ref endpoint }) if endpoint == "DELETE /projects/{id}"
        ));
    }

    #[test]
    fn null_data_is_a_stub() {
        let out: Result<Vec<u64>, Error> = decode_data("GET /x", r#"{"msg":"pending","data":null}"#);
        assert!(matches!(out, Err(Error::NotImplemented { .. })));
        let out: Result<Vec<u64>, Error> = decode_data("GET /x", r#"{"msg":"pending"}"#);
        assert!(matches!(out, Err(Error::NotImplemented { .. })));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let out: Result<Vec<u64>, Error> = decode_data("GET /x", "{not json");
        assert!(matches!(out, Err(Error::Json(_))));
    }

    #[test]
    fn error_message_prefers_envelope() {
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"msg":"no such project","data":null}"#),
            "no such project"
        );
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, "bad things\n"),
            "bad things"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "Internal Server Error"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let client = DevMatchClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/projects"), "http://localhost:8080/projects");
    }
}
