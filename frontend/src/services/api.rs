//! Typed client for the hub's REST backend.
//!
//! Every screen talks to the backend through this client. The auth session
//! is injected at construction time, so tests and screens never reach into
//! ambient browser state for the token. Every failure is classified into
//! [`ApiError`] at this boundary; callers surface the message and decide
//! nothing else. There are no automatic retries anywhere.

use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    Announcement, AnnouncementsResponse, Contact, ContactSubmission, ContactSubmissionRequest,
    ErrorDetail, GroupSubmission, LoginRequest, MapFeed, Resource, ResourceSubmission,
    SaveLinkRequest, ShortLink, TokenResponse, VerifyResponse, WhatsAppGroup,
};
use thiserror::Error;

use crate::services::auth::AuthSession;

/// Client-side failure taxonomy for backend calls.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never completed
    #[error("Network error. Please try again.")]
    Network(String),
    /// 401/403: the token is invalid, expired, or lacks permission
    #[error("You are not authorized for this action.")]
    Auth { status: u16 },
    /// Rejected request; the backend's `detail` message, surfaced verbatim
    #[error("{detail}")]
    Validation { status: u16, detail: String },
    /// 404 on a single-item fetch
    #[error("The requested item could not be found.")]
    NotFound,
    /// 2xx response whose body could not be decoded
    #[error("Received an unreadable response from the server.")]
    Parse(String),
}

impl ApiError {
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth { .. })
    }
}

/// Maps a non-2xx response to the error taxonomy. 5xx responses carry no
/// dedicated variant; any `detail` the server provides is still surfaced.
pub fn classify_failure(status: u16, body: &str) -> ApiError {
    match status {
        401 | 403 => ApiError::Auth { status },
        404 => ApiError::NotFound,
        _ => ApiError::Validation {
            status,
            detail: parse_detail(body, status),
        },
    }
}

fn parse_detail(body: &str, status: u16) -> String {
    serde_json::from_str::<ErrorDetail>(body)
        .map(|e| e.detail)
        .unwrap_or_else(|_| format!("Request failed with status {}", status))
}

/// Server-side scoping for moderated collections. The client re-applies
/// its own filters regardless; these parameters only widen what the
/// backend is willing to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListScope {
    pub approved_only: bool,
    pub include_deleted: bool,
}

impl Default for ListScope {
    fn default() -> Self {
        Self {
            approved_only: true,
            include_deleted: false,
        }
    }
}

impl ListScope {
    /// Public listing: approved, live records only
    pub fn approved() -> Self {
        Self::default()
    }

    /// Moderation queue: pending records included
    pub fn moderation() -> Self {
        Self {
            approved_only: false,
            include_deleted: false,
        }
    }

    pub fn with_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    fn query(&self) -> String {
        let mut params: Vec<&str> = Vec::new();
        if !self.approved_only {
            params.push("approved_only=false");
        }
        if self.include_deleted {
            params.push("include_deleted=true");
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

/// API client for communicating with the backend server
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    session: AuthSession,
}

impl ApiClient {
    /// Client against the same origin the app was served from
    pub fn new(session: AuthSession) -> Self {
        Self {
            base_url: String::new(),
            session,
        }
    }

    pub fn with_base_url(base_url: String, session: AuthSession) -> Self {
        Self { base_url, session }
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.bearer() {
            Some(bearer) => builder.header("Authorization", &bearer),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .authorize(Request::get(&self.url(path)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .authorize(builder)
            .json(body)
            .map_err(|e| ApiError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    /// Sends a request whose success body the caller does not need.
    async fn send_expect_ok(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        let response = self
            .authorize(builder)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        expect_ok(response).await
    }

    async fn send_json_expect_ok<B: Serialize>(
        &self,
        builder: RequestBuilder,
        body: &B,
    ) -> Result<(), ApiError> {
        let response = self
            .authorize(builder)
            .json(body)
            .map_err(|e| ApiError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        expect_ok(response).await
    }

    // --- auth ---

    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        self.send_json(Request::post(&self.url("/api/auth/login")), request)
            .await
    }

    pub async fn verify(&self) -> Result<VerifyResponse, ApiError> {
        self.get_json("/api/auth/verify").await
    }

    // --- whatsapp groups ---

    pub async fn whatsapp_groups(&self, scope: ListScope) -> Result<Vec<WhatsAppGroup>, ApiError> {
        self.get_json(&format!("/api/whatsapp-groups{}", scope.query()))
            .await
    }

    pub async fn submit_group(&self, request: &GroupSubmission) -> Result<(), ApiError> {
        self.send_json_expect_ok(Request::post(&self.url("/api/whatsapp-groups")), request)
            .await
    }

    pub async fn approve_group(&self, id: i64) -> Result<(), ApiError> {
        self.send_expect_ok(Request::patch(
            &self.url(&format!("/api/whatsapp-groups/{}/approve", id)),
        ))
        .await
    }

    pub async fn restore_group(&self, id: i64) -> Result<(), ApiError> {
        self.send_expect_ok(Request::patch(
            &self.url(&format!("/api/whatsapp-groups/{}/restore", id)),
        ))
        .await
    }

    /// Soft delete; the group stays restorable from the moderation queue
    pub async fn delete_group(&self, id: i64) -> Result<(), ApiError> {
        self.send_expect_ok(Request::delete(
            &self.url(&format!("/api/whatsapp-groups/{}", id)),
        ))
        .await
    }

    pub async fn purge_group(&self, id: i64) -> Result<(), ApiError> {
        self.send_expect_ok(Request::delete(
            &self.url(&format!("/api/whatsapp-groups/{}/permanent", id)),
        ))
        .await
    }

    // --- resources ---

    pub async fn resources(&self, scope: ListScope) -> Result<Vec<Resource>, ApiError> {
        self.get_json(&format!("/api/resources-db{}", scope.query()))
            .await
    }

    pub async fn submit_resource(&self, request: &ResourceSubmission) -> Result<(), ApiError> {
        self.send_json_expect_ok(Request::post(&self.url("/api/resources-db")), request)
            .await
    }

    pub async fn approve_resource(&self, id: i64) -> Result<(), ApiError> {
        self.send_expect_ok(Request::patch(
            &self.url(&format!("/api/resources-db/{}/approve", id)),
        ))
        .await
    }

    pub async fn delete_resource(&self, id: i64) -> Result<(), ApiError> {
        self.send_expect_ok(Request::delete(
            &self.url(&format!("/api/resources-db/{}", id)),
        ))
        .await
    }

    // --- contact submissions and directory ---

    pub async fn contact_submissions(
        &self,
        scope: ListScope,
    ) -> Result<Vec<ContactSubmission>, ApiError> {
        self.get_json(&format!("/api/contact-submissions{}", scope.query()))
            .await
    }

    pub async fn submit_contact(&self, request: &ContactSubmissionRequest) -> Result<(), ApiError> {
        self.send_json_expect_ok(Request::post(&self.url("/api/contact-submissions")), request)
            .await
    }

    pub async fn approve_contact_submission(&self, id: i64) -> Result<(), ApiError> {
        self.send_expect_ok(Request::patch(
            &self.url(&format!("/api/contact-submissions/{}/approve", id)),
        ))
        .await
    }

    pub async fn delete_contact_submission(&self, id: i64) -> Result<(), ApiError> {
        self.send_expect_ok(Request::delete(
            &self.url(&format!("/api/contact-submissions/{}", id)),
        ))
        .await
    }

    pub async fn contacts(&self) -> Result<Vec<Contact>, ApiError> {
        self.get_json("/api/contacts").await
    }

    // --- short links ---

    pub async fn short_links(&self) -> Result<Vec<ShortLink>, ApiError> {
        self.get_json("/api/links").await
    }

    pub async fn create_link(&self, request: &SaveLinkRequest) -> Result<ShortLink, ApiError> {
        self.send_json(Request::post(&self.url("/api/links")), request)
            .await
    }

    pub async fn update_link(&self, id: i64, request: &SaveLinkRequest) -> Result<ShortLink, ApiError> {
        self.send_json(Request::put(&self.url(&format!("/api/links/{}", id))), request)
            .await
    }

    pub async fn delete_link(&self, id: i64) -> Result<(), ApiError> {
        self.send_expect_ok(Request::delete(&self.url(&format!("/api/links/{}", id))))
            .await
    }

    // --- announcements and map feed ---

    pub async fn announcements(&self, limit: Option<usize>) -> Result<Vec<Announcement>, ApiError> {
        let path = match limit {
            Some(limit) => format!("/api/announcements?limit={}", limit),
            None => "/api/announcements".to_string(),
        };
        let response: AnnouncementsResponse = self.get_json(&path).await?;
        Ok(response.announcements)
    }

    pub async fn map_feed(&self) -> Result<MapFeed, ApiError> {
        self.get_json("/api/mapaction-feed").await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    } else {
        Err(failure_of(response).await)
    }
}

async fn expect_ok(response: Response) -> Result<(), ApiError> {
    if response.ok() {
        Ok(())
    } else {
        Err(failure_of(response).await)
    }
}

async fn failure_of(response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    classify_failure(status, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses_classify_as_auth_failures() {
        assert_eq!(classify_failure(401, ""), ApiError::Auth { status: 401 });
        assert_eq!(classify_failure(403, "{}"), ApiError::Auth { status: 403 });
        assert!(classify_failure(401, "").is_auth());
    }

    #[test]
    fn test_missing_records_classify_as_not_found() {
        assert_eq!(classify_failure(404, ""), ApiError::NotFound);
    }

    #[test]
    fn test_detail_message_is_surfaced_verbatim() {
        let error = classify_failure(400, r#"{"detail": "Slug already in use"}"#);
        assert_eq!(
            error,
            ApiError::Validation {
                status: 400,
                detail: "Slug already in use".to_string(),
            }
        );
        assert_eq!(error.to_string(), "Slug already in use");
    }

    #[test]
    fn test_unreadable_failure_bodies_fall_back_to_a_generic_message() {
        let error = classify_failure(500, "<html>Internal Server Error</html>");
        assert_eq!(
            error,
            ApiError::Validation {
                status: 500,
                detail: "Request failed with status 500".to_string(),
            }
        );
    }

    #[test]
    fn test_scope_query_parameters() {
        assert_eq!(ListScope::approved().query(), "");
        assert_eq!(ListScope::moderation().query(), "?approved_only=false");
        assert_eq!(
            ListScope::moderation().with_deleted().query(),
            "?approved_only=false&include_deleted=true"
        );
    }

    #[test]
    fn test_clients_compare_by_session_and_origin() {
        let anonymous = ApiClient::new(AuthSession::anonymous());
        let signed_in = ApiClient::new(AuthSession::with_token("abc"));
        // A session change makes the client a new loader dependency
        assert_ne!(anonymous, signed_in);
        assert_eq!(anonymous, ApiClient::new(AuthSession::anonymous()));
    }
}
