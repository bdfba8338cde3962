//! HttpNotesApi - REST implementation of [`NotesApi`] on top of reqwest.
//!
//! The client carries no default headers. Each authenticated request gets its
//! `Authorization: Bearer <token>` header from the token passed to that call.

use async_trait::async_trait;
use jotter_core::api::{NotesApi, Registration, UserId};
use jotter_core::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use jotter_core::error::ApiError;
use jotter_core::note::{Note, NoteDraft, NoteId};
use jotter_core::session::BearerToken;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REGISTER_PATH: &str = "/auth/";
const TOKEN_PATH: &str = "/auth/token";
const LIST_PATH: &str = "/";
const NOTE_PATH: &str = "/note/";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    user_id: UserId,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginForm<'a> {
    username: &'a str,
    password: &'a str,
}

/// Notes backend reached over HTTP.
#[derive(Clone)]
pub struct HttpNotesApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpNotesApi {
    /// Creates a client for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone())
            .with_timeout(Duration::from_secs(config.request_timeout_secs))
    }

    /// Uses a preconfigured reqwest client (proxy settings, TLS roots).
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/note/{id}/`, with the id escaped as a single path segment.
    fn note_endpoint(&self, id: &NoteId) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.endpoint(NOTE_PATH))
            .map_err(|e| ApiError::transport(format!("Invalid base URL {:?}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::transport(format!("Base URL {:?} cannot have a path", self.base_url)))?
            .pop_if_empty()
            .push(&id.to_string())
            .push("");
        Ok(url)
    }

    /// Attaches the session's bearer token to one request.
    fn authorized(builder: RequestBuilder, token: &BearerToken) -> RequestBuilder {
        builder.header(AUTHORIZATION, token.header_value())
    }

    fn register_request(&self, registration: &Registration) -> RequestBuilder {
        self.client
            .post(self.endpoint(REGISTER_PATH))
            .json(registration)
            .timeout(self.timeout)
    }

    fn login_request(&self, username: &str, password: &str) -> RequestBuilder {
        self.client
            .post(self.endpoint(TOKEN_PATH))
            .form(&LoginForm { username, password })
            .timeout(self.timeout)
    }

    fn list_request(&self, token: &BearerToken) -> RequestBuilder {
        let builder = self.client.get(self.endpoint(LIST_PATH)).timeout(self.timeout);
        Self::authorized(builder, token)
    }

    fn create_request(&self, token: &BearerToken, draft: &NoteDraft) -> RequestBuilder {
        let builder = self
            .client
            .post(self.endpoint(NOTE_PATH))
            .json(draft)
            .timeout(self.timeout);
        Self::authorized(builder, token)
    }

    fn update_request(
        &self,
        token: &BearerToken,
        id: &NoteId,
        draft: &NoteDraft,
    ) -> Result<RequestBuilder, ApiError> {
        let builder = self
            .client
            .put(self.note_endpoint(id)?)
            .json(draft)
            .timeout(self.timeout);
        Ok(Self::authorized(builder, token))
    }

    fn delete_request(&self, token: &BearerToken, id: &NoteId) -> Result<RequestBuilder, ApiError> {
        let builder = self.client.delete(self.note_endpoint(id)?).timeout(self.timeout);
        Ok(Self::authorized(builder, token))
    }

    /// Sends the request and turns any non-2xx response into an [`ApiError`]
    /// carrying the response body.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!("[Http] {} {}", status.as_u16(), response.url());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), body));
        }

        Ok(response)
    }
}

impl Default for HttpNotesApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    async fn register(&self, registration: &Registration) -> Result<UserId, ApiError> {
        let response = self.send(self.register_request(registration)).await?;
        let body: RegisterResponse = response
            .json()
            .await
            .map_err(|e| ApiError::decode(format!("Failed to parse register response: {}", e)))?;

        if let Some(message) = &body.message {
            tracing::debug!("[Http] register: {}", message);
        }
        Ok(body.user_id)
    }

    async fn login(&self, username: &str, password: &str) -> Result<BearerToken, ApiError> {
        let response = self.send(self.login_request(username, password)).await?;
        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::decode(format!("Failed to parse token response: {}", e)))?;

        if let Some(token_type) = &body.token_type {
            if !token_type.eq_ignore_ascii_case("bearer") {
                tracing::warn!("[Http] Unexpected token type {:?}, using it as bearer", token_type);
            }
        }

        Ok(BearerToken::new(body.access_token))
    }

    async fn list_notes(&self, token: &BearerToken) -> Result<Vec<Note>, ApiError> {
        let response = self.send(self.list_request(token)).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::decode(format!("Failed to parse note list: {}", e)))
    }

    async fn create_note(&self, token: &BearerToken, draft: &NoteDraft) -> Result<(), ApiError> {
        // The created note in the response is not needed; the caller refetches.
        self.send(self.create_request(token, draft)).await?;
        Ok(())
    }

    async fn update_note(
        &self,
        token: &BearerToken,
        id: &NoteId,
        draft: &NoteDraft,
    ) -> Result<(), ApiError> {
        self.send(self.update_request(token, id, draft)?).await?;
        Ok(())
    }

    async fn delete_note(&self, token: &BearerToken, id: &NoteId) -> Result<(), ApiError> {
        self.send(self.delete_request(token, id)?).await?;
        Ok(())
    }
}
