//! HTTP transport for the reservation backend

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;

/// Query parameters, in order
pub type Query<'a> = &'a [(&'a str, String)];

/// Error body returned by the backend
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    pub message: String,
}

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned + Send>(&self, path: &str, query: Query<'_>)
    -> ClientResult<T>;
    async fn post<T: DeserializeOwned + Send, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    /// POST with no body, parameters in the query string
    async fn post_query<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        query: Query<'_>,
    ) -> ClientResult<T>;
}

/// Network HTTP client
///
/// Sends `Authorization: Bearer <token>` when it has a token: either one
/// set explicitly, or the one in the session store at request time.
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    session: Option<SessionStore>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
            session: None,
        })
    }

    /// Read the bearer token from `session` on every request
    pub fn with_session(mut self, session: SessionStore) -> Self {
        self.session = Some(session);
        self
    }

    /// Set a fixed bearer token, overriding the session
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> ClientResult<Option<String>> {
        let token = match &self.token {
            Some(token) => Some(token.clone()),
            None => match &self.session {
                Some(session) => session.token()?,
                None => None,
            },
        };
        Ok(token.map(|t| format!("Bearer {}", t)))
    }

    async fn send<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> ClientResult<T> {
        let req = match self.auth_header()? {
            Some(auth) => req.header(reqwest::header::AUTHORIZATION, auth),
            None => req,
        };
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            tracing::debug!(status = status.as_u16(), body = %text, "Request failed");
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|e| e.message)
                .ok();
            return Err(match (status, message) {
                (StatusCode::UNAUTHORIZED, message) => {
                    ClientError::Unauthorized(message.unwrap_or(text))
                }
                (_, Some(message)) => ClientError::Api {
                    status: status.as_u16(),
                    message,
                },
                (StatusCode::FORBIDDEN, None) => ClientError::Forbidden(text),
                (StatusCode::NOT_FOUND, None) => ClientError::NotFound(text),
                (StatusCode::BAD_REQUEST, None) => ClientError::Validation(text),
                (_, None) => ClientError::Internal(text),
            });
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        query: Query<'_>,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let req = self.client.get(&url).query(query);
        self.send(req).await
    }

    async fn post<T: DeserializeOwned + Send, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let req = self.client.post(&url).json(body);
        self.send(req).await
    }

    async fn post_query<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        query: Query<'_>,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let req = self.client.post(&url).query(query);
        self.send(req).await
    }
}
