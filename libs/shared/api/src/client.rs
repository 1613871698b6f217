use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION},
    Client, Method, StatusCode,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use shared_config::AppConfig;
use shared_models::{ApiEnvelope, ApiError};

use crate::session::SessionStore;

/// Single gateway to the booking backend. Every cell talks HTTP through
/// here, so envelope unwrapping, bearer attachment and status mapping live
/// in exactly one place.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: SessionStore) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    async fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.access_token().await {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("stored access token is not a valid header value"),
            }
        }

        headers
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let envelope = self.send(method, path, query, body).await?;
        envelope.into_data()
    }

    /// Same round trip for endpoints whose payload does not matter.
    pub async fn request_unit(
        &self,
        method: Method,
        path: &str,
    ) -> Result<(), ApiError> {
        let envelope: ApiEnvelope<Value> = self.send(method, path, &[], None).await?;
        envelope.into_unit()
    }

    async fn send<T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<ApiEnvelope<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "request");

        let mut req = self.client.request(method, &url).headers(self.headers().await);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let reason = extract_reason(&error_text, status);
            error!(%status, %reason, %url, "request failed");

            return Err(match status {
                StatusCode::UNAUTHORIZED => {
                    // The backend no longer accepts our token. Drop the
                    // session; signing in again is the caller's problem.
                    self.session.clear().await;
                    ApiError::AuthExpired
                }
                StatusCode::NOT_FOUND => ApiError::NotFound(reason),
                _ => ApiError::ServerRejected(reason),
            });
        }

        response
            .json::<ApiEnvelope<T>>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    pub async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.request(Method::GET, path, query, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, &[], Some(encode_body(body)?)).await
    }

    /// POST with no payload, for action endpoints that only need the path.
    pub async fn post_empty<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, &[], None).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, &[], Some(encode_body(body)?)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request_unit(Method::DELETE, path).await
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|err| ApiError::Decode(err.to_string()))
}

/// Error bodies usually arrive as envelopes too; fall back to the raw text
/// and finally to the bare status line.
fn extract_reason(body: &str, status: StatusCode) -> String {
    if let Ok(envelope) = serde_json::from_str::<ApiEnvelope<Value>>(body) {
        return envelope.reason();
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        trimmed.to_string()
    }
}
