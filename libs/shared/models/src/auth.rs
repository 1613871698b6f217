use serde::{Deserialize, Serialize};

/// Credentials issued at sign-in and presented as a bearer token on every
/// authenticated call. Obtaining or refreshing them happens outside this
/// workspace; carebook only stores and attaches them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl AuthTokens {
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), refresh_token: None }
    }
}
