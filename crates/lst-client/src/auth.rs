//! Access-token acquisition.
//!
//! The auth protocol itself is the vendor's: one refresh-token grant
//! against the configured token endpoint yields a short-lived access
//! token. Nothing here caches, rotates, or refreshes tokens.

use std::time::Duration;

use serde::Deserialize;

use lst_core::WorkflowConfig;

use crate::error::ApiError;

/// A short-lived bearer token for the selling-partner APIs.
///
/// `Debug` is redacted so the token never reaches log output.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an already-obtained token (useful in tests).
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange the configured refresh token for an access token.
///
/// # Errors
///
/// Returns [`ApiError::Http`] on transport failure, [`ApiError::Auth`]
/// if the token endpoint rejects the grant, and
/// [`ApiError::Deserialization`] if the response is not the expected
/// token shape.
pub async fn fetch_access_token(config: &WorkflowConfig) -> Result<AccessToken, ApiError> {
    let endpoint = "POST token exchange";
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| ApiError::ClientInit {
            reason: e.to_string(),
        })?;

    let params = [
        ("grant_type", "refresh_token"),
        ("refresh_token", config.refresh_token.as_str()),
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
    ];

    let resp = http
        .post(config.auth_endpoint.clone())
        .form(&params)
        .send()
        .await
        .map_err(|e| ApiError::Http {
            endpoint: endpoint.into(),
            source: e,
        })?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Auth {
            reason: format!("token endpoint returned {status}: {body}"),
        });
    }

    let token: TokenResponse = resp.json().await.map_err(|e| ApiError::Deserialization {
        endpoint: endpoint.into(),
        source: e,
    })?;

    tracing::info!("obtained access token");
    Ok(AccessToken(token.access_token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_prints_the_token() {
        let token = AccessToken::new("Atza|very-secret");
        let debug = format!("{token:?}");
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
