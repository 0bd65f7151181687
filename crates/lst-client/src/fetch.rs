//! Raw document fetcher.
//!
//! Schema documents are served from pre-signed URLs outside the API
//! host, so this client carries no auth headers. Bodies are returned as
//! raw bytes, untransformed, for byte-for-byte persistence.

use crate::error::ApiError;

/// Client for downloading schema documents.
#[derive(Debug, Clone)]
pub struct DocumentClient {
    http: reqwest::Client,
}

impl DocumentClient {
    pub(crate) fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Download one document and return its body bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for any non-2xx response — a failed
    /// fetch is never treated as empty content — and [`ApiError::Http`]
    /// on transport failure.
    pub async fn fetch_document(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let endpoint = format!("GET {url}");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                endpoint,
                status,
                body,
            });
        }

        let bytes = resp.bytes().await.map_err(|e| ApiError::Http {
            endpoint,
            source: e,
        })?;
        Ok(bytes.to_vec())
    }
}
