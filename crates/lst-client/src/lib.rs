//! # lst-client — Typed Rust client for the selling-partner REST APIs
//!
//! Provides ergonomic, typed access to the APIs the listing workflow
//! touches:
//!
//! - **Catalog** — keyword search for existing catalog items
//! - **Restrictions** — listing restrictions for a known item
//! - **Definitions** — product-type search and definitions, which link
//!   to the meta-schema and product-type schema documents
//! - **Documents** — raw schema downloads from pre-signed URLs
//! - **Listings** — submission in validation-preview mode
//!
//! ## Call Model
//!
//! One request, one response. Every call is awaited sequentially by the
//! workflow; non-2xx responses surface as [`ApiError::Status`] with the
//! endpoint, status code, and body. Nothing here retries, caches, or
//! coordinates concurrency.

pub mod auth;
pub mod catalog;
pub mod definitions;
pub mod error;
pub mod fetch;
pub mod listings;
pub mod restrictions;

pub use auth::{fetch_access_token, AccessToken};
pub use error::ApiError;

use std::time::Duration;

use url::Url;

/// Header carrying the access token on every API request.
const ACCESS_TOKEN_HEADER: &str = "x-amz-access-token";

/// Top-level selling-partner API client. Holds sub-clients for each API.
#[derive(Debug, Clone)]
pub struct SellingPartnerClient {
    catalog: catalog::CatalogClient,
    restrictions: restrictions::RestrictionsClient,
    definitions: definitions::DefinitionsClient,
    listings: listings::ListingsClient,
    documents: fetch::DocumentClient,
}

impl SellingPartnerClient {
    /// Create a client for the given API endpoint.
    ///
    /// The access token is applied as a default header on every API
    /// request; document downloads use a separate client without it,
    /// since schema URLs are pre-signed.
    pub fn new(
        endpoint: Url,
        token: &AccessToken,
        timeout_secs: u64,
    ) -> Result<Self, ApiError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::HeaderName::from_static(ACCESS_TOKEN_HEADER),
            reqwest::header::HeaderValue::from_str(token.as_str()).map_err(|_| {
                ApiError::ClientInit {
                    reason: "access token is not a valid header value".to_string(),
                }
            })?,
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::ClientInit {
                reason: e.to_string(),
            })?;

        let plain = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ApiError::ClientInit {
                reason: e.to_string(),
            })?;

        Ok(Self {
            catalog: catalog::CatalogClient::new(http.clone(), endpoint.clone()),
            restrictions: restrictions::RestrictionsClient::new(http.clone(), endpoint.clone()),
            definitions: definitions::DefinitionsClient::new(http.clone(), endpoint.clone()),
            listings: listings::ListingsClient::new(http, endpoint),
            documents: fetch::DocumentClient::new(plain),
        })
    }

    /// Access the catalog-items client.
    pub fn catalog(&self) -> &catalog::CatalogClient {
        &self.catalog
    }

    /// Access the listing-restrictions client.
    pub fn restrictions(&self) -> &restrictions::RestrictionsClient {
        &self.restrictions
    }

    /// Access the product-type definitions client.
    pub fn definitions(&self) -> &definitions::DefinitionsClient {
        &self.definitions
    }

    /// Access the listings-items client.
    pub fn listings(&self) -> &listings::ListingsClient {
        &self.listings
    }

    /// Access the raw document fetcher.
    pub fn documents(&self) -> &fetch::DocumentClient {
        &self.documents
    }
}
