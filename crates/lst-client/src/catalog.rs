//! Typed client for the catalog-items API.
//!
//! Used at the start of the workflow to check whether a product already
//! exists in the marketplace catalog before a new listing is created.

use serde::Deserialize;
use serde_json::Value;

use lst_core::{Asin, MarketplaceId};

use crate::error::ApiError;

/// Version path segment for the catalog-items API.
const API_PATH: &str = "catalog/2022-04-01/items";

/// One catalog item as returned by a search.
///
/// Fields use `#[serde(default)]` for resilience against schema
/// evolution in the live API; unmodeled members are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub asin: Asin,
    #[serde(default)]
    pub summaries: Option<Value>,
    #[serde(default)]
    pub attributes: Option<Value>,
}

/// Paginated catalog search response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSearchResults {
    #[serde(default)]
    pub number_of_results: u64,
    #[serde(default)]
    pub items: Vec<CatalogItem>,
}

/// Client for the catalog-items API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl CatalogClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Search the catalog by keywords.
    ///
    /// Calls `GET {base_url}/catalog/2022-04-01/items`.
    pub async fn search_items(
        &self,
        marketplace_ids: &[MarketplaceId],
        keywords: &[String],
        included_data: &[String],
        page_size: u32,
    ) -> Result<ItemSearchResults, ApiError> {
        let endpoint = "GET /catalog/items";
        let url = format!("{}{}", self.base_url, API_PATH);

        let query = [
            ("marketplaceIds", csv(marketplace_ids.iter().map(MarketplaceId::as_str))),
            ("keywords", keywords.join(",")),
            ("includedData", included_data.join(",")),
            ("pageSize", page_size.to_string()),
        ];

        let resp = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| ApiError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        resp.json().await.map_err(|e| ApiError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }
}

pub(crate) fn csv<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join(",")
}
