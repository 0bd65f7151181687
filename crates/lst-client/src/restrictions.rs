//! Typed client for the listing-restrictions API.
//!
//! When the product already exists in the catalog, this client reports
//! whether the seller is restricted from listing it, with per-reason
//! approval links.

use serde::Deserialize;

use lst_core::{Asin, MarketplaceId, SellerId};

use crate::catalog::csv;
use crate::error::ApiError;

/// Version path segment for the listing-restrictions API.
const API_PATH: &str = "listings/2021-08-01/restrictions";

/// Link a seller can follow to request approval.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestrictionLink {
    pub resource: String,
    #[serde(default)]
    pub verb: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// One reason a restriction applies.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestrictionReason {
    #[serde(default)]
    pub reason_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub links: Vec<RestrictionLink>,
}

/// A restriction on listing a catalog item in one marketplace.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restriction {
    pub marketplace_id: MarketplaceId,
    #[serde(default)]
    pub condition_type: Option<String>,
    #[serde(default)]
    pub reasons: Vec<RestrictionReason>,
}

/// Response from the restrictions API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestrictionList {
    #[serde(default)]
    pub restrictions: Vec<Restriction>,
}

/// Client for the listing-restrictions API.
#[derive(Debug, Clone)]
pub struct RestrictionsClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl RestrictionsClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Fetch listing restrictions for an ASIN.
    ///
    /// Calls `GET {base_url}/listings/2021-08-01/restrictions`. Pass
    /// `condition_type: None` to check all conditions.
    pub async fn get_listings_restrictions(
        &self,
        asin: &Asin,
        seller_id: &SellerId,
        marketplace_ids: &[MarketplaceId],
        condition_type: Option<&str>,
        reason_locale: &str,
    ) -> Result<RestrictionList, ApiError> {
        let endpoint = "GET /listings/restrictions";
        let url = format!("{}{}", self.base_url, API_PATH);

        let mut query = vec![
            ("asin", asin.as_str().to_string()),
            ("sellerId", seller_id.as_str().to_string()),
            (
                "marketplaceIds",
                csv(marketplace_ids.iter().map(MarketplaceId::as_str)),
            ),
            ("reasonLocale", reason_locale.to_string()),
        ];
        if let Some(condition) = condition_type {
            query.push(("conditionType", condition.to_string()));
        }

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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn restriction_list_deserializes_from_api_shape() {
        let body = json!({
            "restrictions": [
                {
                    "marketplaceId": "ATVPDKIKX0DER",
                    "conditionType": "new_new",
                    "reasons": [
                        {
                            "reasonCode": "APPROVAL_REQUIRED",
                            "message": "You need approval to list this product.",
                            "links": [
                                {
                                    "resource": "https://sellercentral.test/approval",
                                    "verb": "GET",
                                    "title": "Request Approval"
                                }
                            ]
                        }
                    ]
                }
            ]
        });
        let list: RestrictionList = serde_json::from_value(body).unwrap();
        assert_eq!(list.restrictions.len(), 1);
        let reason = &list.restrictions[0].reasons[0];
        assert_eq!(reason.reason_code.as_deref(), Some("APPROVAL_REQUIRED"));
        assert_eq!(reason.links[0].title.as_deref(), Some("Request Approval"));
    }

    #[test]
    fn unrestricted_item_yields_empty_list() {
        let list: RestrictionList = serde_json::from_value(json!({"restrictions": []})).unwrap();
        assert!(list.restrictions.is_empty());
    }
}
