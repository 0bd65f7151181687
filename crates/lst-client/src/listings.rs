//! Typed client for the listings-items API.
//!
//! Submits the validated payload in validation-preview mode: the server
//! runs its business rules and reports issues without creating or
//! changing a listing. Submission issues are a separate finding class
//! from schema validation violations — they are produced server-side.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use lst_core::{MarketplaceId, ProductTypeName, SellerId, Sku};

use crate::catalog::csv;
use crate::error::ApiError;

/// Version path segment for the listings-items API.
const API_PATH: &str = "listings/2021-08-01/items";

/// Submission mode requesting server-side validation without persisting
/// the listing.
pub const MODE_VALIDATION_PREVIEW: &str = "VALIDATION_PREVIEW";

/// Requirements set the listing payload was authored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Requirements {
    Listing,
    ListingProductOnly,
    ListingOfferOnly,
}

/// Outcome of a listing submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Accepted,
    Invalid,
    Valid,
    /// Forward-compatible catch-all for statuses introduced after this
    /// client version.
    #[serde(other)]
    Unknown,
}

/// Severity of a server-side submission issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueSeverity {
    Error,
    Warning,
    Info,
    #[serde(other)]
    Unknown,
}

/// One business-rule issue reported by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionIssue {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub severity: Option<IssueSeverity>,
    #[serde(default)]
    pub attribute_names: Vec<String>,
}

/// Response from a listing submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsItemSubmissionResponse {
    #[serde(default)]
    pub sku: Option<Sku>,
    pub status: SubmissionStatus,
    #[serde(default)]
    pub submission_id: Option<String>,
    #[serde(default)]
    pub issues: Vec<SubmissionIssue>,
    #[serde(default)]
    pub identifiers: Option<Value>,
}

/// Request body for a listing submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsItemPutRequest {
    pub product_type: ProductTypeName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Requirements>,
    /// The listing attributes, passed through exactly as validated.
    pub attributes: Value,
}

/// Client for the listings-items API.
#[derive(Debug, Clone)]
pub struct ListingsClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl ListingsClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Submit a listing item.
    ///
    /// Calls `PUT {base_url}/listings/2021-08-01/items/{sellerId}/{sku}`.
    /// With `mode = MODE_VALIDATION_PREVIEW` the server validates without
    /// persisting anything.
    #[allow(clippy::too_many_arguments)]
    pub async fn put_listings_item(
        &self,
        seller_id: &SellerId,
        sku: &Sku,
        marketplace_ids: &[MarketplaceId],
        included_data: &[String],
        mode: &str,
        issue_locale: &str,
        request: &ListingsItemPutRequest,
    ) -> Result<ListingsItemSubmissionResponse, ApiError> {
        let endpoint = format!("PUT /listings/items/{seller_id}/{sku}");
        let url = format!(
            "{}{}/{}/{}",
            self.base_url,
            API_PATH,
            seller_id.as_str(),
            sku.as_str()
        );

        let query = [
            (
                "marketplaceIds",
                csv(marketplace_ids.iter().map(MarketplaceId::as_str)),
            ),
            ("includedData", included_data.join(",")),
            ("mode", mode.to_string()),
            ("issueLocale", issue_locale.to_string()),
        ];

        let resp = self
            .http
            .put(&url)
            .query(&query)
            .json(request)
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

        resp.json().await.map_err(|e| ApiError::Deserialization {
            endpoint,
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn submission_response_deserializes_with_issues() {
        let body = json!({
            "sku": "LUGGAGE-001",
            "status": "INVALID",
            "submissionId": "f1dc2914-original",
            "issues": [
                {
                    "code": "90220",
                    "message": "'brand' is required but not supplied.",
                    "severity": "ERROR",
                    "attributeNames": ["brand"]
                }
            ]
        });
        let resp: ListingsItemSubmissionResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.status, SubmissionStatus::Invalid);
        assert_eq!(resp.issues[0].severity, Some(IssueSeverity::Error));
        assert_eq!(resp.issues[0].attribute_names, vec!["brand"]);
    }

    #[test]
    fn unknown_status_is_forward_compatible() {
        let resp: ListingsItemSubmissionResponse =
            serde_json::from_value(json!({ "status": "SOMETHING_NEW" })).unwrap();
        assert_eq!(resp.status, SubmissionStatus::Unknown);
    }

    #[test]
    fn put_request_serializes_to_camel_case() {
        let request = ListingsItemPutRequest {
            product_type: ProductTypeName("LUGGAGE".into()),
            requirements: Some(Requirements::ListingProductOnly),
            attributes: json!({ "item_name": [{ "value": "Carry-On" }] }),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["productType"], "LUGGAGE");
        assert_eq!(body["requirements"], "LISTING_PRODUCT_ONLY");
        assert!(body["attributes"]["item_name"].is_array());
    }
}
