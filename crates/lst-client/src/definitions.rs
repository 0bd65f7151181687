//! Typed client for the product-type definitions API.
//!
//! Product types are discovered by keyword search; each definition then
//! links to two schema documents — the vendor meta-schema describing the
//! vocabulary, and the product-type schema the listing payload must
//! satisfy.

use serde::Deserialize;
use serde_json::Value;

use lst_core::{MarketplaceId, ProductTypeName};

use crate::catalog::csv;
use crate::error::ApiError;

/// Version path segment for the definitions API.
const API_PATH: &str = "definitions/2020-09-01/productTypes";

/// One product type from a keyword search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductType {
    pub name: ProductTypeName,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub marketplace_ids: Vec<MarketplaceId>,
}

/// Product-type search response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTypeList {
    #[serde(default)]
    pub product_types: Vec<ProductType>,
    #[serde(default)]
    pub product_type_version: Option<String>,
}

/// Reference to a downloadable schema document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaLinkRef {
    /// Pre-signed URL of the document.
    pub resource: String,
    #[serde(default)]
    pub verb: Option<String>,
}

/// A schema document link with its integrity checksum.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaLink {
    pub link: SchemaLinkRef,
    #[serde(default)]
    pub checksum: Option<String>,
}

/// A product-type definition.
///
/// `meta_schema` describes the vocabulary (what keywords mean and which
/// can be ignored); `schema` is the document listing payloads are
/// validated against.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTypeDefinition {
    pub meta_schema: SchemaLink,
    pub schema: SchemaLink,
    #[serde(default)]
    pub product_type: Option<ProductTypeName>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub property_groups: Option<Value>,
    #[serde(default)]
    pub locale: Option<String>,
}

/// Client for the product-type definitions API.
#[derive(Debug, Clone)]
pub struct DefinitionsClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl DefinitionsClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Search product types by keywords.
    ///
    /// Calls `GET {base_url}/definitions/2020-09-01/productTypes`.
    pub async fn search_product_types(
        &self,
        marketplace_ids: &[MarketplaceId],
        keywords: &[String],
        locale: &str,
    ) -> Result<ProductTypeList, ApiError> {
        let endpoint = "GET /definitions/productTypes";
        let url = format!("{}{}", self.base_url, API_PATH);

        let query = [
            (
                "marketplaceIds",
                csv(marketplace_ids.iter().map(MarketplaceId::as_str)),
            ),
            ("keywords", keywords.join(",")),
            ("locale", locale.to_string()),
            ("searchLocale", locale.to_string()),
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

    /// Fetch the definition of one product type.
    ///
    /// Calls `GET {base_url}/definitions/2020-09-01/productTypes/{name}`.
    pub async fn get_product_type_definition(
        &self,
        product_type: &ProductTypeName,
        marketplace_ids: &[MarketplaceId],
        requirements: &str,
        requirements_enforced: &str,
        locale: &str,
    ) -> Result<ProductTypeDefinition, ApiError> {
        let endpoint = format!("GET /definitions/productTypes/{product_type}");
        let url = format!("{}{}/{}", self.base_url, API_PATH, product_type.as_str());

        let query = [
            (
                "marketplaceIds",
                csv(marketplace_ids.iter().map(MarketplaceId::as_str)),
            ),
            ("requirements", requirements.to_string()),
            ("requirementsEnforced", requirements_enforced.to_string()),
            ("locale", locale.to_string()),
        ];

        let resp = self
            .http
            .get(&url)
            .query(&query)
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
    fn definition_deserializes_with_both_schema_links() {
        let body = json!({
            "metaSchema": {
                "link": {
                    "resource": "https://schemas.marketplace.test/meta-schema/v1",
                    "verb": "GET"
                },
                "checksum": "c2FtcGxl"
            },
            "schema": {
                "link": {
                    "resource": "https://schemas.marketplace.test/LUGGAGE",
                    "verb": "GET"
                },
                "checksum": "c2NoZW1h"
            },
            "productType": "LUGGAGE",
            "requirements": "LISTING_PRODUCT_ONLY",
            "propertyGroups": {},
            "locale": "en_US"
        });
        let def: ProductTypeDefinition = serde_json::from_value(body).unwrap();
        assert!(def.meta_schema.link.resource.contains("meta-schema"));
        assert!(def.schema.link.resource.ends_with("LUGGAGE"));
        assert_eq!(def.product_type.unwrap().as_str(), "LUGGAGE");
    }

    #[test]
    fn product_type_search_deserializes() {
        let body = json!({
            "productTypes": [
                { "name": "LUGGAGE", "displayName": "Luggage", "marketplaceIds": ["ATVPDKIKX0DER"] }
            ],
            "productTypeVersion": "UHqSqmb4FNUk="
        });
        let list: ProductTypeList = serde_json::from_value(body).unwrap();
        assert_eq!(list.product_types[0].name.as_str(), "LUGGAGE");
    }
}
