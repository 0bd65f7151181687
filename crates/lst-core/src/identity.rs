//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the identifiers used across the selling-partner
//! APIs. These prevent accidental identifier confusion — you cannot pass
//! an `Asin` where a `Sku` is expected, even though both are strings on
//! the wire.

use serde::{Deserialize, Serialize};

/// Marketplace identifier (e.g. `ATVPDKIKX0DER` for the US marketplace).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketplaceId(pub String);

/// Selling-partner (merchant) identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SellerId(pub String);

/// Seller-assigned stock keeping unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sku(pub String);

/// Catalog item identifier assigned by the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asin(pub String);

/// Product type name as returned by the definitions API (e.g. `LUGGAGE`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductTypeName(pub String);

impl MarketplaceId {
    /// Access the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl SellerId {
    /// Access the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Sku {
    /// Access the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Asin {
    /// Access the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ProductTypeName {
    /// Access the raw name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MarketplaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for SellerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for Sku {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for Asin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for ProductTypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
