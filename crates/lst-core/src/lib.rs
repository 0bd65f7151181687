//! # lst-core — Foundational Types for the Listing Stack
//!
//! Defines the primitives every other crate in the workspace builds on:
//! identifier newtypes for the selling-partner domain, the workflow
//! configuration loaded from YAML, and the local document store used to
//! persist fetched schema documents byte-for-byte.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain identifiers.** `MarketplaceId`,
//!    `SellerId`, `Sku`, `Asin`, `ProductTypeName` — you cannot pass a
//!    SKU where a seller id is expected. No bare strings across crate
//!    seams.
//!
//! 2. **Configuration is a value, not ambient state.** `WorkflowConfig`
//!    is loaded once and passed explicitly into whichever component
//!    needs it. Secrets are redacted in `Debug` output.
//!
//! 3. **Byte-for-byte document persistence.** `DocumentStore` writes and
//!    reads documents without transformation, so a schema fetched from
//!    the network round-trips unchanged into the validator.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `lst-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod identity;
pub mod store;

pub use config::{ConfigError, WorkflowConfig};
pub use identity::{Asin, MarketplaceId, ProductTypeName, SellerId, Sku};
pub use store::{DocumentStore, StoreError};
