//! # lst-schema — Meta-Schema Assembly & Payload Validation
//!
//! The vendor's product-type schemas are written against a customized
//! JSON Schema dialect: a standard draft with a handful of keywords that
//! carry no validation semantics, plus vendor extensions that measure
//! string lengths in UTF-8 bytes and array sizes after deduplication.
//! This crate assembles that vocabulary at runtime and compiles payload
//! schemas into reusable validators.
//!
//! ## Assembly Model
//!
//! A [`MetaSchemaSpec`] is built from three layers, merged with explicit
//! precedence (never inheritance):
//!
//! 1. the full keyword table of a supported base [`Dialect`],
//! 2. minus an excluded-name set (annotation-only vendor keywords),
//! 3. plus an ordered list of extension [`KeywordDefinition`]s, which
//!    override base keywords on name collision.
//!
//! The vendor meta-schema document itself forms the second dialect layer:
//! payload schemas are checked against it structurally before they are
//! compiled under the assembled vocabulary.
//!
//! ## Validation Contract
//!
//! [`PayloadValidator::validate`] is a pure function of its inputs. It
//! collects every violation in one pass rather than stopping at the
//! first, and an empty result means the instance satisfies every keyword
//! in the vocabulary, extensions included. Compiled specs and validators
//! hold no mutable state and may be shared across threads.

pub mod dialect;
pub mod document;
pub mod error;
pub mod keyword;
pub mod validate;

pub use dialect::Dialect;
pub use document::SchemaDocument;
pub use error::SchemaError;
pub use keyword::{
    default_excluded_keywords, max_unique_items, max_utf8_byte_length, min_utf8_byte_length,
    vendor_extensions, ExtensionSpec, KeywordDefinition, KeywordKind,
};
pub use validate::{MetaSchemaSpec, PayloadValidator, ValidationViolations, Violation};
