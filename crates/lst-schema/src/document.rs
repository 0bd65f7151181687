//! Schema document handling.
//!
//! A [`SchemaDocument`] pairs the raw JSON text of a schema with its
//! parsed value. The raw text is kept verbatim so that a document fetched
//! from the network, persisted, and read back compiles from exactly the
//! bytes the vendor served.

use serde_json::Value;

use crate::error::SchemaError;

/// An immutable, named JSON Schema document.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    name: String,
    raw: String,
    value: Value,
}

impl SchemaDocument {
    /// Parse raw JSON text into a document. The name is used in error
    /// messages only.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaParse`] if the text is not valid JSON.
    pub fn parse(name: impl Into<String>, raw: impl Into<String>) -> Result<Self, SchemaError> {
        let name = name.into();
        let raw = raw.into();
        let value = serde_json::from_str(&raw).map_err(|e| SchemaError::SchemaParse {
            name: name.clone(),
            reason: format!("invalid JSON: {e}"),
        })?;
        Ok(Self { name, raw, value })
    }

    /// The document's name as given at parse time.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The original JSON text, byte-identical to what was parsed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed schema content.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The document's declared `$id`, if any.
    pub fn declared_id(&self) -> Option<&str> {
        self.value.get("$id").and_then(Value::as_str)
    }

    /// The document's declared `$schema` (its dialect), if any.
    pub fn declared_dialect(&self) -> Option<&str> {
        self.value.get("$schema").and_then(Value::as_str)
    }
}
