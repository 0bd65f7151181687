//! Supported base JSON Schema dialects.
//!
//! A [`Dialect`] names a standard draft and exposes its full keyword
//! table. The table is the first layer of a [`crate::MetaSchemaSpec`]'s
//! vocabulary; the validation semantics of these keywords come from the
//! underlying `jsonschema` engine.

use crate::error::SchemaError;

/// A versioned standard JSON Schema draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Draft 7 (`http://json-schema.org/draft-07/schema`).
    Draft7,
    /// Draft 2019-09 (`https://json-schema.org/draft/2019-09/schema`).
    /// The draft the vendor's meta-schema builds on.
    Draft201909,
    /// Draft 2020-12 (`https://json-schema.org/draft/2020-12/schema`).
    Draft202012,
}

/// Keyword table for draft 7.
const DRAFT7_KEYWORDS: &[&str] = &[
    "$schema",
    "$id",
    "$ref",
    "$comment",
    "definitions",
    "title",
    "description",
    "default",
    "readOnly",
    "writeOnly",
    "examples",
    "multipleOf",
    "maximum",
    "exclusiveMaximum",
    "minimum",
    "exclusiveMinimum",
    "maxLength",
    "minLength",
    "pattern",
    "additionalItems",
    "items",
    "maxItems",
    "minItems",
    "uniqueItems",
    "contains",
    "maxProperties",
    "minProperties",
    "required",
    "properties",
    "patternProperties",
    "additionalProperties",
    "dependencies",
    "propertyNames",
    "const",
    "enum",
    "type",
    "format",
    "contentMediaType",
    "contentEncoding",
    "if",
    "then",
    "else",
    "allOf",
    "anyOf",
    "oneOf",
    "not",
];

/// Keyword table for draft 2019-09.
const DRAFT201909_KEYWORDS: &[&str] = &[
    "$schema",
    "$id",
    "$anchor",
    "$ref",
    "$recursiveRef",
    "$recursiveAnchor",
    "$vocabulary",
    "$comment",
    "$defs",
    "title",
    "description",
    "default",
    "deprecated",
    "readOnly",
    "writeOnly",
    "examples",
    "multipleOf",
    "maximum",
    "exclusiveMaximum",
    "minimum",
    "exclusiveMinimum",
    "maxLength",
    "minLength",
    "pattern",
    "additionalItems",
    "unevaluatedItems",
    "items",
    "contains",
    "maxContains",
    "minContains",
    "maxItems",
    "minItems",
    "uniqueItems",
    "maxProperties",
    "minProperties",
    "required",
    "dependentRequired",
    "dependentSchemas",
    "properties",
    "patternProperties",
    "additionalProperties",
    "unevaluatedProperties",
    "propertyNames",
    "const",
    "enum",
    "type",
    "format",
    "contentMediaType",
    "contentEncoding",
    "contentSchema",
    "if",
    "then",
    "else",
    "allOf",
    "anyOf",
    "oneOf",
    "not",
];

/// Keyword table for draft 2020-12.
const DRAFT202012_KEYWORDS: &[&str] = &[
    "$schema",
    "$id",
    "$anchor",
    "$ref",
    "$dynamicRef",
    "$dynamicAnchor",
    "$vocabulary",
    "$comment",
    "$defs",
    "title",
    "description",
    "default",
    "deprecated",
    "readOnly",
    "writeOnly",
    "examples",
    "multipleOf",
    "maximum",
    "exclusiveMaximum",
    "minimum",
    "exclusiveMinimum",
    "maxLength",
    "minLength",
    "pattern",
    "prefixItems",
    "unevaluatedItems",
    "items",
    "contains",
    "maxContains",
    "minContains",
    "maxItems",
    "minItems",
    "uniqueItems",
    "maxProperties",
    "minProperties",
    "required",
    "dependentRequired",
    "dependentSchemas",
    "properties",
    "patternProperties",
    "additionalProperties",
    "unevaluatedProperties",
    "propertyNames",
    "const",
    "enum",
    "type",
    "format",
    "contentMediaType",
    "contentEncoding",
    "contentSchema",
    "if",
    "then",
    "else",
    "allOf",
    "anyOf",
    "oneOf",
    "not",
];

impl Dialect {
    /// Resolve a dialect from its canonical URI. Short forms
    /// (`"draft-07"`, `"2019-09"`, `"2020-12"`) are accepted as well.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnsupportedDialect`] for anything else.
    pub fn from_id(id: &str) -> Result<Self, SchemaError> {
        match id.trim_end_matches('#') {
            "http://json-schema.org/draft-07/schema" | "draft-07" => Ok(Self::Draft7),
            "https://json-schema.org/draft/2019-09/schema" | "2019-09" => Ok(Self::Draft201909),
            "https://json-schema.org/draft/2020-12/schema" | "2020-12" => Ok(Self::Draft202012),
            _ => Err(SchemaError::UnsupportedDialect {
                dialect: id.to_string(),
            }),
        }
    }

    /// The dialect's canonical URI.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Draft7 => "http://json-schema.org/draft-07/schema#",
            Self::Draft201909 => "https://json-schema.org/draft/2019-09/schema",
            Self::Draft202012 => "https://json-schema.org/draft/2020-12/schema",
        }
    }

    /// The full keyword table of this dialect.
    pub fn keyword_names(&self) -> &'static [&'static str] {
        match self {
            Self::Draft7 => DRAFT7_KEYWORDS,
            Self::Draft201909 => DRAFT201909_KEYWORDS,
            Self::Draft202012 => DRAFT202012_KEYWORDS,
        }
    }

    /// The engine-level draft selector.
    pub(crate) fn engine_draft(&self) -> jsonschema::Draft {
        match self {
            Self::Draft7 => jsonschema::Draft::Draft7,
            Self::Draft201909 => jsonschema::Draft::Draft201909,
            Self::Draft202012 => jsonschema::Draft::Draft202012,
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}
