//! Keyword definitions and vendor extensions.
//!
//! Every keyword in an assembled vocabulary is either *standard* (its
//! semantics come from the base dialect engine) or an *extension*: a pair
//! of pure functions, one checking the keyword's schema value at compile
//! time and one applying it to an instance. The mapping from keyword name
//! to function is explicit and resolved once at compile time.
//!
//! The three vendor extensions measure what the standard dialect cannot:
//!
//! - `maxUniqueItems` — array size after deduplication by deep equality,
//! - `maxUtf8ByteLength` / `minUtf8ByteLength` — string length in UTF-8
//!   encoded bytes, not characters.

use std::collections::BTreeSet;

use serde_json::Value;

/// Checks the keyword's schema value when a schema is compiled.
pub type SchemaCheckFn = fn(&Value) -> Result<(), String>;

/// Applies the keyword to an instance. Arguments are the keyword's schema
/// value and the instance node; an `Err` carries the violation message.
pub type ApplyFn = fn(&Value, &Value) -> Result<(), String>;

/// The two halves of an extension keyword.
#[derive(Debug, Clone, Copy)]
pub struct ExtensionSpec {
    /// Compile-time shape check of the keyword's schema value.
    pub check_schema: SchemaCheckFn,
    /// Instance-level validation rule.
    pub apply: ApplyFn,
}

/// How a keyword's semantics are supplied.
#[derive(Debug, Clone, Copy)]
pub enum KeywordKind {
    /// Implemented by the base dialect engine.
    Standard,
    /// Vendor extension with explicit validation functions.
    Extension(ExtensionSpec),
}

/// A named validation rule. Identity is the name: two definitions with
/// the same name occupy the same slot in a vocabulary, and the later one
/// wins.
#[derive(Debug, Clone)]
pub struct KeywordDefinition {
    name: String,
    kind: KeywordKind,
}

impl KeywordDefinition {
    /// A keyword whose semantics the base dialect engine provides.
    pub fn standard(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: KeywordKind::Standard,
        }
    }

    /// An extension keyword with explicit validation functions.
    pub fn extension(name: impl Into<String>, spec: ExtensionSpec) -> Self {
        Self {
            name: name.into(),
            kind: KeywordKind::Extension(spec),
        }
    }

    /// The keyword's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How this keyword is implemented.
    pub fn kind(&self) -> KeywordKind {
        self.kind
    }

    /// The extension spec, if this is an extension keyword.
    pub fn as_extension(&self) -> Option<ExtensionSpec> {
        match self.kind {
            KeywordKind::Extension(spec) => Some(spec),
            KeywordKind::Standard => None,
        }
    }
}

/// Keyword name for the unique-item count bound.
pub const MAX_UNIQUE_ITEMS: &str = "maxUniqueItems";
/// Keyword name for the UTF-8 byte-length upper bound.
pub const MAX_UTF8_BYTE_LENGTH: &str = "maxUtf8ByteLength";
/// Keyword name for the UTF-8 byte-length lower bound.
pub const MIN_UTF8_BYTE_LENGTH: &str = "minUtf8ByteLength";

fn check_non_negative_integer(value: &Value) -> Result<(), String> {
    if value.as_u64().is_some() {
        Ok(())
    } else {
        Err("must be a non-negative integer".to_string())
    }
}

fn apply_max_unique_items(bound: &Value, instance: &Value) -> Result<(), String> {
    let (Some(bound), Some(items)) = (bound.as_u64(), instance.as_array()) else {
        return Ok(());
    };
    let mut unique: Vec<&Value> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    if unique.len() as u64 > bound {
        Err(format!(
            "array has {} unique items, maximum is {bound}",
            unique.len()
        ))
    } else {
        Ok(())
    }
}

fn apply_max_utf8_byte_length(bound: &Value, instance: &Value) -> Result<(), String> {
    let (Some(bound), Some(s)) = (bound.as_u64(), instance.as_str()) else {
        return Ok(());
    };
    let len = s.len() as u64;
    if len > bound {
        Err(format!("string is {len} UTF-8 bytes, maximum is {bound}"))
    } else {
        Ok(())
    }
}

fn apply_min_utf8_byte_length(bound: &Value, instance: &Value) -> Result<(), String> {
    let (Some(bound), Some(s)) = (bound.as_u64(), instance.as_str()) else {
        return Ok(());
    };
    let len = s.len() as u64;
    if len < bound {
        Err(format!("string is {len} UTF-8 bytes, minimum is {bound}"))
    } else {
        Ok(())
    }
}

/// The `maxUniqueItems` extension: bounds the number of array items left
/// after deduplication by deep equality.
pub fn max_unique_items() -> KeywordDefinition {
    KeywordDefinition::extension(
        MAX_UNIQUE_ITEMS,
        ExtensionSpec {
            check_schema: check_non_negative_integer,
            apply: apply_max_unique_items,
        },
    )
}

/// The `maxUtf8ByteLength` extension: bounds a string's UTF-8 encoded
/// byte length from above.
pub fn max_utf8_byte_length() -> KeywordDefinition {
    KeywordDefinition::extension(
        MAX_UTF8_BYTE_LENGTH,
        ExtensionSpec {
            check_schema: check_non_negative_integer,
            apply: apply_max_utf8_byte_length,
        },
    )
}

/// The `minUtf8ByteLength` extension: bounds a string's UTF-8 encoded
/// byte length from below.
pub fn min_utf8_byte_length() -> KeywordDefinition {
    KeywordDefinition::extension(
        MIN_UTF8_BYTE_LENGTH,
        ExtensionSpec {
            check_schema: check_non_negative_integer,
            apply: apply_min_utf8_byte_length,
        },
    )
}

/// The vendor's extension keywords, in declaration order.
pub fn vendor_extensions() -> Vec<KeywordDefinition> {
    vec![
        max_unique_items(),
        max_utf8_byte_length(),
        min_utf8_byte_length(),
    ]
}

/// The vendor keywords that are informational only and carry no
/// validation semantics. Callers may extend or replace this set; it is
/// a default, not a constant of the assembly algorithm.
pub fn default_excluded_keywords() -> BTreeSet<String> {
    ["editable", "enumNames"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn utf8_byte_length_counts_bytes_not_chars() {
        // "café" is four characters but five bytes in UTF-8.
        let bound = json!(4);
        let err = apply_max_utf8_byte_length(&bound, &json!("café")).unwrap_err();
        assert!(err.contains("5 UTF-8 bytes"), "got: {err}");

        apply_max_utf8_byte_length(&bound, &json!("caf")).unwrap();
        // Exactly at the bound passes.
        apply_max_utf8_byte_length(&json!(5), &json!("café")).unwrap();
    }

    #[test]
    fn min_utf8_byte_length_rejects_short_strings() {
        let bound = json!(1);
        assert!(apply_min_utf8_byte_length(&bound, &json!("")).is_err());
        apply_min_utf8_byte_length(&bound, &json!("é")).unwrap();
    }

    #[test]
    fn max_unique_items_dedupes_by_deep_equality() {
        let instance = json!(["a", "a", "b"]);
        assert!(apply_max_unique_items(&json!(1), &instance).is_err());
        apply_max_unique_items(&json!(2), &instance).unwrap();

        // Structurally equal objects count once.
        let nested = json!([{"k": [1, 2]}, {"k": [1, 2]}, {"k": [2, 1]}]);
        apply_max_unique_items(&json!(2), &nested).unwrap();
        assert!(apply_max_unique_items(&json!(1), &nested).is_err());
    }

    #[test]
    fn non_applicable_instance_types_pass() {
        apply_max_utf8_byte_length(&json!(1), &json!(42)).unwrap();
        apply_min_utf8_byte_length(&json!(10), &json!([])).unwrap();
        apply_max_unique_items(&json!(0), &json!("not an array")).unwrap();
    }

    #[test]
    fn keyword_values_must_be_non_negative_integers() {
        check_non_negative_integer(&json!(0)).unwrap();
        check_non_negative_integer(&json!(250)).unwrap();
        assert!(check_non_negative_integer(&json!(-1)).is_err());
        assert!(check_non_negative_integer(&json!(2.5)).is_err());
        assert!(check_non_negative_integer(&json!("5")).is_err());
    }

    #[test]
    fn vendor_extensions_are_declared_in_order() {
        let defs = vendor_extensions();
        let names: Vec<&str> = defs.iter().map(|d| d.name()).collect();
        assert_eq!(
            names,
            vec![MAX_UNIQUE_ITEMS, MAX_UTF8_BYTE_LENGTH, MIN_UTF8_BYTE_LENGTH]
        );
        assert!(defs.iter().all(|d| d.as_extension().is_some()));
    }
}
