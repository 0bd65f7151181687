//! # Vocabulary Assembly & Payload Validation
//!
//! Builds a [`MetaSchemaSpec`] — the merged keyword vocabulary of a base
//! dialect, an excluded-name set, and vendor extension keywords — and
//! compiles payload schemas against it into reusable validators.
//!
//! ## Two-Layer Dialect
//!
//! The vendor meta-schema customizes a standard draft; payload schemas
//! are written against the vendor meta-schema. `compile` therefore runs
//! two passes: a structural pass validating the payload schema document
//! against the vendor meta-schema, then compilation of the payload
//! schema under the assembled vocabulary. The vendor's `$schema` pointer
//! is resolved by the assembled vocabulary, not by the engine: after the
//! structural pass the payload schema is compiled under the base
//! dialect, with extension keywords registered and excluded keywords
//! downgraded to annotations.
//!
//! ## Schema Resolution
//!
//! A local retriever resolves the vendor meta-schema's `$id` from memory
//! and answers any other unresolved URI with a permissive schema, so
//! compilation never makes a network request.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use jsonschema::paths::{LazyLocation, Location};
use jsonschema::{Keyword, Retrieve, Uri, ValidationError, ValidationOptions};
use serde_json::Value;

use crate::dialect::Dialect;
use crate::document::SchemaDocument;
use crate::error::SchemaError;
use crate::keyword::{ApplyFn, ExtensionSpec, KeywordDefinition, KeywordKind};

/// Local retriever that resolves `$ref` URIs from schemas loaded in
/// memory.
///
/// Prevents the engine from making network requests: the vendor
/// meta-schema resolves from the registry, and any other unresolved URI
/// yields a permissive schema that accepts anything.
struct LocalSchemaRetriever {
    /// Map from URI string to schema value.
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        if let Some(value) = self.schemas_by_uri.get(uri.as_str()) {
            return Ok(value.clone());
        }
        Ok(serde_json::json!({}))
    }
}

/// A single constraint failure with full location context.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Name of the keyword that failed.
    pub keyword: String,
    /// JSON Pointer to the failing keyword within the schema.
    pub schema_location: String,
    /// Path the evaluator took to reach the keyword. Coincides with
    /// `schema_location` for schemas that do not use references.
    pub evaluation_path: String,
    /// JSON Pointer to the offending node in the instance.
    pub instance_location: String,
    /// The offending instance value.
    pub instance: Value,
    /// Machine-readable message key (the failing keyword's name).
    pub message_key: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_location.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_location, self.message)
        }
    }
}

/// Collection of validation violations from one `validate` call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A named keyword vocabulary: base dialect minus exclusions plus
/// extensions, paired with the vendor meta-schema document that payload
/// schemas must satisfy.
///
/// ## Thread Safety
///
/// Immutable after assembly; may be shared across threads.
#[derive(Debug)]
pub struct MetaSchemaSpec {
    /// Identifier of the vocabulary (the meta-schema's declared `$id`).
    id: String,
    /// Base dialect supplying the standard keyword semantics.
    dialect: Dialect,
    /// Merged keyword vocabulary, name → definition.
    keywords: BTreeMap<String, KeywordDefinition>,
    /// Names removed from the base dialect (annotation-only).
    excluded: BTreeSet<String>,
    /// The vendor meta-schema document.
    document: SchemaDocument,
}

impl MetaSchemaSpec {
    /// Assemble a vocabulary from a base dialect, an excluded-name set,
    /// an ordered list of extension keywords, and the vendor meta-schema
    /// document.
    ///
    /// Exclusion is applied before addition: an extension may reuse an
    /// excluded name, and extensions override base keywords on name
    /// collision.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnsupportedDialect`] if `dialect_id` does
    /// not name a supported draft.
    pub fn assemble(
        dialect_id: &str,
        excluded_keywords: impl IntoIterator<Item = String>,
        extensions: impl IntoIterator<Item = KeywordDefinition>,
        meta_schema: SchemaDocument,
    ) -> Result<Self, SchemaError> {
        let dialect = Dialect::from_id(dialect_id)?;
        let excluded: BTreeSet<String> = excluded_keywords.into_iter().collect();

        let mut keywords = BTreeMap::new();
        for name in dialect.keyword_names() {
            if !excluded.contains(*name) {
                keywords.insert((*name).to_string(), KeywordDefinition::standard(*name));
            }
        }
        for def in extensions {
            keywords.insert(def.name().to_string(), def);
        }

        let id = meta_schema
            .declared_id()
            .map(str::to_string)
            .unwrap_or_else(|| format!("urn:meta-schema:{}", meta_schema.name()));

        Ok(Self {
            id,
            dialect,
            keywords,
            excluded,
            document: meta_schema,
        })
    }

    /// The vocabulary's identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The base dialect this vocabulary was assembled from.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The vendor meta-schema document.
    pub fn document(&self) -> &SchemaDocument {
        &self.document
    }

    /// Names of every keyword in the vocabulary, sorted.
    pub fn keyword_names(&self) -> Vec<&str> {
        self.keywords.keys().map(String::as_str).collect()
    }

    /// Look up a keyword definition by name.
    pub fn keyword(&self, name: &str) -> Option<&KeywordDefinition> {
        self.keywords.get(name)
    }

    /// Compile a payload schema document into a reusable validator.
    ///
    /// Runs the structural pass first: the payload schema must satisfy
    /// the vendor meta-schema under this vocabulary. Compilation aborts
    /// on the first fatal error.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaParse`] if the payload schema
    /// violates the meta-schema's structural rules, and
    /// [`SchemaError::ValidatorBuild`] if the engine rejects the schema
    /// (e.g. a malformed extension keyword value).
    pub fn compile(&self, payload_schema: &SchemaDocument) -> Result<PayloadValidator, SchemaError> {
        let meta_validator = self.build_engine(self.document.value(), self.document.name())?;
        let structural = collect_violations(meta_validator.iter_errors(payload_schema.value()));
        if !structural.is_empty() {
            return Err(SchemaError::SchemaParse {
                name: payload_schema.name().to_string(),
                reason: format!("does not satisfy meta-schema '{}':\n{structural}", self.id),
            });
        }

        let engine = self.build_engine(payload_schema.value(), payload_schema.name())?;
        Ok(PayloadValidator {
            schema_name: payload_schema.name().to_string(),
            engine,
        })
    }

    /// Build `ValidationOptions` carrying the dialect, the local
    /// retriever, every extension keyword, and an annotation-only
    /// downgrade for each excluded name.
    fn build_options(&self) -> ValidationOptions {
        let mut opts = jsonschema::options();
        opts.with_draft(self.dialect.engine_draft());

        let mut schemas_by_uri = HashMap::new();
        schemas_by_uri.insert(self.id.clone(), self.document.value().clone());
        opts.with_retriever(LocalSchemaRetriever { schemas_by_uri });

        for def in self.keywords.values() {
            if let KeywordKind::Extension(spec) = def.kind() {
                opts.with_keyword(
                    def.name().to_string(),
                    extension_factory(def.name().to_string(), spec),
                );
            }
        }
        for name in &self.excluded {
            if !self.keywords.contains_key(name) {
                opts.with_keyword(name.clone(), annotation_only_factory());
            }
        }
        opts
    }

    fn build_engine(
        &self,
        schema: &Value,
        name: &str,
    ) -> Result<jsonschema::Validator, SchemaError> {
        let schema = self.engine_schema(schema);
        let opts = self.build_options();
        opts.build(&schema).map_err(|e| SchemaError::ValidatorBuild {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }

    /// The engine only understands standard `$schema` URIs. A document
    /// declaring the vendor meta-schema as its dialect is compiled under
    /// the base draft instead; the vendor layer is enforced by the
    /// structural pass and the registered keywords.
    fn engine_schema(&self, schema: &Value) -> Value {
        let mut schema = schema.clone();
        if let Some(obj) = schema.as_object_mut() {
            let nonstandard = obj
                .get("$schema")
                .and_then(Value::as_str)
                .is_some_and(|id| Dialect::from_id(id).is_err());
            if nonstandard {
                obj.insert(
                    "$schema".to_string(),
                    Value::String(self.dialect.id().to_string()),
                );
            }
        }
        schema
    }
}

/// A compiled validator bound to one vocabulary and one payload schema.
///
/// Stateless across calls; every `validate` is independent and
/// re-entrant, and the validator may be shared across threads.
#[derive(Debug)]
pub struct PayloadValidator {
    schema_name: String,
    engine: jsonschema::Validator,
}

impl PayloadValidator {
    /// Name of the payload schema this validator was compiled from.
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Check one instance against the compiled schema, collecting every
    /// violation rather than stopping at the first.
    ///
    /// An empty result means the instance satisfies every applicable
    /// keyword in the vocabulary, extension keywords included.
    pub fn validate(&self, instance: &Value) -> ValidationViolations {
        collect_violations(self.engine.iter_errors(instance))
    }

    /// Parse raw JSON text and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InstanceParse`] if the text is not valid
    /// JSON; validation is not attempted in that case.
    pub fn validate_text(&self, raw: &str) -> Result<ValidationViolations, SchemaError> {
        let instance: Value = serde_json::from_str(raw).map_err(|e| SchemaError::InstanceParse {
            reason: e.to_string(),
        })?;
        Ok(self.validate(&instance))
    }

    /// Boolean shortcut when the violation details are not needed.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.engine.is_valid(instance)
    }
}

/// Extension keyword compiled against one schema value.
struct CompiledExtension {
    keyword: String,
    value: Value,
    apply: ApplyFn,
    location: Location,
}

impl Keyword for CompiledExtension {
    fn validate<'i>(
        &self,
        instance: &'i Value,
        location: &LazyLocation,
    ) -> Result<(), ValidationError<'i>> {
        match (self.apply)(&self.value, instance) {
            Ok(()) => Ok(()),
            Err(message) => Err(ValidationError::custom(
                self.location.clone(),
                location.into(),
                instance,
                format!("{}: {message}", self.keyword),
            )),
        }
    }

    fn is_valid(&self, instance: &Value) -> bool {
        (self.apply)(&self.value, instance).is_ok()
    }
}

/// Keyword that validates nothing. Excluded keywords compile to this so
/// the engine treats them as annotations regardless of their value.
struct AnnotationOnly;

impl Keyword for AnnotationOnly {
    fn validate<'i>(
        &self,
        _instance: &'i Value,
        _location: &LazyLocation,
    ) -> Result<(), ValidationError<'i>> {
        Ok(())
    }

    fn is_valid(&self, _instance: &Value) -> bool {
        true
    }
}

/// Factory registering one extension keyword with the engine. The
/// keyword's schema value is shape-checked here, at compile time.
fn extension_factory(
    keyword: String,
    spec: ExtensionSpec,
) -> impl for<'a> Fn(
    &'a serde_json::Map<String, Value>,
    &'a Value,
    Location,
) -> Result<Box<dyn Keyword>, ValidationError<'a>>
       + Send
       + Sync
       + 'static {
    move |_parent, value, path| {
        (spec.check_schema)(value).map_err(|reason| {
            ValidationError::custom(
                path.clone(),
                path.clone(),
                value,
                format!("{keyword}: {reason}"),
            )
        })?;
        Ok(Box::new(CompiledExtension {
            keyword: keyword.clone(),
            value: value.clone(),
            apply: spec.apply,
            location: path,
        }) as Box<dyn Keyword>)
    }
}

/// Factory for annotation-only keywords.
fn annotation_only_factory() -> impl for<'a> Fn(
    &'a serde_json::Map<String, Value>,
    &'a Value,
    Location,
) -> Result<Box<dyn Keyword>, ValidationError<'a>>
       + Send
       + Sync
       + 'static {
    |_parent, _value, _path| Ok(Box::new(AnnotationOnly) as Box<dyn Keyword>)
}

/// The failing keyword's name: the last non-index segment of the schema
/// location.
fn keyword_of(schema_location: &str) -> String {
    schema_location
        .rsplit('/')
        .find(|seg| !seg.is_empty() && seg.parse::<usize>().is_err())
        .unwrap_or("schema")
        .to_string()
}

fn collect_violations<'a>(
    errors: impl Iterator<Item = ValidationError<'a>>,
) -> ValidationViolations {
    let violations = errors
        .map(|error| {
            let message = error.to_string();
            let schema_location = error.schema_path.to_string();
            let keyword = keyword_of(&schema_location);
            Violation {
                message_key: keyword.clone(),
                keyword,
                evaluation_path: schema_location.clone(),
                schema_location,
                instance_location: error.instance_path.to_string(),
                instance: error.instance.into_owned(),
                message,
            }
        })
        .collect();
    ValidationViolations { violations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::{
        default_excluded_keywords, max_utf8_byte_length, vendor_extensions, MAX_UNIQUE_ITEMS,
        MAX_UTF8_BYTE_LENGTH, MIN_UTF8_BYTE_LENGTH,
    };
    use serde_json::json;

    const DIALECT_2019: &str = "https://json-schema.org/draft/2019-09/schema";
    const META_SCHEMA_ID: &str = "https://schemas.marketplace.test/product-types/meta-schema/v1";

    fn meta_schema_doc() -> SchemaDocument {
        let value = json!({
            "$schema": DIALECT_2019,
            "$id": META_SCHEMA_ID,
            "type": "object",
            "required": ["type", "properties"],
            "properties": {
                "type": { "const": "object" }
            }
        });
        SchemaDocument::parse("meta-schema.json", value.to_string()).unwrap()
    }

    fn product_schema_doc() -> SchemaDocument {
        let value = json!({
            "$schema": META_SCHEMA_ID,
            "type": "object",
            "required": ["item_name"],
            "properties": {
                "item_name": {
                    "type": "string",
                    "minUtf8ByteLength": 1,
                    "maxUtf8ByteLength": 4,
                    "editable": false,
                    "enumNames": ["Item Name"]
                },
                "bullet_point": {
                    "type": "array",
                    "items": { "type": "string" },
                    "maxUniqueItems": 2
                }
            }
        });
        SchemaDocument::parse("product-schema.json", value.to_string()).unwrap()
    }

    fn assembled() -> MetaSchemaSpec {
        MetaSchemaSpec::assemble(
            DIALECT_2019,
            default_excluded_keywords(),
            vendor_extensions(),
            meta_schema_doc(),
        )
        .unwrap()
    }

    #[test]
    fn assembled_vocabulary_is_base_minus_excluded_plus_extensions() {
        let spec = MetaSchemaSpec::assemble(
            DIALECT_2019,
            ["format".to_string(), "editable".to_string()],
            vendor_extensions(),
            meta_schema_doc(),
        )
        .unwrap();

        let mut expected: BTreeSet<String> = Dialect::Draft201909
            .keyword_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        expected.remove("format");
        for name in [MAX_UNIQUE_ITEMS, MAX_UTF8_BYTE_LENGTH, MIN_UTF8_BYTE_LENGTH] {
            expected.insert(name.to_string());
        }

        let actual: BTreeSet<String> =
            spec.keyword_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn extension_wins_over_excluded_base_keyword() {
        let reused = KeywordDefinition::extension(
            "maxLength",
            max_utf8_byte_length().as_extension().unwrap(),
        );
        let spec = MetaSchemaSpec::assemble(
            DIALECT_2019,
            ["maxLength".to_string()],
            [reused],
            meta_schema_doc(),
        )
        .unwrap();

        let def = spec.keyword("maxLength").unwrap();
        assert!(def.as_extension().is_some(), "extension definition must win");
    }

    #[test]
    fn unknown_dialect_is_rejected() {
        let err = MetaSchemaSpec::assemble(
            "https://json-schema.org/draft-03/schema",
            default_excluded_keywords(),
            vendor_extensions(),
            meta_schema_doc(),
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedDialect { .. }), "got: {err}");
    }

    #[test]
    fn spec_id_comes_from_meta_schema_document() {
        assert_eq!(assembled().id(), META_SCHEMA_ID);
    }

    #[test]
    fn clean_payload_has_no_violations() {
        let validator = assembled().compile(&product_schema_doc()).unwrap();
        let violations = validator.validate(&json!({
            "item_name": "caf",
            "bullet_point": ["a", "a", "b"]
        }));
        assert!(violations.is_empty(), "unexpected: {violations}");
    }

    #[test]
    fn multibyte_string_violates_byte_length_bound() {
        let validator = assembled().compile(&product_schema_doc()).unwrap();
        // "café" is 5 bytes in UTF-8; the schema allows 4.
        let violations = validator.validate(&json!({ "item_name": "café" }));
        assert_eq!(violations.len(), 1, "got: {violations}");

        let v = &violations.violations()[0];
        assert_eq!(v.keyword, MAX_UTF8_BYTE_LENGTH);
        assert_eq!(v.message_key, MAX_UTF8_BYTE_LENGTH);
        assert_eq!(v.instance_location, "/item_name");
        assert_eq!(v.instance, json!("café"));
        assert!(v.schema_location.ends_with(MAX_UTF8_BYTE_LENGTH), "got: {}", v.schema_location);
    }

    #[test]
    fn duplicate_heavy_array_violates_unique_items_bound() {
        let validator = assembled().compile(&product_schema_doc()).unwrap();
        let violations = validator.validate(&json!({
            "item_name": "caf",
            "bullet_point": ["a", "a", "b", "c"]
        }));
        assert_eq!(violations.len(), 1, "got: {violations}");
        assert_eq!(violations.violations()[0].keyword, MAX_UNIQUE_ITEMS);
        assert_eq!(violations.violations()[0].instance_location, "/bullet_point");
    }

    #[test]
    fn all_violations_are_collected_in_one_pass() {
        let validator = assembled().compile(&product_schema_doc()).unwrap();
        let violations = validator.validate(&json!({
            "item_name": "",
            "bullet_point": ["a", "b", "c"]
        }));
        let keywords: Vec<&str> = violations
            .violations()
            .iter()
            .map(|v| v.keyword.as_str())
            .collect();
        assert!(keywords.contains(&MIN_UTF8_BYTE_LENGTH), "got: {keywords:?}");
        assert!(keywords.contains(&MAX_UNIQUE_ITEMS), "got: {keywords:?}");
    }

    #[test]
    fn validate_is_idempotent() {
        let validator = assembled().compile(&product_schema_doc()).unwrap();
        let instance = json!({ "item_name": "café", "bullet_point": ["x", "x", "y", "z"] });
        let first = validator.validate(&instance);
        let second = validator.validate(&instance);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn malformed_instance_text_is_an_instance_parse_error() {
        let validator = assembled().compile(&product_schema_doc()).unwrap();
        let err = validator.validate_text("{\"item_name\": ").unwrap_err();
        assert!(matches!(err, SchemaError::InstanceParse { .. }), "got: {err}");
    }

    #[test]
    fn payload_schema_failing_the_structural_pass_is_rejected() {
        // Missing the required top-level "properties" member.
        let bad = SchemaDocument::parse(
            "bad-schema.json",
            json!({ "$schema": META_SCHEMA_ID, "type": "object" }).to_string(),
        )
        .unwrap();
        let err = assembled().compile(&bad).unwrap_err();
        match err {
            SchemaError::SchemaParse { name, reason } => {
                assert_eq!(name, "bad-schema.json");
                assert!(reason.contains("properties"), "got: {reason}");
            }
            other => panic!("expected SchemaParse, got: {other}"),
        }
    }

    #[test]
    fn malformed_extension_keyword_value_fails_compilation() {
        let bad = SchemaDocument::parse(
            "bad-bound.json",
            json!({
                "$schema": META_SCHEMA_ID,
                "type": "object",
                "properties": {
                    "item_name": { "type": "string", "maxUtf8ByteLength": "five" }
                }
            })
            .to_string(),
        )
        .unwrap();
        let err = assembled().compile(&bad).unwrap_err();
        match err {
            SchemaError::ValidatorBuild { reason, .. } => {
                assert!(reason.contains("non-negative integer"), "got: {reason}");
            }
            other => panic!("expected ValidatorBuild, got: {other}"),
        }
    }

    #[test]
    fn excluded_keywords_are_annotations_regardless_of_value() {
        // "enumNames" carries a nonsense value; with the keyword excluded
        // the instance must still pass.
        let schema = SchemaDocument::parse(
            "annotated.json",
            json!({
                "$schema": META_SCHEMA_ID,
                "type": "object",
                "properties": {
                    "color": { "type": "string", "enumNames": 42, "editable": "maybe" }
                }
            })
            .to_string(),
        )
        .unwrap();
        let validator = assembled().compile(&schema).unwrap();
        assert!(validator.validate(&json!({ "color": "red" })).is_empty());
    }

    #[test]
    fn compiled_artifacts_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MetaSchemaSpec>();
        assert_send_sync::<PayloadValidator>();
    }
}
