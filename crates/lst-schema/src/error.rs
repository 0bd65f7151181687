//! Schema assembly and validation error types.

use thiserror::Error;

/// Errors raised while assembling vocabularies, compiling schemas, or
/// parsing instances. Validation violations are data, not errors — see
/// [`crate::validate::ValidationViolations`].
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The requested base dialect is not a known JSON Schema draft.
    #[error("unsupported schema dialect '{dialect}'")]
    UnsupportedDialect {
        /// The identifier that failed to resolve.
        dialect: String,
    },

    /// A schema document is malformed or violates the meta-schema's
    /// structural rules.
    #[error("schema parse error for '{name}': {reason}")]
    SchemaParse {
        /// Name of the offending document.
        name: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The payload instance is not valid JSON; validation was never
    /// attempted.
    #[error("instance parse error: {reason}")]
    InstanceParse {
        /// The JSON parse failure.
        reason: String,
    },

    /// The compiled validator could not be built from an otherwise
    /// well-formed schema document.
    #[error("validator build error for '{name}': {reason}")]
    ValidatorBuild {
        /// Name of the schema being compiled.
        name: String,
        /// Reason the engine rejected it.
        reason: String,
    },
}
