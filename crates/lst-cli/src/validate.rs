//! # Validate Subcommand
//!
//! Offline payload validation: compiles a product-type schema against a
//! vendor meta-schema from local files and validates a payload, without
//! touching the network.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use lst_schema::{
    default_excluded_keywords, vendor_extensions, MetaSchemaSpec, SchemaDocument,
};

use crate::report::render_violations;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the vendor meta-schema document.
    #[arg(long)]
    pub meta_schema: PathBuf,

    /// Path to the product-type schema document.
    #[arg(long)]
    pub schema: PathBuf,

    /// Path to the listing payload JSON.
    #[arg(long)]
    pub payload: PathBuf,

    /// Keyword to treat as annotation-only (repeatable). Defaults to
    /// the vendor's informational keywords when not given.
    #[arg(long = "exclude-keyword")]
    pub exclude_keywords: Vec<String>,

    /// Base dialect the vocabulary is assembled from.
    #[arg(long, default_value = "https://json-schema.org/draft/2019-09/schema")]
    pub dialect: String,
}

/// Execute offline validation.
pub fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let meta_doc = load_document(&args.meta_schema)?;
    let schema_doc = load_document(&args.schema)?;

    let excluded: BTreeSet<String> = if args.exclude_keywords.is_empty() {
        default_excluded_keywords()
    } else {
        args.exclude_keywords.iter().cloned().collect()
    };

    let spec = MetaSchemaSpec::assemble(&args.dialect, excluded, vendor_extensions(), meta_doc)?;
    let validator = spec.compile(&schema_doc)?;

    let payload_text = std::fs::read_to_string(&args.payload)
        .with_context(|| format!("reading payload from {}", args.payload.display()))?;
    let violations = validator.validate_text(&payload_text)?;

    if violations.is_empty() {
        println!(
            "Payload satisfies {} under meta-schema {}",
            validator.schema_name(),
            spec.id()
        );
        Ok(())
    } else {
        print!("{}", render_violations(violations.violations()));
        anyhow::bail!("{} violation(s) found", violations.len())
    }
}

fn load_document(path: &Path) -> anyhow::Result<SchemaDocument> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("schema")
        .to_string();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading schema document {}", path.display()))?;
    Ok(SchemaDocument::parse(name, raw)?)
}
