//! # Run Subcommand
//!
//! The end-to-end listing workflow: catalog lookup, restriction check,
//! product-type discovery, schema download and persistence, payload
//! validation, and validation-preview submission. Submission only
//! happens when the payload passes schema validation with zero
//! violations.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use lst_client::listings::{ListingsItemPutRequest, Requirements, MODE_VALIDATION_PREVIEW};
use lst_client::{fetch_access_token, SellingPartnerClient};
use lst_core::{DocumentStore, WorkflowConfig};
use lst_schema::{
    default_excluded_keywords, vendor_extensions, Dialect, MetaSchemaSpec, SchemaDocument,
};

use crate::report::render_violations;

/// Local names fetched schema documents are persisted under.
const META_SCHEMA_FILE: &str = "metaSchema.json";
const SCHEMA_FILE: &str = "schema.json";

/// Arguments for the run subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the workflow configuration file.
    #[arg(long, default_value = "config.yml")]
    pub config: PathBuf,

    /// Search keyword for the catalog and product-type lookups
    /// (repeatable).
    #[arg(long = "keyword", default_value = "luggage")]
    pub keywords: Vec<String>,

    /// Path to the listing payload JSON.
    #[arg(long, default_value = "payload.json")]
    pub payload: PathBuf,

    /// Directory fetched schema documents are persisted into.
    #[arg(long, default_value = ".")]
    pub work_dir: PathBuf,

    /// Locale for search terms and localized messages.
    #[arg(long, default_value = "en_US")]
    pub locale: String,
}

/// Execute the workflow.
pub async fn run(args: RunArgs) -> anyhow::Result<()> {
    let config = WorkflowConfig::load(&args.config)
        .with_context(|| format!("loading config from {}", args.config.display()))?;

    let token = fetch_access_token(&config).await?;
    let client = SellingPartnerClient::new(config.endpoint.clone(), &token, config.timeout_secs)?;

    // Is the product already in the catalog?
    let included_data = vec!["summaries".to_string(), "attributes".to_string()];
    let catalog_results = client
        .catalog()
        .search_items(&config.marketplace_ids, &args.keywords, &included_data, 1)
        .await?;

    if let Some(item) = catalog_results.items.first() {
        println!("Product found in catalog with ASIN: {}", item.asin);
        let restrictions = client
            .restrictions()
            .get_listings_restrictions(
                &item.asin,
                &config.seller_id,
                &config.marketplace_ids,
                None,
                &args.locale,
            )
            .await?;
        if restrictions.restrictions.is_empty() {
            println!("No restrictions found for ASIN: {}", item.asin);
        } else {
            println!(
                "Found {} restriction(s) for ASIN: {}",
                restrictions.restrictions.len(),
                item.asin
            );
            for restriction in &restrictions.restrictions {
                println!("Marketplace: {}", restriction.marketplace_id);
                if let Some(condition) = &restriction.condition_type {
                    println!("Condition: {condition}");
                }
                for reason in &restriction.reasons {
                    if let Some(code) = &reason.reason_code {
                        println!("Reason code: {code}");
                    }
                    if let Some(message) = &reason.message {
                        println!("Message: {message}");
                    }
                    for link in &reason.links {
                        println!("Approval link: {}", link.resource);
                        if let Some(title) = &link.title {
                            println!("Link title: {title}");
                        }
                    }
                }
                println!("-------------------");
            }
        }
    } else {
        tracing::info!(keywords = ?args.keywords, "no existing catalog item matched");
    }

    // Discover the product type. Several may match; take the first.
    let product_types = client
        .definitions()
        .search_product_types(&config.marketplace_ids, &args.keywords, &args.locale)
        .await?;
    let product_type = product_types
        .product_types
        .first()
        .map(|pt| pt.name.clone())
        .with_context(|| format!("no product type matched keywords {:?}", args.keywords))?;
    tracing::info!(product_type = %product_type, "selected product type");

    let definition = client
        .definitions()
        .get_product_type_definition(
            &product_type,
            &config.marketplace_ids,
            "LISTING_PRODUCT_ONLY",
            "NOT_ENFORCED",
            &args.locale,
        )
        .await?;

    // Download both schema documents and persist them byte-for-byte.
    let store = DocumentStore::new(&args.work_dir);
    let meta_bytes = client
        .documents()
        .fetch_document(&definition.meta_schema.link.resource)
        .await?;
    store.persist(META_SCHEMA_FILE, &meta_bytes)?;
    let schema_bytes = client
        .documents()
        .fetch_document(&definition.schema.link.resource)
        .await?;
    store.persist(SCHEMA_FILE, &schema_bytes)?;
    tracing::info!(dir = %store.root().display(), "persisted schema documents");

    // Compile from the persisted copies, not the in-flight bytes.
    let meta_doc = SchemaDocument::parse(META_SCHEMA_FILE, store.read_text(META_SCHEMA_FILE)?)?;
    let schema_doc = SchemaDocument::parse(SCHEMA_FILE, store.read_text(SCHEMA_FILE)?)?;

    let spec = MetaSchemaSpec::assemble(
        Dialect::Draft201909.id(),
        excluded_keywords(&config),
        vendor_extensions(),
        meta_doc,
    )?;
    let validator = spec.compile(&schema_doc)?;

    let payload_text = std::fs::read_to_string(&args.payload)
        .with_context(|| format!("reading payload from {}", args.payload.display()))?;
    let violations = validator.validate_text(&payload_text)?;
    if !violations.is_empty() {
        println!(
            "Payload failed schema validation with {} violation(s):",
            violations.len()
        );
        print!("{}", render_violations(violations.violations()));
        anyhow::bail!("submission blocked: payload does not satisfy the product-type schema");
    }
    println!("Payload passed schema validation");

    // Submit the validated payload in validation-preview mode.
    let attributes = serde_json::from_str(&payload_text)?;
    let request = ListingsItemPutRequest {
        product_type,
        requirements: Some(Requirements::ListingProductOnly),
        attributes,
    };
    let response = client
        .listings()
        .put_listings_item(
            &config.seller_id,
            &config.sku,
            &config.marketplace_ids,
            &["identifiers".to_string(), "issues".to_string()],
            MODE_VALIDATION_PREVIEW,
            &args.locale,
            &request,
        )
        .await?;

    println!("Validation preview status: {:?}", response.status);
    if let Some(submission_id) = &response.submission_id {
        println!("Submission id: {submission_id}");
    }
    if response.issues.is_empty() {
        println!("No submission issues reported");
    } else {
        println!("Submission issues:");
        for issue in &response.issues {
            println!(
                "  [{}] {} (attributes: {})",
                issue.code.as_deref().unwrap_or("-"),
                issue.message.as_deref().unwrap_or("-"),
                issue.attribute_names.join(", "),
            );
        }
    }

    Ok(())
}

/// The excluded-keyword set: configured in the workflow file, or the
/// vendor default.
fn excluded_keywords(config: &WorkflowConfig) -> BTreeSet<String> {
    match &config.excluded_keywords {
        Some(names) => names.iter().cloned().collect(),
        None => default_excluded_keywords(),
    }
}
