//! Embedded JSON Schema for taxonomy documents.
//!
//! Every document, builtin or loaded from disk, is checked against
//! `schema/taxonomy.schema.json` before it is deserialized, so shape errors
//! surface with schema paths instead of serde messages.

use anyhow::{Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Schema version accepted by this build.
pub const TAXONOMY_SCHEMA_VERSION: &str = "classifieds_taxonomy_v1";

const TAXONOMY_SCHEMA: &str = include_str!("../schema/taxonomy.schema.json");

fn compiled_schema() -> Result<&'static JSONSchema> {
    static COMPILED: OnceLock<Result<JSONSchema, String>> = OnceLock::new();
    COMPILED
        .get_or_init(|| {
            let raw: Value = serde_json::from_str(TAXONOMY_SCHEMA)
                .map_err(|err| format!("parsing taxonomy schema: {err}"))?;
            JSONSchema::compile(&raw).map_err(|err| format!("compiling taxonomy schema: {err}"))
        })
        .as_ref()
        .map_err(|msg| anyhow!("{msg}"))
}

/// Validate a raw document against the embedded schema.
///
/// `origin` names the document in error messages (a path or `builtin`).
pub(crate) fn validate_document(value: &Value, origin: &str) -> Result<()> {
    let schema = compiled_schema()?;
    if let Err(errors) = schema.validate(value) {
        let details = errors
            .map(|err| format!("{}: {}", err.instance_path, err))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("taxonomy {origin} failed schema validation:\n{details}");
    }
    Ok(())
}

pub(crate) fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }

    if !schema_version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!(
            "schema_version must match ^[A-Za-z0-9_.-]+$, got {}",
            schema_version
        );
    }

    let allowed = allowed_schema_versions();
    if !allowed.contains(schema_version) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed
        );
    }

    Ok(())
}

fn allowed_schema_versions() -> BTreeSet<&'static str> {
    BTreeSet::from_iter([TAXONOMY_SCHEMA_VERSION])
}
