//! JSON Schema loading for the wallet catalog.
//!
//! Reads a schema file, checks its `schema_version` const against the allowed
//! set, optionally patches that const to the version a document declares, and
//! compiles a validator. Validation errors are flattened to strings so callers
//! can report all of them at once.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const SCHEMA_VERSION_POINTER: &str = "/properties/schema_version/const";

/// Compiled schema plus the version it was compiled for.
pub(crate) struct SchemaLoadResult {
    pub schema_version: String,
    pub compiled: JSONSchema,
}

#[derive(Default)]
pub(crate) struct SchemaLoadOptions<'a> {
    /// Version the document under validation declares. When set, the schema's
    /// const is rewritten to it before compiling.
    pub expected_version: Option<&'a str>,
    /// Allowed schema_version values; enforced when present.
    pub allowed_versions: Option<&'a BTreeSet<String>>,
}

impl SchemaLoadResult {
    /// Validate `instance`, returning every violation on failure.
    pub fn validate(&self, instance: &Value) -> std::result::Result<(), Vec<String>> {
        self.compiled
            .validate(instance)
            .map_err(|errors| errors.map(|err| err.to_string()).collect())
    }
}

pub(crate) fn load_json_schema(
    path: &Path,
    options: SchemaLoadOptions<'_>,
) -> Result<SchemaLoadResult> {
    let mut schema: Value = serde_json::from_reader(BufReader::new(
        File::open(path).with_context(|| format!("opening schema {}", path.display()))?,
    ))
    .with_context(|| format!("parsing schema {}", path.display()))?;

    let schema_version = match options.expected_version {
        Some(version) => version.to_string(),
        None => extract_schema_version(&schema)
            .ok_or_else(|| anyhow!("schema {} missing schema_version const", path.display()))?,
    };

    if let Some(allowed) = options.allowed_versions {
        if !allowed.contains(&schema_version) {
            bail!(
                "schema_version '{}' not in allowed set {:?}",
                schema_version,
                allowed
            );
        }
    }

    if options.expected_version.is_some() {
        let target = schema.pointer_mut(SCHEMA_VERSION_POINTER).ok_or_else(|| {
            anyhow!(
                "schema {} missing pointer {}",
                path.display(),
                SCHEMA_VERSION_POINTER
            )
        })?;
        *target = Value::String(schema_version.clone());
    }

    let compiled = JSONSchema::compile(&schema)
        .map_err(|err| anyhow!("compiling schema {}: {err}", path.display()))?;

    Ok(SchemaLoadResult {
        schema_version,
        compiled,
    })
}

/// Read the `schema_version` const from a schema file, if it carries one.
pub(crate) fn schema_version_from_file(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let value: Value = serde_json::from_reader(BufReader::new(file)).ok()?;
    extract_schema_version(&value)
}

fn extract_schema_version(schema: &Value) -> Option<String> {
    let version = schema.pointer(SCHEMA_VERSION_POINTER).and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}
