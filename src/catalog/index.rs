//! Validated, immutable wallet catalog.
//!
//! Loading is strict: the document must pass the catalog JSON Schema, declare
//! an accepted schema version, and every wallet must carry a complete
//! capability map under a unique id. Problems surface once, at load time;
//! queries against a loaded catalog cannot fail.

use crate::catalog::identity::{CatalogKey, WalletId};
use crate::crate_root;
use crate::catalog::model::{CatalogFile, WalletRecord, load_catalog_from_path};
use crate::schema_loader::{SchemaLoadOptions, load_json_schema, schema_version_from_file};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

// Only one catalog layout exists so far; anything else is rejected instead of
// being matched against the wrong capability set.
const DEFAULT_SCHEMA_VERSION: &str = "wallet_catalog_v1";
const CATALOG_SCHEMA_RELATIVE_PATH: &str = "schema/wallet_catalog.schema.json";

#[derive(Debug)]
/// Wallet records in catalog definition order plus an id index.
pub struct WalletCatalog {
    key: CatalogKey,
    title: String,
    wallets: Vec<WalletRecord>,
    by_id: BTreeMap<WalletId, usize>,
    revision: u64,
}

impl WalletCatalog {
    /// Load and validate the catalog from disk.
    pub fn load(path: &Path) -> Result<Self> {
        validate_against_schema(path)?;

        let file =
            load_catalog_from_path(path).with_context(|| format!("loading {}", path.display()))?;
        Self::from_file(file)
    }

    /// Validate an already-parsed catalog document.
    pub fn from_file(file: CatalogFile) -> Result<Self> {
        validate_schema_version(&file.schema_version)?;
        validate_catalog_key(&file.catalog.key)?;
        if file.catalog.title.trim().is_empty() {
            bail!("catalog.title must not be empty");
        }

        let records = file
            .wallets
            .into_iter()
            .map(|entry| entry.into_record())
            .collect::<Result<Vec<_>>>()?;
        let mut catalog = Self::from_records(file.catalog.key, records)?;
        catalog.title = file.catalog.title;
        Ok(catalog)
    }

    /// Build a catalog from in-memory records, keeping their order.
    pub fn from_records(key: CatalogKey, wallets: Vec<WalletRecord>) -> Result<Self> {
        validate_catalog_key(&key)?;
        let by_id = build_index(&wallets)?;
        let revision = content_revision(&key, &wallets);
        Ok(Self {
            title: key.0.clone(),
            key,
            wallets,
            by_id,
            revision,
        })
    }

    /// The catalog key declared in the loaded file.
    pub fn key(&self) -> &CatalogKey {
        &self.key
    }

    /// Fingerprint of the key and every record, in order.
    ///
    /// Two catalogs declaring the same key but different wallets or flags get
    /// different revisions, so results derived from one are never served for
    /// the other.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Every wallet, in catalog definition order.
    pub fn all(&self) -> &[WalletRecord] {
        &self.wallets
    }

    /// Resolve a wallet by id.
    pub fn wallet(&self, id: &WalletId) -> Option<&WalletRecord> {
        self.by_id.get(id).map(|position| &self.wallets[*position])
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }
}

fn content_revision(key: &CatalogKey, wallets: &[WalletRecord]) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    wallets.hash(&mut hasher);
    hasher.finish()
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
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

fn allowed_schema_versions() -> BTreeSet<String> {
    let version = schema_version_from_file(&canonical_catalog_schema_path())
        .unwrap_or_else(|| DEFAULT_SCHEMA_VERSION.to_string());
    BTreeSet::from_iter([version])
}

/// The bundled schema, under the same root as the bundled catalog.
pub(crate) fn canonical_catalog_schema_path() -> PathBuf {
    crate_root().join(CATALOG_SCHEMA_RELATIVE_PATH)
}

fn validate_catalog_key(key: &CatalogKey) -> Result<()> {
    if key.0.is_empty() {
        bail!("catalog.key must not be empty");
    }

    if !key
        .0
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!("catalog.key must match ^[A-Za-z0-9_.-]+$, got {}", key.0);
    }

    Ok(())
}

fn build_index(wallets: &[WalletRecord]) -> Result<BTreeMap<WalletId, usize>> {
    if wallets.is_empty() {
        bail!("catalog contains no wallets");
    }

    let mut map = BTreeMap::new();
    for (position, wallet) in wallets.iter().enumerate() {
        if wallet.id.0.trim().is_empty() {
            bail!("encountered wallet with no id");
        }
        if wallet.name.trim().is_empty() {
            bail!("wallet {} has an empty name", wallet.id);
        }
        if map.insert(wallet.id.clone(), position).is_some() {
            bail!("duplicate wallet id {}", wallet.id);
        }
    }
    Ok(map)
}

fn validate_against_schema(catalog_path: &Path) -> Result<()> {
    let catalog_file = File::open(catalog_path)
        .with_context(|| format!("opening catalog {}", catalog_path.display()))?;
    let catalog_value: Value = serde_json::from_reader(BufReader::new(catalog_file))
        .with_context(|| format!("parsing catalog {}", catalog_path.display()))?;

    let catalog_version = catalog_value
        .get("schema_version")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let schema_path = resolve_catalog_schema_path(catalog_path);
    let allowed = allowed_schema_versions();
    let schema = load_json_schema(
        &schema_path,
        SchemaLoadOptions {
            allowed_versions: Some(&allowed),
            expected_version: Some(&catalog_version),
        },
    )
    .with_context(|| format!("loading catalog schema {}", schema_path.display()))?;

    if let Err(errors) = schema.validate(&catalog_value) {
        bail!(
            "wallet catalog {} failed schema validation:\n{}",
            catalog_path.display(),
            errors.join("\n")
        );
    }
    debug!(
        schema = %schema_path.display(),
        schema_version = %schema.schema_version,
        "catalog passed schema validation"
    );
    Ok(())
}

/// Prefer a `schema/` directory beside the catalog's data directory, then the
/// crate's bundled schema.
fn resolve_catalog_schema_path(catalog_path: &Path) -> PathBuf {
    if let Some(base) = catalog_path.parent().and_then(|p| p.parent()) {
        let candidate = base.join(CATALOG_SCHEMA_RELATIVE_PATH);
        if candidate.exists() {
            return candidate;
        }
    }

    canonical_catalog_schema_path()
}
