use anyhow::{Context, Result};
use find_wallet::{CapabilityKey, WalletCatalog};
use serde_json::{Map, Value, json};
use std::fs;
use std::path::{Path, PathBuf};

pub fn manifest_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(relative)
}

pub fn bundled_catalog() -> WalletCatalog {
    find_wallet::load_catalog(&manifest_path("data/wallet_catalog.json"))
        .expect("bundled catalog loads")
}

/// Wallet entry with every capability present, `enabled` set to true.
pub fn wallet_json(id: &str, enabled: &[CapabilityKey]) -> Value {
    let mut capabilities = Map::new();
    for key in CapabilityKey::ALL {
        capabilities.insert(key.as_str().to_string(), json!(enabled.contains(&key)));
    }
    json!({
        "id": id,
        "name": id.to_uppercase(),
        "capabilities": capabilities,
    })
}

pub fn catalog_document(wallets: Vec<Value>) -> Value {
    json!({
        "schema_version": "wallet_catalog_v1",
        "catalog": {"key": "fixture_catalog", "title": "Fixture"},
        "wallets": wallets,
    })
}

/// Write `document` to `<dir>/data/catalog.json` and return the path.
pub fn write_catalog(dir: &Path, document: &Value) -> Result<PathBuf> {
    let data_dir = dir.join("data");
    fs::create_dir_all(&data_dir).context("creating fixture data dir")?;
    let path = data_dir.join("catalog.json");
    fs::write(&path, serde_json::to_vec_pretty(document)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

pub fn ids(results: &[find_wallet::MatchResult]) -> Vec<&str> {
    results.iter().map(|r| r.wallet.0.as_str()).collect()
}
