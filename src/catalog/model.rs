//! Deserializable representation of `data/wallet_catalog.json`, plus the
//! validated record type the rest of the crate works with.
//!
//! `CatalogFile`/`WalletEntry` mirror the on-disk schema and keep capability
//! flags string-keyed; `WalletCatalog` converts them into `WalletRecord`s
//! with a total flag map. Display metadata is carried through untouched and
//! never consulted by matching.

use crate::catalog::flags::CapabilityFlags;
use crate::catalog::identity::{CapabilityKey, CatalogKey, WalletId};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
/// Full wallet catalog as stored on disk.
pub struct CatalogFile {
    pub schema_version: String,
    pub catalog: CatalogMetadata,
    pub wallets: Vec<WalletEntry>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
/// Identity of the catalog snapshot.
pub struct CatalogMetadata {
    pub key: CatalogKey,
    pub title: String,
}

#[derive(Clone, Debug, Deserialize)]
/// One wallet as written in the catalog file.
pub struct WalletEntry {
    pub id: WalletId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    pub capabilities: BTreeMap<String, bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
/// Presentation-only fields: icon asset reference, external link, blurb.
pub struct DisplayMetadata {
    pub description: Option<String>,
    pub icon: Option<String>,
    pub url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
/// Validated wallet record with a complete capability map.
pub struct WalletRecord {
    pub id: WalletId,
    pub name: String,
    pub capabilities: CapabilityFlags,
    #[serde(flatten)]
    pub display: DisplayMetadata,
}

impl WalletRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, capabilities: CapabilityFlags) -> Self {
        Self {
            id: WalletId(id.into()),
            name: name.into(),
            capabilities,
            display: DisplayMetadata::default(),
        }
    }

    pub fn with_display(mut self, display: DisplayMetadata) -> Self {
        self.display = display;
        self
    }

    pub fn supports(&self, key: CapabilityKey) -> bool {
        self.capabilities.get(key)
    }
}

impl WalletEntry {
    /// Convert into a record, failing when the capability map is not total.
    pub fn into_record(self) -> Result<WalletRecord> {
        let capabilities = CapabilityFlags::from_named(&self.capabilities)
            .with_context(|| format!("wallet {}", self.id))?;
        Ok(WalletRecord {
            id: self.id,
            name: self.name,
            capabilities,
            display: DisplayMetadata {
                description: self.description,
                icon: self.icon,
                url: self.url,
            },
        })
    }
}

/// Read and parse a wallet catalog from disk without additional validation.
pub fn load_catalog_from_path(path: &Path) -> Result<CatalogFile> {
    let data = fs::read_to_string(path)?;
    let catalog: CatalogFile = serde_json::from_str(&data)?;
    Ok(catalog)
}
