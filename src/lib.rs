//! Wallet filter-and-match engine for the find-wallet page.
//!
//! The crate exposes the wallet catalog, the capability filter state, persona
//! presets, the match engine, and the view coordinator that ties them together
//! for a presentation layer. Everything runs synchronously over an immutable
//! in-memory catalog loaded once at startup via [`load_catalog`].

use anyhow::{Result, bail};
use std::{
    env,
    path::{Path, PathBuf},
};
use tracing::info;

pub mod catalog;
pub mod coordinator;
pub mod engine;
pub mod error;
pub mod filter;
pub mod persona;
mod schema_loader;

pub use catalog::{
    CapabilityCategory, CapabilityFlags, CapabilityKey, CatalogKey, DisplayMetadata,
    WalletCatalog, WalletId, WalletRecord, load_catalog_from_path,
};
pub use coordinator::{FilterMode, ViewCoordinator, ViewSnapshot};
pub use engine::{MatchCache, MatchMode, MatchResult, match_wallets};
pub use error::{CatalogLoadError, FilterError};
pub use filter::FilterState;
pub use persona::{PersonaPreset, personas};

/// Environment variable naming an explicit catalog file.
pub const CATALOG_ENV: &str = "FIND_WALLET_CATALOG";
/// Catalog location relative to the crate root.
pub const BUNDLED_CATALOG_PATH: &str = "data/wallet_catalog.json";

/// Root directory holding the bundled `data/` and `schema/` trees.
///
/// The build script records a canonical root in `FIND_WALLET_ROOT_HINT`; the
/// manifest directory is only used when the hint is absent.
pub(crate) fn crate_root() -> PathBuf {
    PathBuf::from(option_env!("FIND_WALLET_ROOT_HINT").unwrap_or(env!("CARGO_MANIFEST_DIR")))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CatalogSource {
    Explicit,
    Environment,
    Bundled,
}

/// The single candidate path for the current configuration, before any
/// existence check.
fn catalog_candidate(explicit: Option<&Path>) -> (PathBuf, CatalogSource) {
    if let Some(path) = explicit {
        return (path.to_path_buf(), CatalogSource::Explicit);
    }

    if let Ok(raw) = env::var(CATALOG_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return (PathBuf::from(trimmed), CatalogSource::Environment);
        }
    }

    (crate_root().join(BUNDLED_CATALOG_PATH), CatalogSource::Bundled)
}

fn ensure_catalog_file(path: &Path, source: CatalogSource) -> Result<()> {
    if path.is_file() {
        return Ok(());
    }
    match source {
        CatalogSource::Explicit => bail!("catalog path {} does not exist", path.display()),
        CatalogSource::Environment => {
            bail!("{CATALOG_ENV}={} does not point at a file", path.display())
        }
        CatalogSource::Bundled => bail!(
            "Unable to locate the wallet catalog at {}. Set {CATALOG_ENV} to a catalog JSON file.",
            path.display()
        ),
    }
}

/// Locate the wallet catalog file.
///
/// Search order: the explicit argument, then `FIND_WALLET_CATALOG`, then the
/// bundled catalog under the build-time root hint. Only the first configured
/// source is consulted and it must be an existing file; a set-but-wrong
/// environment value is an error rather than a silent fallback.
pub fn resolve_catalog_path(explicit: Option<&Path>) -> Result<PathBuf> {
    let (path, source) = catalog_candidate(explicit);
    ensure_catalog_file(&path, source)?;
    Ok(path)
}

/// Load and validate the catalog at `path`.
///
/// This is the startup boundary: any failure is fatal for the page and is
/// reported once as a [`CatalogLoadError`].
pub fn load_catalog(path: &Path) -> Result<WalletCatalog, CatalogLoadError> {
    let catalog = WalletCatalog::load(path)
        .map_err(|err| CatalogLoadError::from_anyhow(path.to_path_buf(), err))?;
    info!(
        catalog = %catalog.key().0,
        wallets = catalog.len(),
        path = %path.display(),
        "loaded wallet catalog"
    );
    Ok(catalog)
}

/// Resolve the catalog location and load it in one step.
pub fn load_default_catalog() -> Result<WalletCatalog, CatalogLoadError> {
    let (path, source) = catalog_candidate(None);
    ensure_catalog_file(&path, source)
        .map_err(|err| CatalogLoadError::from_anyhow(path.clone(), err))?;
    load_catalog(&path)
}

/// Split comma- or whitespace-delimited lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
