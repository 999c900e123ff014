//! Wallet catalog wiring.
//!
//! This module wraps the JSON catalog under `data/wallet_catalog.json` so the
//! match engine works against a validated, immutable snapshot. Types in
//! `model` mirror the file layout; `WalletCatalog` is what everything else
//! consumes.

pub mod flags;
pub mod identity;
pub mod index;
pub mod model;

pub use flags::CapabilityFlags;
pub use identity::{CapabilityCategory, CapabilityKey, CatalogKey, WalletId};
pub use index::WalletCatalog;
pub use model::{CatalogFile, CatalogMetadata, DisplayMetadata, WalletEntry, WalletRecord};

pub use model::load_catalog_from_path;
