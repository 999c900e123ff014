//! Wallet matching over a catalog and a filter state.
//!
//! One definition of "match" serves both tabs: `Strict` keeps only wallets
//! that satisfy every required capability, `Soft` keeps every wallet and
//! ranks by the fraction satisfied. With nothing required, both modes return
//! the whole catalog in definition order with a ratio of 1.0.

use crate::catalog::{CapabilityKey, CatalogKey, WalletCatalog, WalletId, WalletRecord};
use crate::filter::FilterState;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Hard filter: every required capability must be present.
    Strict,
    /// Ranking: all wallets, ordered by match ratio, ties in catalog order.
    Soft,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Strict => "strict",
            MatchMode::Soft => "soft",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchResult {
    pub wallet: WalletId,
    /// Index of the wallet in catalog definition order.
    pub position: usize,
    /// Required keys this wallet supports, canonical order.
    pub satisfied: Vec<CapabilityKey>,
    pub satisfied_count: usize,
    pub required_count: usize,
    pub ratio: f64,
}

impl MatchResult {
    fn evaluate(position: usize, wallet: &WalletRecord, filters: &FilterState) -> Self {
        let satisfied: Vec<CapabilityKey> = filters
            .required()
            .filter(|key| wallet.supports(*key))
            .collect();
        let satisfied_count = satisfied.len();
        let required_count = filters.required_count();
        let ratio = if required_count == 0 {
            1.0
        } else {
            satisfied_count as f64 / required_count as f64
        };
        Self {
            wallet: wallet.id.clone(),
            position,
            satisfied,
            satisfied_count,
            required_count,
            ratio,
        }
    }

    /// Every required capability is supported.
    pub fn is_complete(&self) -> bool {
        self.satisfied_count == self.required_count
    }
}

/// Rank the catalog against `filters`.
///
/// Recomputes from scratch; there is no incremental path.
pub fn match_wallets(
    catalog: &WalletCatalog,
    filters: &FilterState,
    mode: MatchMode,
) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = catalog
        .all()
        .iter()
        .enumerate()
        .map(|(position, wallet)| MatchResult::evaluate(position, wallet, filters))
        .collect();

    if filters.is_unfiltered() {
        return results;
    }

    match mode {
        MatchMode::Strict => results.retain(MatchResult::is_complete),
        // Denominators are shared, so counts order the same as ratios.
        // sort_by is stable, which keeps catalog order within ties.
        MatchMode::Soft => results.sort_by(|a, b| b.satisfied_count.cmp(&a.satisfied_count)),
    }
    results
}

/// Memoized results per `(catalog revision, filters, mode)`.
///
/// Entries are keyed on [`WalletCatalog::revision`] as well as the declared
/// key, so a reloaded catalog that keeps its key never sees the old results.
/// Results are shared as `Arc<[MatchResult]>`; a hit clones a pointer.
#[derive(Debug)]
pub struct MatchCache {
    entries: HashMap<CacheKey, Arc<[MatchResult]>>,
    capacity: usize,
}

type CacheKey = (CatalogKey, u64, FilterState, MatchMode);

impl Default for MatchCache {
    fn default() -> Self {
        Self::with_capacity(MatchCache::DEFAULT_CAPACITY)
    }
}

impl MatchCache {
    /// Entry limit for [`MatchCache::new`].
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::default()
    }

    /// A cache holding at most `capacity` result sets (minimum one). When a
    /// miss would exceed the limit the cache is emptied first.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn get_or_compute(
        &mut self,
        catalog: &WalletCatalog,
        filters: &FilterState,
        mode: MatchMode,
    ) -> Arc<[MatchResult]> {
        let key = (catalog.key().clone(), catalog.revision(), *filters, mode);
        if let Some(hit) = self.entries.get(&key) {
            return Arc::clone(hit);
        }

        if self.entries.len() >= self.capacity {
            debug!(
                evicted = self.entries.len(),
                capacity = self.capacity,
                "match cache full, clearing"
            );
            self.entries.clear();
        }
        let results: Arc<[MatchResult]> = match_wallets(catalog, filters, mode).into();
        self.entries.insert(key, Arc::clone(&results));
        results
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
