//! Filter tab state machine for the find-wallet view.
//!
//! The coordinator owns the single `FilterState` shared by both tabs, tracks
//! which tab is active, and keeps the latest match results for the
//! presentation layer. Every accepted command recomputes results; rejected
//! commands change nothing.

use crate::catalog::{CapabilityKey, WalletCatalog};
use crate::engine::{MatchCache, MatchMode, MatchResult};
use crate::error::FilterError;
use crate::filter::FilterState;
use crate::persona;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Active filter tab.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Persona-driven ("PROFILE FILTERS").
    #[default]
    Profile,
    /// Per-capability toggles ("FEATURE FILTERS").
    Feature,
}

impl FilterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::Profile => "profile",
            FilterMode::Feature => "feature",
        }
    }

    /// Tab label shown in the sidebar.
    pub fn label(&self) -> &'static str {
        match self {
            FilterMode::Profile => "PROFILE FILTERS",
            FilterMode::Feature => "FEATURE FILTERS",
        }
    }

    /// Persona suggestions rank; feature filters exclude.
    pub fn match_mode(&self) -> MatchMode {
        match self {
            FilterMode::Profile => MatchMode::Soft,
            FilterMode::Feature => MatchMode::Strict,
        }
    }
}

impl TryFrom<&str> for FilterMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "profile" => Ok(FilterMode::Profile),
            "feature" => Ok(FilterMode::Feature),
            other => anyhow::bail!("Unknown filter mode: {other}"),
        }
    }
}

/// What the presentation layer renders after each command.
#[derive(Debug, Serialize)]
pub struct ViewSnapshot<'a> {
    pub mode: FilterMode,
    pub match_mode: MatchMode,
    pub filters: &'a FilterState,
    pub selected_persona: Option<&'static str>,
    pub match_count: usize,
    pub results: &'a [MatchResult],
}

#[derive(Debug)]
pub struct ViewCoordinator {
    catalog: Arc<WalletCatalog>,
    mode: FilterMode,
    filters: FilterState,
    selected_persona: Option<&'static str>,
    cache: MatchCache,
    results: Arc<[MatchResult]>,
}

impl ViewCoordinator {
    /// Start in the profile tab with nothing required.
    pub fn new(catalog: Arc<WalletCatalog>) -> Self {
        let mut coordinator = Self {
            catalog,
            mode: FilterMode::default(),
            filters: FilterState::new(),
            selected_persona: None,
            cache: MatchCache::new(),
            results: Arc::from(Vec::new()),
        };
        coordinator.recompute();
        coordinator
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn selected_persona(&self) -> Option<&'static str> {
        self.selected_persona
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn catalog(&self) -> &WalletCatalog {
        &self.catalog
    }

    /// Switch tabs. Filter selections carry over unchanged.
    pub fn select_mode(&mut self, mode: FilterMode) {
        self.mode = mode;
        self.recompute();
    }

    /// Replace the filter state wholesale with a persona preset.
    ///
    /// Only available from the profile tab. On error nothing changes.
    pub fn apply_persona(&mut self, name: &str) -> Result<(), FilterError> {
        self.require_mode(FilterMode::Profile, "apply_persona")?;
        let preset = persona::find_persona(name.trim()).ok_or_else(|| {
            warn!(persona = name, "rejected unknown persona");
            FilterError::UnknownPersona(name.to_string())
        })?;
        self.filters = preset.filter_state();
        self.selected_persona = Some(preset.name);
        self.recompute();
        Ok(())
    }

    /// Flip one capability. Only available from the feature tab.
    pub fn toggle_capability(&mut self, key: CapabilityKey) -> Result<bool, FilterError> {
        self.require_mode(FilterMode::Feature, "toggle_capability")?;
        let required = self.filters.toggle(key);
        self.selected_persona = None;
        self.recompute();
        Ok(required)
    }

    pub fn snapshot(&self) -> ViewSnapshot<'_> {
        ViewSnapshot {
            mode: self.mode,
            match_mode: self.mode.match_mode(),
            filters: &self.filters,
            selected_persona: self.selected_persona,
            match_count: self.results.len(),
            results: &self.results,
        }
    }

    fn require_mode(&self, expected: FilterMode, operation: &'static str) -> Result<(), FilterError> {
        if self.mode == expected {
            return Ok(());
        }
        warn!(operation, mode = self.mode.as_str(), "rejected command for inactive tab");
        Err(FilterError::ModeMismatch {
            operation,
            mode: self.mode,
        })
    }

    fn recompute(&mut self) {
        let match_mode = self.mode.match_mode();
        self.results = self
            .cache
            .get_or_compute(&self.catalog, &self.filters, match_mode);
        debug!(
            mode = self.mode.as_str(),
            match_mode = match_mode.as_str(),
            required = self.filters.required_count(),
            results = self.results.len(),
            "recomputed wallet matches"
        );
    }
}
