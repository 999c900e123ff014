//! The user's current capability selection.
//!
//! `FilterState` is total over [`CapabilityKey`]: every key has an explicit
//! "required" value, defaulting to false. It changes only through
//! [`FilterState::toggle`] and wholesale replacement (persona presets).

use crate::catalog::{CapabilityFlags, CapabilityKey};
use crate::error::FilterError;
use crate::split_list;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct FilterState {
    required: CapabilityFlags,
}

impl FilterState {
    /// Nothing required.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exactly `keys` required, everything else false.
    pub fn requiring<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = CapabilityKey>,
    {
        Self {
            required: CapabilityFlags::from_keys(keys),
        }
    }

    /// Parse a comma- or whitespace-separated list of capability names.
    ///
    /// All-or-nothing: one bad name rejects the whole list.
    pub fn parse(list: &str) -> Result<Self, FilterError> {
        let keys = split_list(list)
            .iter()
            .map(|name| CapabilityKey::try_from(name.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::requiring(keys))
    }

    pub fn is_required(&self, key: CapabilityKey) -> bool {
        self.required.get(key)
    }

    /// Flip a single key; all other keys are unchanged.
    pub fn toggle(&mut self, key: CapabilityKey) -> bool {
        self.required.toggle(key)
    }

    /// Required keys in canonical order.
    pub fn required(&self) -> impl Iterator<Item = CapabilityKey> + '_ {
        self.required.enabled()
    }

    pub fn required_count(&self) -> usize {
        self.required.count()
    }

    /// True when no capability is required ("no filters selected").
    pub fn is_unfiltered(&self) -> bool {
        self.required.is_empty()
    }

    pub fn as_flags(&self) -> &CapabilityFlags {
        &self.required
    }
}
