//! Total boolean map over [`CapabilityKey`].
//!
//! Both wallet records ("supports") and filter state ("required") use this
//! type, so a missing or unknown key can only show up while converting from a
//! string-keyed source, never afterwards.

use crate::catalog::identity::CapabilityKey;
use anyhow::{Result, bail};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct CapabilityFlags([bool; CapabilityKey::COUNT]);

impl CapabilityFlags {
    /// Every key set to false.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = CapabilityKey>,
    {
        let mut flags = Self::none();
        for key in keys {
            flags.set(key, true);
        }
        flags
    }

    /// Build from a string-keyed map, requiring every key exactly once.
    ///
    /// Errors name every missing and unknown key so a broken catalog entry
    /// can be fixed in one pass.
    pub fn from_named(entries: &BTreeMap<String, bool>) -> Result<Self> {
        let mut flags = Self::none();
        let mut unknown = Vec::new();
        for (name, value) in entries {
            match CapabilityKey::try_from(name.as_str()) {
                Ok(key) => flags.set(key, *value),
                Err(_) => unknown.push(name.as_str()),
            }
        }
        let missing: Vec<&str> = CapabilityKey::ALL
            .iter()
            .filter(|key| !entries.contains_key(key.as_str()))
            .map(|key| key.as_str())
            .collect();

        if !unknown.is_empty() {
            bail!("unknown capability keys: {}", unknown.join(", "));
        }
        if !missing.is_empty() {
            bail!("missing capability keys: {}", missing.join(", "));
        }
        Ok(flags)
    }

    pub fn get(&self, key: CapabilityKey) -> bool {
        self.0[key.index()]
    }

    pub fn set(&mut self, key: CapabilityKey, value: bool) {
        self.0[key.index()] = value;
    }

    /// Flip one key and return its new value.
    pub fn toggle(&mut self, key: CapabilityKey) -> bool {
        let slot = &mut self.0[key.index()];
        *slot = !*slot;
        *slot
    }

    /// Keys set to true, in canonical order.
    pub fn enabled(&self) -> impl Iterator<Item = CapabilityKey> + '_ {
        CapabilityKey::ALL.into_iter().filter(move |key| self.get(*key))
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|value| **value).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Every `(key, value)` pair in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (CapabilityKey, bool)> + '_ {
        CapabilityKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

impl Serialize for CapabilityFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(CapabilityKey::COUNT))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key.as_str(), &value)?;
        }
        map.end()
    }
}
