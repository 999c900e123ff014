use crate::error::FilterError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Versioned key for a wallet catalog snapshot (e.g., `find_wallet_2022_06`).
///
/// Match results are only comparable within one catalog key, which is also
/// what the match cache is keyed on.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogKey(pub String);

/// Stable identifier for a wallet entry.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletId(pub String);

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sidebar grouping for capability keys.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityCategory {
    Platform,
    Trust,
    Connectivity,
    Feature,
}

impl CapabilityCategory {
    pub const ALL: [CapabilityCategory; 4] = [
        CapabilityCategory::Platform,
        CapabilityCategory::Trust,
        CapabilityCategory::Connectivity,
        CapabilityCategory::Feature,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityCategory::Platform => "platform",
            CapabilityCategory::Trust => "trust",
            CapabilityCategory::Connectivity => "connectivity",
            CapabilityCategory::Feature => "feature",
        }
    }

    /// Keys belonging to this category, in declaration order.
    pub fn keys(self) -> impl Iterator<Item = CapabilityKey> {
        CapabilityKey::ALL
            .into_iter()
            .filter(move |key| key.category() == self)
    }
}

/// Closed set of wallet capabilities shared by catalog records and filters.
///
/// Declaration order is the canonical order: satisfied-key lists, serialized
/// flag maps, and sidebar groups all follow it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum CapabilityKey {
    Android,
    Ios,
    Linux,
    Windows,
    MacOs,
    Firefox,
    Chromium,
    Hardware,
    OpenSource,
    NonCustodial,
    HardwareSupport,
    SocialRecovery,
    Multisig,
    WalletConnect,
    RpcImporting,
    ConnectToDapps,
    NftSupport,
    Staking,
    Swaps,
    Layer2,
    GasFeeCustomization,
    EnsSupport,
    Erc20Support,
    BuyCrypto,
    WithdrawCrypto,
}

impl CapabilityKey {
    pub const COUNT: usize = 25;

    pub const ALL: [CapabilityKey; Self::COUNT] = [
        CapabilityKey::Android,
        CapabilityKey::Ios,
        CapabilityKey::Linux,
        CapabilityKey::Windows,
        CapabilityKey::MacOs,
        CapabilityKey::Firefox,
        CapabilityKey::Chromium,
        CapabilityKey::Hardware,
        CapabilityKey::OpenSource,
        CapabilityKey::NonCustodial,
        CapabilityKey::HardwareSupport,
        CapabilityKey::SocialRecovery,
        CapabilityKey::Multisig,
        CapabilityKey::WalletConnect,
        CapabilityKey::RpcImporting,
        CapabilityKey::ConnectToDapps,
        CapabilityKey::NftSupport,
        CapabilityKey::Staking,
        CapabilityKey::Swaps,
        CapabilityKey::Layer2,
        CapabilityKey::GasFeeCustomization,
        CapabilityKey::EnsSupport,
        CapabilityKey::Erc20Support,
        CapabilityKey::BuyCrypto,
        CapabilityKey::WithdrawCrypto,
    ];

    /// Position in [`CapabilityKey::ALL`]; used to index flag arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityKey::Android => "android",
            CapabilityKey::Ios => "ios",
            CapabilityKey::Linux => "linux",
            CapabilityKey::Windows => "windows",
            CapabilityKey::MacOs => "macOS",
            CapabilityKey::Firefox => "firefox",
            CapabilityKey::Chromium => "chromium",
            CapabilityKey::Hardware => "hardware",
            CapabilityKey::OpenSource => "open_source",
            CapabilityKey::NonCustodial => "non_custodial",
            CapabilityKey::HardwareSupport => "hardware_support",
            CapabilityKey::SocialRecovery => "social_recovery",
            CapabilityKey::Multisig => "multisig",
            CapabilityKey::WalletConnect => "walletconnect",
            CapabilityKey::RpcImporting => "rpc_importing",
            CapabilityKey::ConnectToDapps => "connect_to_dapps",
            CapabilityKey::NftSupport => "nft_support",
            CapabilityKey::Staking => "staking",
            CapabilityKey::Swaps => "swaps",
            CapabilityKey::Layer2 => "layer_2",
            CapabilityKey::GasFeeCustomization => "gas_fee_customization",
            CapabilityKey::EnsSupport => "ens_support",
            CapabilityKey::Erc20Support => "erc_20_support",
            CapabilityKey::BuyCrypto => "buy_crypto",
            CapabilityKey::WithdrawCrypto => "withdraw_crypto",
        }
    }

    pub fn category(&self) -> CapabilityCategory {
        match self {
            CapabilityKey::Android
            | CapabilityKey::Ios
            | CapabilityKey::Linux
            | CapabilityKey::Windows
            | CapabilityKey::MacOs
            | CapabilityKey::Firefox
            | CapabilityKey::Chromium
            | CapabilityKey::Hardware => CapabilityCategory::Platform,
            CapabilityKey::OpenSource
            | CapabilityKey::NonCustodial
            | CapabilityKey::HardwareSupport
            | CapabilityKey::SocialRecovery
            | CapabilityKey::Multisig => CapabilityCategory::Trust,
            CapabilityKey::WalletConnect
            | CapabilityKey::RpcImporting
            | CapabilityKey::ConnectToDapps => CapabilityCategory::Connectivity,
            _ => CapabilityCategory::Feature,
        }
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for CapabilityKey {
    type Error = FilterError;

    fn try_from(value: &str) -> Result<Self, FilterError> {
        CapabilityKey::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| FilterError::InvalidCapabilityKey(value.to_string()))
    }
}

impl Serialize for CapabilityKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CapabilityKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        CapabilityKey::try_from(value.as_str()).map_err(D::Error::custom)
    }
}
