//! Persona presets for the profile sidebar.
//!
//! A persona names the capabilities a user archetype is presumed to want.
//! Resolving one yields a fresh [`FilterState`]: the named keys are required
//! and every other key is reset to false.

use crate::catalog::CapabilityKey;
use crate::error::FilterError;
use crate::filter::FilterState;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PersonaPreset {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub required: &'static [CapabilityKey],
}

impl PersonaPreset {
    pub fn filter_state(&self) -> FilterState {
        FilterState::requiring(self.required.iter().copied())
    }
}

pub const PERSONAS: &[PersonaPreset] = &[
    PersonaPreset {
        name: "beginner",
        title: "New to crypto",
        description: "Mobile wallet with an easy way to buy and cash out",
        required: &[
            CapabilityKey::Ios,
            CapabilityKey::Android,
            CapabilityKey::BuyCrypto,
            CapabilityKey::WithdrawCrypto,
        ],
    },
    PersonaPreset {
        name: "investor",
        title: "Long-term holder",
        description: "Hardware-backed security and staking for assets held over time",
        required: &[
            CapabilityKey::HardwareSupport,
            CapabilityKey::NonCustodial,
            CapabilityKey::Staking,
        ],
    },
    PersonaPreset {
        name: "developer",
        title: "Developer",
        description: "Custom RPC endpoints, dapp connections, and fee control",
        required: &[
            CapabilityKey::Chromium,
            CapabilityKey::RpcImporting,
            CapabilityKey::ConnectToDapps,
            CapabilityKey::GasFeeCustomization,
        ],
    },
    PersonaPreset {
        name: "defi",
        title: "Finance",
        description: "Swaps, layer 2 networks, and broad token support",
        required: &[
            CapabilityKey::WalletConnect,
            CapabilityKey::Swaps,
            CapabilityKey::Layer2,
            CapabilityKey::Erc20Support,
        ],
    },
    PersonaPreset {
        name: "nft-collector",
        title: "NFT collector",
        description: "NFT galleries and ENS names",
        required: &[CapabilityKey::NftSupport, CapabilityKey::EnsSupport],
    },
    PersonaPreset {
        name: "advanced",
        title: "Advanced user",
        description: "Self-custody with multisig and hardware signing",
        required: &[
            CapabilityKey::NonCustodial,
            CapabilityKey::HardwareSupport,
            CapabilityKey::Multisig,
            CapabilityKey::GasFeeCustomization,
        ],
    },
    PersonaPreset {
        name: "privacy-focused",
        title: "Privacy focused",
        description: "Open source code and no custodian holding your keys",
        required: &[CapabilityKey::OpenSource, CapabilityKey::NonCustodial],
    },
];

/// Presets in sidebar order.
pub fn personas() -> &'static [PersonaPreset] {
    PERSONAS
}

pub fn find_persona(name: &str) -> Option<&'static PersonaPreset> {
    PERSONAS.iter().find(|persona| persona.name == name)
}

/// Resolve a persona name into a complete filter state.
///
/// Deterministic and catalog-independent. Unknown names fail without side
/// effects; callers keep whatever state they had.
pub fn resolve(name: &str) -> Result<FilterState, FilterError> {
    find_persona(name.trim())
        .map(PersonaPreset::filter_state)
        .ok_or_else(|| FilterError::UnknownPersona(name.to_string()))
}
