//! EIP-155 network identity.
//!
//! A [`Network`] binds a signed transaction to one chain. Well-known networks
//! carry a fixed lowercase name and chain id; everything else is
//! [`Network::Custom`], which has a chain id and an empty name.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

/// The most-used EVM networks plus an open case for any other chain id.
///
/// Equality compares **both** the chain id and the symbolic name, so
/// `Network::Custom(1) != Network::Mainnet` even though both report chain id 1.
#[derive(Debug, Clone, Copy, Default)]
pub enum Network {
    #[default]
    Mainnet,
    Sepolia,
    Fncy,
    FncyTestnet,
    Bsc,
    BscTestnet,
    /// Any chain id outside the well-known table. Its name is always empty.
    Custom(u64),
}

/// Well-known networks in declaration order. `Custom` is never listed.
const KNOWN: [Network; 6] = [
    Network::Mainnet,
    Network::Sepolia,
    Network::Fncy,
    Network::FncyTestnet,
    Network::Bsc,
    Network::BscTestnet,
];

impl Network {
    /// Symbolic name; empty for [`Network::Custom`].
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Sepolia => "sepolia",
            Network::Fncy => "fncy",
            Network::FncyTestnet => "fncy_testnet",
            Network::Bsc => "bsc",
            Network::BscTestnet => "bsc_testnet",
            Network::Custom(_) => "",
        }
    }

    /// EIP-155 chain id. For [`Network::Custom`] this is exactly the wrapped value.
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Sepolia => 11_155_111,
            Network::Fncy => 73,
            Network::FncyTestnet => 923_018,
            Network::Bsc => 56,
            Network::BscTestnet => 97,
            Network::Custom(id) => *id,
        }
    }

    /// Resolve a chain id against the well-known table, falling back to
    /// [`Network::Custom`]. Never fails.
    pub fn from_chain_id(chain_id: u64) -> Self {
        KNOWN
            .iter()
            .copied()
            .find(|n| n.chain_id() == chain_id)
            .unwrap_or(Network::Custom(chain_id))
    }

    /// All well-known networks, in a stable order.
    pub fn all_known() -> &'static [Network] {
        &KNOWN
    }

    /// Returns `true` for [`Network::Custom`].
    pub fn is_custom(&self) -> bool {
        matches!(self, Network::Custom(_))
    }
}

impl PartialEq for Network {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id() == other.chain_id() && self.name() == other.name()
    }
}

impl Eq for Network {}

impl Hash for Network {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chain_id().hash(state);
        self.name().hash(state);
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Custom(id) => write!(f, "custom({id})"),
            known => write!(f, "{}", known.name()),
        }
    }
}

/// Returned by [`Network::from_str`] for a name that is neither a known
/// network, a decimal chain id, nor `custom(<id>)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown network name: {0}")]
pub struct ParseNetworkError(pub String);

impl FromStr for Network {
    type Err = ParseNetworkError;

    /// Accepts a well-known name (`"mainnet"`, `"bsc_testnet"`, ...), a
    /// decimal chain id, or the `custom(<id>)` form printed by `Display`.
    /// The last always yields [`Network::Custom`], even for a well-known id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(n) = KNOWN
            .iter()
            .find(|n| n.name().eq_ignore_ascii_case(trimmed))
        {
            return Ok(*n);
        }
        if let Some(id) = trimmed
            .strip_prefix("custom(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return id
                .trim()
                .parse::<u64>()
                .map(Network::Custom)
                .map_err(|_| ParseNetworkError(s.to_string()));
        }
        trimmed
            .parse::<u64>()
            .map(Network::from_chain_id)
            .map_err(|_| ParseNetworkError(s.to_string()))
    }
}

// Serialized as the bare chain id; deserialization goes through `from_chain_id`.
impl Serialize for Network {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.chain_id())
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Network::from_chain_id)
    }
}
