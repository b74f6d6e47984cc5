//! Wallet address type

use crate::PassageError;
use serde::{Deserialize, Serialize};

/// Number of bytes in an account address.
pub const ADDRESS_BYTES: usize = 20;

const ADDRESS_PREFIX: &str = "0x";

/// A well-formed 20-byte hex account address (`0x` followed by 40 hex digits).
///
/// The original casing is preserved; checksummed and lowercase forms of the
/// same account are distinct values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Parse an address, rejecting anything that is not `0x` + 40 hex digits.
    pub fn parse(value: impl Into<String>) -> Result<Self, PassageError> {
        let value = value.into();
        if Self::is_well_formed(&value) {
            Ok(Self(value))
        } else {
            Err(PassageError::invalid(format!(
                "malformed wallet address: {value:?}"
            )))
        }
    }

    /// Returns `true` if `value` matches `^0x[a-fA-F0-9]{40}$`.
    pub fn is_well_formed(value: &str) -> bool {
        let Some(body) = value.strip_prefix(ADDRESS_PREFIX) else {
            return false;
        };
        body.len() == ADDRESS_BYTES * 2
            && hex::decode(body).is_ok_and(|bytes| bytes.len() == ADDRESS_BYTES)
    }

    /// Get the address string as reported.
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl TryFrom<String> for WalletAddress {
    type Error = PassageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}

impl std::str::FromStr for WalletAddress {
    type Err = PassageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
