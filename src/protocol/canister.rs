//! Canister identity

use std::{fmt, str::FromStr};

use candid::Principal;
use serde::{Deserialize, Serialize};

use super::error::AgentError;

/// Principal of a remote canister (e.g. `rrkah-fqaaa-aaaaa-aaaaq-cai`)
///
/// Parsing goes through [`Principal::from_text`], so the CRC32 checksum and
/// the five-character grouping of the textual form are both enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanisterId(Principal);

impl CanisterId {
    /// Parse and validate a textual canister id
    pub fn parse(text: impl AsRef<str>) -> Result<Self, AgentError> {
        let text = text.as_ref();
        Principal::from_text(text)
            .map(Self)
            .map_err(|e| AgentError::InvalidCanisterId(format!("{:?}: {}", text, e)))
    }

    /// The canonical textual form
    pub fn to_text(&self) -> String {
        self.0.to_text()
    }
}

impl fmt::Display for CanisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_text())
    }
}

impl FromStr for CanisterId {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CanisterId {
    type Error = AgentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<CanisterId> for String {
    fn from(id: CanisterId) -> Self {
        id.to_text()
    }
}
