//! variables.rs
//! Run parameters: allocation policy and binary-item prefixes, with safe
//! defaults and domain validation. Wire tokens are explicit.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entities::{ItemClassifier, DEFAULT_BINARY_PREFIX};
use crate::errors::CoreError;
use crate::ids::is_valid_token;

/* ------------------------------- Policy ---------------------------------- */

/// How the allowed deduction is spread over remaining items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Policy {
    /// Equal per-item deduction; items that cannot absorb their share are
    /// sacrificed and the overflow is carried to the next round.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "equal"))]
    EqualSacrifice,
    /// Every item keeps the same fraction of its weight.
    #[cfg_attr(feature = "serde", serde(rename = "proportional", alias = "custom"))]
    Proportional,
}

impl Policy {
    pub const ALL: [Policy; 2] = [Policy::EqualSacrifice, Policy::Proportional];

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Policy::EqualSacrifice => "equal",
            Policy::Proportional => "proportional",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equal" => Ok(Policy::EqualSacrifice),
            "proportional" | "custom" => Ok(Policy::Proportional),
            _ => Err(CoreError::UnknownPolicy),
        }
    }
}

/* ------------------------------- Params ---------------------------------- */

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Params {
    pub policy: Policy,
    pub binary_prefixes: Vec<String>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            binary_prefixes: vec![DEFAULT_BINARY_PREFIX.to_owned()],
        }
    }
}

impl Params {
    /// Prefixes must be non-empty token strings; an empty list is allowed and
    /// disables binary handling.
    pub fn validate_domains(&self) -> Result<(), CoreError> {
        if self.binary_prefixes.iter().any(|p| !is_valid_token(p)) {
            return Err(CoreError::DomainOutOfRange("binary_prefixes"));
        }
        Ok(())
    }

    pub fn classifier(&self) -> ItemClassifier {
        ItemClassifier::new(self.binary_prefixes.iter().cloned())
    }
}
