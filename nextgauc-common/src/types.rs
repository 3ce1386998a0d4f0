//! Core authentication types: algorithm identifiers and authentication types.
//!
//! The numeric values follow the classic AuC numbering so that subscriber
//! databases keyed on these integers keep their meaning.

use std::fmt;
use std::str::FromStr;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// Authentication algorithm identifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u8)]
#[serde(try_from = "String", into = "String")]
pub enum AuthAlgo {
    /// No algorithm selected
    #[default]
    None = 0,
    /// COMP128 version 1 (A3/A8)
    Comp128v1 = 1,
    /// COMP128 version 2 (A3/A8)
    Comp128v2 = 2,
    /// COMP128 version 3 (A3/A8)
    Comp128v3 = 3,
    /// XOR test algorithm (3GPP TS 34.108)
    Xor = 4,
    /// MILENAGE (3GPP TS 35.206)
    Milenage = 5,
}

impl AuthAlgo {
    /// All algorithm identifiers, `None` included.
    pub const ALL: [AuthAlgo; 6] = [
        AuthAlgo::None,
        AuthAlgo::Comp128v1,
        AuthAlgo::Comp128v2,
        AuthAlgo::Comp128v3,
        AuthAlgo::Xor,
        AuthAlgo::Milenage,
    ];

    /// Returns the canonical name of the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            AuthAlgo::None => "None",
            AuthAlgo::Comp128v1 => "COMP128v1",
            AuthAlgo::Comp128v2 => "COMP128v2",
            AuthAlgo::Comp128v3 => "COMP128v3",
            AuthAlgo::Xor => "XOR",
            AuthAlgo::Milenage => "MILENAGE",
        }
    }

    /// Returns true if the algorithm can only produce GSM triplets.
    pub fn is_gsm_only(&self) -> bool {
        matches!(
            self,
            AuthAlgo::Comp128v1 | AuthAlgo::Comp128v2 | AuthAlgo::Comp128v3
        )
    }
}

impl fmt::Display for AuthAlgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when an algorithm name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown authentication algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for AuthAlgo {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuthAlgo::ALL
            .iter()
            .copied()
            .find(|algo| algo.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

impl TryFrom<String> for AuthAlgo {
    type Error = UnknownAlgorithm;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AuthAlgo> for String {
    fn from(algo: AuthAlgo) -> Self {
        algo.name().to_string()
    }
}

/// Authentication type of a subscriber or a vector.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// No authentication
    #[default]
    None = 0x00,
    /// GSM (2G) authentication, SRES/Kc triplets
    Gsm = 0x01,
    /// UMTS (3G) AKA, quintuplets
    Umts = 0x02,
}

impl AuthType {
    /// Returns the canonical name of the authentication type.
    pub fn name(&self) -> &'static str {
        match self {
            AuthType::None => "None",
            AuthType::Gsm => "GSM",
            AuthType::Umts => "UMTS",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bitmask of [`AuthType`] values whose result fields are valid in a vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AuthTypes(u8);

impl AuthTypes {
    /// Empty mask
    pub const NONE: AuthTypes = AuthTypes(0);
    /// GSM fields (SRES, Kc) valid
    pub const GSM: AuthTypes = AuthTypes(AuthType::Gsm as u8);
    /// UMTS fields (AUTN, RES, CK, IK) valid
    pub const UMTS: AuthTypes = AuthTypes(AuthType::Umts as u8);

    /// Returns the raw bitmask.
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Returns true if the given authentication type is set.
    pub fn contains(&self, auth_type: AuthType) -> bool {
        auth_type != AuthType::None && self.0 & u8::from(auth_type) != 0
    }

    /// Sets the given authentication type.
    pub fn insert(&mut self, auth_type: AuthType) {
        self.0 |= u8::from(auth_type);
    }

    /// Returns true if no type is set.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for AuthTypes {
    type Output = AuthTypes;

    fn bitor(self, rhs: Self) -> Self::Output {
        AuthTypes(self.0 | rhs.0)
    }
}

impl From<AuthType> for AuthTypes {
    fn from(auth_type: AuthType) -> Self {
        AuthTypes(auth_type.into())
    }
}

impl fmt::Display for AuthTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [AuthType::Gsm, AuthType::Umts]
            .iter()
            .filter(|t| self.contains(**t))
            .map(|t| t.name())
            .collect();
        if names.is_empty() {
            f.write_str("None")
        } else {
            f.write_str(&names.join("|"))
        }
    }
}

/// Form in which the operator variant value is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpType {
    /// Operator key (OP) - needs to be converted to OPc
    Op,
    /// Operator key derived (OPc) - used directly
    #[default]
    Opc,
}
