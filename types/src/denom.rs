//! Denominations and the bank-side metadata registered for them.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of a priceable asset, e.g. `ueth`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Denom(String);

impl Denom {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Denom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Denom {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Denom {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for Denom {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One entry of the governance-controlled whitelist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenomEntry {
    pub name: Denom,
}

impl DenomEntry {
    pub fn new(name: impl Into<Denom>) -> Self {
        Self { name: name.into() }
    }
}

/// A unit of a denomination (e.g. `ueth` at exponent 0, `eth` at exponent 6).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenomUnit {
    pub denom: String,
    pub exponent: u32,
    pub aliases: Vec<String>,
}

/// Bank-module metadata for a base denomination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenomMetadata {
    pub description: String,
    pub denom_units: Vec<DenomUnit>,
    pub base: String,
    pub display: String,
    pub name: String,
    pub symbol: String,
}

impl DenomMetadata {
    /// Metadata for a micro-denominated asset: `ueth` gets units `ueth` (0),
    /// `meth` (3) and `eth` (6), display `eth` and name `ETH`.
    pub fn for_micro_denom(base: &Denom) -> Self {
        let base = base.as_str().to_string();
        let display: String = base.chars().skip(1).collect();
        let upper = display.to_uppercase();
        Self {
            description: format!("Oracle price feed asset {upper}"),
            denom_units: vec![
                DenomUnit {
                    denom: format!("u{display}"),
                    exponent: 0,
                    aliases: vec![format!("micro{display}")],
                },
                DenomUnit {
                    denom: format!("m{display}"),
                    exponent: 3,
                    aliases: vec![format!("milli{display}")],
                },
                DenomUnit {
                    denom: display.clone(),
                    exponent: 6,
                    aliases: Vec::new(),
                },
            ],
            base,
            name: upper.clone(),
            symbol: upper,
            display,
        }
    }
}
