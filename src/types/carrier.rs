//! Embedding carriers for protocol payloads
//!
//! A carrier is the transaction field that physically holds the bytes.
//! Witness-discounted carriers pay a quarter of the weight per byte.

use crate::codec::error::CodecError;
use bitcoin::Weight;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Standard relay limit for OP_RETURN data
pub const OP_RETURN_MAX_SIZE: usize = 80;

/// Bare-multisig data (Stamps) practical ceiling
pub const STAMPS_MAX_SIZE: usize = 8_000;

/// Taproot annex practical ceiling
pub const TAPROOT_ANNEX_MAX_SIZE: usize = 10_000;

/// Witness-based carriers are bounded by block weight
pub const WITNESS_MAX_SIZE: usize = Weight::MAX_BLOCK.to_wu() as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Carrier {
    OpReturn,
    Inscription,
    Stamps,
    TaprootAnnex,
    WitnessData,
}

impl Carrier {
    pub const ALL: [Carrier; 5] = [
        Carrier::OpReturn,
        Carrier::Inscription,
        Carrier::Stamps,
        Carrier::TaprootAnnex,
        Carrier::WitnessData,
    ];

    pub const fn max_size(self) -> usize {
        match self {
            Carrier::OpReturn => OP_RETURN_MAX_SIZE,
            Carrier::Inscription => WITNESS_MAX_SIZE,
            Carrier::Stamps => STAMPS_MAX_SIZE,
            Carrier::TaprootAnnex => TAPROOT_ANNEX_MAX_SIZE,
            Carrier::WitnessData => WITNESS_MAX_SIZE,
        }
    }

    /// Whether bytes placed here get the witness discount
    pub const fn is_discounted(self) -> bool {
        match self {
            Carrier::OpReturn | Carrier::Stamps => false,
            Carrier::Inscription | Carrier::TaprootAnnex | Carrier::WitnessData => true,
        }
    }

    pub const fn fits(self, size: usize) -> bool {
        size <= self.max_size()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Carrier::OpReturn => "OP_RETURN",
            Carrier::Inscription => "Inscription",
            Carrier::Stamps => "Stamps",
            Carrier::TaprootAnnex => "Taproot Annex",
            Carrier::WitnessData => "Witness Data",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Carrier::OpReturn => "standard, tiny",
            Carrier::Inscription => "ordinal-style envelope",
            Carrier::Stamps => "bare multisig, unprunable",
            Carrier::TaprootAnnex => "reserved field",
            Carrier::WitnessData => "raw witness push",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Carrier {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalised.as_str() {
            "opreturn" => Ok(Carrier::OpReturn),
            "inscription" => Ok(Carrier::Inscription),
            "stamps" => Ok(Carrier::Stamps),
            "taprootannex" | "annex" => Ok(Carrier::TaprootAnnex),
            "witnessdata" | "witness" => Ok(Carrier::WitnessData),
            _ => Err(CodecError::UnknownCarrier(s.to_string())),
        }
    }
}
