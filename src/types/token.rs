//! Token operation types and protocol constants
//!
//! Five operations move fungible token state: Deploy, Mint, Transfer, Burn
//! and Split. Each record starts with a one-byte opcode.
//!
//! ## Wire layout
//! - Deploy   (0x01): ticker_len(1) + ticker + decimals(1) + max_supply(varint)
//!   + mint_limit(varint, 0 = none) + flags(1)
//! - Mint     (0x02): token_id(varint) + amount(varint) + output_index(1)
//! - Transfer (0x03): token_id(varint) + count(1) + [output_index(1) + amount(varint)]*
//! - Burn     (0x04): token_id(varint) + amount(varint)
//! - Split    (0x05): same body as Transfer

use crate::codec::error::{CodecError, ValidationError};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const OP_DEPLOY: u8 = 0x01;
pub const OP_MINT: u8 = 0x02;
pub const OP_TRANSFER: u8 = 0x03;
pub const OP_BURN: u8 = 0x04;
pub const OP_SPLIT: u8 = 0x05;

/// Maximum ticker length in bytes
pub const MAX_TICKER_LEN: usize = 32;

/// Maximum allocations per Transfer/Split (count is stored in one byte)
pub const MAX_ALLOCATIONS: usize = 255;

lazy_static! {
    static ref TICKER_PATTERN: Regex = Regex::new(r"^[A-Za-z0-9]+$").unwrap();
}

/// Validated, uppercase token ticker
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Validate and normalise a ticker to uppercase
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::EmptyTicker);
        }
        if raw.len() > MAX_TICKER_LEN {
            return Err(ValidationError::TickerTooLong {
                len: raw.len(),
                max: MAX_TICKER_LEN,
            });
        }
        if !TICKER_PATTERN.is_match(raw) {
            return Err(ValidationError::InvalidTickerCharacters {
                ticker: raw.to_string(),
            });
        }
        Ok(Ticker(raw.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Encoded byte length (ASCII, so one byte per character)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<String> for Ticker {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ticker::new(&value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deploy flag bitmask
///
/// Bits are combinable. OPEN_MINT together with FIXED_SUPPLY is allowed here;
/// whether that combination makes sense is up to the consuming validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeployFlags(pub u8);

impl DeployFlags {
    pub const OPEN_MINT: DeployFlags = DeployFlags(0x01);
    pub const FIXED_SUPPLY: DeployFlags = DeployFlags(0x02);
    pub const BURNABLE: DeployFlags = DeployFlags(0x04);

    pub const fn empty() -> Self {
        DeployFlags(0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: DeployFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Human-readable flag names, unknown bits rendered as hex
    pub fn names(self) -> Vec<String> {
        let mut names = Vec::new();
        if self.contains(Self::OPEN_MINT) {
            names.push("OPEN_MINT".to_string());
        }
        if self.contains(Self::FIXED_SUPPLY) {
            names.push("FIXED_SUPPLY".to_string());
        }
        if self.contains(Self::BURNABLE) {
            names.push("BURNABLE".to_string());
        }
        let unknown = self.0 & !0x07;
        if unknown != 0 {
            names.push(format!("0x{:02x}", unknown));
        }
        names
    }
}

impl std::ops::BitOr for DeployFlags {
    type Output = DeployFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        DeployFlags(self.0 | rhs.0)
    }
}

/// Token amount sent to one transaction output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub output_index: u8,
    pub amount: u64,
}

impl Allocation {
    pub fn new(output_index: u8, amount: u64) -> Self {
        Self {
            output_index,
            amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployPayload {
    pub ticker: Ticker,
    pub decimals: u8,
    pub max_supply: u64,
    /// `None` is written as the varint 0 sentinel
    pub mint_limit: Option<u64>,
    pub flags: DeployFlags,
}

impl DeployPayload {
    /// Build a deploy record from raw caller fields
    pub fn new(
        ticker: &str,
        decimals: u8,
        max_supply: u64,
        mint_limit: Option<u64>,
        flags: DeployFlags,
    ) -> Result<Self, ValidationError> {
        if mint_limit == Some(0) {
            return Err(ValidationError::ZeroMintLimit);
        }
        Ok(Self {
            ticker: Ticker::new(ticker)?,
            decimals,
            max_supply,
            mint_limit,
            flags,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintPayload {
    pub token_id: u64,
    pub amount: u64,
    pub output_index: u8,
}

/// Shared body of Transfer and Split records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPayload {
    pub token_id: u64,
    pub allocations: Vec<Allocation>,
}

pub type TransferPayload = AllocationPayload;
pub type SplitPayload = AllocationPayload;

impl AllocationPayload {
    pub fn new(token_id: u64, allocations: Vec<Allocation>) -> Self {
        Self {
            token_id,
            allocations,
        }
    }

    /// Sum of all allocation amounts, `None` if it overflows u64
    pub fn total_amount(&self) -> Option<u64> {
        self.allocations
            .iter()
            .try_fold(0u64, |acc, a| acc.checked_add(a.amount))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnPayload {
    pub token_id: u64,
    pub amount: u64,
}

/// One token state transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TokenOperation {
    Deploy(DeployPayload),
    Mint(MintPayload),
    Transfer(TransferPayload),
    Burn(BurnPayload),
    Split(SplitPayload),
}

impl TokenOperation {
    pub fn opcode(&self) -> u8 {
        match self {
            TokenOperation::Deploy(_) => OP_DEPLOY,
            TokenOperation::Mint(_) => OP_MINT,
            TokenOperation::Transfer(_) => OP_TRANSFER,
            TokenOperation::Burn(_) => OP_BURN,
            TokenOperation::Split(_) => OP_SPLIT,
        }
    }

    pub fn name(&self) -> &'static str {
        opcode_name(self.opcode()).unwrap_or("Unknown")
    }

    /// Token the operation acts on; deploys create a new one and have none
    pub fn token_id(&self) -> Option<u64> {
        match self {
            TokenOperation::Deploy(_) => None,
            TokenOperation::Mint(p) => Some(p.token_id),
            TokenOperation::Transfer(p) | TokenOperation::Split(p) => Some(p.token_id),
            TokenOperation::Burn(p) => Some(p.token_id),
        }
    }

    /// One-line description for console output
    pub fn summary(&self) -> String {
        match self {
            TokenOperation::Deploy(p) => {
                let limit = p
                    .mint_limit
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "none".to_string());
                let flags = p.flags.names();
                format!(
                    "Deploy: {} decimals={} max_supply={} mint_limit={} flags=[{}]",
                    p.ticker,
                    p.decimals,
                    p.max_supply,
                    limit,
                    flags.join(",")
                )
            }
            TokenOperation::Mint(p) => format!(
                "Mint: token {} amount {} -> output {}",
                p.token_id, p.amount, p.output_index
            ),
            TokenOperation::Transfer(p) | TokenOperation::Split(p) => format!(
                "{}: token {} across {} allocations",
                self.name(),
                p.token_id,
                p.allocations.len()
            ),
            TokenOperation::Burn(p) => {
                format!("Burn: token {} amount {}", p.token_id, p.amount)
            }
        }
    }
}

/// Name for a known opcode byte
pub fn opcode_name(opcode: u8) -> Option<&'static str> {
    match opcode {
        OP_DEPLOY => Some("Deploy"),
        OP_MINT => Some("Mint"),
        OP_TRANSFER => Some("Transfer"),
        OP_BURN => Some("Burn"),
        OP_SPLIT => Some("Split"),
        _ => None,
    }
}

/// Parse a decimal amount string into u64
///
/// Values past `u64::MAX` are reported as `CodecError::Overflow` rather than
/// being truncated.
pub fn parse_amount(field: &'static str, input: &str) -> Result<u64, CodecError> {
    let trimmed = input.trim().replace('_', "");
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::InvalidAmount {
            field,
            value: input.to_string(),
        });
    }
    trimmed.parse::<u64>().map_err(|_| CodecError::Overflow {
        field,
        value: input.to_string(),
    })
}
