//! Protocol envelope constants and anchor references
//!
//! Every token message is prefixed with a 4-byte magic, a kind byte and a
//! list of anchors pointing back at earlier messages.
//!
//! ## Anchor collisions
//!
//! An anchor keeps only the first 8 bytes of a txid, so two different
//! transactions can share a prefix. Nothing here tries to resolve that;
//! indexers that need certainty should disambiguate, e.g. by block height.

use crate::codec::error::{CodecError, ValidationError};
use bitcoin::hashes::Hash;
use bitcoin::{OutPoint, Txid};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Protocol magic bytes
pub const PROTOCOL_MAGIC: [u8; 4] = [0xa1, 0x1c, 0x00, 0x01];

/// Kind byte identifying token messages
pub const TOKEN_KIND: u8 = 20;

/// magic(4) + kind(1) + anchor_count(1)
pub const ENVELOPE_HEADER_LEN: usize = 6;

/// txid_prefix(8) + vout(1)
pub const ANCHOR_LEN: usize = 9;

pub const TXID_PREFIX_LEN: usize = 8;

/// Maximum anchors per message (count is stored in one byte)
pub const MAX_ANCHORS: usize = 255;

/// Compact back-reference to a prior protocol message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnchorRef {
    pub txid_prefix: [u8; TXID_PREFIX_LEN],
    pub vout: u8,
}

impl AnchorRef {
    pub fn new(txid_prefix: [u8; TXID_PREFIX_LEN], vout: u8) -> Self {
        Self { txid_prefix, vout }
    }

    /// Anchor for an outpoint; the prefix follows the displayed txid order
    pub fn from_outpoint(outpoint: &OutPoint) -> Result<Self, ValidationError> {
        let vout = u8::try_from(outpoint.vout)
            .map_err(|_| ValidationError::VoutOutOfRange { vout: outpoint.vout })?;
        Ok(Self::from_txid(&outpoint.txid, vout))
    }

    pub fn from_txid(txid: &Txid, vout: u8) -> Self {
        // Internal byte order is the reverse of the hex users see
        let mut display = txid.to_byte_array();
        display.reverse();
        let mut txid_prefix = [0u8; TXID_PREFIX_LEN];
        txid_prefix.copy_from_slice(&display[..TXID_PREFIX_LEN]);
        Self { txid_prefix, vout }
    }

    /// Whether this anchor could refer to `txid`
    pub fn matches_txid(&self, txid: &Txid) -> bool {
        Self::from_txid(txid, self.vout).txid_prefix == self.txid_prefix
    }

    pub fn prefix_hex(&self) -> String {
        hex::encode(self.txid_prefix)
    }
}

impl fmt::Display for AnchorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix_hex(), self.vout)
    }
}

/// Parses `TXID:VOUT` (64 hex chars) or `PREFIX:VOUT` (16 hex chars)
impl FromStr for AnchorRef {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CodecError::InvalidAnchor {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (txid_part, vout_part) = s
            .rsplit_once(':')
            .ok_or_else(|| invalid("expected TXID:VOUT"))?;

        let vout_raw: u32 = vout_part
            .parse()
            .map_err(|_| invalid("vout is not a number"))?;
        let vout = u8::try_from(vout_raw).map_err(|_| invalid("vout exceeds 255"))?;

        match txid_part.len() {
            64 => {
                let txid = Txid::from_str(txid_part).map_err(|e| invalid(&e.to_string()))?;
                Ok(Self::from_txid(&txid, vout))
            }
            16 => {
                let bytes = hex::decode(txid_part).map_err(|e| invalid(&e.to_string()))?;
                let mut txid_prefix = [0u8; TXID_PREFIX_LEN];
                txid_prefix.copy_from_slice(&bytes);
                Ok(Self { txid_prefix, vout })
            }
            _ => Err(invalid("expected a 64-char txid or 16-char prefix")),
        }
    }
}

/// A decoded envelope: kind, anchors and the raw operation body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolMessage {
    pub kind: u8,
    pub anchors: Vec<AnchorRef>,
    pub body: Vec<u8>,
}

impl ProtocolMessage {
    pub fn new(anchors: Vec<AnchorRef>, body: Vec<u8>) -> Self {
        Self {
            kind: TOKEN_KIND,
            anchors,
            body,
        }
    }

    /// Header plus anchor bytes preceding the body
    pub fn header_len(&self) -> usize {
        ENVELOPE_HEADER_LEN + self.anchors.len() * ANCHOR_LEN
    }

    pub fn encoded_len(&self) -> usize {
        self.header_len() + self.body.len()
    }
}
