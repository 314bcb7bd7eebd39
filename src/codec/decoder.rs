//! Token operation decoder
//!
//! Input comes straight from the chain, so every read is bounds-checked and
//! every failure is a [`DecodeError`]. A record must consume the buffer
//! exactly.

use super::error::{DecodeError, DecodeResult, ValidationError};
use super::varint;
use crate::types::token::{
    opcode_name, Allocation, AllocationPayload, BurnPayload, DeployFlags, DeployPayload,
    MintPayload, Ticker, TokenOperation, OP_BURN, OP_DEPLOY, OP_MINT, OP_SPLIT, OP_TRANSFER,
};
use byteorder::ReadBytesExt;
use std::io::Cursor;
use tracing::debug;

/// Decode one operation record
pub fn decode(bytes: &[u8]) -> DecodeResult<TokenOperation> {
    let mut reader = FieldReader::new(bytes);
    let opcode = reader.read_u8("opcode").map_err(|e| match e {
        DecodeError::Truncated { .. } => DecodeError::Empty,
        other => other,
    })?;

    let op = match opcode {
        OP_DEPLOY => TokenOperation::Deploy(parse_deploy(&mut reader)?),
        OP_MINT => TokenOperation::Mint(parse_mint(&mut reader)?),
        OP_TRANSFER => TokenOperation::Transfer(parse_allocations(&mut reader)?),
        OP_BURN => TokenOperation::Burn(parse_burn(&mut reader)?),
        OP_SPLIT => TokenOperation::Split(parse_allocations(&mut reader)?),
        unknown => return Err(DecodeError::UnknownOpcode(unknown)),
    };

    let remaining = reader.remaining();
    if remaining > 0 {
        return Err(DecodeError::TrailingBytes {
            opcode: opcode_name(opcode).unwrap_or("Unknown"),
            count: remaining,
        });
    }

    debug!("Decoded {} ({} bytes)", op.name(), bytes.len());
    Ok(op)
}

/// Deploy: ticker_len(1) + ticker + decimals(1) + max_supply + mint_limit + flags(1)
fn parse_deploy(reader: &mut FieldReader<'_>) -> DecodeResult<DeployPayload> {
    let ticker_len = reader.read_u8("ticker length")? as usize;
    let ticker_bytes = reader.read_slice("ticker", ticker_len)?;
    let ticker_str = std::str::from_utf8(ticker_bytes).map_err(|_| {
        DecodeError::InvalidTicker(ValidationError::InvalidTickerCharacters {
            ticker: String::from_utf8_lossy(ticker_bytes).into_owned(),
        })
    })?;
    let ticker = Ticker::new(ticker_str).map_err(DecodeError::InvalidTicker)?;

    let decimals = reader.read_u8("decimals")?;
    let max_supply = reader.read_varint()?;
    let mint_limit = match reader.read_varint()? {
        0 => None,
        limit => Some(limit),
    };
    let flags = DeployFlags(reader.read_u8("flags")?);

    Ok(DeployPayload {
        ticker,
        decimals,
        max_supply,
        mint_limit,
        flags,
    })
}

/// Mint: token_id + amount + output_index(1)
fn parse_mint(reader: &mut FieldReader<'_>) -> DecodeResult<MintPayload> {
    let token_id = reader.read_varint()?;
    let amount = reader.read_varint()?;
    let output_index = reader.read_u8("output index")?;

    Ok(MintPayload {
        token_id,
        amount,
        output_index,
    })
}

/// Transfer/Split: token_id + count(1) + [output_index(1) + amount]*count
fn parse_allocations(reader: &mut FieldReader<'_>) -> DecodeResult<AllocationPayload> {
    let token_id = reader.read_varint()?;
    let count = reader.read_u8("allocation count")? as usize;

    // Each allocation takes at least 2 bytes, so cap the reservation by what is left
    let mut allocations = Vec::with_capacity(count.min(reader.remaining() / 2));
    for _ in 0..count {
        let output_index = reader.read_u8("allocation output index")?;
        let amount = reader.read_varint()?;
        allocations.push(Allocation {
            output_index,
            amount,
        });
    }

    Ok(AllocationPayload {
        token_id,
        allocations,
    })
}

/// Burn: token_id + amount
fn parse_burn(reader: &mut FieldReader<'_>) -> DecodeResult<BurnPayload> {
    let token_id = reader.read_varint()?;
    let amount = reader.read_varint()?;
    Ok(BurnPayload { token_id, amount })
}

/// Bounds-checked cursor over a record
struct FieldReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> FieldReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(bytes),
        }
    }

    fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    fn remaining(&self) -> usize {
        self.cursor.get_ref().len().saturating_sub(self.position())
    }

    fn truncated(&self, field: &'static str, needed: usize) -> DecodeError {
        DecodeError::Truncated {
            field,
            offset: self.position(),
            needed,
            available: self.remaining(),
        }
    }

    fn read_u8(&mut self, field: &'static str) -> DecodeResult<u8> {
        let truncated = self.truncated(field, 1);
        self.cursor.read_u8().map_err(|_| truncated)
    }

    fn read_slice(&mut self, field: &'static str, len: usize) -> DecodeResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(self.truncated(field, len));
        }
        let start = self.position();
        let bytes: &'a [u8] = *self.cursor.get_ref();
        self.cursor.set_position((start + len) as u64);
        Ok(&bytes[start..start + len])
    }

    fn read_varint(&mut self) -> DecodeResult<u64> {
        let bytes: &'a [u8] = *self.cursor.get_ref();
        let (value, consumed) = varint::decode(bytes, self.position())?;
        self.cursor.set_position((self.position() + consumed) as u64);
        Ok(value)
    }
}
