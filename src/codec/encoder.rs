//! Token operation encoders
//!
//! Each encoder validates first, sizes the output exactly with the same
//! arithmetic as [`calculate_payload_size`], then writes into a single
//! allocation. A failed validation never yields partial output.

use super::error::{ValidationError, ValidationResult};
use super::varint;
use crate::types::token::{
    AllocationPayload, BurnPayload, DeployPayload, MintPayload, TokenOperation, MAX_ALLOCATIONS,
    OP_BURN, OP_DEPLOY, OP_MINT, OP_SPLIT, OP_TRANSFER,
};
use tracing::debug;

/// Encode any operation
pub fn encode(op: &TokenOperation) -> ValidationResult<Vec<u8>> {
    match op {
        TokenOperation::Deploy(p) => encode_deploy(p),
        TokenOperation::Mint(p) => Ok(encode_mint(p)),
        TokenOperation::Transfer(p) => encode_transfer(p),
        TokenOperation::Burn(p) => Ok(encode_burn(p)),
        TokenOperation::Split(p) => encode_split(p),
    }
}

/// Deploy (0x01); a missing mint limit is written as the varint 0 sentinel
pub fn encode_deploy(p: &DeployPayload) -> ValidationResult<Vec<u8>> {
    if p.mint_limit == Some(0) {
        return Err(ValidationError::ZeroMintLimit);
    }

    let size = deploy_size(p);
    let mut buf = Vec::with_capacity(size);
    buf.push(OP_DEPLOY);
    // Ticker is at most 32 bytes, enforced by Ticker::new
    buf.push(p.ticker.len() as u8);
    buf.extend_from_slice(p.ticker.as_bytes());
    buf.push(p.decimals);
    varint::encode_into(p.max_supply, &mut buf);
    varint::encode_into(p.mint_limit.unwrap_or(0), &mut buf);
    buf.push(p.flags.bits());

    debug_assert_eq!(buf.len(), size);
    debug!("Encoded deploy {} ({} bytes)", p.ticker, buf.len());
    Ok(buf)
}

/// Mint (0x02)
pub fn encode_mint(p: &MintPayload) -> Vec<u8> {
    let size = mint_size(p);
    let mut buf = Vec::with_capacity(size);
    buf.push(OP_MINT);
    varint::encode_into(p.token_id, &mut buf);
    varint::encode_into(p.amount, &mut buf);
    buf.push(p.output_index);

    debug_assert_eq!(buf.len(), size);
    buf
}

/// Transfer (0x03)
pub fn encode_transfer(p: &AllocationPayload) -> ValidationResult<Vec<u8>> {
    encode_allocations(OP_TRANSFER, p)
}

/// Burn (0x04)
pub fn encode_burn(p: &BurnPayload) -> Vec<u8> {
    let size = burn_size(p);
    let mut buf = Vec::with_capacity(size);
    buf.push(OP_BURN);
    varint::encode_into(p.token_id, &mut buf);
    varint::encode_into(p.amount, &mut buf);

    debug_assert_eq!(buf.len(), size);
    buf
}

/// Split (0x05), same body as Transfer
pub fn encode_split(p: &AllocationPayload) -> ValidationResult<Vec<u8>> {
    encode_allocations(OP_SPLIT, p)
}

fn encode_allocations(opcode: u8, p: &AllocationPayload) -> ValidationResult<Vec<u8>> {
    if p.allocations.len() > MAX_ALLOCATIONS {
        return Err(ValidationError::TooManyAllocations {
            count: p.allocations.len(),
        });
    }

    let size = allocations_size(p);
    let mut buf = Vec::with_capacity(size);
    buf.push(opcode);
    varint::encode_into(p.token_id, &mut buf);
    buf.push(p.allocations.len() as u8);
    for allocation in &p.allocations {
        buf.push(allocation.output_index);
        varint::encode_into(allocation.amount, &mut buf);
    }

    debug_assert_eq!(buf.len(), size);
    debug!(
        "Encoded opcode 0x{:02x} with {} allocations ({} bytes)",
        opcode,
        p.allocations.len(),
        buf.len()
    );
    Ok(buf)
}

/// Exact encoded length of `op`, without encoding it
pub fn calculate_payload_size(op: &TokenOperation) -> usize {
    match op {
        TokenOperation::Deploy(p) => deploy_size(p),
        TokenOperation::Mint(p) => mint_size(p),
        TokenOperation::Transfer(p) | TokenOperation::Split(p) => allocations_size(p),
        TokenOperation::Burn(p) => burn_size(p),
    }
}

fn deploy_size(p: &DeployPayload) -> usize {
    1 + 1
        + p.ticker.len()
        + 1
        + varint::length(p.max_supply)
        + varint::length(p.mint_limit.unwrap_or(0))
        + 1
}

fn mint_size(p: &MintPayload) -> usize {
    1 + varint::length(p.token_id) + varint::length(p.amount) + 1
}

fn allocations_size(p: &AllocationPayload) -> usize {
    let body: usize = p
        .allocations
        .iter()
        .map(|a| 1 + varint::length(a.amount))
        .sum();
    1 + varint::length(p.token_id) + 1 + body
}

fn burn_size(p: &BurnPayload) -> usize {
    1 + varint::length(p.token_id) + varint::length(p.amount)
}
