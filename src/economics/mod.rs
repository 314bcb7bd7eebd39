//! Carrier selection and fee estimation
//!
//! Fees are in satoshis and fee rates in sat/vB. Sizes work from the payload
//! length alone, via [`calculate_payload_size`] when starting from a typed
//! operation, so no encode is needed to price a message.
//!
//! Model:
//! - every message adds 6 envelope bytes (magic, kind, anchor count)
//! - discounted carriers pay `ceil(bytes / 4)` vbytes
//! - undiscounted carriers pay every byte plus a 10-byte output overhead
//! - both sit on a fixed 150-vbyte base transaction

use crate::codec::encoder::calculate_payload_size;
use crate::types::carrier::{Carrier, WITNESS_MAX_SIZE};
use crate::types::envelope::{ANCHOR_LEN, ENVELOPE_HEADER_LEN};
use crate::types::token::TokenOperation;
use crate::utils::math::percent_of;
use bitcoin::Weight;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Envelope header with zero anchors
pub const PROTOCOL_OVERHEAD: usize = ENVELOPE_HEADER_LEN;

/// Inputs, change output and transaction framing
pub const BASE_TX_VBYTES: u64 = 150;

/// Script and value bytes for an OP_RETURN style output
pub const OP_RETURN_OUTPUT_OVERHEAD: u64 = 10;

/// Fee comparison between undiscounted and witness embedding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSavings {
    pub op_return_fee: u64,
    pub witness_fee: u64,
    pub savings: u64,
    pub savings_percent: f64,
}

/// Sizing and fee figures for one carrier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarrierEstimate {
    pub carrier: Carrier,
    /// Payload plus envelope bytes
    pub embedded_bytes: u64,
    pub vsize: u64,
    pub fee: u64,
    /// Payload is within the carrier limit, the same rule as [`get_recommended_carrier`]
    pub fits: bool,
}

/// Sizing decision for a typed operation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperationEstimate {
    pub payload_size: usize,
    pub recommended_carrier: Carrier,
    pub estimated_fee: u64,
    pub savings: FeeSavings,
}

/// Virtual size of a transaction embedding `embedded_bytes`
pub fn virtual_size(embedded_bytes: u64, use_witness: bool) -> u64 {
    let data_vbytes = if use_witness {
        // Witness bytes weigh one unit each; round up without adding to the weight
        Weight::from_wu(embedded_bytes).to_vbytes_floor() + u64::from(embedded_bytes % 4 != 0)
    } else {
        embedded_bytes.saturating_add(OP_RETURN_OUTPUT_OVERHEAD)
    };
    BASE_TX_VBYTES.saturating_add(data_vbytes)
}

/// Fee for a payload with no anchors
pub fn estimate_fee(payload_size: usize, fee_rate: u64, use_witness: bool) -> u64 {
    estimate_fee_with_anchors(payload_size, 0, fee_rate, use_witness)
}

/// Fee for a payload carrying `anchor_count` anchors
pub fn estimate_fee_with_anchors(
    payload_size: usize,
    anchor_count: usize,
    fee_rate: u64,
    use_witness: bool,
) -> u64 {
    let embedded = embedded_bytes(payload_size, anchor_count);
    virtual_size(embedded, use_witness).saturating_mul(fee_rate)
}

/// Witness data whenever it fits, otherwise an inscription
///
/// OP_RETURN, Stamps and Taproot Annex are only ever chosen manually.
pub fn get_recommended_carrier(payload_size: usize) -> Carrier {
    if payload_size <= WITNESS_MAX_SIZE {
        Carrier::WitnessData
    } else {
        Carrier::Inscription
    }
}

/// Compare undiscounted and witness fees for the same payload
pub fn calculate_fee_savings(payload_size: usize, fee_rate: u64) -> FeeSavings {
    let op_return_fee = estimate_fee(payload_size, fee_rate, false);
    let witness_fee = estimate_fee(payload_size, fee_rate, true);
    let savings = op_return_fee.saturating_sub(witness_fee);

    FeeSavings {
        op_return_fee,
        witness_fee,
        savings,
        savings_percent: percent_of(savings, op_return_fee),
    }
}

/// Figures for a manually chosen carrier
pub fn estimate_carrier_fee(carrier: Carrier, payload_size: usize, fee_rate: u64) -> CarrierEstimate {
    let embedded = embedded_bytes(payload_size, 0);
    let vsize = virtual_size(embedded, carrier.is_discounted());

    CarrierEstimate {
        carrier,
        embedded_bytes: embedded,
        vsize,
        fee: vsize.saturating_mul(fee_rate),
        fits: carrier.fits(payload_size),
    }
}

/// Estimates for every carrier, in table order
pub fn compare_carriers(payload_size: usize, fee_rate: u64) -> Vec<CarrierEstimate> {
    Carrier::ALL
        .into_iter()
        .map(|carrier| estimate_carrier_fee(carrier, payload_size, fee_rate))
        .collect()
}

/// Cheapest carrier that can hold the payload, if any
pub fn cheapest_fitting_carrier(payload_size: usize, fee_rate: u64) -> Option<CarrierEstimate> {
    compare_carriers(payload_size, fee_rate)
        .into_iter()
        .filter(|estimate| estimate.fits)
        .min_by_key(|estimate| estimate.fee)
}

/// Price a typed operation without encoding it
pub fn estimate_operation(op: &TokenOperation, fee_rate: u64) -> OperationEstimate {
    let payload_size = calculate_payload_size(op);
    let recommended_carrier = get_recommended_carrier(payload_size);
    let estimated_fee = estimate_fee(payload_size, fee_rate, recommended_carrier.is_discounted());

    debug!(
        "{} payload: {} bytes, carrier={}, fee={} sats at {} sat/vB",
        op.name(),
        payload_size,
        recommended_carrier,
        estimated_fee,
        fee_rate
    );

    OperationEstimate {
        payload_size,
        recommended_carrier,
        estimated_fee,
        savings: calculate_fee_savings(payload_size, fee_rate),
    }
}

fn embedded_bytes(payload_size: usize, anchor_count: usize) -> u64 {
    let total = payload_size
        .saturating_add(PROTOCOL_OVERHEAD)
        .saturating_add(anchor_count.saturating_mul(ANCHOR_LEN));
    u64::try_from(total).unwrap_or(u64::MAX)
}
