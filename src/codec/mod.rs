//! Token operation codec
//!
//! - `varint`: canonical variable-length integers
//! - `encoder` / `decoder`: the five operation records
//! - `envelope`: magic, kind and anchor framing
//! - `text`: hex transport helpers

pub mod decoder;
pub mod encoder;
pub mod envelope;
pub mod error;
pub mod text;
pub mod varint;

pub use decoder::decode;
pub use encoder::{
    calculate_payload_size, encode, encode_burn, encode_deploy, encode_mint, encode_split,
    encode_transfer,
};
pub use envelope::{parse_message, unwrap, wrap};
pub use error::{CodecError, DecodeError, ValidationError};
pub use text::{bytes_to_hex, hex_to_bytes};

use crate::types::envelope::AnchorRef;
use crate::types::token::TokenOperation;

/// Encode `op` and wrap it in a token envelope
pub fn encode_message(op: &TokenOperation, anchors: &[AnchorRef]) -> Result<Vec<u8>, CodecError> {
    let payload = encode(op)?;
    Ok(wrap(&payload, anchors)?)
}

/// Unwrap and decode a token envelope
///
/// `Ok(None)` means the bytes belong to some other protocol.
pub fn decode_message(bytes: &[u8]) -> Result<Option<TokenOperation>, DecodeError> {
    match unwrap(bytes) {
        Some(payload) => decode(payload).map(Some),
        None => Ok(None),
    }
}
