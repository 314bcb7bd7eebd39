//! Envelope wrapping for token payloads
//!
//! ```text
//! [magic: A1 1C 00 01][kind: 20][anchor_count][anchor: 8B prefix + 1B vout]*[body]
//! ```
//!
//! Unwrapping a buffer with another magic or kind is a routing decision, not
//! a failure: it simply belongs to a different protocol, so `None` is returned.

use super::error::{ValidationError, ValidationResult};
use crate::types::envelope::{
    AnchorRef, ProtocolMessage, ANCHOR_LEN, ENVELOPE_HEADER_LEN, MAX_ANCHORS, PROTOCOL_MAGIC,
    TOKEN_KIND, TXID_PREFIX_LEN,
};
use tracing::debug;

/// Prefix `payload` with the envelope header and anchors
pub fn wrap(payload: &[u8], anchors: &[AnchorRef]) -> ValidationResult<Vec<u8>> {
    if anchors.len() > MAX_ANCHORS {
        return Err(ValidationError::TooManyAnchors {
            count: anchors.len(),
        });
    }

    let mut buf =
        Vec::with_capacity(ENVELOPE_HEADER_LEN + anchors.len() * ANCHOR_LEN + payload.len());
    buf.extend_from_slice(&PROTOCOL_MAGIC);
    buf.push(TOKEN_KIND);
    buf.push(anchors.len() as u8);
    for anchor in anchors {
        buf.extend_from_slice(&anchor.txid_prefix);
        buf.push(anchor.vout);
    }
    buf.extend_from_slice(payload);
    Ok(buf)
}

/// Payload slice of a token envelope, or `None` if `bytes` is not one
pub fn unwrap(bytes: &[u8]) -> Option<&[u8]> {
    let body_offset = body_offset(bytes)?;
    Some(&bytes[body_offset..])
}

/// Parse an envelope including its anchors
pub fn parse_message(bytes: &[u8]) -> Option<ProtocolMessage> {
    let body_offset = body_offset(bytes)?;

    let anchors = bytes[ENVELOPE_HEADER_LEN..body_offset]
        .chunks_exact(ANCHOR_LEN)
        .map(|chunk| {
            let mut txid_prefix = [0u8; TXID_PREFIX_LEN];
            txid_prefix.copy_from_slice(&chunk[..TXID_PREFIX_LEN]);
            AnchorRef::new(txid_prefix, chunk[TXID_PREFIX_LEN])
        })
        .collect();

    Some(ProtocolMessage {
        kind: bytes[4],
        anchors,
        body: bytes[body_offset..].to_vec(),
    })
}

impl ProtocolMessage {
    /// Serialise with [`wrap`]
    pub fn to_bytes(&self) -> ValidationResult<Vec<u8>> {
        wrap(&self.body, &self.anchors)
    }
}

/// Offset of the body, after checking magic, kind and anchor bounds
fn body_offset(bytes: &[u8]) -> Option<usize> {
    if bytes.len() < ENVELOPE_HEADER_LEN || bytes[..4] != PROTOCOL_MAGIC {
        return None;
    }
    if bytes[4] != TOKEN_KIND {
        debug!("Skipping envelope with kind {}", bytes[4]);
        return None;
    }

    let anchor_count = bytes[5] as usize;
    let offset = ENVELOPE_HEADER_LEN + anchor_count * ANCHOR_LEN;
    if bytes.len() < offset {
        return None;
    }
    Some(offset)
}
