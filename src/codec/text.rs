//! Byte/text boundary helpers for JSON and CLI transport

use super::error::CodecError;

/// Lowercase hex, no separators
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Parse hex, accepting an optional `0x` prefix
pub fn hex_to_bytes(input: &str) -> Result<Vec<u8>, CodecError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.len() % 2 != 0 {
        return Err(CodecError::InvalidHex(format!(
            "odd length ({} characters)",
            digits.len()
        )));
    }
    hex::decode(digits).map_err(|e| CodecError::InvalidHex(e.to_string()))
}
