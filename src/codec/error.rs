//! Codec-specific error types
//!
//! Encoding fails with [`ValidationError`] before any byte is written.
//! Decoding never panics: every malformed input maps to a [`DecodeError`].

/// Result type for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for encode operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Rejected caller input on the encode path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Ticker must not be empty")]
    EmptyTicker,

    #[error("Ticker is {len} bytes, maximum is {max}")]
    TickerTooLong { len: usize, max: usize },

    #[error("Ticker contains invalid characters: {ticker:?} (expected [A-Za-z0-9])")]
    InvalidTickerCharacters { ticker: String },

    #[error("Too many allocations: {count} (maximum 255)")]
    TooManyAllocations { count: usize },

    #[error("Too many anchors: {count} (maximum 255)")]
    TooManyAnchors { count: usize },

    /// Zero is the wire sentinel for "no mint limit"
    #[error("Mint limit of zero is not representable; omit the limit instead")]
    ZeroMintLimit,

    #[error("Output index {vout} does not fit in one byte")]
    VoutOutOfRange { vout: u32 },
}

/// Malformed input on the decode path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Empty payload")]
    Empty,

    #[error("Unknown opcode: 0x{0:02x}")]
    UnknownOpcode(u8),

    #[error("Truncated {field}: needed {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Malformed varint at offset {offset}: buffer ends before terminating byte")]
    MalformedVarint { offset: usize },

    #[error("Varint at offset {offset} exceeds 64 bits")]
    VarintOverflow { offset: usize },

    #[error("Non-canonical varint at offset {offset}")]
    NonCanonicalVarint { offset: usize },

    #[error("Invalid ticker: {0}")]
    InvalidTicker(ValidationError),

    #[error("{count} trailing bytes after {opcode} record")]
    TrailingBytes { opcode: &'static str, count: usize },
}

/// Umbrella error for callers crossing the text boundary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Malformed input: {0}")]
    Malformed(#[from] DecodeError),

    #[error("Overflow: {field} value {value} exceeds u64::MAX")]
    Overflow { field: &'static str, value: String },

    #[error("Invalid amount for {field}: {value:?}")]
    InvalidAmount { field: &'static str, value: String },

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid anchor {input:?}: {reason}")]
    InvalidAnchor { input: String, reason: String },

    #[error("Unknown carrier: {0}")]
    UnknownCarrier(String),
}
