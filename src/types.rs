//! Token protocol type system
//!
//! - `token`: operation records, ticker, flags and opcodes
//! - `envelope`: magic, kind, anchors and the parsed message
//! - `carrier`: embedding carriers and their size limits

pub mod carrier;
pub mod envelope;
pub mod token;

pub use carrier::Carrier;
pub use envelope::{AnchorRef, ProtocolMessage};
pub use token::{
    Allocation, AllocationPayload, BurnPayload, DeployFlags, DeployPayload, MintPayload,
    SplitPayload, Ticker, TokenOperation, TransferPayload,
};
