//! Token operation codec and carrier economics
//!
//! Encodes fungible-token state transitions (deploy, mint, transfer, burn,
//! split) into compact byte payloads, wraps them in an anchored protocol
//! envelope, and prices the result across Bitcoin embedding carriers.
//!
//! ```
//! use token_carry::codec::{decode_message, encode_message};
//! use token_carry::types::token::{BurnPayload, TokenOperation};
//!
//! let op = TokenOperation::Burn(BurnPayload { token_id: 7, amount: 100 });
//! let bytes = encode_message(&op, &[]).unwrap();
//! assert_eq!(decode_message(&bytes).unwrap(), Some(op));
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod economics;
pub mod errors;
pub mod report;
pub mod types;
pub mod utils;
