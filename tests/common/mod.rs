//! Common Test Utilities
//!
//! Shared fixtures for operations and anchors used across test files.

#![allow(dead_code)]

use token_carry::types::envelope::AnchorRef;
use token_carry::types::token::{
    Allocation, AllocationPayload, BurnPayload, DeployFlags, DeployPayload, MintPayload,
    TokenOperation,
};

/// FOO, 8 decimals, one billion supply, open mint
pub fn foo_deploy() -> DeployPayload {
    DeployPayload::new("FOO", 8, 1_000_000_000, None, DeployFlags::OPEN_MINT)
        .expect("FOO deploy is valid")
}

/// One operation of every kind, with values crossing varint length boundaries
pub fn sample_operations() -> Vec<TokenOperation> {
    vec![
        TokenOperation::Deploy(foo_deploy()),
        TokenOperation::Deploy(
            DeployPayload::new(
                &"X".repeat(32),
                18,
                u64::MAX,
                Some(1 << 35),
                DeployFlags::FIXED_SUPPLY | DeployFlags::BURNABLE,
            )
            .expect("32-byte ticker is valid"),
        ),
        TokenOperation::Mint(MintPayload {
            token_id: 128,
            amount: 127,
            output_index: 255,
        }),
        TokenOperation::Transfer(AllocationPayload::new(
            1,
            vec![Allocation::new(0, 0), Allocation::new(1, u64::MAX)],
        )),
        TokenOperation::Transfer(AllocationPayload::new(2, Vec::new())),
        TokenOperation::Burn(BurnPayload {
            token_id: u64::MAX,
            amount: 1,
        }),
        TokenOperation::Split(AllocationPayload::new(
            1 << 35,
            (0..=254u8)
                .map(|i| Allocation::new(i, u64::from(i) * 1_000))
                .collect(),
        )),
    ]
}

/// `n` distinct anchors
pub fn anchors(n: usize) -> Vec<AnchorRef> {
    (0..n)
        .map(|i| AnchorRef::new((i as u64).to_be_bytes(), (i % 256) as u8))
        .collect()
}

/// Deterministic pseudo-random bytes (xorshift) for decoder robustness tests
pub fn pseudo_random_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}
