//! Round trips, size prediction and field bounds for the operation codec

use crate::common::{foo_deploy, sample_operations};
use token_carry::codec::error::{DecodeError, ValidationError};
use token_carry::codec::{calculate_payload_size, decode, encode, varint};
use token_carry::types::token::{
    Allocation, AllocationPayload, DeployFlags, DeployPayload, Ticker, TokenOperation,
    MAX_ALLOCATIONS, MAX_TICKER_LEN, OP_DEPLOY,
};

#[test]
fn every_operation_round_trips() {
    for op in sample_operations() {
        let bytes = encode(&op).unwrap();
        assert_eq!(bytes[0], op.opcode());
        assert_eq!(decode(&bytes).unwrap(), op, "round trip of {}", op.name());
    }
}

#[test]
fn predicted_size_matches_encoded_length() {
    for op in sample_operations() {
        assert_eq!(
            calculate_payload_size(&op),
            encode(&op).unwrap().len(),
            "size of {}",
            op.name()
        );
    }
}

#[test]
fn foo_deploy_layout() {
    let op = TokenOperation::Deploy(foo_deploy());
    let bytes = encode(&op).unwrap();

    let expected_len = 1 + 1 + 3 + 1 + varint::length(1_000_000_000) + 1 + 1;
    assert_eq!(varint::length(1_000_000_000), 5);
    assert_eq!(bytes.len(), expected_len);
    assert_eq!(bytes[0], OP_DEPLOY);
    assert_eq!(bytes[1], 3);
    assert_eq!(&bytes[2..5], b"FOO");
    assert_eq!(bytes[5], 8);
    // No mint limit, open mint
    assert_eq!(bytes[bytes.len() - 2], 0x00);
    assert_eq!(bytes[bytes.len() - 1], 0x01);
}

#[test]
fn varint_length_and_decode_agree() {
    let mut value = 1u64;
    let mut samples = vec![0u64, u64::MAX];
    while value != 0 {
        samples.push(value);
        samples.push(value - 1);
        value = value.wrapping_shl(1);
    }

    for value in samples {
        let bytes = varint::encode(value);
        assert_eq!(bytes.len(), varint::length(value), "length of {}", value);
        assert!(bytes.len() <= varint::MAX_VARINT_LEN);
        assert_eq!(varint::decode(&bytes, 0).unwrap(), (value, bytes.len()));
    }
}

#[test]
fn varint_decode_rejects_padding_and_overflow() {
    assert!(matches!(
        varint::decode(&[0x80, 0x00], 0),
        Err(DecodeError::NonCanonicalVarint { offset: 0 })
    ));

    let mut eleven = vec![0xff; 10];
    eleven.push(0x01);
    assert!(matches!(
        varint::decode(&eleven, 0),
        Err(DecodeError::VarintOverflow { .. })
    ));

    assert!(matches!(
        varint::decode(&[0x80, 0x80], 0),
        Err(DecodeError::MalformedVarint { offset: 0 })
    ));
}

#[test]
fn ticker_length_bound() {
    assert!(Ticker::new(&"A".repeat(MAX_TICKER_LEN)).is_ok());
    assert!(matches!(
        Ticker::new(&"A".repeat(MAX_TICKER_LEN + 1)),
        Err(ValidationError::TickerTooLong { len: 33, max: 32 })
    ));
    assert!(matches!(Ticker::new(""), Err(ValidationError::EmptyTicker)));
    assert!(matches!(
        Ticker::new("FO-O"),
        Err(ValidationError::InvalidTickerCharacters { .. })
    ));
    assert_eq!(Ticker::new("foo").unwrap().as_str(), "FOO");
}

#[test]
fn allocation_count_bound() {
    let at_limit = AllocationPayload::new(1, vec![Allocation::new(0, 1); MAX_ALLOCATIONS]);
    let bytes = encode(&TokenOperation::Transfer(at_limit.clone())).unwrap();
    assert_eq!(decode(&bytes).unwrap(), TokenOperation::Transfer(at_limit));

    let over = AllocationPayload::new(1, vec![Allocation::new(0, 1); MAX_ALLOCATIONS + 1]);
    assert!(matches!(
        encode(&TokenOperation::Split(over)),
        Err(ValidationError::TooManyAllocations { count: 256 })
    ));
}

#[test]
fn zero_mint_limit_is_rejected() {
    assert!(matches!(
        DeployPayload::new("FOO", 0, 1, Some(0), DeployFlags::empty()),
        Err(ValidationError::ZeroMintLimit)
    ));

    let mut deploy = foo_deploy();
    deploy.mint_limit = Some(0);
    assert!(matches!(
        encode(&TokenOperation::Deploy(deploy)),
        Err(ValidationError::ZeroMintLimit)
    ));
}

#[test]
fn unknown_flag_bits_survive() {
    let mut deploy = foo_deploy();
    deploy.flags = DeployFlags(0xf9);
    let op = TokenOperation::Deploy(deploy);
    let decoded = decode(&encode(&op).unwrap()).unwrap();
    match decoded {
        TokenOperation::Deploy(p) => {
            assert_eq!(p.flags.bits(), 0xf9);
            assert!(p.flags.contains(DeployFlags::OPEN_MINT));
            assert!(!p.flags.contains(DeployFlags::FIXED_SUPPLY));
        }
        other => panic!("expected deploy, got {:?}", other),
    }
}

#[test]
fn json_shape_is_tagged_by_operation() {
    let op = TokenOperation::Deploy(foo_deploy());
    let value = serde_json::to_value(&op).unwrap();
    assert_eq!(value["op"], "deploy");
    assert_eq!(value["ticker"], "FOO");

    let back: TokenOperation = serde_json::from_value(value).unwrap();
    assert_eq!(back, op);
}
