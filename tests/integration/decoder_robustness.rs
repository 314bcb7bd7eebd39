//! The decoder is total: arbitrary input yields a value or an error, never a panic

use crate::common::{pseudo_random_bytes, sample_operations};
use token_carry::codec::error::DecodeError;
use token_carry::codec::{decode, decode_message, encode, parse_message, unwrap};

#[test]
fn arbitrary_bytes_never_panic() {
    for seed in 1..2_000u64 {
        let len = (seed % 64) as usize;
        let mut bytes = pseudo_random_bytes(seed, len);
        if let Some(first) = bytes.first_mut() {
            // Bias towards valid opcodes so the field parsers are exercised
            *first = (*first % 6) + if seed % 3 == 0 { 0 } else { 1 };
        }
        let _ = decode(&bytes);
        let _ = decode_message(&bytes);
        let _ = parse_message(&bytes);
    }
}

#[test]
fn every_truncation_is_an_error() {
    for op in sample_operations() {
        let bytes = encode(&op).unwrap();
        for cut in 0..bytes.len() {
            let result = decode(&bytes[..cut]);
            assert!(result.is_err(), "{} cut at {} decoded", op.name(), cut);
        }
    }
}

#[test]
fn trailing_bytes_are_rejected() {
    for op in sample_operations() {
        let mut bytes = encode(&op).unwrap();
        bytes.push(0x00);
        assert!(matches!(
            decode(&bytes),
            Err(DecodeError::TrailingBytes { count: 1, .. })
        ));
    }
}

#[test]
fn specific_failures() {
    assert!(matches!(decode(&[]), Err(DecodeError::Empty)));
    assert!(matches!(decode(&[0x00]), Err(DecodeError::UnknownOpcode(0x00))));
    assert!(matches!(decode(&[0x06, 0x01]), Err(DecodeError::UnknownOpcode(0x06))));
    // Zero-length ticker
    assert!(matches!(
        decode(&[0x01, 0x00, 0x00, 0x01, 0x00, 0x00]),
        Err(DecodeError::InvalidTicker(_))
    ));
    // Padded varint for the mint amount
    assert!(matches!(
        decode(&[0x02, 0x01, 0x80, 0x00, 0x00]),
        Err(DecodeError::NonCanonicalVarint { offset: 2 })
    ));
}

#[test]
fn foreign_envelopes_are_skipped() {
    assert_eq!(unwrap(&[0xa1, 0x1c, 0x00, 0x01, 0x15, 0x00, 0x04]), None);
    assert_eq!(
        decode_message(&[0x6a, 0x1c, 0x00, 0x01, 0x14, 0x00]).unwrap(),
        None
    );
}
