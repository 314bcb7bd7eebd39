//! Encode -> price -> wrap -> unwrap -> decode through the CLI helpers and binary

use crate::common::{anchors, foo_deploy, sample_operations};
use std::process::Command;
use token_carry::cli::commands::decode::decode_hex;
use token_carry::cli::commands::encode::{encode_operation, parse_allocation, parse_anchors};
use token_carry::cli::commands::fees::{fee_report, payload_size_from_hex};
use token_carry::codec::{calculate_payload_size, decode_message, encode, encode_message};
use token_carry::economics::{estimate_fee, estimate_operation};
use token_carry::errors::AppError;
use token_carry::report::{render, OutputFormat};
use token_carry::types::carrier::Carrier;
use token_carry::types::token::{AllocationPayload, TokenOperation};

#[test]
fn pipeline_for_every_operation() -> anyhow::Result<()> {
    for (i, op) in sample_operations().into_iter().enumerate() {
        let refs = anchors(i);
        let estimate = estimate_operation(&op, 4);
        assert_eq!(estimate.payload_size, encode(&op)?.len());
        assert_eq!(estimate.recommended_carrier, Carrier::WitnessData);
        assert_eq!(
            estimate.estimated_fee,
            estimate_fee(estimate.payload_size, 4, true)
        );

        let message = encode_message(&op, &refs)?;
        assert_eq!(decode_message(&message)?, Some(op.clone()));

        let report = decode_hex(&hex::encode(&message), false)?;
        assert_eq!(report.operation, op);
        assert_eq!(report.anchors, refs);
    }
    Ok(())
}

#[test]
fn encode_report_decodes_back() -> anyhow::Result<()> {
    let op = TokenOperation::Transfer(AllocationPayload::new(
        9,
        vec![parse_allocation("0:500")?, parse_allocation("3:70000")?],
    ));
    let refs = parse_anchors(&["4a5e1e4baab89f3a:1".to_string()])?;
    let encoded = encode_operation(op.clone(), refs.clone(), true, 12)?;

    let decoded = decode_hex(&encoded.hex, false)?;
    assert_eq!(decoded.operation, op);
    assert_eq!(decoded.anchors, refs);

    assert_eq!(payload_size_from_hex(&encoded.hex)?, calculate_payload_size(&op));

    let json = render(&encoded, OutputFormat::Json)?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(value["operation"]["op"], "transfer");
    assert_eq!(value["estimate"]["recommended_carrier"], "WitnessData");
    Ok(())
}

#[test]
fn raw_encoding_skips_the_envelope() -> anyhow::Result<()> {
    let op = TokenOperation::Deploy(foo_deploy());
    let encoded = encode_operation(op.clone(), Vec::new(), false, 1)?;
    assert_eq!(encoded.total_bytes, 13);

    let decoded = decode_hex(&encoded.hex, true)?;
    assert_eq!(decoded.operation, op);

    // Bare operation bytes are not an envelope
    assert!(matches!(
        decode_hex(&encoded.hex, false),
        Err(AppError::NotTokenMessage(_))
    ));
    Ok(())
}

#[test]
fn fee_report_matches_economics() {
    let report = fee_report(200, 3);
    assert_eq!(report.recommended, Carrier::WitnessData);
    assert_eq!(report.carriers.len(), Carrier::ALL.len());
    assert_eq!(report.savings.op_return_fee, estimate_fee(200, 3, false));
    assert_eq!(report.savings.witness_fee, estimate_fee(200, 3, true));
}

#[test]
fn binary_encodes_and_decodes() {
    let exe = env!("CARGO_BIN_EXE_token-carry");

    let output = Command::new(exe)
        .args([
            "encode", "burn", "--token-id", "2", "--amount", "10", "--format", "json",
        ])
        .env_remove("TOKEN_CARRY_FEE_RATE")
        .output()
        .expect("binary runs");
    assert!(output.status.success(), "{:?}", output);

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("encode prints JSON");
    let hex = value["hex"].as_str().expect("hex field");
    assert_eq!(hex, "a11c0001140004020a");

    let output = Command::new(exe)
        .args(["decode", hex, "--format", "json"])
        .output()
        .expect("binary runs");
    assert!(output.status.success(), "{:?}", output);
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("decode prints JSON");
    assert_eq!(value["operation"]["op"], "burn");
    assert_eq!(value["operation"]["amount"], 10);
}

#[test]
fn binary_reports_bad_input() {
    let output = Command::new(env!("CARGO_BIN_EXE_token-carry"))
        .args(["decode", "a11c00011400ff"])
        .output()
        .expect("binary runs");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error"));
}

#[test]
fn binary_rejects_invalid_fee_rate_env() {
    let output = Command::new(env!("CARGO_BIN_EXE_token-carry"))
        .args(["fees", "--size", "100"])
        .env("TOKEN_CARRY_FEE_RATE", "fast")
        .output()
        .expect("binary runs");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration error"), "{}", stderr);
    assert!(stderr.contains("TOKEN_CARRY_FEE_RATE"), "{}", stderr);
}

#[test]
fn binary_prices_huge_sizes_without_panicking() {
    let output = Command::new(env!("CARGO_BIN_EXE_token-carry"))
        .args(["fees", "--size", "18446744073709551612", "--format", "json"])
        .env_remove("TOKEN_CARRY_FEE_RATE")
        .output()
        .expect("binary runs");
    assert!(output.status.success(), "{:?}", output);
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("fees prints JSON");
    assert_eq!(value["recommended"], "Inscription");
}
