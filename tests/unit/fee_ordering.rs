//! Carrier limits, recommendation and fee monotonicity

use token_carry::economics::{
    calculate_fee_savings, compare_carriers, estimate_fee, estimate_fee_with_anchors,
    get_recommended_carrier, BASE_TX_VBYTES, OP_RETURN_OUTPUT_OVERHEAD, PROTOCOL_OVERHEAD,
};
use token_carry::types::carrier::{Carrier, WITNESS_MAX_SIZE};
use token_carry::types::envelope::ANCHOR_LEN;

#[test]
fn recommendation_boundary() {
    assert_eq!(WITNESS_MAX_SIZE, 4_000_000);
    assert_eq!(get_recommended_carrier(0), Carrier::WitnessData);
    assert_eq!(get_recommended_carrier(4_000_000), Carrier::WitnessData);
    assert_eq!(get_recommended_carrier(4_000_001), Carrier::Inscription);
}

#[test]
fn carrier_limits() {
    assert_eq!(Carrier::OpReturn.max_size(), 80);
    assert_eq!(Carrier::Stamps.max_size(), 8_000);
    assert_eq!(Carrier::TaprootAnnex.max_size(), 10_000);
    assert!(Carrier::OpReturn.fits(80));
    assert!(!Carrier::OpReturn.fits(81));
    assert!(!Carrier::OpReturn.is_discounted());
    assert!(Carrier::WitnessData.is_discounted());
}

#[test]
fn witness_is_strictly_cheaper() {
    for size in [1usize, 3, 4, 80, 1_000, 100_000, 4_000_000] {
        for rate in [1u64, 2, 10, 250] {
            let op_return = estimate_fee(size, rate, false);
            let witness = estimate_fee(size, rate, true);
            assert!(witness < op_return, "size {} rate {}", size, rate);

            let savings = calculate_fee_savings(size, rate);
            assert_eq!(savings.savings, op_return - witness);
            assert!(savings.savings > 0);
            assert!(savings.savings_percent > 0.0 && savings.savings_percent < 100.0);
        }
    }
}

#[test]
fn fees_grow_with_size_and_rate() {
    let mut previous = 0;
    for size in (0..2_000).step_by(37) {
        let fee = estimate_fee(size, 3, true);
        assert!(fee >= previous);
        previous = fee;
    }
    assert!(estimate_fee(500, 20, false) > estimate_fee(500, 19, false));
}

#[test]
fn exact_fee_model() {
    // 100-byte payload: 106 embedded bytes
    let embedded = 100 + PROTOCOL_OVERHEAD as u64;
    assert_eq!(
        estimate_fee(100, 2, false),
        (BASE_TX_VBYTES + embedded + OP_RETURN_OUTPUT_OVERHEAD) * 2
    );
    assert_eq!(estimate_fee(100, 2, true), (BASE_TX_VBYTES + 27) * 2);
    assert_eq!(estimate_fee(100, 0, true), 0);
}

#[test]
fn anchors_add_envelope_bytes() {
    assert_eq!(
        estimate_fee_with_anchors(50, 3, 1, false),
        estimate_fee(50 + 3 * ANCHOR_LEN, 1, false)
    );
}

#[test]
fn comparison_lists_every_carrier_in_order() {
    let estimates = compare_carriers(90, 5);
    let carriers: Vec<Carrier> = estimates.iter().map(|e| e.carrier).collect();
    assert_eq!(carriers, Carrier::ALL.to_vec());

    let op_return = &estimates[0];
    assert!(!op_return.fits);
    assert!(estimates[1..].iter().all(|e| e.fits));
}
