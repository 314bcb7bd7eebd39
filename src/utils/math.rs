//! Ratio helpers for fee comparisons

/// `part` as a percentage of `whole`; a zero `whole` (free transaction) gives 0.0
///
/// ```
/// use token_carry::utils::math::percent_of;
///
/// // 1,290 of 2,580 sats saved
/// assert_eq!(percent_of(1_290, 2_580), 50.0);
/// assert_eq!(percent_of(0, 0), 0.0);
/// ```
pub fn percent_of(part: u64, whole: u64) -> f64 {
    match whole {
        0 => 0.0,
        // f64 keeps 53 bits, plenty for a displayed percentage
        w => part as f64 * 100.0 / w as f64,
    }
}
