//! Fee and size formatting for console output

use bitcoin::Amount;

/// Satoshi amount as BTC plus sats
///
/// # Examples
/// ```
/// use token_carry::utils::currency::format_sats_as_btc;
///
/// assert_eq!(format_sats_as_btc(5471), "0.00005471 BTC (5471 sats)");
/// ```
pub fn format_sats_as_btc(sats: u64) -> String {
    format!("{:.8} BTC ({} sats)", Amount::from_sat(sats).to_btc(), sats)
}

/// Number with thousands separators, e.g. "4,000,000"
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Byte count in B/KB/MB
pub fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    if (bytes as f64) >= MB {
        format!("{:.2} MB", bytes as f64 / MB)
    } else if (bytes as f64) >= KB {
        format!("{:.2} KB", bytes as f64 / KB)
    } else {
        format!("{} B", bytes)
    }
}
