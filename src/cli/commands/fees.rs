use crate::codec::{calculate_payload_size, decode, hex_to_bytes, unwrap};
use crate::config::AppConfig;
use crate::economics::{calculate_fee_savings, compare_carriers, get_recommended_carrier};
use crate::errors::{AppError, AppResult};
use crate::report::{render, FeeReport, OutputFormat};
use clap::Args;
use tracing::{info, warn};

/// Compare carrier fees for a payload
#[derive(Args)]
pub struct FeesCommand {
    /// Payload size in bytes
    #[arg(long, conflicts_with = "payload", required_unless_present = "payload")]
    pub size: Option<usize>,

    /// Hex payload (bare operation or envelope) to size
    #[arg(long)]
    pub payload: Option<String>,

    /// Fee rate in sat/vB (overrides config)
    #[arg(long)]
    pub fee_rate: Option<u64>,

    /// Output format (overrides config)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl FeesCommand {
    pub fn run(&self) -> AppResult<()> {
        let config = AppConfig::load()?;
        let fee_rate = self.fee_rate.unwrap_or(config.economics.default_fee_rate);
        let format = self.format.unwrap_or(config.output.format);

        let payload_size = match (&self.payload, self.size) {
            (Some(hex), _) => payload_size_from_hex(hex)?,
            (None, Some(size)) => size,
            (None, None) => {
                return Err(AppError::InvalidData(
                    "Either --size or --payload is required".to_string(),
                ))
            }
        };

        info!(
            "Comparing carriers for {} bytes at {} sat/vB",
            payload_size, fee_rate
        );
        println!("{}", render(&fee_report(payload_size, fee_rate), format)?);
        Ok(())
    }
}

pub fn fee_report(payload_size: usize, fee_rate: u64) -> FeeReport {
    FeeReport {
        payload_size,
        fee_rate,
        recommended: get_recommended_carrier(payload_size),
        carriers: compare_carriers(payload_size, fee_rate),
        savings: calculate_fee_savings(payload_size, fee_rate),
    }
}

/// Operation payload size of hex input; envelopes are unwrapped first
pub fn payload_size_from_hex(input: &str) -> AppResult<usize> {
    let bytes = hex_to_bytes(input)?;
    let payload = unwrap(&bytes).unwrap_or(&bytes);

    match decode(payload) {
        Ok(op) => Ok(calculate_payload_size(&op)),
        Err(e) => {
            // Unknown bytes are still priced by their length
            warn!("Payload does not decode as a token operation: {}", e);
            Ok(payload.len())
        }
    }
}
