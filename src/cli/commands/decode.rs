use crate::codec::{decode, hex_to_bytes, parse_message};
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::report::{render, DecodedReport, OutputFormat};
use crate::types::envelope::{PROTOCOL_MAGIC, TOKEN_KIND};
use clap::Args;
use tracing::{debug, info};

/// Decode a hex-encoded token envelope or bare operation
#[derive(Args)]
pub struct DecodeCommand {
    /// Hex bytes, optionally prefixed with 0x
    pub hex: String,

    /// Treat the input as a bare operation without envelope
    #[arg(long)]
    pub raw: bool,

    /// Output format (overrides config)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl DecodeCommand {
    pub fn run(&self) -> AppResult<()> {
        let format = match self.format {
            Some(format) => format,
            None => AppConfig::load()?.output.format,
        };

        let report = decode_hex(&self.hex, self.raw)?;
        info!(
            "Decoded {} with {} anchors",
            report.operation.name(),
            report.anchors.len()
        );
        println!("{}", render(&report, format)?);
        Ok(())
    }
}

/// Decode hex input into a report
///
/// Envelopes of other protocols are reported as `AppError::NotTokenMessage`.
pub fn decode_hex(input: &str, raw: bool) -> AppResult<DecodedReport> {
    let bytes = hex_to_bytes(input)?;
    debug!("Decoding {} bytes (raw={})", bytes.len(), raw);

    if raw {
        let operation = decode(&bytes)?;
        return Ok(DecodedReport::new(Vec::new(), &bytes, operation));
    }

    let message = parse_message(&bytes).ok_or_else(|| {
        AppError::NotTokenMessage(format!(
            "expected magic {} and kind {}",
            hex::encode(PROTOCOL_MAGIC),
            TOKEN_KIND
        ))
    })?;
    let operation = decode(&message.body)?;
    Ok(DecodedReport::new(message.anchors, &message.body, operation))
}
