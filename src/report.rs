//! Console and JSON rendering for CLI results

use crate::codec::text::bytes_to_hex;
use crate::economics::{CarrierEstimate, FeeSavings, OperationEstimate};
use crate::errors::{AppError, AppResult};
use crate::types::envelope::AnchorRef;
use crate::types::token::TokenOperation;
use crate::utils::currency::{format_bytes, format_number, format_sats_as_btc};
use serde::{Deserialize, Serialize};

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable console output
    #[default]
    Console,
    /// JSON format for programmatic use
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Console => "console",
            OutputFormat::Json => "json",
        }
    }
}

/// Result of encoding one operation
#[derive(Debug, Clone, Serialize)]
pub struct EncodedReport {
    pub operation: TokenOperation,
    pub anchors: Vec<AnchorRef>,
    pub wrapped: bool,
    pub hex: String,
    pub total_bytes: usize,
    pub estimate: OperationEstimate,
    pub fee_rate: u64,
}

/// Result of decoding one buffer
#[derive(Debug, Clone, Serialize)]
pub struct DecodedReport {
    pub anchors: Vec<AnchorRef>,
    pub payload_hex: String,
    pub operation: TokenOperation,
}

/// Carrier comparison for a payload size
#[derive(Debug, Clone, Serialize)]
pub struct FeeReport {
    pub payload_size: usize,
    pub fee_rate: u64,
    pub recommended: crate::types::carrier::Carrier,
    pub carriers: Vec<CarrierEstimate>,
    pub savings: FeeSavings,
}

/// Pretty-printed JSON export
pub fn export_json<T: Serialize>(data: &T) -> AppResult<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| AppError::InvalidData(format!("JSON export failed: {}", e)))
}

/// Render any report in the requested format
pub fn render<T: Serialize + ConsoleReport>(data: &T, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Console => Ok(data.to_console()),
        OutputFormat::Json => export_json(data),
    }
}

/// Human-readable rendering
pub trait ConsoleReport {
    fn to_console(&self) -> String;
}

impl ConsoleReport for EncodedReport {
    fn to_console(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== Encoded {} ===\n", self.operation.name()));
        out.push_str(&format!("{}\n", self.operation.summary()));
        out.push_str(&format!(
            "Payload: {} bytes{}\n",
            self.estimate.payload_size,
            if self.wrapped {
                format!(
                    " ({} with envelope, {} anchors)",
                    self.total_bytes,
                    self.anchors.len()
                )
            } else {
                " (no envelope)".to_string()
            }
        ));
        out.push_str(&format!("Hex: {}\n", self.hex));
        out.push_str(&format!(
            "Recommended carrier: {} ({})\n",
            self.estimate.recommended_carrier,
            self.estimate.recommended_carrier.description()
        ));
        out.push_str(&format!(
            "Estimated fee at {} sat/vB: {}\n",
            self.fee_rate,
            format_sats_as_btc(self.estimate.estimated_fee)
        ));
        write_savings(&mut out, &self.estimate.savings);
        out
    }
}

impl ConsoleReport for DecodedReport {
    fn to_console(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== Decoded {} ===\n", self.operation.name()));
        out.push_str(&format!("{}\n", self.operation.summary()));
        if let TokenOperation::Transfer(p) | TokenOperation::Split(p) = &self.operation {
            for allocation in &p.allocations {
                out.push_str(&format!(
                    "  output {:>3}: {}\n",
                    allocation.output_index,
                    format_number(allocation.amount)
                ));
            }
        }
        if self.anchors.is_empty() {
            out.push_str("Anchors: none\n");
        } else {
            out.push_str(&format!("Anchors ({}):\n", self.anchors.len()));
            for anchor in &self.anchors {
                out.push_str(&format!("  {}\n", anchor));
            }
        }
        out.push_str(&format!("Payload: {}\n", self.payload_hex));
        out
    }
}

impl ConsoleReport for FeeReport {
    fn to_console(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Carrier comparison: {} payload at {} sat/vB ===\n",
            format_bytes(self.payload_size as u64),
            self.fee_rate
        ));
        out.push_str(&format!(
            "{:<14} {:>10} {:>10} {:>12} {:>6}\n",
            "Carrier", "Max size", "vsize", "Fee (sats)", "Fits"
        ));
        for estimate in &self.carriers {
            out.push_str(&format!(
                "{:<14} {:>10} {:>10} {:>12} {:>6}\n",
                estimate.carrier.name(),
                format_bytes(estimate.carrier.max_size() as u64),
                format_number(estimate.vsize),
                format_number(estimate.fee),
                if estimate.fits { "yes" } else { "no" }
            ));
        }
        out.push_str(&format!("Recommended carrier: {}\n", self.recommended));
        write_savings(&mut out, &self.savings);
        out
    }
}

fn write_savings(out: &mut String, savings: &FeeSavings) {
    out.push_str(&format!(
        "Witness savings: {} sats vs OP_RETURN ({:.1}%)\n",
        format_number(savings.savings),
        savings.savings_percent
    ));
}

impl DecodedReport {
    pub fn new(anchors: Vec<AnchorRef>, payload: &[u8], operation: TokenOperation) -> Self {
        Self {
            anchors,
            payload_hex: bytes_to_hex(payload),
            operation,
        }
    }
}
