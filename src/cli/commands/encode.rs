use crate::codec::{encode, wrap};
use crate::codec::text::bytes_to_hex;
use crate::config::AppConfig;
use crate::economics::estimate_operation;
use crate::errors::{AppError, AppResult};
use crate::report::{render, EncodedReport, OutputFormat};
use crate::types::envelope::AnchorRef;
use crate::types::token::{
    parse_amount, Allocation, AllocationPayload, BurnPayload, DeployFlags, DeployPayload,
    MintPayload, TokenOperation,
};
use clap::{Args, Subcommand};
use tracing::info;

/// Encode a token operation (Deploy, Mint, Transfer, Split, Burn) to hex
#[derive(Args)]
pub struct EncodeCommand {
    #[command(subcommand)]
    pub operation: EncodeOperation,
}

#[derive(Subcommand)]
pub enum EncodeOperation {
    /// Deploy a new token
    Deploy(DeployArgs),
    /// Mint tokens to an output
    Mint(MintArgs),
    /// Transfer tokens to one or more outputs
    Transfer(AllocationArgs),
    /// Split a balance across outputs
    Split(AllocationArgs),
    /// Burn tokens
    Burn(BurnArgs),
}

/// Options shared by every encode subcommand
#[derive(Args, Clone, Default)]
pub struct EncodeOptions {
    /// Anchor to a prior message, as TXID:VOUT or 16-hex-char PREFIX:VOUT (repeatable)
    #[arg(long = "anchor", value_name = "TXID:VOUT")]
    pub anchors: Vec<String>,

    /// Output the bare operation without the protocol envelope
    #[arg(long)]
    pub raw: bool,

    /// Fee rate in sat/vB (overrides config)
    #[arg(long)]
    pub fee_rate: Option<u64>,

    /// Output format (overrides config)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Args)]
pub struct DeployArgs {
    /// Ticker, 1-32 alphanumeric characters (stored uppercase)
    #[arg(long)]
    pub ticker: String,

    /// Decimal places
    #[arg(long, default_value_t = 0)]
    pub decimals: u8,

    /// Maximum supply in base units
    #[arg(long)]
    pub max_supply: String,

    /// Per-mint limit in base units (omit for no limit)
    #[arg(long)]
    pub mint_limit: Option<String>,

    /// Anyone may mint
    #[arg(long)]
    pub open_mint: bool,

    /// Supply can never grow past the deploy
    #[arg(long)]
    pub fixed_supply: bool,

    /// Holders may burn
    #[arg(long)]
    pub burnable: bool,

    #[command(flatten)]
    pub options: EncodeOptions,
}

#[derive(Args)]
pub struct MintArgs {
    #[arg(long)]
    pub token_id: String,

    #[arg(long)]
    pub amount: String,

    /// Output index receiving the minted tokens
    #[arg(long, default_value_t = 0)]
    pub output: u8,

    #[command(flatten)]
    pub options: EncodeOptions,
}

#[derive(Args)]
pub struct AllocationArgs {
    #[arg(long)]
    pub token_id: String,

    /// Allocation as OUTPUT:AMOUNT (repeatable, up to 255)
    #[arg(long = "alloc", value_name = "OUTPUT:AMOUNT")]
    pub allocations: Vec<String>,

    #[command(flatten)]
    pub options: EncodeOptions,
}

#[derive(Args)]
pub struct BurnArgs {
    #[arg(long)]
    pub token_id: String,

    #[arg(long)]
    pub amount: String,

    #[command(flatten)]
    pub options: EncodeOptions,
}

impl EncodeCommand {
    pub fn run(&self) -> AppResult<()> {
        let (operation, options) = self.operation.build()?;
        let config = AppConfig::load()?;

        let fee_rate = options
            .fee_rate
            .unwrap_or(config.economics.default_fee_rate);
        let format = options.format.unwrap_or(config.output.format);
        let anchors = parse_anchors(&options.anchors)?;

        info!(
            "Encoding {} with {} anchors at {} sat/vB",
            operation.name(),
            anchors.len(),
            fee_rate
        );

        let report = encode_operation(operation, anchors, !options.raw, fee_rate)?;
        println!("{}", render(&report, format)?);
        Ok(())
    }
}

impl EncodeOperation {
    /// Turn CLI fields into a typed operation
    pub fn build(&self) -> AppResult<(TokenOperation, &EncodeOptions)> {
        match self {
            EncodeOperation::Deploy(args) => {
                let mut flags = DeployFlags::empty();
                if args.open_mint {
                    flags = flags | DeployFlags::OPEN_MINT;
                }
                if args.fixed_supply {
                    flags = flags | DeployFlags::FIXED_SUPPLY;
                }
                if args.burnable {
                    flags = flags | DeployFlags::BURNABLE;
                }
                let mint_limit = args
                    .mint_limit
                    .as_deref()
                    .map(|limit| parse_amount("mint_limit", limit))
                    .transpose()?;
                let payload = DeployPayload::new(
                    &args.ticker,
                    args.decimals,
                    parse_amount("max_supply", &args.max_supply)?,
                    mint_limit,
                    flags,
                )?;
                Ok((TokenOperation::Deploy(payload), &args.options))
            }
            EncodeOperation::Mint(args) => Ok((
                TokenOperation::Mint(MintPayload {
                    token_id: parse_amount("token_id", &args.token_id)?,
                    amount: parse_amount("amount", &args.amount)?,
                    output_index: args.output,
                }),
                &args.options,
            )),
            EncodeOperation::Transfer(args) => Ok((
                TokenOperation::Transfer(args.to_payload()?),
                &args.options,
            )),
            EncodeOperation::Split(args) => {
                Ok((TokenOperation::Split(args.to_payload()?), &args.options))
            }
            EncodeOperation::Burn(args) => Ok((
                TokenOperation::Burn(BurnPayload {
                    token_id: parse_amount("token_id", &args.token_id)?,
                    amount: parse_amount("amount", &args.amount)?,
                }),
                &args.options,
            )),
        }
    }
}

impl AllocationArgs {
    fn to_payload(&self) -> AppResult<AllocationPayload> {
        let allocations = self
            .allocations
            .iter()
            .map(|raw| parse_allocation(raw))
            .collect::<AppResult<Vec<_>>>()?;
        Ok(AllocationPayload::new(
            parse_amount("token_id", &self.token_id)?,
            allocations,
        ))
    }
}

/// Encode, optionally wrap, and price an operation
pub fn encode_operation(
    operation: TokenOperation,
    anchors: Vec<AnchorRef>,
    wrapped: bool,
    fee_rate: u64,
) -> AppResult<EncodedReport> {
    let payload = encode(&operation)?;
    let bytes = if wrapped {
        wrap(&payload, &anchors)?
    } else {
        payload
    };
    let estimate = estimate_operation(&operation, fee_rate);

    Ok(EncodedReport {
        hex: bytes_to_hex(&bytes),
        total_bytes: bytes.len(),
        operation,
        anchors,
        wrapped,
        estimate,
        fee_rate,
    })
}

/// Parse `OUTPUT:AMOUNT`
pub fn parse_allocation(raw: &str) -> AppResult<Allocation> {
    let (index, amount) = raw.split_once(':').ok_or_else(|| {
        AppError::InvalidData(format!("Allocation {:?} must be OUTPUT:AMOUNT", raw))
    })?;
    let output_index = index.trim().parse::<u8>().map_err(|_| {
        AppError::InvalidData(format!("Allocation output index {:?} must be 0-255", index))
    })?;
    Ok(Allocation::new(
        output_index,
        parse_amount("allocation amount", amount)?,
    ))
}

pub fn parse_anchors(raw: &[String]) -> AppResult<Vec<AnchorRef>> {
    raw.iter()
        .map(|anchor| anchor.parse::<AnchorRef>().map_err(AppError::from))
        .collect()
}
