use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use core::time::Duration;
use snowgen::{BitLayout, DEFAULT_EPOCH, GeneratorConfig, OverflowPolicy};

/// Command-line interface of the `snowgen` binary.
///
/// Generator settings are parsed from CLI arguments or environment variables
/// (a `.env` file is loaded first), and apply to every subcommand that needs
/// a layout.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "snowgen",
    version,
    about = "Generate, inspect and convert Snowflake-style IDs"
)]
pub struct CliArgs {
    #[command(flatten)]
    pub generator: GeneratorArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GeneratorArgs {
    /// Worker id embedded in every generated ID.
    ///
    /// Must be unique per running generator within a datacenter. Only its
    /// range is checked here.
    ///
    /// Environment variable: `WORKER_ID`
    #[arg(long, env = "WORKER_ID", default_value_t = 0)]
    pub worker_id: u64,

    /// Datacenter id embedded in every generated ID.
    ///
    /// Environment variable: `DATACENTER_ID`
    #[arg(long, env = "DATACENTER_ID", default_value_t = 0)]
    pub datacenter_id: u64,

    /// Epoch in milliseconds since 1970-01-01 UTC. Generators that should
    /// produce comparable IDs must agree on it.
    ///
    /// Environment variable: `EPOCH_MS`
    #[arg(long, env = "EPOCH_MS", default_value_t = DEFAULT_EPOCH.as_millis() as u64)]
    pub epoch_ms: u64,

    /// Width of the worker id field.
    ///
    /// Environment variable: `WORKER_ID_BITS`
    #[arg(long, env = "WORKER_ID_BITS", default_value_t = BitLayout::default().worker_id_bits())]
    pub worker_id_bits: u8,

    /// Width of the datacenter id field.
    ///
    /// Environment variable: `DATACENTER_ID_BITS`
    #[arg(
        long,
        env = "DATACENTER_ID_BITS",
        default_value_t = BitLayout::default().datacenter_id_bits()
    )]
    pub datacenter_id_bits: u8,

    /// Width of the per-millisecond sequence field.
    ///
    /// Environment variable: `SEQUENCE_BITS`
    #[arg(long, env = "SEQUENCE_BITS", default_value_t = BitLayout::default().sequence_bits())]
    pub sequence_bits: u8,

    /// What to do once the timestamp outgrows its field.
    ///
    /// Environment variable: `OVERFLOW_POLICY`
    #[arg(long, env = "OVERFLOW_POLICY", value_enum, default_value_t = PolicyArg::Negate)]
    pub overflow_policy: PolicyArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyArg {
    /// Negate IDs that spill into the sign bit.
    Negate,
    /// Fail instead of producing an out-of-order ID.
    Reject,
}

impl From<PolicyArg> for OverflowPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Negate => Self::Negate,
            PolicyArg::Reject => Self::Reject,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate IDs, one per line.
    Generate {
        /// Number of IDs to generate.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Text form of each ID.
        #[arg(short, long, value_enum, default_value_t = Format::Decimal)]
        format: Format,
    },
    /// Split a decimal ID into its fields.
    Inspect {
        /// The ID to decompose.
        id: i64,
    },
    /// Encode a non-negative integer in base 62.
    Encode {
        value: u64,
    },
    /// Decode a base-62 string.
    Decode {
        encoded: String,

        /// Reject characters outside the alphabet instead of stopping at
        /// them.
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Decimal,
    Base62,
}

/// Validated generator settings.
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub worker_id: u64,
    pub datacenter_id: u64,
    pub generator: GeneratorConfig,
    pub layout: BitLayout,
}

impl TryFrom<GeneratorArgs> for AppConfig {
    type Error = anyhow::Error;

    fn try_from(args: GeneratorArgs) -> Result<Self, Self::Error> {
        let generator = GeneratorConfig::default()
            .with_epoch(Duration::from_millis(args.epoch_ms))
            .with_bits(args.worker_id_bits, args.datacenter_id_bits, args.sequence_bits)
            .with_overflow_policy(args.overflow_policy.into());

        let layout = generator
            .layout()
            .context("WORKER_ID_BITS, DATACENTER_ID_BITS and SEQUENCE_BITS do not form a layout")?;

        if args.worker_id > layout.max_worker_id() {
            anyhow::bail!(
                "WORKER_ID ({}) exceeds the worker id space (max = {})",
                args.worker_id,
                layout.max_worker_id()
            );
        }
        if args.datacenter_id > layout.max_datacenter_id() {
            anyhow::bail!(
                "DATACENTER_ID ({}) exceeds the datacenter id space (max = {})",
                args.datacenter_id,
                layout.max_datacenter_id()
            );
        }

        Ok(Self {
            worker_id: args.worker_id,
            datacenter_id: args.datacenter_id,
            generator,
            layout,
        })
    }
}
