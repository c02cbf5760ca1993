use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

mod codec;
mod error;
mod inspect;

use error::CliError;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("LANLIGHT_BUILD_COMMIT"),
    ", built ",
    env!("LANLIGHT_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "lanlight")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Codec and capture inspector for the LAN smart-lighting protocol.",
    long_about = None,
    after_help = "Examples:\n  lanlight decode 260000340000000000000000000000000000000000000000000000000000000015000000ffff\n  lanlight encode '{\"type\":\"state_power\",\"level\":65535}' --target d0:73:d5:00:00:01\n  lanlight inspect capture.pcapng -o report.json"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode one hex-encoded frame and print the envelope as JSON.
    Decode {
        /// Frame bytes as hex (whitespace, ':' and a leading 0x are ignored)
        frame: String,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Encode a JSON payload into a framed datagram and print it as hex.
    Encode(EncodeArgs),
    /// Operations on PCAP/PCAPNG inputs.
    Pcap {
        #[command(subcommand)]
        command: PcapCommands,
    },
    /// Shortcut for `pcap inspect`.
    #[command(hide = true)]
    Inspect(InspectArgs),
}

#[derive(Subcommand, Debug)]
enum PcapCommands {
    /// Inspect LAN traffic in a capture and write a versioned JSON report.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Payload as JSON, or @path to read it from a file
    pub payload: String,

    /// Treat the payload as a request instead of a response
    #[arg(long)]
    pub request: bool,

    /// Source identifier written into the header
    #[arg(long, default_value_t = 0)]
    pub source: u32,

    /// Sequence number written into the header
    #[arg(long, default_value_t = 0)]
    pub sequence: u8,

    /// Target device MAC (e.g. d0:73:d5:00:00:01); omit to broadcast
    #[arg(long)]
    pub target: Option<String>,

    /// Print only the payload bytes, without the header
    #[arg(long)]
    pub payload_only: bool,
}

#[derive(Args, Debug)]
#[command(
    after_help = "Examples:\n  lanlight pcap inspect capture.pcapng -o report.json\n  lanlight inspect 'captures/*.pcapng' --stdout --pretty"
)]
pub struct InspectArgs {
    /// Path (or glob matching one file) to a .pcap or .pcapng capture
    pub input: PathBuf,

    /// Output report path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    pub report: Option<PathBuf>,

    /// Write JSON report to stdout
    #[arg(long, conflicts_with = "report")]
    pub stdout: bool,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pub pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    pub compact: bool,

    /// UDP port carrying LAN traffic
    #[arg(long, default_value_t = lanlight_core::LAN_PORT)]
    pub port: u16,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,

    /// Exit with a non-zero code if decode issues are present
    #[arg(long)]
    pub strict: bool,

    /// List decode issues after inspection
    #[arg(long)]
    pub list_issues: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Decode { frame, pretty } => codec::cmd_decode(&frame, pretty),
        Commands::Encode(args) => codec::cmd_encode(&args),
        Commands::Pcap {
            command: PcapCommands::Inspect(args),
        }
        | Commands::Inspect(args) => inspect::cmd_pcap_inspect(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    use anyhow::Context;

    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    Ok(json.context("JSON serialization failed")?)
}
