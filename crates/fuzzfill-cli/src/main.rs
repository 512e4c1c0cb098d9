/// fuzzfill command-line tool: look at a fuzz corpus input the way a
/// `TypeProvider` sees it.
///
/// # Command overview
///
/// ```text
/// fuzzfill <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print input length, seed and the active configuration
///   read       Decode a list of primitive reads in order
///   preview    Fill a sample record and print it
///   help       Print help information
///
/// Global options:
///   -v, --verbose          Enable debug logging on stderr
///   --config <JSON>        Load provider configuration from a JSON file
///   --depth-limit <N>      Override the record depth limit (0 = unlimited)
///   --nil-bias <P>         Override all three nil biases
///   --skip-bias <P>        Override the field skip bias
///   -h, --help             Print help
///   -V, --version          Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                           |
/// |------|---------------------------------------------------|
/// | 0    | Success                                           |
/// | 1    | Error (I/O failure, bad config, input too short)  |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fuzzfill::ProviderConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cmd_inspect;
mod cmd_preview;
mod cmd_read;
mod config_file;
mod read_kind;

use read_kind::ReadKind;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Decode fuzz inputs into typed values.
#[derive(Parser)]
#[command(name = "fuzzfill", version, about = "Inspect fuzz inputs through a TypeProvider")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON file with provider configuration overrides.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Record depth limit; 0 means unlimited.
    #[arg(long, global = true)]
    depth_limit: Option<usize>,

    /// Probability in [0,1] that a Vec, map or Option comes out empty.
    #[arg(long, global = true)]
    nil_bias: Option<f32>,

    /// Probability in [0,1] that a record field is left untouched.
    #[arg(long, global = true)]
    skip_bias: Option<f32>,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print input length, seed and the active configuration.
    Inspect(InspectArgs),
    /// Decode a comma-separated list of primitive reads in order.
    Read(ReadArgs),
    /// Fill a built-in sample record from the input and print it.
    Preview(PreviewArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `fuzzfill inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the corpus input.
    pub file: PathBuf,
}

/// Arguments for `fuzzfill read`.
///
/// ```text
/// ┌──────────────────────────────┬──────────────────────────────────────┐
/// │ Kind                         │ Read                                 │
/// ├──────────────────────────────┼──────────────────────────────────────┤
/// │ byte bool u8 i8 … u64 i64    │ fixed-width big-endian integer       │
/// │ usize isize                  │ 8 bytes, platform width              │
/// │ f32 f64                      │ IEEE-754 bit pattern                 │
/// │ string / bytes               │ length drawn from configured bounds  │
/// │ fstring:N / nbytes:N         │ exactly N bytes                      │
/// └──────────────────────────────┴──────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct ReadArgs {
    /// Path to the corpus input.
    pub file: PathBuf,

    /// Comma-separated read kinds, e.g. `u8,i16,string,nbytes:4`.
    #[arg(long, value_delimiter = ',', required = true)]
    pub kinds: Vec<ReadKind>,
}

/// Arguments for `fuzzfill preview`.
#[derive(clap::Args)]
pub struct PreviewArgs {
    /// Path to the corpus input.
    pub file: PathBuf,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the provider configuration: defaults, then the JSON file, then flags.
fn build_config(cli: &Cli) -> Result<ProviderConfig> {
    let mut config = ProviderConfig::default();

    if let Some(path) = &cli.config {
        let file = config_file::ConfigFile::load(path)?;
        file.apply(&mut config)
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        debug!(path = %path.display(), "applied configuration file");
    }

    if let Some(depth_limit) = cli.depth_limit {
        config.set_depth_limit(depth_limit);
    }
    if cli.nil_bias.is_some() || cli.skip_bias.is_some() {
        let (map, ptr, slice, skip) = config.biases();
        let (map, ptr, slice) = match cli.nil_bias {
            Some(nil) => (nil, nil, nil),
            None => (map, ptr, slice),
        };
        config
            .set_biases(map, ptr, slice, cli.skip_bias.unwrap_or(skip))
            .context("invalid bias flag")?;
    }

    debug!(?config, "provider configuration");
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = build_config(cli)?;
    match &cli.command {
        Commands::Inspect(args) => cmd_inspect::run(args, config),
        Commands::Read(args) => cmd_read::run(args, config),
        Commands::Preview(args) => cmd_preview::run(args, config),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
