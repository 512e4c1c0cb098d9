/// Implementation of `fuzzfill read`.
///
/// Performs the requested primitive reads in order and prints one line per
/// read. The first failing read is reported and ends the command with a
/// non-zero exit code.
///
/// # Output format
///
/// ```text
///      8  byte        0xf7
///      9  i16         -2315
///     11  string      "\u{f4}..."
///     14  nbytes:4    [4] f0efeeed
/// ```
use std::fs;

use anyhow::{Context, Result};
use fuzzfill::{ProviderConfig, TypeProvider};
use tracing::{debug, info};

use crate::ReadArgs;

/// Run the `fuzzfill read` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is too short to seed a
/// provider, or runs out before every read is satisfied.
pub fn run(args: &ReadArgs, config: ProviderConfig) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    let mut provider = TypeProvider::with_config(&bytes, config)
        .with_context(|| format!("cannot seed a provider from {}", args.file.display()))?;
    debug!(seed = provider.seed(), len = bytes.len(), "provider ready");

    for (index, kind) in args.kinds.iter().enumerate() {
        let offset = provider.position();
        let value = kind
            .read(&mut provider)
            .with_context(|| format!("read #{index} ({kind}) at offset {offset} failed"))?;
        println!("{offset:>6}  {:<10}  {value}", kind.to_string());
    }

    info!(
        consumed = provider.position(),
        left = provider.bytes_left(),
        "all reads satisfied"
    );
    Ok(())
}
