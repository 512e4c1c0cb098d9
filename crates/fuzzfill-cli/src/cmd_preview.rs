/// Implementation of `fuzzfill preview`.
///
/// Fills [`SampleRecord`] from the input and pretty-prints it, followed by
/// how much of the input the fill consumed. Handy for eyeballing how a
/// corpus entry and a configuration shape structured values.
use std::collections::BTreeMap;
use std::fs;

use anyhow::{Context, Result};
use fuzzfill::{Complex, Fill, ProviderConfig, TypeProvider};
use tracing::debug;

use crate::PreviewArgs;

/// A record touching every shape the provider can fill.
#[derive(Debug, Default, Fill)]
pub struct SampleRecord {
    pub id: u64,
    pub name: String,
    pub enabled: bool,
    pub tags: Vec<String>,
    pub payload: Vec<u8>,
    pub attributes: BTreeMap<String, i32>,
    pub position: [f32; 3],
    pub phase: Complex<f64>,
    pub header: SampleHeader,
    pub parent: Option<Box<SampleRecord>>,
    checksum: u32,
}

#[derive(Debug, Default, Fill)]
pub struct SampleHeader {
    pub version: u8,
    pub kind: i16,
    pub note: Option<String>,
}

/// Run the `fuzzfill preview` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is too short to seed a
/// provider, or runs out before the record is complete.
pub fn run(args: &PreviewArgs, config: ProviderConfig) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    let mut provider = TypeProvider::with_config(&bytes, config)
        .with_context(|| format!("cannot seed a provider from {}", args.file.display()))?;

    let mut record = SampleRecord::default();
    provider
        .fill(&mut record)
        .with_context(|| format!("input ran out at offset {}", provider.position()))?;
    debug!(consumed = provider.position(), "sample record filled");

    println!("{record:#?}");
    println!("---");
    println!("private checksum {:#010x}", record.checksum);
    println!(
        "consumed {} of {} bytes ({} left)",
        provider.position(),
        bytes.len(),
        provider.bytes_left()
    );
    Ok(())
}
