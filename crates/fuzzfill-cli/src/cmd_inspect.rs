/// Implementation of `fuzzfill inspect`.
///
/// # Output format
///
/// ```text
/// Input:     256 bytes
/// Seed:      -283686952306184 (0xfffefdfcfbfaf9f8)
/// Available: 248 bytes after seeding
/// Slice:     0..=15 (nil bias 0.05)
/// Map:       0..=15 (nil bias 0.05)
/// String:    0..=15
/// Pointer:   nil bias 0.05
/// Skip:      field bias 0
/// Depth:     unlimited
/// Private:   filled
/// ```
use std::fs;

use anyhow::{Context, Result};
use fuzzfill::{ProviderConfig, TypeProvider};

use crate::InspectArgs;

/// Run the `fuzzfill inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is too short to seed a
/// provider.
pub fn run(args: &InspectArgs, config: ProviderConfig) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    let provider = TypeProvider::with_config(&bytes, config)
        .with_context(|| format!("cannot seed a provider from {}", args.file.display()))?;

    let config = provider.config();
    let (slice_min, slice_max) = config.slice_bounds();
    let (map_min, map_max) = config.map_bounds();
    let (string_min, string_max) = config.string_bounds();

    println!("Input:     {} bytes", bytes.len());
    println!("Seed:      {} ({:#018x})", provider.seed(), provider.seed());
    println!("Available: {} bytes after seeding", provider.bytes_left());
    println!(
        "Slice:     {slice_min}..={slice_max} (nil bias {})",
        config.slice_nil_bias()
    );
    println!(
        "Map:       {map_min}..={map_max} (nil bias {})",
        config.map_nil_bias()
    );
    println!("String:    {string_min}..={string_max}");
    println!("Pointer:   nil bias {}", config.ptr_nil_bias());
    println!("Skip:      field bias {}", config.skip_field_bias());
    match config.depth_limit() {
        0 => println!("Depth:     unlimited"),
        n => println!("Depth:     {n}"),
    }
    println!(
        "Private:   {}",
        if config.fill_private_fields() { "filled" } else { "left alone" }
    );
    Ok(())
}
