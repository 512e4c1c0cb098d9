/// JSON configuration file for the CLI.
///
/// Every key is optional; missing keys keep the current value. Values are
/// applied through the validating `ProviderConfig` setters, so a bad file
/// is rejected with the same error a library caller would get.
///
/// ```json
/// {
///   "slice_bounds": [0, 64],
///   "string_bounds": [1, 32],
///   "ptr_nil_bias": 0.2,
///   "depth_limit": 4,
///   "fill_private_fields": false
/// }
/// ```
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use fuzzfill::{ConfigError, ProviderConfig};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub slice_bounds: Option<(usize, usize)>,
    pub map_bounds: Option<(usize, usize)>,
    pub string_bounds: Option<(usize, usize)>,
    pub map_nil_bias: Option<f32>,
    pub ptr_nil_bias: Option<f32>,
    pub slice_nil_bias: Option<f32>,
    pub skip_field_bias: Option<f32>,
    pub depth_limit: Option<usize>,
    pub fill_private_fields: Option<bool>,
}

impl ConfigFile {
    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON
    /// for this schema.
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("cannot parse {}", path.display()))
    }

    /// Apply the present keys onto `config`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] from a rejected value.
    pub fn apply(&self, config: &mut ProviderConfig) -> Result<(), ConfigError> {
        if let Some((min, max)) = self.slice_bounds {
            config.set_slice_bounds(min, max)?;
        }
        if let Some((min, max)) = self.map_bounds {
            config.set_map_bounds(min, max)?;
        }
        if let Some((min, max)) = self.string_bounds {
            config.set_string_bounds(min, max)?;
        }

        let (map, ptr, slice, skip) = config.biases();
        config.set_biases(
            self.map_nil_bias.unwrap_or(map),
            self.ptr_nil_bias.unwrap_or(ptr),
            self.slice_nil_bias.unwrap_or(slice),
            self.skip_field_bias.unwrap_or(skip),
        )?;

        if let Some(depth_limit) = self.depth_limit {
            config.set_depth_limit(depth_limit);
        }
        if let Some(fill) = self.fill_private_fields {
            config.set_fill_private_fields(fill);
        }
        Ok(())
    }
}
