/// Configuration consulted by [`TypeProvider`](crate::TypeProvider) at
/// every decision point of a fill.
///
/// Sizes are inclusive `(min, max)` ranges. Biases are probabilities in
/// `[0, 1]`. Every setter validates its input and returns a
/// [`ConfigError`] instead of clamping, so a `ProviderConfig` that exists
/// is always valid.
///
/// ```text
/// ┌─────────────────────┬──────────┬───────────────────────────────────────┐
/// │ Field               │ Default  │ Purpose                               │
/// ├─────────────────────┼──────────┼───────────────────────────────────────┤
/// │ slice_bounds        │ 0..=15   │ Vec / byte-blob lengths               │
/// │ map_bounds          │ 0..=15   │ map entry counts (before dedup)       │
/// │ string_bounds       │ 0..=15   │ string byte lengths                   │
/// │ map_nil_bias        │ 0.05     │ chance a map comes out empty          │
/// │ ptr_nil_bias        │ 0.05     │ chance an Option comes out None       │
/// │ slice_nil_bias      │ 0.05     │ chance a Vec comes out empty          │
/// │ skip_field_bias     │ 0.0      │ chance a record field is left alone   │
/// │ depth_limit         │ 0        │ max record nesting, 0 = unlimited     │
/// │ fill_private_fields │ true     │ fill non-`pub` record fields too      │
/// └─────────────────────┴──────────┴───────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderConfig {
    slice_bounds: (usize, usize),
    map_bounds: (usize, usize),
    string_bounds: (usize, usize),
    map_nil_bias: f32,
    ptr_nil_bias: f32,
    slice_nil_bias: f32,
    skip_field_bias: f32,
    depth_limit: usize,
    fill_private_fields: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            slice_bounds: (0, 15),
            map_bounds: (0, 15),
            string_bounds: (0, 15),
            map_nil_bias: 0.05,
            ptr_nil_bias: 0.05,
            slice_nil_bias: 0.05,
            skip_field_bias: 0.0,
            depth_limit: 0,
            fill_private_fields: true,
        }
    }
}

/// A configuration setter received an out-of-range or inconsistent value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A size range had `min > max`.
    #[error("invalid {parameter} bounds: min {min} > max {max}")]
    InvalidBounds {
        parameter: &'static str,
        min: usize,
        max: usize,
    },

    /// A bias was outside `[0, 1]` (or NaN).
    #[error("invalid {parameter} bias {value}: bias must be between [0,1]")]
    BiasOutOfRange { parameter: &'static str, value: f32 },
}

fn check_bounds(parameter: &'static str, min: usize, max: usize) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::InvalidBounds {
            parameter,
            min,
            max,
        });
    }
    Ok(())
}

fn check_bias(parameter: &'static str, value: f32) -> Result<(), ConfigError> {
    // NaN fails `contains`, so it is rejected here as well.
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::BiasOutOfRange { parameter, value });
    }
    Ok(())
}

impl ProviderConfig {
    /// Inclusive `(min, max)` length range for generated `Vec`s and byte blobs.
    #[must_use]
    pub fn slice_bounds(&self) -> (usize, usize) {
        self.slice_bounds
    }

    /// Set the length range for generated `Vec`s and byte blobs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBounds`] if `min > max`.
    pub fn set_slice_bounds(&mut self, min: usize, max: usize) -> Result<(), ConfigError> {
        check_bounds("slice", min, max)?;
        self.slice_bounds = (min, max);
        Ok(())
    }

    /// Inclusive `(min, max)` entry-count range for generated maps.
    #[must_use]
    pub fn map_bounds(&self) -> (usize, usize) {
        self.map_bounds
    }

    /// Set the entry-count range for generated maps.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBounds`] if `min > max`.
    pub fn set_map_bounds(&mut self, min: usize, max: usize) -> Result<(), ConfigError> {
        check_bounds("map", min, max)?;
        self.map_bounds = (min, max);
        Ok(())
    }

    /// Inclusive `(min, max)` byte-length range for generated strings.
    #[must_use]
    pub fn string_bounds(&self) -> (usize, usize) {
        self.string_bounds
    }

    /// Set the byte-length range for generated strings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBounds`] if `min > max`.
    pub fn set_string_bounds(&mut self, min: usize, max: usize) -> Result<(), ConfigError> {
        check_bounds("string", min, max)?;
        self.string_bounds = (min, max);
        Ok(())
    }

    /// The bias parameters as `(map_nil, ptr_nil, slice_nil, skip_field)`.
    #[must_use]
    pub fn biases(&self) -> (f32, f32, f32, f32) {
        (
            self.map_nil_bias,
            self.ptr_nil_bias,
            self.slice_nil_bias,
            self.skip_field_bias,
        )
    }

    #[must_use]
    pub fn map_nil_bias(&self) -> f32 {
        self.map_nil_bias
    }

    #[must_use]
    pub fn ptr_nil_bias(&self) -> f32 {
        self.ptr_nil_bias
    }

    #[must_use]
    pub fn slice_nil_bias(&self) -> f32 {
        self.slice_nil_bias
    }

    #[must_use]
    pub fn skip_field_bias(&self) -> f32 {
        self.skip_field_bias
    }

    /// Set all four biases at once.
    ///
    /// Either every value is accepted or none is: the config is unchanged
    /// when any bias is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BiasOutOfRange`] for the first bias outside
    /// `[0, 1]`.
    pub fn set_biases(
        &mut self,
        map_nil_bias: f32,
        ptr_nil_bias: f32,
        slice_nil_bias: f32,
        skip_field_bias: f32,
    ) -> Result<(), ConfigError> {
        check_bias("map nil", map_nil_bias)?;
        check_bias("pointer nil", ptr_nil_bias)?;
        check_bias("slice nil", slice_nil_bias)?;
        check_bias("skip field", skip_field_bias)?;

        self.map_nil_bias = map_nil_bias;
        self.ptr_nil_bias = ptr_nil_bias;
        self.slice_nil_bias = slice_nil_bias;
        self.skip_field_bias = skip_field_bias;
        Ok(())
    }

    /// Set the map, pointer and slice nil biases from one shared value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BiasOutOfRange`] if either value is outside
    /// `[0, 1]`.
    pub fn set_biases_common(&mut self, nil_bias: f32, skip_field_bias: f32) -> Result<(), ConfigError> {
        self.set_biases(nil_bias, nil_bias, nil_bias, skip_field_bias)
    }

    /// Maximum record nesting depth that gets filled. `0` means unlimited.
    #[must_use]
    pub fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    /// Set the record depth limit. `0` disables the limit.
    ///
    /// Any `usize` is valid, so this setter cannot fail.
    pub fn set_depth_limit(&mut self, depth_limit: usize) {
        self.depth_limit = depth_limit;
    }

    /// Whether non-`pub` record fields are filled.
    #[must_use]
    pub fn fill_private_fields(&self) -> bool {
        self.fill_private_fields
    }

    pub fn set_fill_private_fields(&mut self, fill: bool) {
        self.fill_private_fields = fill;
    }

    /// Whether a record at `depth` may still have its fields filled.
    #[must_use]
    pub fn allows_depth(&self, depth: usize) -> bool {
        self.depth_limit == 0 || depth < self.depth_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_table() {
        let config = ProviderConfig::default();
        assert_eq!(config.slice_bounds(), (0, 15));
        assert_eq!(config.map_bounds(), (0, 15));
        assert_eq!(config.string_bounds(), (0, 15));
        assert_eq!(config.biases(), (0.05, 0.05, 0.05, 0.0));
        assert_eq!(config.depth_limit(), 0);
        assert!(config.fill_private_fields());
    }

    #[test]
    fn bounds_accept_equal_min_max() {
        let mut config = ProviderConfig::default();
        config.set_slice_bounds(3, 3).unwrap();
        config.set_map_bounds(0, 0).unwrap();
        config.set_string_bounds(1, 64).unwrap();
        assert_eq!(config.slice_bounds(), (3, 3));
        assert_eq!(config.map_bounds(), (0, 0));
        assert_eq!(config.string_bounds(), (1, 64));
    }

    #[test]
    fn inverted_bounds_rejected_without_change() {
        let mut config = ProviderConfig::default();
        let err = config.set_map_bounds(9, 2).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidBounds {
                parameter: "map",
                min: 9,
                max: 2,
            }
        );
        assert_eq!(config.map_bounds(), (0, 15));
    }

    #[test]
    fn bias_outside_unit_interval_rejected() {
        let mut config = ProviderConfig::default();
        assert!(config.set_biases(1.5, 0.0, 0.0, 0.0).is_err());
        assert!(config.set_biases(0.0, -0.1, 0.0, 0.0).is_err());
        assert!(config.set_biases(0.0, 0.0, f32::NAN, 0.0).is_err());
        assert!(config.set_biases(0.0, 0.0, 0.0, 2.0).is_err());
        assert_eq!(config.biases(), (0.05, 0.05, 0.05, 0.0));
    }

    #[test]
    fn partial_bias_failure_changes_nothing() {
        let mut config = ProviderConfig::default();
        let err = config.set_biases(0.5, 0.5, 0.5, 7.0).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::BiasOutOfRange {
                parameter: "skip field",
                ..
            }
        ));
        assert_eq!(config.map_nil_bias(), 0.05);
    }

    #[test]
    fn common_bias_sets_all_nil_biases() {
        let mut config = ProviderConfig::default();
        config.set_biases_common(1.0, 0.25).unwrap();
        assert_eq!(config.biases(), (1.0, 1.0, 1.0, 0.25));
    }

    #[test]
    fn depth_zero_is_unlimited() {
        let mut config = ProviderConfig::default();
        assert!(config.allows_depth(10_000));

        config.set_depth_limit(2);
        assert!(config.allows_depth(0));
        assert!(config.allows_depth(1));
        assert!(!config.allows_depth(2));
    }
}
