use std::borrow::Cow;

use fuzzfill_cursor::ByteCursor;

use crate::config::{ConfigError, ProviderConfig};
use crate::decision::DecisionGenerator;
use crate::error::FillError;
use crate::fill::Fill;
use crate::record::RecordFill;

/// Number of leading input bytes consumed to seed the decision generator.
pub const SEED_SIZE: usize = 8;

/// Turns a fuzz input buffer into typed values and populated structures.
///
/// A `TypeProvider` pairs a [`ByteCursor`] over the input with a
/// [`DecisionGenerator`] seeded from the input's first 8 bytes. Primitive
/// accessors read straight from the cursor; [`fill`](Self::fill) walks a
/// value's shape through the [`Fill`] trait, asking the generator for
/// sizes and absence/skip decisions and the cursor for content.
///
/// ```text
///   input ──► cursor reads ─────────────────────────────┐
///     │                                                 ▼
///     └─► bytes 0..8 ─► seed ─► DecisionGenerator ─► Fill::fill ─► value
///                                 (sizes, nil, skip)
/// ```
///
/// Everything is deterministic: the same input, configuration and call
/// sequence produce the same values and the same final cursor position.
///
/// The provider is single-threaded state. Give each thread its own
/// provider over its own input.
///
/// # Example
///
/// ```rust
/// use fuzzfill::{Fill, TypeProvider};
///
/// #[derive(Debug, Default, Fill)]
/// struct Packet {
///     pub id: u32,
///     pub flags: [bool; 4],
///     pub payload: Vec<u8>,
///     pub note: Option<String>,
/// }
///
/// let input: Vec<u8> = (0..=255).rev().collect();
/// let mut provider = TypeProvider::new(&input).unwrap();
///
/// let mut packet = Packet::default();
/// provider.fill(&mut packet).unwrap();
/// assert!(packet.payload.len() <= 15);
/// ```
#[derive(Debug, Clone)]
pub struct TypeProvider<'a> {
    cursor: ByteCursor<'a>,
    decisions: DecisionGenerator,
    config: ProviderConfig,
}

impl<'a> TypeProvider<'a> {
    /// Create a provider over `data` with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FillError::InsufficientSeedData`] if `data` is shorter
    /// than [`SEED_SIZE`].
    pub fn new(data: &'a [u8]) -> Result<Self, FillError> {
        Self::with_config(data, ProviderConfig::default())
    }

    /// Create a provider over `data` with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FillError::InsufficientSeedData`] if `data` is shorter
    /// than [`SEED_SIZE`].
    pub fn with_config(data: &'a [u8], config: ProviderConfig) -> Result<Self, FillError> {
        let mut cursor = ByteCursor::new(data);
        let decisions = Self::read_seed(&mut cursor)?;
        Ok(Self {
            cursor,
            decisions,
            config,
        })
    }

    fn read_seed(cursor: &mut ByteCursor<'a>) -> Result<DecisionGenerator, FillError> {
        if cursor.len() < SEED_SIZE {
            return Err(FillError::InsufficientSeedData { len: cursor.len() });
        }
        let seed = cursor.read_i64()?;
        Ok(DecisionGenerator::from_seed(seed))
    }

    /// Rewind to the start of the input and reseed from its first 8 bytes.
    ///
    /// Afterwards the provider behaves exactly as if it had just been
    /// constructed. The configuration is left as it is.
    ///
    /// # Errors
    ///
    /// Returns [`FillError::InsufficientSeedData`] if the input is shorter
    /// than [`SEED_SIZE`], which cannot happen for a provider that was
    /// constructed successfully.
    pub fn reset(&mut self) -> Result<(), FillError> {
        self.cursor.rewind();
        self.decisions = Self::read_seed(&mut self.cursor)?;
        Ok(())
    }

    // ── Introspection ────────────────────────────────────────────────────

    /// Current read offset into the input, seed bytes included.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Bytes that can still be read.
    #[must_use]
    pub fn bytes_left(&self) -> usize {
        self.cursor.bytes_left()
    }

    /// The seed read from the first 8 bytes of the input.
    #[must_use]
    pub fn seed(&self) -> i64 {
        self.decisions.seed()
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Replace the whole configuration.
    pub fn set_config(&mut self, config: ProviderConfig) {
        self.config = config;
    }

    // ── Configuration accessors ──────────────────────────────────────────

    #[must_use]
    pub fn slice_bounds(&self) -> (usize, usize) {
        self.config.slice_bounds()
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBounds`] if `min > max`.
    pub fn set_slice_bounds(&mut self, min: usize, max: usize) -> Result<(), ConfigError> {
        self.config.set_slice_bounds(min, max)
    }

    #[must_use]
    pub fn map_bounds(&self) -> (usize, usize) {
        self.config.map_bounds()
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBounds`] if `min > max`.
    pub fn set_map_bounds(&mut self, min: usize, max: usize) -> Result<(), ConfigError> {
        self.config.set_map_bounds(min, max)
    }

    #[must_use]
    pub fn string_bounds(&self) -> (usize, usize) {
        self.config.string_bounds()
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBounds`] if `min > max`.
    pub fn set_string_bounds(&mut self, min: usize, max: usize) -> Result<(), ConfigError> {
        self.config.set_string_bounds(min, max)
    }

    /// `(map_nil, ptr_nil, slice_nil, skip_field)` biases.
    #[must_use]
    pub fn biases(&self) -> (f32, f32, f32, f32) {
        self.config.biases()
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::BiasOutOfRange`] if any bias is outside `[0, 1]`.
    pub fn set_biases(
        &mut self,
        map_nil_bias: f32,
        ptr_nil_bias: f32,
        slice_nil_bias: f32,
        skip_field_bias: f32,
    ) -> Result<(), ConfigError> {
        self.config
            .set_biases(map_nil_bias, ptr_nil_bias, slice_nil_bias, skip_field_bias)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::BiasOutOfRange`] if either bias is outside `[0, 1]`.
    pub fn set_biases_common(&mut self, nil_bias: f32, skip_field_bias: f32) -> Result<(), ConfigError> {
        self.config.set_biases_common(nil_bias, skip_field_bias)
    }

    #[must_use]
    pub fn depth_limit(&self) -> usize {
        self.config.depth_limit()
    }

    pub fn set_depth_limit(&mut self, depth_limit: usize) {
        self.config.set_depth_limit(depth_limit);
    }

    #[must_use]
    pub fn fill_private_fields(&self) -> bool {
        self.config.fill_private_fields()
    }

    pub fn set_fill_private_fields(&mut self, fill: bool) {
        self.config.set_fill_private_fields(fill);
    }

    // ── Decisions ────────────────────────────────────────────────────────

    /// Uniform size in `[min, max]` from the decision generator.
    ///
    /// Does not touch the cursor.
    pub fn random_size(&mut self, min: usize, max: usize) -> usize {
        self.decisions.random_size(min, max)
    }

    /// `true` with probability `p` from the decision generator.
    ///
    /// Does not touch the cursor.
    pub fn random_bool(&mut self, p: f32) -> bool {
        self.decisions.random_bool(p)
    }

    /// Length for a `Vec` or byte blob, drawn from the slice bounds.
    pub fn slice_len(&mut self) -> usize {
        let (min, max) = self.config.slice_bounds();
        self.random_size(min, max)
    }

    /// Entry count for a map, drawn from the map bounds.
    pub fn map_len(&mut self) -> usize {
        let (min, max) = self.config.map_bounds();
        self.random_size(min, max)
    }

    /// Byte length for a string, drawn from the string bounds.
    pub fn string_len(&mut self) -> usize {
        let (min, max) = self.config.string_bounds();
        self.random_size(min, max)
    }

    /// Whether the next `Vec` should come out empty.
    pub fn slice_is_nil(&mut self) -> bool {
        self.random_bool(self.config.slice_nil_bias())
    }

    /// Whether the next map should come out empty.
    pub fn map_is_nil(&mut self) -> bool {
        self.random_bool(self.config.map_nil_bias())
    }

    /// Whether the next `Option` should come out `None`.
    pub fn ptr_is_nil(&mut self) -> bool {
        self.random_bool(self.config.ptr_nil_bias())
    }

    /// Whether the next record field should be left untouched.
    pub fn skip_field(&mut self) -> bool {
        self.random_bool(self.config.skip_field_bias())
    }

    // ── Primitive accessors ──────────────────────────────────────────────

    /// Read exactly `length` bytes, borrowed from the input.
    ///
    /// # Errors
    ///
    /// Returns [`FillError::Cursor`] if fewer than `length` bytes remain.
    pub fn get_n_bytes(&mut self, length: usize) -> Result<&'a [u8], FillError> {
        Ok(self.cursor.read_bytes(length)?)
    }

    /// Read a blob whose length is drawn from the slice bounds.
    ///
    /// # Errors
    ///
    /// Returns [`FillError::Cursor`] if the drawn length exceeds the
    /// remaining input.
    pub fn get_bytes(&mut self) -> Result<&'a [u8], FillError> {
        let len = self.slice_len();
        self.get_n_bytes(len)
    }

    /// Read `length` bytes as text.
    ///
    /// Rust strings must be UTF-8: valid input is borrowed unchanged,
    /// invalid sequences become U+FFFD. The cursor always advances by
    /// exactly `length` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FillError::Cursor`] if fewer than `length` bytes remain.
    pub fn get_fixed_string(&mut self, length: usize) -> Result<Cow<'a, str>, FillError> {
        Ok(String::from_utf8_lossy(self.get_n_bytes(length)?))
    }

    /// Read a string whose byte length is drawn from the string bounds.
    ///
    /// # Errors
    ///
    /// Returns [`FillError::Cursor`] if the drawn length exceeds the
    /// remaining input.
    pub fn get_string(&mut self) -> Result<Cow<'a, str>, FillError> {
        let len = self.string_len();
        self.get_fixed_string(len)
    }

    /// # Errors
    ///
    /// Returns [`FillError::Cursor`] if the input is exhausted.
    pub fn get_byte(&mut self) -> Result<u8, FillError> {
        Ok(self.cursor.read_byte()?)
    }

    /// Read one byte; `true` iff it is even.
    ///
    /// # Errors
    ///
    /// Returns [`FillError::Cursor`] if the input is exhausted.
    pub fn get_bool(&mut self) -> Result<bool, FillError> {
        Ok(self.cursor.read_bool()?)
    }

    /// # Errors
    ///
    /// Returns [`FillError::Cursor`] if the input is exhausted.
    pub fn get_u8(&mut self) -> Result<u8, FillError> {
        self.get_byte()
    }

    /// # Errors
    ///
    /// Returns [`FillError::Cursor`] if the input is exhausted.
    pub fn get_i8(&mut self) -> Result<i8, FillError> {
        Ok(self.cursor.read_i8()?)
    }

    /// # Errors
    ///
    /// Returns [`FillError::Cursor`] if fewer than 2 bytes remain.
    pub fn get_u16(&mut self) -> Result<u16, FillError> {
        Ok(self.cursor.read_u16()?)
    }

    /// # Errors
    ///
    /// Returns [`FillError::Cursor`] if fewer than 2 bytes remain.
    pub fn get_i16(&mut self) -> Result<i16, FillError> {
        Ok(self.cursor.read_i16()?)
    }

    /// # Errors
    ///
    /// Returns [`FillError::Cursor`] if fewer than 4 bytes remain.
    pub fn get_u32(&mut self) -> Result<u32, FillError> {
        Ok(self.cursor.read_u32()?)
    }

    /// # Errors
    ///
    /// Returns [`FillError::Cursor`] if fewer than 4 bytes remain.
    pub fn get_i32(&mut self) -> Result<i32, FillError> {
        Ok(self.cursor.read_i32()?)
    }

    /// # Errors
    ///
    /// Returns [`FillError::Cursor`] if fewer than 8 bytes remain.
    pub fn get_u64(&mut self) -> Result<u64, FillError> {
        Ok(self.cursor.read_u64()?)
    }

    /// # Errors
    ///
    /// Returns [`FillError::Cursor`] if fewer than 8 bytes remain.
    pub fn get_i64(&mut self) -> Result<i64, FillError> {
        Ok(self.cursor.read_i64()?)
    }

    /// Read 8 bytes and truncate to the platform's pointer width.
    ///
    /// # Errors
    ///
    /// Returns [`FillError::Cursor`] if fewer than 8 bytes remain.
    #[allow(clippy::cast_possible_truncation)]
    pub fn get_usize(&mut self) -> Result<usize, FillError> {
        Ok(self.get_u64()? as usize)
    }

    /// Read 8 bytes and truncate to the platform's pointer width.
    ///
    /// # Errors
    ///
    /// Returns [`FillError::Cursor`] if fewer than 8 bytes remain.
    #[allow(clippy::cast_possible_truncation)]
    pub fn get_isize(&mut self) -> Result<isize, FillError> {
        Ok(self.get_i64()? as isize)
    }

    /// # Errors
    ///
    /// Returns [`FillError::Cursor`] if fewer than 4 bytes remain.
    pub fn get_f32(&mut self) -> Result<f32, FillError> {
        Ok(self.cursor.read_f32()?)
    }

    /// # Errors
    ///
    /// Returns [`FillError::Cursor`] if fewer than 8 bytes remain.
    pub fn get_f64(&mut self) -> Result<f64, FillError> {
        Ok(self.cursor.read_f64()?)
    }

    // ── Generic population ───────────────────────────────────────────────

    /// Populate `target` in place, recursing through its shape.
    ///
    /// The top-level target sits at depth 0. On error the target may be
    /// partially filled and should be discarded.
    ///
    /// # Errors
    ///
    /// Returns [`FillError::Cursor`] as soon as any read runs out of input.
    pub fn fill<T: Fill + ?Sized>(&mut self, target: &mut T) -> Result<(), FillError> {
        target.fill(self, 0)
    }

    /// Start filling a record that sits at `depth`.
    ///
    /// Returns `None` once the depth limit is reached; the record is then
    /// left entirely as it is. Fields filled through the returned
    /// [`RecordFill`] are visited at `depth + 1`.
    pub fn record(&mut self, depth: usize) -> Option<RecordFill<'_, 'a>> {
        if self.config.allows_depth(depth) {
            Some(RecordFill::new(self, depth + 1))
        } else {
            None
        }
    }
}
