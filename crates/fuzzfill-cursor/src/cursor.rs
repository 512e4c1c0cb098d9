use crate::error::CursorError;

/// Bounds-checked, forward-only reader over a fuzz input buffer.
///
/// `ByteCursor` borrows the input slice and keeps a single read offset.
/// Every read checks `position + n <= len` before touching the buffer and
/// advances the offset by exactly `n` on success. A failed read leaves the
/// offset untouched. The only way back is [`rewind`](Self::rewind), which
/// returns to offset 0.
///
/// All multi-byte numbers are big-endian. Floats are the IEEE-754 bit
/// pattern of the same-width unsigned integer, not a textual conversion.
///
/// ```text
///   buf:  ┌────┬────┬────┬────┬────┬────┬────┬────┐
///         │ FF │ FE │ FD │ FC │ FB │ FA │ F9 │ F8 │
///         └────┴────┴────┴────┴────┴────┴────┴────┘
///                     ▲
///                     pos = 2
///
///   read_u16() → 0xFDFC, pos = 4
/// ```
///
/// # Usage pattern
///
/// ```rust
/// use fuzzfill_cursor::ByteCursor;
///
/// let data = [0x01, 0x02, 0x03];
/// let mut cursor = ByteCursor::new(&data);
/// assert_eq!(cursor.read_u16().unwrap(), 0x0102);
/// assert_eq!(cursor.bytes_left(), 1);
/// assert!(cursor.read_u16().is_err());
/// assert_eq!(cursor.read_bytes(0).unwrap(), &[] as &[u8]);
/// ```
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current read offset from the start of the buffer.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes that can still be read.
    #[must_use]
    pub fn bytes_left(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Total length of the underlying buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the underlying buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Return the remaining unread bytes without consuming them.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Move the read offset back to the start of the buffer.
    pub fn rewind(&mut self) {
        self.pos = 0;
    }

    /// Check that `requested` bytes can be read from the current offset.
    fn check(&self, requested: usize) -> Result<usize, CursorError> {
        let end = self
            .pos
            .checked_add(requested)
            .ok_or(CursorError::InvalidRequest {
                requested,
                position: self.pos,
            })?;

        if end > self.buf.len() {
            return Err(CursorError::EndOfStream {
                requested,
                position: self.pos,
                len: self.buf.len(),
            });
        }

        Ok(end)
    }

    /// Read exactly `n` bytes and advance past them.
    ///
    /// The returned slice borrows from the original buffer; no copy is
    /// made. A request for 0 bytes always succeeds, even at end of stream.
    ///
    /// # Errors
    ///
    /// - [`CursorError::EndOfStream`] if fewer than `n` bytes remain.
    /// - [`CursorError::InvalidRequest`] if `position + n` overflows.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], CursorError> {
        let end = self.check(n)?;
        let out = &self.buf[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    /// Read a fixed-size array of `N` bytes.
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CursorError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a single byte.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::EndOfStream`] if the buffer is exhausted.
    pub fn read_byte(&mut self) -> Result<u8, CursorError> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    /// Read one byte as a boolean: `true` iff the byte is even.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::EndOfStream`] if the buffer is exhausted.
    pub fn read_bool(&mut self) -> Result<bool, CursorError> {
        Ok(self.read_byte()? % 2 == 0)
    }

    /// Read an `i8` (one byte, two's complement).
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::EndOfStream`] if the buffer is exhausted.
    pub fn read_i8(&mut self) -> Result<i8, CursorError> {
        Ok(i8::from_be_bytes(self.read_array()?))
    }

    /// Read a big-endian `u16`.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::EndOfStream`] if fewer than 2 bytes remain.
    pub fn read_u16(&mut self) -> Result<u16, CursorError> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    /// Read a big-endian `i16`.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::EndOfStream`] if fewer than 2 bytes remain.
    pub fn read_i16(&mut self) -> Result<i16, CursorError> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    /// Read a big-endian `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::EndOfStream`] if fewer than 4 bytes remain.
    pub fn read_u32(&mut self) -> Result<u32, CursorError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Read a big-endian `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::EndOfStream`] if fewer than 4 bytes remain.
    pub fn read_i32(&mut self) -> Result<i32, CursorError> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    /// Read a big-endian `u64`.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::EndOfStream`] if fewer than 8 bytes remain.
    pub fn read_u64(&mut self) -> Result<u64, CursorError> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    /// Read a big-endian `i64`.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::EndOfStream`] if fewer than 8 bytes remain.
    pub fn read_i64(&mut self) -> Result<i64, CursorError> {
        Ok(i64::from_be_bytes(self.read_array()?))
    }

    /// Read an `f32` from the bit pattern of a big-endian `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::EndOfStream`] if fewer than 4 bytes remain.
    pub fn read_f32(&mut self) -> Result<f32, CursorError> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    /// Read an `f64` from the bit pattern of a big-endian `u64`.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::EndOfStream`] if fewer than 8 bytes remain.
    pub fn read_f64(&mut self) -> Result<f64, CursorError> {
        Ok(f64::from_bits(self.read_u64()?))
    }
}
