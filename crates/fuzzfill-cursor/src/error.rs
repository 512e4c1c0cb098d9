/// Errors produced by [`ByteCursor`](crate::ByteCursor) reads.
///
/// Every variant carries the cursor position at the time of the failed
/// read so a caller can tell where in the fuzz input the stream ran dry.
///
/// ```text
///   CursorError
///   ├── EndOfStream     ← fewer bytes left than requested
///   └── InvalidRequest  ← position + requested overflows usize
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// Fewer than `requested` bytes remain after `position`.
    ///
    /// The cursor is left where it was; a failed read never consumes
    /// any bytes.
    #[error("end of stream reached: could not read {requested} bytes (position: {position} / length: {len})")]
    EndOfStream {
        requested: usize,
        position: usize,
        len: usize,
    },

    /// The requested length cannot be added to the current position
    /// without overflowing.
    #[error("invalid read request of {requested} bytes at position {position}")]
    InvalidRequest { requested: usize, position: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_of_stream_message_names_offsets() {
        let err = CursorError::EndOfStream {
            requested: 4,
            position: 6,
            len: 8,
        };
        assert_eq!(
            err.to_string(),
            "end of stream reached: could not read 4 bytes (position: 6 / length: 8)"
        );
    }

    #[test]
    fn invalid_request_message() {
        let err = CursorError::InvalidRequest {
            requested: usize::MAX,
            position: 1,
        };
        assert!(err.to_string().starts_with("invalid read request"));
    }
}
