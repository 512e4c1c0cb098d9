use fuzzfill_cursor::CursorError;

use crate::config::ConfigError;

/// Errors returned by [`TypeProvider`](crate::TypeProvider) reads and fills.
///
/// Errors are returned to the immediate caller and nothing else happens:
/// no retry, no rollback of a partially filled target, no logging. A
/// caller that gets an error back from `fill` should discard the target.
///
/// ```text
///   FillError
///   ├── InsufficientSeedData        ← input shorter than the 8-byte seed
///   ├── Cursor(CursorError)         ← EndOfStream / InvalidRequest
///   └── InvalidConfiguration(..)    ← bad bounds or bias handed to a setter
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FillError {
    /// The input buffer cannot supply the seed for the decision generator.
    #[error("insufficient seed data: need 8 bytes, got {len}")]
    InsufficientSeedData { len: usize },

    /// A read ran past the end of the buffer (or asked for an impossible
    /// length).
    #[error(transparent)]
    Cursor(#[from] CursorError),

    /// A configuration value was rejected before any read happened.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

impl FillError {
    /// Whether this error means the input ran out of bytes.
    ///
    /// Fuzz harnesses usually treat this as "input too short, ignore".
    #[must_use]
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::Cursor(CursorError::EndOfStream { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_error_message() {
        let err = FillError::InsufficientSeedData { len: 3 };
        insta::assert_snapshot!(err.to_string(), @"insufficient seed data: need 8 bytes, got 3");
    }

    #[test]
    fn cursor_errors_are_transparent() {
        let err: FillError = CursorError::EndOfStream {
            requested: 2,
            position: 9,
            len: 10,
        }
        .into();
        assert!(err.is_end_of_stream());
        insta::assert_snapshot!(
            err.to_string(),
            @"end of stream reached: could not read 2 bytes (position: 9 / length: 10)"
        );
    }

    #[test]
    fn config_errors_wrap() {
        let err: FillError = ConfigError::InvalidBounds {
            parameter: "slice",
            min: 4,
            max: 1,
        }
        .into();
        assert!(!err.is_end_of_stream());
        insta::assert_snapshot!(
            err.to_string(),
            @"invalid configuration: invalid slice bounds: min 4 > max 1"
        );
    }
}
