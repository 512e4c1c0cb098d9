use fuzzfill::FillError;

/// Errors from creating an anonymous in-memory file.
///
/// ```text
///   MemFileError
///   ├── Empty        ← nothing to put in the file
///   ├── InvalidName  ← debug name contains a NUL byte
///   ├── Fill         ← the provider could not supply the bytes
///   └── Io           ← memfd_create or the write failed
/// ```
#[derive(Debug, thiserror::Error)]
pub enum MemFileError {
    /// Zero-length contents are rejected; callers expecting a file
    /// usually choke on an empty one before doing anything interesting.
    #[error("empty input to memory file")]
    Empty,

    #[error("memory file name {name:?} contains a NUL byte")]
    InvalidName { name: String },

    #[error(transparent)]
    Fill(#[from] FillError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
