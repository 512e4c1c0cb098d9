use std::ffi::CString;
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::os::fd::{FromRawFd, OwnedFd};
use std::path::{Path, PathBuf};

use fuzzfill::TypeProvider;
use tracing::debug;

use crate::error::MemFileError;

/// An anonymous, memory-backed file holding a copy of some fuzz bytes.
///
/// Created with `memfd_create(2)`. The file never appears in any mounted
/// filesystem, but it can be opened by path through
/// `/proc/self/fd/<fd>` for as long as this value is alive. Dropping it
/// closes the descriptor and frees the memory.
///
/// ```text
///   TypeProvider::get_bytes() ──► MemFile::new ──► memfd "fuzzfill-file"
///                                                    │
///                              path() = /proc/self/fd/N
/// ```
#[derive(Debug)]
pub struct MemFile {
    file: File,
    path: PathBuf,
}

impl MemFile {
    /// Create an anonymous file named `name` containing `contents`.
    ///
    /// `name` only shows up as the `memfd:` link target under
    /// `/proc/self/fd`; several files may share it. The file offset is
    /// left at 0 so the handle can be read straight away.
    ///
    /// # Errors
    ///
    /// - [`MemFileError::Empty`] if `contents` is empty.
    /// - [`MemFileError::InvalidName`] if `name` contains a NUL byte.
    /// - [`MemFileError::Io`] if the syscall or the write fails.
    pub fn new(name: &str, contents: &[u8]) -> Result<Self, MemFileError> {
        if contents.is_empty() {
            return Err(MemFileError::Empty);
        }

        let c_name = CString::new(name).map_err(|_| MemFileError::InvalidName {
            name: name.to_owned(),
        })?;

        // SAFETY: `c_name` is a valid NUL-terminated string that outlives the call.
        let fd = unsafe { libc::memfd_create(c_name.as_ptr(), libc::MFD_CLOEXEC) };
        if fd < 0 {
            return Err(std::io::Error::last_os_error().into());
        }

        // SAFETY: `fd` was just returned by memfd_create and has no other owner.
        let mut file = File::from(unsafe { OwnedFd::from_raw_fd(fd) });
        file.write_all(contents)?;
        file.seek(SeekFrom::Start(0))?;

        let path = PathBuf::from(format!("/proc/self/fd/{fd}"));
        debug!(name, fd, len = contents.len(), "created memory file");

        Ok(Self { file, path })
    }

    /// Path that opens this file while it is alive.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Borrow the underlying handle.
    #[must_use]
    pub fn file(&self) -> &File {
        &self.file
    }

    /// Give up the path and keep only the handle.
    #[must_use]
    pub fn into_file(self) -> File {
        self.file
    }
}

/// Memory-file accessors for [`TypeProvider`].
///
/// Both draw the file length from the slice bounds and consume the bytes
/// exactly like [`TypeProvider::get_bytes`].
pub trait MemFileExt {
    /// Read a blob and expose it as a path under `/proc/self/fd`.
    ///
    /// The returned [`MemFile`] must be kept alive while the path is in use.
    ///
    /// # Errors
    ///
    /// [`MemFileError::Fill`] if the input runs out, [`MemFileError::Empty`]
    /// if the drawn length is 0, [`MemFileError::Io`] on syscall failure.
    fn get_file_path(&mut self) -> Result<MemFile, MemFileError>;

    /// Read a blob and return it as an open [`File`] positioned at 0.
    ///
    /// # Errors
    ///
    /// Same as [`get_file_path`](Self::get_file_path).
    fn get_file(&mut self) -> Result<File, MemFileError>;
}

impl MemFileExt for TypeProvider<'_> {
    fn get_file_path(&mut self) -> Result<MemFile, MemFileError> {
        let bytes = self.get_bytes()?;
        MemFile::new("fuzzfill-filepath", bytes)
    }

    fn get_file(&mut self) -> Result<File, MemFileError> {
        let bytes = self.get_bytes()?;
        Ok(MemFile::new("fuzzfill-file", bytes)?.into_file())
    }
}
