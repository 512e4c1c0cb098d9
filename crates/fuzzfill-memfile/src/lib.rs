#![warn(clippy::pedantic)]
#![cfg(target_os = "linux")]

pub mod error;
pub mod memfile;

pub use error::MemFileError;
pub use memfile::{MemFile, MemFileExt};
