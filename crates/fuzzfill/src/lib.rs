#![warn(clippy::pedantic)]

// Lets `#[derive(Fill)]` expand to `::fuzzfill::...` paths inside this crate too.
extern crate self as fuzzfill;

pub mod complex;
pub mod config;
pub mod decision;
pub mod error;
pub mod fill;
pub mod provider;
pub mod record;

pub use complex::Complex;
pub use config::{ConfigError, ProviderConfig};
pub use decision::DecisionGenerator;
pub use error::FillError;
pub use fill::Fill;
pub use fuzzfill_cursor::{ByteCursor, CursorError};
pub use fuzzfill_derive::Fill;
pub use provider::{SEED_SIZE, TypeProvider};
pub use record::RecordFill;
