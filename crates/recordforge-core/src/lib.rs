//! Core contracts for Recordforge.
//!
//! This crate defines the values emitted by field types and the `Record`
//! container that factories assemble them into. It has no notion of
//! randomness; generation lives in `recordforge-generate`.

pub mod error;
pub mod record;
pub mod value;

pub use error::{Error, Result};
pub use record::Record;
pub use value::{DATETIME_FORMAT, Value};
