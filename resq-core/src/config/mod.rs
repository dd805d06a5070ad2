//! Configuration types
//!
//! Every threshold and timing the alert logic uses, with defaults matching
//! the field-tested helmet, plus the parser for the embedded `device.toml`.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
