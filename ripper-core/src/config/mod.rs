//! Machine configuration
//!
//! Type definitions, the `machine.toml` parser and startup validation.

pub mod parse;
pub mod types;
pub mod validate;

pub use parse::{parse_config, ParseError};
pub use types::*;
pub use validate::{ConfigError, ValidationErrors, MAX_CONFIG_ERRORS};
